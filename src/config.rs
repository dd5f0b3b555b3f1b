use crate::error::HealthError;
use std::path::PathBuf;

pub const EXPORT_PATH_VAR: &str = "HEALTH_EXPORT_PATH";

#[derive(Clone, Debug)]
pub struct Config {
    pub export_path: PathBuf,
}

impl Config {
    /// First CLI argument wins, then `HEALTH_EXPORT_PATH`.
    pub fn from_args_or_env() -> Result<Self, HealthError> {
        match std::env::args_os().nth(1) {
            Some(arg) => Ok(Self {
                export_path: PathBuf::from(arg),
            }),
            None => Self::from_env(),
        }
    }

    pub fn from_env() -> Result<Self, HealthError> {
        Self::from_env_with(|k| std::env::var(k).ok())
    }

    /// Reads configuration through `get` so tests never touch the process env.
    pub fn from_env_with<F>(mut get: F) -> Result<Self, HealthError>
    where
        F: FnMut(&str) -> Option<String>,
    {
        let path = get(EXPORT_PATH_VAR)
            .filter(|p| !p.trim().is_empty())
            .ok_or_else(|| {
                HealthError::Config(format!(
                    "{} missing (or pass the export path as the first argument)",
                    EXPORT_PATH_VAR
                ))
            })?;
        Ok(Self {
            export_path: PathBuf::from(path),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_env_missing_path() {
        let res = Config::from_env_with(|_| None);
        assert!(matches!(res, Err(HealthError::Config(_))));

        let blank = Config::from_env_with(|_| Some("  ".into()));
        assert!(blank.is_err());
    }

    #[test]
    fn from_env_reads_path() {
        let get = |k: &str| match k {
            EXPORT_PATH_VAR => Some("/tmp/export.xml".into()),
            _ => None,
        };
        let cfg = Config::from_env_with(get).expect("cfg");
        assert_eq!(cfg.export_path, PathBuf::from("/tmp/export.xml"));
    }
}
