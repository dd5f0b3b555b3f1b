use thiserror::Error;
use tracing::trace;

/// Why a single field lookup came back empty.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    /// No record of the requested kind/type was available.
    #[error("no {0} record")]
    MissingRecord(String),

    /// The record exists but does not carry the attribute.
    #[error("attribute {0} not present")]
    MissingField(String),

    /// The attribute exists but could not be coerced.
    #[error("cannot coerce {field}={value:?}")]
    Coercion { field: String, value: String },
}

/// A value, or the reason it is missing.
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup<T> {
    Found(T),
    Missing(LookupError),
}

impl<T> Lookup<T> {
    pub fn ok(self) -> Option<T> {
        match self {
            Lookup::Found(v) => Some(v),
            Lookup::Missing(_) => None,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Lookup::Missing(_))
    }

    pub fn reason(&self) -> Option<&LookupError> {
        match self {
            Lookup::Found(_) => None,
            Lookup::Missing(e) => Some(e),
        }
    }
}

impl<T> From<Result<T, LookupError>> for Lookup<T> {
    fn from(res: Result<T, LookupError>) -> Self {
        match res {
            Ok(v) => Lookup::Found(v),
            Err(e) => Lookup::Missing(e),
        }
    }
}

/// Run `f`, turning any lookup failure into `Lookup::Missing` instead of
/// propagating it.
pub fn safe_access<T, F>(f: F) -> Lookup<T>
where
    F: FnOnce() -> Result<T, LookupError>,
{
    match f() {
        Ok(v) => Lookup::Found(v),
        Err(e) => {
            trace!(reason = %e, "lookup absorbed");
            Lookup::Missing(e)
        }
    }
}

/// Numeric cell value; `NaN` counts as missing like anything unparsable.
pub fn parse_number(raw: &str) -> Option<f64> {
    clean_str(raw).parse::<f64>().ok().filter(|v| !v.is_nan())
}

/// Parse a numeric attribute value, reporting which field failed.
pub fn parse_f64(field: &str, raw: &str) -> Result<f64, LookupError> {
    parse_number(raw).ok_or_else(|| LookupError::Coercion {
        field: field.to_string(),
        value: raw.to_string(),
    })
}

/// Trim whitespace + strip outer quotes if present.
pub fn clean_str(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.starts_with('"') && trimmed.ends_with('"') && trimmed.len() >= 2 {
        trimmed[1..trimmed.len() - 1].to_string()
    } else {
        trimmed.to_string()
    }
}

/// `HKWorkoutActivityTypeRunning` → `Running` for the given prefix.
pub fn strip_type_prefix<'a>(value: &'a str, prefix: &str) -> &'a str {
    value.strip_prefix(prefix).unwrap_or(value)
}

/// Render fractional hours for people.
///
/// Below one hour only whole (truncated) minutes are shown, e.g. `"30minutes"`.
/// Otherwise `"2 hours and 15.0 minutes"`: hours truncated, the minute
/// remainder rounded half-to-even. A whole number of hours reads
/// `"1 hour and 0 minutes"`.
pub fn hours_to_string(value: f64) -> String {
    if value < 1.0 {
        return format!("{}minutes", (value * 60.0).trunc() as i64);
    }

    let hours = value.trunc();
    let minutes = ((value - hours) * 60.0).round_ties_even();
    let unit = if hours == 1.0 { "hour" } else { "hours" };
    let minutes = if minutes == 0.0 {
        "0".to_string()
    } else {
        format!("{:.1}", minutes)
    };
    format!("{} {} and {} minutes", hours as i64, unit, minutes)
}
