use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by the loader and its views.
///
/// Per-field problems never show up here; they become
/// [`Lookup::Missing`](crate::utils::Lookup) values or null cells.
#[derive(Error, Debug)]
pub enum HealthError {
    #[error("cannot load export: {0}")]
    Parse(#[from] ParseError),

    #[error("no usable rows in {0} table")]
    EmptyData(&'static str),

    #[error("arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    #[error("configuration error: {0}")]
    Config(String),
}

/// Why an export could not be turned into tables.
#[derive(Error, Debug)]
pub enum ParseError {
    /// Missing, unreadable, or not UTF-8.
    #[error("cannot read {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed XML: {0}")]
    Xml(#[from] roxmltree::Error),
}

impl From<roxmltree::Error> for HealthError {
    fn from(err: roxmltree::Error) -> Self {
        HealthError::Parse(ParseError::Xml(err))
    }
}

pub type Result<T> = std::result::Result<T, HealthError>;
