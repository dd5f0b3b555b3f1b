pub mod config;
pub mod error;
pub mod export;
pub mod utils;

pub use error::{HealthError, Result};
pub use export::{Age, HealthExport, RawTable, RecordKind, UsageSummary};
pub use utils::{hours_to_string, safe_access, Lookup, LookupError};
