// src/export/mod.rs
pub mod activity;
pub mod convert;
pub mod date_parser;
pub mod raw_table;
pub mod usage;
pub mod workouts;

#[cfg(test)]
pub(crate) mod fixtures;

pub use raw_table::{RawTable, RecordKind};
pub use usage::{Age, UsageSummary};

use crate::error::{ParseError, Result};
use roxmltree::{Document, ParsingOptions};
use std::{collections::BTreeSet, fs, path::Path};
use tracing::{debug, info};

/// A parsed health export: the four raw tables, read once and never mutated.
///
/// Every view (`workouts`, `activity`, `age`, `usage`) is recomputed from these
/// tables on each call.
#[derive(Debug, Clone)]
pub struct HealthExport {
    workouts: RawTable,
    statistics: RawTable,
    activity: RawTable,
    profile: RawTable,
    tags: BTreeSet<String>,
}

impl HealthExport {
    /// Read and parse the export at `path`.
    #[tracing::instrument(level = "info", skip(path), fields(path = %path.as_ref().display()))]
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ParseError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(bytes = text.len(), "read export");
        Self::from_xml_str(&text)
    }

    /// Parse an export already held in memory.
    pub fn from_xml_str(text: &str) -> Result<Self> {
        // exports carry an inline DTD
        let options = ParsingOptions {
            allow_dtd: true,
            ..ParsingOptions::default()
        };
        let doc = Document::parse_with_options(text, options)?;

        let tags: BTreeSet<String> = doc
            .descendants()
            .filter(|n| n.is_element())
            .map(|n| n.tag_name().name().to_string())
            .collect();

        let [workouts, statistics, activity, profile] = RecordKind::ALL.map(|kind| collect(&doc, kind));

        info!(
            workouts = workouts.len(),
            statistics = statistics.len(),
            activity = activity.len(),
            profile = profile.len(),
            "loaded health export"
        );

        Ok(Self {
            workouts,
            statistics,
            activity,
            profile,
            tags,
        })
    }

    pub fn workout_table(&self) -> &RawTable {
        &self.workouts
    }

    pub fn statistics_table(&self) -> &RawTable {
        &self.statistics
    }

    pub fn activity_table(&self) -> &RawTable {
        &self.activity
    }

    pub fn profile_table(&self) -> &RawTable {
        &self.profile
    }

    /// Every distinct element tag in the document, not only the four loaded kinds.
    pub fn record_tags(&self) -> &BTreeSet<String> {
        &self.tags
    }
}

/// One full traversal of the document for a single record kind.
fn collect(doc: &Document<'_>, kind: RecordKind) -> RawTable {
    let mut table = RawTable::new(kind);
    for node in doc
        .descendants()
        .filter(|n| n.is_element() && kind.matches_tag(n.tag_name().name()))
    {
        table.push_record(node.attributes().map(|a| (a.name(), a.value())));
    }
    debug!(kind = %table.kind, rows = table.len(), columns = table.headers.len(), "collected records");
    table
}
