use crate::error::Result;
use arrow::{
    array::{ArrayRef, StringBuilder},
    datatypes::{DataType, Field, Schema},
    record_batch::{RecordBatch, RecordBatchOptions},
};
use std::{collections::HashMap, fmt, sync::Arc};

/// The four element kinds the loader turns into tables.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RecordKind {
    Workout,
    WorkoutStatistic,
    ActivitySummary,
    Me,
}

impl RecordKind {
    pub const ALL: [RecordKind; 4] = [
        RecordKind::Workout,
        RecordKind::WorkoutStatistic,
        RecordKind::ActivitySummary,
        RecordKind::Me,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RecordKind::Workout => "Workout",
            RecordKind::WorkoutStatistic => "WorkoutStatistic",
            RecordKind::ActivitySummary => "ActivitySummary",
            RecordKind::Me => "Me",
        }
    }

    /// Whether an element tag belongs to this kind. Statistics appear as
    /// both `WorkoutStatistic` and `WorkoutStatistics` depending on the export.
    pub fn matches_tag(&self, tag: &str) -> bool {
        match self {
            RecordKind::WorkoutStatistic => tag == "WorkoutStatistic" || tag == "WorkoutStatistics",
            other => tag == other.as_str(),
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Attribute rows for one record kind.
#[derive(Debug, Clone)]
pub struct RawTable {
    pub kind: RecordKind,
    /// Union of attribute names, in the order they were first seen.
    pub headers: Vec<String>,
    /// One entry per element. A row may be shorter than `headers` when later
    /// elements introduced new attributes; missing trailing cells are `None`.
    pub rows: Vec<Vec<Option<String>>>,
    index: HashMap<String, usize>,
}

impl RawTable {
    pub fn new(kind: RecordKind) -> Self {
        Self {
            kind,
            headers: Vec::new(),
            rows: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Append one element's attributes as a row.
    pub fn push_record<'a, I>(&mut self, attrs: I)
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut row: Vec<Option<String>> = vec![None; self.headers.len()];
        for (name, value) in attrs {
            let col = match self.index.get(name) {
                Some(&i) => i,
                None => {
                    self.headers.push(name.to_string());
                    self.index.insert(name.to_string(), self.headers.len() - 1);
                    self.headers.len() - 1
                }
            };
            if row.len() <= col {
                row.resize(col + 1, None);
            }
            row[col] = Some(value.to_string());
        }
        self.rows.push(row);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    /// Cell by row number and column name.
    pub fn value(&self, row: usize, name: &str) -> Option<&str> {
        let col = self.column_index(name)?;
        self.cell(row, col)
    }

    fn cell(&self, row: usize, col: usize) -> Option<&str> {
        self.rows.get(row)?.get(col)?.as_deref()
    }

    /// All cells of a column, one per row; an unknown column yields all `None`.
    pub fn column(&self, name: &str) -> Vec<Option<&str>> {
        match self.column_index(name) {
            Some(col) => (0..self.len()).map(|r| self.cell(r, col)).collect(),
            None => vec![None; self.len()],
        }
    }

    /// The table as nullable `Utf8` columns, exactly as read.
    pub fn to_record_batch(&self) -> Result<RecordBatch> {
        let fields: Vec<Field> = self
            .headers
            .iter()
            .map(|h| Field::new(h, DataType::Utf8, true))
            .collect();

        let mut columns: Vec<ArrayRef> = Vec::with_capacity(self.headers.len());
        for col in 0..self.headers.len() {
            let mut b = StringBuilder::new();
            for row in 0..self.len() {
                b.append_option(self.cell(row, col));
            }
            columns.push(Arc::new(b.finish()) as ArrayRef);
        }

        let options = RecordBatchOptions::new().with_row_count(Some(self.len()));
        let batch =
            RecordBatch::try_new_with_options(Arc::new(Schema::new(fields)), columns, &options)?;
        Ok(batch)
    }
}
