use crate::error::Result;
use crate::export::date_parser;
use crate::utils::{clean_str, parse_number};
use arrow::{
    array::{
        Array, ArrayRef, Date32Builder, Float64Builder, StringBuilder,
        TimestampMillisecondBuilder,
    },
    datatypes::{Field, Schema},
    record_batch::{RecordBatch, RecordBatchOptions},
};
use std::sync::Arc;

/// Timestamps are normalised to UTC millis.
pub const TIMESTAMP_TZ: &str = "+00:00";

/// String cells → timestamp column; unparsable cells become null.
pub fn timestamp_column<'a>(cells: impl IntoIterator<Item = Option<&'a str>>) -> ArrayRef {
    let mut b = TimestampMillisecondBuilder::new();
    for opt in cells {
        let ts = opt.and_then(|s| date_parser::parse_timestamp_millis(&clean_str(s)));
        b.append_option(ts);
    }
    Arc::new(b.finish().with_timezone(TIMESTAMP_TZ))
}

/// String cells → calendar-date column; unparsable cells become null.
pub fn date_column<'a>(cells: impl IntoIterator<Item = Option<&'a str>>) -> ArrayRef {
    let mut b = Date32Builder::new();
    for opt in cells {
        let d = opt.and_then(|s| date_parser::parse_date(&clean_str(s)));
        b.append_option(d.map(date_parser::days_since_epoch));
    }
    Arc::new(b.finish())
}

/// String cells → f64 column; unparsable cells and `NaN` become null.
pub fn float_column<'a>(cells: impl IntoIterator<Item = Option<&'a str>>) -> ArrayRef {
    let mut b = Float64Builder::new();
    for opt in cells {
        b.append_option(opt.and_then(parse_number));
    }
    Arc::new(b.finish())
}

pub fn float_values(values: impl IntoIterator<Item = Option<f64>>) -> ArrayRef {
    let mut b = Float64Builder::new();
    for v in values {
        b.append_option(v);
    }
    Arc::new(b.finish())
}

pub fn utf8_column<'a>(cells: impl IntoIterator<Item = Option<&'a str>>) -> ArrayRef {
    let mut b = StringBuilder::new();
    for opt in cells {
        b.append_option(opt);
    }
    Arc::new(b.finish())
}

/// Collects named columns and assembles them into a batch.
pub struct BatchBuilder {
    rows: usize,
    fields: Vec<Field>,
    columns: Vec<ArrayRef>,
}

impl BatchBuilder {
    pub fn new(rows: usize) -> Self {
        Self {
            rows,
            fields: Vec::new(),
            columns: Vec::new(),
        }
    }

    pub fn push(&mut self, name: &str, column: ArrayRef) {
        self.fields
            .push(Field::new(name, column.data_type().clone(), true));
        self.columns.push(column);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.iter().any(|f| f.name() == name)
    }

    pub fn finish(self) -> Result<RecordBatch> {
        let options = RecordBatchOptions::new().with_row_count(Some(self.rows));
        let batch = RecordBatch::try_new_with_options(
            Arc::new(Schema::new(self.fields)),
            self.columns,
            &options,
        )?;
        Ok(batch)
    }
}
