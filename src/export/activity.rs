use crate::error::Result;
use crate::export::convert::{self, BatchBuilder};
use crate::export::HealthExport;
use arrow::record_batch::RecordBatch;
use tracing::debug;

pub const DATE_COLUMN: &str = "dateComponents";

pub const NUMERIC_COLUMNS: [&str; 8] = [
    "activeEnergyBurned",
    "activeEnergyBurnedGoal",
    "appleExerciseTime",
    "appleMoveTime",
    "appleMoveTimeGoal",
    "appleExerciseTimeGoal",
    "appleStandHours",
    "appleStandHoursGoal",
];

impl HealthExport {
    /// Daily activity rings with `dateComponents` as `Date32` and the ring
    /// values and goals as `Float64`. Anything that does not parse is null.
    pub fn activity(&self) -> Result<RecordBatch> {
        let activity = self.activity_table();
        let mut out = BatchBuilder::new(activity.len());

        for name in &activity.headers {
            let cells = activity.column(name);
            let col = if name == DATE_COLUMN {
                convert::date_column(cells)
            } else if NUMERIC_COLUMNS.contains(&name.as_str()) {
                convert::float_column(cells)
            } else {
                convert::utf8_column(cells)
            };
            out.push(name, col);
        }

        if !out.contains(DATE_COLUMN) {
            out.push(DATE_COLUMN, convert::date_column(activity.column(DATE_COLUMN)));
        }
        for name in NUMERIC_COLUMNS {
            if !out.contains(name) {
                out.push(name, convert::float_column(activity.column(name)));
            }
        }

        debug!(rows = activity.len(), "built activity view");
        out.finish()
    }
}
