use crate::error::Result;
use crate::export::convert::{self, BatchBuilder};
use crate::export::{date_parser, HealthExport, RawTable};
use crate::utils::{clean_str, parse_f64, safe_access, strip_type_prefix, Lookup, LookupError};
use arrow::record_batch::RecordBatch;
use std::collections::HashMap;
use tracing::debug;

pub const WORKOUT_TYPE_PREFIX: &str = "HKWorkoutActivityType";
pub const STATISTIC_TYPE_PREFIX: &str = "HKQuantityTypeIdentifier";

/// Source metadata left out of the merged view.
pub const DROPPED_COLUMNS: [&str; 3] = ["sourceName", "sourceVersion", "device"];
pub const WORKOUT_DATE_COLUMNS: [&str; 3] = ["creationDate", "startDate", "endDate"];

/// Columns the merged view always carries, even when no workout has them.
const REQUIRED_COLUMNS: [&str; 5] = [
    "workoutActivityType",
    "duration",
    "creationDate",
    "startDate",
    "endDate",
];

/// (output column, statistic type, aggregate attribute)
pub const STATISTIC_COLUMNS: [(&str, &str, &str); 9] = [
    ("activeCalories", "ActiveEnergyBurned", "sum"),
    ("basalCalories", "BasalEnergyBurned", "sum"),
    ("distance", "DistanceWalkingRunning", "sum"),
    ("avgHeartRate", "HeartRate", "average"),
    ("minHeartRate", "HeartRate", "minimum"),
    ("maxHeartRate", "HeartRate", "maximum"),
    ("avgRunSpeed", "RunningSpeed", "average"),
    ("minRunSpeed", "RunningSpeed", "minimum"),
    ("maxRunSpeed", "RunningSpeed", "maximum"),
];

/// Statistics grouped by their parsed start instant.
struct StatisticIndex<'a> {
    table: &'a RawTable,
    types: Vec<Option<&'a str>>,
    by_start: HashMap<i64, Vec<usize>>,
}

impl<'a> StatisticIndex<'a> {
    fn new(table: &'a RawTable) -> Self {
        let types = table
            .column("type")
            .into_iter()
            .map(|t| t.map(|t| strip_type_prefix(t.trim(), STATISTIC_TYPE_PREFIX)))
            .collect();

        let mut by_start: HashMap<i64, Vec<usize>> = HashMap::new();
        for (row, start) in table.column("startDate").into_iter().enumerate() {
            if let Some(ms) = start.and_then(|s| date_parser::parse_timestamp_millis(&clean_str(s))) {
                by_start.entry(ms).or_default().push(row);
            }
        }

        Self {
            table,
            types,
            by_start,
        }
    }

    fn matching(&self, start_ms: Option<i64>) -> &[usize] {
        start_ms
            .and_then(|ms| self.by_start.get(&ms))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Aggregate of the first matched row of `stat_type`.
    fn aggregate(
        &self,
        rows: &[usize],
        stat_type: &str,
        aggregate: &str,
    ) -> std::result::Result<f64, LookupError> {
        let row = rows
            .iter()
            .copied()
            .find(|&r| self.types[r] == Some(stat_type))
            .ok_or_else(|| LookupError::MissingRecord(stat_type.to_string()))?;
        let raw = self
            .table
            .value(row, aggregate)
            .ok_or_else(|| LookupError::MissingField(aggregate.to_string()))?;
        parse_f64(aggregate, raw)
    }
}

/// The nine statistic lookups for one workout, each independent of the others.
fn workout_statistics(index: &StatisticIndex<'_>, rows: &[usize]) -> [Lookup<f64>; 9] {
    STATISTIC_COLUMNS.map(|(_, stat_type, aggregate)| {
        if rows.is_empty() {
            return Lookup::Missing(LookupError::MissingRecord(stat_type.to_string()));
        }
        safe_access(|| index.aggregate(rows, stat_type, aggregate))
    })
}

impl HealthExport {
    /// Workouts joined with their statistics on identical start time.
    ///
    /// One row per `Workout` element in document order. Source metadata columns
    /// are dropped, `Type` carries the activity type without its
    /// `HKWorkoutActivityType` prefix, and nine `Float64` statistic columns plus
    /// `totalCalories` are appended. A workout without matching statistics gets
    /// nulls in all of them.
    pub fn workouts(&self) -> Result<RecordBatch> {
        let workouts = self.workout_table();
        let index = StatisticIndex::new(self.statistics_table());
        let rows = workouts.len();

        let mut out = BatchBuilder::new(rows);
        for name in &workouts.headers {
            if DROPPED_COLUMNS.contains(&name.as_str()) {
                continue;
            }
            out.push(name, workout_column(workouts, name));
        }
        for name in REQUIRED_COLUMNS {
            if !out.contains(name) {
                out.push(name, workout_column(workouts, name));
            }
        }

        let types = workouts.column("workoutActivityType");
        let labels: Vec<Option<&str>> = types
            .iter()
            .map(|t| t.map(|t| strip_type_prefix(t.trim(), WORKOUT_TYPE_PREFIX)))
            .collect();
        out.push("Type", convert::utf8_column(labels));

        let starts = workouts.column("startDate");
        let mut stats: Vec<[Option<f64>; 9]> = Vec::with_capacity(rows);
        let mut unmatched = 0usize;
        for start in starts {
            let start_ms = start.and_then(|s| date_parser::parse_timestamp_millis(&clean_str(s)));
            let matched = index.matching(start_ms);
            if matched.is_empty() {
                unmatched += 1;
            }
            stats.push(workout_statistics(&index, matched).map(Lookup::ok));
        }

        for (i, (name, _, _)) in STATISTIC_COLUMNS.iter().enumerate() {
            out.push(name, convert::float_values(stats.iter().map(|s| s[i])));
        }

        let total = stats.iter().map(|s| match (s[0], s[1]) {
            (Some(active), Some(basal)) => Some(active + basal),
            _ => None,
        });
        out.push("totalCalories", convert::float_values(total));

        debug!(rows, unmatched, "built workout view");
        out.finish()
    }
}

fn workout_column(workouts: &RawTable, name: &str) -> arrow::array::ArrayRef {
    let cells = workouts.column(name);
    if WORKOUT_DATE_COLUMNS.contains(&name) {
        convert::timestamp_column(cells)
    } else if name == "duration" {
        convert::float_column(cells)
    } else {
        convert::utf8_column(cells)
    }
}
