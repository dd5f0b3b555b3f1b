use crate::error::{HealthError, Result};
use crate::export::activity::DATE_COLUMN;
use crate::export::{date_parser, HealthExport};
use crate::utils::{clean_str, parse_number, safe_access, Lookup, LookupError};
use chrono::{Datelike, Local, NaiveDate};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, warn};

pub const DATE_OF_BIRTH: &str = "HKCharacteristicTypeIdentifierDateOfBirth";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Age {
    pub years: i32,
    pub is_birthday: bool,
}

/// How long and how often the export's source has been in use.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UsageSummary {
    pub first_use: NaiveDate,
    /// Distinct days with an activity summary.
    pub dates_used: usize,
    /// Days from `first_use` to today.
    pub total_days: i64,
    /// Distinct calendar days on which a workout was recorded.
    pub days_workout_tracked: usize,
    /// Exercise minutes summed over all days, in whole hours.
    pub total_hours: f64,
    pub total_num_workouts: usize,
    /// Month (1-12) with the most activity summaries.
    pub most_active_month: u32,
}

impl HealthExport {
    /// Age today from the profile's date of birth.
    pub fn age(&self) -> Lookup<Age> {
        self.age_on(Local::now().date_naive())
    }

    /// Age on `today`; missing when there is no profile, no date of birth or
    /// it is not a `YYYY-MM-DD` date.
    pub fn age_on(&self, today: NaiveDate) -> Lookup<Age> {
        let profile = self.profile_table();
        safe_access(|| {
            if profile.is_empty() {
                return Err(LookupError::MissingRecord("Me".into()));
            }
            let raw = profile
                .value(0, DATE_OF_BIRTH)
                .ok_or_else(|| LookupError::MissingField(DATE_OF_BIRTH.into()))?;
            let birth =
                date_parser::parse_calendar_date(raw).ok_or_else(|| LookupError::Coercion {
                    field: DATE_OF_BIRTH.into(),
                    value: raw.to_string(),
                })?;
            Ok(age_between(birth, today))
        })
    }

    /// Usage summary as of today.
    pub fn usage(&self) -> Result<UsageSummary> {
        self.usage_on(Local::now().date_naive())
    }

    /// Usage summary as of `today`.
    ///
    /// Fails with [`HealthError::EmptyData`] when no activity summary carries a
    /// parsable date, since there is no first use to measure from.
    pub fn usage_on(&self, today: NaiveDate) -> Result<UsageSummary> {
        let activity = self.activity_table();

        let mut dates: Vec<NaiveDate> = Vec::with_capacity(activity.len());
        for raw in activity.column(DATE_COLUMN).into_iter().flatten() {
            match date_parser::parse_date(&clean_str(raw)) {
                Some(d) => dates.push(d),
                None => warn!(value = raw, "skipping unparsable activity date"),
            }
        }

        let first_use = dates
            .iter()
            .min()
            .copied()
            .ok_or(HealthError::EmptyData("ActivitySummary"))?;
        let dates_used = dates.iter().collect::<BTreeSet<_>>().len();
        let total_days = (today - first_use).num_days();

        let workouts = self.workout_table();
        let days_workout_tracked = workouts
            .column("creationDate")
            .into_iter()
            .flatten()
            .filter_map(|raw| date_parser::parse_timestamp(&clean_str(raw)))
            .map(|dt| dt.date_naive())
            .collect::<BTreeSet<_>>()
            .len();

        let exercise_minutes: f64 = activity
            .column("appleExerciseTime")
            .into_iter()
            .flatten()
            .filter_map(parse_number)
            .sum();
        let total_hours = (exercise_minutes / 60.0).round_ties_even();

        let summary = UsageSummary {
            first_use,
            dates_used,
            total_days,
            days_workout_tracked,
            total_hours,
            total_num_workouts: workouts.len(),
            most_active_month: most_active_month(&dates),
        };
        debug!(?summary, "computed usage");
        Ok(summary)
    }
}

fn age_between(birth: NaiveDate, today: NaiveDate) -> Age {
    let mut years = today.year() - birth.year();
    if (today.month(), today.day()) < (birth.month(), birth.day()) {
        years -= 1;
    }
    Age {
        years,
        is_birthday: today.month() == birth.month() && today.day() == birth.day(),
    }
}

/// Month with the most dates; ties go to the earlier month. `dates` must be non-empty.
fn most_active_month(dates: &[NaiveDate]) -> u32 {
    let mut counts: BTreeMap<u32, usize> = BTreeMap::new();
    for d in dates {
        *counts.entry(d.month()).or_default() += 1;
    }
    let mut best = (0, 0);
    for (month, count) in counts {
        if count > best.1 {
            best = (month, count);
        }
    }
    best.0
}
