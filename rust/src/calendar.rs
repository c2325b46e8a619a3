//! Projection of a computed schedule onto calendar dates.
//!
//! Durations are treated as days. Offsets are rounded up to whole days and
//! counted from the project start date, optionally skipping weekends.

use chrono::{Datelike, Days, NaiveDate, Weekday};
use thiserror::Error;

use crate::config::CalendarConfig;
use crate::graph::ActivityGraph;
use crate::models::ScheduledActivity;

/// Absorbs float noise in offsets before rounding up to whole days.
const DAY_EPSILON: f64 = 1e-9;

/// Errors that can occur while placing a schedule on the calendar.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CalendarError {
    #[error("Schedule has not been computed")]
    NotScheduled,
    #[error("Offset of {offset_days} days from {start} is outside the supported date range")]
    DateOutOfRange { start: NaiveDate, offset_days: u64 },
}

/// Convert every activity's timing into dates, in insertion order.
pub fn project_onto_calendar(
    graph: &ActivityGraph,
    start: NaiveDate,
    config: &CalendarConfig,
) -> Result<Vec<ScheduledActivity>, CalendarError> {
    if graph.summary().is_none() {
        return Err(CalendarError::NotScheduled);
    }

    let to_date = |offset: f64| offset_date(start, offset, config.skip_weekends);

    let mut scheduled = Vec::with_capacity(graph.len());
    for (name, node) in graph.activity_names().zip(graph.arena()) {
        let timing = &node.timing;
        scheduled.push(ScheduledActivity {
            activity_id: name.to_string(),
            earliest_start: to_date(timing.earliest_start)?,
            earliest_finish: to_date(timing.earliest_finish)?,
            latest_start: to_date(timing.latest_start)?,
            latest_finish: to_date(timing.latest_finish)?,
            slack_days: timing.slack,
            critical: timing.critical,
        });
    }
    Ok(scheduled)
}

fn offset_date(start: NaiveDate, offset: f64, skip_weekends: bool) -> Result<NaiveDate, CalendarError> {
    let days = (offset - DAY_EPSILON).max(0.0).ceil() as u64;
    let date = if skip_weekends {
        add_working_days(start, days)
    } else {
        start.checked_add_days(Days::new(days))
    };
    date.ok_or(CalendarError::DateOutOfRange {
        start,
        offset_days: days,
    })
}

/// Advance by `days` working days. A weekend start moves to the next Monday first.
fn add_working_days(start: NaiveDate, days: u64) -> Option<NaiveDate> {
    let mut date = start;
    while is_weekend(date) {
        date = date.succ_opt()?;
    }

    let mut remaining = days;
    while remaining > 0 {
        date = date.succ_opt()?;
        if !is_weekend(date) {
            remaining -= 1;
        }
    }
    Some(date)
}

fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}
