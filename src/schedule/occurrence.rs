use std::collections::BTreeMap;

use chrono::{Datelike, Duration, NaiveDate};

use super::course::{Course, SessionSlot};
use super::timeslot::{date_key, duration_hours, parse_date_only};

/// Upper bound on generated occurrences, guarding against runaway windows.
const MAX_GENERATED_OCCURRENCES: usize = 1024;

/// One concrete dated meeting, derived fresh on every enumeration and never
/// persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionOccurrence {
    pub date: NaiveDate,
    pub start_time: String,
    pub end_time: String,
    pub duration_hours: f64,
}

impl SessionOccurrence {
    fn from_parts(date: NaiveDate, start_time: &str, end_time: &str) -> Self {
        Self {
            date,
            start_time: start_time.to_string(),
            end_time: end_time.to_string(),
            duration_hours: duration_hours(start_time, end_time),
        }
    }

    /// Stable key used to record attendance against this occurrence.
    pub fn session_key(&self) -> String {
        date_key(self.date)
    }
}

/// The enumerated schedule of a course: ordered occurrences plus the summed
/// instructional hours.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Schedule {
    pub occurrences: Vec<SessionOccurrence>,
    pub total_hours: f64,
}

impl Schedule {
    pub fn total_sessions(&self) -> usize {
        self.occurrences.len()
    }
}

/// Expands a course into its authoritative session schedule.
///
/// A non-empty explicit session list is used verbatim (normalized, entries
/// with unparseable dates dropped) and the recurrence rule is ignored, so
/// manually edited per-session times survive. Otherwise one occurrence is
/// generated for every day in `[start_date, end_date]` whose weekday is in
/// `days_of_week`, carrying the course's range times. Malformed input
/// degrades to an empty or partial schedule; enumeration never fails.
pub fn enumerate(course: &Course) -> Schedule {
    let mut occurrences = if !course.sessions.is_empty() {
        from_explicit_sessions(&course.sessions)
    } else {
        from_recurrence_rule(course)
    };
    occurrences.sort_by(|a, b| (a.date, &a.start_time).cmp(&(b.date, &b.start_time)));
    let total_hours = occurrences.iter().map(|o| o.duration_hours).sum();
    Schedule {
        occurrences,
        total_hours,
    }
}

fn from_explicit_sessions(sessions: &[SessionSlot]) -> Vec<SessionOccurrence> {
    sessions
        .iter()
        .filter_map(|slot| {
            let date = parse_date_only(&slot.date)?;
            Some(SessionOccurrence::from_parts(
                date,
                &slot.start_time,
                &slot.end_time,
            ))
        })
        .collect()
}

fn from_recurrence_rule(course: &Course) -> Vec<SessionOccurrence> {
    let (Some(start), Some(end)) = (course.start_date, course.end_date) else {
        return Vec::new();
    };
    if start > end || course.days_of_week.is_empty() {
        return Vec::new();
    }

    let mut occurrences = Vec::new();
    let mut day = start;
    while day <= end && occurrences.len() < MAX_GENERATED_OCCURRENCES {
        let weekday = day.weekday().num_days_from_sunday() as u8;
        if course.days_of_week.contains(&weekday) {
            occurrences.push(SessionOccurrence::from_parts(
                day,
                &course.range_start_time,
                &course.range_end_time,
            ));
        }
        day += Duration::days(1);
    }
    occurrences
}

/// Attendance key for a raw session slot: the canonical date when it
/// parses, else a positional `idx-<n>` fallback so toggles on malformed
/// rows stay stable.
pub fn slot_key(slot: &SessionSlot, index: usize) -> String {
    match parse_date_only(&slot.date) {
        Some(date) => date_key(date),
        None => format!("idx-{index}"),
    }
}

/// Per-session hours keyed by session key, for attendance-aware payouts.
///
/// Built from the raw explicit slots when any exist (so malformed rows keep
/// a positional key), else from the generated schedule. A duplicated key
/// keeps the last slot's hours, matching how the console resolved repeats.
pub fn hours_by_session_key(course: &Course) -> BTreeMap<String, f64> {
    let mut hours = BTreeMap::new();
    if !course.sessions.is_empty() {
        for (index, slot) in course.sessions.iter().enumerate() {
            hours.insert(
                slot_key(slot, index),
                duration_hours(&slot.start_time, &slot.end_time),
            );
        }
    } else {
        for occurrence in enumerate(course).occurrences {
            hours.insert(occurrence.session_key(), occurrence.duration_hours);
        }
    }
    hours
}
