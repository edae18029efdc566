use std::collections::BTreeMap;

use chrono::{Datelike, Duration, NaiveDate};
use serde::Serialize;

use crate::schedule::{occurrence, Course};

/// One course occurrence placed on a calendar day.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ScheduleEntry {
    pub course_id: String,
    pub title: String,
    pub location: Option<String>,
    pub start_time: String,
    pub end_time: String,
    pub duration_hours: f64,
}

/// Expands every course and groups the occurrences by date, each day sorted
/// by start time then title. Pass an instructor id to keep only the courses
/// that instructor is assigned to.
pub fn sessions_by_date(
    courses: &[Course],
    instructor_id: Option<&str>,
) -> BTreeMap<NaiveDate, Vec<ScheduleEntry>> {
    let mut days: BTreeMap<NaiveDate, Vec<ScheduleEntry>> = BTreeMap::new();
    for course in courses {
        if let Some(id) = instructor_id {
            if !course.instructors.iter().any(|r| r.key() == id) {
                continue;
            }
        }
        for occurrence in occurrence::enumerate(course).occurrences {
            days.entry(occurrence.date).or_default().push(ScheduleEntry {
                course_id: course.id.clone(),
                title: course.title.clone(),
                location: course.location.clone(),
                start_time: occurrence.start_time,
                end_time: occurrence.end_time,
                duration_hours: occurrence.duration_hours,
            });
        }
    }
    for entries in days.values_mut() {
        entries.sort_by(|a, b| (&a.start_time, &a.title).cmp(&(&b.start_time, &b.title)));
    }
    days
}

/// The 42 dates of a Sunday-first month view: the week containing the first
/// of the month through six full rows, so leading and trailing days of the
/// neighboring months are included.
pub fn month_grid(year: i32, month: u32) -> Vec<NaiveDate> {
    let first = match NaiveDate::from_ymd_opt(year, month, 1) {
        Some(date) => date,
        None => return Vec::new(),
    };
    let lead = first.weekday().num_days_from_sunday() as i64;
    let start = first - Duration::days(lead);
    (0..42).map(|offset| start + Duration::days(offset)).collect()
}
