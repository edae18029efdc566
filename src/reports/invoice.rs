use chrono::NaiveDate;
use serde::Serialize;

use crate::schedule::{
    occurrence, resolve_rate, AttendanceSheet, Course, InstructorRef, RateSource,
};

/// One attended session on an instructor invoice.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct InvoiceLine {
    pub date: String,
    pub start_time: String,
    pub end_time: String,
    pub hours: f64,
    pub amount: f64,
}

/// Plain-data invoice for one instructor's attended hours on one course.
///
/// Amounts are unformatted decimals; currency and locale formatting belong
/// to the rendering collaborator.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct InstructorInvoice {
    pub number: String,
    pub issued_on: NaiveDate,
    pub course_id: String,
    pub course_title: String,
    pub instructor_id: String,
    pub instructor_label: String,
    pub rate: f64,
    pub lines: Vec<InvoiceLine>,
    pub total_hours: f64,
    pub total_amount: f64,
}

/// Builds the invoice for one instructor: one line per session they are
/// marked present for, priced at their resolved hourly rate. `issued_on`
/// is taken explicitly so the builder stays deterministic.
pub fn build_invoice(
    course: &Course,
    instructor_id: &str,
    instructor_label: &str,
    attendance: &AttendanceSheet,
    rates: &dyn RateSource,
    issued_on: NaiveDate,
) -> InstructorInvoice {
    let reference = course
        .instructors
        .iter()
        .find(|r| r.key() == instructor_id)
        .cloned()
        .unwrap_or_else(|| InstructorRef::Id(instructor_id.to_string()));
    let rate = resolve_rate(course, &reference, rates);

    let mut lines = Vec::new();
    let mut total_hours = 0.0;
    if course.sessions.is_empty() {
        for occurrence in occurrence::enumerate(course).occurrences {
            if attendance.is_present(instructor_id, &occurrence.session_key()) {
                total_hours += occurrence.duration_hours;
                lines.push(InvoiceLine {
                    date: occurrence.session_key(),
                    start_time: occurrence.start_time,
                    end_time: occurrence.end_time,
                    hours: occurrence.duration_hours,
                    amount: occurrence.duration_hours * rate,
                });
            }
        }
    } else {
        for (index, slot) in course.sessions.iter().enumerate() {
            let key = occurrence::slot_key(slot, index);
            if attendance.is_present(instructor_id, &key) {
                let hours =
                    crate::schedule::timeslot::duration_hours(&slot.start_time, &slot.end_time);
                total_hours += hours;
                lines.push(InvoiceLine {
                    date: slot.date.clone(),
                    start_time: slot.start_time.clone(),
                    end_time: slot.end_time.clone(),
                    hours,
                    amount: hours * rate,
                });
            }
        }
    }

    InstructorInvoice {
        number: invoice_number(instructor_id, issued_on),
        issued_on,
        course_id: course.id.clone(),
        course_title: course.title.clone(),
        instructor_id: instructor_id.to_string(),
        instructor_label: instructor_label.to_string(),
        rate,
        total_amount: rate * total_hours,
        total_hours,
        lines,
    }
}

/// `INV-<last six id chars, uppercased>-<YYYYMMDD>`.
fn invoice_number(instructor_id: &str, issued_on: NaiveDate) -> String {
    let chars: Vec<char> = instructor_id.chars().collect();
    let tail_start = chars.len().saturating_sub(6);
    let tail: String = chars[tail_start..].iter().collect();
    format!(
        "INV-{}-{}",
        tail.to_uppercase(),
        issued_on.format("%Y%m%d")
    )
}
