//! Plain-text rendering for the command line binary.

pub mod formatters;
pub mod output;

use std::fmt::Write as _;

use crate::reports::InstructorInvoice;
use crate::schedule::{Course, CourseSummary, DashboardTotals, Schedule};

use formatters::{format_currency, format_hours};

pub fn render_summary(course: &Course, summary: &CourseSummary, currency: &str) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Course: {}", course.title);
    let _ = writeln!(out, "Sessions: {}", summary.total_sessions);
    let _ = writeln!(out, "Hours: {}", format_hours(summary.total_hours));
    let _ = writeln!(out, "Students: {}", summary.students);
    let _ = writeln!(
        out,
        "Revenue: {} (discount {})",
        format_currency(summary.gross_revenue, currency),
        format_currency(summary.discount_amount, currency)
    );
    let _ = writeln!(out, "Net revenue: {}", format_currency(summary.net_revenue, currency));
    let _ = writeln!(
        out,
        "Expenses: {} (instructors {}, materials {})",
        format_currency(summary.total_expense, currency),
        format_currency(summary.instructor_expense, currency),
        format_currency(summary.materials_cost, currency)
    );
    let _ = writeln!(out, "Profit: {}", format_currency(summary.profit, currency));
    out
}

pub fn render_schedule(course: &Course, schedule: &Schedule) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Schedule for {}", course.title);
    for occurrence in &schedule.occurrences {
        let _ = writeln!(
            out,
            "  {}  {} - {}  ({})",
            occurrence.session_key(),
            occurrence.start_time,
            occurrence.end_time,
            format_hours(occurrence.duration_hours)
        );
    }
    let _ = writeln!(
        out,
        "Total: {} sessions, {}",
        schedule.total_sessions(),
        format_hours(schedule.total_hours)
    );
    out
}

pub fn render_dashboard(totals: &DashboardTotals, currency: &str) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Courses: {}", totals.courses);
    let _ = writeln!(out, "Instructors: {}", totals.instructors);
    let _ = writeln!(out, "Hours: {}", format_hours(totals.total_hours));
    let _ = writeln!(out, "Revenue: {}", format_currency(totals.total_revenue, currency));
    let _ = writeln!(
        out,
        "Instructor payout: {}",
        format_currency(totals.total_instructor_payout, currency)
    );
    let _ = writeln!(out, "Materials: {}", format_currency(totals.total_materials, currency));
    let _ = writeln!(out, "Profit: {}", format_currency(totals.total_profit, currency));
    out
}

pub fn render_invoice(invoice: &InstructorInvoice, currency: &str) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Invoice {}", invoice.number);
    let _ = writeln!(out, "Issued: {}", invoice.issued_on.format("%Y-%m-%d"));
    let _ = writeln!(out, "Course: {}", invoice.course_title);
    let _ = writeln!(out, "Instructor: {}", invoice.instructor_label);
    let _ = writeln!(out, "Rate: {}", format_currency(invoice.rate, currency));
    for line in &invoice.lines {
        let _ = writeln!(
            out,
            "  {}  {} - {}  {}  {}",
            line.date,
            line.start_time,
            line.end_time,
            format_hours(line.hours),
            format_currency(line.amount, currency)
        );
    }
    let _ = writeln!(
        out,
        "Total: {} for {}",
        format_currency(invoice.total_amount, currency),
        format_hours(invoice.total_hours)
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::{enumerate, summarize, SessionSlot};

    #[test]
    fn summary_text_carries_the_derived_figures() {
        let mut course = Course::new("Open Water");
        course.sessions = vec![SessionSlot::new("2024-01-01", "16:00", "18:00")];
        course.cost_per_student = 50.0;
        course.students = Some(4);

        let schedule = enumerate(&course);
        let summary = summarize(&course, &schedule);
        let text = render_summary(&course, &summary, "BHD");
        assert!(text.contains("Course: Open Water"));
        assert!(text.contains("Revenue: 200.00 BHD"));
        assert!(text.contains("Sessions: 1"));
    }

    #[test]
    fn schedule_text_lists_each_occurrence() {
        let mut course = Course::new("CPR");
        course.sessions = vec![
            SessionSlot::new("2024-01-01", "16:00", "18:00"),
            SessionSlot::new("2024-01-03", "16:00", "18:00"),
        ];
        let schedule = enumerate(&course);
        let text = render_schedule(&course, &schedule);
        assert!(text.contains("2024-01-01  16:00 - 18:00"));
        assert!(text.contains("Total: 2 sessions, 4.0 h"));
    }
}
