use std::collections::BTreeMap;

use serde::Serialize;

use super::attendance::AttendanceSheet;
use super::course::{Course, InstructorRef};
use super::instructor::Instructor;
use super::occurrence::{self, Schedule};

/// Injected instructor-rate lookup.
///
/// Rate data arrives from more than one collaborator (course-embedded
/// overrides, instructor profiles, cached directories), so the aggregator
/// takes the lookup as an explicit argument instead of consulting ambient
/// state.
pub trait RateSource {
    fn rate_for(&self, instructor_id: &str) -> Option<f64>;
}

/// Rate source with no external data; the course's own fields still apply.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoRates;

impl RateSource for NoRates {
    fn rate_for(&self, _instructor_id: &str) -> Option<f64> {
        None
    }
}

/// Rate and label directory built from instructor profiles.
#[derive(Debug, Clone, Default)]
pub struct InstructorDirectory {
    rates: BTreeMap<String, f64>,
    labels: BTreeMap<String, String>,
}

impl InstructorDirectory {
    pub fn from_profiles(profiles: &[Instructor]) -> Self {
        let mut directory = Self::default();
        for profile in profiles {
            if profile.id.is_empty() {
                continue;
            }
            directory
                .rates
                .insert(profile.id.clone(), profile.rate_per_hour);
            directory.labels.insert(profile.id.clone(), profile.label());
        }
        directory
    }

    /// Display label for an instructor id, falling back to the id itself.
    pub fn label_for(&self, instructor_id: &str) -> String {
        self.labels
            .get(instructor_id)
            .cloned()
            .unwrap_or_else(|| instructor_id.to_string())
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}

impl RateSource for InstructorDirectory {
    fn rate_for(&self, instructor_id: &str) -> Option<f64> {
        self.rates.get(instructor_id).copied()
    }
}

/// Derived financial summary of one course.
///
/// `instructor_expense` is the budgeted, attendance-unaware figure (every
/// assigned instructor assumed present for all hours). Actual per-person
/// amounts come from [`instructor_payouts`] and are intentionally not
/// reconciled with this estimate.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct CourseSummary {
    pub total_sessions: usize,
    pub total_hours: f64,
    pub students: u32,
    pub gross_revenue: f64,
    pub discount_amount: f64,
    pub net_revenue: f64,
    pub instructor_expense: f64,
    pub materials_cost: f64,
    pub total_expense: f64,
    /// Net revenue minus all expenses. Negative is a valid state and is
    /// never clamped.
    pub profit: f64,
}

/// Actual payout owed to one instructor, based on attended hours only.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct InstructorPayout {
    pub instructor_id: String,
    pub rate: f64,
    pub attended_sessions: usize,
    pub attended_hours: f64,
    pub amount: f64,
}

/// The "prefer the explicit backend figure, else derive" rule shared by
/// every computed figure.
fn resolve_figure(explicit: Option<f64>, derive: impl FnOnce() -> f64) -> f64 {
    match explicit {
        Some(value) if value.is_finite() => value,
        _ => derive(),
    }
}

/// Same precedence, but the explicit value must also be non-negative.
fn resolve_non_negative(explicit: Option<f64>, derive: impl FnOnce() -> f64) -> f64 {
    match explicit {
        Some(value) if value.is_finite() && value >= 0.0 => value,
        _ => derive(),
    }
}

/// Computes the financial summary for a course from its enumerated
/// schedule. Pure and total: malformed inputs contribute zeroes, identical
/// inputs produce identical output.
pub fn summarize(course: &Course, schedule: &Schedule) -> CourseSummary {
    let total_sessions = course
        .total_sessions
        .map(|n| n as usize)
        .unwrap_or_else(|| schedule.total_sessions());
    let total_hours = resolve_figure(course.total_hours, || schedule.total_hours);
    let students = course
        .students
        .unwrap_or_else(|| course.enrolled.len() as u32);

    let gross_revenue = resolve_non_negative(course.revenue, || {
        course.cost_per_student * f64::from(students)
    });
    let discount_amount = course.discount.amount_against(gross_revenue);
    let net_revenue = (gross_revenue - discount_amount).max(0.0);

    let instructor_expense = resolve_non_negative(course.instructor_expense, || {
        rate_map_sum(course) * total_hours
    });
    let materials_cost = course.materials_cost.max(0.0);
    let total_expense = instructor_expense + materials_cost;
    let profit = net_revenue - instructor_expense - materials_cost;

    CourseSummary {
        total_sessions,
        total_hours,
        students,
        gross_revenue,
        discount_amount,
        net_revenue,
        instructor_expense,
        materials_cost,
        total_expense,
        profit,
    }
}

/// Sum of hourly rates across the course's assigned instructors; when no
/// instructor list survived, the whole rate map counts.
fn rate_map_sum(course: &Course) -> f64 {
    if course.instructors.is_empty() {
        return course
            .instructor_rates
            .values()
            .filter(|rate| rate.is_finite())
            .sum();
    }
    course
        .instructors
        .iter()
        .filter_map(|reference| course.rate_override(&reference.key()))
        .sum()
}

/// Hourly rate for one instructor on one course.
///
/// Fallback chain, first finite non-zero value wins: rate embedded in the
/// course's instructor reference, then the course rate map, then the
/// reference's generic per-hour field, then the injected rate source.
pub fn resolve_rate(course: &Course, reference: &InstructorRef, rates: &dyn RateSource) -> f64 {
    let key = reference.key();
    let embedded = reference.embedded();
    [
        embedded.and_then(|e| e.hourly_rate),
        course.rate_override(&key),
        embedded.and_then(|e| e.rate_per_hour),
        rates.rate_for(&key),
    ]
    .into_iter()
    .flatten()
    .find(|rate| rate.is_finite() && *rate != 0.0)
    .unwrap_or(0.0)
}

/// Attendance-aware payouts, one entry per assigned instructor.
///
/// Each payout depends only on that instructor's own marked sessions; the
/// aggregate in [`CourseSummary`] is never divided among instructors.
pub fn instructor_payouts(
    course: &Course,
    attendance: &AttendanceSheet,
    rates: &dyn RateSource,
) -> Vec<InstructorPayout> {
    let hours_by_key = occurrence::hours_by_session_key(course);
    course
        .instructors
        .iter()
        .map(|reference| {
            let instructor_id = reference.key();
            let rate = resolve_rate(course, reference, rates);
            let mut attended_sessions = 0;
            let mut attended_hours = 0.0;
            for key in attendance.present_keys(&instructor_id) {
                if let Some(hours) = hours_by_key.get(key) {
                    attended_sessions += 1;
                    attended_hours += hours;
                }
            }
            InstructorPayout {
                amount: rate * attended_hours,
                instructor_id,
                rate,
                attended_sessions,
                attended_hours,
            }
        })
        .collect()
}

/// Portfolio-level totals across every course, for dashboard cards.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct DashboardTotals {
    pub courses: usize,
    pub instructors: usize,
    /// Gross, undiscounted revenue — the dashboard has always shown the
    /// pre-discount figure.
    pub total_revenue: f64,
    /// Budgeted instructor payout assuming full scheduled hours.
    pub total_instructor_payout: f64,
    pub total_materials: f64,
    pub total_hours: f64,
    pub total_profit: f64,
}

pub fn dashboard_totals(courses: &[Course], directory: &InstructorDirectory) -> DashboardTotals {
    let mut totals = DashboardTotals {
        courses: courses.len(),
        instructors: directory.len(),
        ..DashboardTotals::default()
    };
    for course in courses {
        let schedule = occurrence::enumerate(course);
        let students = course
            .students
            .unwrap_or_else(|| course.enrolled.len() as u32);
        let revenue = course.cost_per_student * f64::from(students);
        let payout: f64 = course
            .instructors
            .iter()
            .map(|reference| resolve_rate(course, reference, directory))
            .sum::<f64>()
            * schedule.total_hours;

        totals.total_revenue += revenue;
        totals.total_instructor_payout += payout;
        totals.total_materials += course.materials_cost.max(0.0);
        totals.total_hours += schedule.total_hours;
    }
    totals.total_profit =
        totals.total_revenue - totals.total_instructor_payout - totals.total_materials;
    totals
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::course::{Discount, EmbeddedInstructor, SessionSlot};
    use crate::schedule::occurrence::enumerate;

    fn course_with_sessions(count: usize) -> Course {
        let mut course = Course::new("Payout");
        for idx in 0..count {
            course.sessions.push(SessionSlot::new(
                format!("2024-02-{:02}", idx + 1),
                "16:00",
                "18:00",
            ));
        }
        course
    }

    #[test]
    fn summary_derives_from_schedule_and_pricing() {
        let mut course = course_with_sessions(3);
        course.cost_per_student = 50.0;
        course.students = Some(10);
        course.materials_cost = 40.0;
        course.assign_instructor("i1", Some(10.0));
        course.assign_instructor("i2", Some(20.0));

        let summary = summarize(&course, &enumerate(&course));
        assert_eq!(summary.total_sessions, 3);
        assert_eq!(summary.total_hours, 6.0);
        assert_eq!(summary.gross_revenue, 500.0);
        assert_eq!(summary.net_revenue, 500.0);
        assert_eq!(summary.instructor_expense, 180.0);
        assert_eq!(summary.total_expense, 220.0);
        assert_eq!(summary.profit, 280.0);
    }

    #[test]
    fn explicit_backend_figures_take_precedence() {
        let mut course = course_with_sessions(3);
        course.cost_per_student = 50.0;
        course.students = Some(10);
        course.revenue = Some(900.0);
        course.total_hours = Some(12.0);
        course.instructor_expense = Some(100.0);

        let summary = summarize(&course, &enumerate(&course));
        assert_eq!(summary.gross_revenue, 900.0);
        assert_eq!(summary.total_hours, 12.0);
        assert_eq!(summary.instructor_expense, 100.0);
    }

    #[test]
    fn negative_explicit_revenue_falls_back_to_derivation() {
        let mut course = course_with_sessions(1);
        course.cost_per_student = 20.0;
        course.students = Some(5);
        course.revenue = Some(-1.0);
        let summary = summarize(&course, &enumerate(&course));
        assert_eq!(summary.gross_revenue, 100.0);
    }

    #[test]
    fn profit_keeps_its_sign() {
        let mut course = course_with_sessions(0);
        course.revenue = Some(100.0);
        course.instructor_expense = Some(80.0);
        course.materials_cost = 50.0;
        let summary = summarize(&course, &enumerate(&course));
        assert_eq!(summary.net_revenue, 100.0);
        assert_eq!(summary.profit, -30.0);
    }

    #[test]
    fn discount_clamps_before_netting() {
        let mut course = course_with_sessions(0);
        course.revenue = Some(1000.0);
        course.discount = Discount::percent(150.0);
        let summary = summarize(&course, &enumerate(&course));
        assert_eq!(summary.discount_amount, 1000.0);
        assert_eq!(summary.net_revenue, 0.0);

        course.discount = Discount::amount(-50.0);
        course.revenue = Some(200.0);
        let summary = summarize(&course, &enumerate(&course));
        assert_eq!(summary.discount_amount, 0.0);
        assert_eq!(summary.net_revenue, 200.0);
    }

    #[test]
    fn students_fall_back_to_enrollment_roster() {
        let mut course = course_with_sessions(0);
        course.cost_per_student = 10.0;
        course.enrolled = vec!["s1".into(), "s2".into()];
        let summary = summarize(&course, &enumerate(&course));
        assert_eq!(summary.students, 2);
        assert_eq!(summary.gross_revenue, 20.0);
    }

    #[test]
    fn rate_chain_prefers_embedded_then_map_then_directory() {
        let mut course = Course::new("Rates");
        course.instructor_rates.insert("i1".into(), 7.0);
        let directory = InstructorDirectory::from_profiles(&[{
            let mut ins = Instructor::new("Sara", 5.0);
            ins.id = "i1".into();
            ins
        }]);

        let embedded = InstructorRef::Embedded(EmbeddedInstructor {
            id: "i1".into(),
            hourly_rate: Some(9.0),
            ..EmbeddedInstructor::default()
        });
        assert_eq!(resolve_rate(&course, &embedded, &directory), 9.0);

        let bare = InstructorRef::Id("i1".into());
        assert_eq!(resolve_rate(&course, &bare, &directory), 7.0);

        course.instructor_rates.clear();
        assert_eq!(resolve_rate(&course, &bare, &directory), 5.0);
        assert_eq!(resolve_rate(&course, &bare, &NoRates), 0.0);
    }

    #[test]
    fn payouts_follow_individual_attendance() {
        let mut course = course_with_sessions(3);
        course.assign_instructor("a", Some(10.0));
        course.assign_instructor("b", Some(20.0));

        let mut attendance = AttendanceSheet::new();
        attendance.mark("a", "2024-02-01");
        attendance.mark_all("b", ["2024-02-01", "2024-02-02", "2024-02-03"]);

        let payouts = instructor_payouts(&course, &attendance, &NoRates);
        assert_eq!(payouts[0].amount, 20.0);
        assert_eq!(payouts[0].attended_hours, 2.0);
        assert_eq!(payouts[1].amount, 120.0);
        assert_eq!(payouts[1].attended_sessions, 3);

        // The budgeted aggregate stays attendance-unaware.
        let summary = summarize(&course, &enumerate(&course));
        assert_eq!(summary.instructor_expense, 180.0);
    }

    #[test]
    fn attendance_on_unknown_keys_contributes_nothing() {
        let mut course = course_with_sessions(1);
        course.assign_instructor("a", Some(10.0));
        let mut attendance = AttendanceSheet::new();
        attendance.mark("a", "1999-01-01");
        let payouts = instructor_payouts(&course, &attendance, &NoRates);
        assert_eq!(payouts[0].amount, 0.0);
        assert_eq!(payouts[0].attended_sessions, 0);
    }

    #[test]
    fn dashboard_totals_roll_up_courses() {
        let mut first = course_with_sessions(2);
        first.cost_per_student = 30.0;
        first.students = Some(5);
        first.materials_cost = 10.0;
        first.assign_instructor("i1", Some(10.0));

        let mut second = Course::new("Rule based");
        second.start_date = chrono::NaiveDate::from_ymd_opt(2024, 1, 1);
        second.end_date = chrono::NaiveDate::from_ymd_opt(2024, 1, 14);
        second.days_of_week = vec![1, 3];
        second.cost_per_student = 10.0;
        second.students = Some(4);

        let directory = InstructorDirectory::default();
        let totals = dashboard_totals(&[first, second], &directory);
        assert_eq!(totals.courses, 2);
        assert_eq!(totals.total_hours, 12.0);
        assert_eq!(totals.total_revenue, 190.0);
        assert_eq!(totals.total_instructor_payout, 40.0);
        assert_eq!(totals.total_materials, 10.0);
        assert_eq!(totals.total_profit, 140.0);
    }
}
