use chrono::NaiveDate;
use course_core::reports::build_invoice;
use course_core::schedule::{
    dashboard_totals, enumerate, instructor_payouts, summarize, AttendanceSheet, Catalog, Course,
    Instructor, InstructorDirectory,
};

fn legacy_course() -> Course {
    serde_json::from_str(
        r#"{
            "_id": "course-9",
            "name": "Advanced Open Water",
            "cost": "150",
            "students": ["s1", "s2", "s3"],
            "materialsCost": 60,
            "discountPct": 10,
            "instructors": ["ins-a", { "_id": "ins-b", "hourly_rate": 8 }],
            "instructorRates": { "ins-a": 5 },
            "courseDatesTimes": [
                { "date": "2024-04-01", "start_time": "16:00", "end_time": "18:00" },
                { "date": "2024-04-03", "start_time": "16:00", "end_time": "18:00" },
                { "date": "2024-04-05", "start_time": "16:00", "end_time": "18:00" }
            ]
        }"#,
    )
    .expect("legacy course json")
}

#[test]
fn summary_derives_every_figure_from_the_legacy_shape() {
    let course = legacy_course();
    let schedule = enumerate(&course);
    let summary = summarize(&course, &schedule);

    assert_eq!(summary.total_sessions, 3);
    assert_eq!(summary.total_hours, 6.0);
    assert_eq!(summary.students, 3);
    assert_eq!(summary.gross_revenue, 450.0);
    assert_eq!(summary.discount_amount, 45.0);
    assert_eq!(summary.net_revenue, 405.0);
    // Rate map only: ins-a at 5/h over 6 h. The embedded rate on ins-b is
    // a payout concern, not an aggregate one.
    assert_eq!(summary.instructor_expense, 30.0);
    assert_eq!(summary.total_expense, 90.0);
    assert_eq!(summary.profit, 315.0);
}

#[test]
fn payouts_follow_attendance_not_the_aggregate() {
    let course = legacy_course();
    let mut attendance = AttendanceSheet::new();
    attendance.mark("ins-a", "2024-04-01");
    attendance.mark("ins-b", "2024-04-01");
    attendance.mark("ins-b", "2024-04-03");

    let payouts = instructor_payouts(&course, &attendance, &InstructorDirectory::default());
    assert_eq!(payouts.len(), 2);

    let a = payouts.iter().find(|p| p.instructor_id == "ins-a").unwrap();
    assert_eq!(a.attended_sessions, 1);
    assert_eq!(a.attended_hours, 2.0);
    assert_eq!(a.amount, 10.0);

    let b = payouts.iter().find(|p| p.instructor_id == "ins-b").unwrap();
    assert_eq!(b.attended_sessions, 2);
    assert_eq!(b.amount, 32.0);
}

#[test]
fn invoice_matches_the_payout_for_the_same_attendance() {
    let course = legacy_course();
    let mut attendance = AttendanceSheet::new();
    attendance.mark("ins-b", "2024-04-01");
    attendance.mark("ins-b", "2024-04-03");

    let directory = InstructorDirectory::default();
    let invoice = build_invoice(
        &course,
        "ins-b",
        "ins-b",
        &attendance,
        &directory,
        NaiveDate::from_ymd_opt(2024, 4, 6).unwrap(),
    );

    assert_eq!(invoice.number, "INV-INS-B-20240406");
    assert_eq!(invoice.lines.len(), 2);
    assert_eq!(invoice.total_hours, 4.0);
    assert_eq!(invoice.total_amount, 32.0);

    let payouts = instructor_payouts(&course, &attendance, &directory);
    let b = payouts.iter().find(|p| p.instructor_id == "ins-b").unwrap();
    assert_eq!(invoice.total_amount, b.amount);
}

#[test]
fn rederivation_after_a_storage_round_trip_is_identical() {
    let course = legacy_course();
    let json = serde_json::to_string(&course).unwrap();
    let reparsed: Course = serde_json::from_str(&json).unwrap();

    assert_eq!(reparsed, course);
    let before = summarize(&course, &enumerate(&course));
    let after = summarize(&reparsed, &enumerate(&reparsed));
    assert_eq!(before, after);
}

#[test]
fn dashboard_rolls_catalog_totals_up() {
    let mut catalog = Catalog::new("Term");
    catalog.add_course(legacy_course());
    catalog.add_instructor(Instructor::new("Ali", 5.0));

    let directory = InstructorDirectory::from_profiles(&catalog.instructors);
    let totals = dashboard_totals(&catalog.courses, &directory);

    assert_eq!(totals.courses, 1);
    assert_eq!(totals.instructors, 1);
    assert_eq!(totals.total_hours, 6.0);
    assert_eq!(totals.total_revenue, 450.0);
    // ins-a from the course rate map, ins-b from its embedded rate.
    assert_eq!(totals.total_instructor_payout, 78.0);
    assert_eq!(totals.total_materials, 60.0);
}
