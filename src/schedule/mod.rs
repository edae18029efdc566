//! Course-schedule domain models and the two derivation engines:
//! occurrence enumeration and financial aggregation.

pub mod attendance;
pub mod catalog;
pub mod course;
pub mod finance;
pub mod instructor;
pub mod occurrence;
pub mod timeslot;

pub use attendance::AttendanceSheet;
pub use catalog::{catalog_warnings, Catalog};
pub use course::{
    Course, Discount, DiscountType, EmbeddedInstructor, InstructorRef, SessionSlot,
    DEFAULT_RANGE_END, DEFAULT_RANGE_START,
};
pub use finance::{
    dashboard_totals, instructor_payouts, resolve_rate, summarize, CourseSummary,
    DashboardTotals, InstructorDirectory, InstructorPayout, NoRates, RateSource,
};
pub use instructor::Instructor;
pub use occurrence::{enumerate, hours_by_session_key, slot_key, Schedule, SessionOccurrence};
