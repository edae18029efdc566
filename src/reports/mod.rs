//! Derived read models: instructor invoices and calendar views.

pub mod calendar;
pub mod invoice;

pub use calendar::{month_grid, sessions_by_date, ScheduleEntry};
pub use invoice::{build_invoice, InstructorInvoice, InvoiceLine};
