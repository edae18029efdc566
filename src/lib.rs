#![doc(test(attr(deny(warnings))))]

//! Course Core offers the scheduling and financial-aggregation primitives
//! behind a course-training administration console: recurrence expansion,
//! attendance-aware payouts, and derived revenue/expense/profit figures.

pub mod cli;
pub mod config;
pub mod errors;
pub mod reports;
pub mod schedule;
pub mod storage;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Course Core tracing initialized.");
    });
}
