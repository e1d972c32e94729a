#![doc(test(attr(deny(warnings))))]

//! Finlog tracks personal income and expense transactions, monthly budgets,
//! and renders category and tag summary reports for the CLI front-end.

pub mod cli;
pub mod config;
pub mod currency;
pub mod errors;
pub mod ledger;
pub mod report;
pub mod storage;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Finlog tracing initialized.");
    });
}
