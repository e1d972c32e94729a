//! Monthly report generation.

pub mod summary;

pub use summary::SummaryService;
