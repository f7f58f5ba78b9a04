//! Analytics Service
//!
//! Per-question aggregation of completed responses, survey summaries and
//! JSON export.

mod aggregation;
mod export;
mod service;

pub use aggregation::*;
pub use export::*;
pub use service::*;
