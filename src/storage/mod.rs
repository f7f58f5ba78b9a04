//! Storage Layer
//!
//! Handles all data persistence: JSON config plus the survey/response store.

pub mod config;
pub mod json_store;
pub mod memory_store;
pub mod store;

pub use config::*;
pub use json_store::*;
pub use memory_store::*;
pub use store::SurveyStore;
