//! Data Models
//!
//! Application-level data structures: configuration, analytics output and
//! CLI result envelopes.
//! Survey, response and persona types live in `persona_survey_core`.

pub mod analytics;
pub mod response;
pub mod settings;

pub use analytics::*;
pub use response::*;
pub use settings::*;
