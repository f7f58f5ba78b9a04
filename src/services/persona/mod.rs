//! Persona Module
//!
//! Loads simulated respondents for a batch.
//!
//! ## Layout on disk
//!
//! | Path | Contents |
//! |------|----------|
//! | `<personas_dir>/<Name>/agent.json` | Attributes (flat or `scratch` shape) |
//! | `<activity_log>` | Markdown log, `### <name>` sections |
//!
//! The result is a [`PersonaContext`], immutable for the lifetime of a batch.

pub mod activity_log;
pub mod context;
pub mod descriptor;

pub use activity_log::parse_activity_log;
pub use context::PersonaContext;
pub use descriptor::{load_descriptor, parse_descriptor};
