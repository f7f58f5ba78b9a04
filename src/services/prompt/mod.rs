//! Prompt Module
//!
//! Question-type templates and the builder that renders them for a persona.

pub mod builder;
pub mod template;

pub use builder::{format_options, tail_chars, PromptBuilder};
pub use template::{safe_substitute, PromptTemplates};
