//! Persona Survey LLM
//!
//! Provides the text-generation interface used by the answer pipeline:
//! - `TextGenerator` trait: one prompt in, raw text or a typed failure out
//! - `OllamaGenerator`: the Ollama `/api/generate` implementation
//!
//! Also includes the HTTP client factory and reasoning-block stripping.

pub mod http_client;
pub mod ollama;
pub mod provider;
pub mod types;

// Re-export main types
pub use http_client::build_http_client;
pub use ollama::{strip_thinking, OllamaGenerator};
pub use provider::{parse_http_error, TextGenerator};
pub use types::*;
