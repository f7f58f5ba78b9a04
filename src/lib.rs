//! Persona Survey - Rust Library
//!
//! Simulated personas answer structured surveys through a local text
//! generation backend, and the answers are aggregated into statistics.
//! It includes:
//! - The answer pipeline: prompt builder, answer validator, batch filler
//! - Analytics over completed responses, with JSON export
//! - Storage layer (JSON config, JSON file survey store)
//! - CLI definitions and command handlers

pub mod cli;
pub mod commands;
pub mod models;
pub mod services;
pub mod state;
pub mod storage;
pub mod utils;

pub use models::response::*;
pub use models::settings::AppConfig;
pub use services::{AnalyticsEngine, BatchReport, PersonaContext, SurveyFiller};
pub use state::AppState;
pub use storage::{JsonFileStore, MemoryStore, SurveyStore};
pub use utils::error::{AppError, AppResult};
