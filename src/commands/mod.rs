//! Command Handlers
//!
//! One function per CLI subcommand. Handlers take the shared [`AppState`],
//! do the work and return typed results; printing is left to the binary.
//!
//! [`AppState`]: crate::state::AppState

pub mod analytics;
pub mod fill;
pub mod health;
pub mod init;
pub mod surveys;

pub use analytics::*;
pub use fill::*;
pub use health::*;
pub use init::*;
pub use surveys::*;
