//! Presentation layer for awsops
//!
//! This crate contains the CLI definition, the interactive loop,
//! progress reporters and console formatting.

pub mod chat;
pub mod cli;
pub mod output;
pub mod progress;

// Re-export commonly used types
pub use chat::{AgentRepl, LoopControl, ReplCommand};
pub use cli::commands::Cli;
pub use output::console::ConsoleFormatter;
pub use progress::reporter::{ProgressReporter, SimpleProgress};
