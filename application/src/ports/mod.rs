//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure adapters must implement.

pub mod cloud;
pub mod command_runner;
pub mod conversation_logger;
pub mod progress;
pub mod reasoning_engine;
pub mod tool_executor;
pub mod tool_schema;
