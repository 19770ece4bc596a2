//! Application-level configuration.
//!
//! - [`ExecutionParams`]: agent loop control (tool call budget, history cap)

pub mod execution_params;

pub use execution_params::ExecutionParams;
