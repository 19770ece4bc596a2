//! Tool domain module
//!
//! Defines how the reasoning engine reaches AWS: every capability is a
//! [`ToolDefinition`] (name, parameters, description) collected in a
//! [`ToolSpec`], invoked through a [`ToolCall`], and answered with a
//! [`ToolOutcome`].
//!
//! ```text
//! ┌──────────────┐    ┌──────────────┐    ┌──────────────┐
//! │ ToolSpec     │───▶│ ToolCall     │───▶│ ToolOutcome  │
//! │ (registry)   │    │ (invocation) │    │ (data only)  │
//! └──────────────┘    └──────────────┘    └──────────────┘
//! ```
//!
//! # Architecture
//!
//! - **Domain** (this module): pure definitions, no I/O
//! - **Application** (`ToolExecutorPort`): port trait for dispatch
//! - **Infrastructure** (`ToolRegistry`): concrete handlers backed by the AWS SDK
//!   and the AWS CLI

pub mod entities;
pub mod traits;
pub mod value_objects;

pub use entities::{ToolCall, ToolDefinition, ToolParameter, ToolSpec};
pub use traits::{DefaultToolValidator, ToolValidator};
pub use value_objects::{FailureKind, ToolFailure, ToolOutcome};
