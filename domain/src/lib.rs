//! Domain layer for awsops
//!
//! Pure types and rules for a conversational AWS infrastructure agent.
//! Nothing here performs I/O; adapters live in the infrastructure crate.
//!
//! # Core Concepts
//!
//! ## Conversation
//!
//! A session is an ordered log of [`Turn`]s held in a [`ConversationStore`].
//! That log is the entire context sent to the reasoning engine on every call.
//!
//! ## Tools
//!
//! The engine reaches AWS only through named tools ([`ToolSpec`]). Every tool
//! answers with a [`ToolOutcome`]: a success map or an `{error, message?}`
//! descriptor, never a raised failure.
//!
//! ## Policy
//!
//! A [`CommandClassifier`] decides whether a CLI passthrough command may run
//! autonomously.

pub mod cloud;
pub mod conversation;
pub mod core;
pub mod policy;
pub mod prompt;
pub mod tool;
pub mod util;

// Re-export commonly used types
pub use cloud::{
    CostPeriod, CostPeriodResult, IngressRule, InstanceRecord, InstanceStateFilter, SecurityGroupRecord, ServiceCost,
    ServiceTotal,
};
pub use conversation::{ContentBlock, ConversationStore, EngineResponse, Role, StopIndicator, Turn};
pub use core::error::DomainError;
pub use policy::{CommandClassifier, CommandPolicy, DenyListClassifier, ReadOnlyVerbClassifier};
pub use prompt::AgentPromptTemplate;
pub use tool::{
    entities::{ToolCall, ToolDefinition, ToolParameter, ToolSpec},
    traits::{DefaultToolValidator, ToolValidator},
    value_objects::{FailureKind, ToolFailure, ToolOutcome},
};
