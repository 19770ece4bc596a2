//! Application layer for awsops
//!
//! Use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::ExecutionParams;
pub use ports::{
    cloud::{ComputeInventory, CostReporter, NetworkInventory, ProviderError},
    command_runner::{CommandError, CommandOutput, CommandRunner},
    conversation_logger::{ConversationEvent, ConversationLogger, NoConversationLogger},
    progress::{NoTurnProgress, TurnProgressNotifier},
    reasoning_engine::{EngineError, EngineRequest, ReasoningEngine},
    tool_executor::ToolExecutorPort,
    tool_schema::ToolSchemaPort,
};
pub use use_cases::run_turn::{RunTurnError, RunTurnUseCase, TurnOutput, TurnState};
pub use use_cases::session::AgentSession;
