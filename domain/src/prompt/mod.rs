//! Prompt domain
//!
//! The fixed system instruction (role, safety and cost-awareness guidance).

pub mod agent;

pub use agent::AgentPromptTemplate;
