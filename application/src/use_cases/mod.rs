//! Use cases
//!
//! - [`run_turn`]: the tool-calling agent loop for one user utterance
//! - [`session`]: a conversation store plus the loop that drives it

pub mod run_turn;
pub mod session;
