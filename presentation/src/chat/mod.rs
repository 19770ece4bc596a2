//! Interactive and single-query modes

mod command;
mod repl;

pub use command::ReplCommand;
pub use repl::{AgentRepl, LoopControl};
