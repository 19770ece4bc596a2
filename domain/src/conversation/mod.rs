//! Conversation domain.
//!
//! - [`entities::Turn`]: user text, assistant content, or tool result
//! - [`response::EngineResponse`]: what one reasoning engine call returns
//! - [`store::ConversationStore`]: the ordered log forming the context window

pub mod entities;
pub mod response;
pub mod store;

pub use entities::{ContentBlock, Role, Turn};
pub use response::{EngineResponse, StopIndicator};
pub use store::ConversationStore;
