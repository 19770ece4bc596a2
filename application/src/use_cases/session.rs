//! Agent session: one conversation and the loop that drives it.

use super::run_turn::{RunTurnError, RunTurnUseCase, TurnOutput};
use crate::ports::conversation_logger::{ConversationEvent, events};
use crate::ports::progress::{NoTurnProgress, TurnProgressNotifier};
use crate::ports::reasoning_engine::ReasoningEngine;
use crate::ports::tool_executor::ToolExecutorPort;
use awsops_domain::{ConversationStore, Turn};
use serde_json::json;
use tracing::info;

/// Owns exactly one [`ConversationStore`].
///
/// Sessions never share a store; the use case behind them holds no
/// per-conversation state and can serve several sessions.
pub struct AgentSession<E: ReasoningEngine + 'static, T: ToolExecutorPort + 'static> {
    use_case: RunTurnUseCase<E, T>,
    store: ConversationStore,
}

impl<E: ReasoningEngine + 'static, T: ToolExecutorPort + 'static> AgentSession<E, T> {
    pub fn new(use_case: RunTurnUseCase<E, T>) -> Self {
        let store = ConversationStore::new().with_max_turns(use_case.params().max_history_turns);
        Self { use_case, store }
    }

    pub async fn ask(&mut self, input: &str) -> Result<TurnOutput, RunTurnError> {
        self.ask_with_progress(input, &NoTurnProgress).await
    }

    pub async fn ask_with_progress(
        &mut self,
        input: &str,
        progress: &dyn TurnProgressNotifier,
    ) -> Result<TurnOutput, RunTurnError> {
        self.use_case
            .execute_with_progress(&mut self.store, input, progress)
            .await
    }

    /// Forget the whole conversation.
    pub fn clear(&mut self) {
        let dropped = self.store.len();
        self.store.clear();
        self.use_case.logger().log(ConversationEvent::new(
            events::SESSION_CLEARED,
            json!({ "dropped_turns": dropped }),
        ));
        info!("Session cleared ({} turns dropped)", dropped);
    }

    pub fn history(&self) -> &[Turn] {
        self.store.turns()
    }

    pub fn store(&self) -> &ConversationStore {
        &self.store
    }

    pub fn model_id(&self) -> &str {
        self.use_case.model_id()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ExecutionParams;
    use crate::use_cases::run_turn::tests::{RecordingTools, ScriptedEngine, tool_request, use_case};
    use awsops_domain::EngineResponse;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_history_spans_turns() {
        let engine = Arc::new(ScriptedEngine::new(vec![
            Ok(EngineResponse::from_text("first")),
            Ok(EngineResponse::from_text("second")),
        ]));
        let mut session = AgentSession::new(use_case(engine.clone(), Arc::new(RecordingTools::new())));

        session.ask("one").await.unwrap();
        session.ask("two").await.unwrap();

        assert_eq!(session.history().len(), 4);
        // The second engine call saw the first exchange.
        assert_eq!(engine.seen.lock().unwrap()[1].len(), 3);
        assert_eq!(session.model_id(), "scripted");
    }

    #[tokio::test]
    async fn test_clear_then_turn_has_no_residue() {
        let engine = Arc::new(ScriptedEngine::new(vec![
            Ok(tool_request(&[("t1", "get_ec2_instances")])),
            Ok(EngineResponse::from_text("3 instances")),
            Ok(EngineResponse::from_text("fresh start")),
        ]));
        let mut session = AgentSession::new(use_case(engine.clone(), Arc::new(RecordingTools::new())));

        session.ask("list instances").await.unwrap();
        assert_eq!(session.history().len(), 4);

        session.clear();
        assert!(session.history().is_empty());

        let output = session.ask("hello again").await.unwrap();
        assert_eq!(output.answer, "fresh start");
        assert_eq!(session.history(), &[Turn::user("hello again"), EngineResponse::from_text("fresh start").to_turn()]);
        assert_eq!(engine.seen.lock().unwrap()[2], vec![Turn::user("hello again")]);
    }

    #[tokio::test]
    async fn test_history_cap_from_params() {
        let engine = Arc::new(ScriptedEngine::new(vec![]));
        let uc = use_case(engine, Arc::new(RecordingTools::new()))
            .with_params(ExecutionParams::default().with_max_history_turns(Some(2)));
        let mut session = AgentSession::new(uc);

        session.ask("a").await.unwrap();
        session.ask("b").await.unwrap();
        session.ask("c").await.unwrap();

        assert_eq!(session.history().len(), 2);
        assert_eq!(session.history()[0], Turn::user("c"));
    }
}
