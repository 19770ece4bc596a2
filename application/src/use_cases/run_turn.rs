//! Run Turn use case: the tool-calling agent loop.
//!
//! One user utterance becomes zero or more tool invocations and ends with a
//! natural-language answer:
//!
//! ```text
//!            ┌──────────────────────────┐
//!  user ───▶ │ AwaitingEngineResponse   │ ───── final ─────▶ Done
//!            └──────────────────────────┘
//!                 ▲              │ tool requested
//!                 │              ▼
//!            ┌──────────────────────────┐
//!            │ ExecutingTool            │
//!            └──────────────────────────┘
//! ```
//!
//! Every tool request appended to the conversation is answered by exactly one
//! tool result before the engine is called again.

use crate::config::ExecutionParams;
use crate::ports::conversation_logger::{ConversationEvent, ConversationLogger, NoConversationLogger, events};
use crate::ports::progress::{NoTurnProgress, TurnProgressNotifier};
use crate::ports::reasoning_engine::{EngineError, EngineRequest, ReasoningEngine};
use crate::ports::tool_executor::ToolExecutorPort;
use crate::ports::tool_schema::ToolSchemaPort;
use awsops_domain::{ConversationStore, FailureKind, StopIndicator, ToolCall, ToolOutcome, Turn};
use serde_json::{Value, json};
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that end a turn without an answer.
#[derive(Error, Debug)]
pub enum RunTurnError {
    #[error("Reasoning engine call failed: {0}")]
    Engine(#[from] EngineError),

    #[error("Tool call limit of {limit} reached before the engine produced an answer")]
    ToolCallLimitExceeded { limit: usize },
}

impl RunTurnError {
    pub fn is_limit_exceeded(&self) -> bool {
        matches!(self, RunTurnError::ToolCallLimitExceeded { .. })
    }
}

/// Agent loop states.
#[derive(Debug, Clone, PartialEq)]
pub enum TurnState {
    AwaitingEngineResponse,
    /// Invocations from the latest assistant turn, in request order
    ExecutingTool(Vec<ToolCall>),
    /// Visible answer of the turn
    Done(String),
}

/// Result of a completed turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnOutput {
    /// Concatenated text of the final assistant turn
    pub answer: String,
    /// Tools dispatched during this turn
    pub tool_calls: usize,
    /// Engine calls made during this turn
    pub engine_calls: usize,
}

/// Use case for running one conversational turn.
pub struct RunTurnUseCase<E: ReasoningEngine + 'static, T: ToolExecutorPort + 'static> {
    engine: Arc<E>,
    tool_executor: Arc<T>,
    tool_schemas: Vec<Value>,
    system_prompt: String,
    params: ExecutionParams,
    logger: Arc<dyn ConversationLogger>,
}

impl<E: ReasoningEngine + 'static, T: ToolExecutorPort + 'static> RunTurnUseCase<E, T> {
    pub fn new(
        engine: Arc<E>,
        tool_executor: Arc<T>,
        schema: &dyn ToolSchemaPort,
        system_prompt: impl Into<String>,
    ) -> Self {
        let tool_schemas = schema.all_tools_schema(tool_executor.tool_spec());
        Self {
            engine,
            tool_executor,
            tool_schemas,
            system_prompt: system_prompt.into(),
            params: ExecutionParams::default(),
            logger: Arc::new(NoConversationLogger),
        }
    }

    pub fn with_params(mut self, params: ExecutionParams) -> Self {
        self.params = params;
        self
    }

    pub fn with_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.logger = logger;
        self
    }

    pub fn params(&self) -> &ExecutionParams {
        &self.params
    }

    pub fn model_id(&self) -> &str {
        self.engine.model_id()
    }

    pub(crate) fn logger(&self) -> &Arc<dyn ConversationLogger> {
        &self.logger
    }

    /// Run one turn without progress reporting.
    pub async fn execute(&self, store: &mut ConversationStore, input: &str) -> Result<TurnOutput, RunTurnError> {
        self.execute_with_progress(store, input, &NoTurnProgress).await
    }

    /// Run one turn: append the user's text, then alternate engine calls and
    /// tool execution until the engine answers.
    pub async fn execute_with_progress(
        &self,
        store: &mut ConversationStore,
        input: &str,
        progress: &dyn TurnProgressNotifier,
    ) -> Result<TurnOutput, RunTurnError> {
        let started = Instant::now();
        store.append(Turn::user(input));
        self.logger
            .log(ConversationEvent::new(events::USER_INPUT, json!({ "text": input })));
        info!("Turn started ({} turns in context)", store.len());

        let mut state = TurnState::AwaitingEngineResponse;
        let mut tool_calls = 0;
        let mut engine_calls = 0;

        loop {
            state = match state {
                TurnState::AwaitingEngineResponse => {
                    debug_assert!(store.pending_tool_requests().is_empty());
                    engine_calls += 1;
                    self.await_engine(store, engine_calls, progress).await?
                }
                TurnState::ExecutingTool(calls) => {
                    self.execute_tools(store, calls, &mut tool_calls, progress).await?;
                    TurnState::AwaitingEngineResponse
                }
                TurnState::Done(answer) => {
                    self.logger.log(ConversationEvent::new(
                        events::ASSISTANT_RESPONSE,
                        json!({ "text": answer, "tool_calls": tool_calls }),
                    ));
                    info!(
                        "Turn completed: {} tool call(s), {} engine call(s) in {:?}",
                        tool_calls,
                        engine_calls,
                        started.elapsed()
                    );
                    return Ok(TurnOutput {
                        answer,
                        tool_calls,
                        engine_calls,
                    });
                }
            };
        }
    }

    async fn await_engine(
        &self,
        store: &mut ConversationStore,
        round: usize,
        progress: &dyn TurnProgressNotifier,
    ) -> Result<TurnState, RunTurnError> {
        progress.on_engine_call_start(round);
        debug!("Engine call #{} with {} turns", round, store.len());

        let request = EngineRequest::new(&self.system_prompt, &self.tool_schemas, store.turns());
        let response = match self.engine.generate(&request).await {
            Ok(response) => response,
            Err(e) => {
                warn!("Engine call #{} failed: {}", round, e);
                self.logger.log(ConversationEvent::new(
                    events::TURN_FAILED,
                    json!({ "reason": "engine", "error": e.to_string() }),
                ));
                return Err(e.into());
            }
        };
        progress.on_engine_call_end(response.stop);

        let calls = response.tool_calls();
        store.append(response.to_turn());

        if calls.is_empty() {
            if response.stop == StopIndicator::ToolRequested {
                warn!("Engine requested tools but sent no tool blocks; treating response as final");
            }
            return Ok(TurnState::Done(response.text_content()));
        }
        if response.stop == StopIndicator::Final {
            debug!("Final response carries {} tool block(s); executing them", calls.len());
        }
        Ok(TurnState::ExecutingTool(calls))
    }

    /// Answer every invocation in order. Once the budget is spent the
    /// remaining invocations get a `LimitExceeded` result and the turn fails.
    async fn execute_tools(
        &self,
        store: &mut ConversationStore,
        calls: Vec<ToolCall>,
        used: &mut usize,
        progress: &dyn TurnProgressNotifier,
    ) -> Result<(), RunTurnError> {
        let mut exhausted = None;

        for call in calls {
            let outcome = match self.params.max_tool_calls {
                Some(limit) if self.params.limit_reached(*used) => {
                    exhausted = Some(limit);
                    ToolOutcome::failure(
                        FailureKind::LimitExceeded,
                        format!("tool call limit of {} reached for this turn", limit),
                    )
                }
                _ => {
                    *used += 1;
                    self.run_tool(&call, progress).await
                }
            };

            store.append(Turn::tool_result(
                call.id.clone(),
                outcome.to_payload(),
                !outcome.is_success(),
            ));
        }

        if let Some(limit) = exhausted {
            warn!("Tool call limit of {} exceeded; aborting turn", limit);
            progress.on_limit_exceeded(limit);
            self.logger.log(ConversationEvent::new(
                events::TURN_FAILED,
                json!({ "reason": "tool_call_limit", "limit": limit }),
            ));
            return Err(RunTurnError::ToolCallLimitExceeded { limit });
        }
        Ok(())
    }

    async fn run_tool(&self, call: &ToolCall, progress: &dyn TurnProgressNotifier) -> ToolOutcome {
        info!("Executing tool: {} ({})", call.tool_name, call.id);
        progress.on_tool_start(call);
        self.logger.log(ConversationEvent::new(
            events::TOOL_CALL,
            json!({ "id": call.id, "tool": call.tool_name, "input": call.arguments }),
        ));

        let outcome = self.tool_executor.execute(call).await;

        if let Some(failure) = outcome.failure_ref() {
            debug!("Tool {} returned error: {}", call.tool_name, failure);
        }
        progress.on_tool_complete(call, &outcome);
        self.logger.log(ConversationEvent::new(
            events::TOOL_RESULT,
            json!({ "id": call.id, "tool": call.tool_name, "is_error": !outcome.is_success(), "outcome": outcome.to_value() }),
        ));
        outcome
    }
}
