//! REPL (Read-Eval-Print Loop) for the agent

use super::command::ReplCommand;
use crate::output::console::ConsoleFormatter;
use crate::progress::reporter::{ProgressReporter, SimpleProgress};
use awsops_application::{AgentSession, ReasoningEngine, RunTurnError, ToolExecutorPort, TurnProgressNotifier};
use colored::Colorize;
use reedline::{DefaultPrompt, DefaultPromptSegment, FileBackedHistory, Reedline, Signal};
use std::path::{Path, PathBuf};
use tracing::warn;

const HISTORY_CAPACITY: usize = 1000;

/// Whether the loop keeps reading after a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Exit,
}

/// Interactive agent REPL
///
/// One turn finishes before the next line is read. Turn failures are
/// printed and the loop continues.
pub struct AgentRepl<E: ReasoningEngine + 'static, T: ToolExecutorPort + 'static> {
    session: AgentSession<E, T>,
    region: String,
    show_progress: bool,
    history_file: Option<PathBuf>,
}

impl<E: ReasoningEngine + 'static, T: ToolExecutorPort + 'static> AgentRepl<E, T> {
    pub fn new(session: AgentSession<E, T>, region: impl Into<String>) -> Self {
        Self {
            session,
            region: region.into(),
            show_progress: true,
            history_file: dirs::data_dir().map(|d| d.join("awsops").join("history.txt")),
        }
    }

    /// Set whether to show the spinner
    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    /// Line history file; `None` keeps history in memory only
    pub fn with_history_file(mut self, path: Option<PathBuf>) -> Self {
        self.history_file = path;
        self
    }

    pub fn session(&self) -> &AgentSession<E, T> {
        &self.session
    }

    fn editor(&self) -> Reedline {
        let editor = Reedline::create();
        let Some(path) = &self.history_file else {
            return editor;
        };
        ensure_parent_dir(path);
        match FileBackedHistory::with_file(HISTORY_CAPACITY, path.clone()) {
            Ok(history) => editor.with_history(Box::new(history)),
            Err(e) => {
                warn!("Could not open history file {}: {}", path.display(), e);
                editor
            }
        }
    }

    /// Run the interactive REPL until `quit` or Ctrl-D
    pub async fn run(&mut self) -> std::io::Result<()> {
        let mut editor = self.editor();
        let prompt = DefaultPrompt::new(
            DefaultPromptSegment::Basic("awsops".to_string()),
            DefaultPromptSegment::Empty,
        );

        println!("{}", ConsoleFormatter::banner(&self.region, self.session.model_id()));

        loop {
            match editor.read_line(&prompt)? {
                Signal::Success(line) => {
                    if self.handle_line(&line).await == LoopControl::Exit {
                        break;
                    }
                }
                Signal::CtrlC => continue,
                Signal::CtrlD => break,
            }
        }

        println!("Bye!");
        Ok(())
    }

    /// Handle one input line.
    pub async fn handle_line(&mut self, line: &str) -> LoopControl {
        match ReplCommand::parse(line) {
            ReplCommand::Quit => return LoopControl::Exit,
            ReplCommand::Empty => {}
            ReplCommand::Help => println!("{}", ConsoleFormatter::help()),
            ReplCommand::History => println!("{}", ConsoleFormatter::history(self.session.history())),
            ReplCommand::Clear => {
                self.session.clear();
                println!("{}", "Conversation cleared.".dimmed());
            }
            ReplCommand::Ask(question) => match self.ask(&question).await {
                Ok(answer) => println!("\n{}\n", ConsoleFormatter::answer(&answer)),
                Err(e) => eprintln!("\n{}\n", ConsoleFormatter::turn_error(&e)),
            },
        }
        LoopControl::Continue
    }

    /// Run a single question (single-query mode) and return the answer.
    pub async fn ask(&mut self, question: &str) -> Result<String, RunTurnError> {
        let progress: Box<dyn TurnProgressNotifier> = if self.show_progress {
            Box::new(ProgressReporter::new())
        } else {
            Box::new(SimpleProgress)
        };
        let output = self.session.ask_with_progress(question, progress.as_ref()).await?;
        Ok(output.answer)
    }
}

/// Create the directory holding `path`. Returns false (and warns) on failure.
fn ensure_parent_dir(path: &Path) -> bool {
    let Some(parent) = path.parent() else {
        return true;
    };
    match std::fs::create_dir_all(parent) {
        Ok(()) => true,
        Err(e) => {
            warn!("Could not create history directory {}: {}", parent.display(), e);
            false
        }
    }
}
