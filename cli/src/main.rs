//! CLI entrypoint for awsops
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result};
use awsops_application::{AgentSession, ConversationLogger, NoConversationLogger, RunTurnUseCase, ToolExecutorPort};
use awsops_domain::AgentPromptTemplate;
use awsops_infrastructure::{
    AwsCliTool, BedrockEngine, BedrockEngineConfig, ConfigLoader, CostExplorerReporter, CostSummaryTool, Ec2Inventory,
    FileConfig, InstancesTool, JsonSchemaToolConverter, JsonlConversationLogger, SecurityGroupsTool,
    TokioCommandRunner, ToolRegistry, locate_program,
};
use awsops_presentation::{AgentRepl, Cli, ConsoleFormatter};
use clap::Parser;
use std::io::IsTerminal;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    if cli.show_config {
        println!("{}", ConfigLoader::describe_sources(cli.config.as_deref()));
        return Ok(ExitCode::SUCCESS);
    }

    // === Configuration ===
    let mut config = if cli.no_config {
        ConfigLoader::load_without_files()
    } else {
        ConfigLoader::load(cli.config.as_deref())
    }
    .context("failed to load configuration")?;
    apply_cli_overrides(&mut config, &cli);
    config.validate().context("invalid configuration")?;

    let _log_guard = init_tracing(cli.verbose, config.logging.dir.as_deref());
    info!("Starting awsops");
    for warning in config.warnings() {
        warn!("{}", warning);
    }

    if locate_program(&config.agent.cli_program).is_none() {
        warn!(
            "'{}' not found on PATH; the aws_cli tool will report errors",
            config.agent.cli_program
        );
    }

    // === Dependency Injection ===
    let region = config.aws.region.clone();
    let profile = config.aws.profile().map(str::to_string);

    let ec2 = Arc::new(Ec2Inventory::new(&region, profile.as_deref()).await);
    let cost = Arc::new(CostExplorerReporter::new(&config.aws.cost_region, profile.as_deref()).await);
    let engine = Arc::new(
        BedrockEngine::new(&BedrockEngineConfig {
            model: config.engine.model_id.clone(),
            region: config.engine.region.clone(),
            profile: profile.clone(),
            max_tokens: config.engine.max_tokens,
        })
        .await,
    );

    let aws_cli = AwsCliTool::new(Arc::new(TokioCommandRunner), region.clone())
        .with_classifier(config.agent.command_policy()?.classifier())
        .with_program(config.agent.cli_program.clone())
        .with_timeout(config.agent.command_timeout());

    let registry = ToolRegistry::new()
        .register(aws_cli)
        .register(InstancesTool::new(ec2.clone()))
        .register(SecurityGroupsTool::new(ec2))
        .register(CostSummaryTool::new(cost))
        .with_timeout(config.agent.tool_timeout());

    let system_prompt = AgentPromptTemplate::agent_system(registry.tool_spec(), &region);
    let use_case = RunTurnUseCase::new(engine, Arc::new(registry), &JsonSchemaToolConverter, system_prompt)
        .with_params(config.agent.execution_params())
        .with_logger(conversation_logger(&config));

    let show_spinner = !cli.quiet && std::io::stderr().is_terminal();
    let mut repl = AgentRepl::new(AgentSession::new(use_case), region).with_progress(show_spinner);

    // Single query mode
    if let Some(query) = cli.query.as_deref() {
        return match repl.ask(query).await {
            Ok(answer) => {
                println!("{}", ConsoleFormatter::answer(&answer));
                Ok(ExitCode::SUCCESS)
            }
            Err(e) => {
                eprintln!("{}", ConsoleFormatter::turn_error(&e));
                Ok(ExitCode::FAILURE)
            }
        };
    }

    repl.run().await?;
    Ok(ExitCode::SUCCESS)
}

/// CLI flags take precedence over every configuration source.
fn apply_cli_overrides(config: &mut FileConfig, cli: &Cli) {
    if let Some(region) = &cli.region {
        config.aws.region = region.clone();
    }
    if let Some(profile) = &cli.profile {
        config.aws.profile = Some(profile.clone());
    }
    if let Some(model) = &cli.model {
        config.engine.model_id = model.clone();
    }
    if let Some(max) = cli.max_tool_calls {
        config.agent.max_tool_calls = max;
    }
}

/// Initialize logging based on verbosity level. `RUST_LOG` wins when set.
///
/// With a log directory, output goes to a daily-rolling file so the
/// interactive terminal stays clean; the returned guard flushes it on exit.
fn init_tracing(verbose: u8, log_dir: Option<&str>) -> Option<WorkerGuard> {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace", // -vvv or more
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    match log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "awsops.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(writer)
                .with_ansi(false)
                .init();
            Some(guard)
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .with_target(false)
                .init();
            None
        }
    }
}

fn conversation_logger(config: &FileConfig) -> Arc<dyn ConversationLogger> {
    let Some(path) = config.logging.conversation_log.as_deref() else {
        return Arc::new(NoConversationLogger);
    };
    match JsonlConversationLogger::open(path) {
        Ok(logger) => {
            info!("Conversation log: {}", logger.path().display());
            Arc::new(logger)
        }
        Err(e) => {
            warn!("Could not open conversation log {}: {}", path, e);
            Arc::new(NoConversationLogger)
        }
    }
}
