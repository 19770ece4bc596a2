//! CLI command definitions

use clap::Parser;
use std::path::PathBuf;

/// CLI arguments for awsops
#[derive(Parser, Debug)]
#[command(name = "awsops")]
#[command(author, version, about = "Ask questions about your AWS infrastructure in plain language")]
#[command(long_about = r#"
awsops answers questions about your AWS account by letting Claude (on AWS
Bedrock) call a small set of read-only inspection tools:

  aws_cli              Read-only AWS CLI commands (mutating verbs are refused)
  get_ec2_instances    EC2 instances by state
  get_security_groups  Security groups with rules open to 0.0.0.0/0
  get_cost_summary     Cost by service over the last N days

Configuration files are loaded from (in priority order):
1. AWSOPS_<SECTION>__<KEY>                Environment variables
2. --config <path>                        Explicit config file
3. ./awsops.toml or ./.awsops.toml        Project-level config
4. ~/.config/awsops/config.toml           Global config

Example:
  awsops -q "Which security groups allow SSH from anywhere?"
  awsops --region us-west-2
"#)]
pub struct Cli {
    /// Ask one question, print the answer and exit
    #[arg(short, long, value_name = "TEXT")]
    pub query: Option<String>,

    /// AWS region to inspect
    #[arg(short, long, value_name = "REGION")]
    pub region: Option<String>,

    /// AWS profile for credentials
    #[arg(short, long, value_name = "NAME")]
    pub profile: Option<String>,

    /// Bedrock model alias or ID
    #[arg(short, long, value_name = "MODEL")]
    pub model: Option<String>,

    /// Tool calls allowed per question (0 = unbounded)
    #[arg(long, value_name = "N")]
    pub max_tool_calls: Option<usize>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress the spinner
    #[arg(long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}
