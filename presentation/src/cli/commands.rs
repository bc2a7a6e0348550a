//! CLI command definitions

use clap::{Parser, Subcommand, ValueEnum};
use council_domain::OutputFormat;
use std::path::PathBuf;

/// Output format for review results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    /// Every opinion, issue and round
    Full,
    /// Verdict, score and issue list
    Summary,
    /// JSON output
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Full => OutputFormat::Full,
            FormatArg::Summary => OutputFormat::Summary,
            FormatArg::Json => OutputFormat::Json,
        }
    }
}

/// CLI arguments for design-council
#[derive(Parser, Debug)]
#[command(name = "design-council")]
#[command(
    author,
    version,
    about = "Design Council - Specialist agents review building design proposals"
)]
#[command(long_about = r#"
Design Council runs a panel of specialist agents over a proposed building
change and reports whether the disciplines agree it is acceptable.

A review runs in rounds:
1. Evaluation: every active specialist scores the proposal in parallel
2. Feedback: each specialist sees its peers' opinions and re-evaluates
3. Verdict: opinions are weighted by expertise; any critical issue vetoes

Configuration files are loaded from (in priority order):
1. --config <path>     Explicit config file
2. ./council.toml      Project-level config
3. ~/.config/design-council/config.toml   Global config

Example:
  design-council review proposal.toml
  design-council review proposal.json --format json --max-rounds 5
  design-council check delete-wall.toml
  design-council suggest --climate-zone 2A
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Output format (overrides the config file)
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<FormatArg>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,

    /// Project type, e.g. residential or commercial
    #[arg(long, value_name = "TYPE", global = true)]
    pub project_type: Option<String>,

    /// ASHRAE climate zone, e.g. 4A
    #[arg(long, value_name = "ZONE", global = true)]
    pub climate_zone: Option<String>,

    /// Budget available for the proposal
    #[arg(long, value_name = "AMOUNT", global = true)]
    pub budget: Option<f64>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run a full multi-round review of a proposal file (.toml or .json)
    Review {
        /// Proposal file
        proposal: PathBuf,

        /// Maximum number of evaluation rounds
        #[arg(long, value_name = "N")]
        max_rounds: Option<usize>,

        /// Consensus score required for approval
        #[arg(long, value_name = "SCORE")]
        threshold: Option<f64>,

        /// Per-agent timeout in seconds
        #[arg(long, value_name = "SECS")]
        timeout: Option<u64>,
    },

    /// Pre-check a single action against every specialist
    Check {
        /// Action file (.toml or .json)
        action: PathBuf,
    },

    /// List advice from every specialist for the project context
    Suggest {
        /// Show only the top N suggestions
        #[arg(short = 'n', long, value_name = "N")]
        limit: Option<usize>,
    },
}
