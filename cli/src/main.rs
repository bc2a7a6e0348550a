//! CLI entrypoint for Design Council
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, anyhow};
use clap::{CommandFactory, Parser};
use council_application::{
    NoProgress, ReviewOptions, ReviewProgressNotifier, ReviewProposalInput, ReviewProposalUseCase,
    gather_suggestions, precheck_action,
};
use council_domain::{DesignContext, OutputFormat, Verdict};
use council_infrastructure::{AgentRoster, ConfigLoader, FileConfig, ProposalLoader};
use council_presentation::{
    Cli, Command, ConsoleFormatter, OutputConfig, ProgressReporter, SimpleProgress,
};
use std::path::Path;
use std::process::ExitCode;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

const EXIT_NEEDS_REVISION: u8 = 1;
const EXIT_REJECTED: u8 = 2;
const EXIT_FAILURE: u8 = 3;
const EXIT_CANCELLED: u8 = 130;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(EXIT_FAILURE)
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode> {
    if cli.show_config {
        ConfigLoader::print_config_sources();
        return Ok(ExitCode::SUCCESS);
    }

    let Some(command) = cli.command.as_ref() else {
        eprintln!("{}", Cli::command().render_help());
        return Err(anyhow!("no command given"));
    };

    info!("Starting Design Council");

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow!("failed to load configuration: {}", e))?
    };
    check_config(&config)?;

    let output = OutputConfig {
        format: config.output.format.unwrap_or_default(),
        color: config.output.color,
        show_progress: config.output.show_progress,
    }
    .with_overrides(cli.format.map(OutputFormat::from), cli.no_color, cli.quiet);
    if !output.color {
        colored::control::set_override(false);
    }

    let context = project_context(&cli, &config);
    let roster = AgentRoster::from_config(&config.agents);

    match command {
        Command::Review {
            proposal,
            max_rounds,
            threshold,
            timeout,
        } => {
            let mut options = config.review_options();
            if let Some(max) = max_rounds {
                options = options.with_max_rounds(*max);
            }
            if let Some(threshold) = threshold {
                options = options.with_approve_threshold(*threshold);
            }
            if let Some(secs) = timeout {
                options = options.with_agent_timeout(Duration::from_secs(*secs));
            }
            review(proposal, context, options, &roster, &output, cli.verbose).await
        }
        Command::Check { action } => {
            let action = ProposalLoader::load_action(action)
                .with_context(|| format!("cannot read action {}", action.display()))?;
            let result = precheck_action(&roster.agents(), &action);
            let text = match output.format {
                OutputFormat::Json => ConsoleFormatter::format_validation_json(&result),
                _ => ConsoleFormatter::format_validation(&result),
            };
            println!("{}", text);
            Ok(if result.is_valid {
                ExitCode::SUCCESS
            } else {
                ExitCode::from(EXIT_NEEDS_REVISION)
            })
        }
        Command::Suggest { limit } => {
            let mut suggestions = gather_suggestions(&roster.agents(), &context).await;
            if let Some(limit) = limit {
                suggestions.truncate(*limit);
            }
            let text = match output.format {
                OutputFormat::Json => ConsoleFormatter::format_suggestions_json(&suggestions),
                _ => ConsoleFormatter::format_suggestions(&suggestions),
            };
            println!("{}", text);
            Ok(ExitCode::SUCCESS)
        }
    }
}

async fn review(
    path: &Path,
    context: DesignContext,
    options: ReviewOptions,
    roster: &AgentRoster,
    output: &OutputConfig,
    verbose: u8,
) -> Result<ExitCode> {
    let proposal = ProposalLoader::load(path)
        .with_context(|| format!("cannot read proposal {}", path.display()))?;

    // === Dependency Injection ===
    let cancellation = CancellationToken::new();
    let ctrl_c = cancellation.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, cancelling review");
            ctrl_c.cancel();
        }
    });

    let use_case = ReviewProposalUseCase::new(roster.agents()).with_cancellation(cancellation);
    let input = ReviewProposalInput::new(proposal)
        .with_context(context)
        .with_options(options);

    // Log lines and progress bars do not mix.
    let progress: Box<dyn ReviewProgressNotifier> = match (output.show_progress, verbose) {
        (false, _) => Box::new(NoProgress),
        (true, 0) => Box::new(ProgressReporter::new()),
        (true, _) => Box::new(SimpleProgress),
    };
    let report = use_case
        .execute_with_progress(input, progress.as_ref())
        .await?;

    println!("{}", ConsoleFormatter::render(&report, output.format));

    Ok(ExitCode::from(verdict_exit_code(report.verdict)))
}

fn verdict_exit_code(verdict: Verdict) -> u8 {
    match verdict {
        Verdict::Approved => 0,
        Verdict::NeedsRevision => EXIT_NEEDS_REVISION,
        Verdict::Rejected => EXIT_REJECTED,
        Verdict::Cancelled => EXIT_CANCELLED,
    }
}

/// Log warnings and fail on errors found in the loaded configuration.
fn check_config(config: &FileConfig) -> Result<()> {
    let issues = config.validate();
    let mut failed = false;
    for issue in &issues {
        if issue.is_error() {
            error!("Config error: {}", issue);
            failed = true;
        } else {
            warn!("Config warning: {}", issue);
        }
    }
    if failed {
        let errors = issues
            .iter()
            .filter(|i| i.is_error())
            .map(|i| i.to_string())
            .collect::<Vec<_>>()
            .join("; ");
        return Err(anyhow!("invalid configuration: {}", errors));
    }
    Ok(())
}

/// `[context]` from the config file with command-line values on top.
fn project_context(cli: &Cli, config: &FileConfig) -> DesignContext {
    let mut context = config.context.clone();
    if let Some(project_type) = &cli.project_type {
        context = context.with_project_type(project_type);
    }
    if let Some(zone) = &cli.climate_zone {
        context = context.with_climate_zone(zone);
    }
    if let Some(budget) = cli.budget {
        context = context.with_budget(budget);
    }
    context
}
