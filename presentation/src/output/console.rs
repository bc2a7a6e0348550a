//! Console output formatter for review reports

use crate::output::formatter::OutputFormatter;
use chrono::{DateTime, Local, Utc};
use colored::{ColoredString, Colorize};
use council_domain::{
    AgentSuggestion, AttributedIssue, OutputFormat, ReviewReport, Severity, ValidationResult,
    Verdict,
};

/// Formats review reports for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Render a report in the requested format.
    pub fn render(report: &ReviewReport, format: OutputFormat) -> String {
        match format {
            OutputFormat::Full => Self::format(report),
            OutputFormat::Summary => Self::format_summary(report),
            OutputFormat::Json => Self::format_json(report),
        }
    }

    /// Format the complete report
    pub fn format(report: &ReviewReport) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("Design Council Review"));
        output.push('\n');
        output.push_str(&format!(
            "{} {}\n",
            "Proposal:".cyan().bold(),
            report.proposal_id
        ));
        output.push_str(&format!(
            "{} {}\n\n",
            "Completed:".cyan().bold(),
            Self::timestamp(report.completed_at)
        ));

        output.push_str(&Self::verdict_block(report));

        if !report.history.is_empty() {
            output.push_str(&Self::section_header("Rounds"));
            for round in &report.history {
                let delta = round
                    .max_delta
                    .map(|d| format!("max change {:.3}", d))
                    .unwrap_or_else(|| "initial".to_string());
                output.push_str(&format!("  Round {}: {}", round.round, delta));
                if !round.revised_agents.is_empty() {
                    output.push_str(&format!(", revised: {}", round.revised_agents.join(", ")));
                }
                if round.abstentions > 0 {
                    output.push_str(&format!(", {} abstained", round.abstentions));
                }
                output.push('\n');
            }
        }

        if !report.opinions.is_empty() {
            output.push_str(&Self::section_header("Opinions"));
            for opinion in report.opinions.values() {
                let marker = if opinion.is_positive() {
                    "●".green()
                } else {
                    "○".red()
                };
                let mut title = format!(
                    "{} {} ({}) {:.2}",
                    marker,
                    opinion.agent_id().bold(),
                    opinion.specialty(),
                    opinion.score()
                );
                if opinion.is_revised() {
                    title.push_str(&format!(" {}", "revised".dimmed()));
                }
                if opinion.is_abstained() {
                    title.push_str(&format!(" {}", "abstained".yellow()));
                }
                output.push_str(&format!("\n{}\n", title));

                if !opinion.aspect_scores().is_empty() {
                    let aspects = opinion
                        .aspect_scores()
                        .iter()
                        .map(|(name, score)| format!("{} {:.2}", name, score))
                        .collect::<Vec<_>>()
                        .join(", ");
                    output.push_str(&format!("    {}\n", aspects.dimmed()));
                }
                for strength in opinion.strengths() {
                    output.push_str(&format!("    {} {}\n", "+".green(), strength));
                }
            }
        }

        output.push_str(&Self::issues_section(&report.issues));

        if !report.failures.is_empty() {
            output.push_str(&Self::section_header("Agent Failures"));
            for failure in &report.failures {
                output.push_str(&format!(
                    "  {} round {}: {}\n",
                    failure.agent_id.yellow(),
                    failure.round,
                    failure.reason
                ));
            }
        }

        output.push_str(&Self::footer());
        output
    }

    /// Format as JSON
    pub fn format_json(report: &ReviewReport) -> String {
        serde_json::to_string_pretty(report).unwrap_or_else(|_| "{}".to_string())
    }

    /// Format verdict and issue list only (concise output)
    pub fn format_summary(report: &ReviewReport) -> String {
        let mut output = String::new();
        output.push_str(&format!(
            "{}\n\n",
            format!("=== Review of {} ===", report.proposal_id).cyan().bold()
        ));
        output.push_str(&Self::verdict_block(report));
        output.push_str(&Self::issues_section(&report.issues));
        output
    }

    /// Format merged suggestions, highest priority first.
    pub fn format_suggestions(suggestions: &[AgentSuggestion]) -> String {
        if suggestions.is_empty() {
            return format!("{}\n", "No suggestions.".dimmed());
        }
        let mut output = String::new();
        for (index, suggestion) in suggestions.iter().enumerate() {
            output.push_str(&format!(
                "{:>2}. {} {}\n",
                index + 1,
                suggestion.title.bold(),
                format!("[{}, {}]", suggestion.suggestion_type, suggestion.agent_id).dimmed()
            ));
            output.push_str(&format!("    {}\n", suggestion.description));
            output.push_str(&format!(
                "    {}\n",
                format!(
                    "confidence {:.2}, impact {:.2}",
                    suggestion.confidence, suggestion.impact
                )
                .dimmed()
            ));
            for prerequisite in &suggestion.prerequisites {
                output.push_str(&format!("    requires: {}\n", prerequisite));
            }
        }
        output
    }

    pub fn format_suggestions_json(suggestions: &[AgentSuggestion]) -> String {
        serde_json::to_string_pretty(suggestions).unwrap_or_else(|_| "[]".to_string())
    }

    /// Format the merged result of an action pre-check.
    pub fn format_validation(result: &ValidationResult) -> String {
        let mut output = if result.is_valid {
            format!("{}\n", "Action accepted".green().bold())
        } else {
            format!("{}\n", "Action rejected".red().bold())
        };
        for issue in &result.issues {
            output.push_str(&format!(
                "  {} {} {}\n",
                Self::severity_tag(issue.severity),
                issue.code.bold(),
                issue.description
            ));
            if let Some(fix) = &issue.suggested_fix {
                output.push_str(&format!("      fix: {}\n", fix));
            }
        }
        output
    }

    pub fn format_validation_json(result: &ValidationResult) -> String {
        serde_json::to_string_pretty(result).unwrap_or_else(|_| "{}".to_string())
    }

    fn verdict_block(report: &ReviewReport) -> String {
        let mut output = format!(
            "{} {}\n",
            "Verdict:".bold(),
            Self::verdict_label(report.verdict)
        );
        if report.verdict.is_cancelled() {
            output.push_str(&format!(
                "{}\n",
                format!("Cancelled after {} completed round(s)", report.rounds).dimmed()
            ));
            return output;
        }
        output.push_str(&format!(
            "{} {:.3} {}\n",
            "Consensus:".bold(),
            report.consensus_score,
            report.opinion_summary()
        ));
        output.push_str(&format!(
            "{} {}{}\n",
            "Rounds:".bold(),
            report.rounds,
            if report.converged { " (converged)" } else { "" }
        ));
        output
    }

    fn issues_section(issues: &[AttributedIssue]) -> String {
        if issues.is_empty() {
            return String::new();
        }
        let mut output = Self::section_header(&format!("Issues ({})", issues.len()));
        for attributed in issues {
            let issue = &attributed.issue;
            let location = if issue.location.is_empty() {
                String::new()
            } else {
                format!(" @ {}", issue.location)
            };
            output.push_str(&format!(
                "  {} {}{} {}\n",
                Self::severity_tag(issue.severity),
                issue.code.bold(),
                location,
                format!("({})", attributed.agent_id).dimmed()
            ));
            output.push_str(&format!("      {}\n", issue.description));
            if let Some(standard) = &issue.standard {
                output.push_str(&format!("      see {}\n", standard));
            }
            if let Some(fix) = &issue.suggested_fix {
                output.push_str(&format!("      fix: {}\n", fix));
            }
        }
        output
    }

    fn verdict_label(verdict: Verdict) -> ColoredString {
        let label = verdict.to_string();
        match verdict {
            Verdict::Approved => label.green().bold(),
            Verdict::NeedsRevision => label.yellow().bold(),
            Verdict::Rejected => label.red().bold(),
            Verdict::Cancelled => label.dimmed(),
        }
    }

    fn severity_tag(severity: Severity) -> ColoredString {
        let tag = format!("[{}]", severity.as_str().to_uppercase());
        match severity {
            Severity::Critical => tag.red().bold(),
            Severity::Error => tag.red(),
            Severity::Warning => tag.yellow(),
            Severity::Info => tag.blue(),
        }
    }

    fn timestamp(millis: u64) -> String {
        i64::try_from(millis)
            .ok()
            .and_then(DateTime::<Utc>::from_timestamp_millis)
            .map(|t| t.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_else(|| millis.to_string())
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format(&self, report: &ReviewReport) -> String {
        Self::format(report)
    }

    fn format_json(&self, report: &ReviewReport) -> String {
        Self::format_json(report)
    }

    fn format_summary(&self, report: &ReviewReport) -> String {
        Self::format_summary(report)
    }
}
