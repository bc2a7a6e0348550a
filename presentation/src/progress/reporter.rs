//! Progress reporting for review rounds

use colored::Colorize;
use council_application::ReviewProgressNotifier;
use council_domain::{RoundSummary, Verdict};
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::sync::{Mutex, PoisonError};

/// Reports progress during a review with one bar per round
pub struct ProgressReporter {
    multi: MultiProgress,
    round_bar: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            multi: MultiProgress::new(),
            round_bar: Mutex::new(None),
        }
    }

    fn round_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix:.bold.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-")
    }

    fn with_bar(&self, f: impl FnOnce(&ProgressBar)) {
        let guard = self.round_bar.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(pb) = guard.as_ref() {
            f(pb);
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReviewProgressNotifier for ProgressReporter {
    fn on_round_start(&self, round: usize, agents: usize) {
        let pb = self.multi.add(ProgressBar::new(agents as u64));
        pb.set_style(Self::round_style());
        pb.set_prefix(format!("Round {}", round));
        pb.set_message("Evaluating...");

        *self.round_bar.lock().unwrap_or_else(PoisonError::into_inner) = Some(pb);
    }

    fn on_agent_complete(&self, _round: usize, agent_id: &str, score: f64) {
        self.with_bar(|pb| {
            pb.set_message(format!("{} {} {:.2}", "v".green(), agent_id, score));
            pb.inc(1);
        });
    }

    fn on_agent_abstain(&self, _round: usize, agent_id: &str, reason: &str) {
        self.with_bar(|pb| {
            pb.set_message(format!("{} {} ({})", "x".red(), agent_id, reason));
            pb.inc(1);
        });
    }

    fn on_round_complete(&self, summary: &RoundSummary) {
        let taken = self
            .round_bar
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(pb) = taken {
            let detail = match summary.max_delta {
                Some(delta) => format!("max change {:.3}", delta),
                None => "initial opinions".to_string(),
            };
            pb.finish_with_message(format!("{} ({})", "complete".green(), detail));
        }
    }
}

/// Simple text-based progress (no fancy UI)
pub struct SimpleProgress;

impl ReviewProgressNotifier for SimpleProgress {
    fn on_review_start(&self, proposal_id: &str, agents: usize) {
        eprintln!(
            "{} Reviewing {} with {} agents",
            "->".cyan(),
            proposal_id.bold(),
            agents
        );
    }

    fn on_round_start(&self, round: usize, agents: usize) {
        eprintln!("{} {} ({} agents)", "->".cyan(), format!("Round {}", round).bold(), agents);
    }

    fn on_agent_complete(&self, _round: usize, agent_id: &str, score: f64) {
        eprintln!("  {} {} {:.2}", "v".green(), agent_id, score);
    }

    fn on_agent_abstain(&self, _round: usize, agent_id: &str, reason: &str) {
        eprintln!("  {} {} (abstained: {})", "x".red(), agent_id, reason);
    }

    fn on_round_complete(&self, summary: &RoundSummary) {
        if !summary.revised_agents.is_empty() {
            eprintln!("  revised: {}", summary.revised_agents.join(", "));
        }
    }

    fn on_verdict(&self, verdict: Verdict, consensus_score: f64) {
        eprintln!("{} {} ({:.3})", "=>".cyan(), verdict, consensus_score);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reporter_survives_events_without_round() {
        let reporter = ProgressReporter::new();
        reporter.on_agent_complete(1, "cost-agent", 0.9);
        reporter.on_round_complete(&RoundSummary {
            round: 1,
            max_delta: None,
            revised_agents: Vec::new(),
            abstentions: 0,
        });
        assert!(reporter.round_bar.lock().unwrap().is_none());
    }

    #[test]
    fn test_round_bar_counts_agents() {
        let reporter = ProgressReporter::new();
        reporter.on_round_start(1, 3);
        reporter.on_agent_complete(1, "a", 1.0);
        reporter.on_agent_abstain(1, "b", "timed out");
        assert_eq!(
            reporter.round_bar.lock().unwrap().as_ref().map(|pb| pb.position()),
            Some(2)
        );
        reporter.on_round_complete(&RoundSummary {
            round: 1,
            max_delta: None,
            revised_agents: Vec::new(),
            abstentions: 1,
        });
        assert!(reporter.round_bar.lock().unwrap().is_none());
    }
}
