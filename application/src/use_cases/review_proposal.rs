//! Review Proposal use case
//!
//! Orchestrates the multi-round specialist review of one proposal:
//!
//! ```text
//! round 1:  dispatch ──> collect ──┬──> converged? ──> aggregate ──> report
//! round r:  broadcast ──> revise ──┘
//! ```
//!
//! Every round fans out one task per active agent and waits for all of them
//! before moving on. An agent that errors, panics or misses its deadline is
//! replaced by an abstain opinion for that round; the rest of the council
//! carries on.
//!
//! Feedback inboxes belong to the call, so reviews sharing agent instances
//! never see each other's opinions.

use crate::config::ReviewOptions;
use crate::ports::progress::{NoProgress, ReviewProgressNotifier};
use crate::ports::specialist_agent::{AgentError, SpecialistAgent};
use council_domain::util::current_timestamp;
use council_domain::{
    AgentFailure, AgentOpinion, DesignContext, DomainError, ExpertiseLevel, FeedbackInbox,
    Proposal, ReviewPhase, ReviewReport, RoundSummary, Specialty, WeightedOpinion,
};
use futures::FutureExt;
use std::any::Any;
use std::collections::{BTreeMap, BTreeSet};
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Contract violations detected before any agent is dispatched
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ReviewError {
    #[error("No active agents")]
    NoActiveAgents,

    #[error("Duplicate agent id: {0}")]
    DuplicateAgentId(String),

    #[error("max_rounds must be at least 1")]
    InvalidMaxRounds,

    #[error("approve_threshold must lie in [0, 1], got {0}")]
    InvalidThreshold(f64),

    #[error("{name} must be a non-negative number, got {value}")]
    InvalidEpsilon { name: &'static str, value: f64 },

    #[error("agent_timeout must be greater than zero")]
    InvalidTimeout,

    #[error("Invalid proposal: {0}")]
    InvalidProposal(#[from] DomainError),
}

/// Input for the ReviewProposal use case
#[derive(Debug, Clone)]
pub struct ReviewProposalInput {
    pub proposal: Proposal,
    pub context: Option<DesignContext>,
    pub options: ReviewOptions,
}

impl ReviewProposalInput {
    pub fn new(proposal: Proposal) -> Self {
        Self {
            proposal,
            context: None,
            options: ReviewOptions::default(),
        }
    }

    pub fn with_context(mut self, context: DesignContext) -> Self {
        self.context = Some(context);
        self
    }

    pub fn with_options(mut self, options: ReviewOptions) -> Self {
        self.options = options;
        self
    }
}

/// Use case for reviewing a proposal with a council of specialist agents
///
/// Holds no state between calls; every `execute` owns its round buffers
/// and feedback inboxes.
pub struct ReviewProposalUseCase {
    agents: Vec<Arc<dyn SpecialistAgent>>,
    cancellation_token: Option<CancellationToken>,
}

/// Opinions and diagnostics gathered in one round.
struct RoundOutcome {
    opinions: BTreeMap<String, AgentOpinion>,
    failures: Vec<AgentFailure>,
}

/// Phase bookkeeping for one review.
struct ReviewSession<'a> {
    proposal_id: &'a str,
    phase: ReviewPhase,
}

impl<'a> ReviewSession<'a> {
    fn new(proposal_id: &'a str) -> Self {
        Self {
            proposal_id,
            phase: ReviewPhase::Idle,
        }
    }

    fn transition(&mut self, next: ReviewPhase) {
        if !self.phase.can_transition_to(next) {
            warn!(
                "Review {}: unexpected phase change {} -> {}",
                self.proposal_id, self.phase, next
            );
        }
        debug!("Review {}: {} -> {}", self.proposal_id, self.phase, next);
        self.phase = next;
    }
}

impl ReviewProposalUseCase {
    pub fn new(agents: Vec<Arc<dyn SpecialistAgent>>) -> Self {
        Self {
            agents,
            cancellation_token: None,
        }
    }

    /// Set a cancellation token for graceful interruption
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation_token = Some(token);
        self
    }

    /// Execute the use case with default (no-op) progress
    pub async fn execute(&self, input: ReviewProposalInput) -> Result<ReviewReport, ReviewError> {
        self.execute_with_progress(input, &NoProgress).await
    }

    /// Execute the use case with progress callbacks
    ///
    /// Cancellation is not an error: it yields a report with
    /// [`Verdict::Cancelled`](council_domain::Verdict::Cancelled) and no
    /// opinions.
    pub async fn execute_with_progress(
        &self,
        input: ReviewProposalInput,
        progress: &dyn ReviewProgressNotifier,
    ) -> Result<ReviewReport, ReviewError> {
        let agents = self.active_agents()?;
        input.options.validate()?;
        input.proposal.validate()?;

        let ReviewProposalInput {
            proposal,
            context,
            options,
        } = input;
        let token = self
            .cancellation_token
            .clone()
            .unwrap_or_else(CancellationToken::new);
        let mut session = ReviewSession::new(&proposal.id);

        if token.is_cancelled() {
            info!("Review of {} cancelled before dispatch", proposal.id);
            session.transition(ReviewPhase::Cancelled);
            return Ok(ReviewReport::cancelled(&proposal.id, 0));
        }

        info!(
            "Reviewing proposal {} with {} agents (max {} rounds)",
            proposal.id,
            agents.len(),
            options.max_rounds
        );
        progress.on_review_start(&proposal.id, agents.len());

        let shared_proposal = Arc::new(proposal.clone());
        let shared_context = context.map(Arc::new);

        let mut inboxes: BTreeMap<String, FeedbackInbox> = agents
            .iter()
            .map(|a| (a.agent_id().to_string(), FeedbackInbox::new(a.agent_id())))
            .collect();
        let mut latest: BTreeMap<String, AgentOpinion> = BTreeMap::new();
        let mut history = Vec::new();
        let mut failures = Vec::new();
        let mut converged = false;

        for round in 1..=options.max_rounds {
            session.transition(if round == 1 {
                ReviewPhase::Dispatching
            } else {
                ReviewPhase::Revising
            });
            info!("Round {}: evaluating", round);
            progress.on_round_start(round, agents.len());

            session.transition(ReviewPhase::Collecting);
            let outcome = collect_round(
                &agents,
                round,
                &shared_proposal,
                &shared_context,
                &inboxes,
                &token,
                options.agent_timeout,
                progress,
            )
            .await;

            if token.is_cancelled() {
                info!("Review of {} cancelled during round {}", proposal.id, round);
                session.transition(ReviewPhase::Cancelled);
                return Ok(ReviewReport::cancelled(&proposal.id, round - 1));
            }

            failures.extend(outcome.failures);
            let previous = (round > 1).then_some(&latest);
            let (opinions, summary) =
                compare_rounds(round, previous, outcome.opinions, options.revision_epsilon);
            progress.on_round_complete(&summary);

            let settled = summary
                .max_delta
                .is_some_and(|delta| delta < options.convergence_epsilon);
            if let Some(delta) = summary.max_delta {
                debug!("Round {}: max score change {:.4}", round, delta);
            }
            history.push(summary);
            latest = opinions;

            if settled {
                info!("Converged after {} rounds", round);
                converged = true;
                break;
            }
            if round < options.max_rounds {
                session.transition(ReviewPhase::Broadcasting);
                broadcast(&agents, &mut inboxes, &latest);
            }
        }

        if !converged {
            info!("Round cap of {} reached without convergence", options.max_rounds);
        }
        session.transition(ReviewPhase::Converged);

        let report = build_report(
            &proposal, &agents, &options, latest, history, failures, converged,
        );
        session.transition(ReviewPhase::Reported);

        info!(
            "Verdict for {}: {} (consensus {:.3})",
            report.proposal_id, report.verdict, report.consensus_score
        );
        progress.on_verdict(report.verdict, report.consensus_score);
        Ok(report)
    }

    /// Active agents, after checking the council is non-empty with unique ids.
    fn active_agents(&self) -> Result<Vec<Arc<dyn SpecialistAgent>>, ReviewError> {
        let mut seen = BTreeSet::new();
        let mut active = Vec::new();
        for agent in self.agents.iter().filter(|a| a.is_active()) {
            if !seen.insert(agent.agent_id().to_string()) {
                return Err(ReviewError::DuplicateAgentId(agent.agent_id().to_string()));
            }
            active.push(Arc::clone(agent));
        }
        if active.is_empty() {
            return Err(ReviewError::NoActiveAgents);
        }
        Ok(active)
    }
}

/// Fan out one evaluation per agent and wait for all of them.
async fn collect_round(
    agents: &[Arc<dyn SpecialistAgent>],
    round: usize,
    proposal: &Arc<Proposal>,
    context: &Option<Arc<DesignContext>>,
    inboxes: &BTreeMap<String, FeedbackInbox>,
    token: &CancellationToken,
    timeout: Duration,
    progress: &dyn ReviewProgressNotifier,
) -> RoundOutcome {
    let mut join_set = JoinSet::new();

    for agent in agents {
        let agent = Arc::clone(agent);
        let proposal = Arc::clone(proposal);
        let context = context.clone();
        let feedback = inboxes
            .get(agent.agent_id())
            .cloned()
            .unwrap_or_else(|| FeedbackInbox::new(agent.agent_id()));
        let token = token.clone();

        join_set.spawn(async move {
            let result = evaluate_isolated(
                agent.as_ref(),
                &proposal,
                context.as_deref(),
                &feedback,
                &token,
                timeout,
            )
            .await;
            (agent.agent_id().to_string(), agent.specialty(), result)
        });
    }

    let mut outcome = RoundOutcome {
        opinions: BTreeMap::new(),
        failures: Vec::new(),
    };

    while let Some(joined) = join_set.join_next().await {
        match joined {
            Ok((agent_id, _, Ok(opinion))) => {
                debug!("Agent {} scored {:.3}", agent_id, opinion.score());
                progress.on_agent_complete(round, &agent_id, opinion.score());
                outcome.opinions.insert(agent_id, opinion);
            }
            Ok((agent_id, _, Err(AgentError::Cancelled))) => {
                debug!("Agent {} stopped on cancellation", agent_id);
            }
            Ok((agent_id, specialty, Err(e))) => {
                outcome.abstain(round, &agent_id, specialty, e.to_string(), progress);
            }
            Err(e) => {
                warn!("Task join error: {}", e);
            }
        }
    }

    if token.is_cancelled() {
        return outcome;
    }

    // A task that vanished without reporting still owes the round an opinion.
    for agent in agents {
        if !outcome.opinions.contains_key(agent.agent_id()) {
            outcome.abstain(
                round,
                agent.agent_id(),
                agent.specialty(),
                "evaluation task aborted".to_string(),
                progress,
            );
        }
    }

    outcome
}

impl RoundOutcome {
    fn abstain(
        &mut self,
        round: usize,
        agent_id: &str,
        specialty: Specialty,
        reason: String,
        progress: &dyn ReviewProgressNotifier,
    ) {
        warn!("Agent {} abstains in round {}: {}", agent_id, round, reason);
        progress.on_agent_abstain(round, agent_id, &reason);
        self.opinions.insert(
            agent_id.to_string(),
            AgentOpinion::abstain(agent_id, specialty, &reason),
        );
        self.failures.push(AgentFailure {
            agent_id: agent_id.to_string(),
            round,
            reason,
        });
    }
}

/// Run one evaluation, turning panics and timeouts into errors.
///
/// Cancellation is left to the agent, which holds the token; the deadline
/// still bounds an agent that ignores it.
async fn evaluate_isolated(
    agent: &dyn SpecialistAgent,
    proposal: &Proposal,
    context: Option<&DesignContext>,
    feedback: &FeedbackInbox,
    token: &CancellationToken,
    timeout: Duration,
) -> Result<AgentOpinion, AgentError> {
    let evaluation =
        AssertUnwindSafe(agent.evaluate(proposal, context, feedback, token)).catch_unwind();

    match tokio::time::timeout(timeout, evaluation).await {
        Err(_) => Err(AgentError::Timeout(timeout)),
        Ok(Err(payload)) => Err(AgentError::Panicked(panic_message(payload.as_ref()))),
        Ok(Ok(result)) => result,
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}

/// Mark revised opinions and summarise the change from the previous round.
fn compare_rounds(
    round: usize,
    previous: Option<&BTreeMap<String, AgentOpinion>>,
    current: BTreeMap<String, AgentOpinion>,
    revision_epsilon: f64,
) -> (BTreeMap<String, AgentOpinion>, RoundSummary) {
    let abstentions = current.values().filter(|o| o.is_abstained()).count();
    let mut max_delta: Option<f64> = None;
    let mut revised_agents = Vec::new();
    let mut opinions = BTreeMap::new();

    for (agent_id, opinion) in current {
        let delta = previous
            .and_then(|p| p.get(&agent_id))
            .map(|before| (opinion.score() - before.score()).abs());
        if let Some(delta) = delta {
            max_delta = Some(max_delta.map_or(delta, |m| m.max(delta)));
        }
        let revised = delta.is_some_and(|d| d > revision_epsilon);
        if revised {
            revised_agents.push(agent_id.clone());
        }
        opinions.insert(agent_id, opinion.into_revised(revised));
    }

    let summary = RoundSummary {
        round,
        max_delta,
        revised_agents,
        abstentions,
    };
    (opinions, summary)
}

/// Deliver every genuine opinion to every other agent's inbox.
fn broadcast(
    agents: &[Arc<dyn SpecialistAgent>],
    inboxes: &mut BTreeMap<String, FeedbackInbox>,
    opinions: &BTreeMap<String, AgentOpinion>,
) {
    for (sender, opinion) in opinions.iter().filter(|(_, o)| !o.is_abstained()) {
        for agent in agents.iter().filter(|a| a.agent_id() != sender) {
            let inbox = inboxes
                .entry(agent.agent_id().to_string())
                .or_insert_with(|| FeedbackInbox::new(agent.agent_id()));
            let delivered = std::panic::catch_unwind(AssertUnwindSafe(|| {
                agent.receive_feedback(inbox, opinion)
            }));
            if delivered.is_err() {
                warn!(
                    "Agent {} panicked while receiving feedback from {}",
                    agent.agent_id(),
                    sender
                );
            }
        }
    }
    debug!("Broadcast {} opinions to {} agents", opinions.len(), agents.len());
}

fn build_report(
    proposal: &Proposal,
    agents: &[Arc<dyn SpecialistAgent>],
    options: &ReviewOptions,
    opinions: BTreeMap<String, AgentOpinion>,
    history: Vec<RoundSummary>,
    failures: Vec<AgentFailure>,
    converged: bool,
) -> ReviewReport {
    let expertise: BTreeMap<&str, ExpertiseLevel> = agents
        .iter()
        .map(|a| (a.agent_id(), a.expertise_level()))
        .collect();

    let outcome = {
        let weighted: Vec<WeightedOpinion<'_>> = opinions
            .iter()
            .map(|(agent_id, opinion)| {
                let level = expertise
                    .get(agent_id.as_str())
                    .copied()
                    .unwrap_or_else(ExpertiseLevel::full);
                WeightedOpinion::new(opinion, level)
            })
            .collect();
        options.policy().aggregate(&weighted)
    };

    ReviewReport {
        proposal_id: proposal.id.clone(),
        verdict: outcome.verdict,
        consensus_score: outcome.consensus_score,
        opinions,
        issues: outcome.issues,
        rounds: history.len(),
        converged,
        history,
        failures,
        completed_at: current_timestamp(),
    }
}
