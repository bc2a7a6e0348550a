//! Review options: coordinator loop control.
//!
//! [`ReviewOptions`] groups the parameters that bound the feedback loop in
//! [`ReviewProposalUseCase`](crate::use_cases::review_proposal::ReviewProposalUseCase)
//! and the threshold handed to the consensus policy.

use crate::use_cases::review_proposal::ReviewError;
use council_domain::{ConsensusPolicy, DEFAULT_APPROVE_THRESHOLD};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Coordinator loop control parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewOptions {
    /// Upper bound on evaluation rounds, round 1 included.
    pub max_rounds: usize,
    /// The loop stops once the largest per-agent score change drops below this.
    pub convergence_epsilon: f64,
    /// Score change above which an opinion is marked as revised.
    pub revision_epsilon: f64,
    /// Consensus score required for approval (inclusive).
    pub approve_threshold: f64,
    /// Per-agent, per-round evaluation deadline.
    pub agent_timeout: Duration,
}

impl Default for ReviewOptions {
    fn default() -> Self {
        Self {
            max_rounds: 3,
            convergence_epsilon: 0.01,
            revision_epsilon: 0.001,
            approve_threshold: DEFAULT_APPROVE_THRESHOLD,
            agent_timeout: Duration::from_secs(30),
        }
    }
}

impl ReviewOptions {
    // ==================== Builder Methods ====================

    pub fn with_max_rounds(mut self, max: usize) -> Self {
        self.max_rounds = max;
        self
    }

    pub fn with_convergence_epsilon(mut self, epsilon: f64) -> Self {
        self.convergence_epsilon = epsilon;
        self
    }

    pub fn with_revision_epsilon(mut self, epsilon: f64) -> Self {
        self.revision_epsilon = epsilon;
        self
    }

    pub fn with_approve_threshold(mut self, threshold: f64) -> Self {
        self.approve_threshold = threshold;
        self
    }

    pub fn with_agent_timeout(mut self, timeout: Duration) -> Self {
        self.agent_timeout = timeout;
        self
    }

    pub fn policy(&self) -> ConsensusPolicy {
        ConsensusPolicy::new(self.approve_threshold)
    }

    /// Check the options, returning the first problem found.
    pub fn validate(&self) -> Result<(), ReviewError> {
        if self.max_rounds == 0 {
            return Err(ReviewError::InvalidMaxRounds);
        }
        if !self.policy().is_valid() {
            return Err(ReviewError::InvalidThreshold(self.approve_threshold));
        }
        for (name, value) in [
            ("convergence_epsilon", self.convergence_epsilon),
            ("revision_epsilon", self.revision_epsilon),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ReviewError::InvalidEpsilon { name, value });
            }
        }
        if self.agent_timeout.is_zero() {
            return Err(ReviewError::InvalidTimeout);
        }
        Ok(())
    }
}
