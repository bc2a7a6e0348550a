//! End-to-end reviews with the standard council.

use super::AgentRoster;
use council_application::{ReviewOptions, ReviewProposalInput, ReviewProposalUseCase};
use council_domain::{DesignContext, Proposal, ProposedElement, ReviewReport, Severity, Verdict};
use tokio_util::sync::CancellationToken;

fn wall(thickness: f64) -> Proposal {
    Proposal::new("p-wall", "single wall")
        .with_element(ProposedElement::wall(thickness, 3.0, 5.0).with_id("W-1"))
}

async fn review(proposal: Proposal) -> ReviewReport {
    review_on(&AgentRoster::standard(), proposal, ReviewOptions::default()).await
}

async fn review_on(
    roster: &AgentRoster,
    proposal: Proposal,
    options: ReviewOptions,
) -> ReviewReport {
    ReviewProposalUseCase::new(roster.agents())
        .execute(
            ReviewProposalInput::new(proposal)
                .with_context(DesignContext::default())
                .with_options(options),
        )
        .await
        .unwrap()
}

fn assert_same_outcome(actual: &ReviewReport, expected: &ReviewReport) {
    assert_eq!(actual.verdict, expected.verdict);
    assert_eq!(actual.consensus_score, expected.consensus_score);
    assert_eq!(actual.rounds, expected.rounds);
    for (agent_id, opinion) in &expected.opinions {
        assert_eq!(
            actual.opinion(agent_id).map(|o| o.score()),
            Some(opinion.score()),
            "{agent_id}"
        );
    }
}

#[tokio::test]
async fn test_reference_wall_is_approved() {
    let report = review(wall(0.2)).await;

    assert_eq!(report.verdict, Verdict::Approved);
    assert_eq!(report.opinions.len(), 6);
    assert!(report.issues.is_empty());
    assert!(report.converged);
    assert_eq!(report.rounds, 2);
    assert!((report.consensus_score - 1.0).abs() < 1e-12);
    assert!(report.failures.is_empty());
}

#[tokio::test]
async fn test_very_thin_wall_is_vetoed() {
    let report = review(wall(0.05)).await;

    assert_eq!(report.verdict, Verdict::Rejected);
    let critical = report
        .issues
        .iter()
        .find(|i| i.issue.severity == Severity::Critical)
        .unwrap();
    assert_eq!(critical.agent_id, "structural-agent");
    assert_eq!(critical.issue.location, "W-1");
    // Most severe first.
    assert_eq!(report.issues[0].issue.severity, Severity::Critical);
}

#[tokio::test]
async fn test_narrow_door_raises_safety_issues() {
    let proposal = Proposal::new("p-door", "narrow door")
        .with_element(ProposedElement::door(0.6, 2.1).with_id("D-1"));
    let report = review(proposal).await;

    let safety = report.opinion("safety-agent").unwrap();
    assert!(safety.issues().iter().any(|i| i.code == "SAFE_DOOR_TOO_NARROW"));
    assert!(safety.aspect("accessibility").unwrap() < 1.0);
    assert!(
        report
            .issues
            .iter()
            .any(|i| i.agent_id == "safety-agent" && i.issue.location == "D-1")
    );
    assert_ne!(report.verdict, Verdict::Approved);
}

#[tokio::test]
async fn test_pre_cancelled_review() {
    let token = CancellationToken::new();
    token.cancel();
    let roster = AgentRoster::standard();
    let report = ReviewProposalUseCase::new(roster.agents())
        .with_cancellation(token)
        .execute(ReviewProposalInput::new(wall(0.2)))
        .await
        .unwrap();

    assert_eq!(report.verdict, Verdict::Cancelled);
    assert!(report.opinions.is_empty());
    assert_eq!(report.rounds, 0);
    assert!(report.history.is_empty());
}

#[tokio::test]
async fn test_revised_flag_tracks_score_changes() {
    // Unanimous full scores: feedback leaves everyone where they were.
    let clean = review(wall(0.2)).await;
    assert!(clean.opinions.values().all(|o| !o.is_revised()));

    // The structural outlier is pulled up by its peers in round 2.
    let thin = review(wall(0.05)).await;
    assert!(thin.history.len() >= 2);
    assert!(
        thin.history[1]
            .revised_agents
            .contains(&"structural-agent".to_string())
    );

    // Final flags agree with the last round's change set.
    let last = thin.history.last().unwrap();
    for (agent_id, opinion) in &thin.opinions {
        assert_eq!(
            opinion.is_revised(),
            last.revised_agents.contains(agent_id),
            "{agent_id}"
        );
    }
}

#[tokio::test]
async fn test_disabled_specialty_is_left_out() {
    let config: crate::config::FileConfig =
        toml::from_str("[agents.cost]\nenabled = false\n").unwrap();
    let roster = AgentRoster::from_config(&config.agents);
    let report = ReviewProposalUseCase::new(roster.agents())
        .execute(ReviewProposalInput::new(wall(0.2)).with_options(config.review_options()))
        .await
        .unwrap();

    assert_eq!(report.opinions.len(), 5);
    assert!(report.opinion("cost-agent").is_none());
    assert_eq!(report.verdict, Verdict::Approved);
}

#[tokio::test]
async fn test_single_round_review() {
    let roster = AgentRoster::standard();
    let report = ReviewProposalUseCase::new(roster.agents())
        .execute(
            ReviewProposalInput::new(wall(0.2))
                .with_options(ReviewOptions::default().with_max_rounds(1)),
        )
        .await
        .unwrap();

    assert_eq!(report.rounds, 1);
    assert!(!report.converged);
    assert_eq!(report.verdict, Verdict::Approved);
    assert!(report.opinions.values().all(|o| !o.is_revised()));
}

#[tokio::test]
async fn test_reused_roster_starts_each_review_clean() {
    let one_round = ReviewOptions::default().with_max_rounds(1);
    let fresh = review_on(&AgentRoster::standard(), wall(0.2), one_round.clone()).await;

    let roster = AgentRoster::standard();
    let thin = review_on(&roster, wall(0.05), ReviewOptions::default()).await;
    assert!(thin.rounds >= 2);
    let reused = review_on(&roster, wall(0.2), one_round).await;

    assert_eq!(reused.consensus_score, 1.0);
    assert_same_outcome(&reused, &fresh);
}

#[tokio::test]
async fn test_concurrent_reviews_on_one_roster() {
    let solo_thin = review(wall(0.05)).await;
    let solo_clean = review(wall(0.2)).await;

    let roster = AgentRoster::standard();
    let (thin, clean) = tokio::join!(
        review_on(&roster, wall(0.05), ReviewOptions::default()),
        review_on(&roster, wall(0.2), ReviewOptions::default()),
    );

    assert_same_outcome(&thin, &solo_thin);
    assert_same_outcome(&clean, &solo_clean);
    assert_eq!(clean.verdict, Verdict::Approved);
    assert_eq!(thin.verdict, Verdict::Rejected);
}
