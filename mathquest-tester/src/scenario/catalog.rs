use anyhow::{Result, anyhow, ensure};
use mathquest_game::constants::{FRONTIER_MAX, SPEED_WINDOW_DEFAULT, TOPIC_COUNT};
use mathquest_game::journal::certificate;
use mathquest_game::{Advance, AudioCue, TOPICS, certificate_code};

use super::TestScenario;
use crate::logic::{LearnerStrategy, PlanStep, ProblemRecord, SimulationPlan, SimulationSummary};

const PROBLEMS_PER_CAMPAIGN: usize = TOPIC_COUNT as usize * 3;
/// 150 + 200 + 250 for a quick, first-try learner.
const PERFECT_TOPIC_POINTS: u32 = 600;

pub fn catalog_scenarios() -> Vec<TestScenario> {
    vec![
        TestScenario::new(
            "smoke",
            "Smoke",
            "Quick learner clears the first topic",
            SimulationPlan::new(LearnerStrategy::Prodigy)
                .with_step(PlanStep::Topic(1))
                .with_expectation(first_topic_expectation),
        ),
        TestScenario::new(
            "full-campaign",
            "Full Campaign",
            "Quick learner clears every topic and earns the certificate",
            SimulationPlan::new(LearnerStrategy::Prodigy)
                .with_step(PlanStep::Campaign)
                .with_expectation(quest_complete_expectation)
                .with_expectation(perfect_score_expectation),
        ),
        TestScenario::new(
            "struggling-learner",
            "Struggling Learner",
            "Every answer wrong; every solution revealed, nothing scored",
            SimulationPlan::new(LearnerStrategy::Stubborn)
                .with_step(PlanStep::Campaign)
                .with_expectation(quest_complete_expectation)
                .with_expectation(all_revealed_expectation),
        ),
        TestScenario::new(
            "random-learner",
            "Random Learner",
            "Seeded mix of right and wrong answers at random speeds",
            SimulationPlan::new(LearnerStrategy::Guesser)
                .with_step(PlanStep::Campaign)
                .with_expectation(quest_complete_expectation)
                .with_expectation(bookkeeping_expectation),
        ),
        TestScenario::new(
            "invalid-input",
            "Invalid Input",
            "Unreadable answers cost nothing; comma decimals are accepted",
            SimulationPlan::new(LearnerStrategy::Typo)
                .with_step(PlanStep::Topic(1))
                .with_step(PlanStep::Topic(2))
                .with_expectation(invalid_input_expectation),
        ),
        TestScenario::new(
            "persistence-reload",
            "Persistence Reload",
            "Progress survives dropping and rebuilding the engine",
            SimulationPlan::new(LearnerStrategy::Prodigy)
                .with_step(PlanStep::Topic(1))
                .with_step(PlanStep::Reload)
                .with_step(PlanStep::Topic(2))
                .with_step(PlanStep::Reload)
                .with_expectation(reload_expectation),
        ),
        TestScenario::new(
            "replay-topic",
            "Replay Topic",
            "Replaying a cleared topic scores again without moving the frontier",
            SimulationPlan::new(LearnerStrategy::Prodigy)
                .with_step(PlanStep::Topic(1))
                .with_step(PlanStep::Topic(1))
                .with_step(PlanStep::Topic(2))
                .with_expectation(replay_expectation),
        ),
        TestScenario::new(
            "instructor-override",
            "Instructor Override",
            "Wrong PIN is rejected; the right one unlocks and completes the quest",
            SimulationPlan::new(LearnerStrategy::Prodigy)
                .with_step(PlanStep::Unlock("000"))
                .with_step(PlanStep::Unlock("314"))
                .with_step(PlanStep::Topic(7))
                .with_step(PlanStep::Complete("314"))
                .with_expectation(override_expectation),
        ),
    ]
}

fn first_topic_expectation(summary: &SimulationSummary) -> Result<()> {
    let state = &summary.final_state;
    ensure!(state.frontier == 2, "frontier is {}, expected 2", state.frontier);
    ensure!(
        state.inventory.ids() == [1],
        "inventory is {:?}",
        state.inventory.ids()
    );
    ensure!(
        summary.stored.unlocked_level == 2,
        "stored level is {}",
        summary.stored.unlocked_level
    );
    ensure!(
        summary.cues.first() == Some(&AudioCue::Victory),
        "hero selection should play the victory cue, got {:?}",
        summary.cues.first()
    );
    ensure!(
        summary.cues.contains(&AudioCue::Success),
        "no success cue was played"
    );
    Ok(())
}

fn quest_complete_expectation(summary: &SimulationSummary) -> Result<()> {
    let state = &summary.final_state;
    ensure!(
        summary.problems.len() == PROBLEMS_PER_CAMPAIGN,
        "played {} problems",
        summary.problems.len()
    );
    ensure!(state.is_quest_complete(), "inventory {:?}", state.inventory.ids());
    ensure!(state.frontier == FRONTIER_MAX, "frontier is {}", state.frontier);
    let cert = certificate(state).ok_or_else(|| anyhow!("no certificate after the campaign"))?;
    ensure!(
        cert.code == certificate_code(state.score),
        "certificate code {} does not match score {}",
        cert.code,
        state.score
    );
    ensure!(
        summary.stored.score == state.score,
        "stored score {} differs from live score {}",
        summary.stored.score,
        state.score
    );
    Ok(())
}

fn perfect_score_expectation(summary: &SimulationSummary) -> Result<()> {
    let expected = PERFECT_TOPIC_POINTS * u32::from(TOPIC_COUNT);
    ensure!(
        summary.final_state.score == expected,
        "score is {}, expected {expected}",
        summary.final_state.score
    );
    ensure!(
        summary.final_state.mistakes.is_empty(),
        "{} mistakes logged",
        summary.final_state.mistakes.len()
    );
    for problem in &summary.problems {
        ensure!(
            problem.elapsed < SPEED_WINDOW_DEFAULT,
            "topic {} {} took {}s, outside the bonus window",
            problem.topic,
            problem.tier,
            problem.elapsed
        );
    }
    ensure!(
        certificate_code(expected) == "5200-MST",
        "unexpected certificate code {}",
        certificate_code(expected)
    );
    Ok(())
}

fn all_revealed_expectation(summary: &SimulationSummary) -> Result<()> {
    ensure!(
        summary.problems.iter().all(ProblemRecord::was_revealed),
        "some problems were never revealed"
    );
    ensure!(summary.final_state.score == 0, "score is {}", summary.final_state.score);
    ensure!(
        summary.final_state.mistakes.len() == PROBLEMS_PER_CAMPAIGN,
        "{} mistakes logged",
        summary.final_state.mistakes.len()
    );
    ensure!(
        summary.stored.mistakes_log.len() == PROBLEMS_PER_CAMPAIGN,
        "{} mistakes stored",
        summary.stored.mistakes_log.len()
    );
    Ok(())
}

fn bookkeeping_expectation(summary: &SimulationSummary) -> Result<()> {
    ensure!(
        summary.final_state.score == summary.total_points(),
        "score {} differs from awarded points {}",
        summary.final_state.score,
        summary.total_points()
    );
    ensure!(
        summary.final_state.mistakes.len() == summary.missed_problems(),
        "{} mistakes logged for {} missed problems",
        summary.final_state.mistakes.len(),
        summary.missed_problems()
    );
    for problem in &summary.problems {
        ensure!(
            problem.wrong_attempts() <= 3,
            "topic {} {} took {} wrong attempts",
            problem.topic,
            problem.tier,
            problem.wrong_attempts()
        );
    }
    Ok(())
}

fn invalid_input_expectation(summary: &SimulationSummary) -> Result<()> {
    let invalid: usize = summary.problems.iter().map(ProblemRecord::invalid_inputs).sum();
    ensure!(
        invalid == summary.problems.len(),
        "{invalid} invalid inputs over {} problems",
        summary.problems.len()
    );
    ensure!(
        summary.final_state.mistakes.is_empty(),
        "invalid input was logged as a mistake"
    );
    ensure!(
        summary.final_state.score == PERFECT_TOPIC_POINTS * 2,
        "score is {}",
        summary.final_state.score
    );
    ensure!(
        summary.cues.contains(&AudioCue::Error),
        "invalid input should play the error cue"
    );
    Ok(())
}

fn reload_expectation(summary: &SimulationSummary) -> Result<()> {
    ensure!(summary.reloads == 2, "{} reloads", summary.reloads);
    for (index, (before, after)) in summary.reload_checks.iter().enumerate() {
        ensure!(
            before == after,
            "reload {} lost progress: {before:?} -> {after:?}",
            index + 1
        );
    }
    ensure!(
        summary.final_state.frontier == 3,
        "frontier is {}",
        summary.final_state.frontier
    );
    ensure!(
        summary.final_state.score == PERFECT_TOPIC_POINTS * 2,
        "score is {}",
        summary.final_state.score
    );
    Ok(())
}

fn replay_expectation(summary: &SimulationSummary) -> Result<()> {
    let state = &summary.final_state;
    ensure!(state.frontier == 3, "frontier is {}", state.frontier);
    ensure!(
        state.inventory.ids() == [1, 2],
        "inventory is {:?}",
        state.inventory.ids()
    );
    let fresh: Vec<bool> = summary
        .completions
        .iter()
        .filter_map(|advance| match advance {
            Advance::TopicCompleted { new_artifact, .. } => Some(*new_artifact),
            Advance::NextProblem { .. } => None,
        })
        .collect();
    ensure!(fresh == [true, false, true], "artifact flags {fresh:?}");
    ensure!(
        state.score == PERFECT_TOPIC_POINTS * 3,
        "replays should score again, got {}",
        state.score
    );
    Ok(())
}

fn override_expectation(summary: &SimulationSummary) -> Result<()> {
    let state = &summary.final_state;
    ensure!(
        summary.rejected_overrides == 1,
        "{} overrides rejected",
        summary.rejected_overrides
    );
    ensure!(state.frontier == FRONTIER_MAX, "frontier is {}", state.frontier);
    ensure!(
        state.inventory.len() == TOPICS.len(),
        "inventory is {:?}",
        state.inventory.ids()
    );
    ensure!(
        certificate(state).is_some(),
        "completing the quest should issue a certificate"
    );
    ensure!(
        summary.stored.unlocked_level == FRONTIER_MAX,
        "stored level is {}",
        summary.stored.unlocked_level
    );
    Ok(())
}
