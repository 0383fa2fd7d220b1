use anyhow::Result;
use colored::Colorize;
use mathquest_game::{MemoryStorage, Persona};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::{Duration, Instant};

use crate::logic::simulation::{SimulationPlan, SimulationSummary, run_plan};
use crate::scenario::TestScenario;
use crate::storage::FileStorage;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioResult {
    pub scenario_name: String,
    pub persona: String,
    pub seed: u64,
    pub passed: bool,
    pub iterations_run: usize,
    pub successful_iterations: usize,
    pub failures: Vec<String>,
    #[serde(with = "duration_serde")]
    pub average_duration: Duration,
    #[serde(with = "duration_vec_serde")]
    pub performance_data: Vec<Duration>,
}

pub struct LogicTester {
    verbose: bool,
    save_dir: Option<PathBuf>,
}

impl LogicTester {
    pub const fn new(verbose: bool, save_dir: Option<PathBuf>) -> Self {
        Self { verbose, save_dir }
    }

    pub fn run_scenario(
        &self,
        scenario: &TestScenario,
        personas: &[Persona],
        seeds: &[u64],
        iterations: usize,
    ) -> Vec<ScenarioResult> {
        let mut results = Vec::new();

        for &persona in personas {
            for &seed in seeds {
                if self.verbose {
                    println!(
                        "🧪 Testing scenario: {} (learner: {} hero: {} seed: {})",
                        scenario.name.bright_white(),
                        scenario.plan.strategy,
                        persona,
                        seed
                    );
                }
                results.push(self.run_single_scenario(scenario, persona, seed, iterations));
            }
        }

        results
    }

    fn run_single_scenario(
        &self,
        scenario: &TestScenario,
        persona: Persona,
        seed: u64,
        iterations: usize,
    ) -> ScenarioResult {
        let mut successes = 0;
        let mut failures = Vec::new();
        let mut performance_data = Vec::new();

        for i in 0..iterations {
            let start_time = Instant::now();
            let iteration_seed = seed.wrapping_add(u64::try_from(i).unwrap_or(u64::MAX));

            let outcome = self
                .run_iteration(scenario, persona, iteration_seed)
                .and_then(|summary| evaluate_expectations(&scenario.plan, &summary));

            match outcome {
                Ok(()) => {
                    successes += 1;
                    let duration = start_time.elapsed();
                    performance_data.push(duration);
                    if self.verbose {
                        println!(
                            "  ✅ Iteration {}/{} passed ({duration:?})",
                            i + 1,
                            iterations
                        );
                    }
                }
                Err(err) => {
                    let message = format!(
                        "Iteration {} (hero {persona}, seed {iteration_seed}): {err:#}",
                        i + 1
                    );
                    if self.verbose {
                        println!(
                            "  ❌ Iteration {}/{} failed: {}",
                            i + 1,
                            iterations,
                            message.clone().red()
                        );
                    }
                    failures.push(message);
                }
            }
        }

        let average_duration = if performance_data.is_empty() {
            Duration::ZERO
        } else {
            performance_data.iter().sum::<Duration>()
                / u32::try_from(performance_data.len()).unwrap_or(1)
        };

        ScenarioResult {
            scenario_name: scenario.name.to_string(),
            persona: persona.to_string(),
            seed,
            passed: failures.is_empty(),
            iterations_run: iterations,
            successful_iterations: successes,
            failures,
            average_duration,
            performance_data,
        }
    }

    fn run_iteration(
        &self,
        scenario: &TestScenario,
        persona: Persona,
        seed: u64,
    ) -> Result<SimulationSummary> {
        let summary = match &self.save_dir {
            Some(dir) => {
                let slot = dir.join(scenario.key).join(format!("{persona}-{seed}"));
                let storage = FileStorage::new(slot);
                log::debug!("saving to {}", storage.dir().display());
                run_plan(&scenario.plan, storage, persona, seed)?
            }
            None => run_plan(&scenario.plan, MemoryStorage::new(), persona, seed)?,
        };
        log::debug!(
            "{} as {} (seed {}): {} points over {} problems",
            summary.strategy,
            summary.persona,
            summary.seed,
            summary.total_points(),
            summary.problems.len()
        );
        Ok(summary)
    }
}

fn evaluate_expectations(plan: &SimulationPlan, summary: &SimulationSummary) -> Result<()> {
    for expectation in &plan.expectations {
        expectation(summary)?;
    }
    Ok(())
}

mod duration_serde {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        duration.as_millis().serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let millis = u128::deserialize(deserializer)?;
        Ok(Duration::from_millis(u64::try_from(millis).unwrap_or(0)))
    }
}

mod duration_vec_serde {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(durations: &[Duration], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let millis: Vec<u128> = durations.iter().map(Duration::as_millis).collect();
        millis.serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<Duration>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let millis_vec = Vec::<u128>::deserialize(deserializer)?;
        Ok(millis_vec
            .into_iter()
            .map(|m| Duration::from_millis(u64::try_from(m).unwrap_or(0)))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenario::get_scenario;

    #[test]
    fn smoke_passes_for_every_hero() {
        let tester = LogicTester::new(false, None);
        let scenario = get_scenario("smoke").unwrap();
        let results = tester.run_scenario(&scenario, &Persona::ALL, &[1337], 2);
        assert_eq!(results.len(), 3);
        for result in results {
            assert!(result.passed, "{:?}", result.failures);
            assert_eq!(result.successful_iterations, 2);
        }
    }

    #[test]
    fn failing_expectations_are_reported() {
        fn never(_summary: &SimulationSummary) -> Result<()> {
            anyhow::bail!("expected failure")
        }
        let mut scenario = get_scenario("smoke").unwrap();
        scenario.plan = scenario.plan.with_expectation(never);
        let tester = LogicTester::new(false, None);
        let results = tester.run_scenario(&scenario, &[Persona::Builder], &[1], 1);
        assert!(!results[0].passed);
        assert!(results[0].failures[0].contains("expected failure"));
        assert_eq!(results[0].average_duration, Duration::ZERO);
    }

    #[test]
    fn file_backed_runs_use_a_slot_per_iteration() {
        let dir = std::env::temp_dir().join("mathquest-tester-slots");
        let _ = std::fs::remove_dir_all(&dir);
        let tester = LogicTester::new(false, Some(dir.clone()));
        let scenario = get_scenario("persistence-reload").unwrap();
        let results = tester.run_scenario(&scenario, &[Persona::Explorer], &[5], 1);
        assert!(results[0].passed, "{:?}", results[0].failures);
        assert!(dir.join("persistence-reload").join("explorer-5").exists());
        let _ = std::fs::remove_dir_all(dir);
    }

    #[test]
    fn results_serialize_durations_as_millis() {
        let result = ScenarioResult {
            scenario_name: "Smoke".to_string(),
            persona: "builder".to_string(),
            seed: 1,
            passed: true,
            iterations_run: 1,
            successful_iterations: 1,
            failures: Vec::new(),
            average_duration: Duration::from_millis(12),
            performance_data: vec![Duration::from_millis(12)],
        };
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["average_duration"], 12);
        assert_eq!(value["performance_data"][0], 12);
    }
}
