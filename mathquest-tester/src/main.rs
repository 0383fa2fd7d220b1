mod logic;
mod scenario;
mod storage;
mod util;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use std::fs::File;
use std::io::{BufWriter, Write, stdout};
use std::path::{Path, PathBuf};
use std::time::Instant;

use logic::{LogicTester, ScenarioResult, reports};
use mathquest_game::Persona;
use scenario::{get_scenario, list_scenarios, scenario_keys};
use util::{parse_personas, parse_seeds, split_csv};

#[derive(Debug, Parser)]
#[command(name = "mathquest-tester", version = "0.1.0")]
#[command(about = "Automated QA for MathQuest - scripted learners played through the quest engine")]
struct Args {
    /// Scenarios to run (comma-separated, or `all`)
    #[arg(long, default_value = "smoke")]
    scenarios: String,

    /// List all available scenarios and exit
    #[arg(long)]
    list_scenarios: bool,

    /// Heroes to play (builder,explorer,scholar or all)
    #[arg(long, default_value = "all")]
    personas: String,

    /// Seeds to run (comma-separated)
    #[arg(long, default_value = "1337")]
    seeds: String,

    /// Number of iterations per scenario, hero and seed
    #[arg(long, default_value_t = 3)]
    iterations: usize,

    /// Output report format
    #[arg(long, default_value = "console")]
    #[arg(value_parser = ["json", "markdown", "console"])]
    report: String,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Optional path to write the report output instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,

    /// Persist saves as JSON files under this directory instead of in memory
    #[arg(long)]
    save_dir: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if maybe_list_scenarios(&args)? {
        return Ok(());
    }

    announce_banner();

    let start_time = Instant::now();
    let scenarios = expand_scenarios(&args.scenarios);
    let personas = parse_personas(&split_csv(&args.personas))?;
    let seeds = parse_seeds(&split_csv(&args.seeds))?;

    let results = run_logic_scenarios(&args, &scenarios, &personas, &seeds);

    write_reports(&args, &results, start_time)?;

    if results.iter().any(|r| !r.passed) {
        std::process::exit(1);
    }

    Ok(())
}

fn maybe_list_scenarios(args: &Args) -> Result<bool> {
    if !args.list_scenarios {
        return Ok(false);
    }
    let mut sink = report_sink(args.output.as_deref())?;
    writeln!(sink, "Available scenarios:")?;
    for (key, description) in list_scenarios() {
        writeln!(sink, "  {key:25} - {description}")?;
    }
    sink.flush()?;
    Ok(true)
}

fn announce_banner() {
    println!("{}", "🧮 MathQuest Automated Tester".bright_cyan().bold());
    println!("{}", "=".repeat(29).cyan());
}

fn expand_scenarios(scenarios_arg: &str) -> Vec<String> {
    let mut scenarios = split_csv(scenarios_arg);
    if scenarios.iter().any(|s| s == "all") {
        scenarios.retain(|s| s != "all");
        for key in scenario_keys() {
            if !scenarios.iter().any(|s| s == key) {
                scenarios.push(key.to_string());
            }
        }
    }
    scenarios
}

fn run_logic_scenarios(
    args: &Args,
    scenarios: &[String],
    personas: &[Persona],
    seeds: &[u64],
) -> Vec<ScenarioResult> {
    let mut results = Vec::new();

    println!("{}", "🧠 Running Quest Scenarios".bright_yellow().bold());
    println!("{}", "-".repeat(30).yellow());

    let tester = LogicTester::new(args.verbose, args.save_dir.clone());

    for scenario_name in scenarios {
        if let Some(scenario) = get_scenario(scenario_name) {
            results.extend(tester.run_scenario(&scenario, personas, seeds, args.iterations));
        } else {
            eprintln!("⚠️  Unknown scenario: {}", scenario_name.yellow());
        }
    }

    results
}

/// Buffered destination for reports: the `--output` file, or stdout.
fn report_sink(path: Option<&Path>) -> Result<Box<dyn Write>> {
    Ok(match path {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            Box::new(BufWriter::new(file))
        }
        None => Box::new(BufWriter::new(stdout())),
    })
}

fn write_reports(args: &Args, results: &[ScenarioResult], start_time: Instant) -> Result<()> {
    let mut sink = report_sink(args.output.as_deref())?;
    let out = sink.as_mut();

    match (args.report.as_str(), results.is_empty()) {
        ("json", true) => writeln!(out, "[]")?,
        ("json", false) => reports::generate_json_report(out, results)?,
        ("markdown", true) => writeln!(out, "# MathQuest Test Results\n\n_No scenarios executed._")?,
        ("markdown", false) => reports::generate_markdown_report(out, results)?,
        (_, true) => writeln!(out, "No scenarios executed.")?,
        (_, false) => reports::generate_console_report(out, results, start_time.elapsed())?,
    }

    writeln!(out)?;
    writeln!(out, "🏁 Total time: {:?}", start_time.elapsed())?;
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn base_args() -> Args {
        Args {
            scenarios: "smoke".to_string(),
            list_scenarios: false,
            personas: "all".to_string(),
            seeds: "1337".to_string(),
            iterations: 1,
            report: "json".to_string(),
            verbose: false,
            output: None,
            save_dir: None,
        }
    }

    fn sample_result(passed: bool) -> ScenarioResult {
        ScenarioResult {
            scenario_name: "Smoke".to_string(),
            persona: "builder".to_string(),
            seed: 1337,
            passed,
            iterations_run: 3,
            successful_iterations: if passed { 3 } else { 2 },
            failures: if passed {
                Vec::new()
            } else {
                vec!["failure".to_string()]
            },
            average_duration: Duration::from_millis(10),
            performance_data: vec![Duration::from_millis(10)],
        }
    }

    fn report_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("mathquest-tester-{name}"))
    }

    #[test]
    fn expands_all_scenarios_keyword() {
        let expanded = expand_scenarios("replay-topic,all");
        assert_eq!(expanded[0], "replay-topic");
        assert!(expanded.contains(&"smoke".to_string()));
        assert!(expanded.contains(&"instructor-override".to_string()));
        assert_eq!(
            expanded.iter().filter(|s| *s == "replay-topic").count(),
            1
        );
    }

    #[test]
    fn expand_scenarios_without_all_preserves_order() {
        let expanded = expand_scenarios("smoke,full-campaign");
        assert_eq!(
            expanded,
            vec!["smoke".to_string(), "full-campaign".to_string()]
        );
    }

    #[test]
    fn run_logic_scenarios_skips_unknown_names() {
        let args = base_args();
        let results = run_logic_scenarios(
            &args,
            &["smoke".to_string(), "nope".to_string()],
            &[Persona::Builder],
            &[42],
        );
        assert_eq!(results.len(), 1);
        assert!(results[0].passed, "{:?}", results[0].failures);
    }

    #[test]
    fn write_reports_emits_json_output() {
        let temp = report_path("report.json");
        let args = Args {
            output: Some(temp.clone()),
            ..base_args()
        };
        write_reports(&args, &[], Instant::now()).unwrap();
        let content = std::fs::read_to_string(temp).unwrap();
        assert!(content.contains("[]"));
    }

    #[test]
    fn write_reports_emits_json_for_results() {
        let temp = report_path("results.json");
        let args = Args {
            output: Some(temp.clone()),
            ..base_args()
        };
        write_reports(&args, &[sample_result(true)], Instant::now()).unwrap();
        let content = std::fs::read_to_string(temp).unwrap();
        assert!(content.contains("\"scenario_name\": \"Smoke\""));
    }

    #[test]
    fn write_reports_markdown_empty_results() {
        let temp = report_path("empty.md");
        let args = Args {
            report: "markdown".to_string(),
            output: Some(temp.clone()),
            ..base_args()
        };
        write_reports(&args, &[], Instant::now()).unwrap();
        let content = std::fs::read_to_string(temp).unwrap();
        assert!(content.contains("_No scenarios executed._"));
    }

    #[test]
    fn write_reports_console_lists_failures() {
        let temp = report_path("console.txt");
        let args = Args {
            report: "console".to_string(),
            output: Some(temp.clone()),
            ..base_args()
        };
        write_reports(&args, &[sample_result(false)], Instant::now()).unwrap();
        let content = std::fs::read_to_string(temp).unwrap();
        assert!(content.contains("failure"));
        assert!(content.contains("Total time"));
    }

    #[test]
    fn maybe_list_scenarios_writes_output() {
        let temp = report_path("scenarios.txt");
        let args = Args {
            list_scenarios: true,
            output: Some(temp.clone()),
            ..base_args()
        };
        assert!(maybe_list_scenarios(&args).unwrap());
        let content = std::fs::read_to_string(temp).unwrap();
        assert!(content.contains("Available scenarios"));
        assert!(content.contains("persistence-reload"));
    }

    #[test]
    fn maybe_list_scenarios_returns_false_when_disabled() {
        assert!(!maybe_list_scenarios(&base_args()).unwrap());
    }

    #[test]
    fn report_sink_defaults_to_stdout() {
        let mut sink = report_sink(None).unwrap();
        sink.write_all(b"ok").unwrap();
        sink.flush().unwrap();
    }

    #[test]
    fn report_sink_reports_unwritable_paths() {
        let missing = report_path("no-such-dir").join("report.json");
        let err = report_sink(Some(&missing)).err().unwrap();
        assert!(err.to_string().contains("failed to create"));
    }
}
