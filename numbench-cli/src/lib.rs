#![warn(missing_docs)]
//! numbench CLI Library
//!
//! Command line front end over the registered suites. `numbench::run()` (or
//! `numbench_cli::run()`) parses arguments, discovers `numbench.toml`,
//! initializes logging on stderr and dispatches:
//!
//! ```text
//! numbench [run] [SUITES...]   time the selected operations
//! numbench list                show suites, operations and tags
//! numbench verify              check every expectation, untimed
//! numbench demo                random-matrix statistics walkthrough
//! ```

mod config;
mod executor;
mod metadata;
mod planner;

pub use config::*;
pub use executor::{ExecutionConfig, VerificationSummary, execute_plan, verify_plan};
pub use metadata::build_report_meta;
pub use planner::{ExecutionPlan, Filters, PlannedSuite, build_plan};

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use numbench_core::{Clock, Runner, Suite, pin_to_cpu};
use numbench_report::{OutputFormat, Report, SuiteStatus, generate_json_report};
use numbench_suites::{DemoConfig, SUITES, run_demo};
use regex::Regex;
use std::collections::BTreeMap;
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Instant;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// numbench CLI arguments
#[derive(Parser, Debug)]
#[command(name = "numbench")]
#[command(author, version, about = "numbench - ndarray micro-benchmark suites")]
pub struct Cli {
    /// Optional subcommand (Run, List, Verify, Demo); defaults to Run
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Suite and operation selection for the default run
    #[command(flatten)]
    pub selection: Selection,

    /// Run options for the default run
    #[command(flatten)]
    pub options: RunOptions,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Which suites and operations to act on
#[derive(Args, Debug, Clone, Default)]
pub struct Selection {
    /// Suites to select, in run order (all registered suites when empty)
    #[arg(value_name = "SUITES")]
    pub suites: Vec<String>,

    /// Filter operations by regex pattern
    #[arg(long)]
    pub filter: Option<String>,

    /// Filter by tag
    #[arg(long)]
    pub tag: Option<String>,

    /// Skip operations with this tag
    #[arg(long)]
    pub skip_tag: Option<String>,

    /// Select a single operation by exact name
    #[arg(long, value_name = "NAME")]
    pub bench: Option<String>,
}

impl Selection {
    /// Resolve the selection against the suite registry
    pub fn plan(&self) -> anyhow::Result<ExecutionPlan> {
        let pattern = self
            .filter
            .as_deref()
            .map(Regex::new)
            .transpose()
            .context("invalid --filter pattern")?;

        let filters = Filters {
            pattern: pattern.as_ref(),
            tag: self.tag.as_deref(),
            skip_tag: self.skip_tag.as_deref(),
            bench: self.bench.as_deref(),
        };

        Ok(build_plan(&SUITES, &self.suites, &filters)?)
    }
}

/// Options that only apply to timed runs
#[derive(Args, Debug, Clone, Default)]
pub struct RunOptions {
    /// Force this repetition count (mean per call, `ns/iter`) on every suite
    #[arg(short = 'n', long)]
    pub repetitions: Option<u64>,

    /// Skip the untimed result check before each operation
    #[arg(long)]
    pub no_verify: bool,

    /// Continue with the next suite after one fails
    #[arg(long)]
    pub keep_going: bool,

    /// Output format: human, json
    #[arg(long)]
    pub format: Option<String>,

    /// Output file (stdout if not specified)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run benchmarks (default)
    Run {
        /// Suite and operation selection
        #[command(flatten)]
        selection: Selection,
        /// Run options
        #[command(flatten)]
        options: RunOptions,
    },
    /// List suites and their operations
    List {
        /// Suite and operation selection
        #[command(flatten)]
        selection: Selection,
    },
    /// Check every selected operation's result without timing it
    Verify {
        /// Suite and operation selection
        #[command(flatten)]
        selection: Selection,
    },
    /// Print statistics of random matrices
    Demo {
        /// Matrix rows
        #[arg(long, default_value_t = 1_000_000)]
        rows: usize,
        /// Matrix columns
        #[arg(long, default_value_t = 50)]
        cols: usize,
        /// Number of rounds
        #[arg(long, default_value_t = 10)]
        rounds: usize,
        /// RNG seed for a reproducible run
        #[arg(long)]
        seed: Option<u64>,
    },
}

/// Run the numbench CLI with the process arguments.
///
/// # Returns
/// Returns `Ok(())` on success, or an error if any suite or check failed.
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    run_with_cli(cli)
}

/// Run the numbench CLI with pre-parsed arguments.
pub fn run_with_cli(cli: Cli) -> anyhow::Result<()> {
    init_logging(cli.verbose);

    // Discover numbench.toml configuration (CLI flags override)
    let config = NumbenchConfig::discover().unwrap_or_default();

    match cli.command {
        Some(Commands::Run { selection, options }) => run_benchmarks(&selection, &options, &config),
        Some(Commands::List { selection }) => list_benchmarks(&selection),
        Some(Commands::Verify { selection }) => verify_benchmarks(&selection),
        Some(Commands::Demo {
            rows,
            cols,
            rounds,
            seed,
        }) => run_demo_command(DemoConfig {
            rows,
            cols,
            rounds,
            seed,
        }),
        None => run_benchmarks(&cli.selection, &cli.options, &config),
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("numbench=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("numbench=info"))
    };

    // stdout carries report lines only
    // A subscriber may already be installed when the CLI is driven more than
    // once in a process, as in tests
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

fn list_benchmarks(selection: &Selection) -> anyhow::Result<()> {
    let plan = selection.plan()?;
    let mut out = io::stdout().lock();
    write_plan_tree(&mut out, &plan, &SUITES)?;
    Ok(())
}

/// Print the plan as a tree, followed by every tag in the registry.
fn write_plan_tree<W: Write>(
    out: &mut W,
    plan: &ExecutionPlan,
    registry: &[&'static Suite],
) -> io::Result<()> {
    writeln!(out, "numbench plan:")?;

    for planned in &plan.suites {
        let suite = planned.suite;
        writeln!(
            out,
            "├── {}: {} ({} repetition(s), {})",
            suite.id,
            suite.title,
            suite.repetitions.count(),
            suite.repetitions.unit()
        )?;
        for op in &planned.operations {
            let tags = if op.tags.is_empty() {
                String::new()
            } else {
                format!(" [{}]", op.tags.join(", "))
            };
            writeln!(out, "│   ├── {}{}", op.name, tags)?;
        }
    }

    writeln!(out, "{} operations found.", plan.operation_count())?;

    // All tags across the registry, not just the filtered plan
    let mut tag_counts: BTreeMap<&str, usize> = BTreeMap::new();
    for suite in registry {
        for op in suite.operations {
            for tag in op.tags {
                *tag_counts.entry(tag).or_default() += 1;
            }
        }
    }
    if !tag_counts.is_empty() {
        let tags_display: Vec<String> = tag_counts
            .iter()
            .map(|(tag, count)| format!("{} ({})", tag, count))
            .collect();
        writeln!(out, "Tags: {}", tags_display.join(", "))?;
    }

    Ok(())
}

fn verify_benchmarks(selection: &Selection) -> anyhow::Result<()> {
    let plan = selection.plan()?;
    let mut out = io::stdout().lock();
    let summary = verify_plan(&mut out, &plan)?;

    if summary.failed > 0 {
        anyhow::bail!("{} of {} checks failed", summary.failed, summary.total());
    }
    Ok(())
}

fn run_demo_command(config: DemoConfig) -> anyhow::Result<()> {
    info!(
        rows = config.rows,
        cols = config.cols,
        rounds = config.rounds,
        "running demo"
    );
    let mut out = io::stdout().lock();
    run_demo(&mut out, &config)?;
    Ok(())
}

fn run_benchmarks(
    selection: &Selection,
    options: &RunOptions,
    config: &NumbenchConfig,
) -> anyhow::Result<()> {
    let plan = selection.plan()?;

    if plan.is_empty() {
        if let Some(ref tag) = selection.tag {
            let known = SUITES
                .iter()
                .any(|s| s.operations.iter().any(|op| op.has_tag(tag)));
            if !known {
                warn!("tag '{}' not found", tag);
            }
        }
        warn!("no operations selected");
        return Ok(());
    }

    // CLI wins, then numbench.toml
    let exec_config = ExecutionConfig {
        repetitions: options.repetitions.or(config.runner.repetitions),
        verify: config.runner.verify && !options.no_verify,
        keep_going: config.runner.keep_going || options.keep_going,
    };
    exec_config.validate()?;

    let format: OutputFormat = options
        .format
        .as_deref()
        .unwrap_or(&config.output.format)
        .parse()
        .map_err(anyhow::Error::msg)?;

    if config.runner.pin_cpu {
        if let Err(e) = pin_to_cpu(0) {
            warn!("failed to pin to CPU 0: {}", e);
        }
    }

    info!(
        suites = plan.suites.len(),
        operations = plan.operation_count(),
        verify = exec_config.verify,
        "starting run"
    );

    // Human mode streams report lines; JSON mode only keeps the records
    let sink: Box<dyn Write> = match (format, &options.output) {
        (OutputFormat::Human, Some(path)) => Box::new(
            std::fs::File::create(path)
                .with_context(|| format!("creating {}", path.display()))?,
        ),
        (OutputFormat::Human, None) => Box::new(io::stdout().lock()),
        (OutputFormat::Json, _) => Box::new(io::sink()),
    };

    let mut runner = Runner::new(sink).verify_before_timing(exec_config.verify);
    let report = run_plan(&mut runner, &plan, &exec_config)?;
    drop(runner);

    if format == OutputFormat::Json {
        write_json_report(&report, options.output.clone().or_else(|| config.report_path()))?;
    }

    report_outcome(&report)
}

/// Time every suite of `plan` through `runner` and collect the report.
///
/// Invalid settings are rejected before the runner writes anything.
pub fn run_plan<W: Write, C: Clock>(
    runner: &mut Runner<W, C>,
    plan: &ExecutionPlan,
    exec_config: &ExecutionConfig,
) -> anyhow::Result<Report> {
    exec_config.validate()?;

    let start_time = Instant::now();
    let suites = execute_plan(runner, plan, exec_config);
    let total_duration_ms = start_time.elapsed().as_secs_f64() * 1000.0;

    Ok(Report::new(
        build_report_meta(exec_config.report_config()),
        suites,
        total_duration_ms,
    ))
}

/// Turn a finished report into the run's result: an error when any suite failed.
pub fn report_outcome(report: &Report) -> anyhow::Result<()> {
    let failures: Vec<String> = report
        .suites
        .iter()
        .filter(|s| s.status == SuiteStatus::Failed)
        .map(|s| match &s.failure {
            Some(f) => format!("{}: {}", s.id, f.message),
            None => s.id.clone(),
        })
        .collect();

    match failures.len() {
        0 => Ok(()),
        1 => Err(anyhow::anyhow!("suite {}", failures[0])),
        n => Err(anyhow::anyhow!("{} suites failed ({})", n, failures.join("; "))),
    }
}

fn write_json_report(report: &Report, path: Option<PathBuf>) -> anyhow::Result<()> {
    let json = generate_json_report(report)?;

    match path {
        Some(path) => {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent)?;
                }
            }
            std::fs::write(&path, json)
                .with_context(|| format!("writing {}", path.display()))?;
            info!("report written to {}", path.display());
        }
        None => {
            let mut out = io::stdout().lock();
            writeln!(out, "{}", json)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use numbench_core::{BenchError, Expectation, FixedClock, Operation, Outcome, Repetitions};
    use std::time::Duration;

    fn one() -> Outcome {
        Outcome::Scalar(1.0)
    }

    const fn op(name: &'static str, expected: f64) -> Operation {
        Operation {
            name,
            tags: &[],
            run: one,
            expect: Expectation::Scalar(expected),
        }
    }

    static PASSING_OPS: [Operation; 1] = [op("passes", 1.0)];
    static FAILING_OPS: [Operation; 2] = [op("passes_first", 1.0), op("mismatch", 2.0)];

    static PASSING: Suite = Suite {
        id: "passing",
        title: "Passing",
        repetitions: Repetitions::PerIteration(2),
        operations: &PASSING_OPS,
    };

    static FAILING: Suite = Suite {
        id: "failing",
        title: "Failing",
        repetitions: Repetitions::PerIteration(2),
        operations: &FAILING_OPS,
    };

    static REGISTRY: [&Suite; 2] = [&FAILING, &PASSING];

    fn plan_of(ids: &[&str]) -> ExecutionPlan {
        let ids: Vec<String> = ids.iter().map(|s| s.to_string()).collect();
        build_plan(&REGISTRY, &ids, &Filters::default()).unwrap()
    }

    fn fixed_runner() -> Runner<Vec<u8>, FixedClock> {
        Runner::with_clock(Vec::new(), FixedClock::new(Duration::from_micros(2)))
    }

    #[test]
    fn test_passing_run_succeeds() {
        let mut runner = fixed_runner();
        let report = run_plan(&mut runner, &plan_of(&["passing"]), &ExecutionConfig::default())
            .unwrap();

        assert!(report_outcome(&report).is_ok());
        assert_eq!(report.summary.operations_timed, 1);
    }

    #[test]
    fn test_failed_suite_is_an_error() {
        let mut runner = fixed_runner();
        let report = run_plan(
            &mut runner,
            &plan_of(&["failing", "passing"]),
            &ExecutionConfig::default(),
        )
        .unwrap();

        assert_eq!(report.suites[1].status, SuiteStatus::Skipped);
        let err = report_outcome(&report).unwrap_err();
        assert!(err.to_string().starts_with("suite failing: check failed for 'mismatch'"));
    }

    #[test]
    fn test_keep_going_still_ends_in_error() {
        let exec_config = ExecutionConfig {
            keep_going: true,
            ..ExecutionConfig::default()
        };
        let mut runner = fixed_runner();
        let report = run_plan(&mut runner, &plan_of(&["failing", "passing"]), &exec_config)
            .unwrap();

        assert_eq!(report.suites[0].status, SuiteStatus::Failed);
        assert_eq!(report.suites[1].status, SuiteStatus::Passed);
        assert!(report_outcome(&report).is_err());
    }

    #[test]
    fn test_zero_repetitions_rejected_before_output() {
        let exec_config = ExecutionConfig {
            repetitions: Some(0),
            ..ExecutionConfig::default()
        };
        let mut runner = fixed_runner();
        let err = run_plan(&mut runner, &plan_of(&["passing"]), &exec_config).unwrap_err();

        assert!(matches!(
            err.downcast_ref::<BenchError>(),
            Some(BenchError::InvalidRepetitions(0))
        ));
        assert!(runner.into_inner().is_empty());
    }

    #[test]
    fn test_default_command_parses_suites_and_flags() {
        let cli = Cli::try_parse_from([
            "numbench",
            "arith",
            "stats",
            "--skip-tag",
            "large",
            "-n",
            "10",
            "--no-verify",
        ])
        .unwrap();

        assert!(cli.command.is_none());
        assert_eq!(cli.selection.suites, ["arith", "stats"]);
        assert_eq!(cli.selection.skip_tag.as_deref(), Some("large"));
        assert_eq!(cli.options.repetitions, Some(10));
        assert!(cli.options.no_verify);
    }

    #[test]
    fn test_subcommands_parse() {
        let cli = Cli::try_parse_from(["numbench", "verify", "trig", "--tag", "mid"]).unwrap();
        match cli.command {
            Some(Commands::Verify { selection }) => {
                assert_eq!(selection.suites, ["trig"]);
                assert_eq!(selection.tag.as_deref(), Some("mid"));
            }
            other => panic!("unexpected command: {:?}", other),
        }

        let cli = Cli::try_parse_from(["numbench", "demo", "--rows", "10", "--seed", "3"]).unwrap();
        match cli.command {
            Some(Commands::Demo {
                rows, cols, seed, ..
            }) => {
                assert_eq!(rows, 10);
                assert_eq!(cols, 50);
                assert_eq!(seed, Some(3));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_selection_plans_against_registry() {
        let selection = Selection {
            suites: vec!["minmax".to_string()],
            skip_tag: Some("large".to_string()),
            ..Selection::default()
        };
        let plan = selection.plan().unwrap();
        let names: Vec<_> = plan.suites[0].operations.iter().map(|op| op.name).collect();
        assert_eq!(names, ["arr_max_1d", "arr_max", "arr_max_mid", "arr_min_small"]);
    }

    #[test]
    fn test_unknown_names_fail_planning() {
        let selection = Selection {
            suites: vec!["arith".to_string()],
            bench: Some("arr_max".to_string()),
            ..Selection::default()
        };
        let err = selection.plan().unwrap_err();
        assert!(matches!(
            err.downcast_ref::<BenchError>(),
            Some(BenchError::UnknownOperation { .. })
        ));

        let selection = Selection {
            filter: Some("(".to_string()),
            ..Selection::default()
        };
        assert!(selection.plan().is_err());
    }

    #[test]
    fn test_plan_tree() {
        let selection = Selection {
            suites: vec!["trig".to_string()],
            tag: Some("parallel".to_string()),
            ..Selection::default()
        };
        let plan = selection.plan().unwrap();
        let mut out = Vec::new();
        write_plan_tree(&mut out, &plan, &SUITES).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.starts_with("numbench plan:\n├── trig: Trigonometry (1 repetition(s), ns)\n"));
        assert!(text.contains("│   ├── sin_bench_mid_rayon [mid, parallel]\n"));
        assert!(text.contains("4 operations found.\n"));
        assert!(text.contains("Tags: "));
    }

    #[test]
    fn test_json_report_written_to_file() {
        let dir = std::env::temp_dir().join(format!("numbench-json-{}", std::process::id()));
        let path = dir.join("nested").join("report.json");
        let meta = build_report_meta(ExecutionConfig::default().report_config());
        let report = Report::new(meta, Vec::new(), 0.0);

        write_json_report(&report, Some(path.clone())).unwrap();
        let json = std::fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["summary"]["total_suites"], 0);

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_logging_initialises_more_than_once() {
        init_logging(false);
        init_logging(true);
        tracing::info!("still logging");
    }
}
