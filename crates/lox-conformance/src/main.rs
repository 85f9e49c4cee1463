use std::io::Write;
use std::path::PathBuf;

use clap::Parser;
use colored::*;
use tracing_subscriber::filter::EnvFilter;

use lox_conformance::{
    CaseOutcome, CaseResult, ExpectStrategy, FailFast, HarnessConfig, LoxRunner, RunReport,
};

#[derive(Parser, Debug)]
#[command(name = "lox-test")]
#[command(about = "Run Lox conformance tests against an interpreter binary")]
struct Args {
    /// Path to the interpreter under test
    interpreter: PathBuf,

    /// Test file or directory to recurse
    root: PathBuf,

    /// Where the expected output comes from
    #[arg(long, value_enum)]
    expect_from: Option<ExpectStrategy>,

    /// Abort the run on the first failing case
    #[arg(long, value_enum)]
    fail_fast: Option<FailFast>,

    /// Filter tests by path substring
    #[arg(short, long)]
    filter: Option<String>,

    /// Path to a TOML config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output the report as JSON
    #[arg(long)]
    json: bool,

    /// Show verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("warn".parse().unwrap()))
        .init();

    let args = Args::parse();

    let config = match args.config {
        Some(ref path) => match HarnessConfig::load(path) {
            Ok(config) => config,
            Err(err) => {
                eprintln!("{}", err);
                std::process::exit(2);
            }
        },
        None => HarnessConfig::load_or_default(),
    };

    let strategy = args.expect_from.unwrap_or(config.expect_from);
    let fail_fast = args.fail_fast.unwrap_or(config.fail_fast);
    let filter = args.filter.or(config.filter);

    let mut runner = LoxRunner::new(&args.interpreter, strategy);
    if let Some(filter) = filter {
        runner = runner.with_filter(filter);
    }

    // Root problems surface before any case runs.
    let tests = match runner.collect_tests(&args.root) {
        Ok(tests) => tests,
        Err(err) => {
            eprintln!("{}", err);
            std::process::exit(2);
        }
    };

    let mut report = RunReport::new();

    for path in &tests {
        if args.verbose && !args.json {
            println!("RUNNING: {}", path.display());
        }

        let result = match runner.run_case(path) {
            Ok(result) => result,
            Err(err) => {
                eprintln!("{}", err);
                std::process::exit(2);
            }
        };

        if !args.json {
            print_case(&result);
        }
        report.record(&result);

        if fail_fast.is_enabled() && result.outcome != CaseOutcome::Pass {
            let _ = std::io::stdout().flush();
            std::process::exit(2);
        }
    }

    report.finalize();

    if args.json {
        match report.to_json() {
            Ok(json) => println!("{}", json),
            Err(err) => eprintln!("Failed to generate JSON: {}", err),
        }
    } else {
        report.print_summary();
    }

    if !report.all_passed() {
        std::process::exit(1);
    }
}

fn print_case(result: &CaseResult) {
    let secs = result.duration.as_secs_f64();
    match result.outcome {
        CaseOutcome::Pass => {
            println!(
                "{}: {} ({:.2})s",
                "=== PASS".green(),
                result.path.display(),
                secs
            );
        }
        CaseOutcome::Fail => {
            println!(
                "{}: {} ({:.2})s",
                "=== FAIL".red().bold(),
                result.path.display(),
                secs
            );
            println!("--- Get:");
            print!("{}", result.got);
            println!("--- Expect:");
            print!("{}", result.expected);
        }
        CaseOutcome::Error => {
            println!(
                "{}: {} ({:.2})s",
                "=== ERROR".red().bold(),
                result.path.display(),
                secs
            );
            if let Some(ref error) = result.error {
                println!("--- {}", error);
            }
        }
    }
}
