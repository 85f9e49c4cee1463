//! Generate `.expect` fixtures by snapshotting a reference interpreter.
//!
//! For each discovered `.lox` file the reference interpreter runs once and
//! its merged stdout/stderr is written verbatim to the sibling fixture,
//! overwriting any prior content. No comparison happens here — the
//! reference interpreter is trusted at the moment of generation.

use std::fs;
use std::io::Write;
use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::filter::EnvFilter;

use lox_conformance::{discover, exec, expect};

#[derive(Parser, Debug)]
#[command(name = "gen-expect")]
#[command(about = "Snapshot reference interpreter output into .expect fixtures")]
struct Args {
    /// Path to the trusted reference interpreter
    reference: PathBuf,

    /// Test file or directory to recurse
    root: PathBuf,

    /// Filter tests by path substring
    #[arg(short, long)]
    filter: Option<String>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("warn".parse().unwrap()))
        .init();

    let args = Args::parse();

    let mut tests = match discover::collect_tests(&args.root) {
        Ok(tests) => tests,
        Err(err) => {
            eprintln!("{}", err);
            std::process::exit(2);
        }
    };
    if let Some(ref filter) = args.filter {
        tests.retain(|p| p.to_string_lossy().contains(filter.as_str()));
    }

    for path in &tests {
        print!("extracting {} ... ", path.display());
        let _ = std::io::stdout().flush();

        let output = match exec::run_interpreter(&args.reference, path) {
            Ok(output) => output,
            Err(err) => {
                println!();
                eprintln!("{}", err);
                std::process::exit(2);
            }
        };

        let fixture = expect::fixture_path(path);
        if let Err(err) = fs::write(&fixture, &output) {
            println!();
            eprintln!("failed to write fixture '{}': {}", fixture.display(), err);
            std::process::exit(2);
        }

        println!("done");
    }

    eprintln!("Generated {} fixture(s)", tests.len());
}
