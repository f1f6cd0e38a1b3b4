use std::{path::PathBuf, process::ExitCode};

use clap::{Parser, Subcommand};
use evm::fixture;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "evm", about = "Run EVM bytecode fixtures")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run one fixture file, or every *.json fixture in a directory.
    Run {
        path: PathBuf,
        /// Emit a tracing line for every opcode the interpreter executes.
        #[arg(long)]
        trace: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let Command::Run { path, trace } = cli.command;

    let filter = if trace {
        EnvFilter::new("evm_core=trace")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let fixtures = if path.is_dir() {
        match collect_fixtures(&path) {
            Ok(paths) => paths,
            Err(err) => {
                eprintln!("reading {}: {err}", path.display());
                return ExitCode::FAILURE;
            }
        }
    } else {
        vec![path]
    };

    if fixtures.is_empty() {
        eprintln!("no *.json fixtures found");
        return ExitCode::FAILURE;
    }

    let mut all_passed = true;
    for fixture_path in &fixtures {
        match fixture::run_fixture(fixture_path) {
            Ok(report) => {
                if report.passed {
                    println!("PASS {}", report.path);
                } else {
                    all_passed = false;
                    println!("FAIL {}", report.path);
                    if let Some(mismatch) = &report.mismatch {
                        println!("  {mismatch}");
                    }
                }
            }
            Err(err) => {
                all_passed = false;
                println!("ERROR {}: {err}", fixture_path.display());
            }
        }
    }

    if all_passed {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn collect_fixtures(dir: &PathBuf) -> std::io::Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if path.extension().is_some_and(|ext| ext == "json") {
            paths.push(path);
        }
    }
    paths.sort();
    Ok(paths)
}
