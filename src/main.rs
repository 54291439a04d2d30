//! urlbandit - Sensitive data scanner for web resources.
//!
//! CLI entry point.

use clap::Parser;
use colored::Colorize;
use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::EnvFilter;
use urlbandit::report::{self, ConsoleOutput};
use urlbandit::{tui, ScanConfig, Scanner};

#[tokio::main]
async fn main() -> ExitCode {
    let config = ScanConfig::parse();

    // Set up logging
    let filter = if config.verbose {
        EnvFilter::new("urlbandit=debug,info")
    } else {
        EnvFilter::new("urlbandit=info,warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(code) => code,
    }
}

async fn run(config: ScanConfig) -> Result<(), ExitCode> {
    let targets = match config.load_targets() {
        Ok(t) => t,
        Err(e) => {
            error!("Failed to load targets: {}", e);
            return Err(ExitCode::FAILURE);
        }
    };

    let scanner = match Scanner::new(&config) {
        Ok(s) => s,
        Err(e) => {
            error!("Failed to create scanner: {}", e);
            return Err(ExitCode::FAILURE);
        }
    };

    let console = ConsoleOutput::new(config.json, config.quiet);

    if !config.json && !config.quiet {
        print_banner();
    }
    console.print_run_info(config.visual, config.all, targets.len());

    let store = scanner.scan_all(&targets).await;

    if config.json {
        match report::to_json(&store) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                error!("Failed to serialize results: {}", e);
                return Err(ExitCode::FAILURE);
            }
        }
        return Ok(());
    }

    if config.visual {
        if let Err(e) = tui::run(&store, config.all) {
            eprintln!("Visual mode failed: {}; falling back to text report", e);
            console.print_report(&store, config.all);
        }
    } else {
        console.print_report(&store, config.all);
    }

    console.print_summary(&store);

    Ok(())
}

fn print_banner() {
    println!();
    println!("{}", "╔══════════════════════╗".cyan());
    println!("{}", "║   URLBANDIT v0.1.0   ║".cyan().bold());
    println!("{}", "╚══════════════════════╝".cyan());
    println!();
}
