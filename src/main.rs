use blm_parser::cli::{args::Args, commands};
use clap::{CommandFactory, Parser};
use std::process;

fn main() {
    // Parse command line arguments
    let args = Args::parse();

    // No subcommand: show help and exit cleanly
    if args.command.is_none() {
        if let Err(e) = Args::command().print_help() {
            eprintln!("Failed to print help: {}", e);
            process::exit(1);
        }
        println!();
        process::exit(0);
    }

    let runtime = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
        eprintln!("Failed to create async runtime: {}", e);
        process::exit(1);
    });

    let result = runtime.block_on(async {
        // Without a signal handler, never resolve and let the command finish
        let shutdown_signal = async {
            if tokio::signal::ctrl_c().await.is_err() {
                std::future::pending::<()>().await;
            }
        };

        tokio::select! {
            result = commands::run(args) => result,
            _ = shutdown_signal => {
                eprintln!("\nReceived CTRL+C, stopping...");
                Err(anyhow::anyhow!("Parsing interrupted by user"))
            }
        }
    });

    match result {
        Ok(report) if report.is_success() => process::exit(0),
        Ok(report) => {
            eprintln!(
                "{} of {} inputs failed",
                report.failed,
                report.failed + report.succeeded
            );
            process::exit(1);
        }
        Err(error) => {
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}
