use std::process;

use clap::Parser;
use colored::Colorize;
use funcsearch::{
    cli::Args,
    config::Config,
    progress::{Progress, ProgressReporter},
    run::{search, JoinMode, RunSummary},
};
use tracing_subscriber::EnvFilter;

fn main() {
    let args = Args::parse();
    let quiet = args.quiet;
    init_tracing(quiet);

    if !quiet {
        eprintln!();
        eprintln!(
            "{}\t{}",
            "COMMAND USED:".bold(),
            std::env::args().collect::<Vec<_>>().join(" ")
        );
        eprintln!(
            "For usage instructions/options, run with '{}' flag.",
            "--usage".bold()
        );
        eprintln!();
    }

    let config = Config::from_args(args).unwrap_or_else(|e| {
        eprintln!();
        eprintln!(
            "{}\n {}",
            "Problem parsing arguments:".blue().bold(),
            e.to_string().blue()
        );
        eprintln!();
        eprintln!(
            "{}\n {}\n  {}\n   {}",
            "Help menu:".blue().bold(),
            "$ cargo run -- --help".bold(),
            "or".underline(),
            "$ funcsearch --usage".bold()
        );
        eprintln!();
        process::exit(1);
    });

    let mut progress = if quiet {
        ProgressReporter::disabled()
    } else {
        ProgressReporter::new(|p: Progress| eprintln!("{p}"))
    };

    match search(&config, &mut progress) {
        Ok(summary) => {
            if !quiet {
                print_summary(&summary);
            }
        }
        Err(e) => {
            eprintln!(
                "{}\n {}",
                "Application error:".blue().bold(),
                e.to_string().blue()
            );
            process::exit(1);
        }
    }
}

/// Logs go to stderr. `RUST_LOG` overrides the default level; quiet mode
/// silences everything but explicit `RUST_LOG` settings.
fn init_tracing(quiet: bool) {
    let default = if quiet { "off" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn print_summary(summary: &RunSummary) {
    if summary.malformed_target_rows > 0 {
        eprintln!(
            "{}: {}",
            "Unusable removal target rows".bold(),
            summary.malformed_target_rows.to_string().yellow()
        );
    }
    match summary.mode {
        JoinMode::Inclusion => eprintln!(
            "{} IDs in list, {} total hits to the organism named {}.",
            summary.matched_ids,
            summary.hits,
            summary.organism.as_deref().unwrap_or_default().blue().bold()
        ),
        JoinMode::Exclusion => {
            eprintln!(
                "Targets file indexed. {} target organisms screened against the functions database.",
                summary.target_count
            );
            eprintln!(
                "{} IDs in list, {} total hits to all organisms from the removal file.",
                summary.matched_ids, summary.hits
            );
        }
    }
    eprintln!(
        "{}: {:?}",
        "Organism output searched, time elapsed".bold(),
        summary.organism_scan_time
    );
    eprintln!(
        "{}: {:?}",
        "All matches searched, time elapsed".bold(),
        summary.join_time
    );
    match summary.mode {
        JoinMode::Inclusion => eprintln!(
            "Number of different functional annotations found for organism {}: {}",
            summary.organism.as_deref().unwrap_or_default().blue().bold(),
            summary.distinct_values
        ),
        JoinMode::Exclusion => eprintln!(
            "Number of functional annotations removed: {}",
            summary.removed
        ),
    }
    if summary.malformed_organism_rows > 0 {
        eprintln!(
            "{}: {}",
            "Malformed organism rows skipped".bold(),
            summary.malformed_organism_rows.to_string().yellow()
        );
    }
    eprintln!(
        "Error rate: {} errors out of {} total annotations.",
        summary.errors().to_string().yellow(),
        summary.matched_ids
    );
    eprintln!(
        "{}: {} ({} rows)",
        "Results".bold(),
        summary.output.display().to_string().underline().bold().blue(),
        summary.rows_written
    );
}
