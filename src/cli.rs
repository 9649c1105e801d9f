//! Command-line interface definition.

use clap::{ArgAction, Parser};
use std::path::PathBuf;

use crate::writer::OutputFormat;

/// Find the functional annotations linked to an organism, or remove those
/// linked to a list of organisms, from RefSeq/MG-RAST annotation tables.
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "funcsearch")]
#[command(version, author, about, long_about = None)]
pub struct Args {
    /// Name of organism to search for
    #[arg(short = 'N', long = "organism", value_name = "NAME")]
    pub organism: Option<String>,

    /// Organism output file to be searched
    #[arg(short = 'O', long = "organism-file", value_name = "FILE")]
    pub organism_file: Option<PathBuf>,

    /// Function output file to be searched
    #[arg(short = 'F', long = "function-file", value_name = "FILE")]
    pub function_file: Option<PathBuf>,

    /// Output file (default is <organism>_results.tab, or <function file>.thresholded.tab with -I)
    #[arg(short = 'R', long = "results", value_name = "FILE")]
    pub results: Option<PathBuf>,

    /// Removal targets, list generated by long_tail_threshold.py
    #[arg(short = 'I', long = "removal-targets", value_name = "FILE")]
    pub removal_targets: Option<PathBuf>,

    /// Enables quiet mode
    #[arg(short = 'Q', long)]
    pub quiet: bool,

    /// Results file format
    #[arg(long, value_enum, default_value = "tsv")]
    pub format: OutputFormat,

    /// Prints usage options and exits
    #[arg(long, action = ArgAction::Help)]
    pub usage: Option<bool>,
}
