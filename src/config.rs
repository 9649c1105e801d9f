use std::path::{Path, PathBuf};

use crate::{cli::Args, error::ConfigError, writer::OutputFormat};

/// Which organisms the search is about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchMode {
    /// Keep annotations of identifiers belonging to this organism.
    Organism(String),
    /// Drop annotations of identifiers belonging to any organism in this list.
    Removal(PathBuf),
}

/// Validated options for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub mode: SearchMode,
    pub organism_file: PathBuf,
    pub function_file: PathBuf,
    pub output: PathBuf,
    pub format: OutputFormat,
    pub quiet: bool,
}

impl Config {
    /// Checks the flag combination and fills in the default output path.
    ///
    /// Nothing is opened here; files are only touched when the search runs.
    pub fn from_args(args: Args) -> Result<Self, ConfigError> {
        let mode = match (args.organism, args.removal_targets) {
            (None, None) => return Err(ConfigError::MissingSearchTarget),
            (Some(_), Some(_)) => return Err(ConfigError::ConflictingSearchTargets),
            (Some(name), None) if name.is_empty() => return Err(ConfigError::EmptyOrganismName),
            (Some(name), None) => SearchMode::Organism(name),
            (None, Some(path)) => SearchMode::Removal(path),
        };
        let organism_file = args.organism_file.ok_or(ConfigError::MissingOrganismFile)?;
        let function_file = args.function_file.ok_or(ConfigError::MissingFunctionFile)?;
        let output = args
            .results
            .unwrap_or_else(|| default_output(&mode, &function_file));

        Ok(Self {
            mode,
            organism_file,
            function_file,
            output,
            format: args.format,
            quiet: args.quiet,
        })
    }
}

/// `<organism>_results.tab`, or the function file renamed to `*.thresholded.tab`.
pub fn default_output(mode: &SearchMode, function_file: &Path) -> PathBuf {
    match mode {
        SearchMode::Organism(name) => PathBuf::from(format!("{name}_results.tab")),
        SearchMode::Removal(_) => function_file.with_extension("thresholded.tab"),
    }
}
