//! The search pipeline.
//!
//! 1. Build the [`TargetSet`] from `-N` or from the removal list.
//! 2. Scan the organism table into an [`IdentifierIndex`].
//! 3. Join the function table with the strategy for the mode.
//! 4. Rank and write the results.

use std::{
    io::BufRead,
    path::{Path, PathBuf},
    time::{Duration, Instant},
};

use crate::{
    config::{Config, SearchMode},
    error::{FuncSearchError, InputKind},
    index::IdentifierIndex,
    join::{ExclusionJoin, InclusionJoin, JoinOutcome, JoinStrategy},
    matcher::{OrganismMatcher, RemovalTargets, TargetSet},
    progress::{Phase, ProgressReporter},
    scanner::{count_lines, RecordScanner, Row},
    writer::{rank, write_results_file, RankedResult},
};

/// Whether matched identifiers are kept or removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinMode {
    Inclusion,
    Exclusion,
}

impl JoinMode {
    fn join<I>(
        self,
        rows: I,
        index: &IdentifierIndex,
        progress: &mut ProgressReporter<'_>,
    ) -> Result<JoinOutcome, FuncSearchError>
    where
        I: IntoIterator<Item = Result<Row, FuncSearchError>>,
    {
        match self {
            Self::Inclusion => InclusionJoin.join(rows, index, progress),
            Self::Exclusion => ExclusionJoin.join(rows, index, progress),
        }
    }
}

/// In-memory result of a search, before anything is written.
#[derive(Debug, Clone)]
pub struct SearchResults {
    pub mode: JoinMode,
    pub targets: TargetSet,
    pub index: IdentifierIndex,
    pub outcome: JoinOutcome,
    pub ranked: Vec<RankedResult>,
}

/// Counters and timings reported at the end of a run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub mode: JoinMode,
    /// The organism searched for (inclusion mode).
    pub organism: Option<String>,
    pub target_count: usize,
    pub malformed_target_rows: u64,
    /// Matching organism rows, one per entry of the matched-identifier list.
    pub matched_ids: usize,
    pub hits: u64,
    pub malformed_organism_rows: u64,
    pub removed: u64,
    pub malformed_function_rows: u64,
    pub unmatched_ids: u64,
    pub distinct_values: usize,
    pub rows_written: usize,
    pub output: PathBuf,
    pub organism_scan_time: Duration,
    pub join_time: Duration,
}

impl RunSummary {
    /// Recoverable errors in the join.
    pub const fn errors(&self) -> u64 {
        self.malformed_function_rows + self.unmatched_ids
    }
}

/// Runs a search over already-open readers.
///
/// # Errors
///
/// Returns a [`FuncSearchError`] if a reader fails.
///
/// # Example
///
/// ```rust
/// use funcsearch::matcher::TargetSet;
/// use funcsearch::progress::ProgressReporter;
/// use funcsearch::run::{search_readers, JoinMode};
///
/// let organisms = "id1\tIDX1\tX\tOrganismA\nid2\tIDX2\tX\tOrganismB\n";
/// let functions = "f1\tIDX1\tX\tFuncA\nf2\tIDX2\tX\tFuncB\n";
///
/// let results = search_readers(
///     JoinMode::Inclusion,
///     TargetSet::single("OrganismA"),
///     organisms.as_bytes(),
///     functions.as_bytes(),
///     &mut ProgressReporter::disabled(),
/// )?;
///
/// assert_eq!(results.ranked.len(), 1);
/// assert_eq!(results.ranked[0].value, "FuncA");
/// # Ok::<(), funcsearch::error::FuncSearchError>(())
/// ```
pub fn search_readers<O, F>(
    mode: JoinMode,
    targets: TargetSet,
    organisms: O,
    functions: F,
    progress: &mut ProgressReporter<'_>,
) -> Result<SearchResults, FuncSearchError>
where
    O: BufRead,
    F: BufRead,
{
    let matcher = OrganismMatcher::new(targets);
    let index = IdentifierIndex::build(
        RecordScanner::new(organisms, InputKind::Organism),
        &matcher,
        progress,
    )?;
    let outcome = mode.join(
        RecordScanner::new(functions, InputKind::Function),
        &index,
        progress,
    )?;
    let ranked = rank(&outcome.tally, &outcome.values);

    Ok(SearchResults {
        mode,
        targets: matcher.targets().clone(),
        index,
        outcome,
        ranked,
    })
}

/// Runs the search described by `config` and writes the results file.
///
/// # Errors
///
/// Returns a [`FuncSearchError`] if an input cannot be opened or read, or the
/// results file cannot be written.
pub fn search(
    config: &Config,
    progress: &mut ProgressReporter<'_>,
) -> Result<RunSummary, FuncSearchError> {
    tracing::info!(
        organism_file = ?config.organism_file,
        function_file = ?config.function_file,
        output = ?config.output,
        "Starting search"
    );

    let (mode, targets, malformed_target_rows) = load_targets(&config.mode)?;
    tracing::info!(targets = targets.len(), "Targets loaded");

    let organism_start = Instant::now();
    let matcher = OrganismMatcher::new(targets);
    let organism_rows = RecordScanner::open(&config.organism_file, InputKind::Organism)?;
    if progress.is_enabled() {
        let total = count_lines(&config.organism_file, InputKind::Organism)?;
        progress.start(Phase::OrganismScan, Some(total));
    }
    let index = IdentifierIndex::build(organism_rows, &matcher, progress)?;
    let organism_scan_time = organism_start.elapsed();

    let join_start = Instant::now();
    let function_rows = RecordScanner::open(&config.function_file, InputKind::Function)?;
    let outcome = mode.join(function_rows, &index, progress)?;
    let join_time = join_start.elapsed();

    let ranked = rank(&outcome.tally, &outcome.values);
    write_results_file(&config.output, config.format, &ranked)?;

    let summary = RunSummary {
        mode,
        organism: match &config.mode {
            SearchMode::Organism(name) => Some(name.clone()),
            SearchMode::Removal(_) => None,
        },
        target_count: matcher.targets().len(),
        malformed_target_rows,
        matched_ids: index.matched_ids().len(),
        hits: index.hits(),
        malformed_organism_rows: index.malformed_rows(),
        removed: outcome.removed,
        malformed_function_rows: outcome.malformed_rows,
        unmatched_ids: outcome.unmatched_ids,
        distinct_values: outcome.values.distinct_values(),
        rows_written: ranked.len(),
        output: config.output.clone(),
        organism_scan_time,
        join_time,
    };
    tracing::info!(
        rows_written = summary.rows_written,
        errors = summary.errors(),
        "Search complete"
    );
    Ok(summary)
}

fn load_targets(mode: &SearchMode) -> Result<(JoinMode, TargetSet, u64), FuncSearchError> {
    match mode {
        SearchMode::Organism(name) => Ok((JoinMode::Inclusion, TargetSet::single(name.as_str()), 0)),
        SearchMode::Removal(path) => {
            let removal = load_removal_targets(path)?;
            Ok((JoinMode::Exclusion, removal.targets, removal.malformed_rows))
        }
    }
}

fn load_removal_targets(path: &Path) -> Result<RemovalTargets, FuncSearchError> {
    let rows = RecordScanner::open(path, InputKind::RemovalTargets)?;
    TargetSet::from_removal_rows(rows)
}
