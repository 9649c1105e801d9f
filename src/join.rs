//! Joining function annotations against the identifier index.
//!
//! The two search modes walk the data in opposite directions, so each is its
//! own [`JoinStrategy`]:
//!
//! - [`ExclusionJoin`] streams the function table once and drops rows whose
//!   identifier is in the index.
//! - [`InclusionJoin`] loads the whole function table into a lookup map, then
//!   walks the index's matched identifiers (repeats included) and looks each
//!   one up. An identifier matched by two organism rows is therefore tallied
//!   twice.

use rustc_hash::{FxHashMap, FxHashSet};

use crate::{
    error::FuncSearchError,
    index::IdentifierIndex,
    progress::{Phase, ProgressReporter, LOOKUP_INTERVAL, ROW_INTERVAL},
    scanner::Row,
};

/// Per-identifier occurrence counts, iterated in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TallyTable {
    slots: FxHashMap<String, usize>,
    entries: Vec<(String, u64)>,
}

impl TallyTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one occurrence of `id`, starting it at 1 if unseen.
    pub fn increment(&mut self, id: &str) {
        if let Some(&slot) = self.slots.get(id) {
            self.entries[slot].1 += 1;
        } else {
            self.slots.insert(id.to_owned(), self.entries.len());
            self.entries.push((id.to_owned(), 1));
        }
    }

    pub fn get(&self, id: &str) -> Option<u64> {
        self.slots.get(id).map(|&slot| self.entries[slot].1)
    }

    /// `(identifier, count)` pairs in the order identifiers were first tallied.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.entries.iter().map(|(id, count)| (id.as_str(), *count))
    }

    /// Sum of all counts.
    pub fn total(&self) -> u64 {
        self.entries.iter().map(|(_, count)| count).sum()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Last annotation value seen for each identifier.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FinalValueTable(FxHashMap<String, String>);

impl FinalValueTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, id: &str, value: &str) {
        if let Some(existing) = self.0.get_mut(id) {
            existing.clear();
            existing.push_str(value);
        } else {
            self.0.insert(id.to_owned(), value.to_owned());
        }
    }

    pub fn get(&self, id: &str) -> Option<&str> {
        self.0.get(id).map(String::as_str)
    }

    /// Number of distinct annotation values, compared after trimming.
    pub fn distinct_values(&self) -> usize {
        self.0
            .values()
            .map(|value| value.trim())
            .collect::<FxHashSet<_>>()
            .len()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Everything a join produces.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JoinOutcome {
    pub tally: TallyTable,
    pub values: FinalValueTable,
    /// Function rows dropped because their identifier was indexed (exclusion).
    pub removed: u64,
    /// Function rows with fewer than four fields.
    pub malformed_rows: u64,
    /// Matched identifiers absent from the function table (inclusion).
    pub unmatched_ids: u64,
    /// Function rows read, malformed ones included.
    pub rows_processed: u64,
}

impl JoinOutcome {
    /// Recoverable errors: malformed rows plus unmatched identifiers.
    pub const fn errors(&self) -> u64 {
        self.malformed_rows + self.unmatched_ids
    }

    fn keep(&mut self, id: &str, value: &str) {
        self.values.record(id, value);
        self.tally.increment(id);
    }
}

/// A way of combining the function table with an [`IdentifierIndex`].
pub trait JoinStrategy {
    /// Consumes function rows and returns the retained tallies.
    ///
    /// # Errors
    ///
    /// Propagates read failures from `rows`. Malformed rows and missing
    /// identifiers are counted in the outcome instead.
    fn join<I>(
        &self,
        rows: I,
        index: &IdentifierIndex,
        progress: &mut ProgressReporter<'_>,
    ) -> Result<JoinOutcome, FuncSearchError>
    where
        I: IntoIterator<Item = Result<Row, FuncSearchError>>;
}

/// Keeps function rows whose identifier is *not* indexed.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExclusionJoin;

impl JoinStrategy for ExclusionJoin {
    fn join<I>(
        &self,
        rows: I,
        index: &IdentifierIndex,
        progress: &mut ProgressReporter<'_>,
    ) -> Result<JoinOutcome, FuncSearchError>
    where
        I: IntoIterator<Item = Result<Row, FuncSearchError>>,
    {
        let _span = tracing::info_span!("exclusion_join").entered();
        let mut outcome = JoinOutcome::default();

        for row in rows {
            let row = row?;
            outcome.rows_processed += 1;
            progress.tick(Phase::FunctionScan, ROW_INTERVAL);

            let Some((id, value)) = row.id_and_annotation() else {
                outcome.malformed_rows += 1;
                continue;
            };
            if index.contains(id) {
                outcome.removed += 1;
            } else {
                outcome.keep(id, value);
            }
        }

        tracing::info!(
            rows = outcome.rows_processed,
            removed = outcome.removed,
            kept = outcome.tally.total(),
            malformed = outcome.malformed_rows,
            "Function file filtered"
        );
        Ok(outcome)
    }
}

/// Keeps function annotations for identifiers that *are* indexed.
#[derive(Debug, Clone, Copy, Default)]
pub struct InclusionJoin;

impl InclusionJoin {
    /// Loads identifier to annotation for every well-formed function row.
    ///
    /// Later rows for the same identifier overwrite earlier ones.
    fn load_function_db<I>(
        rows: I,
        outcome: &mut JoinOutcome,
        progress: &mut ProgressReporter<'_>,
    ) -> Result<FxHashMap<String, String>, FuncSearchError>
    where
        I: IntoIterator<Item = Result<Row, FuncSearchError>>,
    {
        let mut function_db = FxHashMap::default();
        for row in rows {
            let row = row?;
            outcome.rows_processed += 1;
            progress.tick(Phase::FunctionIndex, ROW_INTERVAL);

            match row.id_and_annotation() {
                Some((id, value)) => {
                    function_db.insert(id.to_owned(), value.to_owned());
                }
                None => outcome.malformed_rows += 1,
            }
        }
        tracing::debug!(entries = function_db.len(), "Function database assembled");
        Ok(function_db)
    }
}

impl JoinStrategy for InclusionJoin {
    fn join<I>(
        &self,
        rows: I,
        index: &IdentifierIndex,
        progress: &mut ProgressReporter<'_>,
    ) -> Result<JoinOutcome, FuncSearchError>
    where
        I: IntoIterator<Item = Result<Row, FuncSearchError>>,
    {
        let _span = tracing::info_span!("inclusion_join").entered();
        let mut outcome = JoinOutcome::default();
        let function_db = Self::load_function_db(rows, &mut outcome, progress)?;

        for id in index.matched_ids() {
            progress.tick(Phase::IdentifierLookup, LOOKUP_INTERVAL);
            match function_db.get(id) {
                Some(value) => outcome.keep(id, value),
                None => {
                    tracing::trace!(id = %id, "Not matched in function database");
                    outcome.unmatched_ids += 1;
                }
            }
        }

        tracing::info!(
            looked_up = index.matched_ids().len(),
            found = outcome.tally.total(),
            unmatched = outcome.unmatched_ids,
            malformed = outcome.malformed_rows,
            "Matched identifiers joined"
        );
        Ok(outcome)
    }
}
