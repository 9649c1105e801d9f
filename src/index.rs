//! Identifier index built from the organism table.
//!
//! The index records, for every row whose organism field matches a target,
//! the row's identifier (field 1) and organism (field 3). It is built once,
//! then only read by the join.

use rustc_hash::FxHashMap;

use crate::{
    error::FuncSearchError,
    matcher::OrganismMatcher,
    progress::{Phase, ProgressReporter, ROW_INTERVAL},
    scanner::Row,
};

/// Identifiers whose organism row matched a target.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdentifierIndex {
    /// Identifier to organism; a later row for the same identifier overwrites.
    organisms: FxHashMap<String, String>,
    /// Every matching identifier in scan order, repeats included.
    matched: Vec<String>,
    hits: u64,
    rows_scanned: u64,
    malformed_rows: u64,
}

impl IdentifierIndex {
    /// Scans organism rows and indexes those matching `matcher`.
    ///
    /// Rows narrower than four fields are skipped and counted.
    ///
    /// # Errors
    ///
    /// Propagates read failures from `rows`.
    pub fn build<I>(
        rows: I,
        matcher: &OrganismMatcher,
        progress: &mut ProgressReporter<'_>,
    ) -> Result<Self, FuncSearchError>
    where
        I: IntoIterator<Item = Result<Row, FuncSearchError>>,
    {
        let _span = tracing::info_span!("index_organisms", targets = matcher.targets().len())
            .entered();

        let mut index = Self::default();
        for row in rows {
            let row = row?;
            index.rows_scanned += 1;
            progress.tick(Phase::OrganismScan, ROW_INTERVAL);

            let Some((id, organism)) = row.id_and_annotation() else {
                index.malformed_rows += 1;
                continue;
            };
            if matcher.matches(organism) {
                index.hits += 1;
                index.organisms.insert(id.to_owned(), organism.to_owned());
                index.matched.push(id.to_owned());
            }
        }

        tracing::info!(
            rows = index.rows_scanned,
            hits = index.hits,
            distinct_ids = index.organisms.len(),
            malformed = index.malformed_rows,
            "Organism file indexed"
        );
        Ok(index)
    }

    /// Whether `id` belongs to a matched organism.
    pub fn contains(&self, id: &str) -> bool {
        self.organisms.contains_key(id)
    }

    /// The organism last recorded for `id`.
    pub fn organism(&self, id: &str) -> Option<&str> {
        self.organisms.get(id).map(String::as_str)
    }

    /// Matching identifiers in scan order, one entry per matching row.
    pub fn matched_ids(&self) -> &[String] {
        &self.matched
    }

    /// Number of distinct matching identifiers.
    pub fn distinct_ids(&self) -> usize {
        self.organisms.len()
    }

    /// Number of matching rows.
    pub const fn hits(&self) -> u64 {
        self.hits
    }

    pub const fn rows_scanned(&self) -> u64 {
        self.rows_scanned
    }

    pub const fn malformed_rows(&self) -> u64 {
        self.malformed_rows
    }

    pub fn is_empty(&self) -> bool {
        self.organisms.is_empty()
    }
}
