//! Organism target sets and substring matching.
//!
//! Matching is plain, case-sensitive substring containment: a row belongs to
//! a target if its organism field contains the target name anywhere. The
//! target `"Bacillus"` selects `"Bacillus subtilis"` and `"Bacillus phage SPO1"`
//! but not `"Paenibacillus polymyxa"`.

use rustc_hash::FxHashSet;

use crate::{
    error::FuncSearchError,
    scanner::{Row, REMOVAL_TARGET_COLUMNS},
};

/// Organism names to match against, in first-seen order without duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TargetSet {
    names: Vec<String>,
}

impl TargetSet {
    /// A set holding exactly `name`, unmodified.
    pub fn single(name: impl Into<String>) -> Self {
        Self {
            names: vec![name.into()],
        }
    }

    /// Collects organism names from field 2 of removal-target rows.
    ///
    /// Rows with fewer than three fields, or an empty name, are skipped and
    /// counted.
    ///
    /// # Errors
    ///
    /// Propagates read failures from `rows`.
    pub fn from_removal_rows<I>(rows: I) -> Result<RemovalTargets, FuncSearchError>
    where
        I: IntoIterator<Item = Result<Row, FuncSearchError>>,
    {
        let mut seen = FxHashSet::default();
        let mut names = Vec::new();
        let mut malformed_rows = 0;

        for row in rows {
            let row = row?;
            let name = match row.field(REMOVAL_TARGET_COLUMNS - 1) {
                Some(name) if !name.is_empty() => name,
                _ => {
                    tracing::warn!(
                        line = row.line_number(),
                        "Skipping removal target row without an organism name"
                    );
                    malformed_rows += 1;
                    continue;
                }
            };
            if seen.insert(name.to_owned()) {
                names.push(name.to_owned());
            }
        }

        Ok(RemovalTargets {
            targets: Self { names },
            malformed_rows,
        })
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}

/// Targets read from a removal list, plus the rows that could not be used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemovalTargets {
    pub targets: TargetSet,
    pub malformed_rows: u64,
}

/// Decides whether an organism field names any target.
#[derive(Debug, Clone)]
pub struct OrganismMatcher {
    targets: TargetSet,
}

impl OrganismMatcher {
    pub const fn new(targets: TargetSet) -> Self {
        Self { targets }
    }

    /// True if `organism` contains any target as a substring.
    pub fn matches(&self, organism: &str) -> bool {
        self.targets.iter().any(|target| organism.contains(target))
    }

    pub const fn targets(&self) -> &TargetSet {
        &self.targets
    }
}
