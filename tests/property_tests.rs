//! Property-based tests using proptest.
//!
//! These tests verify invariants of the index build, the joins and the
//! ranking over randomly generated annotation tables.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use funcsearch::error::InputKind;
use funcsearch::index::IdentifierIndex;
use funcsearch::join::{ExclusionJoin, InclusionJoin, JoinOutcome, JoinStrategy};
use funcsearch::matcher::{OrganismMatcher, TargetSet};
use funcsearch::progress::ProgressReporter;
use funcsearch::scanner::RecordScanner;
use funcsearch::writer::rank;
use proptest::prelude::*;
use std::collections::HashMap;

const ORGANISMS: [&str; 4] = [
    "Escherichia coli",
    "Bacillus subtilis",
    "Vibrio cholerae",
    "Escherichia fergusonii",
];

/// Strategy for an (identifier, annotation) pair drawn from small pools so
/// that repeats are common.
fn id_and_annotation(annotations: &'static [&'static str]) -> impl Strategy<Value = (String, String)> {
    (0u8..12, prop::sample::select(annotations))
        .prop_map(|(id, annotation)| (format!("IDX{id}"), annotation.to_string()))
}

fn table(rows: &[(String, String)]) -> String {
    rows.iter()
        .enumerate()
        .map(|(n, (id, annotation))| format!("r{n}\t{id}\t0.5\t{annotation}\n"))
        .collect()
}

fn build_index(organisms: &str, targets: TargetSet) -> IdentifierIndex {
    IdentifierIndex::build(
        RecordScanner::new(organisms.as_bytes(), InputKind::Organism),
        &OrganismMatcher::new(targets),
        &mut ProgressReporter::disabled(),
    )
    .unwrap()
}

fn run_join<S: JoinStrategy>(strategy: &S, index: &IdentifierIndex, functions: &str) -> JoinOutcome {
    strategy
        .join(
            RecordScanner::new(functions.as_bytes(), InputKind::Function),
            index,
            &mut ProgressReporter::disabled(),
        )
        .unwrap()
}

proptest! {
    /// Building the index twice from the same input gives the same index.
    #[test]
    fn index_build_is_idempotent(
        organisms in prop::collection::vec(id_and_annotation(&ORGANISMS), 0..60),
        target in prop::sample::select(ORGANISMS.to_vec()),
    ) {
        let data = table(&organisms);
        let first = build_index(&data, TargetSet::single(target));
        let second = build_index(&data, TargetSet::single(target));
        prop_assert_eq!(first, second);
    }

    /// In exclusion mode every well-formed function row is either removed or
    /// kept, and kept identifiers never appear in the index.
    #[test]
    fn exclusion_partitions_function_rows(
        organisms in prop::collection::vec(id_and_annotation(&ORGANISMS), 0..60),
        functions in prop::collection::vec(id_and_annotation(&["FuncA", "FuncB", "FuncC"]), 0..80),
    ) {
        let index = build_index(&table(&organisms), TargetSet::single("Escherichia"));
        let outcome = run_join(&ExclusionJoin, &index, &table(&functions));

        prop_assert_eq!(outcome.removed + outcome.tally.total(), functions.len() as u64);
        for (id, _) in outcome.tally.iter() {
            prop_assert!(!index.contains(id));
            prop_assert!(outcome.values.get(id).is_some());
        }
        for (id, _) in &functions {
            prop_assert!(index.contains(id) != outcome.values.get(id).is_some());
        }
    }

    /// Each tally equals the number of kept function rows with that identifier.
    #[test]
    fn exclusion_tally_counts_rows(
        organisms in prop::collection::vec(id_and_annotation(&ORGANISMS), 0..60),
        functions in prop::collection::vec(id_and_annotation(&["FuncA", "FuncB"]), 0..80),
    ) {
        let index = build_index(&table(&organisms), TargetSet::single("Vibrio"));
        let outcome = run_join(&ExclusionJoin, &index, &table(&functions));

        let mut expected: HashMap<&str, u64> = HashMap::new();
        for (id, _) in functions.iter().filter(|(id, _)| !index.contains(id)) {
            *expected.entry(id.as_str()).or_insert(0) += 1;
        }
        prop_assert_eq!(outcome.tally.len(), expected.len());
        for (id, count) in outcome.tally.iter() {
            prop_assert_eq!(expected.get(id).copied(), Some(count));
        }
    }

    /// Inclusion tallies follow the matched-identifier list, repeats included.
    #[test]
    fn inclusion_tally_counts_matched_rows(
        organisms in prop::collection::vec(id_and_annotation(&ORGANISMS), 0..60),
        functions in prop::collection::vec(id_and_annotation(&["FuncA", "FuncB"]), 0..80),
    ) {
        let index = build_index(&table(&organisms), TargetSet::single("Bacillus"));
        let outcome = run_join(&InclusionJoin, &index, &table(&functions));

        let in_function_table = |id: &str| functions.iter().any(|(f, _)| f == id);
        let mut expected: HashMap<&str, u64> = HashMap::new();
        let mut unmatched = 0;
        for id in index.matched_ids() {
            if in_function_table(id) {
                *expected.entry(id.as_str()).or_insert(0) += 1;
            } else {
                unmatched += 1;
            }
        }
        prop_assert_eq!(outcome.unmatched_ids, unmatched);
        prop_assert_eq!(outcome.tally.len(), expected.len());
        for (id, count) in outcome.tally.iter() {
            prop_assert_eq!(expected.get(id).copied(), Some(count));
        }
    }

    /// Ranked output never increases in count from one row to the next.
    #[test]
    fn ranked_counts_are_non_increasing(
        functions in prop::collection::vec(id_and_annotation(&["FuncA", "FuncB", "FuncC"]), 0..120),
    ) {
        let index = build_index("", TargetSet::single("none"));
        let outcome = run_join(&ExclusionJoin, &index, &table(&functions));
        let ranked = rank(&outcome.tally, &outcome.values);

        prop_assert!(ranked.windows(2).all(|pair| pair[0].count >= pair[1].count));
        prop_assert_eq!(ranked.len(), outcome.tally.len());
    }

    /// Injecting N narrow rows adds exactly N errors and changes no tally.
    #[test]
    fn narrow_rows_only_add_errors(
        organisms in prop::collection::vec(id_and_annotation(&ORGANISMS), 0..40),
        functions in prop::collection::vec(id_and_annotation(&["FuncA", "FuncB"]), 0..60),
        narrow in prop::collection::vec("[a-z]{0,6}(\t[A-Z0-9]{1,5}){0,2}", 0..10),
        exclusion in any::<bool>(),
    ) {
        let organism_data = table(&organisms);
        let clean = table(&functions);
        let mut noisy = clean.clone();
        for row in &narrow {
            noisy.push_str(row);
            noisy.push('\n');
        }
        let noisy_organisms = format!("{organism_data}{}", narrow.iter().map(|r| format!("{r}\n")).collect::<String>());

        let index = build_index(&organism_data, TargetSet::single("Escherichia"));
        let noisy_index = build_index(&noisy_organisms, TargetSet::single("Escherichia"));
        prop_assert_eq!(noisy_index.malformed_rows(), index.malformed_rows() + narrow.len() as u64);
        prop_assert_eq!(noisy_index.matched_ids(), index.matched_ids());

        let (before, after) = if exclusion {
            (run_join(&ExclusionJoin, &index, &clean), run_join(&ExclusionJoin, &index, &noisy))
        } else {
            (run_join(&InclusionJoin, &index, &clean), run_join(&InclusionJoin, &index, &noisy))
        };
        prop_assert_eq!(after.errors(), before.errors() + narrow.len() as u64);
        prop_assert_eq!(after.tally, before.tally);
        prop_assert_eq!(after.values, before.values);
    }
}
