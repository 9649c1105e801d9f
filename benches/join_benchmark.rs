use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use funcsearch::error::InputKind;
use funcsearch::index::IdentifierIndex;
use funcsearch::join::{ExclusionJoin, InclusionJoin, JoinStrategy};
use funcsearch::matcher::{OrganismMatcher, TargetSet};
use funcsearch::progress::ProgressReporter;
use funcsearch::run::{search, search_readers, JoinMode};
use funcsearch::scanner::RecordScanner;
use funcsearch::writer::rank;
use std::io::Write;
use tempfile::NamedTempFile;

const ORGANISMS: [&str; 4] = [
    "Escherichia coli",
    "Bacillus subtilis",
    "Vibrio cholerae",
    "Pseudomonas aeruginosa",
];

const FUNCTIONS: [&str; 3] = [
    "DNA polymerase III subunit alpha",
    "Chemotaxis protein CheY",
    "Sporulation protein SpoIIE",
];

fn organism_table(rows: usize) -> String {
    (0..rows)
        .map(|i| format!("r{i}\tIDX{i}\t0.5\t{}\n", ORGANISMS[i % ORGANISMS.len()]))
        .collect()
}

/// Every identifier appears about twice so tallies have work to do.
fn function_table(rows: usize) -> String {
    (0..rows)
        .map(|i| format!("f{i}\tIDX{}\t0.5\t{}\n", i / 2, FUNCTIONS[i % FUNCTIONS.len()]))
        .collect()
}

fn build_index(organisms: &str, target: &str) -> IdentifierIndex {
    IdentifierIndex::build(
        RecordScanner::new(organisms.as_bytes(), InputKind::Organism),
        &OrganismMatcher::new(TargetSet::single(target)),
        &mut ProgressReporter::disabled(),
    )
    .unwrap()
}

fn bench_index_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("IdentifierIndex::build");

    for rows in [1_000, 10_000, 100_000] {
        let organisms = organism_table(rows);
        group.bench_with_input(BenchmarkId::from_parameter(rows), &organisms, |b, data| {
            b.iter(|| build_index(black_box(data), "Escherichia"))
        });
    }

    group.finish();
}

fn bench_joins(c: &mut Criterion) {
    let mut group = c.benchmark_group("join");

    for rows in [1_000, 10_000, 100_000] {
        let index = build_index(&organism_table(rows), "Escherichia");
        let functions = function_table(rows * 2);

        group.bench_with_input(BenchmarkId::new("exclusion", rows), &functions, |b, data| {
            b.iter(|| {
                ExclusionJoin.join(
                    RecordScanner::new(black_box(data).as_bytes(), InputKind::Function),
                    &index,
                    &mut ProgressReporter::disabled(),
                )
            })
        });
        group.bench_with_input(BenchmarkId::new("inclusion", rows), &functions, |b, data| {
            b.iter(|| {
                InclusionJoin.join(
                    RecordScanner::new(black_box(data).as_bytes(), InputKind::Function),
                    &index,
                    &mut ProgressReporter::disabled(),
                )
            })
        });
    }

    group.finish();
}

fn bench_rank(c: &mut Criterion) {
    let index = build_index(&organism_table(10_000), "no such organism");
    let functions = function_table(100_000);
    let outcome = ExclusionJoin
        .join(
            RecordScanner::new(functions.as_bytes(), InputKind::Function),
            &index,
            &mut ProgressReporter::disabled(),
        )
        .unwrap();

    c.bench_function("rank", |b| {
        b.iter(|| rank(black_box(&outcome.tally), black_box(&outcome.values)))
    });
}

fn bench_search_readers(c: &mut Criterion) {
    let organisms = organism_table(10_000);
    let functions = function_table(20_000);

    c.bench_function("search_readers/exclusion", |b| {
        b.iter(|| {
            search_readers(
                JoinMode::Exclusion,
                TargetSet::single("Vibrio"),
                black_box(organisms.as_bytes()),
                black_box(functions.as_bytes()),
                &mut ProgressReporter::disabled(),
            )
        })
    });
}

fn bench_search_files(c: &mut Criterion) {
    let mut organisms = NamedTempFile::new().unwrap();
    organisms
        .write_all(organism_table(10_000).as_bytes())
        .unwrap();
    let mut functions = NamedTempFile::new().unwrap();
    functions
        .write_all(function_table(20_000).as_bytes())
        .unwrap();
    let output = NamedTempFile::new().unwrap();

    let config = funcsearch::config::Config {
        mode: funcsearch::config::SearchMode::Organism("Bacillus".into()),
        organism_file: organisms.path().to_path_buf(),
        function_file: functions.path().to_path_buf(),
        output: output.path().to_path_buf(),
        format: funcsearch::writer::OutputFormat::Tsv,
        quiet: true,
    };

    c.bench_function("search/inclusion", |b| {
        b.iter(|| search(black_box(&config), &mut ProgressReporter::disabled()))
    });
}

criterion_group!(
    benches,
    bench_index_build,
    bench_joins,
    bench_rank,
    bench_search_readers,
    bench_search_files,
);

criterion_main!(benches);
