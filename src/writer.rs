//! Ranking and writing results.
//!
//! Results are ranked by count, highest first. Equal counts keep the order in
//! which identifiers were first tallied, so identical inputs always give
//! identical files.

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use clap::ValueEnum;
use serde::Serialize;

use crate::{
    error::FuncSearchError,
    join::{FinalValueTable, TallyTable},
};

/// Output format for the results file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Tab-separated values (count\tfunction\tid)
    #[default]
    Tsv,
    /// JSON array format
    Json,
}

/// One output row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedResult {
    pub count: u64,
    /// Annotation value with surrounding whitespace trimmed.
    pub value: String,
    pub identifier: String,
}

/// Ranks tallied identifiers by descending count.
pub fn rank(tally: &TallyTable, values: &FinalValueTable) -> Vec<RankedResult> {
    let mut ranked: Vec<RankedResult> = tally
        .iter()
        .map(|(id, count)| RankedResult {
            count,
            value: values.get(id).unwrap_or_default().trim().to_owned(),
            identifier: id.to_owned(),
        })
        .collect();
    // `sort_by` is stable: ties stay in first-tallied order.
    ranked.sort_by(|a, b| b.count.cmp(&a.count));
    ranked
}

/// Writes `count\tvalue\tidentifier` lines.
pub fn write_tsv<W: Write>(writer: &mut W, ranked: &[RankedResult]) -> std::io::Result<()> {
    for result in ranked {
        writeln!(
            writer,
            "{}\t{}\t{}",
            result.count, result.value, result.identifier
        )?;
    }
    Ok(())
}

/// Writes a pretty-printed JSON array.
pub fn write_json<W: Write>(writer: &mut W, ranked: &[RankedResult]) -> Result<(), FuncSearchError> {
    serde_json::to_writer_pretty(&mut *writer, ranked)?;
    writeln!(writer).map_err(serde_json::Error::io)?;
    Ok(())
}

/// Creates (or truncates) `path` and writes `ranked` in `format`.
pub fn write_results_file(
    path: &Path,
    format: OutputFormat,
    ranked: &[RankedResult],
) -> Result<(), FuncSearchError> {
    let write_err = |source| FuncSearchError::Write {
        path: path.to_path_buf(),
        source,
    };

    let file = File::create(path).map_err(write_err)?;
    let mut buf = BufWriter::new(file);
    match format {
        OutputFormat::Tsv => write_tsv(&mut buf, ranked).map_err(write_err)?,
        OutputFormat::Json => write_json(&mut buf, ranked)?,
    }
    buf.flush().map_err(write_err)?;

    tracing::debug!(path = ?path, rows = ranked.len(), "Results written");
    Ok(())
}
