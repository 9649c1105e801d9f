//! Tab-delimited record scanning.
//!
//! A [`RecordScanner`] lazily splits each line of a source into a [`Row`].
//! Scanners are single-pass: every pass over a file opens a fresh one.
//!
//! # Example
//!
//! ```rust
//! use funcsearch::error::InputKind;
//! use funcsearch::scanner::RecordScanner;
//!
//! let data = "r1\tID1\tX\tEscherichia coli\nshort\n";
//! let rows: Vec<_> = RecordScanner::new(data.as_bytes(), InputKind::Organism)
//!     .collect::<Result<_, _>>()?;
//!
//! assert_eq!(rows[0].field(3), Some("Escherichia coli"));
//! assert!(!rows[1].has_fields(4));
//! # Ok::<(), funcsearch::error::FuncSearchError>(())
//! ```

use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::{Path, PathBuf},
};

use crate::error::{FuncSearchError, InputKind};

/// Fields an organism or function row needs: ID at 1, annotation at 3.
pub const ANNOTATION_COLUMNS: usize = 4;

/// Fields a removal-target row needs: organism name at 2.
pub const REMOVAL_TARGET_COLUMNS: usize = 3;

/// One line of a tab-delimited file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    line_number: u64,
    line: String,
}

impl Row {
    /// Builds a row from a line with its terminator already removed.
    pub fn new(line_number: u64, line: impl Into<String>) -> Self {
        Self {
            line_number,
            line: line.into(),
        }
    }

    /// 1-based line number within its source.
    pub const fn line_number(&self) -> u64 {
        self.line_number
    }

    /// The raw line, without its terminator.
    pub fn as_str(&self) -> &str {
        &self.line
    }

    /// The field at `index`, if the row is that wide.
    pub fn field(&self, index: usize) -> Option<&str> {
        self.line.split('\t').nth(index)
    }

    /// Number of tab-separated fields.
    pub fn len(&self) -> usize {
        self.line.split('\t').count()
    }

    /// Always false: even an empty line holds one (empty) field.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Whether the row has at least `n` fields.
    pub fn has_fields(&self, n: usize) -> bool {
        self.line.split('\t').nth(n.saturating_sub(1)).is_some()
    }

    /// Identifier and annotation of an organism or function row.
    ///
    /// Returns `None` for rows narrower than [`ANNOTATION_COLUMNS`].
    pub fn id_and_annotation(&self) -> Option<(&str, &str)> {
        let mut fields = self.line.split('\t');
        let id = fields.nth(1)?;
        let annotation = fields.nth(1)?;
        Some((id, annotation))
    }
}

/// Lazy iterator of [`Row`]s over a buffered source.
pub struct RecordScanner<R> {
    reader: R,
    kind: InputKind,
    path: PathBuf,
    buf: Vec<u8>,
    line_number: u64,
    done: bool,
}

impl RecordScanner<Box<dyn BufRead>> {
    /// Opens `path` for scanning.
    ///
    /// With the `gzip` feature, paths ending in `.gz` are decompressed on the fly.
    ///
    /// # Errors
    ///
    /// Returns [`FuncSearchError::FileOpen`] if the file cannot be opened.
    pub fn open<P: AsRef<Path>>(path: P, kind: InputKind) -> Result<Self, FuncSearchError> {
        let path = path.as_ref();
        let reader = open_reader(path, kind)?;
        Ok(Self::new(reader, kind).with_path(path))
    }
}

impl<R: BufRead> RecordScanner<R> {
    /// Wraps an already-open reader.
    pub fn new(reader: R, kind: InputKind) -> Self {
        Self {
            reader,
            kind,
            path: PathBuf::from("<stream>"),
            buf: Vec::with_capacity(256),
            line_number: 0,
            done: false,
        }
    }

    /// Names the source in read errors.
    #[must_use]
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = path.into();
        self
    }

    /// Which input this scanner reads.
    pub const fn kind(&self) -> InputKind {
        self.kind
    }
}

impl<R: BufRead> Iterator for RecordScanner<R> {
    type Item = Result<Row, FuncSearchError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        self.buf.clear();
        match self.reader.read_until(b'\n', &mut self.buf) {
            Ok(0) => {
                self.done = true;
                None
            }
            Ok(_) => {
                self.line_number += 1;
                let line = strip_terminator(&self.buf);
                Some(Ok(Row::new(
                    self.line_number,
                    String::from_utf8_lossy(line).into_owned(),
                )))
            }
            Err(source) => {
                self.done = true;
                Some(Err(FuncSearchError::Read {
                    kind: self.kind,
                    path: self.path.clone(),
                    source,
                }))
            }
        }
    }
}

fn strip_terminator(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}

#[cfg(not(feature = "gzip"))]
fn open_reader(path: &Path, kind: InputKind) -> Result<Box<dyn BufRead>, FuncSearchError> {
    let file = open_file(path, kind)?;
    Ok(Box::new(BufReader::new(file)))
}

#[cfg(feature = "gzip")]
fn open_reader(path: &Path, kind: InputKind) -> Result<Box<dyn BufRead>, FuncSearchError> {
    use flate2::read::MultiGzDecoder;

    let file = open_file(path, kind)?;
    if is_gzip_path(path) {
        Ok(Box::new(BufReader::new(MultiGzDecoder::new(file))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}

/// Check if a path has a gzip extension (.gz).
#[cfg(feature = "gzip")]
fn is_gzip_path(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "gz")
}

fn open_file(path: &Path, kind: InputKind) -> Result<File, FuncSearchError> {
    File::open(path).map_err(|source| FuncSearchError::FileOpen {
        kind,
        path: path.to_path_buf(),
        source,
    })
}

/// Counts the lines in a file, for percentage progress reporting.
///
/// # Errors
///
/// Returns [`FuncSearchError::FileOpen`] or [`FuncSearchError::Read`].
pub fn count_lines<P: AsRef<Path>>(path: P, kind: InputKind) -> Result<u64, FuncSearchError> {
    let path = path.as_ref();
    let mut reader = open_reader(path, kind)?;
    let mut count = 0;
    loop {
        let (consumed, newlines, last) = {
            let chunk = reader.fill_buf().map_err(|source| FuncSearchError::Read {
                kind,
                path: path.to_path_buf(),
                source,
            })?;
            if chunk.is_empty() {
                break;
            }
            let newlines = chunk.iter().filter(|&&b| b == b'\n').count() as u64;
            (chunk.len(), newlines, chunk[chunk.len() - 1])
        };
        reader.consume(consumed);
        count += newlines;
        // A final line without a terminator still counts.
        if last != b'\n' && reader.fill_buf().is_ok_and(<[u8]>::is_empty) {
            count += 1;
        }
    }
    Ok(count)
}
