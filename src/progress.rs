//! Progress reporting for long scans.
//!
//! Scans call [`ProgressReporter::tick`] once per item. Every `interval`
//! items the reporter hands a [`Progress`] snapshot to the caller's callback.
//! A disabled reporter still counts but never calls back.
//!
//! # Example
//!
//! ```rust
//! use funcsearch::progress::{Phase, ProgressReporter};
//!
//! let mut lines = Vec::new();
//! {
//!     let mut reporter = ProgressReporter::new(|p| lines.push(p.processed));
//!     for _ in 0..25 {
//!         reporter.tick(Phase::FunctionScan, 10);
//!     }
//! }
//! assert_eq!(lines, vec![10, 20]);
//! ```

use std::fmt;

/// Rows between progress lines in file scans.
pub const ROW_INTERVAL: u64 = 100_000;

/// Identifiers between progress lines in the inclusion lookup pass.
pub const LOOKUP_INTERVAL: u64 = 10_000;

/// Which pass of the pipeline is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Matching organism rows against targets.
    OrganismScan,
    /// Loading every function row (inclusion mode pre-pass).
    FunctionIndex,
    /// Filtering function rows (exclusion mode).
    FunctionScan,
    /// Looking up matched identifiers (inclusion mode).
    IdentifierLookup,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OrganismScan => write!(f, "lines processed so far in organism file"),
            Self::FunctionIndex => write!(f, "lines indexed so far in function file"),
            Self::FunctionScan => write!(f, "lines processed so far in function file"),
            Self::IdentifierLookup => write!(f, "IDs looked up so far in function file"),
        }
    }
}

/// Progress snapshot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Progress {
    pub phase: Phase,
    /// Items processed in this phase so far.
    pub processed: u64,
    /// Items expected in this phase, when known up front.
    pub total: Option<u64>,
}

impl Progress {
    /// Percentage complete, if the total is known and non-zero.
    #[allow(clippy::cast_precision_loss)]
    pub fn percent(&self) -> Option<f64> {
        match self.total {
            Some(total) if total > 0 => Some(self.processed as f64 / total as f64 * 100.0),
            _ => None,
        }
    }
}

impl fmt::Display for Progress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(percent) = self.percent() {
            write!(f, "{percent:.1}% completed\t-\t")?;
        }
        write!(f, "{} {}", self.processed, self.phase)
    }
}

/// Counts items per phase and periodically reports them.
pub struct ProgressReporter<'a> {
    callback: Option<Box<dyn FnMut(Progress) + 'a>>,
    phase: Option<Phase>,
    processed: u64,
    total: Option<u64>,
}

impl<'a> ProgressReporter<'a> {
    /// A reporter that calls `callback` at every interval.
    pub fn new<F>(callback: F) -> Self
    where
        F: FnMut(Progress) + 'a,
    {
        Self {
            callback: Some(Box::new(callback)),
            phase: None,
            processed: 0,
            total: None,
        }
    }

    /// A reporter that never calls back (quiet mode).
    pub const fn disabled() -> Self {
        Self {
            callback: None,
            phase: None,
            processed: 0,
            total: None,
        }
    }

    pub const fn is_enabled(&self) -> bool {
        self.callback.is_some()
    }

    /// Starts `phase` from zero with an optional expected total.
    pub fn start(&mut self, phase: Phase, total: Option<u64>) {
        self.phase = Some(phase);
        self.processed = 0;
        self.total = total;
    }

    /// Records one item, reporting when `processed` reaches a multiple of `interval`.
    ///
    /// Switching to a different phase restarts the count.
    pub fn tick(&mut self, phase: Phase, interval: u64) {
        if self.phase != Some(phase) {
            self.start(phase, None);
        }
        self.processed += 1;
        if interval > 0 && self.processed % interval == 0 {
            let snapshot = self.snapshot(phase);
            if let Some(callback) = self.callback.as_mut() {
                callback(snapshot);
            }
        }
    }

    /// Items processed in the current phase.
    pub const fn processed(&self) -> u64 {
        self.processed
    }

    fn snapshot(&self, phase: Phase) -> Progress {
        Progress {
            phase,
            processed: self.processed,
            total: self.total,
        }
    }
}

impl Default for ProgressReporter<'_> {
    fn default() -> Self {
        Self::disabled()
    }
}

impl fmt::Debug for ProgressReporter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProgressReporter")
            .field("enabled", &self.is_enabled())
            .field("phase", &self.phase)
            .field("processed", &self.processed)
            .field("total", &self.total)
            .finish()
    }
}
