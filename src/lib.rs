//! # funcsearch
//!
//! Links functional annotations to organisms through a shared read ID.
//!
//! Annotation pipelines such as MG-RAST or a RefSeq/DIAMOND workflow emit two
//! tab-delimited tables for the same reads: one with the organism each read
//! hit, one with the function. Both carry the read ID in the second column and
//! the annotation in the fourth. funcsearch joins them by that ID, never by line
//! position, in one of two modes:
//!
//! - **Inclusion** (`-N`): the function of every read whose organism contains
//!   the given name.
//! - **Exclusion** (`-I`): the function of every read, minus those whose
//!   organism contains any name in a removal list (for example the long tail
//!   of low-abundance organisms).
//!
//! Each retained ID is tallied and written as `count\tfunction\tid`, most
//! frequent first.
//!
//! ## Library usage
//!
//! ```rust
//! use funcsearch::matcher::TargetSet;
//! use funcsearch::progress::ProgressReporter;
//! use funcsearch::run::{search_readers, JoinMode};
//!
//! let organisms = "r1\tIDX1\tX\tOrganismA\nr2\tIDX2\tX\tOrganismB\n";
//! let functions = "r1\tIDX1\tX\tFuncA\nr2\tIDX2\tX\tFuncB\n";
//!
//! let results = search_readers(
//!     JoinMode::Exclusion,
//!     TargetSet::single("OrganismA"),
//!     organisms.as_bytes(),
//!     functions.as_bytes(),
//!     &mut ProgressReporter::disabled(),
//! )?;
//!
//! assert_eq!(results.outcome.removed, 1);
//! assert_eq!(results.ranked[0].identifier, "IDX2");
//! # Ok::<(), funcsearch::error::FuncSearchError>(())
//! ```
//!
//! ## Features
//!
//! - `gzip`: read `.gz` compressed inputs.

pub mod cli;
pub mod config;
pub mod error;
pub mod index;
pub mod join;
pub mod matcher;
pub mod progress;
pub mod run;
pub mod scanner;
pub mod writer;
