//! Error and diagnostic types.
//!
//! Validation, lookup and query failures are recoverable and returned as
//! `Result` values. Loading never fails: problems found while reading a CSV
//! file are collected as [`LoadDiagnostic`]s. Saving is the one operation
//! that surfaces I/O failure as an error.

use std::fmt;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::record::Field;

/// A raw field set that cannot become a [`Country`](crate::Country).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0} must not be empty")]
    EmptyRequiredField(Field),
    #[error("{field} must be a non-negative integer, got {value:?}")]
    InvalidNumericField { field: Field, value: String },
}

/// Failures of the mutating store operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("a country named {0:?} already exists")]
    DuplicateName(String),
    #[error("no country name contains {0:?}")]
    NotFound(String),
    #[error("selection {selection} is out of range (1-{candidates})")]
    InvalidSelection { selection: usize, candidates: usize },
}

/// Which side of a range filter was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeBound {
    Lower,
    Upper,
}

impl fmt::Display for RangeBound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RangeBound::Lower => write!(f, "lower bound"),
            RangeBound::Upper => write!(f, "upper bound"),
        }
    }
}

/// Failures of the read-only query operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("{bound} must be a non-negative integer or empty, got {value:?}")]
    InvalidBound { bound: RangeBound, value: String },
    #[error("dataset is empty")]
    EmptyDataset,
}

/// Failure writing a dataset to disk.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("cannot write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}

/// A non-fatal problem found while loading a CSV file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadDiagnostic {
    /// The header row is not `nombre,poblacion,superficie,continente`.
    /// Nothing was loaded.
    HeaderMismatch { found: Vec<String> },
    /// Data row `row` (1-based) failed validation and was skipped.
    SkippedRow { row: usize, reason: ValidationError },
    /// Data row `row` (1-based) could not be decoded and was skipped.
    MalformedRow { row: usize, message: String },
    /// The file exists but could not be read. Nothing was loaded.
    Unreadable { message: String },
}

impl fmt::Display for LoadDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadDiagnostic::HeaderMismatch { found } => write!(
                f,
                "invalid CSV header {:?}, expected {}",
                found.join(","),
                crate::codec::HEADER.join(",")
            ),
            LoadDiagnostic::SkippedRow { row, reason } => {
                write!(f, "row {row} skipped: {reason}")
            }
            LoadDiagnostic::MalformedRow { row, message } => {
                write!(f, "row {row} skipped: {message}")
            }
            LoadDiagnostic::Unreadable { message } => {
                write!(f, "cannot read dataset: {message}")
            }
        }
    }
}
