//! Error types for the PDF cutter library

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the PDF cutter library
#[derive(Error, Debug)]
pub enum Error {
    /// PDF processing error
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// File not found
    #[error("Input file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// Invalid PDF (no pages)
    #[error("PDF has no pages: {}", .0.display())]
    EmptyPdf(PathBuf),

    /// No input path given
    #[error("Input file is required.")]
    InputRequired,

    /// No output directory given
    #[error("Output folder is required.")]
    OutputRequired,

    /// Output directory could not be created
    #[error("Cannot create output folder {}: {source}", .path.display())]
    CreateOutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Offset text is not an integer
    #[error("Page Offset must be an integer, got '{0}'.")]
    InvalidOffset(String),

    /// Source document could not be loaded
    #[error("Failed to open PDF {}: {source}", .path.display())]
    OpenDocument {
        path: PathBuf,
        #[source]
        source: lopdf::Error,
    },

    /// One or more rows failed validation
    #[error("{0}")]
    Validation(ValidationErrors),

    /// A resolved range does not fit the document once the offset is applied
    #[error("{0}")]
    Range(#[from] RangeError),

    /// An output file could not be written
    #[error("Failed to write {}: {detail}", .path.display())]
    WriteOutput { path: PathBuf, detail: String },

    /// Malformed row text
    #[error("Invalid row '{text}': {reason}")]
    InvalidRow { text: String, reason: String },

    /// General error
    #[error("{0}")]
    General(String),
}

impl From<ValidationErrors> for Error {
    fn from(errors: ValidationErrors) -> Self {
        Error::Validation(errors)
    }
}

/// Row field named in validation messages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    StartPage,
    EndPage,
    PageCount,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Field::StartPage => "Start Page",
            Field::EndPage => "End Page",
            Field::PageCount => "Page Count",
        };
        f.write_str(label)
    }
}

/// Rule a row broke during validation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RowErrorKind {
    #[error("{0} must be an integer.")]
    NotInteger(Field),

    #[error("Start Page is required.")]
    StartRequired,

    #[error("Start Page must be >= 1.")]
    StartTooSmall,

    #[error("Page Count must be empty in End Page mode.")]
    CountInEndMode,

    #[error("End Page must be empty in Page Count mode.")]
    EndInCountMode,

    #[error("End Page must be >= 1.")]
    EndTooSmall,

    #[error("End Page cannot be less than Start Page.")]
    EndBeforeStart,

    #[error("Page Count must be > 0.")]
    CountTooSmall,
}

/// A single validation problem
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RowError {
    /// Problem with one row (1-based index)
    #[error("Row {row}: {kind}")]
    Row { row: usize, kind: RowErrorKind },

    /// Nothing usable was entered
    #[error("At least one valid row is required.")]
    NoValidRows,
}

/// All validation problems found in one pass over the rows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationErrors(pub Vec<RowError>);

impl ValidationErrors {
    pub fn iter(&self) -> std::slice::Iter<'_, RowError> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, error) in self.0.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", error)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// Offset/range failure for one resolved spec (1-based position)
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeError {
    #[error("Row {row}: Start Page out of range.")]
    StartOutOfRange { row: usize },

    #[error("Row {row}: End Page earlier than Start Page after offset.")]
    EndBeforeStart { row: usize },

    #[error("Row {row}: End Page out of range.")]
    EndOutOfRange { row: usize },
}
