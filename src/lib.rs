//! PDF Cutter Library
//!
//! Split one PDF into several files by page ranges. This library provides
//! functionality to:
//! - Validate loosely specified rows (start page plus an end page, a page
//!   count, or nothing) and report every problem at once
//! - Fill in missing end pages from the next row or the document length
//! - Map printed page numbers onto physical pages with an offset
//! - Extract each range into its own PDF
//!
//! # Example
//!
//! ```
//! use pdf_cutter::resolve::{plan_extraction, resolve};
//! use pdf_cutter::RowEntry;
//!
//! let rows = vec![RowEntry::open("Intro", 1), RowEntry::with_count("Part 1", 6, 5)];
//! let specs = resolve(&rows, 20).expect("rows are valid");
//! assert_eq!((specs[0].start, specs[0].end), (1, 5));
//! assert_eq!((specs[1].start, specs[1].end), (6, 10));
//!
//! // Printed page 1 is the third physical page
//! let jobs = plan_extraction(&specs, 20, 2).expect("ranges fit");
//! assert_eq!((jobs[0].first_index, jobs[0].last_index), (2, 6));
//! ```

pub mod error;
pub mod naming;
pub mod pdf;
pub mod resolve;
pub mod row;
pub mod split;

// Re-export commonly used items
pub use error::{Error, Result};
pub use resolve::{ExtractionJob, ResolvedSpec};
pub use row::{BoundaryMode, RowEntry};
pub use split::{parse_offset, split_pdf, SplitOptions, SplitReport};
