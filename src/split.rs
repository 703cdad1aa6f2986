//! Splitting a PDF into one file per resolved range
//!
//! The run is all-or-nothing up to the first write: every range is resolved
//! and checked against the document before any output file is created.

use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;

use crate::error::{Error, Result};
use crate::naming::{output_path, NamingOptions};
use crate::pdf::{save_document, SourceDocument};
use crate::resolve::{plan_extraction, resolve, ExtractionJob};
use crate::row::RowEntry;

/// Options for splitting a PDF
#[derive(Debug, Clone)]
pub struct SplitOptions {
    /// Source PDF
    pub input_path: PathBuf,
    /// Directory receiving the output files (created if missing)
    pub output_dir: PathBuf,
    /// Rows in the order the user entered them
    pub rows: Vec<RowEntry>,
    /// Added to every logical page number to get the physical page
    pub offset: i64,
    /// Append `_{start}p_to_{end}p` to output names
    pub append_page_range: bool,
    /// Name unnamed rows after the input file instead of `Filename`
    pub name_from_input: bool,
    /// Resolve and check everything, but write nothing
    pub dry_run: bool,
}

impl Default for SplitOptions {
    fn default() -> Self {
        Self {
            input_path: PathBuf::new(),
            output_dir: PathBuf::new(),
            rows: Vec::new(),
            offset: 0,
            append_page_range: true,
            name_from_input: false,
            dry_run: false,
        }
    }
}

impl SplitOptions {
    fn naming(&self) -> NamingOptions {
        let naming = NamingOptions {
            append_page_range: self.append_page_range,
            default_prefix: None,
        };
        if self.name_from_input {
            naming.with_prefix_from(&self.input_path)
        } else {
            naming
        }
    }
}

/// One output file of a run
#[derive(Debug, Clone)]
pub struct SplitOutput {
    pub path: PathBuf,
    pub job: ExtractionJob,
}

/// Result of a run
#[derive(Debug, Clone)]
pub struct SplitReport {
    /// Pages in the source document
    pub total_pages: usize,
    /// Output files in row order
    pub outputs: Vec<SplitOutput>,
    /// True when nothing was written
    pub dry_run: bool,
}

/// Parse the page offset as typed; empty text means 0
pub fn parse_offset(text: &str) -> Result<i64> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(0);
    }
    text.parse()
        .map_err(|_| Error::InvalidOffset(text.to_string()))
}

/// Check input and output paths, creating the output directory if needed
fn prepare_paths(options: &SplitOptions) -> Result<()> {
    if options.input_path.as_os_str().is_empty() {
        return Err(Error::InputRequired);
    }
    if !options.input_path.is_file() {
        return Err(Error::FileNotFound(options.input_path.clone()));
    }
    if options.output_dir.as_os_str().is_empty() {
        return Err(Error::OutputRequired);
    }
    if !options.output_dir.is_dir() && !options.dry_run {
        log::info!("creating output folder {}", options.output_dir.display());
        fs::create_dir_all(&options.output_dir).map_err(|source| Error::CreateOutputDir {
            path: options.output_dir.clone(),
            source,
        })?;
    }
    Ok(())
}

/// Split `options.input_path` into one PDF per resolved row
///
/// # Example
///
/// ```no_run
/// use pdf_cutter::{split_pdf, RowEntry, SplitOptions};
/// use std::path::PathBuf;
///
/// let options = SplitOptions {
///     input_path: PathBuf::from("book.pdf"),
///     output_dir: PathBuf::from("chapters"),
///     rows: vec![RowEntry::open("Intro", 1), RowEntry::open("Chapter 1", 9)],
///     offset: 4,
///     ..SplitOptions::default()
/// };
///
/// let report = split_pdf(&options).expect("Failed to split");
/// println!("{} files", report.outputs.len());
/// ```
pub fn split_pdf(options: &SplitOptions) -> Result<SplitReport> {
    prepare_paths(options)?;

    let source = SourceDocument::open(&options.input_path)?;
    let total_pages = source.page_count();
    if total_pages == 0 {
        return Err(Error::EmptyPdf(options.input_path.clone()));
    }
    log::info!(
        "{}: {} pages, {} rows, offset {}",
        source.path().display(),
        total_pages,
        options.rows.len(),
        options.offset
    );

    let specs = resolve(&options.rows, total_pages)?;
    let jobs = plan_extraction(&specs, total_pages, options.offset)?;

    let naming = options.naming();
    let outputs: Vec<SplitOutput> = jobs
        .into_iter()
        .map(|job| SplitOutput {
            path: output_path(&options.output_dir, &job.spec, job.position, &naming),
            job,
        })
        .collect();

    let mut seen = HashSet::new();
    for output in &outputs {
        if !seen.insert(&output.path) {
            log::warn!(
                "row {}: {} is written more than once; the last row wins",
                output.job.position,
                output.path.display()
            );
        }
    }

    if options.dry_run {
        return Ok(SplitReport {
            total_pages,
            outputs,
            dry_run: true,
        });
    }

    for output in &outputs {
        let job = &output.job;
        log::debug!(
            "row {}: extracting pages {}-{} to {}",
            job.position,
            job.first_index + 1,
            job.last_index + 1,
            output.path.display()
        );

        let mut doc = source.extract_range(job.first_index, job.last_index)?;
        save_document(&mut doc, &output.path).map_err(|e| Error::WriteOutput {
            path: output.path.clone(),
            detail: e.to_string(),
        })?;
    }

    Ok(SplitReport {
        total_pages,
        outputs,
        dry_run: false,
    })
}
