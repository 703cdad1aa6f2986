//! PDF Cutter CLI tool
//!
//! A command-line tool for splitting a PDF into several files by page ranges.

use anyhow::Result;
use clap::{Parser, Subcommand};
use log::LevelFilter;
use std::path::{Path, PathBuf};
use std::process;

use pdf_cutter::pdf::extract_metadata;
use pdf_cutter::{parse_offset, split_pdf, RowEntry, SplitOptions, SplitReport};

/// PDF Cutter - Split a PDF into several files by page ranges
#[derive(Parser)]
#[command(name = "pdf-cutter")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "ROWS:
    Each --row is a comma-separated list of key=value pairs:
      name=TEXT     output file name (default: Filename_N); may contain
                    commas as long as the text after a comma has no '='
      start=N       first page (printed page number)
      end=N         last page (End Page mode)
      count=N       number of pages (Page Count mode)
      mode=end|count
    A row with neither end nor count runs until the next row starts,
    or to the end of the document.

EXAMPLES:
    # Split a book into chapters, printed page 1 is the 5th page of the PDF
    pdf-cutter split book.pdf -o chapters --offset 4 \\
        --row \"name=Preface,start=1\" --row \"name=Chapter 1,start=9\" --row \"name=Chapter 2,start=31\"

    # Fixed-size pieces without the page range in the file names
    pdf-cutter split scan.pdf -o out --no-page-suffix --row \"start=1,count=10\" --row \"start=11,count=10\"

    # Check the plan without writing anything
    pdf-cutter split book.pdf -o chapters --dry-run --row \"start=3,end=8\"")]
struct Cli {
    /// Show debug output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Split a PDF into one file per row
    Split {
        /// Input PDF file
        input: PathBuf,

        /// Output folder (created if missing)
        #[arg(short, long)]
        output: PathBuf,

        /// Page range row, e.g. "name=Intro,start=1,end=5" (repeatable)
        #[arg(short, long = "row", required = true, value_parser = row_arg)]
        rows: Vec<RowEntry>,

        /// Page offset added to every page number (use when the PDF's page
        /// numbers differ from the printed ones)
        #[arg(long, default_value = "0", allow_negative_numbers = true, value_parser = offset_arg)]
        offset: i64,

        /// Do not append the page range to file names (e.g. Filename_1_1p_to_5p.pdf)
        #[arg(long)]
        no_page_suffix: bool,

        /// Name unnamed rows after the input file instead of "Filename"
        #[arg(long)]
        name_from_input: bool,

        /// Resolve and check the rows, but write nothing
        #[arg(long)]
        dry_run: bool,

        /// Open the output folder afterwards
        #[arg(long)]
        open: bool,
    },

    /// Show information about a PDF file
    Info {
        /// PDF file to inspect
        input: PathBuf,
    },
}

fn row_arg(text: &str) -> std::result::Result<RowEntry, String> {
    text.parse::<RowEntry>().map_err(|e| e.to_string())
}

fn offset_arg(text: &str) -> std::result::Result<i64, String> {
    parse_offset(text).map_err(|e| e.to_string())
}

/// Log warnings by default, debug output with `--verbose`; `RUST_LOG` overrides both
fn init_logging(verbose: bool) {
    let level = if verbose { LevelFilter::Debug } else { LevelFilter::Warn };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Split {
            input, output, rows, offset, no_page_suffix, name_from_input, dry_run, open,
        } => {
            let options = SplitOptions {
                input_path: input,
                output_dir: output,
                rows,
                offset,
                append_page_range: !no_page_suffix,
                name_from_input,
                dry_run,
            };
            cmd_split(&options, open)
        }
        Commands::Info { input } => {
            cmd_info(&input)
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

/// Open a file or folder with the system default application
fn open_path(path: &Path) -> Result<()> {
    #[cfg(target_os = "macos")]
    {
        std::process::Command::new("open")
            .arg(path)
            .spawn()?;
    }
    #[cfg(target_os = "linux")]
    {
        std::process::Command::new("xdg-open")
            .arg(path)
            .spawn()?;
    }
    #[cfg(target_os = "windows")]
    {
        std::process::Command::new("cmd")
            .args(["/C", "start", "", &path.display().to_string()])
            .spawn()?;
    }
    Ok(())
}

fn print_report(report: &SplitReport) {
    for output in &report.outputs {
        let job = &output.job;
        println!(
            "{:>3}. pages {}-{} (PDF pages {}-{}, {} pages) -> {}",
            job.position,
            job.spec.start,
            job.spec.end,
            job.first_index + 1,
            job.last_index + 1,
            job.page_count(),
            output.path.display()
        );
    }
}

/// Split a PDF into one file per row
fn cmd_split(options: &SplitOptions, open: bool) -> Result<()> {
    eprintln!(
        "Splitting {} into {} row(s)...",
        options.input_path.display(),
        options.rows.len()
    );

    let report = split_pdf(options)?;
    print_report(&report);

    if report.dry_run {
        eprintln!(
            "Dry run: {} file(s) would be written to {}",
            report.outputs.len(),
            options.output_dir.display()
        );
        return Ok(());
    }

    eprintln!(
        "Saved {} file(s) to: {}",
        report.outputs.len(),
        options.output_dir.display()
    );

    if open {
        open_path(&options.output_dir)?;
    }

    Ok(())
}

/// Show information about a PDF
fn cmd_info(input: &Path) -> Result<()> {
    let metadata = extract_metadata(input)?;

    println!("File: {}", input.display());
    println!("Pages: {}", metadata.page_count);

    if let Some(title) = metadata.title {
        println!("Title: {}", title);
    }
    if let Some(author) = metadata.author {
        println!("Author: {}", author);
    }

    Ok(())
}
