//! Page-range resolution
//!
//! Turns the user's rows into contiguous page ranges in three steps:
//!
//! 1. [`validate_rows`] checks every row and collects all problems at once.
//! 2. [`enrich`] fills in missing end pages, looking one candidate ahead.
//! 3. [`plan_extraction`] applies the page offset and checks each range
//!    against the document, stopping at the first failure.
//!
//! Steps 1 and 2 work on logical page numbers and know nothing of the offset.

use crate::error::{Field, RangeError, RowError, RowErrorKind, ValidationErrors};
use crate::row::{BoundaryMode, RowEntry};

/// How a validated row ends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Boundary {
    /// Explicit last page
    End(i64),
    /// Number of pages from the start
    Count(i64),
    /// Runs until the next row starts, or to the end of the document
    Open,
}

/// A row that passed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateSpec {
    /// 1-based index of the source row
    pub row: usize,
    pub output_name: String,
    pub start: i64,
    pub boundary: Boundary,
}

/// A range with its end made explicit, in logical page numbers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSpec {
    pub output_name: String,
    pub start: i64,
    pub end: i64,
}

/// A resolved range mapped onto the document's page indices
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionJob {
    /// 1-based position among the resolved specs
    pub position: usize,
    pub spec: ResolvedSpec,
    /// First page to extract (0-based, inclusive)
    pub first_index: usize,
    /// Last page to extract (0-based, inclusive)
    pub last_index: usize,
}

impl ExtractionJob {
    pub fn page_count(&self) -> usize {
        self.last_index - self.first_index + 1
    }
}

fn parse_field(text: Option<&str>, field: Field) -> Result<Option<i64>, RowErrorKind> {
    text.map(|t| t.parse::<i64>().map_err(|_| RowErrorKind::NotInteger(field)))
        .transpose()
}

/// Check a single non-blank row
fn validate_row(index: usize, row: &RowEntry) -> Result<CandidateSpec, RowErrorKind> {
    let start = parse_field(row.start_text(), Field::StartPage)?;
    let end = parse_field(row.end_text(), Field::EndPage)?;
    let count = parse_field(row.count_text(), Field::PageCount)?;

    let start = start.ok_or(RowErrorKind::StartRequired)?;
    if start < 1 {
        return Err(RowErrorKind::StartTooSmall);
    }

    match row.mode {
        BoundaryMode::EndPage if count.is_some() => return Err(RowErrorKind::CountInEndMode),
        BoundaryMode::PageCount if end.is_some() => return Err(RowErrorKind::EndInCountMode),
        _ => {}
    }

    let boundary = match (end, count) {
        (Some(end), _) => {
            if end < 1 {
                return Err(RowErrorKind::EndTooSmall);
            }
            if end < start {
                return Err(RowErrorKind::EndBeforeStart);
            }
            Boundary::End(end)
        }
        (None, Some(count)) => {
            if count < 1 {
                return Err(RowErrorKind::CountTooSmall);
            }
            Boundary::Count(count)
        }
        (None, None) => Boundary::Open,
    };

    Ok(CandidateSpec {
        row: index,
        output_name: row.output_name.trim().to_string(),
        start,
        boundary,
    })
}

/// Validate every row, collecting all problems
///
/// Blank rows are skipped. Each remaining row reports at most one problem.
/// If no row survives, "at least one valid row" is added to the list.
pub fn validate_rows(rows: &[RowEntry]) -> Result<Vec<CandidateSpec>, ValidationErrors> {
    let mut candidates = Vec::new();
    let mut errors = Vec::new();

    for (i, row) in rows.iter().enumerate() {
        let index = i + 1;
        if row.is_blank() {
            log::debug!("row {}: blank, skipped", index);
            continue;
        }
        match validate_row(index, row) {
            Ok(candidate) => candidates.push(candidate),
            Err(kind) => errors.push(RowError::Row { row: index, kind }),
        }
    }

    if candidates.is_empty() {
        errors.push(RowError::NoValidRows);
    }

    if errors.is_empty() {
        Ok(candidates)
    } else {
        Err(ValidationErrors(errors))
    }
}

/// Make every candidate's end page explicit
///
/// An open row ends one page before the next candidate starts, or at
/// `total_pages` when it is the last one. The result is not checked
/// against the document; see [`plan_extraction`].
pub fn enrich(candidates: &[CandidateSpec], total_pages: usize) -> Vec<ResolvedSpec> {
    let mut resolved = Vec::with_capacity(candidates.len());
    let mut iter = candidates.iter().peekable();

    while let Some(candidate) = iter.next() {
        let end = match candidate.boundary {
            Boundary::End(end) => end,
            Boundary::Count(count) => candidate.start.saturating_add(count - 1),
            Boundary::Open => match iter.peek() {
                Some(next) => next.start - 1,
                None => total_pages as i64,
            },
        };
        log::debug!(
            "row {}: resolved to pages {}-{}",
            candidate.row,
            candidate.start,
            end
        );
        resolved.push(ResolvedSpec {
            output_name: candidate.output_name.clone(),
            start: candidate.start,
            end,
        });
    }

    resolved
}

/// Validate the rows and resolve every range
pub fn resolve(rows: &[RowEntry], total_pages: usize) -> Result<Vec<ResolvedSpec>, ValidationErrors> {
    let candidates = validate_rows(rows)?;
    Ok(enrich(&candidates, total_pages))
}

/// Map one resolved spec onto 0-based page indices
pub fn plan_job(
    position: usize,
    spec: &ResolvedSpec,
    total_pages: usize,
    offset: i64,
) -> Result<ExtractionJob, RangeError> {
    let total = total_pages as i64;
    let start_idx = spec.start.saturating_add(offset).saturating_sub(1);
    let end_idx = spec.end.saturating_add(offset).saturating_sub(1);

    if start_idx < 0 || start_idx >= total {
        return Err(RangeError::StartOutOfRange { row: position });
    }
    if end_idx < start_idx {
        return Err(RangeError::EndBeforeStart { row: position });
    }
    if end_idx >= total {
        return Err(RangeError::EndOutOfRange { row: position });
    }

    Ok(ExtractionJob {
        position,
        spec: spec.clone(),
        first_index: start_idx as usize,
        last_index: end_idx as usize,
    })
}

/// Apply the offset to every spec, failing on the first one out of range
pub fn plan_extraction(
    specs: &[ResolvedSpec],
    total_pages: usize,
    offset: i64,
) -> Result<Vec<ExtractionJob>, RangeError> {
    specs
        .iter()
        .enumerate()
        .map(|(i, spec)| plan_job(i + 1, spec, total_pages, offset))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(errors: &ValidationErrors) -> Vec<RowError> {
        errors.iter().cloned().collect()
    }

    fn ranges(specs: &[ResolvedSpec]) -> Vec<(i64, i64)> {
        specs.iter().map(|s| (s.start, s.end)).collect()
    }

    fn text_row(start: &str, end: &str, count: &str, mode: BoundaryMode) -> RowEntry {
        let field = |s: &str| if s.is_empty() { None } else { Some(s.to_string()) };
        RowEntry {
            output_name: String::new(),
            start: field(start),
            end: field(end),
            count: field(count),
            mode,
        }
    }

    #[test]
    fn test_blank_rows_are_skipped() {
        let rows = vec![
            RowEntry::default(),
            RowEntry::with_end("a", 1, 3),
            text_row(" ", "", "  ", BoundaryMode::PageCount),
        ];
        let candidates = validate_rows(&rows).unwrap();
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].row, 2);
    }

    #[test]
    fn test_only_blank_rows_requires_one_valid_row() {
        let rows = vec![RowEntry::default(), RowEntry::default()];
        let errors = validate_rows(&rows).unwrap_err();
        assert_eq!(kinds(&errors), vec![RowError::NoValidRows]);
    }

    #[test]
    fn test_empty_row_list() {
        let errors = validate_rows(&[]).unwrap_err();
        assert_eq!(kinds(&errors), vec![RowError::NoValidRows]);
    }

    #[test]
    fn test_non_integer_fields() {
        let rows = vec![
            text_row("one", "5", "", BoundaryMode::EndPage),
            text_row("1", "5.0", "", BoundaryMode::EndPage),
            text_row("1", "", "x", BoundaryMode::PageCount),
        ];
        let errors = validate_rows(&rows).unwrap_err();
        assert_eq!(
            kinds(&errors),
            vec![
                RowError::Row { row: 1, kind: RowErrorKind::NotInteger(Field::StartPage) },
                RowError::Row { row: 2, kind: RowErrorKind::NotInteger(Field::EndPage) },
                RowError::Row { row: 3, kind: RowErrorKind::NotInteger(Field::PageCount) },
                RowError::NoValidRows,
            ]
        );
    }

    #[test]
    fn test_integer_check_precedes_mode_check() {
        let rows = vec![text_row("1", "", "abc", BoundaryMode::EndPage)];
        let errors = validate_rows(&rows).unwrap_err();
        assert_eq!(
            errors.0[0],
            RowError::Row { row: 1, kind: RowErrorKind::NotInteger(Field::PageCount) }
        );
    }

    #[test]
    fn test_start_required_and_positive() {
        let rows = vec![
            text_row("", "5", "", BoundaryMode::EndPage),
            text_row("0", "5", "", BoundaryMode::EndPage),
            text_row("-3", "", "", BoundaryMode::EndPage),
        ];
        let errors = validate_rows(&rows).unwrap_err();
        assert_eq!(
            kinds(&errors),
            vec![
                RowError::Row { row: 1, kind: RowErrorKind::StartRequired },
                RowError::Row { row: 2, kind: RowErrorKind::StartTooSmall },
                RowError::Row { row: 3, kind: RowErrorKind::StartTooSmall },
                RowError::NoValidRows,
            ]
        );
    }

    #[test]
    fn test_mode_exclusivity() {
        let rows = vec![
            text_row("1", "4", "2", BoundaryMode::EndPage),
            text_row("1", "4", "2", BoundaryMode::PageCount),
            RowEntry::with_end("ok", 5, 6),
        ];
        let errors = validate_rows(&rows).unwrap_err();
        assert_eq!(
            kinds(&errors),
            vec![
                RowError::Row { row: 1, kind: RowErrorKind::CountInEndMode },
                RowError::Row { row: 2, kind: RowErrorKind::EndInCountMode },
            ]
        );
    }

    #[test]
    fn test_end_and_count_bounds() {
        let rows = vec![
            text_row("3", "0", "", BoundaryMode::EndPage),
            text_row("3", "2", "", BoundaryMode::EndPage),
            text_row("3", "", "0", BoundaryMode::PageCount),
            text_row("3", "", "-1", BoundaryMode::PageCount),
        ];
        let errors = validate_rows(&rows).unwrap_err();
        assert_eq!(
            kinds(&errors),
            vec![
                RowError::Row { row: 1, kind: RowErrorKind::EndTooSmall },
                RowError::Row { row: 2, kind: RowErrorKind::EndBeforeStart },
                RowError::Row { row: 3, kind: RowErrorKind::CountTooSmall },
                RowError::Row { row: 4, kind: RowErrorKind::CountTooSmall },
                RowError::NoValidRows,
            ]
        );
    }

    #[test]
    fn test_errors_are_batched_across_rows() {
        let rows = vec![
            RowEntry::with_end("", 1, 5),
            text_row("x", "", "", BoundaryMode::EndPage),
            RowEntry::with_end("", 6, 10),
            text_row("9", "8", "", BoundaryMode::EndPage),
        ];
        let errors = validate_rows(&rows).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(!errors.0.contains(&RowError::NoValidRows));
    }

    #[test]
    fn test_explicit_ranges() {
        let rows = vec![RowEntry::with_end("", 1, 5), RowEntry::with_end("", 6, 10)];
        let specs = resolve(&rows, 10).unwrap();
        assert_eq!(ranges(&specs), vec![(1, 5), (6, 10)]);

        let jobs = plan_extraction(&specs, 10, 0).unwrap();
        assert_eq!(jobs.len(), 2);
        assert_eq!((jobs[1].first_index, jobs[1].last_index), (5, 9));
    }

    #[test]
    fn test_open_row_runs_until_next_start() {
        let rows = vec![RowEntry::open("", 1), RowEntry::with_end("", 6, 10)];
        let specs = resolve(&rows, 10).unwrap();
        assert_eq!(ranges(&specs), vec![(1, 5), (6, 10)]);
    }

    #[test]
    fn test_last_open_row_runs_to_document_end() {
        let specs = resolve(&[RowEntry::open("", 1)], 20).unwrap();
        assert_eq!(ranges(&specs), vec![(1, 20)]);
    }

    #[test]
    fn test_open_rows_ignore_blank_rows_between() {
        let rows = vec![
            RowEntry::open("", 1),
            RowEntry::default(),
            RowEntry::open("", 4),
            RowEntry::open("", 9),
        ];
        let specs = resolve(&rows, 12).unwrap();
        assert_eq!(ranges(&specs), vec![(1, 3), (4, 8), (9, 12)]);
    }

    #[test]
    fn test_count_row() {
        let specs = resolve(&[RowEntry::with_count("", 5, 3)], 10).unwrap();
        assert_eq!(ranges(&specs), vec![(5, 7)]);

        let jobs = plan_extraction(&specs, 10, 0).unwrap();
        assert_eq!((jobs[0].first_index, jobs[0].last_index), (4, 6));
        assert_eq!(jobs[0].page_count(), 3);
    }

    #[test]
    fn test_enrichment_does_not_check_document_length() {
        let specs = resolve(&[RowEntry::with_count("", 8, 10)], 10).unwrap();
        assert_eq!(ranges(&specs), vec![(8, 17)]);
    }

    #[test]
    fn test_names_are_carried_through() {
        let rows = vec![RowEntry::with_end("  Intro ", 1, 2), RowEntry::open("", 3)];
        let specs = resolve(&rows, 4).unwrap();
        assert_eq!(specs[0].output_name, "Intro");
        assert_eq!(specs[1].output_name, "");
    }

    #[test]
    fn test_negative_offset() {
        let specs = resolve(&[RowEntry::with_end("", 3, 5)], 10).unwrap();
        let jobs = plan_extraction(&specs, 10, -2).unwrap();
        assert_eq!((jobs[0].first_index, jobs[0].last_index), (0, 2));
    }

    #[test]
    fn test_positive_offset() {
        let specs = resolve(&[RowEntry::with_end("", 1, 4)], 10).unwrap();
        let jobs = plan_extraction(&specs, 10, 6).unwrap();
        assert_eq!((jobs[0].first_index, jobs[0].last_index), (6, 9));
    }

    #[test]
    fn test_end_out_of_range() {
        let specs = resolve(&[RowEntry::with_end("", 1, 100)], 10).unwrap();
        assert_eq!(
            plan_extraction(&specs, 10, 0),
            Err(RangeError::EndOutOfRange { row: 1 })
        );
    }

    #[test]
    fn test_start_out_of_range() {
        let specs = resolve(&[RowEntry::with_end("", 1, 2)], 10).unwrap();
        assert_eq!(
            plan_extraction(&specs, 10, -1),
            Err(RangeError::StartOutOfRange { row: 1 })
        );
        assert_eq!(
            plan_extraction(&specs, 10, 10),
            Err(RangeError::StartOutOfRange { row: 1 })
        );
    }

    #[test]
    fn test_end_before_start_from_unordered_rows() {
        let rows = vec![RowEntry::open("", 5), RowEntry::with_end("", 2, 3)];
        let specs = resolve(&rows, 10).unwrap();
        assert_eq!(ranges(&specs), vec![(5, 1), (2, 3)]);
        assert_eq!(
            plan_extraction(&specs, 10, 0),
            Err(RangeError::EndBeforeStart { row: 1 })
        );
    }

    #[test]
    fn test_planning_stops_at_first_failure() {
        let rows = vec![
            RowEntry::with_end("", 1, 2),
            RowEntry::with_end("", 3, 50),
            RowEntry::with_end("", 60, 70),
        ];
        let specs = resolve(&rows, 10).unwrap();
        assert_eq!(
            plan_extraction(&specs, 10, 0),
            Err(RangeError::EndOutOfRange { row: 2 })
        );
    }

    #[test]
    fn test_huge_values_do_not_overflow() {
        let rows = vec![RowEntry::with_count("", i64::MAX, i64::MAX)];
        let specs = resolve(&rows, 10).unwrap();
        assert_eq!(
            plan_extraction(&specs, 10, i64::MAX),
            Err(RangeError::StartOutOfRange { row: 1 })
        );
    }

    #[test]
    fn test_resolution_is_idempotent() {
        let rows = vec![
            RowEntry::open("a", 1),
            RowEntry::with_count("b", 4, 2),
            RowEntry::open("c", 8),
        ];
        assert_eq!(resolve(&rows, 12).unwrap(), resolve(&rows, 12).unwrap());
    }
}
