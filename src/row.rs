//! Row entries as the user types them
//!
//! A row is kept as raw text: turning the fields into numbers is part of
//! validation, so a typo surfaces as a row error instead of a parse failure.

use std::str::FromStr;
use crate::error::Error;

/// Which of End Page / Page Count a row uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BoundaryMode {
    /// The row ends at an explicit page
    #[default]
    EndPage,
    /// The row spans a number of pages
    PageCount,
}

/// One user-authored split line
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowEntry {
    /// Output file name (empty means "use the default")
    pub output_name: String,
    /// Start Page text
    pub start: Option<String>,
    /// End Page text
    pub end: Option<String>,
    /// Page Count text
    pub count: Option<String>,
    pub mode: BoundaryMode,
}

impl RowEntry {
    /// Row ending at an explicit page
    pub fn with_end(name: &str, start: i64, end: i64) -> Self {
        Self {
            output_name: name.to_string(),
            start: Some(start.to_string()),
            end: Some(end.to_string()),
            count: None,
            mode: BoundaryMode::EndPage,
        }
    }

    /// Row spanning `count` pages
    pub fn with_count(name: &str, start: i64, count: i64) -> Self {
        Self {
            output_name: name.to_string(),
            start: Some(start.to_string()),
            end: None,
            count: Some(count.to_string()),
            mode: BoundaryMode::PageCount,
        }
    }

    /// Row whose end is filled in from the next row or the document length
    pub fn open(name: &str, start: i64) -> Self {
        Self {
            output_name: name.to_string(),
            start: Some(start.to_string()),
            ..Self::default()
        }
    }

    pub(crate) fn start_text(&self) -> Option<&str> {
        present(&self.start)
    }

    pub(crate) fn end_text(&self) -> Option<&str> {
        present(&self.end)
    }

    pub(crate) fn count_text(&self) -> Option<&str> {
        present(&self.count)
    }

    /// A row with no start, end or count is skipped entirely
    pub fn is_blank(&self) -> bool {
        self.start_text().is_none() && self.end_text().is_none() && self.count_text().is_none()
    }
}

fn present(field: &Option<String>) -> Option<&str> {
    field.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// Parse the command-line row syntax: `name=Intro,start=1,end=5`
///
/// Keys are `name`, `start`, `end`, `count` and `mode` (`end` or `count`).
/// Without `mode`, a row giving only `count` is in Page Count mode. Commas
/// inside a name are kept as long as the text after them has no `=`.
impl FromStr for RowEntry {
    type Err = Error;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: String| Error::InvalidRow {
            text: text.to_string(),
            reason,
        };

        let mut row = RowEntry::default();
        let mut mode = None;
        let mut seen: Vec<&str> = Vec::new();

        let mut last_key = None;

        for pair in text.split(',') {
            // A name may contain commas: a piece without `=` continues it
            if last_key == Some("name") && !pair.contains('=') && !pair.trim().is_empty() {
                row.output_name.push(',');
                row.output_name.push_str(pair);
                continue;
            }
            if pair.trim().is_empty() {
                continue;
            }
            let (key, value) = pair
                .split_once('=')
                .ok_or_else(|| invalid(format!("expected key=value, got '{}'", pair.trim())))?;
            let key = key.trim();

            if seen.contains(&key) {
                return Err(invalid(format!("duplicate key '{}'", key)));
            }
            seen.push(key);
            last_key = Some(key);

            let value = value.trim().to_string();
            match key {
                "name" => row.output_name = value,
                "start" => row.start = Some(value),
                "end" => row.end = Some(value),
                "count" => row.count = Some(value),
                "mode" => {
                    mode = Some(match value.to_ascii_lowercase().as_str() {
                        "end" => BoundaryMode::EndPage,
                        "count" => BoundaryMode::PageCount,
                        other => return Err(invalid(format!("unknown mode '{}'", other))),
                    })
                }
                other => return Err(invalid(format!("unknown key '{}'", other))),
            }
        }

        row.output_name = row.output_name.trim().to_string();
        row.mode = mode.unwrap_or(if row.count_text().is_some() && row.end_text().is_none() {
            BoundaryMode::PageCount
        } else {
            BoundaryMode::EndPage
        });

        Ok(row)
    }
}
