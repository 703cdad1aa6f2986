//! Output file naming

use std::path::{Path, PathBuf};
use crate::resolve::ResolvedSpec;

/// Characters that are not allowed in file names on common platforms
const ILLEGAL_CHARS: &[char] = &['\\', '/', ':', '*', '?', '"', '<', '>', '|'];

/// Options controlling output file names
#[derive(Debug, Clone)]
pub struct NamingOptions {
    /// Append `_{start}p_to_{end}p` (logical pages) to each name
    pub append_page_range: bool,
    /// Prefix used for rows without a name; `Filename` when unset
    pub default_prefix: Option<String>,
}

impl Default for NamingOptions {
    fn default() -> Self {
        Self {
            append_page_range: true,
            default_prefix: None,
        }
    }
}

impl NamingOptions {
    /// Use the source file's stem for unnamed rows, e.g. `report_2`
    pub fn with_prefix_from(mut self, input: &Path) -> Self {
        self.default_prefix = input
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .filter(|stem| !stem.trim().is_empty());
        self
    }
}

/// Replace illegal characters with `_` and trim
///
/// Falls back to `untitled` when nothing usable is left, which includes
/// names made only of illegal characters.
pub fn safe_filename(name: &str) -> String {
    let has_legal = name
        .chars()
        .any(|c| !c.is_whitespace() && !ILLEGAL_CHARS.contains(&c));
    if !has_legal {
        return "untitled".to_string();
    }

    let replaced: String = name
        .chars()
        .map(|c| if ILLEGAL_CHARS.contains(&c) { '_' } else { c })
        .collect();
    replaced.trim().to_string()
}

/// Base name (no extension) for the spec at 1-based `position`
pub fn output_base_name(spec: &ResolvedSpec, position: usize, options: &NamingOptions) -> String {
    let name = if spec.output_name.trim().is_empty() {
        let prefix = options.default_prefix.as_deref().unwrap_or("Filename");
        format!("{}_{}", prefix, position)
    } else {
        spec.output_name.clone()
    };

    let mut base = safe_filename(&name);
    if options.append_page_range {
        base = format!("{}_{}p_to_{}p", base, spec.start, spec.end);
    }
    base
}

/// Full output path: `{output_dir}/{base}.pdf`
pub fn output_path(
    output_dir: &Path,
    spec: &ResolvedSpec,
    position: usize,
    options: &NamingOptions,
) -> PathBuf {
    output_dir.join(format!("{}.pdf", output_base_name(spec, position, options)))
}
