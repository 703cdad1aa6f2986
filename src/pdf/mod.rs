//! PDF reading and page extraction

pub mod extract;
pub mod metadata;

// Re-export commonly used items
pub use extract::{save_document, SourceDocument};
pub use metadata::{count_pages, extract_metadata, PdfMetadata};
