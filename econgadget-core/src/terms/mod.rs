//! Term extraction: office-holder terms scraped from table markup.

pub mod extract;
pub mod html;
pub mod source;

pub use extract::{
    extract_terms, recent_terms, ExtractOptions, Extraction, SkipReason, SkippedRow,
};
pub use source::{HttpTermSource, TermSource, DEFAULT_TERMS_URL};
