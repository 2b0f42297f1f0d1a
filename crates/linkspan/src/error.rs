//! Error types for the label crate.

use thiserror::Error;

/// Errors raised while constructing styled text.
///
/// All interaction-path conditions (missed hit-tests, taps outside links,
/// unsupported link payloads) are modeled as absence, not errors; only a
/// malformed attribute range fails construction.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StyledTextError {
    /// The range start is past its end.
    #[error("invalid range: start {start} is greater than end {end}")]
    InvalidRange { start: usize, end: usize },

    /// The range extends past the end of the text.
    #[error("range {start}..{end} out of bounds for text of length {len}")]
    OutOfBounds { start: usize, end: usize, len: usize },

    /// A range endpoint splits a UTF-8 code point.
    #[error("range endpoint {index} is not on a char boundary")]
    NotCharBoundary { index: usize },
}
