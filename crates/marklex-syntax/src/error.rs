use thiserror::Error;

/// Malformed constructs that end a scan.
///
/// Each is surfaced once, as the text of a terminal `ERROR` token.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScanError {
    #[error("expected \"#\" at start of ATX header (offset {offset})")]
    EmptyHeadingRun { offset: usize },

    #[error("ATX header level {level} exceeds the maximum of 6 (offset {offset})")]
    HeadingTooDeep { level: usize, offset: usize },

    #[error("header at offset {offset} is missing its terminating line ending")]
    UnterminatedHeader { offset: usize },
}

impl ScanError {
    /// Byte offset in the source where the construct started.
    pub fn offset(&self) -> usize {
        match *self {
            ScanError::EmptyHeadingRun { offset }
            | ScanError::HeadingTooDeep { offset, .. }
            | ScanError::UnterminatedHeader { offset } => offset,
        }
    }
}
