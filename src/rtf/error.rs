//! Error types for RTF decoding.

use thiserror::Error;

/// Result type for RTF decoding.
pub type DecodeResult<T> = Result<T, DecodeError>;

/// RTF decoding errors.
///
/// Every structural problem aborts the decode; unknown keywords and
/// destinations are not errors.
#[derive(Error, Debug)]
pub enum DecodeError {
    /// A `}` closed a group that was never opened.
    #[error("Unmatched '}}' at byte {offset}")]
    StackUnderflow { offset: u64 },

    /// Group nesting went deeper than the configured limit.
    #[error("Group nesting depth {depth} exceeds limit {limit}")]
    StackOverflow { depth: usize, limit: usize },

    /// The input ended while groups were still open.
    #[error("RTF ended inside {depth} open group(s)")]
    UnmatchedBrace { depth: usize },

    /// A byte that is not a hex digit where two hex digits were required.
    #[error("Invalid hex digit {byte:#04x} at byte {offset}")]
    InvalidHex { offset: u64, byte: u8 },

    /// The keyword or property table is inconsistent.
    #[error("RTF table invalid: {0}")]
    BadTable(&'static str),

    /// The input ended where more bytes were structurally required.
    #[error("Unexpected end of input at byte {offset}")]
    EndOfFile { offset: u64 },

    /// An internal invariant of the decoder was broken.
    #[error("Assertion failed: {0}")]
    Assertion(&'static str),

    /// The underlying reader failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl DecodeError {
    /// True for errors caused by a decoder bug rather than by the input.
    pub fn is_programming_error(&self) -> bool {
        matches!(self, DecodeError::BadTable(_) | DecodeError::Assertion(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_classes() {
        assert!(DecodeError::BadTable("symbol").is_programming_error());
        assert!(DecodeError::Assertion("push-back").is_programming_error());
        assert!(!DecodeError::StackUnderflow { offset: 0 }.is_programming_error());
        assert!(!DecodeError::UnmatchedBrace { depth: 1 }.is_programming_error());
    }

    #[test]
    fn test_display() {
        let err = DecodeError::InvalidHex { offset: 7, byte: b'z' };
        assert_eq!(err.to_string(), "Invalid hex digit 0x7a at byte 7");
        let err = DecodeError::StackUnderflow { offset: 0 };
        assert_eq!(err.to_string(), "Unmatched '}' at byte 0");
    }
}
