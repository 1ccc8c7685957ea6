//! Grid allocation error types.

use std::error::Error;
use std::fmt;

/// Errors that can occur while allocating a grid block.
///
/// Both variants are reported before any memory is handed to the caller,
/// so a failed allocation never leaves a partially built grid behind.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GridError {
    /// The byte size of the requested block does not fit in `usize`
    /// (or exceeds `isize::MAX`, the largest allocation Rust permits).
    ///
    /// Detected before the allocator is called.
    SizeOverflow {
        /// Number of word-sized header entries requested.
        header_words: Option<usize>,
        /// Number of payload elements requested, if that product fits.
        elements: Option<usize>,
        /// Byte size of one element.
        element_size: usize,
    },
    /// The global allocator could not satisfy a request of `bytes` bytes.
    AllocationFailed {
        /// Total block size that was requested.
        bytes: usize,
    },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SizeOverflow {
                header_words,
                elements,
                element_size,
            } => {
                write!(f, "grid size overflow: ")?;
                match header_words {
                    Some(words) => write!(f, "{words} header words, ")?,
                    None => write!(f, "header word count overflows, ")?,
                }
                match elements {
                    Some(n) => write!(f, "{n} elements of {element_size} bytes"),
                    None => write!(f, "element count overflows ({element_size} bytes each)"),
                }
            }
            Self::AllocationFailed { bytes } => {
                write!(f, "grid allocation failed: could not allocate {bytes} bytes")
            }
        }
    }
}

impl Error for GridError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allocation_failed_names_byte_count() {
        let err = GridError::AllocationFailed { bytes: 4096 };
        assert_eq!(
            err.to_string(),
            "grid allocation failed: could not allocate 4096 bytes"
        );
    }

    #[test]
    fn size_overflow_reports_known_counts() {
        let err = GridError::SizeOverflow {
            header_words: Some(3),
            elements: None,
            element_size: 8,
        };
        assert_eq!(
            err.to_string(),
            "grid size overflow: 3 header words, element count overflows (8 bytes each)"
        );
    }
}
