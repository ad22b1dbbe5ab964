//! Sample Ingestion
//!
//! Raw calibration logs are plain text, one reading per line:
//!
//! ```text
//! -312 1045 88
//! -310,1047,90
//! # comment lines and blank lines are skipped
//! -309, 1050, 91, 1700000000   <- extra columns are ignored
//! ```
//!
//! The first three whitespace- or comma-separated tokens of a line are the
//! X, Y and Z readings. The line format is shared by every source; the
//! `file` submodule reads it from any `std::io::Read`.

use core::fmt;

use crate::sample::Sample;

pub use crate::traits::Stream;

#[cfg(feature = "std")]
pub mod file;

#[cfg(feature = "std")]
pub use file::{read_samples, SampleStream, StreamStats};

/// Errors that can occur while streaming samples
#[derive(Debug, Clone, PartialEq)]
pub enum StreamError<E> {
    /// Transport-level error (e.g., I/O error)
    Transport(E),
    /// Line without three integer components (1-based line number)
    Format {
        /// Offending line
        line: usize,
    },
    /// Line longer than the line buffer (1-based line number)
    Overflow {
        /// Offending line
        line: usize,
    },
    /// End of stream reached
    EndOfStream,
}

impl<E: fmt::Display> fmt::Display for StreamError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transport(e) => write!(f, "Transport error: {}", e),
            Self::Format { line } => write!(f, "Format error on line {}", line),
            Self::Overflow { line } => write!(f, "Line {} overflows the line buffer", line),
            Self::EndOfStream => write!(f, "End of stream"),
        }
    }
}

#[cfg(feature = "std")]
impl From<StreamError<std::io::Error>> for crate::errors::CalibrationError {
    fn from(err: StreamError<std::io::Error>) -> Self {
        match err {
            StreamError::Transport(e) => e.into(),
            StreamError::Format { line } => Self::Parse { line },
            StreamError::Overflow { line } => Self::LineTooLong { line },
            // Callers treat end of stream as success; reaching here means
            // the stream ended before any parse could be attempted
            StreamError::EndOfStream => Self::InsufficientData {
                required: 1,
                available: 0,
            },
        }
    }
}

/// True for lines that carry no reading (blank or `#` comment)
pub fn is_skippable(line: &str) -> bool {
    let line = line.trim();
    line.is_empty() || line.starts_with('#')
}

/// Parse the first three integer tokens of a line
///
/// Tokens are separated by whitespace and/or commas. Returns `None` if there
/// are fewer than three tokens or one of them is not an `i32`.
pub fn parse_line(line: &str) -> Option<Sample> {
    let mut tokens = line
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|token| !token.is_empty());

    let x = tokens.next()?.parse().ok()?;
    let y = tokens.next()?.parse().ok()?;
    let z = tokens.next()?.parse().ok()?;
    Some(Sample::new(x, y, z))
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::format;

    #[test]
    fn parses_space_and_comma_separated() {
        assert_eq!(parse_line("-312 1045 88"), Some(Sample::new(-312, 1045, 88)));
        assert_eq!(parse_line("-310,1047,90"), Some(Sample::new(-310, 1047, 90)));
        assert_eq!(parse_line("  -309, 1050,\t91 "), Some(Sample::new(-309, 1050, 91)));
    }

    #[test]
    fn ignores_extra_columns() {
        assert_eq!(parse_line("1 2 3 1700000000"), Some(Sample::new(1, 2, 3)));
    }

    #[test]
    fn rejects_short_or_non_numeric_lines() {
        assert_eq!(parse_line("1 2"), None);
        assert_eq!(parse_line("x y z"), None);
        assert_eq!(parse_line("1.5 2 3"), None);
    }

    #[test]
    fn skippable_lines() {
        assert!(is_skippable(""));
        assert!(is_skippable("   \t"));
        assert!(is_skippable("# header"));
        assert!(!is_skippable("1 2 3"));
    }

    #[test]
    fn stream_error_display() {
        let err: StreamError<&str> = StreamError::Transport("pipe closed");
        assert_eq!(format!("{}", err), "Transport error: pipe closed");

        let err: StreamError<&str> = StreamError::Format { line: 7 };
        assert_eq!(format!("{}", err), "Format error on line 7");
    }
}
