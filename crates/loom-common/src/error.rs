//! Parse errors shared by both parsers.
//!
//! Every failure aborts the whole parse. There is no partial tree and no
//! resynchronization, so a single error value describes the entire outcome.

/// Result alias used by every parse step.
pub type Result<T> = std::result::Result<T, ParseError>;

/// A fatal parse failure.
///
/// Positions are character offsets into the input, not byte offsets.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// A lookahead or consume was attempted past the end of the input.
    #[error("unexpected end of input at offset {position}")]
    OutOfBounds {
        /// Offset at which input ran out.
        position: usize,
    },

    /// A required delimiter was not where the grammar needs it.
    #[error("expected '{expected}' but found '{found}' at offset {position}")]
    UnexpectedChar {
        /// The delimiter the grammar requires.
        expected: char,
        /// The character actually present.
        found: char,
        /// Offset of `found`.
        position: usize,
    },

    /// A closing tag did not name the element it closes.
    #[error("closing tag </{found}> does not match <{expected}> at offset {position}")]
    TagMismatch {
        /// Tag name of the open element.
        expected: String,
        /// Tag name found in the closing tag.
        found: String,
        /// Offset of the closing tag name.
        position: usize,
    },

    /// A length carried a unit other than `px`.
    #[error("unrecognized unit '{unit}' at offset {position}")]
    UnknownUnit {
        /// The unit as written.
        unit: String,
        /// Offset of the unit.
        position: usize,
    },

    /// A color literal contained a character that is not a hex digit.
    #[error("invalid hex digit '{found}' in color at offset {position}")]
    InvalidHexDigit {
        /// The offending character.
        found: char,
        /// Offset of `found`.
        position: usize,
    },

    /// Any other grammar violation.
    #[error("{message} at offset {position}")]
    Syntax {
        /// What went wrong.
        message: String,
        /// Offset where the violation was detected.
        position: usize,
    },
}

impl ParseError {
    /// Build a generic syntax error.
    pub fn syntax(message: impl Into<String>, position: usize) -> Self {
        Self::Syntax {
            message: message.into(),
            position,
        }
    }

    /// Offset into the input at which the error was detected.
    #[must_use]
    pub const fn position(&self) -> usize {
        match self {
            Self::OutOfBounds { position }
            | Self::UnexpectedChar { position, .. }
            | Self::TagMismatch { position, .. }
            | Self::UnknownUnit { position, .. }
            | Self::InvalidHexDigit { position, .. }
            | Self::Syntax { position, .. } => *position,
        }
    }

    /// True for errors caused by running off the end of the input.
    #[must_use]
    pub const fn is_bounds(&self) -> bool {
        matches!(self, Self::OutOfBounds { .. })
    }

    /// True for errors caused by input that violates the grammar.
    #[must_use]
    pub const fn is_syntax(&self) -> bool {
        !self.is_bounds()
    }
}

/// Convert a character offset into a 1-based `(line, column)` pair.
///
/// Offsets past the end of `source` resolve to the position just after the
/// last character.
#[must_use]
pub fn line_and_column(source: &str, position: usize) -> (usize, usize) {
    let mut line = 1;
    let mut column = 1;
    for c in source.chars().take(position) {
        if c == '\n' {
            line += 1;
            column = 1;
        } else {
            column += 1;
        }
    }
    (line, column)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_and_column_first_line() {
        assert_eq!(line_and_column("abc", 0), (1, 1));
        assert_eq!(line_and_column("abc", 2), (1, 3));
    }

    #[test]
    fn test_line_and_column_after_newline() {
        assert_eq!(line_and_column("ab\ncd", 3), (2, 1));
        assert_eq!(line_and_column("ab\ncd", 5), (2, 3));
    }

    #[test]
    fn test_line_and_column_past_end() {
        assert_eq!(line_and_column("a\n", 40), (2, 1));
    }

    #[test]
    fn test_classification() {
        assert!(ParseError::OutOfBounds { position: 3 }.is_bounds());
        let err = ParseError::syntax("missing name", 7);
        assert!(err.is_syntax());
        assert_eq!(err.position(), 7);
        assert_eq!(err.to_string(), "missing name at offset 7");
    }
}
