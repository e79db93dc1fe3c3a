//! A cursor over an immutable input string.
//!
//! Both parsers make every decision from a single character of lookahead, so
//! this is the only scanning primitive they need. The input is collected into
//! a `Vec<char>` once; positions count characters, not bytes.

use crate::error::{ParseError, Result};

/// Stateful scanner over a fixed input.
///
/// Invariant: `position <= input.len()`.
#[derive(Debug, Clone)]
pub struct TextCursor {
    input: Vec<char>,
    position: usize,
}

impl TextCursor {
    /// Create a cursor positioned at the start of `input`.
    #[must_use]
    pub fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            position: 0,
        }
    }

    /// Current offset, in characters.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.position
    }

    /// Total length of the input, in characters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.input.len()
    }

    /// True if the input is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.input.is_empty()
    }

    /// True once every character has been consumed.
    #[must_use]
    pub fn is_at_end(&self) -> bool {
        self.position >= self.input.len()
    }

    /// The character at the current position, without consuming it.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::OutOfBounds`] at end of input.
    pub fn peek_char(&self) -> Result<char> {
        self.input
            .get(self.position)
            .copied()
            .ok_or(ParseError::OutOfBounds {
                position: self.position,
            })
    }

    /// True if the unconsumed input begins with `s`.
    #[must_use]
    pub fn starts_with(&self, s: &str) -> bool {
        let mut rest = self.input.get(self.position..).unwrap_or(&[]).iter();
        s.chars().all(|c| rest.next() == Some(&c))
    }

    /// Return the current character and advance past it.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::OutOfBounds`] at end of input.
    pub fn consume_char(&mut self) -> Result<char> {
        let c = self.peek_char()?;
        self.position += 1;
        Ok(c)
    }

    /// Consume characters while `test` holds, returning the consumed run.
    ///
    /// Stops at end of input. If `test` rejects the first character the
    /// result is empty and the position does not move.
    pub fn consume_while<F>(&mut self, mut test: F) -> String
    where
        F: FnMut(char) -> bool,
    {
        let start = self.position;
        while let Some(&c) = self.input.get(self.position)
            && test(c)
        {
            self.position += 1;
        }
        self.input[start..self.position].iter().collect()
    }

    /// Consume a run of whitespace.
    pub fn consume_whitespace(&mut self) -> String {
        self.consume_while(char::is_whitespace)
    }

    /// Consume one character and require it to be `expected`.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::UnexpectedChar`] if a different character is
    /// present, or [`ParseError::OutOfBounds`] at end of input.
    pub fn expect_char(&mut self, expected: char) -> Result<()> {
        let position = self.position;
        let found = self.consume_char()?;
        if found == expected {
            Ok(())
        } else {
            Err(ParseError::UnexpectedChar {
                expected,
                found,
                position,
            })
        }
    }

    /// Skip a delimited span such as `<!-- ... -->` or `/* ... */`.
    ///
    /// Returns `Ok(false)` without moving if the input does not start with
    /// `open`, and `Ok(true)` after consuming through `close` otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::Syntax`] if `close` never appears.
    pub fn skip_delimited(&mut self, open: &str, close: &str) -> Result<bool> {
        if !self.starts_with(open) {
            return Ok(false);
        }
        let start = self.position;
        self.position += open.chars().count();
        while !self.starts_with(close) {
            if self.is_at_end() {
                return Err(ParseError::syntax(
                    format!("unterminated '{open}', expected '{close}'"),
                    start,
                ));
            }
            self.position += 1;
        }
        self.position += close.chars().count();
        Ok(true)
    }
}
