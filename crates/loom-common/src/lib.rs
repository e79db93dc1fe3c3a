//! Common utilities for the Loom parsers.
//!
//! This crate provides shared infrastructure used by the HTML and CSS parsers:
//! - **Text Cursor** - single-character lookahead scanning over an input string
//! - **Parse Errors** - the structured failure type every parse step returns
//! - **Warning System** - colored, de-duplicated terminal warnings

/// Character cursor shared by the HTML and CSS parsers.
pub mod cursor;
/// Parse error taxonomy.
pub mod error;
/// One-time warnings for recoverable oddities in the input.
pub mod warning;

pub use cursor::TextCursor;
pub use error::{ParseError, Result, line_and_column};
