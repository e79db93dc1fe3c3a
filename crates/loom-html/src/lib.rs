//! HTML parser for the Loom toolkit.
//!
//! # Scope
//!
//! This crate implements a small recursive-descent parser for well-formed
//! HTML fragments:
//! - Elements with explicit, matching closing tags
//! - Quoted attributes (`name="value"` or `name='value'`)
//! - Text runs
//! - Comments (`<!-- ... -->`), which are skipped
//!
//! Any grammar violation aborts the parse with a [`ParseError`].
//!
//! # Not Implemented
//!
//! - Void and self-closing elements
//! - Unquoted or valueless attributes
//! - Character references
//! - Error recovery of any kind

/// HTML parser and tree construction.
pub mod parser;

pub use loom_common::ParseError;
pub use parser::HtmlParser;

use loom_common::Result;
use loom_dom::Node;

/// Parse an HTML fragment into a tree.
///
/// A fragment with exactly one top-level node returns that node. Anything
/// else is wrapped in a synthetic `html` element.
///
/// # Errors
///
/// Returns a [`ParseError`] for mismatched tags, missing delimiters, bad
/// attribute syntax, or input that ends inside an element.
pub fn parse_html(source: &str) -> Result<Node> {
    HtmlParser::new(source).parse()
}
