//! CSS parser for the Loom toolkit.
//!
//! # Scope
//!
//! This crate implements a small recursive-descent stylesheet parser:
//! - Style rules with comma-separated simple selectors
//!   (`tag`, `#id`, `.class`, `*`, and compounds such as `div#main.wide`)
//! - Declarations with keyword, `px` length, and `#rrggbb` color values
//! - Comments (`/* ... */`), which are skipped
//! - Per-rule selector ordering by summed specificity
//!
//! Any grammar violation aborts the parse with a [`ParseError`].
//!
//! # Not Implemented
//!
//! - Combinators, pseudo-classes, and attribute selectors
//! - At-rules
//! - Units other than `px`, and color syntaxes other than `#rrggbb`
//! - Cascade and selector matching

/// CSS parser implementation.
pub mod parser;
/// Stylesheet data model.
pub mod stylesheet;

pub use loom_common::ParseError;
pub use parser::CssParser;
pub use stylesheet::{
    Color, Declaration, Rule, Selector, SimpleSelector, Specificity, Stylesheet, Unit, Value,
};

use loom_common::Result;

/// Parse a stylesheet.
///
/// # Errors
///
/// Returns a [`ParseError`] for unknown units, bad hex digits, unexpected
/// characters, or a block left open at end of input.
pub fn parse_css(source: &str) -> Result<Stylesheet> {
    CssParser::new(source).parse()
}
