//! Selector and declaration grammar.
//!
//! ```text
//! stylesheet   := (whitespace | comment | rule)*
//! rule         := selectors declarations
//! selectors    := simple ("," whitespace simple)*        stops at "{"
//! simple       := ("#" ident | "." ident | "*" | ident)+
//! declarations := "{" (declaration)* "}"
//! declaration  := ident ":" value ";"
//! value        := length | color | ident
//! length       := [0-9.]+ unit
//! color        := "#" hex hex hex hex hex hex
//! ```

use std::str::FromStr;

use loom_common::warning::warn_once;
use loom_common::{ParseError, Result, TextCursor};

use crate::stylesheet::{
    Color, Declaration, Rule, Selector, SimpleSelector, Stylesheet, Unit, Value,
};

/// Identifiers are runs of ASCII letters, digits, `-` and `_`.
const fn is_identifier_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

/// Single-use CSS parser.
///
/// [`CssParser::parse`] consumes the parser, so one instance handles
/// exactly one input.
#[derive(Debug)]
pub struct CssParser {
    cursor: TextCursor,
}

impl CssParser {
    /// Create a parser over `source`.
    #[must_use]
    pub fn new(source: &str) -> Self {
        Self {
            cursor: TextCursor::new(source),
        }
    }

    /// Parse rules until the input is exhausted.
    ///
    /// # Errors
    ///
    /// Returns the first grammar violation encountered. Rules parsed before
    /// the failure are discarded.
    pub fn parse(mut self) -> Result<Stylesheet> {
        let mut rules = Vec::new();
        loop {
            self.skip_whitespace_and_comments()?;
            if self.cursor.is_at_end() {
                break;
            }
            rules.push(self.parse_rule()?);
        }
        Ok(Stylesheet { rules })
    }

    fn skip_whitespace_and_comments(&mut self) -> Result<()> {
        loop {
            let _ = self.cursor.consume_whitespace();
            if !self.cursor.skip_delimited("/*", "*/")? {
                return Ok(());
            }
        }
    }

    fn parse_rule(&mut self) -> Result<Rule> {
        let selectors = self.parse_selectors()?;
        let declarations = self.parse_declarations()?;
        let rule = Rule {
            selectors,
            declarations,
        };
        if rule.declarations.is_empty() {
            let selectors: Vec<String> = rule.selectors.iter().map(ToString::to_string).collect();
            warn_once(
                "CSS",
                &format!("rule for '{}' has no declarations", selectors.join(", ")),
            );
        }
        Ok(rule)
    }

    /// A comma-separated selector list, stopping in front of `{`.
    fn parse_selectors(&mut self) -> Result<Vec<Selector>> {
        let mut selectors = Vec::new();
        loop {
            selectors.push(Selector::Simple(self.parse_simple_selector()?));
            self.skip_whitespace_and_comments()?;
            let position = self.cursor.position();
            match self.cursor.peek_char()? {
                ',' => {
                    let _ = self.cursor.consume_char()?;
                    self.skip_whitespace_and_comments()?;
                }
                '{' => break,
                found => {
                    return Err(ParseError::UnexpectedChar {
                        expected: '{',
                        found,
                        position,
                    });
                }
            }
        }

        // Stable: selectors with equal sums keep their source order.
        selectors.sort_by_key(|selector| selector.specificity().sum());
        Ok(selectors)
    }

    /// Scan `#id`, `.class`, `*` and tag name parts until a character that
    /// starts none of them.
    fn parse_simple_selector(&mut self) -> Result<SimpleSelector> {
        let start = self.cursor.position();
        let mut selector = SimpleSelector::default();
        while !self.cursor.is_at_end() {
            match self.cursor.peek_char()? {
                '#' => {
                    let _ = self.cursor.consume_char()?;
                    selector.id = Some(self.parse_identifier("id")?);
                }
                '.' => {
                    let _ = self.cursor.consume_char()?;
                    let class = self.parse_identifier("class name")?;
                    if selector.classes.contains(&class) {
                        warn_once("CSS", &format!("class '.{class}' repeated in one selector"));
                    }
                    selector.classes.push(class);
                }
                '*' => {
                    let _ = self.cursor.consume_char()?;
                }
                c if is_identifier_char(c) => {
                    selector.tag_name = Some(self.parse_identifier("tag name")?);
                }
                _ => break,
            }
        }

        if self.cursor.position() == start {
            let found = self.cursor.peek_char()?;
            return Err(ParseError::syntax(
                format!("expected a selector, found '{found}'"),
                start,
            ));
        }
        Ok(selector)
    }

    /// A non-empty identifier.
    fn parse_identifier(&mut self, what: &str) -> Result<String> {
        let position = self.cursor.position();
        let identifier = self.cursor.consume_while(is_identifier_char);
        if identifier.is_empty() {
            let message = match self.cursor.peek_char() {
                Ok(found) => format!("expected {what}, found '{found}'"),
                Err(_) => format!("expected {what}, found end of input"),
            };
            return Err(ParseError::syntax(message, position));
        }
        Ok(identifier)
    }

    fn parse_declarations(&mut self) -> Result<Vec<Declaration>> {
        self.cursor.expect_char('{')?;
        let mut declarations = Vec::new();
        loop {
            self.skip_whitespace_and_comments()?;
            if self.cursor.peek_char()? == '}' {
                let _ = self.cursor.consume_char()?;
                break;
            }
            declarations.push(self.parse_declaration()?);
        }
        Ok(declarations)
    }

    /// `name: value;`
    fn parse_declaration(&mut self) -> Result<Declaration> {
        let name = self.parse_identifier("property name")?;
        let _ = self.cursor.consume_whitespace();
        self.cursor.expect_char(':')?;
        let _ = self.cursor.consume_whitespace();
        let value = self.parse_value()?;
        let _ = self.cursor.consume_whitespace();
        self.cursor.expect_char(';')?;
        Ok(Declaration { name, value })
    }

    fn parse_value(&mut self) -> Result<Value> {
        match self.cursor.peek_char()? {
            '0'..='9' => self.parse_length(),
            '#' => self.parse_color(),
            _ => Ok(Value::Keyword(self.parse_identifier("value")?)),
        }
    }

    fn parse_length(&mut self) -> Result<Value> {
        let magnitude = self.parse_float()?;
        let unit = self.parse_unit()?;
        Ok(Value::Length(magnitude, unit))
    }

    fn parse_float(&mut self) -> Result<f32> {
        let position = self.cursor.position();
        let number = self
            .cursor
            .consume_while(|c| c.is_ascii_digit() || c == '.');
        number
            .parse()
            .map_err(|_| ParseError::syntax(format!("invalid number '{number}'"), position))
    }

    fn parse_unit(&mut self) -> Result<Unit> {
        let position = self.cursor.position();
        let unit = self.cursor.consume_while(is_identifier_char);
        Unit::from_str(&unit).map_err(|_| ParseError::UnknownUnit { unit, position })
    }

    /// `#rrggbb`. Alpha is always opaque.
    fn parse_color(&mut self) -> Result<Value> {
        self.cursor.expect_char('#')?;
        Ok(Value::Color(Color {
            r: self.parse_hex_pair()?,
            g: self.parse_hex_pair()?,
            b: self.parse_hex_pair()?,
            a: 255,
        }))
    }

    fn parse_hex_pair(&mut self) -> Result<u8> {
        let position = self.cursor.position();
        let mut pair = String::with_capacity(2);
        for _ in 0..2 {
            let digit_position = self.cursor.position();
            let c = self.cursor.consume_char()?;
            if !c.is_ascii_hexdigit() {
                return Err(ParseError::InvalidHexDigit {
                    found: c,
                    position: digit_position,
                });
            }
            pair.push(c);
        }
        u8::from_str_radix(&pair, 16)
            .map_err(|_| ParseError::syntax(format!("invalid hex pair '{pair}'"), position))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_selector_stops_at_delimiters() {
        for (source, rest) in [("div, p", ", p"), ("a.b{", "{"), ("#x y", " y")] {
            let mut parser = CssParser::new(source);
            assert!(parser.parse_simple_selector().is_ok());
            assert!(parser.cursor.starts_with(rest), "{source:?}");
        }
    }

    #[test]
    fn test_simple_selector_parts() {
        let mut parser = CssParser::new("div#main.a.b");
        let selector = parser.parse_simple_selector().expect("valid selector");
        assert_eq!(selector.tag_name.as_deref(), Some("div"));
        assert_eq!(selector.id.as_deref(), Some("main"));
        assert_eq!(selector.classes, ["a", "b"]);
    }

    #[test]
    fn test_hex_pair() {
        let mut parser = CssParser::new("0aFfg0");
        assert_eq!(parser.parse_hex_pair(), Ok(10));
        assert_eq!(parser.parse_hex_pair(), Ok(255));
        assert_eq!(
            parser.parse_hex_pair(),
            Err(ParseError::InvalidHexDigit {
                found: 'g',
                position: 4,
            })
        );
    }

    #[test]
    fn test_float_with_two_dots_is_rejected() {
        let mut parser = CssParser::new("1.2.3px");
        assert!(parser.parse_float().unwrap_err().is_syntax());
    }
}
