//! Tag, attribute and text grammar.
//!
//! ```text
//! nodes      := (whitespace | comment | node)*      stops at EOF or "</"
//! node       := element | text
//! element    := "<" name attributes ">" nodes "</" name ">"
//! attributes := (whitespace name "=" quoted)*        stops at ">"
//! text       := [^<]+
//! ```
//!
//! Elements are not built by recursion. Opening tags push onto a stack of
//! open elements and the matching closing tag pops it, so nesting depth is
//! bounded by [`MAX_DEPTH`] rather than by the thread's stack.

use loom_common::warning::warn_once;
use loom_common::{ParseError, Result, TextCursor};
use loom_dom::{AttributesMap, Node, SYNTHETIC_ROOT_TAG};

/// Deepest element nesting accepted before the parse is rejected.
pub const MAX_DEPTH: usize = 512;

/// Single-use HTML parser.
///
/// [`HtmlParser::parse`] consumes the parser, so one instance handles
/// exactly one input.
#[derive(Debug)]
pub struct HtmlParser {
    cursor: TextCursor,
}

/// An element whose closing tag has not been seen yet.
#[derive(Debug)]
struct OpenElement {
    tag_name: String,
    attrs: AttributesMap,
    children: Vec<Node>,
}

/// What a single step of [`HtmlParser::parse_node`] produced.
enum Parsed {
    Open(OpenElement),
    Text(Node),
}

/// Tag and attribute names are runs of ASCII letters and digits.
const fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric()
}

/// Append `node` to `siblings`.
///
/// Text runs are only ever separated by a skipped comment, so a text node
/// following a text node is folded into it.
fn push_child(siblings: &mut Vec<Node>, node: Node) {
    if let (Some(Node::Text(previous)), Node::Text(text)) = (siblings.last_mut(), &node) {
        previous.push_str(text);
        return;
    }
    siblings.push(node);
}

impl HtmlParser {
    /// Create a parser over `source`.
    #[must_use]
    pub fn new(source: &str) -> Self {
        Self {
            cursor: TextCursor::new(source),
        }
    }

    /// Parse the whole input.
    ///
    /// # Errors
    ///
    /// Returns the first grammar violation encountered, including nesting
    /// deeper than [`MAX_DEPTH`]. No partial tree is produced.
    pub fn parse(mut self) -> Result<Node> {
        let nodes = self.parse_nodes()?;

        // parse_nodes only stops early at a closing tag, and at the top level
        // there is nothing for it to close.
        if !self.cursor.is_at_end() {
            return Err(ParseError::syntax(
                "closing tag without a matching open element",
                self.cursor.position(),
            ));
        }

        Ok(match <[Node; 1]>::try_from(nodes) {
            Ok([root]) => root,
            Err(nodes) => Node::element(SYNTHETIC_ROOT_TAG, AttributesMap::new(), nodes),
        })
    }

    /// Parse top-level sibling nodes until end of input or an unmatched
    /// closing tag.
    fn parse_nodes(&mut self) -> Result<Vec<Node>> {
        let mut open: Vec<OpenElement> = Vec::new();
        let mut top_level = Vec::new();
        loop {
            let _ = self.cursor.consume_whitespace();
            if self.cursor.skip_delimited("<!--", "-->")? {
                continue;
            }
            if self.cursor.is_at_end() {
                break;
            }

            if self.cursor.starts_with("</") {
                let Some(element) = open.pop() else {
                    break;
                };
                self.parse_closing_tag(&element.tag_name)?;
                let node = Node::element(element.tag_name, element.attrs, element.children);
                match open.last_mut() {
                    Some(parent) => push_child(&mut parent.children, node),
                    None => push_child(&mut top_level, node),
                }
                continue;
            }

            let position = self.cursor.position();
            match self.parse_node()? {
                Parsed::Open(element) => {
                    if open.len() >= MAX_DEPTH {
                        return Err(ParseError::syntax(
                            format!("nesting too deep (more than {MAX_DEPTH} open elements)"),
                            position,
                        ));
                    }
                    open.push(element);
                }
                Parsed::Text(text) => match open.last_mut() {
                    Some(parent) => push_child(&mut parent.children, text),
                    None => push_child(&mut top_level, text),
                },
            }
        }

        // Input ran out while an element was still waiting for `</`.
        if !open.is_empty() {
            return Err(ParseError::OutOfBounds {
                position: self.cursor.position(),
            });
        }
        Ok(top_level)
    }

    fn parse_node(&mut self) -> Result<Parsed> {
        if self.cursor.peek_char()? == '<' {
            Ok(Parsed::Open(self.parse_element()?))
        } else {
            Ok(Parsed::Text(self.parse_text()))
        }
    }

    fn parse_text(&mut self) -> Node {
        Node::Text(self.cursor.consume_while(|c| c != '<'))
    }

    /// The opening tag `<name attributes>`. Children and the closing tag are
    /// handled by [`Self::parse_nodes`].
    fn parse_element(&mut self) -> Result<OpenElement> {
        self.cursor.expect_char('<')?;
        let tag_name = self.parse_name("tag name")?;
        let attrs = self.parse_attributes(&tag_name)?;
        self.cursor.expect_char('>')?;
        Ok(OpenElement {
            tag_name,
            attrs,
            children: Vec::new(),
        })
    }

    /// `</name>`, where `name` must equal the open element's tag.
    fn parse_closing_tag(&mut self, tag_name: &str) -> Result<()> {
        self.cursor.expect_char('<')?;
        self.cursor.expect_char('/')?;
        let position = self.cursor.position();
        let closing = self.cursor.consume_while(is_name_char);
        if closing != tag_name {
            return Err(ParseError::TagMismatch {
                expected: tag_name.to_string(),
                found: closing,
                position,
            });
        }
        self.cursor.expect_char('>')
    }

    /// A non-empty run of name characters.
    fn parse_name(&mut self, what: &str) -> Result<String> {
        let position = self.cursor.position();
        let name = self.cursor.consume_while(is_name_char);
        if name.is_empty() {
            let found = self.cursor.peek_char()?;
            return Err(ParseError::syntax(
                format!("expected {what}, found '{found}'"),
                position,
            ));
        }
        Ok(name)
    }

    fn parse_attributes(&mut self, tag_name: &str) -> Result<AttributesMap> {
        let mut attrs = AttributesMap::new();
        loop {
            let _ = self.cursor.consume_whitespace();
            if self.cursor.peek_char()? == '>' {
                break;
            }
            let (name, value) = self.parse_attr()?;
            if attrs.insert(name.clone(), value).is_some() {
                warn_once(
                    "HTML",
                    &format!("duplicate attribute '{name}' on <{tag_name}>, keeping the last value"),
                );
            }
        }
        Ok(attrs)
    }

    fn parse_attr(&mut self) -> Result<(String, String)> {
        let name = self.parse_name("attribute name")?;
        self.cursor.expect_char('=')?;
        let value = self.parse_attr_value()?;
        Ok((name, value))
    }

    fn parse_attr_value(&mut self) -> Result<String> {
        let start = self.cursor.position();
        let open_quote = self.cursor.consume_char()?;
        if open_quote != '"' && open_quote != '\'' {
            return Err(ParseError::UnexpectedChar {
                expected: '"',
                found: open_quote,
                position: start,
            });
        }
        let value = self.cursor.consume_while(|c| c != open_quote);
        if self.cursor.is_at_end() {
            return Err(ParseError::syntax("unterminated attribute value", start));
        }
        self.cursor.expect_char(open_quote)?;
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_stops_at_tag() {
        let mut parser = HtmlParser::new("abc <b>");
        assert_eq!(parser.parse_text(), Node::text("abc "));
        assert!(parser.cursor.starts_with("<b>"));
    }

    #[test]
    fn test_attr_value_single_quotes() {
        let mut parser = HtmlParser::new("'a \"b\"' rest");
        assert_eq!(parser.parse_attr_value(), Ok("a \"b\"".to_string()));
        assert_eq!(parser.cursor.position(), 7);
    }

    #[test]
    fn test_unquoted_attr_value_is_rejected() {
        let mut parser = HtmlParser::new("x>");
        assert!(matches!(
            parser.parse_attr_value(),
            Err(ParseError::UnexpectedChar { found: 'x', .. })
        ));
    }

    #[test]
    fn test_push_child_folds_adjacent_text() {
        let mut siblings = vec![Node::text("a ")];
        push_child(&mut siblings, Node::text("b"));
        assert_eq!(siblings, [Node::text("a b")]);

        push_child(&mut siblings, Node::element("i", AttributesMap::new(), Vec::new()));
        push_child(&mut siblings, Node::text("c"));
        assert_eq!(siblings.len(), 3);
    }

    #[test]
    fn test_closing_tag_must_match() {
        let mut parser = HtmlParser::new("</b>");
        assert_eq!(
            parser.parse_closing_tag("a"),
            Err(ParseError::TagMismatch {
                expected: "a".to_string(),
                found: "b".to_string(),
                position: 2,
            })
        );
    }
}
