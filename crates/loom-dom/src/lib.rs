//! DOM tree for the Loom HTML parser.
//!
//! # Design
//!
//! Unlike an arena-based DOM, this tree is a plain recursive value: every
//! [`Node`] owns its children exclusively, so there is no sharing and no
//! cycles. The tree is built once by the parser and never mutated afterwards.

use std::collections::{HashMap, HashSet};
use std::fmt::{self, Write};

use serde::Serialize;

/// Map of attribute names to values for an element.
pub type AttributesMap = HashMap<String, String>;

/// Tag name of the element that wraps a fragment with several top-level nodes.
pub const SYNTHETIC_ROOT_TAG: &str = "html";

/// A node in the document tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Node {
    /// A run of character data.
    Text(String),
    /// An element with its attributes and children.
    Element(ElementData),
}

/// Element-specific data.
///
/// We only store the tag name, attributes and children. Namespaces and the
/// rest of the DOM interface are out of scope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ElementData {
    /// The element's tag name, exactly as written.
    pub tag_name: String,
    /// Attribute names mapped to their values. Names are unique.
    pub attrs: AttributesMap,
    /// Child nodes in document order.
    pub children: Vec<Node>,
}

impl ElementData {
    /// Returns the element's id attribute value if present.
    #[must_use]
    pub fn id(&self) -> Option<&String> {
        self.attrs.get("id")
    }

    /// Returns the set of class names from the class attribute.
    #[must_use]
    pub fn classes(&self) -> HashSet<&str> {
        match self.attrs.get("class") {
            Some(classlist) => classlist.split_whitespace().collect(),
            None => HashSet::new(),
        }
    }

    /// Attributes sorted by name, for output that does not depend on hash order.
    #[must_use]
    pub fn sorted_attrs(&self) -> Vec<(&str, &str)> {
        let mut attrs: Vec<(&str, &str)> = self
            .attrs
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        attrs.sort_unstable();
        attrs
    }
}

impl Node {
    /// Create a text node.
    pub fn text(data: impl Into<String>) -> Self {
        Self::Text(data.into())
    }

    /// Create an element node.
    pub fn element(tag_name: impl Into<String>, attrs: AttributesMap, children: Vec<Self>) -> Self {
        Self::Element(ElementData {
            tag_name: tag_name.into(),
            attrs,
            children,
        })
    }

    /// Get element data if this node is an element.
    #[must_use]
    pub const fn as_element(&self) -> Option<&ElementData> {
        match self {
            Self::Element(data) => Some(data),
            Self::Text(_) => None,
        }
    }

    /// Get text content if this node is a text node.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(data) => Some(data),
            Self::Element(_) => None,
        }
    }

    /// Tag name if this node is an element.
    #[must_use]
    pub fn tag_name(&self) -> Option<&str> {
        self.as_element().map(|e| e.tag_name.as_str())
    }

    /// Get all children of a node. Text nodes have none.
    #[must_use]
    pub fn children(&self) -> &[Self] {
        match self {
            Self::Element(data) => &data.children,
            Self::Text(_) => &[],
        }
    }

    /// Concatenated text of this node and all its descendants.
    #[must_use]
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            Self::Text(data) => out.push_str(data),
            Self::Element(data) => {
                for child in &data.children {
                    child.collect_text(out);
                }
            }
        }
    }

    /// First element in depth-first order (including `self`) with the given tag.
    #[must_use]
    pub fn find_element(&self, tag: &str) -> Option<&ElementData> {
        let data = self.as_element()?;
        if data.tag_name == tag {
            return Some(data);
        }
        data.children.iter().find_map(|child| child.find_element(tag))
    }

    /// Serialize this tree back to markup.
    ///
    /// Attributes are written in name order. Values are quoted with `"`
    /// unless they contain one, in which case `'` is used, so the output
    /// parses back to an equal tree.
    #[must_use]
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        match self {
            Self::Text(data) => out.push_str(data),
            Self::Element(data) => {
                out.push('<');
                out.push_str(&data.tag_name);
                for (name, value) in data.sorted_attrs() {
                    let quote = if value.contains('"') { '\'' } else { '"' };
                    out.push(' ');
                    out.push_str(name);
                    out.push('=');
                    out.push(quote);
                    out.push_str(value);
                    out.push(quote);
                }
                out.push('>');
                for child in &data.children {
                    child.write_html(out);
                }
                out.push_str("</");
                out.push_str(&data.tag_name);
                out.push('>');
            }
        }
    }
}

/// Write an indented debug dump of the tree rooted at `node`.
///
/// Elements are shown as `<tag name="value">`, text nodes quoted with
/// newlines escaped and spaces drawn as `·`.
///
/// # Errors
///
/// Propagates any error from the underlying writer.
pub fn write_tree<W: Write>(out: &mut W, node: &Node, indent: usize) -> fmt::Result {
    let prefix = "  ".repeat(indent);
    match node {
        Node::Element(data) => {
            if data.attrs.is_empty() {
                writeln!(out, "{prefix}<{}>", data.tag_name)?;
            } else {
                let attrs: Vec<String> = data
                    .sorted_attrs()
                    .into_iter()
                    .map(|(k, v)| format!("{k}=\"{v}\""))
                    .collect();
                writeln!(out, "{prefix}<{} {}>", data.tag_name, attrs.join(" "))?;
            }
        }
        Node::Text(data) => {
            let display = data.replace('\n', "\\n").replace(' ', "\u{00B7}");
            writeln!(out, "{prefix}\"{display}\"")?;
        }
    }
    for child in node.children() {
        write_tree(out, child, indent + 1)?;
    }
    Ok(())
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_tree(f, self, 0)
    }
}
