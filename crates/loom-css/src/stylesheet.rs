//! Stylesheet data model: rules, selectors, declarations and values.

use std::fmt;

use serde::Serialize;
use strum_macros::{Display, EnumString};

/// A parsed stylesheet. Rules are kept in source order.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Stylesheet {
    /// The list of rules in the stylesheet.
    pub rules: Vec<Rule>,
}

/// A style rule: a selector list and a declaration block.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Rule {
    /// Selectors, sorted ascending by [`Specificity::sum`].
    pub selectors: Vec<Selector>,
    /// Declarations in source order.
    pub declarations: Vec<Declaration>,
}

/// A selector. Only simple selectors exist; there are no combinators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Selector {
    /// At most one tag name, at most one id, and any number of classes.
    Simple(SimpleSelector),
}

/// A simple selector such as `div#main.wide`.
///
/// The universal selector `*` parses to a selector with every field empty.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct SimpleSelector {
    /// Type selector, e.g. `div`.
    pub tag_name: Option<String>,
    /// ID selector without the `#`.
    pub id: Option<String>,
    /// Class selectors without the `.`, in source order, duplicates kept.
    pub classes: Vec<String>,
}

/// Selector weight used to order the selectors of one rule.
///
/// - `a`: length of the id, in characters (0 when absent)
/// - `b`: number of classes
/// - `c`: length of the tag name, in characters (0 when absent)
///
/// Selectors are ordered by [`Specificity::sum`], not by comparing the
/// components lexicographically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Specificity {
    /// Id length.
    pub a: usize,
    /// Class count.
    pub b: usize,
    /// Tag name length.
    pub c: usize,
}

impl Specificity {
    /// `a + b + c`, the key selectors are sorted by.
    #[must_use]
    pub const fn sum(self) -> usize {
        self.a + self.b + self.c
    }
}

impl Selector {
    /// Compute this selector's specificity.
    #[must_use]
    pub fn specificity(&self) -> Specificity {
        let Self::Simple(simple) = self;
        let char_len = |s: &Option<String>| s.as_deref().map_or(0, |s| s.chars().count());
        Specificity {
            a: char_len(&simple.id),
            b: simple.classes.len(),
            c: char_len(&simple.tag_name),
        }
    }
}

/// A `name: value` pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Declaration {
    /// Property name.
    pub name: String,
    /// Property value.
    pub value: Value,
}

/// A declaration value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Value {
    /// A bare identifier such as `block` or `red`.
    Keyword(String),
    /// A number with a unit, e.g. `10px`.
    Length(f32, Unit),
    /// A `#rrggbb` color.
    Color(Color),
}

impl Value {
    /// The value in pixels. Only lengths have one; everything else is zero.
    #[must_use]
    pub fn to_px(&self) -> f32 {
        match self {
            Self::Length(magnitude, Unit::Px) => *magnitude,
            Self::Keyword(_) | Self::Color(_) => 0.0,
        }
    }
}

/// Length units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Unit {
    /// CSS pixels.
    Px,
}

/// An RGBA color with 8-bit channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Color {
    /// Red.
    pub r: u8,
    /// Green.
    pub g: u8,
    /// Blue.
    pub b: u8,
    /// Alpha. Always 255 when parsed from `#rrggbb`.
    pub a: u8,
}

impl Color {
    /// Create a color from its four channels.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

impl fmt::Display for Stylesheet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rule in &self.rules {
            writeln!(f, "{rule}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, selector) in self.selectors.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{selector}")?;
        }
        f.write_str(" {")?;
        for declaration in &self.declarations {
            write!(f, " {declaration}")?;
        }
        f.write_str(" }")
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self::Simple(simple) = self;
        if simple.tag_name.is_none() && simple.id.is_none() && simple.classes.is_empty() {
            return f.write_str("*");
        }
        if let Some(tag_name) = &simple.tag_name {
            f.write_str(tag_name)?;
        }
        if let Some(id) = &simple.id {
            write!(f, "#{id}")?;
        }
        for class in &simple.classes {
            write!(f, ".{class}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Declaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {};", self.name, self.value)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Keyword(keyword) => f.write_str(keyword),
            Self::Length(magnitude, unit) => write!(f, "{magnitude}{unit}"),
            Self::Color(color) => write!(f, "{color}"),
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)?;
        if self.a != 255 {
            write!(f, "{:02x}", self.a)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn test_unit_parses_case_insensitively() {
        assert_eq!(Unit::from_str("px"), Ok(Unit::Px));
        assert_eq!(Unit::from_str("PX"), Ok(Unit::Px));
        assert!(Unit::from_str("em").is_err());
        assert_eq!(Unit::Px.to_string(), "px");
    }

    #[test]
    fn test_universal_selector_displays_as_star() {
        let selector = Selector::Simple(SimpleSelector::default());
        assert_eq!(selector.to_string(), "*");
        assert_eq!(selector.specificity().sum(), 0);
    }

    #[test]
    fn test_value_display() {
        assert_eq!(Value::Length(1.5, Unit::Px).to_string(), "1.5px");
        assert_eq!(Value::Color(Color::new(255, 0, 16, 255)).to_string(), "#ff0010");
        assert_eq!(Value::Color(Color::new(0, 0, 0, 128)).to_string(), "#00000080");
        assert_eq!(Value::Keyword("auto".into()).to_string(), "auto");
    }
}
