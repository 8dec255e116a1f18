//! A small CSS-like selector language for locating form elements.
//!
//! Supported: tag names, `#id`, `.class`, `[attr]`, `[attr=value]` (value
//! optionally quoted), and the descendant combinator (whitespace).

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::element::Element;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectorError {
    #[error("selector is empty")]
    Empty,

    #[error("unexpected character '{ch}' at position {pos} in selector '{selector}'")]
    UnexpectedChar {
        selector: String,
        ch: char,
        pos: usize,
    },

    #[error("unterminated attribute selector in '{selector}'")]
    UnterminatedAttribute { selector: String },

    #[error("expected a name after '{prefix}' at position {pos} in selector '{selector}'")]
    MissingName {
        selector: String,
        prefix: char,
        pos: usize,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct AttrMatch {
    name: String,
    value: Option<String>,
}

/// One compound selector, e.g. `input.email[name=email]`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Compound {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
    attrs: Vec<AttrMatch>,
}

impl Compound {
    fn matches(&self, el: &Element) -> bool {
        if let Some(tag) = &self.tag
            && !el.tag_name().eq_ignore_ascii_case(tag)
        {
            return false;
        }
        if let Some(id) = &self.id
            && &el.id != id
        {
            return false;
        }
        if !self.classes.iter().all(|c| el.has_class(c)) {
            return false;
        }
        self.attrs.iter().all(|attr| match (el.attribute(&attr.name), &attr.value) {
            (None, _) => false,
            (Some(_), None) => true,
            (Some(actual), Some(expected)) => &actual == expected,
        })
    }
}

/// A parsed selector: a chain of compounds joined by descendant combinators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    source: String,
    compounds: Vec<Compound>,
}

impl Selector {
    pub fn parse(input: &str) -> Result<Self, SelectorError> {
        Parser::new(input).parse()
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Whether `el` matches, given its ancestors from the root down to its parent.
    pub fn matches(&self, el: &Element, ancestors: &[&Element]) -> bool {
        let Some((last, rest)) = self.compounds.split_last() else {
            return false;
        };
        if !last.matches(el) {
            return false;
        }

        // Greedy right-to-left walk is exact for descendant-only chains.
        let mut remaining = rest.iter().rev().peekable();
        for ancestor in ancestors.iter().rev() {
            match remaining.peek() {
                Some(compound) if compound.matches(ancestor) => {
                    remaining.next();
                }
                Some(_) => {}
                None => break,
            }
        }
        remaining.peek().is_none()
    }
}

impl FromStr for Selector {
    type Err = SelectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

struct Parser<'a> {
    source: &'a str,
    chars: Vec<char>,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            source,
            chars: source.chars().collect(),
            pos: 0,
        }
    }

    fn parse(mut self) -> Result<Selector, SelectorError> {
        let mut compounds = Vec::new();

        loop {
            self.skip_whitespace();
            if self.peek().is_none() {
                break;
            }
            compounds.push(self.compound()?);
        }

        if compounds.is_empty() {
            return Err(SelectorError::Empty);
        }

        Ok(Selector {
            source: self.source.trim().to_string(),
            compounds,
        })
    }

    fn compound(&mut self) -> Result<Compound, SelectorError> {
        let mut compound = Compound::default();

        if self.peek().is_some_and(is_name_char) {
            compound.tag = Some(self.name());
        } else if self.peek() == Some('*') {
            self.pos += 1;
        }

        while let Some(ch) = self.peek() {
            match ch {
                '#' => compound.id = Some(self.prefixed_name('#')?),
                '.' => compound.classes.push(self.prefixed_name('.')?),
                '[' => compound.attrs.push(self.attribute()?),
                c if c.is_whitespace() => break,
                c => return Err(self.unexpected(c)),
            }
        }

        Ok(compound)
    }

    fn prefixed_name(&mut self, prefix: char) -> Result<String, SelectorError> {
        let start = self.pos;
        self.pos += 1;
        if !self.peek().is_some_and(is_name_char) {
            return Err(SelectorError::MissingName {
                selector: self.source.to_string(),
                prefix,
                pos: start,
            });
        }
        Ok(self.name())
    }

    fn attribute(&mut self) -> Result<AttrMatch, SelectorError> {
        self.pos += 1; // [
        self.skip_whitespace();
        if !self.peek().is_some_and(is_name_char) {
            return match self.peek() {
                Some(c) => Err(self.unexpected(c)),
                None => Err(self.unterminated()),
            };
        }
        let name = self.name();
        self.skip_whitespace();

        let value = match self.peek() {
            Some(']') => None,
            Some('=') => {
                self.pos += 1;
                self.skip_whitespace();
                Some(self.attribute_value()?)
            }
            Some(c) => return Err(self.unexpected(c)),
            None => return Err(self.unterminated()),
        };

        self.skip_whitespace();
        match self.peek() {
            Some(']') => {
                self.pos += 1;
                Ok(AttrMatch { name, value })
            }
            Some(c) => Err(self.unexpected(c)),
            None => Err(self.unterminated()),
        }
    }

    fn attribute_value(&mut self) -> Result<String, SelectorError> {
        match self.peek() {
            Some(quote @ ('"' | '\'')) => {
                self.pos += 1;
                let mut value = String::new();
                loop {
                    match self.peek() {
                        Some(c) if c == quote => {
                            self.pos += 1;
                            return Ok(value);
                        }
                        Some(c) => {
                            value.push(c);
                            self.pos += 1;
                        }
                        None => return Err(self.unterminated()),
                    }
                }
            }
            Some(c) if is_name_char(c) => Ok(self.name()),
            Some(c) => Err(self.unexpected(c)),
            None => Err(self.unterminated()),
        }
    }

    fn name(&mut self) -> String {
        let mut name = String::new();
        while let Some(c) = self.peek().filter(|c| is_name_char(*c)) {
            name.push(c);
            self.pos += 1;
        }
        name
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.pos += 1;
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn unexpected(&self, ch: char) -> SelectorError {
        SelectorError::UnexpectedChar {
            selector: self.source.to_string(),
            ch,
            pos: self.pos,
        }
    }

    fn unterminated(&self) -> SelectorError {
        SelectorError::UnterminatedAttribute {
            selector: self.source.to_string(),
        }
    }
}

fn is_name_char(c: char) -> bool {
    c.is_alphanumeric() || c == '-' || c == '_'
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_compound() {
        let selector = Selector::parse("input.email[name='email']").unwrap();
        assert_eq!(selector.compounds.len(), 1);
        let compound = &selector.compounds[0];
        assert_eq!(compound.tag.as_deref(), Some("input"));
        assert_eq!(compound.classes, vec!["email".to_string()]);
        assert_eq!(compound.attrs[0].value.as_deref(), Some("email"));
    }

    #[test]
    fn test_parse_descendant_chain() {
        let selector = Selector::parse("  form   .fname ").unwrap();
        assert_eq!(selector.compounds.len(), 2);
        assert_eq!(selector.as_str(), "form   .fname");
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(Selector::parse("   "), Err(SelectorError::Empty));
        assert!(matches!(
            Selector::parse("input[name"),
            Err(SelectorError::UnterminatedAttribute { .. })
        ));
        assert!(matches!(
            Selector::parse(".a>.b"),
            Err(SelectorError::UnexpectedChar { ch: '>', .. })
        ));
        assert!(matches!(
            Selector::parse("#"),
            Err(SelectorError::MissingName { prefix: '#', .. })
        ));
    }
}
