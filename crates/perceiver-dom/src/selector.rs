//! Selector parsing and matching.
//!
//! Supported grammar (a subset of CSS, and exactly what the locator synthesizer
//! emits):
//! - type selectors and `*`
//! - `#id`, `.class`, `[attr]`, `[attr="value"]`, `[attr=ident]`
//! - `:nth-of-type(n)` with a positive integer argument
//! - child (`>`) and descendant (whitespace) combinators
//!
//! Identifiers and strings accept CSS backslash escapes, including hex escapes.

use stepcapture_core_types::ElementRef;

use crate::errors::SelectorError;
use crate::ports::DocumentPort;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Combinator {
    Child,
    Descendant,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AttrMatch {
    pub name: String,
    pub value: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Compound {
    /// `None` is the universal selector.
    pub tag: Option<String>,
    pub id: Option<String>,
    pub classes: Vec<String>,
    pub attrs: Vec<AttrMatch>,
    pub nth_of_type: Option<usize>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Selector {
    compounds: Vec<Compound>,
    // combinators[i] joins compounds[i] and compounds[i + 1]
    combinators: Vec<Combinator>,
}

impl Selector {
    pub fn parse(input: &str) -> Result<Self, SelectorError> {
        Parser::new(input).parse_selector()
    }

    pub fn compounds(&self) -> &[Compound] {
        &self.compounds
    }

    pub fn matches<D>(&self, doc: &D, element: ElementRef) -> bool
    where
        D: DocumentPort + ?Sized,
    {
        self.matches_at(doc, element, self.compounds.len() - 1)
    }

    fn matches_at<D>(&self, doc: &D, element: ElementRef, idx: usize) -> bool
    where
        D: DocumentPort + ?Sized,
    {
        if !compound_matches(&self.compounds[idx], doc, element) {
            return false;
        }
        if idx == 0 {
            return true;
        }
        match self.combinators[idx - 1] {
            Combinator::Child => doc
                .parent(element)
                .map_or(false, |parent| self.matches_at(doc, parent, idx - 1)),
            Combinator::Descendant => {
                let mut current = doc.parent(element);
                while let Some(ancestor) = current {
                    if self.matches_at(doc, ancestor, idx - 1) {
                        return true;
                    }
                    current = doc.parent(ancestor);
                }
                false
            }
        }
    }

    /// Filter `elements` (expected in document order) down to the matches.
    pub fn select<D, I>(&self, doc: &D, elements: I) -> Vec<ElementRef>
    where
        D: DocumentPort + ?Sized,
        I: IntoIterator<Item = ElementRef>,
    {
        elements
            .into_iter()
            .filter(|el| self.matches(doc, *el))
            .collect()
    }
}

fn compound_matches<D>(compound: &Compound, doc: &D, element: ElementRef) -> bool
where
    D: DocumentPort + ?Sized,
{
    let Some(tag) = doc.tag_name(element) else {
        return false;
    };
    if let Some(expected) = &compound.tag {
        if *expected != tag {
            return false;
        }
    }
    if let Some(id) = &compound.id {
        if doc.attribute(element, "id").as_deref() != Some(id.as_str()) {
            return false;
        }
    }
    if !compound.classes.is_empty() {
        let class_attr = doc.attribute(element, "class").unwrap_or_default();
        let tokens: Vec<&str> = class_attr.split_whitespace().collect();
        if !compound.classes.iter().all(|c| tokens.contains(&c.as_str())) {
            return false;
        }
    }
    for attr in &compound.attrs {
        match (doc.attribute(element, &attr.name), &attr.value) {
            (None, _) => return false,
            (Some(actual), Some(expected)) if actual != *expected => return false,
            _ => {}
        }
    }
    if let Some(n) = compound.nth_of_type {
        let position = match doc.parent(element) {
            Some(parent) => doc
                .children(parent)
                .into_iter()
                .filter(|sibling| doc.tag_name(*sibling).as_deref() == Some(tag.as_str()))
                .position(|sibling| sibling == element)
                .map(|idx| idx + 1),
            None => Some(1),
        };
        if position != Some(n) {
            return false;
        }
    }
    true
}

/// True when `value` can be written as a bare CSS identifier (no escaping needed).
pub fn is_identifier(value: &str) -> bool {
    if value.is_empty() || value.contains('\\') {
        return false;
    }
    let mut parser = Parser::new(value);
    parser.parse_ident().is_ok() && parser.at_end()
}

/// Double-quote an attribute value so it parses back to exactly `value`.
pub fn quote_attr_value(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for ch in value.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\a "),
            '\r' => out.push_str("\\d "),
            other => out.push(other),
        }
    }
    out.push('"');
    out
}

fn is_name_start(ch: char) -> bool {
    ch.is_ascii_alphabetic() || ch == '_' || !ch.is_ascii()
}

fn is_name_char(ch: char) -> bool {
    is_name_start(ch) || ch.is_ascii_digit() || ch == '-'
}

struct Parser {
    chars: Vec<char>,
    pos: usize,
}

impl Parser {
    fn new(input: &str) -> Self {
        Self {
            chars: input.chars().collect(),
            pos: 0,
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn at_end(&self) -> bool {
        self.pos >= self.chars.len()
    }

    fn skip_ws(&mut self) -> bool {
        let start = self.pos;
        while matches!(self.peek(), Some(c) if c.is_whitespace()) {
            self.pos += 1;
        }
        self.pos > start
    }

    fn expect(&mut self, expected: char) -> Result<(), SelectorError> {
        match self.peek() {
            Some(c) if c == expected => {
                self.pos += 1;
                Ok(())
            }
            Some(ch) => Err(SelectorError::UnexpectedChar {
                ch,
                offset: self.pos,
            }),
            None => Err(SelectorError::UnexpectedEnd),
        }
    }

    fn parse_selector(&mut self) -> Result<Selector, SelectorError> {
        self.skip_ws();
        if self.at_end() {
            return Err(SelectorError::Empty);
        }
        let mut compounds = vec![self.parse_compound()?];
        let mut combinators = Vec::new();
        loop {
            let had_ws = self.skip_ws();
            let Some(next) = self.peek() else {
                break;
            };
            let combinator = if next == '>' {
                self.pos += 1;
                self.skip_ws();
                Combinator::Child
            } else if had_ws {
                Combinator::Descendant
            } else {
                return Err(SelectorError::UnexpectedChar {
                    ch: next,
                    offset: self.pos,
                });
            };
            if self.at_end() {
                return Err(SelectorError::UnexpectedEnd);
            }
            combinators.push(combinator);
            compounds.push(self.parse_compound()?);
        }
        Ok(Selector {
            compounds,
            combinators,
        })
    }

    fn parse_compound(&mut self) -> Result<Compound, SelectorError> {
        let mut compound = Compound::default();
        let mut parts = 0usize;

        match self.peek() {
            Some('*') => {
                self.pos += 1;
                parts += 1;
            }
            Some(c) if is_name_start(c) || c == '-' || c == '\\' => {
                compound.tag = Some(self.parse_ident()?.to_ascii_lowercase());
                parts += 1;
            }
            _ => {}
        }

        loop {
            match self.peek() {
                Some('#') => {
                    self.pos += 1;
                    compound.id = Some(self.parse_ident()?);
                }
                Some('.') => {
                    self.pos += 1;
                    compound.classes.push(self.parse_ident()?);
                }
                Some('[') => {
                    self.pos += 1;
                    compound.attrs.push(self.parse_attr()?);
                }
                Some(':') => {
                    self.pos += 1;
                    compound.nth_of_type = Some(self.parse_pseudo()?);
                }
                _ => break,
            }
            parts += 1;
        }

        if parts == 0 {
            return Err(match self.peek() {
                Some(ch) => SelectorError::UnexpectedChar {
                    ch,
                    offset: self.pos,
                },
                None => SelectorError::UnexpectedEnd,
            });
        }
        Ok(compound)
    }

    fn parse_attr(&mut self) -> Result<AttrMatch, SelectorError> {
        self.skip_ws();
        let name = self.parse_ident()?.to_ascii_lowercase();
        self.skip_ws();
        let mut value = None;
        if self.peek() == Some('=') {
            self.pos += 1;
            self.skip_ws();
            value = Some(match self.peek() {
                Some('"') | Some('\'') => self.parse_string()?,
                _ => self.parse_ident()?,
            });
            self.skip_ws();
        }
        self.expect(']')?;
        Ok(AttrMatch { name, value })
    }

    fn parse_pseudo(&mut self) -> Result<usize, SelectorError> {
        let name = self.parse_ident()?.to_ascii_lowercase();
        if name != "nth-of-type" {
            return Err(SelectorError::UnsupportedPseudo(name));
        }
        self.expect('(')?;
        let mut arg = String::new();
        loop {
            match self.peek() {
                Some(')') => {
                    self.pos += 1;
                    break;
                }
                Some(c) => {
                    arg.push(c);
                    self.pos += 1;
                }
                None => return Err(SelectorError::UnexpectedEnd),
            }
        }
        match arg.trim().parse::<usize>() {
            Ok(n) if n > 0 => Ok(n),
            _ => Err(SelectorError::InvalidNth(arg)),
        }
    }

    fn parse_ident(&mut self) -> Result<String, SelectorError> {
        let start = self.pos;
        let mut out = String::new();
        if self.peek() == Some('-') {
            out.push('-');
            self.pos += 1;
            if self.peek() == Some('-') {
                out.push('-');
                self.pos += 1;
                self.ident_rest(&mut out)?;
                return Ok(out);
            }
        }
        match self.peek() {
            Some(c) if is_name_start(c) => {
                out.push(c);
                self.pos += 1;
            }
            Some('\\') => out.push(self.parse_escape()?),
            _ => return Err(SelectorError::InvalidIdentifier(start)),
        }
        self.ident_rest(&mut out)?;
        Ok(out)
    }

    fn ident_rest(&mut self, out: &mut String) -> Result<(), SelectorError> {
        loop {
            match self.peek() {
                Some(c) if is_name_char(c) => {
                    out.push(c);
                    self.pos += 1;
                }
                Some('\\') => out.push(self.parse_escape()?),
                _ => return Ok(()),
            }
        }
    }

    fn parse_escape(&mut self) -> Result<char, SelectorError> {
        // positioned on the backslash
        self.pos += 1;
        match self.peek() {
            None => Err(SelectorError::UnexpectedEnd),
            Some('\n') => Err(SelectorError::UnexpectedChar {
                ch: '\n',
                offset: self.pos,
            }),
            Some(c) if c.is_ascii_hexdigit() => {
                let mut hex = String::new();
                while hex.len() < 6 {
                    match self.peek() {
                        Some(h) if h.is_ascii_hexdigit() => {
                            hex.push(h);
                            self.pos += 1;
                        }
                        _ => break,
                    }
                }
                if matches!(self.peek(), Some(c) if c.is_whitespace()) {
                    self.pos += 1;
                }
                let code = u32::from_str_radix(&hex, 16).unwrap_or(0xFFFD);
                Ok(char::from_u32(code)
                    .filter(|c| *c != '\0')
                    .unwrap_or('\u{FFFD}'))
            }
            Some(c) => {
                self.pos += 1;
                Ok(c)
            }
        }
    }

    fn parse_string(&mut self) -> Result<String, SelectorError> {
        let start = self.pos;
        let quote = self.peek().ok_or(SelectorError::UnexpectedEnd)?;
        self.pos += 1;
        let mut out = String::new();
        loop {
            match self.peek() {
                None => return Err(SelectorError::UnterminatedString(start)),
                Some(c) if c == quote => {
                    self.pos += 1;
                    return Ok(out);
                }
                Some('\\') => {
                    if self.chars.get(self.pos + 1).is_none() {
                        return Err(SelectorError::UnterminatedString(start));
                    }
                    out.push(self.parse_escape()?);
                }
                Some(c) => {
                    out.push(c);
                    self.pos += 1;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_structural_path() {
        let sel = Selector::parse("body > div:nth-of-type(2) > span").unwrap();
        assert_eq!(sel.compounds().len(), 3);
        assert_eq!(sel.compounds()[1].nth_of_type, Some(2));
        assert_eq!(sel.compounds()[2].tag.as_deref(), Some("span"));
    }

    #[test]
    fn parses_attribute_with_escaped_quote() {
        let sel = Selector::parse(r#"button[aria-label="Say \"hi\""]"#).unwrap();
        let attr = &sel.compounds()[0].attrs[0];
        assert_eq!(attr.name, "aria-label");
        assert_eq!(attr.value.as_deref(), Some(r#"Say "hi""#));
    }

    #[test]
    fn rejects_malformed_class_tokens() {
        assert!(Selector::parse("div.w-1/2").is_err());
        assert!(Selector::parse("div.1col").is_err());
        assert!(Selector::parse("div.md:flex").is_err());
        assert_eq!(Selector::parse("   "), Err(SelectorError::Empty));
        assert!(matches!(
            Selector::parse("[data-x=\"open"),
            Err(SelectorError::UnterminatedString(_))
        ));
        assert!(matches!(
            Selector::parse("li:nth-of-type(0)"),
            Err(SelectorError::InvalidNth(_))
        ));
        assert!(matches!(
            Selector::parse("a:hover"),
            Err(SelectorError::UnsupportedPseudo(_))
        ));
    }

    #[test]
    fn identifier_check() {
        assert!(is_identifier("submit-btn"));
        assert!(is_identifier("_private"));
        assert!(is_identifier("--custom"));
        assert!(!is_identifier("1abc"));
        assert!(!is_identifier("-1abc"));
        assert!(!is_identifier("has space"));
        assert!(!is_identifier("a.b"));
        assert!(!is_identifier(""));
    }

    #[test]
    fn quoted_values_round_trip_through_parser() {
        let raw = "line one\nsays \"quote\" \\ done";
        let selector = format!("[title={}]", quote_attr_value(raw));
        let sel = Selector::parse(&selector).unwrap();
        assert_eq!(sel.compounds()[0].attrs[0].value.as_deref(), Some(raw));
    }
}
