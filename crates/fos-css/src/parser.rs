//! Selector text parser
//!
//! Grammar: compounds separated by whitespace. A compound is an optional
//! type or `*`, then any run of `#id`, `.class` and `:pseudo(arg)`.

use crate::selectors::{CompoundSelector, PseudoClass, Selector, SelectorComponent};
use crate::SelectorError;

struct Cursor<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    /// Skip whitespace, reporting whether any was consumed
    fn skip_whitespace(&mut self) -> bool {
        let start = self.pos;
        while self.peek().is_some_and(char::is_whitespace) {
            self.bump();
        }
        self.pos > start
    }

    fn take_while(&mut self, pred: impl Fn(char) -> bool) -> &'a str {
        let start = self.pos;
        while self.peek().is_some_and(&pred) {
            self.bump();
        }
        &self.input[start..self.pos]
    }

    fn name(&mut self) -> Result<&'a str, SelectorError> {
        let offset = self.pos;
        let name = self.take_while(is_name_char);
        if name.is_empty() {
            return Err(SelectorError::ExpectedName { offset });
        }
        Ok(name)
    }
}

fn is_name_char(c: char) -> bool {
    c.is_alphanumeric() || c == '-' || c == '_' || !c.is_ascii()
}

/// Parse a full selector
pub(crate) fn parse_selector(text: &str) -> Result<Selector, SelectorError> {
    let mut cursor = Cursor::new(text);
    cursor.skip_whitespace();
    if cursor.peek().is_none() {
        return Err(SelectorError::Empty);
    }

    let mut compounds = Vec::new();
    loop {
        compounds.push(parse_compound(&mut cursor)?);
        let separated = cursor.skip_whitespace();
        match cursor.peek() {
            None => break,
            Some(_) if separated => continue,
            Some(ch) => {
                return Err(SelectorError::UnexpectedChar {
                    ch,
                    offset: cursor.pos,
                });
            }
        }
    }

    tracing::trace!("parsed selector {:?} into {} compounds", text, compounds.len());
    Ok(Selector { compounds })
}

fn parse_compound(cursor: &mut Cursor<'_>) -> Result<CompoundSelector, SelectorError> {
    let mut components = Vec::new();

    match cursor.peek() {
        Some('*') => {
            cursor.bump();
            components.push(SelectorComponent::Universal);
        }
        Some(c) if is_name_char(c) => {
            let tag = cursor.name()?;
            components.push(SelectorComponent::Type(tag.to_ascii_lowercase()));
        }
        _ => {}
    }

    loop {
        match cursor.peek() {
            Some('#') => {
                cursor.bump();
                components.push(SelectorComponent::Id(cursor.name()?.to_string()));
            }
            Some('.') => {
                cursor.bump();
                components.push(SelectorComponent::Class(cursor.name()?.to_string()));
            }
            Some(':') => {
                cursor.bump();
                let name = cursor.name()?.to_ascii_lowercase();
                let arg = if cursor.peek() == Some('(') {
                    cursor.bump();
                    let arg = cursor.take_while(|c| c != ')');
                    if cursor.bump() != Some(')') {
                        return Err(SelectorError::Unterminated { name });
                    }
                    Some(arg)
                } else {
                    None
                };
                components.push(SelectorComponent::PseudoClass(PseudoClass::parse(&name, arg)?));
            }
            _ => break,
        }
    }

    if components.is_empty() {
        return Err(match cursor.peek() {
            Some(ch) => SelectorError::UnexpectedChar {
                ch,
                offset: cursor.pos,
            },
            None => SelectorError::Empty,
        });
    }
    Ok(CompoundSelector { components })
}
