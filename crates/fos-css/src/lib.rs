//! fOS CSS Selectors
//!
//! Selector parsing and matching against `fos-dom` trees.

mod parser;
mod query;
mod selectors;

pub use query::{match_count, query_selector, query_selector_all};
pub use selectors::{CompoundSelector, NthExpression, PseudoClass, Selector, SelectorComponent};

/// Parse a selector
pub fn parse_selector(text: &str) -> Result<Selector, SelectorError> {
    Selector::parse(text)
}

/// Selector parsing error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectorError {
    #[error("Empty selector")]
    Empty,

    #[error("Unexpected {ch:?} at offset {offset}")]
    UnexpectedChar { ch: char, offset: usize },

    #[error("Expected a name at offset {offset}")]
    ExpectedName { offset: usize },

    #[error("Unterminated argument for :{name}")]
    Unterminated { name: String },

    #[error("Unsupported pseudo-class :{0}")]
    UnknownPseudoClass(String),

    #[error("Invalid nth expression {0:?}")]
    InvalidNth(String),
}
