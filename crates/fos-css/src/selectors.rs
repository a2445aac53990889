//! CSS Selectors
//!
//! Compound selectors joined by the descendant combinator, with the
//! tree-structural pseudo-classes, matched against a `DomTree`.

use fos_dom::{DomTree, ElementData, NodeId};
use std::fmt;

use crate::SelectorError;

/// Tree-structural pseudo-class
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PseudoClass {
    FirstChild,
    LastChild,
    OnlyChild,
    NthChild(NthExpression),
    NthLastChild(NthExpression),
}

impl PseudoClass {
    /// Build from a name and optional parenthesized argument
    pub fn parse(name: &str, arg: Option<&str>) -> Result<Self, SelectorError> {
        let unknown = || SelectorError::UnknownPseudoClass(name.to_string());
        match (name, arg) {
            ("first-child", None) => Ok(Self::FirstChild),
            ("last-child", None) => Ok(Self::LastChild),
            ("only-child", None) => Ok(Self::OnlyChild),
            ("nth-child", Some(arg)) => NthExpression::parse(arg)
                .map(Self::NthChild)
                .ok_or_else(|| SelectorError::InvalidNth(arg.to_string())),
            ("nth-last-child", Some(arg)) => NthExpression::parse(arg)
                .map(Self::NthLastChild)
                .ok_or_else(|| SelectorError::InvalidNth(arg.to_string())),
            _ => Err(unknown()),
        }
    }

    fn matches(&self, tree: &DomTree, node: NodeId) -> bool {
        match self {
            Self::FirstChild => tree.previous_element_sibling(node).is_none(),
            Self::LastChild => tree.next_element_sibling(node).is_none(),
            Self::OnlyChild => {
                tree.previous_element_sibling(node).is_none()
                    && tree.next_element_sibling(node).is_none()
            }
            Self::NthChild(expr) => expr.matches(tree.element_index(node) as i32),
            Self::NthLastChild(expr) => {
                let following =
                    std::iter::successors(tree.next_element_sibling(node), |&n| {
                        tree.next_element_sibling(n)
                    })
                    .count();
                expr.matches(following as i32 + 1)
            }
        }
    }
}

impl fmt::Display for PseudoClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FirstChild => f.write_str(":first-child"),
            Self::LastChild => f.write_str(":last-child"),
            Self::OnlyChild => f.write_str(":only-child"),
            Self::NthChild(expr) => write!(f, ":nth-child({expr})"),
            Self::NthLastChild(expr) => write!(f, ":nth-last-child({expr})"),
        }
    }
}

/// An+B expression for :nth-* selectors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NthExpression {
    /// Coefficient (A in An+B)
    pub a: i32,
    /// Offset (B in An+B)
    pub b: i32,
}

impl NthExpression {
    /// "odd" (2n+1)
    pub fn odd() -> Self {
        Self { a: 2, b: 1 }
    }

    /// "even" (2n)
    pub fn even() -> Self {
        Self { a: 2, b: 0 }
    }

    /// A plain 1-based index
    pub fn index(n: i32) -> Self {
        Self { a: 0, b: n }
    }

    pub fn new(a: i32, b: i32) -> Self {
        Self { a, b }
    }

    /// Parse "2n+1", "odd", "even", "3", "-n+3"
    pub fn parse(s: &str) -> Option<Self> {
        let s: String = s
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>()
            .to_ascii_lowercase();

        match s.as_str() {
            "odd" => return Some(Self::odd()),
            "even" => return Some(Self::even()),
            "" => return None,
            _ => {}
        }

        if let Ok(n) = s.parse::<i32>() {
            return Some(Self::index(n));
        }

        let (a_str, rest) = s.split_once('n')?;
        let a = match a_str {
            "" | "+" => 1,
            "-" => -1,
            _ => a_str.parse().ok()?,
        };
        let b = if rest.is_empty() {
            0
        } else if rest.starts_with(['+', '-']) {
            rest.parse().ok()?
        } else {
            return None;
        };
        Some(Self::new(a, b))
    }

    /// Check if 1-based index `n` matches
    pub fn matches(&self, n: i32) -> bool {
        if self.a == 0 {
            return n == self.b;
        }

        let diff = i64::from(n) - i64::from(self.b);
        let a = i64::from(self.a);
        if a > 0 {
            diff >= 0 && diff % a == 0
        } else {
            diff <= 0 && diff % a == 0
        }
    }
}

impl fmt::Display for NthExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.a, self.b) {
            (0, b) => write!(f, "{b}"),
            (a, 0) => write!(f, "{a}n"),
            (a, b) if b > 0 => write!(f, "{a}n+{b}"),
            (a, b) => write!(f, "{a}n{b}"),
        }
    }
}

/// A simple selector inside a compound
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectorComponent {
    /// Universal selector *
    Universal,
    /// Type selector (lowercase tag name)
    Type(String),
    /// ID selector #id
    Id(String),
    /// Class selector .class
    Class(String),
    /// Pseudo-class :nth-child() and friends
    PseudoClass(PseudoClass),
}

impl SelectorComponent {
    fn matches(&self, tree: &DomTree, node: NodeId, element: &ElementData) -> bool {
        match self {
            Self::Universal => true,
            Self::Type(tag) => element.local_name.eq_ignore_ascii_case(tag),
            Self::Id(id) => element.id() == Some(id.as_str()),
            Self::Class(class) => element.class_list.contains(class),
            Self::PseudoClass(pseudo) => pseudo.matches(tree, node),
        }
    }
}

impl fmt::Display for SelectorComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Universal => f.write_str("*"),
            Self::Type(tag) => f.write_str(tag),
            Self::Id(id) => write!(f, "#{id}"),
            Self::Class(class) => write!(f, ".{class}"),
            Self::PseudoClass(pseudo) => write!(f, "{pseudo}"),
        }
    }
}

/// Sequence of simple selectors with no combinator between them
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompoundSelector {
    pub components: Vec<SelectorComponent>,
}

impl CompoundSelector {
    /// Check a single element against every component
    pub fn matches(&self, tree: &DomTree, node: NodeId) -> bool {
        let Some(element) = tree.element(node) else {
            return false;
        };
        self.components
            .iter()
            .all(|c| c.matches(tree, node, element))
    }
}

impl fmt::Display for CompoundSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.components.iter().try_for_each(|c| write!(f, "{c}"))
    }
}

/// Complex selector: compounds separated by descendant combinators,
/// outermost first
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    pub compounds: Vec<CompoundSelector>,
}

impl Selector {
    /// Parse selector text
    pub fn parse(text: &str) -> Result<Self, SelectorError> {
        crate::parser::parse_selector(text)
    }

    /// Check whether `node` matches, right to left
    pub fn matches(&self, tree: &DomTree, node: NodeId) -> bool {
        match self.compounds.split_last() {
            Some((subject, ancestors)) => {
                subject.matches(tree, node) && Self::match_ancestors(tree, node, ancestors)
            }
            None => false,
        }
    }

    /// Descendant combinators only: binding each compound to the nearest
    /// matching ancestor never rules out a match, so one outward walk is
    /// enough.
    fn match_ancestors(tree: &DomTree, node: NodeId, compounds: &[CompoundSelector]) -> bool {
        let mut pending = compounds.iter().rev().peekable();
        for ancestor in tree.ancestors(node) {
            let Some(compound) = pending.peek() else {
                break;
            };
            if compound.matches(tree, ancestor) {
                pending.next();
            }
        }
        pending.peek().is_none()
    }

    /// Attached elements matching this selector, in tree order
    pub fn query_all<'a>(&'a self, tree: &'a DomTree) -> impl Iterator<Item = NodeId> + 'a {
        tree.descendants(tree.root())
            .filter(move |&node| self.matches(tree, node))
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, compound) in self.compounds.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{compound}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nth_expression_odd() {
        let expr = NthExpression::odd();
        assert!(expr.matches(1));
        assert!(!expr.matches(2));
        assert!(expr.matches(3));
        assert!(!expr.matches(4));
    }

    #[test]
    fn test_nth_expression_even() {
        let expr = NthExpression::even();
        assert!(!expr.matches(1));
        assert!(expr.matches(2));
        assert!(expr.matches(4));
    }

    #[test]
    fn test_nth_expression_parse() {
        assert_eq!(NthExpression::parse("odd"), Some(NthExpression::odd()));
        assert_eq!(NthExpression::parse(" EVEN "), Some(NthExpression::even()));
        assert_eq!(NthExpression::parse("3"), Some(NthExpression::index(3)));
        assert_eq!(NthExpression::parse("2n"), Some(NthExpression::new(2, 0)));
        assert_eq!(NthExpression::parse("2n + 1"), Some(NthExpression::new(2, 1)));
        assert_eq!(NthExpression::parse("-n+3"), Some(NthExpression::new(-1, 3)));
        assert_eq!(NthExpression::parse("n"), Some(NthExpression::new(1, 0)));
        assert_eq!(NthExpression::parse("2n3"), None);
        assert_eq!(NthExpression::parse(""), None);
    }

    #[test]
    fn test_nth_expression_negative_a() {
        let expr = NthExpression::new(-1, 3);
        assert!(expr.matches(1));
        assert!(expr.matches(3));
        assert!(!expr.matches(4));
    }

    #[test]
    fn test_nth_expression_extreme_offsets() {
        let expr = NthExpression::parse("n-2147483648").unwrap();
        assert!(expr.matches(1));
        assert!(expr.matches(i32::MAX));

        let expr = NthExpression::new(-1, i32::MAX);
        assert!(expr.matches(1));
        assert!(expr.matches(i32::MAX));
        assert!(!NthExpression::new(2, i32::MIN).matches(i32::MAX));
    }

    #[test]
    fn test_nth_expression_display() {
        assert_eq!(NthExpression::index(2).to_string(), "2");
        assert_eq!(NthExpression::new(2, 0).to_string(), "2n");
        assert_eq!(NthExpression::new(2, 1).to_string(), "2n+1");
        assert_eq!(NthExpression::new(-1, -2).to_string(), "-1n-2");
    }

    #[test]
    fn test_pseudo_class_parse() {
        assert_eq!(PseudoClass::parse("first-child", None), Ok(PseudoClass::FirstChild));
        assert_eq!(
            PseudoClass::parse("nth-child", Some("2")),
            Ok(PseudoClass::NthChild(NthExpression::index(2)))
        );
        assert!(matches!(
            PseudoClass::parse("hover", None),
            Err(SelectorError::UnknownPseudoClass(_))
        ));
        assert!(matches!(
            PseudoClass::parse("nth-child", Some("x")),
            Err(SelectorError::InvalidNth(_))
        ));
    }
}
