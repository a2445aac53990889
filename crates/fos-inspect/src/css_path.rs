//! CSS path synthesis
//!
//! Builds a selector for an element by walking from it toward the root
//! and describing each ancestor by tag, id and classes. The walk stops
//! at the first element with an id unless a full path is requested.
//! With `use_nth_child`, segments that do not select uniquely get an
//! `:nth-child(k)` suffix.

use std::fmt::{self, Write};

use serde::{Deserialize, Serialize};

use crate::InspectHost;

/// Options controlling selector synthesis
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CssPathOptions {
    /// Keep walking past id-bearing ancestors up to the root
    pub full_path: bool,
    /// Disambiguate vague or ambiguous segments with `:nth-child(k)`
    pub use_nth_child: bool,
}

impl CssPathOptions {
    pub const fn new(full_path: bool, use_nth_child: bool) -> Self {
        Self { full_path, use_nth_child }
    }
}

/// One element's contribution to a selector path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment<N> {
    pub node: N,
    pub tag: String,
    pub id: Option<String>,
    pub classes: Vec<String>,
}

impl<N: Copy> Segment<N> {
    /// Describe `node`. Returns `None` for non-element nodes.
    pub fn read<H: InspectHost<Node = N>>(host: &H, node: N) -> Option<Self> {
        let tag = host.tag_name(node)?.to_ascii_lowercase();
        let id = host
            .id(node)
            .filter(|id| !id.is_empty())
            .map(str::to_string);
        let classes = host
            .class_name(node)
            .map(|class| class.split_whitespace().map(str::to_string).collect())
            .unwrap_or_default();

        Some(Self { node, tag, id, classes })
    }

    /// Segment carries an id
    pub fn is_anchored(&self) -> bool {
        self.id.is_some()
    }

    /// Neither id nor classes
    pub fn is_vague(&self) -> bool {
        self.id.is_none() && self.classes.is_empty()
    }

    /// A bare `html` or `body` segment is unique by construction
    fn is_bare_root(&self) -> bool {
        self.is_vague() && matches!(self.tag.as_str(), "html" | "body")
    }
}

impl<N> fmt::Display for Segment<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.tag)?;
        if let Some(id) = &self.id {
            write!(f, "#{id}")?;
        }
        for class in &self.classes {
            write!(f, ".{class}")?;
        }
        Ok(())
    }
}

/// Segments from the outermost ancestor down to the target element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorPath<N> {
    segments: Vec<Segment<N>>,
}

impl<N: Copy + Eq + fmt::Debug> SelectorPath<N> {
    /// Walk from `element` toward the root. Returns `None` if `element`
    /// is not an element.
    pub fn collect<H: InspectHost<Node = N>>(host: &H, element: N, options: CssPathOptions) -> Option<Self> {
        let mut segments = Vec::new();
        let mut current = Some(element);

        while let Some(node) = current {
            let Some(segment) = Segment::read(host, node) else {
                break;
            };
            let anchored = segment.is_anchored();
            tracing::trace!("segment {:?}: {}", node, segment);
            segments.push(segment);

            if anchored && !options.full_path {
                break;
            }
            current = host.parent_element(node);
        }

        if segments.is_empty() {
            return None;
        }
        segments.reverse();
        Some(Self { segments })
    }

    pub fn segments(&self) -> &[Segment<N>] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Join the segments with single spaces, appending `:nth-child(k)`
    /// where the options ask for it. Segments with an id and bare `html`
    /// or `body` never get a suffix. Ambiguity is measured against the
    /// text emitted so far, earlier suffixes included.
    pub fn render<H: InspectHost<Node = N>>(&self, host: &H, options: CssPathOptions) -> String {
        let mut out = String::new();

        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                out.push(' ');
            }
            write!(out, "{segment}").ok();

            if !options.use_nth_child || segment.is_anchored() || segment.is_bare_root() {
                continue;
            }

            let needs_index = segment.is_vague() || {
                let matches = host.match_count(out.trim());
                tracing::trace!("{:?} matches {} elements", out.trim(), matches);
                matches > 1
            };
            if needs_index {
                write!(out, ":nth-child({})", element_index(host, segment.node)).ok();
            }
        }

        out.trim().to_string()
    }
}

/// 1-based position of `node` among its parent's element children
pub fn element_index<H: InspectHost>(host: &H, node: H::Node) -> usize {
    std::iter::successors(host.previous_element_sibling(node), |&prev| {
        host.previous_element_sibling(prev)
    })
    .count()
        + 1
}

/// Synthesize a selector for `element`.
///
/// Returns an empty string when no element is given or the node is not
/// an element.
pub fn css_path<H: InspectHost>(host: &H, element: Option<H::Node>, options: CssPathOptions) -> String {
    let Some(element) = element else {
        return String::new();
    };

    SelectorPath::collect(host, element, options)
        .map(|path| path.render(host, options))
        .unwrap_or_default()
}
