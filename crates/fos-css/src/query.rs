//! Document queries (`querySelector`, `querySelectorAll`)

use fos_dom::{Document, NodeId};

use crate::{Selector, SelectorError};

/// All attached elements matching `selector`, in tree order
pub fn query_selector_all(document: &Document, selector: &str) -> Result<Vec<NodeId>, SelectorError> {
    let selector = Selector::parse(selector)?;
    Ok(selector.query_all(document.tree()).collect())
}

/// First attached element matching `selector`
pub fn query_selector(document: &Document, selector: &str) -> Result<Option<NodeId>, SelectorError> {
    let selector = Selector::parse(selector)?;
    Ok(selector.query_all(document.tree()).next())
}

/// Number of attached elements matching `selector`
pub fn match_count(document: &Document, selector: &str) -> Result<usize, SelectorError> {
    let selector = Selector::parse(selector)?;
    Ok(selector.query_all(document.tree()).count())
}
