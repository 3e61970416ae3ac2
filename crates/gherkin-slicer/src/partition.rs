//! Grouping of a document's scenarios into output units.
//!
//! Every unit starts with the same feature header (tags, title, and
//! backgrounds). By default each scenario becomes its own unit, plain
//! scenarios first and outlines after them. A feature tagged `@nosplit`
//! produces a single unit holding every scenario in source order. Documents
//! without scenarios produce no units at all.

use crate::document::{Child, ChildKind, Document};
use crate::render::{render_children, render_feature_header};

/// Scenario children selected for output, in the order they are emitted.
///
/// Without the override, all scenarios come before all outlines. With it,
/// scenarios and outlines keep their document order.
#[must_use]
pub fn select_scenarios(document: &Document) -> Vec<&Child> {
    if document.is_nosplit() {
        return document
            .children
            .iter()
            .filter(|child| child.is_scenario_like())
            .collect();
    }
    document
        .children_of_kind(ChildKind::Scenario)
        .chain(document.children_of_kind(ChildKind::ScenarioOutline))
        .collect()
}

/// Render the output units for a document.
///
/// ```
/// use gherkin_slicer::document::Document;
/// use gherkin_slicer::partition::partition;
///
/// let document = Document {
///     tags: Vec::new(),
///     title: "Empty".into(),
///     children: Vec::new(),
/// };
/// assert!(partition(&document).is_empty());
/// ```
#[must_use]
pub fn partition(document: &Document) -> Vec<String> {
    let selection = select_scenarios(document);
    if selection.is_empty() {
        return Vec::new();
    }

    let header = render_feature_header(document);
    if document.is_nosplit() {
        return vec![format!("{header}{}", render_children(selection))];
    }
    selection
        .into_iter()
        .map(|child| format!("{header}{}", render_children([child])))
        .collect()
}
