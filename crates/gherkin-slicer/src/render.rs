//! Rendering of document nodes back into `.feature` text.
//!
//! Every function here is pure: the same input always produces the same
//! bytes. The layout is fixed:
//!
//! - tag lines are the tag names joined by single spaces;
//! - step lines are indented two spaces, step data table rows likewise;
//! - Examples table rows are indented a single space;
//! - every child block is followed by exactly one blank line.

use crate::document::{Child, ChildKind, Document, Step, Table, Tag};

/// Render a tag line, or nothing when there are no tags.
///
/// ```
/// use gherkin_slicer::document::Tag;
/// use gherkin_slicer::render::render_tags;
///
/// # fn main() -> Result<(), gherkin_slicer::document::DocumentError> {
/// let tags = [Tag::new("@core")?, Tag::new("@nosplit")?];
/// assert_eq!(render_tags(&tags), "@core @nosplit\n");
/// assert_eq!(render_tags(&[]), "");
/// # Ok(())
/// # }
/// ```
#[must_use]
pub fn render_tags(tags: &[Tag]) -> String {
    if tags.is_empty() {
        return String::new();
    }
    let names: Vec<&str> = tags.iter().map(Tag::as_str).collect();
    format!("{}\n", names.join(" "))
}

/// Render a step data table: every row indented two spaces.
#[must_use]
pub fn render_step_table(table: &Table) -> String {
    let mut out = String::new();
    for row in std::iter::once(&table.header).chain(&table.rows) {
        out.push_str("  | ");
        out.push_str(&row.join(" | "));
        out.push_str(" |\n");
    }
    out
}

/// Render a scenario outline Examples table: every row indented one space.
#[must_use]
pub fn render_examples_table(table: &Table) -> String {
    let mut out = String::new();
    for row in std::iter::once(&table.header).chain(&table.rows) {
        out.push_str(" | ");
        out.push_str(&row.join(" | "));
        out.push_str(" |\n");
    }
    out
}

fn render_steps(out: &mut String, steps: &[Step]) {
    for step in steps {
        out.push_str("  ");
        out.push_str(step.keyword.trim());
        out.push(' ');
        out.push_str(step.text.trim());
        out.push('\n');
        if let Some(table) = step.argument.as_ref() {
            out.push_str(&render_step_table(table));
        }
    }
}

fn render_title(out: &mut String, keyword: Option<&str>, kind: ChildKind, name: &str) {
    let fallback = kind.as_str();
    out.push_str(keyword.unwrap_or(fallback));
    out.push_str(": ");
    out.push_str(name);
    out.push('\n');
}

fn render_child(out: &mut String, child: &Child) {
    let kind = child.kind();
    match child {
        Child::Background(background) => {
            render_title(out, background.keyword.as_deref(), kind, &background.name);
            render_steps(out, &background.steps);
        }
        Child::Scenario(scenario) => {
            out.push_str(&render_tags(&scenario.tags));
            render_title(out, scenario.keyword.as_deref(), kind, &scenario.name);
            render_steps(out, &scenario.steps);
        }
        Child::ScenarioOutline(outline) => {
            out.push_str(&render_tags(&outline.tags));
            render_title(out, outline.keyword.as_deref(), kind, &outline.name);
            render_steps(out, &outline.steps);
            for table in &outline.examples {
                out.push_str("Examples:\n");
                out.push_str(&render_examples_table(table));
            }
        }
        Child::Unknown => return,
    }
    out.push('\n');
}

/// Render children in the order given, each followed by a blank line.
///
/// Accepts any subset of a document's children; [`Child::Unknown`] entries
/// produce no output.
pub fn render_children<'a, I>(children: I) -> String
where
    I: IntoIterator<Item = &'a Child>,
{
    let mut out = String::new();
    for child in children {
        render_child(&mut out, child);
    }
    out
}

/// Render the part of a document prefixed to every output unit.
///
/// This is the feature tag line (if any), the `Feature:` line followed by a
/// blank line, and every Background block.
#[must_use]
pub fn render_feature_header(document: &Document) -> String {
    let mut out = render_tags(&document.tags);
    out.push_str("Feature: ");
    out.push_str(&document.title);
    out.push_str("\n\n");
    out.push_str(&render_children(
        document.children_of_kind(ChildKind::Background),
    ));
    out
}
