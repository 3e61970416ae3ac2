//! Immutable document model consumed by the renderer and partitioner.
//!
//! A [`Document`] is built from the `gherkin` parser's AST (see
//! [`Document::from_feature`]) and is never mutated afterwards. Children are
//! modelled as a closed union so every selection by kind is an exhaustive
//! match; constructs the slicer does not reproduce surface as
//! [`Child::Unknown`] and are skipped wherever children are selected.

mod convert;

/// The tag that keeps every scenario of a feature in a single output unit.
pub const NOSPLIT_TAG: &str = "@nosplit";

/// A Gherkin tag, always stored with its leading `@` marker.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Tag(String);

impl Tag {
    /// Create a tag from a name with or without the leading `@`.
    ///
    /// Surrounding whitespace is trimmed; casing is preserved.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError::EmptyTag`] when nothing remains after the
    /// marker is removed.
    pub fn new(name: impl AsRef<str>) -> Result<Self, DocumentError> {
        let trimmed = name.as_ref().trim();
        let bare = trimmed.strip_prefix('@').unwrap_or(trimmed);
        if bare.is_empty() {
            return Err(DocumentError::EmptyTag);
        }
        Ok(Self(format!("@{bare}")))
    }

    /// The tag name including its `@` marker, exactly as rendered.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The lower-cased name without its marker, used to route output files.
    #[must_use]
    pub fn routing_key(&self) -> String {
        self.0
            .strip_prefix('@')
            .unwrap_or(&self.0)
            .to_lowercase()
    }

    /// Return `true` when this is the `@nosplit` override, ignoring case.
    #[must_use]
    pub fn is_nosplit(&self) -> bool {
        self.0.eq_ignore_ascii_case(NOSPLIT_TAG)
    }
}

/// A table of plain string cells: one header row followed by body rows.
///
/// Used both for step data tables and for scenario outline Examples.
/// Row lengths are not checked against the header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    /// Cells of the first row.
    pub header: Vec<String>,
    /// Remaining rows in source order.
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// Split parsed rows into a header row and body rows.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError::MissingHeaderRow`] when `rows` is empty.
    pub fn from_rows(rows: Vec<Vec<String>>, context: &str) -> Result<Self, DocumentError> {
        let mut rows = rows.into_iter();
        let header = rows
            .next()
            .ok_or_else(|| DocumentError::MissingHeaderRow(context.to_owned()))?;
        Ok(Self {
            header,
            rows: rows.collect(),
        })
    }
}

/// A single step line with its optional data table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    /// Keyword as written in the source, e.g. `Given` or `And`.
    pub keyword: String,
    /// Text following the keyword.
    pub text: String,
    /// Data table attached to the step.
    pub argument: Option<Table>,
}

/// Steps shared by every feature before each scenario.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Background {
    /// Display keyword; `None` falls back to `Background`.
    pub keyword: Option<String>,
    /// Background name, often empty.
    pub name: String,
    /// Steps in source order.
    pub steps: Vec<Step>,
}

/// A plain scenario.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scenario {
    /// Display keyword; `None` falls back to `Scenario`.
    pub keyword: Option<String>,
    /// Scenario name.
    pub name: String,
    /// Scenario-level tags.
    pub tags: Vec<Tag>,
    /// Steps in source order.
    pub steps: Vec<Step>,
}

/// A scenario outline and its Examples tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScenarioOutline {
    /// Display keyword; `None` falls back to `ScenarioOutline`.
    pub keyword: Option<String>,
    /// Outline name.
    pub name: String,
    /// Outline-level tags.
    pub tags: Vec<Tag>,
    /// Steps in source order, usually containing `<placeholders>`.
    pub steps: Vec<Step>,
    /// Examples tables in source order.
    pub examples: Vec<Table>,
}

/// Discriminant of a [`Child`], also the fallback display keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChildKind {
    /// A `Background` block.
    Background,
    /// A `Scenario` block.
    Scenario,
    /// A `Scenario Outline` block.
    ScenarioOutline,
    /// Anything the slicer does not reproduce.
    Unknown,
}

impl ChildKind {
    /// The variant name used when a child has no explicit keyword.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Background => "Background",
            Self::Scenario => "Scenario",
            Self::ScenarioOutline => "ScenarioOutline",
            Self::Unknown => "Unknown",
        }
    }
}

/// A top-level child of a feature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Child {
    /// Background steps inherited by every output unit.
    Background(Background),
    /// A plain scenario.
    Scenario(Scenario),
    /// A scenario outline with Examples.
    ScenarioOutline(ScenarioOutline),
    /// A construct outside the reproduced model, such as a `Rule` block.
    Unknown,
}

impl Child {
    /// The child's discriminant.
    #[must_use]
    pub fn kind(&self) -> ChildKind {
        match self {
            Self::Background(_) => ChildKind::Background,
            Self::Scenario(_) => ChildKind::Scenario,
            Self::ScenarioOutline(_) => ChildKind::ScenarioOutline,
            Self::Unknown => ChildKind::Unknown,
        }
    }

    /// Return `true` for scenarios and scenario outlines.
    #[must_use]
    pub fn is_scenario_like(&self) -> bool {
        matches!(self, Self::Scenario(_) | Self::ScenarioOutline(_))
    }
}

/// A parsed feature file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// Feature-level tags in source order.
    pub tags: Vec<Tag>,
    /// Feature title.
    pub title: String,
    /// Children in source order.
    pub children: Vec<Child>,
}

impl Document {
    /// Children of the given kind, in document order.
    ///
    /// Selecting [`ChildKind::Unknown`] yields nothing: unknown children are
    /// never reproduced.
    pub fn children_of_kind(&self, kind: ChildKind) -> impl Iterator<Item = &Child> {
        self.children
            .iter()
            .filter(move |child| kind != ChildKind::Unknown && child.kind() == kind)
    }

    /// Number of [`Child::Unknown`] children, which produce no output.
    #[must_use]
    pub fn unknown_children(&self) -> usize {
        self.children
            .iter()
            .filter(|child| matches!(child, Child::Unknown))
            .count()
    }

    /// Return `true` when any feature tag is `@nosplit`, ignoring case.
    #[must_use]
    pub fn is_nosplit(&self) -> bool {
        self.tags.iter().any(Tag::is_nosplit)
    }

    /// Routing sub-directory for this document's output, from its first tag.
    #[must_use]
    pub fn route(&self) -> Option<String> {
        self.tags.first().map(Tag::routing_key)
    }
}

/// Errors raised when the parser's AST does not fit the document model.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DocumentError {
    /// A table had no rows, so no header could be taken from it.
    #[error("table in {0} has no header row")]
    MissingHeaderRow(String),
    /// A tag consisted of the `@` marker alone.
    #[error("tag name is empty")]
    EmptyTag,
}

#[cfg(test)]
mod tests;
