//! Conversion from the `gherkin` AST into the document model.

use super::{
    Background, Child, Document, DocumentError, Scenario, ScenarioOutline, Step, Table, Tag,
};

impl Document {
    /// Build a document from a parsed `gherkin` feature.
    ///
    /// The parser keeps backgrounds, scenarios, and rules in separate lists;
    /// children are merged back into source order using their byte spans.
    /// `Rule` blocks become [`Child::Unknown`].
    ///
    /// # Errors
    ///
    /// Returns a [`DocumentError`] when a table has no rows or a tag is empty.
    pub fn from_feature(feature: &gherkin::Feature) -> Result<Self, DocumentError> {
        let mut positioned: Vec<(usize, Child)> = Vec::new();

        if let Some(background) = feature.background.as_ref() {
            positioned.push((background.span.start, convert_background(background)?));
        }
        for scenario in &feature.scenarios {
            positioned.push((scenario.span.start, convert_scenario(scenario)?));
        }
        for rule in &feature.rules {
            positioned.push((rule.span.start, Child::Unknown));
        }
        positioned.sort_by_key(|(start, _)| *start);

        Ok(Self {
            tags: convert_tags(&feature.tags)?,
            title: feature.name.clone(),
            children: positioned.into_iter().map(|(_, child)| child).collect(),
        })
    }
}

fn convert_tags(tags: &[String]) -> Result<Vec<Tag>, DocumentError> {
    tags.iter().map(Tag::new).collect()
}

fn display_keyword(keyword: &str) -> Option<String> {
    let trimmed = keyword.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_owned())
}

/// Return `true` when the parser reported a Scenario Outline (or Template).
///
/// A scenario carrying Examples counts as an outline regardless of keyword.
fn is_scenario_outline(scenario: &gherkin::Scenario) -> bool {
    let keyword = scenario.keyword.trim();
    keyword.eq_ignore_ascii_case("Scenario Outline")
        || keyword.eq_ignore_ascii_case("Scenario Template")
        || !scenario.examples.is_empty()
}

fn convert_background(background: &gherkin::Background) -> Result<Child, DocumentError> {
    Ok(Child::Background(Background {
        keyword: display_keyword(&background.keyword),
        name: background.name.clone(),
        steps: convert_steps(&background.steps)?,
    }))
}

fn convert_scenario(scenario: &gherkin::Scenario) -> Result<Child, DocumentError> {
    let keyword = display_keyword(&scenario.keyword);
    let name = scenario.name.clone();
    let tags = convert_tags(&scenario.tags)?;
    let steps = convert_steps(&scenario.steps)?;

    if !is_scenario_outline(scenario) {
        return Ok(Child::Scenario(Scenario {
            keyword,
            name,
            tags,
            steps,
        }));
    }

    let context = format!("examples of '{}'", scenario.name);
    let examples = scenario
        .examples
        .iter()
        .filter_map(|ex| ex.table.as_ref())
        .map(|table| Table::from_rows(table.rows.clone(), &context))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Child::ScenarioOutline(ScenarioOutline {
        keyword,
        name,
        tags,
        steps,
        examples,
    }))
}

fn convert_steps(steps: &[gherkin::Step]) -> Result<Vec<Step>, DocumentError> {
    steps.iter().map(convert_step).collect()
}

fn convert_step(step: &gherkin::Step) -> Result<Step, DocumentError> {
    let argument = step
        .table
        .as_ref()
        .map(|table| Table::from_rows(table.rows.clone(), &format!("step '{}'", step.value)))
        .transpose()?;
    Ok(Step {
        keyword: step.keyword.clone(),
        text: step.value.clone(),
        argument,
    })
}
