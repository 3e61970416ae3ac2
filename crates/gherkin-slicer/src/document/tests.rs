//! Tests for the document model and its conversion from `gherkin`.

use gherkin::GherkinEnv;
use rstest::rstest;

use super::*;

#[expect(clippy::expect_used, reason = "tests fail loudly on unparsable fixtures")]
fn parse(text: &str) -> Document {
    let feature = gherkin::Feature::parse(text, GherkinEnv::default()).expect("valid feature");
    Document::from_feature(&feature).expect("convertible feature")
}

#[rstest]
#[case("@wip", "@wip")]
#[case("wip", "@wip")]
#[case("  @Core ", "@Core")]
fn tag_normalises_marker(#[case] raw: &str, #[case] expected: &str) {
    assert_eq!(Tag::new(raw).map(|t| t.as_str().to_owned()), Ok(expected.to_owned()));
}

#[rstest]
#[case("@")]
#[case("")]
#[case("   ")]
fn tag_rejects_empty_names(#[case] raw: &str) {
    assert_eq!(Tag::new(raw), Err(DocumentError::EmptyTag));
}

#[rstest]
#[case("@nosplit", true)]
#[case("@NoSplit", true)]
#[case("@NOSPLIT", true)]
#[case("@nosplitter", false)]
#[case("@core", false)]
fn nosplit_detection_ignores_case(#[case] raw: &str, #[case] expected: bool) {
    let tag = Tag::new(raw).unwrap_or_else(|e| panic!("valid tag: {e}"));
    assert_eq!(tag.is_nosplit(), expected);
}

#[test]
fn routing_key_is_lower_case_without_marker() {
    let tag = Tag::new("@BrowserTests").unwrap_or_else(|e| panic!("valid tag: {e}"));
    assert_eq!(tag.routing_key(), "browsertests");
    assert_eq!(tag.as_str(), "@BrowserTests");
}

#[test]
fn table_requires_a_header_row() {
    let err = Table::from_rows(Vec::new(), "step 'x'");
    assert_eq!(err, Err(DocumentError::MissingHeaderRow("step 'x'".into())));
    assert_eq!(
        DocumentError::MissingHeaderRow("step 'x'".into()).to_string(),
        "table in step 'x' has no header row"
    );
}

#[test]
fn converts_children_in_source_order() {
    let doc = parse(concat!(
        "@core @nosplit\n",
        "Feature: Testing\n",
        "  Background: setup\n",
        "    Given a user\n",
        "  Scenario Outline: outline first\n",
        "    Given <x>\n",
        "    Examples:\n",
        "      | x |\n",
        "      | 1 |\n",
        "  @wip\n",
        "  Scenario: plain second\n",
        "    Given a step\n",
    ));

    assert_eq!(doc.title, "Testing");
    let tags: Vec<_> = doc.tags.iter().map(Tag::as_str).collect();
    assert_eq!(tags, ["@core", "@nosplit"]);
    let kinds: Vec<_> = doc.children.iter().map(Child::kind).collect();
    assert_eq!(
        kinds,
        [
            ChildKind::Background,
            ChildKind::ScenarioOutline,
            ChildKind::Scenario
        ]
    );
    assert!(doc.is_nosplit());
    assert_eq!(doc.route().as_deref(), Some("core"));
}

#[test]
fn converts_outline_examples_and_step_tables() {
    let doc = parse(concat!(
        "Feature: Tables\n",
        "  Scenario Outline: filters\n",
        "    Given the following users exist:\n",
        "      | name | email |\n",
        "      | joe  | joe@example.com |\n",
        "    When I filter by <showing>\n",
        "    Examples:\n",
        "      | showing |\n",
        "      | all |\n",
        "      | published |\n",
    ));

    let Some(Child::ScenarioOutline(outline)) = doc.children.first() else {
        panic!("expected an outline, got {:?}", doc.children);
    };
    assert_eq!(outline.keyword.as_deref(), Some("Scenario Outline"));
    assert_eq!(outline.examples.len(), 1);
    let examples = outline.examples.first().unwrap_or_else(|| panic!("examples"));
    assert_eq!(examples.header, ["showing"]);
    assert_eq!(examples.rows, [["all"], ["published"]]);

    let step = outline.steps.first().unwrap_or_else(|| panic!("step"));
    let table = step.argument.as_ref().unwrap_or_else(|| panic!("table"));
    assert_eq!(table.header, ["name", "email"]);
    assert_eq!(table.rows, [["joe", "joe@example.com"]]);
}

#[test]
fn rules_become_unknown_children() {
    let doc = parse(concat!(
        "Feature: Rules\n",
        "  Scenario: before\n",
        "    Given a step\n",
        "  Rule: grouped\n",
        "    Scenario: inside\n",
        "      Given a step\n",
    ));

    let kinds: Vec<_> = doc.children.iter().map(Child::kind).collect();
    assert_eq!(kinds, [ChildKind::Scenario, ChildKind::Unknown]);
    assert_eq!(doc.children_of_kind(ChildKind::Unknown).count(), 0);
    assert_eq!(doc.children_of_kind(ChildKind::Scenario).count(), 1);
    assert_eq!(doc.unknown_children(), 1);
}

#[test]
fn untagged_documents_have_no_route() {
    let doc = parse("Feature: Plain\n  Scenario: s\n    Given a step\n");
    assert!(doc.route().is_none());
    assert!(!doc.is_nosplit());
    assert_eq!(doc.unknown_children(), 0);
}
