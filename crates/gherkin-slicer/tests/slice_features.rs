//! Behavioural tests slicing the fixture feature files onto disk.

use camino::{Utf8Path, Utf8PathBuf};
use gherkin_slicer::error::SliceError;
use gherkin_slicer::slicer::{slice_file, slice_files};
use gherkin_slicer::writer::DirectoryWriter;
use rstest::{fixture, rstest};
use tempfile::TempDir;

struct Output {
    _tmp: TempDir,
    root: Utf8PathBuf,
}

#[fixture]
fn output() -> Output {
    let tmp = TempDir::new().unwrap_or_else(|e| panic!("temp dir: {e}"));
    let root = Utf8PathBuf::from_path_buf(tmp.path().join("split"))
        .unwrap_or_else(|p| panic!("non UTF-8 temp dir: {}", p.display()));
    Output { _tmp: tmp, root }
}

fn feature(name: &str) -> Utf8PathBuf {
    Utf8Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/features")
        .join(name)
}

#[expect(clippy::expect_used, reason = "behavioural tests use explicit panics")]
fn slice(name: &str, root: &Utf8Path) -> Vec<Utf8PathBuf> {
    let mut writer = DirectoryWriter::new(root);
    slice_file(&feature(name), &mut writer).expect("slice feature file")
}

#[expect(clippy::expect_used, reason = "behavioural tests use explicit panics")]
fn read(path: &Utf8Path) -> String {
    std::fs::read_to_string(path).expect("read sliced file")
}

#[expect(clippy::expect_used, reason = "behavioural tests use explicit panics")]
fn file_count(dir: &Utf8Path) -> usize {
    std::fs::read_dir(dir)
        .expect("read output dir")
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_ok_and(|t| t.is_file()))
        .count()
}

#[rstest]
fn separates_feature_file_into_scenarios(output: Output) {
    let paths = slice("simple_multiple_scenarios.feature", &output.root);

    assert_eq!(paths.len(), 2);
    assert_eq!(file_count(&output.root), 2);
    let bodies: Vec<String> = paths.iter().map(|p| read(p)).collect();
    assert_eq!(
        bodies,
        [
            concat!(
                "Feature: Testing\n\n",
                "Scenario: Some feature works\n",
                "  Given a feature is enabled\n",
                "  When I try to use the feature\n",
                "  Then it works\n\n",
            ),
            concat!(
                "Feature: Testing\n\n",
                "Scenario: Some feature is disabled\n",
                "  Given a feature is disabled\n",
                "  When I try to use the feature\n",
                "  Then it doesn't work\n\n",
            ),
        ]
    );
}

#[rstest]
fn handles_example_outlines(output: Output) {
    let paths = slice("scenario_outline.feature", &output.root);

    assert_eq!(paths.len(), 1);
    let body = paths.first().map(|p| read(p)).unwrap_or_default();
    assert!(body.ends_with(concat!(
        "Examples:\n",
        " | showing | item by | from |\n",
        " | all | everyone | today |\n",
        " | published | everyone | today |\n",
        "\n",
    )));
}

#[rstest]
fn handles_both_types_of_tables_with_outline_last(output: Output) {
    let paths = slice("given_and_outline.feature", &output.root);

    assert_eq!(paths.len(), 2);
    let bodies: Vec<String> = paths.iter().map(|p| read(p)).collect();
    assert!(bodies.first().is_some_and(|b| b.contains(concat!(
        "  Given the following users exist:\n",
        "  | name | email | language |\n",
        "  | joe | joe@bbc.co.uk | en-gb |\n",
    ))));
    assert!(bodies.get(1).is_some_and(|b| b.contains(concat!(
        "Examples:\n",
        " | showing | item by | from |\n",
    ))));
}

#[rstest]
fn does_not_split_features_with_nosplit_tag(output: Output) {
    let paths = slice("no_split.feature", &output.root);

    assert_eq!(paths.len(), 1);
    assert_eq!(file_count(&output.root.join("nosplit")), 1);
    let body = paths.first().map(|p| read(p)).unwrap_or_default();
    assert!(body.starts_with("@nosplit\nFeature: Testing\n\n"));
    assert!(body.contains("Scenario: Some feature works"));
    assert!(body.contains("Scenario: Some feature is disabled"));
}

#[rstest]
fn background_only_feature_writes_nothing(output: Output) {
    let paths = slice("background_only.feature", &output.root);

    assert!(paths.is_empty());
    assert!(!output.root.exists());
}

#[rstest]
fn copies_background_steps_to_each_scenario_file(output: Output) {
    let paths = slice("background_with_multiple_scenarios.feature", &output.root);

    assert_eq!(paths.len(), 2);
    for path in &paths {
        assert!(read(path).starts_with(concat!(
            "Feature: Something\n\n",
            "Background: Some feature\n",
            "  Given something feature is available\n\n",
        )));
    }
}

#[rstest]
fn keeps_feature_and_scenario_tags(output: Output) {
    let paths = slice("both_kinds_of_tag.feature", &output.root);

    assert_eq!(paths.len(), 1);
    assert!(paths.iter().all(|p| p.starts_with(output.root.join("featureleveltag"))));
    let body = paths.first().map(|p| read(p)).unwrap_or_default();
    assert!(body.contains("@featureLevelTag\nFeature: Something"));
    assert!(body.contains("@wip @ignore\nScenario: Something works"));
}

#[rstest]
fn batch_continues_past_failing_inputs(output: Output) {
    let inputs = [
        feature("background_with_multiple_scenarios.feature"),
        feature("not_a_feature_file.feature"),
        feature("does_not_exist.feature"),
        feature("background_with_multiple_scenarios.feature"),
    ];
    let mut writer = DirectoryWriter::new(output.root.clone());
    let report = slice_files(&inputs, &mut writer);

    assert!(!report.is_success());
    assert_eq!(report.written.len(), 4);
    assert_eq!(file_count(&output.root), 4);
    let errors: Vec<_> = report.failures.iter().map(|f| &f.error).collect();
    assert!(matches!(
        errors.as_slice(),
        [SliceError::Parse { .. }, SliceError::Read { .. }]
    ));
}

#[rstest]
fn reslicing_produces_identical_bodies(output: Output) {
    let first: Vec<String> = slice("given_and_outline.feature", &output.root)
        .iter()
        .map(|p| read(p))
        .collect();
    let second: Vec<String> = slice("given_and_outline.feature", &output.root)
        .iter()
        .map(|p| read(p))
        .collect();

    assert_eq!(first, second);
    assert_eq!(file_count(&output.root), 4);
}
