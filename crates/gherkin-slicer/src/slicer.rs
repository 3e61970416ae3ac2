//! Driving the parse → partition → write pipeline over input files.
//!
//! Each input is processed independently: a malformed or unreadable file is
//! recorded as a failure and the remaining inputs are still sliced.

use camino::{Utf8Path, Utf8PathBuf};
use gherkin::GherkinEnv;
use tracing::{debug, info, warn};

use crate::document::Document;
use crate::error::{SliceError, WriteError};
use crate::partition::partition;
use crate::writer::{FeatureSink, OutputTarget};

fn normalise_trailing_newline(text: &mut String) {
    if !text.ends_with('\n') {
        text.push('\n');
    }
}

/// Parse feature text into a [`Document`].
///
/// `origin` only labels errors.
///
/// # Errors
///
/// Returns [`SliceError::Parse`] for invalid Gherkin and
/// [`SliceError::Structure`] when the feature does not fit the model.
pub fn parse_document(text: &str, origin: &Utf8Path) -> Result<Document, SliceError> {
    let mut text = text.to_owned();
    normalise_trailing_newline(&mut text);
    let feature =
        gherkin::Feature::parse(&text, GherkinEnv::default()).map_err(|source| {
            SliceError::Parse {
                path: origin.to_owned(),
                source,
            }
        })?;
    Document::from_feature(&feature).map_err(|source| SliceError::Structure {
        path: origin.to_owned(),
        source,
    })
}

/// Partition a document and hand every unit to `sink`, in order.
///
/// # Errors
///
/// Returns the first [`WriteError`] raised by the sink.
pub fn slice_document(
    document: &Document,
    stem: &str,
    sink: &mut dyn FeatureSink,
) -> Result<Vec<Utf8PathBuf>, WriteError> {
    let target = OutputTarget::for_document(document, stem);
    partition(document)
        .iter()
        .map(|body| -> Result<Utf8PathBuf, WriteError> {
            let path = sink.write(&target, body)?;
            debug!(path = %path, "wrote output unit");
            Ok(path)
        })
        .collect()
}

/// Slice feature text, naming outputs after `origin`'s file stem.
///
/// # Errors
///
/// Returns an error when the text cannot be parsed or a unit cannot be
/// written.
pub fn slice_source(
    text: &str,
    origin: &Utf8Path,
    sink: &mut dyn FeatureSink,
) -> Result<Vec<Utf8PathBuf>, SliceError> {
    let document = parse_document(text, origin)?;
    let skipped = document.unknown_children();
    if skipped > 0 {
        warn!(
            input = %origin,
            skipped,
            "skipping unsupported blocks such as Rule; their scenarios are not sliced"
        );
    }
    let stem = origin.file_stem().unwrap_or_default();
    Ok(slice_document(&document, stem, sink)?)
}

/// Read and slice a single feature file.
///
/// # Errors
///
/// Returns an error when the file cannot be read or parsed, or when a unit
/// cannot be written.
pub fn slice_file(
    path: &Utf8Path,
    sink: &mut dyn FeatureSink,
) -> Result<Vec<Utf8PathBuf>, SliceError> {
    let text = std::fs::read_to_string(path).map_err(|source| SliceError::Read {
        path: path.to_owned(),
        source,
    })?;
    slice_source(&text, path, sink)
}

/// An input that could not be sliced.
#[derive(Debug)]
pub struct InputFailure {
    /// The failing input.
    pub path: Utf8PathBuf,
    /// Why it failed.
    pub error: SliceError,
}

/// Outcome of slicing a batch of inputs.
#[derive(Debug, Default)]
pub struct SliceReport {
    /// Paths of every unit written, grouped by input in input order.
    pub written: Vec<Utf8PathBuf>,
    /// Inputs that failed, in input order.
    pub failures: Vec<InputFailure>,
}

impl SliceReport {
    /// Return `true` when every input was sliced.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Slice every input in order, collecting written paths and failures.
///
/// A failing input does not stop the batch. Units written for an input
/// before a write failure remain on disk but are not reported.
pub fn slice_files(paths: &[Utf8PathBuf], sink: &mut dyn FeatureSink) -> SliceReport {
    let mut report = SliceReport::default();
    for path in paths {
        match slice_file(path, sink) {
            Ok(written) => {
                info!(input = %path, units = written.len(), "sliced feature file");
                report.written.extend(written);
            }
            Err(error) => {
                warn!(input = %path, error = %error, "failed to slice feature file");
                report.failures.push(InputFailure {
                    path: path.clone(),
                    error,
                });
            }
        }
    }
    report
}
