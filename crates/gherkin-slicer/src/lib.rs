//! Split Gherkin feature files into one file per scenario.
//!
//! A feature file is parsed with the `gherkin` crate, converted into an
//! immutable [`document::Document`], partitioned into output units, and each
//! unit is written as a standalone `.feature` file.
//!
//! # Overview
//!
//! - [`render`] turns document nodes back into canonical feature text.
//! - [`partition`] decides which scenarios share an output unit. Every unit
//!   repeats the feature header and backgrounds; a feature tagged `@nosplit`
//!   stays whole.
//! - [`writer`] persists units, routing them into a sub-directory named after
//!   the feature's first tag.
//! - [`slicer`] drives the pipeline over a batch of input files.
//!
//! # Configuration
//!
//! - `GHERKIN_SLICER_LOG_LEVEL`: log verbosity (trace, debug, info, warn,
//!   error)
//! - `GHERKIN_SLICER_OUT_DIR`: base directory for sliced files
//!
//! # Example
//!
//! ```
//! use camino::Utf8Path;
//! use gherkin_slicer::slicer::slice_source;
//! use gherkin_slicer::writer::MemorySink;
//!
//! # fn main() -> Result<(), gherkin_slicer::error::SliceError> {
//! let text = "Feature: Demo\nScenario: one\n  Given a\nScenario: two\n  Given b\n";
//! let mut sink = MemorySink::new();
//! let paths = slice_source(text, Utf8Path::new("demo.feature"), &mut sink)?;
//! assert_eq!(paths.len(), 2);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod discovery;
pub mod document;
pub mod error;
pub mod logging;
pub mod partition;
pub mod render;
pub mod slicer;
pub mod writer;
