//! Persistence of rendered output units.
//!
//! The slicer hands each rendered body to a [`FeatureSink`] together with an
//! [`OutputTarget`] describing where it belongs. [`DirectoryWriter`] writes
//! the bodies below a base directory through `cap-std` handles, so a routing
//! key can never place a file outside that directory. [`MemorySink`] keeps
//! them in memory.

use std::io::{self, Write};

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs::{Dir, OpenOptions};

use crate::document::Document;
use crate::error::WriteError;

const FEATURE_EXTENSION: &str = "feature";
const DEFAULT_STEM: &str = "feature";

/// Where an output unit should be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputTarget {
    /// Sub-directory taken from the feature's first tag, if any.
    pub route: Option<String>,
    /// Base name shared by every unit of one input.
    pub stem: String,
}

impl OutputTarget {
    /// Build the target for every unit of `document`.
    ///
    /// Only the first feature tag is consulted for routing. An empty `stem`
    /// is replaced with `feature`.
    #[must_use]
    pub fn for_document(document: &Document, stem: &str) -> Self {
        let stem = stem.trim();
        Self {
            route: document.route(),
            stem: if stem.is_empty() {
                DEFAULT_STEM.to_owned()
            } else {
                stem.to_owned()
            },
        }
    }
}

/// Destination for rendered output units.
pub trait FeatureSink {
    /// Persist one body and return the path it was written to.
    ///
    /// # Errors
    ///
    /// Returns a [`WriteError`] when the body cannot be stored.
    fn write(&mut self, target: &OutputTarget, body: &str) -> Result<Utf8PathBuf, WriteError>;
}

/// Writes output units as `.feature` files below a base directory.
///
/// Directories are created on the first write. File names take the form
/// `<stem>-<n>.feature`, using the lowest `n` not already present.
#[derive(Debug)]
pub struct DirectoryWriter {
    root: Utf8PathBuf,
    base: Option<Dir>,
}

impl DirectoryWriter {
    /// Create a writer for the given base directory.
    #[must_use]
    pub fn new(root: impl Into<Utf8PathBuf>) -> Self {
        Self {
            root: root.into(),
            base: None,
        }
    }

    fn base_dir(&mut self) -> Result<&Dir, WriteError> {
        let base = match self.base.take() {
            Some(dir) => dir,
            None => open_root(&self.root).map_err(|source| WriteError::Directory {
                path: self.root.clone(),
                source,
            })?,
        };
        Ok(self.base.insert(base))
    }
}

fn open_root(root: &Utf8Path) -> io::Result<Dir> {
    Dir::create_ambient_dir_all(root.as_std_path(), ambient_authority())?;
    Dir::open_ambient_dir(root.as_std_path(), ambient_authority())
}

fn open_route(base: &Dir, route: &str) -> io::Result<Dir> {
    base.create_dir_all(route)?;
    base.open_dir(route)
}

/// Create `<stem>-<n>.feature` in `dir` for the first free `n` and write
/// `body` into it, returning the file name.
fn write_unique(dir: &Dir, stem: &str, body: &str) -> io::Result<String> {
    let mut options = OpenOptions::new();
    options.write(true).create_new(true);

    let mut counter: u64 = 1;
    loop {
        let name = format!("{stem}-{counter}.{FEATURE_EXTENSION}");
        match dir.open_with(&name, &options) {
            Ok(mut file) => {
                file.write_all(body.as_bytes())?;
                file.flush()?;
                return Ok(name);
            }
            Err(err) if err.kind() == io::ErrorKind::AlreadyExists => {
                counter = counter.saturating_add(1);
            }
            Err(err) => return Err(err),
        }
    }
}

impl FeatureSink for DirectoryWriter {
    fn write(&mut self, target: &OutputTarget, body: &str) -> Result<Utf8PathBuf, WriteError> {
        let root = self.root.clone();
        let base = self.base_dir()?;

        let dir_path: Utf8PathBuf;
        let routed: Dir;
        let dir = match target.route.as_deref() {
            Some(route) => {
                dir_path = root.join(route);
                routed = open_route(base, route).map_err(|source| WriteError::Directory {
                    path: dir_path.clone(),
                    source,
                })?;
                &routed
            }
            None => {
                dir_path = root;
                base
            }
        };

        let name = write_unique(dir, &target.stem, body).map_err(|source| WriteError::File {
            path: dir_path.clone(),
            source,
        })?;
        Ok(dir_path.join(name))
    }
}

/// Keeps output units in memory instead of writing them.
///
/// Returned paths mirror the layout [`DirectoryWriter`] would produce below
/// a `memory` root, numbered per target.
#[derive(Debug, Default)]
pub struct MemorySink {
    units: Vec<(Utf8PathBuf, String)>,
}

impl MemorySink {
    /// Create an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stored `(path, body)` pairs in write order.
    #[must_use]
    pub fn units(&self) -> &[(Utf8PathBuf, String)] {
        &self.units
    }
}

/// Whether `name` is `<stem>-<n>.feature` for some number `n`.
fn numbered(name: &str, stem: &str) -> bool {
    name.strip_prefix(stem)
        .and_then(|rest| rest.strip_prefix('-'))
        .and_then(|rest| rest.strip_suffix(&format!(".{FEATURE_EXTENSION}")))
        .is_some_and(|n| n.parse::<u64>().is_ok())
}

impl FeatureSink for MemorySink {
    fn write(&mut self, target: &OutputTarget, body: &str) -> Result<Utf8PathBuf, WriteError> {
        let mut dir = Utf8PathBuf::from("memory");
        if let Some(route) = target.route.as_deref() {
            dir.push(route);
        }
        let taken = self
            .units
            .iter()
            .filter(|(path, _)| {
                path.parent() == Some(dir.as_path())
                    && path.file_name().is_some_and(|name| numbered(name, &target.stem))
            })
            .count();
        let path = dir.join(format!(
            "{}-{}.{FEATURE_EXTENSION}",
            target.stem,
            taken.saturating_add(1)
        ));
        self.units.push((path.clone(), body.to_owned()));
        Ok(path)
    }
}
