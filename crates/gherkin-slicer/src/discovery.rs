//! Locating input `.feature` files and clearing previously generated output.

use std::path::{Path, PathBuf};

use camino::{Utf8Path, Utf8PathBuf};
use tracing::debug;
use walkdir::{DirEntry, WalkDir};

use crate::error::{ConfigError, DiscoveryError};

fn is_feature_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("feature"))
}

fn to_utf8(path: PathBuf) -> Result<Utf8PathBuf, DiscoveryError> {
    Utf8PathBuf::from_path_buf(path)
        .map_err(|path| DiscoveryError::NonUtf8Path(path.display().to_string()))
}

fn convert_walkdir_error(base: &Utf8Path, err: walkdir::Error) -> Option<DiscoveryError> {
    if err.loop_ancestor().is_some() {
        return None;
    }
    let path = err
        .path()
        .and_then(Utf8Path::from_path)
        .map_or_else(|| base.to_owned(), Utf8Path::to_owned);
    let err_str = err.to_string();
    Some(DiscoveryError::Io {
        path,
        source: err
            .into_io_error()
            .unwrap_or_else(|| std::io::Error::other(err_str)),
    })
}

fn process_dir_entry(entry: DirEntry) -> Option<Result<Utf8PathBuf, DiscoveryError>> {
    if !entry.file_type().is_file() || !is_feature_file(entry.path()) {
        return None;
    }
    Some(to_utf8(entry.into_path()))
}

/// Canonical form of `path`, or `None` when it does not exist yet.
fn canonical(path: &Utf8Path) -> Option<Utf8PathBuf> {
    path.canonicalize_utf8().ok()
}

/// Whether `entry` is the directory `skip` (given in canonical form).
fn is_skipped(entry: &DirEntry, skip: Option<&Utf8Path>) -> bool {
    let Some(skip) = skip else {
        return false;
    };
    entry.file_type().is_dir()
        && std::fs::canonicalize(entry.path()).is_ok_and(|path| path == skip.as_std_path())
}

fn walk_feature_files(
    base: &Utf8Path,
    skip: Option<&Utf8Path>,
) -> Result<Vec<Utf8PathBuf>, DiscoveryError> {
    let mut files = Vec::new();
    let walker = WalkDir::new(base)
        .follow_links(false)
        .into_iter()
        .filter_entry(|entry| {
            let skipped = is_skipped(entry, skip);
            if skipped {
                debug!(dir = %entry.path().display(), "not searching the output directory");
            }
            !skipped
        });

    for next in walker {
        match next {
            Ok(entry) => {
                if let Some(result) = process_dir_entry(entry) {
                    files.push(result?);
                }
            }
            Err(err) => {
                if let Some(err) = convert_walkdir_error(base, err) {
                    return Err(err);
                }
            }
        }
    }

    files.sort();
    Ok(files)
}

/// Recursively collect `.feature` files below `base`, sorted by path.
///
/// Symbolic links are not followed.
///
/// # Errors
///
/// Returns an error when a directory cannot be read or a path is not UTF-8.
pub fn collect_feature_files_in(base: &Utf8Path) -> Result<Vec<Utf8PathBuf>, DiscoveryError> {
    walk_feature_files(base, None)
}

/// Expand the command-line inputs into the list of files to slice.
///
/// Directories are searched recursively for `.feature` files, leaving out
/// the `out_dir` subtree so that generated files are never read back as
/// inputs. Any other path is kept as given, in order, so that unreadable or
/// missing files are reported when they are sliced.
///
/// # Errors
///
/// Returns an error when a directory cannot be walked.
pub fn collect_feature_files(
    paths: &[Utf8PathBuf],
    out_dir: &Utf8Path,
) -> Result<Vec<Utf8PathBuf>, DiscoveryError> {
    let skip = canonical(out_dir);
    let mut files = Vec::new();
    for path in paths {
        if path.is_dir() {
            files.extend(walk_feature_files(path, skip.as_deref())?);
        } else {
            files.push(path.clone());
        }
    }
    Ok(files)
}

/// Check that cleaning `out_dir` cannot delete any of the `inputs`.
///
/// # Errors
///
/// Returns `ConfigError::InvalidConfig` when `out_dir` is, or contains, one
/// of the input paths.
pub fn check_clean_target(out_dir: &Utf8Path, inputs: &[Utf8PathBuf]) -> Result<(), ConfigError> {
    let Some(out) = canonical(out_dir) else {
        return Ok(());
    };
    let inside = inputs
        .iter()
        .find(|input| canonical(input).is_some_and(|input| input.starts_with(&out)));
    if let Some(input) = inside {
        return Err(ConfigError::InvalidConfig(format!(
            "refusing to clean {out_dir}: it contains the input {input}"
        )));
    }
    Ok(())
}

/// Delete every `.feature` file below `root`, returning how many were removed.
///
/// A missing `root` is not an error; nothing is removed.
///
/// # Errors
///
/// Returns an error when the directory cannot be walked or a file cannot be
/// removed.
pub fn remove_generated_files(root: &Utf8Path) -> Result<usize, DiscoveryError> {
    if !root.exists() {
        return Ok(0);
    }
    let files = collect_feature_files_in(root)?;
    for file in &files {
        std::fs::remove_file(file).map_err(|source| DiscoveryError::Io {
            path: file.clone(),
            source,
        })?;
    }
    Ok(files.len())
}
