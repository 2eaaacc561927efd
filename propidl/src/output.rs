//! Output writers for generated interfaces.
//!
//! Content is rendered in memory first, written to a sibling temporary file
//! and renamed into place, so a destination path only ever holds a complete
//! interface. Files whose content is already current are left untouched.

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs_utf8::{Dir, File, OpenOptions};
use std::io::Write;
use tracing::debug;

use crate::error::WriteError;

/// What happened to an output file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    /// The file was created or replaced.
    Written,
    /// The file already held identical content.
    Unchanged,
}

/// Where generated interfaces go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputMode {
    /// Stream every interface to standard output.
    Stdout,
    /// Write one file per interface into the directory.
    Directory(Utf8PathBuf),
    /// Compare files in the directory against fresh output.
    Check(Utf8PathBuf),
}

/// Writes `content` to `out_dir/file_name` unless it is already current.
///
/// # Errors
///
/// Returns [`WriteError::File`] when the directory cannot be created or the
/// file cannot be read, written or renamed.
pub fn write_interface_file(
    out_dir: &Utf8Path,
    file_name: &str,
    content: &str,
) -> Result<(Utf8PathBuf, WriteOutcome), WriteError> {
    let dir = ensure_dir(out_dir)?;
    let path = out_dir.join(file_name);

    if read_existing(&dir, &path, file_name)?.as_deref() == Some(content) {
        debug!(path = %path, "output unchanged");
        return Ok((path, WriteOutcome::Unchanged));
    }

    replace_file(&dir, file_name, |file| file.write_all(content.as_bytes())).map_err(
        |source| WriteError::File {
            path: path.clone(),
            source,
        },
    )?;
    Ok((path, WriteOutcome::Written))
}

/// Fills `<file_name>.tmp` with `fill`, syncs it and renames it over
/// `file_name`. The temporary file is removed when any step fails.
fn replace_file<F>(dir: &Dir, file_name: &str, fill: F) -> std::io::Result<()>
where
    F: FnOnce(&mut File) -> std::io::Result<()>,
{
    let temp_name = format!("{file_name}.tmp");
    let outcome = dir
        .open_with(
            &temp_name,
            OpenOptions::new().write(true).create(true).truncate(true),
        )
        .and_then(|mut file| {
            fill(&mut file)?;
            file.sync_all()
        })
        .and_then(|()| dir.rename(&temp_name, dir, file_name));

    if outcome.is_err() && dir.remove_file(&temp_name).is_err() {
        debug!(file = %temp_name, "no temporary file to remove");
    }
    outcome
}

/// Returns whether `out_dir/file_name` already holds exactly `content`.
///
/// # Errors
///
/// Returns [`WriteError::File`] when the directory or file exists but
/// cannot be read.
pub fn is_current(out_dir: &Utf8Path, file_name: &str, content: &str) -> Result<bool, WriteError> {
    let dir = match Dir::open_ambient_dir(out_dir, ambient_authority()) {
        Ok(dir) => dir,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(false),
        Err(err) => {
            return Err(WriteError::File {
                path: out_dir.to_path_buf(),
                source: err,
            });
        }
    };
    let path = out_dir.join(file_name);
    Ok(read_existing(&dir, &path, file_name)?.as_deref() == Some(content))
}

fn read_existing(dir: &Dir, path: &Utf8Path, file_name: &str) -> Result<Option<String>, WriteError> {
    match dir.read_to_string(file_name) {
        Ok(existing) => Ok(Some(existing)),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(err) => Err(WriteError::File {
            path: path.to_path_buf(),
            source: err,
        }),
    }
}

fn ensure_dir(path: &Utf8Path) -> Result<Dir, WriteError> {
    match Dir::open_ambient_dir(path, ambient_authority()) {
        Ok(dir) => Ok(dir),
        Err(open_err) if open_err.kind() == std::io::ErrorKind::NotFound => {
            Dir::create_ambient_dir_all(path, ambient_authority()).map_err(|io_err| {
                WriteError::File {
                    path: path.to_path_buf(),
                    source: io_err,
                }
            })?;
            Dir::open_ambient_dir(path, ambient_authority()).map_err(|io_err| WriteError::File {
                path: path.to_path_buf(),
                source: io_err,
            })
        }
        Err(open_err) => Err(WriteError::File {
            path: path.to_path_buf(),
            source: open_err,
        }),
    }
}
