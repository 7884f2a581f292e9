//! Writes a payload to its destination and reports the written path.
//!
//! One invocation runs through a fixed sequence:
//!
//! 1. Validate: an empty destination fails before any filesystem access.
//! 2. Guard: if an entry already exists at the destination and `force` is not
//!    set, fail and leave the entry untouched.
//! 3. Open the destination for writing, creating it or truncating it.
//! 4. Write the whole payload. On a write error or a stalled write the handle
//!    is released and the destination is removed on a best-effort basis.
//!
//! The existence check and the open are separate calls. Another process that
//! creates the destination between the two is overwritten.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

use camino::Utf8Path;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::FileConfig;
use crate::error::MaterializeError;

const MATERIALIZE_TARGET: &str = "scribe_file::materialize";

/// Permission bits applied when the destination is created.
#[cfg(unix)]
pub const FILE_MODE: u32 = 0o644;

/// Filesystem operations needed to materialize a file.
///
/// Abstracting the filesystem lets tests simulate stalled writes and failed
/// cleanup without a constrained device.
pub trait Filesystem {
    /// Writable handle returned by [`Filesystem::open_truncating`].
    type Handle: Write;

    /// Returns `true` if anything can be stat-ed at `path`.
    fn entry_exists(&self, path: &Path) -> bool;

    /// Opens `path` for writing, creating it if absent and truncating it if
    /// present. Parent directories are not created.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or created.
    fn open_truncating(&self, path: &Path) -> io::Result<Self::Handle>;

    /// Removes the file at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be removed.
    fn remove_file(&self, path: &Path) -> io::Result<()>;
}

/// [`Filesystem`] backed by `std::fs`.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalFilesystem;

impl Filesystem for LocalFilesystem {
    type Handle = File;

    fn entry_exists(&self, path: &Path) -> bool {
        fs::metadata(path).is_ok()
    }

    fn open_truncating(&self, path: &Path) -> io::Result<File> {
        let mut options = OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(FILE_MODE);
        }
        options.open(path)
    }

    fn remove_file(&self, path: &Path) -> io::Result<()> {
        fs::remove_file(path)
    }
}

/// Result of a successful materialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileOutput {
    path: String,
}

impl FileOutput {
    /// Creates an output describing `path`.
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the path of the file that was written.
    #[must_use]
    pub const fn path(&self) -> &str {
        self.path.as_str()
    }
}

/// Ensures `config.destination()` holds exactly `config.contents()`.
///
/// # Errors
///
/// Returns [`MaterializeError::MissingDestination`] for an empty destination,
/// [`MaterializeError::AlreadyExists`] when the destination exists and
/// `force` is unset, and an I/O variant when opening or writing fails.
pub fn materialize<F: Filesystem>(
    filesystem: &F,
    config: &FileConfig,
) -> Result<FileOutput, MaterializeError> {
    config.validate()?;

    let destination = config.destination();
    let path = destination.as_std_path();

    if filesystem.entry_exists(path) {
        if !config.force() {
            debug!(
                target: MATERIALIZE_TARGET,
                destination = %destination,
                "destination exists and force is unset"
            );
            return Err(MaterializeError::AlreadyExists {
                path: destination.to_path_buf(),
            });
        }
        debug!(
            target: MATERIALIZE_TARGET,
            destination = %destination,
            "overwriting existing destination"
        );
    }

    let mut handle =
        filesystem
            .open_truncating(path)
            .map_err(|source| MaterializeError::Create {
                path: destination.to_path_buf(),
                source,
            })?;

    let written = write_payload(&mut handle, config.contents().as_bytes(), destination);
    drop(handle);

    if let Err(error) = written {
        remove_partial(filesystem, destination, &error);
        return Err(error);
    }

    info!(
        target: MATERIALIZE_TARGET,
        destination = %destination,
        bytes = config.contents().len(),
        "file materialized"
    );
    Ok(FileOutput::new(destination.as_str()))
}

/// Writes `payload` in one logical operation.
///
/// Partial writes are continued until the payload is exhausted. A write that
/// accepts zero bytes before then counts as a short write.
fn write_payload(
    handle: &mut impl Write,
    payload: &[u8],
    destination: &Utf8Path,
) -> Result<(), MaterializeError> {
    let mut written = 0;
    while let Some(remaining) = payload.get(written..).filter(|rest| !rest.is_empty()) {
        match handle.write(remaining) {
            Ok(0) => {
                return Err(MaterializeError::ShortWrite {
                    path: destination.to_path_buf(),
                    expected: payload.len(),
                    written,
                });
            }
            Ok(count) => written += count,
            Err(source) if source.kind() == io::ErrorKind::Interrupted => {}
            Err(source) => {
                return Err(MaterializeError::Write {
                    path: destination.to_path_buf(),
                    source,
                });
            }
        }
    }

    handle.flush().map_err(|source| MaterializeError::Write {
        path: destination.to_path_buf(),
        source,
    })
}

/// Best-effort removal of a partially written destination.
///
/// The outcome is logged and never replaces `cause`.
fn remove_partial<F: Filesystem>(filesystem: &F, destination: &Utf8Path, cause: &MaterializeError) {
    match filesystem.remove_file(destination.as_std_path()) {
        Ok(()) => debug!(
            target: MATERIALIZE_TARGET,
            destination = %destination,
            cause = %cause,
            "removed partially written destination"
        ),
        Err(error) if error.kind() == io::ErrorKind::NotFound => debug!(
            target: MATERIALIZE_TARGET,
            destination = %destination,
            "partially written destination already gone"
        ),
        Err(error) => warn!(
            target: MATERIALIZE_TARGET,
            destination = %destination,
            cause = %cause,
            error = %error,
            "failed to remove partially written destination"
        ),
    }
}
