use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::bail;
use crate::error::{EnrichResult, ErrorKind};

/// A reference data source backed by a single local file.
///
/// [`FileLineSource`] validates the location and produces a [`LineStream`]
/// over its contents. The underlying handle is held for the duration of one
/// stream and released when the stream is dropped, whether iteration ran to
/// completion, was abandoned early, or failed mid-read. At most one handle
/// exists per [`FileLineSource::open`] call.
#[derive(Debug, Clone)]
pub struct FileLineSource {
    path: PathBuf,
}

impl FileLineSource {
    /// Creates a source for the given location.
    ///
    /// The location is not touched until [`FileLineSource::open`] is called.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the configured location.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Opens the source and returns a lazy stream of its lines.
    ///
    /// Fails with [`ErrorKind::InvalidSourcePath`] when the location does not
    /// exist or is not a regular file, and with [`ErrorKind::SourceIoError`]
    /// when the file exists but cannot be opened for reading.
    pub fn open(&self) -> EnrichResult<LineStream> {
        let metadata = match std::fs::metadata(&self.path) {
            Ok(metadata) => metadata,
            Err(error) => {
                bail!(
                    ErrorKind::InvalidSourcePath,
                    "The reference data location could not be resolved",
                    format!("path `{}`: {error}", self.path.display()),
                    source: error
                );
            }
        };

        if !metadata.is_file() {
            bail!(
                ErrorKind::InvalidSourcePath,
                "The reference data location is not a regular file",
                format!("path `{}`", self.path.display())
            );
        }

        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(error) => {
                bail!(
                    ErrorKind::SourceIoError,
                    "The reference data file could not be opened",
                    format!("path `{}`: {error}", self.path.display()),
                    source: error
                );
            }
        };

        debug!(path = %self.path.display(), "opened reference data source");

        Ok(LineStream {
            lines: BufReader::new(file).lines(),
        })
    }
}

/// A lazy stream of raw lines from an open source.
///
/// Dropping the stream releases the file handle; dropping is the one
/// deterministic cleanup obligation of a load cycle and happens on every
/// exit path.
#[derive(Debug)]
pub struct LineStream {
    lines: Lines<BufReader<File>>,
}

impl Iterator for LineStream {
    type Item = EnrichResult<String>;

    fn next(&mut self) -> Option<Self::Item> {
        self.lines.next().map(|line| line.map_err(Into::into))
    }
}
