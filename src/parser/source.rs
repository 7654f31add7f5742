//! Content source abstraction for reading package descriptions.

use camino::Utf8Path;

use crate::error::ParseError;

/// Trait for abstracting file I/O so descriptions can come from disk or memory.
pub trait ContentSource {
    /// Read a file at the given logical path and return its content as a string.
    fn read_to_string(&mut self, path: &Utf8Path) -> Result<String, ParseError>;
}

/// Reads files directly from the local filesystem.
pub struct FsSource;

impl ContentSource for FsSource {
    fn read_to_string(&mut self, path: &Utf8Path) -> Result<String, ParseError> {
        std::fs::read_to_string(path.as_std_path()).map_err(|source| ParseError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}
