//! Where the generated source goes.

use crate::error::GenerateError;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Persists one generated document
pub trait DocumentWriter {
    fn write(&mut self, code: &str) -> Result<(), GenerateError>;
}

/// Writes to a path atomically: the text goes to a temporary file next to
/// the target, which is renamed over it only once complete.
#[derive(Debug, Clone)]
pub struct FileWriter {
    pub path: PathBuf,
}

impl FileWriter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn write_error(&self, source: io::Error) -> GenerateError {
        GenerateError::Write {
            path: self.path.clone(),
            source,
        }
    }
}

impl DocumentWriter for FileWriter {
    fn write(&mut self, code: &str) -> Result<(), GenerateError> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&dir).map_err(|err| self.write_error(err))?;

        let mut tmp = tempfile::NamedTempFile::new_in(&dir).map_err(|err| self.write_error(err))?;
        tmp.write_all(code.as_bytes())
            .and_then(|()| tmp.as_file().sync_all())
            .map_err(|err| self.write_error(err))?;
        tmp.persist(&self.path)
            .map_err(|err| self.write_error(err.error))?;

        tracing::info!(path = %self.path.display(), bytes = code.len(), "wrote bindings");
        Ok(())
    }
}

/// Prints the document to standard output
#[derive(Debug, Clone, Copy, Default)]
pub struct StdoutWriter;

impl DocumentWriter for StdoutWriter {
    fn write(&mut self, code: &str) -> Result<(), GenerateError> {
        let stdout = io::stdout();
        let mut lock = stdout.lock();
        lock.write_all(code.as_bytes())
            .and_then(|()| lock.flush())
            .map_err(|source| GenerateError::Write {
                path: Path::new("<stdout>").to_path_buf(),
                source,
            })
    }
}
