//! Where the API metadata document comes from.

use crate::document::ApiMetadata;
use crate::error::GenerateError;
use std::fs;
use std::path::PathBuf;
use std::process::Command;

/// Provides the raw API metadata document for one generation run
pub trait MetadataSource {
    /// Human-readable origin, used in logs and errors
    fn describe(&self) -> String;

    fn fetch(&self) -> Result<ApiMetadata, GenerateError>;
}

/// Asks an `nvim` executable for its own API via `--api-info`
#[derive(Debug, Clone)]
pub struct NvimProcess {
    pub program: PathBuf,
}

impl NvimProcess {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl MetadataSource for NvimProcess {
    fn describe(&self) -> String {
        format!("`{} --api-info`", self.program.display())
    }

    fn fetch(&self) -> Result<ApiMetadata, GenerateError> {
        tracing::debug!(program = %self.program.display(), "spawning nvim for api info");
        let output = Command::new(&self.program)
            .arg("--api-info")
            .output()
            .map_err(|err| GenerateError::unavailable(self.describe(), err))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(GenerateError::unavailable(
                self.describe(),
                format!("process exited with {}: {}", output.status, stderr.trim()),
            ));
        }

        tracing::debug!(bytes = output.stdout.len(), "decoding msgpack api info");
        ApiMetadata::from_msgpack(&output.stdout)
            .map_err(|err| GenerateError::unavailable(self.describe(), err))
    }
}

/// A stored document: JSON when the file ends in `.json`, msgpack otherwise
#[derive(Debug, Clone)]
pub struct MetadataFile {
    pub path: PathBuf,
}

impl MetadataFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn is_json(&self) -> bool {
        self.path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
    }
}

impl MetadataSource for MetadataFile {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn fetch(&self) -> Result<ApiMetadata, GenerateError> {
        let bytes =
            fs::read(&self.path).map_err(|err| GenerateError::unavailable(self.describe(), err))?;
        tracing::debug!(path = %self.path.display(), bytes = bytes.len(), "read api info file");

        if self.is_json() {
            serde_json::from_slice(&bytes)
                .map_err(|err| GenerateError::unavailable(self.describe(), err))
        } else {
            ApiMetadata::from_msgpack(&bytes)
                .map_err(|err| GenerateError::unavailable(self.describe(), err))
        }
    }
}

/// An already-loaded document is its own source
impl MetadataSource for ApiMetadata {
    fn describe(&self) -> String {
        "in-memory document".to_string()
    }

    fn fetch(&self) -> Result<ApiMetadata, GenerateError> {
        Ok(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use std::io::Write;

    #[test]
    fn test_json_file() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(
            file,
            r#"{{"functions": [], "ui_events": [], "types": {{"Buffer": {{"id": 0, "prefix": "nvim_buf_"}}}}}}"#
        )
        .unwrap();
        let doc = MetadataFile::new(file.path()).fetch().unwrap();
        assert_eq!(doc.types["Buffer"].id, 0);
    }

    #[test]
    fn test_msgpack_file() {
        let mut doc = ApiMetadata::default();
        doc.types.insert(
            "Window".into(),
            crate::document::ExtensionTypeDef {
                id: 1,
                prefix: "nvim_win_".into(),
            },
        );
        let mut file = tempfile::Builder::new().suffix(".mpack").tempfile().unwrap();
        file.write_all(&rmp_serde::to_vec_named(&doc).unwrap()).unwrap();
        assert_eq!(MetadataFile::new(file.path()).fetch().unwrap(), doc);
    }

    #[test]
    fn test_undecodable_file_is_source_unavailable() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, "not json").unwrap();
        let err = MetadataFile::new(file.path()).fetch().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::SourceUnavailable);
    }

    #[test]
    fn test_missing_program_is_source_unavailable() {
        let source = NvimProcess::new("/nonexistent/nvim-bindgen-test/nvim");
        let err = source.fetch().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::SourceUnavailable);
        assert!(err.to_string().contains("--api-info"));
    }
}
