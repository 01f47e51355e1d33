use std::io;
use std::path::PathBuf;
use thiserror::Error;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Kind of generation error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    SchemaViolation,
    AmbiguousReceiver,
    SourceUnavailable,
    WriteFailed,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::SchemaViolation => "Schema violation",
            ErrorKind::AmbiguousReceiver => "Ambiguous receiver",
            ErrorKind::SourceUnavailable => "Metadata source unavailable",
            ErrorKind::WriteFailed => "Write failed",
        }
    }
}

/// Error that aborts a generation run.
///
/// Every variant is fatal: the generator never skips an offending entry,
/// and nothing is written once one of these has been raised.
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("`{entry}`: {reason}")]
    SchemaViolation { entry: String, reason: String },

    #[error("`{function}` is flagged as a method but {}", describe_candidates(.candidates))]
    AmbiguousReceiver {
        function: String,
        candidates: Vec<String>,
    },

    #[error("could not load API metadata from {source_name}: {source}")]
    SourceUnavailable {
        source_name: String,
        #[source]
        source: BoxError,
    },

    #[error("could not write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

fn describe_candidates(candidates: &[String]) -> String {
    if candidates.is_empty() {
        "its name matches no extension type prefix".to_string()
    } else {
        format!(
            "its name matches several extension type prefixes ({})",
            candidates.join(", ")
        )
    }
}

impl GenerateError {
    pub fn schema(entry: impl Into<String>, reason: impl Into<String>) -> Self {
        GenerateError::SchemaViolation {
            entry: entry.into(),
            reason: reason.into(),
        }
    }

    pub fn unavailable(source_name: impl Into<String>, source: impl Into<BoxError>) -> Self {
        GenerateError::SourceUnavailable {
            source_name: source_name.into(),
            source: source.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            GenerateError::SchemaViolation { .. } => ErrorKind::SchemaViolation,
            GenerateError::AmbiguousReceiver { .. } => ErrorKind::AmbiguousReceiver,
            GenerateError::SourceUnavailable { .. } => ErrorKind::SourceUnavailable,
            GenerateError::Write { .. } => ErrorKind::WriteFailed,
        }
    }

    /// Name of the schema entry the error is about, if any
    pub fn entry(&self) -> Option<&str> {
        match self {
            GenerateError::SchemaViolation { entry, .. } => Some(entry),
            GenerateError::AmbiguousReceiver { function, .. } => Some(function),
            _ => None,
        }
    }

    fn help(&self) -> Option<&'static str> {
        match self {
            GenerateError::SchemaViolation { .. } => Some(
                "the API metadata does not match what this generator understands;\n\
                 check that the nvim build and nvim-bindgen versions are compatible",
            ),
            GenerateError::AmbiguousReceiver { .. } => Some(
                "a method needs exactly one `types` entry whose prefix starts its name;\n\
                 check for a missing `types` entry or a wrong `method` flag",
            ),
            GenerateError::SourceUnavailable { .. } => {
                Some("pass --nvim <PROGRAM> or --api-info <FILE> to choose another source")
            }
            _ => None,
        }
    }

    /// Render the error for the terminal (no color)
    pub fn render(&self) -> String {
        self.render_inner(false)
    }

    /// Render the error with ANSI color codes
    pub fn render_color(&self) -> String {
        self.render_inner(true)
    }

    fn render_inner(&self, color: bool) -> String {
        let red = if color { "\x1b[1;31m" } else { "" };
        let bold = if color { "\x1b[1m" } else { "" };
        let dim = if color { "\x1b[2m" } else { "" };
        let cyan = if color { "\x1b[1;38;5;73m" } else { "" };
        let reset = if color { "\x1b[0m" } else { "" };

        let mut output = String::new();
        output.push('\n');
        output.push_str(&format!(
            "{}error:{} {}{}{}\n",
            red,
            reset,
            bold,
            self.kind().as_str(),
            reset
        ));
        output.push_str(&format!(" {}-->{} {}\n", dim, reset, self));

        // Walk the source chain, skipping the first level already shown inline
        let mut cause = std::error::Error::source(self).and_then(|e| e.source());
        while let Some(err) = cause {
            output.push_str(&format!(" {}caused by:{} {}\n", dim, reset, err));
            cause = err.source();
        }

        if let Some(help) = self.help() {
            output.push('\n');
            for (i, help_line) in help.lines().enumerate() {
                if i == 0 {
                    output.push_str(&format!(" {}help:{} {}\n", cyan, reset, help_line));
                } else {
                    output.push_str(&format!("       {}\n", help_line.trim_start()));
                }
            }
        }

        output.push('\n');
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ambiguous_receiver_messages() {
        let none = GenerateError::AmbiguousReceiver {
            function: "nvim_foo_bar".to_string(),
            candidates: vec![],
        };
        assert!(none.to_string().contains("nvim_foo_bar"));
        assert!(none.to_string().contains("matches no extension type prefix"));

        let many = GenerateError::AmbiguousReceiver {
            function: "nvim_buf_x".to_string(),
            candidates: vec!["buffer".to_string(), "buf2".to_string()],
        };
        assert!(many.to_string().contains("(buffer, buf2)"));
        assert_eq!(many.entry(), Some("nvim_buf_x"));
    }

    #[test]
    fn test_ambiguous_receiver_help_points_at_types_and_method_flag() {
        let err = GenerateError::AmbiguousReceiver {
            function: "nvim_tabpage_list_wins".to_string(),
            candidates: vec![],
        };
        let rendered = err.render();
        assert!(rendered.contains(" help: a method needs exactly one `types` entry"));
        assert!(rendered.contains(
            "\n       check for a missing `types` entry or a wrong `method` flag\n"
        ));
        assert!(!rendered.contains("--oldest-api-level"));
    }

    #[test]
    fn test_render_plain_has_no_escape_codes() {
        let err = GenerateError::schema("nvim_get_mode", "unknown type `Tuple`");
        let rendered = err.render();
        assert!(rendered.contains("error: Schema violation"));
        assert!(rendered.contains("`nvim_get_mode`: unknown type `Tuple`"));
        assert!(rendered.contains("help:"));
        assert!(!rendered.contains('\x1b'));
    }

    #[test]
    fn test_render_includes_cause_chain() {
        let io = io::Error::new(io::ErrorKind::NotFound, "no such file");
        let err = GenerateError::unavailable("nvim --api-info", GenerateError::Write {
            path: PathBuf::from("/tmp/x"),
            source: io,
        });
        let rendered = err.render();
        assert!(rendered.contains("caused by: no such file"));
        assert_eq!(err.kind(), ErrorKind::SourceUnavailable);
    }
}
