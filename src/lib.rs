//! Generates typed .NET client bindings for Neovim's msgpack-RPC API.
//!
//! The input is the document `nvim --api-info` prints. The output is one C#
//! source file with async method stubs, UI events, remote handle wrappers and
//! the dispatch routines that tie them to the wire format.

pub mod document;
pub mod error;
pub mod generate;
pub mod naming;
pub mod pipeline;
pub mod schema;
pub mod source;
pub mod transform;
pub mod types;
pub mod writer;

pub use document::ApiMetadata;
pub use error::{ErrorKind, GenerateError};
pub use generate::{CSharpGenerator, GenerateResult, GenerateStats, Generator};
pub use pipeline::Pipeline;
pub use source::{MetadataFile, MetadataSource, NvimProcess};
pub use writer::{DocumentWriter, FileWriter, StdoutWriter};

/// Entries deprecated before this API level are left out by default
pub const DEFAULT_OLDEST_SUPPORTED_API_LEVEL: u64 = 2;

/// Configuration for generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    /// Namespace of the generated file (default: "NvimClient.API")
    pub namespace: String,
    /// Name of the partial client class (default: "NvimAPI")
    pub class_name: String,
    /// Prefix stripped from top-level function names (default: "nvim_")
    pub top_level_prefix: String,
    /// Prefix of wrapper class names (default: "Nvim")
    pub wrapper_prefix: String,
    /// Entries with `deprecated_since` below this level are skipped
    pub oldest_supported_api_level: u64,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            namespace: "NvimClient.API".to_string(),
            class_name: "NvimAPI".to_string(),
            top_level_prefix: "nvim_".to_string(),
            wrapper_prefix: "Nvim".to_string(),
            oldest_supported_api_level: DEFAULT_OLDEST_SUPPORTED_API_LEVEL,
        }
    }
}

/// Generate C# from a document with the given options.
pub fn generate(doc: &ApiMetadata, options: Options) -> Result<String, GenerateError> {
    Pipeline::new(options).compile(doc).map(|result| result.code)
}
