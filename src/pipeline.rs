use crate::Options;
use crate::document::ApiMetadata;
use crate::error::GenerateError;
use crate::generate::{CSharpGenerator, GenerateResult, Generator};
use crate::schema::Schema;
use crate::source::MetadataSource;
use crate::transform::{DeprecationFilter, Plan};
use crate::writer::DocumentWriter;

/// Sequences one generation run: document -> schema -> plan -> text -> writer
pub struct Pipeline {
    generator: Box<dyn Generator>,
    options: Options,
}

impl Pipeline {
    pub fn new(options: Options) -> Self {
        Self {
            generator: Box::new(CSharpGenerator::new()),
            options,
        }
    }

    /// C# generator with default options
    pub fn standard() -> Self {
        Self::new(Options::default())
    }

    pub fn with_generator<G: Generator + 'static>(mut self, generator: G) -> Self {
        self.generator = Box::new(generator);
        self
    }

    /// Generate source text from an already-loaded document
    pub fn compile(&self, doc: &ApiMetadata) -> Result<GenerateResult, GenerateError> {
        let filter = DeprecationFilter::new(self.options.oldest_supported_api_level);
        let schema = Schema::build(doc, filter)?;
        let plan = Plan::build(&schema)?;
        self.generator.generate(&plan, &self.options)
    }

    /// Fetch, generate and write. The writer is only called once the whole
    /// document has been generated.
    pub fn run(
        &self,
        source: &dyn MetadataSource,
        writer: &mut dyn DocumentWriter,
    ) -> Result<GenerateResult, GenerateError> {
        tracing::info!(source = %source.describe(), "loading api metadata");
        let doc = source.fetch()?;
        tracing::debug!(
            functions = doc.functions.len(),
            ui_events = doc.ui_events.len(),
            types = doc.types.len(),
            "loaded api metadata"
        );

        let result = self.compile(&doc)?;
        writer.write(&result.code)?;
        Ok(result)
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::standard()
    }
}
