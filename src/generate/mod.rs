mod csharp;
mod dispatch;
mod events;
mod methods;
mod output;
mod wrappers;

pub use csharp::CSharpGenerator;
pub use dispatch::{EXTENSION_DISPATCH_SIGNATURE, render_extension_dispatch};
pub use events::{DISPATCH_SIGNATURE, EventStub, render_dispatch};
pub use methods::MethodStub;
pub use output::Output;
pub use wrappers::WrapperStub;

use crate::Options;
use crate::error::GenerateError;
use crate::transform::Plan;

/// Counts of what a run emitted
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GenerateStats {
    pub functions: usize,
    pub methods: usize,
    pub events: usize,
    pub wrappers: usize,
}

/// Generation result
#[derive(Debug, Clone)]
pub struct GenerateResult {
    pub code: String,
    pub stats: GenerateStats,
}

/// Generator trait - turns a plan into source text
pub trait Generator {
    fn generate(&self, plan: &Plan<'_>, options: &Options) -> Result<GenerateResult, GenerateError>;
}
