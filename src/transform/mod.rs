mod deprecation;
mod receivers;

pub use deprecation::{Deprecatable, DeprecationFilter};
pub use receivers::{WrapperPlan, resolve};

use crate::document::ApiVersion;
use crate::error::GenerateError;
use crate::schema::{ErrorType, ExtensionType, Function, Schema, UiEvent};

/// What the generator will emit, borrowed from a [`Schema`].
///
/// Every instance method sits under its extension type.
#[derive(Debug, Clone)]
pub struct Plan<'a> {
    pub version: Option<&'a ApiVersion>,
    pub top_level: Vec<&'a Function>,
    pub wrappers: Vec<WrapperPlan<'a>>,
    pub events: Vec<&'a UiEvent>,
    pub extension_types: &'a [ExtensionType],
    pub error_types: &'a [ErrorType],
}

impl<'a> Plan<'a> {
    pub fn build(schema: &'a Schema) -> Result<Self, GenerateError> {
        let functions: Vec<&Function> = schema.functions.iter().collect();
        let events: Vec<&UiEvent> = schema.ui_events.iter().collect();
        let (top_level, wrappers) = resolve(&functions, &schema.extension_types)?;

        tracing::debug!(
            top_level = top_level.len(),
            wrappers = wrappers.len(),
            events = events.len(),
            "planned bindings"
        );

        Ok(Plan {
            version: schema.version.as_ref(),
            top_level,
            wrappers,
            events,
            extension_types: &schema.extension_types,
            error_types: &schema.error_types,
        })
    }
}
