use super::Output;
use crate::error::GenerateError;
use crate::naming::{
    escape_if_reserved, member_name, pascal_case, require_identifier, string_literal,
};
use crate::schema::UiEvent;
use crate::types::TypeMapper;

/// Signature of the generated UI event dispatcher
pub const DISPATCH_SIGNATURE: &str = "private void CallUIEventHandler(string eventName, object[] args)";

/// Subscribable event for one UI notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventStub {
    pub wire_name: String,
    /// PascalCase base name; the event is `<base>Event`, the carrier `<base>EventArgs`
    pub base_name: String,
    /// `(type, property)` in wire order
    pub fields: Vec<(String, String)>,
}

impl EventStub {
    pub fn build(event: &UiEvent, types: &TypeMapper) -> Result<Self, GenerateError> {
        let fields = event
            .params
            .iter()
            .map(|p| {
                let ty = types.map(&p.ty).map_err(|err| match err {
                    GenerateError::SchemaViolation { reason, .. } => GenerateError::schema(
                        &event.name,
                        format!("parameter `{}`: {}", p.name, reason),
                    ),
                    other => other,
                })?;
                let field = require_identifier(member_name(&p.name), &p.name).map_err(
                    |reason| GenerateError::schema(&event.name, format!("parameter {}", reason)),
                )?;
                Ok((ty, field))
            })
            .collect::<Result<Vec<_>, GenerateError>>()?;

        let base_name = require_identifier(pascal_case(&event.name), &event.name)
            .map_err(|reason| GenerateError::schema(&event.name, reason))?;

        Ok(Self {
            wire_name: event.name.clone(),
            base_name,
            fields,
        })
    }

    pub fn event_name(&self) -> String {
        escape_if_reserved(&format!("{}Event", self.base_name))
    }

    /// Carrier type, `None` for parameterless events
    pub fn args_type(&self) -> Option<String> {
        if self.fields.is_empty() {
            None
        } else {
            Some(format!("{}EventArgs", self.base_name))
        }
    }

    pub fn render_declaration(&self, output: &mut Output, level: usize) {
        let handler = match self.args_type() {
            Some(args) => format!("EventHandler<{}>", args),
            None => "EventHandler".to_string(),
        };
        output.line(
            level,
            &format!("public event {} {};", handler, self.event_name()),
        );
    }

    /// Emit the `EventArgs` subclass; nothing for parameterless events
    pub fn render_args_class(&self, output: &mut Output, level: usize) {
        let Some(args) = self.args_type() else {
            return;
        };
        output.line(level, &format!("public class {} : EventArgs", args));
        output.open(level);
        for (ty, name) in &self.fields {
            output.line(level + 1, &format!("public {} {} {{ get; set; }}", ty, name));
        }
        output.close(level, "");
    }

    /// Emit the `case` arm of the dispatch switch
    fn render_case(&self, output: &mut Output, level: usize) {
        output.line(level, &format!("case {}:", string_literal(&self.wire_name)));
        let body = level + 1;
        match self.args_type() {
            Some(args) => {
                output.line(
                    body,
                    &format!("{}?.Invoke(this, new {}", self.event_name(), args),
                );
                output.open(body);
                let last = self.fields.len() - 1;
                for (index, (ty, name)) in self.fields.iter().enumerate() {
                    let separator = if index == last { "" } else { "," };
                    output.line(
                        body + 1,
                        &format!("{} = ({}) args[{}]{}", name, ty, index, separator),
                    );
                }
                output.close(body, ");");
            }
            None => {
                output.line(
                    body,
                    &format!("{}?.Invoke(this, EventArgs.Empty);", self.event_name()),
                );
            }
        }
        output.line(body, "break;");
    }
}

/// Emit the routine that routes a named UI notification to its event.
///
/// There is no `default` arm: names outside the generated set are ignored.
pub fn render_dispatch(events: &[EventStub], output: &mut Output, level: usize) {
    output.line(level, DISPATCH_SIGNATURE);
    output.open(level);
    output.line(level + 1, "switch (eventName)");
    output.open(level + 1);
    for event in events {
        event.render_case(output, level + 2);
    }
    output.close(level + 1, "");
    output.close(level, "");
}
