use super::methods::{CLIENT_FIELD, MethodStub, RECEIVER_FIELD};
use super::Output;
use crate::error::GenerateError;
use crate::transform::WrapperPlan;
use crate::types::{TypeMapper, wrapper_name};

/// Remote handle class for one extension type
#[derive(Debug, Clone)]
pub struct WrapperStub {
    pub class_name: String,
    pub methods: Vec<MethodStub>,
}

impl WrapperStub {
    pub fn build(
        plan: &WrapperPlan<'_>,
        wrapper_prefix: &str,
        types: &TypeMapper,
    ) -> Result<Self, GenerateError> {
        let methods = plan
            .methods
            .iter()
            .map(|function| MethodStub::build(function, &plan.ty.prefix, true, types))
            .collect::<Result<Vec<_>, GenerateError>>()?;

        Ok(Self {
            class_name: wrapper_name(wrapper_prefix, &plan.ty.name),
            methods,
        })
    }

    /// Emit the class; `client_class` is the enclosing API class.
    ///
    /// The constructor is `internal`: wrappers only come back from
    /// extension dispatch.
    pub fn render(&self, client_class: &str, output: &mut Output, level: usize) {
        let body = level + 1;
        output.line(level, &format!("public class {}", self.class_name));
        output.open(level);
        output.line(
            body,
            &format!("private readonly {} {};", client_class, CLIENT_FIELD),
        );
        output.line(
            body,
            &format!(
                "private readonly MessagePackExtendedTypeObject {};",
                RECEIVER_FIELD
            ),
        );
        output.blank_line();
        output.line(
            body,
            &format!(
                "internal {}({} api, MessagePackExtendedTypeObject msgPackExtObj)",
                self.class_name, client_class
            ),
        );
        output.open(body);
        output.line(body + 1, &format!("{} = api;", CLIENT_FIELD));
        output.line(body + 1, &format!("{} = msgPackExtObj;", RECEIVER_FIELD));
        output.close(body, "");
        for method in &self.methods {
            output.blank_line();
            method.render(output, body);
        }
        output.close(level, "");
    }
}
