use super::Output;
use crate::error::GenerateError;
use crate::naming::{member_name, parameter_name, require_identifier, string_literal};
use crate::schema::Function;
use crate::types::TypeMapper;

/// Name of the receiver handle field on wrapper classes
pub const RECEIVER_FIELD: &str = "_msgPackExtObj";
/// Name of the owning client field on wrapper classes
pub const CLIENT_FIELD: &str = "_api";

/// C# stub for one RPC function
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodStub {
    /// Exact method name sent on the wire
    pub wire_name: String,
    pub name: String,
    /// `(type, name)` in wire order, receiver excluded
    pub params: Vec<(String, String)>,
    /// Mapped result type, `None` for void
    pub result: Option<String>,
    pub is_instance: bool,
}

impl MethodStub {
    pub fn build(
        function: &Function,
        prefix_to_remove: &str,
        is_instance_method: bool,
        types: &TypeMapper,
    ) -> Result<Self, GenerateError> {
        let short_name = function.name.strip_prefix(prefix_to_remove).ok_or_else(|| {
            GenerateError::schema(
                &function.name,
                format!("expected the name to start with `{}`", prefix_to_remove),
            )
        })?;

        let params = if is_instance_method {
            match function.params.split_first() {
                Some((_receiver, rest)) => rest,
                None => {
                    return Err(GenerateError::schema(
                        &function.name,
                        "instance method has no receiver parameter",
                    ));
                }
            }
        } else {
            &function.params[..]
        };

        let name = require_identifier(member_name(short_name), &function.name)
            .map_err(|reason| GenerateError::schema(&function.name, reason))?;

        let params = params
            .iter()
            .map(|p| {
                let param = require_identifier(parameter_name(&p.name), &p.name).map_err(
                    |reason| GenerateError::schema(&function.name, format!("parameter {}", reason)),
                )?;
                Ok((types.map(&p.ty)?, param))
            })
            .collect::<Result<Vec<_>, GenerateError>>()?;

        let result = if function.return_type.is_void() {
            None
        } else {
            Some(types.map(&function.return_type)?)
        };

        Ok(Self {
            wire_name: function.name.clone(),
            name,
            params,
            result,
            is_instance: is_instance_method,
        })
    }

    pub fn return_type(&self) -> String {
        match &self.result {
            Some(ty) => format!("Task<{}>", ty),
            None => "Task".to_string(),
        }
    }

    /// Request arguments: the receiver handle first for instance methods
    pub fn arguments(&self) -> Vec<String> {
        let receiver = self.is_instance.then(|| RECEIVER_FIELD.to_string());
        receiver
            .into_iter()
            .chain(self.params.iter().map(|(_, name)| name.clone()))
            .collect()
    }

    pub fn render(&self, output: &mut Output, level: usize) {
        let params: Vec<String> = self
            .params
            .iter()
            .map(|(ty, name)| format!("{} {}", ty, name))
            .collect();
        output.line(
            level,
            &format!(
                "public {} {}({}) =>",
                self.return_type(),
                self.name,
                params.join(", ")
            ),
        );

        let target = if self.is_instance {
            format!("{}.SendAndReceive", CLIENT_FIELD)
        } else {
            "SendAndReceive".to_string()
        };
        let type_args = match &self.result {
            Some(ty) => format!("<{}>", ty),
            None => String::new(),
        };
        output.line(level + 1, &format!("{}{}(new NvimRequest", target, type_args));
        output.open(level + 1);
        output.line(
            level + 2,
            &format!("Method = {},", string_literal(&self.wire_name)),
        );
        let arguments = self.arguments();
        if arguments.is_empty() {
            output.line(level + 2, "Arguments = new object[0]");
        } else {
            output.line(
                level + 2,
                &format!("Arguments = new object[] {{ {} }}", arguments.join(", ")),
            );
        }
        output.close(level + 1, ");");
    }
}
