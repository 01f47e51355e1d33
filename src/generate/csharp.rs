use super::events::{EventStub, render_dispatch};
use super::dispatch::render_extension_dispatch;
use super::methods::MethodStub;
use super::wrappers::WrapperStub;
use super::{GenerateResult, GenerateStats, Generator, Output};
use crate::Options;
use crate::document::ApiVersion;
use crate::error::GenerateError;
use crate::naming::member_name;
use crate::schema::ErrorType;
use crate::transform::Plan;
use crate::types::TypeMapper;

const USINGS: &[&str] = &[
    "System",
    "System.Collections.Generic",
    "System.Runtime.Serialization",
    "System.Threading.Tasks",
    "MsgPack",
    "NvimClient.NvimMsgpack.Models",
];

/// Emits the .NET client: one `partial class` holding events, top-level
/// stubs, both dispatch routines and the nested handle wrappers, followed by
/// the namespace-level `EventArgs` carriers.
pub struct CSharpGenerator;

impl CSharpGenerator {
    pub fn new() -> Self {
        Self
    }

    fn emit_header(&self, version: Option<&ApiVersion>, output: &mut Output) {
        output.line(0, "// <auto-generated>");
        match version {
            Some(v) => {
                let prerelease = if v.api_prerelease { "-dev" } else { "" };
                output.line(
                    0,
                    &format!(
                        "//   Generated by nvim-bindgen from Neovim {}.{}.{}{} (API level {}).",
                        v.major, v.minor, v.patch, prerelease, v.api_level
                    ),
                );
            }
            None => output.line(0, "//   Generated by nvim-bindgen."),
        }
        output.line(
            0,
            "//   Changes to this file will be lost when it is regenerated.",
        );
        output.line(0, "// </auto-generated>");
        output.blank_line();
        for using in USINGS {
            output.line(0, &format!("using {};", using));
        }
    }

    fn emit_error_types(&self, error_types: &[ErrorType], name: &str, output: &mut Output) {
        if error_types.is_empty() {
            return;
        }
        output.blank_line();
        output.line(1, &format!("public enum {}", name));
        output.open(1);
        let last = error_types.len() - 1;
        for (index, error_type) in error_types.iter().enumerate() {
            let separator = if index == last { "" } else { "," };
            output.line(
                2,
                &format!(
                    "{} = {}{}",
                    member_name(&error_type.name),
                    error_type.id,
                    separator
                ),
            );
        }
        output.close(1, "");
    }
}

impl Default for CSharpGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl Generator for CSharpGenerator {
    fn generate(&self, plan: &Plan<'_>, options: &Options) -> Result<GenerateResult, GenerateError> {
        let types = TypeMapper::new(plan.extension_types, &options.wrapper_prefix);

        // Build every stub before writing anything so a bad entry aborts the
        // whole run
        let functions = plan
            .top_level
            .iter()
            .map(|f| MethodStub::build(f, &options.top_level_prefix, false, &types))
            .collect::<Result<Vec<_>, GenerateError>>()?;
        let events = plan
            .events
            .iter()
            .map(|e| EventStub::build(e, &types))
            .collect::<Result<Vec<_>, GenerateError>>()?;
        let wrappers = plan
            .wrappers
            .iter()
            .map(|w| WrapperStub::build(w, &options.wrapper_prefix, &types))
            .collect::<Result<Vec<_>, GenerateError>>()?;

        let mut output = Output::new();
        self.emit_header(plan.version, &mut output);
        output.blank_line();
        output.line(0, &format!("namespace {}", options.namespace));
        output.open(0);
        output.line(1, &format!("public partial class {}", options.class_name));
        output.open(1);

        if !events.is_empty() {
            output.blank_line();
            for event in &events {
                event.render_declaration(&mut output, 2);
            }
        }

        for function in &functions {
            output.blank_line();
            function.render(&mut output, 2);
        }

        output.blank_line();
        render_extension_dispatch(plan.extension_types, &options.wrapper_prefix, &mut output, 2);

        output.blank_line();
        render_dispatch(&events, &mut output, 2);

        for wrapper in &wrappers {
            output.blank_line();
            wrapper.render(&options.class_name, &mut output, 2);
        }

        output.close(1, "");

        let error_enum = format!("{}ErrorType", options.wrapper_prefix);
        self.emit_error_types(plan.error_types, &error_enum, &mut output);

        for event in events.iter().filter(|e| e.args_type().is_some()) {
            output.blank_line();
            event.render_args_class(&mut output, 1);
        }

        output.close(0, "");

        let stats = GenerateStats {
            functions: functions.len(),
            methods: wrappers.iter().map(|w| w.methods.len()).sum(),
            events: events.len(),
            wrappers: wrappers.len(),
        };

        Ok(GenerateResult {
            code: output.finish(),
            stats,
        })
    }
}
