//! End-to-end generation tests over small hand-written documents

use nvim_bindgen::transform::Plan;
use nvim_bindgen::{
    ApiMetadata, DocumentWriter, ErrorKind, FileWriter, GenerateError, GenerateResult,
    GenerateStats, Generator, MetadataSource, Options, Pipeline, generate,
};
use pretty_assertions::assert_eq;
use std::fs;

fn doc(json: &str) -> ApiMetadata {
    serde_json::from_str(json).unwrap()
}

fn generate_default(json: &str) -> String {
    generate(&doc(json), Options::default()).unwrap()
}

/// Lines of `code` from the one starting with `first` up to and including
/// the first line equal to `last`
fn block<'a>(code: &'a str, first: &str, last: &str) -> Vec<&'a str> {
    let lines: Vec<&str> = code.lines().collect();
    let start = lines
        .iter()
        .position(|l| l.trim_start().starts_with(first))
        .unwrap_or_else(|| panic!("no line starting with {first:?} in:\n{code}"));
    let end = lines[start..]
        .iter()
        .position(|l| l.trim() == last)
        .unwrap_or_else(|| panic!("no closing {last:?} after {first:?}"));
    lines[start..=start + end].iter().map(|l| l.trim()).collect()
}

#[test]
fn test_top_level_function_stub() {
    let code = generate_default(
        r#"{"functions": [
            {"name": "nvim_get_current_line", "parameters": [], "return_type": "String", "method": false, "since": 1}
        ]}"#,
    );

    assert_eq!(
        block(&code, "public Task<string> GetCurrentLine()", "});"),
        vec![
            "public Task<string> GetCurrentLine() =>",
            "SendAndReceive<string>(new NvimRequest",
            "{",
            "Method = \"nvim_get_current_line\",",
            "Arguments = new object[0]",
            "});",
        ]
    );
}

#[test]
fn test_method_lands_on_its_wrapper() {
    let code = generate_default(
        r#"{
            "functions": [
                {"name": "nvim_buf_line_count", "parameters": [["Buffer", "buffer"]], "return_type": "Integer", "method": true, "since": 1}
            ],
            "types": {"buffer": {"id": 0, "prefix": "nvim_buf_"}}
        }"#,
    );

    assert_eq!(
        block(&code, "public Task<long> LineCount()", "});"),
        vec![
            "public Task<long> LineCount() =>",
            "_api.SendAndReceive<long>(new NvimRequest",
            "{",
            "Method = \"nvim_buf_line_count\",",
            "Arguments = new object[] { _msgPackExtObj }",
            "});",
        ]
    );
    assert!(code.contains("public class NvimBuffer"));
    assert!(code.contains("return new NvimBuffer(this, msgPackExtObj);"));
    // Not duplicated as a top-level stub
    assert!(!code.contains("BufLineCount"));
}

#[test]
fn test_non_method_with_prefix_stays_top_level() {
    let code = generate_default(
        r#"{
            "functions": [
                {"name": "nvim_win_set_height", "parameters": [["Window", "window"], ["Integer", "height"]], "return_type": "void", "method": false, "since": 1}
            ],
            "types": {"Window": {"id": 1, "prefix": "nvim_win_"}}
        }"#,
    );

    assert!(code.contains("public Task WinSetHeight(NvimWindow window, long height) =>"));
    assert!(code.contains("Arguments = new object[] { window, height }"));
    assert_eq!(code.matches("nvim_win_set_height").count(), 1);
    assert!(!code.contains("public Task SetHeight("));
}

#[test]
fn test_ui_event_with_parameters() {
    let code = generate_default(
        r#"{"ui_events": [
            {"name": "resize", "parameters": [["Integer", "width"], ["Integer", "height"]], "since": 3}
        ]}"#,
    );

    assert!(code.contains("public event EventHandler<ResizeEventArgs> ResizeEvent;"));
    assert_eq!(
        block(&code, "public class ResizeEventArgs", "}"),
        vec![
            "public class ResizeEventArgs : EventArgs",
            "{",
            "public long Width { get; set; }",
            "public long Height { get; set; }",
            "}",
        ]
    );
    assert_eq!(
        block(&code, "case \"resize\":", "break;"),
        vec![
            "case \"resize\":",
            "ResizeEvent?.Invoke(this, new ResizeEventArgs",
            "{",
            "Width = (long) args[0],",
            "Height = (long) args[1]",
            "});",
            "break;",
        ]
    );
}

#[test]
fn test_ui_event_without_parameters() {
    let code = generate_default(r#"{"ui_events": [{"name": "flush", "parameters": [], "since": 3}]}"#);

    assert!(code.contains("public event EventHandler FlushEvent;"));
    assert!(code.contains("FlushEvent?.Invoke(this, EventArgs.Empty);"));
    assert!(!code.contains("FlushEventArgs"));
}

#[test]
fn test_unmatched_method_is_rejected() {
    let err = generate(
        &doc(
            r#"{
                "functions": [
                    {"name": "nvim_foo_bar", "parameters": [["Integer", "x"]], "return_type": "void", "method": true, "since": 1}
                ],
                "types": {"Buffer": {"id": 0, "prefix": "nvim_buf_"}}
            }"#,
        ),
        Options::default(),
    )
    .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::AmbiguousReceiver);
    assert!(err.to_string().contains("nvim_foo_bar"));
}

#[test]
fn test_unknown_wire_type_names_the_entry() {
    let err = generate(
        &doc(
            r#"{"functions": [
                {"name": "nvim_eval", "parameters": [["Mystery", "expr"]], "return_type": "Object", "method": false, "since": 1}
            ]}"#,
        ),
        Options::default(),
    )
    .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::SchemaViolation);
    assert!(err.to_string().contains("nvim_eval"));
    assert!(err.to_string().contains("Mystery"));
}

#[test]
fn test_deprecated_entries_are_skipped() {
    let json = r#"{
        "functions": [
            {"name": "nvim_get_current_line", "parameters": [], "return_type": "String", "method": false, "since": 1},
            {"name": "nvim_get_old_line", "parameters": [], "return_type": "String", "method": false, "since": 1, "deprecated_since": 1},
            {"name": "vim_get_current_line", "parameters": [], "return_type": "String", "method": false, "deprecated_since": 1}
        ],
        "ui_events": [
            {"name": "visual_bell", "parameters": [], "since": 3, "deprecated_since": 1}
        ]
    }"#;

    let code = generate_default(json);
    assert!(!code.contains("\"vim_get_current_line\""));
    assert!(!code.contains("GetOldLine"));
    assert!(!code.contains("VisualBell"));
    assert!(code.contains("\"nvim_get_current_line\""));

    // Deprecated at or after the threshold stays
    let options = Options {
        oldest_supported_api_level: 1,
        ..Options::default()
    };
    let err = generate(&doc(json), options).unwrap_err();
    // ...which surfaces the old alias that lacks the `nvim_` prefix
    assert_eq!(err.kind(), ErrorKind::SchemaViolation);
    assert_eq!(err.entry(), Some("vim_get_current_line"));
}

#[test]
fn test_lower_threshold_keeps_deprecated_entries() {
    let options = Options {
        oldest_supported_api_level: 0,
        ..Options::default()
    };
    let code = generate(
        &doc(
            r#"{
                "functions": [
                    {"name": "nvim_get_old_line", "parameters": [], "return_type": "String", "method": false, "since": 1, "deprecated_since": 1}
                ],
                "ui_events": [
                    {"name": "visual_bell", "parameters": [], "since": 3, "deprecated_since": 1}
                ]
            }"#,
        ),
        options,
    )
    .unwrap();

    assert!(code.contains("public Task<string> GetOldLine() =>"));
    assert!(code.contains("public event EventHandler VisualBellEvent;"));
}

#[test]
fn test_output_is_deterministic() {
    let json = fs::read_to_string(concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/basic.json"))
        .unwrap();
    let first = generate_default(&json);
    let second = generate_default(&json);
    assert_eq!(first, second);
}

#[test]
fn test_custom_namespace_and_class() {
    let options = Options {
        namespace: "Editor.Rpc".to_string(),
        class_name: "Client".to_string(),
        ..Options::default()
    };
    let code = generate(
        &doc(r#"{"types": {"Tabpage": {"id": 2, "prefix": "nvim_tabpage_"}}}"#),
        options,
    )
    .unwrap();

    assert!(code.contains("namespace Editor.Rpc"));
    assert!(code.contains("public partial class Client"));
    assert!(code.contains("private readonly Client _api;"));
    assert!(code.contains("internal NvimTabpage(Client api, MessagePackExtendedTypeObject msgPackExtObj)"));
}

#[test]
fn test_stats_count_emitted_entries() {
    let json = fs::read_to_string(concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/basic.json"))
        .unwrap();
    let result = Pipeline::standard().compile(&doc(&json)).unwrap();

    assert_eq!(result.stats.functions, 6);
    assert_eq!(result.stats.methods, 3);
    assert_eq!(result.stats.wrappers, 3);
    assert_eq!(result.stats.events, 3);
}

struct FailingSource;

impl MetadataSource for FailingSource {
    fn describe(&self) -> String {
        "broken source".to_string()
    }

    fn fetch(&self) -> Result<ApiMetadata, GenerateError> {
        Err(GenerateError::unavailable(self.describe(), "nvim crashed"))
    }
}

#[test]
fn test_failed_run_leaves_existing_output_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("NvimAPI.generated.cs");
    fs::write(&path, "// previous output\n").unwrap();

    let mut writer = FileWriter::new(&path);
    let err = Pipeline::standard()
        .run(&FailingSource, &mut writer)
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::SourceUnavailable);
    assert_eq!(fs::read_to_string(&path).unwrap(), "// previous output\n");
}

#[test]
fn test_schema_error_leaves_existing_output_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("NvimAPI.generated.cs");
    fs::write(&path, "// previous output\n").unwrap();

    let bad = doc(
        r#"{"functions": [
            {"name": "nvim_get_hl", "parameters": [["Tuple(Integer)", "opts"]], "return_type": "void", "method": false, "since": 1}
        ]}"#,
    );
    let mut writer = FileWriter::new(&path);
    assert!(Pipeline::standard().run(&bad, &mut writer).is_err());
    assert_eq!(fs::read_to_string(&path).unwrap(), "// previous output\n");
}

#[test]
fn test_successful_run_replaces_output() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out").join("NvimAPI.generated.cs");

    let mut writer = FileWriter::new(&path);
    let source = doc(r#"{"functions": []}"#);
    let result = Pipeline::standard().run(&source, &mut writer).unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), result.code);
    writer.write("// again\n").unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), "// again\n");
}

#[test]
fn test_deprecated_entry_with_unknown_type_is_skipped() {
    let code = generate_default(
        r#"{"functions": [
            {"name": "nvim_get_current_line", "parameters": [], "return_type": "String", "method": false, "since": 1},
            {"name": "vim_old", "parameters": [["Tuple(Integer)", "x"]], "return_type": "void", "method": false, "deprecated_since": 1}
        ]}"#,
    );

    assert!(code.contains("public Task<string> GetCurrentLine() =>"));
    assert!(!code.contains("vim_old"));
}

#[test]
fn test_extension_keys_with_same_wrapper_name_are_rejected() {
    let err = generate(
        &doc(
            r#"{"types": {
                "Buffer": {"id": 0, "prefix": "nvim_buf_"},
                "buffer": {"id": 1, "prefix": "nvim_bf_"}
            }}"#,
        ),
        Options::default(),
    )
    .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::SchemaViolation);
    assert_eq!(err.entry(), Some("buffer"));
}

#[test]
fn test_event_name_that_breaks_the_case_label_is_rejected() {
    let err = generate(
        &doc(r#"{"ui_events": [{"name": "a\"b", "parameters": [], "since": 3}]}"#),
        Options::default(),
    )
    .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::SchemaViolation);
    assert_eq!(err.entry(), Some("a\"b"));
}

#[test]
fn test_function_name_that_is_only_a_prefix_is_rejected() {
    let err = generate(
        &doc(
            r#"{
                "functions": [
                    {"name": "nvim_buf_", "parameters": [["Buffer", "buffer"]], "return_type": "void", "method": true, "since": 1}
                ],
                "types": {"Buffer": {"id": 0, "prefix": "nvim_buf_"}}
            }"#,
        ),
        Options::default(),
    )
    .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::SchemaViolation);
    assert_eq!(err.entry(), Some("nvim_buf_"));
}

/// Lists what a run would bind, one wire name per line
struct ManifestGenerator;

impl Generator for ManifestGenerator {
    fn generate(
        &self,
        plan: &Plan<'_>,
        options: &Options,
    ) -> Result<GenerateResult, GenerateError> {
        let mut code = format!("# {}.{}\n", options.namespace, options.class_name);
        for function in &plan.top_level {
            code.push_str(&format!("{}\n", function.name));
        }
        for wrapper in &plan.wrappers {
            for method in &wrapper.methods {
                code.push_str(&format!("{}: {}\n", wrapper.ty.name, method.name));
            }
        }
        for event in &plan.events {
            code.push_str(&format!("event {}\n", event.name));
        }

        Ok(GenerateResult {
            code,
            stats: GenerateStats {
                functions: plan.top_level.len(),
                events: plan.events.len(),
                ..GenerateStats::default()
            },
        })
    }
}

#[test]
fn test_pipeline_with_custom_generator() {
    let json = fs::read_to_string(concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/basic.json"))
        .unwrap();
    let result = Pipeline::standard()
        .with_generator(ManifestGenerator)
        .compile(&doc(&json))
        .unwrap();

    assert_eq!(
        result.code,
        "# NvimClient.API.NvimAPI\n\
         nvim_get_current_line\n\
         nvim_set_current_line\n\
         nvim_win_set_height\n\
         nvim_get_api_info\n\
         nvim_get_mode\n\
         nvim_subscribe\n\
         Buffer: nvim_buf_line_count\n\
         Buffer: nvim_buf_get_lines\n\
         Window: nvim_win_get_buf\n\
         event resize\n\
         event flush\n\
         event mode_info_set\n"
    );
    assert_eq!(result.stats.functions, 6);
    assert_eq!(result.stats.events, 3);
}
