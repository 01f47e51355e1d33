use crate::document::{self, ApiMetadata, ApiVersion};
use crate::error::GenerateError;
use crate::naming::{member_name, pascal_case, require_identifier};
use crate::transform::DeprecationFilter;
use std::collections::{BTreeMap, BTreeSet};

/// Wire-level type descriptor
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum WireType {
    Integer,
    Float,
    Boolean,
    String,
    Binary,
    Object,
    LuaRef,
    Void,
    Array(Box<WireType>),
    Map(Box<WireType>, Box<WireType>),
    /// Remote handle type, by its key in the `types` table
    Extension(String),
}

impl WireType {
    /// Parse a descriptor such as `Integer`, `ArrayOf(String, 2)` or `Buffer`.
    ///
    /// `extensions` holds the keys of the document's `types` table; any bare
    /// name outside the built-in set and that table is rejected.
    pub fn parse(descriptor: &str, extensions: &BTreeSet<String>) -> Result<WireType, String> {
        let descriptor = descriptor.trim();
        if let Some(inner) = strip_call(descriptor, "ArrayOf") {
            // `ArrayOf(T, N)` carries a fixed length that has no bearing on the
            // generated type
            let element = split_top_level(inner)
                .into_iter()
                .next()
                .ok_or_else(|| format!("empty ArrayOf in `{}`", descriptor))?;
            return Ok(WireType::Array(Box::new(Self::parse(element, extensions)?)));
        }
        if let Some(inner) = strip_call(descriptor, "DictOf") {
            let value = Self::parse(inner, extensions)?;
            return Ok(WireType::Map(Box::new(WireType::String), Box::new(value)));
        }
        // `Dict(<keyset>)` names an options table; its keys are not typed
        if strip_call(descriptor, "Dict").is_some() {
            return Ok(WireType::Map(Box::new(WireType::String), Box::new(WireType::Object)));
        }

        let ty = match descriptor {
            "Integer" => WireType::Integer,
            "Float" => WireType::Float,
            "Boolean" => WireType::Boolean,
            "String" => WireType::String,
            "Binary" => WireType::Binary,
            "Object" => WireType::Object,
            "LuaRef" => WireType::LuaRef,
            "void" => WireType::Void,
            "Array" => WireType::Array(Box::new(WireType::Object)),
            "Dictionary" | "Dict" => {
                WireType::Map(Box::new(WireType::String), Box::new(WireType::Object))
            }
            name => match resolve_extension(name, extensions) {
                Some(key) => WireType::Extension(key.to_string()),
                None => return Err(format!("unknown wire type `{}`", name)),
            },
        };
        Ok(ty)
    }

    pub fn is_void(&self) -> bool {
        matches!(self, WireType::Void)
    }
}

/// Descriptors name types as `Buffer` while some documents key them as
/// `buffer`; an exact key wins over a case-insensitive one.
fn resolve_extension<'a>(name: &str, extensions: &'a BTreeSet<String>) -> Option<&'a str> {
    if name.is_empty() {
        return None;
    }
    extensions
        .get(name)
        .or_else(|| extensions.iter().find(|key| key.eq_ignore_ascii_case(name)))
        .map(String::as_str)
}

/// `strip_call("ArrayOf(Integer)", "ArrayOf") == Some("Integer")`
fn strip_call<'a>(descriptor: &'a str, name: &str) -> Option<&'a str> {
    descriptor
        .strip_prefix(name)?
        .trim_start()
        .strip_prefix('(')?
        .strip_suffix(')')
}

/// Split on commas that are not nested inside parentheses
fn split_top_level(args: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, ch) in args.char_indices() {
        match ch {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                parts.push(args[start..i].trim());
                start = i + 1;
            }
            _ => {}
        }
    }
    let last = args[start..].trim();
    if !last.is_empty() {
        parts.push(last);
    }
    parts
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    pub name: String,
    pub ty: WireType,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Function {
    pub name: String,
    pub params: Vec<Param>,
    pub return_type: WireType,
    pub is_method: bool,
    pub since: Option<u64>,
    pub deprecated_since: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiEvent {
    pub name: String,
    pub params: Vec<Param>,
    pub since: Option<u64>,
    pub deprecated_since: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionType {
    pub name: String,
    pub id: i64,
    pub prefix: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorType {
    pub name: String,
    pub id: i64,
}

/// Validated, read-only view of one metadata document.
///
/// Only the functions and UI events that pass the deprecation filter are
/// carried over, and only their descriptors are parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    pub version: Option<ApiVersion>,
    pub functions: Vec<Function>,
    pub ui_events: Vec<UiEvent>,
    /// Sorted by key
    pub extension_types: Vec<ExtensionType>,
    /// Sorted by id
    pub error_types: Vec<ErrorType>,
}

impl Schema {
    pub fn build(doc: &ApiMetadata, filter: DeprecationFilter) -> Result<Schema, GenerateError> {
        let extension_types = build_extension_types(doc)?;
        let known: BTreeSet<String> = doc.types.keys().cloned().collect();

        let functions = filter
            .apply(&doc.functions)
            .into_iter()
            .map(|f| {
                Ok(Function {
                    name: f.name.clone(),
                    params: build_params(&f.name, &f.parameters, &known)?,
                    return_type: WireType::parse(&f.return_type, &known)
                        .map_err(|reason| GenerateError::schema(&f.name, reason))?,
                    is_method: f.method,
                    since: f.since,
                    deprecated_since: f.deprecated_since,
                })
            })
            .collect::<Result<Vec<_>, GenerateError>>()?;

        let ui_events = filter
            .apply(&doc.ui_events)
            .into_iter()
            .map(|e| {
                Ok(UiEvent {
                    name: e.name.clone(),
                    params: build_params(&e.name, &e.parameters, &known)?,
                    since: e.since,
                    deprecated_since: e.deprecated_since,
                })
            })
            .collect::<Result<Vec<_>, GenerateError>>()?;

        tracing::debug!(
            functions = functions.len(),
            dropped_functions = doc.functions.len() - functions.len(),
            ui_events = ui_events.len(),
            dropped_ui_events = doc.ui_events.len() - ui_events.len(),
            "filtered deprecated entries"
        );

        let error_types = build_error_types(doc)?;

        Ok(Schema {
            version: doc.version.clone(),
            functions,
            ui_events,
            extension_types,
            error_types,
        })
    }
}

fn build_params(
    owner: &str,
    params: &[document::Parameter],
    known: &BTreeSet<String>,
) -> Result<Vec<Param>, GenerateError> {
    params
        .iter()
        .map(|p| {
            let ty = WireType::parse(&p.ty, known).map_err(|reason| {
                GenerateError::schema(owner, format!("parameter `{}`: {}", p.name, reason))
            })?;
            Ok(Param {
                name: p.name.clone(),
                ty,
            })
        })
        .collect()
}

fn build_extension_types(doc: &ApiMetadata) -> Result<Vec<ExtensionType>, GenerateError> {
    let types: Vec<ExtensionType> = doc
        .types
        .iter()
        .map(|(name, def)| ExtensionType {
            name: name.clone(),
            id: def.id,
            prefix: def.prefix.clone(),
        })
        .collect();

    // Wrapper classes are named after the PascalCase key
    let mut class_names: BTreeMap<String, &str> = BTreeMap::new();
    for ty in &types {
        let class_name = require_identifier(pascal_case(&ty.name), &ty.name)
            .map_err(|reason| GenerateError::schema(&ty.name, reason))?;
        if let Some(other) = class_names.insert(class_name.clone(), &ty.name) {
            return Err(GenerateError::schema(
                &ty.name,
                format!("wrapper name `{}` is already taken by `{}`", class_name, other),
            ));
        }
    }

    for (i, a) in types.iter().enumerate() {
        if a.prefix.is_empty() {
            return Err(GenerateError::schema(&a.name, "extension type has an empty prefix"));
        }
        for b in &types[i + 1..] {
            if a.id == b.id {
                return Err(GenerateError::schema(
                    &b.name,
                    format!("wire tag {} is already used by `{}`", b.id, a.name),
                ));
            }
            if a.prefix.starts_with(&b.prefix) || b.prefix.starts_with(&a.prefix) {
                return Err(GenerateError::schema(
                    &b.name,
                    format!(
                        "prefix `{}` overlaps prefix `{}` of `{}`",
                        b.prefix, a.prefix, a.name
                    ),
                ));
            }
        }
    }

    Ok(types)
}

fn build_error_types(doc: &ApiMetadata) -> Result<Vec<ErrorType>, GenerateError> {
    let mut members: BTreeMap<String, &str> = BTreeMap::new();
    let mut error_types = Vec::with_capacity(doc.error_types.len());
    for (name, def) in &doc.error_types {
        let member = require_identifier(member_name(name), name)
            .map_err(|reason| GenerateError::schema(name, reason))?;
        if let Some(other) = members.insert(member.clone(), name) {
            return Err(GenerateError::schema(
                name,
                format!("enum member `{}` is already taken by `{}`", member, other),
            ));
        }
        error_types.push(ErrorType {
            name: name.clone(),
            id: def.id,
        });
    }
    error_types.sort_by(|a, b| a.id.cmp(&b.id).then_with(|| a.name.cmp(&b.name)));
    Ok(error_types)
}
