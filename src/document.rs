//! Raw API metadata document, as decoded from `nvim --api-info`.
//!
//! These types mirror the wire layout one-to-one and perform no validation;
//! see [`crate::schema::Schema::build`] for that.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Root of the metadata document
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct ApiMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<ApiVersion>,
    #[serde(default)]
    pub functions: Vec<FunctionDef>,
    #[serde(default)]
    pub ui_events: Vec<UiEventDef>,
    #[serde(default)]
    pub types: BTreeMap<String, ExtensionTypeDef>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub error_types: BTreeMap<String, ErrorTypeDef>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ApiVersion {
    #[serde(default)]
    pub major: u64,
    #[serde(default)]
    pub minor: u64,
    #[serde(default)]
    pub patch: u64,
    #[serde(default)]
    pub api_level: u64,
    #[serde(default)]
    pub api_compatible: u64,
    #[serde(default)]
    pub api_prerelease: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct FunctionDef {
    pub name: String,
    #[serde(default)]
    pub parameters: Vec<Parameter>,
    pub return_type: String,
    #[serde(default)]
    pub method: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub since: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deprecated_since: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct UiEventDef {
    pub name: String,
    #[serde(default)]
    pub parameters: Vec<Parameter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub since: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deprecated_since: Option<u64>,
}

/// A `[type, name]` pair
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(from = "(String, String)", into = "(String, String)")]
pub struct Parameter {
    pub ty: String,
    pub name: String,
}

impl From<(String, String)> for Parameter {
    fn from((ty, name): (String, String)) -> Self {
        Self { ty, name }
    }
}

impl From<Parameter> for (String, String) {
    fn from(param: Parameter) -> Self {
        (param.ty, param.name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ExtensionTypeDef {
    pub id: i64,
    pub prefix: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ErrorTypeDef {
    pub id: i64,
}

impl ApiMetadata {
    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }

    pub fn from_msgpack(bytes: &[u8]) -> Result<Self, rmp_serde::decode::Error> {
        rmp_serde::from_slice(bytes)
    }
}
