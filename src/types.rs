use crate::error::GenerateError;
use crate::naming::pascal_case;
use crate::schema::{ExtensionType, WireType};
use std::collections::BTreeMap;

/// Maps wire type descriptors to C# type expressions.
#[derive(Debug, Clone)]
pub struct TypeMapper {
    /// extension type key -> generated wrapper class name
    wrappers: BTreeMap<String, String>,
}

impl TypeMapper {
    pub fn new(extension_types: &[ExtensionType], wrapper_prefix: &str) -> Self {
        let wrappers = extension_types
            .iter()
            .map(|t| (t.name.clone(), wrapper_name(wrapper_prefix, &t.name)))
            .collect();
        Self { wrappers }
    }

    pub fn map(&self, ty: &WireType) -> Result<String, GenerateError> {
        let mapped = match ty {
            WireType::Integer => "long".to_string(),
            WireType::Float => "double".to_string(),
            WireType::Boolean => "bool".to_string(),
            WireType::String => "string".to_string(),
            WireType::Binary => "byte[]".to_string(),
            WireType::Object | WireType::LuaRef => "object".to_string(),
            WireType::Void => "void".to_string(),
            WireType::Array(element) => format!("{}[]", self.map(element)?),
            WireType::Map(key, value) => {
                format!("IDictionary<{}, {}>", self.map(key)?, self.map(value)?)
            }
            WireType::Extension(name) => self
                .wrappers
                .get(name)
                .cloned()
                .ok_or_else(|| {
                    GenerateError::schema(name, "no extension type is declared under this name")
                })?,
        };
        Ok(mapped)
    }
}

/// Class name of the wrapper generated for extension type `key`
pub fn wrapper_name(prefix: &str, key: &str) -> String {
    format!("{}{}", prefix, pascal_case(key))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mapper() -> TypeMapper {
        let types = [
            ExtensionType {
                name: "Buffer".into(),
                id: 0,
                prefix: "nvim_buf_".into(),
            },
            ExtensionType {
                name: "tab_page".into(),
                id: 2,
                prefix: "nvim_tabpage_".into(),
            },
        ];
        TypeMapper::new(&types, "Nvim")
    }

    #[test]
    fn test_primitives() {
        let m = mapper();
        assert_eq!(m.map(&WireType::Integer).unwrap(), "long");
        assert_eq!(m.map(&WireType::Float).unwrap(), "double");
        assert_eq!(m.map(&WireType::Boolean).unwrap(), "bool");
        assert_eq!(m.map(&WireType::String).unwrap(), "string");
        assert_eq!(m.map(&WireType::Binary).unwrap(), "byte[]");
        assert_eq!(m.map(&WireType::LuaRef).unwrap(), "object");
        assert_eq!(m.map(&WireType::Void).unwrap(), "void");
    }

    #[test]
    fn test_containers() {
        let m = mapper();
        let nested = WireType::Array(Box::new(WireType::Array(Box::new(WireType::Extension(
            "Buffer".into(),
        )))));
        assert_eq!(m.map(&nested).unwrap(), "NvimBuffer[][]");
        let dict = WireType::Map(Box::new(WireType::String), Box::new(WireType::Object));
        assert_eq!(m.map(&dict).unwrap(), "IDictionary<string, object>");
    }

    #[test]
    fn test_extension_uses_wrapper_name() {
        let m = mapper();
        assert_eq!(
            m.map(&WireType::Extension("tab_page".into())).unwrap(),
            "NvimTabPage"
        );
        assert!(m.map(&WireType::Extension("Window".into())).is_err());
    }

    #[test]
    fn test_mapping_is_deterministic() {
        let m = mapper();
        let ty = WireType::Map(
            Box::new(WireType::String),
            Box::new(WireType::Array(Box::new(WireType::Float))),
        );
        let first = m.map(&ty).unwrap();
        for _ in 0..10 {
            assert_eq!(m.map(&ty).unwrap(), first);
        }
    }
}
