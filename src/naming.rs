//! Identifier conversion from the host's snake_case wire names to C# names.

/// Split `name` on underscores and re-join it in camel or Pascal case.
///
/// Every segment is lower-cased and its first character upper-cased, except
/// the first segment when `capitalize_first` is false. Empty segments (from
/// leading, trailing or doubled underscores) disappear.
pub fn to_camel_or_pascal(name: &str, capitalize_first: bool) -> String {
    let mut out = String::with_capacity(name.len());
    for (index, segment) in name.split('_').filter(|s| !s.is_empty()).enumerate() {
        let lower = segment.to_lowercase();
        if index == 0 && !capitalize_first {
            out.push_str(&lower);
        } else {
            out.push_str(&capitalize(&lower));
        }
    }
    out
}

pub fn pascal_case(name: &str) -> String {
    to_camel_or_pascal(name, true)
}

pub fn camel_case(name: &str) -> String {
    to_camel_or_pascal(name, false)
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Return `ident` prefixed with `@` when it is a C# reserved word.
pub fn escape_if_reserved(ident: &str) -> String {
    if is_csharp_keyword(ident) {
        format!("@{}", ident)
    } else {
        ident.to_string()
    }
}

/// Public member name for a wire name: PascalCase, escaped.
pub fn member_name(name: &str) -> String {
    escape_if_reserved(&pascal_case(name))
}

/// Local/parameter name for a wire name: camelCase, escaped.
pub fn parameter_name(name: &str) -> String {
    escape_if_reserved(&camel_case(name))
}

/// True for an optional `@` followed by `[A-Za-z_][A-Za-z0-9_]*`.
pub fn is_identifier(ident: &str) -> bool {
    let bare = ident.strip_prefix('@').unwrap_or(ident);
    let mut chars = bare.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|ch| ch.is_ascii_alphanumeric() || ch == '_')
        }
        _ => false,
    }
}

/// Pass `ident` through when it is a C# identifier; otherwise describe what
/// `wire_name` turned into.
pub fn require_identifier(ident: String, wire_name: &str) -> Result<String, String> {
    if is_identifier(&ident) {
        Ok(ident)
    } else if ident.is_empty() {
        Err(format!("name `{}` gives an empty C# identifier", wire_name))
    } else {
        Err(format!(
            "name `{}` gives `{}`, which is not a C# identifier",
            wire_name, ident
        ))
    }
}

/// Quote `value` as a C# regular string literal.
pub fn string_literal(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for ch in value.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            ch if ch.is_control() => out.push_str(&format!("\\u{:04x}", ch as u32)),
            ch => out.push(ch),
        }
    }
    out.push('"');
    out
}

fn is_csharp_keyword(word: &str) -> bool {
    matches!(
        word,
        "abstract"
            | "as"
            | "base"
            | "bool"
            | "break"
            | "byte"
            | "case"
            | "catch"
            | "char"
            | "checked"
            | "class"
            | "const"
            | "continue"
            | "decimal"
            | "default"
            | "delegate"
            | "do"
            | "double"
            | "else"
            | "enum"
            | "event"
            | "explicit"
            | "extern"
            | "false"
            | "finally"
            | "fixed"
            | "float"
            | "for"
            | "foreach"
            | "goto"
            | "if"
            | "implicit"
            | "in"
            | "int"
            | "interface"
            | "internal"
            | "is"
            | "lock"
            | "long"
            | "namespace"
            | "new"
            | "null"
            | "object"
            | "operator"
            | "out"
            | "override"
            | "params"
            | "private"
            | "protected"
            | "public"
            | "readonly"
            | "ref"
            | "return"
            | "sbyte"
            | "sealed"
            | "short"
            | "sizeof"
            | "stackalloc"
            | "static"
            | "string"
            | "struct"
            | "switch"
            | "this"
            | "throw"
            | "true"
            | "try"
            | "typeof"
            | "uint"
            | "ulong"
            | "unchecked"
            | "unsafe"
            | "ushort"
            | "using"
            | "virtual"
            | "void"
            | "volatile"
            | "while"
    )
}
