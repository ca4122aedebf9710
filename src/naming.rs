//! rust identifiers for schema names

use heck::{ToPascalCase, ToSnakeCase};

/// names generated files use unqualified, from std or the runtime prelude
const RESERVED_TYPE_NAMES: &[&str] = &[
    "ApiClient",
    "BaseApiClient",
    "Box",
    "DateTime",
    "Error",
    "FixedOffset",
    "From",
    "GraphQlEnum",
    "Lower",
    "Map",
    "Option",
    "Polymorphic",
    "RawObject",
    "Result",
    "Selected",
    "Selection",
    "Self",
    "String",
    "Transport",
    "Value",
    "Variant",
    "Vec",
];

/// type identifier for a schema type name
///
/// schema names are kept verbatim unless they would shadow a name the
/// generated code relies on.
pub fn type_ident(name: &str) -> String {
    let ident = name.trim_start_matches('_');
    let ident = if ident.is_empty() { "Type" } else { ident };
    if RESERVED_TYPE_NAMES.contains(&ident) {
        format!("{ident}Type")
    } else if is_rust_keyword(ident) {
        format!("{}Type", ident.to_pascal_case())
    } else {
        ident.to_string()
    }
}

/// snake-case identifier for a field, argument, or method name
pub fn field_ident(name: &str) -> String {
    let out = name.to_snake_case();
    let out = if out.is_empty() { "field".to_string() } else { out };
    let out = if out.starts_with(|ch: char| ch.is_ascii_digit()) {
        format!("_{out}")
    } else {
        out
    };

    match out.as_str() {
        // raw identifiers are not allowed for these
        "self" | "super" | "crate" => format!("{out}_"),
        _ if is_rust_keyword(&out) => format!("r#{out}"),
        _ => out,
    }
}

/// file and module name for a generated type
pub fn module_ident(name: &str) -> String {
    let out = type_ident(name).to_snake_case();
    if is_rust_keyword(&out) {
        format!("{out}_")
    } else {
        out
    }
}

/// enum variant identifier for an enum value such as `IN_PROGRESS`
pub fn variant_ident(value: &str) -> String {
    let out = value.to_pascal_case();
    match out.as_str() {
        "" => "Value".to_string(),
        "Self" => "SelfValue".to_string(),
        _ => out,
    }
}

/// true for `crate`, `::foo`, `foo::bar` style module paths
pub fn is_module_path(path: &str) -> bool {
    let path = path.strip_prefix("::").unwrap_or(path);
    !path.is_empty()
        && path.split("::").all(|segment| {
            let mut chars = segment.chars();
            chars
                .next()
                .is_some_and(|ch| ch.is_ascii_alphabetic() || ch == '_')
                && chars.all(|ch| ch.is_ascii_alphanumeric() || ch == '_')
        })
}

pub fn is_rust_keyword(name: &str) -> bool {
    matches!(
        name,
        "as" | "break"
            | "const"
            | "continue"
            | "crate"
            | "else"
            | "enum"
            | "extern"
            | "false"
            | "fn"
            | "for"
            | "if"
            | "impl"
            | "in"
            | "let"
            | "loop"
            | "match"
            | "mod"
            | "move"
            | "mut"
            | "pub"
            | "ref"
            | "return"
            | "self"
            | "Self"
            | "static"
            | "struct"
            | "super"
            | "trait"
            | "true"
            | "type"
            | "unsafe"
            | "use"
            | "where"
            | "while"
            | "async"
            | "await"
            | "dyn"
            | "gen"
            | "try"
    )
}
