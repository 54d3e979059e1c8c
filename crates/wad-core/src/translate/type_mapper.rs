//! Primitive type names as the Web API Definition and Swagger spell them.

const PRIMITIVE_TYPES: &[&str] = &[
    "string", "int", "integer", "long", "float", "double", "date", "boolean", "bool",
];

/// Map an internal primitive type name to its Swagger spelling.
///
/// Unrecognized names, representation ids included, pass through unchanged.
pub fn to_swagger_type(type_name: &str) -> &str {
    match type_name {
        "Integer" => "int",
        "String" => "string",
        "Boolean" => "boolean",
        other => other,
    }
}

/// Map a Swagger primitive type name to its internal spelling.
pub fn to_internal_type(type_name: &str) -> &str {
    match type_name {
        "int" => "Integer",
        "string" => "String",
        "boolean" => "Boolean",
        other => other,
    }
}

/// Whether the type name denotes a primitive rather than a representation.
pub fn is_primitive_type(type_name: &str) -> bool {
    let lower = type_name.to_ascii_lowercase();
    PRIMITIVE_TYPES.contains(&lower.as_str())
}
