use heck::{ToLowerCamelCase, ToPascalCase};

/// Derive a camelCase operation nickname from HTTP method + path.
///
/// Examples:
/// - `GET /pets` → `listPets`
/// - `POST /pets` → `createPets`
/// - `GET /pets/{petId}` → `getPet`
/// - `DELETE /pets/{petId}` → `deletePet`
/// - `GET /pets/{petId}/photos` → `listPetsPhotos`
pub fn route_to_nickname(method: &str, path: &str) -> String {
    let mut resource_parts: Vec<&str> = Vec::new();
    let mut ends_with_param = false;

    for seg in path.split('/').filter(|s| !s.is_empty()) {
        if seg.starts_with('{') && seg.ends_with('}') {
            ends_with_param = true;
        } else {
            resource_parts.push(seg);
            ends_with_param = false;
        }
    }

    let method_upper = method.to_uppercase();
    let prefix = match method_upper.as_str() {
        "GET" if ends_with_param => "get".to_string(),
        "GET" => "list".to_string(),
        "POST" => "create".to_string(),
        "PUT" => "update".to_string(),
        "DELETE" => "delete".to_string(),
        "PATCH" => "patch".to_string(),
        other => other.to_lower_camel_case(),
    };

    let mut name = prefix;
    let last = resource_parts.len().saturating_sub(1);
    for (i, part) in resource_parts.iter().enumerate() {
        let word = if i == last && ends_with_param {
            singularize(part)
        } else {
            part.to_string()
        };
        name.push_str(&word.to_pascal_case());
    }
    name
}

/// Strip an English plural suffix from a path segment.
fn singularize(word: &str) -> String {
    if let Some(stem) = word.strip_suffix("ies").filter(|s| !s.is_empty()) {
        return format!("{stem}y");
    }
    if ["ses", "xes", "zes"].iter().any(|suffix| word.ends_with(suffix)) {
        return word[..word.len() - 2].to_string();
    }
    match word.strip_suffix('s') {
        Some(stem) if !stem.is_empty() && !stem.ends_with('s') => stem.to_string(),
        _ => word.to_string(),
    }
}
