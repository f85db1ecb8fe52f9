//! Case conversion for deriving json (wire) names from underlying field names.

use serde::{Deserialize, Serialize};

/// Naming scheme applied to a field's underlying name when it declares no explicit json name.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JsonNaming {
    #[default]
    AsIs,
    Kebab,
    Snake,
    Camel,
}

impl JsonNaming {
    pub fn apply(self, name: &str) -> String {
        match self {
            JsonNaming::AsIs => name.to_string(),
            JsonNaming::Kebab => to_kebab_case(name),
            JsonNaming::Snake => to_snake_case(name),
            JsonNaming::Camel => to_camel_case(name),
        }
    }
}

/// Convert a single identifier from snake_case or kebab-case to camelCase.
/// e.g. "user_id" -> "userId", "created-at" -> "createdAt"
pub fn to_camel_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut capitalize_next = false;
    for c in s.chars() {
        if c == '_' || c == '-' {
            capitalize_next = !out.is_empty();
        } else if capitalize_next {
            out.extend(c.to_uppercase());
            capitalize_next = false;
        } else {
            out.push(c);
        }
    }
    out
}

/// Convert a single identifier from camelCase to snake_case.
/// e.g. "userId" -> "user_id", "createdAt" -> "created_at"
pub fn to_snake_case(s: &str) -> String {
    separate_words(s, '_')
}

/// Convert a single identifier from camelCase to kebab-case.
/// e.g. "createdAt" -> "created-at", "user_id" -> "user-id"
pub fn to_kebab_case(s: &str) -> String {
    separate_words(s, '-')
}

fn separate_words(s: &str, sep: char) -> String {
    let mut out = String::with_capacity(s.len() + 4);
    for (i, c) in s.chars().enumerate() {
        if c == '_' || c == '-' {
            out.push(sep);
        } else if c.is_uppercase() {
            if i > 0 && !out.ends_with(sep) {
                out.push(sep);
            }
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}
