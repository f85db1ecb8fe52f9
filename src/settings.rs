//! Mapper settings read from the environment (`.env` supported).

pub const BASE_URL_VAR: &str = "JSONAPI_BASE_URL";
pub const LINKS_AS_OBJECTS_VAR: &str = "JSONAPI_SERIALIZE_LINKS_AS_OBJECTS";
pub const WEB_PATH_PREFIX_VAR: &str = "JSONAPI_WEB_PATH_PREFIX";

const DEFAULT_BASE_URL: &str = "http://localhost:8080";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settings {
    /// Base url for self/related links, without trailing slash.
    pub base_url: String,
    /// Render links as `{ "href": ... }` objects instead of plain strings.
    pub serialize_links_as_objects: bool,
    pub web_path_prefix: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            base_url: DEFAULT_BASE_URL.into(),
            serialize_links_as_objects: false,
            web_path_prefix: None,
        }
    }
}

impl Settings {
    /// Loads `.env` if present, then reads the process environment.
    pub fn load() -> Self {
        dotenvy::dotenv().ok();
        Self::from_env()
    }

    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = lookup(BASE_URL_VAR)
            .map(|s| s.trim().trim_end_matches('/').to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.into());
        let serialize_links_as_objects = lookup(LINKS_AS_OBJECTS_VAR)
            .map(|s| s.trim().eq_ignore_ascii_case("true") || s.trim() == "1")
            .unwrap_or(false);
        let web_path_prefix = lookup(WEB_PATH_PREFIX_VAR)
            .map(|s| s.trim().trim_matches('/').to_string())
            .filter(|s| !s.is_empty());
        Settings {
            base_url,
            serialize_links_as_objects,
            web_path_prefix,
        }
    }
}
