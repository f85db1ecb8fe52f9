//! Extract JSON:API query parameters and compact mode from a request.

use crate::config::ResourceRegistry;
use crate::error::AppError;
use crate::query::{parse_query_spec, QuerySpec};
use async_trait::async_trait;
use axum::{
    extract::{FromRequestParts, Query},
    http::{request::Parts, Uri},
};

/// Header switching compact mode on (`true` or `1`).
pub const COMPACT_HEADER: &str = "X-JsonApi-Compact";

/// Decoded query pairs in request order, plus the compact flag.
#[derive(Clone, Debug, Default)]
pub struct JsonApiQuery {
    pub params: Vec<(String, String)>,
    pub compact: bool,
}

fn decode_pairs(uri: &Uri) -> Result<Vec<(String, String)>, AppError> {
    let Query(params) = Query::<Vec<(String, String)>>::try_from_uri(uri)
        .map_err(|e| AppError::BadRequest(e.body_text()))?;
    Ok(params)
}

impl JsonApiQuery {
    /// Decodes a raw query string such as `fields%5Btasks%5D=title&include=project`.
    pub fn from_query_string(raw: &str, compact: bool) -> Result<Self, AppError> {
        let uri: Uri = format!("/?{}", raw.trim_start_matches('?'))
            .parse()
            .map_err(|e| AppError::BadRequest(format!("invalid query string: {}", e)))?;
        Ok(JsonApiQuery {
            params: decode_pairs(&uri)?,
            compact,
        })
    }

    /// Parses the pairs for a request whose primary resource type is `root_type`.
    pub fn to_query_spec(&self, root_type: &str, registry: &ResourceRegistry) -> Result<QuerySpec, AppError> {
        let mut spec = parse_query_spec(root_type, &self.params, registry)?;
        spec.set_compact(self.compact);
        Ok(spec)
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for JsonApiQuery
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let params = decode_pairs(&parts.uri)?;
        let compact = parts
            .headers
            .get(COMPACT_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(|s| {
                let s = s.trim();
                s.eq_ignore_ascii_case("true") || s == "1"
            })
            .unwrap_or(false);
        Ok(JsonApiQuery { params, compact })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{load_from_str, resolve};
    use crate::query::PathSpec;
    use axum::{body::Body, http::Request, http::StatusCode, routing::get, Router};
    use std::sync::Arc;
    use tower::ServiceExt;

    fn registry() -> Arc<ResourceRegistry> {
        let config = load_from_str(
            r#"{ "resources": [ { "resource_type": "tasks", "fields": [ { "name": "id" }, { "name": "title" } ] } ] }"#,
        )
        .unwrap();
        Arc::new(resolve(&config).unwrap())
    }

    fn app() -> Router {
        let registry = registry();
        Router::new().route(
            "/tasks",
            get(move |query: JsonApiQuery| {
                let registry = registry.clone();
                async move {
                    let spec = query.to_query_spec("tasks", &registry)?;
                    let fields = spec.included_fields("tasks").map(|s| s.len()).unwrap_or(0);
                    let include = spec.included_relations("tasks").map(|s| s.contains(&PathSpec::of("project.owner")));
                    Ok::<_, AppError>(format!("{} {:?} {}", fields, include, spec.compact()))
                }
            }),
        )
    }

    async fn body_text(resp: axum::response::Response) -> String {
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[test]
    fn query_string_is_percent_decoded() {
        let query = JsonApiQuery::from_query_string("fields%5Btasks%5D=title&include=project%2Ctags", false).unwrap();
        assert_eq!(
            query.params,
            vec![
                ("fields[tasks]".to_string(), "title".to_string()),
                ("include".to_string(), "project,tags".to_string()),
            ]
        );
        let spec = query.to_query_spec("tasks", &registry()).unwrap();
        assert!(spec.included_fields("tasks").unwrap().contains(&PathSpec::of("title")));
        let relations = spec.included_relations("tasks").unwrap();
        assert!(relations.contains(&PathSpec::of("project")));
        assert!(relations.contains(&PathSpec::of("tags")));
    }

    #[test]
    fn empty_query_string_has_no_params() {
        let query = JsonApiQuery::from_query_string("", true).unwrap();
        assert!(query.params.is_empty());
        assert!(query.compact);
    }

    #[tokio::test]
    async fn parses_fields_include_and_compact_header() {
        let req = Request::builder()
            .uri("/tasks?fields%5Btasks%5D=title,id&include=project.owner")
            .header(COMPACT_HEADER, "true")
            .body(Body::empty())
            .unwrap();
        let resp = app().oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(body_text(resp).await, "2 Some(true) true");
    }

    #[tokio::test]
    async fn no_query_string_is_unconstrained() {
        let req = Request::builder().uri("/tasks").body(Body::empty()).unwrap();
        let resp = app().oneshot(req).await.unwrap();
        assert_eq!(body_text(resp).await, "0 None false");
    }

    #[tokio::test]
    async fn unknown_type_is_bad_request() {
        let req = Request::builder()
            .uri("/tasks?fields%5Busers%5D=name")
            .body(Body::empty())
            .unwrap();
        let resp = app().oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert!(body_text(resp).await.contains("\"code\":\"bad_request\""));
    }
}
