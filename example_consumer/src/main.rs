//! Example consumer: renders one entity as a JSON:API resource object.
//!
//! Usage: `cargo run -p example-consumer -- <resources.json> <entity.json> [query-string]`
//! where `entity.json` is `{ "resource_type": "...", "data": { ... } }` and the query string
//! looks like `fields[tasks]=title&include=project`.

use jsonapi_sdk::{load_from_path, resolve, DocumentMapperUtil, Entity, JsonApiQuery, QueryContext, Settings};
use std::sync::Arc;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("jsonapi_sdk=info")),
        )
        .init();

    let mut args = std::env::args().skip(1);
    let (Some(config_path), Some(entity_path)) = (args.next(), args.next()) else {
        return Err("usage: example-consumer <resources.json> <entity.json> [query-string]".into());
    };
    let raw_query = args.next().unwrap_or_default();

    let settings = Settings::from_env();
    let registry = Arc::new(resolve(&load_from_path(&config_path)?)?);
    let entity: Entity = serde_json::from_str(&std::fs::read_to_string(&entity_path)?)?;

    let query = JsonApiQuery::from_query_string(&raw_query, false)?.to_query_spec(&entity.resource_type, &registry)?;

    let mapper = DocumentMapperUtil::new(registry, &settings);
    let resource = mapper.to_resource(&entity, Some(&query), &QueryContext::from_settings(&settings))?;
    tracing::info!(resource_type = %resource.resource_type, id = %resource.id, "rendered resource");
    println!("{}", serde_json::to_string_pretty(&resource)?);
    Ok(())
}
