use std::sync::Arc;

use confstore::{
    api::{build_router, start_api_server},
    auth::validator_from_config,
    generators::{CaProvider, GeneratorFactory},
    init_tracing,
    storage::build_store,
    Config, Result, APP_NAME, VERSION,
};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env if present; config is read from the environment below.
    if let Err(e) = dotenvy::dotenv() {
        if !e.to_string().contains("not found") {
            eprintln!("Warning: Error loading .env file: {}", e);
        }
    }

    init_tracing()?;

    info!(app_name = APP_NAME, version = VERSION, "Starting confstore configuration server");

    let config = Config::from_env()?;
    info!(
        port = config.api.port,
        bind_address = %config.api.bind_address,
        database_url_set = !config.database.is_memory(),
        auth_enabled = config.auth.token.is_some(),
        "Loaded configuration from environment"
    );

    let store = build_store(&config.database).await?;

    let ca_provider = Arc::new(CaProvider::new(store.clone(), config.ca.clone()));
    let generators = GeneratorFactory::new(ca_provider);
    let validator = validator_from_config(&config.auth);

    let router = build_router(store, generators, validator);
    start_api_server(config.api, router).await
}
