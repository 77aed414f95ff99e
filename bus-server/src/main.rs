use std::error::Error;
use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use bus_server::catalog::{CatalogStore, SqliteCatalog, load_seed};
use bus_server::config::ServerConfig;
use bus_server::filter::FilterConfig;
use bus_server::locations::LocationIndex;
use bus_server::web::{AppState, create_router};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = ServerConfig::from_env()?;

    let filters = match &config.filter_config_path {
        Some(path) => {
            tracing::info!(path = %path.display(), "loading filter configuration");
            FilterConfig::from_json_file(path)?
        }
        None => FilterConfig::default(),
    };

    // Open the catalog, bootstrapping it from seed data if it is empty
    let catalog = SqliteCatalog::open(&config.db_path)?;
    catalog.ensure_table()?;
    if let Some(seed_path) = &config.seed_path {
        if catalog.count()? == 0 {
            let trips = load_seed(seed_path)?;
            let inserted = catalog.insert_all(&trips)?;
            tracing::info!(inserted, "seeded empty catalog");
        } else {
            tracing::info!("catalog already populated, skipping seed");
        }
    }
    let catalog: Arc<dyn CatalogStore> = Arc::new(catalog);

    let locations = LocationIndex::fetch(catalog.as_ref())?;
    tracing::info!(stops = locations.len().await, "loaded stop names");

    // Periodically rebuild the stop names so new routes show up
    let refresh_locations = locations.clone();
    let refresh_catalog = catalog.clone();
    let refresh_interval = config.location_refresh;
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(refresh_interval);
        interval.tick().await; // First tick is immediate, skip it
        loop {
            interval.tick().await;
            match refresh_locations.refresh(refresh_catalog.clone()).await {
                Ok(count) => tracing::info!(stops = count, "refreshed stop names"),
                Err(e) => tracing::warn!(error = %e, "failed to refresh stop names"),
            }
        }
    });

    let state = AppState::new(catalog, filters, locations);
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, "bus finder listening");

    axum::serve(listener, app).await?;
    Ok(())
}
