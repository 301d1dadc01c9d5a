use axum::{
    extract::Extension,
    routing::{get, post},
    Router,
};
use card_search::catalog::client::CatalogClient;
use card_search::config::AppConfig;
use card_search::search::controller::SearchController;
use card_search::search::handlers::{
    handle_get_card, handle_get_state, handle_list_sets, handle_load_more, handle_reset,
    handle_submit_query,
};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        // .with_max_level(tracing::Level::DEBUG)
        .with_max_level(tracing::Level::INFO)
        .init();

    let args: Vec<String> = std::env::args().collect();
    let config = AppConfig::load(&args)?;

    tracing::info!("Card API: {}", config.catalog.base_url);
    tracing::info!(
        "Debounce {:?}, {} sets per batch, give up after {} empty sets",
        config.search.debounce,
        config.search.max_pages_per_batch,
        config.search.empty_page_threshold
    );

    // 1. Catalog client and search controller:
    let client = Arc::new(CatalogClient::new(&config.catalog));
    let controller = SearchController::from_client(client, config.search.clone());

    // 2. HTTP Router:
    let app = Router::new()
        .route("/search", post(handle_submit_query).delete(handle_reset))
        .route("/search/more", post(handle_load_more))
        .route("/search/state", get(handle_get_state))
        .route("/cards/:set/:code", get(handle_get_card))
        .route("/sets", get(handle_list_sets))
        .layer(Extension(controller));

    // 3. Start HTTP server:
    tracing::info!("HTTP server listening on {}", config.bind_addr);
    tracing::info!("Press Ctrl+C to shutdown");

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
