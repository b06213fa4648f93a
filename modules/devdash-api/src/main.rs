use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use devdash_api::{router, setup, AppState};
use devdash_common::Config;
use devdash_indicators::TtlCache;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    setup::init_tracing()?;

    let config = Config::from_env()?;
    setup::log_config(&config);

    let cache = Arc::new(TtlCache::new());
    let state = Arc::new(AppState {
        indicators: setup::indicator_service(&config, cache)?,
        store: setup::content_store(&config).await?,
    });

    let app = router(state)
        // CORS
        .layer(
            tower_http::cors::CorsLayer::new()
                .allow_origin(tower_http::cors::Any)
                .allow_methods(tower_http::cors::Any)
                .allow_headers(tower_http::cors::Any),
        )
        // Logging layer: method + path only
        .layer(
            tower_http::trace::TraceLayer::new_for_http().make_span_with(
                |request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        path = %request.uri().path(),
                    )
                },
            ),
        );

    let addr = format!("{}:{}", config.web_host, config.web_port);
    info!("devdash API starting on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
