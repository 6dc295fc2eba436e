use std::sync::Arc;
use tracing::info;
use warp::Filter;

use relay::{api, config, error::handle_rejection, mailer, metrics, middleware, uploads};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = config::Config::from_env()?;

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level)),
        )
        .json()
        .init();

    info!("Starting summary relay");

    let summarizer = relay::build_summarizer(&config);
    if summarizer.remote_enabled() {
        info!("Remote summarizer enabled at {}", config.summarizer_url);
    } else {
        info!("No summarizer API key, every request uses the local fallback");
    }

    // Constructed once, shared by every request
    let mailer = Arc::new(mailer::Mailer::from_config(&config)?);
    if !mailer.is_enabled() {
        info!("Email delivery disabled, /api/email will answer 503");
    }
    let uploads = uploads::UploadStore::init(config.upload_dir.clone()).await?;
    let metrics = metrics::Metrics::new()?;

    let api_routes = api::routes(
        summarizer,
        mailer,
        uploads,
        metrics.clone(),
        config.max_upload_bytes,
    );

    let routes = api::ops_routes(metrics)
        .or(api_routes)
        .recover(handle_rejection)
        .with(warp::log("api"))
        .with(middleware::cors(config.cors_origin.as_deref()));

    // Start server
    let addr = ([0, 0, 0, 0], config.port);
    info!("Server listening on {}", addr.1);

    warp::serve(routes)
        .run(addr)
        .await;

    Ok(())
}
