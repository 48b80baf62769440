use interview_prep_backend::{
    config::{get_config, init_config},
    database::pool::{create_pool, run_migrations},
    routes::build_router,
    AppState,
};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,interview_prep_backend=debug,tower_http=info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);
    match std::env::var("LOG_FORMAT").as_deref() {
        Ok("json") => builder.json().init(),
        _ => builder.init(),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();
    init_config()?;
    let config = get_config();

    let pool = create_pool().await?;
    run_migrations(&pool).await?;

    if config.gemini.api_key.is_empty() {
        tracing::warn!("GEMINI_API_KEY is not set; quiz generation requests will fail");
    }
    info!(
        model = %config.gemini.model,
        answer_format = %config.answer_format,
        max_questions = config.max_ai_questions,
        "quiz generator configured"
    );

    let app = build_router(AppState::new(pool)?);

    let addr: SocketAddr = config.server_address.parse()?;
    info!("Server listening on {}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
    }
    info!("shutdown signal received");
}
