use proactive_core::Config;
use proactive_server::{router, AppState};
use tracing_subscriber::{prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new("warn,proactive_server=info,proactive_core=info")
    });
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_filter(env_filter))
        .init();

    let config = Config::from_env();
    let state = AppState::from_config(&config);
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!(
        %addr,
        board_configured = !config.trello.board_id.is_empty(),
        insights_configured = !config.gemini.api_key.is_empty(),
        "ProActive server listening"
    );

    axum::serve(listener, router(state)).await?;
    Ok(())
}
