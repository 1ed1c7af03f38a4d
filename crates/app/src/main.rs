use std::sync::Arc;

use server::{ServerState, TracingNotifier};

mod settings;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let settings = settings::Settings::new()?;

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "sparti={level},server={level},engine={level}",
            level = settings.app.level
        ))
        .init();

    let bind = settings
        .server
        .bind
        .unwrap_or_else(|| "127.0.0.1".to_string());
    let addr = format!("{}:{}", bind, settings.server.port);
    tracing::info!("Starting sparti on {addr}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    let state = ServerState::in_memory(Arc::new(TracingNotifier));
    server::run_with_listener(state, listener).await?;

    Ok(())
}
