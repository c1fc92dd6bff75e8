use dotenvy::dotenv;
use tracing::{error, info};

use hrdesk::hrdesk_config::ServerConfig;
use hrdesk::logging::init_tracing;
use hrdesk::router::init_router;
use hrdesk::state::init_app_state;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    init_tracing();

    let state = init_app_state().inspect_err(|e| error!(error = %e, "Startup failed"))?;
    let app = init_router(state);

    let server = ServerConfig::from_env();
    let listener = tokio::net::TcpListener::bind(server.bind_address()).await?;
    info!(address = %server.bind_address(), "Server running");
    info!("Swagger UI available at /swagger-ui");

    axum::serve(listener, app).await?;
    Ok(())
}
