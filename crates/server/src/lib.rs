//! Text converter HTTP server
//!
//! Actix-web REST API: upload conversion, streaming conversion, preview and health

mod error;
mod form;
pub mod routes;
mod state;
mod types;

pub use error::ApiError;
pub use state::AppState;
pub use types::{ErrorResponse, HealthResponse, PreviewResponse, RootResponse};

use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use textconvert_common::{AppConfig, Result};
use tracing::info;
use tracing_actix_web::TracingLogger;

/// Start the HTTP server and run until shutdown
pub async fn start_server(config: AppConfig) -> Result<()> {
    let bind_addr = config.server_bind_address();
    let frontend_dir = config.frontend_dir.clone();

    info!(
        "Completion service: {} (model {})",
        config.completion_host(),
        config.ollama_model
    );
    info!(
        "Chunk size {} chars, max upload {} bytes",
        config.chunk_size, config.max_file_size
    );

    let state = web::Data::new(AppState::new(config)?);

    info!("Starting server on {}", bind_addr);

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(Cors::permissive())
            .wrap(TracingLogger::default())
            .configure(routes::configure)
            .configure(|cfg| routes::configure_static(cfg, &frontend_dir))
    })
    .bind(&bind_addr)?
    .run()
    .await?;

    info!("Server stopped");
    Ok(())
}
