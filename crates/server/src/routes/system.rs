use actix_web::{get, web, HttpResponse};
use textconvert_llm::check_health;

use crate::state::AppState;
use crate::types::{HealthResponse, RootResponse};

/// Public API version
pub const API_VERSION: &str = "1.0.0";

#[get("/")]
pub async fn root() -> HttpResponse {
    HttpResponse::Ok().json(RootResponse {
        message: "AI Text Converter API".to_string(),
        version: API_VERSION.to_string(),
    })
}

/// Server liveness plus a probe of the completion service
#[get("/health")]
pub async fn health(state: web::Data<AppState>) -> HttpResponse {
    let processor = &state.processor;
    let ollama = check_health(processor.client().as_ref(), processor.model()).await;

    HttpResponse::Ok().json(HealthResponse {
        status: "healthy",
        use_gpu: state.config.use_gpu,
        ollama,
    })
}
