use actix_web::{HttpResponse, Responder, get, web};
use serde_json::json;

use super::models::{AppState, hex_quantity};

/// Liveness plus the block miners are currently working on; a 503 means the
/// engine lock is unusable.
#[get("/health/")]
pub async fn health_check(state: web::Data<AppState>) -> impl Responder {
    match AppState::read(&state, |engine| hex_quantity(engine.header().number)).await {
        Ok(number) => HttpResponse::Ok().json(json!({ "status": "up", "block": number })),
        Err(e) => HttpResponse::ServiceUnavailable().json(json!({
            "status": "down",
            "error": e.message,
        })),
    }
}
