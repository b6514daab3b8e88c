use actix_web::{HttpResponse, Responder, get, web};

use super::models::{AppState, StatsResponse, hex_data, hex_quantity};

#[get("/stats/")]
pub async fn get_stats(state: web::Data<AppState>) -> impl Responder {
    let stats = AppState::read(&state, |engine| {
        let cache = engine.block().cache();
        StatsResponse {
            number: hex_quantity(engine.header().number),
            epoch: cache.epoch(),
            full_size: cache.full_size(),
            cache_bytes: cache.cache().len(),
            window_len: engine.rate().len(),
            last_rate: engine.rate().last_rate(),
            rate_div: engine.rate_div(),
            target: hex_data(engine.work().target.to_be_bytes::<32>()),
        }
    })
    .await;

    match stats {
        Ok(stats) => HttpResponse::Ok().json(stats),
        Err(e) => HttpResponse::InternalServerError().body(e.message),
    }
}
