mod chain;
mod client;
mod health;
mod mining;
pub mod models;
mod rpc;
mod stats;

use actix_web::web::ServiceConfig;

pub use models::AppState;

pub fn init_routes(cfg: &mut ServiceConfig) {
    cfg.service(rpc::rpc_entry)
        .service(health::health_check)
        .service(stats::get_stats);
}
