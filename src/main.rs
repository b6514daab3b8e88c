mod api;
mod blockchain;
mod config;
mod engine;
mod error;
mod pow;
mod rate;

use std::io;
use std::time::Duration;

use actix_web::{App, HttpServer, web};
use dotenvy::dotenv;
use env_logger::Env;
use log::{info, warn};

use api::AppState;
use api::models::{hex_data, hex_quantity};
use config::Config;
use engine::Engine;

#[actix_web::main]
async fn main() -> io::Result<()> {
    let _ = dotenv();
    let config = Config::from_env().map_err(io::Error::other)?;
    env_logger::Builder::from_env(Env::default().default_filter_or(config.log_mode.filter()))
        .init();

    println!(
        "⛏️ Starting getwork endpoint at http://{}:{}",
        config.host, config.port
    );

    let engine = Engine::start(&config).map_err(io::Error::other)?;
    info!(
        "block {} epoch {} seed {} target {} (rate div {})",
        hex_quantity(engine.header().number),
        engine.block().epoch(),
        hex_data(engine.work().seed_hash),
        hex_data(engine.work().target.to_be_bytes::<32>()),
        config.rate_div
    );

    let state = web::Data::new(AppState::new(engine));
    spawn_advance_timer(
        state.clone(),
        Duration::from_secs(config.advance_interval_secs),
    );

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .configure(api::init_routes)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}

/// Advance the chain every `period` even when no solutions come in.
fn spawn_advance_timer(state: web::Data<AppState>, period: Duration) {
    actix_web::rt::spawn(async move {
        let mut interval = actix_web::rt::time::interval(period);
        interval.tick().await; // first tick completes immediately
        loop {
            interval.tick().await;
            let state = state.clone();
            let outcome = web::block(move || -> Result<(), String> {
                let mut engine = state.lock().map_err(|e| e.message)?;
                engine.tick().map_err(|e| e.to_string())
            })
            .await;
            match outcome {
                Ok(Ok(())) => {}
                Ok(Err(e)) => warn!("TIMER - advance failed: {e}"),
                Err(e) => warn!("TIMER - blocking task failed: {e}"),
            }
        }
    });
}
