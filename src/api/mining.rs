use actix_web::web;
use alloy_primitives::U256;
use log::debug;
use serde_json::Value;

use super::models::{AppState, RpcError, WorkResponse, hex_quantity};
use super::rpc::{str_param, to_value};
use crate::pow::Submission;

/// `eth_getWork`: the current work package, read-only.
pub async fn get_work(state: &web::Data<AppState>) -> Result<Value, RpcError> {
    let work = AppState::read(state, |engine| WorkResponse::from(engine.work())).await?;
    debug!("WORK - handing out seal {}", work.0);
    to_value(work)
}

/// `eth_submitWork [nonce, seal hash, mix hash]`.
///
/// Shape errors are reported before the engine is touched. Otherwise the
/// solution is verified, recorded and the block advanced on the blocking
/// pool, since crossing an epoch regenerates the cache.
pub async fn submit_work(state: &web::Data<AppState>, params: &Value) -> Result<Value, RpcError> {
    let submission = Submission::parse(
        str_param(params, 0, "nonce")?,
        str_param(params, 1, "seal hash")?,
        str_param(params, 2, "mix hash")?,
    )
    .map_err(|e| RpcError::invalid_params(e.to_string()))?;

    let state = state.clone();
    let accepted = web::block(move || -> Result<bool, RpcError> {
        let mut engine = state.lock()?;
        Ok(engine.submit_work(&submission))
    })
    .await
    .map_err(|e| RpcError::internal(e.to_string()))??;

    Ok(Value::Bool(accepted))
}

/// `eth_submitHashrate [rate, id]`: acknowledged and logged only.
pub fn submit_hashrate(params: &Value) -> Result<Value, RpcError> {
    let rate = str_param(params, 0, "hashrate")?;
    let id = params.get(1).and_then(Value::as_str).unwrap_or("-");
    debug!("HASHRATE - miner {} reports {}", id, rate);
    Ok(Value::Bool(true))
}

/// `eth_hashrate`: last reported rate in hashes per second.
pub async fn hashrate(state: &web::Data<AppState>) -> Result<Value, RpcError> {
    let rate = AppState::read(state, |engine| engine.rate().last_rate())
        .await?
        .unwrap_or(0.0);
    let hashes = (rate * 1_000_000.0).max(0.0) as u64;
    Ok(Value::String(hex_quantity(U256::from(hashes))))
}
