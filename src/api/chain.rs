use actix_web::web;
use serde_json::Value;

use super::models::{AppState, BlockResponse, RpcError, hex_quantity};
use super::rpc::to_value;

/// `eth_getBlockByNumber`: always the current header, whatever number is asked.
pub async fn get_block_by_number(state: &web::Data<AppState>) -> Result<Value, RpcError> {
    let block = AppState::read(state, |engine| BlockResponse::from(engine.header())).await?;
    to_value(block)
}

pub async fn block_number(state: &web::Data<AppState>) -> Result<Value, RpcError> {
    let number = AppState::read(state, |engine| hex_quantity(engine.header().number)).await?;
    Ok(Value::String(number))
}
