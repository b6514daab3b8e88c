use actix_web::{HttpResponse, Responder, post, web};
use log::debug;
use serde::Serialize;
use serde_json::Value;

use super::models::{
    AppState, INVALID_REQUEST, METHOD_NOT_FOUND, PARSE_ERROR, RpcError, RpcRequest, RpcResponse,
};
use super::{chain, client, mining};

/// JSON-RPC 2.0 entry point. Accepts a single call or a batch; calls without
/// an `id` are notifications and get no response object.
#[post("/")]
pub async fn rpc_entry(state: web::Data<AppState>, body: web::Bytes) -> impl Responder {
    let payload: Value = match serde_json::from_slice(&body) {
        Ok(v) => v,
        Err(e) => {
            return HttpResponse::Ok().json(RpcResponse::error(
                Value::Null,
                RpcError::new(PARSE_ERROR, e.to_string()),
            ));
        }
    };

    match payload {
        Value::Array(calls) => {
            if calls.is_empty() {
                return HttpResponse::Ok().json(RpcResponse::error(
                    Value::Null,
                    RpcError::new(INVALID_REQUEST, "empty batch"),
                ));
            }
            let mut responses = Vec::with_capacity(calls.len());
            for call in calls {
                if let Some(resp) = handle_call(&state, call).await {
                    responses.push(resp);
                }
            }
            if responses.is_empty() {
                HttpResponse::NoContent().finish()
            } else {
                HttpResponse::Ok().json(responses)
            }
        }
        call => match handle_call(&state, call).await {
            Some(resp) => HttpResponse::Ok().json(resp),
            None => HttpResponse::NoContent().finish(),
        },
    }
}

async fn handle_call(state: &web::Data<AppState>, call: Value) -> Option<RpcResponse> {
    let id = match &call {
        Value::Object(obj) => obj.get("id").cloned(),
        _ => Some(Value::Null),
    };

    let request: RpcRequest = match serde_json::from_value(call) {
        Ok(r) => r,
        Err(e) => {
            return Some(RpcResponse::error(
                id.unwrap_or(Value::Null),
                RpcError::new(INVALID_REQUEST, e.to_string()),
            ));
        }
    };

    debug!("RPC - {} {}", request.method, request.params);
    let outcome = dispatch(state, &request.method, &request.params).await;
    if let Err(e) = &outcome {
        debug!("RPC - {} failed: {} ({})", request.method, e.message, e.code);
    }
    id.map(|id| RpcResponse::from_result(id, outcome))
}

/// Route a method name to its handler.
pub async fn dispatch(
    state: &web::Data<AppState>,
    method: &str,
    params: &Value,
) -> Result<Value, RpcError> {
    match method {
        "eth_getWork" => mining::get_work(state).await,
        "eth_submitWork" => mining::submit_work(state, params).await,
        "eth_submitHashrate" => mining::submit_hashrate(params),
        "eth_hashrate" => mining::hashrate(state).await,
        "eth_getBlockByNumber" => chain::get_block_by_number(state).await,
        "eth_blockNumber" => chain::block_number(state).await,
        "web3_clientVersion" => Ok(client::client_version()),
        "parity_setAuthor" | "parity_setExtraData" => Ok(client::accept_setting(method, params)),
        other => Err(RpcError::new(
            METHOD_NOT_FOUND,
            format!("method {other} not found"),
        )),
    }
}

/// Positional string parameter.
pub(super) fn str_param<'a>(
    params: &'a Value,
    index: usize,
    name: &str,
) -> Result<&'a str, RpcError> {
    params
        .get(index)
        .and_then(Value::as_str)
        .ok_or_else(|| RpcError::invalid_params(format!("missing {name} (param {index})")))
}

pub(super) fn to_value<T: Serialize>(value: T) -> Result<Value, RpcError> {
    serde_json::to_value(value).map_err(|e| RpcError::internal(e.to_string()))
}
