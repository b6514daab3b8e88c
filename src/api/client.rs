use log::debug;
use serde_json::Value;

/// `web3_clientVersion`.
pub fn client_version() -> Value {
    Value::String(format!(
        "{}/v{}/rust",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION")
    ))
}

/// `parity_setAuthor` / `parity_setExtraData`: part of miner handshakes,
/// acknowledged without effect.
pub fn accept_setting(method: &str, params: &Value) -> Value {
    debug!("CLIENT - ignoring {} {}", method, params);
    Value::Bool(true)
}
