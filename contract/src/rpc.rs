//! Ethereum JSON-RPC transport.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use crate::ContractError;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP client for a JSON-RPC 2.0 endpoint.
///
/// Wraps `reqwest::Client` with the endpoint URL and a request-id counter.
#[derive(Debug)]
pub struct JsonRpcClient {
    http: reqwest::Client,
    url: String,
    next_id: AtomicU64,
}

#[derive(Debug, Deserialize)]
struct RpcResponse<T> {
    result: Option<T>,
    error: Option<RpcErrorObject>,
}

#[derive(Debug, Deserialize)]
struct RpcErrorObject {
    code: i64,
    message: String,
}

impl JsonRpcClient {
    /// Create a client for `url` (e.g. `http://127.0.0.1:8545`).
    pub fn new(url: impl Into<String>) -> Result<Self, ContractError> {
        let http = reqwest::Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .connect_timeout(DEFAULT_CONNECT_TIMEOUT)
            .build()
            .map_err(|e| ContractError::Transport(format!("failed to create HTTP client: {e}")))?;
        Ok(Self {
            http,
            url: url.into(),
            next_id: AtomicU64::new(1),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Send one request and decode its `result`.
    ///
    /// A `null` result decodes as `T`'s null form, so callers expecting an
    /// optional value should request `Option<T>`.
    pub async fn request<T: DeserializeOwned>(
        &self,
        method: &str,
        params: serde_json::Value,
    ) -> Result<T, ContractError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let body = serde_json::json!({
            "jsonrpc": "2.0",
            "id": id,
            "method": method,
            "params": params,
        });
        tracing::trace!(method, id, "json-rpc request");

        let response = self
            .http
            .post(&self.url)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ContractError::Transport(format!("{method} timed out: {e}"))
                } else {
                    ContractError::Transport(format!("{method}: {e}"))
                }
            })?;

        if !response.status().is_success() {
            return Err(ContractError::Transport(format!(
                "{method}: endpoint returned HTTP {}",
                response.status()
            )));
        }

        let value: serde_json::Value = response
            .json()
            .await
            .map_err(|e| ContractError::InvalidResponse(format!("{method}: invalid JSON: {e}")))?;
        decode_response(method, value)
    }
}

/// Split a JSON-RPC response body into its result or error.
pub(crate) fn decode_response<T: DeserializeOwned>(
    method: &str,
    value: serde_json::Value,
) -> Result<T, ContractError> {
    let response: RpcResponse<serde_json::Value> = serde_json::from_value(value)
        .map_err(|e| ContractError::InvalidResponse(format!("{method}: {e}")))?;

    if let Some(err) = response.error {
        return Err(ContractError::Rpc {
            code: err.code,
            message: err.message,
        });
    }

    let result = response.result.unwrap_or(serde_json::Value::Null);
    serde_json::from_value(result)
        .map_err(|e| ContractError::InvalidResponse(format!("{method}: unexpected result: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_result() {
        let value = json!({ "jsonrpc": "2.0", "id": 1, "result": "0x2105" });
        let result: String = decode_response("eth_chainId", value).unwrap();
        assert_eq!(result, "0x2105");
    }

    #[test]
    fn surfaces_error_object_verbatim() {
        let value = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "error": { "code": 3, "message": "execution reverted: Cooldown not elapsed" }
        });
        let err = decode_response::<String>("eth_sendTransaction", value).unwrap_err();
        assert_eq!(
            err,
            ContractError::Rpc {
                code: 3,
                message: "execution reverted: Cooldown not elapsed".into()
            }
        );
    }

    #[test]
    fn null_result_decodes_as_none() {
        let value = json!({ "jsonrpc": "2.0", "id": 1, "result": null });
        let result: Option<String> = decode_response("eth_getTransactionReceipt", value).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn mistyped_result_is_invalid_response() {
        let value = json!({ "jsonrpc": "2.0", "id": 1, "result": 5 });
        let err = decode_response::<String>("eth_call", value).unwrap_err();
        assert!(matches!(err, ContractError::InvalidResponse(_)));
    }
}
