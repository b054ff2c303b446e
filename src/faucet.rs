//! Faucet Client
//!
//! One POST of `{"address": "0x..."}` to the testnet faucet. Best-effort:
//! the faucet phase logs any failure and the run carries on.
//!
//! Created: 2026-10-19

use crate::error::{BotError, BotResult, FaucetErrorCode};
use alloy::primitives::Address;
use async_trait::async_trait;
use serde::Serialize;
use std::time::Duration;
use tracing::debug;

const BROWSER_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:109.0) Gecko/20100101 Firefox/115.0";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Serialize)]
struct ClaimRequest {
    address: String,
}

/// Successful faucet answer
#[derive(Debug, Clone)]
pub struct FaucetReceipt {
    pub status: u16,
    /// JSON body, or the raw text wrapped in a JSON string
    pub body: serde_json::Value,
}

#[async_trait]
pub trait Faucet: Send + Sync {
    async fn claim(&self, address: Address) -> BotResult<FaucetReceipt>;
}

pub struct HttpFaucet {
    url: String,
    client: reqwest::Client,
}

impl HttpFaucet {
    pub fn new(url: impl Into<String>) -> BotResult<Self> {
        let client = reqwest::Client::builder()
            .user_agent(BROWSER_USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| BotError::config(format!("cannot build faucet HTTP client: {}", e)))?;
        Ok(Self {
            url: url.into(),
            client,
        })
    }
}

fn classify_transport_error(e: &reqwest::Error) -> FaucetErrorCode {
    if e.is_builder() {
        FaucetErrorCode::RequestSetup
    } else {
        FaucetErrorCode::NoResponse
    }
}

#[async_trait]
impl Faucet for HttpFaucet {
    async fn claim(&self, address: Address) -> BotResult<FaucetReceipt> {
        let body = ClaimRequest {
            address: address.to_checksum(None),
        };
        debug!("POST {} for {}", self.url, body.address);

        let response = self
            .client
            .post(&self.url)
            .json(&body)
            .send()
            .await
            .map_err(|e| BotError::Faucet {
                code: classify_transport_error(&e),
                message: e.to_string(),
            })?;

        let status = response.status();
        let text = response.text().await.unwrap_or_default();

        if !status.is_success() {
            return Err(BotError::Faucet {
                code: FaucetErrorCode::Status(status.as_u16()),
                message: if text.is_empty() {
                    format!("faucet returned {}", status)
                } else {
                    text
                },
            });
        }

        let body = serde_json::from_str(&text).unwrap_or(serde_json::Value::String(text));
        Ok(FaucetReceipt {
            status: status.as_u16(),
            body,
        })
    }
}
