//! Token Metadata Cache
//!
//! Resolves symbol + decimals once per token and memoizes the result for the
//! rest of the run. Keys are lowercase hex, so lookups are case-insensitive.
//! Never invalidated: metadata is assumed immutable for the run's duration.
//!
//! Resolution never fails. A failed `decimals()` falls back to 18, a failed
//! `symbol()` falls back to the static address → name table.

use crate::chain::ChainClient;
use crate::types::TokenAsset;
use alloy::primitives::Address;
use dashmap::DashMap;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};

pub const FALLBACK_DECIMALS: u8 = 18;
pub const UNKNOWN_SYMBOL: &str = "UNKNOWN_TOKEN";

fn cache_key(token: Address) -> String {
    format!("{:x}", token).to_lowercase()
}

pub struct TokenInfoCache {
    chain: Arc<dyn ChainClient>,
    assets: DashMap<String, TokenAsset>,
    /// Static fallback names, keyed like `assets`
    fallback_names: HashMap<String, String>,
}

impl TokenInfoCache {
    pub fn new<I>(chain: Arc<dyn ChainClient>, fallback_names: I) -> Self
    where
        I: IntoIterator<Item = (Address, String)>,
    {
        Self {
            chain,
            assets: DashMap::new(),
            fallback_names: fallback_names
                .into_iter()
                .map(|(addr, name)| (cache_key(addr), name))
                .collect(),
        }
    }

    /// Cached metadata, querying the token contract on first access
    pub async fn resolve(&self, token: Address) -> TokenAsset {
        let key = cache_key(token);
        if let Some(asset) = self.assets.get(&key) {
            return asset.clone();
        }

        let decimals = match self.chain.token_decimals(token).await {
            Ok(d) => d,
            Err(e) => {
                warn!(
                    "Token {:?}: decimals() failed, assuming {}: {}",
                    token, FALLBACK_DECIMALS, e
                );
                FALLBACK_DECIMALS
            }
        };

        let symbol = match self.chain.token_symbol(token).await {
            Ok(s) if !s.trim().is_empty() => s.trim().to_string(),
            Ok(_) => {
                warn!("Token {:?}: symbol() returned empty string, using fallback name", token);
                self.fallback_symbol(&key)
            }
            Err(e) => {
                warn!("Token {:?}: symbol() failed, using fallback name: {}", token, e);
                self.fallback_symbol(&key)
            }
        };

        let asset = TokenAsset {
            address: token,
            symbol,
            decimals,
        };
        debug!("Resolved token {:?}: {} ({} decimals)", token, asset.symbol, asset.decimals);

        // First writer wins so every caller sees the same asset
        self.assets.entry(key).or_insert(asset).clone()
    }

    fn fallback_symbol(&self, key: &str) -> String {
        self.fallback_names
            .get(key)
            .cloned()
            .unwrap_or_else(|| UNKNOWN_SYMBOL.to_string())
    }

    pub fn cached_count(&self) -> usize {
        self.assets.len()
    }
}
