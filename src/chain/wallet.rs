//! Signing wallet for the run

use crate::error::{BotError, BotResult};
use alloy::network::EthereumWallet;
use alloy::primitives::Address;
use alloy::signers::local::PrivateKeySigner;

/// Wallet address plus signing key. Built once at startup, never mutated.
#[derive(Clone)]
pub struct WalletContext {
    address: Address,
    signer: PrivateKeySigner,
}

impl WalletContext {
    pub fn from_private_key(key: &str) -> BotResult<Self> {
        let signer: PrivateKeySigner = key
            .trim()
            .parse()
            .map_err(|e| BotError::config(format!("invalid PRIVATE_KEY: {}", e)))?;
        Ok(Self {
            address: signer.address(),
            signer,
        })
    }

    pub fn address(&self) -> Address {
        self.address
    }

    /// Network wallet for the alloy provider's signing filler
    pub fn ethereum_wallet(&self) -> EthereumWallet {
        EthereumWallet::from(self.signer.clone())
    }
}

impl std::fmt::Debug for WalletContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // never print the key
        f.debug_struct("WalletContext")
            .field("address", &self.address)
            .finish_non_exhaustive()
    }
}
