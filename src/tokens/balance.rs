//! Fresh balance reads. Nothing here is cached: balances change with
//! every confirmed swap, and stale reads would size swaps wrongly.

use super::cache::TokenInfoCache;
use super::units::raw_to_decimal;
use crate::chain::ChainClient;
use crate::error::BotResult;
use crate::types::BalanceSnapshot;
use alloy::primitives::{Address, U256};
use rust_decimal::Decimal;
use std::sync::Arc;

/// Native currency uses 18 decimals on every EVM chain we target
const NATIVE_DECIMALS: u8 = 18;

pub struct BalanceReader {
    chain: Arc<dyn ChainClient>,
    tokens: Arc<TokenInfoCache>,
}

impl BalanceReader {
    pub fn new(chain: Arc<dyn ChainClient>, tokens: Arc<TokenInfoCache>) -> Self {
        Self { chain, tokens }
    }

    /// ERC20 balance of `wallet` with the token's resolved metadata.
    /// Query failures propagate; callers decide whether to skip or abort.
    pub async fn balance_of(&self, token: Address, wallet: Address) -> BotResult<BalanceSnapshot> {
        let asset = self.tokens.resolve(token).await;
        let raw = self.chain.token_balance(token, wallet).await?;
        let formatted = raw_to_decimal(raw, asset.decimals);
        Ok(BalanceSnapshot {
            token: asset,
            raw,
            formatted,
        })
    }

    /// Native gas-token balance in human units
    pub async fn native_balance(&self, wallet: Address) -> BotResult<(U256, Decimal)> {
        let raw = self.chain.native_balance(wallet).await?;
        Ok((raw, raw_to_decimal(raw, NATIVE_DECIMALS)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BotError;
    use crate::test_support::{units, MockChain, TOKEN_A, WALLET};
    use rust_decimal_macros::dec;

    fn reader(chain: Arc<MockChain>) -> BalanceReader {
        let tokens = Arc::new(TokenInfoCache::new(chain.clone(), Vec::<(Address, String)>::new()));
        BalanceReader::new(chain, tokens)
    }

    #[tokio::test]
    async fn test_balance_formatted_with_decimals() {
        let chain = Arc::new(MockChain::new());
        chain.set_token(TOKEN_A, "PONG", 6);
        chain.set_balance(TOKEN_A, U256::from(2_500_000u64));

        let snap = reader(chain).balance_of(TOKEN_A, WALLET).await.unwrap();
        assert_eq!(snap.raw, U256::from(2_500_000u64));
        assert_eq!(snap.formatted, dec!(2.5));
        assert_eq!(snap.token.symbol, "PONG");
    }

    #[tokio::test]
    async fn test_every_read_is_fresh() {
        let chain = Arc::new(MockChain::new());
        chain.set_token(TOKEN_A, "PONG", 18);
        chain.set_balance(TOKEN_A, units(10));
        let reader = reader(chain.clone());

        assert_eq!(reader.balance_of(TOKEN_A, WALLET).await.unwrap().formatted, dec!(10));
        chain.set_balance(TOKEN_A, units(3));
        assert_eq!(reader.balance_of(TOKEN_A, WALLET).await.unwrap().formatted, dec!(3));
    }

    #[tokio::test]
    async fn test_query_failure_propagates() {
        let chain = Arc::new(MockChain::new());
        chain.set_token(TOKEN_A, "PONG", 18);
        chain.fail_balance_reads(true);

        let err = reader(chain).balance_of(TOKEN_A, WALLET).await.unwrap_err();
        assert!(matches!(err, BotError::Query(_)));
    }

    #[tokio::test]
    async fn test_native_balance() {
        let chain = Arc::new(MockChain::new());
        chain.set_native_balance(U256::from(500_000_000_000_000u64));

        let (raw, human) = reader(chain).native_balance(WALLET).await.unwrap();
        assert_eq!(raw, U256::from(500_000_000_000_000u64));
        assert_eq!(human, dec!(0.0005));
    }
}
