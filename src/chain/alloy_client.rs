//! Alloy-backed Chain Client
//!
//! Wraps an alloy HTTP provider that carries the wallet's signing filler.
//! Every submission follows the same path: estimate gas (+20%), price it
//! with the [`FeeStrategy`], send, wait for one confirmation, check status.
//! Nothing is pipelined; the caller is blocked until the receipt arrives.

use super::fees::{gas_limit_with_buffer, BaseFeeMultiplier, FeeStrategy};
use super::ChainClient;
use crate::contracts::{ISwapRouter, IERC20};
use crate::error::{BotError, BotResult};
use crate::types::{SwapIntent, TxOutcome};
use alloy::eips::BlockNumberOrTag;
use alloy::network::{ReceiptResponse, TransactionBuilder};
use alloy::primitives::{Address, U256};
use alloy::providers::Provider;
use alloy::rpc::types::TransactionRequest;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info};

/// Helper: convert u32 fee tier to alloy uint24 type for contract calls.
/// Uses from_limbs() because Uint<24, 1> doesn't impl From<u32>.
fn fee_to_u24(fee: u32) -> alloy::primitives::Uint<24, 1> {
    debug_assert!(fee <= 0xFFFFFF, "fee {} exceeds U24 max (16777215)", fee);
    alloy::primitives::Uint::from_limbs([fee as u64])
}

fn swap_params(
    intent: &SwapIntent,
    amount_out_minimum: U256,
) -> ISwapRouter::ExactInputSingleParams {
    ISwapRouter::ExactInputSingleParams {
        tokenIn: intent.token_in,
        tokenOut: intent.token_out,
        fee: fee_to_u24(intent.fee_tier),
        recipient: intent.recipient,
        deadline: U256::from(intent.deadline),
        amountIn: intent.amount_in,
        amountOutMinimum: amount_out_minimum,
        sqrtPriceLimitX96: intent.price_limit,
    }
}

/// Production [`ChainClient`] over an alloy provider
pub struct AlloyChainClient<P> {
    provider: Arc<P>,
    wallet_address: Address,
    router: Address,
    fee_strategy: Box<dyn FeeStrategy>,
}

impl<P: Provider + 'static> AlloyChainClient<P> {
    /// `provider` must already carry the wallet (ProviderBuilder::wallet)
    pub fn new(provider: Arc<P>, wallet_address: Address, router: Address) -> Self {
        Self {
            provider,
            wallet_address,
            router,
            fee_strategy: Box::new(BaseFeeMultiplier::default()),
        }
    }

    pub fn with_fee_strategy(mut self, fee_strategy: Box<dyn FeeStrategy>) -> Self {
        self.fee_strategy = fee_strategy;
        self
    }

    pub async fn chain_id(&self) -> BotResult<u64> {
        self.provider
            .get_chain_id()
            .await
            .map_err(|e| BotError::query(format!("eth_chainId failed: {}", e)))
    }

    pub async fn block_number(&self) -> BotResult<u64> {
        self.provider
            .get_block_number()
            .await
            .map_err(|e| BotError::query(format!("eth_blockNumber failed: {}", e)))
    }

    /// Gas price from the fee strategy, else the node's `eth_gasPrice`.
    /// `None` leaves pricing to the provider's fillers.
    async fn suggested_gas_price(&self) -> Option<u128> {
        let base_fee = match self.provider.get_block_by_number(BlockNumberOrTag::Latest).await {
            Ok(block) => block.and_then(|b| b.header.base_fee_per_gas).map(u128::from),
            Err(e) => {
                debug!("Latest block fetch failed: {}", e);
                None
            }
        };

        if let Some(price) = self.fee_strategy.gas_price(base_fee) {
            return Some(price);
        }
        match self.provider.get_gas_price().await {
            Ok(price) => Some(price),
            Err(e) => {
                debug!("eth_gasPrice failed, leaving gas price to provider: {}", e);
                None
            }
        }
    }

    async fn send_and_confirm(&self, tx: TransactionRequest, label: &str) -> BotResult<TxOutcome> {
        let mut tx = tx.with_from(self.wallet_address);

        let estimate = self
            .provider
            .estimate_gas(tx.clone())
            .await
            .map_err(|e| BotError::submission(format!("{} gas estimation failed: {}", label, e)))?;
        tx.set_gas_limit(gas_limit_with_buffer(estimate));

        if let Some(gas_price) = self.suggested_gas_price().await {
            tx.set_gas_price(gas_price);
        }
        debug!("{}: gas limit {} (estimate {})", label, gas_limit_with_buffer(estimate), estimate);

        let pending = self
            .provider
            .send_transaction(tx)
            .await
            .map_err(|e| BotError::submission(format!("{} send failed: {}", label, e)))?;
        let tx_hash = *pending.tx_hash();
        info!("{} tx submitted: {:?}", label, tx_hash);

        let receipt = pending
            .with_required_confirmations(1)
            .get_receipt()
            .await
            .map_err(|e| BotError::Execution {
                reason: format!("{} confirmation failed: {}", label, e),
                tx_hash: Some(format!("{:?}", tx_hash)),
            })?;

        if !receipt.status() {
            return Err(BotError::Execution {
                reason: format!("{} transaction reverted", label),
                tx_hash: Some(format!("{:?}", tx_hash)),
            });
        }

        Ok(TxOutcome {
            tx_hash: receipt.transaction_hash(),
            block_number: receipt.block_number().unwrap_or(0),
            gas_used: receipt.gas_used(),
        })
    }
}

#[async_trait]
impl<P: Provider + 'static> ChainClient for AlloyChainClient<P> {
    fn wallet_address(&self) -> Address {
        self.wallet_address
    }

    async fn native_balance(&self, owner: Address) -> BotResult<U256> {
        self.provider
            .get_balance(owner)
            .await
            .map_err(|e| BotError::query(format!("eth_getBalance failed: {}", e)))
    }

    async fn token_balance(&self, token: Address, owner: Address) -> BotResult<U256> {
        IERC20::new(token, self.provider.clone())
            .balanceOf(owner)
            .call()
            .await
            .map_err(|e| {
                BotError::query(format!("balanceOf({:?}) on {:?} failed: {}", owner, token, e))
            })
    }

    async fn token_decimals(&self, token: Address) -> BotResult<u8> {
        IERC20::new(token, self.provider.clone())
            .decimals()
            .call()
            .await
            .map_err(|e| BotError::query(format!("decimals() on {:?} failed: {}", token, e)))
    }

    async fn token_symbol(&self, token: Address) -> BotResult<String> {
        IERC20::new(token, self.provider.clone())
            .symbol()
            .call()
            .await
            .map_err(|e| BotError::query(format!("symbol() on {:?} failed: {}", token, e)))
    }

    async fn allowance(&self, token: Address, owner: Address, spender: Address) -> BotResult<U256> {
        IERC20::new(token, self.provider.clone())
            .allowance(owner, spender)
            .call()
            .await
            .map_err(|e| BotError::query(format!("allowance() on {:?} failed: {}", token, e)))
    }

    async fn approve(
        &self,
        token: Address,
        spender: Address,
        amount: U256,
    ) -> BotResult<TxOutcome> {
        let tx = IERC20::new(token, self.provider.clone())
            .approve(spender, amount)
            .into_transaction_request();
        self.send_and_confirm(tx, "Approval").await
    }

    async fn mint(&self, token: Address) -> BotResult<TxOutcome> {
        let tx = IERC20::new(token, self.provider.clone())
            .mint()
            .into_transaction_request();
        self.send_and_confirm(tx, "Mint").await
    }

    async fn simulate_swap(&self, intent: &SwapIntent) -> BotResult<U256> {
        // amountOutMinimum = 0: we want the router's real output, not a bound check
        let params = swap_params(intent, U256::ZERO);
        ISwapRouter::new(self.router, self.provider.clone())
            .exactInputSingle(params)
            .from(self.wallet_address)
            .call()
            .await
            .map_err(|e| BotError::query(e.to_string()))
    }

    async fn submit_swap(
        &self,
        intent: &SwapIntent,
        amount_out_minimum: U256,
    ) -> BotResult<TxOutcome> {
        let params = swap_params(intent, amount_out_minimum);
        let tx = ISwapRouter::new(self.router, self.provider.clone())
            .exactInputSingle(params)
            .into_transaction_request();
        self.send_and_confirm(tx, "Swap").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::U160;

    #[test]
    fn test_swap_params_layout() {
        let intent = SwapIntent::new(
            Address::repeat_byte(0xaa),
            Address::repeat_byte(0xbb),
            500,
            Address::repeat_byte(0xcc),
            U256::from(10_000u64),
            1_700_000_600,
        );
        let params = swap_params(&intent, U256::from(9_950u64));

        assert_eq!(params.tokenIn, Address::repeat_byte(0xaa));
        assert_eq!(params.tokenOut, Address::repeat_byte(0xbb));
        assert_eq!(params.fee, fee_to_u24(500));
        assert_eq!(params.recipient, Address::repeat_byte(0xcc));
        assert_eq!(params.deadline, U256::from(1_700_000_600u64));
        assert_eq!(params.amountOutMinimum, U256::from(9_950u64));
        assert_eq!(params.sqrtPriceLimitX96, U160::ZERO);
    }

    #[test]
    fn test_fee_to_u24() {
        assert_eq!(fee_to_u24(3000).to::<u32>(), 3000);
    }
}
