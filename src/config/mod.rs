//! Configuration management
//! Load settings from a .env file, validate, optionally overlay a TOML tuning file

pub mod toml_config;

pub use crate::types::BotConfig;
pub use toml_config::TuningConfig;

use crate::error::{BotError, BotResult};
use crate::types::{DelaySettings, DelayWindow, SwapSettings};
use alloy::primitives::Address;
use rust_decimal::Decimal;
use std::str::FromStr;
use tracing::warn;

const DEFAULT_FAUCET_URL: &str = "https://testnet.somnia.network/api/faucet";

/// Longest single pause a delay window may produce (one day)
pub const MAX_DELAY_SECS: f64 = 86_400.0;

/// Load configuration from the process environment (after reading `.env`)
pub fn load_config() -> BotResult<BotConfig> {
    dotenv::dotenv().ok();
    config_from_lookup(|key| std::env::var(key).ok())
}

/// Load configuration from a specific env file, e.g. `.env.somnia`
pub fn load_config_from_file(path: &str) -> BotResult<BotConfig> {
    dotenv::from_filename(path)
        .map_err(|e| BotError::config(format!("cannot read env file {}: {}", path, e)))?;
    config_from_lookup(|key| std::env::var(key).ok())
}

/// Build and validate a config from any key → value source
pub fn config_from_lookup<F>(lookup: F) -> BotResult<BotConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
    let required = |key: &str| get(key).ok_or_else(|| BotError::config(format!("{} not set", key)));

    let private_key = required("PRIVATE_KEY")?;
    validate_private_key(&private_key)?;

    let chain_id = match get("CHAIN_ID") {
        Some(raw) => {
            let id: u64 = raw
                .parse()
                .map_err(|_| BotError::config(format!("CHAIN_ID is not a number: {}", raw)))?;
            // 0 means "detect from RPC"
            (id != 0).then_some(id)
        }
        None => None,
    };

    let swap = SwapSettings {
        min_swap_percent: parse_decimal(&get, "MIN_SWAP_PERCENT", "5")?,
        max_swap_percent: parse_decimal(&get, "MAX_SWAP_PERCENT", "15")?,
        slippage_percent: parse_decimal(&get, "SLIPPAGE_PERCENT", "0.5")?,
        pool_fee: parse_number(&get, "POOL_FEE_TIER", 500)?,
        deadline_secs: parse_number(&get, "SWAP_DEADLINE_SECONDS", 600)?,
        swaps_per_run: get("NUM_SWAPS")
            .map(|raw| {
                raw.parse::<u32>()
                    .map_err(|_| BotError::config(format!("NUM_SWAPS is not a number: {}", raw)))
            })
            .transpose()?,
        negligible_balance: parse_decimal(&get, "NEGLIGIBLE_BALANCE", "0.00001")?,
        min_native_balance: parse_decimal(&get, "MIN_NATIVE_BALANCE", "0.001")?,
    };

    let delays = DelaySettings {
        between_swaps: parse_window(&get, "SWAP_DELAY", 10.0, 10.0)?,
        after_tx: parse_window(&get, "TX_DELAY", 5.0, 5.0)?,
        after_approval: parse_window(&get, "APPROVAL_DELAY", 2.0, 1.0)?,
        between_phases: parse_window(&get, "PHASE_DELAY", 15.0, 10.0)?,
        skipped_iteration: DelayWindow::new(1.0, 0.0),
    };

    let config = BotConfig {
        rpc_url: required("RPC_URL")?,
        chain_id,
        tx_explorer: get("TX_EXPLORER").unwrap_or_default(),
        native_symbol: get("NATIVE_CURRENCY_SYMBOL").unwrap_or_else(|| "NativeCoin".to_string()),
        private_key,
        router: parse_address(&required("ROUTER_ADDRESS")?, "ROUTER_ADDRESS")?,
        token_a: parse_address(&required("TOKEN_A_ADDRESS")?, "TOKEN_A_ADDRESS")?,
        token_b: parse_address(&required("TOKEN_B_ADDRESS")?, "TOKEN_B_ADDRESS")?,
        token_a_name: get("TOKEN_A_NAME").unwrap_or_else(|| "PONG".to_string()),
        token_b_name: get("TOKEN_B_NAME").unwrap_or_else(|| "PING".to_string()),
        faucet_url: get("FAUCET_URL").unwrap_or_else(|| DEFAULT_FAUCET_URL.to_string()),
        faucet_enabled: parse_bool(&get, "ENABLE_FAUCET", true)?,
        mint_enabled: parse_bool(&get, "ENABLE_MINT", true)?,
        swap,
        delays,
        discord_webhook: get("DISCORD_WEBHOOK"),
    };

    validate(&config)?;
    Ok(config)
}

/// Cross-field checks. Run again after tuning overrides are applied.
pub fn validate(config: &BotConfig) -> BotResult<()> {
    if !config.rpc_url.starts_with("http://") && !config.rpc_url.starts_with("https://") {
        return Err(BotError::config(format!(
            "RPC_URL must be an http(s) endpoint: {}",
            config.rpc_url
        )));
    }

    if config.token_a == config.token_b {
        return Err(BotError::config("TOKEN_A_ADDRESS and TOKEN_B_ADDRESS are identical"));
    }
    if config.router == config.token_a || config.router == config.token_b {
        return Err(BotError::config("ROUTER_ADDRESS must differ from the token addresses"));
    }

    let swap = &config.swap;
    let hundred = Decimal::ONE_HUNDRED;
    if swap.slippage_percent < Decimal::ZERO || swap.slippage_percent >= hundred {
        return Err(BotError::config(format!(
            "SLIPPAGE_PERCENT must be in [0, 100): {}",
            swap.slippage_percent
        )));
    }
    if swap.min_swap_percent <= Decimal::ZERO || swap.max_swap_percent > hundred {
        return Err(BotError::config(format!(
            "swap percentages must be in (0, 100]: {}..{}",
            swap.min_swap_percent, swap.max_swap_percent
        )));
    }
    if swap.min_swap_percent > swap.max_swap_percent {
        return Err(BotError::config(format!(
            "MIN_SWAP_PERCENT ({}) exceeds MAX_SWAP_PERCENT ({})",
            swap.min_swap_percent, swap.max_swap_percent
        )));
    }
    if swap.swaps_per_run == Some(0) {
        return Err(BotError::config("NUM_SWAPS must be at least 1"));
    }
    if swap.pool_fee > 0xFF_FFFF {
        return Err(BotError::config(format!("POOL_FEE_TIER exceeds uint24: {}", swap.pool_fee)));
    }
    if swap.negligible_balance < Decimal::ZERO {
        return Err(BotError::config("NEGLIGIBLE_BALANCE must not be negative"));
    }

    let d = &config.delays;
    for (name, w) in [
        ("SWAP_DELAY", d.between_swaps),
        ("TX_DELAY", d.after_tx),
        ("APPROVAL_DELAY", d.after_approval),
        ("PHASE_DELAY", d.between_phases),
        ("SKIP_DELAY", d.skipped_iteration),
    ] {
        let finite = w.base_secs.is_finite() && w.jitter_secs.is_finite();
        if !finite || w.base_secs < 0.0 || w.jitter_secs < 0.0 {
            return Err(BotError::config(format!("{} must be non-negative seconds", name)));
        }
        if w.base_secs + w.jitter_secs > MAX_DELAY_SECS {
            return Err(BotError::config(format!(
                "{} base + jitter exceeds {}s: {} + {}",
                name, MAX_DELAY_SECS, w.base_secs, w.jitter_secs
            )));
        }
    }

    if config.faucet_enabled && !config.faucet_url.starts_with("http") {
        return Err(BotError::config(format!("FAUCET_URL is not a URL: {}", config.faucet_url)));
    }
    if config.tx_explorer.is_empty() {
        warn!("TX_EXPLORER not set - transaction links will show bare hashes");
    }

    Ok(())
}

fn validate_private_key(key: &str) -> BotResult<()> {
    let hex = key.strip_prefix("0x").unwrap_or(key);
    if hex.len() != 64 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(BotError::config(
            "PRIVATE_KEY must be 32 bytes of hex (placeholder left in .env?)",
        ));
    }
    Ok(())
}

fn parse_address(raw: &str, key: &str) -> BotResult<Address> {
    let addr = Address::from_str(raw)
        .map_err(|e| BotError::config(format!("{} is not a valid address ({}): {}", key, raw, e)))?;
    if addr == Address::ZERO {
        return Err(BotError::config(format!("{} is the zero address", key)));
    }
    Ok(addr)
}

fn parse_decimal<G>(get: &G, key: &str, default: &str) -> BotResult<Decimal>
where
    G: Fn(&str) -> Option<String>,
{
    let raw = get(key).unwrap_or_else(|| default.to_string());
    Decimal::from_str(&raw)
        .map_err(|_| BotError::config(format!("{} is not a decimal number: {}", key, raw)))
}

fn parse_number<G, T>(get: &G, key: &str, default: T) -> BotResult<T>
where
    G: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match get(key) {
        Some(raw) => raw
            .parse()
            .map_err(|_| BotError::config(format!("{} is not a number: {}", key, raw))),
        None => Ok(default),
    }
}

fn parse_bool<G>(get: &G, key: &str, default: bool) -> BotResult<bool>
where
    G: Fn(&str) -> Option<String>,
{
    match get(key).map(|v| v.to_lowercase()) {
        None => Ok(default),
        Some(v) => match v.as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            _ => Err(BotError::config(format!("{} is not a boolean: {}", key, v))),
        },
    }
}

/// Reads `<PREFIX>_BASE_SECONDS` and `<PREFIX>_JITTER_SECONDS`
fn parse_window<G>(get: &G, prefix: &str, base: f64, jitter: f64) -> BotResult<DelayWindow>
where
    G: Fn(&str) -> Option<String>,
{
    Ok(DelayWindow::new(
        parse_number(get, &format!("{}_BASE_SECONDS", prefix), base)?,
        parse_number(get, &format!("{}_JITTER_SECONDS", prefix), jitter)?,
    ))
}
