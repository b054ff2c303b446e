//! TOML Tuning File
//!
//! Optional overrides for the numeric swap and delay parameters, so a run
//! profile can be tweaked without touching the .env file that holds the key.
//!
//! ```toml
//! [swap]
//! min_percent = "5"
//! max_percent = "15"
//! slippage_percent = "0.5"
//! swaps_per_run = 8
//!
//! [delays]
//! swap_base_secs = 10.0
//! swap_jitter_secs = 10.0
//! ```

use crate::error::{BotError, BotResult};
use crate::types::{BotConfig, DelayWindow};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::path::Path;

/// Top-level tuning file structure
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TuningConfig {
    #[serde(default)]
    pub swap: SwapTuning,
    #[serde(default)]
    pub delays: DelayTuning,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SwapTuning {
    pub min_percent: Option<Decimal>,
    pub max_percent: Option<Decimal>,
    pub slippage_percent: Option<Decimal>,
    pub swaps_per_run: Option<u32>,
    pub pool_fee: Option<u32>,
    pub deadline_secs: Option<u64>,
    pub negligible_balance: Option<Decimal>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DelayTuning {
    pub swap_base_secs: Option<f64>,
    pub swap_jitter_secs: Option<f64>,
    pub tx_base_secs: Option<f64>,
    pub tx_jitter_secs: Option<f64>,
    pub phase_base_secs: Option<f64>,
    pub phase_jitter_secs: Option<f64>,
}

impl TuningConfig {
    /// Load tuning overrides from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> BotResult<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            BotError::config(format!(
                "failed to read tuning file {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> BotResult<Self> {
        toml::from_str(content)
            .map_err(|e| BotError::config(format!("failed to parse tuning file: {}", e)))
    }

    /// Overlay onto `config` and re-validate the result
    pub fn apply(&self, config: &mut BotConfig) -> BotResult<()> {
        let swap = &mut config.swap;
        if let Some(v) = self.swap.min_percent {
            swap.min_swap_percent = v;
        }
        if let Some(v) = self.swap.max_percent {
            swap.max_swap_percent = v;
        }
        if let Some(v) = self.swap.slippage_percent {
            swap.slippage_percent = v;
        }
        if let Some(v) = self.swap.swaps_per_run {
            swap.swaps_per_run = Some(v);
        }
        if let Some(v) = self.swap.pool_fee {
            swap.pool_fee = v;
        }
        if let Some(v) = self.swap.deadline_secs {
            swap.deadline_secs = v;
        }
        if let Some(v) = self.swap.negligible_balance {
            swap.negligible_balance = v;
        }

        let d = &self.delays;
        let delays = &mut config.delays;
        delays.between_swaps = overlay(delays.between_swaps, d.swap_base_secs, d.swap_jitter_secs);
        delays.after_tx = overlay(delays.after_tx, d.tx_base_secs, d.tx_jitter_secs);
        delays.between_phases =
            overlay(delays.between_phases, d.phase_base_secs, d.phase_jitter_secs);

        super::validate(config)
    }
}

fn overlay(window: DelayWindow, base: Option<f64>, jitter: Option<f64>) -> DelayWindow {
    DelayWindow::new(
        base.unwrap_or(window.base_secs),
        jitter.unwrap_or(window.jitter_secs),
    )
}
