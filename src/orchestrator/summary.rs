// End-of-run report, logged and handed to the notifier

use super::swap_phase::SwapStats;
use crate::types::PhaseResult;
use alloy::primitives::Address;
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub wallet: Address,
    pub chain_id: Option<u64>,
    /// In execution order; skipped phases are absent
    pub phases: Vec<PhaseResult>,
    pub swaps: SwapStats,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl RunSummary {
    pub fn duration_secs(&self) -> i64 {
        (self.finished_at - self.started_at).num_seconds().max(0)
    }

    pub fn all_phases_succeeded(&self) -> bool {
        self.phases.iter().all(|p| p.succeeded)
    }

    /// Plain-text rendering, one line per phase
    pub fn render(&self) -> String {
        let mut lines = vec![format!(
            "Run finished for {:?} in {}s",
            self.wallet,
            self.duration_secs()
        )];
        lines.extend(self.phases.iter().map(|p| format!("  {}", p)));
        lines.push(format!(
            "  Swaps: {} planned, {} attempted, {} confirmed, {} skipped, {} failed",
            self.swaps.planned,
            self.swaps.attempted,
            self.swaps.confirmed,
            self.swaps.skipped,
            self.swaps.failed
        ));
        lines.join("\n")
    }
}
