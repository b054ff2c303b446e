//! Run-finished notification
//!
//! A single Discord webhook embed at the end of a run. Fire-and-forget:
//! delivery problems are logged, never returned.
//!
//! Created: 2026-10-19
//!
//! Usage:
//!   Set DISCORD_WEBHOOK to the webhook URL; unset disables notifications

use crate::orchestrator::RunSummary;
use async_trait::async_trait;
use serde::Serialize;
use tracing::{error, info, warn};

#[async_trait]
pub trait Notifier: Send + Sync {
    async fn run_finished(&self, summary: &RunSummary);
}

/// Discord webhook message structure
#[derive(Serialize)]
struct DiscordMessage {
    content: Option<String>,
    embeds: Vec<DiscordEmbed>,
}

#[derive(Serialize)]
struct DiscordEmbed {
    title: String,
    description: String,
    color: u32,
    fields: Vec<DiscordField>,
    footer: Option<DiscordFooter>,
    timestamp: Option<String>,
}

#[derive(Serialize)]
struct DiscordField {
    name: String,
    value: String,
    inline: bool,
}

#[derive(Serialize)]
struct DiscordFooter {
    text: String,
}

pub struct DiscordNotifier {
    webhook_url: Option<String>,
    client: reqwest::Client,
}

impl DiscordNotifier {
    pub fn new(webhook_url: Option<String>) -> Self {
        if webhook_url.is_some() {
            info!("Discord notifications enabled");
        } else {
            warn!("DISCORD_WEBHOOK not set - run summary will only be logged");
        }

        Self {
            webhook_url,
            client: reqwest::Client::new(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.webhook_url.is_some()
    }
}

fn summary_embed(summary: &RunSummary) -> DiscordEmbed {
    let failed_phases = summary.phases.iter().filter(|p| !p.succeeded).count();
    let color = if failed_phases == 0 {
        0x00FF00 // Green
    } else if summary.swaps.confirmed > 0 {
        0xFFA500 // Orange
    } else {
        0xFF0000 // Red
    };

    let mut fields: Vec<DiscordField> = summary
        .phases
        .iter()
        .map(|p| DiscordField {
            name: format!("{} {}", if p.succeeded { "✅" } else { "❌" }, p.phase),
            value: p.detail.clone(),
            inline: false,
        })
        .collect();

    fields.push(DiscordField {
        name: "Swaps".to_string(),
        value: format!(
            "{} confirmed / {} attempted ({} skipped, {} failed) of {} planned",
            summary.swaps.confirmed,
            summary.swaps.attempted,
            summary.swaps.skipped,
            summary.swaps.failed,
            summary.swaps.planned
        ),
        inline: false,
    });

    DiscordEmbed {
        title: "🔁 Autoswap Run Finished".to_string(),
        description: format!(
            "**Wallet:** `{:?}`\n**Duration:** {}s",
            summary.wallet,
            summary.duration_secs()
        ),
        color,
        fields,
        footer: Some(DiscordFooter {
            text: match summary.chain_id {
                Some(id) => format!("autoswap-bot | chain {}", id),
                None => "autoswap-bot".to_string(),
            },
        }),
        timestamp: Some(summary.finished_at.to_rfc3339()),
    }
}

#[async_trait]
impl Notifier for DiscordNotifier {
    async fn run_finished(&self, summary: &RunSummary) {
        let webhook_url = match &self.webhook_url {
            Some(url) => url,
            None => return,
        };

        let message = DiscordMessage {
            content: None,
            embeds: vec![summary_embed(summary)],
        };

        match self.client.post(webhook_url).json(&message).send().await {
            Ok(response) => {
                if response.status().is_success() {
                    info!("Discord run summary sent");
                } else {
                    warn!("Discord webhook returned status: {}", response.status());
                }
            }
            Err(e) => {
                error!("Failed to send Discord run summary: {}", e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orchestrator::SwapStats;
    use crate::types::{PhaseName, PhaseResult};
    use alloy::primitives::Address;

    fn summary(phases: Vec<PhaseResult>, confirmed: u32) -> RunSummary {
        let now = chrono::Utc::now();
        RunSummary {
            wallet: Address::repeat_byte(0x42),
            chain_id: Some(50312),
            phases,
            swaps: SwapStats {
                planned: 5,
                attempted: confirmed,
                confirmed,
                ..Default::default()
            },
            started_at: now,
            finished_at: now,
        }
    }

    #[test]
    fn test_embed_color_and_fields() {
        let all_ok = summary(
            vec![
                PhaseResult::ok(PhaseName::Faucet, "claimed"),
                PhaseResult::ok(PhaseName::Mint, "2/2 minted"),
                PhaseResult::ok(PhaseName::Swap, "5/5 confirmed"),
            ],
            5,
        );
        let embed = summary_embed(&all_ok);
        assert_eq!(embed.color, 0x00FF00);
        assert_eq!(embed.fields.len(), 4);
        assert!(embed.footer.unwrap().text.contains("50312"));

        let partial = summary(vec![PhaseResult::failed(PhaseName::Faucet, "HTTP 500")], 2);
        assert_eq!(summary_embed(&partial).color, 0xFFA500);

        let nothing = summary(vec![PhaseResult::failed(PhaseName::Swap, "no balance")], 0);
        assert_eq!(summary_embed(&nothing).color, 0xFF0000);
    }

    #[test]
    fn test_message_serializes() {
        let message = DiscordMessage {
            content: None,
            embeds: vec![summary_embed(&summary(vec![], 0))],
        };
        let json = serde_json::to_value(&message).unwrap();
        assert!(json["content"].is_null());
        assert_eq!(json["embeds"][0]["title"], "🔁 Autoswap Run Finished");
    }

    #[tokio::test]
    async fn test_disabled_notifier_is_noop() {
        let notifier = DiscordNotifier::new(None);
        assert!(!notifier.is_enabled());
        notifier.run_finished(&summary(vec![], 0)).await;
    }
}
