//! Print a snapshot's channel lists with hidden channels merged in.
//!
//! Usage: `show_hidden_channels <snapshot.json>`, or set `SHC_SNAPSHOT`.
//! `SHC_SORT_NATIVE=false` groups hidden channels under a synthetic
//! category. A `.env` file is honoured for both.

use std::process::ExitCode;

use tracing::{error, info};

use show_hidden_channels::types::{Channel, ChannelType, GuildMarker, Id};
use show_hidden_channels::{
    ChannelView, HiddenChannelsConfig, HiddenSetCache, Host, Snapshot, TreeMerger,
};

const SNAPSHOT_VAR: &str = "SHC_SNAPSHOT";

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    dotenv::dotenv().ok();

    let Some(path) = std::env::args()
        .nth(1)
        .or_else(|| std::env::var(SNAPSHOT_VAR).ok())
    else {
        error!("usage: show_hidden_channels <snapshot.json> (or set {SNAPSHOT_VAR})");
        return ExitCode::FAILURE;
    };

    let config = match HiddenChannelsConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "invalid configuration");
            return ExitCode::FAILURE;
        }
    };

    let json = match std::fs::read_to_string(&path) {
        Ok(json) => json,
        Err(e) => {
            error!(path = %path, error = %e, "failed to read snapshot");
            return ExitCode::FAILURE;
        }
    };

    let snapshot = match Snapshot::from_json(&json) {
        Ok(snapshot) => snapshot,
        Err(e) => {
            error!(path = %path, error = %e, "failed to parse snapshot");
            return ExitCode::FAILURE;
        }
    };

    let cache = HiddenSetCache::new(&snapshot);
    let merger = TreeMerger::new(&cache);

    for guild in &snapshot.guilds {
        let view = snapshot.visible_view(guild.id);
        let merged = merger.merge_with(Some(guild.id), &view, &config);
        info!(
            guild_id = %guild.id,
            hidden = cache.get_hidden(Some(guild.id)).len(),
            grouped = config.group_under_hidden_category(),
            "rendering channel list"
        );

        println!("{}", outline(guild.id, &merged, &cache));
    }

    ExitCode::SUCCESS
}

/// Uncategorized channels first, then each category with its children.
fn outline<H: Host>(
    guild_id: Id<GuildMarker>,
    view: &ChannelView,
    cache: &HiddenSetCache<H>,
) -> String {
    let label = |channel: &Channel| {
        let sigil = match channel.kind {
            ChannelType::GuildCategory => "▸",
            ChannelType::GuildVoice | ChannelType::GuildStageVoice => "~",
            _ => "#",
        };
        let name = channel
            .name
            .clone()
            .unwrap_or_else(|| format!("{} {}", channel.kind.name(), channel.id));
        let lock = if cache.is_hidden(channel.id) {
            " [hidden]"
        } else {
            ""
        };

        format!("{sigil} {name}{lock}")
    };

    let mut lines = vec![format!("guild {guild_id}")];
    for entry in view.categories.bucket(None).unwrap_or_default() {
        lines.push(format!("  {}", label(&entry.channel)));
    }
    for root in view.categories.roots.iter() {
        lines.push(format!("  {}", label(&root.channel)));
        let children = view.categories.bucket(Some(root.channel.id));
        for entry in children.unwrap_or_default() {
            lines.push(format!("    {}", label(&entry.channel)));
        }
    }

    lines.join("\n")
}
