//! Show a guild's channels the viewer cannot open.
//!
//! The host client keeps rendering its channel list from its own indices.
//! This crate sits between those indices and the renderer:
//!
//! - [`HiddenSetCache`] works out, per guild, which channels the viewer
//!   lacks `VIEW_CHANNEL` for, and only rescans when the guild's
//!   fingerprint (visible-channel signal, role count) changes.
//! - [`TreeMerger`] splices those channels back into the host's
//!   [`ChannelView`], either in place or under a synthetic "hidden"
//!   category. It is safe to run on its own output.
//! - [`VisibilityOverlay`] wraps the host's unread queries so hidden
//!   channels never show a badge.
//!
//! Everything the crate needs from the host comes through the traits in
//! [`host`]. [`Snapshot`] implements all of them from JSON.
//!
//! ```
//! use show_hidden_channels::{HiddenSetCache, Snapshot, TreeMerger};
//! use show_hidden_channels::types::{ChannelId, Id};
//!
//! let snapshot = Snapshot::from_json(r#"{
//!     "viewer": "100",
//!     "guilds": [{
//!         "id": "1",
//!         "channels": [
//!             { "id": "10", "guild_id": "1", "type": 4, "position": 0 },
//!             { "id": "11", "guild_id": "1", "type": 0, "parent_id": "10", "position": 0 },
//!             { "id": "12", "guild_id": "1", "type": 0, "parent_id": "10", "position": 1 }
//!         ],
//!         "denied": ["12"]
//!     }]
//! }"#).unwrap();
//!
//! let guild = Id::new(1);
//! let view = snapshot.visible_view(guild);
//! let cache = HiddenSetCache::new(&snapshot);
//! let merged = TreeMerger::new(&cache).merge(Some(guild), &view, false);
//!
//! let category = merged.categories.bucket(Some(ChannelId::Snowflake(Id::new(10)))).unwrap();
//! assert_eq!(category.len(), 2);
//! assert!(cache.is_hidden(ChannelId::Snowflake(Id::new(12))));
//! ```

pub mod cache;
pub mod config;
pub mod host;
pub mod merge;
pub mod overlay;
pub mod snapshot;
pub mod types;

pub use self::cache::{Fingerprint, HiddenChannels, HiddenSetCache};
pub use self::config::{ConfigError, ConfigErrorType, HiddenChannelsConfig};
pub use self::host::{GuildIndex, Host, PermissionOracle, RoleProvider, UnreadProvider};
pub use self::merge::{MergeError, MergeErrorType, TreeMerger};
pub use self::overlay::VisibilityOverlay;
pub use self::snapshot::{GuildState, Snapshot, UnreadState};
pub use self::types::ChannelView;
