//! An in-memory host loaded from JSON.
//!
//! [`Snapshot`] implements every capability in [`crate::host`] from plain
//! data: the guild's channels, the channels the viewer is denied, their
//! role count and the visible-channel signal. The demo binary renders
//! snapshots, and the tests use them as the host.
//!
//! ```json
//! {
//!   "viewer": "100",
//!   "guilds": [{
//!     "id": "1",
//!     "roles": 2,
//!     "visible_signal": 7,
//!     "channels": [
//!       { "id": "10", "guild_id": "1", "type": 4, "name": "general", "position": 0 },
//!       { "id": "11", "guild_id": "1", "type": 0, "parent_id": "10", "position": 0 }
//!     ],
//!     "denied": ["11"],
//!     "unread": [{ "channel_id": "11", "mentions": 3 }]
//!   }]
//! }
//! ```
//!
//! Mutating a snapshot does not touch `visible_signal`; a caller modelling
//! a permission change bumps it explicitly, the way a real store would.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::host::{GuildIndex, PermissionOracle, RoleProvider, UnreadProvider};
use crate::types::{
    channel::{Channel, ChannelId},
    guild::Permissions,
    id::{
        marker::{GuildMarker, UserMarker},
        Id,
    },
    view::ChannelView,
};

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Snapshot {
    /// The user the channel list is rendered for.
    pub viewer: Id<UserMarker>,
    #[serde(default)]
    pub guilds: Vec<GuildState>,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct GuildState {
    pub id: Id<GuildMarker>,
    /// The viewer's role count in this guild.
    #[serde(default)]
    pub roles: usize,
    #[serde(default)]
    pub visible_signal: u64,
    #[serde(default)]
    pub channels: Vec<Channel>,
    /// Channels the viewer may not see.
    #[serde(default)]
    pub denied: BTreeSet<ChannelId>,
    #[serde(default)]
    pub unread: Vec<UnreadState>,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct UnreadState {
    pub channel_id: ChannelId,
    #[serde(default)]
    pub mentions: u32,
}

impl Snapshot {
    pub fn new(viewer: Id<UserMarker>) -> Self {
        Self {
            viewer,
            guilds: Vec::new(),
        }
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn guild(&self, guild_id: Id<GuildMarker>) -> Option<&GuildState> {
        self.guilds.iter().find(|guild| guild.id == guild_id)
    }

    pub fn guild_mut(&mut self, guild_id: Id<GuildMarker>) -> Option<&mut GuildState> {
        self.guilds.iter_mut().find(|guild| guild.id == guild_id)
    }

    fn owner_mut(&mut self, channel_id: ChannelId) -> Option<&mut GuildState> {
        self.guilds
            .iter_mut()
            .find(|guild| guild.channels.iter().any(|channel| channel.id == channel_id))
    }

    /// Revoke the viewer's access to a channel. Returns `false` if the
    /// channel is unknown.
    pub fn deny(&mut self, channel_id: ChannelId) -> bool {
        match self.owner_mut(channel_id) {
            Some(guild) => {
                guild.denied.insert(channel_id);
                true
            }
            None => false,
        }
    }

    /// Grant the viewer access to a channel again.
    pub fn grant(&mut self, channel_id: ChannelId) -> bool {
        self.guilds
            .iter_mut()
            .any(|guild| guild.denied.remove(&channel_id))
    }

    /// Delete a channel from its guild.
    pub fn remove_channel(&mut self, channel_id: ChannelId) -> Option<Channel> {
        let guild = self.owner_mut(channel_id)?;
        let position = guild
            .channels
            .iter()
            .position(|channel| channel.id == channel_id)?;
        guild.denied.remove(&channel_id);

        Some(guild.channels.remove(position))
    }

    /// The indices the host would render without hidden channels.
    pub fn visible_view(&self, guild_id: Id<GuildMarker>) -> ChannelView {
        let channels = self
            .guild(guild_id)
            .map(|guild| {
                guild
                    .channels
                    .iter()
                    .filter(|channel| {
                        channel.is_category() || self.can(Permissions::VIEW_CHANNEL, channel)
                    })
                    .cloned()
                    .collect::<Vec<_>>()
            })
            .unwrap_or_default();

        ChannelView::build(channels)
    }

    fn is_denied(&self, channel: &Channel) -> bool {
        channel
            .guild_id
            .and_then(|guild_id| self.guild(guild_id))
            .is_some_and(|guild| guild.denied.contains(&channel.id))
    }

    fn unread_state(&self, channel_id: ChannelId) -> Option<&UnreadState> {
        self.guilds
            .iter()
            .flat_map(|guild| guild.unread.iter())
            .find(|state| state.channel_id == channel_id)
    }
}

impl PermissionOracle for Snapshot {
    fn can(&self, _permission: Permissions, channel: &Channel) -> bool {
        !self.is_denied(channel)
    }
}

impl GuildIndex for Snapshot {
    fn raw_channels(&self, guild_id: Id<GuildMarker>) -> BTreeMap<ChannelId, Channel> {
        self.guild(guild_id)
            .map(|guild| {
                guild
                    .channels
                    .iter()
                    .map(|channel| (channel.id, channel.clone()))
                    .collect()
            })
            .unwrap_or_default()
    }

    fn resolve(&self, channel_id: ChannelId) -> Option<Channel> {
        self.guilds
            .iter()
            .flat_map(|guild| guild.channels.iter())
            .find(|channel| channel.id == channel_id)
            .cloned()
    }

    fn visible_signal(&self, guild_id: Id<GuildMarker>) -> u64 {
        self.guild(guild_id)
            .map(|guild| guild.visible_signal)
            .unwrap_or_default()
    }
}

impl RoleProvider for Snapshot {
    fn current_user(&self) -> Id<UserMarker> {
        self.viewer
    }

    fn role_count(&self, guild_id: Id<GuildMarker>, user_id: Id<UserMarker>) -> usize {
        if user_id != self.viewer {
            return 0;
        }

        self.guild(guild_id).map(|guild| guild.roles).unwrap_or(0)
    }
}

impl UnreadProvider for Snapshot {
    fn has_unread(&self, channel_id: ChannelId) -> bool {
        self.unread_state(channel_id).is_some()
    }

    fn mention_count(&self, channel_id: ChannelId) -> u32 {
        self.unread_state(channel_id)
            .map(|state| state.mentions)
            .unwrap_or(0)
    }
}
