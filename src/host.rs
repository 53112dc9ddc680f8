//! Capabilities the host client provides.
//!
//! The crate never reaches into host state directly. Everything it needs to
//! know about the guild, the viewer and their permissions comes through
//! these traits, injected into [`HiddenSetCache`] and [`VisibilityOverlay`].
//! All calls are synchronous and are expected to be cheap lookups into data
//! the host already holds in memory.
//!
//! [`HiddenSetCache`]: crate::cache::HiddenSetCache
//! [`VisibilityOverlay`]: crate::overlay::VisibilityOverlay

use std::collections::BTreeMap;

use crate::types::{
    channel::{Channel, ChannelId},
    guild::Permissions,
    id::{
        marker::{GuildMarker, UserMarker},
        Id,
    },
};

/// Answers permission questions for the current viewer.
pub trait PermissionOracle {
    /// Whether the viewer holds `permission` in `channel`.
    fn can(&self, permission: Permissions, channel: &Channel) -> bool;
}

/// Read access to the host's channel store.
pub trait GuildIndex {
    /// Every channel of the guild, unfiltered by permissions.
    fn raw_channels(&self, guild_id: Id<GuildMarker>) -> BTreeMap<ChannelId, Channel>;

    /// Look up a single channel. `None` once the channel has been deleted.
    fn resolve(&self, channel_id: ChannelId) -> Option<Channel>;

    /// Opaque value that changes whenever the set of channels visible to the
    /// viewer in this guild changes. Only compared for equality.
    fn visible_signal(&self, guild_id: Id<GuildMarker>) -> u64;
}

/// The viewer's identity and membership.
pub trait RoleProvider {
    fn current_user(&self) -> Id<UserMarker>;

    /// Number of roles `user_id` holds in the guild, `0` if not a member.
    fn role_count(&self, guild_id: Id<GuildMarker>, user_id: Id<UserMarker>) -> usize;
}

/// The host's native unread state.
pub trait UnreadProvider {
    fn has_unread(&self, channel_id: ChannelId) -> bool;

    fn mention_count(&self, channel_id: ChannelId) -> u32;
}

/// Everything [`HiddenSetCache`] needs from the host.
///
/// Implemented for any type providing the three underlying capabilities.
///
/// [`HiddenSetCache`]: crate::cache::HiddenSetCache
pub trait Host: GuildIndex + PermissionOracle + RoleProvider {}

impl<T: GuildIndex + PermissionOracle + RoleProvider> Host for T {}

impl<T: PermissionOracle + ?Sized> PermissionOracle for &T {
    fn can(&self, permission: Permissions, channel: &Channel) -> bool {
        (**self).can(permission, channel)
    }
}

impl<T: GuildIndex + ?Sized> GuildIndex for &T {
    fn raw_channels(&self, guild_id: Id<GuildMarker>) -> BTreeMap<ChannelId, Channel> {
        (**self).raw_channels(guild_id)
    }

    fn resolve(&self, channel_id: ChannelId) -> Option<Channel> {
        (**self).resolve(channel_id)
    }

    fn visible_signal(&self, guild_id: Id<GuildMarker>) -> u64 {
        (**self).visible_signal(guild_id)
    }
}

impl<T: RoleProvider + ?Sized> RoleProvider for &T {
    fn current_user(&self) -> Id<UserMarker> {
        (**self).current_user()
    }

    fn role_count(&self, guild_id: Id<GuildMarker>, user_id: Id<UserMarker>) -> usize {
        (**self).role_count(guild_id, user_id)
    }
}

impl<T: UnreadProvider + ?Sized> UnreadProvider for &T {
    fn has_unread(&self, channel_id: ChannelId) -> bool {
        (**self).has_unread(channel_id)
    }

    fn mention_count(&self, channel_id: ChannelId) -> u32 {
        (**self).mention_count(channel_id)
    }
}
