//! Per-guild cache of the channels hidden from the viewer.
//!
//! Computing the hidden set means asking the permission oracle about every
//! channel in the guild, which is too slow to do on every render. Instead
//! each guild's result is stored together with a [`Fingerprint`] of the
//! host state it was computed from, and reused while the fingerprint holds.
//!
//! ```text
//! get_hidden(guild)
//!       │
//!       ▼
//! fingerprint = (visible_signal, role_count)
//!       │
//!       ├─→ matches stored entry → reuse stored channels
//!       │
//!       └─→ missing or changed   → rescan every channel
//!       │
//!       ▼
//! prune channels that no longer resolve, store, return
//! ```
//!
//! Entries are `Arc`s swapped under a lock, so a reader always sees either
//! the previous entry or the new one in full.

use parking_lot::RwLock;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tracing::{debug, trace};

use crate::host::Host;
use crate::types::{
    channel::{Channel, ChannelId, ChannelType},
    guild::Permissions,
    id::{marker::GuildMarker, Id},
};

/// Host state a cached hidden set was computed from.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Fingerprint {
    pub visible_signal: u64,
    pub role_count: usize,
}

/// Channels hidden from the viewer in one guild, bucketed by type.
///
/// Every [`ChannelType`] has a bucket, possibly empty. Within a bucket the
/// channels keep the order they were scanned in. Cloning is cheap: the
/// buckets are shared.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct HiddenChannels {
    by_type: Arc<BTreeMap<ChannelType, Vec<Channel>>>,
    count: usize,
}

impl HiddenChannels {
    fn new(by_type: Arc<BTreeMap<ChannelType, Vec<Channel>>>) -> Self {
        let count = by_type.values().map(Vec::len).sum();
        Self { by_type, count }
    }

    /// Total number of hidden channels.
    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn by_type(&self) -> &BTreeMap<ChannelType, Vec<Channel>> {
        &self.by_type
    }

    pub fn of_type(&self, kind: ChannelType) -> &[Channel] {
        self.by_type.get(&kind).map(Vec::as_slice).unwrap_or(&[])
    }

    /// All hidden channels, by type and then in scan order.
    pub fn iter(&self) -> impl Iterator<Item = &Channel> {
        self.by_type.values().flatten()
    }

    pub fn contains(&self, channel: &Channel) -> bool {
        self.of_type(channel.kind)
            .iter()
            .any(|hidden| hidden.id == channel.id)
    }

    /// Whether both values share the same storage.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.by_type, &other.by_type)
    }
}

#[derive(Debug)]
struct CacheEntry {
    hidden: HiddenChannels,
    fingerprint: Fingerprint,
}

/// Caches, per guild, which channels the viewer cannot see.
#[derive(Debug)]
pub struct HiddenSetCache<H> {
    host: H,
    entries: RwLock<HashMap<Id<GuildMarker>, Arc<CacheEntry>>>,
}

impl<H: Host> HiddenSetCache<H> {
    pub fn new(host: H) -> Self {
        Self {
            host,
            entries: RwLock::new(HashMap::new()),
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    /// Mutable access to the host. Cached entries are kept; they are
    /// revalidated against the fingerprint on the next [`get_hidden`].
    ///
    /// [`get_hidden`]: Self::get_hidden
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    fn fingerprint(&self, guild_id: Id<GuildMarker>) -> Fingerprint {
        let viewer = self.host.current_user();

        Fingerprint {
            visible_signal: self.host.visible_signal(guild_id),
            role_count: self.host.role_count(guild_id, viewer),
        }
    }

    /// The channels of `guild_id` hidden from the viewer.
    ///
    /// A missing guild has nothing hidden. The full permission scan only
    /// runs when the guild's fingerprint differs from the stored one;
    /// otherwise the stored set is reused after dropping channels that
    /// were deleted since.
    pub fn get_hidden(&self, guild_id: Option<Id<GuildMarker>>) -> HiddenChannels {
        let Some(guild_id) = guild_id else {
            return HiddenChannels::default();
        };

        let fingerprint = self.fingerprint(guild_id);
        let cached = self
            .entries
            .read()
            .get(&guild_id)
            .filter(|entry| entry.fingerprint == fingerprint)
            .map(|entry| Arc::clone(&entry.hidden.by_type));

        let by_type = match cached {
            Some(by_type) => {
                trace!(guild_id = %guild_id, "hidden channel cache hit");
                by_type
            }
            None => {
                let by_type = self.scan(guild_id);
                debug!(
                    guild_id = %guild_id,
                    visible_signal = fingerprint.visible_signal,
                    role_count = fingerprint.role_count,
                    hidden = by_type.values().map(Vec::len).sum::<usize>(),
                    "recomputed hidden channels"
                );
                Arc::new(by_type)
            }
        };

        let hidden = HiddenChannels::new(self.prune(guild_id, by_type));
        self.entries.write().insert(
            guild_id,
            Arc::new(CacheEntry {
                hidden: hidden.clone(),
                fingerprint,
            }),
        );

        hidden
    }

    fn scan(&self, guild_id: Id<GuildMarker>) -> BTreeMap<ChannelType, Vec<Channel>> {
        let mut by_type: BTreeMap<_, _> = ChannelType::ALL
            .iter()
            .map(|kind| (*kind, Vec::new()))
            .collect();

        for channel in self.host.raw_channels(guild_id).into_values() {
            if channel.guild_id != Some(guild_id) || !channel.kind.is_hideable() {
                continue;
            }

            if !self.host.can(Permissions::VIEW_CHANNEL, &channel) {
                by_type.entry(channel.kind).or_default().push(channel);
            }
        }

        by_type
    }

    /// Drop channels that no longer resolve. Shares `by_type` untouched when
    /// nothing was deleted.
    fn prune(
        &self,
        guild_id: Id<GuildMarker>,
        mut by_type: Arc<BTreeMap<ChannelType, Vec<Channel>>>,
    ) -> Arc<BTreeMap<ChannelType, Vec<Channel>>> {
        let alive = |channel: &Channel| self.host.resolve(channel.id).is_some();
        let stale = by_type
            .values()
            .flatten()
            .filter(|channel| !alive(*channel))
            .count();

        if stale > 0 {
            for bucket in Arc::make_mut(&mut by_type).values_mut() {
                bucket.retain(|channel| alive(channel));
            }
            debug!(guild_id = %guild_id, pruned = stale, "pruned deleted hidden channels");
        }

        by_type
    }

    /// Whether the channel was hidden as of the last [`get_hidden`] for its
    /// guild.
    ///
    /// This never triggers a rescan. Between a permission change and the
    /// next `get_hidden` call it reports the previous state, and it reports
    /// `false` for guilds that were never queried.
    ///
    /// [`get_hidden`]: Self::get_hidden
    pub fn is_hidden(&self, channel_id: ChannelId) -> bool {
        let Some(channel) = self.host.resolve(channel_id) else {
            return false;
        };
        let Some(guild_id) = channel.guild_id else {
            return false;
        };

        self.entries
            .read()
            .get(&guild_id)
            .is_some_and(|entry| entry.hidden.contains(&channel))
    }

    /// Drop the cached entry for one guild.
    pub fn forget(&self, guild_id: Id<GuildMarker>) -> bool {
        self.entries.write().remove(&guild_id).is_some()
    }

    /// Drop every cached entry.
    pub fn clear(&self) {
        self.entries.write().clear();
    }
}
