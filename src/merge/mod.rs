//! Splices hidden channels back into the host's channel view.
//!
//! The host calls [`TreeMerger::merge`] on every render with the indices it
//! would normally draw, and draws the result instead. Since the host may hand
//! back a view the merger produced on an earlier pass, a merge first undoes
//! anything a previous pass could have added (the synthetic category, every
//! hidden channel, channels deleted since) and then re-adds it from the
//! current hidden set. Merging a merged view therefore changes nothing, and
//! a stale merged view catches up with the host.
//!
//! Buckets are copied on write. A bucket the merge neither filters, extends
//! nor reorders is still the host's `Arc` afterwards.

mod error;

pub use self::error::{MergeError, MergeErrorType};

use std::borrow::Cow;
use std::collections::{HashMap, HashSet};
use std::hash::Hash;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::cache::{HiddenChannels, HiddenSetCache};
use crate::config::HiddenChannelsConfig;
use crate::host::Host;
use crate::types::{
    channel::{Channel, ChannelId, ChannelType},
    id::{marker::GuildMarker, Id},
    view::{Bucket, CategoryEntry, CategoryIndex, ChannelGroup, ChannelView, TypeEntry, TypeIndex},
};

/// Produces channel views with the viewer's hidden channels re-inserted.
#[derive(Debug)]
pub struct TreeMerger<'c, H> {
    cache: &'c HiddenSetCache<H>,
}

impl<'c, H: Host> TreeMerger<'c, H> {
    pub const fn new(cache: &'c HiddenSetCache<H>) -> Self {
        Self { cache }
    }

    /// Merge the hidden channels of `guild_id` into `view`.
    ///
    /// With `group_under_hidden_category` the hidden channels are shown in
    /// a synthetic category appended after every real one; otherwise they
    /// stay in their own categories at their own positions.
    ///
    /// The view is returned borrowed, untouched, when there is no guild, the
    /// merge would change nothing, or the view is missing a bucket a hidden
    /// channel belongs in.
    pub fn merge<'v>(
        &self,
        guild_id: Option<Id<GuildMarker>>,
        view: &'v ChannelView,
        group_under_hidden_category: bool,
    ) -> Cow<'v, ChannelView> {
        let Some(guild_id) = guild_id else {
            return Cow::Borrowed(view);
        };

        let hidden = self.cache.get_hidden(Some(guild_id));
        let host = self.cache.host();
        let resolves = |channel_id: ChannelId| host.resolve(channel_id).is_some();

        match splice(guild_id, &hidden, view, group_under_hidden_category, resolves) {
            Ok(merged) if shares_buckets(&merged, view) => Cow::Borrowed(view),
            Ok(merged) => {
                debug!(
                    guild_id = %guild_id,
                    hidden = hidden.len(),
                    grouped = group_under_hidden_category,
                    "merged hidden channels into view"
                );
                Cow::Owned(merged)
            }
            Err(error) => {
                warn!(guild_id = %guild_id, error = %error, "rendering view without hidden channels");
                Cow::Borrowed(view)
            }
        }
    }

    /// [`merge`](Self::merge) with the grouping mode taken from `config`.
    pub fn merge_with<'v>(
        &self,
        guild_id: Option<Id<GuildMarker>>,
        view: &'v ChannelView,
        config: &HiddenChannelsConfig,
    ) -> Cow<'v, ChannelView> {
        self.merge(guild_id, view, config.group_under_hidden_category())
    }
}

fn splice(
    guild_id: Id<GuildMarker>,
    hidden: &HiddenChannels,
    view: &ChannelView,
    group: bool,
    resolves: impl Fn(ChannelId) -> bool,
) -> Result<ChannelView, MergeError> {
    let synthetic = ChannelId::hidden_category(guild_id);
    let hidden_ids: HashSet<ChannelId> = hidden.iter().map(|channel| channel.id).collect();
    let ChannelView {
        mut categories,
        mut channels,
    } = view.clone();

    // Undo whatever an earlier pass may have added. Channels deleted since
    // then no longer resolve and go as well.
    categories.buckets.remove(&Some(synthetic));
    retain_shared(&mut categories.roots, |entry| {
        !entry.channel.id.is_hidden_category() && resolves(entry.channel.id)
    });
    for bucket in categories.buckets.values_mut() {
        retain_shared(bucket, |entry| {
            !hidden_ids.contains(&entry.channel.id) && resolves(entry.channel.id)
        });
    }
    for bucket in channels.buckets.values_mut() {
        retain_shared(bucket, |entry| {
            let channel = &entry.channel;
            !channel.id.is_hidden_category()
                && channel.parent_id != Some(synthetic)
                && !hidden_ids.contains(&channel.id)
                && resolves(channel.id)
        });
    }

    let max_index = categories
        .roots
        .iter()
        .chain(categories.buckets.values().flat_map(|bucket| bucket.iter()))
        .map(|entry| entry.index)
        .max()
        .unwrap_or(-1);

    let parent_override = if group && !hidden.is_empty() {
        insert_hidden_category(guild_id, &mut categories, &mut channels, max_index);
        Some(synthetic)
    } else {
        None
    };

    for channel in hidden.iter() {
        let rendered = match parent_override {
            Some(parent_id) => channel.reparented(Some(parent_id)),
            None => channel.clone(),
        };

        let bucket = categories
            .buckets
            .get_mut(&rendered.parent_id)
            .ok_or_else(|| MergeError::missing_category(rendered.parent_id))?;
        Arc::make_mut(bucket).push(CategoryEntry {
            channel: rendered.clone(),
            index: rendered.position,
        });

        let comparator = rendered.position;
        let bucket = channels
            .buckets
            .entry(ChannelGroup::from(rendered.kind))
            .or_default();
        Arc::make_mut(bucket).push(TypeEntry {
            channel: rendered,
            comparator,
        });
    }

    sort_shared(&mut categories.roots, |entry| entry.index);
    for bucket in categories.buckets.values_mut() {
        sort_shared(bucket, |entry| entry.index);
    }
    for bucket in channels.buckets.values_mut() {
        sort_shared(bucket, |entry| entry.comparator);
    }

    Ok(ChannelView {
        categories,
        channels,
    })
}

/// Add the synthetic category after every real one, with an empty bucket.
fn insert_hidden_category(
    guild_id: Id<GuildMarker>,
    categories: &mut CategoryIndex,
    channels: &mut TypeIndex,
    max_index: i64,
) {
    let category = Channel::hidden_category(guild_id);
    categories.buckets.insert(Some(category.id), Bucket::default());
    Arc::make_mut(&mut categories.roots).push(CategoryEntry {
        channel: category.clone(),
        index: max_index + 1,
    });

    let bucket = channels
        .buckets
        .entry(ChannelGroup::Kind(ChannelType::GuildCategory))
        .or_default();
    let comparator = bucket
        .iter()
        .map(|entry| entry.comparator)
        .max()
        .unwrap_or(0)
        + 1;
    Arc::make_mut(bucket).push(TypeEntry {
        channel: category,
        comparator,
    });
}

/// Whether every bucket of `merged` is still the `Arc` it was in `view`.
fn shares_buckets(merged: &ChannelView, view: &ChannelView) -> bool {
    fn same<K: Eq + Hash, T>(ours: &HashMap<K, Bucket<T>>, theirs: &HashMap<K, Bucket<T>>) -> bool {
        ours.len() == theirs.len()
            && ours
                .iter()
                .all(|(key, bucket)| theirs.get(key).is_some_and(|other| Arc::ptr_eq(bucket, other)))
    }

    Arc::ptr_eq(&merged.categories.roots, &view.categories.roots)
        && same(&merged.categories.buckets, &view.categories.buckets)
        && same(&merged.channels.buckets, &view.channels.buckets)
}

/// `Vec::retain` that leaves the bucket shared when nothing is removed.
fn retain_shared<T: Clone>(bucket: &mut Bucket<T>, keep: impl Fn(&T) -> bool) {
    if bucket.iter().all(&keep) {
        return;
    }

    Arc::make_mut(bucket).retain(|entry| keep(entry));
}

/// Stable sort that leaves the bucket shared when already in order.
fn sort_shared<T: Clone>(bucket: &mut Bucket<T>, key: impl Fn(&T) -> i64) {
    if bucket.windows(2).all(|pair| key(&pair[0]) <= key(&pair[1])) {
        return;
    }

    Arc::make_mut(bucket).sort_by_key(|entry| key(entry));
}

#[cfg(test)]
mod tests {
    use super::TreeMerger;
    use crate::cache::HiddenSetCache;
    use crate::config::HiddenChannelsConfig;
    use crate::snapshot::{GuildState, Snapshot};
    use crate::types::{
        channel::{Channel, ChannelId, ChannelType},
        id::{marker::GuildMarker, Id},
        view::{ChannelGroup, ChannelView},
    };
    use std::borrow::Cow;
    use std::sync::Arc;

    const GUILD: Id<GuildMarker> = Id::new(1);

    const C1: u64 = 10;
    const C2: u64 = 20;
    const T1: u64 = 11;
    const T2: u64 = 12;
    const V1: u64 = 21;

    fn id(n: u64) -> ChannelId {
        ChannelId::Snowflake(Id::new(n))
    }

    fn channel(n: u64, kind: ChannelType, parent: Option<u64>, position: i64) -> Channel {
        Channel {
            id: id(n),
            guild_id: Some(GUILD),
            kind,
            name: None,
            parent_id: parent.map(id),
            position,
        }
    }

    /// `T1(pos 0, C1)`, `T2(pos 1, C1, hidden)`, `V1(pos 0, C2, hidden)`.
    fn scenario() -> Snapshot {
        let mut snapshot = Snapshot::new(Id::new(100));
        snapshot.guilds.push(GuildState {
            id: GUILD,
            roles: 1,
            visible_signal: 1,
            channels: vec![
                channel(C1, ChannelType::GuildCategory, None, 0),
                channel(C2, ChannelType::GuildCategory, None, 1),
                channel(T1, ChannelType::GuildText, Some(C1), 0),
                channel(T2, ChannelType::GuildText, Some(C1), 1),
                channel(V1, ChannelType::GuildVoice, Some(C2), 0),
            ],
            denied: [id(T2), id(V1)].into_iter().collect(),
            unread: Vec::new(),
        });
        snapshot
    }

    fn ids(view: &ChannelView, parent: Option<ChannelId>) -> Vec<ChannelId> {
        view.categories
            .bucket(parent)
            .unwrap_or_default()
            .iter()
            .map(|entry| entry.channel.id)
            .collect()
    }

    fn group_ids(view: &ChannelView, group: ChannelGroup) -> Vec<ChannelId> {
        view.channels
            .bucket(group)
            .unwrap_or_default()
            .iter()
            .map(|entry| entry.channel.id)
            .collect()
    }

    #[test]
    fn ungrouped_keeps_real_categories() {
        let cache = HiddenSetCache::new(scenario());
        let view = cache.host().visible_view(GUILD);
        let merged = TreeMerger::new(&cache).merge(Some(GUILD), &view, false);

        assert_eq!(ids(&merged, Some(id(C1))), [id(T1), id(T2)]);
        assert_eq!(ids(&merged, Some(id(C2))), [id(V1)]);
        let indices: Vec<_> = merged
            .categories
            .bucket(Some(id(C1)))
            .unwrap()
            .iter()
            .map(|entry| entry.index)
            .collect();
        assert_eq!(indices, [0, 1]);
        assert_eq!(group_ids(&merged, ChannelGroup::Selectable), [id(T1), id(T2)]);
        assert_eq!(group_ids(&merged, ChannelGroup::Vocal), [id(V1)]);
        assert!(merged.categories.bucket(Some(ChannelId::hidden_category(GUILD))).is_none());
        assert!(Arc::ptr_eq(&merged.categories.roots, &view.categories.roots));
    }

    #[test]
    fn grouped_moves_hidden_channels() {
        let cache = HiddenSetCache::new(scenario());
        let view = cache.host().visible_view(GUILD);
        let merged = TreeMerger::new(&cache).merge(Some(GUILD), &view, true);
        let synthetic = ChannelId::hidden_category(GUILD);

        assert_eq!(ids(&merged, Some(id(C1))), [id(T1)]);
        assert!(ids(&merged, Some(id(C2))).is_empty());
        assert_eq!(ids(&merged, Some(synthetic)), [id(V1), id(T2)]);

        let last = merged.categories.roots.last().unwrap();
        assert_eq!(last.channel.id, synthetic);
        assert_eq!(last.index, 2);
        assert_eq!(last.channel.name.as_deref(), Some("hidden"));

        let categories = merged
            .channels
            .bucket(ChannelGroup::Kind(ChannelType::GuildCategory))
            .unwrap();
        assert_eq!(categories.last().unwrap().channel.id, synthetic);
        assert_eq!(categories.last().unwrap().comparator, 2);

        // Only the rendered copies are re-parented.
        for entry in merged.categories.bucket(Some(synthetic)).unwrap() {
            assert_eq!(entry.channel.parent_id, Some(synthetic));
        }
        let stored = cache.host().guild(GUILD).unwrap();
        assert!(stored.channels.iter().all(|c| c.parent_id != Some(synthetic)));
    }

    #[test]
    fn merge_is_idempotent() {
        let cache = HiddenSetCache::new(scenario());
        let merger = TreeMerger::new(&cache);
        let view = cache.host().visible_view(GUILD);

        for grouped in [false, true] {
            let once = merger.merge(Some(GUILD), &view, grouped).into_owned();
            let twice = merger.merge(Some(GUILD), &once, grouped).into_owned();
            let thrice = merger.merge(Some(GUILD), &twice, grouped);

            assert_eq!(once, twice, "grouped = {grouped}");
            assert_eq!(once, *thrice, "grouped = {grouped}");
        }
    }

    #[test]
    fn switching_modes_strips_previous_category() {
        let cache = HiddenSetCache::new(scenario());
        let merger = TreeMerger::new(&cache);
        let view = cache.host().visible_view(GUILD);

        let grouped = merger.merge(Some(GUILD), &view, true).into_owned();
        let native = merger.merge(Some(GUILD), &grouped, false);

        assert_eq!(*native, *merger.merge(Some(GUILD), &view, false));
        let synthetic = ChannelId::hidden_category(GUILD);
        assert!(native.categories.roots.iter().all(|e| e.channel.id != synthetic));
    }

    #[test]
    fn stale_hidden_entries_are_not_duplicated() {
        let cache = HiddenSetCache::new(scenario());
        // The host already lists T2 in C1, as if it had been visible.
        let all = cache.host().guild(GUILD).unwrap().channels.clone();
        let view = ChannelView::build(all);
        let merged = TreeMerger::new(&cache).merge(Some(GUILD), &view, false);

        assert_eq!(ids(&merged, Some(id(C1))), [id(T1), id(T2)]);
        assert_eq!(group_ids(&merged, ChannelGroup::Selectable), [id(T1), id(T2)]);
    }

    #[test]
    fn merged_buckets_are_sorted() {
        let mut snapshot = scenario();
        let guild = snapshot.guild_mut(GUILD).unwrap();
        guild.channels.extend([
            channel(13, ChannelType::GuildText, Some(C1), 5),
            channel(14, ChannelType::GuildAnnouncement, Some(C1), 3),
            channel(15, ChannelType::GuildText, None, 2),
            channel(16, ChannelType::GuildVoice, None, 0),
            channel(22, ChannelType::GuildStageVoice, Some(C2), 4),
        ]);
        guild.denied.extend([id(14), id(16), id(22)]);

        let cache = HiddenSetCache::new(snapshot);
        let view = cache.host().visible_view(GUILD);
        for grouped in [false, true] {
            let merged = TreeMerger::new(&cache).merge(Some(GUILD), &view, grouped);
            assert!(merged.is_sorted(), "grouped = {grouped}");
        }

        let merged = TreeMerger::new(&cache).merge(Some(GUILD), &view, false);
        assert_eq!(ids(&merged, Some(id(C1))), [id(T1), id(T2), id(14), id(13)]);
        assert_eq!(ids(&merged, None), [id(16), id(15)]);
        assert_eq!(
            group_ids(&merged, ChannelGroup::Kind(ChannelType::GuildStageVoice)),
            [id(22)]
        );
    }

    #[test]
    fn equal_positions_keep_scan_order() {
        let mut snapshot = scenario();
        let guild = snapshot.guild_mut(GUILD).unwrap();
        guild.channels.push(channel(13, ChannelType::GuildText, Some(C1), 1));
        guild.denied.insert(id(13));

        let cache = HiddenSetCache::new(snapshot);
        let view = cache.host().visible_view(GUILD);
        let merged = TreeMerger::new(&cache).merge(Some(GUILD), &view, false);

        assert_eq!(ids(&merged, Some(id(C1))), [id(T1), id(T2), id(13)]);
    }

    #[test]
    fn untouched_buckets_are_shared() {
        let mut snapshot = scenario();
        let guild = snapshot.guild_mut(GUILD).unwrap();
        guild.channels.extend([
            channel(30, ChannelType::GuildCategory, None, 2),
            channel(31, ChannelType::GuildText, Some(30), 0),
        ]);

        let cache = HiddenSetCache::new(snapshot);
        let view = cache.host().visible_view(GUILD);
        let merged = TreeMerger::new(&cache).merge(Some(GUILD), &view, false);

        let untouched = Some(id(30));
        assert!(Arc::ptr_eq(
            &merged.categories.buckets[&untouched],
            &view.categories.buckets[&untouched]
        ));
        assert!(!Arc::ptr_eq(
            &merged.categories.buckets[&Some(id(C1))],
            &view.categories.buckets[&Some(id(C1))]
        ));
        // The host's own bucket is left as it was.
        assert_eq!(ids(&view, Some(id(C1))), [id(T1)]);
    }

    #[test]
    fn nothing_to_merge_borrows_input() {
        let mut snapshot = scenario();
        snapshot.guild_mut(GUILD).unwrap().denied.clear();
        let cache = HiddenSetCache::new(snapshot);
        let view = cache.host().visible_view(GUILD);
        let merger = TreeMerger::new(&cache);

        assert!(matches!(merger.merge(Some(GUILD), &view, true), Cow::Borrowed(_)));
        assert!(matches!(merger.merge(None, &view, true), Cow::Borrowed(_)));
    }

    #[test]
    fn missing_category_bucket_leaves_view_alone() {
        let cache = HiddenSetCache::new(scenario());
        // A view that never heard of C2.
        let view = ChannelView::build([
            channel(C1, ChannelType::GuildCategory, None, 0),
            channel(T1, ChannelType::GuildText, Some(C1), 0),
        ]);

        let merged = TreeMerger::new(&cache).merge(Some(GUILD), &view, false);
        assert!(matches!(merged, Cow::Borrowed(_)));
        assert_eq!(*merged, view);

        // Grouping does not depend on the real categories.
        let grouped = TreeMerger::new(&cache).merge(Some(GUILD), &view, true);
        assert_eq!(
            ids(&grouped, Some(ChannelId::hidden_category(GUILD))),
            [id(V1), id(T2)]
        );
    }

    #[test]
    fn uncategorized_hidden_channel_goes_to_root_bucket() {
        let mut snapshot = scenario();
        let guild = snapshot.guild_mut(GUILD).unwrap();
        guild.channels.push(channel(40, ChannelType::GuildForum, None, 0));
        guild.denied.insert(id(40));

        let cache = HiddenSetCache::new(snapshot);
        let view = cache.host().visible_view(GUILD);
        let merged = TreeMerger::new(&cache).merge(Some(GUILD), &view, false);

        assert_eq!(ids(&merged, None), [id(40)]);
        assert_eq!(
            group_ids(&merged, ChannelGroup::Kind(ChannelType::GuildForum)),
            [id(40)]
        );
    }

    #[test]
    fn empty_category_bucket_gets_comparator_one() {
        let mut snapshot = Snapshot::new(Id::new(100));
        snapshot.guilds.push(GuildState {
            id: GUILD,
            roles: 0,
            visible_signal: 0,
            channels: vec![channel(50, ChannelType::GuildText, None, 0)],
            denied: [id(50)].into_iter().collect(),
            unread: Vec::new(),
        });
        let cache = HiddenSetCache::new(snapshot);
        let view = cache.host().visible_view(GUILD);
        let merged = TreeMerger::new(&cache).merge(Some(GUILD), &view, true);

        let categories = merged
            .channels
            .bucket(ChannelGroup::Kind(ChannelType::GuildCategory))
            .unwrap();
        assert_eq!(categories.len(), 1);
        assert_eq!(categories[0].comparator, 1);
        assert_eq!(merged.categories.roots[0].index, 0);
    }

    #[test]
    fn deleted_hidden_channel_disappears_from_view() {
        let mut cache = HiddenSetCache::new(scenario());
        let view = cache.host().visible_view(GUILD);
        let first = TreeMerger::new(&cache).merge(Some(GUILD), &view, false);
        assert_eq!(ids(&first, Some(id(C2))), [id(V1)]);

        cache.host_mut().remove_channel(id(V1));
        let view = cache.host().visible_view(GUILD);
        let again = TreeMerger::new(&cache).merge(Some(GUILD), &view, false);

        assert!(ids(&again, Some(id(C2))).is_empty());
        assert!(group_ids(&again, ChannelGroup::Vocal).is_empty());
    }

    #[test]
    fn merge_with_reads_grouping_from_config() {
        let cache = HiddenSetCache::new(scenario());
        let view = cache.host().visible_view(GUILD);
        let config = HiddenChannelsConfig { sort_native: false };
        let merged = TreeMerger::new(&cache).merge_with(Some(GUILD), &view, &config);

        assert_eq!(
            ids(&merged, Some(ChannelId::hidden_category(GUILD))),
            [id(V1), id(T2)]
        );
    }

    #[test]
    fn remerge_after_deletion_drops_channel() {
        for grouped in [false, true] {
            let mut cache = HiddenSetCache::new(scenario());
            let view = cache.host().visible_view(GUILD);
            let earlier = TreeMerger::new(&cache)
                .merge(Some(GUILD), &view, grouped)
                .into_owned();

            cache.host_mut().remove_channel(id(V1));
            let again = TreeMerger::new(&cache).merge(Some(GUILD), &earlier, grouped);
            let fresh = cache.host().visible_view(GUILD);
            let expected = TreeMerger::new(&cache).merge(Some(GUILD), &fresh, grouped);

            let synthetic = ChannelId::hidden_category(GUILD);
            for parent in [None, Some(id(C1)), Some(id(C2)), Some(synthetic)] {
                assert_eq!(ids(&again, parent), ids(&expected, parent), "grouped = {grouped}");
            }
            assert!(group_ids(&again, ChannelGroup::Vocal).is_empty(), "grouped = {grouped}");
            assert_eq!(
                group_ids(&again, ChannelGroup::Selectable),
                group_ids(&expected, ChannelGroup::Selectable),
                "grouped = {grouped}"
            );
        }
    }

    #[test]
    fn remerge_after_full_grant_drops_hidden_category() {
        let mut cache = HiddenSetCache::new(scenario());
        let view = cache.host().visible_view(GUILD);
        let earlier = TreeMerger::new(&cache)
            .merge(Some(GUILD), &view, true)
            .into_owned();

        let host = cache.host_mut();
        host.grant(id(T2));
        host.grant(id(V1));
        host.guild_mut(GUILD).unwrap().visible_signal += 1;

        assert!(cache.get_hidden(Some(GUILD)).is_empty());
        let merger = TreeMerger::new(&cache);
        let again = merger.merge(Some(GUILD), &earlier, true);
        let synthetic = ChannelId::hidden_category(GUILD);

        assert!(matches!(again, Cow::Owned(_)));
        assert!(again.categories.roots.iter().all(|e| e.channel.id != synthetic));
        assert!(again.categories.bucket(Some(synthetic)).is_none());
        assert!(again
            .channels
            .buckets
            .values()
            .flat_map(|bucket| bucket.iter())
            .all(|e| e.channel.parent_id != Some(synthetic) && e.channel.id != synthetic));
        assert_eq!(ids(&again, Some(id(C1))), [id(T1)]);

        // A view without synthetic state is still handed back as is.
        let fresh = cache.host().visible_view(GUILD);
        assert!(matches!(merger.merge(Some(GUILD), &fresh, true), Cow::Borrowed(_)));
    }

    #[test]
    fn remerge_after_role_change_hides_newly_denied() {
        let mut cache = HiddenSetCache::new(scenario());
        let view = cache.host().visible_view(GUILD);
        let earlier = TreeMerger::new(&cache)
            .merge(Some(GUILD), &view, false)
            .into_owned();

        let host = cache.host_mut();
        host.deny(id(T1));
        host.guild_mut(GUILD).unwrap().roles += 1;

        let again = TreeMerger::new(&cache).merge(Some(GUILD), &earlier, false);
        assert!(cache.is_hidden(id(T1)));
        assert_eq!(ids(&again, Some(id(C1))), [id(T1), id(T2)]);
        assert_eq!(group_ids(&again, ChannelGroup::Selectable), [id(T1), id(T2)]);
        assert_eq!(ids(&again, Some(id(C2))), [id(V1)]);
    }
}
