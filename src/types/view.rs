//! The two indices a channel list renders from.
//!
//! A [`ChannelView`] pairs a by-category index ([`CategoryIndex`]) with a
//! by-type index ([`TypeIndex`]). Every bucket is an `Arc<Vec<_>>` so a view
//! can be cloned cheaply and a bucket copied only when something writes to
//! it; untouched buckets stay pointer-equal to the host's.

use std::collections::HashMap;
use std::sync::Arc;

use crate::types::channel::{Channel, ChannelId, ChannelType};

/// Coarse classification used to key the by-type index.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum ChannelGroup {
    /// Text, announcement and store channels.
    Selectable,
    /// Voice channels.
    Vocal,
    /// Every other type keeps a bucket of its own.
    Kind(ChannelType),
}

impl From<ChannelType> for ChannelGroup {
    fn from(kind: ChannelType) -> Self {
        match kind {
            ChannelType::GuildText | ChannelType::GuildAnnouncement | ChannelType::GuildStore => {
                ChannelGroup::Selectable
            }
            ChannelType::GuildVoice => ChannelGroup::Vocal,
            other => ChannelGroup::Kind(other),
        }
    }
}

/// A channel placed in a category bucket.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CategoryEntry {
    pub channel: Channel,
    pub index: i64,
}

/// A channel placed in a type bucket.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TypeEntry {
    pub channel: Channel,
    pub comparator: i64,
}

/// Shared, copy-on-write bucket.
pub type Bucket<T> = Arc<Vec<T>>;

/// Channels grouped by parent category.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct CategoryIndex {
    /// The categories themselves, in display order.
    pub roots: Bucket<CategoryEntry>,
    /// Children per category. `None` keys the uncategorized bucket.
    pub buckets: HashMap<Option<ChannelId>, Bucket<CategoryEntry>>,
}

impl CategoryIndex {
    pub fn bucket(&self, parent_id: Option<ChannelId>) -> Option<&[CategoryEntry]> {
        self.buckets.get(&parent_id).map(|bucket| bucket.as_slice())
    }
}

/// Channels grouped by [`ChannelGroup`].
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct TypeIndex {
    pub buckets: HashMap<ChannelGroup, Bucket<TypeEntry>>,
}

impl TypeIndex {
    pub fn bucket(&self, group: ChannelGroup) -> Option<&[TypeEntry]> {
        self.buckets.get(&group).map(|bucket| bucket.as_slice())
    }
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ChannelView {
    pub categories: CategoryIndex,
    pub channels: TypeIndex,
}

impl ChannelView {
    /// Build both indices from a list of channels the way the host does.
    ///
    /// Categories go into the root list and the `GUILD_CATEGORY` type
    /// bucket and get an (initially empty) child bucket. Every other channel
    /// goes into its parent's bucket and its coarse type bucket. The
    /// uncategorized bucket always exists. Indices and comparators are the
    /// channel positions, and every bucket comes out sorted.
    pub fn build(channels: impl IntoIterator<Item = Channel>) -> Self {
        let mut roots = Vec::new();
        let mut buckets: HashMap<Option<ChannelId>, Vec<CategoryEntry>> = HashMap::new();
        let mut groups: HashMap<ChannelGroup, Vec<TypeEntry>> = HashMap::new();
        buckets.insert(None, Vec::new());

        for channel in channels {
            let position = channel.position;
            groups
                .entry(ChannelGroup::from(channel.kind))
                .or_default()
                .push(TypeEntry {
                    channel: channel.clone(),
                    comparator: position,
                });

            if channel.is_category() {
                buckets.entry(Some(channel.id)).or_default();
                roots.push(CategoryEntry {
                    channel,
                    index: position,
                });
            } else {
                buckets
                    .entry(channel.parent_id)
                    .or_default()
                    .push(CategoryEntry {
                        channel,
                        index: position,
                    });
            }
        }

        roots.sort_by_key(|entry| entry.index);
        let buckets = buckets
            .into_iter()
            .map(|(key, mut bucket)| {
                bucket.sort_by_key(|entry| entry.index);
                (key, Arc::new(bucket))
            })
            .collect();
        let groups = groups
            .into_iter()
            .map(|(key, mut bucket)| {
                bucket.sort_by_key(|entry| entry.comparator);
                (key, Arc::new(bucket))
            })
            .collect();

        Self {
            categories: CategoryIndex {
                roots: Arc::new(roots),
                buckets,
            },
            channels: TypeIndex { buckets: groups },
        }
    }

    /// Whether every bucket of both indices is in ascending order.
    pub fn is_sorted(&self) -> bool {
        fn ascending<T>(bucket: &[T], key: impl Fn(&T) -> i64) -> bool {
            bucket.windows(2).all(|pair| key(&pair[0]) <= key(&pair[1]))
        }

        ascending(self.categories.roots.as_slice(), |entry| entry.index)
            && self
                .categories
                .buckets
                .values()
                .all(|bucket| ascending(bucket.as_slice(), |entry| entry.index))
            && self
                .channels
                .buckets
                .values()
                .all(|bucket| ascending(bucket.as_slice(), |entry| entry.comparator))
    }
}
