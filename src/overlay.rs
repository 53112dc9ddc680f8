//! Unread state with hidden channels silenced.
//!
//! A hidden channel can still report unread messages or mentions to the
//! host, which would light up a badge the viewer can do nothing about. The
//! host routes its unread queries through [`VisibilityOverlay`] instead.

use crate::cache::HiddenSetCache;
use crate::host::{Host, UnreadProvider};
use crate::types::channel::ChannelId;

#[derive(Debug)]
pub struct VisibilityOverlay<'c, H, U> {
    cache: &'c HiddenSetCache<H>,
    unread: U,
}

impl<'c, H: Host, U: UnreadProvider> VisibilityOverlay<'c, H, U> {
    pub const fn new(cache: &'c HiddenSetCache<H>, unread: U) -> Self {
        Self { cache, unread }
    }

    /// The host's answer, or `false` for a hidden channel.
    pub fn has_unread(&self, channel_id: ChannelId) -> bool {
        self.unread.has_unread(channel_id) && !self.cache.is_hidden(channel_id)
    }

    /// The host's answer, or `0` for a hidden channel.
    pub fn mention_count(&self, channel_id: ChannelId) -> u32 {
        let count = self.unread.mention_count(channel_id);
        if self.cache.is_hidden(channel_id) {
            0
        } else {
            count
        }
    }
}
