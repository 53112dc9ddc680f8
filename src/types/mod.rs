//! Discord types the channel list is built from.
//!
//! # Origin
//!
//! The ID machinery follows [`twilight-model`]: typed [`Id`]s with marker
//! types, serialized as strings. The channel and permission types keep only
//! what ordering and visibility need. [`view`] has no Discord counterpart;
//! it models the two indices a client renders its channel list from.
//!
//! [`twilight-model`]: https://github.com/twilight-rs/twilight/tree/main/twilight-model

/// Channels, channel types and channel IDs.
pub mod channel;

/// Permission bits.
pub mod guild;

/// Type-safe IDs with marker types.
pub mod id;

/// By-category and by-type channel indices.
pub mod view;

// ===========================================================================
// Convenience re-exports
// ===========================================================================

pub use self::channel::{Channel, ChannelId, ChannelType};
pub use self::guild::Permissions;
pub use self::id::marker::{ChannelMarker, GuildMarker, UserMarker};
pub use self::id::Id;
pub use self::view::{
    Bucket, CategoryEntry, CategoryIndex, ChannelGroup, ChannelView, TypeEntry, TypeIndex,
};
