//! Markers for the resource types this crate touches.
//!
//! Markers themselves perform no logical action, and are only used to
//! ensure that IDs of incorrect types aren't used. A guild's ID can't be
//! passed where a channel's ID is required, which matters here because the
//! synthetic hidden category is derived from a guild ID.

/// Marker for channel IDs.
///
/// Types such as [`Channel`] or [`UnreadState`] use this ID marker.
///
/// [`Channel`]: crate::types::channel::Channel
/// [`UnreadState`]: crate::snapshot::UnreadState
#[derive(Debug)]
#[non_exhaustive]
pub struct ChannelMarker;

/// Marker for guild IDs.
///
/// Types such as [`Channel`] or [`GuildState`] use this ID marker.
///
/// [`Channel`]: crate::types::channel::Channel
/// [`GuildState`]: crate::snapshot::GuildState
#[derive(Debug)]
#[non_exhaustive]
pub struct GuildMarker;

/// Marker for user IDs.
///
/// The viewer whose role count feeds the cache fingerprint is identified by
/// an ID with this marker.
#[derive(Debug)]
#[non_exhaustive]
pub struct UserMarker;
