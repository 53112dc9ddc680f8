//! Guild channels as the channel list sees them.
//!
//! Only the fields that matter for ordering and grouping are kept: identity,
//! owning guild, type, parent category and position. Everything else a
//! gateway channel object carries is ignored on deserialization.

use serde::{
    de::{Deserializer, Error as DeError, Unexpected, Visitor},
    ser::Serializer,
    Deserialize, Serialize,
};
use serde_repr::{Deserialize_repr, Serialize_repr};
use std::{
    error::Error,
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

use crate::types::id::{
    marker::{ChannelMarker, GuildMarker},
    Id,
};

/// Suffix appended to a guild ID to form its synthetic hidden category ID.
pub const HIDDEN_CATEGORY_SUFFIX: &str = "_hidden";

/// Display name of the synthetic hidden category.
pub const HIDDEN_CATEGORY_NAME: &str = "hidden";

// ---------------------------------------------------------------------------
// ChannelType
// ---------------------------------------------------------------------------

/// Type of a channel, serialized as Discord's integer value.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Deserialize_repr, Serialize_repr)]
#[repr(u8)]
pub enum ChannelType {
    GuildText = 0,
    Dm = 1,
    GuildVoice = 2,
    GroupDm = 3,
    GuildCategory = 4,
    GuildAnnouncement = 5,
    GuildStore = 6,
    AnnouncementThread = 10,
    PublicThread = 11,
    PrivateThread = 12,
    GuildStageVoice = 13,
    GuildDirectory = 14,
    GuildForum = 15,
    GuildMedia = 16,
}

impl ChannelType {
    /// Every variant, in ascending numeric order.
    pub const ALL: [ChannelType; 14] = [
        ChannelType::GuildText,
        ChannelType::Dm,
        ChannelType::GuildVoice,
        ChannelType::GroupDm,
        ChannelType::GuildCategory,
        ChannelType::GuildAnnouncement,
        ChannelType::GuildStore,
        ChannelType::AnnouncementThread,
        ChannelType::PublicThread,
        ChannelType::PrivateThread,
        ChannelType::GuildStageVoice,
        ChannelType::GuildDirectory,
        ChannelType::GuildForum,
        ChannelType::GuildMedia,
    ];

    /// Whether channels of this type can be individually hidden.
    ///
    /// Categories follow their children and DMs have no guild permissions.
    pub const fn is_hideable(self) -> bool {
        !matches!(self, ChannelType::GuildCategory | ChannelType::Dm)
    }

    /// Name of the type as Discord documents it.
    pub const fn name(self) -> &'static str {
        match self {
            ChannelType::GuildText => "GUILD_TEXT",
            ChannelType::Dm => "DM",
            ChannelType::GuildVoice => "GUILD_VOICE",
            ChannelType::GroupDm => "GROUP_DM",
            ChannelType::GuildCategory => "GUILD_CATEGORY",
            ChannelType::GuildAnnouncement => "GUILD_ANNOUNCEMENT",
            ChannelType::GuildStore => "GUILD_STORE",
            ChannelType::AnnouncementThread => "ANNOUNCEMENT_THREAD",
            ChannelType::PublicThread => "PUBLIC_THREAD",
            ChannelType::PrivateThread => "PRIVATE_THREAD",
            ChannelType::GuildStageVoice => "GUILD_STAGE_VOICE",
            ChannelType::GuildDirectory => "GUILD_DIRECTORY",
            ChannelType::GuildForum => "GUILD_FORUM",
            ChannelType::GuildMedia => "GUILD_MEDIA",
        }
    }
}

// ---------------------------------------------------------------------------
// ChannelId
// ---------------------------------------------------------------------------

/// ID of a channel in the rendered hierarchy.
///
/// Real channels carry a snowflake. The synthetic hidden category has no
/// snowflake of its own; its ID is derived from the guild and displays as
/// `<guild_id>_hidden`.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum ChannelId {
    Snowflake(Id<ChannelMarker>),
    HiddenCategory(Id<GuildMarker>),
}

impl ChannelId {
    /// ID of the synthetic hidden category of a guild.
    pub const fn hidden_category(guild_id: Id<GuildMarker>) -> Self {
        Self::HiddenCategory(guild_id)
    }

    /// The snowflake, if this is a real channel.
    pub const fn snowflake(self) -> Option<Id<ChannelMarker>> {
        match self {
            Self::Snowflake(id) => Some(id),
            Self::HiddenCategory(_) => None,
        }
    }

    pub const fn is_hidden_category(self) -> bool {
        matches!(self, Self::HiddenCategory(_))
    }
}

impl From<Id<ChannelMarker>> for ChannelId {
    fn from(id: Id<ChannelMarker>) -> Self {
        Self::Snowflake(id)
    }
}

impl PartialEq<Id<ChannelMarker>> for ChannelId {
    fn eq(&self, other: &Id<ChannelMarker>) -> bool {
        self.snowflake() == Some(*other)
    }
}

impl Display for ChannelId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Snowflake(id) => Display::fmt(id, f),
            Self::HiddenCategory(guild_id) => {
                Display::fmt(guild_id, f)?;
                f.write_str(HIDDEN_CATEGORY_SUFFIX)
            }
        }
    }
}

impl FromStr for ChannelId {
    type Err = ChannelIdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(guild) = s.strip_suffix(HIDDEN_CATEGORY_SUFFIX) {
            return guild
                .parse()
                .map(Self::HiddenCategory)
                .map_err(|_| ChannelIdParseError::new(s));
        }

        s.parse()
            .map(Self::Snowflake)
            .map_err(|_| ChannelIdParseError::new(s))
    }
}

impl<'de> Deserialize<'de> for ChannelId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ChannelIdVisitor;

        impl Visitor<'_> for ChannelIdVisitor {
            type Value = ChannelId;

            fn expecting(&self, f: &mut Formatter<'_>) -> FmtResult {
                f.write_str("a channel snowflake or a hidden category id")
            }

            fn visit_u64<E: DeError>(self, value: u64) -> Result<Self::Value, E> {
                Id::new_checked(value)
                    .map(ChannelId::Snowflake)
                    .ok_or_else(|| DeError::invalid_value(Unexpected::Unsigned(value), &self))
            }

            fn visit_str<E: DeError>(self, value: &str) -> Result<Self::Value, E> {
                value
                    .parse()
                    .map_err(|_| DeError::invalid_value(Unexpected::Str(value), &self))
            }
        }

        deserializer.deserialize_any(ChannelIdVisitor)
    }
}

impl Serialize for ChannelId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A string could not be parsed into a [`ChannelId`].
#[derive(Debug)]
pub struct ChannelIdParseError {
    input: String,
}

impl ChannelIdParseError {
    fn new(input: &str) -> Self {
        Self {
            input: input.to_owned(),
        }
    }

    /// The rejected input.
    pub fn input(&self) -> &str {
        &self.input
    }
}

impl Display for ChannelIdParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str("`")?;
        f.write_str(&self.input)?;
        f.write_str("` is neither a snowflake nor a hidden category id")
    }
}

impl Error for ChannelIdParseError {}

// ---------------------------------------------------------------------------
// Channel
// ---------------------------------------------------------------------------

#[derive(Clone, Debug, Eq, PartialEq, Deserialize, Serialize)]
pub struct Channel {
    pub id: ChannelId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guild_id: Option<Id<GuildMarker>>,
    #[serde(rename = "type")]
    pub kind: ChannelType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<ChannelId>,
    #[serde(default)]
    pub position: i64,
}

impl Channel {
    /// The synthetic category hidden channels are grouped under.
    pub fn hidden_category(guild_id: Id<GuildMarker>) -> Self {
        Self {
            id: ChannelId::hidden_category(guild_id),
            guild_id: Some(guild_id),
            kind: ChannelType::GuildCategory,
            name: Some(HIDDEN_CATEGORY_NAME.to_owned()),
            parent_id: None,
            position: 0,
        }
    }

    /// Copy of this channel shown under another parent.
    ///
    /// The override only lives on the copy; the host's record is untouched.
    pub fn reparented(&self, parent_id: Option<ChannelId>) -> Self {
        Self {
            parent_id,
            ..self.clone()
        }
    }

    pub fn is_category(&self) -> bool {
        self.kind == ChannelType::GuildCategory
    }
}
