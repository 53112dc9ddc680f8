//! Guild permission bits.
//!
//! The crate never computes permissions itself; these flags only name the
//! bit a [`PermissionOracle`] is asked about.
//!
//! [`PermissionOracle`]: crate::host::PermissionOracle

use bitflags::bitflags;

bitflags! {
    /// Discord permission bits, as documented for guild channels.
    #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
    pub struct Permissions: u64 {
        const CREATE_INVITE = 1;
        const KICK_MEMBERS = 1 << 1;
        const BAN_MEMBERS = 1 << 2;
        const ADMINISTRATOR = 1 << 3;
        const MANAGE_CHANNELS = 1 << 4;
        const MANAGE_GUILD = 1 << 5;
        const ADD_REACTIONS = 1 << 6;
        const VIEW_AUDIT_LOG = 1 << 7;
        const PRIORITY_SPEAKER = 1 << 8;
        const STREAM = 1 << 9;
        const VIEW_CHANNEL = 1 << 10;
        const SEND_MESSAGES = 1 << 11;
        const SEND_TTS_MESSAGES = 1 << 12;
        const MANAGE_MESSAGES = 1 << 13;
        const EMBED_LINKS = 1 << 14;
        const ATTACH_FILES = 1 << 15;
        const READ_MESSAGE_HISTORY = 1 << 16;
        const MENTION_EVERYONE = 1 << 17;
        const USE_EXTERNAL_EMOJIS = 1 << 18;
        const VIEW_GUILD_INSIGHTS = 1 << 19;
        const CONNECT = 1 << 20;
        const SPEAK = 1 << 21;
        const MUTE_MEMBERS = 1 << 22;
        const DEAFEN_MEMBERS = 1 << 23;
        const MOVE_MEMBERS = 1 << 24;
        const USE_VAD = 1 << 25;
        const CHANGE_NICKNAME = 1 << 26;
        const MANAGE_NICKNAMES = 1 << 27;
        const MANAGE_ROLES = 1 << 28;
        const MANAGE_WEBHOOKS = 1 << 29;
    }
}

#[cfg(test)]
mod tests {
    use super::Permissions;
    use static_assertions::const_assert_eq;

    const_assert_eq!(Permissions::VIEW_CHANNEL.bits(), 1024);
    const_assert_eq!(Permissions::CONNECT.bits(), 1_048_576);

    #[test]
    fn view_channel_is_independent_of_connect() {
        let voice_only = Permissions::CONNECT | Permissions::SPEAK;
        assert!(!voice_only.contains(Permissions::VIEW_CHANNEL));
        assert!(Permissions::all().contains(Permissions::VIEW_CHANNEL));
    }
}
