//! Wire-level discriminants for EVTC combat records.
//!
//! Each 64-byte combat record carries three small discriminant bytes
//! (`is_statechange`, `is_activation`, `is_buff_remove`) that together
//! select the record's meaning. Values above the ones listed here are
//! emitted by newer addon builds and are skipped during decoding.

/// `is_statechange` values understood by this build.
pub mod statechange {
    pub const NONE: u8 = 0;
    /// Source agent entered combat; `dst_agent` carries the subgroup.
    pub const ENTER_COMBAT: u8 = 1;
    pub const EXIT_COMBAT: u8 = 2;
    /// Source agent is now alive.
    pub const CHANGE_UP: u8 = 3;
    pub const CHANGE_DEAD: u8 = 4;
    pub const CHANGE_DOWN: u8 = 5;
    pub const SPAWN: u8 = 6;
    pub const DESPAWN: u8 = 7;
    /// `dst_agent` carries current health fraction scaled to 10000.
    pub const HEALTH_UPDATE: u8 = 8;
    /// `value` carries the server unix timestamp at recording start.
    pub const LOG_START: u8 = 9;
    pub const LOG_END: u8 = 10;
    /// `dst_agent` carries the new active weapon set.
    pub const WEAPON_SWAP: u8 = 11;
    pub const MAX_HEALTH_UPDATE: u8 = 12;
    /// `src_agent` is the address of the recording player.
    pub const POINT_OF_VIEW: u8 = 13;
    pub const LANGUAGE: u8 = 14;
    pub const GW_BUILD: u8 = 15;
    pub const SHARD_ID: u8 = 16;
    /// `dst_agent` carries the reward id, `value` the reward kind.
    pub const REWARD: u8 = 17;

    /// Highest statechange this build interprets. Records with a larger
    /// value are well-formed but unknown and get skipped wholesale.
    pub const MAX_KNOWN: u8 = REWARD;
}

/// `is_activation` values for skill cast records.
pub mod activation {
    pub const NONE: u8 = 0;
    pub const START: u8 = 1;
    pub const QUICKNESS_START: u8 = 2;
    /// Cast channel ran to completion.
    pub const CANCEL_FIRE: u8 = 3;
    /// Cast was interrupted or aborted mid-channel.
    pub const CANCEL_CANCEL: u8 = 4;
    pub const RESET: u8 = 5;
}

/// `is_buff_remove` values for buff removal records.
pub mod buff_remove {
    pub const NONE: u8 = 0;
    /// All stacks stripped at once.
    pub const ALL: u8 = 1;
    pub const SINGLE: u8 = 2;
    pub const MANUAL: u8 = 3;
}
