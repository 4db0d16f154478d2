use serde::Serialize;

use super::agent::AgentIdx;
use super::skill::SkillIdx;

/// How a skill cast ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CastOutcome {
    Success,
    Cancel,
    Reset,
    /// No matching end record before the log ended.
    Incomplete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuffRemoval {
    /// All stacks stripped at once.
    All,
    Single,
    Manual,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventKind {
    Damage {
        skill: SkillIdx,
        amount: i64,
        /// Condition/buff tick rather than a strike.
        from_buff: bool,
    },
    BuffApply {
        buff: SkillIdx,
        duration_ms: i32,
    },
    BuffRemove {
        buff: SkillIdx,
        removal: BuffRemoval,
    },
    CastStart {
        skill: SkillIdx,
        expected_duration_ms: i32,
    },
    CastEnd {
        skill: SkillIdx,
        duration_ms: i32,
        outcome: CastOutcome,
    },
    WeaponSwap {
        new_set: u8,
    },
    EnterCombat {
        subgroup: u8,
    },
    ExitCombat,
    Alive,
    Dead,
    Downed,
    Spawn,
    Despawn,
    /// Current health fraction scaled to 10000.
    HealthUpdate {
        fraction: u16,
    },
    Reward {
        reward_id: u64,
        reward_kind: i32,
    },
    LogStart {
        server_unix: u32,
    },
    LogEnd {
        server_unix: u32,
    },
}

/// One fully resolved timeline entry. Times are log-relative
/// milliseconds, non-decreasing across the whole event sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub time_ms: u64,
    pub source: AgentIdx,
    pub target: Option<AgentIdx>,
    /// The source reference had no live instance-id mapping and was
    /// resolved through the fallback heuristic.
    pub uncertain: bool,
    pub kind: EventKind,
}

impl EventKind {
    /// Stable kind label, used for the per-kind event counts.
    pub fn name(&self) -> &'static str {
        match self {
            EventKind::Damage { .. } => "Damage",
            EventKind::BuffApply { .. } => "BuffApply",
            EventKind::BuffRemove { .. } => "BuffRemove",
            EventKind::CastStart { .. } => "CastStart",
            EventKind::CastEnd { .. } => "CastEnd",
            EventKind::WeaponSwap { .. } => "WeaponSwap",
            EventKind::EnterCombat { .. } => "EnterCombat",
            EventKind::ExitCombat => "ExitCombat",
            EventKind::Alive => "Alive",
            EventKind::Dead => "Dead",
            EventKind::Downed => "Downed",
            EventKind::Spawn => "Spawn",
            EventKind::Despawn => "Despawn",
            EventKind::HealthUpdate { .. } => "HealthUpdate",
            EventKind::Reward { .. } => "Reward",
            EventKind::LogStart { .. } => "LogStart",
            EventKind::LogEnd { .. } => "LogEnd",
        }
    }
}
