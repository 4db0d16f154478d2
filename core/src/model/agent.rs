/// Index into [`crate::model::Log::agents`]. Agent identity is only
/// stable through this index; instance ids get reused by the game
/// engine after a despawn.
pub type AgentIdx = usize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AgentKind {
    Player {
        /// Account name as recorded, without the leading ':'.
        account: String,
        profession: u32,
        elite_spec: u32,
        subgroup: u8,
    },
    Npc {
        species_id: u16,
    },
    Gadget {
        /// Volatile per-map id; not stable across logs.
        gadget_id: u16,
    },
}

/// A tracked entity: player, NPC or gadget. Minions reference the
/// agent controlling them through `master`, a non-owning index.
#[derive(Debug, Clone)]
pub struct Agent {
    pub address: u64,
    /// Instance id observed for this agent, zero until first seen in
    /// the event stream.
    pub instance_id: u16,
    pub name: String,
    pub kind: AgentKind,
    pub master: Option<AgentIdx>,
    /// Lifetime interval in log-relative milliseconds, None until the
    /// agent appears in an event.
    pub first_seen_ms: Option<u64>,
    pub last_seen_ms: Option<u64>,
    /// Set for agents synthesized by the builder for references that
    /// never resolved against the agent table.
    pub synthetic: bool,
}

impl Agent {
    pub fn is_player(&self) -> bool {
        matches!(self.kind, AgentKind::Player { .. })
    }

    pub fn species_id(&self) -> Option<u16> {
        match self.kind {
            AgentKind::Npc { species_id } => Some(species_id),
            _ => None,
        }
    }

    pub fn subgroup(&self) -> Option<u8> {
        match self.kind {
            AgentKind::Player { subgroup, .. } => Some(subgroup),
            _ => None,
        }
    }

    pub fn mark_seen(&mut self, time_ms: u64) {
        if self.first_seen_ms.is_none() {
            self.first_seen_ms = Some(time_ms);
        }
        self.last_seen_ms = Some(time_ms);
    }
}
