use super::agent::{Agent, AgentIdx};
use super::event::Event;
use super::skill::{Skill, SkillIdx};

#[derive(Debug, Clone)]
pub struct LogMetadata {
    /// Addon build date from the header, e.g. "20230328".
    pub build_date: String,
    pub revision: u8,
    pub boss_species_id: u16,
    /// Absolute time of the first event; event times are rebased so
    /// that this instant is zero.
    pub fight_start_ms: u64,
    /// The recording player, when the log declared a point of view.
    pub pov: Option<AgentIdx>,
    /// Server unix timestamp at recording start, when present.
    pub server_start_unix: Option<u32>,
    /// Records the decoder skipped (unknown statechange values).
    pub skipped_records: usize,
    /// Events resolved through the instance-id fallback heuristic.
    pub uncertain_events: usize,
}

impl LogMetadata {
    /// Header-derived version label, e.g. "EVTC20230328.1".
    pub fn version(&self) -> String {
        format!("EVTC{}.{}", self.build_date, self.revision)
    }
}

/// The root aggregate: the typed event timeline plus the registries
/// its indices resolve against. Immutable once built.
#[derive(Debug, Clone)]
pub struct Log {
    pub metadata: LogMetadata,
    pub agents: Vec<Agent>,
    pub skills: Vec<Skill>,
    pub events: Vec<Event>,
}

impl Log {
    pub fn agent(&self, idx: AgentIdx) -> &Agent {
        &self.agents[idx]
    }

    pub fn skill(&self, idx: SkillIdx) -> &Skill {
        &self.skills[idx]
    }

    pub fn players(&self) -> impl Iterator<Item = (AgentIdx, &Agent)> {
        self.agents.iter().enumerate().filter(|(_, a)| a.is_player())
    }

    /// Time of the last event, log-relative. Zero for a log whose
    /// single event opens the fight.
    pub fn end_time_ms(&self) -> u64 {
        self.events.last().map(|e| e.time_ms).unwrap_or(0)
    }

    /// Walks master links to the controlling agent; identity for
    /// agents without a master.
    pub fn effective_owner(&self, mut idx: AgentIdx) -> AgentIdx {
        let mut hops = 0;
        while let Some(master) = self.agents[idx].master {
            idx = master;
            hops += 1;
            if hops > self.agents.len() {
                break;
            }
        }
        idx
    }
}
