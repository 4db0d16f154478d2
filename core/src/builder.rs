//! Raw record to domain model translation.
//!
//! Resolves the flat event stream into typed events referencing stable
//! agent identities. The engine reuses small instance ids after an
//! agent despawns, so identity is tracked as (instance id -> agent)
//! mappings that change over the walk: a binding becomes live when an
//! event carries both the agent's address and its instance id, and is
//! retired on despawn/death statechanges. Events whose instance id has
//! no live binding go through a configurable fallback and are flagged
//! rather than dropped.

use hashbrown::HashMap;
use memchr::memchr;
use tracing::warn;

use crate::config::{FallbackResolution, ProcessingOptions};
use crate::error::ProcessError;
use crate::evtc::{RawAgent, RawCombatItem, RawLog};
use crate::game_data::{activation, buff_remove, statechange};
use crate::model::{
    Agent, AgentIdx, AgentKind, BuffRemoval, CastOutcome, Event, EventKind, Log, LogMetadata,
    Skill, SkillIdx,
};


pub struct LogBuilder {
    fallback: FallbackResolution,

    agents: Vec<Agent>,
    by_address: HashMap<u64, AgentIdx>,
    /// Instance id -> agent currently holding it.
    live: HashMap<u16, AgentIdx>,
    /// Instance id -> most recent holder before retirement.
    retired: HashMap<u16, AgentIdx>,

    skills: Vec<Skill>,
    skill_by_id: HashMap<u32, SkillIdx>,

    uncertain_events: usize,
}

impl LogBuilder {
    pub fn new(options: &ProcessingOptions) -> Self {
        Self {
            fallback: options.fallback_resolution,
            agents: Vec::new(),
            by_address: HashMap::new(),
            live: HashMap::new(),
            retired: HashMap::new(),
            skills: Vec::new(),
            skill_by_id: HashMap::new(),
            uncertain_events: 0,
        }
    }

    pub fn build(mut self, raw: RawLog) -> Result<Log, ProcessError> {
        if raw.events.is_empty() {
            return Err(ProcessError::EmptyLog);
        }

        for raw_agent in &raw.agents {
            let idx = self.agents.len();
            self.agents.push(resolve_agent_entry(raw_agent));
            self.by_address.insert(raw_agent.address, idx);
        }
        for raw_skill in &raw.skills {
            let idx = self.skills.len();
            self.skill_by_id.insert(raw_skill.id as u32, idx);
            self.skills.push(Skill {
                id: raw_skill.id as u32,
                name: raw_skill.name.clone(),
            });
        }

        let base_time = raw.events[0].time;
        let mut last_time = 0u64;
        let mut events = Vec::with_capacity(raw.events.len());
        let mut pov = None;
        let mut server_start_unix = None;

        for item in &raw.events {
            // Rebase to log-relative time and clamp so the sequence
            // stays non-decreasing even over garbled input.
            let time_ms = item.time.saturating_sub(base_time).max(last_time);

            if item.is_statechange == statechange::POINT_OF_VIEW {
                pov = self.by_address.get(&item.src_agent).copied();
                continue;
            }
            if item.is_statechange == statechange::LOG_START {
                server_start_unix = Some(item.value as u32);
            }

            let Some(kind) = self.resolve_kind(item) else {
                continue;
            };

            let (source, mut uncertain) = self.resolve_source(item, time_ms);
            self.apply_state_transitions(item, source, &kind);

            let target = match kind {
                EventKind::Damage { .. }
                | EventKind::BuffApply { .. }
                | EventKind::BuffRemove { .. } => {
                    self.resolve_target(item, time_ms).map(|(idx, target_uncertain)| {
                        uncertain |= target_uncertain;
                        idx
                    })
                }
                _ => None,
            };

            if uncertain {
                self.uncertain_events += 1;
            }
            last_time = time_ms;
            events.push(Event { time_ms, source, target, uncertain, kind });
        }

        if self.uncertain_events > 0 {
            warn!(
                count = self.uncertain_events,
                "events resolved through the instance-id fallback"
            );
        }

        Ok(Log {
            metadata: LogMetadata {
                build_date: raw.header.build_date,
                revision: raw.header.revision,
                boss_species_id: raw.header.boss_species_id,
                fight_start_ms: base_time,
                pov,
                server_start_unix,
                skipped_records: raw.skipped_records,
                uncertain_events: self.uncertain_events,
            },
            agents: self.agents,
            skills: self.skills,
            events,
        })
    }

    /// Translate the record's discriminants into a typed kind. None
    /// means the record carries nothing the model represents.
    fn resolve_kind(&mut self, item: &RawCombatItem) -> Option<EventKind> {
        match item.is_statechange {
            statechange::NONE => self.resolve_combat_kind(item),
            statechange::ENTER_COMBAT => Some(EventKind::EnterCombat {
                subgroup: item.dst_agent as u8,
            }),
            statechange::EXIT_COMBAT => Some(EventKind::ExitCombat),
            statechange::CHANGE_UP => Some(EventKind::Alive),
            statechange::CHANGE_DEAD => Some(EventKind::Dead),
            statechange::CHANGE_DOWN => Some(EventKind::Downed),
            statechange::SPAWN => Some(EventKind::Spawn),
            statechange::DESPAWN => Some(EventKind::Despawn),
            statechange::HEALTH_UPDATE => Some(EventKind::HealthUpdate {
                fraction: (item.dst_agent as u16).min(10000),
            }),
            statechange::LOG_START => Some(EventKind::LogStart {
                server_unix: item.value as u32,
            }),
            statechange::LOG_END => Some(EventKind::LogEnd {
                server_unix: item.value as u32,
            }),
            statechange::WEAPON_SWAP => Some(EventKind::WeaponSwap {
                new_set: item.dst_agent as u8,
            }),
            statechange::REWARD => Some(EventKind::Reward {
                reward_id: item.dst_agent,
                reward_kind: item.value,
            }),
            // Known but not modelled (language, build, shard, max hp).
            _ => None,
        }
    }

    fn resolve_combat_kind(&mut self, item: &RawCombatItem) -> Option<EventKind> {
        if item.is_activation != activation::NONE {
            let skill = self.resolve_skill(item.skill_id);
            return match item.is_activation {
                activation::START | activation::QUICKNESS_START => Some(EventKind::CastStart {
                    skill,
                    expected_duration_ms: item.value,
                }),
                activation::CANCEL_FIRE => Some(EventKind::CastEnd {
                    skill,
                    duration_ms: item.value,
                    outcome: CastOutcome::Success,
                }),
                activation::CANCEL_CANCEL => Some(EventKind::CastEnd {
                    skill,
                    duration_ms: item.value,
                    outcome: CastOutcome::Cancel,
                }),
                activation::RESET => Some(EventKind::CastEnd {
                    skill,
                    duration_ms: item.value,
                    outcome: CastOutcome::Reset,
                }),
                _ => None,
            };
        }

        if item.is_buff_remove != buff_remove::NONE {
            let removal = match item.is_buff_remove {
                buff_remove::ALL => BuffRemoval::All,
                buff_remove::SINGLE => BuffRemoval::Single,
                buff_remove::MANUAL => BuffRemoval::Manual,
                _ => return None,
            };
            let buff = self.resolve_skill(item.skill_id);
            return Some(EventKind::BuffRemove { buff, removal });
        }

        if item.buff != 0 && item.buff_dmg == 0 {
            let buff = self.resolve_skill(item.skill_id);
            return Some(EventKind::BuffApply { buff, duration_ms: item.value });
        }

        let skill = self.resolve_skill(item.skill_id);
        let (amount, from_buff) = if item.buff != 0 {
            (item.buff_dmg as i64, true)
        } else {
            (item.value as i64, false)
        };
        Some(EventKind::Damage { skill, amount, from_buff })
    }

    fn resolve_skill(&mut self, id: u32) -> SkillIdx {
        if let Some(&idx) = self.skill_by_id.get(&id) {
            return idx;
        }
        let idx = self.skills.len();
        self.skills.push(Skill::placeholder(id));
        self.skill_by_id.insert(id, idx);
        idx
    }

    fn resolve_source(&mut self, item: &RawCombatItem, time_ms: u64) -> (AgentIdx, bool) {
        let (idx, uncertain) =
            self.resolve_agent(item.src_agent, item.src_instance_id, time_ms);
        if item.src_master_instance_id != 0
            && let Some(&master) = self.live.get(&item.src_master_instance_id)
            && master != idx
        {
            self.agents[idx].master = Some(master);
        }
        (idx, uncertain)
    }

    fn resolve_target(&mut self, item: &RawCombatItem, time_ms: u64) -> Option<(AgentIdx, bool)> {
        if item.dst_agent == 0 && item.dst_instance_id == 0 {
            return None;
        }
        Some(self.resolve_agent(item.dst_agent, item.dst_instance_id, time_ms))
    }

    fn resolve_agent(&mut self, address: u64, instance_id: u16, time_ms: u64) -> (AgentIdx, bool) {
        if let Some(&idx) = self.by_address.get(&address) {
            if instance_id != 0 {
                if self.agents[idx].instance_id == 0 {
                    self.agents[idx].instance_id = instance_id;
                }
                self.live.insert(instance_id, idx);
            }
            self.agents[idx].mark_seen(time_ms);
            return (idx, false);
        }

        if instance_id != 0
            && let Some(&idx) = self.live.get(&instance_id)
        {
            self.agents[idx].mark_seen(time_ms);
            return (idx, false);
        }

        if self.fallback == FallbackResolution::LastHolder
            && instance_id != 0
            && let Some(&idx) = self.retired.get(&instance_id)
        {
            self.agents[idx].mark_seen(time_ms);
            return (idx, true);
        }

        (self.synthesize_agent(address, instance_id, time_ms), true)
    }

    fn synthesize_agent(&mut self, address: u64, instance_id: u16, time_ms: u64) -> AgentIdx {
        let idx = self.agents.len();
        let mut agent = Agent {
            address,
            instance_id,
            name: String::new(),
            kind: AgentKind::Npc { species_id: 0 },
            master: None,
            first_seen_ms: None,
            last_seen_ms: None,
            synthetic: true,
        };
        agent.mark_seen(time_ms);
        self.agents.push(agent);

        if address != 0 {
            self.by_address.insert(address, idx);
        }
        if instance_id != 0 {
            self.live.insert(instance_id, idx);
        }
        idx
    }

    /// Lifecycle statechanges update the live/retired instance-id
    /// bindings and the subgroup learned from enter-combat records.
    fn apply_state_transitions(&mut self, item: &RawCombatItem, source: AgentIdx, kind: &EventKind) {
        match kind {
            EventKind::Despawn | EventKind::Dead => {
                if item.src_instance_id != 0
                    && self.live.get(&item.src_instance_id) == Some(&source)
                {
                    self.live.remove(&item.src_instance_id);
                    self.retired.insert(item.src_instance_id, source);
                }
            }
            EventKind::EnterCombat { subgroup } => {
                if let AgentKind::Player { subgroup: current, .. } = &mut self.agents[source].kind
                    && *current == 0
                {
                    *current = *subgroup;
                }
            }
            _ => {}
        }
    }
}

/// Classify a raw agent table entry. The high elite field marks
/// non-players; gadgets additionally set the high half of the
/// profession field.
fn resolve_agent_entry(raw: &RawAgent) -> Agent {
    let (name, kind) = if raw.is_elite == u32::MAX {
        let name = first_name_part(&raw.name);
        if raw.profession & 0xffff_0000 == 0xffff_0000 {
            (name, AgentKind::Gadget { gadget_id: raw.profession as u16 })
        } else {
            (name, AgentKind::Npc { species_id: raw.profession as u16 })
        }
    } else {
        let mut parts = raw.name.split(|&b| b == 0);
        let character = part_to_string(parts.next());
        let account = part_to_string(parts.next());
        let subgroup = part_to_string(parts.next()).parse::<u8>().unwrap_or(0);
        (
            character,
            AgentKind::Player {
                account: account.strip_prefix(':').unwrap_or(&account).to_string(),
                profession: raw.profession,
                elite_spec: raw.is_elite,
                subgroup,
            },
        )
    };

    Agent {
        address: raw.address,
        instance_id: 0,
        name,
        kind,
        master: None,
        first_seen_ms: None,
        last_seen_ms: None,
        synthetic: false,
    }
}

fn first_name_part(field: &[u8]) -> String {
    let end = memchr(0, field).unwrap_or(field.len());
    String::from_utf8_lossy(&field[..end]).into_owned()
}

fn part_to_string(part: Option<&[u8]>) -> String {
    String::from_utf8_lossy(part.unwrap_or_default()).into_owned()
}
