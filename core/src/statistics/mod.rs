//! Timeline aggregation into per-player, per-group and per-target
//! statistics.
//!
//! Damage totals accumulate in exact integer arithmetic; rates are
//! derived from the integer totals only when a snapshot is built.
//! Phase-scoped numbers come from a single pointer sweep keyed on the
//! timestamp order, not from repeated full scans.

mod buffs;

use std::collections::BTreeMap;

use hashbrown::HashMap;
use serde::Serialize;

use crate::encounter::{Encounter, EncounterResult, Phase};
use crate::game_data::{elite_spec_name, profession_name};
use crate::model::{AgentIdx, AgentKind, EventKind, Log};

pub use buffs::{collect_buff_data, BuffData, BuffUptime};

#[derive(Debug, Clone, Serialize)]
pub struct PlayerStatistics {
    #[serde(skip)]
    pub agent: AgentIdx,
    pub name: String,
    pub account: String,
    pub subgroup: u8,
    /// Elite specialization name when one is known, else profession.
    pub profession: String,
    pub damage_dealt: i64,
    pub condition_damage: i64,
    pub dps: f64,
    pub downs: u32,
    pub deaths: u32,
    pub weapon_swaps: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct GroupStatistics {
    pub subgroup: u8,
    pub player_count: usize,
    pub damage_dealt: i64,
    pub dps: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct SquadDamageData {
    pub total_damage: i64,
    pub dps: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct TargetDamageData {
    #[serde(skip)]
    pub target: AgentIdx,
    pub target_name: String,
    pub total_damage: i64,
    pub dps: f64,
}

/// Per-player damage within one phase window.
#[derive(Debug, Clone, Serialize)]
pub struct PhaseStats {
    pub phase: Phase,
    pub total_damage: i64,
    pub player_damage: Vec<(String, i64)>,
}

/// Read-only snapshot computed once per log; holds no references into
/// the log beyond display names and agent indices.
#[derive(Debug, Clone, Serialize)]
pub struct LogStatistics {
    pub encounter_name: String,
    pub result: EncounterResult,
    pub fight_time_ms: u64,
    pub log_version: String,
    pub players: Vec<PlayerStatistics>,
    pub groups: Vec<GroupStatistics>,
    pub squad_damage: SquadDamageData,
    pub target_damage: Vec<TargetDamageData>,
    pub phase_stats: Vec<PhaseStats>,
    pub buff_data: BuffData,
    pub event_counts: BTreeMap<&'static str, u32>,
}

pub fn calculate_statistics(log: &Log, encounter: &Encounter) -> LogStatistics {
    let fight_time_ms = log.end_time_ms();

    let mut damage_by_player: HashMap<AgentIdx, (i64, i64)> = HashMap::new();
    let mut damage_by_target: HashMap<AgentIdx, i64> = HashMap::new();
    let mut downs: HashMap<AgentIdx, u32> = HashMap::new();
    let mut deaths: HashMap<AgentIdx, u32> = HashMap::new();
    let mut swaps: HashMap<AgentIdx, u32> = HashMap::new();
    let mut event_counts: BTreeMap<&'static str, u32> = BTreeMap::new();

    let mut phase_idx = 0usize;
    let mut phase_damage: Vec<HashMap<AgentIdx, i64>> =
        vec![HashMap::new(); encounter.phases.len()];

    for event in &log.events {
        *event_counts.entry(event.kind.name()).or_insert(0) += 1;

        // Phases partition the fight, so one forward pointer keeps up
        // with the timeline.
        while phase_idx + 1 < encounter.phases.len()
            && event.time_ms >= encounter.phases[phase_idx].end_ms
        {
            phase_idx += 1;
        }

        match event.kind {
            EventKind::Damage { amount, from_buff, .. } if amount > 0 => {
                // Minion damage is credited to the controlling player.
                let owner = log.effective_owner(event.source);
                if log.agent(owner).is_player() {
                    let entry = damage_by_player.entry(owner).or_insert((0, 0));
                    entry.0 += amount;
                    if from_buff {
                        entry.1 += amount;
                    }
                    if let Some(bucket) = phase_damage.get_mut(phase_idx) {
                        *bucket.entry(owner).or_insert(0) += amount;
                    }
                }
                if let Some(target) = event.target
                    && !log.agent(target).is_player()
                {
                    *damage_by_target.entry(target).or_insert(0) += amount;
                }
            }
            EventKind::Downed => *downs.entry(event.source).or_insert(0) += 1,
            EventKind::Dead => *deaths.entry(event.source).or_insert(0) += 1,
            EventKind::WeaponSwap { .. } => *swaps.entry(event.source).or_insert(0) += 1,
            _ => {}
        }
    }

    let seconds = fight_time_ms as f64 / 1000.0;
    let rate = |total: i64| {
        if fight_time_ms == 0 { 0.0 } else { total as f64 / seconds }
    };

    let mut players: Vec<PlayerStatistics> = log
        .players()
        .filter_map(|(idx, agent)| {
            let AgentKind::Player { account, profession, elite_spec, subgroup } = &agent.kind
            else {
                return None;
            };
            let (damage, condition) = damage_by_player.get(&idx).copied().unwrap_or((0, 0));
            Some(PlayerStatistics {
                agent: idx,
                name: agent.name.clone(),
                account: account.clone(),
                subgroup: *subgroup,
                profession: elite_spec_name(*elite_spec)
                    .unwrap_or(profession_name(*profession))
                    .to_string(),
                damage_dealt: damage,
                condition_damage: condition,
                dps: rate(damage),
                downs: downs.get(&idx).copied().unwrap_or(0),
                deaths: deaths.get(&idx).copied().unwrap_or(0),
                weapon_swaps: swaps.get(&idx).copied().unwrap_or(0),
            })
        })
        .collect();
    players.sort_by(|a, b| b.damage_dealt.cmp(&a.damage_dealt).then(a.agent.cmp(&b.agent)));

    let mut by_group: BTreeMap<u8, (usize, i64)> = BTreeMap::new();
    for p in &players {
        let entry = by_group.entry(p.subgroup).or_insert((0, 0));
        entry.0 += 1;
        entry.1 += p.damage_dealt;
    }
    let groups = by_group
        .into_iter()
        .map(|(subgroup, (player_count, damage_dealt))| GroupStatistics {
            subgroup,
            player_count,
            damage_dealt,
            dps: rate(damage_dealt),
        })
        .collect();

    let total_damage: i64 = players.iter().map(|p| p.damage_dealt).sum();

    let mut target_damage: Vec<TargetDamageData> = damage_by_target
        .into_iter()
        .map(|(target, total)| TargetDamageData {
            target,
            target_name: log.agent(target).name.clone(),
            total_damage: total,
            dps: rate(total),
        })
        .collect();
    target_damage.sort_by(|a, b| b.total_damage.cmp(&a.total_damage).then(a.target.cmp(&b.target)));

    let phase_stats = encounter
        .phases
        .iter()
        .zip(phase_damage)
        .map(|(phase, damage)| {
            let mut player_damage: Vec<(AgentIdx, i64)> = damage.into_iter().collect();
            player_damage.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
            PhaseStats {
                phase: phase.clone(),
                total_damage: player_damage.iter().map(|(_, d)| *d).sum(),
                player_damage: player_damage
                    .into_iter()
                    .map(|(idx, d)| (log.agent(idx).name.clone(), d))
                    .collect(),
            }
        })
        .collect();

    LogStatistics {
        encounter_name: encounter.name.clone(),
        result: encounter.result,
        fight_time_ms,
        log_version: log.metadata.version(),
        players,
        groups,
        squad_damage: SquadDamageData { total_damage, dps: rate(total_damage) },
        target_damage,
        phase_stats,
        buff_data: collect_buff_data(log),
        event_counts,
    }
}
