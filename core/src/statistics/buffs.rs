//! Buff uptime computation.
//!
//! Applications open an interval that runs for the applied duration or
//! until a removal truncates it; per (agent, buff) the intervals are
//! coalesced before summing so overlapping re-applications never
//! double-count.

use hashbrown::HashMap;
use serde::Serialize;

use crate::model::{AgentIdx, BuffRemoval, EventKind, Log, SkillIdx};

#[derive(Debug, Clone, Serialize)]
pub struct BuffUptime {
    #[serde(skip)]
    pub agent: AgentIdx,
    pub agent_name: String,
    pub skill_id: u32,
    pub skill_name: String,
    pub uptime_ms: u64,
    /// Fraction of the full fight, 0.0 when the fight has no duration.
    pub uptime_fraction: f64,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct BuffData {
    pub uptimes: Vec<BuffUptime>,
}

pub fn collect_buff_data(log: &Log) -> BuffData {
    let fight_end = log.end_time_ms();
    let mut raw: HashMap<(AgentIdx, SkillIdx), Vec<(u64, u64)>> = HashMap::new();

    for event in &log.events {
        match event.kind {
            EventKind::BuffApply { buff, duration_ms } => {
                // Application records name the recipient as target;
                // self-applications leave it unset.
                let recipient = event.target.unwrap_or(event.source);
                let start = event.time_ms;
                let end = start.saturating_add(duration_ms.max(0) as u64).min(fight_end);
                if end > start {
                    raw.entry((recipient, buff)).or_default().push((start, end));
                }
            }
            EventKind::BuffRemove { buff, removal } => {
                // Removal records name the agent losing the buff as
                // the source.
                let Some(intervals) = raw.get_mut(&(event.source, buff)) else {
                    continue;
                };
                truncate(intervals, event.time_ms, removal);
            }
            _ => {}
        }
    }

    let mut uptimes: Vec<BuffUptime> = raw
        .into_iter()
        .filter_map(|((agent, buff), mut intervals)| {
            let uptime_ms = coalesced_total(&mut intervals);
            if uptime_ms == 0 {
                return None;
            }
            let skill = log.skill(buff);
            Some(BuffUptime {
                agent,
                agent_name: log.agent(agent).name.clone(),
                skill_id: skill.id,
                skill_name: skill.name.clone(),
                uptime_ms,
                uptime_fraction: if fight_end > 0 {
                    uptime_ms as f64 / fight_end as f64
                } else {
                    0.0
                },
            })
        })
        .collect();

    // Map iteration order is arbitrary; keep the snapshot
    // deterministic across runs.
    uptimes.sort_by_key(|u| (u.agent, u.skill_id));
    BuffData { uptimes }
}

fn truncate(intervals: &mut [(u64, u64)], at: u64, removal: BuffRemoval) {
    match removal {
        BuffRemoval::All => {
            for iv in intervals.iter_mut() {
                if iv.0 <= at && at < iv.1 {
                    iv.1 = at;
                }
            }
        }
        // A single stack drops; close the interval ending soonest.
        BuffRemoval::Single | BuffRemoval::Manual => {
            if let Some(iv) = intervals
                .iter_mut()
                .filter(|iv| iv.0 <= at && at < iv.1)
                .min_by_key(|iv| iv.1)
            {
                iv.1 = at;
            }
        }
    }
}

/// Sort, merge overlapping/adjacent intervals and sum their lengths.
fn coalesced_total(intervals: &mut Vec<(u64, u64)>) -> u64 {
    intervals.sort_unstable();
    let mut total = 0u64;
    let mut current: Option<(u64, u64)> = None;
    for &(start, end) in intervals.iter() {
        match current {
            Some((_, cur_end)) if start <= cur_end => {
                if let Some(cur) = current.as_mut() {
                    cur.1 = cur.1.max(end);
                }
            }
            _ => {
                if let Some((s, e)) = current {
                    total += e - s;
                }
                current = Some((start, end));
            }
        }
    }
    if let Some((s, e)) = current {
        total += e - s;
    }
    total
}
