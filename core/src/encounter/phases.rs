use serde::Serialize;

use super::identification::Identification;
use crate::model::{EventKind, Log};

/// A named contiguous time sub-range of the fight, log-relative
/// milliseconds. Phases produced here partition [0, fight end], so
/// their durations always sum to the total fight time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Phase {
    pub name: String,
    pub start_ms: u64,
    pub end_ms: u64,
}

impl Phase {
    pub fn duration_ms(&self) -> u64 {
        self.end_ms - self.start_ms
    }
}

/// Split the fight into phases. Known encounters split on the primary
/// target's health crossing the registered thresholds; everything else
/// gets one phase spanning the whole fight.
pub fn split_phases(log: &Log, identification: &Identification) -> Vec<Phase> {
    let fight_end = log.end_time_ms();
    let full_fight = || vec![Phase { name: "Full fight".to_string(), start_ms: 0, end_ms: fight_end }];

    let Some(info) = identification.info else {
        return full_fight();
    };
    let Some(target) = identification.primary_target else {
        return full_fight();
    };
    if info.phase_splits.is_empty() {
        return full_fight();
    }

    let mut phases = Vec::with_capacity(info.phase_splits.len() + 1);
    let mut phase_start = 0u64;
    let mut next_split = 0usize;

    for event in &log.events {
        if next_split >= info.phase_splits.len() {
            break;
        }
        if event.source != target {
            continue;
        }
        let EventKind::HealthUpdate { fraction } = event.kind else {
            continue;
        };
        // One update can cross several thresholds at once.
        while next_split < info.phase_splits.len() && fraction <= info.phase_splits[next_split] {
            phases.push(Phase {
                name: format!("Phase {}", phases.len() + 1),
                start_ms: phase_start,
                end_ms: event.time_ms,
            });
            phase_start = event.time_ms;
            next_split += 1;
        }
    }

    phases.push(Phase {
        name: format!("Phase {}", phases.len() + 1),
        start_ms: phase_start,
        end_ms: fight_end,
    });
    phases
}
