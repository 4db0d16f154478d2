use thiserror::Error;

use super::identification::Identification;
use super::EncounterResult;
use crate::game_data::ResultRule;
use crate::model::{AgentIdx, EventKind, Log};

/// Errors raised while assembling a determiner tree. These are
/// configuration mistakes and surface at construction, never during
/// evaluation.
#[derive(Debug, Error)]
pub enum DeterminerError {
    #[error("a combinator requires at least one child determiner")]
    EmptyCombinator,
}

/// A pure classification of fight outcome from the event timeline.
/// Implementations read the shared log snapshot and keep no state, so
/// they are safe to evaluate in any order.
pub trait ResultDeterminer: Send + Sync {
    fn determine(&self, log: &Log) -> EncounterResult;
}

/// Success when the target was recorded dead; Failure when the target
/// was seen but survived; Unknown when the target never appears.
pub struct TargetDeathDeterminer {
    pub target: Option<AgentIdx>,
}

impl ResultDeterminer for TargetDeathDeterminer {
    fn determine(&self, log: &Log) -> EncounterResult {
        let Some(target) = self.target else {
            return EncounterResult::Unknown;
        };
        let mut seen = false;
        for event in &log.events {
            if event.source == target {
                seen = true;
                if event.kind == EventKind::Dead {
                    return EncounterResult::Success;
                }
            }
        }
        if seen { EncounterResult::Failure } else { EncounterResult::Unknown }
    }
}

/// Success when a reward chest was granted during the fight. Absence
/// proves nothing (rewards are once per reset), so this never returns
/// Failure.
pub struct RewardDeterminer {
    /// Restrict to one reward id; None accepts any reward event.
    pub reward_id: Option<u64>,
}

impl ResultDeterminer for RewardDeterminer {
    fn determine(&self, log: &Log) -> EncounterResult {
        for event in &log.events {
            if let EventKind::Reward { reward_id, .. } = event.kind
                && self.reward_id.is_none_or(|want| want == reward_id)
            {
                return EncounterResult::Success;
            }
        }
        EncounterResult::Unknown
    }
}

/// Success when the target's last recorded health fraction dropped
/// below the cutoff; Failure when it stayed above; Unknown without any
/// health updates.
pub struct TargetBelowHealthDeterminer {
    pub target: Option<AgentIdx>,
    /// Health fraction scaled to 10000.
    pub threshold: u16,
}

impl ResultDeterminer for TargetBelowHealthDeterminer {
    fn determine(&self, log: &Log) -> EncounterResult {
        let Some(target) = self.target else {
            return EncounterResult::Unknown;
        };
        let mut last_fraction = None;
        for event in &log.events {
            if event.source == target
                && let EventKind::HealthUpdate { fraction } = event.kind
            {
                last_fraction = Some(fraction);
            }
        }
        match last_fraction {
            Some(fraction) if fraction < self.threshold => EncounterResult::Success,
            Some(_) => EncounterResult::Failure,
            None => EncounterResult::Unknown,
        }
    }
}

/// Success if any child succeeded, else Unknown if any child was
/// unsure, else Failure. One successful sub-signal overrides any
/// number of ambiguous or failing ones.
pub struct AnyCombinedDeterminer {
    determiners: Vec<Box<dyn ResultDeterminer>>,
}

impl AnyCombinedDeterminer {
    pub fn new(determiners: Vec<Box<dyn ResultDeterminer>>) -> Result<Self, DeterminerError> {
        if determiners.is_empty() {
            return Err(DeterminerError::EmptyCombinator);
        }
        Ok(Self { determiners })
    }
}

impl ResultDeterminer for AnyCombinedDeterminer {
    fn determine(&self, log: &Log) -> EncounterResult {
        let results: Vec<_> = self.determiners.iter().map(|d| d.determine(log)).collect();
        if results.contains(&EncounterResult::Success) {
            return EncounterResult::Success;
        }
        if results.contains(&EncounterResult::Unknown) {
            return EncounterResult::Unknown;
        }
        EncounterResult::Failure
    }
}

/// Success only when every child succeeded; Unknown as soon as any
/// child was unsure; Failure otherwise.
pub struct AllCombinedDeterminer {
    determiners: Vec<Box<dyn ResultDeterminer>>,
}

impl AllCombinedDeterminer {
    pub fn new(determiners: Vec<Box<dyn ResultDeterminer>>) -> Result<Self, DeterminerError> {
        if determiners.is_empty() {
            return Err(DeterminerError::EmptyCombinator);
        }
        Ok(Self { determiners })
    }
}

impl ResultDeterminer for AllCombinedDeterminer {
    fn determine(&self, log: &Log) -> EncounterResult {
        let results: Vec<_> = self.determiners.iter().map(|d| d.determine(log)).collect();
        if results.contains(&EncounterResult::Unknown) {
            return EncounterResult::Unknown;
        }
        if results.iter().all(|r| *r == EncounterResult::Success) {
            return EncounterResult::Success;
        }
        EncounterResult::Failure
    }
}

/// Assemble the determiner tree for an identified encounter. Known
/// encounters combine their registered rules; the generic fallback
/// accepts either a target death or a reward chest.
pub fn determiner_for(
    identification: &Identification,
) -> Result<Box<dyn ResultDeterminer>, DeterminerError> {
    let target = identification.primary_target;

    let children: Vec<Box<dyn ResultDeterminer>> = match identification.info {
        Some(info) => info
            .result_rules
            .iter()
            .map(|rule| -> Box<dyn ResultDeterminer> {
                match *rule {
                    ResultRule::TargetDeath => Box::new(TargetDeathDeterminer { target }),
                    ResultRule::Reward => Box::new(RewardDeterminer { reward_id: None }),
                    ResultRule::TargetBelowHealth(threshold) => {
                        Box::new(TargetBelowHealthDeterminer { target, threshold })
                    }
                }
            })
            .collect(),
        None => vec![
            Box::new(TargetDeathDeterminer { target }),
            Box::new(RewardDeterminer { reward_id: None }),
        ],
    };

    Ok(Box::new(AnyCombinedDeterminer::new(children)?))
}
