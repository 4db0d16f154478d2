//! Per-player rotation extraction from the event timeline.

use hashbrown::HashMap;

use crate::game_data::profession_icon_url;
use crate::model::{AgentIdx, AgentKind, CastOutcome, EventKind, Log, SkillIdx};

/// One entry in a player's rotation, ordered by start time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RotationItem {
    SkillCast {
        skill: SkillIdx,
        start_ms: u64,
        duration_ms: u64,
        outcome: CastOutcome,
    },
    WeaponSwap {
        new_set: u8,
        time_ms: u64,
    },
}

impl RotationItem {
    pub fn start_ms(&self) -> u64 {
        match self {
            RotationItem::SkillCast { start_ms, .. } => *start_ms,
            RotationItem::WeaponSwap { time_ms, .. } => *time_ms,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PlayerRotation {
    pub agent: AgentIdx,
    pub name: String,
    pub account: String,
    pub icon_url: &'static str,
    pub items: Vec<RotationItem>,
}

struct PendingCast {
    skill: SkillIdx,
    start_ms: u64,
    seq: usize,
}

#[derive(Default)]
struct Tracker {
    pending: Option<PendingCast>,
    // Items keyed for the final ordering: start time, then the stream
    // position of the opening event.
    items: Vec<(u64, usize, RotationItem)>,
}

impl Tracker {
    fn close_pending(&mut self, end_ms: u64, outcome: CastOutcome) {
        if let Some(pending) = self.pending.take() {
            self.items.push((
                pending.start_ms,
                pending.seq,
                RotationItem::SkillCast {
                    skill: pending.skill,
                    start_ms: pending.start_ms,
                    duration_ms: end_ms.saturating_sub(pending.start_ms),
                    outcome,
                },
            ));
        }
    }
}

/// Derive each player's ordered skill-cast and weapon-swap sequence.
///
/// Cast duration is realized time, end event minus start event. A
/// start with no end before the log ends is closed at log end with an
/// incomplete outcome rather than dropped; a start arriving while
/// another cast is still open closes the open one the same way.
pub fn extract_rotations(log: &Log) -> Vec<PlayerRotation> {
    let end_ms = log.end_time_ms();

    let mut trackers: HashMap<AgentIdx, Tracker> = log
        .players()
        .map(|(idx, _)| (idx, Tracker::default()))
        .collect();

    for (seq, event) in log.events.iter().enumerate() {
        let Some(tracker) = trackers.get_mut(&event.source) else {
            continue;
        };
        match event.kind {
            EventKind::CastStart { skill, .. } => {
                tracker.close_pending(event.time_ms, CastOutcome::Incomplete);
                tracker.pending = Some(PendingCast {
                    skill,
                    start_ms: event.time_ms,
                    seq,
                });
            }
            EventKind::CastEnd { outcome, .. } => {
                tracker.close_pending(event.time_ms, outcome);
            }
            EventKind::WeaponSwap { new_set } => {
                tracker.items.push((
                    event.time_ms,
                    seq,
                    RotationItem::WeaponSwap { new_set, time_ms: event.time_ms },
                ));
            }
            _ => {}
        }
    }

    let mut rotations: Vec<PlayerRotation> = log
        .players()
        .filter_map(|(idx, agent)| {
            let AgentKind::Player { account, profession, elite_spec, .. } = &agent.kind else {
                return None;
            };
            let mut tracker = trackers.remove(&idx).unwrap_or_default();
            tracker.close_pending(end_ms, CastOutcome::Incomplete);
            tracker.items.sort_by_key(|&(start, seq, _)| (start, seq));
            Some(PlayerRotation {
                agent: idx,
                name: agent.name.clone(),
                account: account.clone(),
                icon_url: profession_icon_url(*profession, *elite_spec),
                items: tracker.items.into_iter().map(|(_, _, item)| item).collect(),
            })
        })
        .collect();
    rotations.sort_by_key(|r| r.agent);
    rotations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::LogBuilder;
    use crate::config::ProcessingOptions;
    use crate::evtc::Decoder;
    use crate::game_data::{activation, statechange};
    use crate::testutil::{header_bytes, log_bytes, player_agent_bytes, skill_bytes, TestEvent};

    fn cast_start(time: u64, skill_id: u32) -> TestEvent {
        TestEvent {
            time,
            src_agent: 1000,
            src_instance_id: 1,
            skill_id,
            is_activation: activation::START,
            value: 1_500,
            ..Default::default()
        }
    }

    fn cast_end(time: u64, skill_id: u32, is_activation: u8) -> TestEvent {
        TestEvent {
            time,
            src_agent: 1000,
            src_instance_id: 1,
            skill_id,
            is_activation,
            ..Default::default()
        }
    }

    fn swap(time: u64, new_set: u64) -> TestEvent {
        TestEvent {
            time,
            src_agent: 1000,
            src_instance_id: 1,
            dst_agent: new_set,
            is_statechange: statechange::WEAPON_SWAP,
            ..Default::default()
        }
    }

    fn marker(time: u64) -> TestEvent {
        // A zero-damage hit only pins the log end time.
        TestEvent {
            time,
            src_agent: 1000,
            src_instance_id: 1,
            skill_id: 1,
            ..Default::default()
        }
    }

    fn rotation_log(events: &[TestEvent]) -> Log {
        let agents = [player_agent_bytes(1000, 1, 62, "Honest Kyle", ":Kyle.1234", "1")];
        let skills = [skill_bytes(100, "Mantra of Solace"), skill_bytes(200, "Tome of Resolve")];
        let bytes: Vec<_> = events.iter().map(TestEvent::to_bytes).collect();
        let buf = log_bytes(&header_bytes(1, 15438), &agents, &skills, &bytes);
        let raw = Decoder::new(&buf).decode().unwrap();
        LogBuilder::new(&ProcessingOptions::default()).build(raw).unwrap()
    }

    #[test]
    fn test_matched_cast_uses_realized_duration() {
        let log = rotation_log(&[
            marker(0),
            cast_start(1_000, 100),
            cast_end(1_800, 100, activation::CANCEL_FIRE),
        ]);
        let rotations = extract_rotations(&log);

        assert_eq!(rotations.len(), 1);
        assert_eq!(rotations[0].name, "Honest Kyle");
        assert_eq!(
            rotations[0].items,
            vec![RotationItem::SkillCast {
                skill: 0,
                start_ms: 1_000,
                duration_ms: 800,
                outcome: CastOutcome::Success,
            }]
        );
    }

    #[test]
    fn test_cancel_and_reset_outcomes() {
        let log = rotation_log(&[
            marker(0),
            cast_start(1_000, 100),
            cast_end(1_200, 100, activation::CANCEL_CANCEL),
            cast_start(2_000, 200),
            cast_end(2_500, 200, activation::RESET),
        ]);
        let items = &extract_rotations(&log)[0].items;

        assert_eq!(items.len(), 2);
        let RotationItem::SkillCast { outcome, .. } = items[0] else {
            panic!("expected cast");
        };
        assert_eq!(outcome, CastOutcome::Cancel);
        let RotationItem::SkillCast { outcome, .. } = items[1] else {
            panic!("expected cast");
        };
        assert_eq!(outcome, CastOutcome::Reset);
    }

    #[test]
    fn test_unmatched_start_clipped_to_log_end() {
        let log = rotation_log(&[marker(0), cast_start(1_000, 100), marker(5_000)]);
        let items = &extract_rotations(&log)[0].items;

        assert_eq!(
            items,
            &vec![RotationItem::SkillCast {
                skill: 0,
                start_ms: 1_000,
                duration_ms: 4_000,
                outcome: CastOutcome::Incomplete,
            }]
        );
    }

    #[test]
    fn test_new_start_closes_open_cast() {
        let log = rotation_log(&[
            marker(0),
            cast_start(1_000, 100),
            cast_start(1_400, 200),
            cast_end(2_000, 200, activation::CANCEL_FIRE),
        ]);
        let items = &extract_rotations(&log)[0].items;

        assert_eq!(items.len(), 2);
        assert_eq!(
            items[0],
            RotationItem::SkillCast {
                skill: 0,
                start_ms: 1_000,
                duration_ms: 400,
                outcome: CastOutcome::Incomplete,
            }
        );
        assert_eq!(
            items[1],
            RotationItem::SkillCast {
                skill: 1,
                start_ms: 1_400,
                duration_ms: 600,
                outcome: CastOutcome::Success,
            }
        );
    }

    #[test]
    fn test_ordering_is_by_start_time_not_close_time() {
        // The swap lands mid-cast; the cast still sorts first because
        // it started earlier, even though it closes later.
        let log = rotation_log(&[
            marker(0),
            cast_start(1_000, 100),
            swap(1_500, 1),
            cast_end(2_000, 100, activation::CANCEL_FIRE),
        ]);
        let items = &extract_rotations(&log)[0].items;

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].start_ms(), 1_000);
        assert!(matches!(items[0], RotationItem::SkillCast { .. }));
        assert_eq!(items[1], RotationItem::WeaponSwap { new_set: 1, time_ms: 1_500 });
    }

    #[test]
    fn test_swap_has_zero_duration_semantics() {
        let log = rotation_log(&[marker(0), swap(3_000, 4)]);
        let items = &extract_rotations(&log)[0].items;
        assert_eq!(items, &vec![RotationItem::WeaponSwap { new_set: 4, time_ms: 3_000 }]);
    }
}
