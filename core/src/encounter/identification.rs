use tracing::debug;

use crate::game_data::{lookup_encounter, EncounterInfo};
use crate::model::{AgentIdx, Log};

/// Result of matching a log against the known encounter signatures.
#[derive(Debug, Clone)]
pub struct Identification {
    pub name: String,
    /// Present when a known signature matched.
    pub info: Option<&'static EncounterInfo>,
    pub primary_target: Option<AgentIdx>,
}

/// Identify which encounter a log represents. Matches the header's
/// boss species id, then the set of NPC species present, against the
/// signature registry; falls back to naming the log after its primary
/// target. This path only ever degrades, it does not fail.
pub fn identify(log: &Log) -> Identification {
    let header_species = log.metadata.boss_species_id;

    if let Some(info) = lookup_encounter(header_species) {
        return Identification {
            name: info.name.to_string(),
            info: Some(info),
            primary_target: find_species(log, header_species),
        };
    }

    // Header species unknown; some logs record a minor npc there.
    // Look for any present species with a registered signature.
    for (idx, agent) in log.agents.iter().enumerate() {
        if let Some(species) = agent.species_id()
            && let Some(info) = lookup_encounter(species)
        {
            debug!(species, "identified encounter from agent table");
            return Identification {
                name: info.name.to_string(),
                info: Some(info),
                primary_target: Some(idx),
            };
        }
    }

    let primary_target = find_species(log, header_species)
        .or_else(|| log.agents.iter().position(|a| a.species_id().is_some()));
    let name = primary_target
        .map(|idx| log.agent(idx).name.clone())
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| "Unknown encounter".to_string());

    Identification { name, info: None, primary_target }
}

fn find_species(log: &Log, species_id: u16) -> Option<AgentIdx> {
    log.agents.iter().position(|a| a.species_id() == Some(species_id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::LogBuilder;
    use crate::config::ProcessingOptions;
    use crate::evtc::Decoder;
    use crate::testutil::{header_bytes, log_bytes, npc_agent_bytes, TestEvent};

    fn boss_log(header_species: u16, present_species: u16, boss_name: &str) -> Log {
        let agents = [npc_agent_bytes(2000, present_species, boss_name)];
        let events = [
            TestEvent {
                time: 0,
                src_agent: 2000,
                src_instance_id: 2,
                value: 100,
                ..Default::default()
            }
            .to_bytes(),
        ];
        let buf = log_bytes(&header_bytes(1, header_species), &agents, &[], &events);
        let raw = Decoder::new(&buf).decode().unwrap();
        LogBuilder::new(&ProcessingOptions::default()).build(raw).unwrap()
    }

    #[test]
    fn test_known_signature_matches_header_species() {
        let id = identify(&boss_log(15438, 15438, "Vale Guardian"));
        assert_eq!(id.name, "Vale Guardian");
        assert!(id.info.is_some());
        assert_eq!(id.primary_target, Some(0));
    }

    #[test]
    fn test_signature_from_agent_table_when_header_unhelpful() {
        let id = identify(&boss_log(1, 19450, "Dhuum"));
        assert_eq!(id.name, "Dhuum");
        assert!(id.info.is_some());
    }

    #[test]
    fn test_fallback_uses_primary_target_name() {
        let id = identify(&boss_log(60000, 60000, "Ancient Forgeman"));
        assert_eq!(id.name, "Ancient Forgeman");
        assert!(id.info.is_none());
        assert_eq!(id.primary_target, Some(0));
    }
}
