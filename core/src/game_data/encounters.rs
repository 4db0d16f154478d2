//! Known raid encounter signatures.
//!
//! Maps boss species ids to display names, phase split thresholds and
//! the rules used to assemble the encounter's result determiner. Logs
//! whose species id is not listed here fall back to a generic
//! single-phase classification built from the primary target's name.

use phf::phf_map;

/// How one sub-signal of an encounter's outcome is read from the log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultRule {
    /// The primary target was recorded as dead.
    TargetDeath,
    /// A reward chest was granted to the recording player.
    Reward,
    /// The primary target's last known health fraction (scaled to
    /// 10000) dropped below this cutoff.
    TargetBelowHealth(u16),
}

#[derive(Debug, Clone, Copy)]
pub struct EncounterInfo {
    pub name: &'static str,
    /// Health fractions (scaled to 10000) at which a new phase begins,
    /// in descending order. Empty means a single full-fight phase.
    pub phase_splits: &'static [u16],
    pub result_rules: &'static [ResultRule],
}

pub static ENCOUNTER_DATA: phf::Map<u16, EncounterInfo> = phf_map! {
    // Spirit Vale
    15438u16 => EncounterInfo {
        name: "Vale Guardian",
        phase_splits: &[6600, 3300],
        result_rules: &[ResultRule::TargetDeath, ResultRule::Reward],
    },
    15429u16 => EncounterInfo {
        name: "Gorseval the Multifarious",
        phase_splits: &[6600, 3300],
        result_rules: &[ResultRule::TargetDeath, ResultRule::Reward],
    },
    15375u16 => EncounterInfo {
        name: "Sabetha the Saboteur",
        phase_splits: &[7500, 5000, 2500],
        result_rules: &[ResultRule::TargetDeath, ResultRule::Reward],
    },
    // Salvation Pass
    16123u16 => EncounterInfo {
        name: "Slothasor",
        phase_splits: &[8000, 6000, 4000, 2000, 1000],
        result_rules: &[ResultRule::TargetDeath, ResultRule::Reward],
    },
    16115u16 => EncounterInfo {
        name: "Matthias Gabrel",
        phase_splits: &[8000, 6000, 4000],
        result_rules: &[ResultRule::TargetDeath, ResultRule::Reward],
    },
    // Stronghold of the Faithful
    16235u16 => EncounterInfo {
        name: "Keep Construct",
        phase_splits: &[6600, 3300],
        result_rules: &[ResultRule::TargetDeath, ResultRule::Reward],
    },
    16246u16 => EncounterInfo {
        name: "Xera",
        // Health is gated at 50% by the mid-fight gliding section.
        phase_splits: &[5000],
        result_rules: &[ResultRule::TargetBelowHealth(100), ResultRule::Reward],
    },
    // Bastion of the Penitent
    17194u16 => EncounterInfo {
        name: "Cairn the Indomitable",
        phase_splits: &[],
        result_rules: &[ResultRule::TargetDeath, ResultRule::Reward],
    },
    17172u16 => EncounterInfo {
        name: "Mursaat Overseer",
        phase_splits: &[],
        result_rules: &[ResultRule::TargetDeath, ResultRule::Reward],
    },
    17188u16 => EncounterInfo {
        name: "Samarog",
        phase_splits: &[6600, 3300],
        result_rules: &[ResultRule::TargetDeath, ResultRule::Reward],
    },
    17154u16 => EncounterInfo {
        name: "Deimos",
        phase_splits: &[7500, 5000, 2500, 1000],
        result_rules: &[ResultRule::TargetBelowHealth(1000), ResultRule::Reward],
    },
    // Hall of Chains
    19767u16 => EncounterInfo {
        name: "Soulless Horror",
        phase_splits: &[6600, 3300],
        result_rules: &[ResultRule::TargetBelowHealth(1000), ResultRule::Reward],
    },
    19450u16 => EncounterInfo {
        name: "Dhuum",
        phase_splits: &[9000, 1000],
        result_rules: &[ResultRule::TargetDeath, ResultRule::Reward],
    },
};

pub fn lookup_encounter(species_id: u16) -> Option<&'static EncounterInfo> {
    ENCOUNTER_DATA.get(&species_id)
}
