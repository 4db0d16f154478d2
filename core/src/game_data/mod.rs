mod encounters;
mod opcodes;
mod profession;

pub use encounters::{lookup_encounter, EncounterInfo, ResultRule, ENCOUNTER_DATA};
pub use opcodes::*;
pub use profession::{elite_spec_name, profession_icon_url, profession_name};
