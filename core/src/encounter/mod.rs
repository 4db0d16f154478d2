//! Encounter identification, result determination and phase splitting.

mod identification;
mod phases;
mod results;

use serde::Serialize;

use crate::error::ProcessError;
use crate::model::Log;

pub use identification::{identify, Identification};
pub use phases::{split_phases, Phase};
pub use results::{
    AllCombinedDeterminer, AnyCombinedDeterminer, DeterminerError, RewardDeterminer,
    ResultDeterminer, TargetBelowHealthDeterminer, TargetDeathDeterminer,
};

/// Outcome classification of one fight. Unknown means the determiner
/// could not decide, which is distinct from an observed failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EncounterResult {
    Success,
    Failure,
    Unknown,
}

/// Everything the classification stage derives from a built log.
#[derive(Debug, Clone)]
pub struct Encounter {
    pub name: String,
    pub result: EncounterResult,
    pub phases: Vec<Phase>,
    /// The agent the result determiners were keyed on, when one was
    /// identified.
    pub primary_target: Option<crate::model::AgentIdx>,
}

/// Classify a log: identify the encounter, evaluate its result
/// determiner and split phases. The identification path never fails;
/// an unmatched log degrades to a generic single-phase classification.
pub fn classify(log: &Log) -> Result<Encounter, ProcessError> {
    let identification = identify(log);
    let determiner = results::determiner_for(&identification)?;
    let result = determiner.determine(log);
    let phases = split_phases(log, &identification);

    Ok(Encounter {
        name: identification.name,
        result,
        phases,
        primary_target: identification.primary_target,
    })
}
