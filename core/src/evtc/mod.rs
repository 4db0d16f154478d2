mod decoder;
mod error;
mod raw;

pub use decoder::Decoder;
pub use error::DecodeError;
pub use raw::{RawAgent, RawCombatItem, RawHeader, RawLog, RawSkill};
