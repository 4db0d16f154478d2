//! Combat log processing core: EVTC decoding, model building,
//! encounter classification, statistics aggregation and rotation
//! extraction. Takes byte slices, returns structured results; all
//! file I/O belongs to the caller.

pub mod builder;
pub mod config;
pub mod encounter;
pub mod error;
pub mod evtc;
pub mod game_data;
pub mod model;
pub mod pipeline;
pub mod rotation;
pub mod statistics;

#[cfg(test)]
pub(crate) mod testutil;

pub use builder::LogBuilder;
pub use config::{FallbackResolution, ProcessingOptions};
pub use encounter::{Encounter, EncounterResult, Phase};
pub use error::ProcessError;
pub use evtc::{DecodeError, Decoder, RawLog};
pub use model::{Agent, AgentKind, CastOutcome, Event, EventKind, Log, Skill};
pub use pipeline::{process, process_batch, BatchEntry, ProcessedLog};
pub use rotation::{extract_rotations, PlayerRotation, RotationDocument, RotationItem};
pub use statistics::{calculate_statistics, LogStatistics, PlayerStatistics};
