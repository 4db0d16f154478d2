//! End-to-end processing of one log and batches of logs.
//!
//! One pipeline run is fully synchronous: decode, build, classify,
//! aggregate, extract. Batches fan runs out across a rayon pool with
//! cooperative cancellation checked between logs; a log already being
//! processed runs to completion.

use std::sync::atomic::{AtomicBool, Ordering};

use rayon::prelude::*;
use tracing::{debug, info};

use crate::builder::LogBuilder;
use crate::config::ProcessingOptions;
use crate::encounter::{classify, Encounter};
use crate::error::ProcessError;
use crate::evtc::Decoder;
use crate::model::Log;
use crate::rotation::{extract_rotations, PlayerRotation};
use crate::statistics::{calculate_statistics, LogStatistics};

/// Everything one pipeline run produces. Immutable after return.
#[derive(Debug)]
pub struct ProcessedLog {
    pub log: Log,
    pub encounter: Encounter,
    pub statistics: LogStatistics,
    /// Present unless rotation extraction was disabled in the options.
    pub rotations: Option<Vec<PlayerRotation>>,
}

pub fn process(bytes: &[u8], options: &ProcessingOptions) -> Result<ProcessedLog, ProcessError> {
    let raw = Decoder::new(bytes).decode()?;
    debug!(
        agents = raw.agents.len(),
        skills = raw.skills.len(),
        events = raw.events.len(),
        skipped = raw.skipped_records,
        "decoded raw log"
    );

    let log = LogBuilder::new(options).build(raw)?;
    let encounter = classify(&log)?;
    info!(
        encounter = %encounter.name,
        result = ?encounter.result,
        phases = encounter.phases.len(),
        "classified encounter"
    );

    let statistics = calculate_statistics(&log, &encounter);
    let rotations = options.extract_rotations.then(|| extract_rotations(&log));

    Ok(ProcessedLog { log, encounter, statistics, rotations })
}

/// One log in a batch; `name` identifies the log in results and error
/// reports (typically the file name).
pub struct BatchEntry<'a> {
    pub name: String,
    pub bytes: &'a [u8],
}

/// Process many logs in parallel. The cancel flag is checked before
/// each log starts; cancelled entries report [`ProcessError::Cancelled`]
/// instead of being silently dropped, so results stay positionally
/// aligned with the input. A failed log never aborts the batch.
pub fn process_batch(
    entries: &[BatchEntry<'_>],
    options: &ProcessingOptions,
    cancel: &AtomicBool,
) -> Vec<(String, Result<ProcessedLog, ProcessError>)> {
    entries
        .par_iter()
        .map(|entry| {
            let result = if cancel.load(Ordering::Relaxed) {
                Err(ProcessError::Cancelled)
            } else {
                process(entry.bytes, options)
            };
            (entry.name.clone(), result)
        })
        .collect()
}
