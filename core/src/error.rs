//! Error types for pipeline runs

use thiserror::Error;

use crate::encounter::DeterminerError;
use crate::evtc::DecodeError;

/// Fatal failure of one log's pipeline run. A batch caller attaches
/// the file identity and keeps processing its remaining logs.
#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("decode failed: {0}")]
    Decode(#[from] DecodeError),

    #[error("log contains no events")]
    EmptyLog,

    #[error("bad determiner configuration: {0}")]
    Determiner(#[from] DeterminerError),

    #[error("cancelled before processing started")]
    Cancelled,
}
