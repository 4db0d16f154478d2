//! Error types for EVTC binary decoding

use thiserror::Error;

/// Fatal conditions while decoding the byte stream. Anything listed
/// here aborts the whole decode; recoverable conditions (unknown
/// statechange values) are counted and skipped instead.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("not an EVTC log: bad magic {found:02x?}")]
    BadMagic { found: [u8; 4] },

    #[error("malformed header: {reason}")]
    BadHeader { reason: String },

    #[error("truncated header: {len} bytes, need {need}")]
    TruncatedHeader { len: usize, need: usize },

    #[error(
        "truncated {table} table: {declared} entries declared, \
         {remaining} bytes left at offset {offset}"
    )]
    TruncatedTable {
        table: &'static str,
        declared: usize,
        remaining: usize,
        offset: usize,
    },

    #[error("truncated event record at offset {offset}: {remaining} of {need} bytes")]
    TruncatedRecord {
        offset: usize,
        remaining: usize,
        need: usize,
    },
}
