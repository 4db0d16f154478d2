use serde::{Deserialize, Serialize};

/// How the builder resolves an event whose instance id has no live
/// agent mapping at that timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackResolution {
    /// Attach to the most recent agent that held the instance id
    /// before despawning.
    #[default]
    LastHolder,
    /// Always synthesize a fresh placeholder agent instead of reusing
    /// a retired holder.
    Placeholder,
}

/// Options threaded into a pipeline run. The core holds no global
/// state; everything configurable arrives through this value.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessingOptions {
    pub fallback_resolution: FallbackResolution,
    /// Skip the rotation extraction stage entirely.
    pub extract_rotations: bool,
}

impl Default for ProcessingOptions {
    fn default() -> Self {
        Self {
            fallback_resolution: FallbackResolution::default(),
            extract_rotations: true,
        }
    }
}
