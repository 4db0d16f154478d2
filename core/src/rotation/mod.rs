//! Rotation extraction and the renderer-facing JSON document.

mod items;
mod json;

pub use items::{extract_rotations, PlayerRotation, RotationItem};
pub use json::{RotationDocument, RotationEntry, RotationItemData, SkillInfo};
