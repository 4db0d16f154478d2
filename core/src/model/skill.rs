/// Index into [`crate::model::Log::skills`].
pub type SkillIdx = usize;

/// Skill ids are globally unique within one log, unlike agent
/// instance ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Skill {
    pub id: u32,
    pub name: String,
}

impl Skill {
    /// Placeholder skills carry only the numeric id; they stand in for
    /// ids the skill table never declared.
    pub fn placeholder(id: u32) -> Self {
        Self { id, name: String::new() }
    }

    pub fn is_placeholder(&self) -> bool {
        self.name.is_empty()
    }
}
