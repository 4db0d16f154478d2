mod agent;
mod event;
mod log;
mod skill;

pub use agent::{Agent, AgentIdx, AgentKind};
pub use event::{BuffRemoval, CastOutcome, Event, EventKind};
pub use log::{Log, LogMetadata};
pub use skill::{Skill, SkillIdx};
