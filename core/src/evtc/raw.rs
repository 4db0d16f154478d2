//! Fixed-layout EVTC records, decoded but not interpreted.
//!
//! Field values are carried exactly as laid out on the wire; agent and
//! skill ids stay unresolved until the model builder runs.
//!
//! # Layout
//! ```text
//! header (16 bytes):
//!   0x00: b"EVTC" magic
//!   0x04: build date, 8 ASCII digits (yyyymmdd)
//!   0x0C: revision u8
//!   0x0D: boss species id u16
//!   0x0F: zero u8
//! agent table: count u32, then count * 96-byte entries
//! skill table: count u32, then count * 68-byte entries
//! event stream: 64-byte records to end of buffer
//! ```

/// EVTC file header (16 bytes).
#[derive(Debug, Clone)]
pub struct RawHeader {
    /// Addon build date as recorded in the magic, e.g. "20230328".
    pub build_date: String,
    pub revision: u8,
    /// Species id of the encounter's reported boss.
    pub boss_species_id: u16,
}

/// Agent table entry (96 bytes).
#[derive(Debug, Clone)]
pub struct RawAgent {
    pub address: u64,
    pub profession: u32,
    pub is_elite: u32,
    pub toughness: u16,
    pub concentration: u16,
    pub healing: u16,
    pub hitbox_width: u16,
    pub condition: u16,
    pub hitbox_height: u16,
    /// Combined name field. For players this holds character name,
    /// account name and subgroup as NUL-separated parts.
    pub name: [u8; 68],
}

/// Skill table entry (68 bytes).
#[derive(Debug, Clone)]
pub struct RawSkill {
    pub id: i32,
    pub name: String,
}

/// Combat event record (64 bytes, revision 1 layout).
#[derive(Debug, Clone)]
pub struct RawCombatItem {
    pub time: u64,
    pub src_agent: u64,
    pub dst_agent: u64,
    pub value: i32,
    pub buff_dmg: i32,
    pub overstack: u32,
    pub skill_id: u32,
    pub src_instance_id: u16,
    pub dst_instance_id: u16,
    pub src_master_instance_id: u16,
    pub dst_master_instance_id: u16,
    pub iff: u8,
    pub buff: u8,
    pub result: u8,
    pub is_activation: u8,
    pub is_buff_remove: u8,
    pub is_ninety: u8,
    pub is_fifty: u8,
    pub is_moving: u8,
    pub is_statechange: u8,
    pub is_flanking: u8,
    pub is_shields: u8,
    pub is_off_cycle: u8,
}

/// Fully decoded but semantically unresolved log.
#[derive(Debug, Clone)]
pub struct RawLog {
    pub header: RawHeader,
    pub agents: Vec<RawAgent>,
    pub skills: Vec<RawSkill>,
    pub events: Vec<RawCombatItem>,
    /// Well-formed records whose statechange this build does not know.
    pub skipped_records: usize,
}

impl RawHeader {
    pub const SIZE: usize = 16;
}

impl RawAgent {
    pub const SIZE: usize = 96;
}

impl RawSkill {
    pub const SIZE: usize = 68;
}

impl RawCombatItem {
    pub const SIZE: usize = 64;
}
