//! Synthetic EVTC buffer construction for tests.

use crate::evtc::{RawAgent, RawCombatItem, RawHeader, RawSkill};

/// Builder for one 64-byte combat record. Unset fields stay zero.
#[derive(Debug, Clone, Default)]
pub struct TestEvent {
    pub time: u64,
    pub src_agent: u64,
    pub dst_agent: u64,
    pub value: i32,
    pub buff_dmg: i32,
    pub skill_id: u32,
    pub src_instance_id: u16,
    pub dst_instance_id: u16,
    pub src_master_instance_id: u16,
    pub buff: u8,
    pub is_activation: u8,
    pub is_buff_remove: u8,
    pub is_statechange: u8,
}

impl TestEvent {
    pub fn to_bytes(&self) -> [u8; RawCombatItem::SIZE] {
        let mut b = [0u8; RawCombatItem::SIZE];
        b[0..8].copy_from_slice(&self.time.to_le_bytes());
        b[8..16].copy_from_slice(&self.src_agent.to_le_bytes());
        b[16..24].copy_from_slice(&self.dst_agent.to_le_bytes());
        b[24..28].copy_from_slice(&self.value.to_le_bytes());
        b[28..32].copy_from_slice(&self.buff_dmg.to_le_bytes());
        b[36..40].copy_from_slice(&self.skill_id.to_le_bytes());
        b[40..42].copy_from_slice(&self.src_instance_id.to_le_bytes());
        b[42..44].copy_from_slice(&self.dst_instance_id.to_le_bytes());
        b[44..46].copy_from_slice(&self.src_master_instance_id.to_le_bytes());
        b[49] = self.buff;
        b[51] = self.is_activation;
        b[52] = self.is_buff_remove;
        b[56] = self.is_statechange;
        b
    }
}

pub fn header_bytes(revision: u8, boss_species_id: u16) -> Vec<u8> {
    let mut b = Vec::with_capacity(RawHeader::SIZE);
    b.extend_from_slice(b"EVTC20230328");
    b.push(revision);
    b.extend_from_slice(&boss_species_id.to_le_bytes());
    b.push(0);
    b
}

/// A player agent entry; the name field holds the NUL-separated
/// character name, account name and subgroup.
pub fn player_agent_bytes(
    address: u64,
    profession: u32,
    elite_spec: u32,
    character: &str,
    account: &str,
    subgroup: &str,
) -> [u8; RawAgent::SIZE] {
    let mut name = Vec::new();
    name.extend_from_slice(character.as_bytes());
    name.push(0);
    name.extend_from_slice(account.as_bytes());
    name.push(0);
    name.extend_from_slice(subgroup.as_bytes());
    name.push(0);
    agent_bytes(address, profession, elite_spec, &name)
}

/// An NPC agent entry. Species id lives in the low half of the
/// profession field; `is_elite` is all ones.
pub fn npc_agent_bytes(address: u64, species_id: u16, name: &str) -> [u8; RawAgent::SIZE] {
    let mut field = Vec::new();
    field.extend_from_slice(name.as_bytes());
    field.push(0);
    agent_bytes(address, species_id as u32, u32::MAX, &field)
}

fn agent_bytes(address: u64, profession: u32, is_elite: u32, name: &[u8]) -> [u8; RawAgent::SIZE] {
    let mut b = [0u8; RawAgent::SIZE];
    b[0..8].copy_from_slice(&address.to_le_bytes());
    b[8..12].copy_from_slice(&profession.to_le_bytes());
    b[12..16].copy_from_slice(&is_elite.to_le_bytes());
    b[28..28 + name.len()].copy_from_slice(name);
    b
}

pub fn skill_bytes(id: i32, name: &str) -> [u8; RawSkill::SIZE] {
    let mut b = [0u8; RawSkill::SIZE];
    b[0..4].copy_from_slice(&id.to_le_bytes());
    b[4..4 + name.len()].copy_from_slice(name.as_bytes());
    b
}

/// Assemble a complete buffer from header, table entries and records.
pub fn log_bytes(
    header: &[u8],
    agents: &[[u8; RawAgent::SIZE]],
    skills: &[[u8; RawSkill::SIZE]],
    events: &[[u8; RawCombatItem::SIZE]],
) -> Vec<u8> {
    let mut buf = header.to_vec();
    buf.extend_from_slice(&(agents.len() as u32).to_le_bytes());
    for a in agents {
        buf.extend_from_slice(a);
    }
    buf.extend_from_slice(&(skills.len() as u32).to_le_bytes());
    for s in skills {
        buf.extend_from_slice(s);
    }
    for e in events {
        buf.extend_from_slice(e);
    }
    buf
}
