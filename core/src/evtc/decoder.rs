use memchr::memchr;
use tracing::debug;

use super::error::DecodeError;
use super::raw::{RawAgent, RawCombatItem, RawHeader, RawLog, RawSkill};
use crate::game_data::statechange;

#[cfg(test)]
mod tests;

/// Streaming decoder over an in-memory EVTC byte buffer.
///
/// Decodes the header and both lookup tables eagerly, then walks the
/// event stream one fixed-size record at a time. No semantic
/// cross-referencing happens here; ids pass through unresolved.
pub struct Decoder<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Decoder<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    pub fn decode(mut self) -> Result<RawLog, DecodeError> {
        let header = self.decode_header()?;
        let agents = self.decode_agent_table()?;
        let skills = self.decode_skill_table()?;
        let (events, skipped_records) = self.decode_event_stream()?;

        debug!(
            agents = agents.len(),
            skills = skills.len(),
            events = events.len(),
            skipped_records,
            revision = header.revision,
            "decoded EVTC buffer"
        );

        Ok(RawLog {
            header,
            agents,
            skills,
            events,
            skipped_records,
        })
    }

    fn decode_header(&mut self) -> Result<RawHeader, DecodeError> {
        if self.buf.len() < RawHeader::SIZE {
            return Err(DecodeError::TruncatedHeader {
                len: self.buf.len(),
                need: RawHeader::SIZE,
            });
        }

        let magic: [u8; 4] = self.buf[0..4].try_into().unwrap_or_default();
        if &magic != b"EVTC" {
            return Err(DecodeError::BadMagic { found: magic });
        }

        let date = &self.buf[4..12];
        if !date.iter().all(u8::is_ascii_digit) {
            return Err(DecodeError::BadHeader {
                reason: format!("build date is not numeric: {date:02x?}"),
            });
        }
        // Checked numeric ASCII above
        let build_date = String::from_utf8_lossy(date).into_owned();

        let revision = self.buf[12];
        let boss_species_id = u16::from_le_bytes([self.buf[13], self.buf[14]]);
        // Revision bytes we have never seen still decode: every known
        // revision shares the 64-byte record size, and the builder only
        // reads fields present since revision 0.
        if revision > 1 {
            debug!(revision, "decoding log with unrecognized revision");
        }

        self.pos = RawHeader::SIZE;
        Ok(RawHeader {
            build_date,
            revision,
            boss_species_id,
        })
    }

    fn decode_agent_table(&mut self) -> Result<Vec<RawAgent>, DecodeError> {
        let count = self.take_count("agent")?;
        let mut agents = Vec::with_capacity(count);
        for _ in 0..count {
            let entry = self.take_table_entry("agent", count, RawAgent::SIZE)?;
            agents.push(decode_agent(entry));
        }
        Ok(agents)
    }

    fn decode_skill_table(&mut self) -> Result<Vec<RawSkill>, DecodeError> {
        let count = self.take_count("skill")?;
        let mut skills = Vec::with_capacity(count);
        for _ in 0..count {
            let entry = self.take_table_entry("skill", count, RawSkill::SIZE)?;
            skills.push(decode_skill(entry));
        }
        Ok(skills)
    }

    /// Events run to the end of the buffer; there is no count prefix.
    /// A partial trailing record means the producer died mid-write of
    /// a record body, which is fatal; ending exactly on a record
    /// boundary is a normal end of stream.
    fn decode_event_stream(&mut self) -> Result<(Vec<RawCombatItem>, usize), DecodeError> {
        let mut events = Vec::with_capacity(self.remaining() / RawCombatItem::SIZE);
        let mut skipped = 0usize;

        while self.remaining() > 0 {
            if self.remaining() < RawCombatItem::SIZE {
                return Err(DecodeError::TruncatedRecord {
                    offset: self.pos,
                    remaining: self.remaining(),
                    need: RawCombatItem::SIZE,
                });
            }
            let record = &self.buf[self.pos..self.pos + RawCombatItem::SIZE];
            self.pos += RawCombatItem::SIZE;

            let item = decode_combat_item(record);
            if item.is_statechange > statechange::MAX_KNOWN {
                // Newer addon builds add statechanges; the record size
                // is still fixed, so skip rather than abort.
                skipped += 1;
                continue;
            }
            events.push(item);
        }

        Ok((events, skipped))
    }

    fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    fn take_count(&mut self, table: &'static str) -> Result<usize, DecodeError> {
        if self.remaining() < 4 {
            return Err(DecodeError::TruncatedTable {
                table,
                declared: 0,
                remaining: self.remaining(),
                offset: self.pos,
            });
        }
        let bytes = &self.buf[self.pos..self.pos + 4];
        self.pos += 4;
        Ok(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]) as usize)
    }

    fn take_table_entry(
        &mut self,
        table: &'static str,
        declared: usize,
        size: usize,
    ) -> Result<&'a [u8], DecodeError> {
        if self.remaining() < size {
            return Err(DecodeError::TruncatedTable {
                table,
                declared,
                remaining: self.remaining(),
                offset: self.pos,
            });
        }
        let entry = &self.buf[self.pos..self.pos + size];
        self.pos += size;
        Ok(entry)
    }
}

fn decode_agent(b: &[u8]) -> RawAgent {
    let mut name = [0u8; 68];
    name.copy_from_slice(&b[28..96]);
    RawAgent {
        address: u64_at(b, 0),
        profession: u32_at(b, 8),
        is_elite: u32_at(b, 12),
        toughness: u16_at(b, 16),
        concentration: u16_at(b, 18),
        healing: u16_at(b, 20),
        hitbox_width: u16_at(b, 22),
        condition: u16_at(b, 24),
        hitbox_height: u16_at(b, 26),
        name,
    }
}

fn decode_skill(b: &[u8]) -> RawSkill {
    let name_field = &b[4..68];
    let end = memchr(0, name_field).unwrap_or(name_field.len());
    RawSkill {
        id: i32_at(b, 0),
        name: String::from_utf8_lossy(&name_field[..end]).into_owned(),
    }
}

fn decode_combat_item(b: &[u8]) -> RawCombatItem {
    RawCombatItem {
        time: u64_at(b, 0),
        src_agent: u64_at(b, 8),
        dst_agent: u64_at(b, 16),
        value: i32_at(b, 24),
        buff_dmg: i32_at(b, 28),
        overstack: u32_at(b, 32),
        skill_id: u32_at(b, 36),
        src_instance_id: u16_at(b, 40),
        dst_instance_id: u16_at(b, 42),
        src_master_instance_id: u16_at(b, 44),
        dst_master_instance_id: u16_at(b, 46),
        iff: b[48],
        buff: b[49],
        result: b[50],
        is_activation: b[51],
        is_buff_remove: b[52],
        is_ninety: b[53],
        is_fifty: b[54],
        is_moving: b[55],
        is_statechange: b[56],
        is_flanking: b[57],
        is_shields: b[58],
        is_off_cycle: b[59],
    }
}

fn u16_at(b: &[u8], i: usize) -> u16 {
    u16::from_le_bytes([b[i], b[i + 1]])
}

fn u32_at(b: &[u8], i: usize) -> u32 {
    u32::from_le_bytes([b[i], b[i + 1], b[i + 2], b[i + 3]])
}

fn i32_at(b: &[u8], i: usize) -> i32 {
    i32::from_le_bytes([b[i], b[i + 1], b[i + 2], b[i + 3]])
}

fn u64_at(b: &[u8], i: usize) -> u64 {
    u64::from_le_bytes([
        b[i],
        b[i + 1],
        b[i + 2],
        b[i + 3],
        b[i + 4],
        b[i + 5],
        b[i + 6],
        b[i + 7],
    ])
}
