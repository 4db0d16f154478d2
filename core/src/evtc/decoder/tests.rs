use super::*;
use crate::evtc::{RawCombatItem, RawHeader};
use crate::testutil::{
    header_bytes, log_bytes, npc_agent_bytes, player_agent_bytes, skill_bytes, TestEvent,
};

fn minimal_log() -> Vec<u8> {
    let agents = [
        player_agent_bytes(1000, 1, 27, "Honest Kyle", ":Kyle.1234", "1"),
        npc_agent_bytes(2000, 15438, "Vale Guardian"),
    ];
    let skills = [skill_bytes(9122, "Symbol of Resolution")];
    let events = [
        TestEvent {
            time: 100,
            src_agent: 1000,
            dst_agent: 2000,
            value: 500,
            skill_id: 9122,
            src_instance_id: 1,
            dst_instance_id: 2,
            ..Default::default()
        }
        .to_bytes(),
    ];
    log_bytes(&header_bytes(1, 15438), &agents, &skills, &events)
}

#[test]
fn test_decode_header() {
    let raw = Decoder::new(&minimal_log()).decode().unwrap();
    assert_eq!(raw.header.build_date, "20230328");
    assert_eq!(raw.header.revision, 1);
    assert_eq!(raw.header.boss_species_id, 15438);
}

#[test]
fn test_decode_tables() {
    let raw = Decoder::new(&minimal_log()).decode().unwrap();
    assert_eq!(raw.agents.len(), 2);
    assert_eq!(raw.agents[0].address, 1000);
    assert_eq!(raw.agents[0].profession, 1);
    assert_eq!(raw.agents[0].is_elite, 27);
    assert_eq!(raw.agents[1].address, 2000);
    assert_eq!(raw.agents[1].is_elite, u32::MAX);

    assert_eq!(raw.skills.len(), 1);
    assert_eq!(raw.skills[0].id, 9122);
    assert_eq!(raw.skills[0].name, "Symbol of Resolution");
}

#[test]
fn test_decode_event_fields() {
    let raw = Decoder::new(&minimal_log()).decode().unwrap();
    assert_eq!(raw.events.len(), 1);
    let e = &raw.events[0];
    assert_eq!(e.time, 100);
    assert_eq!(e.src_agent, 1000);
    assert_eq!(e.dst_agent, 2000);
    assert_eq!(e.value, 500);
    assert_eq!(e.skill_id, 9122);
    assert_eq!(e.src_instance_id, 1);
    assert_eq!(e.dst_instance_id, 2);
}

#[test]
fn test_bad_magic_is_fatal() {
    let mut buf = minimal_log();
    buf[0] = b'X';
    let err = Decoder::new(&buf).decode().unwrap_err();
    assert!(matches!(err, DecodeError::BadMagic { .. }));
}

#[test]
fn test_short_header_is_fatal() {
    let buf = minimal_log();
    let err = Decoder::new(&buf[..10]).decode().unwrap_err();
    assert!(matches!(err, DecodeError::TruncatedHeader { len: 10, .. }));
}

#[test]
fn test_non_numeric_build_date_is_fatal() {
    let mut buf = minimal_log();
    buf[5] = b'A';
    let err = Decoder::new(&buf).decode().unwrap_err();
    assert!(matches!(err, DecodeError::BadHeader { .. }));
}

#[test]
fn test_unknown_revision_is_accepted() {
    let mut buf = minimal_log();
    buf[12] = 7;
    let raw = Decoder::new(&buf).decode().unwrap();
    assert_eq!(raw.header.revision, 7);
    assert_eq!(raw.events.len(), 1);
}

#[test]
fn test_agent_table_truncation_is_fatal() {
    let buf = minimal_log();
    // Cut inside the second agent entry.
    let cut = RawHeader::SIZE + 4 + 96 + 40;
    let err = Decoder::new(&buf[..cut]).decode().unwrap_err();
    assert!(matches!(
        err,
        DecodeError::TruncatedTable { table: "agent", declared: 2, .. }
    ));
}

#[test]
fn test_unknown_statechange_is_skipped() {
    let agents = [npc_agent_bytes(2000, 15438, "Vale Guardian")];
    let events = [
        TestEvent { time: 1, src_agent: 2000, is_statechange: 200, ..Default::default() }
            .to_bytes(),
        TestEvent {
            time: 2,
            src_agent: 2000,
            value: 10,
            src_instance_id: 2,
            ..Default::default()
        }
        .to_bytes(),
    ];
    let buf = log_bytes(&header_bytes(1, 15438), &agents, &[], &events);

    let raw = Decoder::new(&buf).decode().unwrap();
    assert_eq!(raw.events.len(), 1);
    assert_eq!(raw.events[0].time, 2);
    assert_eq!(raw.skipped_records, 1);
}

#[test]
fn test_truncated_final_record_is_fatal() {
    let buf = minimal_log();
    let cut = buf.len() - 10;
    let err = Decoder::new(&buf[..cut]).decode().unwrap_err();
    assert!(matches!(
        err,
        DecodeError::TruncatedRecord { remaining, need: RawCombatItem::SIZE, .. }
            if remaining == RawCombatItem::SIZE - 10
    ));
}

#[test]
fn test_truncation_at_record_boundary_is_end_of_stream() {
    let agents = [npc_agent_bytes(2000, 15438, "Vale Guardian")];
    let events = [
        TestEvent { time: 1, src_agent: 2000, value: 5, ..Default::default() }.to_bytes(),
        TestEvent { time: 2, src_agent: 2000, value: 5, ..Default::default() }.to_bytes(),
    ];
    let buf = log_bytes(&header_bytes(1, 15438), &agents, &[], &events);

    let cut = buf.len() - RawCombatItem::SIZE;
    let raw = Decoder::new(&buf[..cut]).decode().unwrap();
    assert_eq!(raw.events.len(), 1);
}

#[test]
fn test_empty_event_stream_is_valid() {
    let agents = [npc_agent_bytes(2000, 15438, "Vale Guardian")];
    let buf = log_bytes(&header_bytes(0, 15438), &agents, &[], &[]);
    let raw = Decoder::new(&buf).decode().unwrap();
    assert!(raw.events.is_empty());
}
