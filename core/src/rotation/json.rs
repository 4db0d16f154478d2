//! Rotation comparison document.
//!
//! The field names and numeric codes below are a compatibility
//! contract with the external rotation renderer and must not change:
//! item `Type` 1 is a skill cast, 2 a weapon swap; `CastType` 1/2/3
//! map to success/cancel/reset and 0 marks an incomplete cast.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::model::{CastOutcome, Log};
use crate::rotation::{PlayerRotation, RotationItem};

const TYPE_SKILL_CAST: u8 = 1;
const TYPE_WEAPON_SWAP: u8 = 2;

const FALLBACK_SKILL_ICON: &str = "https://wiki.guildwars2.com/images/7/74/Skill.png";

#[derive(Debug, Serialize)]
pub struct RotationDocument {
    #[serde(rename = "Rotations")]
    pub rotations: Vec<RotationEntry>,
    #[serde(rename = "SkillData")]
    pub skill_data: BTreeMap<u32, SkillInfo>,
}

#[derive(Debug, Serialize)]
pub struct RotationEntry {
    #[serde(rename = "PlayerData")]
    pub player_data: PlayerData,
    #[serde(rename = "Items")]
    pub items: Vec<RotationItemData>,
}

#[derive(Debug, Serialize)]
pub struct PlayerData {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "IconUrl")]
    pub icon_url: String,
    #[serde(rename = "LogName")]
    pub log_name: String,
    #[serde(rename = "EncounterName")]
    pub encounter_name: String,
}

#[derive(Debug, Serialize)]
pub struct RotationItemData {
    #[serde(rename = "Type")]
    pub item_type: u8,
    #[serde(rename = "Time")]
    pub time: u64,
    #[serde(rename = "Duration")]
    pub duration: u64,
    #[serde(rename = "CastType", skip_serializing_if = "Option::is_none")]
    pub cast_type: Option<u8>,
    #[serde(rename = "SkillId", skip_serializing_if = "Option::is_none")]
    pub skill_id: Option<u32>,
    #[serde(rename = "NewWeaponSet", skip_serializing_if = "Option::is_none")]
    pub new_weapon_set: Option<u8>,
}

#[derive(Debug, Serialize)]
pub struct SkillInfo {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "IconUrl")]
    pub icon_url: String,
}

fn cast_type_code(outcome: CastOutcome) -> u8 {
    match outcome {
        CastOutcome::Success => 1,
        CastOutcome::Cancel => 2,
        CastOutcome::Reset => 3,
        CastOutcome::Incomplete => 0,
    }
}

impl RotationDocument {
    /// Assemble the renderer document for one processed log. Skill
    /// data covers exactly the skills the rotations reference.
    pub fn build(
        log: &Log,
        rotations: &[PlayerRotation],
        log_name: &str,
        encounter_name: &str,
    ) -> Self {
        let mut skill_data = BTreeMap::new();
        let entries = rotations
            .iter()
            .map(|rotation| RotationEntry {
                player_data: PlayerData {
                    name: rotation.name.clone(),
                    icon_url: rotation.icon_url.to_string(),
                    log_name: log_name.to_string(),
                    encounter_name: encounter_name.to_string(),
                },
                items: rotation
                    .items
                    .iter()
                    .map(|item| match *item {
                        RotationItem::SkillCast { skill, start_ms, duration_ms, outcome } => {
                            let skill = log.skill(skill);
                            skill_data.entry(skill.id).or_insert_with(|| SkillInfo {
                                name: skill.name.clone(),
                                icon_url: FALLBACK_SKILL_ICON.to_string(),
                            });
                            RotationItemData {
                                item_type: TYPE_SKILL_CAST,
                                time: start_ms,
                                duration: duration_ms,
                                cast_type: Some(cast_type_code(outcome)),
                                skill_id: Some(skill.id),
                                new_weapon_set: None,
                            }
                        }
                        RotationItem::WeaponSwap { new_set, time_ms } => RotationItemData {
                            item_type: TYPE_WEAPON_SWAP,
                            time: time_ms,
                            duration: 0,
                            cast_type: None,
                            skill_id: None,
                            new_weapon_set: Some(new_set),
                        },
                    })
                    .collect(),
            })
            .collect();

        RotationDocument { rotations: entries, skill_data }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CastOutcome;
    use serde_json::json;

    fn sample_log() -> Log {
        use crate::builder::LogBuilder;
        use crate::config::ProcessingOptions;
        use crate::evtc::Decoder;
        use crate::testutil::{header_bytes, log_bytes, player_agent_bytes, skill_bytes, TestEvent};

        let agents = [player_agent_bytes(1000, 1, 62, "Honest Kyle", ":Kyle.1234", "1")];
        let skills = [skill_bytes(100, "Mantra of Solace")];
        let events = [TestEvent {
            time: 0,
            src_agent: 1000,
            src_instance_id: 1,
            skill_id: 100,
            ..Default::default()
        }
        .to_bytes()];
        let buf = log_bytes(&header_bytes(1, 15438), &agents, &skills, &events);
        let raw = Decoder::new(&buf).decode().unwrap();
        LogBuilder::new(&ProcessingOptions::default()).build(raw).unwrap()
    }

    #[test]
    fn test_document_shape_is_stable() {
        let log = sample_log();
        let rotations = vec![PlayerRotation {
            agent: 0,
            name: "Honest Kyle".to_string(),
            account: "Kyle.1234".to_string(),
            icon_url: "https://wiki.guildwars2.com/images/0/02/Firebrand_tango_icon_20px.png",
            items: vec![
                RotationItem::SkillCast {
                    skill: 0,
                    start_ms: 1_000,
                    duration_ms: 800,
                    outcome: CastOutcome::Success,
                },
                RotationItem::WeaponSwap { new_set: 1, time_ms: 2_000 },
            ],
        }];

        let doc = RotationDocument::build(&log, &rotations, "20230611-203000", "Vale Guardian");
        let value = serde_json::to_value(&doc).unwrap();

        assert_eq!(
            value,
            json!({
                "Rotations": [{
                    "PlayerData": {
                        "Name": "Honest Kyle",
                        "IconUrl":
                            "https://wiki.guildwars2.com/images/0/02/Firebrand_tango_icon_20px.png",
                        "LogName": "20230611-203000",
                        "EncounterName": "Vale Guardian",
                    },
                    "Items": [
                        {
                            "Type": 1,
                            "Time": 1000,
                            "Duration": 800,
                            "CastType": 1,
                            "SkillId": 100,
                        },
                        {
                            "Type": 2,
                            "Time": 2000,
                            "Duration": 0,
                            "NewWeaponSet": 1,
                        },
                    ],
                }],
                "SkillData": {
                    "100": { "Name": "Mantra of Solace", "IconUrl": super::FALLBACK_SKILL_ICON },
                },
            })
        );
    }

    #[test]
    fn test_cast_type_codes() {
        assert_eq!(cast_type_code(CastOutcome::Success), 1);
        assert_eq!(cast_type_code(CastOutcome::Cancel), 2);
        assert_eq!(cast_type_code(CastOutcome::Reset), 3);
        assert_eq!(cast_type_code(CastOutcome::Incomplete), 0);
    }
}
