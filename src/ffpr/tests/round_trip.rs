//! End-to-end load/edit/save coverage over a synthetic save file.

use anyhow::Result;
use serde_json::{json, Value};

use ffpr::{transport, GameData, PrCipher, PrSave, Row, SaveFormat};

/// JSON-encode a value into a string field, the way the format nests
/// sub-structures.
fn wrap(value: Value) -> Value {
    Value::String(value.to_string())
}

fn equipment_entry(content_id: i64) -> Value {
    wrap(json!({"contentId": content_id, "count": 1}))
}

fn character_slot(character_id: i64, job_id: i64, name: &str) -> Value {
    wrap(json!({
        "corpseId": character_id,
        "jobId": job_id,
        "name": name,
        "isEnableCorps": true,
        "currentExp": 44_556,
        "parameter": wrap(json!({
            "additionalLevel": 12,
            "currentHp": 210,
            "additionalMaxHp": 300,
            "currentMp": 48,
            "additionalMaxMp": 90,
            "additionalPower": 31,
            "additionalVitality": 28,
            "additionalAgility": 33,
            "additionMagic": 39,
            "viewType": 1
        })),
        "commandList": wrap(json!({"target": [10, 12, 11, 13]})),
        "equipmentList": wrap(json!({
            "keys": [1, 2, 3, 4, 5, 6],
            "values": [
                equipment_entry(15),
                equipment_entry(93),
                equipment_entry(199),
                equipment_entry(198),
                equipment_entry(219),
                equipment_entry(200)
            ]
        })),
        "abilityList": wrap(json!({
            "target": [wrap(json!({"abilityId": 3, "skillLevel": 100}))]
        })),
        "statusId": 0
    }))
}

fn save_plaintext() -> Vec<u8> {
    let user_data = wrap(json!({
        "ownedCharacterList": wrap(json!({
            "target": [character_slot(1, 2, "Tina"), character_slot(6, 6, "Mash")]
        })),
        "corpsList": wrap(json!({
            "target": [
                wrap(json!({"characterId": 1, "isAlive": true})),
                wrap(json!({"characterId": 6})),
                wrap(json!({}))
            ]
        })),
        "ownedMagicStoneList": wrap(json!({"target": [1, 24]})),
        "normalOwnedItemList": wrap(json!({
            "target": [wrap(json!({"contentId": 23, "count": 4}))]
        })),
        "importantOwendItemList": wrap(json!({"target": []})),
        "ownedTransportationList": wrap(json!({
            "target": [wrap(json!({
                "id": 1,
                "mapId": 1,
                "direction": 2,
                "timeStamp": 637_500_000_000_000_000u64,
                "position": {"x": 104.0, "y": 88.0, "z": 0.0}
            }))]
        })),
        "owendGil": 128_890,
        "Steps": 24_881,
        "escapeCount": 4,
        "battleCount": 311,
        "saveCompleteCount": 17,
        "monstersKilledCount": 902,
        "openChestCount": 55,
        "playTime": 54_612.75
    }));

    let map_data = wrap(json!({
        "mapId": 30,
        "pointIn": 1,
        "transportationId": 0,
        "carryingHoverShip": 0,
        "playableCharacterCorpsId": 5,
        "playerEntity": wrap(json!({
            "position": {"x": 128.5, "y": -3.0, "z": 60.25},
            "direction": 4,
            "moveSpeed": 1.0
        })),
        "gpsData": wrap(json!({
            "transportationId": 0,
            "mapId": 30,
            "areaId": 2,
            "gpsId": 7,
            "width": 256,
            "height": 192
        })),
        "beastFieldEncountExchangeFlags": [1, 0, 1, 0]
    }));

    json!({
        "id": 1,
        "pictureData": "iVBORw0KGgo=",
        "userData": user_data,
        "mapData": map_data,
        "dataStorage": wrap(json!({
            "global": [0, 0, 0, 0, 0, 0, 0, 0, 0, 180],
            "scenario": [1]
        })),
        "isCompleteFlag": 0,
        "clearFlag": 0
    })
    .to_string()
    .into_bytes()
}

#[test]
fn test_load_extracts_every_section() -> Result<()> {
    let cipher = PrCipher::new();
    let data = GameData::builtin();
    let raw = transport::encode(&save_plaintext(), None, SaveFormat::Pc, &cipher)?;

    let dir = tempfile::tempdir()?;
    let path = dir.path().join("saveslot1");
    std::fs::write(&path, &raw)?;

    let save = PrSave::load(&path, SaveFormat::Pc, &cipher, data)?;

    let terra = save.character(0).expect("slot 0");
    assert_eq!(terra.root_name, "Terra");
    assert_eq!(terra.name, "Tina");
    assert_eq!(terra.level, 12);
    assert_eq!(terra.hp.max, 340);
    assert_eq!(terra.spells.get(&3), Some(&100));
    let sabin = save.character_by_root_name("Sabin").expect("Sabin");
    assert_eq!(sabin.name, "Mash");

    assert_eq!(save.party.slots, vec![1, 6, 0]);
    assert_eq!(save.party.possible.len(), 2);
    assert!(save.espers.unlocked.contains(&24));
    assert_eq!(save.misc.gp, 128_890);
    assert_eq!(save.misc.cursed_shield_fights, 180);
    assert_eq!(save.inventory.get(0), Some(Row { item_id: 23, count: 4 }));
    assert_eq!(save.key_items.occupied().count(), 0);
    assert_eq!(save.veldt.encounters, vec![true, false, true, false]);
    assert_eq!(save.cheats.opened_chest_count, 55);
    assert_eq!(save.map.map_id, 30);
    assert_eq!(save.map.player.x, 128.5);
    assert!(save.transportation[0].enabled);
    Ok(())
}

#[test]
fn test_edit_save_reload_cycle() -> Result<()> {
    let cipher = PrCipher::new();
    let data = GameData::builtin();
    let raw = transport::encode(&save_plaintext(), None, SaveFormat::Pc, &cipher)?;

    let dir = tempfile::tempdir()?;
    let path = dir.path().join("saveslot1");
    std::fs::write(&path, &raw)?;

    let mut save = PrSave::load(&path, SaveFormat::Pc, &cipher, data)?;
    save.misc.gp = 999_999;
    save.cheats.is_complete = true;
    save.espers.unlocked.insert(7);
    save.inventory.set(1, Row { item_id: 91, count: 9 });
    save.veldt.encounters[1] = true;
    save.party.set_slot(0, 6);
    save.transportation[0].map_id = 3;
    save.map.player.x = 40.0;
    {
        let terra = save.character_mut(0).unwrap();
        terra.level = 200;
        terra.equipment.weapon_id = 101;
        terra.skills.bushido.insert(55);
    }
    {
        let sabin = save.character_mut(1).unwrap();
        sabin.skills.blitz.insert(63);
    }
    save.save(&path, &cipher, data)?;

    let reread = PrSave::load(&path, SaveFormat::Pc, &cipher, data)?;
    assert_eq!(reread.misc.gp, 999_999);
    assert!(reread.cheats.is_complete);
    assert!(reread.espers.unlocked.contains(&7));
    assert_eq!(reread.inventory.get(1), Some(Row { item_id: 91, count: 9 }));
    assert_eq!(reread.veldt.encounters[1], true);
    assert_eq!(reread.party.slots[0], 6);
    assert_eq!(reread.transportation[0].map_id, 3);
    assert_eq!(reread.map.player.x, 40.0);

    let terra = reread.character(0).unwrap();
    // Out-of-range edits are clamped on store.
    assert_eq!(terra.level, 99);
    assert_eq!(terra.equipment.weapon_id, 101);
    // Bushido belongs to Cyan's job; the edit must not stick to Terra.
    assert!(terra.skills.bushido.is_empty());
    assert!(reread.character(1).unwrap().skills.blitz.contains(&63));
    Ok(())
}

#[test]
fn test_unknown_fields_survive_round_trip() -> Result<()> {
    let cipher = PrCipher::new();
    let data = GameData::builtin();
    let raw = transport::encode(&save_plaintext(), None, SaveFormat::Pc, &cipher)?;

    let mut save = PrSave::from_bytes(&raw, SaveFormat::Pc, &cipher, data)?;
    save.misc.gp = 1;
    let rewritten = save.to_bytes(&cipher, data)?;

    let (plaintext, _) = transport::decode(&rewritten, SaveFormat::Pc, &cipher)?;
    let root: Value = serde_json::from_slice(&plaintext)?;
    assert_eq!(root["pictureData"], json!("iVBORw0KGgo="));
    assert_eq!(root["clearFlag"], json!(0));

    let storage: Value = serde_json::from_str(root["dataStorage"].as_str().unwrap())?;
    assert_eq!(storage["scenario"], json!([1]));

    // Key order of the root object is untouched.
    let keys: Vec<&String> = root.as_object().unwrap().keys().collect();
    assert_eq!(keys[0], "id");
    assert_eq!(keys[1], "pictureData");
    Ok(())
}

#[test]
fn test_console_format_stays_plain_json() -> Result<()> {
    let cipher = PrCipher::new();
    let data = GameData::builtin();
    let plaintext = save_plaintext();

    let mut save = PrSave::from_bytes(&plaintext, SaveFormat::Console, &cipher, data)?;
    assert_eq!(save.misc.gp, 128_890);

    let rewritten = save.to_bytes(&cipher, data)?;
    assert_eq!(rewritten.first(), Some(&b'{'));
    Ok(())
}

#[test]
fn test_bom_prefix_is_preserved() -> Result<()> {
    let cipher = PrCipher::new();
    let data = GameData::builtin();
    let encoded = transport::encode(&save_plaintext(), None, SaveFormat::Pc, &cipher)?;

    let mut with_bom = vec![0xEF, 0xBB, 0xBF];
    with_bom.extend_from_slice(&encoded);

    let mut save = PrSave::from_bytes(&with_bom, SaveFormat::Pc, &cipher, data)?;
    let rewritten = save.to_bytes(&cipher, data)?;
    assert!(rewritten.starts_with(&[0xEF, 0xBB, 0xBF]));
    Ok(())
}
