//! Party composition, espers, counters, and the cheat-adjacent fields.

use serde_json::Value;

use super::{float_value, keys};
use crate::data::GameData;
use crate::document::{json_type, Document, DocumentError, TARGET_KEY};
use crate::models::{Cheats, EsperSet, MiscStats, Party};
use crate::scalar::element_int;

pub(crate) fn load_party(user_data: &Document, party: &mut Party) -> Result<(), DocumentError> {
    let target = user_data.unwrap_target(keys::CORPS_LIST)?;
    let raw = target.as_array().ok_or(DocumentError::TypeMismatch {
        key: keys::CORPS_LIST.to_string(),
        expected: "array",
        actual: json_type(&target),
    })?;
    for (slot, value) in raw.iter().enumerate() {
        let entry = Document::from_value(value, keys::CORPS_LIST)?;
        // An empty corps slot has no characterId at all.
        let character_id = match entry.get_int(keys::CHARACTER_ID) {
            Ok(id) => id,
            Err(DocumentError::KeyNotFound(_)) => 0,
            Err(err) => return Err(err),
        };
        party.set_slot(slot, character_id);
    }
    Ok(())
}

pub(crate) fn store_party(user_data: &mut Document, party: &Party) -> Result<(), DocumentError> {
    let mut envelope = user_data.unwrap(keys::CORPS_LIST)?;
    let target = envelope
        .get(TARGET_KEY)
        .cloned()
        .ok_or_else(|| DocumentError::TargetMissing {
            key: keys::CORPS_LIST.to_string(),
        })?;
    let raw = match target {
        Value::Array(raw) => raw,
        other => {
            return Err(DocumentError::TypeMismatch {
                key: keys::CORPS_LIST.to_string(),
                expected: "array",
                actual: json_type(&other),
            })
        }
    };

    let mut out = Vec::with_capacity(raw.len());
    for (slot, value) in raw.iter().enumerate() {
        let Some(&character_id) = party.slots.get(slot) else {
            out.push(value.clone());
            continue;
        };
        let mut entry = Document::from_value(value, keys::CORPS_LIST)?;
        entry.set(keys::CHARACTER_ID, Value::from(character_id));
        out.push(if matches!(value, Value::String(_)) {
            Value::String(entry.to_json()?)
        } else {
            entry.to_value()
        });
    }
    envelope.set(TARGET_KEY, Value::Array(out));
    user_data.rewrap(keys::CORPS_LIST, &envelope)
}

pub(crate) fn load_espers(
    user_data: &Document,
    data: &GameData,
) -> Result<EsperSet, DocumentError> {
    let target = user_data.unwrap_target(keys::OWNED_MAGIC_STONE_LIST)?;
    let raw = target.as_array().ok_or(DocumentError::TypeMismatch {
        key: keys::OWNED_MAGIC_STONE_LIST.to_string(),
        expected: "array",
        actual: json_type(&target),
    })?;
    let mut espers = EsperSet::default();
    for (i, value) in raw.iter().enumerate() {
        let id = element_int(value, keys::OWNED_MAGIC_STONE_LIST, i)?;
        if data.esper_by_id(id).is_some() {
            espers.unlocked.insert(id);
        }
    }
    Ok(espers)
}

pub(crate) fn store_espers(
    user_data: &mut Document,
    espers: &EsperSet,
) -> Result<(), DocumentError> {
    let ids: Vec<Value> = espers.unlocked.iter().map(|&id| Value::from(id)).collect();
    user_data.set_target(keys::OWNED_MAGIC_STONE_LIST, Value::Array(ids))
}

pub(crate) fn load_misc(user_data: &Document, base: &Document) -> Result<MiscStats, DocumentError> {
    let mut misc = MiscStats {
        gp: user_data.get_int(keys::OWNED_GIL)?,
        steps: user_data.get_int(keys::STEPS)?,
        escape_count: user_data.get_int(keys::ESCAPE_COUNT)?,
        battle_count: user_data.get_int(keys::BATTLE_COUNT)?,
        save_count: user_data.get_int(keys::SAVE_COMPLETE_COUNT)?,
        monsters_killed: user_data.get_int(keys::MONSTERS_KILLED_COUNT)?,
        cursed_shield_fights: 0,
    };
    // Older saves predate the global storage block.
    if base.contains(keys::DATA_STORAGE) {
        let storage = base.unwrap(keys::DATA_STORAGE)?;
        let global = storage.get_array(keys::GLOBAL)?;
        if global.len() <= keys::CURSED_SHIELD_SLOT {
            return Err(DocumentError::ShortArray {
                key: keys::GLOBAL.to_string(),
                len: global.len(),
                need: keys::CURSED_SHIELD_SLOT + 1,
            });
        }
        misc.cursed_shield_fights = element_int(
            &global[keys::CURSED_SHIELD_SLOT],
            keys::GLOBAL,
            keys::CURSED_SHIELD_SLOT,
        )?;
    }
    Ok(misc)
}

pub(crate) fn store_misc(
    user_data: &mut Document,
    base: &mut Document,
    misc: &MiscStats,
) -> Result<(), DocumentError> {
    user_data.set(keys::OWNED_GIL, Value::from(misc.gp));
    user_data.set(keys::STEPS, Value::from(misc.steps));
    user_data.set(keys::ESCAPE_COUNT, Value::from(misc.escape_count));
    user_data.set(keys::BATTLE_COUNT, Value::from(misc.battle_count));
    user_data.set(keys::SAVE_COMPLETE_COUNT, Value::from(misc.save_count));
    user_data.set(keys::MONSTERS_KILLED_COUNT, Value::from(misc.monsters_killed));

    if base.contains(keys::DATA_STORAGE) {
        let mut storage = base.unwrap(keys::DATA_STORAGE)?;
        let mut global = storage.get_array(keys::GLOBAL)?.clone();
        if global.len() <= keys::CURSED_SHIELD_SLOT {
            return Err(DocumentError::ShortArray {
                key: keys::GLOBAL.to_string(),
                len: global.len(),
                need: keys::CURSED_SHIELD_SLOT + 1,
            });
        }
        global[keys::CURSED_SHIELD_SLOT] = Value::from(misc.cursed_shield_fights);
        storage.set(keys::GLOBAL, Value::Array(global));
        base.rewrap(keys::DATA_STORAGE, &storage)?;
    }
    Ok(())
}

pub(crate) fn load_cheats(user_data: &Document, base: &Document) -> Result<Cheats, DocumentError> {
    Ok(Cheats {
        opened_chest_count: user_data.get_int(keys::OPEN_CHEST_COUNT)?,
        is_complete: base.get_flag(keys::IS_COMPLETE_FLAG)?,
        play_time: user_data.get_float(keys::PLAY_TIME)?,
    })
}

pub(crate) fn store_cheats(
    user_data: &mut Document,
    base: &mut Document,
    cheats: &Cheats,
) -> Result<(), DocumentError> {
    user_data.set(keys::OPEN_CHEST_COUNT, Value::from(cheats.opened_chest_count));
    user_data.set(keys::PLAY_TIME, float_value(cheats.play_time));
    base.set(
        keys::IS_COMPLETE_FLAG,
        Value::from(i64::from(cheats.is_complete)),
    );
    Ok(())
}
