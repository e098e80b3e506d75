//! Character slot extraction and write-back.
//!
//! Each entry in the owned-character list is a JSON-encoded string
//! holding one slot document. A slot whose (characterId, jobId) pair
//! is not in the base-offset table is left alone: no model is built
//! for it and its document is written back verbatim.

use std::collections::BTreeSet;
use std::collections::HashMap;

use serde_json::Value;

use super::keys;
use crate::data::{
    AbilityRange, CharacterBase, GameData, BLITZ_JOB_ID, BUSHIDO_JOB_ID, DANCE_CHARACTER_ID,
    LORE_JOB_ID, RAGE_JOB_ID,
};
use crate::document::{json_type, Document, DocumentError, TARGET_KEY};
use crate::models::{Character, Command, CurrentMax, Equipment, Member, Party};
use crate::scalar::coerce_int;

pub(crate) fn load(
    slot_docs: &[Option<Document>],
    data: &GameData,
    party: &mut Party,
) -> Result<Vec<Option<Character>>, DocumentError> {
    let mut out: Vec<Option<Character>> = vec![None; slot_docs.len()];
    for (slot, doc) in slot_docs.iter().enumerate() {
        let Some(doc) = doc else { continue };
        out[slot] = load_one(doc, data, party)?;
    }
    Ok(out)
}

fn load_one(
    doc: &Document,
    data: &GameData,
    party: &mut Party,
) -> Result<Option<Character>, DocumentError> {
    let id = doc.get_int(keys::CORPSE_ID)?;
    let job_id = doc.get_int(keys::JOB_ID)?;
    let Some(base) = data.base_offset(id, job_id) else {
        return Ok(None);
    };

    let name = doc.get_string(keys::NAME)?;
    let enabled = doc.get_bool(keys::IS_ENABLE_CORPS)?;
    party.add_possible(Member {
        character_id: id,
        name: name.clone(),
    });

    let params = doc.unwrap(keys::PARAMETER)?;
    let mut character = Character {
        id,
        job_id,
        name,
        root_name: base.name,
        enabled,
        level: params.get_int(keys::ADDITIONAL_LEVEL)?,
        exp: doc.get_int(keys::CURRENT_EXP)?,
        hp: CurrentMax {
            current: params.get_int(keys::CURRENT_HP)?,
            max: params.get_int(keys::ADDITIONAL_MAX_HP)? + base.hp_base,
        },
        mp: CurrentMax {
            current: params.get_int(keys::CURRENT_MP)?,
            max: params.get_int(keys::ADDITIONAL_MAX_MP)? + base.mp_base,
        },
        vigor: params.get_int(keys::ADDITIONAL_POWER)?,
        stamina: params.get_int(keys::ADDITIONAL_VITALITY)?,
        speed: params.get_int(keys::ADDITIONAL_AGILITY)?,
        magic: params.get_int(keys::ADDITION_MAGIC)?,
        commands: load_commands(doc, data)?,
        equipment: load_equipment(doc)?,
        ..Character::default()
    };
    load_abilities(doc, data, &mut character)?;

    Ok(Some(character))
}

fn load_commands(doc: &Document, data: &GameData) -> Result<Vec<Command>, DocumentError> {
    let envelope = doc.unwrap(keys::COMMAND_LIST)?;
    let ids = envelope.get_int_array(TARGET_KEY)?;
    Ok(ids
        .into_iter()
        .map(|id| Command {
            id,
            name: data.command_name(id),
        })
        .collect())
}

fn load_equipment(doc: &Document) -> Result<Equipment, DocumentError> {
    let mut equipment = Equipment::default();
    let envelope = doc.unwrap(keys::EQUIPMENT_LIST)?;
    let values = match envelope.get(keys::VALUES) {
        None | Some(Value::Null) => return Ok(equipment),
        Some(Value::Array(values)) => values,
        Some(other) => {
            return Err(DocumentError::TypeMismatch {
                key: keys::VALUES.to_string(),
                expected: "array",
                actual: json_type(other),
            })
        }
    };
    for (position, value) in values.iter().take(6).enumerate() {
        let entry = Document::from_value(value, keys::EQUIPMENT_LIST)?;
        equipment.set_slot(position, entry.get_int(keys::CONTENT_ID)?);
    }
    Ok(equipment)
}

/// Category applicability for one character. Dance is keyed by
/// character ID, every other category by job ID.
fn categories<'a>(
    data: &GameData,
    character: &'a Character,
) -> [(bool, AbilityRange, &'a BTreeSet<i64>); 5] {
    [
        (
            character.job_id == BUSHIDO_JOB_ID,
            data.bushido,
            &character.skills.bushido,
        ),
        (
            character.job_id == BLITZ_JOB_ID,
            data.blitz,
            &character.skills.blitz,
        ),
        (
            character.id == DANCE_CHARACTER_ID,
            data.dance,
            &character.skills.dance,
        ),
        (
            character.job_id == LORE_JOB_ID,
            data.lore,
            &character.skills.lore,
        ),
        (
            character.job_id == RAGE_JOB_ID,
            data.rage,
            &character.skills.rage,
        ),
    ]
}

fn load_abilities(
    doc: &Document,
    data: &GameData,
    character: &mut Character,
) -> Result<(), DocumentError> {
    let target = doc.unwrap_target(keys::ABILITY_LIST)?;
    let raw = target.as_array().ok_or(DocumentError::TypeMismatch {
        key: keys::ABILITY_LIST.to_string(),
        expected: "array",
        actual: json_type(&target),
    })?;

    for value in raw {
        let entry = Document::from_value(value, keys::ABILITY_LIST)?;
        // Entries without a usable ability ID are skipped, not errors.
        let Some(id) = entry.get(keys::ABILITY_ID).and_then(coerce_int) else {
            continue;
        };
        let level = entry.get(keys::SKILL_LEVEL).and_then(coerce_int);

        if data.spells.contains(id) {
            if let Some(level) = level {
                character.spells.insert(id, level);
            }
            continue;
        }
        if level != Some(100) {
            continue;
        }
        if character.job_id == BUSHIDO_JOB_ID && data.bushido.contains(id) {
            character.skills.bushido.insert(id);
        } else if character.job_id == BLITZ_JOB_ID && data.blitz.contains(id) {
            character.skills.blitz.insert(id);
        } else if character.id == DANCE_CHARACTER_ID && data.dance.contains(id) {
            character.skills.dance.insert(id);
        } else if character.job_id == LORE_JOB_ID && data.lore.contains(id) {
            character.skills.lore.insert(id);
        } else if character.job_id == RAGE_JOB_ID && data.rage.contains(id) {
            character.skills.rage.insert(id);
        }
    }
    Ok(())
}

pub(crate) fn store(
    slot_docs: &mut [Option<Document>],
    characters: &mut [Option<Character>],
    data: &GameData,
) -> Result<(), DocumentError> {
    for (doc, character) in slot_docs.iter_mut().zip(characters.iter_mut()) {
        let (Some(doc), Some(character)) = (doc.as_mut(), character.as_mut()) else {
            continue;
        };
        let Some(base) = data.base_offset(character.id, character.job_id) else {
            continue;
        };
        character.clamp();
        store_one(doc, character, base, data)?;
    }
    Ok(())
}

fn store_one(
    doc: &mut Document,
    character: &Character,
    base: &CharacterBase,
    data: &GameData,
) -> Result<(), DocumentError> {
    doc.set(keys::NAME, Value::String(character.name.clone()));
    doc.set(keys::IS_ENABLE_CORPS, Value::Bool(character.enabled));
    doc.set(keys::CURRENT_EXP, Value::from(character.exp));

    let mut params = doc.unwrap(keys::PARAMETER)?;
    params.set(keys::ADDITIONAL_LEVEL, Value::from(character.level));
    params.set(keys::CURRENT_HP, Value::from(character.hp.current));
    params.set(
        keys::ADDITIONAL_MAX_HP,
        Value::from(character.hp.max - base.hp_base),
    );
    params.set(keys::CURRENT_MP, Value::from(character.mp.current));
    params.set(
        keys::ADDITIONAL_MAX_MP,
        Value::from(character.mp.max - base.mp_base),
    );
    params.set(keys::ADDITIONAL_POWER, Value::from(character.vigor));
    params.set(keys::ADDITIONAL_VITALITY, Value::from(character.stamina));
    params.set(keys::ADDITIONAL_AGILITY, Value::from(character.speed));
    params.set(keys::ADDITION_MAGIC, Value::from(character.magic));
    doc.rewrap(keys::PARAMETER, &params)?;

    let ids: Vec<Value> = character
        .commands
        .iter()
        .map(|command| Value::from(command.id))
        .collect();
    doc.set_target(keys::COMMAND_LIST, Value::Array(ids))?;

    store_equipment(doc, &character.equipment)?;
    store_abilities(doc, character, data)
}

fn store_equipment(doc: &mut Document, equipment: &Equipment) -> Result<(), DocumentError> {
    let mut envelope = doc.unwrap(keys::EQUIPMENT_LIST)?;
    let positions: Vec<Value> = (1..=6).map(Value::from).collect();
    let mut values = Vec::with_capacity(6);
    for content_id in equipment.slots() {
        let mut entry = Document::new();
        entry.set(keys::CONTENT_ID, Value::from(content_id));
        entry.set(keys::COUNT, Value::from(1));
        values.push(Value::String(entry.to_json()?));
    }
    envelope.set(keys::KEYS, Value::Array(positions));
    envelope.set(keys::VALUES, Value::Array(values));
    doc.rewrap(keys::EQUIPMENT_LIST, &envelope)
}

/// Update one ability entry in place, or append a new entry when the
/// ability was learned in the editor and the list has no row for it.
fn apply_level(
    entries: &mut Vec<(bool, Document)>,
    index: &mut HashMap<i64, usize>,
    id: i64,
    level: i64,
    append: bool,
) {
    if let Some(&i) = index.get(&id) {
        entries[i].1.set(keys::SKILL_LEVEL, Value::from(level));
    } else if append {
        let mut entry = Document::new();
        entry.set(keys::ABILITY_ID, Value::from(id));
        entry.set(keys::SKILL_LEVEL, Value::from(level));
        index.insert(id, entries.len());
        entries.push((true, entry));
    }
}

fn store_abilities(
    doc: &mut Document,
    character: &Character,
    data: &GameData,
) -> Result<(), DocumentError> {
    let mut envelope = doc.unwrap(keys::ABILITY_LIST)?;
    let target = envelope
        .get(TARGET_KEY)
        .cloned()
        .ok_or_else(|| DocumentError::TargetMissing {
            key: keys::ABILITY_LIST.to_string(),
        })?;
    let raw = match target {
        Value::Array(raw) => raw,
        other => {
            return Err(DocumentError::TypeMismatch {
                key: keys::ABILITY_LIST.to_string(),
                expected: "array",
                actual: json_type(&other),
            })
        }
    };

    // (was the entry a JSON-encoded string, parsed entry), in original
    // order so untouched entries keep their position.
    let mut entries: Vec<(bool, Document)> = Vec::with_capacity(raw.len());
    let mut index: HashMap<i64, usize> = HashMap::new();
    for value in &raw {
        let entry = Document::from_value(value, keys::ABILITY_LIST)?;
        if let Some(id) = entry.get(keys::ABILITY_ID).and_then(coerce_int) {
            index.entry(id).or_insert(entries.len());
        }
        entries.push((matches!(value, Value::String(_)), entry));
    }

    for (&id, &level) in &character.spells {
        if data.spells.contains(id) {
            apply_level(&mut entries, &mut index, id, level, level > 0);
        }
    }

    for (applies, range, learned) in categories(data, character) {
        if !applies {
            continue;
        }
        for id in range.from..=range.to {
            let checked = learned.contains(&id);
            let level = if checked { 100 } else { 0 };
            apply_level(&mut entries, &mut index, id, level, checked);
        }
    }

    let mut out = Vec::with_capacity(entries.len());
    for (as_string, entry) in &entries {
        out.push(if *as_string {
            Value::String(entry.to_json()?)
        } else {
            entry.to_value()
        });
    }
    envelope.set(TARGET_KEY, Value::Array(out));
    doc.rewrap(keys::ABILITY_LIST, &envelope)
}
