//! World position, GPS, veldt encounter flags, and transportation.

use serde_json::Value;

use super::{float_value, keys};
use crate::document::{json_type, Document, DocumentError, TARGET_KEY};
use crate::models::{GpsData, MapData, Position, Transportation, Veldt};

fn load_position(doc: &Document, context: &str) -> Result<Position, DocumentError> {
    let value = doc.get(keys::POSITION).ok_or_else(|| {
        DocumentError::KeyNotFound(format!("{context}.{}", keys::POSITION))
    })?;
    let position = Document::from_value(value, context)?;
    Ok(Position {
        x: position.get_float(keys::X)?,
        y: position.get_float(keys::Y)?,
        z: position.get_float(keys::Z)?,
    })
}

/// Write x/y/z back into the entry's position object, keeping any
/// sibling fields the object carries.
fn store_position(doc: &mut Document, position: &Position, context: &str) -> Result<(), DocumentError> {
    let mut object = match doc.get(keys::POSITION) {
        Some(value) => Document::from_value(value, context)?,
        None => Document::new(),
    };
    object.set(keys::X, float_value(position.x));
    object.set(keys::Y, float_value(position.y));
    object.set(keys::Z, float_value(position.z));
    doc.set(keys::POSITION, object.to_value());
    Ok(())
}

pub(crate) fn load_map(map_data: &Document) -> Result<MapData, DocumentError> {
    let player = map_data.unwrap(keys::PLAYER_ENTITY)?;
    let gps = map_data.unwrap(keys::GPS_DATA)?;
    Ok(MapData {
        map_id: map_data.get_int(keys::MAP_ID)?,
        point_in: map_data.get_int(keys::POINT_IN)?,
        transportation_id: map_data.get_int(keys::TRANSPORTATION_ID)?,
        carrying_hovercraft: map_data.get_flag(keys::CARRYING_HOVER_SHIP)?,
        active_corps_id: map_data.get_int(keys::PLAYABLE_CHARACTER_CORPS_ID)?,
        player: load_position(&player, keys::PLAYER_ENTITY)?,
        player_direction: player.get_int(keys::DIRECTION)?,
        gps: GpsData {
            // Saves made on foot have no transportation here; treat
            // anything unreadable as "none".
            transportation_id: gps.get_int(keys::TRANSPORTATION_ID).unwrap_or(0),
            map_id: gps.get_int(keys::MAP_ID)?,
            area_id: gps.get_int(keys::AREA_ID)?,
            gps_id: gps.get_int(keys::GPS_ID)?,
            width: gps.get_int(keys::WIDTH)?,
            height: gps.get_int(keys::HEIGHT)?,
        },
    })
}

pub(crate) fn store_map(map_data: &mut Document, map: &MapData) -> Result<(), DocumentError> {
    map_data.set(keys::MAP_ID, Value::from(map.map_id));
    map_data.set(keys::POINT_IN, Value::from(map.point_in));
    map_data.set(keys::TRANSPORTATION_ID, Value::from(map.transportation_id));
    // Some saves store this flag as a native bool; keep whichever
    // representation the document came with.
    let hover = match map_data.get(keys::CARRYING_HOVER_SHIP) {
        Some(Value::Bool(_)) => Value::Bool(map.carrying_hovercraft),
        _ => Value::from(i64::from(map.carrying_hovercraft)),
    };
    map_data.set(keys::CARRYING_HOVER_SHIP, hover);
    map_data.set(
        keys::PLAYABLE_CHARACTER_CORPS_ID,
        Value::from(map.active_corps_id),
    );

    let mut player = map_data.unwrap(keys::PLAYER_ENTITY)?;
    store_position(&mut player, &map.player, keys::PLAYER_ENTITY)?;
    player.set(keys::DIRECTION, Value::from(map.player_direction));
    map_data.rewrap(keys::PLAYER_ENTITY, &player)?;

    let mut gps = map_data.unwrap(keys::GPS_DATA)?;
    gps.set(keys::TRANSPORTATION_ID, Value::from(map.gps.transportation_id));
    gps.set(keys::MAP_ID, Value::from(map.gps.map_id));
    gps.set(keys::AREA_ID, Value::from(map.gps.area_id));
    gps.set(keys::GPS_ID, Value::from(map.gps.gps_id));
    gps.set(keys::WIDTH, Value::from(map.gps.width));
    gps.set(keys::HEIGHT, Value::from(map.gps.height));
    map_data.rewrap(keys::GPS_DATA, &gps)
}

pub(crate) fn load_veldt(map_data: &Document) -> Result<Veldt, DocumentError> {
    let flags = map_data.get_array(keys::BEAST_FLAGS)?;
    let mut encounters = Vec::with_capacity(flags.len());
    for (i, value) in flags.iter().enumerate() {
        match value {
            // Exact numeric text: only "1" counts as unlocked.
            Value::Number(n) => encounters.push(n.to_string() == "1"),
            other => {
                return Err(DocumentError::ElementMismatch {
                    context: format!("{}[{i}]", keys::BEAST_FLAGS),
                    expected: "number",
                    actual: json_type(other),
                })
            }
        }
    }
    Ok(Veldt { encounters })
}

pub(crate) fn store_veldt(map_data: &mut Document, veldt: &Veldt) -> Result<(), DocumentError> {
    let flags: Vec<Value> = veldt
        .encounters
        .iter()
        .map(|&unlocked| Value::from(i64::from(unlocked)))
        .collect();
    map_data.set(keys::BEAST_FLAGS, Value::Array(flags));
    Ok(())
}

pub(crate) fn load_transportation(
    user_data: &Document,
) -> Result<Vec<Transportation>, DocumentError> {
    let target = user_data.unwrap_target(keys::OWNED_TRANSPORTATION_LIST)?;
    let raw = target.as_array().ok_or(DocumentError::TypeMismatch {
        key: keys::OWNED_TRANSPORTATION_LIST.to_string(),
        expected: "array",
        actual: json_type(&target),
    })?;

    let mut vehicles = Vec::with_capacity(raw.len());
    for value in raw {
        let entry = Document::from_value(value, keys::OWNED_TRANSPORTATION_LIST)?;
        let mut vehicle = Transportation {
            id: entry.get_int(keys::ID)?,
            map_id: entry.get_int(keys::MAP_ID)?,
            direction: entry.get_int(keys::DIRECTION)?,
            timestamp_ticks: entry.get_uint(keys::TIME_STAMP)?,
            position: load_position(&entry, keys::OWNED_TRANSPORTATION_LIST)?,
            enabled: false,
        };
        vehicle.enabled = vehicle.derive_enabled();
        vehicles.push(vehicle);
    }
    Ok(vehicles)
}

pub(crate) fn store_transportation(
    user_data: &mut Document,
    vehicles: &[Transportation],
) -> Result<(), DocumentError> {
    let mut envelope = user_data.unwrap(keys::OWNED_TRANSPORTATION_LIST)?;
    let target = envelope
        .get(TARGET_KEY)
        .cloned()
        .ok_or_else(|| DocumentError::TargetMissing {
            key: keys::OWNED_TRANSPORTATION_LIST.to_string(),
        })?;
    let raw = match target {
        Value::Array(raw) => raw,
        other => {
            return Err(DocumentError::TypeMismatch {
                key: keys::OWNED_TRANSPORTATION_LIST.to_string(),
                expected: "array",
                actual: json_type(&other),
            })
        }
    };

    let mut out = Vec::with_capacity(raw.len());
    for (value, vehicle) in raw.iter().zip(vehicles) {
        let mut entry = Document::from_value(value, keys::OWNED_TRANSPORTATION_LIST)?;
        entry.set(keys::ID, Value::from(vehicle.id));
        entry.set(keys::MAP_ID, Value::from(vehicle.map_id));
        entry.set(keys::DIRECTION, Value::from(vehicle.direction));
        entry.set(keys::TIME_STAMP, Value::from(vehicle.timestamp_ticks));
        store_position(&mut entry, &vehicle.position, keys::OWNED_TRANSPORTATION_LIST)?;
        out.push(if matches!(value, Value::String(_)) {
            Value::String(entry.to_json()?)
        } else {
            entry.to_value()
        });
    }
    // Entries beyond the edited models pass through untouched.
    out.extend(raw.iter().skip(vehicles.len()).cloned());

    envelope.set(TARGET_KEY, Value::Array(out));
    user_data.rewrap(keys::OWNED_TRANSPORTATION_LIST, &envelope)
}
