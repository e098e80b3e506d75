//! In-memory save data model.
//!
//! These are the structs the GUI and scripting layers read and mutate.
//! They are plain data; all knowledge of the on-disk JSON shape lives
//! in the extractors under [`crate::save`].

use std::collections::{BTreeMap, BTreeSet};

use crate::data::EQUIPMENT_DEFAULTS;

/// A current/maximum stat pair (HP, MP).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CurrentMax {
    pub current: i64,
    pub max: i64,
}

/// One battle command slot, mapped through the static command table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Command {
    pub id: i64,
    pub name: Option<&'static str>,
}

/// Equipped content IDs by slot position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Equipment {
    pub weapon_id: i64,
    pub shield_id: i64,
    pub armor_id: i64,
    pub helmet_id: i64,
    pub relic1_id: i64,
    pub relic2_id: i64,
}

impl Default for Equipment {
    fn default() -> Self {
        let [weapon_id, shield_id, armor_id, helmet_id, relic1_id, relic2_id] =
            EQUIPMENT_DEFAULTS;
        Equipment {
            weapon_id,
            shield_id,
            armor_id,
            helmet_id,
            relic1_id,
            relic2_id,
        }
    }
}

impl Equipment {
    /// Slot content IDs in save order: weapon, shield, armor, helmet,
    /// relic1, relic2.
    pub fn slots(&self) -> [i64; 6] {
        [
            self.weapon_id,
            self.shield_id,
            self.armor_id,
            self.helmet_id,
            self.relic1_id,
            self.relic2_id,
        ]
    }

    pub fn set_slot(&mut self, position: usize, content_id: i64) {
        match position {
            0 => self.weapon_id = content_id,
            1 => self.shield_id = content_id,
            2 => self.armor_id = content_id,
            3 => self.helmet_id = content_id,
            4 => self.relic1_id = content_id,
            5 => self.relic2_id = content_id,
            _ => {}
        }
    }
}

/// Learned job skills, one checked-set per category.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SkillBank {
    pub bushido: BTreeSet<i64>,
    pub blitz: BTreeSet<i64>,
    pub dance: BTreeSet<i64>,
    pub lore: BTreeSet<i64>,
    pub rage: BTreeSet<i64>,
}

/// One character slot's editable state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Character {
    pub id: i64,
    pub job_id: i64,
    /// Display name as stored in the save (player-renameable).
    pub name: String,
    /// Canonical name from the base-offset table.
    pub root_name: &'static str,
    pub enabled: bool,
    pub level: i64,
    pub exp: i64,
    pub hp: CurrentMax,
    pub mp: CurrentMax,
    pub vigor: i64,
    pub stamina: i64,
    pub speed: i64,
    pub magic: i64,
    pub commands: Vec<Command>,
    pub equipment: Equipment,
    /// Spell ID -> learned percentage (100 = mastered).
    pub spells: BTreeMap<i64, i64>,
    pub skills: SkillBank,
}

impl Character {
    /// Clamp edited values into the ranges the game tolerates before
    /// they are written back.
    pub fn clamp(&mut self) {
        self.level = self.level.clamp(1, 99);
        self.vigor = self.vigor.clamp(0, 255);
        self.stamina = self.stamina.clamp(0, 255);
        self.speed = self.speed.clamp(0, 255);
        self.magic = self.magic.clamp(0, 255);
        if self.hp.max > 0 {
            self.hp.current = self.hp.current.clamp(1, self.hp.max);
        }
        if self.mp.max > 0 {
            self.mp.current = self.mp.current.clamp(0, self.mp.max);
        }
    }
}

/// One inventory slot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Row {
    pub item_id: i64,
    pub count: i64,
}

/// Fixed-capacity item inventory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inventory {
    rows: Vec<Row>,
}

impl Inventory {
    pub fn new(capacity: usize) -> Self {
        Inventory {
            rows: vec![Row::default(); capacity],
        }
    }

    pub fn capacity(&self) -> usize {
        self.rows.len()
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Clear every slot back to empty.
    pub fn reset(&mut self) {
        self.rows.fill(Row::default());
    }

    /// Populate a slot. Indices past capacity are ignored.
    pub fn set(&mut self, index: usize, row: Row) {
        if let Some(slot) = self.rows.get_mut(index) {
            *slot = row;
        }
    }

    pub fn get(&self, index: usize) -> Option<Row> {
        self.rows.get(index).copied()
    }

    /// Occupied slots in order.
    pub fn occupied(&self) -> impl Iterator<Item = &Row> {
        self.rows.iter().filter(|r| r.item_id != 0)
    }
}

/// A character that can join the party.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    pub character_id: i64,
    pub name: String,
}

/// Active party composition plus the roster of possible members.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Party {
    /// Character ID per corps slot, in slot order.
    pub slots: Vec<i64>,
    pub possible: Vec<Member>,
}

impl Party {
    pub fn clear(&mut self) {
        self.slots.clear();
        self.possible.clear();
    }

    pub fn set_slot(&mut self, slot: usize, character_id: i64) {
        if self.slots.len() <= slot {
            self.slots.resize(slot + 1, 0);
        }
        self.slots[slot] = character_id;
    }

    pub fn add_possible(&mut self, member: Member) {
        if !self
            .possible
            .iter()
            .any(|m| m.character_id == member.character_id)
        {
            self.possible.push(member);
        }
    }
}

/// Owned magicite stones.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EsperSet {
    pub unlocked: BTreeSet<i64>,
}

/// A 3D world position.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// Nested GPS sub-record of the map data.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GpsData {
    pub transportation_id: i64,
    pub map_id: i64,
    pub area_id: i64,
    pub gps_id: i64,
    pub width: i64,
    pub height: i64,
}

/// Player location and map state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MapData {
    pub map_id: i64,
    pub point_in: i64,
    pub transportation_id: i64,
    pub carrying_hovercraft: bool,
    pub active_corps_id: i64,
    pub player: Position,
    pub player_direction: i64,
    pub gps: GpsData,
}

/// One owned vehicle.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Transportation {
    pub id: i64,
    pub map_id: i64,
    pub direction: i64,
    pub timestamp_ticks: u64,
    pub position: Position,
    /// Derived at load time; never stored back to the save.
    pub enabled: bool,
}

impl Transportation {
    /// A vehicle counts as placed in the world only when it has a
    /// timestamp, a map, and a positive x/y position.
    pub fn derive_enabled(&self) -> bool {
        self.timestamp_ticks > 0 && self.map_id > 0 && self.position.x > 0.0 && self.position.y > 0.0
    }
}

/// Veldt encounter unlock flags, one per encounter group.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Veldt {
    pub encounters: Vec<bool>,
}

/// Flat progression counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MiscStats {
    pub gp: i64,
    pub steps: i64,
    pub escape_count: i64,
    pub battle_count: i64,
    pub save_count: i64,
    pub monsters_killed: i64,
    /// Buried at `dataStorage.global[9]`, two string layers deep.
    pub cursed_shield_fights: i64,
}

/// Counters the editor exposes on its cheats page.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Cheats {
    pub opened_chest_count: i64,
    pub is_complete: bool,
    pub play_time: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equipment_defaults() {
        let eq = Equipment::default();
        assert_eq!(eq.slots(), [93, 93, 199, 198, 200, 200]);
    }

    #[test]
    fn test_character_clamp() {
        let mut c = Character {
            level: 150,
            vigor: 300,
            stamina: -5,
            hp: CurrentMax { current: 0, max: 100 },
            mp: CurrentMax { current: 90, max: 40 },
            ..Character::default()
        };
        c.clamp();
        assert_eq!(c.level, 99);
        assert_eq!(c.vigor, 255);
        assert_eq!(c.stamina, 0);
        assert_eq!(c.hp.current, 1);
        assert_eq!(c.mp.current, 40);

        let mut c = Character {
            level: 0,
            hp: CurrentMax { current: 500, max: 100 },
            ..Character::default()
        };
        c.clamp();
        assert_eq!(c.level, 1);
        assert_eq!(c.hp.current, 100);
    }

    #[test]
    fn test_inventory_bounds() {
        let mut inv = Inventory::new(4);
        inv.set(0, Row { item_id: 2, count: 5 });
        inv.set(10, Row { item_id: 9, count: 1 });

        assert_eq!(inv.get(0), Some(Row { item_id: 2, count: 5 }));
        assert_eq!(inv.occupied().count(), 1);

        inv.reset();
        assert_eq!(inv.occupied().count(), 0);
        assert_eq!(inv.capacity(), 4);
    }

    #[test]
    fn test_transportation_enabled_boundaries() {
        let base = Transportation {
            id: 1,
            map_id: 10,
            direction: 0,
            timestamp_ticks: 100,
            position: Position { x: 50.0, y: 60.0, z: 0.0 },
            enabled: false,
        };
        assert!(base.derive_enabled());

        let mut t = base.clone();
        t.timestamp_ticks = 0;
        assert!(!t.derive_enabled());

        let mut t = base.clone();
        t.map_id = 0;
        assert!(!t.derive_enabled());

        let mut t = base.clone();
        t.position.x = 0.0;
        assert!(!t.derive_enabled());

        let mut t = base;
        t.position.y = 0.0;
        assert!(!t.derive_enabled());
    }

    #[test]
    fn test_party_dedupes_possible_members() {
        let mut party = Party::default();
        party.add_possible(Member { character_id: 1, name: "Terra".into() });
        party.add_possible(Member { character_id: 1, name: "Tina".into() });
        party.set_slot(2, 1);

        assert_eq!(party.possible.len(), 1);
        assert_eq!(party.slots, [0, 0, 1]);
    }
}
