//! Static game data tables.
//!
//! Base offsets, command names, esper IDs, and ability ID ranges are
//! fixed game data, not save state. They are exposed through a single
//! read-only [`GameData`] handle that the extractors receive as a
//! parameter, so tests can inject a cut-down table set and nothing in
//! the codec depends on global mutable state.

use phf::phf_map;

/// Number of character slots a save file carries.
pub const CHARACTER_SLOTS: usize = 40;

/// Capacity of the normal item inventory.
pub const INVENTORY_CAPACITY: usize = 256;

/// Capacity of the important (key item) inventory.
pub const KEY_ITEM_CAPACITY: usize = 64;

/// Equipment content IDs a slot falls back to when the save carries no
/// entry for it: weapon, shield, armor, helmet, relic1, relic2.
pub const EQUIPMENT_DEFAULTS: [i64; 6] = [93, 93, 199, 198, 200, 200];

/// Base HP/MP offsets and canonical name for one (character, job) pair.
///
/// The save stores max HP/MP as an *additional* value on top of these
/// bases; an identity pair absent from this table is treated as an
/// empty slot, not an error.
#[derive(Debug, Clone, PartialEq)]
pub struct CharacterBase {
    pub character_id: i64,
    pub job_id: i64,
    pub name: &'static str,
    pub hp_base: i64,
    pub mp_base: i64,
}

const CHARACTER_BASES: &[CharacterBase] = &[
    CharacterBase { character_id: 1, job_id: 2, name: "Terra", hp_base: 40, mp_base: 16 },
    CharacterBase { character_id: 2, job_id: 5, name: "Locke", hp_base: 48, mp_base: 7 },
    CharacterBase { character_id: 3, job_id: 3, name: "Cyan", hp_base: 53, mp_base: 5 },
    CharacterBase { character_id: 4, job_id: 7, name: "Shadow", hp_base: 51, mp_base: 8 },
    CharacterBase { character_id: 5, job_id: 4, name: "Edgar", hp_base: 49, mp_base: 6 },
    CharacterBase { character_id: 6, job_id: 6, name: "Sabin", hp_base: 58, mp_base: 4 },
    CharacterBase { character_id: 7, job_id: 1, name: "Celes", hp_base: 44, mp_base: 14 },
    CharacterBase { character_id: 8, job_id: 8, name: "Strago", hp_base: 39, mp_base: 12 },
    CharacterBase { character_id: 9, job_id: 9, name: "Relm", hp_base: 36, mp_base: 13 },
    CharacterBase { character_id: 10, job_id: 10, name: "Setzer", hp_base: 46, mp_base: 6 },
    CharacterBase { character_id: 16, job_id: 11, name: "Mog", hp_base: 39, mp_base: 10 },
    CharacterBase { character_id: 11, job_id: 12, name: "Gau", hp_base: 53, mp_base: 10 },
    CharacterBase { character_id: 12, job_id: 13, name: "Gogo", hp_base: 46, mp_base: 8 },
    CharacterBase { character_id: 13, job_id: 14, name: "Umaro", hp_base: 60, mp_base: 0 },
    CharacterBase { character_id: 17, job_id: 15, name: "Banon", hp_base: 42, mp_base: 10 },
    CharacterBase { character_id: 18, job_id: 16, name: "Leo", hp_base: 52, mp_base: 12 },
    CharacterBase { character_id: 19, job_id: 17, name: "Biggs", hp_base: 45, mp_base: 4 },
    CharacterBase { character_id: 20, job_id: 17, name: "Wedge", hp_base: 45, mp_base: 4 },
];

/// Battle command IDs as they appear in `commandList`.
static COMMAND_NAMES: phf::Map<u32, &'static str> = phf_map! {
    10u32 => "Attack",
    11u32 => "Item",
    12u32 => "Magic",
    13u32 => "Defend",
    14u32 => "Row",
    15u32 => "Steal",
    16u32 => "Bushido",
    17u32 => "Throw",
    18u32 => "Tools",
    19u32 => "Blitz",
    20u32 => "Runic",
    21u32 => "Lore",
    22u32 => "Sketch",
    23u32 => "Control",
    24u32 => "Slot",
    25u32 => "Rage",
    26u32 => "Leap",
    27u32 => "Mimic",
    28u32 => "Dance",
    29u32 => "Jump",
    30u32 => "Morph",
    31u32 => "Shock",
    32u32 => "Possess",
    33u32 => "Health",
    34u32 => "GP Rain",
};

/// A magicite stone the player can own.
#[derive(Debug, Clone, PartialEq)]
pub struct Esper {
    pub id: i64,
    pub name: &'static str,
}

const ESPERS: &[Esper] = &[
    Esper { id: 1, name: "Ramuh" },
    Esper { id: 2, name: "Kirin" },
    Esper { id: 3, name: "Siren" },
    Esper { id: 4, name: "Cait Sith" },
    Esper { id: 5, name: "Ifrit" },
    Esper { id: 6, name: "Shiva" },
    Esper { id: 7, name: "Unicorn" },
    Esper { id: 8, name: "Maduin" },
    Esper { id: 9, name: "Catoblepas" },
    Esper { id: 10, name: "Phantom" },
    Esper { id: 11, name: "Carbuncle" },
    Esper { id: 12, name: "Bismarck" },
    Esper { id: 13, name: "Golem" },
    Esper { id: 14, name: "Zona Seeker" },
    Esper { id: 15, name: "Seraph" },
    Esper { id: 16, name: "Quetzalli" },
    Esper { id: 17, name: "Fenrir" },
    Esper { id: 18, name: "Valigarmanda" },
    Esper { id: 19, name: "Midgardsormr" },
    Esper { id: 20, name: "Lakshmi" },
    Esper { id: 21, name: "Alexander" },
    Esper { id: 22, name: "Phoenix" },
    Esper { id: 23, name: "Odin" },
    Esper { id: 24, name: "Bahamut" },
    Esper { id: 25, name: "Ragnarok" },
    Esper { id: 26, name: "Crusader" },
    Esper { id: 27, name: "Raiden" },
];

/// Inclusive ability ID range for one skill category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AbilityRange {
    pub from: i64,
    pub to: i64,
}

impl AbilityRange {
    pub const fn new(from: i64, to: i64) -> Self {
        AbilityRange { from, to }
    }

    pub fn contains(&self, id: i64) -> bool {
        id >= self.from && id <= self.to
    }
}

/// Job ID whose characters learn Bushido techniques (Cyan).
pub const BUSHIDO_JOB_ID: i64 = 3;
/// Job ID whose characters learn Blitzes (Sabin).
pub const BLITZ_JOB_ID: i64 = 6;
/// Job ID whose characters learn Lores (Strago).
pub const LORE_JOB_ID: i64 = 8;
/// Job ID whose characters learn Rages (Gau).
pub const RAGE_JOB_ID: i64 = 12;
/// Character ID that learns Dances (Mog). Dance is the one category
/// keyed off character ID rather than job ID.
pub const DANCE_CHARACTER_ID: i64 = 16;

/// Read-only bundle of every static table the extractors need.
#[derive(Debug)]
pub struct GameData {
    pub bases: &'static [CharacterBase],
    pub commands: &'static phf::Map<u32, &'static str>,
    pub espers: &'static [Esper],
    pub spells: AbilityRange,
    pub bushido: AbilityRange,
    pub blitz: AbilityRange,
    pub dance: AbilityRange,
    pub lore: AbilityRange,
    pub rage: AbilityRange,
}

static BUILTIN: GameData = GameData {
    bases: CHARACTER_BASES,
    commands: &COMMAND_NAMES,
    espers: ESPERS,
    spells: AbilityRange::new(1, 54),
    bushido: AbilityRange::new(55, 62),
    blitz: AbilityRange::new(63, 70),
    dance: AbilityRange::new(71, 78),
    lore: AbilityRange::new(79, 102),
    rage: AbilityRange::new(103, 356),
};

impl GameData {
    /// The shipped tables.
    pub fn builtin() -> &'static GameData {
        &BUILTIN
    }

    /// Look up base offsets by the (characterID, jobID) identity pair.
    pub fn base_offset(&self, character_id: i64, job_id: i64) -> Option<&CharacterBase> {
        self.bases
            .iter()
            .find(|b| b.character_id == character_id && b.job_id == job_id)
    }

    /// Name of a battle command ID, if known.
    pub fn command_name(&self, id: i64) -> Option<&'static str> {
        u32::try_from(id).ok().and_then(|id| self.commands.get(&id).copied())
    }

    pub fn esper_by_id(&self, id: i64) -> Option<&Esper> {
        self.espers.iter().find(|e| e.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_offset_lookup() {
        let data = GameData::builtin();
        let terra = data.base_offset(1, 2).expect("Terra base entry");
        assert_eq!(terra.name, "Terra");
        assert!(terra.hp_base > 0);
    }

    #[test]
    fn test_unknown_identity_pair() {
        let data = GameData::builtin();
        assert!(data.base_offset(999, 999).is_none());
        // Right character, wrong job is also a miss.
        assert!(data.base_offset(1, 5).is_none());
    }

    #[test]
    fn test_command_lookup() {
        let data = GameData::builtin();
        assert_eq!(data.command_name(10), Some("Attack"));
        assert_eq!(data.command_name(25), Some("Rage"));
        assert_eq!(data.command_name(-1), None);
        assert_eq!(data.command_name(9999), None);
    }

    #[test]
    fn test_ability_ranges_do_not_overlap() {
        let data = GameData::builtin();
        let ranges = [
            data.spells,
            data.bushido,
            data.blitz,
            data.dance,
            data.lore,
            data.rage,
        ];
        for (i, a) in ranges.iter().enumerate() {
            assert!(a.from <= a.to);
            for b in &ranges[i + 1..] {
                assert!(a.to < b.from || b.to < a.from, "ranges overlap: {a:?} {b:?}");
            }
        }
    }
}
