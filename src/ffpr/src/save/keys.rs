//! JSON key names used by the save format.
//!
//! Several of these are misspelled in the format itself ("owendGil",
//! "importantOwendItemList", "additionMagic"). They must stay
//! misspelled here or the game will not find them.

// Root document
pub const USER_DATA: &str = "userData";
pub const MAP_DATA: &str = "mapData";
pub const DATA_STORAGE: &str = "dataStorage";
pub const IS_COMPLETE_FLAG: &str = "isCompleteFlag";

// userData
pub const OWNED_CHARACTER_LIST: &str = "ownedCharacterList";
pub const CORPS_LIST: &str = "corpsList";
pub const OWNED_MAGIC_STONE_LIST: &str = "ownedMagicStoneList";
pub const NORMAL_OWNED_ITEM_LIST: &str = "normalOwnedItemList";
pub const IMPORTANT_OWNED_ITEM_LIST: &str = "importantOwendItemList";
pub const OWNED_TRANSPORTATION_LIST: &str = "ownedTransportationList";
pub const OWNED_GIL: &str = "owendGil";
pub const STEPS: &str = "Steps";
pub const ESCAPE_COUNT: &str = "escapeCount";
pub const BATTLE_COUNT: &str = "battleCount";
pub const SAVE_COMPLETE_COUNT: &str = "saveCompleteCount";
pub const MONSTERS_KILLED_COUNT: &str = "monstersKilledCount";
pub const OPEN_CHEST_COUNT: &str = "openChestCount";
pub const PLAY_TIME: &str = "playTime";

// Character slot documents
pub const CORPSE_ID: &str = "corpseId";
pub const JOB_ID: &str = "jobId";
pub const NAME: &str = "name";
pub const IS_ENABLE_CORPS: &str = "isEnableCorps";
pub const CURRENT_EXP: &str = "currentExp";
pub const PARAMETER: &str = "parameter";
pub const COMMAND_LIST: &str = "commandList";
pub const EQUIPMENT_LIST: &str = "equipmentList";
pub const ABILITY_LIST: &str = "abilityList";

// parameter
pub const ADDITIONAL_LEVEL: &str = "additionalLevel";
pub const CURRENT_HP: &str = "currentHp";
pub const ADDITIONAL_MAX_HP: &str = "additionalMaxHp";
pub const CURRENT_MP: &str = "currentMp";
pub const ADDITIONAL_MAX_MP: &str = "additionalMaxMp";
pub const ADDITIONAL_POWER: &str = "additionalPower";
pub const ADDITIONAL_VITALITY: &str = "additionalVitality";
pub const ADDITIONAL_AGILITY: &str = "additionalAgility";
pub const ADDITION_MAGIC: &str = "additionMagic";

// List entries
pub const CHARACTER_ID: &str = "characterId";
pub const CONTENT_ID: &str = "contentId";
pub const COUNT: &str = "count";
pub const ABILITY_ID: &str = "abilityId";
pub const SKILL_LEVEL: &str = "skillLevel";
pub const KEYS: &str = "keys";
pub const VALUES: &str = "values";

// mapData
pub const MAP_ID: &str = "mapId";
pub const POINT_IN: &str = "pointIn";
pub const CARRYING_HOVER_SHIP: &str = "carryingHoverShip";
pub const PLAYABLE_CHARACTER_CORPS_ID: &str = "playableCharacterCorpsId";
pub const PLAYER_ENTITY: &str = "playerEntity";
pub const POSITION: &str = "position";
pub const DIRECTION: &str = "direction";
pub const GPS_DATA: &str = "gpsData";
pub const BEAST_FLAGS: &str = "beastFieldEncountExchangeFlags";

// gpsData
pub const TRANSPORTATION_ID: &str = "transportationId";
pub const AREA_ID: &str = "areaId";
pub const GPS_ID: &str = "gpsId";
pub const WIDTH: &str = "width";
pub const HEIGHT: &str = "height";

// Transportation entries
pub const ID: &str = "id";
pub const TIME_STAMP: &str = "timeStamp";

// dataStorage
pub const GLOBAL: &str = "global";
pub const CURSED_SHIELD_SLOT: usize = 9;

// Position coordinates
pub const X: &str = "x";
pub const Y: &str = "y";
pub const Z: &str = "z";
