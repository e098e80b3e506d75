//! Save file loading, editing, and writing.
//!
//! [`PrSave`] owns both halves of an open save: the ordered document
//! tree exactly as parsed from disk, and the editable domain models
//! extracted from it. `load` populates the models from the documents;
//! `save` writes the models back into the documents and re-encodes.
//! Fields the editor does not understand are never touched, so they
//! round-trip byte-identical.

mod characters;
mod inventory;
mod keys;
mod map;
mod misc;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::debug;

use crate::crypto::Cipher;
use crate::data::{GameData, CHARACTER_SLOTS, INVENTORY_CAPACITY, KEY_ITEM_CAPACITY};
use crate::document::{Document, DocumentError};
use crate::models::{
    Character, Cheats, EsperSet, Inventory, MapData, MiscStats, Party, Transportation, Veldt,
};
use crate::transport::{self, SaveFormat, TransportError};

/// Errors from loading a save file
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: io::Error,
    },

    #[error("transport decode failed: {0}")]
    Transport(#[from] TransportError),

    #[error("failed to parse save document: {0}")]
    Parse(#[from] DocumentError),

    #[error("{section}: {source}")]
    Section {
        section: &'static str,
        source: DocumentError,
    },
}

/// Errors from writing a save file
#[derive(Debug, thiserror::Error)]
pub enum SaveError {
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: io::Error,
    },

    #[error("transport encode failed: {0}")]
    Transport(#[from] TransportError),

    #[error("failed to serialize save document: {0}")]
    Serialize(#[from] DocumentError),

    #[error("{section}: {source}")]
    Section {
        section: &'static str,
        source: DocumentError,
    },
}

fn load_section(section: &'static str) -> impl Fn(DocumentError) -> LoadError {
    move |source| LoadError::Section { section, source }
}

fn save_section(section: &'static str) -> impl Fn(DocumentError) -> SaveError {
    move |source| SaveError::Section { section, source }
}

/// Write an f64 as a JSON number. NaN and infinities have no JSON
/// representation and collapse to zero.
pub(crate) fn float_value(f: f64) -> Value {
    serde_json::Number::from_f64(f)
        .map(Value::Number)
        .unwrap_or_else(|| Value::from(0))
}

/// An open PR save: the preserved document tree plus the editable models.
#[derive(Debug)]
pub struct PrSave {
    pub format: SaveFormat,
    trimmed: Option<Vec<u8>>,
    base: Document,
    user_data: Document,
    map_data: Document,
    /// Slot documents as parsed from the owned-character list. Kept
    /// even for slots the base-offset table does not know, so unknown
    /// characters survive a load/save cycle untouched.
    slot_docs: Vec<Option<Document>>,

    pub characters: Vec<Option<Character>>,
    pub party: Party,
    pub espers: EsperSet,
    pub misc: MiscStats,
    pub inventory: Inventory,
    pub key_items: Inventory,
    pub veldt: Veldt,
    pub cheats: Cheats,
    pub map: MapData,
    pub transportation: Vec<Transportation>,
}

impl PrSave {
    /// Load a save file from disk.
    pub fn load(
        path: &Path,
        format: SaveFormat,
        cipher: &dyn Cipher,
        data: &GameData,
    ) -> Result<Self, LoadError> {
        let raw = fs::read(path).map_err(|source| LoadError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_bytes(&raw, format, cipher, data)
    }

    /// Load a save from raw file bytes.
    pub fn from_bytes(
        raw: &[u8],
        format: SaveFormat,
        cipher: &dyn Cipher,
        data: &GameData,
    ) -> Result<Self, LoadError> {
        let (plaintext, trimmed) = transport::decode(raw, format, cipher)?;

        let base = Document::parse(&plaintext)?;
        let user_data = base.unwrap(keys::USER_DATA)?;
        let map_data = base.unwrap(keys::MAP_DATA)?;

        let mut slot_docs: Vec<Option<Document>> = vec![None; CHARACTER_SLOTS];
        let list = user_data
            .unwrap_target(keys::OWNED_CHARACTER_LIST)
            .map_err(load_section("characters"))?;
        let entries = list
            .as_array()
            .ok_or(DocumentError::TypeMismatch {
                key: keys::OWNED_CHARACTER_LIST.to_string(),
                expected: "array",
                actual: crate::document::json_type(&list),
            })
            .map_err(load_section("characters"))?;
        for (slot, entry) in entries.iter().take(CHARACTER_SLOTS).enumerate() {
            let doc = Document::from_value(entry, keys::OWNED_CHARACTER_LIST)
                .map_err(load_section("characters"))?;
            slot_docs[slot] = Some(doc);
        }

        let mut save = PrSave {
            format,
            trimmed,
            base,
            user_data,
            map_data,
            slot_docs,
            characters: Vec::new(),
            party: Party::default(),
            espers: EsperSet::default(),
            misc: MiscStats::default(),
            inventory: Inventory::new(INVENTORY_CAPACITY),
            key_items: Inventory::new(KEY_ITEM_CAPACITY),
            veldt: Veldt::default(),
            cheats: Cheats::default(),
            map: MapData::default(),
            transportation: Vec::new(),
        };

        save.party.clear();

        save.characters =
            characters::load(&save.slot_docs, data, &mut save.party)
                .map_err(load_section("characters"))?;
        misc::load_party(&save.user_data, &mut save.party).map_err(load_section("party"))?;
        save.espers = misc::load_espers(&save.user_data, data).map_err(load_section("espers"))?;
        save.misc =
            misc::load_misc(&save.user_data, &save.base).map_err(load_section("misc stats"))?;
        save.inventory =
            inventory::load(&save.user_data, keys::NORMAL_OWNED_ITEM_LIST, INVENTORY_CAPACITY)
                .map_err(load_section("inventory"))?;
        save.key_items =
            inventory::load(&save.user_data, keys::IMPORTANT_OWNED_ITEM_LIST, KEY_ITEM_CAPACITY)
                .map_err(load_section("important inventory"))?;
        save.veldt = map::load_veldt(&save.map_data).map_err(load_section("veldt"))?;
        save.cheats =
            misc::load_cheats(&save.user_data, &save.base).map_err(load_section("cheats"))?;
        save.map = map::load_map(&save.map_data).map_err(load_section("map data"))?;
        save.transportation =
            map::load_transportation(&save.user_data).map_err(load_section("transportation"))?;

        debug!(
            characters = save.characters.iter().flatten().count(),
            vehicles = save.transportation.len(),
            "loaded save"
        );
        Ok(save)
    }

    /// Write the current model state back to disk.
    pub fn save(
        &mut self,
        path: &Path,
        cipher: &dyn Cipher,
        data: &GameData,
    ) -> Result<(), SaveError> {
        let raw = self.to_bytes(cipher, data)?;
        fs::write(path, raw).map_err(|source| SaveError::Write {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Write the current model state back into the document tree and
    /// encode it to raw file bytes.
    pub fn to_bytes(
        &mut self,
        cipher: &dyn Cipher,
        data: &GameData,
    ) -> Result<Vec<u8>, SaveError> {
        characters::store(&mut self.slot_docs, &mut self.characters, data)
            .map_err(save_section("characters"))?;

        let mut entries = Vec::new();
        for doc in self.slot_docs.iter().flatten() {
            entries.push(Value::String(doc.to_json()?));
        }
        self.user_data
            .set_target(keys::OWNED_CHARACTER_LIST, Value::Array(entries))
            .map_err(save_section("characters"))?;

        misc::store_party(&mut self.user_data, &self.party).map_err(save_section("party"))?;
        misc::store_espers(&mut self.user_data, &self.espers).map_err(save_section("espers"))?;
        misc::store_misc(&mut self.user_data, &mut self.base, &self.misc)
            .map_err(save_section("misc stats"))?;
        inventory::store(&mut self.user_data, keys::NORMAL_OWNED_ITEM_LIST, &self.inventory)
            .map_err(save_section("inventory"))?;
        inventory::store(&mut self.user_data, keys::IMPORTANT_OWNED_ITEM_LIST, &self.key_items)
            .map_err(save_section("important inventory"))?;
        map::store_veldt(&mut self.map_data, &self.veldt).map_err(save_section("veldt"))?;
        misc::store_cheats(&mut self.user_data, &mut self.base, &self.cheats)
            .map_err(save_section("cheats"))?;
        map::store_map(&mut self.map_data, &self.map).map_err(save_section("map data"))?;
        map::store_transportation(&mut self.user_data, &self.transportation)
            .map_err(save_section("transportation"))?;

        self.base.rewrap(keys::USER_DATA, &self.user_data)?;
        self.base.rewrap(keys::MAP_DATA, &self.map_data)?;

        let plaintext = self.base.to_bytes()?;
        debug!(plain_len = plaintext.len(), "storing save");
        Ok(transport::encode(
            &plaintext,
            self.trimmed.as_deref(),
            self.format,
            cipher,
        )?)
    }

    /// The character model in a given slot, if one was recognized.
    pub fn character(&self, slot: usize) -> Option<&Character> {
        self.characters.get(slot).and_then(|c| c.as_ref())
    }

    pub fn character_mut(&mut self, slot: usize) -> Option<&mut Character> {
        self.characters.get_mut(slot).and_then(|c| c.as_mut())
    }

    /// Find a character by its canonical table name.
    pub fn character_by_root_name(&self, root_name: &str) -> Option<&Character> {
        self.characters
            .iter()
            .flatten()
            .find(|c| c.root_name == root_name)
    }
}
