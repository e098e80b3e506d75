//! Save editing for the Pixel Remaster release of Final Fantasy VI.
//!
//! PR saves are layered: an optional UTF-8 BOM, base64, a symmetric
//! cipher, raw DEFLATE, and finally a JSON document whose
//! sub-structures are JSON-encoded strings. This crate peels those
//! layers ([`transport`], [`crypto`], [`document`]), extracts editable
//! models from the document tree ([`save`], [`models`]), and writes
//! edits back without disturbing any field it does not understand.
//!
//! ```no_run
//! use std::path::Path;
//! use ffpr::{GameData, PrCipher, PrSave, SaveFormat};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let cipher = PrCipher::new();
//! let data = GameData::builtin();
//! let mut save = PrSave::load(Path::new("saveslot1"), SaveFormat::Pc, &cipher, data)?;
//! save.misc.gp = 999_999;
//! save.save(Path::new("saveslot1"), &cipher, data)?;
//! # Ok(())
//! # }
//! ```

pub mod crypto;
pub mod data;
pub mod document;
pub mod models;
pub mod save;
pub mod scalar;
pub mod transport;

pub use crypto::{Cipher, CryptoError, PrCipher};
pub use data::GameData;
pub use document::{Document, DocumentError};
pub use models::{
    Character, Cheats, Command, CurrentMax, Equipment, EsperSet, GpsData, Inventory, MapData,
    Member, MiscStats, Party, Position, Row, SkillBank, Transportation, Veldt,
};
pub use save::{LoadError, PrSave, SaveError};
pub use transport::{SaveFormat, TransportError};
