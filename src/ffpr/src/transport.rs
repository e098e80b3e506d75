//! Byte-level transport codec for PR save files.
//!
//! Console saves are raw JSON and pass through untouched. PC/mobile
//! saves are optionally BOM-prefixed base64 text wrapping raw-DEFLATE
//! compressed, symmetric-encrypted JSON.
//!
//! # Format (PC)
//! - Optional 3-byte UTF-8 BOM prefix, preserved verbatim across a
//!   decode/encode cycle
//! - base64 (standard alphabet), `=` padding sometimes missing
//! - Block cipher (see [`crate::crypto`])
//! - Raw DEFLATE stream

use std::io::{Read, Write};

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use flate2::read::DeflateDecoder;
use flate2::write::DeflateEncoder;
use flate2::Compression;
use tracing::debug;

use crate::crypto::{Cipher, CryptoError};

/// UTF-8 byte order mark some PC saves carry in front of the base64 text.
const BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];

/// Minimum plausible size of a PC-format save file.
const MIN_PC_LEN: usize = 10;

/// Compression level used by the game when writing PC saves.
const DEFLATE_LEVEL: u32 = 6;

/// On-disk save file variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveFormat {
    /// Console saves: plain JSON bytes, no wrapping.
    Console,
    /// PC/mobile saves: base64 + cipher + DEFLATE.
    Pc,
}

/// Errors from the transport decode/encode pipeline
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("save file too short: {0} bytes")]
    TooShort(usize),

    #[error("failed to decode base64: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("empty payload after base64 decode")]
    EmptyAfterDecode,

    #[error("cipher failure: {0}")]
    Crypto(#[from] CryptoError),

    #[error("failed to inflate save payload: {0}")]
    Inflate(std::io::Error),

    #[error("failed to deflate save payload: {0}")]
    Deflate(std::io::Error),
}

/// Decode raw file bytes into plaintext JSON.
///
/// Returns the plaintext and the trimmed BOM prefix, if one was
/// present. The prefix must be handed back to [`encode`] unchanged so
/// the written file is byte-compatible with what the game produced.
pub fn decode(
    raw: &[u8],
    format: SaveFormat,
    cipher: &dyn Cipher,
) -> Result<(Vec<u8>, Option<Vec<u8>>), TransportError> {
    if format == SaveFormat::Console {
        return Ok((raw.to_vec(), None));
    }

    if raw.len() < MIN_PC_LEN {
        return Err(TransportError::TooShort(raw.len()));
    }

    let (trimmed, mut body) = if raw.starts_with(&BOM) {
        (Some(BOM.to_vec()), raw[BOM.len()..].to_vec())
    } else {
        (None, raw.to_vec())
    };

    // The game occasionally drops base64 padding; restore it.
    while body.len() % 4 != 0 {
        body.push(b'=');
    }

    let decoded = BASE64.decode(&body)?;
    if decoded.is_empty() {
        return Err(TransportError::EmptyAfterDecode);
    }

    let decrypted = cipher.decrypt(&decoded)?;

    let mut plaintext = Vec::new();
    DeflateDecoder::new(&decrypted[..])
        .read_to_end(&mut plaintext)
        .map_err(TransportError::Inflate)?;

    debug!(
        raw_len = raw.len(),
        plain_len = plaintext.len(),
        bom = trimmed.is_some(),
        "decoded PC save"
    );
    Ok((plaintext, trimmed))
}

/// Encode plaintext JSON back into raw file bytes.
pub fn encode(
    plaintext: &[u8],
    trimmed: Option<&[u8]>,
    format: SaveFormat,
    cipher: &dyn Cipher,
) -> Result<Vec<u8>, TransportError> {
    if format == SaveFormat::Console {
        return Ok(plaintext.to_vec());
    }

    let mut encoder = DeflateEncoder::new(Vec::new(), Compression::new(DEFLATE_LEVEL));
    encoder
        .write_all(plaintext)
        .map_err(TransportError::Deflate)?;
    let compressed = encoder.finish().map_err(TransportError::Deflate)?;

    let encrypted = cipher.encrypt(&compressed)?;
    let encoded = BASE64.encode(&encrypted);

    let mut out = Vec::with_capacity(encoded.len() + BOM.len());
    if let Some(prefix) = trimmed {
        out.extend_from_slice(prefix);
    }
    out.extend_from_slice(encoded.as_bytes());

    debug!(
        plain_len = plaintext.len(),
        raw_len = out.len(),
        "encoded PC save"
    );
    Ok(out)
}
