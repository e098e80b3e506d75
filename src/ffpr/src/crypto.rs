//! Pixel Remaster save file encryption and decryption.
//!
//! The PR games wrap the compressed save payload in a symmetric block
//! cipher. The transport codec treats the cipher as an injected
//! collaborator via the [`Cipher`] trait so that alternate ciphers (or
//! a no-op cipher in tests) can be swapped in without touching the
//! codec itself.

#[allow(deprecated)]
use aes::cipher::generic_array::GenericArray;
use aes::cipher::{BlockDecrypt, BlockEncrypt, KeyInit};
use aes::Aes256;

/// Fixed key used by the Pixel Remaster save container.
const BASE_KEY: [u8; 32] = [
    0x9B, 0x51, 0x2E, 0xC0, 0x44, 0x7A, 0xD3, 0x18, 0x5F, 0xAA, 0x63, 0x0D, 0xE1, 0x97, 0x4C, 0x26,
    0x72, 0x39, 0xB8, 0x05, 0xCE, 0x8A, 0xF4, 0x61, 0x1D, 0xE7, 0x50, 0x93, 0x2B, 0xDC, 0x0F, 0xA8,
];

/// Errors that can occur during encryption/decryption
#[derive(Debug, thiserror::Error)]
pub enum CryptoError {
    #[error("ciphertext size {0} is not a multiple of 16 bytes")]
    InvalidSize(usize),

    #[error("invalid padding in decrypted data")]
    InvalidPadding,
}

/// Symmetric cipher collaborator used by the transport codec.
pub trait Cipher {
    fn decrypt(&self, data: &[u8]) -> Result<Vec<u8>, CryptoError>;
    fn encrypt(&self, data: &[u8]) -> Result<Vec<u8>, CryptoError>;
}

/// AES-256-ECB cipher with PKCS7 padding, keyed for PR save files.
#[derive(Debug, Default, Clone, Copy)]
pub struct PrCipher;

impl PrCipher {
    pub fn new() -> Self {
        PrCipher
    }
}

/// Apply PKCS7 padding to data
fn pkcs7_pad(data: &[u8], block_size: usize) -> Vec<u8> {
    let padding_len = block_size - (data.len() % block_size);
    let mut padded = Vec::with_capacity(data.len() + padding_len);
    padded.extend_from_slice(data);
    padded.extend(std::iter::repeat(padding_len as u8).take(padding_len));
    padded
}

/// Remove PKCS7 padding from data
fn pkcs7_unpad(data: &[u8]) -> Result<Vec<u8>, CryptoError> {
    if data.is_empty() {
        return Err(CryptoError::InvalidPadding);
    }

    let padding_len = *data.last().unwrap() as usize;

    if padding_len == 0 || padding_len > data.len() {
        return Err(CryptoError::InvalidPadding);
    }

    for &byte in &data[data.len() - padding_len..] {
        if byte as usize != padding_len {
            return Err(CryptoError::InvalidPadding);
        }
    }

    Ok(data[..data.len() - padding_len].to_vec())
}

impl Cipher for PrCipher {
    fn decrypt(&self, data: &[u8]) -> Result<Vec<u8>, CryptoError> {
        if data.len() % 16 != 0 {
            return Err(CryptoError::InvalidSize(data.len()));
        }

        #[allow(deprecated)]
        let cipher = Aes256::new(GenericArray::from_slice(&BASE_KEY));

        let mut decrypted = data.to_vec();
        for chunk in decrypted.chunks_exact_mut(16) {
            #[allow(deprecated)]
            cipher.decrypt_block(GenericArray::from_mut_slice(chunk));
        }

        pkcs7_unpad(&decrypted)
    }

    fn encrypt(&self, data: &[u8]) -> Result<Vec<u8>, CryptoError> {
        let mut encrypted = pkcs7_pad(data, 16);

        #[allow(deprecated)]
        let cipher = Aes256::new(GenericArray::from_slice(&BASE_KEY));

        for chunk in encrypted.chunks_exact_mut(16) {
            #[allow(deprecated)]
            cipher.encrypt_block(GenericArray::from_mut_slice(chunk));
        }

        Ok(encrypted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip() {
        let cipher = PrCipher::new();
        let plaintext = b"{\"userData\":\"{}\",\"mapData\":\"{}\"}";

        let encrypted = cipher.encrypt(plaintext).unwrap();
        assert_eq!(encrypted.len() % 16, 0);
        assert_ne!(&encrypted[..], &plaintext[..]);

        let decrypted = cipher.decrypt(&encrypted).unwrap();
        assert_eq!(plaintext, &decrypted[..]);
    }

    #[test]
    fn test_decrypt_rejects_unaligned_input() {
        let cipher = PrCipher::new();
        let err = cipher.decrypt(&[0u8; 17]).unwrap_err();
        assert!(matches!(err, CryptoError::InvalidSize(17)));
    }

    #[test]
    fn test_pkcs7_pad_unpad() {
        for len in 0..33 {
            let data = vec![0xABu8; len];
            let padded = pkcs7_pad(&data, 16);
            assert_eq!(padded.len() % 16, 0);
            assert!(padded.len() > data.len());
            assert_eq!(pkcs7_unpad(&padded).unwrap(), data);
        }
    }

    #[test]
    fn test_unpad_rejects_garbage() {
        assert!(pkcs7_unpad(&[]).is_err());
        assert!(pkcs7_unpad(&[1, 2, 3, 0]).is_err());
        assert!(pkcs7_unpad(&[5, 5, 5]).is_err());
    }
}
