//! Container file header (32 bytes).
//!
//! Layout:
//! - 0-3: magic `SNPG`
//! - 4-7: format version
//! - 8-11: CRC32 of the payload
//! - 12-15: total file size
//! - 16-19: payload size
//! - 20-31: reserved

use super::constants::{HEADER_SIZE, MAGIC, VERSION};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Header {
    pub magic: [u8; 4],
    pub version: u32,
    /// CRC32 checksum of everything after the header.
    pub checksum: u32,
    pub total_size: u32,
    pub payload_size: u32,
    pub _reserved: [u8; 12],
}

impl Default for Header {
    fn default() -> Self {
        Self {
            magic: MAGIC,
            version: VERSION,
            checksum: 0,
            total_size: 0,
            payload_size: 0,
            _reserved: [0; 12],
        }
    }
}

impl Header {
    /// Header for `payload`, with sizes and checksum filled in.
    pub fn for_payload(payload: &[u8]) -> Self {
        Self {
            checksum: crc32fast::hash(payload),
            total_size: (HEADER_SIZE + payload.len()) as u32,
            payload_size: payload.len() as u32,
            ..Self::default()
        }
    }

    /// Decode a header from the first 32 bytes.
    pub fn from_bytes(bytes: &[u8; HEADER_SIZE]) -> Self {
        let u32_at = |at: usize| {
            u32::from_le_bytes([bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]])
        };
        let mut reserved = [0u8; 12];
        reserved.copy_from_slice(&bytes[20..32]);

        Self {
            magic: [bytes[0], bytes[1], bytes[2], bytes[3]],
            version: u32_at(4),
            checksum: u32_at(8),
            total_size: u32_at(12),
            payload_size: u32_at(16),
            _reserved: reserved,
        }
    }

    pub fn to_bytes(&self) -> [u8; HEADER_SIZE] {
        let mut bytes = [0u8; HEADER_SIZE];
        bytes[0..4].copy_from_slice(&self.magic);
        bytes[4..8].copy_from_slice(&self.version.to_le_bytes());
        bytes[8..12].copy_from_slice(&self.checksum.to_le_bytes());
        bytes[12..16].copy_from_slice(&self.total_size.to_le_bytes());
        bytes[16..20].copy_from_slice(&self.payload_size.to_le_bytes());
        bytes[20..32].copy_from_slice(&self._reserved);
        bytes
    }

    pub fn validate_magic(&self) -> bool {
        self.magic == MAGIC
    }

    pub fn validate_version(&self) -> bool {
        self.version == VERSION
    }

    pub fn validate_checksum(&self, payload: &[u8]) -> bool {
        self.checksum == crc32fast::hash(payload)
    }
}
