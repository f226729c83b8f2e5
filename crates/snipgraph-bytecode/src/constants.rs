//! Container format constants.

/// Magic bytes identifying a snipgraph container file.
pub const MAGIC: [u8; 4] = *b"SNPG";

/// Current container format version.
pub const VERSION: u32 = 1;

/// Header size in bytes.
pub const HEADER_SIZE: usize = 32;

/// First identity handed out to synthesized snippet types.
///
/// Keeps snippet handles apart from runtime handles, which are small.
pub const SNIPPET_ID_BASE: u64 = 1 << 48;
