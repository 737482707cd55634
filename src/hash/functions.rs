//! Concrete 32-bit hash functions

use siphasher::sip::SipHasher13;
use std::hash::Hasher;

/// IEEE CRC32 checksum
pub fn crc32(data: &[u8]) -> u32 {
    crc32fast::hash(data)
}

/// XXH32 with a zero seed
pub fn xxhash32(data: &[u8]) -> u32 {
    xxhash_rust::xxh32::xxh32(data, 0)
}

/// SipHash-1-3 with zero keys, folded down to 32 bits
///
/// Both halves of the 64-bit digest are mixed in so that no input bits are
/// simply discarded.
pub fn siphash32(data: &[u8]) -> u32 {
    let mut hasher = SipHasher13::new();
    hasher.write(data);
    let hash = hasher.finish();
    (hash as u32) ^ ((hash >> 32) as u32)
}
