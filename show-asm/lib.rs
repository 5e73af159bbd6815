use murmur3_incremental::{Murmur128x64, Murmur128x86, Murmur32};

#[inline(never)]
pub fn append_x86_32(hasher: &mut Murmur32, bytes: &[u8]) {
    hasher.append(bytes)
}

#[inline(never)]
pub fn append_x86_128(hasher: &mut Murmur128x86, bytes: &[u8]) {
    hasher.append(bytes)
}

#[inline(never)]
pub fn append_x64_128(hasher: &mut Murmur128x64, bytes: &[u8]) {
    hasher.append(bytes)
}

#[inline(never)]
pub fn finalize_x64_128(hasher: &mut Murmur128x64) -> u128 {
    hasher.finalize_u128()
}

#[inline(never)]
pub fn rapidhash(bytes: &[u8], seed: u64) -> u64 {
    rapidhash::rapidhash_inline(bytes, seed)
}
