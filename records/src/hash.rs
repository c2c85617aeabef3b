//! Blake2b-256 digests of canonical record bytes.

use blake2::digest::consts::U32;
use blake2::{Blake2b, Digest};

type Blake2b256 = Blake2b<U32>;

pub const HASH_LEN: usize = 32;

pub fn blake2b_256(data: &[u8]) -> [u8; HASH_LEN] {
    let mut hasher = Blake2b256::new();
    hasher.update(data);
    let result = hasher.finalize();
    let mut output = [0u8; HASH_LEN];
    output.copy_from_slice(&result);
    output
}
