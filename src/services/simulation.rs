//! Placeholder generators for the simulated ledger.
//!
//! Nothing in here is a digest. Hashes are random strings shaped like the
//! values a real chain would show, and they carry no integrity guarantee.

use chrono::{DateTime, Utc};
use rand::Rng;

const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Bytes behind a transaction hash; hex-encoded this gives 52 characters.
const TRANSACTION_HASH_BYTES: usize = 26;
const BLOCK_HASH_SUFFIX_LEN: usize = 26;
const TRANSACTION_ID_SUFFIX_LEN: usize = 7;

/// Upper bound (exclusive) for block nonces.
pub const MAX_NONCE: u64 = 1_000_000;

pub fn random_base36<R: Rng>(rng: &mut R, len: usize) -> String {
    (0..len)
        .map(|_| BASE36[rng.gen_range(0..BASE36.len())] as char)
        .collect()
}

/// `tx_<unix millis>_<7 base36 chars>`
pub fn transaction_id<R: Rng>(rng: &mut R, now: DateTime<Utc>) -> String {
    format!(
        "tx_{}_{}",
        now.timestamp_millis(),
        random_base36(rng, TRANSACTION_ID_SUFFIX_LEN)
    )
}

/// `0x` followed by 52 lowercase hex characters.
pub fn transaction_hash<R: Rng>(rng: &mut R) -> String {
    let mut bytes = [0u8; TRANSACTION_HASH_BYTES];
    rng.fill(&mut bytes[..]);
    format!("0x{}", hex::encode(bytes))
}

/// `0000` followed by 26 base36 characters, mimicking a mined block hash.
pub fn block_hash<R: Rng>(rng: &mut R) -> String {
    format!("0000{}", random_base36(rng, BLOCK_HASH_SUFFIX_LEN))
}

pub fn nonce<R: Rng>(rng: &mut R) -> u64 {
    rng.gen_range(0..MAX_NONCE)
}

/// FNV-1a over the given parts. Used only to seed placeholder generators.
pub fn seed_from_parts<'a, I>(parts: I) -> u64
where
    I: IntoIterator<Item = &'a [u8]>,
{
    const OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x0000_0100_0000_01b3;

    let mut hash = OFFSET;
    for part in parts {
        for byte in part {
            hash ^= u64::from(*byte);
            hash = hash.wrapping_mul(PRIME);
        }
        // separator so ["ab", "c"] and ["a", "bc"] differ
        hash ^= 0xff;
        hash = hash.wrapping_mul(PRIME);
    }
    hash
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn transaction_hash_shape() {
        let mut rng = rand::thread_rng();
        let hash = transaction_hash(&mut rng);
        assert!(hash.starts_with("0x"));
        assert_eq!(hash.len(), 2 + TRANSACTION_HASH_BYTES * 2);
        assert!(hash[2..].chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn transaction_id_embeds_timestamp() {
        let mut rng = rand::thread_rng();
        let now = Utc::now();
        let id = transaction_id(&mut rng, now);
        let parts: Vec<_> = id.split('_').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "tx");
        assert_eq!(parts[1], now.timestamp_millis().to_string());
        assert_eq!(parts[2].len(), TRANSACTION_ID_SUFFIX_LEN);
    }

    #[test]
    fn block_hash_and_nonce_shape() {
        let mut rng = rand::thread_rng();
        let hash = block_hash(&mut rng);
        assert!(hash.starts_with("0000"));
        assert_eq!(hash.len(), 4 + BLOCK_HASH_SUFFIX_LEN);
        assert!(nonce(&mut rng) < MAX_NONCE);
    }

    #[test]
    fn seeded_generators_repeat() {
        let seed = seed_from_parts([b"1".as_slice(), b"prev".as_slice()]);
        let a = block_hash(&mut StdRng::seed_from_u64(seed));
        let b = block_hash(&mut StdRng::seed_from_u64(seed));
        assert_eq!(a, b);
    }

    #[test]
    fn seed_separates_parts() {
        let left = seed_from_parts([b"ab".as_slice(), b"c".as_slice()]);
        let right = seed_from_parts([b"a".as_slice(), b"bc".as_slice()]);
        assert_ne!(left, right);
    }
}
