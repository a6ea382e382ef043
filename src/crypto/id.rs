//! Identifier generation
//!
//! Store-assigned ids are the first 16 hex digits of a SHA-256 digest over
//! the clock, a per-generator sequence number and random entropy. The
//! sequence keeps ids unique even when two records share a timestamp.

use chrono::{DateTime, Utc};
use rand::Rng;
use sha2::{Digest, Sha256};
use std::sync::atomic::{AtomicU64, Ordering};

/// Hex digits kept from the digest
pub const ID_HEX_LEN: usize = 16;

/// Prefix of human-readable transaction references
pub const REFERENCE_PREFIX: &str = "TXN-";

/// Length of payment link slugs
pub const LINK_ID_LEN: usize = 9;

const LINK_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Generates record ids and transaction reference codes
#[derive(Debug, Default)]
pub struct IdGenerator {
    sequence: AtomicU64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Next unique record id
    pub fn next_id(&self, now: DateTime<Utc>) -> String {
        let seq = self.sequence.fetch_add(1, Ordering::Relaxed);
        let nanos = now.timestamp_nanos_opt().unwrap_or_else(|| now.timestamp_millis());
        let entropy: u64 = rand::random();

        let mut hasher = Sha256::new();
        hasher.update(nanos.to_le_bytes());
        hasher.update(seq.to_le_bytes());
        hasher.update(entropy.to_le_bytes());
        let digest = hex::encode(hasher.finalize());

        digest[..ID_HEX_LEN].to_string()
    }

    /// Short lowercase base-36 slug for shareable payment links
    pub fn link_id(&self) -> String {
        let mut rng = rand::thread_rng();
        (0..LINK_ID_LEN)
            .map(|_| LINK_ALPHABET[rng.gen_range(0..LINK_ALPHABET.len())] as char)
            .collect()
    }

    /// Reference code from the last six digits of the millisecond clock
    pub fn reference(&self, now: DateTime<Utc>) -> String {
        format!(
            "{}{:06}",
            REFERENCE_PREFIX,
            now.timestamp_millis().rem_euclid(1_000_000)
        )
    }
}
