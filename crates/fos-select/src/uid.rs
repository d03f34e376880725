//! Short random identifiers namespacing the ids of each widget

const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Length of a generated uid
pub const UID_LEN: usize = 5;

/// xorshift64 generator; not for anything security related
#[derive(Debug, Clone)]
pub struct UidGenerator {
    state: u64,
}

impl UidGenerator {
    /// Seed from the system clock
    pub fn from_time() -> Self {
        use std::time::{SystemTime, UNIX_EPOCH};
        let seed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0);
        Self::seeded(seed)
    }

    /// Deterministic sequence, for tests and reproducible pages
    pub fn seeded(seed: u64) -> Self {
        // xorshift has a fixed point at zero
        let state = if seed == 0 { 0x9E37_79B9_7F4A_7C15 } else { seed };
        Self { state }
    }

    fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }

    /// Next uid of `UID_LEN` characters from `[A-Za-z0-9]`
    pub fn next_uid(&mut self) -> String {
        (0..UID_LEN)
            .map(|_| ALPHABET[(self.next_u64() % ALPHABET.len() as u64) as usize] as char)
            .collect()
    }
}

impl Default for UidGenerator {
    fn default() -> Self {
        Self::from_time()
    }
}
