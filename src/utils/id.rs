//! # Recipe Identifiers
//!
//! Sources of 128-bit recipe ids.
//!
//! Recipes never draw an id from an implicit global source: constructors take
//! one explicitly, and the codec asks its configured [`IdGenerator`] when a
//! wire layout carries no structured id (smelting and smithing recipes).
//!
//! ## Generators
//! - [`RandomIds`]: random version-4 ids from the thread-local RNG (default)
//! - [`SeededIds`]: reproducible version-4 ids from a seeded RNG
//! - [`SequentialIds`]: `00000000-0000-0000-0000-000000000001`, `...02`, ...

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use uuid::{Builder, Uuid};

/// Produces fresh recipe ids. Shared by every decode running on a codec.
pub trait IdGenerator: Send + Sync {
    fn next_id(&self) -> Uuid;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct RandomIds;

impl IdGenerator for RandomIds {
    fn next_id(&self) -> Uuid {
        let mut bytes = [0u8; 16];
        rand::rng().fill(&mut bytes);
        Builder::from_random_bytes(bytes).into_uuid()
    }
}

#[derive(Debug)]
pub struct SeededIds {
    rng: Mutex<StdRng>,
}

impl SeededIds {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl IdGenerator for SeededIds {
    fn next_id(&self) -> Uuid {
        let mut bytes = [0u8; 16];
        // a poisoned lock still holds a usable RNG state
        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        rng.fill(&mut bytes);
        Builder::from_random_bytes(bytes).into_uuid()
    }
}

#[derive(Debug, Default)]
pub struct SequentialIds {
    next: AtomicU64,
}

impl SequentialIds {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start counting after `start`.
    pub fn starting_at(start: u64) -> Self {
        Self {
            next: AtomicU64::new(start),
        }
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&self) -> Uuid {
        let value = self.next.fetch_add(1, Ordering::Relaxed) + 1;
        Uuid::from_u64_pair(0, value)
    }
}
