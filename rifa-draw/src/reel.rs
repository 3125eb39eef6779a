use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

/// Digits mounted on one reel, one per angular step.
pub const REEL_FACES: usize = 10;

/// Degrees a reel rotates per animation tick.
pub const STEP_DEGREES: f64 = 36.0;

/// One rotating digit ring of the draw widget.
///
/// The ten digits are mounted in a random order when the reel is built, one
/// per 36 degree increment, and the ring only ever rotates in whole 36 degree
/// steps from there. Which digit faces the front is a pure function of the
/// accumulated angle and the mounted order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReelState {
    angle: f64,
    ring: [u8; REEL_FACES],
}

impl ReelState {
    /// Mount a reel with a freshly shuffled digit ring, at rest.
    pub fn new() -> Self {
        let mut ring = [0u8; REEL_FACES];
        for (index, slot) in ring.iter_mut().enumerate() {
            *slot = index as u8;
        }
        ring.shuffle(&mut rand::thread_rng());
        Self { angle: 0.0, ring }
    }

    /// Mount a reel with a fixed ring order (deterministic tests).
    pub fn with_ring(ring: [u8; REEL_FACES]) -> Self {
        Self { angle: 0.0, ring }
    }

    pub fn angle(&self) -> f64 {
        self.angle
    }

    pub fn ring(&self) -> &[u8; REEL_FACES] {
        &self.ring
    }

    /// Rotate the reel by one step.
    pub fn step(&mut self) {
        self.angle -= STEP_DEGREES;
    }

    /// The digit currently facing the front.
    ///
    /// Works back from the accumulated (negative) rotation to the ring slot
    /// sitting at 0 degrees. The remainder keeps its sign and positions land
    /// exactly on step boundaries, so the rounding is only settling
    /// floating-point dust.
    pub fn front_digit(&self) -> u8 {
        let normalized = self.angle % 360.0;
        let index = (REEL_FACES as f64 - normalized / STEP_DEGREES) % REEL_FACES as f64;
        self.ring[index.round() as usize % REEL_FACES]
    }
}

impl Default for ReelState {
    fn default() -> Self {
        Self::new()
    }
}
