use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use serde::{Deserialize, Serialize};

use crate::tiles::Face;

/// Wheels each player holds per round.
pub const WHEEL_SLOTS: usize = 5;

/// One wheel: its current face and whether it has been spent this round.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct WheelSlot {
    pub face: Face,
    pub used: bool,
}

/// A player's five wheels for the current round.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Loadout {
    slots: [WheelSlot; WHEEL_SLOTS],
}

impl Default for Loadout {
    fn default() -> Self {
        Self {
            slots: [WheelSlot {
                face: Face::Atk,
                used: false,
            }; WHEEL_SLOTS],
        }
    }
}

impl Loadout {
    pub fn slots(&self) -> &[WheelSlot; WHEEL_SLOTS] {
        &self.slots
    }

    pub fn face(&self, wheel: usize) -> Option<Face> {
        self.slots.get(wheel).map(|s| s.face)
    }

    /// In range and not yet spent.
    pub fn is_available(&self, wheel: usize) -> bool {
        self.slots.get(wheel).is_some_and(|s| !s.used)
    }

    /// Indices of unspent wheels.
    pub fn available(&self) -> Vec<usize> {
        (0..WHEEL_SLOTS).filter(|&w| self.is_available(w)).collect()
    }

    pub fn unused_eclipses(&self) -> usize {
        self.slots
            .iter()
            .filter(|s| !s.used && s.face.is_eclipse())
            .count()
    }

    pub(crate) fn set_used(&mut self, wheel: usize, used: bool) {
        if let Some(s) = self.slots.get_mut(wheel) {
            s.used = used;
        }
    }

    /// Overwrites the faces of unspent wheels, leaving spent ones alone.
    pub(crate) fn set_unused_faces(&mut self, faces: [Face; WHEEL_SLOTS]) {
        for (slot, face) in self.slots.iter_mut().zip(faces) {
            if !slot.used {
                slot.face = face;
            }
        }
    }
}

/// Seeded face generator shared by both players' wheels.
#[derive(Debug, Clone)]
pub struct WheelRoller {
    rng: ChaCha20Rng,
    eclipse_chance: f64,
}

impl WheelRoller {
    pub fn new_with_seed(seed: u64, eclipse_chance: f64) -> Self {
        Self {
            rng: ChaCha20Rng::seed_from_u64(seed),
            eclipse_chance: eclipse_chance.clamp(0.0, 1.0),
        }
    }

    /// Rolls faces into `loadout`.
    ///
    /// With `only_unused` the spent wheels keep their faces; otherwise every
    /// slot is reseeded and marked unused (round start). At most one eclipse
    /// comes out of a single call, and none when `eclipse_allowed` is false.
    pub fn roll_faces(&mut self, loadout: &mut Loadout, only_unused: bool, eclipse_allowed: bool) {
        let mut eclipse_rolled = false;
        for slot in loadout.slots.iter_mut() {
            if only_unused && slot.used {
                continue;
            }
            slot.used = false;
            slot.face = if eclipse_allowed && !eclipse_rolled && self.rng.random_bool(self.eclipse_chance) {
                eclipse_rolled = true;
                Face::Eclipse
            } else {
                Face::BASIC[self.rng.random_range(0..Face::BASIC.len())]
            };
        }
    }

    pub fn coin_flip(&mut self) -> bool {
        self.rng.random_bool(0.5)
    }
}
