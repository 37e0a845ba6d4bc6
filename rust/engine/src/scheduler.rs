//! Explicit queue of scheduled actions.
//!
//! Computer players "think" by enqueueing actions with a cosmetic delay. A
//! front-end may honour the delay; tests and simulations drain the queue
//! synchronously and ignore it.

use std::collections::VecDeque;

use crate::action::Action;
use crate::engine::Engine;
use crate::errors::GameError;

/// An action waiting to be applied, with the pause a UI should show first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scheduled {
    pub action: Action,
    pub delay_ms: u64,
}

#[derive(Debug, Default, Clone)]
pub struct ActionQueue {
    items: VecDeque<Scheduled>,
}

impl ActionQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, action: Action, delay_ms: u64) {
        self.items.push_back(Scheduled { action, delay_ms });
    }

    pub fn pop(&mut self) -> Option<Scheduled> {
        self.items.pop_front()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Sum of the delays still queued.
    pub fn pending_delay_ms(&self) -> u64 {
        self.items.iter().map(|s| s.delay_ms).sum()
    }

    /// Applies queued actions in order. Stops at the first rejection, drops
    /// whatever is left and returns the error. Returns the number applied.
    pub fn drain_into(&mut self, engine: &mut Engine) -> Result<usize, GameError> {
        let mut applied = 0;
        while let Some(next) = self.items.pop_front() {
            if let Err(e) = engine.apply(next.action) {
                self.items.clear();
                return Err(e);
            }
            applied += 1;
        }
        Ok(applied)
    }
}
