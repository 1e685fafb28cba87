//! Player input
//!
//! Jumping is gated by a lock: it starts locked, a jump locks it, and
//! landing on the ground unlocks it.

/// Input reported by the host
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputEvent {
    /// The user asked the bunny to jump (tap, click, key press)
    JumpRequested,
}

/// Whether a jump may be applied right now
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InputLock {
    locked: bool,
}

impl Default for InputLock {
    fn default() -> Self {
        Self::new()
    }
}

impl InputLock {
    /// New locks start locked: no jump before the first landing
    pub fn new() -> Self {
        Self { locked: true }
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn lock(&mut self) {
        self.locked = true;
    }

    pub fn unlock(&mut self) {
        self.locked = false;
    }

    /// Take the lock if it is free. Returns whether a jump may proceed.
    pub fn try_acquire(&mut self) -> bool {
        if self.locked {
            false
        } else {
            self.locked = true;
            true
        }
    }
}
