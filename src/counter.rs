//! Shared integer cell
//!
//! Several objects observe and mutate one logical quantity (lives, bricks
//! left, paddles alive). Cloning a `Counter` hands out another handle to the
//! same value; use `Counter::new` for an independent one.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

/// A reference-counted mutable integer.
///
/// Single-threaded by construction (`Rc`), which matches the frame-stepped
/// simulation: every mutation happens on the one thread driving `update`.
#[derive(Clone, Default)]
pub struct Counter(Rc<Cell<i32>>);

impl Counter {
    pub fn new(value: i32) -> Self {
        Self(Rc::new(Cell::new(value)))
    }

    #[inline]
    pub fn value(&self) -> i32 {
        self.0.get()
    }

    #[inline]
    pub fn increment(&self) {
        self.0.set(self.0.get() + 1);
    }

    /// Not clamped at zero; index-like counters must be guarded by the caller.
    #[inline]
    pub fn decrement(&self) {
        self.0.set(self.0.get() - 1);
    }

    /// Reset to zero
    #[inline]
    pub fn reset(&self) {
        self.0.set(0);
    }

    #[inline]
    pub fn set(&self, value: i32) {
        self.0.set(value);
    }

    /// Whether two handles point at the same cell
    pub fn shares_with(&self, other: &Counter) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Counter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Counter").field(&self.value()).finish()
    }
}
