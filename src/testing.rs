//! Instrumented element types for unit tests.
//!
//! Counters are per thread, so tests running in parallel do not see each other.

extern crate std;

use core::cell::Cell;
use std::thread_local;

thread_local! {
    static CLONES: Cell<usize> = const { Cell::new(0) };
    static DROPS: Cell<usize> = const { Cell::new(0) };
    static DEFAULTS: Cell<usize> = const { Cell::new(0) };
    static FAIL_AFTER: Cell<Option<usize>> = const { Cell::new(None) };
}

/// Handle to this thread's counters.
#[derive(Clone, Copy)]
pub(crate) struct Counters;

impl Counters {
    /// Zeroes every counter and disarms failure injection.
    pub(crate) fn reset() -> Self {
        CLONES.set(0);
        DROPS.set(0);
        DEFAULTS.set(0);
        FAIL_AFTER.set(None);
        Counters
    }

    pub(crate) fn clones(&self) -> usize {
        CLONES.get()
    }

    pub(crate) fn drops(&self) -> usize {
        DROPS.get()
    }

    pub(crate) fn defaults(&self) -> usize {
        DEFAULTS.get()
    }

    /// The next `n` constructions succeed, the one after panics.
    pub(crate) fn fail_after(&self, n: usize) {
        FAIL_AFTER.set(Some(n));
    }

    pub(crate) fn disarm(&self) {
        FAIL_AFTER.set(None);
    }
}

/// Panics if the failure budget is used up, otherwise spends one unit of it.
fn construct() {
    if let Some(left) = FAIL_AFTER.get() {
        if left == 0 {
            panic!("injected construction failure");
        }
        FAIL_AFTER.set(Some(left - 1));
    }
}

macro_rules! tracked_type {
    ($name:ident) => {
        #[derive(Debug, PartialEq, Eq)]
        pub(crate) struct $name {
            pub(crate) value: i32,
        }

        impl $name {
            pub(crate) fn new(value: i32) -> Self {
                Self { value }
            }
        }

        impl Clone for $name {
            fn clone(&self) -> Self {
                construct();
                CLONES.set(CLONES.get() + 1);
                Self { value: self.value }
            }
        }

        impl Default for $name {
            fn default() -> Self {
                construct();
                DEFAULTS.set(DEFAULTS.get() + 1);
                Self { value: 0 }
            }
        }

        impl Drop for $name {
            fn drop(&mut self) {
                DROPS.set(DROPS.get() + 1);
            }
        }
    };
}

tracked_type!(Tracked);
tracked_type!(Fragile);

// Relocates bitwise; clones only when asked to.
crate::relocate_by_move!(Tracked);
// Every reallocation duplicates through `Clone`.
crate::relocate_by_copy!(Fragile);
