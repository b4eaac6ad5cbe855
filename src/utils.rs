use core::{mem, ptr};

pub(crate) trait IsZST {
    const IS_ZST: bool;
}

impl<T> IsZST for T {
    const IS_ZST: bool = mem::size_of::<T>() == 0;
}

/// Marks the enclosing branch as unlikely.
#[cold]
#[inline(always)]
pub(crate) const fn cold_path() {}

/// A run of elements constructed in place by an operation that has not finished yet.
///
/// If the run is dropped before [`finish`](PartialRun::finish) is called (a constructor
/// panicked and the stack is unwinding) every element of the run is dropped again,
/// last first. The memory itself is never released here; it belongs to a
/// [`RawMemory`](crate::raw_memory::RawMemory) owned by the caller.
pub(crate) struct PartialRun<T> {
    start: *mut T,
    len: usize,
}

impl<T> PartialRun<T> {
    /// Starts an empty run at `start`.
    #[inline(always)]
    pub(crate) const fn new(start: *mut T) -> Self {
        Self { start, len: 0 }
    }

    /// Adopts `len` elements that are already live at `start`.
    ///
    /// # Safety
    /// `[start, start + len)` must hold live elements that nobody else will drop.
    #[inline(always)]
    pub(crate) const unsafe fn adopt(start: *mut T, len: usize) -> Self {
        Self { start, len }
    }

    /// Writes `value` into the next slot of the run.
    ///
    /// # Safety
    /// The slot at `start + len` must be valid for writes and uninitialized.
    #[inline(always)]
    pub(crate) unsafe fn push(&mut self, value: T) {
        unsafe {
            ptr::write(self.start.add(self.len), value);
        }
        self.len += 1;
    }

    /// Disarms the guard and returns the number of elements constructed.
    #[inline(always)]
    pub(crate) fn finish(self) -> usize {
        let len = self.len;
        mem::forget(self);
        len
    }
}

impl<T> Drop for PartialRun<T> {
    fn drop(&mut self) {
        if self.len > 0 {
            log::debug!("rolling back {} partially constructed element(s)", self.len);
        }
        while self.len > 0 {
            self.len -= 1;
            // SAFETY: every slot below `len` was written by `push` or adopted live.
            unsafe {
                ptr::drop_in_place(self.start.add(self.len));
            }
        }
    }
}
