use alloc::alloc::{Layout, alloc, dealloc, handle_alloc_error};
use core::{fmt, marker::PhantomData, mem, ptr::NonNull};

use crate::AllocError;
use crate::utils::IsZST;

/// An uninitialized block of memory with room for exactly `capacity` values of `T`.
///
/// The block knows nothing about the values stored in it: it never constructs,
/// reads or drops a `T`. Tracking which slots are live is the job of the owner
/// (see [`Vector`](crate::Vector)), which must drop every live value before the
/// block is released.
///
/// A block is owned by exactly one container. Ownership can be handed over with
/// [`take`](RawMemory::take) or [`swap`](RawMemory::swap); the bytes are never
/// duplicated, so there is no `Clone`.
///
/// Capacity `0` and zero sized types never reach the allocator. For zero sized
/// types the requested capacity is still recorded.
pub(crate) struct RawMemory<T> {
    buffer: NonNull<T>,
    capacity: usize,
    _marker: PhantomData<T>,
}

unsafe impl<T> Send for RawMemory<T> where T: Send {}
unsafe impl<T> Sync for RawMemory<T> where T: Sync {}

impl<T> Drop for RawMemory<T> {
    fn drop(&mut self) {
        if self.is_allocated() {
            // SAFETY: the layout was valid when the block was allocated with it.
            unsafe {
                let layout = Layout::array::<T>(self.capacity).unwrap_unchecked();
                dealloc(self.buffer.as_ptr() as *mut u8, layout);
            }
        }
    }
}

impl<T> RawMemory<T> {
    /// An empty block. Does not allocate.
    #[inline]
    pub(crate) const fn new() -> Self {
        Self {
            buffer: NonNull::dangling(),
            capacity: 0,
            _marker: PhantomData,
        }
    }

    /// Allocates a block for exactly `capacity` elements.
    ///
    /// # Panics
    /// Panics on capacity overflow; allocator failure goes through
    /// [`handle_alloc_error`].
    #[inline]
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        match Self::try_with_capacity(capacity) {
            Ok(block) => block,
            Err(err) => handle_error(err),
        }
    }

    /// Allocates a block for exactly `capacity` elements.
    pub(crate) fn try_with_capacity(capacity: usize) -> Result<Self, AllocError> {
        if capacity == 0 || T::IS_ZST {
            let mut block = Self::new();
            block.capacity = capacity;
            return Ok(block);
        }

        let layout = Layout::array::<T>(capacity).map_err(|_| AllocError::CapacityOverflow)?;

        // SAFETY: `layout` has a non-zero size.
        let ptr = unsafe { alloc(layout) } as *mut T;
        match NonNull::new(ptr) {
            Some(buffer) => Ok(Self {
                buffer,
                capacity,
                _marker: PhantomData,
            }),
            None => Err(AllocError::OutOfMemory { layout }),
        }
    }

    /// Maximum number of elements the block can hold.
    #[inline(always)]
    pub(crate) const fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline(always)]
    const fn is_allocated(&self) -> bool {
        !T::IS_ZST && self.capacity != 0
    }

    /// Base address of the block, dangling (but aligned) if nothing was allocated.
    #[inline(always)]
    pub(crate) const fn as_ptr(&self) -> *const T {
        self.buffer.as_ptr()
    }

    #[inline(always)]
    pub(crate) const fn as_mut_ptr(&mut self) -> *mut T {
        self.buffer.as_ptr()
    }

    /// Address of slot `offset`. One past the end is allowed.
    ///
    /// # Safety
    /// `offset <= capacity`.
    #[inline(always)]
    pub(crate) const unsafe fn offset(&self, offset: usize) -> *const T {
        debug_assert!(offset <= self.capacity, "offset out of block bounds");
        unsafe { self.buffer.as_ptr().add(offset) }
    }

    /// Mutable address of slot `offset`. One past the end is allowed.
    ///
    /// # Safety
    /// `offset <= capacity`.
    #[inline(always)]
    pub(crate) const unsafe fn offset_mut(&mut self, offset: usize) -> *mut T {
        debug_assert!(offset <= self.capacity, "offset out of block bounds");
        unsafe { self.buffer.as_ptr().add(offset) }
    }

    /// Exchanges the blocks owned by `self` and `other`.
    #[inline]
    pub(crate) const fn swap(&mut self, other: &mut Self) {
        mem::swap(self, other);
    }

    /// Moves the block out, leaving an empty block behind.
    #[inline]
    pub(crate) const fn take(&mut self) -> Self {
        mem::replace(self, Self::new())
    }
}

impl<T> Default for RawMemory<T> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for RawMemory<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RawMemory")
            .field("buffer", &self.buffer)
            .field("capacity", &self.capacity)
            .finish()
    }
}

/// Turns an allocation failure into the same outcome `alloc::vec::Vec` has.
#[cold]
#[inline(never)]
pub(crate) fn handle_error(err: AllocError) -> ! {
    match err {
        AllocError::CapacityOverflow => panic!("capacity overflow"),
        AllocError::OutOfMemory { layout } => handle_alloc_error(layout),
    }
}
