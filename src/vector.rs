use alloc::vec::Vec;
use core::{
    borrow::{Borrow, BorrowMut},
    cmp::Ordering,
    fmt,
    hash::{Hash, Hasher},
    iter::FusedIterator,
    mem::ManuallyDrop,
    ops::{Deref, DerefMut, Index, IndexMut},
    ptr,
    slice::{self, SliceIndex},
};

use crate::AllocError;
use crate::raw_memory::{self, RawMemory};
use crate::relocate::{self, Relocate};
use crate::utils::{PartialRun, cold_path};

/// A contiguous growable array built on a single block of raw memory.
///
/// Elements in `[0, len)` are live, the rest of the block is uninitialized.
/// The capacity only grows: by exactly the requested amount through
/// [`reserve`](Vector::reserve) and [`resize`](Vector::resize), and by doubling
/// (starting from `1`) when [`push_back`](Vector::push_back),
/// [`insert`](Vector::insert) or one of the extending methods find the block full.
///
/// Operations that move existing elements into a new block need `T: Relocate`,
/// which decides whether the elements are moved or duplicated (see
/// [`relocate`](crate::relocate)). Whatever the choice, a reallocation that
/// fails (allocation error or panicking constructor) leaves the vector exactly
/// as it was.
///
/// # Examples
///
/// ```
/// use advanced_vector::Vector;
///
/// let mut vec = Vector::new();
/// assert_eq!(vec.capacity(), 0);
///
/// vec.push_back(1);
/// vec.push_back(2);
/// vec.push_back(3);
/// assert_eq!(vec, [1, 2, 3]);
/// assert_eq!(vec.capacity(), 4);
///
/// vec.insert(1, 99);
/// assert_eq!(vec, [1, 99, 2, 3]);
///
/// vec.erase(0);
/// assert_eq!(vec, [99, 2, 3]);
///
/// assert_eq!(vec.pop_back(), Some(3));
/// assert_eq!(vec, [99, 2]);
/// ```
pub struct Vector<T> {
    data: RawMemory<T>,
    len: usize,
}

impl<T> Drop for Vector<T> {
    fn drop(&mut self) {
        // SAFETY: `[0, len)` is live; the block is released by `RawMemory`.
        unsafe {
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(self.as_mut_ptr(), self.len));
        }
    }
}

/// Creates a [`Vector`] containing the arguments.
///
/// The syntax is similar to [`vec!`](https://doc.rust-lang.org/std/macro.vec.html).
///
/// # Examples
///
/// ```
/// # use advanced_vector::{vector, Vector};
/// let vec: Vector<String> = vector![];
/// let vec = vector![1; 5]; // Need to support Clone.
/// assert_eq!(vec, [1, 1, 1, 1, 1]);
/// let vec = vector![1, 2, 3, 4];
/// assert_eq!(vec.capacity(), 4);
/// ```
#[macro_export]
macro_rules! vector {
    [] => { $crate::Vector::new() };
    [$elem:expr; $n:expr] => { $crate::Vector::from_elem($elem, $n) };
    [$($item:expr),+ $(,)?] => { $crate::Vector::from([ $($item),+ ]) };
}

impl<T> Vector<T> {
    /// Constructs a new, empty `Vector`. Does not allocate.
    ///
    /// # Examples
    ///
    /// ```
    /// # use advanced_vector::Vector;
    /// let vec: Vector<i32> = Vector::new();
    /// assert_eq!(vec.len(), 0);
    /// assert_eq!(vec.capacity(), 0);
    /// ```
    #[inline]
    pub const fn new() -> Self {
        Self {
            data: RawMemory::new(),
            len: 0,
        }
    }

    /// Constructs an empty `Vector` with a block of exactly `capacity` elements.
    ///
    /// # Panics
    /// Panics if the capacity overflows `isize::MAX` bytes.
    ///
    /// # Examples
    ///
    /// ```
    /// # use advanced_vector::Vector;
    /// let vec: Vector<i32> = Vector::with_capacity(10);
    /// assert_eq!(vec.len(), 0);
    /// assert_eq!(vec.capacity(), 10);
    /// ```
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: RawMemory::with_capacity(capacity),
            len: 0,
        }
    }

    /// Fallible version of [`with_capacity`](Vector::with_capacity).
    #[inline]
    pub fn try_with_capacity(capacity: usize) -> Result<Self, AllocError> {
        Ok(Self {
            data: RawMemory::try_with_capacity(capacity)?,
            len: 0,
        })
    }

    /// Constructs a `Vector` of `len` elements, element `i` being `f(i)`.
    ///
    /// The block holds exactly `len` elements. If `f` panics, the elements built so far
    /// are dropped (last first) and the block is released before the panic propagates.
    ///
    /// # Examples
    ///
    /// ```
    /// # use advanced_vector::Vector;
    /// let vec = Vector::from_fn(4, |i| i * i);
    /// assert_eq!(vec, [0, 1, 4, 9]);
    /// assert_eq!(vec.capacity(), 4);
    /// ```
    pub fn from_fn<F: FnMut(usize) -> T>(len: usize, mut f: F) -> Self {
        let mut data = RawMemory::with_capacity(len);
        let mut run = PartialRun::new(data.as_mut_ptr());
        for index in 0..len {
            // SAFETY: `index < len <= capacity`, one write per slot.
            unsafe {
                run.push(f(index));
            }
        }
        let len = run.finish();
        Self { data, len }
    }

    /// Returns the number of elements in the vector.
    #[inline(always)]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the vector contains no elements.
    #[inline(always)]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of elements the current block can hold.
    #[inline(always)]
    pub const fn capacity(&self) -> usize {
        self.data.capacity()
    }

    /// Returns a raw pointer to the vector's buffer, dangling if nothing was allocated.
    ///
    /// This is the `begin` of the live range; `as_ptr().add(len())` is its `end`.
    /// The pointer is invalidated by any reallocation.
    #[inline(always)]
    pub const fn as_ptr(&self) -> *const T {
        self.data.as_ptr()
    }

    /// Returns a raw mutable pointer to the vector's buffer, dangling if nothing was allocated.
    #[inline(always)]
    pub const fn as_mut_ptr(&mut self) -> *mut T {
        self.data.as_mut_ptr()
    }

    /// Extracts a slice containing the entire vector.
    #[inline]
    pub const fn as_slice(&self) -> &[T] {
        unsafe { slice::from_raw_parts(self.as_ptr(), self.len) }
    }

    /// Extracts a mutable slice containing the entire vector.
    #[inline]
    pub const fn as_mut_slice(&mut self) -> &mut [T] {
        unsafe { slice::from_raw_parts_mut(self.as_mut_ptr(), self.len) }
    }

    /// Returns a reference to the element at `index` without bounds checking.
    ///
    /// Use indexing or `get` for the checked version.
    ///
    /// # Safety
    /// `index < len`. Only debug builds verify it.
    ///
    /// # Examples
    ///
    /// ```
    /// # use advanced_vector::vector;
    /// let vec = vector![10, 20, 30];
    /// assert_eq!(unsafe { *vec.get_unchecked(1) }, 20);
    /// ```
    #[inline(always)]
    pub unsafe fn get_unchecked(&self, index: usize) -> &T {
        debug_assert!(index < self.len, "index out of bounds");
        unsafe { &*self.as_ptr().add(index) }
    }

    /// Returns a mutable reference to the element at `index` without bounds checking.
    ///
    /// # Safety
    /// `index < len`. Only debug builds verify it.
    #[inline(always)]
    pub unsafe fn get_unchecked_mut(&mut self, index: usize) -> &mut T {
        debug_assert!(index < self.len, "index out of bounds");
        unsafe { &mut *self.as_mut_ptr().add(index) }
    }

    /// Forces the length of the vector to `new_len`.
    ///
    /// This is a low-level operation that maintains none of the normal invariants of the type.
    ///
    /// # Safety
    /// - `new_len` needs to be less than or equal to the capacity.
    /// - If the length is increased, the new elements must be initialized.
    /// - If the length is reduced, the removed elements must be dropped or forgotten by the caller.
    #[inline(always)]
    pub unsafe fn set_len(&mut self, new_len: usize) {
        debug_assert!(new_len <= self.capacity());
        self.len = new_len;
    }

    /// Shortens the vector, keeping the first `len` elements and dropping the rest.
    ///
    /// The capacity is unchanged. If `len` is greater or equal to the current
    /// length, this has no effect.
    ///
    /// # Examples
    ///
    /// ```
    /// # use advanced_vector::vector;
    /// let mut vec = vector![1, 2, 3, 4, 5];
    /// vec.truncate(2);
    /// assert_eq!(vec, [1, 2]);
    /// assert_eq!(vec.capacity(), 5);
    /// ```
    pub fn truncate(&mut self, len: usize) {
        let old_len = self.len;
        if len < old_len {
            // Shrink first, so a panicking `drop` cannot cause a double drop.
            self.len = len;
            unsafe {
                ptr::drop_in_place(ptr::slice_from_raw_parts_mut(
                    self.as_mut_ptr().add(len),
                    old_len - len,
                ));
            }
        }
    }

    /// Drops every element. The capacity is unchanged.
    #[inline]
    pub fn clear(&mut self) {
        self.truncate(0);
    }

    /// Removes the last element and returns it, or `None` if the vector is empty.
    ///
    /// Popping an empty vector is a no-op.
    ///
    /// # Time complexity
    /// O(1)
    ///
    /// # Examples
    ///
    /// ```
    /// # use advanced_vector::vector;
    /// let mut vec = vector![1, 2];
    /// assert_eq!(vec.pop_back(), Some(2));
    /// assert_eq!(vec.pop_back(), Some(1));
    /// assert_eq!(vec.pop_back(), None);
    /// assert_eq!(vec.capacity(), 2);
    /// ```
    #[inline]
    pub fn pop_back(&mut self) -> Option<T> {
        if self.len == 0 {
            cold_path();
            None
        } else {
            self.len -= 1;
            unsafe { Some(ptr::read(self.as_ptr().add(self.len))) }
        }
    }

    /// Removes the element at `index` and returns it, shifting all elements
    /// after it to the left.
    ///
    /// # Panics
    /// Panics if `index >= len`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use advanced_vector::vector;
    /// let mut vec = vector![1, 2, 3];
    /// assert_eq!(vec.remove(1), 2);
    /// assert_eq!(vec, [1, 3]);
    /// ```
    pub fn remove(&mut self, index: usize) -> T {
        let len = self.len;
        assert!(
            index < len,
            "removal index (is {index}) should be < len (is {len})"
        );

        unsafe {
            let slot = self.as_mut_ptr().add(index);
            let value = ptr::read(slot);
            ptr::copy(slot.add(1), slot, len - index - 1);
            self.len = len - 1;
            value
        }
    }

    /// Drops the element at `index`, shifting all elements after it to the left.
    ///
    /// Returns `index`, which now designates the element that followed the erased
    /// one (or the end). Every position at or after `index` is invalidated.
    ///
    /// # Panics
    /// Panics if `index >= len`.
    ///
    /// # Time complexity
    /// O(len - index)
    ///
    /// # Examples
    ///
    /// ```
    /// # use advanced_vector::vector;
    /// let mut vec = vector!["a", "b", "c"];
    /// let next = vec.erase(0);
    /// assert_eq!(vec[next], "b");
    /// assert_eq!(vec, ["b", "c"]);
    /// ```
    #[inline]
    pub fn erase(&mut self, index: usize) -> usize {
        drop(self.remove(index));
        index
    }

    /// Exchanges the contents of two vectors in O(1).
    ///
    /// Only ownership of the blocks changes hands: no element is moved, so
    /// references into either block stay meaningful for the new owner.
    ///
    /// # Examples
    ///
    /// ```
    /// # use advanced_vector::vector;
    /// let mut a = vector![1, 2, 3];
    /// let mut b = vector![4];
    /// let addr = a.as_ptr();
    ///
    /// a.swap(&mut b);
    /// assert_eq!(a, [4]);
    /// assert_eq!(b, [1, 2, 3]);
    /// assert_eq!(b.as_ptr(), addr);
    /// ```
    #[inline]
    pub const fn swap(&mut self, other: &mut Self) {
        self.data.swap(&mut other.data);
        core::mem::swap(&mut self.len, &mut other.len);
    }
}

impl<T: Default> Vector<T> {
    /// Constructs a `Vector` of `len` default values in a block of exactly `len` elements.
    ///
    /// # Examples
    ///
    /// ```
    /// # use advanced_vector::Vector;
    /// let vec: Vector<String> = Vector::with_len(3);
    /// assert_eq!(vec, ["", "", ""]);
    /// ```
    #[inline]
    pub fn with_len(len: usize) -> Self {
        Self::from_fn(len, |_| T::default())
    }
}

impl<T: Clone> Vector<T> {
    /// Constructs a `Vector` of `num` clones of `elem`.
    #[inline]
    pub fn from_elem(elem: T, num: usize) -> Self {
        Self::from_fn(num, |_| elem.clone())
    }
}

impl<T: Relocate> Vector<T> {
    /// Ensures the block can hold at least `new_capacity` elements.
    ///
    /// Unlike [`Vec::reserve`], the argument is the total capacity, not the
    /// additional one. Does nothing if the capacity is already sufficient,
    /// otherwise the new block holds exactly `new_capacity` elements.
    ///
    /// # Panics
    /// Panics if the capacity overflows `isize::MAX` bytes.
    ///
    /// # Examples
    ///
    /// ```
    /// # use advanced_vector::vector;
    /// let mut vec = vector![1];
    /// vec.reserve(10);
    /// assert_eq!(vec.capacity(), 10);
    /// vec.reserve(5);
    /// assert_eq!(vec.capacity(), 10);
    /// ```
    #[inline]
    pub fn reserve(&mut self, new_capacity: usize) {
        if let Err(err) = self.try_reserve(new_capacity) {
            raw_memory::handle_error(err);
        }
    }

    /// Fallible version of [`reserve`](Vector::reserve).
    ///
    /// On error the vector is unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// # use advanced_vector::{AllocError, Vector};
    /// let mut vec: Vector<u32> = Vector::new();
    /// assert_eq!(vec.try_reserve(8), Ok(()));
    /// assert_eq!(vec.try_reserve(usize::MAX), Err(AllocError::CapacityOverflow));
    /// assert_eq!(vec.capacity(), 8);
    /// ```
    #[inline]
    pub fn try_reserve(&mut self, new_capacity: usize) -> Result<(), AllocError> {
        if new_capacity <= self.capacity() {
            return Ok(());
        }
        self.reallocate(new_capacity)
    }

    /// Moves every element into a new block of exactly `new_capacity`.
    #[inline(never)]
    fn reallocate(&mut self, new_capacity: usize) -> Result<(), AllocError> {
        debug_assert!(new_capacity > self.capacity());
        log::trace!(
            "growing vector block from {} to {} elements",
            self.capacity(),
            new_capacity
        );

        let mut block: RawMemory<T> = RawMemory::try_with_capacity(new_capacity)?;
        // SAFETY: `[0, len)` is live and the new block has room for it. If a
        // duplicate panics, `block` is released and `self` was never touched.
        unsafe {
            relocate::migrate(self.as_ptr(), block.as_mut_ptr(), self.len);
            relocate::retire(self.as_mut_ptr(), self.len);
        }
        self.data.swap(&mut block);
        Ok(())
    }

    /// Capacity of the block allocated when the current one is full.
    #[inline]
    fn grown_capacity(&self) -> Result<usize, AllocError> {
        if self.len == 0 {
            Ok(1)
        } else {
            self.len
                .checked_mul(2)
                .ok_or(AllocError::CapacityOverflow)
        }
    }

    /// Makes room for `additional` more elements.
    ///
    /// When the block has to grow, the new capacity is at least the one
    /// [`push_back`](Vector::push_back) would pick, so appending piecewise
    /// stays amortized O(1). On error the vector is unchanged.
    pub(crate) fn try_reserve_amortized(&mut self, additional: usize) -> Result<(), AllocError> {
        let needed = self
            .len
            .checked_add(additional)
            .ok_or(AllocError::CapacityOverflow)?;
        if needed <= self.capacity() {
            return Ok(());
        }
        let target = needed.max(self.grown_capacity()?);
        self.reallocate(target)
    }

    #[inline]
    fn reserve_amortized(&mut self, additional: usize) {
        if let Err(err) = self.try_reserve_amortized(additional) {
            raw_memory::handle_error(err);
        }
    }

    /// Resizes the vector so that `len == new_len`, filling new slots with `f()`.
    ///
    /// Growing past the capacity first reserves exactly `new_len`. Shrinking drops
    /// the surplus elements.
    ///
    /// If `f` panics, the elements it already produced during this call are
    /// dropped and the length is unchanged (the capacity may have grown).
    ///
    /// # Examples
    ///
    /// ```
    /// # use advanced_vector::vector;
    /// let mut vec = vector![1, 2];
    /// let mut next = 10;
    /// vec.resize_with(4, || { next += 1; next });
    /// assert_eq!(vec, [1, 2, 11, 12]);
    /// assert_eq!(vec.capacity(), 4);
    ///
    /// vec.resize_with(1, || unreachable!());
    /// assert_eq!(vec, [1]);
    /// ```
    #[inline]
    pub fn resize_with<F: FnMut() -> T>(&mut self, new_len: usize, f: F) {
        if let Err(err) = self.try_resize_with(new_len, f) {
            raw_memory::handle_error(err);
        }
    }

    /// Fallible version of [`resize_with`](Vector::resize_with).
    pub fn try_resize_with<F: FnMut() -> T>(
        &mut self,
        new_len: usize,
        mut f: F,
    ) -> Result<(), AllocError> {
        let len = self.len;
        if new_len <= len {
            self.truncate(new_len);
            return Ok(());
        }

        self.try_reserve(new_len)?;

        // SAFETY: the block holds at least `new_len` slots and `[len, new_len)`
        // is uninitialized.
        unsafe {
            let mut run = PartialRun::new(self.data.offset_mut(len));
            for _ in len..new_len {
                run.push(f());
            }
            self.len = len + run.finish();
        }
        Ok(())
    }

    /// Appends an element to the back of the vector.
    ///
    /// When the block is full it is replaced by one twice as large (`1` for an
    /// empty vector).
    ///
    /// # Panics
    /// Panics if the capacity overflows `isize::MAX` bytes.
    ///
    /// # Time complexity
    /// Amortized O(1)
    ///
    /// # Examples
    ///
    /// ```
    /// # use advanced_vector::Vector;
    /// let mut vec = Vector::new();
    /// let mut seen = vec![vec.capacity()];
    /// for i in 0..5 {
    ///     vec.push_back(i);
    ///     seen.push(vec.capacity());
    /// }
    /// assert_eq!(seen, [0, 1, 2, 4, 4, 8]);
    /// ```
    #[inline]
    pub fn push_back(&mut self, value: T) {
        self.emplace_back(|| value);
    }

    /// Fallible version of [`push_back`](Vector::push_back).
    ///
    /// On error the vector is unchanged and `value` is dropped.
    #[inline]
    pub fn try_push_back(&mut self, value: T) -> Result<(), AllocError> {
        self.try_emplace(self.len, || value).map(|_| ())
    }

    /// Constructs an element from `f()` at the back of the vector and returns a
    /// reference to it.
    ///
    /// If the block is full, the new element is built directly in its final slot
    /// of the new block before the existing elements are migrated around it. If
    /// `f` or the migration panics, the vector is unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// # use advanced_vector::Vector;
    /// let mut vec: Vector<String> = Vector::new();
    /// let s = vec.emplace_back(|| "hello".to_owned());
    /// s.push_str(" world");
    /// assert_eq!(vec, ["hello world"]);
    /// ```
    #[inline]
    pub fn emplace_back<F: FnOnce() -> T>(&mut self, f: F) -> &mut T {
        let index = self.emplace(self.len, f);
        unsafe { self.get_unchecked_mut(index) }
    }

    /// Inserts `value` before position `index`, shifting all elements after it
    /// to the right, and returns `index`.
    ///
    /// # Panics
    /// Panics if `index > len`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use advanced_vector::vector;
    /// let mut vec = vector![1, 2, 3];
    /// assert_eq!(vec.insert(1, 99), 1);
    /// assert_eq!(vec, [1, 99, 2, 3]);
    /// vec.insert(4, 100);
    /// assert_eq!(vec, [1, 99, 2, 3, 100]);
    /// ```
    #[inline]
    pub fn insert(&mut self, index: usize, value: T) -> usize {
        self.emplace(index, || value)
    }

    /// Constructs an element from `f()` before position `index` and returns `index`.
    ///
    /// See [`try_emplace`](Vector::try_emplace) for the failure guarantees.
    ///
    /// # Panics
    /// Panics if `index > len` or the capacity overflows `isize::MAX` bytes.
    #[inline]
    pub fn emplace<F: FnOnce() -> T>(&mut self, index: usize, f: F) -> usize {
        match self.try_emplace(index, f) {
            Ok(index) => index,
            Err(err) => raw_memory::handle_error(err),
        }
    }

    /// Constructs an element from `f()` before position `index` and returns `index`.
    ///
    /// - With spare capacity, `f()` is evaluated first, then `[index, len)` is
    ///   shifted one slot to the right and the new value placed at `index`.
    /// - With a full block, a block of twice the length (`1` if empty) is
    ///   allocated, `f()` is written straight to slot `index` of it, and the prefix
    ///   `[0, index)` and then the suffix `[index, len)` are migrated around it.
    ///
    /// In both cases a failure (allocation error, panicking `f` or panicking
    /// migration) leaves the vector unchanged; anything already built in the new
    /// block is dropped and the block released.
    ///
    /// # Panics
    /// Panics if `index > len`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use advanced_vector::vector;
    /// let mut vec = vector![1, 3];
    /// assert_eq!(vec.try_emplace(1, || 2), Ok(1));
    /// assert_eq!(vec, [1, 2, 3]);
    /// assert_eq!(vec.capacity(), 4);
    /// ```
    pub fn try_emplace<F: FnOnce() -> T>(
        &mut self,
        index: usize,
        f: F,
    ) -> Result<usize, AllocError> {
        let len = self.len;
        assert!(
            index <= len,
            "insertion index (is {index}) should be <= len (is {len})"
        );

        if len < self.capacity() {
            let value = f();
            // SAFETY: `index <= len < capacity`; the slot at `len` is free.
            unsafe {
                let slot = self.data.offset_mut(index);
                if index < len {
                    ptr::copy(slot, slot.add(1), len - index);
                }
                ptr::write(slot, value);
            }
            self.len = len + 1;
        } else {
            cold_path();
            self.emplace_reallocating(index, f)?;
        }
        Ok(index)
    }

    #[inline(never)]
    fn emplace_reallocating<F: FnOnce() -> T>(
        &mut self,
        index: usize,
        f: F,
    ) -> Result<(), AllocError> {
        let len = self.len;
        let new_capacity = self.grown_capacity()?;
        log::trace!(
            "growing vector block from {} to {} elements",
            self.capacity(),
            new_capacity
        );

        let mut block: RawMemory<T> = RawMemory::try_with_capacity(new_capacity)?;

        // SAFETY: `index <= len < new_capacity`. Each guard owns exactly what has
        // been built in `block` so far; on unwind it drops that and `block` is
        // released, while `[0, len)` of `self` is never touched before `retire`.
        unsafe {
            let base = block.as_mut_ptr();
            let slot = base.add(index);

            ptr::write(slot, f());
            let placed = PartialRun::adopt(slot, 1);
            relocate::migrate(self.as_ptr(), base, index);
            placed.finish();

            let built = PartialRun::adopt(base, index + 1);
            relocate::migrate(self.as_ptr().add(index), slot.add(1), len - index);
            built.finish();

            relocate::retire(self.as_mut_ptr(), len);
        }

        self.data.swap(&mut block);
        self.len = len + 1;
        Ok(())
    }
}

impl<T: Default + Relocate> Vector<T> {
    /// Resizes the vector so that `len == new_len`, filling new slots with
    /// `T::default()`.
    ///
    /// See [`resize_with`](Vector::resize_with).
    ///
    /// # Examples
    ///
    /// ```
    /// # use advanced_vector::vector;
    /// let mut vec = vector![1, 2, 3];
    /// vec.resize(5);
    /// assert_eq!(vec, [1, 2, 3, 0, 0]);
    /// vec.resize(2);
    /// assert_eq!(vec, [1, 2]);
    /// assert_eq!(vec.capacity(), 5);
    /// ```
    #[inline]
    pub fn resize(&mut self, new_len: usize) {
        self.resize_with(new_len, T::default);
    }
}

impl<T: Clone + Relocate> Vector<T> {
    /// Clones and appends all elements in a slice to the vector.
    ///
    /// Reserves room for all of them up front (growing the block at least as
    /// much as `push_back` would); if a clone panics, the clones already
    /// appended by this call are dropped again.
    ///
    /// # Examples
    ///
    /// ```
    /// # use advanced_vector::vector;
    /// let mut vec = vector![1];
    /// vec.extend_from_slice(&[2, 3, 4]);
    /// assert_eq!(vec, [1, 2, 3, 4]);
    /// ```
    pub fn extend_from_slice(&mut self, other: &[T]) {
        self.reserve_amortized(other.len());
        let len = self.len;

        unsafe {
            let mut run = PartialRun::new(self.data.offset_mut(len));
            for item in other {
                run.push(item.clone());
            }
            self.len = len + run.finish();
        }
    }
}

impl<T> Default for Vector<T> {
    /// Constructs an empty `Vector`, same as [`Vector::new`].
    ///
    /// `core::mem::take` therefore moves a vector out and leaves an empty one
    /// (capacity `0`) behind.
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for Vector<T> {
    /// Clones every element into a block of exactly `len` elements.
    ///
    /// # Examples
    ///
    /// ```
    /// # use advanced_vector::Vector;
    /// let mut vec = Vector::with_capacity(10);
    /// vec.push_back(1);
    ///
    /// let copy = vec.clone();
    /// assert_eq!(copy, [1]);
    /// assert_eq!(copy.capacity(), 1);
    /// ```
    fn clone(&self) -> Self {
        Self::from_fn(self.len, |index| unsafe { self.get_unchecked(index) }.clone())
    }

    /// Makes `self` a copy of `source`, reusing the current block when it is
    /// large enough.
    ///
    /// If `source` does not fit, a full clone is built first and swapped in, so a
    /// panicking clone leaves `self` untouched. Otherwise the common prefix is
    /// assigned element by element with [`Clone::clone_from`], then the surplus is
    /// dropped or the missing tail cloned into the free slots.
    ///
    /// # Examples
    ///
    /// ```
    /// # use advanced_vector::vector;
    /// let mut dst = vector![7, 7, 7, 7];
    /// dst.clone_from(&vector![1, 2]);
    /// assert_eq!(dst, [1, 2]);
    /// assert_eq!(dst.capacity(), 4);
    ///
    /// dst.clone_from(&vector![1, 2, 3, 4, 5]);
    /// assert_eq!(dst, [1, 2, 3, 4, 5]);
    /// assert_eq!(dst.capacity(), 5);
    /// ```
    fn clone_from(&mut self, source: &Self) {
        if source.len > self.capacity() {
            let mut copy = source.clone();
            self.swap(&mut copy);
            return;
        }

        let len = self.len;
        let shared = len.min(source.len);
        self.as_mut_slice()[..shared].clone_from_slice(&source.as_slice()[..shared]);

        if source.len < len {
            self.truncate(source.len);
        } else {
            // SAFETY: `source.len <= capacity`, `[len, source.len)` is uninitialized.
            unsafe {
                let mut run = PartialRun::new(self.data.offset_mut(len));
                for item in &source.as_slice()[len..] {
                    run.push(item.clone());
                }
                self.len = len + run.finish();
            }
        }
    }
}

impl<T: Relocate> Extend<T> for Vector<T> {
    /// Reserves for the lower bound of the size hint, then appends one by one.
    ///
    /// Growth follows the same doubling policy as [`push_back`](Vector::push_back),
    /// so extending one element at a time is amortized O(1).
    ///
    /// # Examples
    ///
    /// ```
    /// # use advanced_vector::Vector;
    /// let mut vec = Vector::new();
    /// vec.extend([1, 2, 3]);
    /// assert_eq!(vec, [1, 2, 3]);
    /// assert_eq!(vec.capacity(), 3);
    /// ```
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        let (lower, _) = iter.size_hint();
        self.reserve_amortized(lower);
        for item in iter {
            self.push_back(item);
        }
    }
}

impl<'a, T: 'a + Clone + Relocate> Extend<&'a T> for Vector<T> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        let (lower, _) = iter.size_hint();
        self.reserve_amortized(lower);
        for item in iter {
            self.push_back(item.clone());
        }
    }
}

impl<T: Relocate> FromIterator<T> for Vector<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut vec = Self::new();
        vec.extend(iter);
        vec
    }
}

impl<T, const N: usize> From<[T; N]> for Vector<T> {
    /// Moves the array into a block of exactly `N` elements.
    fn from(arr: [T; N]) -> Self {
        let mut data = RawMemory::with_capacity(N);
        let arr = ManuallyDrop::new(arr);
        unsafe {
            ptr::copy_nonoverlapping(arr.as_ptr(), data.as_mut_ptr(), N);
        }
        Self { data, len: N }
    }
}

impl<T: Clone> From<&[T]> for Vector<T> {
    #[inline]
    fn from(slice: &[T]) -> Self {
        Self::from_fn(slice.len(), |index| slice[index].clone())
    }
}

impl<T: Clone> From<&mut [T]> for Vector<T> {
    #[inline]
    fn from(slice: &mut [T]) -> Self {
        Self::from(&*slice)
    }
}

impl<T> From<Vec<T>> for Vector<T> {
    /// Moves the elements of `vec` into a block of exactly `vec.len()` elements.
    fn from(mut vec: Vec<T>) -> Self {
        let len = vec.len();
        let mut data = RawMemory::with_capacity(len);
        unsafe {
            ptr::copy_nonoverlapping(vec.as_ptr(), data.as_mut_ptr(), len);
            vec.set_len(0);
        }
        Self { data, len }
    }
}

impl<T> From<Vector<T>> for Vec<T> {
    fn from(mut vec: Vector<T>) -> Self {
        let len = vec.len;
        let mut out = Vec::with_capacity(len);
        unsafe {
            ptr::copy_nonoverlapping(vec.as_ptr(), out.as_mut_ptr(), len);
            out.set_len(len);
            vec.len = 0;
        }
        out
    }
}

impl<T> Deref for Vector<T> {
    type Target = [T];
    #[inline]
    fn deref(&self) -> &Self::Target {
        self.as_slice()
    }
}

impl<T> DerefMut for Vector<T> {
    #[inline]
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.as_mut_slice()
    }
}

impl<T: fmt::Debug> fmt::Debug for Vector<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.as_slice(), f)
    }
}

impl<T> AsRef<[T]> for Vector<T> {
    #[inline]
    fn as_ref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T> AsMut<[T]> for Vector<T> {
    #[inline]
    fn as_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T> Borrow<[T]> for Vector<T> {
    #[inline]
    fn borrow(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T> BorrowMut<[T]> for Vector<T> {
    #[inline]
    fn borrow_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T: Hash> Hash for Vector<T> {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        Hash::hash(self.as_slice(), state);
    }
}

impl<T, I: SliceIndex<[T]>> Index<I> for Vector<T> {
    type Output = I::Output;
    #[inline]
    fn index(&self, index: I) -> &Self::Output {
        Index::index(self.as_slice(), index)
    }
}

impl<T, I: SliceIndex<[T]>> IndexMut<I> for Vector<T> {
    #[inline]
    fn index_mut(&mut self, index: I) -> &mut Self::Output {
        IndexMut::index_mut(self.as_mut_slice(), index)
    }
}

impl<'a, T> IntoIterator for &'a Vector<T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;
    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

impl<'a, T> IntoIterator for &'a mut Vector<T> {
    type Item = &'a mut T;
    type IntoIter = slice::IterMut<'a, T>;
    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.as_mut_slice().iter_mut()
    }
}

impl<T: Ord> Ord for Vector<T> {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        Ord::cmp(self.as_slice(), other.as_slice())
    }
}

impl<T: PartialOrd> PartialOrd for Vector<T> {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        PartialOrd::partial_cmp(self.as_slice(), other.as_slice())
    }
}

impl<T: Eq> Eq for Vector<T> {}

macro_rules! impl_slice_eq {
    ($([$($vars:tt)*] $rhs:ty),* $(,)?) => {
        $(
            impl<T, U, $($vars)*> PartialEq<$rhs> for Vector<T>
            where
                T: PartialEq<U>,
            {
                #[inline]
                fn eq(&self, other: &$rhs) -> bool {
                    PartialEq::eq(self.as_slice(), &other[..])
                }
            }
        )*
    };
}

impl_slice_eq! {
    [] Vector<U>,
    [] Vec<U>,
    [] [U],
    [] &[U],
    [] &mut [U],
    [const N: usize] [U; N],
    [const N: usize] &[U; N],
}

/// An iterator that consumes a [`Vector`] and yields its items by value.
///
/// # Examples
///
/// ```
/// # use advanced_vector::vector;
/// let vec = vector!["1", "2", "3"];
/// let mut iter = vec.into_iter();
///
/// assert_eq!(iter.next(), Some("1"));
/// assert_eq!(iter.next_back(), Some("3"));
/// assert_eq!(iter.as_slice(), ["2"]);
/// ```
pub struct IntoIter<T> {
    data: RawMemory<T>,
    start: usize,
    end: usize,
}

impl<T> IntoIterator for Vector<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        let mut vec = ManuallyDrop::new(self);
        IntoIter {
            data: vec.data.take(),
            start: 0,
            end: vec.len,
        }
    }
}

impl<T> IntoIter<T> {
    /// Returns the remaining items as a slice.
    pub fn as_slice(&self) -> &[T] {
        unsafe { slice::from_raw_parts(self.data.as_ptr().add(self.start), self.end - self.start) }
    }

    /// Returns the remaining items as a mutable slice.
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        unsafe {
            slice::from_raw_parts_mut(self.data.as_mut_ptr().add(self.start), self.end - self.start)
        }
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.start < self.end {
            self.start += 1;
            unsafe { Some(ptr::read(self.data.offset(self.start - 1))) }
        } else {
            None
        }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let v = self.end - self.start;
        (v, Some(v))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.start < self.end {
            self.end -= 1;
            unsafe { Some(ptr::read(self.data.offset(self.end))) }
        } else {
            None
        }
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {
    #[inline]
    fn len(&self) -> usize {
        self.end - self.start
    }
}

impl<T> FusedIterator for IntoIter<T> {}

impl<T> Drop for IntoIter<T> {
    fn drop(&mut self) {
        unsafe {
            ptr::drop_in_place(self.as_mut_slice());
        }
    }
}

impl<T> Default for IntoIter<T> {
    fn default() -> Self {
        Vector::new().into_iter()
    }
}

impl<T: Clone> Clone for IntoIter<T> {
    fn clone(&self) -> Self {
        Vector::from(self.as_slice()).into_iter()
    }
}

impl<T: fmt::Debug> fmt::Debug for IntoIter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IntoIter").field(&self.as_slice()).finish()
    }
}
