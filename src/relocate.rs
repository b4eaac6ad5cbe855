//! How a [`Vector`](crate::Vector) carries existing elements into a new block.
//!
//! Whenever a vector outgrows its block (through `reserve`, a growing `resize`,
//! `push_back` or `insert` at full capacity) the live elements have to end up in
//! a freshly allocated block. There are two ways to get them there, and the
//! element type picks one by implementing [`Relocate`]:
//!
//! - [`Migration::Move`]: the element can be moved to a new address without
//!   anything going wrong. The elements are relocated bitwise and the old slots
//!   are abandoned. This is the right choice for almost every Rust type.
//! - [`Migration::Copy`]: the element does not trust relocation (for example
//!   its address is registered somewhere, or producing a relocated value runs
//!   code that may panic). Each element is duplicated into the new block and the
//!   originals are dropped only after every duplicate exists, so a panic halfway
//!   through leaves the vector exactly as it was.
//!
//! ```
//! use advanced_vector::{relocate_by_copy, Vector};
//!
//! #[derive(Clone, Debug, PartialEq)]
//! struct Ticket(u32);
//!
//! relocate_by_copy!(Ticket);
//!
//! let mut vec: Vector<Ticket> = Vector::new();
//! vec.push_back(Ticket(1));
//! vec.push_back(Ticket(2)); // reallocates by cloning `Ticket(1)`
//! assert_eq!(vec, [Ticket(1), Ticket(2)]);
//! ```

use alloc::{boxed::Box, rc::Rc, string::String, sync::Arc, vec::Vec};
use core::{cell::Cell, fmt, ptr};

use crate::utils::PartialRun;

/// The strategy used to carry an element into a new block.
pub enum Migration<T> {
    /// Relocate bitwise. Never fails.
    Move,
    /// Duplicate with the given function, then drop the original.
    Copy(fn(&T) -> T),
}

impl<T> Migration<T> {
    /// Returns `true` if migrating consumes the source elements.
    #[inline(always)]
    pub const fn consumes_source(&self) -> bool {
        matches!(self, Migration::Move)
    }
}

impl<T> Clone for Migration<T> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Migration<T> {}

impl<T> fmt::Debug for Migration<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Migration::Move => f.write_str("Move"),
            Migration::Copy(_) => f.write_str("Copy"),
        }
    }
}

/// Declares how values of a type are carried into a new block.
///
/// There is no blanket implementation: a type states whether its relocation
/// can be trusted. Use [`relocate_by_move!`](crate::relocate_by_move)
/// or [`relocate_by_copy!`](crate::relocate_by_copy) for your own types.
///
/// Types that own their elements through a pointer (`Box`, `Vec`, `Rc`,
/// `Arc`, `Vector`) always move. Types holding a value inline (`Option`,
/// [`Optional`](crate::Optional), arrays, tuples) move only if their fields do,
/// and duplicate field by field otherwise.
///
/// # Examples
///
/// ```
/// use advanced_vector::{Migration, Relocate};
///
/// struct Handle(u32);
///
/// impl Relocate for Handle {
///     const MIGRATION: Migration<Self> = Migration::Move;
/// }
///
/// assert!(Handle::MIGRATION.consumes_source());
/// ```
pub trait Relocate: Sized {
    /// The strategy used by every reallocation of a [`Vector`](crate::Vector) of `Self`.
    const MIGRATION: Migration<Self>;
}

/// Implements [`Relocate`] with [`Migration::Move`] for the listed types.
///
/// ```
/// # use advanced_vector::{relocate_by_move, Vector};
/// struct Point { x: i32, y: i32 }
/// relocate_by_move!(Point);
///
/// let mut vec = Vector::new();
/// vec.push_back(Point { x: 1, y: 2 });
/// assert_eq!(vec[0].y, 2);
/// ```
#[macro_export]
macro_rules! relocate_by_move {
    ($($ty:ty),* $(,)?) => {
        $(
            impl $crate::Relocate for $ty {
                const MIGRATION: $crate::Migration<Self> = $crate::Migration::Move;
            }
        )*
    };
}

/// Implements [`Relocate`] with [`Migration::Copy`] (through [`Clone::clone`])
/// for the listed types.
#[macro_export]
macro_rules! relocate_by_copy {
    ($($ty:ty),* $(,)?) => {
        $(
            impl $crate::Relocate for $ty {
                const MIGRATION: $crate::Migration<Self> =
                    $crate::Migration::Copy(<$ty as ::core::clone::Clone>::clone);
            }
        )*
    };
}

relocate_by_move!(
    (),
    bool,
    char,
    u8,
    u16,
    u32,
    u64,
    u128,
    usize,
    i8,
    i16,
    i32,
    i64,
    i128,
    isize,
    f32,
    f64,
    String,
);

macro_rules! relocate_generic_by_move {
    ($(<$($param:ident $(: ?$unsized:ident)?),*> $ty:ty),* $(,)?) => {
        $(
            impl<$($param $(: ?$unsized)?),*> Relocate for $ty {
                const MIGRATION: Migration<Self> = Migration::Move;
            }
        )*
    };
}

relocate_generic_by_move!(
    <T: ?Sized> Box<T>,
    <T: ?Sized> Rc<T>,
    <T: ?Sized> Arc<T>,
    <T> Vec<T>,
    <T> crate::Vector<T>,
);

impl<T: ?Sized> Relocate for &T {
    const MIGRATION: Migration<Self> = Migration::Move;
}

impl<T: ?Sized> Relocate for &mut T {
    const MIGRATION: Migration<Self> = Migration::Move;
}

impl<T: Copy> Relocate for Cell<T> {
    const MIGRATION: Migration<Self> = Migration::Move;
}

/// Duplicates one component of a composite whose own policy is a copy.
#[inline]
fn duplicate<T: Relocate>(value: &T) -> T {
    match T::MIGRATION {
        Migration::Copy(copy) => copy(value),
        Migration::Move => unreachable!("component relocates by move"),
    }
}

fn duplicate_option<T: Relocate>(value: &Option<T>) -> Option<T> {
    value.as_ref().map(duplicate)
}

fn duplicate_optional<T: Relocate>(value: &crate::Optional<T>) -> crate::Optional<T> {
    value.as_option().map(duplicate).into()
}

fn duplicate_array<T: Relocate, const N: usize>(value: &[T; N]) -> [T; N] {
    value.each_ref().map(duplicate)
}

// Types holding their value inline inherit its policy.
impl<T: Relocate> Relocate for Option<T> {
    const MIGRATION: Migration<Self> = match T::MIGRATION {
        Migration::Move => Migration::Move,
        Migration::Copy(_) => Migration::Copy(duplicate_option::<T>),
    };
}

impl<T: Relocate> Relocate for crate::Optional<T> {
    const MIGRATION: Migration<Self> = match T::MIGRATION {
        Migration::Move => Migration::Move,
        Migration::Copy(_) => Migration::Copy(duplicate_optional::<T>),
    };
}

impl<T: Relocate, const N: usize> Relocate for [T; N] {
    const MIGRATION: Migration<Self> = match T::MIGRATION {
        Migration::Move => Migration::Move,
        Migration::Copy(_) => Migration::Copy(duplicate_array::<T, N>),
    };
}

/// A tuple moves only if every field does; otherwise the whole tuple is cloned.
macro_rules! relocate_tuple {
    ($(($($field:ident),+)),* $(,)?) => {
        $(
            impl<$($field: Relocate + Clone),+> Relocate for ($($field,)+) {
                const MIGRATION: Migration<Self> =
                    if $($field::MIGRATION.consumes_source())&&+ {
                        Migration::Move
                    } else {
                        Migration::Copy(<Self as Clone>::clone)
                    };
            }
        )*
    };
}

relocate_tuple!((A), (A, B), (A, B, C), (A, B, C, D));

/// Carries `count` live elements from `src` into the uninitialized `dst`.
///
/// With [`Migration::Move`] the sources are consumed and must not be dropped
/// afterwards. With [`Migration::Copy`] the sources are untouched and still live;
/// if a duplicate panics, the duplicates already made are dropped before the
/// panic leaves this function.
///
/// # Safety
/// - `src` holds `count` live elements.
/// - `dst` is valid for `count` writes and does not overlap `src`.
pub(crate) unsafe fn migrate<T: Relocate>(src: *const T, dst: *mut T, count: usize) {
    match T::MIGRATION {
        Migration::Move => unsafe {
            ptr::copy_nonoverlapping(src, dst, count);
        },
        Migration::Copy(duplicate) => {
            let mut run = PartialRun::new(dst);
            for index in 0..count {
                unsafe {
                    run.push(duplicate(&*src.add(index)));
                }
            }
            run.finish();
        }
    }
}

/// Ends the life of `count` source elements after a successful [`migrate`].
///
/// # Safety
/// The same `src` and `count` that were passed to [`migrate`].
#[inline]
pub(crate) unsafe fn retire<T: Relocate>(src: *mut T, count: usize) {
    if !T::MIGRATION.consumes_source() {
        unsafe {
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(src, count));
        }
    }
}
