use core::alloc::Layout;

use thiserror::Error;

/// The error returned when a block of raw memory cannot be obtained.
///
/// Every fallible (`try_*`) operation of [`Vector`](crate::Vector) reports
/// allocation problems through this type, and leaves the container exactly
/// as it was before the call.
///
/// # Examples
///
/// ```
/// # use advanced_vector::{AllocError, Vector};
/// let mut vec: Vector<u64> = Vector::new();
/// assert_eq!(vec.try_reserve(usize::MAX), Err(AllocError::CapacityOverflow));
/// assert_eq!(vec.capacity(), 0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AllocError {
    /// The requested capacity, in bytes, exceeds `isize::MAX`.
    #[error("capacity overflow")]
    CapacityOverflow,
    /// The global allocator refused the request.
    #[error("memory allocation of {} bytes failed", .layout.size())]
    OutOfMemory {
        /// The layout that could not be allocated.
        layout: Layout,
    },
}

/// The error returned by the checked accessors of [`Optional`](crate::Optional)
/// when no value is present.
///
/// # Examples
///
/// ```
/// # use advanced_vector::{BadOptionalAccess, Optional};
/// let empty: Optional<i32> = Optional::none();
/// assert_eq!(empty.value(), Err(BadOptionalAccess));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Error)]
#[error("bad optional access")]
pub struct BadOptionalAccess;
