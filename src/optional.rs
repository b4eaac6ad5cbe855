use core::{
    cmp::Ordering,
    fmt,
    hash::{Hash, Hasher},
    mem::MaybeUninit,
    ptr,
};

use crate::BadOptionalAccess;

/// A slot that holds either nothing or exactly one value of `T`, stored inline.
///
/// The value lives in the `Optional` itself; no heap memory is involved. Unlike
/// [`Option`], the checked accessors report a missing value as an error
/// ([`BadOptionalAccess`]) and the value can be replaced in place with
/// [`assign`](Optional::assign) or rebuilt with [`emplace`](Optional::emplace).
///
/// # Examples
///
/// ```
/// use advanced_vector::{BadOptionalAccess, Optional};
///
/// let mut opt = Optional::none();
/// assert!(!opt.has_value());
/// assert_eq!(opt.value(), Err(BadOptionalAccess));
///
/// opt.assign(String::from("hello"));
/// opt.value_mut().unwrap().push('!');
/// assert_eq!(opt.value().map(String::as_str), Ok("hello!"));
///
/// opt.reset();
/// assert!(!opt.has_value());
/// ```
pub struct Optional<T> {
    slot: MaybeUninit<T>,
    present: bool,
}

impl<T> Optional<T> {
    /// Constructs an empty `Optional`.
    #[inline]
    pub const fn none() -> Self {
        Self {
            slot: MaybeUninit::uninit(),
            present: false,
        }
    }

    /// Constructs an `Optional` holding `value`.
    #[inline]
    pub const fn some(value: T) -> Self {
        Self {
            slot: MaybeUninit::new(value),
            present: true,
        }
    }

    /// Returns `true` if a value is present.
    #[inline(always)]
    pub const fn has_value(&self) -> bool {
        self.present
    }

    /// Returns a reference to the value, or [`BadOptionalAccess`] if there is none.
    #[inline]
    pub fn value(&self) -> Result<&T, BadOptionalAccess> {
        self.as_option().ok_or(BadOptionalAccess)
    }

    /// Returns a mutable reference to the value, or [`BadOptionalAccess`] if there is none.
    #[inline]
    pub fn value_mut(&mut self) -> Result<&mut T, BadOptionalAccess> {
        self.as_option_mut().ok_or(BadOptionalAccess)
    }

    /// Consumes the `Optional` and returns its value, or [`BadOptionalAccess`] if there is none.
    ///
    /// # Examples
    ///
    /// ```
    /// # use advanced_vector::{BadOptionalAccess, Optional};
    /// assert_eq!(Optional::some(3).into_value(), Ok(3));
    /// assert_eq!(Optional::<u8>::none().into_value(), Err(BadOptionalAccess));
    /// ```
    #[inline]
    pub fn into_value(self) -> Result<T, BadOptionalAccess> {
        self.into_option().ok_or(BadOptionalAccess)
    }

    /// Returns a reference to the value without checking that it is present.
    ///
    /// # Safety
    /// A value must be present. Only debug builds verify it.
    #[inline(always)]
    pub unsafe fn value_unchecked(&self) -> &T {
        debug_assert!(self.present, "bad optional access");
        unsafe { self.slot.assume_init_ref() }
    }

    /// Returns a mutable reference to the value without checking that it is present.
    ///
    /// # Safety
    /// A value must be present. Only debug builds verify it.
    #[inline(always)]
    pub unsafe fn value_unchecked_mut(&mut self) -> &mut T {
        debug_assert!(self.present, "bad optional access");
        unsafe { self.slot.assume_init_mut() }
    }

    /// Stores `value` and returns a reference to it.
    ///
    /// If a value is already present it is overwritten by assignment (the old value
    /// is dropped); otherwise `value` is placed into the empty slot.
    ///
    /// # Examples
    ///
    /// ```
    /// # use advanced_vector::Optional;
    /// let mut opt = Optional::none();
    /// *opt.assign(1) += 10;
    /// opt.assign(5);
    /// assert_eq!(opt.value(), Ok(&5));
    /// ```
    pub fn assign(&mut self, value: T) -> &mut T {
        if self.present {
            // SAFETY: present.
            let current = unsafe { self.slot.assume_init_mut() };
            *current = value;
            current
        } else {
            self.present = true;
            self.slot.write(value)
        }
    }

    /// Drops the current value, if any, then stores `value` and returns a
    /// reference to it.
    ///
    /// # Examples
    ///
    /// ```
    /// # use advanced_vector::Optional;
    /// let mut opt = Optional::some(vec![1, 2]);
    /// opt.emplace(vec![3]).push(4);
    /// assert_eq!(opt.value(), Ok(&vec![3, 4]));
    /// ```
    #[inline]
    pub fn emplace(&mut self, value: T) -> &mut T {
        self.emplace_with(|| value)
    }

    /// Drops the current value, if any, then stores `f()` and returns a
    /// reference to it.
    ///
    /// The old value is gone before `f` runs: if `f` panics, the `Optional` is
    /// left empty.
    pub fn emplace_with<F: FnOnce() -> T>(&mut self, f: F) -> &mut T {
        self.reset();
        let value = self.slot.write(f());
        self.present = true;
        value
    }

    /// Drops the value if one is present. Resetting an empty `Optional` does nothing.
    #[inline]
    pub fn reset(&mut self) {
        if self.present {
            // Clear the flag first, so a panicking `drop` cannot run twice.
            self.present = false;
            unsafe {
                ptr::drop_in_place(self.slot.as_mut_ptr());
            }
        }
    }

    /// Moves the value out, leaving the `Optional` empty.
    ///
    /// # Examples
    ///
    /// ```
    /// # use advanced_vector::Optional;
    /// let mut opt = Optional::some('x');
    /// assert_eq!(opt.take(), Some('x'));
    /// assert_eq!(opt.take(), None);
    /// ```
    #[inline]
    pub fn take(&mut self) -> Option<T> {
        if self.present {
            self.present = false;
            // SAFETY: was present; the flag now says the slot is empty.
            Some(unsafe { self.slot.assume_init_read() })
        } else {
            None
        }
    }

    /// Borrows the value as an [`Option`].
    #[inline]
    pub fn as_option(&self) -> Option<&T> {
        if self.present {
            Some(unsafe { self.slot.assume_init_ref() })
        } else {
            None
        }
    }

    /// Mutably borrows the value as an [`Option`].
    #[inline]
    pub fn as_option_mut(&mut self) -> Option<&mut T> {
        if self.present {
            Some(unsafe { self.slot.assume_init_mut() })
        } else {
            None
        }
    }

    /// Converts into an [`Option`].
    #[inline]
    pub fn into_option(mut self) -> Option<T> {
        self.take()
    }
}

impl<T> Drop for Optional<T> {
    #[inline]
    fn drop(&mut self) {
        self.reset();
    }
}

impl<T> Default for Optional<T> {
    /// Constructs an empty `Optional`.
    #[inline]
    fn default() -> Self {
        Self::none()
    }
}

impl<T: Clone> Clone for Optional<T> {
    fn clone(&self) -> Self {
        match self.as_option() {
            Some(value) => Self::some(value.clone()),
            None => Self::none(),
        }
    }

    /// Makes `self` hold a copy of whatever `source` holds.
    ///
    /// | `self` | `source` | effect |
    /// |--------|----------|--------|
    /// | value  | value    | [`Clone::clone_from`] on the value |
    /// | empty  | value    | a clone is placed into the slot |
    /// | value  | empty    | `self` is reset |
    /// | empty  | empty    | nothing |
    fn clone_from(&mut self, source: &Self) {
        match (self.as_option_mut(), source.as_option()) {
            (Some(current), Some(value)) => current.clone_from(value),
            (None, Some(value)) => {
                self.slot.write(value.clone());
                self.present = true;
            }
            (Some(_), None) => self.reset(),
            (None, None) => {}
        }
    }
}

impl<T> From<T> for Optional<T> {
    #[inline]
    fn from(value: T) -> Self {
        Self::some(value)
    }
}

impl<T> From<Option<T>> for Optional<T> {
    #[inline]
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => Self::some(value),
            None => Self::none(),
        }
    }
}

impl<T> From<Optional<T>> for Option<T> {
    #[inline]
    fn from(value: Optional<T>) -> Self {
        value.into_option()
    }
}

impl<T: fmt::Debug> fmt::Debug for Optional<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.as_option() {
            Some(value) => f.debug_tuple("Optional").field(value).finish(),
            None => f.write_str("Optional(<empty>)"),
        }
    }
}

impl<T: PartialEq> PartialEq for Optional<T> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.as_option() == other.as_option()
    }
}

impl<T: Eq> Eq for Optional<T> {}

impl<T: PartialOrd> PartialOrd for Optional<T> {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.as_option().partial_cmp(&other.as_option())
    }
}

impl<T: Ord> Ord for Optional<T> {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_option().cmp(&other.as_option())
    }
}

impl<T: Hash> Hash for Optional<T> {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_option().hash(state);
    }
}
