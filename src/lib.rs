//! ## Intro
//!
//! Two building blocks for containers that have to stay consistent when
//! things go wrong: a growable array that manages its own raw memory, and an
//! inline slot that may or may not hold a value.
//!
//! Both are written against `core` and `alloc` only, and every operation that
//! can fail halfway (an allocation error, or a constructor that panics) either
//! completes or leaves the container exactly as it was.
//!
//! ## Containers
//!
//! ### `Vector`
//!
//! - **Exact** capacity on [`reserve`](Vector::reserve) and [`resize`](Vector::resize)
//! - **Doubling** growth (`0 → 1 → 2 → 4 → ...`) on `push_back` and `insert`
//! - **Strong guarantee** on every reallocation
//! - **Slice-like** interface through `Deref<Target = [T]>`
//!
//! ```
//! # use advanced_vector::Vector;
//! let mut vec = Vector::new();
//! vec.push_back(1);
//! vec.push_back(2);
//! vec.push_back(3);
//! assert_eq!(vec.capacity(), 4);
//!
//! vec.insert(1, 99);
//! assert_eq!(vec, [1, 99, 2, 3]);
//!
//! vec.erase(0);
//! assert_eq!(vec.pop_back(), Some(3));
//! assert_eq!(vec, [99, 2]);
//! ```
//!
//! How elements get into a new block is decided per type by [`Relocate`]:
//! bitwise moves for ordinary types, clone-then-drop for types that cannot be
//! trusted to move. See the [`relocate`] module.
//!
//! ### `Optional`
//!
//! - **Inline** storage, no heap
//! - **Checked** access that reports [`BadOptionalAccess`]
//! - **In-place** assignment and re-construction
//!
//! ```
//! # use advanced_vector::Optional;
//! let mut opt = Optional::none();
//! assert!(opt.value().is_err());
//!
//! opt.emplace(String::from("value"));
//! assert_eq!(opt.value().map(String::len), Ok(5));
//! ```
//!
//! ## Errors
//!
//! The `try_*` methods return [`AllocError`]. Their infallible counterparts
//! behave like [`Vec`]: they panic on capacity overflow and abort through
//! [`handle_alloc_error`] when the allocator fails.
//!
//! ## Logging
//!
//! Reallocations are reported at `trace` level and rollbacks of partially
//! built elements at `debug` level through the [`log`] facade. Nothing is
//! logged on the fast paths.
//!
//! ## `no_std` support
//!
//! This crate requires only `core` and `alloc`, making it suitable for embedded and no_std environments.
//!
//! ## Optional features
//!
//! ### `std` (default)
//!
//! `Vector<u8>` implements [`std::io::Write`] by appending to the vector.
//!
//! ### `serde`
//!
//! When this optional dependency is enabled,
//! [`Vector`] and [`Optional`] implement the [`serde::Serialize`] and [`serde::Deserialize`] traits.
//! A `Vector` is a sequence, an `Optional` is an option.
//!
//! [`serde::Serialize`]: https://docs.rs/serde/latest/serde/trait.Serialize.html
//! [`serde::Deserialize`]: https://docs.rs/serde/latest/serde/trait.Deserialize.html
//! [`std::io::Write`]: https://doc.rust-lang.org/std/io/trait.Write.html
//! [`log`]: https://docs.rs/log
//! [`Vec`]: alloc::vec::Vec
//! [`handle_alloc_error`]: alloc::alloc::handle_alloc_error
#![no_std]

extern crate alloc;

mod error;
mod raw_memory;
mod utils;

#[cfg(feature = "serde")]
mod serde;

#[cfg(feature = "std")]
mod std_io;

#[cfg(test)]
mod testing;

pub mod relocate;
#[doc(inline)]
pub use relocate::{Migration, Relocate};

pub mod vector;
#[doc(inline)]
pub use vector::Vector;

pub mod optional;
#[doc(inline)]
pub use optional::Optional;

pub use error::{AllocError, BadOptionalAccess};
