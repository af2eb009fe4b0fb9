//! # Atomic Compare-and-Swap Slot
//!
//!  A memory location holding one reference-sized value (a raw pointer, an integer, or
//!  an opaque handle) that any number of threads can read, write and compare-and-swap
//!  without locks. It is the building block lock-free stacks, queues and lists are
//!  made of, and nothing more: it keeps no metadata and owns no referents.
//!
//! ## Features
//!  * Lock-Free - Every operation is one native atomic instruction on targets with
//!    pointer-width atomics. Nothing blocks, nothing allocates.
//!  * Explicit Ordering - Loads acquire, stores release, a successful compare-and-swap
//!    does both, and a failed one acquires on the value it saw.
//!  * Opaque Values - Anything implementing [`Word`]: integers, raw pointers, [`Handle`]s,
//!    and [`Stamped`] value/version pairs for ABA-sensitive callers.
//!  * Checked Width - A value type wider than a machine word is refused with
//!    [`SlotError::Oversized`] when the slot is created, never emulated silently.
//!  * **flavors** - the storage behind a slot. `native` uses the hardware atomic;
//!    `locked` serializes through one global lock for targets without one, and can be
//!    forced with the `lock-fallback` feature. Only `native` is lock-free.
//!  * **arcswap** - [`SharedSlot`], a reference-counted slot that keeps swapped-out
//!    referents alive for as long as a reader holds them.
//!  * **ffi** - a C ABI over slots of [`Handle`]s for managed runtimes. Off by default,
//!    since it exports unmangled symbols.
//!
//! ## Failure
//!
//! [`AtomicSlot::compare_and_swap`] returns **false** when the slot no longer holds the
//! expected value. This is not an error, it is the signal to reload and retry. A retry
//! loop without a bound can spin indefinitely under contention, so loops should carry a
//! [`Backoff`] or a cancellation policy of their own.
//!
//! ## ABA
//!
//! The comparison is bitwise. If an address is freed and handed out again while some
//! thread still holds it as `expected`, that thread's compare-and-swap succeeds against
//! an unrelated object. The slot does not prevent this; tag values with a version
//! ([`Stamped`]) or keep referents alive ([`SharedSlot`]).
//!
//! # Examples
//!
//! ## Simple usage
//!
//! ```rust
//! use atomic_slot::AtomicSlot;
//!
//! let slot = AtomicSlot::new(1usize).unwrap();
//!
//! assert!(slot.compare_and_swap(1, 2));
//! assert!(!slot.compare_and_swap(1, 3));
//! assert!(slot.compare_and_swap(2, 3));
//! assert_eq!(slot.load(), 3);
//! ```
//!
//! ## Counting from many threads
//!
//! ```rust
//! use atomic_slot::AtomicSlot;
//! use std::sync::Arc;
//! use std::thread;
//!
//! let counter = Arc::new(AtomicSlot::new(0usize).unwrap());
//!
//! let handles: Vec<_> = (0..4)
//!     .map(|_| {
//!         let counter = counter.clone();
//!         thread::spawn(move || {
//!             for _ in 0..1000 {
//!                 counter.fetch_update(|x| Some(x + 1)).unwrap();
//!             }
//!         })
//!     })
//!     .collect();
//!
//! for handle in handles {
//!     handle.join().unwrap();
//! }
//! assert_eq!(counter.load(), 4000);
//! ```

mod error;
pub mod flavors;
mod slot;
mod word;
mod word_cell;

#[cfg(feature = "ffi")]
pub mod ffi;

pub use crossbeam::utils::Backoff;
pub use error::{Result, SlotError};
pub use flavors::{DefaultCell, LockedCell};
pub use slot::AtomicSlot;
pub use word::{Handle, Stamped, Word};
pub use word_cell::WordCell;

#[cfg(target_has_atomic = "ptr")]
pub use flavors::NativeCell;

#[cfg(feature = "arcswap")]
pub use flavors::arc_swap::SharedSlot;
