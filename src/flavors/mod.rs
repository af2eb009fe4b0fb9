#[cfg(feature = "arcswap")]
pub mod arc_swap;

pub mod locked;

#[cfg(target_has_atomic = "ptr")]
pub mod native;

pub use locked::LockedCell;

#[cfg(target_has_atomic = "ptr")]
pub use native::NativeCell;

/// Cell used by [`AtomicSlot`](crate::AtomicSlot) when none is named.
#[cfg(all(target_has_atomic = "ptr", not(feature = "lock-fallback")))]
pub type DefaultCell = NativeCell;

/// Cell used by [`AtomicSlot`](crate::AtomicSlot) when none is named.
#[cfg(any(not(target_has_atomic = "ptr"), feature = "lock-fallback"))]
pub type DefaultCell = LockedCell;
