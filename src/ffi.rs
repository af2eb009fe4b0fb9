//! C ABI over a slot of opaque handles.
//!
//! A foreign runtime passes its object references as [`Handle`]s (one machine
//! word). The slot compares and moves handles and nothing more: it never adjusts
//! reference counts or garbage-collector roots, and it never resolves a handle to a
//! field. The caller keeps every referent reachable and unmoved while a handle to it
//! may be compared or loaded.
use crate::slot::AtomicSlot;
use crate::word::Handle;
use std::ptr;

/// Slot type behind the pointers handed across the boundary.
pub type HandleSlot = AtomicSlot<Handle>;

/// Allocates a slot holding `initial`. Returns null if the slot cannot be created;
/// release a non-null result with [`atomic_slot_destroy`].
#[no_mangle]
pub extern "C" fn atomic_slot_create(initial: Handle) -> *mut HandleSlot {
    match HandleSlot::new(initial) {
        Ok(slot) => Box::into_raw(Box::new(slot)),
        Err(_) => ptr::null_mut(),
    }
}

/// # Safety
///
/// `slot` must come from [`atomic_slot_create`] and not yet be destroyed.
#[no_mangle]
pub unsafe extern "C" fn atomic_slot_load(slot: *const HandleSlot) -> Handle {
    (*slot).load()
}

/// # Safety
///
/// `slot` must come from [`atomic_slot_create`] and not yet be destroyed.
#[no_mangle]
pub unsafe extern "C" fn atomic_slot_store(slot: *const HandleSlot, value: Handle) {
    (*slot).store(value)
}

/// # Safety
///
/// `slot` must come from [`atomic_slot_create`] and not yet be destroyed.
#[no_mangle]
pub unsafe extern "C" fn atomic_slot_compare_and_swap(
    slot: *const HandleSlot,
    expected: Handle,
    desired: Handle,
) -> bool {
    (*slot).compare_and_swap(expected, desired)
}

/// # Safety
///
/// `slot` must come from [`atomic_slot_create`] and not yet be destroyed.
#[no_mangle]
pub unsafe extern "C" fn atomic_slot_swap(slot: *const HandleSlot, value: Handle) -> Handle {
    (*slot).swap(value)
}

/// Frees the slot itself. Whatever its last handle refers to is untouched.
///
/// # Safety
///
/// `slot` must be null or come from [`atomic_slot_create`], and must not be used
/// again, by any thread, after this call.
#[no_mangle]
pub unsafe extern "C" fn atomic_slot_destroy(slot: *mut HandleSlot) {
    if !slot.is_null() {
        drop(Box::from_raw(slot));
    }
}
