//! Last-resort cell for targets without a native word-sized compare-and-exchange.
//!
//! Every locked cell in the process shares one lock, so operations on unrelated
//! slots serialize against each other and a thread preempted while holding the lock
//! stalls all of them. Nothing here is lock-free.
use crate::word_cell::WordCell;
use std::cell::UnsafeCell;
use std::sync::{Mutex, MutexGuard, Once, PoisonError};

static LOCK: Mutex<()> = Mutex::new(());
static WARN_ONCE: Once = Once::new();

fn lock() -> MutexGuard<'static, ()> {
    // The guarded state is a plain word written in one statement, a panic elsewhere
    // cannot leave it half-updated.
    LOCK.lock().unwrap_or_else(PoisonError::into_inner)
}

pub struct LockedCell {
    word: UnsafeCell<usize>,
}

// The word is only touched while holding `LOCK`, or through `self` by value.
unsafe impl Send for LockedCell {}
unsafe impl Sync for LockedCell {}

impl WordCell for LockedCell {
    const LOCK_FREE: bool = false;
    const NAME: &'static str = "locked";

    fn new(word: usize) -> Self {
        WARN_ONCE.call_once(|| {
            log::warn!("atomic slots are using the global-lock fallback; operations are not lock-free")
        });
        LockedCell {
            word: UnsafeCell::new(word),
        }
    }

    fn load(&self) -> usize {
        let _guard = lock();
        unsafe { *self.word.get() }
    }

    fn store(&self, word: usize) {
        let _guard = lock();
        unsafe { *self.word.get() = word }
    }

    fn swap(&self, word: usize) -> usize {
        let _guard = lock();
        unsafe { std::mem::replace(&mut *self.word.get(), word) }
    }

    fn compare_exchange(&self, current: usize, new: usize) -> Result<usize, usize> {
        let _guard = lock();
        let slot = unsafe { &mut *self.word.get() };
        if *slot == current {
            *slot = new;
            Ok(current)
        } else {
            Err(*slot)
        }
    }

    fn into_inner(self) -> usize {
        self.word.into_inner()
    }
}

impl std::fmt::Debug for LockedCell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LockedCell")
            .field("word", &self.load())
            .finish()
    }
}
