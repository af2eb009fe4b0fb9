use crate::word_cell::WordCell;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Cell backed by the platform's native word-sized atomic.
///
/// Compiles to the hardware compare-and-exchange (`lock cmpxchg` on x86,
/// `ldaxr`/`stlxr` or `casal` on AArch64, `lr`/`sc` on RISC-V).
#[derive(Debug, Default)]
pub struct NativeCell {
    word: AtomicUsize,
}

impl WordCell for NativeCell {
    const LOCK_FREE: bool = true;
    const NAME: &'static str = "native";

    #[inline]
    fn new(word: usize) -> Self {
        NativeCell {
            word: AtomicUsize::new(word),
        }
    }

    #[inline]
    fn load(&self) -> usize {
        self.word.load(Ordering::Acquire)
    }

    #[inline]
    fn store(&self, word: usize) {
        self.word.store(word, Ordering::Release)
    }

    #[inline]
    fn swap(&self, word: usize) -> usize {
        self.word.swap(word, Ordering::AcqRel)
    }

    #[inline]
    fn compare_exchange(&self, current: usize, new: usize) -> Result<usize, usize> {
        self.word
            .compare_exchange(current, new, Ordering::AcqRel, Ordering::Acquire)
    }

    #[inline]
    fn compare_exchange_weak(&self, current: usize, new: usize) -> Result<usize, usize> {
        self.word
            .compare_exchange_weak(current, new, Ordering::AcqRel, Ordering::Acquire)
    }

    fn into_inner(self) -> usize {
        self.word.into_inner()
    }
}
