use crate::error::{Result, SlotError};
use crate::flavors::DefaultCell;
use crate::word::Word;
use crate::word_cell::WordCell;
use crossbeam::utils::Backoff;
use std::any;
use std::fmt;
use std::marker::PhantomData;
use std::mem;

/// A memory location holding one reference-sized value, updated atomically.
///
/// Every access to the stored value goes through the backing [`WordCell`]:
/// * [`load`](AtomicSlot::load) has acquire semantics.
/// * [`store`](AtomicSlot::store) has release semantics.
/// * A successful [`compare_and_swap`](AtomicSlot::compare_and_swap) acquires and
///   releases. A failed one acquires on the value it saw.
///
/// Writes made before a release are visible to any thread whose acquire observes
/// the released value. This is the usual publication idiom: initialize the pointee,
/// store the pointer, and readers that load the pointer may touch the pointee.
/// No ordering is implied between different slots.
///
/// The slot never drops, frees or reference-counts what a value refers to. Keeping
/// a referent alive while another thread may still hold an old copy of its address
/// is up to the caller (see [`SharedSlot`](crate::SharedSlot) for a counted
/// alternative).
pub struct AtomicSlot<T, C = DefaultCell> {
    cell: C,
    _marker: PhantomData<fn(T) -> T>,
}

impl<T: Word> AtomicSlot<T> {
    /// Creates a slot over the default cell flavor.
    ///
    /// Fails with [`SlotError::Oversized`] if `T` is wider than a machine word.
    pub fn new(initial: T) -> Result<Self> {
        Self::with_flavor(initial)
    }
}

impl<T: Word, C: WordCell> AtomicSlot<T, C> {
    /// Creates a slot over the cell flavor `C`.
    pub fn with_flavor(initial: T) -> Result<Self> {
        let type_name = any::type_name::<T>();
        let size = mem::size_of::<T>();
        let word = mem::size_of::<usize>();

        if size > word {
            log::error!(
                "refusing atomic slot of `{}`: {} bytes do not fit the {}-byte atomic word",
                type_name,
                size,
                word
            );
            return Err(SlotError::Oversized {
                type_name,
                size,
                word,
            });
        }

        log::debug!("created atomic slot of `{}` over the {} cell", type_name, C::NAME);
        Ok(AtomicSlot {
            cell: C::new(initial.to_word()),
            _marker: PhantomData,
        })
    }

    /// Returns the current value.
    #[inline]
    pub fn load(&self) -> T {
        T::from_word(self.cell.load())
    }

    /// Unconditionally installs `value`.
    #[inline]
    pub fn store(&self, value: T) {
        self.cell.store(value.to_word())
    }

    /// Installs `value` and returns the value it replaced.
    #[inline]
    pub fn swap(&self, value: T) -> T {
        T::from_word(self.cell.swap(value.to_word()))
    }

    /// Installs `desired` iff the slot holds a value bitwise equal to `expected`.
    ///
    /// Returns true if the value was replaced. A false return leaves the slot
    /// untouched and is the ordinary signal to reload and retry. Retrying without
    /// a bound can spin forever under contention; pair retry loops with a
    /// [`Backoff`] or a policy of your own.
    ///
    /// The comparison is on bits only. If `T` is an address whose referent can be
    /// freed and the address handed out again, a stale `expected` can match an
    /// unrelated object (the ABA problem). Tag values with a version, e.g.
    /// [`Stamped`](crate::Stamped), or use a reclamation scheme that keeps
    /// addresses from being reused while they may still be compared.
    ///
    /// ```
    /// use atomic_slot::{AtomicSlot, Backoff};
    ///
    /// let slot = AtomicSlot::new(0usize).unwrap();
    /// let backoff = Backoff::new();
    /// loop {
    ///     let current = slot.load();
    ///     if slot.compare_and_swap(current, current + 1) {
    ///         break;
    ///     }
    ///     backoff.spin();
    /// }
    /// assert!(slot.compare_and_swap(1, 2));
    /// assert!(!slot.compare_and_swap(1, 3));
    /// assert_eq!(slot.load(), 2);
    /// ```
    #[inline]
    pub fn compare_and_swap(&self, expected: T, desired: T) -> bool {
        self.compare_exchange(expected, desired).is_ok()
    }

    /// Installs `desired` iff the slot holds `expected`.
    ///
    /// Returns `Ok` with the replaced value, or `Err` with the value found instead,
    /// which is a fresh `expected` for the next attempt.
    #[inline]
    pub fn compare_exchange(&self, expected: T, desired: T) -> std::result::Result<T, T> {
        self.cell
            .compare_exchange(expected.to_word(), desired.to_word())
            .map(T::from_word)
            .map_err(T::from_word)
    }

    /// Like [`compare_exchange`](AtomicSlot::compare_exchange) but may fail even
    /// when the values match. Cheaper inside a retry loop on some platforms.
    #[inline]
    pub fn compare_exchange_weak(&self, expected: T, desired: T) -> std::result::Result<T, T> {
        self.cell
            .compare_exchange_weak(expected.to_word(), desired.to_word())
            .map(T::from_word)
            .map_err(T::from_word)
    }

    /// Applies `f` to the current value and tries to install the result, retrying
    /// with [`Backoff`] until an attempt succeeds or `f` returns `None`.
    ///
    /// Returns `Ok` with the value `f` was last applied to on success, or `Err`
    /// with that value when `f` declined to update.
    ///
    /// ```
    /// use atomic_slot::AtomicSlot;
    ///
    /// let balance = AtomicSlot::new(100u64).unwrap();
    /// let withdraw = |amount| move |current: u64| current.checked_sub(amount);
    ///
    /// assert_eq!(balance.fetch_update(withdraw(30)), Ok(100));
    /// assert_eq!(balance.fetch_update(withdraw(80)), Err(70));
    /// assert_eq!(balance.load(), 70);
    /// ```
    pub fn fetch_update<F>(&self, mut f: F) -> std::result::Result<T, T>
    where
        F: FnMut(T) -> Option<T>,
    {
        let backoff = Backoff::new();
        let mut retries = 0usize;
        let mut current = self.load();

        while let Some(next) = f(current) {
            match self.compare_exchange_weak(current, next) {
                Ok(previous) => {
                    if retries > 0 {
                        log::trace!("fetch_update landed after {} retries", retries);
                    }
                    return Ok(previous);
                }
                Err(witnessed) => {
                    current = witnessed;
                    retries += 1;
                    backoff.spin();
                }
            }
        }
        Err(current)
    }

    /// True if no operation on this slot can block.
    pub fn is_lock_free(&self) -> bool {
        C::LOCK_FREE
    }

    pub fn into_inner(self) -> T {
        T::from_word(self.cell.into_inner())
    }
}

impl<T: Word + fmt::Debug, C: WordCell> fmt::Debug for AtomicSlot<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("AtomicSlot").field(&self.load()).finish()
    }
}

static_assertions::assert_impl_all!(AtomicSlot<*mut u8>: Send, Sync);
static_assertions::assert_impl_all!(AtomicSlot<crate::Handle, crate::LockedCell>: Send, Sync);

#[cfg(test)]
mod test {
    use crate::error::SlotError;
    use crate::flavors::LockedCell;
    use crate::slot::AtomicSlot;
    use crate::word::{Handle, Stamped, Word};

    // Two words wide; only the low word survives `to_word`, which is why such a
    // type must never reach a cell.
    #[derive(Copy, Clone, Debug, PartialEq)]
    struct Wide([usize; 2]);

    unsafe impl Word for Wide {
        fn to_word(self) -> usize {
            self.0[0]
        }

        fn from_word(word: usize) -> Self {
            Wide([word, 0])
        }
    }

    const A: Handle = Handle::from_raw(0xa0);
    const B: Handle = Handle::from_raw(0xb0);
    const C: Handle = Handle::from_raw(0xc0);

    #[test]
    fn test_compare_and_swap_scenario() {
        let slot = AtomicSlot::new(A).unwrap();

        #[cfg(not(feature = "lock-fallback"))]
        assert!(slot.is_lock_free());
        assert!(slot.compare_and_swap(A, B));
        assert_eq!(slot.load(), B);

        assert!(!slot.compare_and_swap(A, C));
        assert_eq!(slot.load(), B);

        assert!(slot.compare_and_swap(B, C));
        assert_eq!(slot.load(), C);
    }

    #[test]
    fn test_compare_and_swap_scenario_locked() {
        let slot: AtomicSlot<Handle, LockedCell> = AtomicSlot::with_flavor(A).unwrap();

        assert!(!slot.is_lock_free());
        assert!(slot.compare_and_swap(A, B));
        assert!(!slot.compare_and_swap(A, C));
        assert!(slot.compare_and_swap(B, C));
        assert_eq!(slot.into_inner(), C);
    }

    #[test]
    fn test_failed_compare_and_swap_never_mutates() {
        let slot = AtomicSlot::new(42i64).unwrap();

        for _ in 0..1_000 {
            assert!(!slot.compare_and_swap(41, 0));
        }

        assert_eq!(slot.load(), 42);
    }

    #[test]
    fn test_compare_exchange_reports_witness() {
        let slot = AtomicSlot::new(3u32).unwrap();

        assert_eq!(slot.compare_exchange(1, 5), Err(3));
        assert_eq!(slot.compare_exchange(3, 5), Ok(3));
        assert_eq!(slot.swap(9), 5);
        assert_eq!(slot.load(), 9);
    }

    #[test]
    fn test_store_then_load() {
        let slot = AtomicSlot::new(false).unwrap();

        slot.store(true);

        assert!(slot.load());
    }

    #[test]
    fn test_pointer_slot() {
        let mut first = 1;
        let mut second = 2;
        let slot = AtomicSlot::new(&mut first as *mut i32).unwrap();

        assert!(slot.compare_and_swap(&mut first, &mut second));
        assert_eq!(unsafe { *slot.load() }, 2);
    }

    #[test]
    fn test_oversized_value_is_refused() {
        let word = std::mem::size_of::<usize>();
        let err = AtomicSlot::new(Wide([1, 2])).unwrap_err();

        match err {
            SlotError::Oversized {
                type_name,
                size,
                word: limit,
            } => {
                assert!(type_name.ends_with("Wide"));
                assert_eq!(size, 2 * word);
                assert_eq!(limit, word);
            }
        }
        assert!(AtomicSlot::<Wide, LockedCell>::with_flavor(Wide([0, 0])).is_err());
    }

    #[test]
    fn test_fetch_update_declines() {
        let slot = AtomicSlot::new(10usize).unwrap();

        assert_eq!(slot.fetch_update(|x| x.checked_sub(11)), Err(10));
        assert_eq!(slot.fetch_update(|x| Some(x * 2)), Ok(10));
        assert_eq!(slot.load(), 20);
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn test_stamped_slot_rejects_aba_replay() {
        let slot = AtomicSlot::new(Stamped::new(1, 0)).unwrap();
        let stale = slot.load();

        // Another thread moves 1 -> 2 -> 1, bumping the stamp each time.
        let current = slot.load();
        assert!(slot.compare_and_swap(current, current.next(2)));
        let current = slot.load();
        assert!(slot.compare_and_swap(current, current.next(1)));

        assert_eq!(slot.load().value(), stale.value());
        assert!(!slot.compare_and_swap(stale, stale.next(3)));
        assert_eq!(slot.load(), Stamped::new(1, 2));
    }

    #[test]
    fn test_debug() {
        let slot = AtomicSlot::new(7u8).unwrap();

        assert_eq!(format!("{:?}", slot), "AtomicSlot(7)");
    }
}
