use arc_swap::ArcSwapOption;
use std::fmt;
use std::sync::Arc;

/// A slot of reference-counted pointers.
///
/// Where [`AtomicSlot`](crate::AtomicSlot) leaves referent lifetime to the caller,
/// `SharedSlot` owns a strong count on whatever it holds. A referent stays alive
/// while the slot or any loaded `Arc` points to it, so a reader never dereferences
/// freed memory. Since `compare_and_swap` takes `expected` as a live `Arc`, its
/// address cannot be recycled for another object during the comparison, which rules
/// out ABA on referent identity.
pub struct SharedSlot<T> {
    shared: ArcSwapOption<T>,
}

impl<T> SharedSlot<T> {
    pub fn new(item: Option<Arc<T>>) -> Self {
        SharedSlot {
            shared: ArcSwapOption::new(item),
        }
    }

    pub fn empty() -> Self {
        Self::new(None)
    }

    /// Returns a clone of the held Arc, incrementing the ref count atomically.
    pub fn load(&self) -> Option<Arc<T>> {
        self.shared.load_full()
    }

    /// Stores `item`, dropping the slot's count on the previous item.
    pub fn store(&self, item: Option<Arc<T>>) {
        self.shared.store(item)
    }

    pub fn swap(&self, item: Option<Arc<T>>) -> Option<Arc<T>> {
        self.shared.swap(item)
    }

    /// Installs `desired` iff the slot points at the same allocation as `expected`
    /// (or both are empty).
    pub fn compare_and_swap(&self, expected: &Option<Arc<T>>, desired: Option<Arc<T>>) -> bool {
        let previous = self.shared.compare_and_swap(expected, desired);
        same_referent(&*previous, expected)
    }
}

fn same_referent<T>(a: &Option<Arc<T>>, b: &Option<Arc<T>>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => Arc::ptr_eq(a, b),
        (None, None) => true,
        _ => false,
    }
}

impl<T> Default for SharedSlot<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T: fmt::Debug> fmt::Debug for SharedSlot<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SharedSlot").field(&self.load()).finish()
    }
}

#[cfg(test)]
mod test {
    use crate::flavors::arc_swap::SharedSlot;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_shared_slot_empty() {
        let slot: SharedSlot<usize> = SharedSlot::empty();

        assert_eq!(slot.load(), None);
        assert!(slot.compare_and_swap(&None, Some(Arc::new(1))));
        assert_eq!(slot.load(), Some(Arc::new(1)));
    }

    #[test]
    fn test_shared_slot_compares_identity_not_value() {
        let first = Arc::new(5);
        let slot = SharedSlot::new(Some(first.clone()));

        // Equal value, different allocation.
        assert!(!slot.compare_and_swap(&Some(Arc::new(5)), Some(Arc::new(6))));
        assert!(Arc::ptr_eq(&slot.load().unwrap(), &first));

        assert!(slot.compare_and_swap(&Some(first.clone()), Some(Arc::new(6))));
        assert_eq!(*slot.load().unwrap(), 6);
    }

    #[test]
    fn test_shared_slot_ref_counts() {
        let slot = SharedSlot::empty();

        // Store an item into the slot, ref count = 1
        slot.store(Some(Arc::new(1)));

        // Load an item from the slot, ref count = 2
        let arc = slot.load().unwrap();
        assert_eq!(Arc::strong_count(&arc), 2);

        // Swap in another item; the old one is now only held by us and by `old`.
        let old = slot.swap(Some(Arc::new(2))).unwrap();
        assert!(Arc::ptr_eq(&arc, &old));
        drop(old);
        assert_eq!(Arc::strong_count(&arc), 1);
    }

    #[test]
    fn test_shared_slot_readers_see_live_referents() {
        let slot = Arc::new(SharedSlot::new(Some(Arc::new(vec![0usize; 16]))));

        let readers: Vec<_> = (0..4)
            .map(|_| {
                let slot = slot.clone();
                thread::spawn(move || {
                    for _ in 0..10_000 {
                        let seen = slot.load().unwrap();
                        let first = seen[0];
                        assert!(seen.iter().all(|&x| x == first));
                    }
                })
            })
            .collect();

        for i in 1..1_000 {
            slot.store(Some(Arc::new(vec![i; 16])));
        }

        for reader in readers {
            reader.join().unwrap();
        }
    }
}
