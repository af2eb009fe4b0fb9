/// Trait required by implementers of the storage behind an
/// [`AtomicSlot`](crate::AtomicSlot).
///
/// A cell holds one machine word. Every method is a single indivisible step with
/// respect to every other method called on the same cell from any thread.
///
/// Ordering contract:
/// * `load` acquires.
/// * `store` releases.
/// * `swap` and a successful `compare_exchange` acquire and release.
/// * A failed `compare_exchange` acquires on the value it witnessed.
pub trait WordCell: Sized {
    /// True if no operation on this cell can block.
    const LOCK_FREE: bool;
    /// Flavor name, used in log records.
    const NAME: &'static str;

    fn new(word: usize) -> Self;
    fn load(&self) -> usize;
    fn store(&self, word: usize);
    fn swap(&self, word: usize) -> usize;
    /// Installs `new` iff the cell holds `current`. Returns the previous word on
    /// success and the witnessed word on failure.
    fn compare_exchange(&self, current: usize, new: usize) -> Result<usize, usize>;
    /// Like `compare_exchange`, but allowed to fail even when the words match.
    fn compare_exchange_weak(&self, current: usize, new: usize) -> Result<usize, usize> {
        self.compare_exchange(current, new)
    }
    fn into_inner(self) -> usize;
}

#[cfg(test)]
mod test {
    // exercises whichever flavor the crate selected as its default
    use crate::flavors::DefaultCell;
    use crate::word_cell::WordCell;

    #[test]
    fn test_word_cell() {
        let cell = DefaultCell::new(1);

        assert_eq!(cell.compare_exchange(1, 2), Ok(1));
        assert_eq!(cell.compare_exchange(1, 3), Err(2));
        assert_eq!(cell.load(), 2);

        cell.store(4);
        assert_eq!(cell.swap(5), 4);
        assert_eq!(cell.into_inner(), 5);
    }
}
