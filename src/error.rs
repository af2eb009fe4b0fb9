use thiserror::Error;

/// Errors raised when a slot cannot be configured for its value type.
///
/// Comparison mismatches are not errors: `compare_and_swap` reports them as `false`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SlotError {
    /// The value type does not fit in one atomically accessible machine word.
    #[error("`{type_name}` is {size} bytes, wider than the {word}-byte atomic word")]
    Oversized {
        type_name: &'static str,
        size: usize,
        word: usize,
    },
}

pub type Result<T> = std::result::Result<T, SlotError>;
