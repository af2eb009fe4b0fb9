use std::fmt;

/// Trait required by values stored in an [`AtomicSlot`](crate::AtomicSlot).
///
/// A `Word` is an opaque, reference-sized value: an integer, a raw pointer or a
/// handle. The slot only ever compares and moves the machine word produced by
/// `to_word`, it never looks inside.
///
/// # Safety
///
/// For types no wider than `usize`, implementors guarantee that
/// `from_word(x.to_word())` is bitwise equal to `x`, and that two values produce the
/// same word only if they are bitwise equal. `from_word` is only ever called with a
/// word produced by `to_word` of the same type.
///
/// A wider type may implement the trait (e.g. [`Stamped`] on a 32-bit target), but
/// then no guarantee holds: creating a slot of it fails with
/// [`SlotError::Oversized`](crate::SlotError::Oversized), so its words are never
/// stored or compared.
pub unsafe trait Word: Copy {
    /// Encodes the value as one machine word.
    fn to_word(self) -> usize;
    /// Decodes a word previously produced by `to_word`.
    fn from_word(word: usize) -> Self;
}

macro_rules! impl_word_for_int {
    ($($int:ty),*) => {
        $(
            unsafe impl Word for $int {
                #[inline]
                fn to_word(self) -> usize {
                    self as usize
                }

                #[inline]
                fn from_word(word: usize) -> Self {
                    word as $int
                }
            }
        )*
    };
}

impl_word_for_int!(usize, isize, u8, u16, u32, u64, i8, i16, i32, i64);

unsafe impl Word for bool {
    #[inline]
    fn to_word(self) -> usize {
        self as usize
    }

    #[inline]
    fn from_word(word: usize) -> Self {
        word != 0
    }
}

unsafe impl<P> Word for *mut P {
    #[inline]
    fn to_word(self) -> usize {
        self as usize
    }

    #[inline]
    fn from_word(word: usize) -> Self {
        word as *mut P
    }
}

unsafe impl<P> Word for *const P {
    #[inline]
    fn to_word(self) -> usize {
        self as usize
    }

    #[inline]
    fn from_word(word: usize) -> Self {
        word as *const P
    }
}

/// An opaque reference-sized handle.
///
/// The slot assumes nothing about what a handle refers to. Resolving a handle to a
/// field, keeping its referent reachable and preventing it from being relocated for
/// the duration of an operation are all the caller's job.
#[repr(transparent)]
#[derive(Copy, Clone, PartialEq, Eq, Hash, Default)]
pub struct Handle(usize);

impl Handle {
    pub const NULL: Handle = Handle(0);

    pub const fn from_raw(raw: usize) -> Self {
        Handle(raw)
    }

    pub const fn into_raw(self) -> usize {
        self.0
    }

    pub fn from_ptr<P>(ptr: *const P) -> Self {
        Handle(ptr as usize)
    }

    pub fn as_ptr<P>(self) -> *mut P {
        self.0 as *mut P
    }

    pub const fn is_null(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Debug for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Handle({:#x})", self.0)
    }
}

unsafe impl Word for Handle {
    #[inline]
    fn to_word(self) -> usize {
        self.0
    }

    #[inline]
    fn from_word(word: usize) -> Self {
        Handle(word)
    }
}

/// A 32-bit value paired with a 32-bit stamp, packed into one 64-bit word.
///
/// Bumping the stamp on every update makes a stale `expected` fail its
/// compare-and-swap even when the value itself has come back around (the ABA
/// problem). Needs a 64-bit word: creating a slot of `Stamped` on a narrower target
/// fails with [`SlotError::Oversized`](crate::SlotError::Oversized).
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
pub struct Stamped {
    value: u32,
    stamp: u32,
}

impl Stamped {
    pub const fn new(value: u32, stamp: u32) -> Self {
        Stamped { value, stamp }
    }

    pub const fn value(self) -> u32 {
        self.value
    }

    pub const fn stamp(self) -> u32 {
        self.stamp
    }

    /// Returns `value` under the next stamp.
    pub const fn next(self, value: u32) -> Self {
        Stamped {
            value,
            stamp: self.stamp.wrapping_add(1),
        }
    }
}

unsafe impl Word for Stamped {
    #[inline]
    fn to_word(self) -> usize {
        ((u64::from(self.stamp) << 32) | u64::from(self.value)) as usize
    }

    #[inline]
    fn from_word(word: usize) -> Self {
        let word = word as u64;
        Stamped {
            value: word as u32,
            stamp: (word >> 32) as u32,
        }
    }
}

static_assertions::assert_eq_size!(Handle, usize);
static_assertions::assert_eq_size!(Stamped, u64);
