use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;

/// The capability every key stored in a [`HashTable`] must provide.
///
/// Implementations must uphold the usual hashing contract:
///
/// - `hash_code` is pure: calling it repeatedly on an unchanged key returns
///   the same value.
/// - `equals` is an equivalence relation (reflexive, symmetric, transitive).
/// - `a.equals(b)` implies `a.hash_code() == b.hash_code()`.
///
/// The table has no way to detect a key that breaks these rules. Such keys
/// lead to lookups that miss entries which are present, or to what look like
/// duplicate keys, but never to memory unsafety.
///
/// Hash codes only need to be well distributed in aggregate: the table mixes
/// high bits into low bits before indexing, so codes that differ only in
/// their upper bits still spread across buckets.
///
/// [`HashTable`]: crate::hash_table::HashTable
///
/// # Examples
///
/// ```rust
/// use chained_hash::Hashable;
/// use chained_hash::HashTable;
///
/// struct Point {
///     x: i32,
///     y: i32,
/// }
///
/// impl Hashable for Point {
///     fn hash_code(&self) -> i32 {
///         self.x.wrapping_mul(31).wrapping_add(self.y)
///     }
///
///     fn equals(&self, other: &Self) -> bool {
///         self.x == other.x && self.y == other.y
///     }
/// }
///
/// let mut table = HashTable::new();
/// table.insert(Point { x: 1, y: 2 }, "a");
/// assert_eq!(table.get(&Point { x: 1, y: 2 }), Some(&"a"));
/// ```
pub trait Hashable {
    /// Returns the hash code of this key.
    fn hash_code(&self) -> i32;

    /// Returns `true` if `self` and `other` denote the same key.
    fn equals(&self, other: &Self) -> bool;
}

macro_rules! narrow_hashable {
    ($($t:ty),*) => {
        $(
            impl Hashable for $t {
                #[inline]
                fn hash_code(&self) -> i32 {
                    *self as i32
                }

                #[inline]
                fn equals(&self, other: &Self) -> bool {
                    self == other
                }
            }
        )*
    };
}

macro_rules! wide_hashable {
    ($($t:ty),*) => {
        $(
            impl Hashable for $t {
                #[inline]
                fn hash_code(&self) -> i32 {
                    fold_u64(*self as u64)
                }

                #[inline]
                fn equals(&self, other: &Self) -> bool {
                    self == other
                }
            }
        )*
    };
}

narrow_hashable!(i8, i16, i32, u8, u16, u32);
wide_hashable!(i64, u64, isize, usize);

/// Folds the upper half of a 64-bit value into the lower half.
#[inline(always)]
fn fold_u64(value: u64) -> i32 {
    (value ^ (value >> 32)) as i32
}

impl Hashable for bool {
    #[inline]
    fn hash_code(&self) -> i32 {
        if *self { 1231 } else { 1237 }
    }

    #[inline]
    fn equals(&self, other: &Self) -> bool {
        self == other
    }
}

impl Hashable for char {
    #[inline]
    fn hash_code(&self) -> i32 {
        *self as i32
    }

    #[inline]
    fn equals(&self, other: &Self) -> bool {
        self == other
    }
}

/// Strings hash as the polynomial `s[0]*31^(n-1) + ... + s[n-1]` over their
/// UTF-16 code units, with wrapping arithmetic.
impl Hashable for str {
    fn hash_code(&self) -> i32 {
        self.encode_utf16()
            .fold(0i32, |h, unit| h.wrapping_mul(31).wrapping_add(unit as i32))
    }

    #[inline]
    fn equals(&self, other: &Self) -> bool {
        self == other
    }
}

impl Hashable for String {
    #[inline]
    fn hash_code(&self) -> i32 {
        self.as_str().hash_code()
    }

    #[inline]
    fn equals(&self, other: &Self) -> bool {
        self == other
    }
}

/// Slices hash element-wise as `31 * h + e.hash_code()`, starting from 1.
impl<T: Hashable> Hashable for [T] {
    fn hash_code(&self) -> i32 {
        self.iter()
            .fold(1i32, |h, e| h.wrapping_mul(31).wrapping_add(e.hash_code()))
    }

    fn equals(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().zip(other).all(|(a, b)| a.equals(b))
    }
}

impl<T: Hashable> Hashable for Vec<T> {
    #[inline]
    fn hash_code(&self) -> i32 {
        self.as_slice().hash_code()
    }

    #[inline]
    fn equals(&self, other: &Self) -> bool {
        self.as_slice().equals(other.as_slice())
    }
}

macro_rules! forward_hashable {
    ($($ptr:ident),*) => {
        $(
            impl<T: Hashable + ?Sized> Hashable for $ptr<T> {
                #[inline]
                fn hash_code(&self) -> i32 {
                    (**self).hash_code()
                }

                #[inline]
                fn equals(&self, other: &Self) -> bool {
                    (**self).equals(&**other)
                }
            }
        )*
    };
}

forward_hashable!(Box, Rc, Arc);

impl<T: Hashable + ?Sized> Hashable for &T {
    #[inline]
    fn hash_code(&self) -> i32 {
        (**self).hash_code()
    }

    #[inline]
    fn equals(&self, other: &Self) -> bool {
        (**self).equals(&**other)
    }
}

cfg_if::cfg_if! {
    if #[cfg(feature = "foldhash")] {
        use core::hash::BuildHasher;
        use core::hash::Hash;

        // Fixed seed so that a key's hash code is stable across tables and
        // process runs.
        const KEY_SEED: u64 = 0x243f_6a88_85a3_08d3;

        #[inline(always)]
        fn std_hash_code<T: Hash + ?Sized>(value: &T) -> i32 {
            fold_u64(foldhash::fast::FixedState::with_seed(KEY_SEED).hash_one(value))
        }
    } else if #[cfg(feature = "std")] {
        use core::hash::BuildHasher;
        use core::hash::BuildHasherDefault;
        use core::hash::Hash;

        #[inline(always)]
        fn std_hash_code<T: Hash + ?Sized>(value: &T) -> i32 {
            fold_u64(BuildHasherDefault::<std::hash::DefaultHasher>::default().hash_one(value))
        }
    }
}

/// Adapts any `Hash + Eq` type to the [`Hashable`] contract.
///
/// The hash code is derived from a fixed-seed hasher, so equal values always
/// produce equal hash codes, across tables and across runs. With the
/// `foldhash` feature enabled the hasher is foldhash; otherwise it is the
/// standard library's `DefaultHasher`.
///
/// # Examples
///
/// ```rust
/// use chained_hash::HashKey;
/// use chained_hash::HashTable;
///
/// let mut table = HashTable::new();
/// table.insert(HashKey(("user", 42u64)), 1);
/// assert_eq!(table.get(&HashKey(("user", 42u64))), Some(&1));
/// ```
#[cfg(any(feature = "foldhash", feature = "std"))]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HashKey<T>(pub T);

#[cfg(any(feature = "foldhash", feature = "std"))]
impl<T> HashKey<T> {
    /// Unwraps the adapted key.
    pub fn into_inner(self) -> T {
        self.0
    }
}

#[cfg(any(feature = "foldhash", feature = "std"))]
impl<T> From<T> for HashKey<T> {
    fn from(value: T) -> Self {
        HashKey(value)
    }
}

#[cfg(any(feature = "foldhash", feature = "std"))]
impl<T: Hash + Eq> Hashable for HashKey<T> {
    #[inline]
    fn hash_code(&self) -> i32 {
        std_hash_code(&self.0)
    }

    #[inline]
    fn equals(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}
