//! Dense 32-bit identifiers.
//!
//! Every store in this workspace hands out ids that are plain `u32` indices
//! wrapped in a newtype. [`IdBase`] is the capability the stores require:
//! an injective conversion to and from a dense index plus a distinguished
//! `INVALID` sentinel. [`define_id!`](crate::define_id) generates newtypes
//! that satisfy it.

use std::fmt;
use std::hash::Hash;

/// Capability shared by all store identifiers.
///
/// Raw values at or above [`IdBase::SENTINEL_FLOOR`] are never issued by a
/// store; they are free for sentinels such as `INVALID`.
pub trait IdBase: Copy + Eq + Hash + fmt::Debug + fmt::Display {
    /// The "no id" sentinel.
    const INVALID: Self;

    /// First raw value reserved for sentinels.
    const SENTINEL_FLOOR: u32 = u32::MAX - 15;

    /// Build an id from its dense index.
    fn from_raw(raw: u32) -> Self;

    /// The dense index as stored.
    fn raw(self) -> u32;

    /// The dense index, for slicing into parallel storage.
    #[inline]
    fn index(self) -> usize {
        self.raw() as usize
    }

    /// Returns `true` unless this is a sentinel.
    #[inline]
    fn is_valid(self) -> bool {
        self.raw() < Self::SENTINEL_FLOOR
    }
}

/// Define a `u32` id newtype implementing [`IdBase`].
///
/// The label is the `Display` prefix, e.g. `inst_block` renders id 3 as
/// `inst_block3`.
///
/// ```
/// ir_base::define_id! {
///     /// A block of instructions.
///     pub struct BlockId, "block";
/// }
///
/// use ir_base::IdBase;
/// assert_eq!(BlockId::new(3).to_string(), "block3");
/// assert!(!BlockId::INVALID.is_valid());
/// ```
#[macro_export]
macro_rules! define_id {
    ($(#[$meta:meta])* $vis:vis struct $name:ident, $label:literal;) => {
        $(#[$meta])*
        #[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
        #[repr(transparent)]
        $vis struct $name(u32);

        #[allow(dead_code)]
        impl $name {
            /// Sentinel value indicating "no id".
            pub const INVALID: Self = Self(u32::MAX);

            /// Create an id from a raw index.
            #[inline]
            pub const fn new(index: u32) -> Self {
                Self(index)
            }

            /// Get the raw `u32` value.
            #[inline]
            pub const fn raw(self) -> u32 {
                self.0
            }

            /// Get the raw index.
            #[inline]
            pub const fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl $crate::IdBase for $name {
            const INVALID: Self = Self(u32::MAX);

            #[inline]
            fn from_raw(raw: u32) -> Self {
                Self(raw)
            }

            #[inline]
            fn raw(self) -> u32 {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::INVALID
            }
        }

        impl ::std::fmt::Debug for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                if *self == Self::INVALID {
                    write!(f, concat!(stringify!($name), "::INVALID"))
                } else {
                    write!(f, concat!(stringify!($name), "({})"), self.0)
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                if *self == Self::INVALID {
                    write!(f, concat!("<invalid ", $label, ">"))
                } else {
                    write!(f, concat!($label, "{}"), self.0)
                }
            }
        }
    };
}
