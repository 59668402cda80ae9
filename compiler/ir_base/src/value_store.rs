//! Sequential id-indexed storage.
//!
//! [`ValueStore`] issues ids in allocation order and maps each id to one
//! value. It has no slab behaviour of its own: values live in a `Vec`, so
//! anything that must keep a stable address (block contents, for instance)
//! has to be stored out-of-line and referenced from the value.

use std::fmt;
use std::marker::PhantomData;

use crate::IdBase;

/// Error when a store cannot issue another id.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValueStoreError {
    /// The dense index space of the id type is exhausted.
    #[error("value store exceeded capacity: {count} values, max is {max}")]
    Overflow { count: usize, max: u32 },
}

/// Storage mapping ids of type `I` to values of type `V`.
pub struct ValueStore<I, V> {
    values: Vec<V>,
    _id: PhantomData<fn() -> I>,
}

impl<I: IdBase, V> ValueStore<I, V> {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            values: Vec::new(),
            _id: PhantomData,
        }
    }

    /// Create an empty store with room for `capacity` values.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            values: Vec::with_capacity(capacity),
            _id: PhantomData,
        }
    }

    /// Store a value, returning its id or an error if the id space is full.
    pub fn try_add(&mut self, value: V) -> Result<I, ValueStoreError> {
        let count = self.values.len();
        let raw = u32::try_from(count)
            .ok()
            .filter(|&raw| raw < I::SENTINEL_FLOOR)
            .ok_or(ValueStoreError::Overflow {
                count,
                max: I::SENTINEL_FLOOR,
            })?;
        self.values.push(value);
        Ok(I::from_raw(raw))
    }

    /// Store a value, returning its id.
    ///
    /// # Panics
    /// Panics if the id space is exhausted. Use `try_add` for fallible adds.
    pub fn add(&mut self, value: V) -> I {
        self.try_add(value).unwrap_or_else(|e| panic!("{e}"))
    }

    /// Reserve an id bound to `V::default()`.
    pub fn add_default_value(&mut self) -> I
    where
        V: Default,
    {
        self.add(V::default())
    }

    /// Get the value for an id.
    ///
    /// # Panics
    /// Panics if `id` was not issued by this store.
    #[inline]
    pub fn get(&self, id: I) -> &V {
        &self.values[id.index()]
    }

    /// Get the value for an id, mutably.
    ///
    /// # Panics
    /// Panics if `id` was not issued by this store.
    #[inline]
    pub fn get_mut(&mut self, id: I) -> &mut V {
        &mut self.values[id.index()]
    }

    /// Number of ids issued.
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if no id has been issued.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// All issued ids, in allocation order.
    #[expect(
        clippy::cast_possible_truncation,
        reason = "try_add never issues an index that does not fit in u32"
    )]
    pub fn ids(&self) -> impl ExactSizeIterator<Item = I> + '_ {
        (0..self.values.len()).map(|index| I::from_raw(index as u32))
    }

    /// All issued ids paired with their values, in allocation order.
    pub fn iter(&self) -> impl Iterator<Item = (I, &V)> + '_ {
        self.ids().zip(self.values.iter())
    }
}

impl<I: IdBase, V> Default for ValueStore<I, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I, V: fmt::Debug> fmt::Debug for ValueStore<I, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValueStore")
            .field("values", &self.values)
            .finish()
    }
}
