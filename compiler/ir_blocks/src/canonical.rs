//! Content-addressed index from block content to canonical block id.
//!
//! The index never stores block content. Each bucket holds the content hash
//! and the id of the block; equality is decided by a caller-supplied
//! predicate that reads the content back through the id. The key therefore
//! aliases the block's arena storage instead of owning a copy, and a probe
//! can compare a transient buffer against stored blocks without copying it.
//!
//! # Layout
//!
//! Open addressing with linear probing over a power-of-two bucket array.
//! Every bucket carries an explicit state tag, so a zero-length block is an
//! ordinary occupied bucket and can never be mistaken for an empty or
//! deleted one.
//!
//! # Removal
//!
//! [`BlockValueStore`](crate::BlockValueStore) never forgets a canonical
//! block, but the index is usable on its own: [`CanonicalIndex::remove`]
//! leaves a tombstone and [`CanonicalIndex::ids`] lists what is live, for
//! owners whose canonical entries can expire.

use tracing::debug;

/// Smallest non-zero bucket count.
const MIN_BUCKETS: usize = 16;

/// Buckets in use (live + tombstones) never exceed 7/8 of the array.
const MAX_LOAD_NUMERATOR: usize = 7;
const MAX_LOAD_DENOMINATOR: usize = 8;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Bucket<I> {
    /// Never used. Terminates a probe sequence.
    Empty,
    /// Previously occupied. Probes continue past it.
    Tombstone,
    Occupied { hash: u64, id: I },
}

/// Hash index mapping content to the id of its canonical block.
#[derive(Clone, Debug)]
pub struct CanonicalIndex<I> {
    buckets: Vec<Bucket<I>>,
    len: usize,
    tombstones: usize,
}

/// Result of [`CanonicalIndex::entry`].
#[derive(Debug)]
pub enum Entry<'a, I> {
    /// Equal content is already indexed under this id.
    Occupied(I),
    /// No equal content; the bucket is reserved for the caller's id.
    Vacant(VacantEntry<'a, I>),
}

/// A reserved bucket awaiting its id.
///
/// Holding this borrows the index mutably, so nothing can be inserted or
/// removed between the probe and the insertion.
#[derive(Debug)]
#[must_use = "a vacant entry does nothing until `insert` is called"]
pub struct VacantEntry<'a, I> {
    index: &'a mut CanonicalIndex<I>,
    slot: usize,
    hash: u64,
}

impl<I: Copy> VacantEntry<'_, I> {
    /// Record `id` as canonical for the probed content.
    pub fn insert(self, id: I) {
        let bucket = &mut self.index.buckets[self.slot];
        if matches!(bucket, Bucket::Tombstone) {
            self.index.tombstones -= 1;
        }
        *bucket = Bucket::Occupied {
            hash: self.hash,
            id,
        };
        self.index.len += 1;
    }
}

impl<I: Copy> CanonicalIndex<I> {
    /// Create an empty index. No buckets are allocated until first insert.
    pub fn new() -> Self {
        Self {
            buckets: Vec::new(),
            len: 0,
            tombstones: 0,
        }
    }

    /// Create an index that holds `capacity` entries without resizing.
    pub fn with_capacity(capacity: usize) -> Self {
        let mut index = Self::new();
        if capacity > 0 {
            index.buckets = vec![Bucket::Empty; Self::buckets_for(capacity)];
        }
        index
    }

    /// Number of canonical entries.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[cfg(test)]
    fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Look up the id whose content matches, without reserving anything.
    ///
    /// `eq` is only called for ids whose stored hash equals `hash`.
    pub fn find(&self, hash: u64, mut eq: impl FnMut(I) -> bool) -> Option<I> {
        self.position(hash, &mut eq).map(|slot| match self.buckets[slot] {
            Bucket::Occupied { id, .. } => id,
            Bucket::Empty | Bucket::Tombstone => unreachable_bucket(),
        })
    }

    /// Find the id whose content matches, or reserve a bucket for new content.
    pub fn entry(&mut self, hash: u64, mut eq: impl FnMut(I) -> bool) -> Entry<'_, I> {
        self.reserve_one();

        let mask = self.buckets.len() - 1;
        let mut pos = Self::home(hash, mask);
        let mut first_free = None;
        loop {
            match self.buckets[pos] {
                Bucket::Empty => {
                    let slot = first_free.unwrap_or(pos);
                    return Entry::Vacant(VacantEntry {
                        index: self,
                        slot,
                        hash,
                    });
                }
                Bucket::Tombstone => {
                    if first_free.is_none() {
                        first_free = Some(pos);
                    }
                }
                Bucket::Occupied { hash: stored, id } => {
                    if stored == hash && eq(id) {
                        return Entry::Occupied(id);
                    }
                }
            }
            pos = (pos + 1) & mask;
        }
    }

    /// Remove the entry whose content matches, returning its id.
    ///
    /// The bucket becomes a tombstone so later probes still reach entries
    /// displaced past it.
    pub fn remove(&mut self, hash: u64, mut eq: impl FnMut(I) -> bool) -> Option<I> {
        let slot = self.position(hash, &mut eq)?;
        let removed = std::mem::replace(&mut self.buckets[slot], Bucket::Tombstone);
        self.len -= 1;
        self.tombstones += 1;
        match removed {
            Bucket::Occupied { id, .. } => Some(id),
            Bucket::Empty | Bucket::Tombstone => unreachable_bucket(),
        }
    }

    /// All canonical ids, in bucket order.
    pub fn ids(&self) -> impl Iterator<Item = I> + '_ {
        self.buckets.iter().filter_map(|bucket| match *bucket {
            Bucket::Occupied { id, .. } => Some(id),
            Bucket::Empty | Bucket::Tombstone => None,
        })
    }

    fn position(&self, hash: u64, eq: &mut impl FnMut(I) -> bool) -> Option<usize> {
        if self.buckets.is_empty() {
            return None;
        }
        let mask = self.buckets.len() - 1;
        let mut pos = Self::home(hash, mask);
        // Every bucket is visited at most once; a full cycle means no match.
        for _ in 0..self.buckets.len() {
            match self.buckets[pos] {
                Bucket::Empty => return None,
                Bucket::Tombstone => {}
                Bucket::Occupied { hash: stored, id } => {
                    if stored == hash && eq(id) {
                        return Some(pos);
                    }
                }
            }
            pos = (pos + 1) & mask;
        }
        None
    }

    #[expect(
        clippy::cast_possible_truncation,
        reason = "only the low bits select the home bucket"
    )]
    #[inline]
    fn home(hash: u64, mask: usize) -> usize {
        (hash as usize) & mask
    }

    fn buckets_for(entries: usize) -> usize {
        (entries * MAX_LOAD_DENOMINATOR / MAX_LOAD_NUMERATOR + 1)
            .next_power_of_two()
            .max(MIN_BUCKETS)
    }

    /// Make room for one more entry while keeping at least one empty bucket.
    fn reserve_one(&mut self) {
        let cap = self.buckets.len();
        if cap == 0 {
            self.buckets = vec![Bucket::Empty; MIN_BUCKETS];
            return;
        }
        let used = self.len + self.tombstones + 1;
        if used * MAX_LOAD_DENOMINATOR <= cap * MAX_LOAD_NUMERATOR {
            return;
        }
        // Mostly tombstones: rehash at the same size to reclaim them.
        let new_cap = Self::buckets_for(self.len + 1).max(if self.tombstones > self.len {
            cap
        } else {
            cap * 2
        });
        self.rehash(new_cap);
    }

    /// Rebuild the bucket array from cached hashes. Content is not re-read.
    fn rehash(&mut self, new_cap: usize) {
        let old = std::mem::replace(&mut self.buckets, vec![Bucket::Empty; new_cap]);
        let mask = new_cap - 1;
        for bucket in old {
            if let Bucket::Occupied { hash, id } = bucket {
                let mut pos = Self::home(hash, mask);
                while !matches!(self.buckets[pos], Bucket::Empty) {
                    pos = (pos + 1) & mask;
                }
                self.buckets[pos] = Bucket::Occupied { hash, id };
            }
        }
        debug!(
            buckets = new_cap,
            entries = self.len,
            reclaimed = self.tombstones,
            "canonical index rehashed"
        );
        self.tombstones = 0;
    }
}

impl<I: Copy> Default for CanonicalIndex<I> {
    fn default() -> Self {
        Self::new()
    }
}

/// `position` only ever returns occupied slots.
#[cold]
fn unreachable_bucket() -> ! {
    panic!("canonical index position did not refer to an occupied bucket")
}
