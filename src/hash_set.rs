use core::fmt::Debug;
use core::hash::BuildHasher;
use core::hash::Hash;

use crate::hash_table::HashTable;

/// A hash set backed by the hopscotch [`HashTable`].
///
/// `HashSet<T, S>` stores values of type `T` where `T` implements
/// `Hash + Eq`, hashing them with a configurable builder `S`. Every value
/// sits within a fixed distance of the slot its hash maps to, so membership
/// tests cost a single bitmap scan no matter how full the set is.
///
/// Iteration order is storage order and should be treated as arbitrary.
#[derive(Clone)]
pub struct HashSet<T, S = crate::DefaultHashBuilder> {
    table: HashTable<T>,
    hash_builder: S,
}

impl<T, S> PartialEq for HashSet<T, S>
where
    T: Hash + Eq,
    S: BuildHasher,
{
    fn eq(&self, other: &Self) -> bool {
        if self.len() != other.len() {
            return false;
        }
        self.iter().all(|v| other.contains(v))
    }
}

impl<T, S> Eq for HashSet<T, S>
where
    T: Hash + Eq,
    S: BuildHasher,
{
}

impl<T, S> Debug for HashSet<T, S>
where
    T: Debug + Hash + Eq,
    S: BuildHasher,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T, S> HashSet<T, S>
where
    T: Hash + Eq,
    S: BuildHasher,
{
    /// Creates a new hash set with the given hasher builder.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # #[cfg(feature = "std")]
    /// # {
    /// use std::collections::hash_map::RandomState;
    ///
    /// use hop_table::HashSet;
    ///
    /// let set: HashSet<i32, _> = HashSet::with_hasher(RandomState::new());
    /// assert!(set.is_empty());
    /// # }
    /// ```
    pub fn with_hasher(hash_builder: S) -> Self {
        Self {
            table: HashTable::new(),
            hash_builder,
        }
    }

    /// Creates a new hash set holding at least `capacity` slots, with the
    /// given hasher builder.
    ///
    /// The capacity is rounded up to a prime.
    pub fn with_capacity_and_hasher(capacity: usize, hash_builder: S) -> Self {
        Self {
            table: HashTable::with_capacity(capacity),
            hash_builder,
        }
    }

    /// Returns the number of values in the set.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # #[cfg(any(feature = "std", feature = "foldhash"))]
    /// # {
    /// use hop_table::HashSet;
    ///
    /// let mut set: HashSet<i32> = HashSet::new();
    /// assert_eq!(set.len(), 0);
    /// set.insert(1);
    /// assert_eq!(set.len(), 1);
    /// # }
    /// ```
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Returns `true` if the set contains no values.
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Returns the number of slots in the backing table. Always prime.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # #[cfg(any(feature = "std", feature = "foldhash"))]
    /// # {
    /// use hop_table::HashSet;
    ///
    /// let set: HashSet<i32> = HashSet::with_capacity(1000);
    /// assert_eq!(set.capacity(), 1009);
    /// # }
    /// ```
    pub fn capacity(&self) -> usize {
        self.table.capacity()
    }

    /// Removes all values and shrinks the set back to the default capacity.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # #[cfg(any(feature = "std", feature = "foldhash"))]
    /// # {
    /// use hop_table::HashSet;
    ///
    /// let mut set: HashSet<i32> = HashSet::new();
    /// set.insert(1);
    /// set.clear();
    /// assert!(set.is_empty());
    /// assert_eq!(set.capacity(), 101);
    /// # }
    /// ```
    pub fn clear(&mut self) {
        self.table.clear();
    }

    /// Adds a value to the set.
    ///
    /// Returns `true` if the value was newly inserted, `false` if the set
    /// already contained it (the set is left untouched). `false` is also
    /// returned in the degenerate case where the hasher piles more values
    /// onto a single home slot than its neighborhood can hold, even after
    /// growing the table once.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # #[cfg(any(feature = "std", feature = "foldhash"))]
    /// # {
    /// use hop_table::HashSet;
    ///
    /// let mut set: HashSet<i32> = HashSet::new();
    /// assert_eq!(set.insert(37), true);
    /// assert_eq!(set.insert(37), false);
    /// assert_eq!(set.len(), 1);
    /// # }
    /// ```
    pub fn insert(&mut self, value: T) -> bool {
        let hash = self.hash_builder.hash_one(&value);
        if self.table.find(hash, |v| v == &value).is_some() {
            return false;
        }
        self.table.insert_unique(hash, value).is_ok()
    }

    /// Returns `true` if the set contains a value.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # #[cfg(any(feature = "std", feature = "foldhash"))]
    /// # {
    /// use hop_table::HashSet;
    ///
    /// let mut set: HashSet<i32> = HashSet::new();
    /// set.insert(1);
    /// assert!(set.contains(&1));
    /// assert!(!set.contains(&2));
    /// # }
    /// ```
    pub fn contains(&self, value: &T) -> bool {
        let hash = self.hash_builder.hash_one(value);
        self.table.find(hash, |v| v == value).is_some()
    }

    /// Returns a reference to the stored value equal to the given one, if
    /// any.
    pub fn get(&self, value: &T) -> Option<&T> {
        let hash = self.hash_builder.hash_one(value);
        self.table.find(hash, |v| v == value)
    }

    /// Removes a value from the set. Returns whether it was present.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # #[cfg(any(feature = "std", feature = "foldhash"))]
    /// # {
    /// use hop_table::HashSet;
    ///
    /// let mut set: HashSet<i32> = HashSet::new();
    /// set.insert(1);
    /// assert_eq!(set.remove(&1), true);
    /// assert_eq!(set.remove(&1), false);
    /// # }
    /// ```
    pub fn remove(&mut self, value: &T) -> bool {
        let hash = self.hash_builder.hash_one(value);
        self.table.remove(hash, |v| v == value).is_some()
    }

    /// Removes and returns the stored value equal to the given one, if any.
    pub fn take(&mut self, value: &T) -> Option<T> {
        let hash = self.hash_builder.hash_one(value);
        self.table.remove(hash, |v| v == value)
    }

    /// Adds a value, replacing and returning any stored value equal to it.
    ///
    /// # Panics
    ///
    /// Panics if the value was absent and cannot be placed because the
    /// hasher piles more values onto one home slot than its neighborhood
    /// holds; unlike [`insert`](Self::insert) there is no result channel to
    /// report that through.
    pub fn replace(&mut self, value: T) -> Option<T> {
        let hash = self.hash_builder.hash_one(&value);
        if let Some(slot) = self.table.locate(hash, |v| v == &value) {
            return Some(core::mem::replace(self.table.value_at_mut(slot), value));
        }
        if self.table.insert_unique(hash, value).is_err() {
            panic!("neighborhood saturated; the hasher's distribution is degenerate");
        }
        None
    }

    /// Returns an iterator over the values of the set.
    ///
    /// The iterator walks the backing slots in order and can also be
    /// reversed.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # #[cfg(any(feature = "std", feature = "foldhash"))]
    /// # {
    /// use hop_table::HashSet;
    ///
    /// let mut set: HashSet<i32> = HashSet::new();
    /// set.insert(1);
    /// set.insert(2);
    /// assert_eq!(set.iter().count(), 2);
    /// # }
    /// ```
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            inner: self.table.iter(),
        }
    }

    /// Removes every value from the set and yields them, leaving the set
    /// empty at the default capacity.
    pub fn drain(&mut self) -> Drain<T> {
        Drain {
            inner: self.table.drain(),
        }
    }

    /// Returns `true` if the set shares no values with `other`.
    pub fn is_disjoint(&self, other: &HashSet<T, S>) -> bool {
        if self.len() <= other.len() {
            self.iter().all(|v| !other.contains(v))
        } else {
            other.iter().all(|v| !self.contains(v))
        }
    }

    /// Returns `true` if `other` contains every value of the set.
    pub fn is_subset(&self, other: &HashSet<T, S>) -> bool {
        if self.len() > other.len() {
            return false;
        }
        self.iter().all(|v| other.contains(v))
    }

    /// Returns `true` if the set contains every value of `other`.
    pub fn is_superset(&self, other: &HashSet<T, S>) -> bool {
        other.is_subset(self)
    }

    /// Returns an iterator over the values in `self` or `other`, without
    /// duplicates.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # #[cfg(any(feature = "std", feature = "foldhash"))]
    /// # {
    /// use hop_table::HashSet;
    ///
    /// let a: HashSet<i32> = [1, 2].into_iter().collect();
    /// let b: HashSet<i32> = [2, 3].into_iter().collect();
    /// assert_eq!(a.union(&b).count(), 3);
    /// # }
    /// ```
    pub fn union<'a>(&'a self, other: &'a HashSet<T, S>) -> Union<'a, T, S> {
        Union {
            iter: self.iter(),
            other_iter: other.iter(),
            this: self,
        }
    }

    /// Returns an iterator over the values in both `self` and `other`.
    pub fn intersection<'a>(&'a self, other: &'a HashSet<T, S>) -> Intersection<'a, T, S> {
        Intersection {
            iter: self.iter(),
            other,
        }
    }

    /// Returns an iterator over the values in `self` but not in `other`.
    pub fn difference<'a>(&'a self, other: &'a HashSet<T, S>) -> Difference<'a, T, S> {
        Difference {
            iter: self.iter(),
            other,
        }
    }

    /// Returns an iterator over the values in exactly one of `self` and
    /// `other`.
    pub fn symmetric_difference<'a>(
        &'a self,
        other: &'a HashSet<T, S>,
    ) -> SymmetricDifference<'a, T, S> {
        SymmetricDifference {
            iter: self.difference(other).chain(other.difference(self)),
        }
    }
}

impl<T, S> HashSet<T, S>
where
    T: Hash + Eq,
    S: BuildHasher + Default,
{
    /// Creates a new hash set using the default hasher builder.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # #[cfg(any(feature = "std", feature = "foldhash"))]
    /// # {
    /// use hop_table::HashSet;
    ///
    /// let set: HashSet<i32> = HashSet::new();
    /// assert!(set.is_empty());
    /// assert_eq!(set.capacity(), 101);
    /// # }
    /// ```
    pub fn new() -> Self {
        Self::with_hasher(S::default())
    }

    /// Creates a new hash set holding at least `capacity` slots, using the
    /// default hasher builder.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_hasher(capacity, S::default())
    }
}

impl<T, S> Default for HashSet<T, S>
where
    T: Hash + Eq,
    S: BuildHasher + Default,
{
    fn default() -> Self {
        Self::new()
    }
}

/// An iterator over the values of a `HashSet`.
pub struct Iter<'a, T> {
    inner: crate::hash_table::Iter<'a, T>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> DoubleEndedIterator for Iter<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back()
    }
}

/// A draining iterator over the values of a `HashSet`.
pub struct Drain<T> {
    inner: crate::hash_table::Drain<T>,
}

impl<T> Iterator for Drain<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }
}

/// A consuming iterator over the values of a `HashSet`.
pub struct IntoIter<T> {
    inner: crate::hash_table::IntoIter<T>,
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }
}

impl<T, S> IntoIterator for HashSet<T, S> {
    type IntoIter = IntoIter<T>;
    type Item = T;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            inner: self.table.into_iter(),
        }
    }
}

impl<'a, T, S> IntoIterator for &'a HashSet<T, S>
where
    T: Hash + Eq,
    S: BuildHasher,
{
    type IntoIter = Iter<'a, T>;
    type Item = &'a T;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T, S> FromIterator<T> for HashSet<T, S>
where
    T: Hash + Eq,
    S: BuildHasher + Default,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = HashSet::new();
        for value in iter {
            set.insert(value);
        }
        set
    }
}

impl<T, S> Extend<T> for HashSet<T, S>
where
    T: Hash + Eq,
    S: BuildHasher,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

/// An iterator over the union of two sets.
pub struct Union<'a, T, S> {
    iter: Iter<'a, T>,
    other_iter: Iter<'a, T>,
    this: &'a HashSet<T, S>,
}

impl<'a, T, S> Iterator for Union<'a, T, S>
where
    T: Hash + Eq,
    S: BuildHasher,
{
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(v) = self.iter.next() {
            return Some(v);
        }
        loop {
            let v = self.other_iter.next()?;
            if !self.this.contains(v) {
                return Some(v);
            }
        }
    }
}

/// An iterator over the intersection of two sets.
pub struct Intersection<'a, T, S> {
    iter: Iter<'a, T>,
    other: &'a HashSet<T, S>,
}

impl<'a, T, S> Iterator for Intersection<'a, T, S>
where
    T: Hash + Eq,
    S: BuildHasher,
{
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let v = self.iter.next()?;
            if self.other.contains(v) {
                return Some(v);
            }
        }
    }
}

/// An iterator over the difference of two sets.
pub struct Difference<'a, T, S> {
    iter: Iter<'a, T>,
    other: &'a HashSet<T, S>,
}

impl<'a, T, S> Iterator for Difference<'a, T, S>
where
    T: Hash + Eq,
    S: BuildHasher,
{
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let v = self.iter.next()?;
            if !self.other.contains(v) {
                return Some(v);
            }
        }
    }
}

/// An iterator over the symmetric difference of two sets.
pub struct SymmetricDifference<'a, T, S> {
    iter: core::iter::Chain<Difference<'a, T, S>, Difference<'a, T, S>>,
}

impl<'a, T, S> Iterator for SymmetricDifference<'a, T, S>
where
    T: Hash + Eq,
    S: BuildHasher,
{
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.iter.next()
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;
    use core::hash::BuildHasherDefault;
    use core::hash::Hasher;

    use rand::Rng;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;
    use siphasher::sip::SipHasher;

    use super::*;

    #[derive(Clone)]
    struct SipHashBuilder {
        k1: u64,
        k2: u64,
    }

    impl BuildHasher for SipHashBuilder {
        type Hasher = SipHasher;

        fn build_hasher(&self) -> Self::Hasher {
            SipHasher::new_with_keys(self.k1, self.k2)
        }
    }

    impl Default for SipHashBuilder {
        fn default() -> Self {
            Self {
                k1: 0x0123_4567_89AB_CDEF,
                k2: 0xFEDC_BA98_7654_3210,
            }
        }
    }

    /// Hashes an integer to itself, so home slots are predictable.
    #[derive(Default)]
    struct PassThroughHasher(u64);

    impl Hasher for PassThroughHasher {
        fn finish(&self) -> u64 {
            self.0
        }

        fn write(&mut self, bytes: &[u8]) {
            let mut buf = [0u8; 8];
            let n = bytes.len().min(8);
            buf[..n].copy_from_slice(&bytes[..n]);
            self.0 = u64::from_ne_bytes(buf);
        }

        fn write_u64(&mut self, n: u64) {
            self.0 = n;
        }
    }

    type PassThrough = BuildHasherDefault<PassThroughHasher>;

    #[test]
    fn insert_contains_remove() {
        let mut set: HashSet<u64, SipHashBuilder> = HashSet::new();
        for v in 0..100 {
            assert!(set.insert(v));
        }
        assert_eq!(set.len(), 100);
        for v in 0..100 {
            assert!(set.contains(&v));
        }
        assert!(!set.contains(&100));

        assert!(set.remove(&50));
        assert!(!set.remove(&50));
        assert!(!set.contains(&50));
        assert_eq!(set.len(), 99);
        set.table.assert_invariants();
    }

    #[test]
    fn scripted_insert_remove_sequence() {
        let mut set: HashSet<i32, SipHashBuilder> = HashSet::new();
        for v in [3, 17, 101, 5] {
            assert!(set.insert(v));
        }
        assert_eq!(set.len(), 4);

        assert!(set.remove(&17));
        assert!(!set.contains(&17));
        assert!(set.contains(&3));
        assert!(set.contains(&101));
        assert!(set.contains(&5));
        assert_eq!(set.len(), 3);
        assert!(!set.remove(&17));
        set.table.assert_invariants();
    }

    #[test]
    fn duplicate_inserts_leave_the_set_alone() {
        let mut set: HashSet<u64, SipHashBuilder> = HashSet::new();
        assert!(set.insert(42));
        assert!(!set.insert(42));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn the_eighty_first_insert_grows_the_table() {
        let mut set: HashSet<u64, PassThrough> = HashSet::default();
        for v in 0..80 {
            assert!(set.insert(v));
        }
        assert_eq!(set.len(), 80);
        assert_eq!(set.capacity(), 101);

        assert!(set.insert(80));
        assert_eq!(set.len(), 81);
        assert_eq!(set.capacity(), 211);
        for v in 0..=80 {
            assert!(set.contains(&v));
        }
        set.table.assert_invariants();
    }

    #[test]
    fn growth_keeps_removed_values_out() {
        let mut set: HashSet<u64, PassThrough> = HashSet::default();
        for v in 0..100 {
            assert!(set.insert(v));
        }
        for v in (0..100).step_by(5) {
            assert!(set.remove(&v));
        }
        for v in 100..250 {
            assert!(set.insert(v));
        }
        // Two growth steps later, membership is intact.
        assert!(set.capacity() > 211);
        for v in 0..250 {
            let expected = v >= 100 || v % 5 != 0;
            assert_eq!(set.contains(&v), expected, "value {v}");
        }
        set.table.assert_invariants();
    }

    #[test]
    fn get_take_and_replace() {
        let mut set: HashSet<u64, SipHashBuilder> = HashSet::new();
        assert!(set.insert(7));
        assert_eq!(set.get(&7), Some(&7));
        assert_eq!(set.get(&8), None);

        assert_eq!(set.replace(7), Some(7));
        assert_eq!(set.replace(8), None);
        assert_eq!(set.len(), 2);

        assert_eq!(set.take(&7), Some(7));
        assert_eq!(set.take(&7), None);
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn clear_resets_capacity() {
        let mut set: HashSet<u64, SipHashBuilder> = HashSet::with_capacity_and_hasher(
            1000,
            SipHashBuilder::default(),
        );
        assert_eq!(set.capacity(), 1009);
        for v in 0..100 {
            set.insert(v);
        }
        set.clear();
        assert!(set.is_empty());
        assert_eq!(set.capacity(), 101);
    }

    #[test]
    fn iteration_and_drain() {
        let mut set: HashSet<u64, SipHashBuilder> = HashSet::new();
        for v in 0..10 {
            set.insert(v);
        }
        let mut forward: Vec<u64> = set.iter().copied().collect();
        forward.sort();
        assert_eq!(forward, (0..10).collect::<Vec<u64>>());

        let mut backward: Vec<u64> = set.iter().rev().copied().collect();
        backward.sort();
        assert_eq!(backward, (0..10).collect::<Vec<u64>>());

        let mut drained: Vec<u64> = set.drain().collect();
        drained.sort();
        assert_eq!(drained, (0..10).collect::<Vec<u64>>());
        assert!(set.is_empty());
        assert_eq!(set.capacity(), 101);
    }

    #[test]
    fn set_algebra() {
        let a: HashSet<u64, SipHashBuilder> = [1, 2, 3].into_iter().collect();
        let b: HashSet<u64, SipHashBuilder> = [3, 4].into_iter().collect();

        let mut union: Vec<u64> = a.union(&b).copied().collect();
        union.sort();
        assert_eq!(union, [1, 2, 3, 4]);

        let intersection: Vec<u64> = a.intersection(&b).copied().collect();
        assert_eq!(intersection, [3]);

        let mut difference: Vec<u64> = a.difference(&b).copied().collect();
        difference.sort();
        assert_eq!(difference, [1, 2]);

        let mut symmetric: Vec<u64> = a.symmetric_difference(&b).copied().collect();
        symmetric.sort();
        assert_eq!(symmetric, [1, 2, 4]);

        let c: HashSet<u64, SipHashBuilder> = [1, 2].into_iter().collect();
        assert!(c.is_subset(&a));
        assert!(a.is_superset(&c));
        assert!(!a.is_disjoint(&b));
        assert!(c.is_disjoint(&b));
    }

    #[test]
    fn equality_and_from_iterator() {
        let a: HashSet<u64, SipHashBuilder> = [1, 2, 3].into_iter().collect();
        let b: HashSet<u64, SipHashBuilder> = [3, 2, 1].into_iter().collect();
        assert_eq!(a, b);

        let mut c = a.clone();
        assert_eq!(a, c);
        c.insert(4);
        assert_ne!(a, c);

        let mut d: HashSet<u64, SipHashBuilder> = HashSet::new();
        d.extend([1, 2, 3]);
        assert_eq!(a, d);

        let into: Vec<u64> = {
            let mut values: Vec<u64> = d.into_iter().collect();
            values.sort();
            values
        };
        assert_eq!(into, [1, 2, 3]);
    }

    #[test]
    #[cfg_attr(miri, ignore)]
    fn randomized_operations_match_a_reference_set() {
        let mut rng = SmallRng::seed_from_u64(0x5EED_CAFE);
        let mut set: HashSet<u64, SipHashBuilder> = HashSet::new();
        let mut reference: hashbrown::HashSet<u64> = hashbrown::HashSet::new();

        for step in 0..4000u32 {
            let key = rng.random_range(0..600u64);
            if rng.random_bool(0.6) {
                assert_eq!(set.insert(key), reference.insert(key));
            } else {
                assert_eq!(set.remove(&key), reference.remove(&key));
            }
            assert_eq!(set.len(), reference.len());
            if step % 256 == 0 {
                set.table.assert_invariants();
            }
        }
        set.table.assert_invariants();
        for key in 0..600 {
            assert_eq!(set.contains(&key), reference.contains(&key), "key {key}");
        }
    }
}
