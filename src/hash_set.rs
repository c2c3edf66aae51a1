use core::fmt::Debug;
use core::iter::FusedIterator;

use crate::hash_table::HashTable;
use crate::hashable::Hashable;

/// A hash set backed by a chained [`HashTable`].
///
/// `HashSet<T>` stores each member as a key of the underlying table, with
/// `true` as its value. Members implement [`Hashable`]; unlike the table,
/// the set has no absent-key member.
///
/// # Examples
///
/// ```rust
/// use chained_hash::HashSet;
///
/// let mut set = HashSet::new();
/// assert!(set.insert(3u32));
/// assert!(!set.insert(3u32));
/// assert!(set.contains(&3));
/// assert!(set.remove(&3));
/// assert!(!set.contains(&3));
/// ```
#[derive(Clone)]
pub struct HashSet<T> {
    table: HashTable<T, bool>,
}

impl<T: Hashable> PartialEq for HashSet<T> {
    fn eq(&self, other: &Self) -> bool {
        if self.len() != other.len() {
            return false;
        }
        self.iter().all(|v| other.contains(v))
    }
}

impl<T: Hashable> Eq for HashSet<T> {}

impl<T: Debug> Debug for HashSet<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T> HashSet<T> {
    /// Creates an empty set with the default capacity and load factor.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use chained_hash::HashSet;
    /// #
    /// let set: HashSet<i32> = HashSet::new();
    /// assert!(set.is_empty());
    /// ```
    pub fn new() -> Self {
        Self {
            table: HashTable::new(),
        }
    }

    /// Creates an empty set with at least `capacity` buckets.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use chained_hash::HashSet;
    /// #
    /// let set: HashSet<i32> = HashSet::with_capacity(100);
    /// assert!(set.capacity() >= 100);
    /// ```
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            table: HashTable::with_capacity(capacity),
        }
    }

    /// Creates an empty set with at least `capacity` buckets and the given
    /// load factor.
    ///
    /// # Panics
    ///
    /// Panics if `load_factor` is not a finite, strictly positive number.
    pub fn with_capacity_and_load_factor(capacity: usize, load_factor: f32) -> Self {
        Self {
            table: HashTable::with_capacity_and_load_factor(capacity, load_factor),
        }
    }

    /// Returns the number of elements in the set.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use chained_hash::HashSet;
    /// #
    /// let mut set = HashSet::new();
    /// assert_eq!(set.len(), 0);
    /// set.insert(1u32);
    /// assert_eq!(set.len(), 1);
    /// ```
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Returns `true` if the set contains no elements.
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Returns the number of buckets in the underlying table.
    pub fn capacity(&self) -> usize {
        self.table.capacity()
    }

    /// Removes all elements. Capacity is retained.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use chained_hash::HashSet;
    /// #
    /// let mut set = HashSet::new();
    /// set.insert(1u32);
    /// set.clear();
    /// assert!(set.is_empty());
    /// assert!(!set.contains(&1));
    /// ```
    pub fn clear(&mut self) {
        self.table.clear();
    }

    /// Returns an iterator over the elements, in bucket order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use chained_hash::HashSet;
    /// #
    /// let set: HashSet<u32> = [1, 2, 3].into_iter().collect();
    /// let mut items: Vec<_> = set.iter().copied().collect();
    /// items.sort();
    /// assert_eq!(items, [1, 2, 3]);
    /// ```
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            inner: self.table.keys(),
        }
    }

    /// Returns an iterator that removes and yields every element.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use chained_hash::HashSet;
    /// #
    /// let mut set: HashSet<u32> = [1, 2, 3].into_iter().collect();
    /// assert_eq!(set.drain().count(), 3);
    /// assert!(set.is_empty());
    /// ```
    pub fn drain(&mut self) -> Drain<'_, T> {
        Drain {
            inner: self.table.drain(),
        }
    }
}

impl<T: Hashable> HashSet<T> {
    /// Adds `value` to the set.
    ///
    /// Returns `true` if the value was newly inserted, `false` if an equal
    /// value was already present. An already-present element is left
    /// untouched.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use chained_hash::HashSet;
    /// #
    /// let mut set = HashSet::new();
    /// assert!(set.insert("a".to_string()));
    /// assert!(!set.insert("a".to_string()));
    /// assert_eq!(set.len(), 1);
    /// ```
    pub fn insert(&mut self, value: T) -> bool {
        self.table.insert(value, true).is_none()
    }

    /// Returns `true` if the set contains `value`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use chained_hash::HashSet;
    /// #
    /// let mut set = HashSet::new();
    /// set.insert(1u32);
    /// assert!(set.contains(&1));
    /// assert!(!set.contains(&2));
    /// ```
    pub fn contains(&self, value: &T) -> bool {
        self.table.contains_key(value)
    }

    /// Returns the stored element equal to `value`.
    pub fn get(&self, value: &T) -> Option<&T> {
        self.table.get_key_value(value).and_then(|(stored, _)| stored)
    }

    /// Removes `value` from the set, returning whether it was present.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use chained_hash::HashSet;
    /// #
    /// let mut set = HashSet::new();
    /// set.insert(1u32);
    /// assert!(set.remove(&1));
    /// assert!(!set.remove(&1));
    /// ```
    pub fn remove(&mut self, value: &T) -> bool {
        self.table.remove(value).is_some()
    }

    /// Removes and returns the stored element equal to `value`.
    pub fn take(&mut self, value: &T) -> Option<T> {
        self.table
            .remove_entry(value)
            .and_then(|(stored, _)| stored)
    }
}

impl<T> Default for HashSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Hashable> Extend<T> for HashSet<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<T: Hashable> FromIterator<T> for HashSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl<'a, T> IntoIterator for &'a HashSet<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T> IntoIterator for HashSet<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            inner: self.table.into_iter(),
        }
    }
}

/// An iterator over the elements of a `HashSet`.
pub struct Iter<'a, T> {
    inner: crate::hash_table::Keys<'a, T, bool>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        // Set members are never stored under the absent key.
        self.inner.find_map(|key| key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> FusedIterator for Iter<'_, T> {}

/// A draining iterator over the elements of a `HashSet`.
pub struct Drain<'a, T> {
    inner: crate::hash_table::Drain<'a, T, bool>,
}

impl<T> Iterator for Drain<'_, T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.find_map(|(key, _)| key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

/// A consuming iterator over the elements of a `HashSet`.
pub struct IntoIter<T> {
    inner: crate::hash_table::IntoIter<T, bool>,
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.find_map(|(key, _)| key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

#[cfg(test)]
mod tests {
    use alloc::format;
    use alloc::string::String;
    use alloc::string::ToString;
    use alloc::vec::Vec;

    use rand::Rng;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;

    #[test]
    fn test_new_and_default() {
        let set: HashSet<i32> = HashSet::new();
        assert!(set.is_empty());
        assert_eq!(set.len(), 0);

        let set2: HashSet<i32> = HashSet::default();
        assert!(set2.is_empty());
        assert_eq!(set2.capacity(), 16);
    }

    #[test]
    fn test_add_twice() {
        let mut set = HashSet::new();
        assert!(set.insert("e".to_string()));
        assert!(!set.insert("e".to_string()));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_remove_then_contains() {
        let mut set = HashSet::new();
        set.insert(7u64);
        assert!(set.remove(&7));
        assert!(!set.contains(&7));
        assert!(!set.remove(&7));
        assert!(set.is_empty());
    }

    #[test]
    fn test_equal_instances_are_one_member() {
        let mut set = HashSet::new();
        set.insert(String::from("key"));
        let other: String = "ke".to_string() + "y";
        assert!(set.contains(&other));
        assert!(set.remove(&other));
        assert!(set.is_empty());
    }

    #[test]
    fn test_get_and_take() {
        let mut set = HashSet::new();
        set.insert(vec_key(&[1, 2]));
        assert_eq!(set.get(&vec_key(&[1, 2])), Some(&vec_key(&[1, 2])));
        assert_eq!(set.take(&vec_key(&[1, 2])), Some(vec_key(&[1, 2])));
        assert_eq!(set.take(&vec_key(&[1, 2])), None);
    }

    fn vec_key(items: &[u8]) -> Vec<u8> {
        items.to_vec()
    }

    #[test]
    fn test_many_members() {
        let mut rng = SmallRng::from_os_rng();
        let mut set = HashSet::new();
        let mut model = Vec::new();
        for _ in 0..1000 {
            let value = rng.random_range(0..500u32);
            let inserted = set.insert(value);
            assert_eq!(inserted, !model.contains(&value));
            if inserted {
                model.push(value);
            }
        }
        assert_eq!(set.len(), model.len());
        for value in &model {
            assert!(set.contains(value));
        }
    }

    #[test]
    fn test_clear() {
        let mut set: HashSet<u32> = (0..40).collect();
        let capacity = set.capacity();
        set.clear();
        assert!(set.is_empty());
        assert_eq!(set.capacity(), capacity);
        assert!((0..40).all(|v| !set.contains(&v)));
    }

    #[test]
    fn test_iter_drain_into_iter() {
        let mut set: HashSet<u32> = (0..20).collect();
        let mut items: Vec<_> = set.iter().copied().collect();
        items.sort();
        assert_eq!(items, (0..20).collect::<Vec<_>>());
        assert_eq!((&set).into_iter().count(), 20);

        let drained = set.drain().count();
        assert_eq!(drained, 20);
        assert!(set.is_empty());

        set.extend([5, 6, 6]);
        let mut owned: Vec<_> = set.into_iter().collect();
        owned.sort();
        assert_eq!(owned, [5, 6]);
    }

    #[test]
    fn test_equality_ignores_order() {
        let a: HashSet<u32> = [1, 2, 3].into_iter().collect();
        let b: HashSet<u32> = [3, 2, 1].into_iter().collect();
        let c: HashSet<u32> = [1, 2].into_iter().collect();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_clone_is_independent() {
        let mut a: HashSet<u32> = [1, 2].into_iter().collect();
        let b = a.clone();
        a.insert(3);
        assert!(!b.contains(&3));
        assert_eq!(b.len(), 2);
    }

    #[test]
    fn test_debug() {
        let mut set = HashSet::new();
        set.insert(4u32);
        assert_eq!(format!("{set:?}"), "{4}");
    }
}
