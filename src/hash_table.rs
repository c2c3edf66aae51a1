use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt::Debug;
use core::iter::FusedIterator;

use crate::hashable::Hashable;

/// The default initial capacity. Must be a power of two.
pub const DEFAULT_INITIAL_CAPACITY: usize = 16;

/// The largest bucket count the table will ever allocate. Must be a power of
/// two.
///
/// Once a table reaches this many buckets it stops growing: further
/// insertions still succeed, but chains lengthen instead.
pub const MAXIMUM_CAPACITY: usize = 1 << 30;

/// The load factor used when none is specified.
pub const DEFAULT_LOAD_FACTOR: f32 = 0.75;

/// Number of exact bins in [`HashTable::chain_histogram`]. Chains of this
/// length or longer share the final bin.
#[cfg(any(test, feature = "stats"))]
pub const CHAIN_HISTOGRAM_BINS: usize = 8;

/// Mixes high bits of a hash code into the low bits.
///
/// Bucket indices are taken from the low bits only, so without this step
/// hash codes that differ only in their upper bits would all collide. Codes
/// that differ by constant multiples at each bit position end up with a
/// bounded number of collisions (about 8 at the default load factor).
#[inline(always)]
fn spread(hash_code: i32) -> u32 {
    let mut h = hash_code as u32;
    h ^= (h >> 20) ^ (h >> 12);
    h ^ (h >> 7) ^ (h >> 4)
}

/// Returns the bucket for `hash` in a table of `length` buckets.
///
/// `length` must be a power of two.
#[inline(always)]
fn index_for(hash: u32, length: usize) -> usize {
    debug_assert!(length.is_power_of_two());
    hash as usize & (length - 1)
}

#[inline(always)]
fn threshold_for(capacity: usize, load_factor: f32) -> usize {
    (capacity as f32 * load_factor) as usize
}

type Link<K, V> = Option<Box<Node<K, V>>>;

struct Node<K, V> {
    /// Spread hash of `key`, cached so that resizing never calls back into
    /// the key and lookups can reject most mismatches without `equals`.
    hash: u32,
    key: Option<K>,
    value: V,
    next: Link<K, V>,
}

impl<K: Hashable, V> Node<K, V> {
    #[inline(always)]
    fn matches(&self, hash: u32, key: Option<&K>) -> bool {
        self.hash == hash
            && match (&self.key, key) {
                (None, None) => true,
                (Some(stored), Some(key)) => core::ptr::eq(stored, key) || key.equals(stored),
                _ => false,
            }
    }
}

fn empty_buckets<K, V>(capacity: usize) -> Vec<Link<K, V>> {
    let mut table = Vec::with_capacity(capacity);
    table.resize_with(capacity, || None);
    table
}

/// Drops a chain one node at a time.
///
/// Letting `Box` drop a long chain recursively can exhaust the stack once
/// the table has saturated at [`MAXIMUM_CAPACITY`].
#[inline]
fn drop_chain<K, V>(mut link: Link<K, V>) {
    while let Some(mut node) = link {
        link = node.next.take();
    }
}

/// Clones a chain, preserving its order.
fn clone_chain<K: Clone, V: Clone>(mut link: &Link<K, V>) -> Link<K, V> {
    let mut head: Link<K, V> = None;
    let mut tail = &mut head;
    while let Some(node) = link {
        let cloned = tail.insert(Box::new(Node {
            hash: node.hash,
            key: node.key.clone(),
            value: node.value.clone(),
            next: None,
        }));
        tail = &mut cloned.next;
        link = &node.next;
    }
    head
}

/// Bucket chain statistics for analysing hash distribution.
///
/// Only available in tests or with the `stats` feature.
#[cfg(any(test, feature = "stats"))]
#[derive(Debug, Clone)]
pub struct DebugStats {
    /// Number of entries currently in the table
    pub len: usize,
    /// Number of buckets
    pub capacity: usize,
    /// Entry count at which the table will next grow
    pub threshold: usize,
    /// Current load (len / capacity)
    pub load_factor: f64,
    /// Number of buckets with at least one entry
    pub occupied_buckets: usize,
    /// Length of the longest chain
    pub longest_chain: usize,
    /// Mean chain length over occupied buckets
    pub average_chain: f64,
}

#[cfg(any(test, feature = "stats"))]
impl DebugStats {
    /// Pretty-print the statistics.
    #[cfg(feature = "std")]
    pub fn print(&self) {
        println!("=== Hash Table Chain Statistics ===");
        println!(
            "Population: {}/{} buckets ({:.2}% load)",
            self.len,
            self.capacity,
            self.load_factor * 100.0
        );
        if self.threshold == usize::MAX {
            println!("Threshold: saturated, growth disabled");
        } else {
            println!("Threshold: {}", self.threshold);
        }
        println!(
            "Occupied buckets: {}/{} ({:.2}%)",
            self.occupied_buckets,
            self.capacity,
            if self.capacity == 0 {
                0.0
            } else {
                self.occupied_buckets as f64 / self.capacity as f64 * 100.0
            }
        );
        println!(
            "Chains: longest {}, average {:.2}",
            self.longest_chain, self.average_chain
        );
    }
}

/// A hash table using separate chaining over a power-of-two bucket array.
///
/// Keys implement [`Hashable`]. Every operation also accepts the *absent
/// key* (`None`), which behaves like any other key: it can be mapped to at
/// most one value, and it always lives in bucket 0.
///
/// Each bucket holds a singly linked chain. New entries are pushed onto the
/// head of their chain, so iteration order within a bucket is the reverse
/// of insertion order and carries no other guarantee.
///
/// When the number of entries reaches `capacity * load_factor` the bucket
/// array doubles and every entry is relinked into the new array; entries are
/// never reallocated. Growth stops at [`MAXIMUM_CAPACITY`].
///
/// The table is not synchronized. All mutation goes through `&mut self`.
///
/// ## Example
///
/// ```rust
/// use chained_hash::HashTable;
///
/// let mut table = HashTable::new();
/// assert_eq!(table.insert("alice".to_string(), 1), None);
/// assert_eq!(table.insert("alice".to_string(), 2), Some(1));
/// assert_eq!(table.insert(None, 0), None);
///
/// assert_eq!(table.get(&"alice".to_string()), Some(&2));
/// assert_eq!(table.get(None), Some(&0));
/// assert_eq!(table.len(), 2);
/// ```
pub struct HashTable<K, V> {
    table: Vec<Link<K, V>>,
    size: usize,
    threshold: usize,
    load_factor: f32,
    /// Bucket count at which growth stops. Always [`MAXIMUM_CAPACITY`]
    /// outside of tests.
    max_capacity: usize,
}

impl<K, V> HashTable<K, V> {
    /// Creates an empty table with the default capacity (16) and load factor
    /// (0.75).
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use chained_hash::HashTable;
    /// #
    /// let table: HashTable<u32, &str> = HashTable::new();
    /// assert_eq!(table.capacity(), 16);
    /// assert_eq!(table.threshold(), 12);
    /// ```
    pub fn new() -> Self {
        Self::with_capacity_and_load_factor(DEFAULT_INITIAL_CAPACITY, DEFAULT_LOAD_FACTOR)
    }

    /// Creates an empty table with at least `capacity` buckets and the
    /// default load factor.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use chained_hash::HashTable;
    /// #
    /// let table: HashTable<u32, u32> = HashTable::with_capacity(100);
    /// assert_eq!(table.capacity(), 128);
    /// ```
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_load_factor(capacity, DEFAULT_LOAD_FACTOR)
    }

    /// Creates an empty table with at least `capacity` buckets and the given
    /// load factor.
    ///
    /// The bucket count is rounded up to a power of two and clamped to
    /// `1..=MAXIMUM_CAPACITY`.
    ///
    /// # Panics
    ///
    /// Panics if `load_factor` is not a finite, strictly positive number.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use chained_hash::HashTable;
    /// #
    /// let table: HashTable<u32, u32> = HashTable::with_capacity_and_load_factor(10, 0.5);
    /// assert_eq!(table.capacity(), 16);
    /// assert_eq!(table.threshold(), 8);
    /// ```
    pub fn with_capacity_and_load_factor(capacity: usize, load_factor: f32) -> Self {
        Self::with_capacity_limit(capacity, load_factor, MAXIMUM_CAPACITY)
    }

    fn with_capacity_limit(capacity: usize, load_factor: f32, max_capacity: usize) -> Self {
        assert!(
            load_factor.is_finite() && load_factor > 0.0,
            "illegal load factor: {load_factor}"
        );
        debug_assert!(max_capacity.is_power_of_two());

        let capacity = capacity.clamp(1, max_capacity).next_power_of_two();
        Self {
            table: empty_buckets(capacity),
            size: 0,
            threshold: threshold_for(capacity, load_factor),
            load_factor,
            max_capacity,
        }
    }

    /// Returns the number of entries in the table.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use chained_hash::HashTable;
    /// #
    /// let mut table = HashTable::new();
    /// assert_eq!(table.len(), 0);
    /// table.insert(1u32, "a");
    /// assert_eq!(table.len(), 1);
    /// ```
    pub fn len(&self) -> usize {
        self.size
    }

    /// Returns `true` if the table contains no entries.
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Returns the number of buckets. Always a power of two.
    pub fn capacity(&self) -> usize {
        self.table.len()
    }

    /// Returns the entry count at which the table will next double.
    ///
    /// Once the table has saturated at [`MAXIMUM_CAPACITY`] this is
    /// `usize::MAX`.
    pub fn threshold(&self) -> usize {
        self.threshold
    }

    /// Returns the configured load factor.
    pub fn load_factor(&self) -> f32 {
        self.load_factor
    }

    /// Removes all entries.
    ///
    /// The bucket count and threshold are left unchanged; the table never
    /// shrinks.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use chained_hash::HashTable;
    /// #
    /// let mut table = HashTable::new();
    /// for i in 0..100u32 {
    ///     table.insert(i, i);
    /// }
    /// let capacity = table.capacity();
    ///
    /// table.clear();
    /// assert!(table.is_empty());
    /// assert_eq!(table.get(&5), None);
    /// assert_eq!(table.capacity(), capacity);
    /// ```
    pub fn clear(&mut self) {
        for slot in self.table.iter_mut() {
            drop_chain(slot.take());
        }
        self.size = 0;
    }

    /// Returns an iterator over `(key, value)` pairs.
    ///
    /// Buckets are visited in index order and each chain from head to tail,
    /// so within a bucket the most recently inserted entry comes first.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use chained_hash::HashTable;
    /// #
    /// let mut table = HashTable::new();
    /// table.insert(1u32, "a");
    /// table.insert(None, "b");
    ///
    /// let mut pairs: Vec<_> = table.iter().collect();
    /// pairs.sort();
    /// assert_eq!(pairs, [(None, &"b"), (Some(&1), &"a")]);
    /// ```
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            buckets: self.table.iter(),
            chain: None,
            remaining: self.size,
        }
    }

    /// Returns an iterator over `(key, value)` pairs with mutable values.
    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        IterMut {
            remaining: self.size,
            buckets: self.table.iter_mut(),
            chain: None,
        }
    }

    /// Returns an iterator over the keys. The absent key is yielded as
    /// `None`.
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys { inner: self.iter() }
    }

    /// Returns an iterator over the values.
    pub fn values(&self) -> Values<'_, K, V> {
        Values { inner: self.iter() }
    }

    /// Returns an iterator that removes and yields every entry.
    ///
    /// The table is empty once the iterator is dropped, even if it was not
    /// fully consumed. Capacity is retained.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use chained_hash::HashTable;
    /// #
    /// let mut table = HashTable::new();
    /// table.insert(1u32, "a");
    /// table.insert(2u32, "b");
    ///
    /// let drained: Vec<_> = table.drain().collect();
    /// assert_eq!(drained.len(), 2);
    /// assert!(table.is_empty());
    /// ```
    pub fn drain(&mut self) -> Drain<'_, K, V> {
        Drain {
            table: self,
            bucket_index: 0,
            chain: None,
        }
    }

    /// Computes a histogram of chain lengths.
    ///
    /// Index `i` counts the buckets whose chain holds exactly `i` entries,
    /// for `i < CHAIN_HISTOGRAM_BINS`. The final bin counts every bucket
    /// with a chain of `CHAIN_HISTOGRAM_BINS` entries or more.
    #[cfg(any(test, feature = "stats"))]
    pub fn chain_histogram(&self) -> Vec<usize> {
        let mut hist = alloc::vec![0usize; CHAIN_HISTOGRAM_BINS + 1];
        for slot in &self.table {
            let length = chain_len(slot);
            hist[length.min(CHAIN_HISTOGRAM_BINS)] += 1;
        }
        hist
    }

    /// Returns chain statistics for the current table state.
    #[cfg(any(test, feature = "stats"))]
    pub fn debug_stats(&self) -> DebugStats {
        let mut occupied_buckets = 0;
        let mut longest_chain = 0;
        for slot in &self.table {
            let length = chain_len(slot);
            if length > 0 {
                occupied_buckets += 1;
            }
            longest_chain = longest_chain.max(length);
        }

        DebugStats {
            len: self.size,
            capacity: self.table.len(),
            threshold: self.threshold,
            load_factor: self.size as f64 / self.table.len() as f64,
            occupied_buckets,
            longest_chain,
            average_chain: if occupied_buckets == 0 {
                0.0
            } else {
                self.size as f64 / occupied_buckets as f64
            },
        }
    }

    /// Pretty-prints the chain-length histogram as a horizontal bar chart.
    #[cfg(all(any(test, feature = "stats"), feature = "std"))]
    pub fn print_chain_histogram(&self) {
        let hist = self.chain_histogram();
        let max = hist.iter().copied().max().unwrap_or(0);
        if max == 0 {
            println!("chain histogram: empty");
            return;
        }

        let max_bar = 60usize;
        println!(
            "chain histogram ({} entries, {} buckets):",
            self.size,
            self.table.len()
        );
        for (length, &count) in hist.iter().enumerate() {
            let width = (count * max_bar).div_ceil(max);
            let label = if length == CHAIN_HISTOGRAM_BINS {
                alloc::format!("{length}+")
            } else {
                alloc::format!("{length:>2}")
            };
            println!("{label} | {} ({count})", "█".repeat(width));
        }
    }
}

#[cfg(any(test, feature = "stats"))]
fn chain_len<K, V>(mut link: &Link<K, V>) -> usize {
    let mut length = 0;
    while let Some(node) = link {
        length += 1;
        link = &node.next;
    }
    length
}

impl<K: Hashable, V> HashTable<K, V> {
    #[inline(always)]
    fn hash_of(key: Option<&K>) -> u32 {
        // The absent key skips `hash_code` and always lands in bucket 0.
        key.map_or(0, |key| spread(key.hash_code()))
    }

    fn find_node(&self, key: Option<&K>) -> Option<&Node<K, V>> {
        let hash = Self::hash_of(key);
        let mut link = self.table[index_for(hash, self.table.len())].as_deref();
        while let Some(node) = link {
            if node.matches(hash, key) {
                return Some(node);
            }
            link = node.next.as_deref();
        }
        None
    }

    fn find_node_mut(&mut self, hash: u32, key: Option<&K>) -> Option<&mut Node<K, V>> {
        let index = index_for(hash, self.table.len());
        let mut link = self.table[index].as_deref_mut();
        while let Some(node) = link {
            if node.matches(hash, key) {
                return Some(node);
            }
            link = node.next.as_deref_mut();
        }
        None
    }

    /// Returns a reference to the value mapped to `key`.
    ///
    /// Pass `None` to look up the absent key.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use chained_hash::HashTable;
    /// #
    /// let mut table = HashTable::new();
    /// table.insert(1u32, "a");
    /// assert_eq!(table.get(&1), Some(&"a"));
    /// assert_eq!(table.get(&2), None);
    /// assert_eq!(table.get(None), None);
    /// ```
    pub fn get<'k>(&self, key: impl Into<Option<&'k K>>) -> Option<&V>
    where
        K: 'k,
    {
        self.find_node(key.into()).map(|node| &node.value)
    }

    /// Returns the stored key and its value.
    ///
    /// The stored key is the one from the insertion that created the entry;
    /// later insertions of an equal key only replace the value.
    pub fn get_key_value<'k>(&self, key: impl Into<Option<&'k K>>) -> Option<(Option<&K>, &V)>
    where
        K: 'k,
    {
        self.find_node(key.into())
            .map(|node| (node.key.as_ref(), &node.value))
    }

    /// Returns a mutable reference to the value mapped to `key`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use chained_hash::HashTable;
    /// #
    /// let mut table = HashTable::new();
    /// table.insert(1u32, 10);
    /// if let Some(v) = table.get_mut(&1) {
    ///     *v += 1;
    /// }
    /// assert_eq!(table.get(&1), Some(&11));
    /// ```
    pub fn get_mut<'k>(&mut self, key: impl Into<Option<&'k K>>) -> Option<&mut V>
    where
        K: 'k,
    {
        let key = key.into();
        let hash = Self::hash_of(key);
        self.find_node_mut(hash, key).map(|node| &mut node.value)
    }

    /// Returns `true` if the table maps `key` to a value.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use chained_hash::HashTable;
    /// #
    /// let mut table = HashTable::new();
    /// table.insert(None, ());
    /// assert!(table.contains_key(None));
    /// assert!(!table.contains_key(&7u32));
    /// ```
    pub fn contains_key<'k>(&self, key: impl Into<Option<&'k K>>) -> bool
    where
        K: 'k,
    {
        self.find_node(key.into()).is_some()
    }

    /// Maps `key` to `value`.
    ///
    /// If an equal key is already present its value is replaced in place and
    /// the previous value is returned; the stored key is kept. Otherwise a
    /// new entry is pushed onto the head of its bucket chain, and the table
    /// doubles once the entry count reaches the threshold.
    ///
    /// Pass `None` as the key to map the absent key.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use chained_hash::HashTable;
    /// #
    /// let mut table = HashTable::new();
    /// assert_eq!(table.insert(37u32, "a"), None);
    /// assert_eq!(table.insert(37u32, "b"), Some("a"));
    /// assert_eq!(table.get(&37), Some(&"b"));
    /// ```
    pub fn insert(&mut self, key: impl Into<Option<K>>, value: V) -> Option<V> {
        let key = key.into();
        let hash = Self::hash_of(key.as_ref());
        if let Some(node) = self.find_node_mut(hash, key.as_ref()) {
            return Some(core::mem::replace(&mut node.value, value));
        }

        let index = index_for(hash, self.table.len());
        self.add_node(hash, key, value, index);
        None
    }

    /// Removes `key`, returning its value if it was present.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use chained_hash::HashTable;
    /// #
    /// let mut table = HashTable::new();
    /// table.insert(1u32, "a");
    /// assert_eq!(table.remove(&1), Some("a"));
    /// assert_eq!(table.remove(&1), None);
    /// ```
    pub fn remove<'k>(&mut self, key: impl Into<Option<&'k K>>) -> Option<V>
    where
        K: 'k,
    {
        self.remove_entry(key).map(|(_, value)| value)
    }

    /// Removes `key`, returning the stored key and its value if present.
    pub fn remove_entry<'k>(&mut self, key: impl Into<Option<&'k K>>) -> Option<(Option<K>, V)>
    where
        K: 'k,
    {
        let key = key.into();
        let hash = Self::hash_of(key);
        let index = index_for(hash, self.table.len());

        let mut link = &mut self.table[index];
        while link.as_ref().is_some_and(|node| !node.matches(hash, key)) {
            link = &mut link.as_mut()?.next;
        }

        let mut node = link.take()?;
        *link = node.next.take();
        self.size -= 1;

        let Node { key, value, .. } = *node;
        Some((key, value))
    }

    /// Links a new node at the head of bucket `index`, growing if the
    /// threshold is reached.
    fn add_node(&mut self, hash: u32, key: Option<K>, value: V, index: usize) {
        let next = self.table[index].take();
        self.table[index] = Some(Box::new(Node {
            hash,
            key,
            value,
            next,
        }));

        self.size += 1;
        if self.size >= self.threshold {
            self.resize(2 * self.table.len());
        }
    }
}

impl<K, V> HashTable<K, V> {
    /// Rehashes into `new_capacity` buckets.
    ///
    /// At the capacity ceiling nothing is reallocated; the threshold is
    /// pinned to `usize::MAX` instead so that growth is never attempted
    /// again.
    fn resize(&mut self, new_capacity: usize) {
        if self.table.len() >= self.max_capacity {
            self.threshold = usize::MAX;
            return;
        }

        debug_assert!(new_capacity.is_power_of_two() && new_capacity <= self.max_capacity);
        let mut new_table = empty_buckets(new_capacity);
        self.transfer(&mut new_table);
        self.table = new_table;
        self.threshold = threshold_for(new_capacity, self.load_factor);
    }

    /// Moves every node from the current buckets into `new_table`.
    ///
    /// Nodes are relinked, not reallocated: each chain is taken out of its
    /// old slot and its nodes are pushed onto the heads of their new
    /// buckets using the cached hash.
    fn transfer(&mut self, new_table: &mut [Link<K, V>]) {
        let new_capacity = new_table.len();
        for slot in self.table.iter_mut() {
            let mut link = slot.take();
            while let Some(mut node) = link {
                link = node.next.take();
                let index = index_for(node.hash, new_capacity);
                node.next = new_table[index].take();
                new_table[index] = Some(node);
            }
        }
    }
}

impl<K, V> Drop for HashTable<K, V> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<K, V> Default for HashTable<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Clone, V: Clone> Clone for HashTable<K, V> {
    fn clone(&self) -> Self {
        Self {
            table: self.table.iter().map(clone_chain).collect(),
            size: self.size,
            threshold: self.threshold,
            load_factor: self.load_factor,
            max_capacity: self.max_capacity,
        }
    }
}

impl<K: Debug, V: Debug> Debug for HashTable<K, V> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K: Hashable, V> Extend<(K, V)> for HashTable<K, V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K: Hashable, V> FromIterator<(K, V)> for HashTable<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut table = Self::new();
        table.extend(iter);
        table
    }
}

impl<'a, K, V> IntoIterator for &'a HashTable<K, V> {
    type Item = (Option<&'a K>, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, V> IntoIterator for HashTable<K, V> {
    type Item = (Option<K>, V);
    type IntoIter = IntoIter<K, V>;

    fn into_iter(mut self) -> Self::IntoIter {
        IntoIter {
            remaining: self.size,
            buckets: core::mem::take(&mut self.table).into_iter(),
            chain: None,
        }
    }
}

/// An iterator over the entries of a [`HashTable`].
///
/// This struct is created by [`HashTable::iter`].
pub struct Iter<'a, K, V> {
    buckets: core::slice::Iter<'a, Link<K, V>>,
    chain: Option<&'a Node<K, V>>,
    remaining: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (Option<&'a K>, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(node) = self.chain {
                self.chain = node.next.as_deref();
                self.remaining -= 1;
                return Some((node.key.as_ref(), &node.value));
            }
            self.chain = self.buckets.next()?.as_deref();
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}
impl<K, V> FusedIterator for Iter<'_, K, V> {}

/// A mutable iterator over the entries of a [`HashTable`].
///
/// This struct is created by [`HashTable::iter_mut`].
pub struct IterMut<'a, K, V> {
    buckets: core::slice::IterMut<'a, Link<K, V>>,
    chain: Option<&'a mut Node<K, V>>,
    remaining: usize,
}

impl<'a, K, V> Iterator for IterMut<'a, K, V> {
    type Item = (Option<&'a K>, &'a mut V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(node) = self.chain.take() {
                let Node {
                    key, value, next, ..
                } = node;
                let key: &'a Option<K> = key;
                self.chain = next.as_deref_mut();
                self.remaining -= 1;
                return Some((key.as_ref(), value));
            }
            self.chain = self.buckets.next()?.as_deref_mut();
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for IterMut<'_, K, V> {}
impl<K, V> FusedIterator for IterMut<'_, K, V> {}

/// An iterator over the keys of a [`HashTable`].
pub struct Keys<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = Option<&'a K>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, _)| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

/// An iterator over the values of a [`HashTable`].
pub struct Values<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

/// A draining iterator over the entries of a [`HashTable`].
///
/// This struct is created by [`HashTable::drain`].
pub struct Drain<'a, K, V> {
    table: &'a mut HashTable<K, V>,
    bucket_index: usize,
    chain: Link<K, V>,
}

impl<K, V> Iterator for Drain<'_, K, V> {
    type Item = (Option<K>, V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(mut node) = self.chain.take() {
                self.chain = node.next.take();
                self.table.size -= 1;
                let Node { key, value, .. } = *node;
                return Some((key, value));
            }
            self.chain = self.table.table.get_mut(self.bucket_index)?.take();
            self.bucket_index += 1;
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.table.size, Some(self.table.size))
    }
}

impl<K, V> Drop for Drain<'_, K, V> {
    fn drop(&mut self) {
        for _ in &mut *self {}
    }
}

/// An owning iterator over the entries of a [`HashTable`].
pub struct IntoIter<K, V> {
    buckets: alloc::vec::IntoIter<Link<K, V>>,
    chain: Link<K, V>,
    remaining: usize,
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (Option<K>, V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(mut node) = self.chain.take() {
                self.chain = node.next.take();
                self.remaining -= 1;
                let Node { key, value, .. } = *node;
                return Some((key, value));
            }
            self.chain = self.buckets.next()?;
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> Drop for IntoIter<K, V> {
    fn drop(&mut self) {
        for _ in &mut *self {}
    }
}
