// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The collision-box dict variant.
//!
//! [`FrozenDict`] stores each entry as a key paired with an
//! [`OpaqueBox`][crate::OpaqueBox]: a wrapper that hashes to one fixed
//! constant and compares equal to every other box. The box buys
//! guaranteed hashability for arbitrary values; it contributes nothing
//! to deduplication, which is carried entirely by the separately
//! retained key set. Everything else (the keys-only hash, genuine
//! key-and-value equality, the read-only surface) matches
//! [`HashDict`][crate::HashDict]; see that type for the full story.
//!
//! [`FrozenDict`]: ./type.FrozenDict.html
//! [crate::OpaqueBox]: ../boxed/struct.OpaqueBox.html
//! [crate::HashDict]: ../hashdict/type.HashDict.html

use std::borrow::Borrow;
use std::collections;
use std::collections::hash_map::RandomState;
use std::collections::hash_set;
use std::collections::HashSet;
use std::fmt::{Debug, Error, Formatter};
use std::hash::{BuildHasher, Hash, Hasher};
use std::iter::{FromIterator, FusedIterator};
use std::ops::Index;

use archery::{SharedPointer, SharedPointerKind};

use crate::boxed::OpaqueBox;
use crate::config::KEY_SET_SEED;
use crate::shared_ptr::DefaultSharedPtr;
use crate::util::{clone_ref, fixed_hash};

/// Construct a frozen dict from a sequence of key/value pairs.
///
/// # Examples
///
/// ```
/// # #[macro_use] extern crate hashdict;
/// # use hashdict::FrozenDict;
/// # fn main() {
/// assert_eq!(
///   frozendict!{
///     1 => 11,
///     2 => 22
///   },
///   FrozenDict::from(vec![(1, 11), (2, 22)])
/// );
/// # }
/// ```
#[macro_export]
macro_rules! frozendict {
    () => { $crate::frozendict::FrozenDict::new() };

    ( $( $key:expr => $value:expr ),* ) => {{
        let mut pairs = ::std::vec::Vec::new();
        $({
            pairs.push(($key, $value));
        })*;
        $crate::frozendict::FrozenDict::from(pairs)
    }};

    ( $( $key:expr => $value:expr ,)* ) => {{
        let mut pairs = ::std::vec::Vec::new();
        $({
            pairs.push(($key, $value));
        })*;
        $crate::frozendict::FrozenDict::from(pairs)
    }};
}

/// Type alias for [`GenericFrozenDict`] that uses [`std::hash::RandomState`] as the default hasher and [`DefaultSharedPtr`] as the pointer type.
///
/// [GenericFrozenDict]: ./struct.GenericFrozenDict.html
/// [`std::hash::RandomState`]: https://doc.rust-lang.org/stable/std/collections/hash_map/struct.RandomState.html
/// [DefaultSharedPtr]: ../shared_ptr/type.DefaultSharedPtr.html
pub type FrozenDict<K, V> = GenericFrozenDict<K, V, RandomState, DefaultSharedPtr>;

/// An immutable, hashable dictionary storing its values in collision
/// boxes.
///
/// Behaves like [`HashDict`][crate::HashDict] from the outside: frozen
/// at construction, hashed by its key set, compared by keys and
/// values. The difference is internal policy: values sit in
/// [`OpaqueBox`][crate::OpaqueBox]es, which all collide and all
/// compare equal, so per-key uniqueness rests on the retained key set
/// rather than on box identity.
///
/// [crate::HashDict]: ../hashdict/type.HashDict.html
/// [crate::OpaqueBox]: ../boxed/struct.OpaqueBox.html
pub struct GenericFrozenDict<K, V, S, P: SharedPointerKind> {
    contents: SharedPointer<HashSet<BoxedPair<K, V>, S>, P>,
    keys: SharedPointer<HashSet<K, S>, P>,
}

/// One stored entry: the key, plus the value sealed in its box.
struct BoxedPair<K, V> {
    key: K,
    value: OpaqueBox<V>,
}

impl<K, V> BoxedPair<K, V> {
    fn new(key: K, value: V) -> Self {
        BoxedPair {
            key,
            value: OpaqueBox::new(value),
        }
    }

    fn into_pair(self) -> (K, V) {
        (self.key, self.value.into_value())
    }
}

impl<K, V> Clone for BoxedPair<K, V>
where
    K: Clone,
    V: Clone,
{
    fn clone(&self) -> Self {
        BoxedPair {
            key: self.key.clone(),
            value: self.value.clone(),
        }
    }
}

impl<K, V> PartialEq for BoxedPair<K, V>
where
    K: Eq,
{
    fn eq(&self, other: &Self) -> bool {
        // The box half is always equal; the key decides.
        self.key == other.key && self.value == other.value
    }
}

impl<K, V> Eq for BoxedPair<K, V> where K: Eq {}

impl<K, V> Hash for BoxedPair<K, V>
where
    K: Hash,
{
    fn hash<H>(&self, state: &mut H)
    where
        H: Hasher,
    {
        self.key.hash(state);
        self.value.hash(state);
    }
}

impl<K, V, P> GenericFrozenDict<K, V, RandomState, P>
where
    K: Hash + Eq + Clone,
    P: SharedPointerKind,
{
    /// Construct a frozen dict with a single mapping.
    #[inline]
    #[must_use]
    pub fn unit(k: K, v: V) -> GenericFrozenDict<K, V, RandomState, P> {
        Self::from_entries(std::iter::once((k, v)), RandomState::default())
    }
}

impl<K, V, S, P: SharedPointerKind> GenericFrozenDict<K, V, S, P> {
    /// Construct an empty frozen dict.
    #[inline]
    #[must_use]
    pub fn new() -> Self
    where
        S: Default,
    {
        Self::default()
    }

    /// Test whether a frozen dict is empty.
    ///
    /// Time: O(1)
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Get the size of a frozen dict.
    ///
    /// Time: O(1)
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Test whether two dicts refer to the same content in memory.
    ///
    /// Time: O(1)
    pub fn ptr_eq(&self, other: &Self) -> bool {
        SharedPointer::ptr_eq(&self.contents, &other.contents)
    }

    /// Get an iterator over the key/value pairs of a frozen dict.
    #[inline]
    #[must_use]
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            it: self.contents.iter(),
        }
    }

    /// Get an iterator over a frozen dict's keys.
    #[inline]
    #[must_use]
    pub fn keys(&self) -> Keys<'_, K> {
        Keys {
            it: self.keys.iter(),
        }
    }

    /// Get an iterator over a frozen dict's values.
    #[inline]
    #[must_use]
    pub fn values(&self) -> Values<'_, K, V> {
        Values {
            it: self.contents.iter(),
        }
    }
}

impl<K, V, S, P> GenericFrozenDict<K, V, S, P>
where
    K: Hash + Eq,
    S: BuildHasher,
    P: SharedPointerKind,
{
    fn test_eq<S2, P2>(&self, other: &GenericFrozenDict<K, V, S2, P2>) -> bool
    where
        V: PartialEq,
        S2: BuildHasher,
        P2: SharedPointerKind,
    {
        // Compare the two operands entry by entry. Box equality would
        // pass anything, so values are unwrapped and compared for
        // real.
        if self.len() != other.len() {
            return false;
        }
        self.iter().all(|(k, v)| other.get(k) == Some(v))
    }

    /// Get the value for a key from a frozen dict.
    ///
    /// Time: O(n)
    #[must_use]
    pub fn get<BK>(&self, key: &BK) -> Option<&V>
    where
        BK: Hash + Eq + ?Sized,
        K: Borrow<BK>,
    {
        self.contents
            .iter()
            .find(|entry| key == entry.key.borrow())
            .map(|entry| entry.value.value())
    }

    /// Get the key/value pair for a key from a frozen dict.
    ///
    /// Time: O(n)
    #[must_use]
    pub fn get_key_value<BK>(&self, key: &BK) -> Option<(&K, &V)>
    where
        BK: Hash + Eq + ?Sized,
        K: Borrow<BK>,
    {
        self.contents
            .iter()
            .find(|entry| key == entry.key.borrow())
            .map(|entry| (&entry.key, entry.value.value()))
    }

    /// Get the value for a key, or [`Error::KeyNotFound`][Error] when
    /// the dict does not contain it.
    ///
    /// Time: O(n)
    ///
    /// [Error]: ../enum.Error.html
    pub fn try_get<BK>(&self, key: &BK) -> Result<&V, crate::Error>
    where
        BK: Hash + Eq + ?Sized,
        K: Borrow<BK>,
    {
        self.get(key).ok_or(crate::Error::KeyNotFound)
    }

    /// Test for the presence of a key in a frozen dict.
    ///
    /// Time: O(1)
    #[inline]
    #[must_use]
    pub fn contains_key<BK>(&self, k: &BK) -> bool
    where
        BK: Hash + Eq + ?Sized,
        K: Borrow<BK>,
    {
        self.keys.contains(k)
    }
}

impl<K, V, S, P> GenericFrozenDict<K, V, S, P>
where
    K: Hash + Eq + Clone,
    S: BuildHasher + Clone,
    P: SharedPointerKind,
{
    fn from_entries<I>(iter: I, hasher: S) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
    {
        let mut contents = HashSet::with_hasher(hasher.clone());
        let mut keys = HashSet::with_hasher(hasher);
        for (key, value) in iter {
            keys.replace(key.clone());
            contents.replace(BoxedPair::new(key, value));
        }
        GenericFrozenDict {
            contents: SharedPointer::new(contents),
            keys: SharedPointer::new(keys),
        }
    }

    /// Construct a frozen dict from a sequence of key/value pairs,
    /// hashing with the provided hasher.
    #[must_use]
    pub fn from_iter_with_hasher<I>(iter: I, hasher: S) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
    {
        Self::from_entries(iter, hasher)
    }

    /// Construct a frozen dict assigning the same value to every key
    /// in the given sequence.
    #[must_use]
    pub fn from_keys<I>(keys: I, value: V) -> Self
    where
        I: IntoIterator<Item = K>,
        V: Clone,
        S: Default,
    {
        Self::from_entries(
            keys.into_iter().map(|key| (key, value.clone())),
            S::default(),
        )
    }

    /// Materialise an ordinary, mutable, unhashable map with the same
    /// entries.
    ///
    /// Time: O(n)
    #[must_use]
    pub fn to_hash_map(&self) -> collections::HashMap<K, V>
    where
        V: Clone,
    {
        self.iter().map(|(k, v)| (k.clone(), v.clone())).collect()
    }
}

impl<K, V, S, P> Clone for GenericFrozenDict<K, V, S, P>
where
    P: SharedPointerKind,
{
    /// Clone a frozen dict.
    ///
    /// Time: O(1)
    #[inline]
    fn clone(&self) -> Self {
        GenericFrozenDict {
            contents: self.contents.clone(),
            keys: self.keys.clone(),
        }
    }
}

impl<K, V, S1, S2, P1, P2> PartialEq<GenericFrozenDict<K, V, S2, P2>>
    for GenericFrozenDict<K, V, S1, P1>
where
    K: Hash + Eq,
    V: PartialEq,
    S1: BuildHasher,
    S2: BuildHasher,
    P1: SharedPointerKind,
    P2: SharedPointerKind,
{
    fn eq(&self, other: &GenericFrozenDict<K, V, S2, P2>) -> bool {
        self.test_eq(other)
    }
}

impl<K, V, S1, S2, P> PartialEq<collections::HashMap<K, V, S2>> for GenericFrozenDict<K, V, S1, P>
where
    K: Hash + Eq,
    V: PartialEq,
    S1: BuildHasher,
    S2: BuildHasher,
    P: SharedPointerKind,
{
    fn eq(&self, other: &collections::HashMap<K, V, S2>) -> bool {
        self.len() == other.len() && self.iter().all(|(k, v)| other.get(k) == Some(v))
    }
}

impl<K, V, S, P> Eq for GenericFrozenDict<K, V, S, P>
where
    K: Hash + Eq,
    V: Eq,
    S: BuildHasher,
    P: SharedPointerKind,
{
}

impl<K, V, S, P> Hash for GenericFrozenDict<K, V, S, P>
where
    K: Hash,
    P: SharedPointerKind,
{
    /// Hashes using the frozen set of dict keys, exactly as
    /// [`HashDict`][crate::HashDict] does.
    ///
    /// [crate::HashDict]: ../hashdict/type.HashDict.html
    fn hash<H>(&self, state: &mut H)
    where
        H: Hasher,
    {
        let mut acc: u64 = 0;
        for key in self.keys.iter() {
            acc = acc.wrapping_add(fixed_hash(key).wrapping_mul(KEY_SET_SEED));
        }
        state.write_usize(self.keys.len());
        state.write_u64(acc);
    }
}

impl<K, V, S, P> Default for GenericFrozenDict<K, V, S, P>
where
    S: Default,
    P: SharedPointerKind,
{
    #[inline]
    fn default() -> Self {
        GenericFrozenDict {
            contents: SharedPointer::new(HashSet::with_hasher(S::default())),
            keys: SharedPointer::new(HashSet::with_hasher(S::default())),
        }
    }
}

impl<BK, K, V, S, P> Index<&BK> for GenericFrozenDict<K, V, S, P>
where
    BK: Hash + Eq + ?Sized,
    K: Hash + Eq + Borrow<BK>,
    S: BuildHasher,
    P: SharedPointerKind,
{
    type Output = V;

    fn index(&self, key: &BK) -> &Self::Output {
        match self.get(key) {
            None => panic!("FrozenDict::index: invalid key"),
            Some(value) => value,
        }
    }
}

impl<K, V, S, P> Debug for GenericFrozenDict<K, V, S, P>
where
    K: Debug,
    V: Debug,
    P: SharedPointerKind,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        f.write_str("FrozenDict(")?;
        let mut d = f.debug_map();
        for (k, v) in self {
            d.entry(k, v);
        }
        d.finish()?;
        f.write_str(")")
    }
}

// // Iterators

/// An iterator over the entries of a frozen dict.
pub struct Iter<'a, K, V> {
    it: hash_set::Iter<'a, BoxedPair<K, V>>,
}

impl<'a, K, V> Clone for Iter<'a, K, V> {
    fn clone(&self) -> Self {
        Iter {
            it: self.it.clone(),
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.it.next().map(|entry| (&entry.key, entry.value.value()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.it.size_hint()
    }
}

impl<'a, K, V> ExactSizeIterator for Iter<'a, K, V> {}

impl<'a, K, V> FusedIterator for Iter<'a, K, V> {}

/// An iterator over the keys of a frozen dict.
pub struct Keys<'a, K> {
    it: hash_set::Iter<'a, K>,
}

impl<'a, K> Iterator for Keys<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.it.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.it.size_hint()
    }
}

impl<'a, K> ExactSizeIterator for Keys<'a, K> {}

impl<'a, K> FusedIterator for Keys<'a, K> {}

/// An iterator over the values of a frozen dict.
pub struct Values<'a, K, V> {
    it: hash_set::Iter<'a, BoxedPair<K, V>>,
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.it.next().map(|entry| entry.value.value())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.it.size_hint()
    }
}

impl<'a, K, V> ExactSizeIterator for Values<'a, K, V> {}

impl<'a, K, V> FusedIterator for Values<'a, K, V> {}

/// A consuming iterator over the entries of a frozen dict.
pub struct ConsumingIter<K, V> {
    it: hash_set::IntoIter<BoxedPair<K, V>>,
}

impl<K, V> Iterator for ConsumingIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        self.it.next().map(BoxedPair::into_pair)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.it.size_hint()
    }
}

impl<K, V> ExactSizeIterator for ConsumingIter<K, V> {}

impl<K, V> FusedIterator for ConsumingIter<K, V> {}

impl<'a, K, V, S, P: SharedPointerKind> IntoIterator for &'a GenericFrozenDict<K, V, S, P> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, V, S, P> IntoIterator for GenericFrozenDict<K, V, S, P>
where
    K: Hash + Eq + Clone,
    V: Clone,
    S: BuildHasher + Clone,
    P: SharedPointerKind,
{
    type Item = (K, V);
    type IntoIter = ConsumingIter<K, V>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        ConsumingIter {
            it: clone_ref(self.contents).into_iter(),
        }
    }
}

// Conversions

impl<K, V, S, P> FromIterator<(K, V)> for GenericFrozenDict<K, V, S, P>
where
    K: Hash + Eq + Clone,
    S: BuildHasher + Default + Clone,
    P: SharedPointerKind,
{
    fn from_iter<T>(i: T) -> Self
    where
        T: IntoIterator<Item = (K, V)>,
    {
        Self::from_entries(i, S::default())
    }
}

impl<K, V, S, P: SharedPointerKind> AsRef<GenericFrozenDict<K, V, S, P>>
    for GenericFrozenDict<K, V, S, P>
{
    #[inline]
    fn as_ref(&self) -> &Self {
        self
    }
}

impl<'a, K, V, S, P> From<&'a [(K, V)]> for GenericFrozenDict<K, V, S, P>
where
    K: Hash + Eq + Clone,
    V: Clone,
    S: BuildHasher + Default + Clone,
    P: SharedPointerKind,
{
    fn from(m: &'a [(K, V)]) -> Self {
        m.iter().cloned().collect()
    }
}

impl<K, V, S, P> From<Vec<(K, V)>> for GenericFrozenDict<K, V, S, P>
where
    K: Hash + Eq + Clone,
    S: BuildHasher + Default + Clone,
    P: SharedPointerKind,
{
    fn from(m: Vec<(K, V)>) -> Self {
        m.into_iter().collect()
    }
}

impl<'a, K, V, S, P> From<&'a Vec<(K, V)>> for GenericFrozenDict<K, V, S, P>
where
    K: Hash + Eq + Clone,
    V: Clone,
    S: BuildHasher + Default + Clone,
    P: SharedPointerKind,
{
    fn from(m: &'a Vec<(K, V)>) -> Self {
        m.iter().cloned().collect()
    }
}

impl<K, V, S1, S2, P> From<collections::HashMap<K, V, S2>> for GenericFrozenDict<K, V, S1, P>
where
    K: Hash + Eq + Clone,
    S1: BuildHasher + Default + Clone,
    S2: BuildHasher,
    P: SharedPointerKind,
{
    fn from(m: collections::HashMap<K, V, S2>) -> Self {
        m.into_iter().collect()
    }
}

impl<'a, K, V, S1, S2, P> From<&'a collections::HashMap<K, V, S2>>
    for GenericFrozenDict<K, V, S1, P>
where
    K: Hash + Eq + Clone,
    V: Clone,
    S1: BuildHasher + Default + Clone,
    S2: BuildHasher,
    P: SharedPointerKind,
{
    fn from(m: &'a collections::HashMap<K, V, S2>) -> Self {
        m.iter().map(|(k, v)| (k.clone(), v.clone())).collect()
    }
}

impl<K, V, S, P> From<collections::BTreeMap<K, V>> for GenericFrozenDict<K, V, S, P>
where
    K: Hash + Eq + Clone,
    S: BuildHasher + Default + Clone,
    P: SharedPointerKind,
{
    fn from(m: collections::BTreeMap<K, V>) -> Self {
        m.into_iter().collect()
    }
}

impl<'a, K, V, S, P> From<&'a collections::BTreeMap<K, V>> for GenericFrozenDict<K, V, S, P>
where
    K: Hash + Eq + Clone,
    V: Clone,
    S: BuildHasher + Default + Clone,
    P: SharedPointerKind,
{
    fn from(m: &'a collections::BTreeMap<K, V>) -> Self {
        m.iter().map(|(k, v)| (k.clone(), v.clone())).collect()
    }
}

// Tests
