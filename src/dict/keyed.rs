// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! An immutable dictionary that can be hashed.
//!
//! A dictionary frozen at construction time, which implements
//! [`Hash`][std::hash::Hash] even when its values do not. Its hash is
//! derived from the key set alone, so two dicts with the same keys
//! hash identically regardless of their values: a deliberate trade of
//! discrimination power for a hash that can never disagree with
//! equality.
//!
//! Keys must implement [`Hash`][std::hash::Hash] and
//! [`Eq`][std::cmp::Eq]; values carry no constraint at all. Entries
//! are stored boxed in [`KeyBox`][crate::KeyBox] wrappers inside an
//! order-independent structural set, alongside a separately retained
//! key set used for O(1) membership and for hashing.
//!
//! There are no update operations. Once built, a dict only ever hands
//! out references to what it holds.
//!
//! [std::cmp::Eq]: https://doc.rust-lang.org/std/cmp/trait.Eq.html
//! [std::hash::Hash]: https://doc.rust-lang.org/std/hash/trait.Hash.html
//! [crate::KeyBox]: ../boxed/struct.KeyBox.html

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

use crate::boxed::KeyBox;
use crate::config::KEY_SET_SEED;
use crate::shared_ptr::DefaultSharedPtr;
use crate::util::{clone_ref, fixed_hash};

/// Construct a hashable dict from a sequence of key/value pairs.
///
/// # Examples
///
/// ```
/// # #[macro_use] extern crate hashdict;
/// # use hashdict::HashDict;
/// # fn main() {
/// assert_eq!(
///   hashdict!{
///     1 => 11,
///     2 => 22,
///     3 => 33
///   },
///   HashDict::from(vec![(1, 11), (2, 22), (3, 33)])
/// );
/// # }
/// ```
#[macro_export]
macro_rules! hashdict {
    () => { $crate::hashdict::HashDict::new() };

    ( $( $key:expr => $value:expr ),* ) => {{
        let mut pairs = ::std::vec::Vec::new();
        $({
            pairs.push(($key, $value));
        })*;
        $crate::hashdict::HashDict::from(pairs)
    }};

    ( $( $key:expr => $value:expr ,)* ) => {{
        let mut pairs = ::std::vec::Vec::new();
        $({
            pairs.push(($key, $value));
        })*;
        $crate::hashdict::HashDict::from(pairs)
    }};
}

/// Type alias for [`GenericHashDict`] that uses [`std::hash::RandomState`] as the default hasher and [`DefaultSharedPtr`] as the pointer type.
///
/// [GenericHashDict]: ./struct.GenericHashDict.html
/// [`std::hash::RandomState`]: https://doc.rust-lang.org/stable/std/collections/hash_map/struct.RandomState.html
/// [DefaultSharedPtr]: ../shared_ptr/type.DefaultSharedPtr.html
pub type HashDict<K, V> = GenericHashDict<K, V, RandomState, DefaultSharedPtr>;

/// An immutable dictionary that is hashable, even if its values are
/// not.
///
/// The dict is built once, in full, from a sequence of key/value
/// pairs; later pairs with a duplicate key overwrite earlier ones.
/// After construction nothing can change it, which is what makes it
/// safe to hash: the hash is computed over the frozen key set and is
/// stable for the dict's whole lifetime. Use it as a key in another
/// map, as a set member, or anywhere else a
/// [`Hash`][std::hash::Hash] + [`Eq`][std::cmp::Eq] value is needed.
///
/// Equality is finer-grained than the hash: two dicts are equal only
/// when their keys *and* values match, while the hash covers keys
/// alone. Equal dicts therefore always hash equally, which is the only
/// direction the hash/equality contract requires.
///
/// One caveat: the dict holds the values it was given without
/// deep-freezing them. Interior mutability inside a value (a
/// [`RefCell`][std::cell::RefCell], say) can still change it after
/// insertion, and a value mutated that way can leave equality
/// inconsistent with what was hashed. Don't do that.
///
/// # Examples
///
/// ```
/// # #[macro_use] extern crate hashdict;
/// # use std::collections::HashSet;
/// // Values may be unhashable; a set of dicts still works, because
/// // only the keys are hashed.
/// let dict = hashdict!{"a" => vec![1, 2], "b" => vec![3]};
/// let mut seen = HashSet::new();
/// seen.insert(dict.clone());
/// assert!(seen.contains(&dict));
/// ```
///
/// [std::cmp::Eq]: https://doc.rust-lang.org/std/cmp/trait.Eq.html
/// [std::hash::Hash]: https://doc.rust-lang.org/std/hash/trait.Hash.html
/// [std::cell::RefCell]: https://doc.rust-lang.org/std/cell/struct.RefCell.html
pub struct GenericHashDict<K, V, S, P: SharedPointerKind> {
    contents: SharedPointer<HashSet<KeyBox<K, V>, S>, P>,
    keys: SharedPointer<HashSet<K, S>, P>,
}

impl<K, V, P> GenericHashDict<K, V, RandomState, P>
where
    K: Hash + Eq + Clone,
    P: SharedPointerKind,
{
    /// Construct a dict with a single mapping.
    ///
    /// # Examples
    ///
    /// ```
    /// # use hashdict::HashDict;
    /// let dict = HashDict::unit(123, "onetwothree");
    /// assert_eq!(
    ///   dict.get(&123),
    ///   Some(&"onetwothree")
    /// );
    /// ```
    #[inline]
    #[must_use]
    pub fn unit(k: K, v: V) -> GenericHashDict<K, V, RandomState, P> {
        Self::from_entries(std::iter::once((k, v)), RandomState::default())
    }
}

impl<K, V, S, P: SharedPointerKind> GenericHashDict<K, V, S, P> {
    /// Construct an empty dict.
    #[inline]
    #[must_use]
    pub fn new() -> Self
    where
        S: Default,
    {
        Self::default()
    }

    /// Test whether a dict is empty.
    ///
    /// Time: O(1)
    ///
    /// # Examples
    ///
    /// ```
    /// # #[macro_use] extern crate hashdict;
    /// # use hashdict::hashdict::HashDict;
    /// assert!(
    ///   !hashdict!{1 => 2}.is_empty()
    /// );
    /// assert!(
    ///   HashDict::<i32, i32>::new().is_empty()
    /// );
    /// ```
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Get the size of a dict.
    ///
    /// Time: O(1)
    ///
    /// # Examples
    ///
    /// ```
    /// # #[macro_use] extern crate hashdict;
    /// assert_eq!(3, hashdict!{
    ///   1 => 11,
    ///   2 => 22,
    ///   3 => 33
    /// }.len());
    /// ```
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Test whether two dicts refer to the same content in memory.
    ///
    /// This is true if the two sides are references to the same dict,
    /// or if the two dicts refer to the same frozen contents.
    ///
    /// This would return true if you're comparing a dict to itself, or
    /// if you're comparing a dict to a fresh clone of itself.
    ///
    /// Time: O(1)
    pub fn ptr_eq(&self, other: &Self) -> bool {
        SharedPointer::ptr_eq(&self.contents, &other.contents)
    }

    /// Get an iterator over the key/value pairs of a dict.
    ///
    /// The traversal is lazy and restartable: each call starts a fresh
    /// enumeration of the full contents. Order is arbitrary, but
    /// consistent within one enumeration.
    #[inline]
    #[must_use]
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            it: self.contents.iter(),
        }
    }

    /// Get an iterator over a dict's keys.
    ///
    /// This iterates the separately retained key set, so its order
    /// need not agree with [`iter`][GenericHashDict::iter]'s.
    ///
    /// [GenericHashDict::iter]: #method.iter
    #[inline]
    #[must_use]
    pub fn keys(&self) -> Keys<'_, K> {
        Keys {
            it: self.keys.iter(),
        }
    }

    /// Get an iterator over a dict's values.
    #[inline]
    #[must_use]
    pub fn values(&self) -> Values<'_, K, V> {
        Values {
            it: self.contents.iter(),
        }
    }
}

impl<K, V, S, P> GenericHashDict<K, V, S, P>
where
    K: Hash + Eq,
    S: BuildHasher,
    P: SharedPointerKind,
{
    fn test_eq<S2, P2>(&self, other: &GenericHashDict<K, V, S2, P2>) -> bool
    where
        V: PartialEq,
        S2: BuildHasher,
        P2: SharedPointerKind,
    {
        // Keys are unique on both sides, so matching every entry of
        // one side against the other plus a length check is a genuine
        // two-operand comparison.
        if self.len() != other.len() {
            return false;
        }
        self.iter().all(|(k, v)| other.get(k) == Some(v))
    }

    /// Get the value for a key from a dict.
    ///
    /// The backing store is keyed on the boxed entry, not on the raw
    /// key, so a point lookup scans the entries.
    ///
    /// Time: O(n)
    ///
    /// # Examples
    ///
    /// ```
    /// # #[macro_use] extern crate hashdict;
    /// let dict = hashdict!{123 => "lol"};
    /// assert_eq!(
    ///   dict.get(&123),
    ///   Some(&"lol")
    /// );
    /// ```
    #[must_use]
    pub fn get<BK>(&self, key: &BK) -> Option<&V>
    where
        BK: Hash + Eq + ?Sized,
        K: Borrow<BK>,
    {
        self.contents
            .iter()
            .find(|entry| key == entry.key().borrow())
            .map(|entry| entry.value())
    }

    /// Get the key/value pair for a key from a dict.
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
            .find(|entry| key == entry.key().borrow())
            .map(|entry| (entry.key(), entry.value()))
    }

    /// Get the value for a key, or [`Error::KeyNotFound`][Error] when
    /// the dict does not contain it.
    ///
    /// Time: O(n)
    ///
    /// # Examples
    ///
    /// ```
    /// # #[macro_use] extern crate hashdict;
    /// # use hashdict::Error;
    /// let dict = hashdict!{"a" => 1};
    /// assert_eq!(Ok(&1), dict.try_get("a"));
    /// assert_eq!(Err(Error::KeyNotFound), dict.try_get("b"));
    /// ```
    ///
    /// [Error]: ../enum.Error.html
    pub fn try_get<BK>(&self, key: &BK) -> Result<&V, crate::Error>
    where
        BK: Hash + Eq + ?Sized,
        K: Borrow<BK>,
    {
        self.get(key).ok_or(crate::Error::KeyNotFound)
    }

    /// Test for the presence of a key in a dict.
    ///
    /// Uses the retained key set rather than the entry store.
    ///
    /// Time: O(1)
    ///
    /// # Examples
    ///
    /// ```
    /// # #[macro_use] extern crate hashdict;
    /// let dict = hashdict!{123 => "lol"};
    /// assert!(
    ///   dict.contains_key(&123)
    /// );
    /// assert!(
    ///   !dict.contains_key(&321)
    /// );
    /// ```
    #[inline]
    #[must_use]
    pub fn contains_key<BK>(&self, k: &BK) -> bool
    where
        BK: Hash + Eq + ?Sized,
        K: Borrow<BK>,
    {
        self.keys.contains(k)
    }

    /// Test whether a dict is a subdict of another dict, meaning that
    /// all keys in our dict must also be in the other dict, with the
    /// same values.
    ///
    /// Use the provided function to decide whether values are equal.
    ///
    /// Time: O(n·m)
    #[must_use]
    pub fn is_submap_by<B, RM, F, S2, P2>(&self, other: RM, mut cmp: F) -> bool
    where
        F: FnMut(&V, &B) -> bool,
        RM: Borrow<GenericHashDict<K, B, S2, P2>>,
        S2: BuildHasher,
        P2: SharedPointerKind,
    {
        self.iter()
            .all(|(k, v)| other.borrow().get(k).map(|ov| cmp(v, ov)).unwrap_or(false))
    }

    /// Test whether a dict is a proper subdict of another dict,
    /// meaning that all keys in our dict must also be in the other
    /// dict, with the same values. To be a proper subdict, ours must
    /// also contain fewer keys than the other dict.
    ///
    /// Use the provided function to decide whether values are equal.
    ///
    /// Time: O(n·m)
    #[must_use]
    pub fn is_proper_submap_by<B, RM, F, S2, P2>(&self, other: RM, cmp: F) -> bool
    where
        F: FnMut(&V, &B) -> bool,
        RM: Borrow<GenericHashDict<K, B, S2, P2>>,
        S2: BuildHasher,
        P2: SharedPointerKind,
    {
        self.len() != other.borrow().len() && self.is_submap_by(other, cmp)
    }

    /// Test whether a dict is a subdict of another dict, meaning that
    /// all keys in our dict must also be in the other dict, with the
    /// same values.
    ///
    /// Time: O(n·m)
    ///
    /// # Examples
    ///
    /// ```
    /// # #[macro_use] extern crate hashdict;
    /// let dict1 = hashdict!{1 => 1, 2 => 2};
    /// let dict2 = hashdict!{1 => 1, 2 => 2, 3 => 3};
    /// assert!(dict1.is_submap(&dict2));
    /// ```
    #[inline]
    #[must_use]
    pub fn is_submap<RM>(&self, other: RM) -> bool
    where
        V: PartialEq,
        RM: Borrow<Self>,
    {
        self.is_submap_by(other.borrow(), PartialEq::eq)
    }

    /// Test whether a dict is a proper subdict of another dict,
    /// meaning that all keys in our dict must also be in the other
    /// dict, with the same values. To be a proper subdict, ours must
    /// also contain fewer keys than the other dict.
    ///
    /// Time: O(n·m)
    ///
    /// # Examples
    ///
    /// ```
    /// # #[macro_use] extern crate hashdict;
    /// let dict1 = hashdict!{1 => 1, 2 => 2};
    /// let dict2 = hashdict!{1 => 1, 2 => 2, 3 => 3};
    /// assert!(dict1.is_proper_submap(&dict2));
    ///
    /// let dict3 = hashdict!{1 => 1, 2 => 2};
    /// let dict4 = hashdict!{1 => 1, 2 => 2};
    /// assert!(!dict3.is_proper_submap(&dict4));
    /// ```
    #[inline]
    #[must_use]
    pub fn is_proper_submap<RM>(&self, other: RM) -> bool
    where
        V: PartialEq,
        RM: Borrow<Self>,
    {
        self.is_proper_submap_by(other.borrow(), PartialEq::eq)
    }
}

impl<K, V, S, P> GenericHashDict<K, V, S, P>
where
    K: Hash + Eq + Clone,
    S: BuildHasher + Clone,
    P: SharedPointerKind,
{
    /// The single construction pass: box every pair into the entry
    /// store and mirror the key into the key set, last pair winning on
    /// a duplicate key. Nothing escapes until both containers are
    /// fully populated.
    fn from_entries<I>(iter: I, hasher: S) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
    {
        let mut contents = HashSet::with_hasher(hasher.clone());
        let mut keys = HashSet::with_hasher(hasher);
        for (key, value) in iter {
            keys.replace(key.clone());
            contents.replace(KeyBox::new(key, value));
        }
        GenericHashDict {
            contents: SharedPointer::new(contents),
            keys: SharedPointer::new(keys),
        }
    }

    /// Construct a dict from a sequence of key/value pairs, hashing
    /// with the provided hasher.
    #[must_use]
    pub fn from_iter_with_hasher<I>(iter: I, hasher: S) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
    {
        Self::from_entries(iter, hasher)
    }

    /// Construct a dict assigning the same value to every key in the
    /// given sequence.
    ///
    /// # Examples
    ///
    /// ```
    /// # #[macro_use] extern crate hashdict;
    /// # use hashdict::HashDict;
    /// let dict: HashDict<_, _> = HashDict::from_keys(vec!["a", "b"], 0);
    /// assert_eq!(dict, hashdict!{"a" => 0, "b" => 0});
    /// ```
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
    /// entries: the escape hatch back to a conventional mapping type.
    ///
    /// Time: O(n)
    ///
    /// # Examples
    ///
    /// ```
    /// # #[macro_use] extern crate hashdict;
    /// # use hashdict::HashDict;
    /// let dict = hashdict!{"a" => 1, "b" => 2};
    /// let plain = dict.to_hash_map();
    /// assert_eq!(Some(&1), plain.get("a"));
    /// assert_eq!(dict, HashDict::from(plain));
    /// ```
    #[must_use]
    pub fn to_hash_map(&self) -> collections::HashMap<K, V>
    where
        V: Clone,
    {
        self.iter().map(|(k, v)| (k.clone(), v.clone())).collect()
    }
}

impl<K, V, S, P> Clone for GenericHashDict<K, V, S, P>
where
    P: SharedPointerKind,
{
    /// Clone a dict.
    ///
    /// Time: O(1)
    #[inline]
    fn clone(&self) -> Self {
        GenericHashDict {
            contents: self.contents.clone(),
            keys: self.keys.clone(),
        }
    }
}

impl<K, V, S1, S2, P1, P2> PartialEq<GenericHashDict<K, V, S2, P2>>
    for GenericHashDict<K, V, S1, P1>
where
    K: Hash + Eq,
    V: PartialEq,
    S1: BuildHasher,
    S2: BuildHasher,
    P1: SharedPointerKind,
    P2: SharedPointerKind,
{
    fn eq(&self, other: &GenericHashDict<K, V, S2, P2>) -> bool {
        self.test_eq(other)
    }
}

impl<K, V, S1, S2, P> PartialEq<collections::HashMap<K, V, S2>> for GenericHashDict<K, V, S1, P>
where
    K: Hash + Eq,
    V: PartialEq,
    S1: BuildHasher,
    S2: BuildHasher,
    P: SharedPointerKind,
{
    /// A plain mapping compares equal to a dict with the same entries,
    /// just as if it had been converted first.
    fn eq(&self, other: &collections::HashMap<K, V, S2>) -> bool {
        self.len() == other.len() && self.iter().all(|(k, v)| other.get(k) == Some(v))
    }
}

impl<K, V, S, P> Eq for GenericHashDict<K, V, S, P>
where
    K: Hash + Eq,
    V: Eq,
    S: BuildHasher,
    P: SharedPointerKind,
{
}

impl<K, V, S, P> Hash for GenericHashDict<K, V, S, P>
where
    K: Hash,
    P: SharedPointerKind,
{
    /// Hashes using the frozen set of dict keys.
    ///
    /// Values never contribute, so two dicts with equal key sets hash
    /// identically even when their values differ. Per-key hashes come
    /// from a fixed hasher and are folded commutatively, making the
    /// result independent of enumeration order and of the dict's own
    /// (possibly randomly seeded) `BuildHasher`.
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

impl<K, V, S, P> Default for GenericHashDict<K, V, S, P>
where
    S: Default,
    P: SharedPointerKind,
{
    #[inline]
    fn default() -> Self {
        GenericHashDict {
            contents: SharedPointer::new(HashSet::with_hasher(S::default())),
            keys: SharedPointer::new(HashSet::with_hasher(S::default())),
        }
    }
}

impl<BK, K, V, S, P> Index<&BK> for GenericHashDict<K, V, S, P>
where
    BK: Hash + Eq + ?Sized,
    K: Hash + Eq + Borrow<BK>,
    S: BuildHasher,
    P: SharedPointerKind,
{
    type Output = V;

    fn index(&self, key: &BK) -> &Self::Output {
        match self.get(key) {
            None => panic!("HashDict::index: invalid key"),
            Some(value) => value,
        }
    }
}

impl<K, V, S, P> Debug for GenericHashDict<K, V, S, P>
where
    K: Debug,
    V: Debug,
    P: SharedPointerKind,
{
    /// Formats as `HashDict({key1: value1, key2: value2})`: a
    /// complete, duplicate-free listing in whatever order the backing
    /// store yields.
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        f.write_str("HashDict(")?;
        let mut d = f.debug_map();
        for (k, v) in self {
            d.entry(k, v);
        }
        d.finish()?;
        f.write_str(")")
    }
}

// // Iterators

/// An iterator over the entries of a dict.
pub struct Iter<'a, K, V> {
    it: hash_set::Iter<'a, KeyBox<K, V>>,
}

// We impl Clone instead of deriving it, because we want Clone even if K and V aren't.
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
        self.it.next().map(|entry| (entry.key(), entry.value()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.it.size_hint()
    }
}

impl<'a, K, V> ExactSizeIterator for Iter<'a, K, V> {}

impl<'a, K, V> FusedIterator for Iter<'a, K, V> {}

/// An iterator over the keys of a dict.
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

/// An iterator over the values of a dict.
pub struct Values<'a, K, V> {
    it: hash_set::Iter<'a, KeyBox<K, V>>,
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.it.next().map(|entry| entry.value())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.it.size_hint()
    }
}

impl<'a, K, V> ExactSizeIterator for Values<'a, K, V> {}

impl<'a, K, V> FusedIterator for Values<'a, K, V> {}

/// A consuming iterator over the entries of a dict.
pub struct ConsumingIter<K, V> {
    it: hash_set::IntoIter<KeyBox<K, V>>,
}

impl<K, V> Iterator for ConsumingIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        self.it.next().map(KeyBox::into_pair)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.it.size_hint()
    }
}

impl<K, V> ExactSizeIterator for ConsumingIter<K, V> {}

impl<K, V> FusedIterator for ConsumingIter<K, V> {}

impl<'a, K, V, S, P: SharedPointerKind> IntoIterator for &'a GenericHashDict<K, V, S, P> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, V, S, P> IntoIterator for GenericHashDict<K, V, S, P>
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

impl<K, V, S, P> FromIterator<(K, V)> for GenericHashDict<K, V, S, P>
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

impl<K, V, S, P: SharedPointerKind> AsRef<GenericHashDict<K, V, S, P>>
    for GenericHashDict<K, V, S, P>
{
    #[inline]
    fn as_ref(&self) -> &Self {
        self
    }
}

impl<K, V, OK, OV, SA, SB, P1, P2> From<&GenericHashDict<&K, &V, SA, P1>>
    for GenericHashDict<OK, OV, SB, P2>
where
    K: Hash + Eq + ToOwned<Owned = OK> + ?Sized,
    V: ToOwned<Owned = OV> + ?Sized,
    OK: Hash + Eq + Clone + Borrow<K>,
    OV: Borrow<V> + Clone,
    SA: BuildHasher,
    SB: BuildHasher + Default + Clone,
    P1: SharedPointerKind,
    P2: SharedPointerKind,
{
    fn from(m: &GenericHashDict<&K, &V, SA, P1>) -> Self {
        m.iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect()
    }
}

impl<'a, K, V, S, P> From<&'a [(K, V)]> for GenericHashDict<K, V, S, P>
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

impl<K, V, S, P> From<Vec<(K, V)>> for GenericHashDict<K, V, S, P>
where
    K: Hash + Eq + Clone,
    S: BuildHasher + Default + Clone,
    P: SharedPointerKind,
{
    fn from(m: Vec<(K, V)>) -> Self {
        m.into_iter().collect()
    }
}

impl<'a, K, V, S, P> From<&'a Vec<(K, V)>> for GenericHashDict<K, V, S, P>
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

impl<K, V, S1, S2, P> From<collections::HashMap<K, V, S2>> for GenericHashDict<K, V, S1, P>
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

impl<'a, K, V, S1, S2, P> From<&'a collections::HashMap<K, V, S2>> for GenericHashDict<K, V, S1, P>
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

impl<K, V, S, P> From<collections::BTreeMap<K, V>> for GenericHashDict<K, V, S, P>
where
    K: Hash + Eq + Clone,
    S: BuildHasher + Default + Clone,
    P: SharedPointerKind,
{
    fn from(m: collections::BTreeMap<K, V>) -> Self {
        m.into_iter().collect()
    }
}

impl<'a, K, V, S, P> From<&'a collections::BTreeMap<K, V>> for GenericHashDict<K, V, S, P>
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

#[cfg(test)]
mod test {
    use super::*;
    use crate::test::LolHasher;
    use crate::util::fixed_hash;
    #[rustfmt::skip]
    use ::proptest::{collection, num::i16, proptest};
    use metrohash::MetroHash64;
    use static_assertions::{assert_impl_all, assert_not_impl_any};
    use std::collections::HashSet as NatSet;
    use std::hash::BuildHasherDefault;

    assert_impl_all!(HashDict<i32, i32>: Send, Sync);
    assert_not_impl_any!(HashDict<i32, *const i32>: Send, Sync);
    assert_not_impl_any!(HashDict<*const i32, i32>: Send, Sync);
    assert_covariant!(HashDict<T, i32> in T);
    assert_covariant!(HashDict<i32, T> in T);

    #[test]
    fn unhashable_values() {
        let mut set = NatSet::new();
        set.insert(3);
        let dict = hashdict!{"a" => vec![1, 2]};
        let other = HashDict::unit("b", set.clone());
        assert_eq!(Some(&vec![1, 2]), dict.get("a"));
        assert_eq!(Some(&set), other.get("b"));
        // Hashing a dict of unhashable values must work.
        let _ = fixed_hash(&dict);
        let _ = fixed_hash(&other);
    }

    #[test]
    fn usable_as_a_key() {
        let mut outer = collections::HashMap::new();
        outer.insert(hashdict!{"a" => 1, "b" => 2}, "found");
        assert_eq!(
            Some(&"found"),
            outer.get(&hashdict!{"b" => 2, "a" => 1})
        );
    }

    #[test]
    fn last_duplicate_wins() {
        let dict: HashDict<&str, i32> = HashDict::from(vec![("x", 1), ("x", 2)]);
        assert_eq!(1, dict.len());
        assert_eq!(Some(&2), dict.get("x"));
        assert_eq!(
            Some(("x", 2)),
            dict.get_key_value("x").map(|(k, v)| (*k, *v))
        );
    }

    #[test]
    fn keys_only_hash() {
        let a = hashdict!{"a" => 1, "b" => 2};
        let b = hashdict!{"a" => 9, "b" => 9};
        assert_eq!(fixed_hash(&a), fixed_hash(&b));
        assert_ne!(a, b);

        let c = hashdict!{"a" => 1, "c" => 2};
        assert_ne!(fixed_hash(&a), fixed_hash(&c));
    }

    #[test]
    fn hash_ignores_construction_order() {
        let fwd = HashDict::from(vec![(1, 'a'), (2, 'b'), (3, 'c')]);
        let rev = HashDict::from(vec![(3, 'c'), (2, 'b'), (1, 'a')]);
        assert_eq!(fwd, rev);
        assert_eq!(fixed_hash(&fwd), fixed_hash(&rev));
    }

    #[test]
    fn equality_is_not_a_tautology() {
        // Same length, same keys, different values: must not be equal.
        let a = hashdict!{"a" => 1, "b" => 2};
        let b = hashdict!{"a" => 1, "b" => 3};
        assert_ne!(a, b);
        // And a genuinely missing key on either side.
        assert_ne!(hashdict!{"a" => 1}, hashdict!{"b" => 1});
    }

    #[test]
    fn plain_mapping_comparison() {
        let empty: collections::HashMap<&str, i32> = collections::HashMap::new();
        assert_eq!(HashDict::new(), HashDict::from(empty.clone()));
        assert_eq!(HashDict::<&str, i32>::new(), empty);

        let mut plain = collections::HashMap::new();
        plain.insert("a", 1);
        assert_eq!(hashdict!{"a" => 1}, plain);

        let mut unequal = collections::HashMap::new();
        unequal.insert("a", 2);
        assert_ne!(hashdict!{"a" => 1}, unequal);
    }

    #[test]
    fn round_trip_through_plain_mapping() {
        let dict = hashdict!{"a" => 1, "b" => 2, "c" => 3};
        let rebuilt = HashDict::from(dict.to_hash_map());
        assert_eq!(dict, rebuilt);
        assert_eq!(fixed_hash(&dict), fixed_hash(&rebuilt));
    }

    #[test]
    fn from_keys_assigns_default() {
        let dict: HashDict<&str, i32> = HashDict::from_keys(vec!["a", "b"], 0);
        assert_eq!(dict, HashDict::from(vec![("a", 0), ("b", 0)]));
    }

    #[test]
    fn try_get_reports_missing_keys() {
        let dict = hashdict!{"a" => 1};
        assert_eq!(Ok(&1), dict.try_get("a"));
        assert_eq!(Err(crate::Error::KeyNotFound), dict.try_get("b"));
    }

    #[test]
    fn index_operator() {
        let dict: HashDict<usize, usize> = hashdict![1 => 2, 3 => 4, 5 => 6];
        assert_eq!(4, dict[&3]);
    }

    #[test]
    #[should_panic(expected = "HashDict::index: invalid key")]
    fn index_operator_panics_when_missing() {
        let dict: HashDict<usize, usize> = hashdict![1 => 2];
        let _ = dict[&3];
    }

    #[test]
    fn proper_formatting() {
        let dict: HashDict<usize, usize> = hashdict![1 => 2];
        assert_eq!("HashDict({1: 2})", format!("{:?}", dict));

        assert_eq!(
            "HashDict({})",
            format!("{:?}", HashDict::<(), ()>::new())
        );
    }

    #[test]
    fn macro_allows_trailing_comma() {
        let dict1: HashDict<&str, i32> = hashdict! {"x" => 1, "y" => 2};
        let dict2: HashDict<&str, i32> = hashdict! {
            "x" => 1,
            "y" => 2,
        };
        assert_eq!(dict1, dict2);
    }

    #[test]
    fn clone_shares_contents() {
        let dict = hashdict!{"a" => 1, "b" => 2};
        let copy = dict.clone();
        assert!(dict.ptr_eq(&copy));
        assert_eq!(dict, copy);
        // An equal dict built separately does not share.
        assert!(!dict.ptr_eq(&hashdict!{"a" => 1, "b" => 2}));
    }

    #[test]
    fn match_string_keys_with_string_slices() {
        let tmp_dict: HashDict<&str, &i32> = hashdict! { "foo" => &1, "bar" => &2, "baz" => &3 };
        let dict: HashDict<String, i32> = From::from(&tmp_dict);
        assert_eq!(Some(&1), dict.get("foo"));
        assert_eq!(3, dict["baz"]);
    }

    #[test]
    fn consuming_iterator_unwraps_entries() {
        let dict = hashdict!{"a" => 1, "b" => 2, "c" => 3};
        let expected = dict.to_hash_map();
        let drained: collections::HashMap<&str, i32> = dict.into_iter().collect();
        assert_eq!(expected, drained);
    }

    #[test]
    fn custom_hashers() {
        let pairs: Vec<(i16, i16)> = (0..512).map(|i| (i, i * 2)).collect();
        let weak: GenericHashDict<i16, i16, BuildHasherDefault<LolHasher>, DefaultSharedPtr> =
            GenericHashDict::from_iter_with_hasher(pairs.clone(), Default::default());
        let metro: GenericHashDict<i16, i16, BuildHasherDefault<MetroHash64>, DefaultSharedPtr> =
            GenericHashDict::from_iter_with_hasher(pairs.clone(), Default::default());
        for (k, v) in &pairs {
            assert_eq!(Some(v), weak.get(k));
            assert!(metro.contains_key(k));
        }
        // Equality and hashing hold across hasher choices.
        assert_eq!(weak, metro);
        assert_eq!(fixed_hash(&weak), fixed_hash(&metro));
    }

    #[test]
    fn randomised_model_check() {
        use rand::rngs::SmallRng;
        use rand::{Rng, SeedableRng};

        let mut rng = SmallRng::seed_from_u64(0x5EED);
        for _ in 0..32 {
            let len: usize = rng.random_range(0..256);
            // A narrow key space forces plenty of duplicate keys.
            let pairs: Vec<(u16, u32)> = (0..len)
                .map(|_| (rng.random_range(0..64), rng.random()))
                .collect();
            let mut model = collections::HashMap::new();
            for (k, v) in &pairs {
                model.insert(*k, *v);
            }
            let dict: HashDict<u16, u32> = HashDict::from(pairs);
            assert_eq!(model.len(), dict.len());
            assert_eq!(dict, model);
        }
    }

    #[test]
    fn from_conversions_agree() {
        let pairs = vec![(1, 11), (2, 22)];
        let from_slice: HashDict<i32, i32> = HashDict::from(&pairs[..]);
        let from_vec_ref: HashDict<i32, i32> = HashDict::from(&pairs);
        let from_vec: HashDict<i32, i32> = HashDict::from(pairs.clone());
        let from_btree: HashDict<i32, i32> =
            HashDict::from(pairs.iter().cloned().collect::<collections::BTreeMap<_, _>>());
        assert_eq!(from_slice, from_vec);
        assert_eq!(from_vec_ref, from_vec);
        assert_eq!(from_btree, from_vec);
    }

    proptest! {
        #[test]
        fn from_iterator(ref m in collection::hash_map(i16::ANY, i16::ANY, 0..1000)) {
            let dict: HashDict<i16, i16> =
                FromIterator::from_iter(m.iter().map(|(k, v)| (*k, *v)));
            assert_eq!(m.len(), dict.len());
        }

        #[test]
        fn lookup(ref m in collection::hash_map(i16::ANY, i16::ANY, 0..1000)) {
            let dict: HashDict<i16, i16> = FromIterator::from_iter(m.iter().map(|(k, v)| (*k, *v)));
            for (k, v) in m {
                assert_eq!(Some(*v), dict.get(k).cloned(), "{k} not found in dict {dict:?}");
                assert!(dict.contains_key(k));
            }
        }

        #[test]
        fn iterate_over(ref m in collection::hash_map(i16::ANY, i16::ANY, 0..1000)) {
            let dict: HashDict<i16, i16> = FromIterator::from_iter(m.iter().map(|(k, v)| (*k, *v)));
            assert_eq!(m.len(), dict.iter().count());
            assert_eq!(m.len(), dict.keys().count());
            assert_eq!(m.len(), dict.values().count());
        }

        #[test]
        fn equality(ref m in collection::hash_map(i16::ANY, i16::ANY, 0..1000)) {
            let dict1: HashDict<i16, i16> = FromIterator::from_iter(m.iter().map(|(k, v)| (*k, *v)));
            let dict2: HashDict<i16, i16> = FromIterator::from_iter(m.iter().map(|(k, v)| (*k, *v)));
            assert_eq!(dict1, dict2);
            assert_eq!(fixed_hash(&dict1), fixed_hash(&dict2));
            assert_eq!(dict1, *m);
        }

        #[test]
        fn last_wins(ref pairs in collection::vec((i16::ANY, i16::ANY), 0..100)) {
            let mut m: collections::HashMap<i16, i16> = collections::HashMap::new();
            for (k, v) in pairs {
                m.insert(*k, *v);
            }
            let dict: HashDict<i16, i16> = HashDict::from(pairs.clone());
            assert_eq!(m.len(), dict.len());
            for (k, v) in &m {
                assert_eq!(Some(v), dict.get(k));
            }
        }

        #[test]
        fn shuffled_construction_orders_agree(ref m in collection::hash_map(i16::ANY, i16::ANY, 0..100)) {
            let pairs: Vec<(i16, i16)> = m.iter().map(|(k, v)| (*k, *v)).collect();
            let fwd: HashDict<i16, i16> = HashDict::from(pairs.clone());
            let rev: HashDict<i16, i16> =
                HashDict::from(pairs.iter().rev().cloned().collect::<Vec<_>>());
            assert_eq!(fwd, rev);
            assert_eq!(fixed_hash(&fwd), fixed_hash(&rev));
        }

        #[test]
        fn values_never_affect_the_hash(ref m in collection::hash_map(i16::ANY, i16::ANY, 0..100)) {
            let dict: HashDict<i16, i16> = FromIterator::from_iter(m.iter().map(|(k, v)| (*k, *v)));
            let zeroed: HashDict<i16, i16> = FromIterator::from_iter(m.keys().map(|k| (*k, 0)));
            assert_eq!(fixed_hash(&dict), fixed_hash(&zeroed));
        }

        #[test]
        fn round_trip(ref m in collection::hash_map(i16::ANY, i16::ANY, 0..100)) {
            let dict: HashDict<i16, i16> = FromIterator::from_iter(m.iter().map(|(k, v)| (*k, *v)));
            let rebuilt = HashDict::from(dict.to_hash_map());
            assert_eq!(dict, rebuilt);
        }

        #[test]
        fn exact_size_iterator(ref m in collection::hash_map(i16::ANY, i16::ANY, 0..100)) {
            let dict: HashDict<i16, i16> = FromIterator::from_iter(m.iter().map(|(k, v)| (*k, *v)));
            let mut should_be = dict.len();
            let mut it = dict.iter();
            loop {
                assert_eq!(should_be, it.len());
                match it.next() {
                    None => break,
                    Some(_) => should_be -= 1,
                }
            }
            assert_eq!(0, it.len());
        }
    }
}
