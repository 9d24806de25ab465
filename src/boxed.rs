// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Hashable boxes.
//!
//! The dict types in this crate store their entries inside hashable
//! wrappers so that a structural set can hold them even when the values
//! don't implement [`Hash`][std::hash::Hash]. Two policies exist:
//!
//! - [`KeyBox`] wraps a whole `(key, value)` pair; its hash and
//!   equality depend only on the key.
//! - [`OpaqueBox`] wraps a bare value; it hashes to a single fixed
//!   constant and compares equal to every other `OpaqueBox`, leaving
//!   deduplication entirely to the container around it.
//!
//! Both are shallowly immutable: the box never mutates its contents,
//! but it cannot stop interior mutability (e.g. a
//! [`RefCell`][std::cell::RefCell]) inside the wrapped value. Mutating
//! a wrapped value through such a channel leaves the surrounding
//! dict's hash inconsistent with its contents.
//!
//! [std::hash::Hash]: https://doc.rust-lang.org/std/hash/trait.Hash.html
//! [std::cell::RefCell]: https://doc.rust-lang.org/std/cell/struct.RefCell.html

use std::fmt::{Debug, Error, Formatter};
use std::hash::{Hash, Hasher};

use crate::config::{KEY_BOX_MASK, OPAQUE_BOX_HASH};
use crate::util::fixed_hash;

/// A hashable container for a key and a possibly unhashable value.
///
/// Hash and equality are derived from the key alone; the value rides
/// along opaquely. A type that does not implement `Hash + Eq` cannot
/// be used as the key; the bounds on [`KeyBox::new`] reject it at
/// compile time.
///
/// # Examples
///
/// ```
/// # use hashdict::KeyBox;
/// let a = KeyBox::new("name", vec![1, 2, 3]);
/// let b = KeyBox::new("name", vec![4, 5, 6]);
/// // Equal keys, so the boxes are equal even though the values differ.
/// assert_eq!(a, b);
/// ```
#[derive(Clone)]
pub struct KeyBox<K, V> {
    key: K,
    value: V,
}

impl<K, V> KeyBox<K, V>
where
    K: Hash + Eq,
{
    /// Box a key/value pair.
    #[inline]
    #[must_use]
    pub fn new(key: K, value: V) -> Self {
        KeyBox { key, value }
    }
}

impl<K, V> KeyBox<K, V> {
    /// Get a reference to the boxed key.
    #[inline]
    #[must_use]
    pub fn key(&self) -> &K {
        &self.key
    }

    /// Get a reference to the boxed value.
    #[inline]
    #[must_use]
    pub fn value(&self) -> &V {
        &self.value
    }

    /// Unwrap the box back into its pair.
    #[inline]
    #[must_use]
    pub fn into_pair(self) -> (K, V) {
        (self.key, self.value)
    }
}

impl<K, V> PartialEq for KeyBox<K, V>
where
    K: Eq,
{
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl<K, V> Eq for KeyBox<K, V> where K: Eq {}

impl<K, V> Hash for KeyBox<K, V>
where
    K: Hash,
{
    /// Hash based only on the key, because the value might be
    /// unhashable. The mask keeps a boxed key from colliding with the
    /// bare key's own hash.
    fn hash<H>(&self, state: &mut H)
    where
        H: Hasher,
    {
        state.write_u64(KEY_BOX_MASK ^ fixed_hash(&self.key));
    }
}

impl<K, V> Debug for KeyBox<K, V>
where
    K: Debug,
    V: Debug,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        f.debug_tuple("KeyBox")
            .field(&self.key)
            .field(&self.value)
            .finish()
    }
}

/// A hashable container for storing an unhashable value.
///
/// All opaque boxes share one hash and compare equal to each other, no
/// matter what they hold. A container of these must deduplicate by
/// some other means; [`FrozenDict`][crate::FrozenDict] keeps a
/// separate key set for exactly that reason.
///
/// [crate::FrozenDict]: ../frozendict/type.FrozenDict.html
#[derive(Clone)]
pub struct OpaqueBox<V> {
    value: V,
}

impl<V> OpaqueBox<V> {
    /// Box a value. No constraint is placed on `V`.
    #[inline]
    #[must_use]
    pub fn new(value: V) -> Self {
        OpaqueBox { value }
    }

    /// Get a reference to the boxed value.
    #[inline]
    #[must_use]
    pub fn value(&self) -> &V {
        &self.value
    }

    /// Unwrap the box.
    #[inline]
    #[must_use]
    pub fn into_value(self) -> V {
        self.value
    }
}

impl<V> PartialEq for OpaqueBox<V> {
    /// Any two opaque boxes are equal, regardless of contents.
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl<V> Eq for OpaqueBox<V> {}

impl<V> Hash for OpaqueBox<V> {
    /// All boxes will have a hash collision.
    fn hash<H>(&self, state: &mut H)
    where
        H: Hasher,
    {
        state.write_u64(OPAQUE_BOX_HASH);
    }
}

impl<V> Debug for OpaqueBox<V>
where
    V: Debug,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        f.debug_tuple("OpaqueBox").field(&self.value).finish()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn key_box_identity_ignores_value() {
        let a = KeyBox::new(1, vec![1, 2]);
        let b = KeyBox::new(1, vec![3, 4]);
        let c = KeyBox::new(2, vec![1, 2]);
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(fixed_hash(&a), fixed_hash(&b));
    }

    #[test]
    fn key_box_hash_differs_from_bare_key() {
        let boxed = KeyBox::new(17_u64, ());
        assert_ne!(fixed_hash(&boxed), fixed_hash(&17_u64));
    }

    #[test]
    fn key_box_replace_dedups_in_a_set() {
        let mut set = HashSet::new();
        set.replace(KeyBox::new("k", 1));
        set.replace(KeyBox::new("k", 2));
        assert_eq!(1, set.len());
        assert_eq!(&2, set.iter().next().unwrap().value());
    }

    #[test]
    fn opaque_boxes_all_collide() {
        let a = OpaqueBox::new(vec![1, 2]);
        let b = OpaqueBox::new("entirely different");
        assert_eq!(fixed_hash(&a), fixed_hash(&b));
        assert_eq!(OpaqueBox::new(1), OpaqueBox::new(2));
    }

    #[test]
    fn unwrap_round_trip() {
        let boxed = KeyBox::new("a", vec![1]);
        assert_eq!(("a", vec![1]), boxed.into_pair());
        assert_eq!(vec![1], OpaqueBox::new(vec![1]).into_value());
    }

    #[test]
    fn debug_formatting() {
        assert_eq!(
            "KeyBox(\"a\", [1])",
            format!("{:?}", KeyBox::new("a", vec![1]))
        );
        assert_eq!("OpaqueBox(7)", format!("{:?}", OpaqueBox::new(7)));
    }
}
