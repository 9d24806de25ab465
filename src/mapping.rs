// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The read-only mapping capability.

use std::collections;
use std::hash::{BuildHasher, Hash};

use archery::SharedPointerKind;

use crate::dict::keyed::GenericHashDict;
use crate::dict::opaque::GenericFrozenDict;

/// The capability surface of a read-only mapping: enumerable, sized,
/// membership-testable, and point-lookupable.
///
/// Generic code that only needs to read from a mapping can take any
/// `Mapping<K, V>` and work the same over a
/// [`HashDict`][crate::HashDict], a
/// [`FrozenDict`][crate::FrozenDict], or a plain
/// [`HashMap`][std::collections::HashMap].
///
/// # Examples
///
/// ```
/// # #[macro_use] extern crate hashdict;
/// # use hashdict::Mapping;
/// fn total<M: Mapping<&'static str, i32>>(m: &M) -> i32 {
///     m.entries().map(|(_, v)| *v).sum()
/// }
///
/// let frozen = hashdict!{"a" => 1, "b" => 2};
/// let mut plain = std::collections::HashMap::new();
/// plain.insert("a", 1);
/// plain.insert("b", 2);
/// assert_eq!(total(&frozen), total(&plain));
/// ```
///
/// [crate::HashDict]: ./hashdict/type.HashDict.html
/// [crate::FrozenDict]: ./frozendict/type.FrozenDict.html
/// [std::collections::HashMap]: https://doc.rust-lang.org/std/collections/struct.HashMap.html
pub trait Mapping<K, V> {
    /// The iterator produced by [`entries`][Mapping::entries].
    ///
    /// [Mapping::entries]: #tymethod.entries
    type Entries<'a>: Iterator<Item = (&'a K, &'a V)>
    where
        Self: 'a,
        K: 'a,
        V: 'a;

    /// The number of entries in the mapping.
    fn len(&self) -> usize;

    /// Whether the mapping has no entries.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether the mapping contains the given key.
    fn contains_key(&self, key: &K) -> bool;

    /// The value stored for the given key, if any.
    fn get(&self, key: &K) -> Option<&V>;

    /// Enumerate the mapping's entries, in no particular order.
    fn entries(&self) -> Self::Entries<'_>;
}

impl<K, V, S, P> Mapping<K, V> for GenericHashDict<K, V, S, P>
where
    K: Hash + Eq,
    S: BuildHasher,
    P: SharedPointerKind,
{
    type Entries<'a>
        = crate::dict::keyed::Iter<'a, K, V>
    where
        Self: 'a,
        K: 'a,
        V: 'a;

    fn len(&self) -> usize {
        self.len()
    }

    fn contains_key(&self, key: &K) -> bool {
        self.contains_key(key)
    }

    fn get(&self, key: &K) -> Option<&V> {
        self.get(key)
    }

    fn entries(&self) -> Self::Entries<'_> {
        self.iter()
    }
}

impl<K, V, S, P> Mapping<K, V> for GenericFrozenDict<K, V, S, P>
where
    K: Hash + Eq,
    S: BuildHasher,
    P: SharedPointerKind,
{
    type Entries<'a>
        = crate::dict::opaque::Iter<'a, K, V>
    where
        Self: 'a,
        K: 'a,
        V: 'a;

    fn len(&self) -> usize {
        self.len()
    }

    fn contains_key(&self, key: &K) -> bool {
        self.contains_key(key)
    }

    fn get(&self, key: &K) -> Option<&V> {
        self.get(key)
    }

    fn entries(&self) -> Self::Entries<'_> {
        self.iter()
    }
}

impl<K, V, S> Mapping<K, V> for collections::HashMap<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    type Entries<'a>
        = collections::hash_map::Iter<'a, K, V>
    where
        Self: 'a,
        K: 'a,
        V: 'a;

    fn len(&self) -> usize {
        self.len()
    }

    fn contains_key(&self, key: &K) -> bool {
        self.contains_key(key)
    }

    fn get(&self, key: &K) -> Option<&V> {
        self.get(key)
    }

    fn entries(&self) -> Self::Entries<'_> {
        self.iter()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{frozendict, hashdict};

    fn collect_sorted<M: Mapping<i32, i32>>(m: &M) -> Vec<(i32, i32)> {
        let mut pairs: Vec<(i32, i32)> = m.entries().map(|(k, v)| (*k, *v)).collect();
        pairs.sort_unstable();
        pairs
    }

    #[test]
    fn all_implementations_agree() {
        let keyed = hashdict!{1 => 10, 2 => 20};
        let frozen = frozendict!{1 => 10, 2 => 20};
        let plain = keyed.to_hash_map();

        for view in [
            collect_sorted(&keyed),
            collect_sorted(&frozen),
            collect_sorted(&plain),
        ] {
            assert_eq!(vec![(1, 10), (2, 20)], view);
        }

        assert_eq!(2, Mapping::len(&keyed));
        assert!(Mapping::contains_key(&frozen, &1));
        assert_eq!(Some(&20), Mapping::get(&plain, &2));
        assert!(!Mapping::is_empty(&keyed));
    }
}
