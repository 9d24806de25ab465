// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Proptest strategies for the dict types.
//!
//! These are only available when using the `proptest` feature flag.

use std::fmt::Debug;
use std::hash::Hash;
use std::ops::Range;

use ::proptest::collection::vec;
use ::proptest::strategy::{BoxedStrategy, Strategy, ValueTree};

use crate::{FrozenDict, HashDict};

/// A strategy for a [`HashDict`][crate::HashDict] of a given size.
///
/// # Examples
///
/// ```rust,no_run
/// # use ::proptest::proptest;
/// proptest! {
///     #[test]
///     fn proptest_a_dict(ref d in hashdict::proptest::hash_dict(0..100i32, ".*", 10..100)) {
///         assert!(d.len() < 100);
///         assert!(d.len() >= 10);
///     }
/// }
/// ```
///
/// [crate::HashDict]: ../hashdict/type.HashDict.html
pub fn hash_dict<K: Strategy + 'static, V: Strategy + 'static>(
    key: K,
    value: V,
    size: Range<usize>,
) -> BoxedStrategy<HashDict<<K::Tree as ValueTree>::Value, <V::Tree as ValueTree>::Value>>
where
    <K::Tree as ValueTree>::Value: Hash + Eq + Clone + Debug,
    <V::Tree as ValueTree>::Value: Clone + Debug,
{
    let min = size.start;
    vec((key, value), size)
        .prop_map(HashDict::from)
        .prop_filter("HashDict minimum size".to_owned(), move |d| d.len() >= min)
        .boxed()
}

/// A strategy for a [`FrozenDict`][crate::FrozenDict] of a given size.
///
/// [crate::FrozenDict]: ../frozendict/type.FrozenDict.html
pub fn frozen_dict<K: Strategy + 'static, V: Strategy + 'static>(
    key: K,
    value: V,
    size: Range<usize>,
) -> BoxedStrategy<FrozenDict<<K::Tree as ValueTree>::Value, <V::Tree as ValueTree>::Value>>
where
    <K::Tree as ValueTree>::Value: Hash + Eq + Clone + Debug,
    <V::Tree as ValueTree>::Value: Clone + Debug,
{
    let min = size.start;
    vec((key, value), size)
        .prop_map(FrozenDict::from)
        .prop_filter("FrozenDict minimum size".to_owned(), move |d| {
            d.len() >= min
        })
        .boxed()
}

#[cfg(test)]
mod test {
    use super::*;
    use ::proptest::proptest;

    proptest! {
        #[test]
        fn strategy_respects_size_bounds(ref d in hash_dict(0..9999i32, ".*", 10..100)) {
            assert!(d.len() < 100);
            assert!(d.len() >= 10);
        }

        #[test]
        fn frozen_strategy_respects_size_bounds(ref d in frozen_dict(0..9999i32, ".*", 5..50)) {
            assert!(d.len() < 50);
            assert!(d.len() >= 5);
        }
    }
}
