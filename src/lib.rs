// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! An immutable dictionary that is hashable, even if its values are
//! not.
//!
//! Ordinary mapping types can't be hashed: they're mutable, so any
//! hash computed over them could be invalidated a moment later. That
//! rules out using a map as a key in another map, as a set member, or
//! as a memoised-function argument. The types in this crate fix that
//! by freezing the mapping when it is built and deriving a stable,
//! structural hash from its key set. That works even when the
//! *values* are unhashable, because values never participate in the
//! hash.
//!
//! Two variants are provided, differing only in the wrapper ("box")
//! their entries are stored in:
//!
//! - [`HashDict`][hashdict::HashDict] boxes each entry in a
//!   [`KeyBox`][boxed::KeyBox], whose hash and equality are derived
//!   from the key alone.
//! - [`FrozenDict`][frozendict::FrozenDict] boxes each value in an
//!   [`OpaqueBox`][boxed::OpaqueBox], which hashes to a single shared
//!   constant and compares equal to any other box, leaving all
//!   deduplication to the separately retained key set.
//!
//! Both expose the same read-only surface: lookup, membership,
//! iteration, conversion back to a plain
//! [`HashMap`][std::collections::HashMap], equality against either
//! dicts or plain mappings, and a keys-only [`Hash`][std::hash::Hash].
//! Neither has any update operation; that's the point.
//!
//! Like the other collections in this family, the dict types are
//! generic over a [`BuildHasher`][std::hash::BuildHasher] and over an
//! [`archery`][archery] shared-pointer kind, with aliases fixing the
//! defaults ([`RandomState`][std::collections::hash_map::RandomState]
//! and atomic reference counting). Cloning a dict is O(1): clones
//! share the frozen containers.
//!
//! # Example
//!
//! ```
//! # #[macro_use] extern crate hashdict;
//! # use std::collections::HashMap;
//! # use hashdict::HashDict;
//! // Values are Vec<i32>, which is unhashable, yet the dict can key a map.
//! let config = hashdict!{"retries" => vec![1, 2, 3], "backoff" => vec![10]};
//! let mut memo: HashMap<HashDict<&str, Vec<i32>>, usize> = HashMap::new();
//! memo.insert(config.clone(), 42);
//! assert_eq!(Some(&42), memo.get(&config));
//! ```
//!
//! # Caveat
//!
//! Freezing is shallow. The dict never mutates what it holds, but it
//! cannot stop interior mutability inside a value from changing it
//! after insertion, and a value changed that way makes equality
//! disagree with the already-computed hash. Treat inserted values as
//! immutable.
//!
//! # Feature flags
//!
//! - `serde`: `Serialize`/`Deserialize` for both dict types.
//! - `proptest`: generation strategies in the [`proptest`] module.
//! - `quickcheck`: `quickcheck::Arbitrary` for both dict types.
//! - `arbitrary`: `arbitrary::Arbitrary` for both dict types.
//! - `triomphe`: use `triomphe::Arc` as the default shared pointer.
//!
//! [archery]: https://docs.rs/archery/latest/
//! [std::hash::Hash]: https://doc.rust-lang.org/std/hash/trait.Hash.html
//! [std::hash::BuildHasher]: https://doc.rust-lang.org/std/hash/trait.BuildHasher.html
//! [std::collections::HashMap]: https://doc.rust-lang.org/std/collections/struct.HashMap.html
//! [std::collections::hash_map::RandomState]: https://doc.rust-lang.org/std/collections/hash_map/struct.RandomState.html

#![warn(missing_docs)]

#[macro_use]
mod util;

mod boxed;
mod config;
mod dict;

mod builder;
mod error;
mod mapping;
pub mod shared_ptr;

#[cfg(any(test, feature = "proptest"))]
pub mod proptest;

#[cfg(feature = "arbitrary")]
mod arbitrary;
#[cfg(feature = "quickcheck")]
mod quickcheck;
#[cfg(any(test, feature = "serde"))]
mod ser;

/// An immutable dictionary hashed by its keys, with entries held in
/// key-identity boxes.
pub mod hashdict {
    pub use crate::dict::keyed::{
        ConsumingIter, GenericHashDict, HashDict, Iter, Keys, Values,
    };
}

/// An immutable dictionary hashed by its keys, with values held in
/// collision boxes.
pub mod frozendict {
    pub use crate::dict::opaque::{
        ConsumingIter, FrozenDict, GenericFrozenDict, Iter, Keys, Values,
    };
}

pub use crate::boxed::{KeyBox, OpaqueBox};
pub use crate::builder::DictBuilder;
pub use crate::error::Error;
pub use crate::frozendict::{FrozenDict, GenericFrozenDict};
pub use crate::hashdict::{GenericHashDict, HashDict};
pub use crate::mapping::Mapping;
