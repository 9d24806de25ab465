// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Multi-source dict construction.

use std::collections;
use std::hash::BuildHasher;
use std::iter::FromIterator;

use crate::error::Error;

/// A builder accepting entries from mutually exclusive sources.
///
/// A dict can be built from a positional source (a sequence of pairs
/// via [`pairs`][DictBuilder::pairs], or an existing plain mapping via
/// [`mapping`][DictBuilder::mapping]), or from individual
/// keyword-style [`entry`][DictBuilder::entry] calls. Mixing a
/// positional source with `entry` calls, or supplying two positional
/// sources, is a usage error: [`build`][DictBuilder::build] reports it
/// as [`Error::ConflictingSources`] and no dict escapes.
///
/// `build` collects into either dict variant (or anything else that
/// builds from pairs).
///
/// # Examples
///
/// ```
/// # #[macro_use] extern crate hashdict;
/// # use hashdict::{DictBuilder, Error, HashDict};
/// let dict: HashDict<&str, i32> = DictBuilder::new()
///     .entry("a", 1)
///     .entry("b", 2)
///     .build()
///     .unwrap();
/// assert_eq!(dict, hashdict!{"a" => 1, "b" => 2});
///
/// let clash: Result<HashDict<&str, i32>, _> = DictBuilder::new()
///     .pairs(vec![("a", 1)])
///     .entry("b", 2)
///     .build();
/// assert_eq!(Err(Error::ConflictingSources), clash);
/// ```
///
/// [DictBuilder::pairs]: #method.pairs
/// [DictBuilder::mapping]: #method.mapping
/// [DictBuilder::entry]: #method.entry
/// [DictBuilder::build]: #method.build
/// [`Error::ConflictingSources`]: ./enum.Error.html
#[must_use]
pub struct DictBuilder<K, V> {
    source: Option<Vec<(K, V)>>,
    named: Vec<(K, V)>,
    clashed: bool,
}

impl<K, V> DictBuilder<K, V> {
    /// Start a builder with no entries.
    pub fn new() -> Self {
        DictBuilder {
            source: None,
            named: Vec::new(),
            clashed: false,
        }
    }

    /// Supply the positional source: a sequence of key/value pairs.
    ///
    /// At most one positional source may be given.
    pub fn pairs<I>(mut self, iter: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
    {
        if self.source.is_some() {
            self.clashed = true;
        }
        self.source = Some(iter.into_iter().collect());
        self
    }

    /// Supply the positional source from an existing plain mapping,
    /// iterated as pairs.
    pub fn mapping<S>(self, map: collections::HashMap<K, V, S>) -> Self
    where
        S: BuildHasher,
    {
        self.pairs(map)
    }

    /// Add a single keyword-style entry.
    pub fn entry(mut self, key: K, value: V) -> Self {
        self.named.push((key, value));
        self
    }

    /// Build the dict, or fail if more than one source of entries was
    /// supplied. On failure nothing is constructed.
    ///
    /// Duplicate keys follow the usual rule: the last pair wins.
    pub fn build<D>(self) -> Result<D, Error>
    where
        D: FromIterator<(K, V)>,
    {
        if self.clashed || (self.source.is_some() && !self.named.is_empty()) {
            return Err(Error::ConflictingSources);
        }
        let pairs = match self.source {
            Some(pairs) => pairs,
            None => self.named,
        };
        Ok(pairs.into_iter().collect())
    }
}

impl<K, V> Default for DictBuilder<K, V> {
    fn default() -> Self {
        Self::new()
    }
}
