// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::fmt;

/// Errors reported by dict construction and lookup.
///
/// These are programmer-usage errors: they surface synchronously at
/// the call that caused them and are never retried or swallowed.
///
/// There is no variant for an unhashable key. A key type without
/// `Hash + Eq` is rejected by the compiler, not at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// More than one mutually exclusive source of entries was supplied
    /// to [`DictBuilder`][crate::DictBuilder].
    ///
    /// [crate::DictBuilder]: ../struct.DictBuilder.html
    ConflictingSources,
    /// A point lookup asked for a key the dict does not contain.
    KeyNotFound,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::ConflictingSources => {
                write!(f, "more than one source of entries was supplied")
            }
            Error::KeyNotFound => write!(f, "key not found"),
        }
    }
}

impl std::error::Error for Error {}
