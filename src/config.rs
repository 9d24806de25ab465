// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/// XOR mask applied to a boxed key's hash.
///
/// Separates the hash of a `KeyBox` from the hash of the bare key, so
/// the two never collide in a container holding both (e.g. nested
/// boxing).
pub(crate) const KEY_BOX_MASK: u64 = 0b101_0101_0101;

/// The hash shared by every `OpaqueBox`, regardless of contents.
pub(crate) const OPAQUE_BOX_HASH: u64 = 0;

/// Mixing seed for the order-independent key-set hash (golden ratio
/// constant). Per-key hashes are multiplied by this before being
/// folded, so that structured key sets don't degenerate under the
/// commutative fold.
pub(crate) const KEY_SET_SEED: u64 = 0x9E37_79B9_7F4A_7C15;
