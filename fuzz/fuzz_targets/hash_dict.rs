#![no_main]

use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap as NatMap;
use std::hash::{Hash, Hasher};

use libfuzzer_sys::fuzz_target;

use hashdict::HashDict;

fn hash_one<T: Hash>(value: &T) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

fuzz_target!(|pairs: Vec<(u16, u32)>| {
    let mut nat = NatMap::new();
    for (k, v) in &pairs {
        nat.insert(*k, *v);
    }
    let dict = HashDict::from(pairs.clone());
    assert_eq!(nat.len(), dict.len());
    for (k, v) in &nat {
        assert_eq!(Some(v), dict.get(k));
        assert!(dict.contains_key(k));
    }
    assert_eq!(dict, nat);
    assert_eq!(dict, HashDict::from(dict.to_hash_map()));
    // Reversing construction order keeps the key set, so hashes must
    // agree even where last-wins picks different values.
    let reversed = HashDict::from(pairs.iter().rev().cloned().collect::<Vec<_>>());
    assert_eq!(hash_one(&dict), hash_one(&reversed));
    assert_eq!(dict.iter().count(), nat.len());
    assert_eq!(dict.into_iter().count(), nat.len());
});
