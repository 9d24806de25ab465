use crate::shared_ptr::SharedPointerKind;
use crate::{GenericFrozenDict, GenericHashDict};
use ::quickcheck::{Arbitrary, Gen};
use std::hash::{BuildHasher, Hash};
use std::iter::FromIterator;

impl<K, V, S, P> Arbitrary for GenericHashDict<K, V, S, P>
where
    K: Hash + Eq + Clone + Arbitrary + Sync,
    V: Clone + Arbitrary + Sync,
    S: BuildHasher + Default + Clone + Send + Sync + 'static,
    P: SharedPointerKind + 'static,
{
    fn arbitrary(g: &mut Gen) -> Self {
        GenericHashDict::from_iter(Vec::<(K, V)>::arbitrary(g))
    }
}

impl<K, V, S, P> Arbitrary for GenericFrozenDict<K, V, S, P>
where
    K: Hash + Eq + Clone + Arbitrary + Sync,
    V: Clone + Arbitrary + Sync,
    S: BuildHasher + Default + Clone + Send + Sync + 'static,
    P: SharedPointerKind + 'static,
{
    fn arbitrary(g: &mut Gen) -> Self {
        GenericFrozenDict::from_iter(Vec::<(K, V)>::arbitrary(g))
    }
}
