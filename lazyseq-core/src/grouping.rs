//! Lazy grouping: key extraction is attached now, aggregation happens when a
//! terminal runs.

use std::collections::HashMap;
use std::hash::Hash;

use crate::cursor::Cursor;
use crate::error::SeqResult;

/// Returned by [`Cursor::grouping_by`]. Holds the cursor unpulled.
pub struct Grouping<C, F> {
    cursor: C,
    key: F,
}

impl<C, F> Grouping<C, F> {
    pub(crate) fn new(cursor: C, key: F) -> Self {
        Self { cursor, key }
    }
}

impl<K, C, F> Grouping<C, F>
where
    C: Cursor,
    F: FnMut(&C::Item) -> K,
    K: Eq + Hash,
{
    /// Number of values per key.
    pub fn each_count(self) -> SeqResult<HashMap<K, usize>> {
        self.fold(|_| 0, |n, _| n + 1)
    }

    /// Per-key fold; `init` builds the starting accumulator the first time a
    /// key is seen.
    pub fn fold<A, I, Op>(mut self, mut init: I, mut op: Op) -> SeqResult<HashMap<K, A>>
    where
        I: FnMut(&K) -> A,
        Op: FnMut(A, C::Item) -> A,
    {
        let mut groups = HashMap::new();
        while let Some(value) = self.cursor.pull()? {
            let k = (self.key)(&value);
            let acc = match groups.remove(&k) {
                Some(acc) => acc,
                None => init(&k),
            };
            let acc = op(acc, value);
            groups.insert(k, acc);
        }
        Ok(groups)
    }

    /// Per-key reduce; the first value of each key is its accumulator.
    pub fn reduce<Op>(mut self, mut op: Op) -> SeqResult<HashMap<K, C::Item>>
    where
        Op: FnMut(&K, C::Item, C::Item) -> C::Item,
    {
        let mut groups: HashMap<K, C::Item> = HashMap::new();
        while let Some(value) = self.cursor.pull()? {
            let k = (self.key)(&value);
            let merged = match groups.remove(&k) {
                Some(acc) => op(&k, acc, value),
                None => value,
            };
            groups.insert(k, merged);
        }
        Ok(groups)
    }
}
