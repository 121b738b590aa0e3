//! Terminal operations: drive a cursor to a concrete result.
//!
//! Short-circuiting terminals (`first*`, `find`, `any`, `all`, `none`,
//! `element_at`) stop pulling as soon as the answer is known and send
//! `close()` upstream. The rest pull to exhaustion and never return on an
//! infinite cursor.

use std::collections::HashMap;
use std::fmt::{Display, Write};
use std::hash::Hash;

use crate::cursor::Cursor;
use crate::error::{SeqError, SeqResult};

/// Terminal operations, available on every sized [`Cursor`].
pub trait Terminal: Cursor + Sized {
    /// Every value, in order.
    fn to_list(mut self) -> SeqResult<Vec<Self::Item>> {
        let mut out = Vec::new();
        while let Some(value) = self.pull()? {
            out.push(value);
        }
        Ok(out)
    }

    /// The first value, or [`SeqError::EmptySequence`]. Pulls once.
    fn first(self) -> SeqResult<Self::Item> {
        self.first_or_none()?.ok_or(SeqError::EmptySequence)
    }

    fn first_or_none(mut self) -> SeqResult<Option<Self::Item>> {
        let first = self.pull()?;
        self.close();
        Ok(first)
    }

    /// The first value satisfying `predicate`, or
    /// [`SeqError::EmptySequence`].
    fn first_where<P>(self, predicate: P) -> SeqResult<Self::Item>
    where
        P: FnMut(&Self::Item) -> bool,
    {
        self.find(predicate)?.ok_or(SeqError::EmptySequence)
    }

    fn find<P>(mut self, mut predicate: P) -> SeqResult<Option<Self::Item>>
    where
        P: FnMut(&Self::Item) -> bool,
    {
        while let Some(value) = self.pull()? {
            if predicate(&value) {
                self.close();
                return Ok(Some(value));
            }
        }
        Ok(None)
    }

    /// Pulls until a value satisfies `predicate`: a match at index `i` costs
    /// exactly `i + 1` pulls.
    fn any<P>(self, predicate: P) -> SeqResult<bool>
    where
        P: FnMut(&Self::Item) -> bool,
    {
        Ok(self.find(predicate)?.is_some())
    }

    fn all<P>(self, mut predicate: P) -> SeqResult<bool>
    where
        P: FnMut(&Self::Item) -> bool,
    {
        Ok(self.find(|value| !predicate(value))?.is_none())
    }

    fn none<P>(self, predicate: P) -> SeqResult<bool>
    where
        P: FnMut(&Self::Item) -> bool,
    {
        Ok(!self.any(predicate)?)
    }

    fn count(mut self) -> SeqResult<usize> {
        let mut n = 0;
        while self.pull()?.is_some() {
            n += 1;
        }
        Ok(n)
    }

    fn count_where<P>(self, mut predicate: P) -> SeqResult<usize>
    where
        P: FnMut(&Self::Item) -> bool,
    {
        self.fold(0, |n, value| if predicate(&value) { n + 1 } else { n })
    }

    fn fold<B, F>(mut self, init: B, mut f: F) -> SeqResult<B>
    where
        F: FnMut(B, Self::Item) -> B,
    {
        let mut acc = init;
        while let Some(value) = self.pull()? {
            acc = f(acc, value);
        }
        Ok(acc)
    }

    /// Fold using the first value as the initial accumulator.
    fn reduce<F>(mut self, f: F) -> SeqResult<Self::Item>
    where
        F: FnMut(Self::Item, Self::Item) -> Self::Item,
    {
        let first = self.pull()?.ok_or(SeqError::EmptySequence)?;
        self.fold(first, f)
    }

    /// Largest value; the first one wins on ties.
    fn max(self) -> SeqResult<Option<Self::Item>>
    where
        Self::Item: Ord,
    {
        self.fold(None, |best, value| match best {
            Some(best) if best >= value => Some(best),
            _ => Some(value),
        })
    }

    /// Smallest value; the first one wins on ties.
    fn min(self) -> SeqResult<Option<Self::Item>>
    where
        Self::Item: Ord,
    {
        self.fold(None, |best, value| match best {
            Some(best) if best <= value => Some(best),
            _ => Some(value),
        })
    }

    fn max_by_key<K, F>(self, mut key: F) -> SeqResult<Option<Self::Item>>
    where
        K: Ord,
        F: FnMut(&Self::Item) -> K,
    {
        let best = self.fold(None, |best: Option<(K, Self::Item)>, value| {
            let k = key(&value);
            match best {
                Some((bk, bv)) if bk >= k => Some((bk, bv)),
                _ => Some((k, value)),
            }
        })?;
        Ok(best.map(|(_, value)| value))
    }

    fn min_by_key<K, F>(self, mut key: F) -> SeqResult<Option<Self::Item>>
    where
        K: Ord,
        F: FnMut(&Self::Item) -> K,
    {
        let best = self.fold(None, |best: Option<(K, Self::Item)>, value| {
            let k = key(&value);
            match best {
                Some((bk, bv)) if bk <= k => Some((bk, bv)),
                _ => Some((k, value)),
            }
        })?;
        Ok(best.map(|(_, value)| value))
    }

    fn last(self) -> SeqResult<Self::Item> {
        self.last_or_none()?.ok_or(SeqError::EmptySequence)
    }

    fn last_or_none(self) -> SeqResult<Option<Self::Item>> {
        self.fold(None, |_, value| Some(value))
    }

    /// Value at `index`; pulls `index + 1` values at most.
    fn element_at(mut self, index: usize) -> SeqResult<Option<Self::Item>> {
        let mut i = 0;
        while let Some(value) = self.pull()? {
            if i == index {
                self.close();
                return Ok(Some(value));
            }
            i += 1;
        }
        Ok(None)
    }

    fn join(self, separator: &str) -> SeqResult<String>
    where
        Self::Item: Display,
    {
        let (out, _) = self.fold((String::new(), true), |(mut out, first), value| {
            if !first {
                out.push_str(separator);
            }
            write!(out, "{}", value).ok();
            (out, false)
        })?;
        Ok(out)
    }

    /// `(matching, rest)`, each in original order.
    fn partition<P>(self, mut predicate: P) -> SeqResult<(Vec<Self::Item>, Vec<Self::Item>)>
    where
        P: FnMut(&Self::Item) -> bool,
    {
        self.fold((Vec::new(), Vec::new()), |(mut yes, mut no), value| {
            if predicate(&value) {
                yes.push(value);
            } else {
                no.push(value);
            }
            (yes, no)
        })
    }

    /// Values grouped by key, each group in original order.
    fn group_by<K, F>(self, mut key: F) -> SeqResult<HashMap<K, Vec<Self::Item>>>
    where
        K: Eq + Hash,
        F: FnMut(&Self::Item) -> K,
    {
        self.fold(HashMap::new(), |mut groups: HashMap<K, Vec<Self::Item>>, value| {
            groups.entry(key(&value)).or_default().push(value);
            groups
        })
    }
}

impl<C: Cursor> Terminal for C {}
