/*
 * Copyright (c) 2018, 2022 Frank Fischer <frank-fischer@shadow-soft.de>
 *
 * This program is free software: you can redistribute it and/or
 * modify it under the terms of the GNU General Public License as
 * published by the Free Software Foundation, either version 3 of the
 * License, or (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful, but
 * WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU
 * General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with this program.  If not, see  <http://www.gnu.org/licenses/>
 */

mod binheap;
pub use self::binheap::IndexBinHeap;

/// Violation of the contract of an indexed priority queue.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueueError {
    #[error("index {index} is out of range 0..{capacity}")]
    IndexOutOfRange { index: usize, capacity: usize },

    #[error("index {0} is already in the priority queue")]
    AlreadyPresent(usize),

    /// The new value of an index is not smaller than its current value.
    #[error("new value of index {0} does not decrease its priority")]
    NotDecreasing(usize),
}

/// A min-priority queue over the fixed index universe `0..capacity`.
///
/// Each index is contained at most once and carries a mutable value
/// (its priority).
pub trait IndexPriQueue<V> {
    /// Return the size of the index universe.
    fn capacity(&self) -> usize;

    /// Return the number of indices in the queue.
    fn len(&self) -> usize;

    /// Return `true` iff the queue contains no element.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Remove all elements from the queue.
    fn clear(&mut self);

    /// Return `true` iff `index` is currently in the queue.
    fn contains(&self, index: usize) -> bool;

    /// Return the current value of `index` or `None` if it is not in the queue.
    fn value(&self, index: usize) -> Option<&V>;

    /// Push `index` with the given `value` onto the queue.
    ///
    /// Fails if the index is already contained.
    fn insert(&mut self, index: usize, value: V) -> Result<(), QueueError>;

    /// Push `index` if it is not contained, otherwise decrease its value.
    ///
    /// Fails if the index is contained and `value` is not smaller than its
    /// current value.
    fn decrease_or_insert(&mut self, index: usize, value: V) -> Result<(), QueueError>;

    /// Remove and return the index with the smallest value or `None` if the
    /// queue is empty.
    ///
    /// Ties are broken arbitrarily.
    fn pop_min(&mut self) -> Option<(usize, V)>;
}

impl<'a, P, V> IndexPriQueue<V> for &'a mut P
where
    P: IndexPriQueue<V>,
{
    fn capacity(&self) -> usize {
        (**self).capacity()
    }

    fn len(&self) -> usize {
        (**self).len()
    }

    fn is_empty(&self) -> bool {
        (**self).is_empty()
    }

    fn clear(&mut self) {
        (**self).clear()
    }

    fn contains(&self, index: usize) -> bool {
        (**self).contains(index)
    }

    fn value(&self, index: usize) -> Option<&V> {
        (**self).value(index)
    }

    fn insert(&mut self, index: usize, value: V) -> Result<(), QueueError> {
        (**self).insert(index, value)
    }

    fn decrease_or_insert(&mut self, index: usize, value: V) -> Result<(), QueueError> {
        (**self).decrease_or_insert(index, value)
    }

    fn pop_min(&mut self) -> Option<(usize, V)> {
        (**self).pop_min()
    }
}
