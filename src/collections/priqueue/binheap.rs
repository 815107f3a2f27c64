// Copyright (c) 2016, 2017, 2020, 2022 Frank Fischer <frank-fischer@shadow-soft.de>
//
// This program is free software: you can redistribute it and/or
// modify it under the terms of the GNU General Public License as
// published by the Free Software Foundation, either version 3 of the
// License, or (at your option) any later version.
//
// This program is distributed in the hope that it will be useful, but
// WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU
// General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see  <http://www.gnu.org/licenses/>
//

//! Indexed binary heap implementation

use super::{IndexPriQueue, QueueError};

/// Binary heap over a fixed universe of indices.
///
/// `heap` and `pos` are mutual inverses: `pos[heap[k]] == Some(k)` for
/// every heap position `k`, and `pos[i] == None` iff `i` is not in the heap.
/// This gives constant time membership tests and logarithmic updates.
///
/// # Example
///
/// ```
/// use rs_waypoint::collections::{IndexBinHeap, IndexPriQueue};
///
/// let mut heap = IndexBinHeap::new(4);
/// heap.insert(2, 7).unwrap();
/// heap.insert(0, 5).unwrap();
/// heap.decrease_or_insert(2, 3).unwrap();
/// heap.decrease_or_insert(3, 4).unwrap();
///
/// assert!(heap.contains(3));
/// assert!(!heap.contains(1));
/// assert_eq!(heap.pop_min(), Some((2, 3)));
/// assert_eq!(heap.pop_min(), Some((3, 4)));
/// assert_eq!(heap.pop_min(), Some((0, 5)));
/// assert_eq!(heap.pop_min(), None);
/// ```
#[derive(Clone, Debug)]
pub struct IndexBinHeap<V> {
    /// The indices in heap order.
    heap: Vec<usize>,
    /// Heap position of each index.
    pos: Vec<Option<usize>>,
    /// The value (priority) of each contained index.
    values: Vec<Option<V>>,
}

impl<V> IndexBinHeap<V> {
    /// Create an empty heap for the indices `0..capacity`.
    pub fn new(capacity: usize) -> Self {
        IndexBinHeap {
            heap: Vec::with_capacity(capacity),
            pos: vec![None; capacity],
            values: (0..capacity).map(|_| None).collect(),
        }
    }

    fn check_index(&self, index: usize) -> Result<(), QueueError> {
        if index < self.pos.len() {
            Ok(())
        } else {
            Err(QueueError::IndexOutOfRange {
                index,
                capacity: self.pos.len(),
            })
        }
    }
}

impl<V> IndexPriQueue<V> for IndexBinHeap<V>
where
    V: PartialOrd,
{
    fn capacity(&self) -> usize {
        self.pos.len()
    }

    fn len(&self) -> usize {
        self.heap.len()
    }

    fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    fn clear(&mut self) {
        for index in self.heap.drain(..) {
            self.pos[index] = None;
            self.values[index] = None;
        }
    }

    fn contains(&self, index: usize) -> bool {
        self.pos.get(index).map_or(false, Option::is_some)
    }

    fn value(&self, index: usize) -> Option<&V> {
        self.values.get(index).and_then(Option::as_ref)
    }

    fn insert(&mut self, index: usize, value: V) -> Result<(), QueueError> {
        self.check_index(index)?;
        if self.pos[index].is_some() {
            return Err(QueueError::AlreadyPresent(index));
        }
        self.values[index] = Some(value);
        self.pos[index] = Some(self.heap.len());
        self.heap.push(index);
        self.upheap(index);
        Ok(())
    }

    fn decrease_or_insert(&mut self, index: usize, value: V) -> Result<(), QueueError> {
        self.check_index(index)?;
        if self.pos[index].is_none() {
            return self.insert(index, value);
        }
        let decreases = match self.values[index] {
            Some(ref old) => value < *old,
            None => false,
        };
        if !decreases {
            return Err(QueueError::NotDecreasing(index));
        }
        self.values[index] = Some(value);
        self.upheap(index);
        Ok(())
    }

    fn pop_min(&mut self) -> Option<(usize, V)> {
        if self.heap.is_empty() {
            return None;
        }

        // remove the smallest element, the last one takes its place
        let min = self.heap.swap_remove(0);
        self.pos[min] = None;
        if let Some(&first) = self.heap.first() {
            self.pos[first] = Some(0);
            self.downheap(0);
        }
        self.values[min].take().map(|value| (min, value))
    }
}

impl<V> IndexBinHeap<V>
where
    V: PartialOrd,
{
    /// Move `index` up in the heap until its parent does not have a larger
    /// value or the root is reached.
    fn upheap(&mut self, index: usize) {
        let mut cur_pos = match self.pos[index] {
            Some(pos) => pos,
            None => return,
        };
        while cur_pos > 0 {
            let parent_pos = (cur_pos - 1) / 2;
            let parent = self.heap[parent_pos];
            // Equal values move up, too, so the element touched last is
            // preferred among ties.
            if self.values[index] > self.values[parent] {
                break;
            }
            self.heap[cur_pos] = parent;
            self.pos[parent] = Some(cur_pos);
            cur_pos = parent_pos;
        }
        self.heap[cur_pos] = index;
        self.pos[index] = Some(cur_pos);
    }

    /// Move the element at heap position `cur_pos` down until none of its
    /// children has a smaller value.
    fn downheap(&mut self, mut cur_pos: usize) {
        let n = self.heap.len();
        let index = self.heap[cur_pos];
        loop {
            let left_pos = 2 * cur_pos + 1;
            let right_pos = left_pos + 1;
            let next_pos = if left_pos >= n {
                break;
            } else if right_pos >= n || self.values[self.heap[left_pos]] < self.values[self.heap[right_pos]] {
                left_pos
            } else {
                right_pos
            };

            let next = self.heap[next_pos];
            if self.values[index] <= self.values[next] {
                break;
            }

            self.heap[cur_pos] = next;
            self.pos[next] = Some(cur_pos);
            cur_pos = next_pos;
        }
        self.heap[cur_pos] = index;
        self.pos[index] = Some(cur_pos);
    }

    #[cfg(test)]
    fn check_invariants(&self) {
        for (k, &index) in self.heap.iter().enumerate() {
            assert_eq!(self.pos[index], Some(k));
            assert!(self.values[index].is_some());
            if k > 0 {
                assert!(self.values[self.heap[(k - 1) / 2]] <= self.values[index]);
            }
        }
        let contained = self.pos.iter().filter(|p| p.is_some()).count();
        assert_eq!(contained, self.heap.len());
    }
}
