use std::collections::LinkedList;
use std::convert::TryFrom;
use std::ops::{Index, IndexMut};

/// This is a special vector implementation that has a O(1) remove function.
/// It never shrinks in size, but reuses available spaces as much as possible.
///
/// Values are addressed by the key returned from [`insert`](SparseVec::insert).
/// A key stays valid until its value is removed, after which it may be handed
/// out again.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct SparseVec<T, K = usize> {
    inner: Vec<Option<T>>,
    free_indices: LinkedList<K>,
    len: usize,
}

impl<T, K> Default for SparseVec<T, K> {
    fn default() -> Self {
        SparseVec {
            inner: Vec::new(),
            free_indices: LinkedList::new(),
            len: 0,
        }
    }
}

impl<T, K> SparseVec<T, K>
where
    K: Into<usize> + TryFrom<usize> + Copy,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of occupied slots.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn get(&self, index: K) -> Option<&T> {
        self.inner.get(index.into())?.as_ref()
    }

    pub fn get_mut(&mut self, index: K) -> Option<&mut T> {
        self.inner.get_mut(index.into())?.as_mut()
    }

    pub fn remove(&mut self, index: K) -> Option<T> {
        let value = self.inner.get_mut(index.into())?.take();
        if value.is_some() {
            self.free_indices.push_back(index);
            self.len -= 1;
        }
        value
    }

    /// Fails if the next index can't be represented as `K`. The vector is left
    /// unchanged in that case.
    pub fn insert(&mut self, value: T) -> Option<K> {
        let index = match self.free_indices.pop_front() {
            Some(index) => {
                self.inner[index.into()] = Some(value);
                index
            }
            None => {
                let index = K::try_from(self.inner.len()).ok()?;
                self.inner.push(Some(value));
                index
            }
        };
        self.len += 1;
        Some(index)
    }

    /// Drops all values and forgets every key handed out so far.
    pub fn clear(&mut self) {
        self.inner.clear();
        self.free_indices.clear();
        self.len = 0;
    }
}

impl<T, K> Index<K> for SparseVec<T, K>
where
    K: Into<usize> + TryFrom<usize> + Copy,
{
    type Output = T;

    fn index(&self, index: K) -> &T {
        self.get(index).expect("invalid SparseVec key")
    }
}

impl<T, K> IndexMut<K> for SparseVec<T, K>
where
    K: Into<usize> + TryFrom<usize> + Copy,
{
    fn index_mut(&mut self, index: K) -> &mut T {
        self.get_mut(index).expect("invalid SparseVec key")
    }
}
