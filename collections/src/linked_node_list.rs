//! A doubly-linked list whose nodes live in an arena.
//!
//! Nodes are owned by a [`SparseVec`] and refer to their neighbours through
//! [`NodeHandle`]s instead of pointers. Unlinking a node removes it from the
//! arena, which drops its element and frees the handle for reuse. No link can
//! outlive the node it points to.
//!
//! Pushing at either end is O(1). Positional access walks from the head and
//! is O(n).

use std::cmp::Ordering;
use std::convert::TryFrom;
use std::fmt;

use crate::error::SequenceError;
use crate::sequence::Sequence;
use crate::sparse_vec::SparseVec;

/// Stable reference to a node in the arena of a [`LinkedNodeList`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeHandle(u32);

impl From<NodeHandle> for usize {
    fn from(handle: NodeHandle) -> usize {
        handle.0 as usize
    }
}

impl TryFrom<usize> for NodeHandle {
    type Error = std::num::TryFromIntError;

    fn try_from(index: usize) -> Result<Self, Self::Error> {
        u32::try_from(index).map(NodeHandle)
    }
}

#[derive(Clone)]
struct Node<T> {
    element: T,
    prev: Option<NodeHandle>,
    next: Option<NodeHandle>,
}

/// A doubly-linked list with arena-owned nodes.
///
/// # Examples
///
/// ```
/// use seqlist_collections::{LinkedNodeList, Sequence};
///
/// let mut list: LinkedNodeList<&str> = LinkedNodeList::new();
/// list.add("b").unwrap();
/// list.insert(0, "a").unwrap();
/// list.add("c").unwrap();
///
/// assert_eq!(list.first(), Some(&"a"));
/// assert_eq!(list.last(), Some(&"c"));
/// assert_eq!(list.get(1), Ok(&"b"));
/// ```
#[derive(Clone)]
pub struct LinkedNodeList<T> {
    nodes: SparseVec<Node<T>, NodeHandle>,
    head: Option<NodeHandle>,
    last: Option<NodeHandle>,
    size: usize,
}

impl<T> LinkedNodeList<T> {
    /// Creates an empty `LinkedNodeList`.
    #[inline]
    pub fn new() -> Self {
        LinkedNodeList {
            nodes: SparseVec::new(),
            head: None,
            last: None,
            size: 0,
        }
    }

    /// Returns the first element, or `None` if the list is empty.
    #[inline]
    pub fn first(&self) -> Option<&T> {
        self.head.map(|handle| &self.nodes[handle].element)
    }

    /// Returns the last element, or `None` if the list is empty.
    #[inline]
    pub fn last(&self) -> Option<&T> {
        self.last.map(|handle| &self.nodes[handle].element)
    }

    /// Adds an element in front of the current head.
    ///
    /// This operation computes in O(1) time.
    pub fn push_front(&mut self, element: T) -> Result<(), SequenceError> {
        let handle = self.allocate(element, None, self.head)?;
        match self.head {
            Some(head) => self.nodes[head].prev = Some(handle),
            None => self.last = Some(handle),
        }
        self.head = Some(handle);
        self.size += 1;
        Ok(())
    }

    /// Adds an element after the current last node.
    ///
    /// This operation computes in O(1) time.
    pub fn push_back(&mut self, element: T) -> Result<(), SequenceError> {
        let handle = self.allocate(element, self.last, None)?;
        match self.last {
            Some(last) => self.nodes[last].next = Some(handle),
            None => self.head = Some(handle),
        }
        self.last = Some(handle);
        self.size += 1;
        Ok(())
    }

    fn allocate(
        &mut self,
        element: T,
        prev: Option<NodeHandle>,
        next: Option<NodeHandle>,
    ) -> Result<NodeHandle, SequenceError> {
        self.nodes
            .insert(Node {
                element,
                prev,
                next,
            })
            .ok_or(SequenceError::CapacityExceeded)
    }

    /// Walks `index` steps from the head.
    fn node_at(&self, index: usize) -> Option<NodeHandle> {
        let mut cursor = self.head;
        for _ in 0..index {
            cursor = self.nodes[cursor?].next;
        }
        cursor
    }

    /// Splices the node out of the chain and drops it from the arena.
    fn unlink(&mut self, handle: NodeHandle) -> Option<T> {
        let node = self.nodes.remove(handle)?;

        match node.prev {
            Some(prev) => self.nodes[prev].next = node.next,
            None => self.head = node.next,
        }
        match node.next {
            Some(next) => self.nodes[next].prev = node.prev,
            None => self.last = node.prev,
        }

        self.size -= 1;
        Some(node.element)
    }

    /// Handles of all nodes in list order.
    fn handles(&self) -> Vec<NodeHandle> {
        let mut handles = Vec::with_capacity(self.size);
        let mut cursor = self.head;
        while let Some(handle) = cursor {
            handles.push(handle);
            cursor = self.nodes[handle].next;
        }
        handles
    }

    /// Rebuilds the chain so that it visits the nodes in the order of `handles`.
    fn relink(&mut self, handles: &[NodeHandle]) {
        for (i, &handle) in handles.iter().enumerate() {
            let node = &mut self.nodes[handle];
            node.prev = i.checked_sub(1).map(|prev| handles[prev]);
            node.next = handles.get(i + 1).copied();
        }
        self.head = handles.first().copied();
        self.last = handles.last().copied();
    }

    fn elements(&self) -> impl Iterator<Item = &T> + '_ {
        let mut cursor = self.head;
        std::iter::from_fn(move || {
            let node = &self.nodes[cursor?];
            cursor = node.next;
            Some(&node.element)
        })
    }
}

impl<T> Sequence<T> for LinkedNodeList<T> {
    fn add<E>(&mut self, element: E) -> Result<bool, SequenceError>
    where
        E: Into<Option<T>>,
    {
        let element = element.into().ok_or(SequenceError::InvalidArgument)?;
        self.push_back(element)?;
        Ok(true)
    }

    fn insert<E>(&mut self, index: usize, element: E) -> Result<(), SequenceError>
    where
        E: Into<Option<T>>,
    {
        let element = element.into().ok_or(SequenceError::InvalidArgument)?;
        SequenceError::check_position_index(index, self.size)?;

        if index == 0 {
            return self.push_front(element);
        }
        if index == self.size {
            return self.push_back(element);
        }

        let out_of_range = SequenceError::IndexOutOfRange {
            index,
            size: self.size,
        };
        let current = self.node_at(index).ok_or_else(|| out_of_range.clone())?;
        let prev = self.nodes[current].prev.ok_or(out_of_range)?;

        let handle = self.allocate(element, Some(prev), Some(current))?;
        self.nodes[prev].next = Some(handle);
        self.nodes[current].prev = Some(handle);
        self.size += 1;
        Ok(())
    }

    fn get(&self, index: usize) -> Result<&T, SequenceError> {
        SequenceError::check_element_index(index, self.size)?;
        self.node_at(index)
            .map(|handle| &self.nodes[handle].element)
            .ok_or(SequenceError::IndexOutOfRange {
                index,
                size: self.size,
            })
    }

    fn remove<'a, E>(&mut self, element: E) -> Result<bool, SequenceError>
    where
        T: PartialEq + 'a,
        E: Into<Option<&'a T>>,
    {
        let element = element.into().ok_or(SequenceError::InvalidArgument)?;

        let mut cursor = self.head;
        while let Some(handle) = cursor {
            let node = &self.nodes[handle];
            if node.element == *element {
                self.unlink(handle);
                return Ok(true);
            }
            cursor = node.next;
        }
        Ok(false)
    }

    fn clear(&mut self) {
        log::debug!(size = self.size, "Clearing linked list");
        self.nodes.clear();
        self.head = None;
        self.last = None;
        self.size = 0;
    }

    /// Sorts the nodes with a comparator function.
    ///
    /// Elements stay where they are in the arena, only the links are
    /// rewritten. The sort is stable.
    fn sort_by<F>(&mut self, mut compare: F)
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        log::trace!(size = self.size, "Sorting linked list");

        let mut handles = self.handles();
        let nodes = &self.nodes;
        handles.sort_by(|&a, &b| compare(&nodes[a].element, &nodes[b].element));
        self.relink(&handles);
    }

    #[inline]
    fn len(&self) -> usize {
        self.size
    }

    fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        let mut elements = Vec::with_capacity(self.size);
        elements.extend(self.elements().cloned());
        elements
    }
}

impl<T> Default for LinkedNodeList<T> {
    /// Creates an empty `LinkedNodeList<T>`.
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for LinkedNodeList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.elements()).finish()
    }
}

impl<T: PartialEq> PartialEq for LinkedNodeList<T> {
    fn eq(&self, other: &Self) -> bool {
        self.size == other.size && self.elements().eq(other.elements())
    }
}

impl<T: Eq> Eq for LinkedNodeList<T> {}

#[cfg(feature = "serde-derive")]
mod serde_derive {
    use std::fmt;
    use std::marker::PhantomData;

    use serde::{
        de::{Deserialize, Deserializer, Error, SeqAccess, Visitor},
        ser::{Serialize, SerializeSeq, Serializer},
    };

    use super::LinkedNodeList;
    use crate::sequence::Sequence;

    impl<T: Serialize> Serialize for LinkedNodeList<T> {
        fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            let mut seq = serializer.serialize_seq(Some(self.size))?;

            for elem in self.elements() {
                seq.serialize_element(elem)?;
            }

            seq.end()
        }
    }

    impl<'de, T: Deserialize<'de>> Deserialize<'de> for LinkedNodeList<T> {
        fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where
            D: Deserializer<'de>,
        {
            deserializer.deserialize_seq(LinkedNodeListVisitor(PhantomData))
        }
    }

    struct LinkedNodeListVisitor<T>(PhantomData<T>);

    impl<'de, T: Deserialize<'de>> Visitor<'de> for LinkedNodeListVisitor<T> {
        type Value = LinkedNodeList<T>;

        fn expecting(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
            write!(f, "a sequence of elements")
        }

        fn visit_seq<A>(self, mut seq: A) -> Result<LinkedNodeList<T>, A::Error>
        where
            A: SeqAccess<'de>,
        {
            let mut list = LinkedNodeList::new();

            while let Some(elem) = seq.next_element::<Option<T>>()? {
                list.add(elem).map_err(A::Error::custom)?;
            }

            Ok(list)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    impl<T> LinkedNodeList<T> {
        /// Asserts that the forward and backward chains agree with each other and with `size`.
        fn assert_links(&self) {
            assert_eq!(self.nodes.len(), self.size);
            match (self.head, self.last) {
                (None, None) => assert_eq!(self.size, 0),
                (Some(head), Some(last)) => {
                    assert_eq!(self.nodes[head].prev, None);
                    assert_eq!(self.nodes[last].next, None);
                }
                _ => panic!("head and last disagree on emptiness"),
            }

            let forward = self.handles();
            assert_eq!(forward.len(), self.size);
            for pair in forward.windows(2) {
                assert_eq!(self.nodes[pair[1]].prev, Some(pair[0]));
            }

            let mut backward = Vec::new();
            let mut cursor = self.last;
            while let Some(handle) = cursor {
                backward.push(handle);
                cursor = self.nodes[handle].prev;
            }
            backward.reverse();
            assert_eq!(forward, backward);
        }
    }

    fn sample_list() -> LinkedNodeList<i32> {
        let mut list = LinkedNodeList::new();
        for i in 0..4 {
            list.add(i).unwrap();
        }
        list
    }

    #[test]
    fn it_keeps_links_consistent_when_splicing() {
        let mut list = sample_list();
        list.insert(2, 10).unwrap();
        list.assert_links();
        list.insert(0, 20).unwrap();
        list.assert_links();
        list.insert(list.len(), 30).unwrap();
        list.assert_links();
        assert_eq!(list.to_vec(), vec![20, 0, 1, 10, 2, 3, 30]);

        assert!(list.remove(&20).unwrap());
        list.assert_links();
        assert!(list.remove(&30).unwrap());
        list.assert_links();
        assert!(list.remove(&10).unwrap());
        list.assert_links();
        assert_eq!(list.to_vec(), vec![0, 1, 2, 3]);
        assert_eq!(list.first(), Some(&0));
        assert_eq!(list.last(), Some(&3));
    }

    #[test]
    fn it_empties_when_removing_the_only_node() {
        let mut list: LinkedNodeList<i32> = LinkedNodeList::new();
        list.add(5).unwrap();
        assert!(list.remove(&5).unwrap());
        list.assert_links();
        assert!(list.is_empty());
        assert_eq!(list.first(), None);
        assert_eq!(list.last(), None);

        list.insert(0, 6).unwrap();
        list.assert_links();
        assert_eq!(list.first(), Some(&6));
        assert_eq!(list.last(), Some(&6));
    }

    #[test]
    fn it_reuses_freed_handles() {
        let mut list = sample_list();
        list.remove(&1).unwrap();
        list.remove(&2).unwrap();
        list.add(4).unwrap();
        list.add(5).unwrap();
        list.add(6).unwrap();

        // Two freed slots were reused, one new slot was appended.
        assert_eq!(list.nodes.len(), 5);
        assert!(list.nodes.get(NodeHandle(4)).is_some());
        assert!(list.nodes.get(NodeHandle(5)).is_none());
        list.assert_links();
        assert_eq!(list.to_vec(), vec![0, 3, 4, 5, 6]);
    }

    #[test]
    fn it_relinks_nodes_when_sorting() {
        let mut list: LinkedNodeList<i32> = LinkedNodeList::new();
        for i in [5, 3, 9, 1, 7] {
            list.add(i).unwrap();
        }
        let head_before = list.head;

        list.sort();
        list.assert_links();
        assert_eq!(list.to_vec(), vec![1, 3, 5, 7, 9]);
        assert_eq!(list.first(), Some(&1));
        assert_eq!(list.last(), Some(&9));
        // The node holding 5 is still in the arena, now in the middle of the chain.
        assert_eq!(list.node_at(2), head_before);
    }

    #[test]
    fn it_resets_on_clear() {
        let mut list = sample_list();
        list.clear();
        list.assert_links();
        assert_eq!(list.len(), 0);
        assert_eq!(list.to_vec(), Vec::<i32>::new());

        list.add(1).unwrap();
        list.assert_links();
        assert_eq!(list.to_vec(), vec![1]);
    }

    #[test]
    fn it_walks_to_positions() {
        let list = sample_list();
        assert_eq!(list.get(0), Ok(&0));
        assert_eq!(list.get(3), Ok(&3));
        assert_eq!(
            list.get(4),
            Err(SequenceError::IndexOutOfRange { index: 4, size: 4 })
        );
        assert_eq!(format!("{:?}", list), "[0, 1, 2, 3]");
    }
}
