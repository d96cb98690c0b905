//! A growable list backed by one contiguous buffer.
//!
//! The buffer is an owned boxed slice of slots. Its length is the capacity of
//! the list, the first `size` slots hold the elements in order and every slot
//! after them is empty. When an element is added to a full buffer the
//! capacity doubles, which keeps appending at amortized O(1). Inserting or
//! removing anywhere but the end shifts the tail of the buffer by one slot.
//!
//! The capacity never shrinks, except that [`clear`](Sequence::clear) hands
//! the whole buffer back and starts over with the configured initial capacity.

use std::cmp::Ordering;
use std::fmt;

use crate::config::{ListConfig, DEFAULT_CAPACITY};
use crate::error::SequenceError;
use crate::sequence::Sequence;

/// A list storing its elements in one growable buffer.
///
/// # Examples
///
/// ```
/// use seqlist_collections::{ContiguousList, Sequence};
///
/// let mut list: ContiguousList<i32> = ContiguousList::new();
/// list.add(1).unwrap();
/// list.add(3).unwrap();
/// list.insert(1, 2).unwrap();
///
/// assert_eq!(list.get(1), Ok(&2));
/// assert_eq!(list.to_vec(), vec![1, 2, 3]);
/// ```
pub struct ContiguousList<T> {
    buffer: Box<[Option<T>]>,
    size: usize,
    config: ListConfig,
}

impl<T> ContiguousList<T> {
    /// Creates an empty list with the default initial capacity.
    pub fn new() -> Self {
        Self::with_config(ListConfig::default())
    }

    /// Creates an empty list that can hold `capacity` elements before it grows.
    ///
    /// The capacity only applies to this first buffer, a cleared list starts
    /// over with [`DEFAULT_CAPACITY`].
    pub fn with_capacity(capacity: usize) -> Self {
        ContiguousList {
            buffer: allocate(capacity),
            size: 0,
            config: ListConfig::default(),
        }
    }

    pub fn with_config(config: ListConfig) -> Self {
        ContiguousList {
            buffer: allocate(config.initial_capacity),
            size: 0,
            config,
        }
    }

    /// Returns the number of elements the list can hold without growing.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.buffer.len()
    }

    /// Returns the position of the first element equal to `element`.
    pub fn index_of(&self, element: &T) -> Option<usize>
    where
        T: PartialEq,
    {
        self.live()
            .iter()
            .position(|slot| slot.as_ref() == Some(element))
    }

    #[inline]
    fn live(&self) -> &[Option<T>] {
        &self.buffer[..self.size]
    }

    fn grow_if_full(&mut self) {
        if self.size < self.buffer.len() {
            return;
        }

        let old_capacity = self.buffer.len();
        let new_capacity = if old_capacity == 0 {
            DEFAULT_CAPACITY
        } else {
            old_capacity.saturating_mul(2)
        };
        log::trace!(old_capacity, new_capacity, "Growing list buffer");

        let mut buffer = allocate(new_capacity);
        for (new_slot, old_slot) in buffer.iter_mut().zip(self.buffer.iter_mut()) {
            *new_slot = old_slot.take();
        }
        self.buffer = buffer;
    }

    /// Removes the element at `index` and closes the gap. `index` must be live.
    fn remove_at(&mut self, index: usize) -> Option<T> {
        let removed = self.buffer[index].take();
        for i in index + 1..self.size {
            self.buffer[i - 1] = self.buffer[i].take();
        }
        // The slot at `size - 1` was emptied by the last `take()`.
        self.size -= 1;
        removed
    }
}

impl<T> Sequence<T> for ContiguousList<T> {
    fn add<E>(&mut self, element: E) -> Result<bool, SequenceError>
    where
        E: Into<Option<T>>,
    {
        let element = element.into().ok_or(SequenceError::InvalidArgument)?;

        self.grow_if_full();
        self.buffer[self.size] = Some(element);
        self.size += 1;
        Ok(true)
    }

    fn insert<E>(&mut self, index: usize, element: E) -> Result<(), SequenceError>
    where
        E: Into<Option<T>>,
    {
        let element = element.into().ok_or(SequenceError::InvalidArgument)?;
        SequenceError::check_position_index(index, self.size)?;

        if index == self.size {
            return self.add(element).map(|_| ());
        }

        self.grow_if_full();
        // Walk from the high end down so no slot is overwritten before it moved.
        for i in (index..self.size).rev() {
            self.buffer[i + 1] = self.buffer[i].take();
        }
        self.buffer[index] = Some(element);
        self.size += 1;
        Ok(())
    }

    fn get(&self, index: usize) -> Result<&T, SequenceError> {
        SequenceError::check_element_index(index, self.size)?;
        self.buffer[index]
            .as_ref()
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

        match self.index_of(element) {
            Some(index) => {
                self.remove_at(index);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn clear(&mut self) {
        log::debug!(
            size = self.size,
            capacity = self.config.initial_capacity,
            "Clearing list"
        );
        self.buffer = allocate(self.config.initial_capacity);
        self.size = 0;
    }

    fn sort_by<F>(&mut self, mut compare: F)
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        // `sort_by` on slices is a stable merge sort.
        self.buffer[..self.size].sort_by(|a, b| match (a, b) {
            (Some(a), Some(b)) => compare(a, b),
            _ => unreachable!("live slots are always occupied"),
        });
    }

    #[inline]
    fn len(&self) -> usize {
        self.size
    }

    fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.live().iter().flatten().cloned().collect()
    }
}

fn allocate<T>(capacity: usize) -> Box<[Option<T>]> {
    (0..capacity).map(|_| None).collect()
}

impl<T> Default for ContiguousList<T> {
    /// Creates an empty `ContiguousList<T>`.
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for ContiguousList<T> {
    fn clone(&self) -> Self {
        ContiguousList {
            buffer: self.buffer.clone(),
            size: self.size,
            config: self.config,
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for ContiguousList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.live().iter().flatten()).finish()
    }
}

impl<T: PartialEq> PartialEq for ContiguousList<T> {
    fn eq(&self, other: &Self) -> bool {
        self.live() == other.live()
    }
}

impl<T: Eq> Eq for ContiguousList<T> {}

#[cfg(feature = "serde-derive")]
mod serde_derive {
    use std::fmt;
    use std::marker::PhantomData;

    use serde::{
        de::{Deserialize, Deserializer, Error, SeqAccess, Visitor},
        ser::{Serialize, SerializeSeq, Serializer},
    };

    use super::ContiguousList;
    use crate::sequence::Sequence;

    impl<T: Serialize> Serialize for ContiguousList<T> {
        fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            let mut seq = serializer.serialize_seq(Some(self.size))?;

            for elem in self.live().iter().flatten() {
                seq.serialize_element(elem)?;
            }

            seq.end()
        }
    }

    impl<'de, T: Deserialize<'de>> Deserialize<'de> for ContiguousList<T> {
        fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where
            D: Deserializer<'de>,
        {
            deserializer.deserialize_seq(ContiguousListVisitor(PhantomData))
        }
    }

    const MAX_PREALLOCATION: usize = 4096;

    struct ContiguousListVisitor<T>(PhantomData<T>);

    impl<'de, T: Deserialize<'de>> Visitor<'de> for ContiguousListVisitor<T> {
        type Value = ContiguousList<T>;

        fn expecting(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
            write!(f, "a sequence of elements")
        }

        fn visit_seq<A>(self, mut seq: A) -> Result<ContiguousList<T>, A::Error>
        where
            A: SeqAccess<'de>,
        {
            // The hint comes from the input, don't trust it beyond a sane bound.
            let mut list = match seq.size_hint() {
                Some(len) => ContiguousList::with_capacity(len.min(MAX_PREALLOCATION)),
                None => ContiguousList::new(),
            };

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

    fn sample_list() -> ContiguousList<i32> {
        let mut list = ContiguousList::new();
        for i in 0..4 {
            list.add(i).unwrap();
        }
        list
    }

    #[test]
    fn it_doubles_capacity_when_full() {
        let mut list: ContiguousList<i32> = ContiguousList::with_capacity(2);
        list.add(1).unwrap();
        list.add(2).unwrap();
        assert_eq!(list.capacity(), 2);

        list.add(3).unwrap();
        assert_eq!(list.capacity(), 4);
        list.insert(0, 0).unwrap();
        assert_eq!(list.capacity(), 4);
        list.insert(2, 9).unwrap();
        assert_eq!(list.capacity(), 8);
        assert_eq!(list.to_vec(), vec![0, 1, 9, 2, 3]);
    }

    #[test]
    fn it_grows_from_zero_capacity() {
        let mut list: ContiguousList<i32> = ContiguousList::with_capacity(0);
        assert_eq!(list.capacity(), 0);
        list.insert(0, 42).unwrap();
        assert_eq!(list.capacity(), DEFAULT_CAPACITY);
        assert_eq!(list.get(0), Ok(&42));
    }

    #[test]
    fn it_keeps_trailing_slots_empty() {
        let mut list = sample_list();
        assert!(list.remove(&0).unwrap());
        assert!(list.remove(&3).unwrap());

        assert_eq!(list.len(), 2);
        assert!(list.buffer[..2].iter().all(Option::is_some));
        assert!(list.buffer[2..].iter().all(Option::is_none));
    }

    #[test]
    fn it_resets_capacity_on_clear() {
        let config = ListConfig::default().with_initial_capacity(4);
        let mut list: ContiguousList<i32> = ContiguousList::with_config(config);
        for i in 0..20 {
            list.add(i).unwrap();
        }
        assert_eq!(list.capacity(), 32);

        list.clear();
        assert_eq!(list.len(), 0);
        assert_eq!(list.capacity(), 4);

        let mut list: ContiguousList<i32> = ContiguousList::with_capacity(64);
        list.add(1).unwrap();
        list.clear();
        assert_eq!(list.capacity(), DEFAULT_CAPACITY);
    }

    #[test]
    fn it_validates_before_mutating() {
        let mut list: ContiguousList<i32> = ContiguousList::with_capacity(4);
        for i in 0..4 {
            list.add(i).unwrap();
        }

        assert_eq!(
            list.insert(6, 1),
            Err(SequenceError::IndexOutOfRange { index: 6, size: 4 })
        );
        assert_eq!(list.insert(1, None), Err(SequenceError::InvalidArgument));
        assert_eq!(list.capacity(), 4);
        assert_eq!(list.to_vec(), vec![0, 1, 2, 3]);
    }

    #[test]
    fn it_finds_first_occurrence() {
        let mut list = sample_list();
        list.add(1).unwrap();
        assert_eq!(list.index_of(&1), Some(1));
        assert_eq!(list.index_of(&5), None);
    }

    #[test]
    fn it_compares_independent_of_capacity() {
        let mut a: ContiguousList<i32> = ContiguousList::with_capacity(1);
        let mut b: ContiguousList<i32> = ContiguousList::with_capacity(100);
        for i in 0..3 {
            a.add(i).unwrap();
            b.add(i).unwrap();
        }
        assert_eq!(a, b);
        assert_eq!(format!("{:?}", a), "[0, 1, 2]");

        b.remove(&2).unwrap();
        assert_ne!(a, b);
    }

    #[cfg(feature = "serde-derive")]
    #[test]
    fn it_caps_preallocation_from_length_hints() {
        use serde::de::{
            value::{Error as ValueError, SeqDeserializer},
            Deserialize,
        };

        /// Yields nothing while claiming a huge length.
        struct Claiming(usize);

        impl Iterator for Claiming {
            type Item = i32;

            fn next(&mut self) -> Option<i32> {
                None
            }

            fn size_hint(&self) -> (usize, Option<usize>) {
                (self.0, Some(self.0))
            }
        }

        let deserializer = SeqDeserializer::<_, ValueError>::new(Claiming(usize::MAX / 4));
        let list = ContiguousList::<i32>::deserialize(deserializer).unwrap();
        assert!(list.is_empty());
        assert!(list.capacity() <= 4096);

        let deserializer = SeqDeserializer::<_, ValueError>::new(Claiming(3));
        let list = ContiguousList::<i32>::deserialize(deserializer).unwrap();
        assert!(list.is_empty());
        assert_eq!(list.capacity(), 3);
    }
}
