use std::cmp::Ordering;

use crate::error::SequenceError;

/// An ordered, index-addressable collection.
///
/// Elements keep their insertion order, positions start at 0 and duplicates
/// are allowed. Elements are passed as `impl Into<Option<T>>`, so both a plain
/// value and an `Option` are accepted. An absent element (`None`) is never
/// stored, the operation fails with [`SequenceError::InvalidArgument`]
/// instead.
///
/// Every operation validates its arguments before it mutates anything, a
/// failed call leaves the sequence untouched.
///
/// Implementations provide no internal synchronization. Callers sharing a
/// sequence between threads have to guard it with an exclusive lock.
pub trait Sequence<T> {
    /// Appends an element to the end of the sequence.
    ///
    /// Returns `Ok(true)` once the element has been stored.
    fn add<E>(&mut self, element: E) -> Result<bool, SequenceError>
    where
        E: Into<Option<T>>;

    /// Inserts an element at position `index`, shifting all elements at or
    /// after `index` up by one.
    ///
    /// `index == len()` is the append position and is valid.
    fn insert<E>(&mut self, index: usize, element: E) -> Result<(), SequenceError>
    where
        E: Into<Option<T>>;

    /// Returns a reference to the element at position `index`.
    fn get(&self, index: usize) -> Result<&T, SequenceError>;

    /// Removes the first element that is equal to `element`.
    ///
    /// Returns `Ok(false)` if no element matches, which is not an error.
    fn remove<'a, E>(&mut self, element: E) -> Result<bool, SequenceError>
    where
        T: PartialEq + 'a,
        E: Into<Option<&'a T>>;

    /// Removes all elements. The sequence stays usable afterwards.
    fn clear(&mut self);

    /// Sorts the sequence with a comparator function.
    ///
    /// The sort is stable: elements that compare equal keep their relative order.
    fn sort_by<F>(&mut self, compare: F)
    where
        F: FnMut(&T, &T) -> Ordering;

    /// Sorts the sequence by the natural order of its elements.
    ///
    /// This is the sort used when no comparator is given.
    fn sort(&mut self)
    where
        T: Ord,
    {
        self.sort_by(T::cmp)
    }

    /// Returns the number of elements.
    fn len(&self) -> usize;

    /// Returns `true` if the sequence contains no elements.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns a copy of all elements in order.
    ///
    /// The returned vector is a snapshot, mutating it does not affect the sequence.
    fn to_vec(&self) -> Vec<T>
    where
        T: Clone;
}
