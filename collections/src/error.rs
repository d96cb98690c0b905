use thiserror::Error;

/// An enum containing the errors a [`Sequence`](crate::Sequence) operation can fail with.
///
/// Looking up an element that is not part of the sequence is not an error,
/// `remove` reports that case through its boolean result.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SequenceError {
    #[error("Invalid argument: element must be present")]
    InvalidArgument,
    #[error("Index out of range: {index}")]
    IndexOutOfRange { index: usize, size: usize },
    #[error("Node storage can't address any more nodes")]
    CapacityExceeded,
}

impl SequenceError {
    /// Checks that `index` addresses a live element of a sequence holding `size` elements.
    pub(crate) fn check_element_index(index: usize, size: usize) -> Result<(), Self> {
        if index >= size {
            return Err(SequenceError::IndexOutOfRange { index, size });
        }
        Ok(())
    }

    /// Checks that `index` is a valid insertion position, the append position `size` included.
    pub(crate) fn check_position_index(index: usize, size: usize) -> Result<(), Self> {
        if index > size {
            return Err(SequenceError::IndexOutOfRange { index, size });
        }
        Ok(())
    }
}
