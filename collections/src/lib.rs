//! Ordered-sequence containers.
//!
//! Two storage engines implement the shared [`Sequence`] trait:
//!
//! * [`ContiguousList`] keeps its elements in one owned buffer that doubles
//!   its capacity whenever it runs full. Random access is O(1), inserting or
//!   removing in the middle shifts the tail.
//! * [`LinkedNodeList`] keeps its elements in doubly-linked nodes. The nodes
//!   live in an arena ([`SparseVec`]) and reference each other through
//!   handles, so unlinking a node can never leave a dangling link behind.
//!
//! ```
//! use seqlist_collections::{ContiguousList, LinkedNodeList, Sequence};
//!
//! fn fill<S: Sequence<i32>>(list: &mut S) {
//!     for i in 0..4 {
//!         list.add(i).unwrap();
//!     }
//!     list.insert(0, 100).unwrap();
//! }
//!
//! let mut contiguous = ContiguousList::new();
//! let mut linked = LinkedNodeList::new();
//! fill(&mut contiguous);
//! fill(&mut linked);
//!
//! assert_eq!(contiguous.to_vec(), vec![100, 0, 1, 2, 3]);
//! assert_eq!(contiguous.to_vec(), linked.to_vec());
//! ```

pub mod config;
pub mod contiguous_list;
pub mod error;
pub mod linked_node_list;
pub mod sequence;
pub mod sparse_vec;

pub use self::config::{ListConfig, DEFAULT_CAPACITY};
pub use self::contiguous_list::ContiguousList;
pub use self::error::SequenceError;
pub use self::linked_node_list::{LinkedNodeList, NodeHandle};
pub use self::sequence::Sequence;
pub use self::sparse_vec::SparseVec;
