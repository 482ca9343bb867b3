//! Ordered key indexes, layered leaves first.
//!
//! - `LinkedList`: doubly-linked list of unique keys, positions supplied by
//!   the caller.
//! - `SortedList`: adds a value per key and keeps the list in ascending
//!   value order, validating caller hints.
//! - `MedianList`: adds an incrementally maintained median pointer.
//!
//! The tail holds the smallest value and the head the largest. Callers
//! normally use `MedianList` (or `SharedMedianList` across threads); it
//! delegates structure to `SortedList`, which delegates linking to
//! `LinkedList`.
//!
//! Every operation validates all of its preconditions before touching any
//! link, so an `Err` always leaves the list exactly as it was.

use std::fmt::Debug;
use std::hash::Hash;

mod arena;
pub mod config;
pub mod linked;
pub mod median;
pub mod shared;
pub mod sorted;

pub use config::HintPolicy;
pub use config::ListConfig;
pub use linked::Iter;
pub use linked::LinkedList;
pub use median::MedianAction;
pub use median::MedianList;
pub use median::Relation;
pub use shared::SharedMedianList;
pub use sorted::SortedList;

/// Identifier stored in a list. Blanket-implemented.
pub trait ListKey: Copy + Eq + Hash + Debug {}

impl<T: Copy + Eq + Hash + Debug> ListKey for T {}

/// Score a key is ordered by. Blanket-implemented.
///
/// `Default` is the value given to keys added with `push`.
pub trait ListValue: Copy + Ord + Default + Debug {}

impl<T: Copy + Ord + Default + Debug> ListValue for T {}

/// Reasons a list operation is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ListError {
    /// The key is already present, or equals one of its own neighbour arguments.
    #[error("key is already present or is its own neighbour")]
    InvalidKey,
    /// A supplied neighbour key is not in the list.
    #[error("neighbour key is not in the list")]
    DanglingNeighbor,
    /// The supplied neighbours are not adjacent in the current order.
    #[error("neighbour keys are not adjacent")]
    BrokenAdjacency,
    /// No candidate position derived from the hints respects the ordering.
    #[error("no position consistent with the hints satisfies the ordering")]
    NoValidPosition,
    /// The targeted key is not in the list.
    #[error("key is not in the list")]
    NotFound,
    /// More elements were requested than the list holds.
    #[error("requested {requested} elements but the list holds {available}")]
    InsufficientElements { requested: usize, available: usize },
    /// The list already holds its configured maximum number of elements.
    #[error("list is full ({capacity} elements)")]
    CapacityExceeded { capacity: usize },
}

/// Result alias for list operations.
pub type Result<T> = std::result::Result<T, ListError>;
