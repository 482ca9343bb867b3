//! Median List - a sorted key index that tracks its median incrementally.
//!
//! Keys are kept in a doubly-linked list ordered by an associated value.
//! Inserts take position hints that are validated rather than trusted, and
//! the median is maintained by stepping a pointer one link at a time
//! instead of re-ranking the list.
//!
//! # Quick Start
//!
//! ```
//! use median_list::key::Key;
//! use median_list::list::MedianList;
//!
//! let a = Key::derive(b"a");
//! let b = Key::derive(b"b");
//! let c = Key::derive(b"c");
//!
//! let mut list = MedianList::new();
//! list.insert(a, 10u64, None, None).unwrap();
//! list.insert(b, 20, None, None).unwrap();
//! list.insert(c, 5, None, None).unwrap();
//!
//! assert_eq!(list.keys(), vec![c, a, b]);
//! assert_eq!(list.median(), Some(a));
//!
//! // Hints name the neighbours the new key should sit between
//! let d = Key::derive(b"d");
//! list.insert(d, 15, Some(a), Some(b)).unwrap();
//! assert_eq!(list.median_value(), Some(10));
//! ```

pub mod key;
pub mod list;
pub mod registry;
