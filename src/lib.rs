//! Ordered maps and sets based on a red-black tree.
//!
//! [`Map`](map/struct.Map.html) and [`Set`](set/struct.Set.html) keep their elements sorted by
//! a comparator from the [`compare`](https://crates.io/crates/compare) crate and support
//! logarithmic insertion, lookup and removal. Both are thin layers over
//! [`Tree`](tree/struct.Tree.html), which stores its nodes in an arena and exposes them through
//! [`Handle`](tree/struct.Handle.html)s and bidirectional [`Cursor`](tree/struct.Cursor.html)s.
//!
//! # Examples
//!
//! ```
//! let mut map = rbtree::Map::new();
//!
//! map.insert(3, "c");
//! map.insert(1, "a");
//! map.insert(2, "b");
//!
//! let mut cursor = map.lower_bound(&2);
//! assert_eq!(cursor.get(), Some((&2, &"b")));
//!
//! cursor.move_next();
//! cursor.move_next();
//! assert!(cursor.is_end());
//!
//! // The end position sits between the maximum and the minimum.
//! cursor.move_next();
//! assert_eq!(cursor.get(), Some((&1, &"a")));
//! ```

mod error;
pub mod map;
pub mod set;
pub mod tree;

#[cfg(feature = "quickcheck")]
mod quickcheck;

#[cfg(feature = "ordered_iter")]
mod ordered_iter;

pub use error::AllocError;
pub use map::Map;
pub use set::Set;
pub use tree::{Handle, Tree};
