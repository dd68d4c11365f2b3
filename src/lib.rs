//! An in-memory, key-ordered index of customer billing records.
//!
//! A [`CustomerIndex`] maps phone numbers to [`CustomerRecord`] instances,
//! keeping them in a height-balanced binary search tree (an AVL tree) so
//! that inserts, lookups and removals complete in O(log n) while in-order
//! iteration always yields records in ascending phone-number order.
//!
//! Phone numbers are compared lexicographically as strings, not numerically
//! (`"9"` sorts after `"10"`).
//!
//! ```
//! use telebill::{CustomerIndex, CustomerRecord};
//!
//! let mut index = CustomerIndex::default();
//!
//! let record = CustomerRecord::new("Ada", "12 Main St", "5550100", 4.0, 100.0)?;
//! index.insert(record)?;
//!
//! assert!(index.contains("5550100"));
//!
//! // Pay off part of the outstanding bill.
//! let remaining = index.pay("5550100", 40.0)?;
//! assert_eq!(remaining, 400.0);
//! # Ok::<(), telebill::Error>(())
//! ```
//!
//! An index can be written to, and rebuilt from, a flat newline-delimited
//! text snapshot - see [`CustomerIndex::save`] and [`CustomerIndex::load`].
//!
//! The index is a plain owned value with no interior mutability; callers
//! that need to share it across threads wrap it in a single exclusive lock.

#![deny(rustdoc::broken_intra_doc_links)]
#![warn(missing_docs, rust_2018_idioms)]

mod codec;
mod error;
mod iter;
mod node;
mod record;
mod tree;

#[cfg(test)]
mod test_utils;

pub use error::{Error, Result};
pub use record::{CustomerRecord, RATE_PER_MB, RATE_PER_MINUTE};
pub use tree::CustomerIndex;
