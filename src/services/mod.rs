//! Services Layer
//!
//! Operations that combine several repository reads.

mod aggregation;

pub use aggregation::{merge_items, Aggregator};
