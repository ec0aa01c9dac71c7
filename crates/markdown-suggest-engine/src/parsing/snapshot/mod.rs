//! # Snapshot Testing Support
//!
//! Utilities for testing the parser via snapshot assertions and invariant checks.
//!
//! - **`normalize`**: renders parsed ranges and threads into a stable text
//!   form for `insta` snapshots
//! - **`invariants`**: runtime checks for parser correctness (spans in bounds,
//!   content inside wrapper, sorted output, no same-kind overlap)

pub mod invariants;
pub mod normalize;

pub use invariants::check as invariants;
pub use normalize::{Snap, normalize};
