//! # Markup Parsing
//!
//! Recovers structured change ranges and comment threads from raw text.
//! Both are pure projections of the text: nothing here keeps state between
//! calls, so the same text always yields the same ranges.
//!
//! ## Modules
//!
//! - **`kinds`**: delimiter constants owned by each markup kind
//! - **`cursor`**: byte cursor the scanner walks the text with
//! - **`metadata`**: `{...}@@` preamble extraction and formatting
//! - **`scanner`**: `parse()` main entry point
//! - **`threads`**: `parse_threads()` groups adjacent comments
//! - **`snapshot`**: normalisation and invariant checks used by tests

pub mod cursor;
pub mod kinds;
pub mod metadata;
pub mod scanner;
pub mod snapshot;
pub mod span;
pub mod threads;
pub mod types;

pub use scanner::parse;
pub use span::Span;
pub use threads::{CommentThread, parse_threads};
pub use types::{ChangeKind, ChangeRange, Metadata};
