//! # Markup Kinds
//!
//! Each markup kind owns its delimiter constants. The scanner and the edit
//! filter read them from here; they never hardcode `{++` or `~>`.
//!
//! - **`Addition`**: `{++ … ++}`
//! - **`Deletion`**: `{-- … --}`
//! - **`Substitution`**: `{~~ old ~> new ~~}`
//! - **`Comment`**: `{>> … <<}`
//! - **`Highlight`**: `{== … ==}`
//! - **`Preamble`**: the `@@` terminator of the optional metadata block

pub mod addition;
pub mod comment;
pub mod deletion;
pub mod highlight;
pub mod substitution;

pub use addition::Addition;
pub use comment::Comment;
pub use deletion::Deletion;
pub use highlight::Highlight;
pub use substitution::Substitution;

/// Width in bytes of every opening and closing delimiter.
pub const DELIMITER_LEN: usize = 3;

/// Metadata preamble terminator.
pub struct Preamble;

impl Preamble {
    pub const END: &'static str = "@@";
}
