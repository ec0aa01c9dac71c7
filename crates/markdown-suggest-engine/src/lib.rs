pub mod editing;
pub mod io;
pub mod parsing;
pub mod render;

#[cfg(test)]
pub mod tests;

// Re-export key types for easier usage
pub use editing::{
    Document, EditError, EditOrigin, EditProposal, FilteredEdit, Patch, RangeIndex, Resolution,
    SuggestAction, SuggestionSession, TextChange,
};
pub use io::*;
pub use parsing::{ChangeKind, ChangeRange, CommentThread, Metadata, Span, parse, parse_threads};
