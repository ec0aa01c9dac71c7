use crate::parsing::Span;

/// Host-contract violations on the edit path.
///
/// Malformed markup is never an error; these only arise when the caller hands
/// the engine offsets or an index that do not fit the current text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EditError {
    #[error("offset {offset} is past the end of the text (len {len})")]
    OutOfBounds { offset: usize, len: usize },
    #[error("edit range is inverted: {from} > {to}")]
    InvertedRange { from: usize, to: usize },
    #[error("offset {offset} is not on a character boundary")]
    NotCharBoundary { offset: usize },
    #[error("changes overlap: {first:?} and {second:?}")]
    OverlappingChanges { first: Span, second: Span },
    #[error("range index was built for {indexed} bytes but the text has {actual}")]
    StaleIndex { indexed: usize, actual: usize },
    #[error("selection {0:?} crosses existing markup")]
    OverlapsMarkup(Span),
}
