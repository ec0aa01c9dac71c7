/// Result of applying an edit to a [`Document`](super::Document).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Patch {
    /// Byte ranges in the new text that were inserted or rewritten. A
    /// pure deletion shows up as an empty range at the deletion point.
    pub changed: Vec<std::ops::Range<usize>>,
    pub new_selection: std::ops::Range<usize>,
    pub version: u64,
}
