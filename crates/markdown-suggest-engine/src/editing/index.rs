use crate::parsing::{ChangeRange, CommentThread, Span, parse, parse_threads};

/// Ranges and threads for the latest text the host reported.
///
/// Rebuilt from scratch by [`RangeIndex::update`] on every change; nothing is
/// carried over from the previous text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RangeIndex {
    ranges: Vec<ChangeRange>,
    threads: Vec<CommentThread>,
    text_len: usize,
    generation: u64,
}

impl RangeIndex {
    pub fn new(text: &str) -> Self {
        let mut index = Self::default();
        index.rebuild(text);
        index
    }

    /// Full reparse of `text`.
    pub fn update(&mut self, text: &str) {
        self.rebuild(text);
        self.generation += 1;
    }

    fn rebuild(&mut self, text: &str) {
        self.ranges = parse(text);
        self.threads = parse_threads(&self.ranges);
        self.text_len = text.len();
        log::trace!(
            "reindexed {} bytes: {} ranges, {} threads",
            self.text_len,
            self.ranges.len(),
            self.threads.len()
        );
    }

    pub fn ranges(&self) -> &[ChangeRange] {
        &self.ranges
    }

    pub fn threads(&self) -> &[CommentThread] {
        &self.threads
    }

    /// Length of the text this index was built from.
    pub fn text_len(&self) -> usize {
        self.text_len
    }

    /// Number of updates since construction.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// First range (in document order) whose `[from, to]` contains `pos`.
    pub fn range_at(&self, pos: usize) -> Option<&ChangeRange> {
        self.ranges.iter().find(|r| r.span.contains_inclusive(pos))
    }

    /// Innermost range with `from < pos < to`.
    pub fn innermost_around(&self, pos: usize) -> Option<&ChangeRange> {
        self.ranges
            .iter()
            .filter(|r| r.span.contains_strict(pos))
            .min_by_key(|r| r.span.len())
    }

    /// Innermost range whose span covers `span` entirely.
    pub fn innermost_covering(&self, span: Span) -> Option<&ChangeRange> {
        self.ranges
            .iter()
            .filter(|r| r.span.covers(span))
            .min_by_key(|r| r.span.len())
    }

    /// Ranges sharing at least one byte with `span`.
    pub fn overlapping(&self, span: Span) -> impl Iterator<Item = &ChangeRange> {
        self.ranges.iter().filter(move |r| r.span.overlaps(span))
    }

    /// The thread whose span contains `pos`, edges included.
    pub fn thread_at(&self, pos: usize) -> Option<&CommentThread> {
        self.threads.iter().find(|t| t.span.contains_inclusive(pos))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::ChangeKind;

    #[test]
    fn update_tracks_latest_text() {
        let mut index = RangeIndex::new("a {++b++}");
        assert_eq!(index.ranges().len(), 1);
        assert_eq!(index.generation(), 0);

        index.update("a {++b++} {--c--}{>>d<<}");
        assert_eq!(index.ranges().len(), 3);
        assert_eq!(index.threads().len(), 1);
        assert_eq!(index.generation(), 1);

        index.update("plain");
        assert!(index.ranges().is_empty());
        assert!(index.threads().is_empty());
        assert_eq!(index.text_len(), 5);
    }

    #[test]
    fn range_at_includes_both_edges() {
        let index = RangeIndex::new("ab{++cd++}ef");
        assert!(index.range_at(1).is_none());
        assert_eq!(index.range_at(2).unwrap().kind, ChangeKind::Addition);
        assert_eq!(index.range_at(10).unwrap().kind, ChangeKind::Addition);
        assert!(index.range_at(11).is_none());
    }

    #[test]
    fn range_at_prefers_first_of_adjacent() {
        let index = RangeIndex::new("{++a++}{--b--}");
        assert_eq!(index.range_at(7).unwrap().kind, ChangeKind::Addition);
    }

    #[test]
    fn innermost_around_picks_nested() {
        let index = RangeIndex::new("{==x {--y--} z==}");
        assert_eq!(index.innermost_around(8).unwrap().kind, ChangeKind::Deletion);
        assert_eq!(index.innermost_around(4).unwrap().kind, ChangeKind::Highlight);
    }
}
