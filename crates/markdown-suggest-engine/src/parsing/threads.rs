use serde::Serialize;

use super::{
    span::Span,
    types::{ChangeKind, ChangeRange},
};

/// A run of comment wrappers with no characters between them.
///
/// The first comment is the thread root; the rest are replies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommentThread {
    pub comments: Vec<ChangeRange>,
    /// From the first comment's start to the last comment's end.
    pub span: Span,
}

impl CommentThread {
    fn start(first: &ChangeRange) -> Self {
        Self {
            comments: vec![first.clone()],
            span: first.span,
        }
    }

    pub fn root(&self) -> &ChangeRange {
        &self.comments[0]
    }

    pub fn replies(&self) -> &[ChangeRange] {
        &self.comments[1..]
    }

    /// The highlight immediately preceding the thread, if any.
    pub fn anchor<'a>(&self, ranges: &'a [ChangeRange]) -> Option<&'a ChangeRange> {
        ranges
            .iter()
            .find(|r| r.kind == ChangeKind::Highlight && r.span.end == self.span.start)
    }
}

/// Groups comment ranges into threads. Input must be sorted by start offset,
/// as [`parse`](super::parse) returns it.
pub fn parse_threads(ranges: &[ChangeRange]) -> Vec<CommentThread> {
    let mut threads: Vec<CommentThread> = Vec::new();

    for comment in ranges.iter().filter(|r| r.kind == ChangeKind::Comment) {
        match threads.last_mut() {
            Some(current) if current.span.end == comment.span.start => {
                current.span.end = comment.span.end;
                current.comments.push(comment.clone());
            }
            _ => threads.push(CommentThread::start(comment)),
        }
    }

    threads
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::parse;
    use pretty_assertions::assert_eq;

    fn contents(thread: &CommentThread) -> Vec<&str> {
        thread.comments.iter().map(|c| c.content.as_str()).collect()
    }

    #[test]
    fn no_comments_no_threads() {
        assert!(parse_threads(&parse("plain {++text++}")).is_empty());
    }

    #[test]
    fn adjacent_comments_share_a_thread() {
        let threads = parse_threads(&parse("x{>>root<<}{>>reply<<}{>>again<<} y"));
        assert_eq!(threads.len(), 1);
        assert_eq!(contents(&threads[0]), vec!["root", "reply", "again"]);
        assert_eq!(threads[0].span, Span::new(1, 33));
        assert_eq!(threads[0].root().content, "root");
        assert_eq!(threads[0].replies().len(), 2);
    }

    #[test]
    fn any_gap_splits_threads() {
        let threads = parse_threads(&parse("{>>a<<} {>>b<<}\n{>>c<<}"));
        assert_eq!(threads.len(), 3);
    }

    #[test]
    fn non_comment_between_splits_threads() {
        let threads = parse_threads(&parse("{>>a<<}{++b++}{>>c<<}"));
        assert_eq!(threads.len(), 2);
    }

    #[test]
    fn inserting_one_character_between_splits() {
        let joined = "{>>a<<}{>>b<<}";
        assert_eq!(parse_threads(&parse(joined)).len(), 1);
        for ch in [" ", "x", "\n", "é"] {
            let split = format!("{{>>a<<}}{ch}{{>>b<<}}");
            assert_eq!(parse_threads(&parse(&split)).len(), 2, "separator {ch:?}");
        }
    }

    #[test]
    fn anchor_highlight_is_found() {
        let ranges = parse("{==quoted==}{>>why?<<}");
        let threads = parse_threads(&ranges);
        let anchor = threads[0].anchor(&ranges).unwrap();
        assert_eq!(anchor.content, "quoted");
    }
}
