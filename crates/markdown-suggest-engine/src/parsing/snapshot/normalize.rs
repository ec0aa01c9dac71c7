use serde::Serialize;

use crate::parsing::{threads::CommentThread, types::ChangeRange};

/// Stable, human-readable rendering of a parse result.
#[derive(Serialize)]
pub struct Snap {
    pub ranges: Vec<RangeSnap>,
    pub threads: Vec<ThreadSnap>,
}

#[derive(Serialize)]
pub struct RangeSnap {
    pub kind: String,
    pub span: (usize, usize),
    pub content_span: (usize, usize),
    pub content: String,
    pub meta: Option<String>,
}

#[derive(Serialize)]
pub struct ThreadSnap {
    pub span: (usize, usize),
    pub comments: usize,
}

pub fn normalize(ranges: &[ChangeRange], threads: &[CommentThread]) -> Snap {
    let ranges = ranges
        .iter()
        .map(|r| RangeSnap {
            kind: r.kind.name().to_string(),
            span: (r.span.start, r.span.end),
            content_span: (r.content_span.start, r.content_span.end),
            content: preview(&r.content, 60),
            meta: r.metadata.as_ref().map(|m| {
                format!(
                    "{} @ {}",
                    m.author.as_deref().unwrap_or("-"),
                    m.timestamp.map_or_else(|| "-".to_string(), |t| t.to_string())
                )
            }),
        })
        .collect();

    let threads = threads
        .iter()
        .map(|t| ThreadSnap {
            span: (t.span.start, t.span.end),
            comments: t.comments.len(),
        })
        .collect();

    Snap { ranges, threads }
}

/// Truncates to `max` bytes (on a char boundary) with "..." suffix.
fn preview(s: &str, max: usize) -> String {
    if s.len() <= max {
        return s.to_string();
    }
    let mut cut = max;
    while !s.is_char_boundary(cut) {
        cut -= 1;
    }
    format!("{}...", &s[..cut])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preview_truncates_on_char_boundary() {
        assert_eq!(preview("hello", 10), "hello");
        assert_eq!(preview("hello world", 5), "hello...");
        assert_eq!(preview("ééé", 3), "é...");
    }
}
