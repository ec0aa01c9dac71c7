use crate::parsing::types::ChangeRange;

/// Validates parser output invariants.
///
/// # Panics
/// Panics with a descriptive message if any invariant is violated.
pub fn check(text: &str, ranges: &[ChangeRange]) {
    let n = text.len();
    for r in ranges {
        assert!(
            r.span.start < r.span.end && r.span.end <= n,
            "range span out of bounds: {:?} (text len: {})",
            r.span,
            n
        );
        assert!(
            r.content_span.start <= r.content_span.end,
            "content span inverted: {:?}",
            r.content_span
        );
        assert!(
            r.span.covers(r.content_span),
            "content span not contained in range span: content {:?}, range {:?}",
            r.content_span,
            r.span
        );
        assert!(
            r.span.start + 3 <= r.content_span.start && r.content_span.end + 3 == r.span.end,
            "delimiters not accounted for: content {:?}, range {:?}",
            r.content_span,
            r.span
        );
        assert!(
            text.get(r.content_span.as_range()) == Some(r.content.as_str()),
            "content does not match its span: {:?}",
            r.content_span
        );
    }

    for pair in ranges.windows(2) {
        assert!(
            pair[0].span.start <= pair[1].span.start,
            "ranges not sorted: {:?} before {:?}",
            pair[0].span,
            pair[1].span
        );
    }

    for (i, a) in ranges.iter().enumerate() {
        for b in &ranges[i + 1..] {
            assert!(
                a.kind != b.kind || !a.span.overlaps(b.span),
                "same-kind ranges overlap: {:?} and {:?}",
                a.span,
                b.span
            );
        }
    }
}
