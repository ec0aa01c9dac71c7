use super::{
    cursor::Cursor,
    kinds::{DELIMITER_LEN, Substitution},
    metadata,
    span::Span,
    types::{ChangeKind, ChangeRange},
};

/// Parses every markup range in `text`, sorted by start offset.
///
/// Each kind is scanned independently and without nesting: after an opening
/// delimiter the first matching close wins, and scanning resumes after it.
/// Unclosed delimiters produce nothing. Ranges of different kinds may overlap
/// or nest; ranges of one kind never do.
pub fn parse(text: &str) -> Vec<ChangeRange> {
    let mut out = Vec::new();
    for kind in ChangeKind::ALL {
        scan_kind(text, kind, &mut out);
    }
    out.sort_by_key(|r| r.span.start);
    out
}

fn scan_kind(text: &str, kind: ChangeKind, out: &mut Vec<ChangeRange>) {
    let mut cur = Cursor::new(text);
    while let Some(start) = cur.find(kind.open().as_bytes()) {
        cur.seek(start + DELIMITER_LEN);
        let inner_start = cur.pos();

        let range = if kind == ChangeKind::Substitution {
            try_parse_substitution(text, &mut cur, start, inner_start)
        } else {
            try_parse_simple(text, &mut cur, kind, start, inner_start)
        };

        match range {
            Some(r) => out.push(r),
            // No close after this opener means none after any later opener.
            None => break,
        }
    }
}

fn try_parse_simple(
    text: &str,
    cur: &mut Cursor<'_>,
    kind: ChangeKind,
    start: usize,
    inner_start: usize,
) -> Option<ChangeRange> {
    let close = cur.find(kind.close().as_bytes())?;
    cur.seek(close + DELIMITER_LEN);

    let raw = &text[inner_start..close];
    let (meta, used) = metadata::extract(raw);

    Some(ChangeRange {
        kind,
        span: Span::new(start, cur.pos()),
        content_span: Span::new(inner_start + used, close),
        content: raw[used..].to_string(),
        old_content: None,
        new_content: None,
        metadata: meta,
    })
}

fn try_parse_substitution(
    text: &str,
    cur: &mut Cursor<'_>,
    start: usize,
    inner_start: usize,
) -> Option<ChangeRange> {
    let sep = cur.find(Substitution::SEPARATOR.as_bytes())?;
    cur.seek(sep + Substitution::SEPARATOR.len());
    let new_start = cur.pos();
    let close = cur.find(Substitution::CLOSE.as_bytes())?;
    cur.seek(close + DELIMITER_LEN);

    let raw_old = &text[inner_start..sep];
    let (meta, used) = metadata::extract(raw_old);
    let old = raw_old[used..].to_string();
    let new = text[new_start..close].to_string();

    Some(ChangeRange {
        kind: ChangeKind::Substitution,
        span: Span::new(start, cur.pos()),
        content_span: Span::new(inner_start + used, close),
        content: format!("{old}{}{new}", Substitution::SEPARATOR),
        old_content: Some(old),
        new_content: Some(new),
        metadata: meta,
    })
}
