use crate::{
    editing::change::{TextChange, apply_to_string},
    parsing::{ChangeKind, ChangeRange, CommentThread, parse},
};

/// Which way to resolve a suggestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resolution {
    Accept,
    Reject,
}

impl std::fmt::Display for Resolution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Resolution::Accept => f.write_str("accept"),
            Resolution::Reject => f.write_str("reject"),
        }
    }
}

/// Plain text that replaces the whole wrapper.
///
/// | kind         | accept        | reject        |
/// |--------------|---------------|---------------|
/// | addition     | content       | ""            |
/// | deletion     | ""            | content       |
/// | substitution | new content   | old content   |
/// | highlight    | content       | content       |
/// | comment      | ""            | ""            |
pub fn replacement_for(range: &ChangeRange, resolution: Resolution) -> &str {
    use Resolution::*;
    match (range.kind, resolution) {
        (ChangeKind::Addition, Accept) | (ChangeKind::Deletion, Reject) => range.content.as_str(),
        (ChangeKind::Addition, Reject) | (ChangeKind::Deletion, Accept) => "",
        (ChangeKind::Substitution, Accept) => range.new_content.as_deref().unwrap_or_default(),
        (ChangeKind::Substitution, Reject) => range.old_content.as_deref().unwrap_or_default(),
        (ChangeKind::Highlight, _) => range.content.as_str(),
        (ChangeKind::Comment, _) => "",
    }
}

/// Edit resolving the range under `pos`, or `None` when `pos` is outside
/// every range. Edges count as inside; of several candidates the first in
/// document order wins.
pub fn resolve(pos: usize, ranges: &[ChangeRange], resolution: Resolution) -> Option<TextChange> {
    let range = ranges.iter().find(|r| r.span.contains_inclusive(pos))?;
    log::debug!("{resolution} {} at {}..{}", range.kind, range.span.start, range.span.end);
    Some(TextChange::new(
        range.span.start,
        range.span.end,
        replacement_for(range, resolution),
    ))
}

/// Resolves every range in `text` the same way.
///
/// Outermost ranges go first; anything exposed by resolving them is picked up
/// on the next pass. Each pass strictly shortens the text, so this ends.
pub fn resolve_all(text: &str, resolution: Resolution) -> String {
    let mut current = text.to_string();
    loop {
        let ranges = parse(&current);
        if ranges.is_empty() {
            return current;
        }
        let changes = outermost_changes(&ranges, resolution);
        current = apply_to_string(&current, &changes);
    }
}

fn outermost_changes(ranges: &[ChangeRange], resolution: Resolution) -> Vec<TextChange> {
    let mut changes: Vec<TextChange> = Vec::new();
    for r in ranges {
        if changes.last().is_some_and(|c| r.span.start < c.to) {
            continue;
        }
        changes.push(TextChange::new(
            r.span.start,
            r.span.end,
            replacement_for(r, resolution),
        ));
    }
    changes
}

/// Removes a whole comment thread.
pub fn resolve_thread(thread: &CommentThread) -> TextChange {
    TextChange::delete(thread.span.start, thread.span.end)
}
