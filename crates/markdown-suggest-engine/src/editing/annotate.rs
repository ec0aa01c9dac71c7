use crate::{
    editing::{EditError, RangeIndex, SuggestionSession, change::TextChange},
    parsing::{
        CommentThread, Span,
        kinds::{Comment, Highlight},
        metadata::format_preamble,
    },
};

fn comment_markup(body: &str, session: &SuggestionSession, timestamp: i64) -> String {
    format!(
        "{}{}{body}{}",
        Comment::OPEN,
        format_preamble(&session.metadata(timestamp)),
        Comment::CLOSE
    )
}

/// Starts a comment thread on `selection`.
///
/// An empty selection gets a bare comment; otherwise the selected text is
/// highlighted and the comment follows it. The selection may sit inside the
/// content of a wrapper but must not cross any delimiter.
pub fn add_comment(
    text: &str,
    index: &RangeIndex,
    selection: Span,
    body: &str,
    session: &SuggestionSession,
    timestamp: i64,
) -> Result<TextChange, EditError> {
    if index.text_len() != text.len() {
        return Err(EditError::StaleIndex {
            indexed: index.text_len(),
            actual: text.len(),
        });
    }
    TextChange::new(selection.start, selection.end, "").validate(text)?;

    let comment = comment_markup(body, session, timestamp);
    if selection.is_empty() {
        if let Some(r) = index.innermost_around(selection.start)
            && !r.content_span.contains_inclusive(selection.start)
        {
            return Err(EditError::OverlapsMarkup(r.span));
        }
        return Ok(TextChange::insert(selection.start, comment));
    }

    if let Some(r) = index
        .overlapping(selection)
        .find(|r| !r.content_span.covers(selection))
    {
        return Err(EditError::OverlapsMarkup(r.span));
    }
    let highlighted = &text[selection.as_range()];
    Ok(TextChange::new(
        selection.start,
        selection.end,
        format!("{}{highlighted}{}{comment}", Highlight::OPEN, Highlight::CLOSE),
    ))
}

/// Appends a reply to the end of `thread`, keeping it contiguous.
pub fn reply(
    thread: &CommentThread,
    body: &str,
    session: &SuggestionSession,
    timestamp: i64,
) -> TextChange {
    TextChange::insert(thread.span.end, comment_markup(body, session, timestamp))
}
