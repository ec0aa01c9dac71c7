//! Suggestion-mode edit filter.
//!
//! [`filter_edit`] takes one proposed edit and returns the edits the host
//! should apply instead. With suggestion mode off, or for programmatic edits,
//! the proposal comes back unchanged. Otherwise insertions become `{++…++}`,
//! deletions become `{--…--}` and replacements become `{~~…~>…~~}`, while
//! edits inside the author's own pending suggestion are applied in place.
//!
//! Markup is never split: deletions that land on delimiters are retargeted
//! to the text the user meant, and insertions that would fall inside markup
//! are moved past the wrapper.

use crate::{
    editing::{
        EditError, RangeIndex,
        change::{EditOrigin, EditProposal, TextChange, apply_to_string, map_position, normalize_changes},
    },
    parsing::{
        ChangeKind, ChangeRange, Metadata, Span,
        kinds::{Addition, Deletion, Substitution},
        metadata::format_preamble,
    },
};

/// Author name recorded when the host has not set one.
pub const ANONYMOUS: &str = "anonymous";

/// Per-editor suggestion state: the mode toggle and who is typing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SuggestionSession {
    pub enabled: bool,
    pub author: Option<String>,
    /// Maximum age of an addition that continued typing may extend.
    pub merge_window_ms: Option<i64>,
}

impl SuggestionSession {
    pub fn new(author: Option<String>) -> Self {
        Self {
            author,
            ..Self::default()
        }
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn author_name(&self) -> &str {
        self.author.as_deref().unwrap_or(ANONYMOUS)
    }

    pub fn metadata(&self, timestamp: i64) -> Metadata {
        Metadata {
            author: Some(self.author_name().to_string()),
            timestamp: Some(timestamp),
        }
    }

    /// Whether `r` belongs to the continuous-typing run of this session.
    pub fn can_extend(&self, r: &ChangeRange, timestamp: i64) -> bool {
        if r.author() != Some(self.author_name()) {
            return false;
        }
        match (self.merge_window_ms, r.timestamp()) {
            (None, _) => true,
            (Some(window), Some(ts)) => {
                timestamp.checked_sub(ts).is_some_and(|age| age <= window)
            }
            (Some(_), None) => false,
        }
    }
}

/// What the filter did with a proposal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuggestAction {
    PassThrough,
    /// Applied in place inside a pending addition, substitution or comment.
    Extend,
    /// New addition wrapper.
    Insert,
    /// Deleted text wrapped, own pending text removed.
    MarkDeleted,
    /// Deleted text moved into an adjacent deletion wrapper.
    MergeDeletion,
    /// New substitution wrapper.
    Substitute,
    /// Deletion across markup followed by a new addition.
    Replace,
    NoOp,
}

/// Edits to apply in place of a proposal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilteredEdit {
    /// Sorted, non-overlapping, in offsets of the pre-edit text.
    pub changes: Vec<TextChange>,
    /// Cursor in the post-edit text. `None` leaves the selection to the host.
    pub selection: Option<usize>,
    pub action: SuggestAction,
}

impl FilteredEdit {
    fn pass_through(change: TextChange) -> Self {
        Self {
            changes: vec![change],
            selection: None,
            action: SuggestAction::PassThrough,
        }
    }

    fn noop(cursor: usize) -> Self {
        Self {
            changes: Vec::new(),
            selection: Some(cursor),
            action: SuggestAction::NoOp,
        }
    }

    /// Applies the edits to the text they were computed against.
    pub fn apply(&self, text: &str) -> String {
        apply_to_string(text, &self.changes)
    }
}

/// Rewrites `proposal` for suggestion mode.
///
/// `index` must have been built from `text`. `timestamp` (epoch ms) goes into
/// the metadata of any wrapper created.
pub fn filter_edit(
    text: &str,
    index: &RangeIndex,
    proposal: &EditProposal,
    session: &SuggestionSession,
    timestamp: i64,
) -> Result<FilteredEdit, EditError> {
    if index.text_len() != text.len() {
        return Err(EditError::StaleIndex {
            indexed: index.text_len(),
            actual: text.len(),
        });
    }
    let change = &proposal.change;
    change.validate(text)?;

    if proposal.origin == EditOrigin::Programmatic || !session.enabled || change.is_noop() {
        log::debug!("suggest: pass-through {:?}", change.span());
        return Ok(FilteredEdit::pass_through(change.clone()));
    }

    let filter = Filter {
        text,
        index,
        session,
        timestamp,
        preamble: format_preamble(&session.metadata(timestamp)),
    };

    let mut out = if change.from == change.to {
        filter.insertion(change.from, &change.insert)
    } else if change.insert.is_empty() {
        filter.deletion(change.from, change.to)
    } else {
        filter.replacement(change.from, change.to, &change.insert)
    };
    normalize_changes(text, &mut out.changes)?;
    Ok(out)
}

struct Filter<'a> {
    text: &'a str,
    index: &'a RangeIndex,
    session: &'a SuggestionSession,
    timestamp: i64,
    preamble: String,
}

/// How a deletion relates to the markup it touches.
enum MarkupHit {
    /// Not inside any delimiter.
    Clear,
    /// Inside delimiters; act on this span instead.
    Retarget(Span),
    /// Inside delimiters with nothing sensible to act on.
    Inert,
}

impl Filter<'_> {
    fn can_extend(&self, r: &ChangeRange) -> bool {
        self.session.can_extend(r, self.timestamp)
    }

    fn insertion(&self, at: usize, ins: &str) -> FilteredEdit {
        let Some(r) = self.index.innermost_around(at) else {
            return self.wrap_addition(at, ins);
        };
        let in_content = r.content_span.contains_inclusive(at);

        match r.kind {
            ChangeKind::Addition if in_content && self.can_extend(r) => self.in_place(at, at, ins),
            ChangeKind::Substitution
                if r.new_span().is_some_and(|s| s.contains_inclusive(at)) && self.can_extend(r) =>
            {
                self.in_place(at, at, ins)
            }
            ChangeKind::Comment if in_content => self.in_place(at, at, ins),
            ChangeKind::Highlight if in_content => self.wrap_addition(at, ins),
            _ => {
                let p = self.safe_insertion_point(at);
                log::debug!("suggest: insertion at {at} moved past {} to {p}", r.kind);
                self.wrap_addition(p, ins)
            }
        }
    }

    fn deletion(&self, a: usize, b: usize) -> FilteredEdit {
        let (a, b) = match self.markup_hit(a, b) {
            MarkupHit::Clear => (a, b),
            MarkupHit::Retarget(sp) => {
                log::debug!("suggest: deletion {a}..{b} on markup retargeted to {sp:?}");
                (sp.start, sp.end)
            }
            MarkupHit::Inert => {
                log::debug!("suggest: deletion {a}..{b} inside markup ignored");
                return FilteredEdit::noop(a);
            }
        };
        if a == b {
            return FilteredEdit::noop(a);
        }
        if let Some(merged) = self.merge_into_deletion(a, b) {
            return merged;
        }

        let mut changes = Vec::new();
        self.walk(a, b, None, &mut changes);
        if changes.is_empty() {
            return FilteredEdit::noop(a);
        }
        let cursor = changes[0].from.min(a);
        log::debug!("suggest: deletion {a}..{b} -> {} change(s)", changes.len());
        FilteredEdit {
            changes,
            selection: Some(cursor),
            action: SuggestAction::MarkDeleted,
        }
    }

    fn replacement(&self, a: usize, b: usize, ins: &str) -> FilteredEdit {
        let region = Span::new(a, b);
        let overlapping: Vec<&ChangeRange> = self.index.overlapping(region).collect();
        if overlapping.is_empty() {
            return self.substitute(a, b, ins);
        }

        if let Some(r) = self.index.innermost_covering(region) {
            let nothing_nested = overlapping.iter().all(|o| o.span.covers(r.span));
            if nothing_nested && r.content_span.covers(region) {
                let in_new_side = r.new_span().is_some_and(|s| s.covers(region));
                match r.kind {
                    ChangeKind::Addition if self.can_extend(r) => return self.in_place(a, b, ins),
                    ChangeKind::Substitution if in_new_side && self.can_extend(r) => {
                        return self.in_place(a, b, ins);
                    }
                    ChangeKind::Comment => return self.in_place(a, b, ins),
                    ChangeKind::Highlight => return self.substitute(a, b, ins),
                    ChangeKind::Deletion => {
                        return self.wrap_addition(self.safe_insertion_point(b), ins);
                    }
                    ChangeKind::Substitution if !in_new_side => {
                        return self.wrap_addition(self.safe_insertion_point(b), ins);
                    }
                    _ => {}
                }
            }
        }

        self.replace_across(a, b, ins)
    }

    /// Plain edit inside pending text.
    fn in_place(&self, a: usize, b: usize, ins: &str) -> FilteredEdit {
        log::debug!("suggest: in-place edit {a}..{b}");
        FilteredEdit {
            changes: vec![TextChange::new(a, b, ins)],
            selection: Some(a + ins.len()),
            action: SuggestAction::Extend,
        }
    }

    fn wrap_addition(&self, at: usize, ins: &str) -> FilteredEdit {
        log::debug!("suggest: new addition at {at}");
        let wrapper = format!("{}{}{ins}{}", Addition::OPEN, self.preamble, Addition::CLOSE);
        FilteredEdit {
            changes: vec![TextChange::insert(at, wrapper)],
            selection: Some(at + Addition::OPEN.len() + self.preamble.len() + ins.len()),
            action: SuggestAction::Insert,
        }
    }

    fn substitute(&self, a: usize, b: usize, ins: &str) -> FilteredEdit {
        log::debug!("suggest: substitution over {a}..{b}");
        let old = &self.text[a..b];
        let wrapper = format!(
            "{}{}{old}{}{ins}{}",
            Substitution::OPEN,
            self.preamble,
            Substitution::SEPARATOR,
            Substitution::CLOSE
        );
        let cursor = a
            + Substitution::OPEN.len()
            + self.preamble.len()
            + old.len()
            + Substitution::SEPARATOR.len()
            + ins.len();
        FilteredEdit {
            changes: vec![TextChange::new(a, b, wrapper)],
            selection: Some(cursor),
            action: SuggestAction::Substitute,
        }
    }

    fn replace_across(&self, a: usize, b: usize, ins: &str) -> FilteredEdit {
        let mut changes = Vec::new();
        self.walk(a, b, None, &mut changes);
        let p = self.safe_insertion_point(b);
        let cursor = map_position(p, &changes) + Addition::OPEN.len() + self.preamble.len() + ins.len();
        changes.push(TextChange::insert(
            p,
            format!("{}{}{ins}{}", Addition::OPEN, self.preamble, Addition::CLOSE),
        ));
        log::debug!("suggest: replacement {a}..{b} across markup, addition at {p}");
        FilteredEdit {
            changes,
            selection: Some(cursor),
            action: SuggestAction::Replace,
        }
    }

    /// First position at or after `at` not inside markup or non-editable
    /// content. Highlighted text counts as editable.
    fn safe_insertion_point(&self, at: usize) -> usize {
        let mut p = at;
        while let Some(r) = self.index.innermost_around(p) {
            if r.kind == ChangeKind::Highlight && r.content_span.contains_inclusive(p) {
                break;
            }
            p = r.span.end;
        }
        p
    }

    fn markup_hit(&self, a: usize, b: usize) -> MarkupHit {
        let del = Span::new(a, b);
        let Some(r) = self.index.innermost_covering(del) else {
            return MarkupHit::Clear;
        };
        let opening = r.opening_markup();
        let closing = r.closing_markup();
        let k = self.text[a..b].chars().count();

        if opening.covers(del) {
            if b == opening.end {
                // Backspace at the start of the content: the character meant
                // is the one before the wrapper.
                let start = back_chars(self.text, r.span.start, k);
                return MarkupHit::Retarget(Span::new(start, r.span.start));
            }
            if a == opening.start {
                let end = fwd_chars(self.text, r.content_span.start, k).min(r.content_span.end);
                return MarkupHit::Retarget(Span::new(r.content_span.start, end));
            }
            return MarkupHit::Inert;
        }
        if closing.covers(del) {
            if b == closing.end {
                let start = back_chars(self.text, r.content_span.end, k).max(r.content_span.start);
                return MarkupHit::Retarget(Span::new(start, r.content_span.end));
            }
            if a == closing.start {
                let end = fwd_chars(self.text, r.span.end, k);
                return MarkupHit::Retarget(Span::new(r.span.end, end));
            }
            return MarkupHit::Inert;
        }
        if r.separator_markup().is_some_and(|s| s.covers(del)) {
            return MarkupHit::Inert;
        }
        MarkupHit::Clear
    }

    /// Grows an adjacent own deletion wrapper instead of opening a new one.
    fn merge_into_deletion(&self, a: usize, b: usize) -> Option<FilteredEdit> {
        if self.index.overlapping(Span::new(a, b)).next().is_some() {
            return None;
        }
        let removed = &self.text[a..b];
        let own_deletion = |r: &&ChangeRange| r.kind == ChangeKind::Deletion && self.can_extend(r);

        if let Some(d) = self.index.ranges().iter().filter(own_deletion).find(|r| r.span.start == b) {
            log::debug!("suggest: deletion {a}..{b} prepended to wrapper at {}", d.span.start);
            return Some(FilteredEdit {
                changes: vec![
                    TextChange::delete(a, b),
                    TextChange::insert(d.content_span.start, removed),
                ],
                selection: Some(a),
                action: SuggestAction::MergeDeletion,
            });
        }
        if let Some(d) = self.index.ranges().iter().filter(own_deletion).find(|r| r.span.end == a) {
            log::debug!("suggest: deletion {a}..{b} appended to wrapper at {}", d.span.start);
            return Some(FilteredEdit {
                changes: vec![
                    TextChange::insert(d.content_span.end, removed),
                    TextChange::delete(a, b),
                ],
                selection: Some(b),
                action: SuggestAction::MergeDeletion,
            });
        }
        None
    }

    /// Marks `[a, b)` deleted, left to right. `container` restricts the walk
    /// to ranges nested in a highlight's content.
    fn walk(&self, a: usize, b: usize, container: Option<&ChangeRange>, out: &mut Vec<TextChange>) {
        let region = Span::new(a, b);
        let candidates: Vec<&ChangeRange> = self
            .index
            .overlapping(region)
            .filter(|r| match container {
                Some(c) => r.span != c.span && c.content_span.covers(r.span),
                None => true,
            })
            .collect();
        let outermost = candidates
            .iter()
            .filter(|r| !candidates.iter().any(|o| o.span != r.span && o.span.covers(r.span)));

        let mut pos = a;
        let mut last_end = 0;
        for r in outermost {
            if r.span.start < last_end {
                // Crosses a range already handled; leave it alone.
                continue;
            }
            if pos < r.span.start {
                out.push(self.deletion_wrapper(pos, r.span.start));
            }
            let overlap = Span::new(a.max(r.span.start), b.min(r.span.end));
            self.mark_range(r, overlap, region, out);
            pos = pos.max(r.span.end);
            last_end = r.span.end;
        }
        if pos < b {
            out.push(self.deletion_wrapper(pos, b));
        }
    }

    fn mark_range(&self, r: &ChangeRange, overlap: Span, region: Span, out: &mut Vec<TextChange>) {
        let content = r.content_span;
        let hit = Span::new(overlap.start.max(content.start), overlap.end.min(content.end));

        match r.kind {
            ChangeKind::Addition => self.remove_content(r, hit, overlap, out),
            ChangeKind::Comment if content.covers(region) => self.remove_content(r, hit, overlap, out),
            ChangeKind::Substitution => {
                if let Some(new) = r.new_span() {
                    let h = Span::new(hit.start.max(new.start), hit.end.min(new.end));
                    if !h.is_empty() {
                        out.push(TextChange::delete(h.start, h.end));
                    }
                }
            }
            ChangeKind::Highlight if !hit.is_empty() => self.walk(hit.start, hit.end, Some(r), out),
            _ => {}
        }
    }

    /// Removes pending content outright; a wrapper left empty goes entirely.
    fn remove_content(&self, r: &ChangeRange, hit: Span, overlap: Span, out: &mut Vec<TextChange>) {
        let emptied = hit == r.content_span && (!hit.is_empty() || overlap == r.span);
        if emptied {
            log::debug!("suggest: {} at {} emptied, removing wrapper", r.kind, r.span.start);
            out.push(TextChange::delete(r.span.start, r.span.end));
        } else if !hit.is_empty() {
            out.push(TextChange::delete(hit.start, hit.end));
        }
    }

    fn deletion_wrapper(&self, s: usize, e: usize) -> TextChange {
        TextChange::new(
            s,
            e,
            format!("{}{}{}{}", Deletion::OPEN, self.preamble, &self.text[s..e], Deletion::CLOSE),
        )
    }
}

/// Offset `k` characters before `pos`, or 0.
fn back_chars(text: &str, pos: usize, k: usize) -> usize {
    if k == 0 {
        return pos;
    }
    text[..pos]
        .char_indices()
        .rev()
        .nth(k - 1)
        .map_or(0, |(i, _)| i)
}

/// Offset `k` characters after `pos`, or the end of the text.
fn fwd_chars(text: &str, pos: usize, k: usize) -> usize {
    text[pos..]
        .char_indices()
        .nth(k)
        .map_or(text.len(), |(i, _)| pos + i)
}
