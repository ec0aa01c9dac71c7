use std::ops::Range;

use xi_rope::{
    Delta, Rope, RopeInfo,
    delta::{Builder, DeltaElement},
};

use crate::{
    editing::{
        EditError, Patch, RangeIndex, Resolution, SuggestionSession, annotate,
        change::{EditProposal, TextChange, map_position, normalize_changes},
        resolve, suggest,
    },
    parsing::{ChangeRange, CommentThread, Span},
};

/// An open document in suggestion-aware editing.
///
/// The text lives in a single `xi_rope::Rope`. Every mutation compiles to a
/// `Delta`, bumps the version and rebuilds the [`RangeIndex`] before
/// returning, so ranges are never stale between calls.
///
/// ```rust
/// # use markdown_suggest_engine::editing::{Document, EditProposal, TextChange};
/// let mut doc = Document::from_bytes(b"hello").unwrap();
/// doc.set_author(Some("alice".into()));
/// doc.set_suggestion_mode(true);
///
/// let patch = doc.propose_at(EditProposal::input(TextChange::insert(5, "!")), 0).unwrap();
/// assert_eq!(doc.text(), r#"hello{++{"author":"alice","timestamp":0}@@!++}"#);
/// assert_eq!(patch.version, 1);
/// ```
pub struct Document {
    buffer: Rope,
    index: RangeIndex,
    /// Byte offsets in `buffer`.
    selection: Range<usize>,
    version: u64,
    session: SuggestionSession,
}

impl Document {
    pub fn from_bytes(bytes: &[u8]) -> anyhow::Result<Self> {
        let text = std::str::from_utf8(bytes)?;
        Ok(Self::from_text(text))
    }

    pub fn from_text(text: &str) -> Self {
        let len = text.len();
        Self {
            buffer: Rope::from(text),
            index: RangeIndex::new(text),
            selection: len..len,
            version: 0,
            session: SuggestionSession::default(),
        }
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        self.buffer.to_string().into_bytes()
    }

    pub fn text(&self) -> String {
        self.buffer.to_string()
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn selection(&self) -> Range<usize> {
        self.selection.clone()
    }

    pub fn set_selection(&mut self, selection: Range<usize>) {
        self.selection = selection;
    }

    pub fn index(&self) -> &RangeIndex {
        &self.index
    }

    pub fn ranges(&self) -> &[ChangeRange] {
        self.index.ranges()
    }

    pub fn threads(&self) -> &[CommentThread] {
        self.index.threads()
    }

    pub fn session(&self) -> &SuggestionSession {
        &self.session
    }

    pub fn set_session(&mut self, session: SuggestionSession) {
        self.session = session;
    }

    pub fn set_suggestion_mode(&mut self, enabled: bool) {
        log::debug!("suggestion mode {}", if enabled { "on" } else { "off" });
        self.session.enabled = enabled;
    }

    pub fn set_author(&mut self, author: Option<String>) {
        self.session.author = author;
    }

    pub fn set_merge_window(&mut self, window_ms: Option<i64>) {
        self.session.merge_window_ms = window_ms;
    }

    /// Applies a batch of changes as one edit.
    ///
    /// `cursor` is in post-edit offsets; without it the current selection is
    /// mapped through the changes.
    pub fn apply_changes(
        &mut self,
        mut changes: Vec<TextChange>,
        cursor: Option<usize>,
    ) -> Result<Patch, EditError> {
        let text = self.text();
        normalize_changes(&text, &mut changes)?;

        let mut builder = Builder::new(self.buffer.len());
        for c in &changes {
            builder.replace(c.from..c.to, Rope::from(c.insert.as_str()));
        }
        let delta = builder.build();
        let changed = changed_ranges(&delta);

        self.buffer = delta.apply(&self.buffer);
        self.index.update(&self.buffer.to_string());

        self.selection = match cursor {
            Some(c) => c..c,
            None => {
                map_position(self.selection.start, &changes)..map_position(self.selection.end, &changes)
            }
        };
        self.version += 1;

        Ok(Patch {
            changed,
            new_selection: self.selection.clone(),
            version: self.version,
        })
    }

    /// Runs a local edit through the suggestion filter, stamped with the
    /// current time.
    pub fn propose(&mut self, proposal: EditProposal) -> Result<Patch, EditError> {
        self.propose_at(proposal, now_millis())
    }

    pub fn propose_at(&mut self, proposal: EditProposal, timestamp: i64) -> Result<Patch, EditError> {
        let text = self.text();
        let filtered = suggest::filter_edit(&text, &self.index, &proposal, &self.session, timestamp)?;
        let cursor = filtered.selection.or_else(|| {
            // Pass-through: caret after the inserted text.
            let c = &proposal.change;
            Some(c.from + c.insert.len())
        });
        self.apply_changes(filtered.changes, cursor)
    }

    /// Accepts the range under `pos`. `None` when there is nothing there;
    /// the document is left untouched.
    pub fn accept_at(&mut self, pos: usize) -> Option<Patch> {
        self.resolve_at(pos, Resolution::Accept)
    }

    pub fn reject_at(&mut self, pos: usize) -> Option<Patch> {
        self.resolve_at(pos, Resolution::Reject)
    }

    pub fn resolve_at(&mut self, pos: usize, resolution: Resolution) -> Option<Patch> {
        let change = resolve::resolve(pos, self.index.ranges(), resolution)?;
        let cursor = change.from + change.insert.len();
        self.apply_changes(vec![change], Some(cursor)).ok()
    }

    /// Resolves every range in the document. `None` when there is no markup.
    pub fn resolve_all(&mut self, resolution: Resolution) -> Option<Patch> {
        if self.index.ranges().is_empty() {
            return None;
        }
        let text = self.text();
        let resolved = resolve::resolve_all(&text, resolution);
        self.apply_changes(vec![TextChange::new(0, text.len(), resolved)], None).ok()
    }

    /// Removes the comment thread under `pos`.
    pub fn resolve_thread_at(&mut self, pos: usize) -> Option<Patch> {
        let change = resolve::resolve_thread(self.index.thread_at(pos)?);
        let cursor = change.from;
        self.apply_changes(vec![change], Some(cursor)).ok()
    }

    /// Comments on `selection`; see [`annotate::add_comment`].
    pub fn add_comment(&mut self, selection: Range<usize>, body: &str) -> Result<Patch, EditError> {
        let text = self.text();
        let change = annotate::add_comment(
            &text,
            &self.index,
            Span::from(selection),
            body,
            &self.session,
            now_millis(),
        )?;
        let cursor = change.from + change.insert.len();
        self.apply_changes(vec![change], Some(cursor))
    }

    /// Replies to the thread under `pos`. `None` when there is no thread.
    pub fn reply_at(&mut self, pos: usize, body: &str) -> Option<Patch> {
        let thread = self.index.thread_at(pos)?;
        let change = annotate::reply(thread, body, &self.session, now_millis());
        let cursor = change.from + change.insert.len();
        self.apply_changes(vec![change], Some(cursor)).ok()
    }
}

/// Byte ranges in the new text touched by `delta`.
fn changed_ranges(delta: &Delta<RopeInfo>) -> Vec<Range<usize>> {
    fn mark_point(changed: &mut Vec<Range<usize>>, at: usize) {
        if changed.last().is_none_or(|r| r.end != at) {
            changed.push(at..at);
        }
    }

    let mut changed = Vec::new();
    let mut old_pos = 0;
    let mut new_pos = 0;
    for el in &delta.els {
        match el {
            DeltaElement::Copy(from, to) => {
                if *from > old_pos {
                    mark_point(&mut changed, new_pos);
                }
                new_pos += to - from;
                old_pos = *to;
            }
            DeltaElement::Insert(inserted) => {
                changed.push(new_pos..new_pos + inserted.len());
                new_pos += inserted.len();
            }
        }
    }
    if old_pos < delta.base_len {
        mark_point(&mut changed, new_pos);
    }
    changed
}

/// Wall-clock time in epoch milliseconds.
pub fn now_millis() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or_default()
}
