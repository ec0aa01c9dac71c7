use crate::{editing::EditError, parsing::Span};

/// A single replacement of `[from, to)` with `insert`, in byte offsets of the
/// text it applies to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextChange {
    pub from: usize,
    pub to: usize,
    pub insert: String,
}

impl TextChange {
    pub fn new(from: usize, to: usize, insert: impl Into<String>) -> Self {
        Self {
            from,
            to,
            insert: insert.into(),
        }
    }

    pub fn insert(at: usize, text: impl Into<String>) -> Self {
        Self::new(at, at, text)
    }

    pub fn delete(from: usize, to: usize) -> Self {
        Self::new(from, to, "")
    }

    pub fn span(&self) -> Span {
        Span::new(self.from, self.to)
    }

    pub fn is_noop(&self) -> bool {
        self.from == self.to && self.insert.is_empty()
    }

    /// Net change in text length.
    pub fn len_delta(&self) -> isize {
        self.insert.len() as isize - (self.to - self.from) as isize
    }

    /// Checks the change against the text it will be applied to.
    pub fn validate(&self, text: &str) -> Result<(), EditError> {
        if self.from > self.to {
            return Err(EditError::InvertedRange {
                from: self.from,
                to: self.to,
            });
        }
        if self.to > text.len() {
            return Err(EditError::OutOfBounds {
                offset: self.to,
                len: text.len(),
            });
        }
        for offset in [self.from, self.to] {
            if !text.is_char_boundary(offset) {
                return Err(EditError::NotCharBoundary { offset });
            }
        }
        Ok(())
    }
}

/// Where an edit proposal came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditOrigin {
    /// Typing, pasting, cutting: subject to suggestion mode.
    #[default]
    Input,
    /// Merge results, accept/reject, annotations: never rewritten.
    Programmatic,
}

/// A pending local edit handed to the suggestion filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditProposal {
    pub change: TextChange,
    pub origin: EditOrigin,
}

impl EditProposal {
    pub fn input(change: TextChange) -> Self {
        Self {
            change,
            origin: EditOrigin::Input,
        }
    }

    pub fn programmatic(change: TextChange) -> Self {
        Self {
            change,
            origin: EditOrigin::Programmatic,
        }
    }
}

/// Sorts changes by position and checks they do not overlap.
///
/// An insertion may sit exactly at the end of a preceding replacement.
pub fn normalize_changes(text: &str, changes: &mut Vec<TextChange>) -> Result<(), EditError> {
    changes.retain(|c| !c.is_noop());
    changes.sort_by_key(|c| (c.from, c.to));
    for c in changes.iter() {
        c.validate(text)?;
    }
    for pair in changes.windows(2) {
        if pair[1].from < pair[0].to {
            return Err(EditError::OverlappingChanges {
                first: pair[0].span(),
                second: pair[1].span(),
            });
        }
    }
    Ok(())
}

/// Applies sorted, non-overlapping changes to a string.
pub fn apply_to_string(text: &str, changes: &[TextChange]) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pos = 0;
    for c in changes {
        out.push_str(&text[pos..c.from]);
        out.push_str(&c.insert);
        pos = c.to;
    }
    out.push_str(&text[pos..]);
    out
}

/// Maps a position in the old text through sorted changes.
///
/// Positions inside a replaced region map to the end of its insertion.
pub fn map_position(pos: usize, changes: &[TextChange]) -> usize {
    let mut shift: isize = 0;
    for c in changes {
        if c.to <= pos && c.from < pos {
            shift += c.len_delta();
        } else if c.from < pos {
            return (c.from as isize + shift) as usize + c.insert.len();
        } else {
            break;
        }
    }
    (pos as isize + shift) as usize
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn applies_in_order() {
        let changes = vec![TextChange::delete(0, 1), TextChange::insert(3, "X")];
        assert_eq!(apply_to_string("abcd", &changes), "bcXd");
    }

    #[test]
    fn insertion_after_adjacent_replacement() {
        let mut changes = vec![TextChange::insert(2, "!"), TextChange::new(0, 2, "AB")];
        normalize_changes("abcd", &mut changes).unwrap();
        assert_eq!(changes[0].from, 0);
        assert_eq!(apply_to_string("abcd", &changes), "AB!cd");
    }

    #[test]
    fn overlap_is_rejected() {
        let mut changes = vec![TextChange::delete(0, 3), TextChange::delete(2, 4)];
        assert!(matches!(
            normalize_changes("abcd", &mut changes),
            Err(EditError::OverlappingChanges { .. })
        ));
    }

    #[test]
    fn validation_catches_bad_offsets() {
        assert!(matches!(
            TextChange::delete(0, 9).validate("abc"),
            Err(EditError::OutOfBounds { offset: 9, len: 3 })
        ));
        assert!(matches!(
            TextChange::new(2, 1, "").validate("abc"),
            Err(EditError::InvertedRange { .. })
        ));
        assert!(matches!(
            TextChange::insert(1, "x").validate("é"),
            Err(EditError::NotCharBoundary { offset: 1 })
        ));
    }

    #[test]
    fn map_position_through_changes() {
        let changes = vec![TextChange::new(1, 3, "XYZW"), TextChange::delete(5, 6)];
        assert_eq!(map_position(0, &changes), 0);
        assert_eq!(map_position(1, &changes), 1);
        assert_eq!(map_position(2, &changes), 5);
        assert_eq!(map_position(3, &changes), 5);
        assert_eq!(map_position(7, &changes), 8);
    }
}
