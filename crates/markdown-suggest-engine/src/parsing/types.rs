use serde::Serialize;

use super::{
    kinds::{Addition, Comment, Deletion, Highlight, Substitution},
    span::Span,
};

/// The five markup kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ChangeKind {
    Addition,
    Deletion,
    Substitution,
    Comment,
    Highlight,
}

impl ChangeKind {
    /// All kinds, in the order the scanner visits them.
    pub const ALL: [ChangeKind; 5] = [
        ChangeKind::Addition,
        ChangeKind::Deletion,
        ChangeKind::Substitution,
        ChangeKind::Comment,
        ChangeKind::Highlight,
    ];

    pub fn open(self) -> &'static str {
        match self {
            ChangeKind::Addition => Addition::OPEN,
            ChangeKind::Deletion => Deletion::OPEN,
            ChangeKind::Substitution => Substitution::OPEN,
            ChangeKind::Comment => Comment::OPEN,
            ChangeKind::Highlight => Highlight::OPEN,
        }
    }

    pub fn close(self) -> &'static str {
        match self {
            ChangeKind::Addition => Addition::CLOSE,
            ChangeKind::Deletion => Deletion::CLOSE,
            ChangeKind::Substitution => Substitution::CLOSE,
            ChangeKind::Comment => Comment::CLOSE,
            ChangeKind::Highlight => Highlight::CLOSE,
        }
    }

    /// Lowercase name, as shown to users.
    pub fn name(self) -> &'static str {
        match self {
            ChangeKind::Addition => "addition",
            ChangeKind::Deletion => "deletion",
            ChangeKind::Substitution => "substitution",
            ChangeKind::Comment => "comment",
            ChangeKind::Highlight => "highlight",
        }
    }
}

impl std::fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Author and time recorded in a `{...}@@` preamble.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Metadata {
    pub author: Option<String>,
    /// Epoch milliseconds.
    pub timestamp: Option<i64>,
}

/// One recognised markup span.
///
/// `span` covers the whole wrapper including delimiters; `content_span`
/// covers the payload after the opening delimiter and any metadata preamble.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChangeRange {
    pub kind: ChangeKind,
    pub span: Span,
    pub content_span: Span,
    /// Raw payload. For substitutions this is `old~>new`.
    pub content: String,
    pub old_content: Option<String>,
    pub new_content: Option<String>,
    pub metadata: Option<Metadata>,
}

impl ChangeRange {
    pub fn from(&self) -> usize {
        self.span.start
    }

    pub fn to(&self) -> usize {
        self.span.end
    }

    pub fn content_from(&self) -> usize {
        self.content_span.start
    }

    pub fn content_to(&self) -> usize {
        self.content_span.end
    }

    pub fn author(&self) -> Option<&str> {
        self.metadata.as_ref().and_then(|m| m.author.as_deref())
    }

    pub fn timestamp(&self) -> Option<i64> {
        self.metadata.as_ref().and_then(|m| m.timestamp)
    }

    /// Span of the old side of a substitution.
    pub fn old_span(&self) -> Option<Span> {
        let old = self.old_content.as_ref()?;
        let start = self.content_span.start;
        Some(Span::new(start, start + old.len()))
    }

    /// Span of the new side of a substitution.
    pub fn new_span(&self) -> Option<Span> {
        let new = self.new_content.as_ref()?;
        let end = self.content_span.end;
        Some(Span::new(end - new.len(), end))
    }

    /// Opening delimiter plus preamble.
    pub fn opening_markup(&self) -> Span {
        Span::new(self.span.start, self.content_span.start)
    }

    pub fn closing_markup(&self) -> Span {
        Span::new(self.content_span.end, self.span.end)
    }

    /// The `~>` separator of a substitution.
    pub fn separator_markup(&self) -> Option<Span> {
        let old = self.old_span()?;
        let new = self.new_span()?;
        Some(Span::new(old.end, new.start))
    }
}
