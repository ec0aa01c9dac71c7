/// Highlighted text, usually followed by a comment. Resolving unwraps it.
pub struct Highlight;

impl Highlight {
    pub const OPEN: &'static str = "{==";
    pub const CLOSE: &'static str = "==}";
}
