/// Proposed removal. Accepting drops the content, rejecting keeps it.
pub struct Deletion;

impl Deletion {
    pub const OPEN: &'static str = "{--";
    pub const CLOSE: &'static str = "--}";
}
