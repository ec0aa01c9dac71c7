/// Proposed insertion. Accepting keeps the content, rejecting drops it.
pub struct Addition;

impl Addition {
    pub const OPEN: &'static str = "{++";
    pub const CLOSE: &'static str = "++}";
}
