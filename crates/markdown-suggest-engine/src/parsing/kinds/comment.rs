/// Comment text. Adjacent comments form a thread; resolving removes them.
pub struct Comment;

impl Comment {
    pub const OPEN: &'static str = "{>>";
    pub const CLOSE: &'static str = "<<}";
}
