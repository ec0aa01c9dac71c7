/// Proposed replacement of `old` with `new`.
///
/// Only the old side may carry a metadata preamble.
pub struct Substitution;

impl Substitution {
    pub const OPEN: &'static str = "{~~";
    pub const SEPARATOR: &'static str = "~>";
    pub const CLOSE: &'static str = "~~}";
}
