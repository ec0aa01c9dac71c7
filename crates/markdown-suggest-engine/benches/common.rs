// Benchmark helper functions - Rust's dead code analysis doesn't understand
// that these are used by benchmark files in the same directory
// See: https://users.rust-lang.org/t/cargo-rustc-benches-awarnings/110111/2
#[allow(dead_code)]
pub fn generate_plain_content(size: usize) -> String {
    let base = "# Title\n\nParagraph with some content that nobody has reviewed yet.\n\n- Bullet point\n- Another item\n\n";
    base.repeat(size)
}

/// Markdown with every markup kind, with and without metadata.
#[allow(dead_code)]
pub fn generate_marked_up_content(size: usize) -> String {
    let mut content = String::new();
    for i in 0..size {
        content.push_str(&format!("## Section {i}\n\n"));
        content.push_str("Some text {++added by someone++} and {--removed--} words.\n");
        content.push_str(&format!(
            "A {{~~{{\"author\":\"user{i}\",\"timestamp\":{i}}}@@draft~>final~~}} edit.\n"
        ));
        content.push_str("{==Quoted text==}{>>Why this?<<}{>>Because.<<}\n\n");
    }
    content
}
