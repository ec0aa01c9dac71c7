//! # HTML Rendering
//!
//! Read-only views of a document for review outside the editor.
//! [`critic_to_html`] swaps markup for inline HTML and leaves the markdown
//! around it alone; [`markdown_to_html`] runs the result through
//! `pulldown-cmark`.

use pulldown_cmark::{Options, Parser, html};

use crate::parsing::{ChangeKind, ChangeRange, parse};

/// Rewrites markup as `<ins>`, `<del>`, `<mark>` and comment spans.
///
/// Text inside additions, deletions, substitutions and highlights is document
/// markdown and is passed through untouched, inline HTML included, the same as
/// the text around it. Comment bodies are annotations, not document text, and
/// are HTML-escaped.
pub fn critic_to_html(text: &str) -> String {
    let ranges = parse(text);
    let mut out = String::with_capacity(text.len());
    let mut pos = 0;
    for r in &ranges {
        // Nested ranges are rendered with their parent's content.
        if r.span.start < pos {
            continue;
        }
        out.push_str(&text[pos..r.span.start]);
        render_range(r, &mut out);
        pos = r.span.end;
    }
    out.push_str(&text[pos..]);
    out
}

fn render_range(r: &ChangeRange, out: &mut String) {
    let title = title_attr(r);
    match r.kind {
        ChangeKind::Addition => wrap(out, "ins", &title, &critic_to_html(&r.content)),
        ChangeKind::Deletion => wrap(out, "del", &title, &critic_to_html(&r.content)),
        ChangeKind::Substitution => {
            let old = r.old_content.as_deref().unwrap_or_default();
            let new = r.new_content.as_deref().unwrap_or_default();
            wrap(out, "del", &title, &critic_to_html(old));
            wrap(out, "ins", &title, &critic_to_html(new));
        }
        ChangeKind::Highlight => wrap(out, "mark", "", &critic_to_html(&r.content)),
        ChangeKind::Comment => {
            out.push_str(r#"<span class="critic comment""#);
            out.push_str(&title);
            out.push('>');
            out.push_str(&html_escape::encode_text(&r.content));
            out.push_str("</span>");
        }
    }
}

fn title_attr(r: &ChangeRange) -> String {
    match r.author() {
        Some(author) => format!(
            r#" title="{}""#,
            html_escape::encode_double_quoted_attribute(author)
        ),
        None => String::new(),
    }
}

fn wrap(out: &mut String, tag: &str, attrs: &str, inner: &str) {
    out.push_str(&format!("<{tag}{attrs}>{inner}</{tag}>"));
}

/// Renders markdown with markup shown as inline HTML.
pub fn markdown_to_html(text: &str) -> String {
    let marked = critic_to_html(text);
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);

    let mut out = String::new();
    html::push_html(&mut out, Parser::new_ext(&marked, options));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("a {++b++} c", "a <ins>b</ins> c")]
    #[case("a {--b--} c", "a <del>b</del> c")]
    #[case("{~~old~>new~~}", "<del>old</del><ins>new</ins>")]
    #[case("{==look==}", "<mark>look</mark>")]
    #[case("{>>x < y<<}", r#"<span class="critic comment">x &lt; y</span>"#)]
    #[case("no markup", "no markup")]
    fn renders_each_kind(#[case] text: &str, #[case] expected: &str) {
        assert_eq!(critic_to_html(text), expected);
    }

    #[test]
    fn document_html_passes_through_but_comments_are_escaped() {
        assert_eq!(
            critic_to_html("<b>a</b> {++<i>b</i>++}{>><i>c</i><<}"),
            r#"<b>a</b> <ins><i>b</i></ins><span class="critic comment">&lt;i&gt;c&lt;/i&gt;</span>"#
        );
    }

    #[test]
    fn author_goes_in_title() {
        let text = r#"{++{"author":"Al \"Q\"","timestamp":1}@@hi++}"#;
        assert_eq!(
            critic_to_html(text),
            r#"<ins title="Al &quot;Q&quot;">hi</ins>"#
        );
    }

    #[test]
    fn nested_markup_inside_highlight() {
        assert_eq!(
            critic_to_html("{==keep {--this--}==}"),
            "<mark>keep <del>this</del></mark>"
        );
    }

    #[test]
    fn markdown_around_markup_is_rendered() {
        assert_eq!(
            markdown_to_html("Hello **bold** {++world++}"),
            "<p>Hello <strong>bold</strong> <ins>world</ins></p>\n"
        );
    }
}
