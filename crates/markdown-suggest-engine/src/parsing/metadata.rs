//! The optional `{"author":…,"timestamp":…}@@` block right after an opening
//! delimiter.

use serde_json::{Deserializer, Map, Value};

use super::{kinds::Preamble, types::Metadata};

/// Characters escaped inside preamble strings so that an author name can never
/// close its wrapper, split a substitution or end the preamble early.
const DELIMITER_CHARS: &[char] = &['{', '}', '+', '-', '~', '<', '=', '>', '@'];

/// Splits a captured payload into metadata and the remaining content.
///
/// Returns the metadata (if a well-formed preamble was found) and the number of
/// bytes the preamble occupies, including the `@@`. A brace block that is not
/// valid JSON is left in the content and reported as zero bytes consumed.
pub fn extract(raw: &str) -> (Option<Metadata>, usize) {
    if !raw.starts_with('{') {
        return (None, 0);
    }
    // The object ends where the JSON parser says it does, so a `}@@` inside a
    // string value does not cut it short.
    let mut stream = Deserializer::from_str(raw).into_iter::<Value>();
    let Some(Ok(Value::Object(map))) = stream.next() else {
        return (None, 0);
    };
    let end = stream.byte_offset();
    match raw.get(end..) {
        Some(rest) if rest.starts_with(Preamble::END) => {
            (Some(from_object(&map)), end + Preamble::END.len())
        }
        _ => (None, 0),
    }
}

fn from_object(map: &Map<String, Value>) -> Metadata {
    let author = map
        .get("author")
        .and_then(Value::as_str)
        .map(str::to_string);
    let timestamp = map
        .get("timestamp")
        .and_then(|v| v.as_i64().or_else(|| v.as_f64().map(|f| f as i64)));
    Metadata { author, timestamp }
}

/// Renders the preamble written into new wrappers, `@@` included.
pub fn format_preamble(meta: &Metadata) -> String {
    let mut map = Map::new();
    if let Some(author) = &meta.author {
        map.insert("author".into(), Value::String(author.clone()));
    }
    if let Some(ts) = meta.timestamp {
        map.insert("timestamp".into(), Value::from(ts));
    }
    format!("{}{}", escape_delimiters(&Value::Object(map).to_string()), Preamble::END)
}

/// Rewrites delimiter characters inside JSON string literals as `\uXXXX`.
fn escape_delimiters(json: &str) -> String {
    let mut out = String::with_capacity(json.len());
    let mut in_string = false;
    let mut escaped = false;
    for ch in json.chars() {
        if in_string && !escaped && DELIMITER_CHARS.contains(&ch) {
            out.push_str(&format!("\\u{:04x}", u32::from(ch)));
            continue;
        }
        if ch == '"' && !escaped {
            in_string = !in_string;
        }
        escaped = in_string && ch == '\\' && !escaped;
        out.push(ch);
    }
    out
}
