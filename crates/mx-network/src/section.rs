//! Isolates the `[Links]` section of a comment-free network blob.

use crate::{NetworkError, NetworkResult};

const SECTION: &str = "Links";
const HEADER: &str = "[Links]";

/// Return the body of the `[Links]` section.
///
/// When the header occurs more than once the last occurrence wins.
/// Everything before it and everything from the next differently
/// named `[...]` header onwards is dropped, space/tab runs collapse to one
/// space, and the header plus its opening `{` are removed.  The section's
/// closing `}` is left in place; the parser accepts it as a trailer.
pub fn extract_links_section(blob: &str) -> NetworkResult<String> {
    let start = blob.rfind(HEADER).ok_or(NetworkError::MissingSection(SECTION))?;
    let body = &blob[start + HEADER.len()..];

    let body = match next_foreign_header(body) {
        Some(end) => &body[..end],
        None => body,
    };

    let body = collapse_blanks(body);
    Ok(match body.find('{') {
        Some(open) => body[open + 1..].to_owned(),
        None => String::new(),
    })
}

/// Byte offset of the first `[name]` header whose name does not start with
/// `Links`.
fn next_foreign_header(text: &str) -> Option<usize> {
    text.match_indices('[').map(|(i, _)| i).find(|&i| {
        let name = &text[i + 1..];
        !name.starts_with(SECTION)
            && name.find(']').is_some_and(|close| close > 0)
    })
}

fn collapse_blanks(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_run = false;
    for c in text.chars() {
        if c == ' ' || c == '\t' {
            if !in_run {
                out.push(' ');
            }
            in_run = true;
        } else {
            out.push(c);
            in_run = false;
        }
    }
    out
}
