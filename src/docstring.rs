//! Splicing a rendered directive into an existing doc string.

use crate::directive::DirectiveBlock;
use crate::text;

/// Normalise `doc` and append `block` after exactly one blank line.
///
/// The first line is kept verbatim; the remaining lines are dedented
/// together. An absent or empty doc string becomes a single newline so the
/// directive never directly follows the entity it documents.
pub fn splice(doc: Option<&str>, block: &DirectiveBlock) -> String {
    let mut out = normalize(doc.unwrap_or(""));

    if out.is_empty() {
        out.push('\n');
    } else {
        out.truncate(out.trim_end_matches(['\r', '\n']).len());
        out.push_str("\n\n");
    }

    out.push_str(&block.to_text());
    out
}

/// First line verbatim, the rest dedented as a block.
fn normalize(doc: &str) -> String {
    match doc.split_once('\n') {
        Some((first, rest)) => format!("{}\n{}", first, text::dedent(rest)),
        None => doc.to_string(),
    }
}
