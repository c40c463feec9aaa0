//! Directive rendering: the `.. kind:: version` header plus the indented,
//! word-wrapped reason text that follows it.

use crate::text;
use std::fmt;

/// Indent applied to every body line of a directive.
const BODY_INDENT: &str = "   ";

/// Width used when wrapping is disabled.
const UNBOUNDED_WIDTH: usize = 1 << 16;

/// The life-cycle directive attached to an entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DirectiveKind {
    VersionAdded,
    VersionChanged,
    Deprecated,
}

impl DirectiveKind {
    /// Directive name as written in documentation markup.
    pub fn as_str(self) -> &'static str {
        match self {
            DirectiveKind::VersionAdded => "versionadded",
            DirectiveKind::VersionChanged => "versionchanged",
            DirectiveKind::Deprecated => "deprecated",
        }
    }
}

impl fmt::Display for DirectiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rendered directive: a header line followed by the body lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectiveBlock {
    pub lines: Vec<String>,
}

impl DirectiveBlock {
    /// Render the block for `kind`/`version` with `reason` as its body.
    ///
    /// `line_length` counts the body indent; values of 3 or less disable
    /// wrapping. Empty lines inside the reason are kept as paragraph breaks.
    pub fn render(kind: DirectiveKind, version: &str, reason: &str, line_length: isize) -> Self {
        let header = if version.is_empty() {
            format!(".. {}::", kind)
        } else {
            format!(".. {}:: {}", kind, version)
        };
        let mut lines = vec![header];

        let width = if line_length > 3 {
            (line_length - 3) as usize
        } else {
            UNBOUNDED_WIDTH
        };

        let reason = text::dedent(reason);
        for paragraph in reason.trim().lines() {
            if paragraph.is_empty() {
                lines.push(String::new());
            } else {
                lines.extend(text::fill(paragraph, width, BODY_INDENT));
            }
        }

        DirectiveBlock { lines }
    }

    pub fn header(&self) -> &str {
        &self.lines[0]
    }

    /// The block as text, every line newline-terminated.
    pub fn to_text(&self) -> String {
        self.lines.iter().map(|line| format!("{}\n", line)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_only_without_reason() {
        let block = DirectiveBlock::render(DirectiveKind::VersionAdded, "1.0", "", 70);
        assert_eq!(block.lines, vec![".. versionadded:: 1.0"]);
    }

    #[test]
    fn header_without_version() {
        let block = DirectiveBlock::render(DirectiveKind::VersionChanged, "", "", 70);
        assert_eq!(block.header(), ".. versionchanged::");
    }

    #[test]
    fn single_line_reason() {
        let block = DirectiveBlock::render(
            DirectiveKind::Deprecated,
            "2.1.0",
            "Use `new_func` instead.",
            70,
        );
        assert_eq!(
            block.lines,
            vec![".. deprecated:: 2.1.0", "   Use `new_func` instead."]
        );
    }

    #[test]
    fn indented_reason_is_dedented_and_stripped() {
        let reason = "\n        First paragraph.\n\n        Second one.\n    ";
        let block = DirectiveBlock::render(DirectiveKind::VersionChanged, "1.2", reason, 70);
        assert_eq!(
            block.lines,
            vec![
                ".. versionchanged:: 1.2",
                "   First paragraph.",
                "",
                "   Second one.",
            ]
        );
    }

    #[test]
    fn long_reason_is_wrapped() {
        let reason = "This function is going away because a faster implementation \
                      now lives in the core module and should be used instead.";
        let block = DirectiveBlock::render(DirectiveKind::Deprecated, "3.0", reason, 40);
        assert!(block.lines.len() > 2);
        for line in &block.lines[1..] {
            assert!(line.starts_with(BODY_INDENT));
            assert!(line.chars().count() <= 37, "too long: {line:?}");
        }
    }

    #[test]
    fn small_line_length_disables_wrapping() {
        let reason = "a long reason that would normally be wrapped across several lines of text";
        for line_length in [3, 0, -1] {
            let block = DirectiveBlock::render(DirectiveKind::Deprecated, "1.0", reason, line_length);
            assert_eq!(block.lines.len(), 2);
            assert_eq!(block.lines[1], format!("   {}", reason));
        }
    }

    #[test]
    fn render_is_pure() {
        let a = DirectiveBlock::render(DirectiveKind::Deprecated, "1.0", "why\n\nnot", 20);
        let b = DirectiveBlock::render(DirectiveKind::Deprecated, "1.0", "why\n\nnot", 20);
        assert_eq!(a, b);
    }

    #[test]
    fn to_text_terminates_every_line() {
        let block = DirectiveBlock::render(DirectiveKind::Deprecated, "1.0", "Gone.", 70);
        assert_eq!(block.to_text(), ".. deprecated:: 1.0\n   Gone.\n");
    }
}
