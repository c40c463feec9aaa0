//! Plain-text helpers: dedent and paragraph fill.
//!
//! Both follow the classic doc-string conventions: `dedent` removes the
//! longest common run of leading blanks (spaces and tabs, compared
//! literally) and `fill` word-wraps one paragraph with a fixed indent on
//! every produced line.

const TAB_SIZE: usize = 8;

/// Remove the common leading whitespace from every line of `text`.
///
/// Lines made only of spaces and tabs are emptied and ignored when the
/// margin is computed. Line terminators are preserved.
pub fn dedent(text: &str) -> String {
    let lines: Vec<(&str, &str)> = text.split_inclusive('\n').map(split_terminator).collect();

    let mut margin: Option<&str> = None;
    for (content, _) in &lines {
        if is_blank(content) {
            continue;
        }
        let indent = leading_blanks(content);
        margin = Some(match margin {
            None => indent,
            Some(m) => common_prefix(m, indent),
        });
    }
    let margin = margin.unwrap_or("");

    let mut out = String::with_capacity(text.len());
    for (content, terminator) in lines {
        if !is_blank(content) {
            out.push_str(content.strip_prefix(margin).unwrap_or(content));
        }
        out.push_str(terminator);
    }
    out
}

/// Word-wrap a single paragraph so that no line exceeds `width`
/// characters, indent included. Every line starts with `indent`.
///
/// Words longer than the available room are split; at least one character
/// is placed on each line, so a non-positive room never loops forever.
pub fn fill(paragraph: &str, width: usize, indent: &str) -> Vec<String> {
    let chunks = split_chunks(&munge_whitespace(paragraph));
    wrap_chunks(chunks, width, indent)
}

fn split_terminator(line: &str) -> (&str, &str) {
    let content = line
        .strip_suffix("\r\n")
        .or_else(|| line.strip_suffix('\n'))
        .unwrap_or(line);
    (content, &line[content.len()..])
}

fn is_blank(line: &str) -> bool {
    line.chars().all(|c| c == ' ' || c == '\t')
}

fn leading_blanks(line: &str) -> &str {
    let rest = line.trim_start_matches([' ', '\t']);
    &line[..line.len() - rest.len()]
}

fn common_prefix<'a>(a: &'a str, b: &str) -> &'a str {
    let n = a
        .bytes()
        .zip(b.bytes())
        .take_while(|(x, y)| x == y)
        .count();
    &a[..n]
}

/// Expand tabs to 8-column stops and turn every whitespace char into a
/// plain space.
fn munge_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut column = 0;
    for c in text.chars() {
        match c {
            '\t' => {
                let pad = TAB_SIZE - column % TAB_SIZE;
                out.extend(std::iter::repeat(' ').take(pad));
                column += pad;
            }
            '\n' | '\r' => {
                out.push(' ');
                column = 0;
            }
            '\x0b' | '\x0c' => {
                out.push(' ');
                column += 1;
            }
            _ => {
                out.push(c);
                column += 1;
            }
        }
    }
    out
}

/// Split into whitespace runs, words and em-dashes.
///
/// A word ends after a hyphen preceded by two letters (or by
/// letter-hyphen-letter) and followed by two letters, optionally
/// hyphen-separated. A run of two or more hyphens between word characters
/// is a chunk of its own.
fn split_chunks(text: &str) -> Vec<Vec<char>> {
    let chars: Vec<char> = text.chars().collect();
    let mut chunks = Vec::new();
    let mut start = 0;
    while start < chars.len() {
        let end = if chars[start] == ' ' {
            start + chars[start..].iter().take_while(|c| **c == ' ').count()
        } else if let Some(end) = em_dash_end(&chars, start) {
            end
        } else {
            word_end(&chars, start)
        };
        chunks.push(chars[start..end].to_vec());
        start = end;
    }
    chunks
}

fn word_end(chars: &[char], start: usize) -> usize {
    let mut end = start + 1;
    while end < chars.len() && chars[end] != ' ' {
        if is_hyphen_break(chars, end) {
            return end + 1;
        }
        if em_dash_end(chars, end).is_some() {
            return end;
        }
        end += 1;
    }
    end
}

/// End of a `--` run starting at `at`, when it sits between word characters.
fn em_dash_end(chars: &[char], at: usize) -> Option<usize> {
    if at == 0 || !is_word_punct(chars[at - 1]) {
        return None;
    }
    let run = chars[at..].iter().take_while(|c| **c == '-').count();
    (run >= 2 && chars.get(at + run).is_some_and(|c| is_word(*c))).then_some(at + run)
}

fn is_hyphen_break(chars: &[char], at: usize) -> bool {
    let letter = |i: usize| chars.get(i).is_some_and(|c| is_letter(*c));
    if chars[at] != '-' {
        return false;
    }
    let behind = (at >= 2 && letter(at - 1) && letter(at - 2))
        || (at >= 3 && letter(at - 1) && chars[at - 2] == '-' && letter(at - 3));
    let ahead = letter(at + 1)
        && (letter(at + 2) || (chars.get(at + 2) == Some(&'-') && letter(at + 3)));
    behind && ahead
}

fn is_word(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Word characters other than digits.
fn is_letter(c: char) -> bool {
    is_word(c) && !c.is_numeric()
}

fn is_word_punct(c: char) -> bool {
    is_word(c) || matches!(c, '!' | '"' | '\'' | '&' | '.' | ',' | '?')
}

fn wrap_chunks(mut chunks: Vec<Vec<char>>, width: usize, indent: &str) -> Vec<String> {
    let room = width as isize - indent.chars().count() as isize;
    let mut lines: Vec<String> = Vec::new();
    chunks.reverse();

    while !chunks.is_empty() {
        let mut current: Vec<Vec<char>> = Vec::new();
        let mut len: isize = 0;

        // Leading whitespace survives only on the paragraph's first line.
        if !lines.is_empty() && chunks.last().is_some_and(|c| is_space_chunk(c)) {
            chunks.pop();
        }

        while let Some(chunk) = chunks.last() {
            if len + chunk.len() as isize <= room {
                len += chunk.len() as isize;
                current.extend(chunks.pop());
            } else {
                break;
            }
        }

        if chunks.last().is_some_and(|c| c.len() as isize > room) {
            split_long_word(&mut chunks, &mut current, len, room);
        }

        if current.last().is_some_and(|c| is_space_chunk(c)) {
            current.pop();
        }

        if !current.is_empty() {
            let mut line = String::from(indent);
            for chunk in &current {
                line.extend(chunk.iter());
            }
            lines.push(line);
        }
    }
    lines
}

fn split_long_word(chunks: &mut [Vec<char>], current: &mut Vec<Vec<char>>, len: isize, room: isize) {
    let space_left = if room < 1 { 1 } else { (room - len).max(0) as usize };
    if let Some(chunk) = chunks.last_mut() {
        let mut end = space_left.min(chunk.len());
        // Prefer breaking just after the last hyphen that fits.
        if let Some(hyphen) = chunk[..end].iter().rposition(|c| *c == '-') {
            if hyphen > 0 && chunk[..hyphen].iter().any(|c| *c != '-') {
                end = hyphen + 1;
            }
        }
        let rest = chunk.split_off(end);
        current.push(std::mem::replace(chunk, rest));
    }
}

fn is_space_chunk(chunk: &[char]) -> bool {
    chunk.iter().all(|c| *c == ' ')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dedent_basic() {
        assert_eq!(dedent("  a\n  b\n  c"), "a\nb\nc");
    }

    #[test]
    fn dedent_mixed() {
        assert_eq!(dedent("  a\n    b\n  c\n"), "a\n  b\nc\n");
    }

    #[test]
    fn dedent_ignores_blank_lines() {
        assert_eq!(dedent("    a\n  \n    b\n"), "a\n\nb\n");
    }

    #[test]
    fn dedent_compares_tabs_literally() {
        assert_eq!(dedent("\t a\n\t  b"), "a\n b");
        assert_eq!(dedent("\ta\n    b"), "\ta\n    b");
    }

    #[test]
    fn dedent_keeps_crlf_terminators() {
        assert_eq!(dedent("    a\r\n\r\n      b\r\n"), "a\r\n\r\n  b\r\n");
    }

    #[test]
    fn dedent_no_margin() {
        assert_eq!(dedent("a\n  b"), "a\n  b");
        assert_eq!(dedent(""), "");
    }

    #[test]
    fn fill_short_line() {
        assert_eq!(fill("Use it.", 67, "   "), vec!["   Use it."]);
    }

    #[test]
    fn fill_wraps_on_words() {
        let lines = fill("aaa bbb ccc ddd", 10, "   ");
        assert_eq!(lines, vec!["   aaa bbb", "   ccc ddd"]);
    }

    #[test]
    fn fill_never_exceeds_width() {
        let text = "The quick brown fox jumps over the lazy dog and keeps running";
        for line in fill(text, 20, "   ") {
            assert!(line.chars().count() <= 20, "too long: {line:?}");
            assert!(line.starts_with("   "));
        }
    }

    #[test]
    fn fill_keeps_leading_space_of_first_line() {
        assert_eq!(fill("  indented text", 67, "   "), vec!["     indented text"]);
    }

    #[test]
    fn fill_splits_long_words() {
        assert_eq!(fill("abcdefgh", 7, "   "), vec!["   abcd", "   efgh"]);
    }

    #[test]
    fn fill_one_char_when_no_room() {
        assert_eq!(fill("abc", 2, "   "), vec!["   a", "   b", "   c"]);
    }

    #[test]
    fn fill_breaks_after_hyphen() {
        assert_eq!(
            fill("well-known", 11, "   "),
            vec!["   well-", "   known"]
        );
    }

    #[test]
    fn fill_breaks_around_em_dashes() {
        assert_eq!(
            fill("word--word word--word", 10, "   "),
            vec!["   word--", "   word", "   word--", "   word"]
        );
    }

    #[test]
    fn fill_breaks_long_words_at_hyphens() {
        assert_eq!(
            fill("e-mail-address-x", 8, "   "),
            vec!["   e-", "   mail-", "   addre", "   ss-x"]
        );
    }

    #[test]
    fn fill_hyphen_after_letter_hyphen_letter() {
        assert_eq!(
            fill("ab-c-d ab-c-d", 8, "   "),
            vec!["   ab-", "   c-d", "   ab-", "   c-d"]
        );
        assert_eq!(
            fill("snake_case-words", 14, "   "),
            vec!["   snake_case-", "   words"]
        );
    }

    #[test]
    fn fill_keeps_short_hyphenated_words_whole() {
        assert_eq!(fill("x-ray x-ray", 8, "   "), vec!["   x-ray", "   x-ray"]);
        assert_eq!(fill("foo-b foo-b", 8, "   "), vec!["   foo-b", "   foo-b"]);
        assert_eq!(
            fill("1990-2000 1990-2000", 12, "   "),
            vec!["   1990-2000", "   1990-2000"]
        );
    }

    #[test]
    fn chunks_follow_word_separators() {
        let split = |s: &str| -> Vec<String> {
            split_chunks(s).into_iter().map(|c| c.into_iter().collect()).collect()
        };
        assert_eq!(split("a-b-c-d"), vec!["a-b-", "c-d"]);
        assert_eq!(split("ab---cd"), vec!["ab", "---", "cd"]);
        assert_eq!(split("---abc"), vec!["---abc"]);
        assert_eq!(split("ab--"), vec!["ab--"]);
        assert_eq!(split("e-mail"), vec!["e-mail"]);
    }

    #[test]
    fn fill_expands_tabs() {
        assert_eq!(fill("a\tb", 67, ""), vec!["a       b"]);
    }

    #[test]
    fn fill_blank_paragraph_is_empty() {
        assert!(fill("", 67, "   ").is_empty());
    }
}
