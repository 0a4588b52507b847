//! Character-level helpers shared by the line recognizer and the block parser.
//!
//! Only the lexical structure needed to find block boundaries is modelled:
//! double-quoted strings with backslash escapes, `#` / `//` line comments
//! and `<<TAG` / `<<-TAG` heredocs. Braces inside any of them never count.

/// Brace balance of one line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct BraceScan {
    pub delta: i32,
    pub opened: bool,
    /// Tag of a heredoc opened on this line; its body starts on the next one.
    pub heredoc: Option<String>,
}

pub(crate) fn scan_braces(line: &str) -> BraceScan {
    let mut scan = BraceScan::default();
    let mut chars = line.char_indices().peekable();
    let mut in_string = false;

    while let Some((idx, c)) = chars.next() {
        if in_string {
            match c {
                '\\' => {
                    chars.next();
                }
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match c {
            '"' => in_string = true,
            '#' => break,
            '/' if matches!(chars.peek(), Some((_, '/'))) => break,
            '<' => {
                if let Some(tag) = heredoc_tag(&line[idx..]) {
                    scan.heredoc = Some(tag.to_string());
                    break;
                }
            }
            '{' => {
                scan.delta += 1;
                scan.opened = true;
            }
            '}' => scan.delta -= 1,
            _ => {}
        }
    }
    scan
}

/// Tag of the heredoc introduced by `s`, which starts at `<<`.
pub(crate) fn heredoc_tag(s: &str) -> Option<&str> {
    let rest = s.strip_prefix("<<")?;
    let rest = rest.strip_prefix('-').unwrap_or(rest);
    let end = rest
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
        .unwrap_or(rest.len());
    let tag = &rest[..end];
    tag.starts_with(|c: char| c.is_ascii_alphabetic() || c == '_')
        .then_some(tag)
}

/// Whether `line` terminates the heredoc tagged `tag`.
pub(crate) fn closes_heredoc(line: &str, tag: &str) -> bool {
    line.trim() == tag
}

/// Byte index of the newline ending the terminator of the heredoc opened
/// at `start`, or the end of `text` when it is never terminated.
pub(crate) fn skip_heredoc(text: &str, start: usize) -> Option<usize> {
    let tag = heredoc_tag(&text[start..])?;
    let bytes = text.as_bytes();
    let mut eol = skip_to_eol(bytes, start);

    while eol < bytes.len() {
        let body = eol + 1;
        eol = skip_to_eol(bytes, body);
        if closes_heredoc(&text[body..eol], tag) {
            return Some(eol);
        }
    }
    Some(bytes.len())
}

/// Whether a trimmed line is a `#` or `//` comment.
pub(crate) fn is_comment(trimmed: &str) -> bool {
    trimmed.starts_with('#') || trimmed.starts_with("//")
}

/// Whether a trimmed line opens a block of the given kind.
///
/// `output = "json"` is an attribute named like the keyword, not a block.
pub(crate) fn starts_with_keyword(trimmed: &str, keyword: &str) -> bool {
    trimmed.strip_prefix(keyword).is_some_and(|rest| {
        rest.chars()
            .next()
            .is_some_and(|c| c.is_whitespace() || c == '"' || c == '{')
            && !rest.trim_start().starts_with('=')
    })
}

pub(crate) fn is_identifier_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-'
}

/// Byte index just past the string literal opening at `start`.
pub(crate) fn skip_string(bytes: &[u8], start: usize) -> usize {
    let mut i = start + 1;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b'"' => return i + 1,
            b'\n' => return i,
            _ => i += 1,
        }
    }
    bytes.len()
}

/// Byte index of the next newline at or after `start`, or the end.
pub(crate) fn skip_to_eol(bytes: &[u8], start: usize) -> usize {
    bytes[start..]
        .iter()
        .position(|&b| b == b'\n')
        .map_or(bytes.len(), |p| start + p)
}

/// Strip one layer of double quotes, resolving `\"` and `\\`.
pub(crate) fn unquote(s: &str) -> String {
    let Some(inner) = s
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
        .filter(|_| s.len() >= 2)
    else {
        return s.to_string();
    };

    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some(escaped @ ('"' | '\\')) => out.push(escaped),
                Some(other) => {
                    out.push('\\');
                    out.push(other);
                }
                None => out.push('\\'),
            }
        } else {
            out.push(c);
        }
    }
    out
}
