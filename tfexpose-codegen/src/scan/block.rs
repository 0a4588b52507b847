//! Name and value extraction from a captured block.

use super::lexer::{is_identifier_char, skip_heredoc, skip_string, skip_to_eol, unquote};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ParsedBlock {
    pub name: String,
    pub value: String,
}

/// Parse `keyword "name" { ... value = <expr> ... }`.
///
/// Returns `None` when either the label or a top-level `value` assignment
/// is missing.
pub(crate) fn parse_block(keyword: &str, text: &str) -> Option<ParsedBlock> {
    let rest = text.trim_start().strip_prefix(keyword)?;
    let name = parse_label(rest)?;
    let value = find_value(text)?;
    Some(ParsedBlock { name, value })
}

fn parse_label(rest: &str) -> Option<String> {
    let rest = rest.trim_start();
    let label = match rest.strip_prefix('"') {
        Some(quoted) => &quoted[..quoted.find('"')?],
        None => {
            let end = rest
                .find(|c: char| !is_identifier_char(c))
                .unwrap_or(rest.len());
            &rest[..end]
        }
    };
    (!label.is_empty()).then(|| label.to_string())
}

/// The expression assigned to `value` at the top level of the block.
fn find_value(text: &str) -> Option<String> {
    let bytes = text.as_bytes();
    let mut depth = 0i32;
    let mut statement_start = false;
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'"' => {
                i = skip_string(bytes, i);
                statement_start = false;
                continue;
            }
            b'#' => {
                i = skip_to_eol(bytes, i);
                continue;
            }
            b'/' if bytes.get(i + 1) == Some(&b'/') => {
                i = skip_to_eol(bytes, i);
                continue;
            }
            b'<' => {
                statement_start = false;
                if let Some(end) = skip_heredoc(text, i) {
                    i = end;
                    continue;
                }
            }
            b'{' => {
                depth += 1;
                statement_start = true;
            }
            b'}' => {
                depth -= 1;
                statement_start = false;
            }
            b'\n' => statement_start = true,
            b' ' | b'\t' | b'\r' => {}
            b'v' if statement_start && depth == 1 => {
                if let Some(expression) = assignment(&text[i..], "value") {
                    return Some(value_expression(expression));
                }
                statement_start = false;
            }
            _ => statement_start = false,
        }
        i += 1;
    }
    None
}

/// Text after `key =` when `s` starts with that assignment.
fn assignment<'a>(s: &'a str, key: &str) -> Option<&'a str> {
    let rest = s.strip_prefix(key)?;
    if rest.starts_with(is_identifier_char) {
        return None;
    }
    let rest = rest.trim_start_matches([' ', '\t']).strip_prefix('=')?;
    (!rest.starts_with('=')).then_some(rest)
}

/// Everything up to the end of the line, a trailing comment, or the brace
/// closing the enclosing block, unquoted.
fn value_expression(s: &str) -> String {
    let bytes = s.as_bytes();
    let mut depth = 0i32;
    let mut end = bytes.len();
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'"' => {
                i = skip_string(bytes, i);
                continue;
            }
            b'\n' | b'#' => {
                end = i;
                break;
            }
            b'/' if bytes.get(i + 1) == Some(&b'/') => {
                end = i;
                break;
            }
            b'{' => depth += 1,
            b'}' if depth == 0 => {
                end = i;
                break;
            }
            b'}' => depth -= 1,
            _ => {}
        }
        i += 1;
    }

    unquote(s[..end].trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Option<ParsedBlock> {
        parse_block("output", text)
    }

    fn block(name: &str, value: &str) -> Option<ParsedBlock> {
        Some(ParsedBlock {
            name: name.to_string(),
            value: value.to_string(),
        })
    }

    #[test]
    fn test_multi_line_block() {
        let text = "output \"web_id\" {\n  value = aws_instance.web.id\n}";
        assert_eq!(parse(text), block("web_id", "aws_instance.web.id"));
    }

    #[test]
    fn test_single_line_block() {
        assert_eq!(
            parse(r#"output "x" { value = aws_instance.foo.id }"#),
            block("x", "aws_instance.foo.id")
        );
    }

    #[test]
    fn test_quoted_value_is_unquoted() {
        let text = "output \"output1\" {\n  value = \"value1\"\n}";
        assert_eq!(parse(text), block("output1", "value1"));
    }

    #[test]
    fn test_unquoted_label() {
        let text = "output web_id {\n  value = aws_instance.web.id\n}";
        assert_eq!(parse(text), block("web_id", "aws_instance.web.id"));
    }

    #[test]
    fn test_trailing_comment_is_dropped() {
        let text = "output \"a\" {\n  value = aws_vpc.main.id # the VPC\n}";
        assert_eq!(parse(text), block("a", "aws_vpc.main.id"));
    }

    #[test]
    fn test_value_after_other_attributes() {
        let text = "output \"a\" {\n  description = \"value = nope\"\n  sensitive   = true\n  value       = aws_vpc.main.id\n}";
        assert_eq!(parse(text), block("a", "aws_vpc.main.id"));
    }

    #[test]
    fn test_nested_value_is_not_taken() {
        let text = "output \"a\" {\n  precondition {\n    value = nested.thing.id\n  }\n  value = aws_vpc.main.id\n}";
        assert_eq!(parse(text), block("a", "aws_vpc.main.id"));
    }

    #[test]
    fn test_similar_keys_are_not_value() {
        let text = "output \"a\" {\n  values = x.y.z\n  value_b = p.q.r\n}";
        assert_eq!(parse(text), None);
    }

    #[test]
    fn test_missing_parts() {
        assert_eq!(parse("output \"a\" {\n  description = \"x\"\n}"), None);
        assert_eq!(parse("output {\n  value = a.b.c\n}"), None);
        assert_eq!(parse("output \"\" {\n  value = a.b.c\n}"), None);
    }

    #[test]
    fn test_heredoc_braces_are_ignored() {
        let text = "output \"a\" {\n  description = <<EOT\n  closes early }\n  value = nope.x.y\nEOT\n  value = aws_vpc.main.id\n}";
        assert_eq!(parse(text), block("a", "aws_vpc.main.id"));

        let text = "output \"a\" {\n  description = <<-EOT\n    {\n    EOT\n  value = aws_vpc.main.id\n}";
        assert_eq!(parse(text), block("a", "aws_vpc.main.id"));
    }

    #[test]
    fn test_object_value_keeps_braces() {
        let text = "output \"a\" { value = { id = x.y.z } }";
        assert_eq!(parse(text), block("a", "{ id = x.y.z }"));
    }
}
