//! JSON-with-comments preprocessing
//!
//! Configuration files may carry `//` line comments, `/* */` block comments
//! and trailing commas. They are removed before the text reaches
//! `serde_json`, leaving string literals untouched. Newlines inside comments
//! are kept so parse errors still report the original line numbers.

/// Strip comments and trailing commas from JSON-with-comments text.
pub fn strip_jsonc(input: &str) -> String {
    strip_trailing_commas(&strip_comments(input))
}

fn strip_comments(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();
    let mut in_string = false;
    let mut escaped = false;

    while let Some(c) = chars.next() {
        if in_string {
            out.push(c);
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }

        match (c, chars.peek()) {
            ('"', _) => {
                in_string = true;
                out.push(c);
            }
            ('/', Some('/')) => {
                for next in chars.by_ref() {
                    if next == '\n' {
                        out.push('\n');
                        break;
                    }
                }
            }
            ('/', Some('*')) => {
                chars.next();
                let mut prev = '\0';
                for next in chars.by_ref() {
                    if prev == '*' && next == '/' {
                        break;
                    }
                    if next == '\n' {
                        out.push('\n');
                    }
                    prev = next;
                }
                out.push(' ');
            }
            _ => out.push(c),
        }
    }

    out
}

fn strip_trailing_commas(input: &str) -> String {
    let chars: Vec<char> = input.chars().collect();
    let mut out = String::with_capacity(input.len());
    let mut in_string = false;
    let mut escaped = false;

    for (idx, &c) in chars.iter().enumerate() {
        if in_string {
            out.push(c);
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }

        match c {
            '"' => {
                in_string = true;
                out.push(c);
            }
            ',' => {
                let next = chars[idx + 1..].iter().find(|ch| !ch.is_whitespace());
                if !matches!(next, Some('}') | Some(']')) {
                    out.push(c);
                }
            }
            _ => out.push(c),
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::{Value, json};

    fn parse(input: &str) -> Value {
        serde_json::from_str(&strip_jsonc(input)).unwrap()
    }

    #[test]
    fn removes_line_and_block_comments() {
        let input = r#"{
            // the projects
            "projects": { /* none yet */ }
        }"#;
        assert_eq!(parse(input), json!({"projects": {}}));
    }

    #[test]
    fn keeps_comment_markers_inside_strings() {
        let input = r#"{"url": "https://example.com/*x*/", "q": "a \" // b"}"#;
        assert_eq!(
            parse(input),
            json!({"url": "https://example.com/*x*/", "q": "a \" // b"})
        );
    }

    #[test]
    fn drops_trailing_commas() {
        let input = r#"{"list": [1, 2, 3,], "obj": {"a": 1,},}"#;
        assert_eq!(parse(input), json!({"list": [1, 2, 3], "obj": {"a": 1}}));
    }

    #[test]
    fn trailing_comma_before_comment_is_dropped() {
        let input = "{\"a\": 1, // last\n}";
        assert_eq!(parse(input), json!({"a": 1}));
    }

    #[test]
    fn preserves_line_numbers() {
        let input = "{\n/* one\ntwo */\n\"a\": 1\n}";
        let stripped = strip_jsonc(input);
        assert_eq!(stripped.lines().count(), input.lines().count());
    }
}
