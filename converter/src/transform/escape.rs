//! FSH string literal escaping.

/// Escape text for embedding between double quotes in FSH.
///
/// `\r\n` and bare `\r` become `\n`, then backslashes and double quotes are
/// escaped. Nothing else is touched.
///
/// # Example
/// ```
/// use fshgen::escape;
///
/// assert_eq!(escape(r#"tish "katta""#), r#"tish \"katta\""#);
/// assert_eq!(escape("a\r\nb"), "a\nb");
/// ```
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                out.push('\n');
            }
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            _ => out.push(c),
        }
    }

    out
}

/// [`escape`] for optional input; `None` escapes to an empty string.
pub fn escape_opt(text: Option<&str>) -> String {
    text.map(escape).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Reverse of the two escape sequences FSH defines for this subset.
    fn unescape(text: &str) -> String {
        let mut out = String::new();
        let mut chars = text.chars();
        while let Some(c) = chars.next() {
            if c == '\\' {
                if let Some(next) = chars.next() {
                    out.push(next);
                }
            } else {
                out.push(c);
            }
        }
        out
    }

    #[test]
    fn test_plain_text_untouched() {
        assert_eq!(escape("голова"), "голова");
        assert_eq!(escape("qo'l"), "qo'l");
        assert_eq!(escape(""), "");
    }

    #[test]
    fn test_quotes_and_backslashes() {
        assert_eq!(escape(r#"say "hi""#), r#"say \"hi\""#);
        assert_eq!(escape(r"C:\path"), r"C:\\path");
        // backslash escaped before quote, so \" becomes \\\"
        assert_eq!(escape(r#"\""#), r#"\\\""#);
    }

    #[test]
    fn test_line_endings_normalized() {
        assert_eq!(escape("a\r\nb"), "a\nb");
        assert_eq!(escape("a\rb"), "a\nb");
        assert_eq!(escape("a\r\r\nb"), "a\n\nb");
        assert_eq!(escape("a\n\rb"), "a\n\nb");
    }

    #[test]
    fn test_none_is_empty() {
        assert_eq!(escape_opt(None), "");
        assert_eq!(escape_opt(Some("\"")), "\\\"");
    }

    #[test]
    fn test_unescape_recovers_normalized_input() {
        let samples = [
            "plain",
            r#"quote " inside"#,
            r"trailing backslash \",
            r#"\" already escaped"#,
            "mixed\r\nlines\rand \\ \"quotes\"\n",
            r"\\\\",
        ];
        for s in samples {
            let normalized = s.replace("\r\n", "\n").replace('\r', "\n");
            assert_eq!(unescape(&escape(s)), normalized, "sample {s:?}");
        }
    }
}
