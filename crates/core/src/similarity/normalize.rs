use crate::domain::{CommentSyntax, Language};

/// Source code reduced to its canonical form. Empty when nothing but
/// comments and whitespace was submitted.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NormalizedCode(String);

impl NormalizedCode {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

/// Strips comments and canonicalizes whitespace.
///
/// Normalizing an already normalized string returns it unchanged. Unterminated
/// comments and literals are kept verbatim to the end of input.
pub fn normalize(source: &str, language: Language) -> NormalizedCode {
    let stripped = strip_comments(source, language.comment_syntax());
    NormalizedCode(collapse_whitespace(&stripped))
}

fn strip_comments(source: &str, syntax: CommentSyntax) -> String {
    let mut out = String::with_capacity(source.len());
    let mut pos = 0;

    while pos < source.len() {
        let rest = &source[pos..];

        if let Some((open, close)) = syntax.block
            && rest.starts_with(open)
        {
            match rest[open.len()..].find(close) {
                Some(end) => {
                    out.push(' ');
                    pos += open.len() + end + close.len();
                }
                None => {
                    out.push_str(rest);
                    break;
                }
            }
            continue;
        }

        if syntax.line.iter().any(|marker| rest.starts_with(marker)) {
            match rest.find('\n') {
                Some(newline) => pos += newline,
                None => break,
            }
            continue;
        }

        let Some(first) = rest.chars().next() else {
            break;
        };

        if syntax.raw_quotes.contains(&first) {
            let len = raw_literal_len(rest, first);
            out.push_str(&rest[..len]);
            pos += len;
            continue;
        }

        if syntax.quotes.contains(&first) {
            let len = literal_len(rest, first, syntax.triple_quotes);
            out.push_str(&rest[..len]);
            pos += len;
            continue;
        }

        out.push(first);
        pos += first.len_utf8();
    }

    out
}

/// Byte length of the literal opening at the start of `rest`, or all of
/// `rest` when the literal never closes.
fn literal_len(rest: &str, quote: char, triple_quotes: bool) -> usize {
    let opening_quotes = rest.chars().take(3).filter(|&c| c == quote).count();
    let delimiter_len = if triple_quotes && opening_quotes == 3 {
        3
    } else {
        1
    };
    let delimiter = &rest[..delimiter_len * quote.len_utf8()];

    let mut chars = rest.char_indices().skip(delimiter_len);
    while let Some((idx, c)) = chars.next() {
        if c == '\\' {
            chars.next();
            continue;
        }
        if rest[idx..].starts_with(delimiter) {
            return idx + delimiter.len();
        }
    }

    rest.len()
}

/// Like [`literal_len`] for literals without escape sequences.
fn raw_literal_len(rest: &str, quote: char) -> usize {
    let open = quote.len_utf8();
    rest[open..]
        .find(quote)
        .map_or(rest.len(), |end| open + end + quote.len_utf8())
}

// Delimiters never appear in comment markers or quotes, so removing the
// whitespace around them cannot fuse a new marker.
fn is_delimiter(c: char) -> bool {
    matches!(c, '(' | ')' | '[' | ']' | '{' | '}' | ';' | ',')
}

fn collapse_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last: Option<char> = None;
    let mut pending_space = false;

    for c in text.chars() {
        if c.is_whitespace() {
            pending_space = true;
            continue;
        }

        if pending_space
            && let Some(prev) = last
            && !is_delimiter(prev)
            && !is_delimiter(c)
        {
            out.push(' ');
        }

        out.push(c);
        last = Some(c);
        pending_space = false;
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn norm(source: &str, language: Language) -> String {
        normalize(source, language).into_inner()
    }

    #[test]
    fn layout_differences_disappear() {
        assert_eq!(norm("int main(){return 0;}", Language::C), "int main(){return 0;}");
        assert_eq!(
            norm("int   main ( ) { return 0 ; }", Language::C),
            "int main(){return 0;}"
        );
    }

    #[test]
    fn newlines_and_indentation_collapse() {
        let source = "def f(x):\n\n    return x + 1\n";

        assert_eq!(norm(source, Language::Python), "def f(x): return x + 1");
    }

    #[test]
    fn c_style_comments_are_removed() {
        let source = "int x = 1; // counter\n/* block\n comment */int y = 2;";

        assert_eq!(norm(source, Language::Cpp), "int x = 1;int y = 2;");
    }

    #[test]
    fn block_comment_does_not_fuse_neighbouring_tokens() {
        assert_eq!(norm("return/**/value", Language::Java), "return value");
    }

    #[test]
    fn python_hash_comments_are_removed() {
        let source = "# header\nx = 1  # trailing\nprint(x)";

        assert_eq!(norm(source, Language::Python), "x = 1 print(x)");
    }

    #[test]
    fn comment_markers_inside_strings_are_kept() {
        let source = r#"let url = "http://example.com"; // site"#;

        assert_eq!(
            norm(source, Language::JavaScript),
            r#"let url = "http://example.com";"#
        );
    }

    #[test]
    fn escaped_quote_does_not_end_literal() {
        let source = r#"s = "a \" # not a comment" # comment"#;

        assert_eq!(
            norm(source, Language::Python),
            r#"s = "a \" # not a comment""#
        );
    }

    #[test]
    fn python_triple_quoted_strings_hide_hashes() {
        let source = "doc = '''one\n# two'''\n# gone";

        assert_eq!(norm(source, Language::Python), "doc = '''one # two'''");
    }

    #[test]
    fn rust_lifetimes_do_not_open_literals() {
        let source = "fn f<'a>(x: &'a str) {} // note";

        assert_eq!(norm(source, Language::Rust), "fn f<'a>(x: &'a str){}");
    }

    #[test]
    fn go_raw_strings_end_at_the_next_backtick() {
        let source = "path := `C:\\` // drive\nx := 1";

        assert_eq!(norm(source, Language::Go), "path := `C:\\` x := 1");
    }

    #[test]
    fn unterminated_block_comment_is_kept() {
        let source = "int a; /* never closed\n int b;";

        assert_eq!(norm(source, Language::C), "int a;/* never closed int b;");
    }

    #[test]
    fn unterminated_string_is_kept() {
        let source = "x = \"open // still string\ny";

        assert_eq!(
            norm(source, Language::Go),
            "x = \"open // still string y"
        );
    }

    #[test]
    fn empty_and_comment_only_sources_normalize_to_empty() {
        assert!(normalize("", Language::Rust).is_empty());
        assert!(normalize("   \n\t ", Language::Rust).is_empty());
        assert!(normalize("// only a comment", Language::Rust).is_empty());
        assert!(normalize("/* a */ /* b */", Language::Rust).is_empty());
    }

    #[test]
    fn normalizing_twice_is_stable() {
        let sources = [
            "a / /* x */ / b",
            "'' /* c */ 'x'",
            "s = '\\\n  ' # t",
            "x = \"abc\\",
            "* /**/ /",
        ];

        for language in [Language::C, Language::Python, Language::JavaScript] {
            for source in sources {
                let once = normalize(source, language);
                let twice = normalize(once.as_str(), language);
                assert_eq!(once, twice, "source {source:?} in {language:?}");
            }
        }
    }
}
