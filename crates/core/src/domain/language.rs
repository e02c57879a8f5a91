#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    Rust,
    Cpp,
    C,
    Java,
    Python,
    Go,
    JavaScript,
    TypeScript,
}

/// Lexical markers the normalizer needs to tell comments apart from code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommentSyntax {
    pub line: &'static [&'static str],
    pub block: Option<(&'static str, &'static str)>,
    /// Characters that open (and close) a string or character literal.
    pub quotes: &'static [char],
    /// Raw literal delimiters. Backslash is an ordinary character inside them.
    pub raw_quotes: &'static [char],
    /// Python-style `'''` / `"""` literals.
    pub triple_quotes: bool,
}

const C_STYLE_LINE: &[&str] = &["//"];
const C_STYLE_BLOCK: Option<(&str, &str)> = Some(("/*", "*/"));

impl Language {
    pub fn comment_syntax(self) -> CommentSyntax {
        match self {
            // Lifetimes make `'` unreliable as a quote in Rust.
            Language::Rust => CommentSyntax {
                line: C_STYLE_LINE,
                block: C_STYLE_BLOCK,
                quotes: &['"'],
                raw_quotes: &[],
                triple_quotes: false,
            },
            Language::Cpp | Language::C | Language::Java => CommentSyntax {
                line: C_STYLE_LINE,
                block: C_STYLE_BLOCK,
                quotes: &['"', '\''],
                raw_quotes: &[],
                triple_quotes: false,
            },
            Language::Go => CommentSyntax {
                line: C_STYLE_LINE,
                block: C_STYLE_BLOCK,
                quotes: &['"', '\''],
                raw_quotes: &['`'],
                triple_quotes: false,
            },
            // Template literals honour escapes.
            Language::JavaScript | Language::TypeScript => CommentSyntax {
                line: C_STYLE_LINE,
                block: C_STYLE_BLOCK,
                quotes: &['"', '\'', '`'],
                raw_quotes: &[],
                triple_quotes: false,
            },
            Language::Python => CommentSyntax {
                line: &["#"],
                block: None,
                quotes: &['"', '\''],
                raw_quotes: &[],
                triple_quotes: true,
            },
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Language::Rust => "rust",
            Language::Cpp => "cpp",
            Language::C => "c",
            Language::Java => "java",
            Language::Python => "python",
            Language::Go => "go",
            Language::JavaScript => "javascript",
            Language::TypeScript => "typescript",
        }
    }
}
