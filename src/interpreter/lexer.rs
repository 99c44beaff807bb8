use std::fmt;

use logos::Logos;

use crate::error::ParseError;

/// Classification of a lexical token.
///
/// Keywords such as `var`, `if` or `true` are plain identifiers; the parser
/// gives them meaning by their text.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"//[^\n]*")]
pub enum TokenKind {
    /// Numeric literals such as `42` or `3.14`.
    #[regex(r"[0-9]+(\.[0-9]+)?")]
    Number,
    /// Double quoted strings with `\"` and `\\` escapes.
    #[regex(r#""([^"\\]|\\.)*""#)]
    String,
    /// Names of variables, datatypes, functions and keywords.
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*")]
    Identifier,
    /// Operator symbols.
    #[regex(r"==|!=|<=|>=|&&|\|\||\^\||[-+*/^%<>=!:]")]
    Operator,
    /// `,`
    #[token(",")]
    Separator,
    /// `;`
    #[token(";")]
    Statement,
    /// `(`
    #[token("(")]
    LPrt,
    /// `)`
    #[token(")")]
    RPrt,
    /// `{`
    #[token("{")]
    LBlock,
    /// `}`
    #[token("}")]
    RBlock,
    /// Runs of blanks and line breaks. Stripped before parsing.
    #[regex(r"[ \t\r\n\f]+")]
    Whitespace,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Number => "NUMBER",
            Self::String => "STRING",
            Self::Identifier => "IDENTIFIER",
            Self::Operator => "OPERATOR",
            Self::Separator => "SEPARATOR",
            Self::Statement => "STATEMENT",
            Self::LPrt => "LPRT",
            Self::RPrt => "RPRT",
            Self::LBlock => "LBLOCK",
            Self::RBlock => "RBLOCK",
            Self::Whitespace => "WHITESPACE",
        };
        write!(f, "{name}")
    }
}

/// A classified slice of source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// What the text is.
    pub kind: TokenKind,
    /// The text exactly as written, quotes included for strings.
    pub text: String,
}

impl Token {
    /// Creates a token from its kind and text.
    #[must_use]
    pub fn new(kind: TokenKind, text: impl Into<String>) -> Self {
        Self { kind,
               text: text.into() }
    }

    /// Tests kind and text at once.
    #[must_use]
    pub fn is(&self, kind: TokenKind, text: &str) -> bool {
        self.kind == kind && self.text == text
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} '{}'", self.kind, self.text)
    }
}

/// Splits source text into tokens.
///
/// Whitespace tokens are kept; [`Parser::generate`] removes them.
///
/// # Errors
/// Returns `ParseError::UnexpectedCharacter` at the first character that
/// starts no token.
///
/// # Example
/// ```
/// use tea::interpreter::lexer::{TokenKind, tokenize};
///
/// let tokens = tokenize("var x int = 2;").unwrap();
/// let kinds: Vec<TokenKind> = tokens.iter()
///                                   .map(|t| t.kind)
///                                   .filter(|k| *k != TokenKind::Whitespace)
///                                   .collect();
///
/// assert_eq!(kinds,
///            vec![TokenKind::Identifier,
///                 TokenKind::Identifier,
///                 TokenKind::Identifier,
///                 TokenKind::Operator,
///                 TokenKind::Number,
///                 TokenKind::Statement]);
/// ```
///
/// [`Parser::generate`]: crate::interpreter::parser::core::Parser::generate
pub fn tokenize(source: &str) -> Result<Vec<Token>, ParseError> {
    let mut lexer = TokenKind::lexer(source);
    let mut tokens = Vec::new();

    while let Some(kind) = lexer.next() {
        match kind {
            Ok(kind) => tokens.push(Token::new(kind, lexer.slice())),
            Err(()) => {
                return Err(ParseError::UnexpectedCharacter { text: lexer.slice().to_string() });
            },
        }
    }

    Ok(tokens)
}

/// Removes the whitespace tokens, which carry no meaning for the parser.
#[must_use]
pub fn strip_whitespace(tokens: Vec<Token>) -> Vec<Token> {
    tokens.into_iter()
          .filter(|token| token.kind != TokenKind::Whitespace)
          .collect()
}

/// Strips the quotes of a string token and resolves its escapes.
///
/// # Example
/// ```
/// use tea::interpreter::lexer::unquote;
///
/// assert_eq!(unquote(r#""say \"hi\"""#), r#"say "hi""#);
/// assert_eq!(unquote(r#""a\nb""#), "a\nb");
/// ```
#[must_use]
pub fn unquote(text: &str) -> String {
    let inner = text.strip_prefix('"')
                    .and_then(|s| s.strip_suffix('"'))
                    .unwrap_or(text);

    let mut result = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            result.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => result.push('\n'),
            Some('t') => result.push('\t'),
            Some(other) => result.push(other),
            None => result.push('\\'),
        }
    }
    result
}
