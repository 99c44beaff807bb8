use crate::interpreter::lexer::{Token, TokenKind};

/// Finds the bracket that closes the one at `tokens[0]`.
///
/// Brackets are counted with a depth counter; the contents between them are
/// not parsed.
///
/// # Parameters
/// - `tokens`: Tokens starting at an opening bracket of kind `open`.
/// - `open`, `close`: The bracket kinds, e.g. `LPrt`/`RPrt`.
///
/// # Returns
/// The index of the matching closing bracket, or `None` if the first token is
/// not `open` or the brackets never balance.
///
/// # Example
/// ```
/// use tea::interpreter::{
///     lexer::{TokenKind, tokenize},
///     parser::utils::find_matching,
/// };
///
/// let tokens = tokenize("{{}}{}").unwrap();
/// assert_eq!(find_matching(&tokens, TokenKind::LBlock, TokenKind::RBlock), Some(3));
/// ```
#[must_use]
pub fn find_matching(tokens: &[Token], open: TokenKind, close: TokenKind) -> Option<usize> {
    if tokens.first()?.kind != open {
        return None;
    }

    let mut depth = 0usize;
    for (i, token) in tokens.iter().enumerate() {
        if token.kind == open {
            depth += 1;
        } else if token.kind == close {
            depth -= 1;
            if depth == 0 {
                return Some(i);
            }
        }
    }
    None
}

/// Tests whether the token at `index` is the identifier `keyword`.
pub(in crate::interpreter::parser) fn is_keyword(tokens: &[Token],
                                                 index: usize,
                                                 keyword: &str)
                                                 -> bool {
    tokens.get(index)
          .is_some_and(|token| token.is(TokenKind::Identifier, keyword))
}

/// Tests whether the token at `index` is of `kind`.
pub(in crate::interpreter::parser) fn is_kind(tokens: &[Token], index: usize, kind: TokenKind) -> bool {
    tokens.get(index).is_some_and(|token| token.kind == kind)
}

/// Tests whether a statement starts with `<identifier> =`.
pub(in crate::interpreter::parser) fn is_assignment(tokens: &[Token]) -> bool {
    is_kind(tokens, 0, TokenKind::Identifier) && tokens.get(1).is_some_and(|token| token.is(TokenKind::Operator, "="))
}

/// Describes the token at `index` for messages.
pub(in crate::interpreter::parser) fn describe(tokens: &[Token], index: usize) -> String {
    tokens.get(index)
          .map_or_else(|| "end of input".to_string(), ToString::to_string)
}
