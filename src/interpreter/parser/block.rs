use crate::{
    ast::{Conditional, Node},
    error::ParseError,
    interpreter::{
        lexer::{Token, TokenKind},
        parser::{
            core::{ParseResult, Parser},
            utils::{find_matching, is_keyword},
        },
    },
};

/// The arms of an `if` chain and its `else` body.
type BranchParts = (Vec<Conditional>, Option<Box<Node>>);

impl Parser {
    /// Parses a brace-delimited block into a [`Node::Sequence`].
    ///
    /// Grammar: `block := "{" statement* "}"`
    ///
    /// # Parameters
    /// - `tokens`: Tokens starting at the opening brace.
    ///
    /// # Returns
    /// The sequence and the number of tokens consumed, closing brace
    /// included.
    ///
    /// # Errors
    /// `InvalidBlock` if the tokens do not start with `{` or the braces never
    /// balance.
    pub fn parse_block(&self, tokens: &[Token]) -> ParseResult<(Node, usize)> {
        let close = find_matching(tokens, TokenKind::LBlock, TokenKind::RBlock).ok_or(ParseError::InvalidBlock)?;
        let inner = &tokens[1..close];

        let (statements, consumed) = self.parse_statements(inner)?;
        if consumed != inner.len() {
            return Err(ParseError::InvalidBlock);
        }

        Ok((Node::Sequence(statements), close + 1))
    }

    /// Parses `( <condition> ) { <body> }`.
    ///
    /// The condition is delimited by bracket matching and then handed to the
    /// expression parser, which must consume all of it.
    fn parse_conditional(&self, tokens: &[Token]) -> ParseResult<(Conditional, usize)> {
        let close = find_matching(tokens, TokenKind::LPrt, TokenKind::RPrt).ok_or(ParseError::InvalidCondition)?;
        let inner = &tokens[1..close];
        if inner.is_empty() {
            return Err(ParseError::InvalidCondition);
        }

        let (condition, consumed) = self.parse_expression(inner)?;
        if consumed != inner.len() {
            return Err(ParseError::InvalidCondition);
        }

        let (body, consumed) = self.parse_block(&tokens[close + 1..])?;
        Ok((Conditional { condition, body }, close + 1 + consumed))
    }

    /// Parses an `if` chain starting at the `if` keyword.
    ///
    /// Every `else if` recurses; the arms of the whole chain are flattened
    /// into one [`Node::Branch`].
    ///
    /// # Example
    /// ```
    /// use tea::{
    ///     ast::Node,
    ///     interpreter::{
    ///         lexer::{strip_whitespace, tokenize},
    ///         parser::core::Parser,
    ///     },
    /// };
    ///
    /// let source = "if (a) {1;} else if (b) {2;} else {3;} x;";
    /// let tokens = strip_whitespace(tokenize(source).unwrap());
    /// let (node, consumed) = Parser::default().parse_branch(&tokens).unwrap();
    ///
    /// let Node::Branch { conditionals, otherwise } = node else { panic!() };
    /// assert_eq!(conditionals.len(), 2);
    /// assert!(otherwise.is_some());
    /// assert_eq!(consumed, tokens.len() - 2);
    /// ```
    ///
    /// # Errors
    /// `InvalidCondition` or `InvalidBlock` for malformed arms.
    pub fn parse_branch(&self, tokens: &[Token]) -> ParseResult<(Node, usize)> {
        let ((conditionals, otherwise), consumed) = self.parse_branch_parts(tokens)?;
        Ok((Node::Branch { conditionals,
                           otherwise },
            consumed))
    }

    fn parse_branch_parts(&self, tokens: &[Token]) -> ParseResult<(BranchParts, usize)> {
        let (conditional, mut consumed) = self.parse_conditional(&tokens[1..])?;
        consumed += 1;
        let mut conditionals = vec![conditional];

        if !is_keyword(tokens, consumed, "else") {
            return Ok(((conditionals, None), consumed));
        }
        consumed += 1;

        if is_keyword(tokens, consumed, "if") {
            let ((rest, otherwise), rest_consumed) = self.parse_branch_parts(&tokens[consumed..])?;
            conditionals.extend(rest);
            return Ok(((conditionals, otherwise), consumed + rest_consumed));
        }

        let (otherwise, rest_consumed) = self.parse_block(&tokens[consumed..])?;
        Ok(((conditionals, Some(Box::new(otherwise))), consumed + rest_consumed))
    }

    /// Parses `while ( <condition> ) { <body> }` starting at the keyword.
    ///
    /// # Errors
    /// `InvalidCondition` or `InvalidBlock` for a malformed loop.
    pub fn parse_loop(&self, tokens: &[Token]) -> ParseResult<(Node, usize)> {
        let (Conditional { condition, body }, consumed) = self.parse_conditional(&tokens[1..])?;
        Ok((Node::Loop { condition: Box::new(condition),
                         body:      Box::new(body), },
            consumed + 1))
    }
}
