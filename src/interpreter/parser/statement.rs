use tracing::trace;

use crate::{
    ast::Node,
    error::ParseError,
    interpreter::{
        lexer::{Token, TokenKind},
        parser::{
            core::{ParseResult, Parser},
            utils::{describe, is_assignment, is_kind},
        },
        value::core::Value,
    },
};

impl Parser {
    /// Parses statements until an unmatched `}` or the end of the tokens.
    ///
    /// # Returns
    /// The statements and the number of tokens consumed. A closing `}` that
    /// ends the sequence is not consumed.
    pub fn parse_statements(&self, tokens: &[Token]) -> ParseResult<(Vec<Node>, usize)> {
        let mut statements = Vec::new();
        let mut i = 0;

        while i < tokens.len() && tokens[i].kind != TokenKind::RBlock {
            let (nodes, consumed) = self.parse_statement(&tokens[i..])?;
            statements.extend(nodes);
            i += consumed;
        }

        Ok((statements, i))
    }

    /// Parses one statement.
    ///
    /// A declaration may expand into several nodes; an empty statement (`;`)
    /// yields none.
    ///
    /// # Returns
    /// The nodes and the number of tokens consumed.
    ///
    /// # Errors
    /// - `NotImplemented` for `func`, `for` and `import`.
    /// - `UnexpectedToken` for statements starting with `,` or `)`.
    /// - Errors of the sub-parsers.
    pub fn parse_statement(&self, tokens: &[Token]) -> ParseResult<(Vec<Node>, usize)> {
        let Some(first) = tokens.first() else {
            return Ok((Vec::new(), 0));
        };
        if self.config.trace {
            trace!(token = %first, "statement");
        }

        let single = |(node, consumed): (Node, usize)| (vec![node], consumed);

        match first.kind {
            TokenKind::Statement => Ok((Vec::new(), 1)),
            TokenKind::LBlock => self.parse_block(tokens).map(single),
            TokenKind::Identifier => match first.text.as_str() {
                "var" => self.parse_declaration(tokens),
                "if" => self.parse_branch(tokens).map(single),
                "while" => self.parse_loop(tokens).map(single),
                "return" => self.parse_return(tokens).map(single),
                "break" => Ok((vec![Node::Break], 1 + usize::from(is_kind(tokens, 1, TokenKind::Statement)))),
                "continue" => Ok((vec![Node::Continue], 1 + usize::from(is_kind(tokens, 1, TokenKind::Statement)))),
                "func" | "for" | "import" => Err(ParseError::NotImplemented { keyword: first.text.clone() }),
                _ if is_assignment(tokens) => self.parse_assignment(tokens).map(single),
                _ => self.parse_expression(tokens).map(single),
            },
            TokenKind::Number | TokenKind::String | TokenKind::Operator | TokenKind::LPrt => {
                self.parse_expression(tokens).map(single)
            },
            TokenKind::Separator | TokenKind::RPrt | TokenKind::RBlock | TokenKind::Whitespace => {
                Err(ParseError::UnexpectedToken { token: first.to_string() })
            },
        }
    }

    /// Parses `<name> = <expr>`.
    fn parse_assignment(&self, tokens: &[Token]) -> ParseResult<(Node, usize)> {
        let rest = &tokens[2..];
        if rest.first().is_none_or(|token| matches!(token.kind, TokenKind::Statement | TokenKind::RBlock)) {
            return Err(ParseError::InvalidAssignment);
        }

        let (child, consumed) = self.parse_expression(rest)?;
        Ok((Node::Assignment { name:  tokens[0].text.clone(),
                               child: Box::new(child), },
            2 + consumed))
    }

    /// Parses `return [<expr>] ;`. A missing value returns `null`.
    fn parse_return(&self, tokens: &[Token]) -> ParseResult<(Node, usize)> {
        match tokens.get(1).map(|token| token.kind) {
            Some(TokenKind::Statement) => Ok((Node::Return(Box::new(Node::Literal(Value::null()))), 2)),
            None | Some(TokenKind::RBlock) => Ok((Node::Return(Box::new(Node::Literal(Value::null()))), 1)),
            Some(_) => {
                let (child, consumed) = self.parse_expression(&tokens[1..])?;
                Ok((Node::Return(Box::new(child)), 1 + consumed))
            },
        }
    }

    /// Parses `var <name> [: <name>]* <type> [= <expr>] ;`.
    ///
    /// Expands into one declaration per name followed, when an initializer
    /// is present, by one assignment per name, each holding its own copy of
    /// the initializer.
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
    /// let tokens = strip_whitespace(tokenize("var a : b int;").unwrap());
    /// let (nodes, consumed) = Parser::default().parse_declaration(&tokens).unwrap();
    ///
    /// assert_eq!(consumed, 6);
    /// assert_eq!(nodes,
    ///            vec![Node::Declaration { name:     "a".to_string(),
    ///                                     datatype: "int".to_string(), },
    ///                 Node::Declaration { name:     "b".to_string(),
    ///                                     datatype: "int".to_string(), }]);
    /// ```
    ///
    /// # Errors
    /// `InvalidDeclaration` naming the first token that breaks the pattern.
    pub fn parse_declaration(&self, tokens: &[Token]) -> ParseResult<(Vec<Node>, usize)> {
        let invalid = |index: usize| ParseError::InvalidDeclaration { found: describe(tokens, index) };
        let identifier = |index: usize| match tokens.get(index) {
            Some(token) if token.kind == TokenKind::Identifier => Ok(token.text.clone()),
            _ => Err(invalid(index)),
        };

        let mut names = vec![identifier(1)?];
        let mut i = 2;
        while tokens.get(i).is_some_and(|token| token.is(TokenKind::Operator, ":")) {
            names.push(identifier(i + 1)?);
            i += 2;
        }
        let datatype = identifier(i)?;
        i += 1;

        let mut nodes: Vec<Node> = names.iter()
                                        .map(|name| Node::Declaration { name:     name.clone(),
                                                                        datatype: datatype.clone(), })
                                        .collect();

        match tokens.get(i) {
            Some(token) if token.kind == TokenKind::Statement => Ok((nodes, i + 1)),
            Some(token) if token.is(TokenKind::Operator, "=") => {
                let rest = &tokens[i + 1..];
                if rest.first().is_none_or(|token| token.kind == TokenKind::Statement) {
                    return Err(invalid(i + 1));
                }
                let (initializer, consumed) = self.parse_expression(rest)?;
                let end = i + consumed;
                if !is_kind(tokens, end, TokenKind::Statement) {
                    return Err(invalid(end + 1));
                }

                nodes.extend(names.into_iter().map(|name| Node::Assignment { name,
                                                                             child: Box::new(initializer.clone()) }));
                Ok((nodes, end + 1))
            },
            _ => Err(invalid(i)),
        }
    }
}
