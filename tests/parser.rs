use pretty_assertions::assert_eq;
use tea::{
    ast::{Node, Operation},
    error::ParseError,
    interpreter::{
        lexer::{Token, TokenKind, strip_whitespace, tokenize},
        parser::{
            core::{Parser, ParserConfig},
            precedence::{UNARY_PRECEDENCE, binary_tags, should_reduce, tags_for},
            utils::find_matching,
        },
        value::core::Value,
    },
};

fn parse(src: &str) -> Node {
    Parser::default().parse(src)
                     .unwrap_or_else(|e| panic!("Failed to parse {src:?}: {e}"))
}

fn parse_error(src: &str) -> ParseError {
    match Parser::default().parse(src) {
        Ok(node) => panic!("Parsed {src:?} into {node} but expected an error"),
        Err(e) => e,
    }
}

fn tokens(src: &str) -> Vec<Token> {
    strip_whitespace(tokenize(src).unwrap())
}

#[test]
fn expression_trees() {
    assert_eq!(parse("2 + 3 * 4;").to_string(), "{ (2 + (3 * 4)); }");
    assert_eq!(parse("2 ^ 3 ^ 2;").to_string(), "{ (2 ^ (3 ^ 2)); }");
    assert_eq!(parse("1 - 2 - 3;").to_string(), "{ ((1 - 2) - 3); }");
    assert_eq!(parse("a % b + c;").to_string(), "{ (a % (b + c)); }");
    assert_eq!(parse("a < b && c;").to_string(), "{ ((a < b) && c); }");
}

#[test]
fn unary_and_binary_are_told_apart() {
    assert_eq!(parse("-x + 1;").to_string(), "{ ((-x) + 1); }");
    assert_eq!(parse("(a) - 1;").to_string(), "{ (a - 1); }");
    assert_eq!(parse("a - -b;").to_string(), "{ (a - (-b)); }");
    assert_eq!(parse("!a && b;").to_string(), "{ ((!a) && b); }");
    assert_eq!(parse("-2 ^ 2;").to_string(), "{ ((-2) ^ 2); }");
}

#[test]
fn calls_collect_their_arguments() {
    assert_eq!(parse("f(1, 2 + 3, g());").to_string(), "{ f(1, (2 + 3), g()); }");
    assert_eq!(parse("f(-1) * 2;").to_string(), "{ (f((-1)) * 2); }");
}

#[test]
fn literals() {
    let Node::Sequence(statements) = parse("1; 1.5; \"s\"; true; null;") else {
        panic!("root is not a sequence");
    };
    assert_eq!(statements,
               vec![Node::literal(1_i64),
                    Node::literal(1.5),
                    Node::literal("s"),
                    Node::literal(true),
                    Node::Literal(Value::null())]);
}

#[test]
fn cast_operations_become_cast_nodes() {
    let Node::Sequence(statements) = parse("x : int + 1;") else {
        panic!("root is not a sequence");
    };
    let [Node::Operation(Operation { symbol, children, .. })] = statements.as_slice() else {
        panic!("unexpected statements {statements:?}");
    };

    assert_eq!(symbol, "+");
    assert_eq!(children[0],
               Node::Cast { datatype: "int".to_string(),
                            child:    Box::new(Node::identifier("x")), });
    assert_eq!(parse("(a + b) : float;").to_string(), "{ ((a + b) : float); }");
}

#[test]
fn cast_targets_must_be_names() {
    assert_eq!(parse_error("1 : 2;"), ParseError::InvalidCast { found: "2".to_string() });
    assert!(matches!(parse_error("a : (b + c);"), ParseError::InvalidCast { .. }));
}

#[test]
fn expressions_report_consumed_tokens() {
    let parser = Parser::default();

    let (node, consumed) = parser.parse_expression(&tokens("a + b } c")).unwrap();
    assert_eq!((node.to_string(), consumed), ("(a + b)".to_string(), 3));

    let (_, consumed) = parser.parse_expression(&tokens("a; b")).unwrap();
    assert_eq!(consumed, 2);

    let (_, consumed) = parser.parse_expression(&tokens("f(a, b)")).unwrap();
    assert_eq!(consumed, 6);
}

#[test]
fn declarations_expand_into_assignments() {
    let (nodes, consumed) = Parser::default().parse_declaration(&tokens("var a : b int = 5; x")).unwrap();

    assert_eq!(consumed, 8);
    assert_eq!(nodes,
               vec![Node::Declaration { name:     "a".to_string(),
                                        datatype: "int".to_string(), },
                    Node::Declaration { name:     "b".to_string(),
                                        datatype: "int".to_string(), },
                    Node::Assignment { name:  "a".to_string(),
                                       child: Box::new(Node::literal(5_i64)), },
                    Node::Assignment { name:  "b".to_string(),
                                       child: Box::new(Node::literal(5_i64)), }]);
}

#[test]
fn malformed_declarations() {
    assert_eq!(parse_error("var a int"),
               ParseError::InvalidDeclaration { found: "end of input".to_string() });
    assert_eq!(parse_error("var 5 int;"),
               ParseError::InvalidDeclaration { found: "NUMBER '5'".to_string() });
    assert_eq!(parse_error("var a int = ;"),
               ParseError::InvalidDeclaration { found: "STATEMENT ';'".to_string() });
    assert_eq!(parse_error("{ var a int = 1 }"),
               ParseError::InvalidDeclaration { found: "end of input".to_string() });
}

#[test]
fn statements() {
    assert_eq!(parse("x = 1 + 2;").to_string(), "{ x = (1 + 2); }");
    assert_eq!(parse("return;").to_string(), "{ return null; }");
    assert_eq!(parse("return 1 + 1;").to_string(), "{ return (1 + 1); }");
    assert_eq!(parse(";;break;continue").to_string(), "{ break; continue; }");
    assert_eq!(parse("{ 1; { 2 } }").to_string(), "{ { 1; { 2; }; }; }");
}

#[test]
fn branches_flatten_else_if_chains() {
    let Node::Sequence(statements) = parse("if (a) { 1; } else if (b) { 2; } else { 3; }") else {
        panic!("root is not a sequence");
    };
    let [Node::Branch { conditionals, otherwise }] = statements.as_slice() else {
        panic!("unexpected statements {statements:?}");
    };

    assert_eq!(conditionals.len(), 2);
    assert_eq!(conditionals[1].condition, Node::identifier("b"));
    assert_eq!(otherwise.as_deref(), Some(&Node::Sequence(vec![Node::literal(3_i64)])));
}

#[test]
fn loops() {
    assert_eq!(parse("while (i < 3) { i = i + 1; }").to_string(),
               "{ while ((i < 3)) { i = (i + 1); }; }");
}

#[test]
fn malformed_programs() {
    assert_eq!(parse_error("1; }"), ParseError::InvalidBlock);
    assert_eq!(parse_error("{ 1;"), ParseError::InvalidBlock);
    assert_eq!(parse_error("(1 + 2;"), ParseError::UnbalancedParentheses);
    assert_eq!(parse_error("1 + 2);"), ParseError::UnbalancedParentheses);
    assert_eq!(parse_error("1 +;"), ParseError::MissingOperand { operator: "+".to_string() });
    assert_eq!(parse_error("1 2;"), ParseError::InvalidExpression);
    assert_eq!(parse_error("x = ;"), ParseError::InvalidAssignment);
    assert_eq!(parse_error("1 = 2;"), ParseError::UnknownOperator { operator: "=".to_string() });
    assert_eq!(parse_error("if () { }"), ParseError::InvalidCondition);
    assert_eq!(parse_error("while (a) 1;"), ParseError::InvalidBlock);
    assert_eq!(parse_error(", 1;"), ParseError::UnexpectedToken { token: "SEPARATOR ','".to_string() });
    assert_eq!(parse_error("a, b;"), ParseError::UnexpectedToken { token: "SEPARATOR ','".to_string() });
    assert_eq!(parse_error("func f() { }"), ParseError::NotImplemented { keyword: "func".to_string() });
    assert_eq!(parse_error("import x;"), ParseError::NotImplemented { keyword: "import".to_string() });
}

#[test]
fn display_round_trips() {
    let src = "var x int = -3;
               var s string = \"tea\";
               var y : z float;
               while (x < 10 && !(x == 5)) {
                   x = x + 2 * 3;
                   if (x % 2 == 0) { continue; } else if (x > 8) { break; } else { y = x : float; }
               }
               print(s, 1.5, null);
               return x ^ 2 ^ 1;";
    let root = parse(src);
    let reparsed = parse(&root.to_string());

    assert_eq!(reparsed, Node::Sequence(vec![root]));
}

#[test]
fn operator_classification() {
    let number = Token::new(TokenKind::Number, "1");
    let open = Token::new(TokenKind::LPrt, "(");
    let close = Token::new(TokenKind::RPrt, ")");

    assert_eq!(tags_for("-", None).unwrap().arity, 1);
    assert_eq!(tags_for("-", Some(&open)).unwrap().precedence, UNARY_PRECEDENCE);
    assert_eq!(tags_for("-", Some(&number)).unwrap().arity, 2);
    assert_eq!(tags_for("+", Some(&close)).unwrap().arity, 2);
    assert_eq!(tags_for("!", Some(&number)).unwrap().arity, 1);
    assert!(tags_for("=", Some(&number)).is_err());

    let power = binary_tags("^").unwrap();
    let times = binary_tags("*").unwrap();
    assert!(!power.left_associative);
    assert!(!should_reduce(power, power));
    assert!(should_reduce(times, times));
    assert!(should_reduce(power, times));
    assert!(!should_reduce(times, power));
}

#[test]
fn bracket_matching() {
    let toks = tokens("( a ( b ) ) c )");
    assert_eq!(find_matching(&toks, TokenKind::LPrt, TokenKind::RPrt), Some(5));
    assert_eq!(find_matching(&toks[1..], TokenKind::LPrt, TokenKind::RPrt), None);
    assert_eq!(find_matching(&tokens("{ { }"), TokenKind::LBlock, TokenKind::RBlock), None);
}

#[test]
fn tokenizer_keeps_whitespace_and_skips_comments() {
    let toks = tokenize("a  >= \"b c\" // note\n^|").unwrap();
    let kinds: Vec<TokenKind> = toks.iter().map(|t| t.kind).collect();

    assert_eq!(kinds,
               vec![TokenKind::Identifier,
                    TokenKind::Whitespace,
                    TokenKind::Operator,
                    TokenKind::Whitespace,
                    TokenKind::String,
                    TokenKind::Whitespace,
                    TokenKind::Whitespace,
                    TokenKind::Operator]);
    assert_eq!(toks[4].text, "\"b c\"");
    assert_eq!(toks[7].text, "^|");
}

#[test]
fn tracing_does_not_change_the_tree() {
    let traced = Parser::new(ParserConfig { trace: true }).parse("var x int = 1 + 2;").unwrap();
    assert_eq!(traced, parse("var x int = 1 + 2;"));
}
