use pretty_assertions::assert_eq;
use tea::{
    Session,
    error::{Error, ParseError, RuntimeError},
    get_result,
    interpreter::value::core::Value,
};

fn assert_success(src: &str) -> Value {
    match get_result(src, false) {
        Ok(value) => value,
        Err(e) => panic!("Script failed: {e}\n{src}"),
    }
}

fn assert_failure(src: &str) -> Error {
    match get_result(src, false) {
        Ok(value) => panic!("Script succeeded with {value} but was expected to fail\n{src}"),
        Err(e) => e,
    }
}

#[test]
fn precedence_and_associativity() {
    assert_eq!(assert_success("2 + 3 * 4;"), Value::integer(14));
    assert_eq!(assert_success("2 ^ 3 ^ 2;"), Value::integer(512));
    assert_eq!(assert_success("1 - 2 * 4;"), Value::integer(-7));
    assert_eq!(assert_success("10 - 4 - 3;"), Value::integer(3));
    assert_eq!(assert_success("-(3 - 2);"), Value::integer(-1));
    assert_eq!(assert_success("(1 + 2) * 3;"), Value::integer(9));
}

#[test]
fn unary_operators() {
    assert_eq!(assert_success("-2 + 5;"), Value::integer(3));
    assert_eq!(assert_success("2 * -3;"), Value::integer(-6));
    assert_eq!(assert_success("+4;"), Value::integer(4));
    assert_eq!(assert_success("!true;"), Value::boolean(false));
    assert_eq!(assert_success("!(1 > 2);"), Value::boolean(true));
}

#[test]
fn arithmetic_follows_the_left_operand() {
    assert_eq!(assert_success("1 + 2.5;"), Value::integer(3));
    assert_eq!(assert_success("1.0 + 1.5;"), Value::float(2.5));
    assert_eq!(assert_success("7 / 2;"), Value::integer(3));
    assert_eq!(assert_success("-7 / 2;"), Value::integer(-3));
    assert_eq!(assert_success("\"tea\" + 2;"), Value::string("tea2"));
    assert_eq!(assert_success("\"a\" + \"b\";"), Value::string("ab"));
}

#[test]
fn modulo_and_power() {
    assert_eq!(assert_success("-7 % 3;"), Value::integer(2));
    assert_eq!(assert_success("7 % -3;"), Value::integer(-2));
    assert_eq!(assert_success("2 ^ 10;"), Value::integer(1024));
    assert_eq!(assert_success("2 ^ -1;"), Value::integer(0));
    assert_eq!(assert_success("2.0 ^ 2;"), Value::float(4.0));
}

#[test]
fn division_by_zero() {
    assert_eq!(assert_failure("1 / 0;"), Error::Runtime(RuntimeError::DivisionByZero));
    assert_eq!(assert_failure("1.0 / 0.0;"), Error::Runtime(RuntimeError::DivisionByZero));
    assert_eq!(assert_failure("5 % 0;"), Error::Runtime(RuntimeError::DivisionByZero));
}

#[test]
fn integer_overflow() {
    let error = assert_failure("9223372036854775807 + 1;");
    assert!(matches!(error, Error::Runtime(RuntimeError::Overflow { .. })));
}

#[test]
fn casts() {
    assert_eq!(assert_success("3.7 : int;"), Value::integer(3));
    assert_eq!(assert_success("null : bool;"), Value::boolean(false));
    assert_eq!(assert_success("2 : bool;"), Value::boolean(true));
    assert_eq!(assert_success("true : int;"), Value::integer(1));
    assert_eq!(assert_success("12 : string;"), Value::string("12"));
    assert_eq!(assert_success("3 : float + 0.5;"), Value::float(3.5));

    let error = assert_failure("var o object = 1; o : int;");
    assert!(matches!(error, Error::Runtime(RuntimeError::Cast { ref datatype, .. }) if datatype == "int"));
    assert!(matches!(assert_failure("\"x\" : int;"), Error::Runtime(RuntimeError::Cast { .. })));
}

#[test]
fn declarations_cast_on_assignment() {
    assert_eq!(assert_success("var x int = 3.7; x;"), Value::integer(3));
    assert_eq!(assert_success("var f float = 2; f;"), Value::float(2.0));
    assert_eq!(assert_success("var a : b int = 5; a + b;"), Value::integer(10));
    assert_eq!(assert_success("var n int; n;"), Value::null());
    assert_eq!(assert_success("var n int; n = 1.9; n;"), Value::integer(1));

    assert!(matches!(assert_failure("var x int = \"a\";"), Error::Runtime(RuntimeError::Cast { .. })));
    assert!(matches!(assert_failure("var x nothing;"),
                     Error::Runtime(RuntimeError::UnknownDatatype { .. })));
}

#[test]
fn comparisons() {
    assert_eq!(assert_success("1 == 1;"), Value::boolean(true));
    assert_eq!(assert_success("1 != 2;"), Value::boolean(true));
    assert_eq!(assert_success("2 <= 2;"), Value::boolean(true));
    assert_eq!(assert_success("2.5 > 3.0;"), Value::boolean(false));
    assert_eq!(assert_success("\"a\" < \"b\";"), Value::boolean(true));
    assert_eq!(assert_success("1 < 2 == true;"), Value::boolean(true));
}

#[test]
fn comparing_different_datatypes_fails() {
    assert_eq!(assert_failure("1 == \"1\";"),
               Error::Runtime(RuntimeError::IncomparableTypes { left:  "int".to_string(),
                                                                right: "string".to_string(), }));
    assert!(matches!(assert_failure("1 < 1.5;"),
                     Error::Runtime(RuntimeError::IncomparableTypes { .. })));
}

#[test]
fn logic() {
    assert_eq!(assert_success("true && false;"), Value::boolean(false));
    assert_eq!(assert_success("true || false;"), Value::boolean(true));
    assert_eq!(assert_success("true ^| true;"), Value::boolean(false));
    assert_eq!(assert_success("1 < 2 && 3 < 4;"), Value::boolean(true));
}

#[test]
fn unresolved_overloads() {
    assert_eq!(assert_failure("-\"a\";"),
               Error::Runtime(RuntimeError::UnresolvedOverload { function:  "#unmi".to_string(),
                                                                 arguments: "string".to_string(), }));
    assert_eq!(assert_failure("\"a\" * 2;"),
               Error::Runtime(RuntimeError::UnresolvedOverload { function:  "#mul".to_string(),
                                                                 arguments: "string, int".to_string(), }));
    assert!(matches!(assert_failure("true && 1;"),
                     Error::Runtime(RuntimeError::UnresolvedOverload { .. })));
}

#[test]
fn branches() {
    let src = "var x int = 5;
               var r string = \"\";
               if (x > 10) { r = \"big\"; } else if (x > 3) { r = \"mid\"; } else { r = \"small\"; }
               r;";
    assert_eq!(assert_success(src), Value::string("mid"));

    assert_eq!(assert_success("var r int = 0; if (0) { r = 1; } else { r = 2; } r;"), Value::integer(2));
    assert_eq!(assert_success("var r int = 0; if (null) { r = 1; } r;"), Value::integer(0));
    assert!(matches!(assert_failure("if (\"yes\") { 1; }"), Error::Runtime(RuntimeError::Cast { .. })));
}

#[test]
fn loops_honour_break_and_continue() {
    let src = "var i int = 0;
               var s int = 0;
               while (i < 10) {
                   i = i + 1;
                   if (i % 2 == 0) { continue; }
                   if (i > 7) { break; }
                   s = s + i;
               }
               s;";
    assert_eq!(assert_success(src), Value::integer(16));
}

#[test]
fn nested_loops_break_only_the_inner_one() {
    let src = "var i int = 0;
               var n int = 0;
               while (i < 3) {
                   i = i + 1;
                   var j int = 0;
                   while (true) {
                       j = j + 1;
                       n = n + 1;
                       if (j == 2) { break; }
                   }
               }
               n;";
    assert_eq!(assert_success(src), Value::integer(6));
}

#[test]
fn stray_control_flow_fails() {
    assert_eq!(assert_failure("break;"),
               Error::Runtime(RuntimeError::StrayControl { keyword: "break".to_string() }));
    assert_eq!(assert_failure("if (true) { continue; }"),
               Error::Runtime(RuntimeError::StrayControl { keyword: "continue".to_string() }));
}

#[test]
fn top_level_return_ends_the_program() {
    assert_eq!(assert_success("return 5; 6;"), Value::integer(5));
    assert_eq!(assert_success("return;"), Value::null());
    assert_eq!(assert_success("var i int = 0; while (true) { i = i + 1; if (i == 4) { return i; } }"),
               Value::integer(4));
}

#[test]
fn blocks_scope_their_declarations() {
    assert!(matches!(assert_failure("{ var y int = 1; } y;"),
                     Error::Runtime(RuntimeError::UnknownName { .. })));
    assert_eq!(assert_success("var y int = 1; { y = 2; } y;"), Value::integer(2));
    assert_eq!(assert_success("var y int = 1; { var y int = 5; } y;"), Value::integer(1));
}

#[test]
fn names_that_are_not_values() {
    assert!(matches!(assert_failure("int;"), Error::Runtime(RuntimeError::NotAValue { .. })));
    assert!(matches!(assert_failure("int = 2;"), Error::Runtime(RuntimeError::NotAValue { .. })));
    assert!(matches!(assert_failure("missing;"), Error::Runtime(RuntimeError::UnknownName { .. })));
    assert!(matches!(assert_failure("var x int = 1; x(2);"),
                     Error::Runtime(RuntimeError::NotCallable { .. })));
}

#[test]
fn undeclared_assignment_creates_a_variable() {
    assert_eq!(assert_success("z = 2.5; z;"), Value::float(2.5));
}

#[test]
fn print_returns_null() {
    assert_eq!(assert_success("print(\"hello\");"), Value::null());
    assert_eq!(assert_success("print(1 + 2);"), Value::null());
}

#[test]
fn reserved_keywords_are_not_implemented() {
    assert_eq!(assert_failure("func f() { return 1; }"),
               Error::Parse(ParseError::NotImplemented { keyword: "func".to_string() }));
    assert!(matches!(assert_failure("for (x) { }"),
                     Error::Parse(ParseError::NotImplemented { .. })));
}

#[test]
fn parse_errors_prevent_evaluation() {
    let mut session = Session::new();
    assert!(matches!(session.interpret("var x int = 1; 1 +;"),
                     Err(Error::Parse(ParseError::MissingOperand { .. }))));
    assert!(matches!(session.interpret("x;"), Err(Error::Runtime(RuntimeError::UnknownName { .. }))));
    assert!(matches!(session.interpret("1 # 2;"),
                     Err(Error::Parse(ParseError::UnexpectedCharacter { .. }))));
}

#[test]
fn session_keeps_declarations_between_programs() {
    let mut session = Session::new();
    session.interpret("var x int = 20;").unwrap();
    session.interpret("x = x + 1;").unwrap();

    assert_eq!(session.interpret("x + 21;").unwrap(), Value::integer(42));
}

#[test]
fn session_recovers_after_runtime_errors() {
    let mut session = Session::new();
    session.interpret("var i int = 0;").unwrap();
    assert!(session.interpret("while (true) { i = i + 1; if (i == 3) { break; } } 1 / 0;").is_err());

    assert_eq!(session.interpret("i;").unwrap(), Value::integer(3));
    assert!(session.context.flags.is_empty());
}

#[test]
fn exit_flag_is_reported() {
    let mut session = Session::new();
    assert!(!session.exited());
    session.exit();
    assert!(session.exited());
}
