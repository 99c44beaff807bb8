use std::rc::Rc;

use pretty_assertions::assert_eq;
use tea::{
    Session,
    error::{Error, RuntimeError},
    interpreter::{
        evaluator::{
            core::{Context, Entry},
            function::{
                core::{Body, Function, Parameter, Signature},
                operator::Operator,
            },
        },
        library::{Export, Module, StandardLibrary},
        parser::core::Parser,
        value::{
            core::{Payload, Value},
            datatype::{
                ANY, BOOLEAN, DatatypeRef, FLOAT, FUNCTION, INTEGER, LIST, NULL, NUMBER, OBJECT, SET,
                STRING,
            },
        },
    },
};

fn tagged(name: &'static str, overloads: &[&[DatatypeRef]]) -> Function {
    Function::native(name, overloads, |_| Ok(Value::null()))
}

#[test]
fn lattice() {
    assert!(INTEGER.is_subtype_of(&NUMBER));
    assert!(FLOAT.is_subtype_of(&NUMBER));
    assert!(INTEGER.is_subtype_of(&INTEGER));
    assert!(!NUMBER.is_subtype_of(&INTEGER));
    assert!(!INTEGER.is_subtype_of(&FLOAT));
    assert!(!BOOLEAN.is_subtype_of(&NUMBER));

    for datatype in [&NULL, &NUMBER, &INTEGER, &FLOAT, &BOOLEAN, &STRING, &LIST, &SET, &OBJECT, &FUNCTION] {
        assert!(datatype.is_subtype_of(&ANY), "{datatype} is not below any");
    }
}

#[test]
fn narrowing_casts() {
    assert_eq!(INTEGER.cast(&Value::boolean(true)).unwrap(), Value::integer(1));
    assert_eq!(INTEGER.cast(&Value::null()).unwrap(), Value::integer(0));
    assert_eq!(FLOAT.cast(&Value::integer(2)).unwrap(), Value::float(2.0));
    assert_eq!(STRING.cast(&Value::float(2.5)).unwrap(), Value::string("2.5"));
    assert_eq!(STRING.cast(&Value::boolean(false)).unwrap(), Value::string("false"));
    assert_eq!(STRING.cast(&Value::null()).unwrap(), Value::string(""));
    assert_eq!(BOOLEAN.cast(&Value::integer(-1)).unwrap(), Value::boolean(false));
    assert_eq!(LIST.cast(&Value::string("ab")).unwrap(),
               Value::list(vec![Value::string("a"), Value::string("b")]));

    let set = SET.cast(&Value::list(vec![Value::integer(1), Value::integer(1), Value::integer(2)])).unwrap();
    assert!(matches!(set.payload, Payload::Set(ref elements) if elements.len() == 2));

    assert!(matches!(NUMBER.cast(&Value::string("1")), Err(RuntimeError::Cast { .. })));
    assert!(matches!(NULL.cast(&Value::integer(0)), Err(RuntimeError::Cast { .. })));
    assert!(matches!(BOOLEAN.cast(&Value::float(1.0)), Err(RuntimeError::Cast { .. })));
}

#[test]
fn upcasts_keep_the_value() {
    let value = Value::integer(7);

    assert_eq!(NUMBER.cast(&value).unwrap(), value);
    assert_eq!(ANY.cast(&value).unwrap().datatype, &INTEGER);
}

#[test]
fn cast_errors_name_the_variable() {
    let error = INTEGER.cast(&Value::string("x").with_name("name")).unwrap_err();

    assert_eq!(error,
               RuntimeError::Cast { value:    "name = \"x\" (string)".to_string(),
                                    datatype: "int".to_string(), });
}

#[test]
fn resolution_is_first_match() {
    let function = tagged("f", &[&[&NUMBER, &NUMBER], &[&INTEGER, &INTEGER], &[&ANY, &STRING]]);

    let ints = [Value::integer(1), Value::integer(2)];
    let mixed = [Value::float(1.0), Value::integer(2)];
    let strings = [Value::boolean(true), Value::string("s")];

    assert_eq!(function.resolve(&ints).map(|(i, _)| i), Some(0));
    assert_eq!(function.resolve(&mixed).map(|(i, _)| i), Some(0));
    assert_eq!(function.resolve(&strings).map(|(i, _)| i), Some(2));
    assert!(function.resolve(&[Value::integer(1)]).is_none());
    assert!(function.resolve(&[Value::string("s"), Value::integer(1)]).is_none());
}

#[test]
fn narrowing_is_never_used_for_resolution() {
    let function = tagged("g", &[&[&INTEGER]]);

    assert!(function.resolve(&[Value::float(1.0)]).is_none());
    assert!(function.resolve(&[Value::boolean(true)]).is_none());
}

#[test]
fn operators_pick_functions_by_arity() {
    let mut context = Context::new();
    context.load(&StandardLibrary);

    let Some(Entry::Operator(minus)) = context.entry("-") else {
        panic!("'-' is not an operator");
    };
    assert_eq!(minus.function_for(2).map(|f| f.name.as_str()), Some("#sub"));
    assert_eq!(minus.function_for(1).map(|f| f.name.as_str()), Some("#unmi"));

    let Some(Entry::Operator(times)) = context.entry("*") else {
        panic!("'*' is not an operator");
    };
    assert!(times.function_for(1).is_none());
}

#[test]
fn calls_bind_arguments_in_a_child_scope() {
    let body = Parser::default().parse("return n * 2; 0;").unwrap();
    let double = Function::new("double",
                               vec![Signature::new(vec![Parameter::new(&INTEGER, "n")], Body::Tree(body))]);

    let mut session = Session::new();
    session.context.scope_stack[0].insert("double".to_string(), Entry::Function(Rc::new(double)));

    assert_eq!(session.interpret("double(21);").unwrap(), Value::integer(42));
    assert!(matches!(session.interpret("n;"), Err(Error::Runtime(RuntimeError::UnknownName { .. }))));
    assert_eq!(session.interpret("double(1.5);").unwrap_err(),
               Error::Runtime(RuntimeError::UnresolvedOverload { function:  "double".to_string(),
                                                                 arguments: "float".to_string(), }));
}

#[test]
fn function_values_are_callable() {
    let body = Parser::default().parse("if (n > 0) { return true; } return false;").unwrap();
    let positive = Function::new("positive",
                                 vec![Signature::new(vec![Parameter::new(&NUMBER, "n")], Body::Tree(body))]);

    let mut session = Session::new();
    session.context.scope_stack[0].insert("positive".to_string(), Entry::Function(Rc::new(positive)));

    assert_eq!(session.interpret("var f func = positive; f(2);").unwrap(), Value::boolean(true));
    assert_eq!(session.interpret("f(-1);").unwrap(), Value::boolean(false));
}

#[test]
fn loops_in_function_bodies_do_not_leak_break() {
    let body = Parser::default().parse("while (true) { break; } 7;").unwrap();
    let seven = Function::new("seven", vec![Signature::new(Vec::new(), Body::Tree(body))]);
    let stray = Parser::default().parse("break;").unwrap();
    let broken = Function::new("broken", vec![Signature::new(Vec::new(), Body::Tree(stray))]);

    let mut context = Context::new();
    assert_eq!(context.call(&seven, Vec::new()).unwrap(), Value::integer(7));
    assert_eq!(context.call(&broken, Vec::new()).unwrap_err(),
               RuntimeError::StrayControl { keyword: "break".to_string() });
    assert!(context.flags.is_empty());
}

struct Answers;

impl Module for Answers {
    fn name(&self) -> &'static str {
        "answers"
    }

    fn exports(&self) -> Vec<Export> {
        let answer = Rc::new(Function::native("answer", &[&[]], |_| Ok(Value::integer(42))));
        let negate = Rc::new(Function::native("negate", &[&[&BOOLEAN]], |_| Ok(Value::string("shadowed"))));
        vec![Export::Function(answer), Export::Operator(Rc::new(Operator::new("!", negate)))]
    }
}

#[test]
fn later_modules_shadow_earlier_exports() {
    let mut session = Session::new();
    assert_eq!(session.interpret("!true;").unwrap(), Value::boolean(false));

    session.context.load(&Answers);

    assert_eq!(session.interpret("answer();").unwrap(), Value::integer(42));
    assert_eq!(session.interpret("!true;").unwrap(), Value::string("shadowed"));
}

#[test]
fn standard_library_export_order() {
    let names: Vec<String> = StandardLibrary.exports()
                                            .iter()
                                            .map(|export| export.name().to_string())
                                            .collect();

    assert_eq!(&names[..11],
               ["int", "float", "bool", "string", "list", "set", "map", "object", "func", "any", "null"]);
    assert_eq!(&names[11..14], ["+", "-", "*"]);
    assert_eq!(names.last().map(String::as_str), Some("#pow"));
}
