use std::rc::Rc;

use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::{
            core::{Context, EvalResult, Entry},
            function::{
                core::{Function, describe_arguments},
                operator::Operator,
            },
        },
        value::{
            core::Value,
            datatype::{
                ANY, BOOLEAN, DatatypeRef, FLOAT, FUNCTION, INTEGER, LIST, MAP, NULL, OBJECT, SET,
                STRING,
            },
        },
    },
};

/// Arithmetic functions: `#add`, `#sub`, `#mul`, `#div`, `#mod`, `#pow` and
/// the unary `#unpl`, `#unmi`.
pub mod arithmetic;
/// Equality and ordering: `#equ`, `#neq`, `#sm`, `#lg`, `#sme`, `#lge`.
pub mod comparison;
/// Boolean functions: `#and`, `#or`, `#xor`, `#uninv`.
pub mod logic;
/// Console output.
pub mod console;

/// Something a module makes available under a name.
#[derive(Debug, Clone)]
pub enum Export {
    /// Bound under the datatype's name.
    Datatype(DatatypeRef),
    /// Bound under the operator's symbol.
    Operator(Rc<Operator>),
    /// Bound under the function's name.
    Function(Rc<Function>),
}

impl Export {
    /// The name the export is bound to.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Datatype(datatype) => datatype.name,
            Self::Operator(operator) => &operator.symbol,
            Self::Function(function) => &function.name,
        }
    }
}

impl From<Export> for Entry {
    fn from(export: Export) -> Self {
        match export {
            Export::Datatype(datatype) => Self::Datatype(datatype),
            Export::Operator(operator) => Self::Operator(operator),
            Export::Function(function) => Self::Function(function),
        }
    }
}

/// A loadable collection of datatypes, operators and functions.
pub trait Module {
    /// The module name, used in logs.
    fn name(&self) -> &'static str;

    /// The exports in load order.
    fn exports(&self) -> Vec<Export>;
}

/// Reads the operand bound to parameter `a`.
pub(crate) fn unary_operand(context: &Context) -> EvalResult<Value> {
    context.find("a")
}

/// Reads the operands bound to parameters `a` and `b`.
pub(crate) fn binary_operands(context: &Context) -> EvalResult<(Value, Value)> {
    Ok((context.find("a")?, context.find("b")?))
}

/// The error for payload combinations a native body does not handle.
pub(crate) fn unsupported(function: &str, operands: &[Value]) -> RuntimeError {
    RuntimeError::UnresolvedOverload { function:  function.to_string(),
                                       arguments: describe_arguments(operands), }
}

/// The built-in datatypes, operators and functions of the language.
///
/// # Example
/// ```
/// use tea::interpreter::library::{Module, StandardLibrary};
///
/// let names: Vec<String> = StandardLibrary.exports()
///                                         .iter()
///                                         .map(|export| export.name().to_string())
///                                         .collect();
///
/// assert_eq!(names[0], "int");
/// assert!(names.contains(&"^|".to_string()));
/// assert!(names.contains(&"#pow".to_string()));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardLibrary;

impl Module for StandardLibrary {
    fn name(&self) -> &'static str {
        "std"
    }

    fn exports(&self) -> Vec<Export> {
        let add = Rc::new(arithmetic::add());
        let unpl = Rc::new(arithmetic::unary_plus());
        let sub = Rc::new(arithmetic::sub());
        let unmi = Rc::new(arithmetic::unary_minus());
        let mul = Rc::new(arithmetic::mul());
        let div = Rc::new(arithmetic::div());
        let equ = Rc::new(comparison::equal());
        let and = Rc::new(logic::and());
        let or = Rc::new(logic::or());
        let xor = Rc::new(logic::xor());
        let neq = Rc::new(comparison::not_equal());
        let sm = Rc::new(comparison::smaller());
        let lg = Rc::new(comparison::larger());
        let sme = Rc::new(comparison::smaller_equal());
        let lge = Rc::new(comparison::larger_equal());
        let uninv = Rc::new(logic::invert());
        let modulo = Rc::new(arithmetic::modulo());
        let pow = Rc::new(arithmetic::pow());

        let mut plus = Operator::new("+", Rc::clone(&add));
        plus.add_overload(Rc::clone(&unpl));
        let mut minus = Operator::new("-", Rc::clone(&sub));
        minus.add_overload(Rc::clone(&unmi));

        let datatypes: [DatatypeRef; 11] =
            [&INTEGER, &FLOAT, &BOOLEAN, &STRING, &LIST, &SET, &MAP, &OBJECT, &FUNCTION, &ANY, &NULL];

        let operators = [plus,
                         minus,
                         Operator::new("*", Rc::clone(&mul)),
                         Operator::new("/", Rc::clone(&div)),
                         Operator::new("==", Rc::clone(&equ)),
                         Operator::new("&&", Rc::clone(&and)),
                         Operator::new("||", Rc::clone(&or)),
                         Operator::new("^|", Rc::clone(&xor)),
                         Operator::new("!=", Rc::clone(&neq)),
                         Operator::new("<", Rc::clone(&sm)),
                         Operator::new(">", Rc::clone(&lg)),
                         Operator::new("<=", Rc::clone(&sme)),
                         Operator::new(">=", Rc::clone(&lge)),
                         Operator::new("!", Rc::clone(&uninv)),
                         Operator::new("%", Rc::clone(&modulo)),
                         Operator::new("^", Rc::clone(&pow))];

        let functions = [add, unpl, sub, unmi, mul, div, equ, and, or, xor, neq, sm, lg, sme, lge, uninv, modulo, pow];

        datatypes.into_iter()
                 .map(Export::Datatype)
                 .chain(operators.into_iter().map(|operator| Export::Operator(Rc::new(operator))))
                 .chain(functions.into_iter().map(Export::Function))
                 .collect()
    }
}
