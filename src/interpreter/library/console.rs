use std::rc::Rc;

use crate::interpreter::{
    evaluator::{
        core::{Context, EvalResult},
        function::core::Function,
    },
    library::{Export, Module, unary_operand},
    value::{
        core::{Payload, Value},
        datatype::ANY,
    },
};

fn eval_print(context: &mut Context) -> EvalResult<Value> {
    let a = unary_operand(context)?;
    match &a.payload {
        Payload::String(text) => println!("{text}"),
        _ => println!("{a}"),
    }
    Ok(Value::null())
}

/// `print(any a)`: writes a value and a newline to standard output.
///
/// Strings are written without quotes.
#[must_use]
pub fn print() -> Function {
    Function::native("print", &[&[&ANY]], eval_print)
}

/// Standard output for scripts.
///
/// # Example
/// ```
/// use tea::interpreter::library::{Module, console::Console};
///
/// let exports = Console.exports();
///
/// assert_eq!(exports.len(), 1);
/// assert_eq!(exports[0].name(), "print");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Console;

impl Module for Console {
    fn name(&self) -> &'static str {
        "console"
    }

    fn exports(&self) -> Vec<Export> {
        vec![Export::Function(Rc::new(print()))]
    }
}
