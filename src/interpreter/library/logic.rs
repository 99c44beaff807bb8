use crate::interpreter::{
    evaluator::{
        core::{Context, EvalResult},
        function::core::Function,
    },
    library::{binary_operands, unary_operand, unsupported},
    value::{core::Value, datatype::BOOLEAN},
};

/// Applies `op` to two boolean operands.
fn boolean(context: &Context, name: &str, op: fn(bool, bool) -> bool) -> EvalResult<Value> {
    let (a, b) = binary_operands(context)?;
    match (a.as_boolean(), b.as_boolean()) {
        (Some(x), Some(y)) => Ok(Value::boolean(op(x, y))),
        _ => Err(unsupported(name, &[a, b])),
    }
}

fn eval_and(context: &mut Context) -> EvalResult<Value> {
    boolean(context, "#and", |x, y| x && y)
}

fn eval_or(context: &mut Context) -> EvalResult<Value> {
    boolean(context, "#or", |x, y| x || y)
}

fn eval_xor(context: &mut Context) -> EvalResult<Value> {
    boolean(context, "#xor", |x, y| x != y)
}

fn eval_invert(context: &mut Context) -> EvalResult<Value> {
    let a = unary_operand(context)?;
    match a.as_boolean() {
        Some(x) => Ok(Value::boolean(!x)),
        None => Err(unsupported("#uninv", &[a])),
    }
}

/// `#and(bool a, bool b)`. Both operands are always evaluated.
#[must_use]
pub fn and() -> Function {
    Function::native("#and", &[&[&BOOLEAN, &BOOLEAN]], eval_and)
}

/// `#or(bool a, bool b)`. Both operands are always evaluated.
#[must_use]
pub fn or() -> Function {
    Function::native("#or", &[&[&BOOLEAN, &BOOLEAN]], eval_or)
}

/// `#xor(bool a, bool b)`.
#[must_use]
pub fn xor() -> Function {
    Function::native("#xor", &[&[&BOOLEAN, &BOOLEAN]], eval_xor)
}

/// `#uninv(bool a)`: logical not.
#[must_use]
pub fn invert() -> Function {
    Function::native("#uninv", &[&[&BOOLEAN]], eval_invert)
}
