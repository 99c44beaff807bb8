use std::cmp::Ordering;

use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::{
            core::{Context, EvalResult},
            function::core::Function,
        },
        library::{binary_operands, unsupported},
        value::{
            core::{Payload, Value},
            datatype::{ANY, DatatypeRef, NUMBER, STRING},
        },
    },
};

/// Reads `a` and `b`, rejecting operands of different datatypes.
fn comparable_operands(context: &Context) -> EvalResult<(Value, Value)> {
    let (a, b) = binary_operands(context)?;
    if a.datatype != b.datatype {
        return Err(RuntimeError::IncomparableTypes { left:  a.datatype.name.to_string(),
                                                     right: b.datatype.name.to_string(), });
    }
    Ok((a, b))
}

/// Orders two operands of the same datatype and tests the ordering.
fn compare(context: &Context, name: &str, test: fn(Ordering) -> bool) -> EvalResult<Value> {
    let (a, b) = comparable_operands(context)?;
    let ordering = match (&a.payload, &b.payload) {
        (Payload::Integer(x), Payload::Integer(y)) => Some(x.cmp(y)),
        (Payload::Float(x), Payload::Float(y)) => x.partial_cmp(y),
        (Payload::String(x), Payload::String(y)) => Some(x.cmp(y)),
        _ => return Err(unsupported(name, &[a, b])),
    };
    Ok(Value::boolean(ordering.is_some_and(test)))
}

fn eval_equal(context: &mut Context) -> EvalResult<Value> {
    let (a, b) = comparable_operands(context)?;
    Ok(Value::boolean(a == b))
}

fn eval_not_equal(context: &mut Context) -> EvalResult<Value> {
    let (a, b) = comparable_operands(context)?;
    Ok(Value::boolean(a != b))
}

fn eval_smaller(context: &mut Context) -> EvalResult<Value> {
    compare(context, "#sm", Ordering::is_lt)
}

fn eval_larger(context: &mut Context) -> EvalResult<Value> {
    compare(context, "#lg", Ordering::is_gt)
}

fn eval_smaller_equal(context: &mut Context) -> EvalResult<Value> {
    compare(context, "#sme", Ordering::is_le)
}

fn eval_larger_equal(context: &mut Context) -> EvalResult<Value> {
    compare(context, "#lge", Ordering::is_ge)
}

/// The signatures shared by the ordering functions.
static ORDERED: &[&[DatatypeRef]] = &[&[&NUMBER, &NUMBER], &[&STRING, &STRING]];

/// `#equ(any a, any b)`. Values of different datatypes are never compared.
#[must_use]
pub fn equal() -> Function {
    Function::native("#equ", &[&[&ANY, &ANY]], eval_equal)
}

/// `#neq(any a, any b)`. Values of different datatypes are never compared.
#[must_use]
pub fn not_equal() -> Function {
    Function::native("#neq", &[&[&ANY, &ANY]], eval_not_equal)
}

/// `#sm`: `a < b` for numbers and strings.
#[must_use]
pub fn smaller() -> Function {
    Function::native("#sm", ORDERED, eval_smaller)
}

/// `#lg`: `a > b` for numbers and strings.
#[must_use]
pub fn larger() -> Function {
    Function::native("#lg", ORDERED, eval_larger)
}

/// `#sme`: `a <= b` for numbers and strings.
#[must_use]
pub fn smaller_equal() -> Function {
    Function::native("#sme", ORDERED, eval_smaller_equal)
}

/// `#lge`: `a >= b` for numbers and strings.
#[must_use]
pub fn larger_equal() -> Function {
    Function::native("#lge", ORDERED, eval_larger_equal)
}
