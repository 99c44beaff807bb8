use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::{
            core::{Context, EvalResult},
            function::core::Function,
        },
        library::{binary_operands, unary_operand, unsupported},
        value::{
            core::{Payload, Value},
            datatype::{ANY, FLOAT, INTEGER, NUMBER, STRING},
        },
    },
    util::num::{f64_to_i64_truncated, i64_to_f64_checked},
};

fn overflow(operation: &str) -> RuntimeError {
    RuntimeError::Overflow { operation: operation.to_string() }
}

/// Applies an integer or a float operation to two operands of the same
/// numeric datatype.
fn numeric(name: &str,
           a: &Value,
           b: &Value,
           integer: fn(i64, i64) -> Option<i64>,
           float: fn(f64, f64) -> f64)
           -> EvalResult<Value> {
    match (&a.payload, &b.payload) {
        (Payload::Integer(x), Payload::Integer(y)) => {
            integer(*x, *y).map(Value::integer).ok_or_else(|| overflow(name))
        },
        (Payload::Float(x), Payload::Float(y)) => Ok(Value::float(float(*x, *y))),
        _ => Err(unsupported(name, &[a.clone(), b.clone()])),
    }
}

/// Reads `a` and `b` and casts `b` to the datatype of `a`.
fn aligned_operands(context: &Context) -> EvalResult<(Value, Value)> {
    let (a, b) = binary_operands(context)?;
    let b = a.datatype.cast(&b)?;
    Ok((a, b))
}

fn is_zero(value: &Value) -> bool {
    match value.payload {
        Payload::Integer(i) => i == 0,
        Payload::Float(x) => x == 0.0,
        _ => false,
    }
}

fn eval_add(context: &mut Context) -> EvalResult<Value> {
    let (a, b) = aligned_operands(context)?;
    if let (Payload::String(x), Payload::String(y)) = (&a.payload, &b.payload) {
        return Ok(Value::string(format!("{x}{y}")));
    }
    numeric("#add", &a, &b, i64::checked_add, |x, y| x + y)
}

fn eval_sub(context: &mut Context) -> EvalResult<Value> {
    let (a, b) = aligned_operands(context)?;
    numeric("#sub", &a, &b, i64::checked_sub, |x, y| x - y)
}

fn eval_mul(context: &mut Context) -> EvalResult<Value> {
    let (a, b) = aligned_operands(context)?;
    numeric("#mul", &a, &b, i64::checked_mul, |x, y| x * y)
}

fn eval_div(context: &mut Context) -> EvalResult<Value> {
    let (a, b) = aligned_operands(context)?;
    if is_zero(&b) {
        return Err(RuntimeError::DivisionByZero);
    }
    numeric("#div", &a, &b, i64::checked_div, |x, y| x / y)
}

/// Remainder whose sign follows the divisor.
fn floor_rem(x: i64, y: i64) -> Option<i64> {
    let r = x.checked_rem(y)?;
    if r != 0 && (r < 0) != (y < 0) {
        r.checked_add(y)
    } else {
        Some(r)
    }
}

fn eval_mod(context: &mut Context) -> EvalResult<Value> {
    let (a, b) = binary_operands(context)?;
    if is_zero(&b) {
        return Err(RuntimeError::DivisionByZero);
    }
    match (&a.payload, &b.payload) {
        (Payload::Integer(x), Payload::Integer(y)) => {
            floor_rem(*x, *y).map(Value::integer).ok_or_else(|| overflow("#mod"))
        },
        _ => Err(unsupported("#mod", &[a, b])),
    }
}

/// Integer power. Negative exponents truncate toward zero like division.
fn integer_pow(base: i64, exponent: i64) -> EvalResult<i64> {
    if exponent >= 0 {
        let exponent = u32::try_from(exponent).map_err(|_| overflow("#pow"))?;
        return base.checked_pow(exponent).ok_or_else(|| overflow("#pow"));
    }
    if base == 0 {
        return Err(RuntimeError::DivisionByZero);
    }
    let base = i64_to_f64_checked(base, overflow("#pow"))?;
    let exponent = i64_to_f64_checked(exponent, overflow("#pow"))?;
    f64_to_i64_truncated(base.powf(exponent), overflow("#pow"))
}

fn eval_pow(context: &mut Context) -> EvalResult<Value> {
    let (mut a, mut b) = binary_operands(context)?;
    if a.datatype != b.datatype {
        a = FLOAT.cast(&a)?;
        b = FLOAT.cast(&b)?;
    }
    match (&a.payload, &b.payload) {
        (Payload::Integer(x), Payload::Integer(y)) => integer_pow(*x, *y).map(Value::integer),
        (Payload::Float(x), Payload::Float(y)) => Ok(Value::float(x.powf(*y))),
        _ => Err(unsupported("#pow", &[a, b])),
    }
}

fn eval_unary_minus(context: &mut Context) -> EvalResult<Value> {
    let a = unary_operand(context)?;
    match a.payload {
        Payload::Integer(x) => x.checked_neg().map(Value::integer).ok_or_else(|| overflow("#unmi")),
        Payload::Float(x) => Ok(Value::float(-x)),
        _ => Err(unsupported("#unmi", &[a])),
    }
}

fn eval_unary_plus(context: &mut Context) -> EvalResult<Value> {
    unary_operand(context)
}

/// `#add(number a, number b)`, then `#add(string a, any b)`.
///
/// `b` is cast to the datatype of `a`, so `1 + 2.5` is `3` and `"n" + 1` is
/// `"n1"`.
#[must_use]
pub fn add() -> Function {
    Function::native("#add", &[&[&NUMBER, &NUMBER], &[&STRING, &ANY]], eval_add)
}

/// `#unpl(number a)`: returns `a` unchanged.
#[must_use]
pub fn unary_plus() -> Function {
    Function::native("#unpl", &[&[&NUMBER]], eval_unary_plus)
}

/// `#sub(number a, number b)`.
#[must_use]
pub fn sub() -> Function {
    Function::native("#sub", &[&[&NUMBER, &NUMBER]], eval_sub)
}

/// `#unmi(number a)`: negation.
#[must_use]
pub fn unary_minus() -> Function {
    Function::native("#unmi", &[&[&NUMBER]], eval_unary_minus)
}

/// `#mul(number a, number b)`.
#[must_use]
pub fn mul() -> Function {
    Function::native("#mul", &[&[&NUMBER, &NUMBER]], eval_mul)
}

/// `#div(number a, number b)`. Integer division truncates toward zero.
#[must_use]
pub fn div() -> Function {
    Function::native("#div", &[&[&NUMBER, &NUMBER]], eval_div)
}

/// `#mod(int a, int b)`. The result has the sign of `b`.
#[must_use]
pub fn modulo() -> Function {
    Function::native("#mod", &[&[&INTEGER, &INTEGER]], eval_mod)
}

/// `#pow(number a, number b)`. Mixed datatypes are computed as floats.
#[must_use]
pub fn pow() -> Function {
    Function::native("#pow", &[&[&NUMBER, &NUMBER]], eval_pow)
}
