use std::fmt;

use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::core::EvalResult,
        value::{
            core::{Payload, Value},
            set_value::SetValue,
        },
    },
    util::num::{f64_to_i64_truncated, i64_to_f64_checked},
};

/// Datatypes are registered once and referenced for the lifetime of the
/// program.
pub type DatatypeRef = &'static Datatype;

/// Narrowing conversion into a datatype.
///
/// Receives a value of any other datatype and returns the converted value, or
/// `None` if the datatype does not know how to convert from the source.
pub type CastFn = fn(&Value) -> Option<Value>;

/// Renders a payload of a datatype for display.
pub type FormatFn = fn(&Payload) -> String;

/// A node of the datatype lattice.
///
/// Every datatype has at most one supertype. [`ANY`] is the universal root,
/// [`NUMBER`] is the abstract common supertype of [`INTEGER`] and [`FLOAT`].
/// Two datatypes are equal only if they are the same registered object.
pub struct Datatype {
    /// The name used in declarations, casts and error messages.
    pub name:      &'static str,
    /// The single parent in the lattice.
    pub supertype: Option<DatatypeRef>,
    cast:          CastFn,
    format:        FormatFn,
}

impl Datatype {
    /// Creates a datatype from its name, parent, cast and format functions.
    #[must_use]
    pub const fn new(name: &'static str,
                     supertype: Option<DatatypeRef>,
                     cast: CastFn,
                     format: FormatFn)
                     -> Self {
        Self { name,
               supertype,
               cast,
               format }
    }

    /// Casts a value to this datatype.
    ///
    /// Tries, in order: identity (the value already has this datatype), an
    /// upward cast (this datatype is reachable from the value's datatype
    /// through supertype links, which keeps the value unchanged), and
    /// finally the datatype's own narrowing conversion.
    ///
    /// # Errors
    /// Returns `RuntimeError::Cast` if no conversion applies.
    ///
    /// # Example
    /// ```
    /// use tea::interpreter::value::{
    ///     core::Value,
    ///     datatype::{BOOLEAN, INTEGER, NUMBER},
    /// };
    ///
    /// assert_eq!(INTEGER.cast(&Value::float(3.7)).unwrap(), Value::integer(3));
    /// assert_eq!(BOOLEAN.cast(&Value::null()).unwrap(), Value::boolean(false));
    /// assert_eq!(NUMBER.cast(&Value::integer(4)).unwrap(), Value::integer(4));
    /// ```
    pub fn cast(&self, value: &Value) -> EvalResult<Value> {
        if value.datatype.is_subtype_of(self) {
            return Ok(value.clone());
        }

        (self.cast)(value).ok_or_else(|| RuntimeError::Cast { value:    value.describe(),
                                                              datatype: self.name.to_string(), })
    }

    /// Tests whether `self` equals `other` or reaches it through supertype
    /// links. Every datatype is a subtype of [`ANY`].
    #[must_use]
    pub fn is_subtype_of(&self, other: &Self) -> bool {
        if other == &ANY {
            return true;
        }
        let mut current = Some(self);
        while let Some(datatype) = current {
            if datatype == other {
                return true;
            }
            current = datatype.supertype;
        }
        false
    }

    /// Renders a payload the way this datatype displays its values.
    #[must_use]
    pub fn format(&self, payload: &Payload) -> String {
        (self.format)(payload)
    }
}

impl PartialEq for Datatype {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self, other)
    }
}

impl Eq for Datatype {}

impl fmt::Debug for Datatype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Datatype({})", self.name)
    }
}

impl fmt::Display for Datatype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// The universal root. Accepts anything, constructs nothing.
pub static ANY: Datatype = Datatype::new("any", None, reject, format_payload);
/// The type of the absent value.
pub static NULL: Datatype = Datatype::new("null", Some(&ANY), reject, format_null);
/// Abstract supertype of `int` and `float`; never instantiated.
pub static NUMBER: Datatype = Datatype::new("number", Some(&ANY), reject, format_payload);
/// 64-bit signed integers.
pub static INTEGER: Datatype = Datatype::new("int", Some(&NUMBER), cast_integer, format_integer);
/// Double precision floats.
pub static FLOAT: Datatype = Datatype::new("float", Some(&NUMBER), cast_float, format_float);
/// `true` or `false`.
pub static BOOLEAN: Datatype = Datatype::new("bool", Some(&ANY), cast_boolean, format_boolean);
/// UTF-8 text.
pub static STRING: Datatype = Datatype::new("string", Some(&ANY), cast_string, format_string);
/// Ordered sequence of values.
pub static LIST: Datatype = Datatype::new("list", Some(&ANY), cast_list, format_list);
/// Unordered collection of distinct values.
pub static SET: Datatype = Datatype::new("set", Some(&ANY), cast_set, format_set);
/// Insertion-ordered mapping.
pub static MAP: Datatype = Datatype::new("map", Some(&ANY), cast_map, format_map);
/// Opaque host object.
pub static OBJECT: Datatype = Datatype::new("object", Some(&ANY), cast_object, format_object);
/// Reference to a callable function.
pub static FUNCTION: Datatype =
    Datatype::new("func", Some(&ANY), cast_function, format_function);

const fn reject(_: &Value) -> Option<Value> {
    None
}

fn format_payload(payload: &Payload) -> String {
    payload.to_string()
}

fn format_null(_: &Payload) -> String {
    "null".to_string()
}

fn format_list(_: &Payload) -> String {
    "list".to_string()
}

fn format_set(_: &Payload) -> String {
    "set".to_string()
}

fn format_map(_: &Payload) -> String {
    "map".to_string()
}

fn format_object(_: &Payload) -> String {
    "object".to_string()
}

fn format_function(_: &Payload) -> String {
    "function".to_string()
}

fn format_integer(payload: &Payload) -> String {
    match payload {
        Payload::Integer(i) => format!("{i}"),
        other => other.to_string(),
    }
}

fn format_float(payload: &Payload) -> String {
    match payload {
        Payload::Float(x) => format!("{x:.6}"),
        other => other.to_string(),
    }
}

fn format_boolean(payload: &Payload) -> String {
    match payload {
        Payload::Boolean(b) => b.to_string(),
        other => other.to_string(),
    }
}

fn format_string(payload: &Payload) -> String {
    match payload {
        Payload::String(s) => format!("\"{s}\""),
        other => other.to_string(),
    }
}

fn cast_integer(value: &Value) -> Option<Value> {
    match &value.payload {
        Payload::Float(x) if value.is(&FLOAT) => f64_to_i64_truncated(*x, ()).ok().map(Value::integer),
        Payload::Boolean(b) if value.is(&BOOLEAN) => Some(Value::integer(i64::from(*b))),
        Payload::Null if value.is(&NULL) => Some(Value::integer(0)),
        _ => None,
    }
}

fn cast_float(value: &Value) -> Option<Value> {
    match &value.payload {
        Payload::Integer(i) if value.is(&INTEGER) => i64_to_f64_checked(*i, ()).ok().map(Value::float),
        Payload::Null if value.is(&NULL) => Some(Value::float(0.0)),
        _ => None,
    }
}

fn cast_string(value: &Value) -> Option<Value> {
    let text = match &value.payload {
        Payload::Integer(i) if value.is(&INTEGER) => i.to_string(),
        Payload::Float(x) if value.is(&FLOAT) => format!("{x:?}"),
        Payload::Boolean(b) if value.is(&BOOLEAN) => b.to_string(),
        Payload::Null if value.is(&NULL) => String::new(),
        _ => return None,
    };
    Some(Value::string(text))
}

fn cast_boolean(value: &Value) -> Option<Value> {
    match &value.payload {
        Payload::Integer(i) if value.is(&INTEGER) => Some(Value::boolean(*i > 0)),
        Payload::Null if value.is(&NULL) => Some(Value::boolean(false)),
        _ => None,
    }
}

fn cast_list(value: &Value) -> Option<Value> {
    match &value.payload {
        Payload::String(s) if value.is(&STRING) => {
            Some(Value::list(s.chars().map(|c| Value::string(c.to_string())).collect()))
        },
        Payload::Null if value.is(&NULL) => Some(Value::list(Vec::new())),
        _ => None,
    }
}

fn cast_set(value: &Value) -> Option<Value> {
    match &value.payload {
        Payload::List(items) if value.is(&LIST) => {
            let elements = items.iter()
                                .map(SetValue::try_from)
                                .collect::<Result<_, _>>()
                                .ok()?;
            Some(Value::new(&SET, Payload::Set(elements)))
        },
        Payload::Null if value.is(&NULL) => Some(Value::new(&SET, Payload::Set(Default::default()))),
        _ => None,
    }
}

fn cast_map(value: &Value) -> Option<Value> {
    match &value.payload {
        Payload::Null if value.is(&NULL) => Some(Value::new(&MAP, Payload::Map(Vec::new()))),
        _ => None,
    }
}

fn cast_function(value: &Value) -> Option<Value> {
    match &value.payload {
        Payload::Null if value.is(&NULL) => Some(Value::new(&FUNCTION, Payload::Null)),
        _ => None,
    }
}

fn cast_object(value: &Value) -> Option<Value> {
    Some(Value::new(&OBJECT, value.payload.clone()))
}
