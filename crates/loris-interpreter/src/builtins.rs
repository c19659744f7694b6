//! Built-in functions for the Loris interpreter.
//!
//! Builtins are not stored in any environment. Identifier resolution checks
//! the environment chain first and this table second, so a `let len = …`
//! binding shadows the builtin of the same name.

use std::rc::Rc;

use loris_lexer::Span;

use crate::value::{BuiltinFn, Value};
use crate::{Result, RuntimeError};

/// Look up a built-in function by name.
pub fn lookup(name: &str) -> Option<Value> {
    let builtin = match name {
        "len" => make_builtin("len", Some(1), builtin_len),
        "first" => make_builtin("first", Some(1), builtin_first),
        "last" => make_builtin("last", Some(1), builtin_last),
        "rest" => make_builtin("rest", Some(1), builtin_rest),
        "push" => make_builtin("push", Some(2), builtin_push),
        "puts" => make_builtin("puts", None, builtin_puts),
        _ => return None,
    };
    Some(builtin)
}

fn make_builtin(
    name: &'static str,
    arity: Option<usize>,
    func: fn(Vec<Value>, Span) -> Result<Value>,
) -> Value {
    Value::Builtin(BuiltinFn { name, arity, func })
}

/// `len(x)`: byte length of a string or element count of an array.
fn builtin_len(args: Vec<Value>, span: Span) -> Result<Value> {
    match &args[0] {
        Value::Str(s) => Ok(Value::Int(s.len() as i64)),
        Value::Array(elements) => Ok(Value::Int(elements.len() as i64)),
        value => Err(RuntimeError::UnsupportedArgument {
            builtin: "len",
            type_name: value.type_name(),
            span,
        }),
    }
}

/// `first(arr)`: the first element, or `null` for an empty array.
fn builtin_first(args: Vec<Value>, span: Span) -> Result<Value> {
    match &args[0] {
        Value::Array(elements) => Ok(elements.first().cloned().unwrap_or(Value::Null)),
        value => Err(RuntimeError::ExpectedArray {
            builtin: "first",
            type_name: value.type_name(),
            span,
        }),
    }
}

/// `last(arr)`: the last element, or `null` for an empty array.
fn builtin_last(args: Vec<Value>, span: Span) -> Result<Value> {
    match &args[0] {
        Value::Array(elements) => Ok(elements.last().cloned().unwrap_or(Value::Null)),
        value => Err(RuntimeError::ExpectedArray {
            builtin: "last",
            type_name: value.type_name(),
            span,
        }),
    }
}

/// `rest(arr)`: a new array without the first element, or `null` for an
/// empty array.
fn builtin_rest(args: Vec<Value>, span: Span) -> Result<Value> {
    match &args[0] {
        Value::Array(elements) => {
            if elements.is_empty() {
                Ok(Value::Null)
            } else {
                Ok(Value::Array(Rc::new(elements[1..].to_vec())))
            }
        }
        value => Err(RuntimeError::ExpectedArray {
            builtin: "rest",
            type_name: value.type_name(),
            span,
        }),
    }
}

/// `push(arr, value)`: a new array with the value appended; the source array
/// is unchanged.
fn builtin_push(args: Vec<Value>, span: Span) -> Result<Value> {
    let mut args = args.into_iter();
    let array = args.next().expect("arity checked by caller");
    let value = args.next().expect("arity checked by caller");

    match array {
        Value::Array(elements) => {
            let mut out = elements.as_ref().clone();
            out.push(value);
            Ok(Value::Array(Rc::new(out)))
        }
        other => Err(RuntimeError::ExpectedArray {
            builtin: "push",
            type_name: other.type_name(),
            span,
        }),
    }
}

/// `puts(…)`: print each argument's inspect form on its own line.
fn builtin_puts(args: Vec<Value>, _span: Span) -> Result<Value> {
    for arg in &args {
        println!("{}", arg);
    }
    Ok(Value::Null)
}
