//! Runtime values for the Loris interpreter.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use loris_ast::{Block, Ident};
use loris_lexer::Span;
use smol_str::SmolStr;

use crate::Environment;

/// Runtime values in the Loris interpreter.
#[derive(Debug, Clone)]
pub enum Value {
    /// Null value (absence of value)
    Null,

    /// Boolean value
    Bool(bool),

    /// 64-bit signed integer
    Int(i64),

    /// String value
    Str(SmolStr),

    /// Array of values; arrays are immutable, so sharing is safe
    Array(Rc<Vec<Value>>),

    /// User-defined function (a closure over its defining environment)
    Function(Rc<FunctionValue>),

    /// Built-in function
    Builtin(BuiltinFn),
}

/// A user-defined Loris function.
///
/// Holds a copy of the parameter list and body from the function literal and
/// a shared reference to the environment the literal was evaluated in. The
/// shared reference is what makes closures work: bindings added to that
/// environment after capture are visible at call time.
#[derive(Clone)]
pub struct FunctionValue {
    pub params: Vec<Ident>,
    pub body: Block,
    pub env: Rc<RefCell<Environment>>,
}

impl fmt::Debug for FunctionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // the captured environment may contain this function; don't recurse
        write!(f, "FunctionValue(fn(")?;
        for (i, param) in self.params.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", param.node)?;
        }
        write!(f, "))")
    }
}

/// A built-in function implemented in Rust.
#[derive(Clone)]
pub struct BuiltinFn {
    pub name: &'static str,
    /// `None` means variadic
    pub arity: Option<usize>,
    pub func: fn(Vec<Value>, Span) -> crate::Result<Value>,
}

impl fmt::Debug for BuiltinFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BuiltinFn({})", self.name)
    }
}

impl Value {
    /// Get the type name of this value, as it appears in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "NULL",
            Value::Bool(_) => "BOOLEAN",
            Value::Int(_) => "INTEGER",
            Value::Str(_) => "STRING",
            Value::Array(_) => "ARRAY",
            Value::Function(_) => "FUNCTION",
            Value::Builtin(_) => "BUILTIN",
        }
    }

    /// Check if this value is truthy: only `false` and `null` are falsy.
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Value::Null | Value::Bool(false))
    }

    /// The canonical printable form of this value.
    pub fn inspect(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(n) => write!(f, "{}", n),
            Value::Str(s) => write!(f, "{}", s),
            Value::Array(elements) => {
                write!(f, "[")?;
                for (i, v) in elements.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", v)?;
                }
                write!(f, "]")
            }
            Value::Function(func) => {
                write!(f, "fn(")?;
                for (i, param) in func.params.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", param.node)?;
                }
                write!(f, ") {{ {} }}", func.body)
            }
            Value::Builtin(func) => write!(f, "<builtin {}>", func.name),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => a == b,
            (Value::Function(a), Value::Function(b)) => Rc::ptr_eq(a, b),
            (Value::Builtin(a), Value::Builtin(b)) => a.name == b.name,
            _ => false,
        }
    }
}

impl Default for Value {
    fn default() -> Self {
        Value::Null
    }
}
