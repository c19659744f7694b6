//! Tree-walking interpreter for the Loris programming language.
//!
//! This crate provides the runtime evaluation of Loris programs by walking
//! the AST and executing each node directly.

use std::cell::RefCell;
use std::rc::Rc;

use loris_ast::{InfixOp, PrefixOp};
use loris_lexer::Span;
use loris_parser::ParseError;
use smol_str::SmolStr;
use thiserror::Error;

mod value;
mod environment;
mod eval;
mod builtins;

pub use environment::Environment;
pub use eval::Interpreter;
pub use value::{BuiltinFn, FunctionValue, Value};

/// Runtime errors that can occur during interpretation.
///
/// `Display` produces the bare message a host or test compares against;
/// the span is side-band data for diagnostics.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RuntimeError {
    #[error("identifier not found: {name}")]
    IdentifierNotFound { name: SmolStr, span: Span },

    #[error("type mismatch: {left} {op} {right}")]
    TypeMismatch {
        left: &'static str,
        op: InfixOp,
        right: &'static str,
        span: Span,
    },

    #[error("unknown operator: {op}{operand}")]
    UnknownPrefixOperator {
        op: PrefixOp,
        operand: &'static str,
        span: Span,
    },

    #[error("unknown operator: {left} {op} {right}")]
    UnknownInfixOperator {
        left: &'static str,
        op: InfixOp,
        right: &'static str,
        span: Span,
    },

    #[error("division by zero")]
    DivisionByZero { span: Span },

    #[error("not a function: {type_name}")]
    NotCallable { type_name: &'static str, span: Span },

    #[error("wrong number of arguments: expected {expected}, got {got}")]
    ArityMismatch {
        expected: usize,
        got: usize,
        span: Span,
    },

    #[error("wrong number of arguments. got={got}, want={want}")]
    BuiltinArity { got: usize, want: usize, span: Span },

    #[error("index operator not supported: {type_name}")]
    IndexNotSupported { type_name: &'static str, span: Span },

    #[error("argument to {builtin} not supported, got {type_name}")]
    UnsupportedArgument {
        builtin: &'static str,
        type_name: &'static str,
        span: Span,
    },

    #[error("argument to {builtin} must be ARRAY, got {type_name}")]
    ExpectedArray {
        builtin: &'static str,
        type_name: &'static str,
        span: Span,
    },
}

impl RuntimeError {
    pub fn span(&self) -> Span {
        match self {
            RuntimeError::IdentifierNotFound { span, .. } => *span,
            RuntimeError::TypeMismatch { span, .. } => *span,
            RuntimeError::UnknownPrefixOperator { span, .. } => *span,
            RuntimeError::UnknownInfixOperator { span, .. } => *span,
            RuntimeError::DivisionByZero { span } => *span,
            RuntimeError::NotCallable { span, .. } => *span,
            RuntimeError::ArityMismatch { span, .. } => *span,
            RuntimeError::BuiltinArity { span, .. } => *span,
            RuntimeError::IndexNotSupported { span, .. } => *span,
            RuntimeError::UnsupportedArgument { span, .. } => *span,
            RuntimeError::ExpectedArray { span, .. } => *span,
        }
    }
}

/// Result type for interpreter operations.
pub type Result<T> = std::result::Result<T, RuntimeError>;

/// Control-flow signals threaded through evaluation.
///
/// `Return` carries the value of a `return` statement up to the nearest
/// function call (or program) boundary, where it is unwrapped into a plain
/// value; `Error` aborts evaluation of every enclosing construct.
#[derive(Debug, Clone)]
pub enum Interrupt {
    Return(Value),
    Error(RuntimeError),
}

impl From<RuntimeError> for Interrupt {
    fn from(error: RuntimeError) -> Self {
        Interrupt::Error(error)
    }
}

/// Everything that can stop `interpret` from producing a value.
#[derive(Error, Debug)]
pub enum InterpretError {
    #[error("parsing failed with {} error(s)", .0.len())]
    Parse(Vec<ParseError>),

    #[error(transparent)]
    Runtime(#[from] RuntimeError),
}

/// Run a complete program against the given root environment and return its
/// final value.
///
/// The environment is caller-owned so bindings persist across calls; a REPL
/// passes the same environment for every line.
pub fn interpret(
    source: &str,
    env: &Rc<RefCell<Environment>>,
) -> std::result::Result<Value, InterpretError> {
    let (program, errors) = loris_parser::parse(source);
    if !errors.is_empty() {
        return Err(InterpretError::Parse(errors));
    }

    let mut interpreter = Interpreter::with_env(env.clone());
    interpreter.run(&program).map_err(InterpretError::Runtime)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_display() {
        assert_eq!(format!("{}", Value::Null), "null");
        assert_eq!(format!("{}", Value::Bool(true)), "true");
        assert_eq!(format!("{}", Value::Int(42)), "42");
        assert_eq!(format!("{}", Value::Str("hello".into())), "hello");
    }

    #[test]
    fn test_error_messages_are_bare() {
        let err = RuntimeError::TypeMismatch {
            left: "INTEGER",
            op: InfixOp::Add,
            right: "BOOLEAN",
            span: Span::dummy(),
        };
        assert_eq!(err.to_string(), "type mismatch: INTEGER + BOOLEAN");

        let err = RuntimeError::UnknownPrefixOperator {
            op: PrefixOp::Neg,
            operand: "BOOLEAN",
            span: Span::dummy(),
        };
        assert_eq!(err.to_string(), "unknown operator: -BOOLEAN");

        let err = RuntimeError::BuiltinArity {
            got: 2,
            want: 1,
            span: Span::dummy(),
        };
        assert_eq!(err.to_string(), "wrong number of arguments. got=2, want=1");
    }

    #[test]
    fn test_interpret_reuses_environment() {
        let env = Rc::new(RefCell::new(Environment::new()));
        interpret("let answer = 42;", &env).unwrap();
        let value = interpret("answer", &env).unwrap();
        assert_eq!(value, Value::Int(42));
    }

    #[test]
    fn test_interpret_surfaces_parse_errors() {
        let env = Rc::new(RefCell::new(Environment::new()));
        match interpret("let = 5;", &env) {
            Err(InterpretError::Parse(errors)) => assert!(!errors.is_empty()),
            other => panic!("expected parse errors, got {:?}", other),
        }
    }
}
