//! Expression evaluation and statement execution for the Loris interpreter.

use std::cell::RefCell;
use std::rc::Rc;

use loris_ast::{Block, Expr, ExprKind, InfixOp, PrefixOp, Program, Stmt, StmtKind};
use loris_lexer::Span;
use smol_str::SmolStr;

use crate::builtins;
use crate::environment::Environment;
use crate::value::{FunctionValue, Value};
use crate::{Interrupt, RuntimeError};

/// Internal evaluation result: `Err` carries either a runtime error or the
/// `return` signal, so `?` propagates both through nested constructs.
type Flow<T = Value> = std::result::Result<T, Interrupt>;

/// The Loris interpreter - evaluates AST nodes against an environment chain.
pub struct Interpreter {
    /// Current environment (changes with scope)
    env: Rc<RefCell<Environment>>,
}

impl Interpreter {
    /// Create a new interpreter with a fresh root environment.
    pub fn new() -> Self {
        Self::with_env(Rc::new(RefCell::new(Environment::new())))
    }

    /// Create an interpreter evaluating against a caller-owned environment.
    pub fn with_env(env: Rc<RefCell<Environment>>) -> Self {
        Interpreter { env }
    }

    /// Execute a program and return its final value.
    ///
    /// The last statement's value is the result; a top-level `return` is
    /// unwrapped here, the same way a function call boundary unwraps it.
    pub fn run(&mut self, program: &Program) -> crate::Result<Value> {
        let mut last = Value::Null;
        for stmt in &program.stmts {
            match self.eval_stmt(stmt) {
                Ok(value) => last = value,
                Err(Interrupt::Return(value)) => return Ok(value),
                Err(Interrupt::Error(error)) => return Err(error),
            }
        }
        Ok(last)
    }

    fn eval_stmt(&mut self, stmt: &Stmt) -> Flow {
        match &stmt.kind {
            StmtKind::Let { name, value } => {
                let value = self.eval_expr(value)?;
                self.env.borrow_mut().define(name.node.clone(), value);
                Ok(Value::Null)
            }
            StmtKind::Return(expr) => {
                let value = self.eval_expr(expr)?;
                Err(Interrupt::Return(value))
            }
            StmtKind::Expr(expr) => self.eval_expr(expr),
        }
    }

    /// Evaluate a block; a `return` signal passes through unchanged so the
    /// enclosing function boundary sees it.
    fn eval_block(&mut self, block: &Block) -> Flow {
        let mut last = Value::Null;
        for stmt in &block.stmts {
            last = self.eval_stmt(stmt)?;
        }
        Ok(last)
    }

    fn eval_expr(&mut self, expr: &Expr) -> Flow {
        match &expr.kind {
            ExprKind::Integer(n) => Ok(Value::Int(*n)),
            ExprKind::Bool(b) => Ok(Value::Bool(*b)),
            ExprKind::Str(s) => Ok(Value::Str(s.clone())),

            ExprKind::Ident(name) => self.lookup(name, expr.span),

            ExprKind::Array(elements) => {
                let mut values = Vec::with_capacity(elements.len());
                for element in elements {
                    values.push(self.eval_expr(element)?);
                }
                Ok(Value::Array(Rc::new(values)))
            }

            ExprKind::Prefix { op, operand } => {
                let value = self.eval_expr(operand)?;
                eval_prefix(*op, value, expr.span).map_err(Interrupt::from)
            }

            ExprKind::Infix { op, left, right } => {
                let lhs = self.eval_expr(left)?;
                let rhs = self.eval_expr(right)?;
                eval_infix(*op, lhs, rhs, expr.span).map_err(Interrupt::from)
            }

            ExprKind::If {
                condition,
                then_block,
                else_block,
            } => {
                let cond = self.eval_expr(condition)?;
                if cond.is_truthy() {
                    self.eval_block(then_block)
                } else if let Some(alt) = else_block {
                    self.eval_block(alt)
                } else {
                    Ok(Value::Null)
                }
            }

            ExprKind::Function { params, body } => Ok(Value::Function(Rc::new(FunctionValue {
                params: params.clone(),
                body: body.clone(),
                env: self.env.clone(),
            }))),

            ExprKind::Call { callee, args } => {
                let func = self.eval_expr(callee)?;
                let mut values = Vec::with_capacity(args.len());
                for arg in args {
                    values.push(self.eval_expr(arg)?);
                }
                self.call_value(func, values, expr.span)
            }

            ExprKind::Index { object, index } => {
                let object = self.eval_expr(object)?;
                let index = self.eval_expr(index)?;
                eval_index(object, index, expr.span).map_err(Interrupt::from)
            }
        }
    }

    fn lookup(&self, name: &SmolStr, span: Span) -> Flow {
        if let Some(value) = self.env.borrow().get(name) {
            return Ok(value);
        }
        if let Some(builtin) = builtins::lookup(name) {
            return Ok(builtin);
        }
        Err(RuntimeError::IdentifierNotFound {
            name: name.clone(),
            span,
        }
        .into())
    }

    /// Call a value as a function.
    fn call_value(&mut self, func: Value, args: Vec<Value>, span: Span) -> Flow {
        match func {
            Value::Function(f) => {
                if f.params.len() != args.len() {
                    return Err(RuntimeError::ArityMismatch {
                        expected: f.params.len(),
                        got: args.len(),
                        span,
                    }
                    .into());
                }

                // The call frame encloses the *captured* environment, not the
                // caller's - this is lexical scoping.
                let call_env = Rc::new(RefCell::new(Environment::with_parent(f.env.clone())));
                for (param, arg) in f.params.iter().zip(args) {
                    call_env.borrow_mut().define(param.node.clone(), arg);
                }

                let previous = std::mem::replace(&mut self.env, call_env);
                let result = self.eval_block(&f.body);
                self.env = previous;

                // a `return` anywhere in the body stops here
                match result {
                    Err(Interrupt::Return(value)) => Ok(value),
                    other => other,
                }
            }
            Value::Builtin(b) => {
                if let Some(want) = b.arity {
                    if args.len() != want {
                        return Err(RuntimeError::BuiltinArity {
                            got: args.len(),
                            want,
                            span,
                        }
                        .into());
                    }
                }
                (b.func)(args, span).map_err(Interrupt::from)
            }
            other => Err(RuntimeError::NotCallable {
                type_name: other.type_name(),
                span,
            }
            .into()),
        }
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

fn eval_prefix(op: PrefixOp, operand: Value, span: Span) -> crate::Result<Value> {
    match op {
        PrefixOp::Not => Ok(Value::Bool(!operand.is_truthy())),
        PrefixOp::Neg => match operand {
            Value::Int(n) => Ok(Value::Int(n.wrapping_neg())),
            value => Err(RuntimeError::UnknownPrefixOperator {
                op,
                operand: value.type_name(),
                span,
            }),
        },
    }
}

fn eval_infix(op: InfixOp, left: Value, right: Value, span: Span) -> crate::Result<Value> {
    match (left, right) {
        (Value::Int(l), Value::Int(r)) => eval_integer_infix(op, l, r, span),

        (Value::Bool(l), Value::Bool(r)) => match op {
            InfixOp::Eq => Ok(Value::Bool(l == r)),
            InfixOp::NotEq => Ok(Value::Bool(l != r)),
            _ => Err(unknown_infix(op, "BOOLEAN", "BOOLEAN", span)),
        },

        (Value::Str(l), Value::Str(r)) => match op {
            InfixOp::Add => Ok(Value::Str(format!("{}{}", l, r).into())),
            _ => Err(unknown_infix(op, "STRING", "STRING", span)),
        },

        (l, r) if l.type_name() != r.type_name() => Err(RuntimeError::TypeMismatch {
            left: l.type_name(),
            op,
            right: r.type_name(),
            span,
        }),

        (l, r) => Err(unknown_infix(op, l.type_name(), r.type_name(), span)),
    }
}

fn unknown_infix(op: InfixOp, left: &'static str, right: &'static str, span: Span) -> RuntimeError {
    RuntimeError::UnknownInfixOperator {
        left,
        op,
        right,
        span,
    }
}

/// Integer arithmetic wraps on overflow (two's complement); division
/// truncates toward zero and rejects a zero divisor.
fn eval_integer_infix(op: InfixOp, l: i64, r: i64, span: Span) -> crate::Result<Value> {
    match op {
        InfixOp::Add => Ok(Value::Int(l.wrapping_add(r))),
        InfixOp::Sub => Ok(Value::Int(l.wrapping_sub(r))),
        InfixOp::Mul => Ok(Value::Int(l.wrapping_mul(r))),
        InfixOp::Div => {
            if r == 0 {
                Err(RuntimeError::DivisionByZero { span })
            } else {
                Ok(Value::Int(l.wrapping_div(r)))
            }
        }
        InfixOp::Lt => Ok(Value::Bool(l < r)),
        InfixOp::Gt => Ok(Value::Bool(l > r)),
        InfixOp::Eq => Ok(Value::Bool(l == r)),
        InfixOp::NotEq => Ok(Value::Bool(l != r)),
    }
}

/// Out-of-range and negative indices produce `null`, not an error.
fn eval_index(object: Value, index: Value, span: Span) -> crate::Result<Value> {
    match (object, index) {
        (Value::Array(elements), Value::Int(i)) => {
            if i < 0 || i as usize >= elements.len() {
                Ok(Value::Null)
            } else {
                Ok(elements[i as usize].clone())
            }
        }
        (object, _) => Err(RuntimeError::IndexNotSupported {
            type_name: object.type_name(),
            span,
        }),
    }
}
