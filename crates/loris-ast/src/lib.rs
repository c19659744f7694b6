//! Loris Language Abstract Syntax Tree
//!
//! Defines all AST node types for the Loris programming language, plus the
//! canonical printed form used by tests and the `parse` CLI subcommand. The
//! printed form is fully parenthesized for prefix and infix expressions, so
//! operator precedence is visible in the output and the output re-parses to
//! an equivalent tree.

use std::fmt;

// Re-export common types for use by other crates
pub use loris_lexer::Span;
pub use smol_str::SmolStr;

/// A spanned value - wraps any value with source location info
#[derive(Debug, Clone, PartialEq)]
pub struct Spanned<T> {
    pub node: T,
    pub span: Span,
}

impl<T> Spanned<T> {
    pub fn new(node: T, span: Span) -> Self {
        Self { node, span }
    }

    pub fn dummy(node: T) -> Self {
        Self {
            node,
            span: Span::dummy(),
        }
    }
}

/// Identifier (variable names, function parameters)
pub type Ident = Spanned<SmolStr>;

/// A complete Loris program
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub stmts: Vec<Stmt>,
    pub span: Span,
}

/// A brace-delimited sequence of statements
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub stmts: Vec<Stmt>,
    pub span: Span,
}

/// A statement with its source location
#[derive(Debug, Clone, PartialEq)]
pub struct Stmt {
    pub kind: StmtKind,
    pub span: Span,
}

impl Stmt {
    pub fn new(kind: StmtKind, span: Span) -> Self {
        Self { kind, span }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum StmtKind {
    /// `let name = value;`
    Let { name: Ident, value: Expr },
    /// `return value;`
    Return(Expr),
    /// A bare expression in statement position
    Expr(Expr),
}

/// An expression with its source location
#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Self { kind, span }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    /// Variable reference
    Ident(SmolStr),
    /// Integer literal
    Integer(i64),
    /// Boolean literal
    Bool(bool),
    /// String literal
    Str(SmolStr),
    /// Array literal: `[a, b, c]`
    Array(Vec<Expr>),
    /// Prefix operation: `!x`, `-x`
    Prefix { op: PrefixOp, operand: Box<Expr> },
    /// Infix operation: `a + b`
    Infix {
        op: InfixOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    /// `if (cond) { … } else { … }`; the else block is optional
    If {
        condition: Box<Expr>,
        then_block: Block,
        else_block: Option<Block>,
    },
    /// Function literal: `fn(a, b) { … }`
    Function { params: Vec<Ident>, body: Block },
    /// Call: `callee(a, b)`
    Call { callee: Box<Expr>, args: Vec<Expr> },
    /// Index: `object[index]`
    Index {
        object: Box<Expr>,
        index: Box<Expr>,
    },
}

/// Prefix operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrefixOp {
    /// `!`
    Not,
    /// `-`
    Neg,
}

impl fmt::Display for PrefixOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrefixOp::Not => write!(f, "!"),
            PrefixOp::Neg => write!(f, "-"),
        }
    }
}

/// Infix operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InfixOp {
    Add,
    Sub,
    Mul,
    Div,
    Lt,
    Gt,
    Eq,
    NotEq,
}

impl fmt::Display for InfixOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InfixOp::Add => write!(f, "+"),
            InfixOp::Sub => write!(f, "-"),
            InfixOp::Mul => write!(f, "*"),
            InfixOp::Div => write!(f, "/"),
            InfixOp::Lt => write!(f, "<"),
            InfixOp::Gt => write!(f, ">"),
            InfixOp::Eq => write!(f, "=="),
            InfixOp::NotEq => write!(f, "!="),
        }
    }
}

fn write_joined<T: fmt::Display>(
    f: &mut fmt::Formatter<'_>,
    items: &[T],
    sep: &str,
) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(sep)?;
        }
        write!(f, "{}", item)?;
    }
    Ok(())
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_joined(f, &self.stmts, " ")
    }
}

/// Prints the statements only; enclosing constructs add the braces
impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_joined(f, &self.stmts, " ")
    }
}

impl fmt::Display for Stmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            StmtKind::Let { name, value } => write!(f, "let {} = {};", name.node, value),
            StmtKind::Return(value) => write!(f, "return {};", value),
            StmtKind::Expr(expr) => write!(f, "{}", expr),
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ExprKind::Ident(name) => write!(f, "{}", name),
            ExprKind::Integer(value) => write!(f, "{}", value),
            ExprKind::Bool(value) => write!(f, "{}", value),
            ExprKind::Str(value) => write!(f, "\"{}\"", value),
            ExprKind::Array(elements) => {
                write!(f, "[")?;
                write_joined(f, elements, ", ")?;
                write!(f, "]")
            }
            ExprKind::Prefix { op, operand } => write!(f, "({}{})", op, operand),
            ExprKind::Infix { op, left, right } => write!(f, "({} {} {})", left, op, right),
            ExprKind::If {
                condition,
                then_block,
                else_block,
            } => {
                write!(f, "if ({}) {{ {} }}", condition, then_block)?;
                if let Some(alt) = else_block {
                    write!(f, " else {{ {} }}", alt)?;
                }
                Ok(())
            }
            ExprKind::Function { params, body } => {
                write!(f, "fn(")?;
                for (i, param) in params.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", param.node)?;
                }
                write!(f, ") {{ {} }}", body)
            }
            ExprKind::Call { callee, args } => {
                write!(f, "{}(", callee)?;
                write_joined(f, args, ", ")?;
                write!(f, ")")
            }
            ExprKind::Index { object, index } => write!(f, "({}[{}])", object, index),
        }
    }
}
