//! Loris Language Parser
//!
//! Pratt (precedence-climbing) parser that produces an AST from the token
//! stream. Parsing does not stop at the first problem: a statement that fails
//! to parse is skipped, its error is recorded, and the statement loop tries
//! again, so a caller can report every problem at once.

use loris_ast::*;
use loris_lexer::{Lexer, Span, Token, TokenKind};
use smol_str::SmolStr;
use thiserror::Error;

/// Parser error type
#[derive(Debug, Clone, Error)]
pub enum ParseError {
    #[error("expected next token to be {expected}, got {found} instead")]
    UnexpectedToken {
        expected: String,
        found: String,
        span: Span,
    },

    #[error("no prefix parse function for {found}")]
    NoPrefixParse { found: String, span: Span },

    #[error("could not parse {literal} as integer")]
    InvalidInteger { literal: SmolStr, span: Span },
}

impl ParseError {
    pub fn span(&self) -> Span {
        match self {
            ParseError::UnexpectedToken { span, .. } => *span,
            ParseError::NoPrefixParse { span, .. } => *span,
            ParseError::InvalidInteger { span, .. } => *span,
        }
    }
}

/// Result type for parser operations
pub type ParseResult<T> = Result<T, ParseError>;

/// Operator binding strength, low to high. An infix operator only takes over
/// when it binds tighter than the expression currently being parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Precedence {
    Lowest,
    /// `==` `!=`
    Equals,
    /// `<` `>`
    LessGreater,
    /// `+` `-`
    Sum,
    /// `*` `/`
    Product,
    /// `-x` `!x`
    Prefix,
    /// `f(…)`
    Call,
    /// `a[…]`
    Index,
}

fn precedence_of(kind: &TokenKind) -> Precedence {
    match kind {
        TokenKind::EqEq | TokenKind::NotEq => Precedence::Equals,
        TokenKind::Lt | TokenKind::Gt => Precedence::LessGreater,
        TokenKind::Plus | TokenKind::Minus => Precedence::Sum,
        TokenKind::Star | TokenKind::Slash => Precedence::Product,
        TokenKind::LParen => Precedence::Call,
        TokenKind::LBracket => Precedence::Index,
        _ => Precedence::Lowest,
    }
}

/// Parser state: the streaming lexer plus one token of lookahead
pub struct Parser<'src> {
    lexer: Lexer<'src>,
    cur: Token,
    peek: Token,
    errors: Vec<ParseError>,
}

impl<'src> Parser<'src> {
    /// Create a new parser from source code
    pub fn new(source: &'src str) -> Self {
        let mut lexer = Lexer::new(source);
        let cur = lexer.next_token();
        let peek = lexer.next_token();
        Self {
            lexer,
            cur,
            peek,
            errors: Vec::new(),
        }
    }

    /// Parse the entire program
    pub fn parse_program(&mut self) -> Program {
        let start = self.cur.span;
        let mut stmts = Vec::new();

        while self.cur.kind != TokenKind::Eof {
            match self.parse_statement() {
                Ok(stmt) => stmts.push(stmt),
                Err(e) => self.errors.push(e),
            }
            self.next_token();
        }

        Program {
            stmts,
            span: start.merge(self.cur.span),
        }
    }

    /// Get collected errors
    pub fn errors(&self) -> &[ParseError] {
        &self.errors
    }

    // ========================================================================
    // Token Navigation
    // ========================================================================

    fn next_token(&mut self) {
        self.cur = std::mem::replace(&mut self.peek, self.lexer.next_token());
    }

    fn peek_is(&self, kind: &TokenKind) -> bool {
        self.peek.kind == *kind
    }

    /// Advance onto the peek token if it has the expected kind; otherwise
    /// record nothing, consume nothing, and return the error.
    fn expect_peek(&mut self, kind: TokenKind) -> ParseResult<()> {
        if self.peek.kind == kind {
            self.next_token();
            Ok(())
        } else {
            Err(ParseError::UnexpectedToken {
                expected: kind.to_string(),
                found: self.peek.kind.to_string(),
                span: self.peek.span,
            })
        }
    }

    /// Like `expect_peek` for identifiers, which carry their name
    fn expect_ident(&mut self) -> ParseResult<Ident> {
        match &self.peek.kind {
            TokenKind::Ident(name) => {
                let ident = Ident::new(name.clone(), self.peek.span);
                self.next_token();
                Ok(ident)
            }
            found => Err(ParseError::UnexpectedToken {
                expected: "identifier".to_string(),
                found: found.to_string(),
                span: self.peek.span,
            }),
        }
    }

    // ========================================================================
    // Statements
    // ========================================================================

    fn parse_statement(&mut self) -> ParseResult<Stmt> {
        match self.cur.kind {
            TokenKind::Let => self.parse_let_statement(),
            TokenKind::Return => self.parse_return_statement(),
            _ => self.parse_expression_statement(),
        }
    }

    fn parse_let_statement(&mut self) -> ParseResult<Stmt> {
        let start = self.cur.span;

        let name = self.expect_ident()?;
        self.expect_peek(TokenKind::Eq)?;
        self.next_token();

        let value = self.parse_expression(Precedence::Lowest)?;
        if self.peek_is(&TokenKind::Semi) {
            self.next_token();
        }

        let span = start.merge(self.cur.span);
        Ok(Stmt::new(StmtKind::Let { name, value }, span))
    }

    fn parse_return_statement(&mut self) -> ParseResult<Stmt> {
        let start = self.cur.span;
        self.next_token();

        let value = self.parse_expression(Precedence::Lowest)?;
        if self.peek_is(&TokenKind::Semi) {
            self.next_token();
        }

        let span = start.merge(self.cur.span);
        Ok(Stmt::new(StmtKind::Return(value), span))
    }

    fn parse_expression_statement(&mut self) -> ParseResult<Stmt> {
        let start = self.cur.span;
        let expr = self.parse_expression(Precedence::Lowest)?;
        if self.peek_is(&TokenKind::Semi) {
            self.next_token();
        }

        let span = start.merge(self.cur.span);
        Ok(Stmt::new(StmtKind::Expr(expr), span))
    }

    // ========================================================================
    // Expressions
    // ========================================================================

    fn parse_expression(&mut self, min: Precedence) -> ParseResult<Expr> {
        let mut left = self.parse_prefix()?;

        while !self.peek_is(&TokenKind::Semi) && min < precedence_of(&self.peek.kind) {
            left = match self.peek.kind {
                TokenKind::Plus
                | TokenKind::Minus
                | TokenKind::Star
                | TokenKind::Slash
                | TokenKind::Lt
                | TokenKind::Gt
                | TokenKind::EqEq
                | TokenKind::NotEq => {
                    self.next_token();
                    self.parse_infix_expression(left)?
                }
                TokenKind::LParen => {
                    self.next_token();
                    self.parse_call_expression(left)?
                }
                TokenKind::LBracket => {
                    self.next_token();
                    self.parse_index_expression(left)?
                }
                _ => break,
            };
        }

        Ok(left)
    }

    /// Dispatch on the token kind that can begin an expression
    fn parse_prefix(&mut self) -> ParseResult<Expr> {
        let span = self.cur.span;
        match &self.cur.kind {
            TokenKind::Ident(name) => Ok(Expr::new(ExprKind::Ident(name.clone()), span)),
            TokenKind::Integer(literal) => {
                let value = literal
                    .parse::<i64>()
                    .map_err(|_| ParseError::InvalidInteger {
                        literal: literal.clone(),
                        span,
                    })?;
                Ok(Expr::new(ExprKind::Integer(value), span))
            }
            TokenKind::True => Ok(Expr::new(ExprKind::Bool(true), span)),
            TokenKind::False => Ok(Expr::new(ExprKind::Bool(false), span)),
            TokenKind::Str(value) => Ok(Expr::new(ExprKind::Str(value.clone()), span)),
            TokenKind::Bang => self.parse_prefix_operator(PrefixOp::Not),
            TokenKind::Minus => self.parse_prefix_operator(PrefixOp::Neg),
            TokenKind::LParen => self.parse_grouped_expression(),
            TokenKind::If => self.parse_if_expression(),
            TokenKind::Fn => self.parse_function_literal(),
            TokenKind::LBracket => self.parse_array_literal(),
            found => Err(ParseError::NoPrefixParse {
                found: found.to_string(),
                span,
            }),
        }
    }

    fn parse_prefix_operator(&mut self, op: PrefixOp) -> ParseResult<Expr> {
        let start = self.cur.span;
        self.next_token();

        let operand = self.parse_expression(Precedence::Prefix)?;
        let span = start.merge(operand.span);
        Ok(Expr::new(
            ExprKind::Prefix {
                op,
                operand: Box::new(operand),
            },
            span,
        ))
    }

    /// Current token is the operator; left operand is already parsed
    fn parse_infix_expression(&mut self, left: Expr) -> ParseResult<Expr> {
        let op = match self.cur.kind {
            TokenKind::Plus => InfixOp::Add,
            TokenKind::Minus => InfixOp::Sub,
            TokenKind::Star => InfixOp::Mul,
            TokenKind::Slash => InfixOp::Div,
            TokenKind::Lt => InfixOp::Lt,
            TokenKind::Gt => InfixOp::Gt,
            TokenKind::EqEq => InfixOp::Eq,
            TokenKind::NotEq => InfixOp::NotEq,
            _ => unreachable!("parse_infix_expression called on non-operator"),
        };
        let prec = precedence_of(&self.cur.kind);
        self.next_token();

        let right = self.parse_expression(prec)?;
        let span = left.span.merge(right.span);
        Ok(Expr::new(
            ExprKind::Infix {
                op,
                left: Box::new(left),
                right: Box::new(right),
            },
            span,
        ))
    }

    fn parse_grouped_expression(&mut self) -> ParseResult<Expr> {
        self.next_token();
        let expr = self.parse_expression(Precedence::Lowest)?;
        self.expect_peek(TokenKind::RParen)?;
        Ok(expr)
    }

    fn parse_if_expression(&mut self) -> ParseResult<Expr> {
        let start = self.cur.span;

        self.expect_peek(TokenKind::LParen)?;
        self.next_token();
        let condition = self.parse_expression(Precedence::Lowest)?;
        self.expect_peek(TokenKind::RParen)?;

        self.expect_peek(TokenKind::LBrace)?;
        let then_block = self.parse_block()?;

        let else_block = if self.peek_is(&TokenKind::Else) {
            self.next_token();
            self.expect_peek(TokenKind::LBrace)?;
            Some(self.parse_block()?)
        } else {
            None
        };

        let span = start.merge(self.cur.span);
        Ok(Expr::new(
            ExprKind::If {
                condition: Box::new(condition),
                then_block,
                else_block,
            },
            span,
        ))
    }

    /// Current token is `{`; leaves the current token on the closing `}`
    fn parse_block(&mut self) -> ParseResult<Block> {
        let start = self.cur.span;
        let mut stmts = Vec::new();

        self.next_token();
        while self.cur.kind != TokenKind::RBrace && self.cur.kind != TokenKind::Eof {
            stmts.push(self.parse_statement()?);
            self.next_token();
        }

        if self.cur.kind != TokenKind::RBrace {
            return Err(ParseError::UnexpectedToken {
                expected: TokenKind::RBrace.to_string(),
                found: self.cur.kind.to_string(),
                span: self.cur.span,
            });
        }

        Ok(Block {
            stmts,
            span: start.merge(self.cur.span),
        })
    }

    fn parse_function_literal(&mut self) -> ParseResult<Expr> {
        let start = self.cur.span;

        self.expect_peek(TokenKind::LParen)?;
        let params = self.parse_function_params()?;

        self.expect_peek(TokenKind::LBrace)?;
        let body = self.parse_block()?;

        let span = start.merge(self.cur.span);
        Ok(Expr::new(ExprKind::Function { params, body }, span))
    }

    /// Current token is `(`; parses zero or more comma-separated identifiers
    fn parse_function_params(&mut self) -> ParseResult<Vec<Ident>> {
        let mut params = Vec::new();

        if self.peek_is(&TokenKind::RParen) {
            self.next_token();
            return Ok(params);
        }

        params.push(self.expect_ident()?);
        while self.peek_is(&TokenKind::Comma) {
            self.next_token();
            params.push(self.expect_ident()?);
        }

        self.expect_peek(TokenKind::RParen)?;
        Ok(params)
    }

    fn parse_array_literal(&mut self) -> ParseResult<Expr> {
        let start = self.cur.span;
        let elements = self.parse_expression_list(TokenKind::RBracket)?;
        let span = start.merge(self.cur.span);
        Ok(Expr::new(ExprKind::Array(elements), span))
    }

    /// Current token is `(`; left is the callee
    fn parse_call_expression(&mut self, callee: Expr) -> ParseResult<Expr> {
        let args = self.parse_expression_list(TokenKind::RParen)?;
        let span = callee.span.merge(self.cur.span);
        Ok(Expr::new(
            ExprKind::Call {
                callee: Box::new(callee),
                args,
            },
            span,
        ))
    }

    /// Current token is `[`; left is the collection being indexed
    fn parse_index_expression(&mut self, object: Expr) -> ParseResult<Expr> {
        self.next_token();
        let index = self.parse_expression(Precedence::Lowest)?;
        self.expect_peek(TokenKind::RBracket)?;

        let span = object.span.merge(self.cur.span);
        Ok(Expr::new(
            ExprKind::Index {
                object: Box::new(object),
                index: Box::new(index),
            },
            span,
        ))
    }

    /// Zero or more comma-separated expressions terminated by `end`
    fn parse_expression_list(&mut self, end: TokenKind) -> ParseResult<Vec<Expr>> {
        let mut items = Vec::new();

        if self.peek_is(&end) {
            self.next_token();
            return Ok(items);
        }

        self.next_token();
        items.push(self.parse_expression(Precedence::Lowest)?);
        while self.peek_is(&TokenKind::Comma) {
            self.next_token();
            self.next_token();
            items.push(self.parse_expression(Precedence::Lowest)?);
        }

        self.expect_peek(end)?;
        Ok(items)
    }
}

/// Parse a source string, returning the (possibly partial) program together
/// with every parse error encountered
pub fn parse(source: &str) -> (Program, Vec<ParseError>) {
    let mut parser = Parser::new(source);
    let program = parser.parse_program();
    let errors = std::mem::take(&mut parser.errors);
    (program, errors)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Parse and panic on any error
    fn parse_ok(source: &str) -> Program {
        let (program, errors) = parse(source);
        assert!(errors.is_empty(), "parse errors for {:?}: {:?}", source, errors);
        program
    }

    fn parse_errors(source: &str) -> Vec<String> {
        let (_, errors) = parse(source);
        errors.iter().map(|e| e.to_string()).collect()
    }

    /// The single statement of a one-statement program
    fn single_stmt(source: &str) -> Stmt {
        let mut program = parse_ok(source);
        assert_eq!(program.stmts.len(), 1, "program: {:?}", program);
        program.stmts.remove(0)
    }

    fn single_expr(source: &str) -> Expr {
        match single_stmt(source).kind {
            StmtKind::Expr(expr) => expr,
            other => panic!("expected expression statement, got {:?}", other),
        }
    }

    #[test]
    fn test_let_statements() {
        let program = parse_ok("let x = 5; let y = 10; let foobar = 838383;");
        assert_eq!(program.stmts.len(), 3);

        let names = ["x", "y", "foobar"];
        for (stmt, expected) in program.stmts.iter().zip(names) {
            match &stmt.kind {
                StmtKind::Let { name, .. } => assert_eq!(name.node, expected),
                other => panic!("expected let statement, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_return_statements() {
        let program = parse_ok("return 5; return foobar;");
        assert_eq!(program.stmts.len(), 2);
        for stmt in &program.stmts {
            assert!(matches!(stmt.kind, StmtKind::Return(_)));
        }
    }

    #[test]
    fn test_literal_expressions() {
        assert_eq!(single_expr("5;").kind, ExprKind::Integer(5));
        assert_eq!(single_expr("true;").kind, ExprKind::Bool(true));
        assert_eq!(single_expr("false;").kind, ExprKind::Bool(false));
        assert_eq!(single_expr("foobar;").kind, ExprKind::Ident("foobar".into()));
        assert_eq!(
            single_expr("\"hello world\";").kind,
            ExprKind::Str("hello world".into())
        );
    }

    #[test]
    fn test_prefix_expressions() {
        let cases = [
            ("!5;", PrefixOp::Not, ExprKind::Integer(5)),
            ("-15;", PrefixOp::Neg, ExprKind::Integer(15)),
            ("!true;", PrefixOp::Not, ExprKind::Bool(true)),
        ];
        for (source, expected_op, expected_operand) in cases {
            match single_expr(source).kind {
                ExprKind::Prefix { op, operand } => {
                    assert_eq!(op, expected_op);
                    assert_eq!(operand.kind, expected_operand);
                }
                other => panic!("expected prefix expression, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_infix_expressions() {
        let cases = [
            ("5 + 5;", InfixOp::Add),
            ("5 - 5;", InfixOp::Sub),
            ("5 * 5;", InfixOp::Mul),
            ("5 / 5;", InfixOp::Div),
            ("5 < 5;", InfixOp::Lt),
            ("5 > 5;", InfixOp::Gt),
            ("5 == 5;", InfixOp::Eq),
            ("5 != 5;", InfixOp::NotEq),
        ];
        for (source, expected_op) in cases {
            match single_expr(source).kind {
                ExprKind::Infix { op, left, right } => {
                    assert_eq!(op, expected_op);
                    assert_eq!(left.kind, ExprKind::Integer(5));
                    assert_eq!(right.kind, ExprKind::Integer(5));
                }
                other => panic!("expected infix expression, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_operator_precedence() {
        let cases = [
            ("-a * b", "((-a) * b)"),
            ("!-a", "(!(-a))"),
            ("a + b + c", "((a + b) + c)"),
            ("a + b * c + d", "((a + (b * c)) + d)"),
            ("a + b - c", "((a + b) - c)"),
            ("a * b * c", "((a * b) * c)"),
            ("a * b / c", "((a * b) / c)"),
            ("a + b / c", "(a + (b / c))"),
            ("a + b * c + d / e - f", "(((a + (b * c)) + (d / e)) - f)"),
            ("5 > 4 == 3 < 4", "((5 > 4) == (3 < 4))"),
            ("5 < 4 != 3 > 4", "((5 < 4) != (3 > 4))"),
            ("3 + 4 * 5 == 3 * 1 + 4 * 5", "((3 + (4 * 5)) == ((3 * 1) + (4 * 5)))"),
            ("true == true", "(true == true)"),
            ("3 > 5 == false", "((3 > 5) == false)"),
            ("1 + (2 + 3) + 4", "((1 + (2 + 3)) + 4)"),
            ("(5 + 5) * 2", "((5 + 5) * 2)"),
            ("2 / (5 + 5)", "(2 / (5 + 5))"),
            ("-(5 + 5)", "(-(5 + 5))"),
            ("!(true == true)", "(!(true == true))"),
            ("a + add(b * c) + d", "((a + add((b * c))) + d)"),
            (
                "add(a, b, 1, 2 * 3, 4 + 5, add(6, 7 * 8))",
                "add(a, b, 1, (2 * 3), (4 + 5), add(6, (7 * 8)))",
            ),
            ("add(a + b + c * d / f + g)", "add((((a + b) + ((c * d) / f)) + g))"),
            (
                "a * [1, 2, 3, 4][b * c] * d",
                "((a * ([1, 2, 3, 4][(b * c)])) * d)",
            ),
            (
                "add(a * b[2], b[1], 2 * [1, 2][1])",
                "add((a * (b[2])), (b[1]), (2 * ([1, 2][1])))",
            ),
        ];
        for (source, expected) in cases {
            assert_eq!(parse_ok(source).to_string(), expected, "source: {}", source);
        }
    }

    #[test]
    fn test_grouped_arithmetic_precedence() {
        assert_eq!(
            parse_ok("(5 + 10 * 2 + 15 / 3) * 2 + -10").to_string(),
            "((((5 + (10 * 2)) + (15 / 3)) * 2) + (-10))"
        );
    }

    #[test]
    fn test_if_expression() {
        match single_expr("if (x < y) { x }").kind {
            ExprKind::If {
                condition,
                then_block,
                else_block,
            } => {
                assert_eq!(condition.to_string(), "(x < y)");
                assert_eq!(then_block.stmts.len(), 1);
                assert!(else_block.is_none());
            }
            other => panic!("expected if expression, got {:?}", other),
        }
    }

    #[test]
    fn test_if_else_expression() {
        match single_expr("if (x < y) { x } else { y }").kind {
            ExprKind::If { else_block, .. } => {
                let alt = else_block.expect("expected else block");
                assert_eq!(alt.stmts.len(), 1);
            }
            other => panic!("expected if expression, got {:?}", other),
        }
    }

    #[test]
    fn test_function_literal() {
        match single_expr("fn(x, y) { x + y; }").kind {
            ExprKind::Function { params, body } => {
                let names: Vec<_> = params.iter().map(|p| p.node.as_str()).collect();
                assert_eq!(names, ["x", "y"]);
                assert_eq!(body.stmts.len(), 1);
            }
            other => panic!("expected function literal, got {:?}", other),
        }
    }

    #[test]
    fn test_function_params() {
        let cases: [(&str, &[&str]); 3] = [
            ("fn() {};", &[]),
            ("fn(x) {};", &["x"]),
            ("fn(x, y, z) {};", &["x", "y", "z"]),
        ];
        for (source, expected) in cases {
            match single_expr(source).kind {
                ExprKind::Function { params, .. } => {
                    let names: Vec<_> = params.iter().map(|p| p.node.as_str()).collect();
                    assert_eq!(names, expected);
                }
                other => panic!("expected function literal, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_call_expression() {
        match single_expr("add(1, 2 * 3, 4 + 5);").kind {
            ExprKind::Call { callee, args } => {
                assert_eq!(callee.kind, ExprKind::Ident("add".into()));
                assert_eq!(args.len(), 3);
                assert_eq!(args[1].to_string(), "(2 * 3)");
            }
            other => panic!("expected call expression, got {:?}", other),
        }
    }

    #[test]
    fn test_call_with_no_arguments() {
        match single_expr("noop();").kind {
            ExprKind::Call { args, .. } => assert!(args.is_empty()),
            other => panic!("expected call expression, got {:?}", other),
        }
    }

    #[test]
    fn test_array_literal() {
        match single_expr("[1, 2 * 2, 3 + 3]").kind {
            ExprKind::Array(elements) => {
                assert_eq!(elements.len(), 3);
                assert_eq!(elements[0].kind, ExprKind::Integer(1));
                assert_eq!(elements[1].to_string(), "(2 * 2)");
            }
            other => panic!("expected array literal, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_array_literal() {
        match single_expr("[]").kind {
            ExprKind::Array(elements) => assert!(elements.is_empty()),
            other => panic!("expected array literal, got {:?}", other),
        }
    }

    #[test]
    fn test_index_expression() {
        match single_expr("myArray[1 + 1]").kind {
            ExprKind::Index { object, index } => {
                assert_eq!(object.kind, ExprKind::Ident("myArray".into()));
                assert_eq!(index.to_string(), "(1 + 1)");
            }
            other => panic!("expected index expression, got {:?}", other),
        }
    }

    #[test]
    fn test_print_reparse_round_trip() {
        let sources = [
            "let x = 1 + 2 * 3;",
            "return fn(x) { x + 1 };",
            "if (a < b) { a } else { b }",
            "add(1, [2, 3][0], fn() { 4 })",
            "let f = fn(a, b) { if (a > b) { return a; } b };",
        ];
        for source in sources {
            let printed = parse_ok(source).to_string();
            let reparsed = parse_ok(&printed).to_string();
            assert_eq!(printed, reparsed, "source: {}", source);
        }
    }

    #[test]
    fn test_let_missing_identifier() {
        let errors = parse_errors("let = 5;");
        assert!(!errors.is_empty());
        assert_eq!(
            errors[0],
            "expected next token to be identifier, got = instead"
        );
    }

    #[test]
    fn test_let_missing_assign() {
        let errors = parse_errors("let x 5;");
        assert_eq!(errors[0], "expected next token to be =, got integer `5` instead");
    }

    #[test]
    fn test_no_prefix_parse_error() {
        let errors = parse_errors("+ 5;");
        assert_eq!(errors[0], "no prefix parse function for +");
    }

    #[test]
    fn test_illegal_token_is_reported() {
        let errors = parse_errors("let x = @;");
        assert_eq!(errors[0], "no prefix parse function for illegal character `@`");
    }

    #[test]
    fn test_integer_out_of_range() {
        let errors = parse_errors("99999999999999999999;");
        assert_eq!(
            errors[0],
            "could not parse 99999999999999999999 as integer"
        );
    }

    #[test]
    fn test_errors_accumulate_across_statements() {
        let (program, errors) = parse("let x 5; let y = 10; let 8;");
        assert_eq!(errors.len(), 2);
        // the well-formed middle statement still parses
        assert!(program
            .stmts
            .iter()
            .any(|s| matches!(&s.kind, StmtKind::Let { name, .. } if name.node == "y")));
    }

    #[test]
    fn test_unterminated_block() {
        let errors = parse_errors("if (x) { y");
        assert!(!errors.is_empty());
    }
}
