//! Loris Language Lexer
//!
//! Tokenizes Loris source code. Uses the `logos` crate for efficient lexing.

use logos::Logos;
use smol_str::SmolStr;
use std::fmt;
use std::ops::Range;

/// Source span representing a byte range in the source code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn merge(self, other: Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    pub fn dummy() -> Self {
        Self { start: 0, end: 0 }
    }
}

impl From<Range<usize>> for Span {
    fn from(range: Range<usize>) -> Self {
        Span::new(range.start, range.end)
    }
}

impl From<Span> for Range<usize> {
    fn from(span: Span) -> Self {
        span.start..span.end
    }
}

/// A token with its kind and source location
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }
}

/// All token types in the Loris language
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\r\n]+")]
pub enum TokenKind {
    // ========== Keywords ==========
    #[token("fn")]
    Fn,
    #[token("let")]
    Let,
    #[token("true")]
    True,
    #[token("false")]
    False,
    #[token("if")]
    If,
    #[token("else")]
    Else,
    #[token("return")]
    Return,

    // ========== Operators ==========
    #[token("=")]
    Eq,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("!")]
    Bang,
    #[token("<")]
    Lt,
    #[token(">")]
    Gt,
    #[token("==")]
    EqEq,
    #[token("!=")]
    NotEq,

    // ========== Delimiters ==========
    #[token(",")]
    Comma,
    #[token(";")]
    Semi,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,

    // ========== Literals ==========
    /// Identifier: ASCII letters and underscores, no digits
    #[regex(r"[A-Za-z_]+", |lex| SmolStr::new(lex.slice()))]
    Ident(SmolStr),

    /// Integer literal (decimal digits only)
    #[regex(r"[0-9]+", |lex| SmolStr::new(lex.slice()))]
    Integer(SmolStr),

    /// String literal; the payload excludes the quotes, no escape sequences
    #[regex(r#""[^"]*""#, |lex| {
        let s = lex.slice();
        SmolStr::new(&s[1..s.len() - 1])
    })]
    Str(SmolStr),

    /// Unrecognized input byte
    Illegal(SmolStr),

    /// End of input
    Eof,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Fn => write!(f, "fn"),
            TokenKind::Let => write!(f, "let"),
            TokenKind::True => write!(f, "true"),
            TokenKind::False => write!(f, "false"),
            TokenKind::If => write!(f, "if"),
            TokenKind::Else => write!(f, "else"),
            TokenKind::Return => write!(f, "return"),
            TokenKind::Eq => write!(f, "="),
            TokenKind::Plus => write!(f, "+"),
            TokenKind::Minus => write!(f, "-"),
            TokenKind::Star => write!(f, "*"),
            TokenKind::Slash => write!(f, "/"),
            TokenKind::Bang => write!(f, "!"),
            TokenKind::Lt => write!(f, "<"),
            TokenKind::Gt => write!(f, ">"),
            TokenKind::EqEq => write!(f, "=="),
            TokenKind::NotEq => write!(f, "!="),
            TokenKind::Comma => write!(f, ","),
            TokenKind::Semi => write!(f, ";"),
            TokenKind::LParen => write!(f, "("),
            TokenKind::RParen => write!(f, ")"),
            TokenKind::LBrace => write!(f, "{{"),
            TokenKind::RBrace => write!(f, "}}"),
            TokenKind::LBracket => write!(f, "["),
            TokenKind::RBracket => write!(f, "]"),
            TokenKind::Ident(s) => write!(f, "identifier `{}`", s),
            TokenKind::Integer(s) => write!(f, "integer `{}`", s),
            TokenKind::Str(s) => write!(f, "string \"{}\"", s),
            TokenKind::Illegal(s) => write!(f, "illegal character `{}`", s),
            TokenKind::Eof => write!(f, "end of file"),
        }
    }
}

/// Lexer for Loris source code.
///
/// `next_token` yields tokens until the input is exhausted, after which it
/// keeps returning [`TokenKind::Eof`]. The lexer itself never fails: bytes it
/// does not recognize come out as [`TokenKind::Illegal`] tokens for the
/// parser to reject.
pub struct Lexer<'src> {
    source: &'src str,
    inner: logos::Lexer<'src, TokenKind>,
}

impl<'src> Lexer<'src> {
    /// Create a new lexer for the given source code
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            inner: TokenKind::lexer(source),
        }
    }

    /// Get the source code being lexed
    pub fn source(&self) -> &'src str {
        self.source
    }

    /// Produce the next token
    pub fn next_token(&mut self) -> Token {
        match self.inner.next() {
            Some(Ok(kind)) => Token::new(kind, self.inner.span().into()),
            Some(Err(())) => Token::new(
                TokenKind::Illegal(SmolStr::new(self.inner.slice())),
                self.inner.span().into(),
            ),
            None => Token::new(
                TokenKind::Eof,
                Span::new(self.source.len(), self.source.len()),
            ),
        }
    }

    /// Tokenize the entire source into a vector of tokens, ending with `Eof`
    pub fn tokenize(mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token();
            let done = token.kind == TokenKind::Eof;
            tokens.push(token);
            if done {
                break;
            }
        }
        tokens
    }
}
