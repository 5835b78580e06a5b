//! Lexer for the Leo programming language.
//!
//! Built on the logos DFA, which picks the longest match at every position:
//! maximal munch holds by construction rather than by the ordering of a
//! pattern table (`&&=` is one token, never `&&` followed by `=`).
//!
//! The lexer is total. It never fails on any input; characters that match no
//! rule are skipped one at a time and reported through [`Lexer::tokenize`]
//! so callers (and the round-trip tests) can observe exactly what was
//! dropped. Everything else — whitespace runs, comments, unterminated block
//! comments and strings — becomes a token carrying its exact source text.

use logos::Logos;

use crate::token::{Token, TokenKind};

/// Logos-based token enum for lexing.
///
/// Internal to the lexer; converted to [`TokenKind`] after matching. Trivia
/// is kept, not skipped: the token stream must reproduce the source.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
enum RawToken {
    // Trivia (kept)
    #[regex(r"[ \t\r\n\f]+")]
    Whitespace,

    #[regex(r"//[^\n]*")]
    LineComment,

    #[regex(r"/\*", lex_block_comment)]
    BlockComment,

    // Keywords (must come before identifiers)
    #[token("address")]
    Address,

    #[token("aleo")]
    Aleo,

    #[token("as")]
    As,

    #[token("assert")]
    Assert,

    #[token("assert_eq")]
    AssertEq,

    #[token("assert_neq")]
    AssertNeq,

    #[token("async")]
    Async,

    #[token("block")]
    Block,

    #[token("bool")]
    Bool,

    #[token("const")]
    Const,

    #[token("constant")]
    Constant,

    #[token("else")]
    Else,

    #[token("field")]
    Field,

    #[token("for")]
    For,

    #[token("function")]
    Function,

    #[token("future")]
    Future,

    #[token("group")]
    Group,

    #[token("if")]
    If,

    #[token("import")]
    Import,

    #[token("in")]
    In,

    #[token("inline")]
    Inline,

    #[token("let")]
    Let,

    #[token("mapping")]
    Mapping,

    #[token("network")]
    Network,

    #[token("private")]
    Private,

    #[token("program")]
    Program,

    #[token("public")]
    Public,

    #[token("record")]
    Record,

    #[token("return")]
    Return,

    #[token("scalar")]
    Scalar,

    #[token("self")]
    SelfKw,

    #[token("signature")]
    Signature,

    #[token("struct")]
    Struct,

    #[token("transition")]
    Transition,

    #[token("u8")]
    U8,

    #[token("u16")]
    U16,

    #[token("u32")]
    U32,

    #[token("u64")]
    U64,

    #[token("u128")]
    U128,

    #[token("i8")]
    I8,

    #[token("i16")]
    I16,

    #[token("i32")]
    I32,

    #[token("i64")]
    I64,

    #[token("i128")]
    I128,

    #[token("true")]
    True,

    #[token("false")]
    False,

    // Identifiers (address literals are split off in the convert step)
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", priority = 1)]
    Identifier,

    // Integer literals: digits and underscores, with the numeric-type
    // suffix (if any) carried in the literal text. The suffix is resolved
    // by the inference engine, not here.
    #[regex(r"[0-9][0-9_]*([a-zA-Z][a-zA-Z0-9]*)?")]
    Integer,

    // Strings: no escape handling; unterminated consumes to end of input.
    #[regex(r#""[^"]*"?"#)]
    StaticString,

    // Operators (3-char, 2-char, 1-char — the DFA picks the longest match
    // regardless of declaration order)
    #[token("&&=")]
    AndAssign,

    #[token("||=")]
    OrAssign,

    #[token("**=")]
    PowAssign,

    #[token("<<=")]
    ShlAssign,

    #[token(">>=")]
    ShrAssign,

    #[token("!=")]
    NotEq,

    #[token("&&")]
    And,

    #[token("&=")]
    BitAndAssign,

    #[token("||")]
    Or,

    #[token("|=")]
    BitOrAssign,

    #[token("^=")]
    BitXorAssign,

    #[token("==")]
    Eq,

    #[token("<=")]
    LtEq,

    #[token("<<")]
    Shl,

    #[token(">=")]
    GtEq,

    #[token(">>")]
    Shr,

    #[token("+=")]
    AddAssign,

    #[token("-=")]
    SubAssign,

    #[token("->")]
    Arrow,

    #[token("=>")]
    BigArrow,

    #[token("**")]
    Pow,

    #[token("*=")]
    MulAssign,

    #[token("/=")]
    DivAssign,

    #[token("%=")]
    RemAssign,

    #[token("..")]
    DotDot,

    #[token("::")]
    DoubleColon,

    #[token("!")]
    Not,

    #[token("&")]
    BitAnd,

    #[token("|")]
    BitOr,

    #[token("^")]
    BitXor,

    #[token("=")]
    Assign,

    #[token("<")]
    Lt,

    #[token(">")]
    Gt,

    #[token("+")]
    Add,

    #[token("-")]
    Sub,

    #[token("*")]
    Mul,

    #[token("/")]
    Div,

    #[token("%")]
    Rem,

    #[token("(")]
    LeftParen,

    #[token(")")]
    RightParen,

    #[token("[")]
    LeftSquare,

    #[token("]")]
    RightSquare,

    #[token("{")]
    LeftCurly,

    #[token("}")]
    RightCurly,

    #[token(",")]
    Comma,

    #[token(".")]
    Dot,

    #[token(";")]
    Semicolon,

    #[token(":")]
    Colon,

    #[token("?")]
    Question,

    #[token("_", priority = 3)]
    Underscore,

    #[token("@")]
    At,
}

/// Consumes a block comment body. We have already matched `/*`; bump past
/// the first `*/`, or to end of input when unterminated (no error raised).
fn lex_block_comment(lex: &mut logos::Lexer<RawToken>) {
    let remainder = lex.remainder();

    if let Some(end) = remainder.find("*/") {
        lex.bump(end + 2);
    } else {
        lex.bump(remainder.len());
    }
}

/// A source character the lexer dropped because it matches no rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Skipped {
    /// Byte offset of the character in the source.
    pub offset: usize,
    /// The character itself.
    pub ch: char,
}

/// Main lexer structure.
pub struct Lexer<'a> {
    source: &'a str,
    tokens: Vec<Token>,
    skipped: Vec<Skipped>,
}

impl<'a> Lexer<'a> {
    /// Creates a lexer over the given source text.
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            tokens: Vec::new(),
            skipped: Vec::new(),
        }
    }

    /// Tokenizes the source, returning the token stream and the characters
    /// that were skipped as unrecognized.
    pub fn tokenize(mut self) -> (Vec<Token>, Vec<Skipped>) {
        let mut lexer = RawToken::lexer(self.source);

        while let Some(result) = lexer.next() {
            let span = lexer.span();
            match result {
                Ok(raw) => {
                    let text = &self.source[span];
                    self.tokens.push(Token::new(convert(raw, text), text));
                }
                Err(()) => {
                    // The error span can cover more than one character when
                    // several unrecognized bytes are adjacent.
                    for (i, ch) in self.source[span.clone()].char_indices() {
                        self.skipped.push(Skipped {
                            offset: span.start + i,
                            ch,
                        });
                    }
                }
            }
        }

        (self.tokens, self.skipped)
    }
}

fn convert(raw: RawToken, text: &str) -> TokenKind {
    match raw {
        RawToken::Whitespace => TokenKind::WhiteSpace,
        RawToken::LineComment => TokenKind::CommentLine,
        RawToken::BlockComment => TokenKind::CommentBlock,
        RawToken::Address => TokenKind::Address,
        RawToken::Aleo => TokenKind::Aleo,
        RawToken::As => TokenKind::As,
        RawToken::Assert => TokenKind::Assert,
        RawToken::AssertEq => TokenKind::AssertEq,
        RawToken::AssertNeq => TokenKind::AssertNeq,
        RawToken::Async => TokenKind::Async,
        RawToken::Block => TokenKind::Block,
        RawToken::Bool => TokenKind::Bool,
        RawToken::Const => TokenKind::Const,
        RawToken::Constant => TokenKind::Constant,
        RawToken::Else => TokenKind::Else,
        RawToken::Field => TokenKind::Field,
        RawToken::For => TokenKind::For,
        RawToken::Function => TokenKind::Function,
        RawToken::Future => TokenKind::Future,
        RawToken::Group => TokenKind::Group,
        RawToken::If => TokenKind::If,
        RawToken::Import => TokenKind::Import,
        RawToken::In => TokenKind::In,
        RawToken::Inline => TokenKind::Inline,
        RawToken::Let => TokenKind::Let,
        RawToken::Mapping => TokenKind::Mapping,
        RawToken::Network => TokenKind::Network,
        RawToken::Private => TokenKind::Private,
        RawToken::Program => TokenKind::Program,
        RawToken::Public => TokenKind::Public,
        RawToken::Record => TokenKind::Record,
        RawToken::Return => TokenKind::Return,
        RawToken::Scalar => TokenKind::Scalar,
        RawToken::SelfKw => TokenKind::SelfKw,
        RawToken::Signature => TokenKind::Signature,
        RawToken::Struct => TokenKind::Struct,
        RawToken::Transition => TokenKind::Transition,
        RawToken::U8 => TokenKind::U8,
        RawToken::U16 => TokenKind::U16,
        RawToken::U32 => TokenKind::U32,
        RawToken::U64 => TokenKind::U64,
        RawToken::U128 => TokenKind::U128,
        RawToken::I8 => TokenKind::I8,
        RawToken::I16 => TokenKind::I16,
        RawToken::I32 => TokenKind::I32,
        RawToken::I64 => TokenKind::I64,
        RawToken::I128 => TokenKind::I128,
        RawToken::True => TokenKind::True,
        RawToken::False => TokenKind::False,
        // A non-keyword word starting with the address prefix is an
        // address literal, not an identifier.
        RawToken::Identifier if text.starts_with("aleo1") => TokenKind::AddressLit,
        RawToken::Identifier => TokenKind::Identifier,
        RawToken::Integer => TokenKind::Integer,
        RawToken::StaticString => TokenKind::StaticString,
        RawToken::AndAssign => TokenKind::AndAssign,
        RawToken::OrAssign => TokenKind::OrAssign,
        RawToken::PowAssign => TokenKind::PowAssign,
        RawToken::ShlAssign => TokenKind::ShlAssign,
        RawToken::ShrAssign => TokenKind::ShrAssign,
        RawToken::NotEq => TokenKind::NotEq,
        RawToken::And => TokenKind::And,
        RawToken::BitAndAssign => TokenKind::BitAndAssign,
        RawToken::Or => TokenKind::Or,
        RawToken::BitOrAssign => TokenKind::BitOrAssign,
        RawToken::BitXorAssign => TokenKind::BitXorAssign,
        RawToken::Eq => TokenKind::Eq,
        RawToken::LtEq => TokenKind::LtEq,
        RawToken::Shl => TokenKind::Shl,
        RawToken::GtEq => TokenKind::GtEq,
        RawToken::Shr => TokenKind::Shr,
        RawToken::AddAssign => TokenKind::AddAssign,
        RawToken::SubAssign => TokenKind::SubAssign,
        RawToken::Arrow => TokenKind::Arrow,
        RawToken::BigArrow => TokenKind::BigArrow,
        RawToken::Pow => TokenKind::Pow,
        RawToken::MulAssign => TokenKind::MulAssign,
        RawToken::DivAssign => TokenKind::DivAssign,
        RawToken::RemAssign => TokenKind::RemAssign,
        RawToken::DotDot => TokenKind::DotDot,
        RawToken::DoubleColon => TokenKind::DoubleColon,
        RawToken::Not => TokenKind::Not,
        RawToken::BitAnd => TokenKind::BitAnd,
        RawToken::BitOr => TokenKind::BitOr,
        RawToken::BitXor => TokenKind::BitXor,
        RawToken::Assign => TokenKind::Assign,
        RawToken::Lt => TokenKind::Lt,
        RawToken::Gt => TokenKind::Gt,
        RawToken::Add => TokenKind::Add,
        RawToken::Sub => TokenKind::Sub,
        RawToken::Mul => TokenKind::Mul,
        RawToken::Div => TokenKind::Div,
        RawToken::Rem => TokenKind::Rem,
        RawToken::LeftParen => TokenKind::LeftParen,
        RawToken::RightParen => TokenKind::RightParen,
        RawToken::LeftSquare => TokenKind::LeftSquare,
        RawToken::RightSquare => TokenKind::RightSquare,
        RawToken::LeftCurly => TokenKind::LeftCurly,
        RawToken::RightCurly => TokenKind::RightCurly,
        RawToken::Comma => TokenKind::Comma,
        RawToken::Dot => TokenKind::Dot,
        RawToken::Semicolon => TokenKind::Semicolon,
        RawToken::Colon => TokenKind::Colon,
        RawToken::Question => TokenKind::Question,
        RawToken::Underscore => TokenKind::Underscore,
        RawToken::At => TokenKind::At,
    }
}

/// Tokenizes source text into a lossless token stream.
///
/// Total, deterministic, side-effect-free; unrecognized characters are
/// silently dropped. Use [`Lexer::tokenize`] to observe the drops.
pub fn tokenize(source: &str) -> Vec<Token> {
    Lexer::new(source).tokenize().0
}
