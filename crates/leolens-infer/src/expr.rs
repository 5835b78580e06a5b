//! Expression scanning over raw token streams.
//!
//! Inference does not parse the full grammar. It only needs to answer
//! "what expression starts here, and where does it end" — so this module
//! builds a minimal expression tree (literals, identifiers, calls, arrays,
//! groupings, one binary combination per level) directly from the tokens,
//! reporting the last consumed token index. Typing happens separately in
//! [`crate::engine`], which keeps both halves independently testable.
//!
//! Trivia tokens (whitespace, comments) are transparent everywhere except
//! call detection, where `(` must immediately follow the callee.

use leolens_syntax::{next_code, Token, TokenKind};

/// A recognized binary operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    /// `+`
    Add,
    /// `-`
    Sub,
    /// `*`
    Mul,
    /// `/`
    Div,
    /// `%`
    Rem,
    /// `**`
    Pow,
    /// `&`
    BitAnd,
    /// `|`
    BitOr,
    /// `^`
    BitXor,
    /// `&&`
    And,
    /// `||`
    Or,
    /// `==`
    Eq,
    /// `!=`
    NotEq,
    /// `<`
    Lt,
    /// `<=`
    LtEq,
    /// `>`
    Gt,
    /// `>=`
    GtEq,
}

/// Result-type classes for binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpClass {
    /// `+ - * / % **` — equal numeric operands keep their type, anything
    /// else defaults to `field`.
    Arithmetic,
    /// `& | ^` — equal fixed-width integer operands keep their type,
    /// anything else is `unknown`.
    Bitwise,
    /// `&& ||` — `bool` only when both operands are `bool`.
    Logical,
    /// `== != < <= > >=` — always `bool`.
    Comparison,
}

impl BinaryOp {
    /// Maps a token to its binary operator, if it is one.
    ///
    /// Shifts and the assignment operators are deliberately absent: they
    /// never combine operand types here, so an expression followed by one
    /// of them simply ends before it.
    pub fn from_token(kind: TokenKind) -> Option<BinaryOp> {
        let op = match kind {
            TokenKind::Add => BinaryOp::Add,
            TokenKind::Sub => BinaryOp::Sub,
            TokenKind::Mul => BinaryOp::Mul,
            TokenKind::Div => BinaryOp::Div,
            TokenKind::Rem => BinaryOp::Rem,
            TokenKind::Pow => BinaryOp::Pow,
            TokenKind::BitAnd => BinaryOp::BitAnd,
            TokenKind::BitOr => BinaryOp::BitOr,
            TokenKind::BitXor => BinaryOp::BitXor,
            TokenKind::And => BinaryOp::And,
            TokenKind::Or => BinaryOp::Or,
            TokenKind::Eq => BinaryOp::Eq,
            TokenKind::NotEq => BinaryOp::NotEq,
            TokenKind::Lt => BinaryOp::Lt,
            TokenKind::LtEq => BinaryOp::LtEq,
            TokenKind::Gt => BinaryOp::Gt,
            TokenKind::GtEq => BinaryOp::GtEq,
            _ => return None,
        };
        Some(op)
    }

    /// The operator's result-type class.
    pub fn class(self) -> OpClass {
        match self {
            BinaryOp::Add
            | BinaryOp::Sub
            | BinaryOp::Mul
            | BinaryOp::Div
            | BinaryOp::Rem
            | BinaryOp::Pow => OpClass::Arithmetic,
            BinaryOp::BitAnd | BinaryOp::BitOr | BinaryOp::BitXor => OpClass::Bitwise,
            BinaryOp::And | BinaryOp::Or => OpClass::Logical,
            BinaryOp::Eq
            | BinaryOp::NotEq
            | BinaryOp::Lt
            | BinaryOp::LtEq
            | BinaryOp::Gt
            | BinaryOp::GtEq => OpClass::Comparison,
        }
    }

    /// The operator's source spelling.
    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Rem => "%",
            BinaryOp::Pow => "**",
            BinaryOp::BitAnd => "&",
            BinaryOp::BitOr => "|",
            BinaryOp::BitXor => "^",
            BinaryOp::And => "&&",
            BinaryOp::Or => "||",
            BinaryOp::Eq => "==",
            BinaryOp::NotEq => "!=",
            BinaryOp::Lt => "<",
            BinaryOp::LtEq => "<=",
            BinaryOp::Gt => ">",
            BinaryOp::GtEq => ">=",
        }
    }
}

/// A scanned expression. `at` fields are token indices, kept so the typing
/// pass can anchor diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    /// Integer literal, suffix and all.
    Integer {
        /// Literal text (digits, underscores, optional suffix).
        text: String,
        /// Token index.
        at: usize,
    },
    /// `true` or `false`.
    Bool {
        /// Token index.
        at: usize,
    },
    /// String literal.
    Str {
        /// Token index.
        at: usize,
    },
    /// Address literal (`aleo1…`).
    Address {
        /// Token index.
        at: usize,
    },
    /// Plain identifier reference.
    Ident {
        /// The identifier.
        name: String,
        /// Token index.
        at: usize,
    },
    /// Function call. Arguments are skipped, never typed.
    Call {
        /// The callee identifier.
        callee: String,
        /// Token index of the callee.
        at: usize,
    },
    /// Array literal.
    Array {
        /// Scanned elements, in order.
        elements: Vec<Expr>,
        /// Token index of the opening bracket.
        at: usize,
    },
    /// Parenthesized expression.
    Group {
        /// The inner expression.
        inner: Box<Expr>,
    },
    /// One binary combination.
    Binary {
        /// The operator.
        op: BinaryOp,
        /// Left operand.
        lhs: Box<Expr>,
        /// Right operand.
        rhs: Box<Expr>,
        /// Token index of the operator.
        op_at: usize,
    },
    /// A token the scanner does not model; consumes exactly that token.
    Opaque {
        /// Token index.
        at: usize,
    },
}

/// A scanned expression plus the index of the last token it consumed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedExpr {
    /// The expression tree.
    pub expr: Expr,
    /// Last consumed token index; callers resume at `end + 1`.
    pub end: usize,
}

/// Scans the expression beginning at `start`.
///
/// Total: an out-of-range start, or one pointing at trailing trivia,
/// yields an [`Expr::Opaque`] that consumed nothing past `start`.
pub fn scan_expression(tokens: &[Token], start: usize) -> ScannedExpr {
    match next_code(tokens, start) {
        Some(first) => scan_binary(tokens, first),
        None => ScannedExpr {
            expr: Expr::Opaque { at: start },
            end: start,
        },
    }
}

/// Scans a primary and, if the next code token is a binary operator with a
/// right operand present, one combination. Chains associate to the right.
fn scan_binary(tokens: &[Token], first: usize) -> ScannedExpr {
    let lhs = scan_primary(tokens, first);

    if let Some(op_at) = next_code(tokens, lhs.end + 1) {
        if let Some(op) = BinaryOp::from_token(tokens[op_at].kind) {
            if let Some(rhs_start) = next_code(tokens, op_at + 1) {
                let rhs = scan_binary(tokens, rhs_start);
                return ScannedExpr {
                    expr: Expr::Binary {
                        op,
                        lhs: Box::new(lhs.expr),
                        rhs: Box::new(rhs.expr),
                        op_at,
                    },
                    end: rhs.end,
                };
            }
            // A trailing operator with nothing after it does not combine;
            // the left operand stands and the operator is not consumed.
        }
    }

    lhs
}

fn scan_primary(tokens: &[Token], at: usize) -> ScannedExpr {
    let token = &tokens[at];
    let (expr, end) = match token.kind {
        TokenKind::Integer => (
            Expr::Integer {
                text: token.text.clone(),
                at,
            },
            at,
        ),
        TokenKind::True | TokenKind::False => (Expr::Bool { at }, at),
        TokenKind::StaticString => (Expr::Str { at }, at),
        TokenKind::AddressLit => (Expr::Address { at }, at),
        TokenKind::LeftSquare => return scan_array(tokens, at),
        TokenKind::LeftParen => return scan_group(tokens, at),
        // A call is an identifier with `(` immediately after it — trivia
        // in between makes it a plain identifier reference.
        TokenKind::Identifier if tokens.get(at + 1).map(|t| t.kind) == Some(TokenKind::LeftParen) => {
            return scan_call(tokens, at);
        }
        TokenKind::Identifier => (
            Expr::Ident {
                name: token.text.clone(),
                at,
            },
            at,
        ),
        _ => (Expr::Opaque { at }, at),
    };
    ScannedExpr { expr, end }
}

/// Skips a call's argument list by tracking parenthesis depth. Arguments
/// are not scanned as expressions. An unterminated list consumes to the
/// end of the stream.
fn scan_call(tokens: &[Token], at: usize) -> ScannedExpr {
    let callee = tokens[at].text.clone();
    let mut depth = 0usize;
    let mut index = at + 1;

    while index < tokens.len() {
        match tokens[index].kind {
            TokenKind::LeftParen => depth += 1,
            TokenKind::RightParen => {
                depth -= 1;
                if depth == 0 {
                    return ScannedExpr {
                        expr: Expr::Call { callee, at },
                        end: index,
                    };
                }
            }
            _ => {}
        }
        index += 1;
    }

    ScannedExpr {
        expr: Expr::Call { callee, at },
        end: tokens.len() - 1,
    }
}

/// Scans comma-separated array elements up to the closing bracket, or to
/// the end of the stream when unterminated.
fn scan_array(tokens: &[Token], at: usize) -> ScannedExpr {
    let mut elements = Vec::new();
    let mut index = at + 1;

    loop {
        let Some(code) = next_code(tokens, index) else {
            // unterminated array
            return ScannedExpr {
                expr: Expr::Array { elements, at },
                end: tokens.len() - 1,
            };
        };
        if tokens[code].kind == TokenKind::RightSquare {
            return ScannedExpr {
                expr: Expr::Array { elements, at },
                end: code,
            };
        }

        let element = scan_binary(tokens, code);
        index = element.end + 1;
        elements.push(element.expr);

        // Separators are optional in the sense that a missing comma does
        // not abort the scan; the next round either finds the closing
        // bracket or another element.
        if let Some(sep) = next_code(tokens, index) {
            if tokens[sep].kind == TokenKind::Comma {
                index = sep + 1;
            }
        }
    }
}

/// Scans a parenthesized expression: the inner expression, then forward to
/// the closing parenthesis. An unclosed group ends at its inner
/// expression.
fn scan_group(tokens: &[Token], at: usize) -> ScannedExpr {
    let Some(code) = next_code(tokens, at + 1) else {
        // `(` with nothing after it
        return ScannedExpr {
            expr: Expr::Group {
                inner: Box::new(Expr::Opaque { at: at + 1 }),
            },
            end: tokens.len() - 1,
        };
    };
    if tokens[code].kind == TokenKind::RightParen {
        // `()` — checked before scanning so the inner scan cannot run past
        // the closing parenthesis.
        return ScannedExpr {
            expr: Expr::Group {
                inner: Box::new(Expr::Opaque { at: code }),
            },
            end: code,
        };
    }

    let inner = scan_binary(tokens, code);
    let mut index = inner.end + 1;
    while index < tokens.len() {
        if tokens[index].kind == TokenKind::RightParen {
            return ScannedExpr {
                expr: Expr::Group {
                    inner: Box::new(inner.expr),
                },
                end: index,
            };
        }
        index += 1;
    }

    ScannedExpr {
        expr: Expr::Group {
            inner: Box::new(inner.expr),
        },
        end: inner.end,
    }
}
