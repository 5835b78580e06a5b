//! Property tests for the lexer's core guarantees: lossless round trip,
//! maximal munch, and determinism.

use leolens_syntax::{tokenize, Lexer, TokenKind};
use proptest::prelude::*;

/// Rebuilds the original source from a token stream plus the skipped
/// characters, by merging them back in offset order.
fn reconstruct(source: &str) -> String {
    let (tokens, skipped) = Lexer::new(source).tokenize();
    let mut rebuilt = String::with_capacity(source.len());
    let mut skips = skipped.iter().peekable();
    let mut offset = 0usize;

    for token in &tokens {
        while skips.peek().is_some_and(|s| s.offset == offset) {
            let s = skips.next().unwrap();
            rebuilt.push(s.ch);
            offset += s.ch.len_utf8();
        }
        rebuilt.push_str(&token.text);
        offset += token.text.len();
    }
    for s in skips {
        rebuilt.push(s.ch);
    }
    rebuilt
}

/// A strategy producing plausible Leo source fragments: keywords, names,
/// literals, operators, trivia.
fn fragment() -> impl Strategy<Value = String> {
    let keywords = proptest::sample::select(vec![
        "let",
        "const",
        "transition",
        "function",
        "return",
        "struct",
    ])
    .prop_map(str::to_string);
    let symbols = proptest::sample::select(vec![
        "&&=", "&&", "&=", "&", "**=", "**", "*=", "*", "=>", "==", "=", "->", "::", "..", ";",
        ":", ",", "{", "}", "(", ")", "[", "]",
    ])
    .prop_map(str::to_string);
    let trivia = proptest::sample::select(vec![
        " ",
        "\n",
        "\t",
        "  ",
        "// comment",
        "/* block */",
    ])
    .prop_map(str::to_string);

    prop_oneof![
        keywords,
        "[a-z][a-z0-9_]{0,6}",
        "[0-9]{1,6}(u8|u16|u32|u64|u128|i8|i64|field|group|scalar)?",
        Just("aleo1qsqvxvp8".to_string()),
        Just("\"text\"".to_string()),
        symbols,
        trivia,
    ]
}

fn source() -> impl Strategy<Value = String> {
    proptest::collection::vec(fragment(), 0..40).prop_map(|parts| parts.concat())
}

proptest! {
    /// Concatenating token texts and the reported skips reproduces any
    /// input, including arbitrary garbage.
    #[test]
    fn lossless_round_trip_arbitrary(input in ".*") {
        prop_assert_eq!(reconstruct(&input), input);
    }

    /// On inputs built only from recognized fragments nothing is skipped,
    /// so the token texts alone reproduce the source.
    #[test]
    fn lossless_round_trip_recognized(input in source()) {
        let (tokens, skipped) = Lexer::new(&input).tokenize();
        prop_assert!(skipped.is_empty(), "unexpected skips: {:?}", skipped);
        let rebuilt: String = tokens.iter().map(|t| t.text.as_str()).collect();
        prop_assert_eq!(rebuilt, input);
    }

    /// Tokenizing twice yields identical streams.
    #[test]
    fn deterministic(input in ".*") {
        prop_assert_eq!(tokenize(&input), tokenize(&input));
    }

    /// Every character of input is consumed by exactly one token or
    /// skipped, never duplicated.
    #[test]
    fn consumed_lengths_partition_the_input(input in ".*") {
        let (tokens, skipped) = Lexer::new(&input).tokenize();
        let token_bytes: usize = tokens.iter().map(|t| t.text.len()).sum();
        let skipped_bytes: usize = skipped.iter().map(|s| s.ch.len_utf8()).sum();
        prop_assert_eq!(token_bytes + skipped_bytes, input.len());
    }
}

/// The ordering invariant from the symbol table this lexer replaces: a
/// longer operator is never shadowed by one of its prefixes. Encoded as an
/// explicit table-driven property regardless of implementation choice.
#[test]
fn maximal_munch_over_the_full_symbol_table() {
    let symbols: &[(&str, TokenKind)] = &[
        ("!", TokenKind::Not),
        ("!=", TokenKind::NotEq),
        ("&&", TokenKind::And),
        ("&&=", TokenKind::AndAssign),
        ("||", TokenKind::Or),
        ("||=", TokenKind::OrAssign),
        ("&", TokenKind::BitAnd),
        ("&=", TokenKind::BitAndAssign),
        ("|", TokenKind::BitOr),
        ("|=", TokenKind::BitOrAssign),
        ("^", TokenKind::BitXor),
        ("^=", TokenKind::BitXorAssign),
        ("==", TokenKind::Eq),
        ("=", TokenKind::Assign),
        ("<", TokenKind::Lt),
        ("<=", TokenKind::LtEq),
        (">", TokenKind::Gt),
        (">=", TokenKind::GtEq),
        ("+", TokenKind::Add),
        ("+=", TokenKind::AddAssign),
        ("-", TokenKind::Sub),
        ("-=", TokenKind::SubAssign),
        ("*", TokenKind::Mul),
        ("*=", TokenKind::MulAssign),
        ("/", TokenKind::Div),
        ("/=", TokenKind::DivAssign),
        ("**", TokenKind::Pow),
        ("**=", TokenKind::PowAssign),
        ("%", TokenKind::Rem),
        ("%=", TokenKind::RemAssign),
        ("<<", TokenKind::Shl),
        ("<<=", TokenKind::ShlAssign),
        (">>", TokenKind::Shr),
        (">>=", TokenKind::ShrAssign),
        ("(", TokenKind::LeftParen),
        (")", TokenKind::RightParen),
        ("[", TokenKind::LeftSquare),
        ("]", TokenKind::RightSquare),
        ("{", TokenKind::LeftCurly),
        ("}", TokenKind::RightCurly),
        (",", TokenKind::Comma),
        (".", TokenKind::Dot),
        ("..", TokenKind::DotDot),
        (";", TokenKind::Semicolon),
        (":", TokenKind::Colon),
        ("::", TokenKind::DoubleColon),
        ("?", TokenKind::Question),
        ("->", TokenKind::Arrow),
        ("=>", TokenKind::BigArrow),
        ("_", TokenKind::Underscore),
        ("@", TokenKind::At),
    ];

    for (text, kind) in symbols {
        let tokens = tokenize(text);
        assert_eq!(
            tokens.len(),
            1,
            "{:?} should lex as a single token, got {:?}",
            text,
            tokens
        );
        assert_eq!(tokens[0].kind, *kind, "wrong kind for {:?}", text);
        assert_eq!(tokens[0].text, *text);
    }
}
