//! Tests for expression type inference.

use leolens_infer::{DegradeKind, InferenceEngine};
use leolens_syntax::tokenize;
use leolens_types::{Type, TypeEnv};

fn infer(source: &str, env: &TypeEnv) -> Type {
    let tokens = tokenize(source);
    InferenceEngine::new(env).infer_type(&tokens, 0).ty
}

#[test]
fn integer_suffix_typing() {
    let env = TypeEnv::new();
    assert_eq!(infer("10u8", &env), Type::U8);
    assert_eq!(infer("3u128", &env), Type::U128);
    assert_eq!(infer("7i16", &env), Type::I16);
    // no suffix defaults to field
    assert_eq!(infer("5", &env), Type::Field);
    assert_eq!(infer("1_000_000", &env), Type::Field);
}

#[test]
fn literal_typing() {
    let env = TypeEnv::new();
    assert_eq!(infer("true", &env), Type::Bool);
    assert_eq!(infer("false", &env), Type::Bool);
    assert_eq!(infer("\"hello\"", &env), Type::String);
    assert_eq!(
        infer("aleo1qyqszqgpqyqszqgpqyqszqgpqyqszqgp3hsk80", &env),
        Type::Address
    );
}

#[test]
fn identifier_lookup() {
    let mut env = TypeEnv::new();
    env.update_type("balance", Type::U64);
    assert_eq!(infer("balance", &env), Type::U64);
    assert_eq!(infer("missing", &env), Type::Unknown);
}

#[test]
fn arithmetic_keeps_equal_numeric_types() {
    let env = TypeEnv::new();
    assert_eq!(infer("1u8 + 2u8", &env), Type::U8);
    assert_eq!(infer("3i64 * 4i64", &env), Type::I64);
    assert_eq!(infer("2 ** 8", &env), Type::Field);
    assert_eq!(infer("9u32 % 4u32", &env), Type::U32);
}

#[test]
fn arithmetic_defaults_to_field_on_mismatch() {
    let env = TypeEnv::new();
    assert_eq!(infer("1u8 + 2u16", &env), Type::Field);
    assert_eq!(infer("1u8 - true", &env), Type::Field);
    // group is not numeric, so even group + group degrades
    let mut env = TypeEnv::new();
    env.update_type("g", Type::Group);
    assert_eq!(infer("g + g", &env), Type::Field);
}

#[test]
fn bitwise_requires_equal_integer_types() {
    let env = TypeEnv::new();
    assert_eq!(infer("1u8 & 2u8", &env), Type::U8);
    assert_eq!(infer("1u8 | 2u16", &env), Type::Unknown);
    // field is numeric but not a fixed-width integer
    assert_eq!(infer("1 ^ 2", &env), Type::Unknown);
}

#[test]
fn logical_requires_bool_operands() {
    let mut env = TypeEnv::new();
    env.update_type("flag", Type::Bool);
    assert_eq!(infer("flag && true", &env), Type::Bool);
    assert_eq!(infer("flag || false", &env), Type::Bool);
    assert_eq!(infer("flag && 1u8", &env), Type::Unknown);
}

#[test]
fn comparison_is_always_bool() {
    // regardless of what the operands are bound to, or whether they are
    // bound at all
    let env = TypeEnv::new();
    assert_eq!(infer("a == b", &env), Type::Bool);
    let mut env = TypeEnv::new();
    env.update_type("a", Type::U8);
    env.update_type("b", Type::String);
    assert_eq!(infer("a == b", &env), Type::Bool);
    assert_eq!(infer("a < b", &env), Type::Bool);
    assert_eq!(infer("a >= b", &env), Type::Bool);
    assert_eq!(infer("a != b", &env), Type::Bool);
}

#[test]
fn unknown_propagates_without_crashing() {
    let env = TypeEnv::new();
    // unbound operand under bitwise and logical rules resolves to unknown,
    // never the other operand's type
    assert_eq!(infer("mystery & 1u8", &env), Type::Unknown);
    assert_eq!(infer("mystery && true", &env), Type::Unknown);
    // arithmetic still defaults to field
    assert_eq!(infer("mystery + 1u8", &env), Type::Field);
}

#[test]
fn array_literal_types_as_array() {
    let env = TypeEnv::new();
    assert_eq!(infer("[1u8, 2u8, 3u8]", &env), Type::Array);
    // mixed element types still produce array; the collapse is only
    // visible on the diagnostics channel
    assert_eq!(infer("[1u8, 2u16]", &env), Type::Array);
    assert_eq!(infer("[]", &env), Type::Array);
}

#[test]
fn mixed_array_elements_are_reported() {
    let env = TypeEnv::new();
    let tokens = tokenize("[1u8, 2u16]");
    let mut engine = InferenceEngine::new(&env);
    assert_eq!(engine.infer_type(&tokens, 0).ty, Type::Array);
    assert!(engine
        .diagnostics()
        .iter()
        .any(|d| d.kind == DegradeKind::MixedArrayElements));
}

#[test]
fn parenthesized_expression_unwraps() {
    let env = TypeEnv::new();
    assert_eq!(infer("(5u32)", &env), Type::U32);
    assert_eq!(infer("(1u8 + 2u8)", &env), Type::U8);
    assert_eq!(infer("(1u8) + (2u8)", &env), Type::U8);
}

#[test]
fn function_call_uses_recorded_return_type() {
    let mut env = TypeEnv::new();
    env.update_function_return("total", Type::U64);
    assert_eq!(infer("total(1u8, x, [2])", &env), Type::U64);
    // arguments are skipped, not checked; an unknown callee is unknown
    assert_eq!(infer("helper(1u8)", &env), Type::Unknown);
}

#[test]
fn call_detection_needs_adjacent_paren() {
    let mut env = TypeEnv::new();
    env.update_type("total", Type::Bool);
    env.update_function_return("total", Type::U64);
    // with a space, `total` is a plain identifier reference
    let tokens = tokenize("total (1u8)");
    let inference = InferenceEngine::new(&env).infer_type(&tokens, 0);
    assert_eq!(inference.ty, Type::Bool);
    assert_eq!(inference.end, 0);
}

#[test]
fn matched_text_and_end_index() {
    let mut env = TypeEnv::new();
    env.update_type("a", Type::U8);
    let tokens = tokenize("a + 1u8; let");
    let inference = InferenceEngine::new(&env).infer_type(&tokens, 0);
    assert_eq!(inference.ty, Type::U8);
    assert_eq!(inference.text, "a + 1u8");
    // resumes right before the semicolon
    assert_eq!(tokens[inference.end + 1].text, ";");
}

#[test]
fn leading_trivia_is_transparent() {
    let env = TypeEnv::new();
    let tokens = tokenize("  /* c */ 5u32");
    let inference = InferenceEngine::new(&env).infer_type(&tokens, 0);
    assert_eq!(inference.ty, Type::U32);
    assert_eq!(inference.text, "5u32");
}

#[test]
fn trailing_operator_leaves_left_operand() {
    let env = TypeEnv::new();
    let tokens = tokenize("1u8 +");
    let inference = InferenceEngine::new(&env).infer_type(&tokens, 0);
    assert_eq!(inference.ty, Type::U8);
    assert_eq!(inference.end, 0);
}

#[test]
fn unmodeled_token_is_unknown_and_consumes_one_token() {
    let env = TypeEnv::new();
    let tokens = tokenize("-> x");
    let mut engine = InferenceEngine::new(&env);
    let inference = engine.infer_type(&tokens, 0);
    assert_eq!(inference.ty, Type::Unknown);
    assert_eq!(inference.end, 0);
    assert!(engine
        .diagnostics()
        .iter()
        .any(|d| d.kind == DegradeKind::UnsupportedToken));
}

#[test]
fn out_of_range_start_is_total() {
    let env = TypeEnv::new();
    let tokens = tokenize("1u8");
    let inference = InferenceEngine::new(&env).infer_type(&tokens, 99);
    assert_eq!(inference.ty, Type::Unknown);
    assert_eq!(inference.text, "");
}

#[test]
fn inference_does_not_mutate_the_env() {
    let mut env = TypeEnv::new();
    env.update_type("a", Type::U8);
    let tokens = tokenize("a + unbound_name");
    let first = InferenceEngine::new(&env).infer_type(&tokens, 0);
    let second = InferenceEngine::new(&env).infer_type(&tokens, 0);
    assert_eq!(first, second);
    assert_eq!(env.variable_type("unbound_name"), None);
}
