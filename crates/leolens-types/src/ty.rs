//! Core type definitions for Leo analysis.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::ParseTypeError;

/// A Leo type as far as best-effort inference can determine it.
///
/// `Unknown` is a valid, propagatable result meaning "could not be
/// determined" — it is not an error, and callers must handle it as a
/// normal outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Type {
    /// 8-bit unsigned integer.
    U8,
    /// 16-bit unsigned integer.
    U16,
    /// 32-bit unsigned integer.
    U32,
    /// 64-bit unsigned integer.
    U64,
    /// 128-bit unsigned integer.
    U128,
    /// 8-bit signed integer.
    I8,
    /// 16-bit signed integer.
    I16,
    /// 32-bit signed integer.
    I32,
    /// 64-bit signed integer.
    I64,
    /// 128-bit signed integer.
    I128,
    /// Base field element.
    Field,
    /// Group element.
    Group,
    /// Scalar field element.
    Scalar,
    /// Boolean.
    Bool,
    /// Account address.
    Address,
    /// Static string.
    String,
    /// Array literal (the element type is not retained).
    Array,
    /// Struct or record value.
    Struct,
    /// Could not be determined.
    Unknown,
}

/// Recognized integer-literal suffixes, paired with their types.
///
/// The suffixes are disjoint under exact suffix match (`u128` never ends
/// with `u8`), so order only mirrors the width progression.
const INTEGER_SUFFIXES: &[(&str, Type)] = &[
    ("u8", Type::U8),
    ("u16", Type::U16),
    ("u32", Type::U32),
    ("u64", Type::U64),
    ("u128", Type::U128),
    ("i8", Type::I8),
    ("i16", Type::I16),
    ("i32", Type::I32),
    ("i64", Type::I64),
    ("i128", Type::I128),
];

impl Type {
    /// Canonical lowercase name of this type.
    pub fn name(self) -> &'static str {
        match self {
            Type::U8 => "u8",
            Type::U16 => "u16",
            Type::U32 => "u32",
            Type::U64 => "u64",
            Type::U128 => "u128",
            Type::I8 => "i8",
            Type::I16 => "i16",
            Type::I32 => "i32",
            Type::I64 => "i64",
            Type::I128 => "i128",
            Type::Field => "field",
            Type::Group => "group",
            Type::Scalar => "scalar",
            Type::Bool => "bool",
            Type::Address => "address",
            Type::String => "string",
            Type::Array => "array",
            Type::Struct => "struct",
            Type::Unknown => "unknown",
        }
    }

    /// True for the fixed-width integer types.
    pub fn is_integer(self) -> bool {
        matches!(
            self,
            Type::U8
                | Type::U16
                | Type::U32
                | Type::U64
                | Type::U128
                | Type::I8
                | Type::I16
                | Type::I32
                | Type::I64
                | Type::I128
        )
    }

    /// True for the types arithmetic operates on: the fixed-width
    /// integers, `field`, and `scalar`. `group` is not numeric here.
    pub fn is_numeric(self) -> bool {
        self.is_integer() || matches!(self, Type::Field | Type::Scalar)
    }

    /// Classifies an integer literal by its numeric-type suffix.
    ///
    /// Literals with no recognized suffix default to `field`.
    pub fn of_integer_literal(literal: &str) -> Type {
        for (suffix, ty) in INTEGER_SUFFIXES {
            if literal.ends_with(suffix) {
                return *ty;
            }
        }
        Type::Field
    }

    /// All concrete primitive type names, for completion lists.
    pub fn primitive_names() -> &'static [&'static str] {
        &[
            "u8", "u16", "u32", "u64", "u128", "i8", "i16", "i32", "i64", "i128", "field",
            "group", "scalar", "string", "bool", "address",
        ]
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Type {
    type Err = ParseTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let ty = match s {
            "u8" => Type::U8,
            "u16" => Type::U16,
            "u32" => Type::U32,
            "u64" => Type::U64,
            "u128" => Type::U128,
            "i8" => Type::I8,
            "i16" => Type::I16,
            "i32" => Type::I32,
            "i64" => Type::I64,
            "i128" => Type::I128,
            "field" => Type::Field,
            "group" => Type::Group,
            "scalar" => Type::Scalar,
            "bool" => Type::Bool,
            "address" => Type::Address,
            "string" => Type::String,
            "array" => Type::Array,
            "struct" => Type::Struct,
            "unknown" => Type::Unknown,
            _ => return Err(ParseTypeError::new(s)),
        };
        Ok(ty)
    }
}
