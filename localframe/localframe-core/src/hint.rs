//! Mapping from native type hints (Rust type names) to canonical types.
//!
//! Hints are supplied as strings by whatever collects a function's declared
//! parameter and return types; this module only maps them.

use nom::{
    IResult,
    branch::alt,
    bytes::complete::tag,
    character::complete::{alpha1, alphanumeric1, char, multispace0},
    combinator::{all_consuming, map, opt, recognize},
    multi::{many0, separated_list1},
    sequence::{delimited, pair, preceded},
};

use crate::{
    error::TypeError,
    schema::{DataType, INFERRED_DECIMAL, StructField},
};

/// Parsed hint: a (possibly generic) type name.
#[derive(Debug, Clone, PartialEq)]
struct TypeExpr {
    name: String,
    args: Vec<TypeExpr>,
}

/// Map a type hint to a canonical type and whether it is nullable.
///
/// `Option<T>` is the only nullable form. Unsigned integers are promoted one
/// size class; `u64` has no canonical equivalent.
pub fn hint_to_type(hint: &str) -> Result<(DataType, bool), TypeError> {
    let (_, expr) = all_consuming(delimited(multispace0, type_expr, multispace0))(hint)
        .map_err(|e| invalid(hint, format!("malformed type hint: {e}")))?;
    resolve(hint, &expr)
}

fn resolve(hint: &str, expr: &TypeExpr) -> Result<(DataType, bool), TypeError> {
    let arg = |i: usize| -> Result<DataType, TypeError> {
        match expr.args.get(i) {
            Some(a) => Ok(resolve(hint, a)?.0),
            None => Ok(DataType::String),
        }
    };

    let data_type = match (expr.name.as_str(), expr.args.len()) {
        ("Option", 1) => return Ok((arg(0)?, true)),
        ("Vec", 1) if is_byte(&expr.args[0]) => DataType::Binary,
        ("Vec" | "VecDeque", 0 | 1) => DataType::array(arg(0)?),
        ("HashMap" | "BTreeMap" | "IndexMap", 0 | 2) => DataType::map(arg(0)?, arg(1)?),
        ("Box" | "Arc", 1) => return resolve(hint, &expr.args[0]),
        (name, 0) => primitive(name).ok_or_else(|| invalid(hint, format!("unknown type {name}")))?,
        (name, n) => {
            return Err(invalid(
                hint,
                format!("unexpected {n} type argument(s) for {name}"),
            ));
        }
    };
    Ok((data_type, false))
}

fn primitive(name: &str) -> Option<DataType> {
    Some(match name {
        "bool" => DataType::Boolean,
        "i8" => DataType::Byte,
        "i16" | "u8" => DataType::Short,
        "i32" | "u16" => DataType::Integer,
        "i64" | "u32" => DataType::Long,
        "f32" => DataType::Float,
        "f64" => DataType::Double,
        "String" | "str" | "char" => DataType::String,
        "Bytes" | "bytes" => DataType::Binary,
        "Decimal" => DataType::Decimal {
            precision: INFERRED_DECIMAL.0,
            scale: INFERRED_DECIMAL.1,
        },
        "NaiveDate" => DataType::Date,
        "NaiveTime" => DataType::Time,
        "NaiveDateTime" => DataType::Timestamp,
        "Variant" => DataType::Variant,
        "Geography" => DataType::Geography,
        _ => return None,
    })
}

fn is_byte(expr: &TypeExpr) -> bool {
    expr.name == "u8" && expr.args.is_empty()
}

fn invalid(hint: &str, detail: String) -> TypeError {
    TypeError::InvalidTypeHint {
        hint: hint.to_string(),
        detail,
    }
}

fn identifier(input: &str) -> IResult<&str, &str> {
    recognize(pair(
        alt((alpha1, tag("_"))),
        many0(alt((alphanumeric1, tag("_")))),
    ))(input)
}

/// `std::collections::HashMap` resolves by its last segment.
fn type_path(input: &str) -> IResult<&str, &str> {
    map(separated_list1(tag("::"), identifier), |segments: Vec<&str>| {
        segments.last().copied().unwrap_or_default()
    })(input)
}

fn type_args(input: &str) -> IResult<&str, Vec<TypeExpr>> {
    delimited(
        pair(multispace0, char('<')),
        separated_list1(char(','), delimited(multispace0, type_expr, multispace0)),
        char('>'),
    )(input)
}

fn type_expr(input: &str) -> IResult<&str, TypeExpr> {
    alt((
        map(preceded(pair(char('&'), multispace0), type_path), |name| TypeExpr {
            name: name.to_string(),
            args: Vec::new(),
        }),
        map(pair(type_path, opt(type_args)), |(name, args)| TypeExpr {
            name: name.to_string(),
            args: args.unwrap_or_default(),
        }),
    ))(input)
}

/// Canonical signature of a function assembled from its type hints.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionSignature {
    pub inputs: Vec<StructField>,
    pub return_type: DataType,
    pub return_nullable: bool,
}

impl FunctionSignature {
    /// Build a signature from `(parameter_name, hint)` pairs, in parameter
    /// order, and the return type hint.
    pub fn from_hints<'a>(
        params: impl IntoIterator<Item = (&'a str, &'a str)>,
        return_hint: &str,
    ) -> Result<Self, TypeError> {
        let inputs = params
            .into_iter()
            .map(|(name, hint)| {
                let (data_type, nullable) = hint_to_type(hint)?;
                Ok(StructField::new(name, data_type, nullable))
            })
            .collect::<Result<Vec<_>, TypeError>>()?;
        let (return_type, return_nullable) = hint_to_type(return_hint)?;
        Ok(Self {
            inputs,
            return_type,
            return_nullable,
        })
    }
}
