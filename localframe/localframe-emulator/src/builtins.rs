//! Built-in aggregate implementations.
//!
//! All of them ignore nulls. Exact numeric inputs (integers and decimals)
//! keep exact results where the warehouse does; any floating input switches
//! the computation to `f64`.

use std::{cmp::Ordering, collections::HashSet};

use localframe_core::Value;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::{
    args::FuncArgs, column::EmulatedColumn, error::EmulationError, key::KeyValue,
    registry::FunctionRegistry,
};

/// Fractional digits kept by `avg`/`mean` on exact inputs.
pub const AVG_SCALE: u32 = 5;
/// Fractional digits kept by `median` on exact inputs.
pub const MEDIAN_SCALE: u32 = 3;

type Output = Result<EmulatedColumn, EmulationError>;

/// Register every built-in implementation, replacing existing entries.
pub fn register_builtins(registry: &mut FunctionRegistry) {
    registry.register("sum", sum);
    registry.register("min", min);
    registry.register("max", max);
    registry.register("count", count);
    registry.register("count_distinct", count_distinct);
    registry.register("avg", avg);
    registry.register("mean", avg);
    registry.register("median", median);
    registry.register("listagg", listagg);
    registry.register("covar_pop", covar_pop);
}

/// Widest numeric kind found in a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum NumericClass {
    Integer,
    Decimal,
    Float,
}

fn numeric_class(function: &str, column: &EmulatedColumn) -> Result<NumericClass, EmulationError> {
    let mut class = NumericClass::Integer;
    for value in column.non_null() {
        let this = match value {
            Value::Byte(_) | Value::Short(_) | Value::Integer(_) | Value::Long(_) => {
                NumericClass::Integer
            }
            Value::Decimal(_) => NumericClass::Decimal,
            Value::Float(_) | Value::Double(_) => NumericClass::Float,
            other => {
                return Err(EmulationError::invalid_argument(
                    function,
                    format!("expected a numeric column, found {}", other.variant_name()),
                ));
            }
        };
        class = class.max(this);
    }
    Ok(class)
}

fn single_column<'a>(
    function: &str,
    columns: &'a [EmulatedColumn],
) -> Result<&'a EmulatedColumn, EmulationError> {
    match columns {
        [column] => Ok(column),
        _ => Err(EmulationError::invalid_argument(
            function,
            format!("expected 1 input column, got {}", columns.len()),
        )),
    }
}

fn no_args(function: &str, args: &FuncArgs) -> Result<(), EmulationError> {
    args.expect_only(function, &[])
}

fn scalar(value: Value) -> Output {
    Ok(EmulatedColumn::broadcast(value)?)
}

fn sum(columns: &[EmulatedColumn], args: &FuncArgs) -> Output {
    no_args("sum", args)?;
    let column = single_column("sum", columns)?;
    if column.non_null().next().is_none() {
        return scalar(Value::Null);
    }
    let total = match numeric_class("sum", column)? {
        NumericClass::Integer => {
            let mut acc = 0i64;
            for value in column.non_null() {
                let v = value.try_i64()?.unwrap_or_default();
                acc = acc.checked_add(v).ok_or_else(|| overflow("sum"))?;
            }
            Value::Long(acc)
        }
        NumericClass::Decimal => Value::Decimal(decimal_sum("sum", column)?),
        NumericClass::Float => Value::Double(
            column
                .non_null()
                .map(|v| v.try_f64().map(Option::unwrap_or_default))
                .sum::<Result<f64, _>>()?,
        ),
    };
    scalar(total)
}

fn decimal_sum(function: &str, column: &EmulatedColumn) -> Result<Decimal, EmulationError> {
    let mut acc = Decimal::ZERO;
    for value in column.non_null() {
        let v = value.try_decimal()?.unwrap_or_default();
        acc = acc.checked_add(v).ok_or_else(|| overflow(function))?;
    }
    Ok(acc)
}

fn overflow(function: &str) -> EmulationError {
    EmulationError::Overflow {
        function: function.to_string(),
    }
}

fn min(columns: &[EmulatedColumn], args: &FuncArgs) -> Output {
    extreme("min", columns, args, Ordering::Less)
}

fn max(columns: &[EmulatedColumn], args: &FuncArgs) -> Output {
    extreme("max", columns, args, Ordering::Greater)
}

fn extreme(function: &str, columns: &[EmulatedColumn], args: &FuncArgs, keep: Ordering) -> Output {
    no_args(function, args)?;
    let column = single_column(function, columns)?;
    let mut best: Option<&Value> = None;
    for value in column.non_null() {
        let replace = match best {
            None => true,
            Some(current) => compare_values(function, value, current)? == keep,
        };
        if replace {
            best = Some(value);
        }
    }
    scalar(best.cloned().unwrap_or(Value::Null))
}

/// Total order within one value kind. Numbers of any width compare by value
/// and NaN sorts above every number.
pub fn compare_values(function: &str, a: &Value, b: &Value) -> Result<Ordering, EmulationError> {
    let ordering = match (a, b) {
        (Value::Boolean(x), Value::Boolean(y)) => x.cmp(y),
        (Value::String(x), Value::String(y)) => x.cmp(y),
        (Value::Binary(x), Value::Binary(y)) => x.cmp(y),
        (Value::Date(x), Value::Date(y)) => x.cmp(y),
        (Value::Time(x), Value::Time(y)) => x.cmp(y),
        (Value::Timestamp(x), Value::Timestamp(y)) => x.cmp(y),
        _ if a.is_numeric() && b.is_numeric() => compare_numbers(a, b)?,
        _ => {
            return Err(EmulationError::invalid_argument(
                function,
                format!(
                    "cannot compare {} with {}",
                    a.variant_name(),
                    b.variant_name()
                ),
            ));
        }
    };
    Ok(ordering)
}

fn compare_numbers(a: &Value, b: &Value) -> Result<Ordering, EmulationError> {
    let is_float = |v: &Value| matches!(v, Value::Float(_) | Value::Double(_));
    if is_float(a) || is_float(b) {
        let x = a.try_f64()?.unwrap_or_default();
        let y = b.try_f64()?.unwrap_or_default();
        return Ok(match (x.is_nan(), y.is_nan()) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Greater,
            (false, true) => Ordering::Less,
            (false, false) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
        });
    }
    if matches!(a, Value::Decimal(_)) || matches!(b, Value::Decimal(_)) {
        let x = a.try_decimal()?.unwrap_or_default();
        let y = b.try_decimal()?.unwrap_or_default();
        return Ok(x.cmp(&y));
    }
    let x = a.try_i64()?.unwrap_or_default();
    let y = b.try_i64()?.unwrap_or_default();
    Ok(x.cmp(&y))
}

fn count(columns: &[EmulatedColumn], args: &FuncArgs) -> Output {
    no_args("count", args)?;
    let n = complete_rows("count", columns)?.count();
    scalar(Value::Long(n as i64))
}

fn count_distinct(columns: &[EmulatedColumn], args: &FuncArgs) -> Output {
    no_args("count_distinct", args)?;
    let distinct: HashSet<Vec<KeyValue>> = complete_rows("count_distinct", columns)?
        .map(|row| row.into_iter().map(KeyValue::from).collect())
        .collect();
    scalar(Value::Long(distinct.len() as i64))
}

/// Row tuples across `columns` in which no value is null.
fn complete_rows<'a>(
    function: &str,
    columns: &'a [EmulatedColumn],
) -> Result<impl Iterator<Item = Vec<&'a Value>> + 'a, EmulationError> {
    let Some(first) = columns.first() else {
        return Err(EmulationError::invalid_argument(
            function,
            "expected at least 1 input column",
        ));
    };
    let len = first.len();
    if columns.iter().any(|c| c.len() != len) {
        return Err(EmulationError::invalid_argument(
            function,
            "input columns differ in length",
        ));
    }
    Ok((0..len).filter_map(move |i| {
        let row: Vec<&Value> = columns.iter().map(|c| &c[i]).collect();
        row.iter().all(|v| !v.is_null()).then_some(row)
    }))
}

fn avg(columns: &[EmulatedColumn], args: &FuncArgs) -> Output {
    no_args("avg", args)?;
    let column = single_column("avg", columns)?;
    let n = column.non_null().count();
    if n == 0 {
        return scalar(Value::Null);
    }
    let mean = match numeric_class("avg", column)? {
        NumericClass::Float => {
            let total: f64 = column
                .non_null()
                .map(|v| v.try_f64().map(Option::unwrap_or_default))
                .sum::<Result<f64, _>>()?;
            Value::Double(total / n as f64)
        }
        NumericClass::Integer | NumericClass::Decimal => {
            let total = decimal_sum("avg", column)?;
            let mean = total
                .checked_div(Decimal::from(n))
                .ok_or_else(|| overflow("avg"))?;
            Value::Decimal(round(mean, AVG_SCALE))
        }
    };
    scalar(mean)
}

fn median(columns: &[EmulatedColumn], args: &FuncArgs) -> Output {
    no_args("median", args)?;
    let column = single_column("median", columns)?;
    let n = column.non_null().count();
    if n == 0 {
        return scalar(Value::Null);
    }
    let mid = n / 2;
    let result = match numeric_class("median", column)? {
        NumericClass::Float => {
            let mut values = column
                .non_null()
                .map(|v| v.try_f64().map(Option::unwrap_or_default))
                .collect::<Result<Vec<f64>, _>>()?;
            values.sort_by(f64::total_cmp);
            let m = if n % 2 == 1 {
                values[mid]
            } else {
                (values[mid - 1] + values[mid]) / 2.0
            };
            Value::Double(m)
        }
        NumericClass::Integer | NumericClass::Decimal => {
            let mut values = column
                .non_null()
                .map(|v| v.try_decimal().map(Option::unwrap_or_default))
                .collect::<Result<Vec<Decimal>, _>>()?;
            values.sort();
            let m = if n % 2 == 1 {
                values[mid]
            } else {
                values[mid - 1]
                    .checked_add(values[mid])
                    .and_then(|s| s.checked_div(Decimal::TWO))
                    .ok_or_else(|| overflow("median"))?
            };
            Value::Decimal(round(m, MEDIAN_SCALE))
        }
    };
    scalar(result)
}

fn round(value: Decimal, scale: u32) -> Decimal {
    value.round_dp_with_strategy(scale, RoundingStrategy::MidpointAwayFromZero)
}

fn listagg(columns: &[EmulatedColumn], args: &FuncArgs) -> Output {
    args.expect_only("listagg", &["delimiter", "is_distinct"])?;
    let column = single_column("listagg", columns)?;
    let delimiter = match args.get(0, "delimiter") {
        Some(v) => v.try_str()?.unwrap_or_default(),
        None => "",
    };
    let is_distinct = match args.get(1, "is_distinct") {
        Some(v) => v.try_bool()?.unwrap_or_default(),
        None => false,
    };

    let mut seen = HashSet::new();
    let parts: Vec<String> = column
        .non_null()
        .filter(|v| !is_distinct || seen.insert(KeyValue::from(*v)))
        .map(ToString::to_string)
        .collect();
    scalar(Value::string(parts.join(delimiter)))
}

fn covar_pop(columns: &[EmulatedColumn], args: &FuncArgs) -> Output {
    no_args("covar_pop", args)?;
    let [x, y] = columns else {
        return Err(EmulationError::invalid_argument(
            "covar_pop",
            format!("expected 2 input columns, got {}", columns.len()),
        ));
    };
    let mut pairs = Vec::new();
    for (a, b) in x.iter().zip(y.iter()) {
        if let (Some(a), Some(b)) = (a.try_f64()?, b.try_f64()?) {
            if !a.is_nan() && !b.is_nan() {
                pairs.push((a, b));
            }
        }
    }
    if pairs.is_empty() {
        return scalar(Value::Null);
    }
    let n = pairs.len() as f64;
    let mean_x = pairs.iter().map(|(a, _)| a).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|(_, b)| b).sum::<f64>() / n;
    let covariance = pairs
        .iter()
        .map(|(a, b)| (a - mean_x) * (b - mean_y))
        .sum::<f64>()
        / n;
    scalar(Value::Double(covariance))
}
