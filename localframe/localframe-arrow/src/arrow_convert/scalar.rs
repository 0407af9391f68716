use std::borrow::Cow;

use chrono::{Datelike, NaiveDate, Timelike};
use localframe_core::{DataType, Value};
use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::ArrowConvertError;

pub(super) enum ScalarValue<'a> {
    Null,
    Boolean(Option<bool>),
    Int8(Option<i8>),
    Int16(Option<i16>),
    Int32(Option<i32>),
    Int64(Option<i64>),
    Float32(Option<f32>),
    Float64(Option<f64>),
    Decimal128(Option<i128>),
    Utf8(Option<Cow<'a, str>>),
    Binary(Option<&'a [u8]>),
    Date32(Option<i32>),
    Time64Nanosecond(Option<i64>),
    TimestampMicrosecond(Option<i64>),
}

/// Scalar Arrow value for `value` under `dt`, or `None` for nested types.
pub(super) fn scalar_value_for_datatype<'a>(
    dt: &DataType,
    value: &'a Value,
) -> Result<Option<ScalarValue<'a>>, ArrowConvertError> {
    Ok(Some(match dt {
        DataType::Null => ScalarValue::Null,
        DataType::Boolean => ScalarValue::Boolean(value.try_bool()?),
        DataType::Byte => ScalarValue::Int8(narrow(dt, value)?),
        DataType::Short => ScalarValue::Int16(narrow(dt, value)?),
        DataType::Integer => ScalarValue::Int32(narrow(dt, value)?),
        DataType::Long => ScalarValue::Int64(value.try_i64()?),
        DataType::Float => ScalarValue::Float32(match value {
            Value::Float(v) => Some(*v),
            other => other.try_f64()?.map(|v| v as f32),
        }),
        DataType::Double => ScalarValue::Float64(value.try_f64()?),
        DataType::Decimal { precision, scale } => ScalarValue::Decimal128(
            value
                .try_decimal()?
                .map(|d| decimal_mantissa(d, *precision, *scale))
                .transpose()?,
        ),
        DataType::String => ScalarValue::Utf8(value.try_str()?.map(Cow::Borrowed)),
        DataType::Variant | DataType::Geography => ScalarValue::Utf8(match value {
            Value::Null => None,
            Value::String(s) => Some(Cow::Borrowed(s.as_ref())),
            other => Some(Cow::Owned(other.to_string())),
        }),
        DataType::Binary => ScalarValue::Binary(value.try_bytes()?),
        DataType::Date => ScalarValue::Date32(match value {
            Value::Date(d) => Some(days_since_epoch(*d)),
            Value::Null => None,
            other => return Err(other.type_mismatch("Date").into()),
        }),
        DataType::Time => ScalarValue::Time64Nanosecond(match value {
            Value::Time(t) => Some(
                i64::from(t.num_seconds_from_midnight()) * 1_000_000_000
                    + i64::from(t.nanosecond()),
            ),
            Value::Null => None,
            other => return Err(other.type_mismatch("Time").into()),
        }),
        DataType::Timestamp => ScalarValue::TimestampMicrosecond(match value {
            Value::Timestamp(ts) => Some(ts.and_utc().timestamp_micros()),
            Value::Null => None,
            other => return Err(other.type_mismatch("Timestamp").into()),
        }),
        DataType::Array(_) | DataType::Map { .. } | DataType::Struct(_) => return Ok(None),
    }))
}

fn narrow<T: TryFrom<i64>>(dt: &DataType, value: &Value) -> Result<Option<T>, ArrowConvertError> {
    value
        .try_i64()?
        .map(|v| {
            T::try_from(v).map_err(|_| ArrowConvertError::OutOfRange {
                data_type: dt.to_string(),
                value: v.to_string(),
            })
        })
        .transpose()
}

/// Unscaled `i128` value of `d` at `scale`, rounded half away from zero when
/// `d` has more fractional digits. Fails when it needs more than `precision` digits.
fn decimal_mantissa(d: Decimal, precision: u8, scale: u8) -> Result<i128, ArrowConvertError> {
    let scale = u32::from(scale);
    let d = if d.scale() > scale {
        d.round_dp_with_strategy(scale, RoundingStrategy::MidpointAwayFromZero)
    } else {
        d
    };
    let out_of_range = || ArrowConvertError::OutOfRange {
        data_type: format!("decimal({precision}, {scale})"),
        value: d.to_string(),
    };
    let mantissa = 10i128
        .checked_pow(scale - d.scale())
        .and_then(|factor| d.mantissa().checked_mul(factor))
        .ok_or_else(out_of_range)?;
    let limit = 10u128.checked_pow(u32::from(precision));
    if limit.is_some_and(|limit| mantissa.unsigned_abs() >= limit) {
        return Err(out_of_range());
    }
    Ok(mantissa)
}

/// Days from 0001-01-01 to 1970-01-01.
const UNIX_EPOCH_DAYS_FROM_CE: i32 = 719_163;

fn days_since_epoch(date: NaiveDate) -> i32 {
    date.num_days_from_ce() - UNIX_EPOCH_DAYS_FROM_CE
}
