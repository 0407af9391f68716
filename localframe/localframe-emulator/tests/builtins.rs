use localframe_core::Value;
use localframe_emulator::{EmulatedColumn, EmulationError, FuncArgs, FunctionRegistry};
use rust_decimal::Decimal;

fn call(name: &str, columns: &[EmulatedColumn], args: &FuncArgs) -> Value {
    let result = FunctionRegistry::with_builtins()
        .call(name, columns, args)
        .unwrap();
    assert_eq!(result.len(), 1, "{name} must return a single value");
    result[0].clone()
}

fn single_column_v() -> EmulatedColumn {
    let values = [1i64, 8, 6, 3, 100, 400]
        .into_iter()
        .map(Value::Long)
        .chain([Value::Null])
        .collect();
    EmulatedColumn::from_values("v", values).unwrap()
}

fn doubles(values: &[Option<f64>]) -> EmulatedColumn {
    EmulatedColumn::from(
        values
            .iter()
            .map(|v| v.map_or(Value::Null, Value::Double))
            .collect::<Vec<_>>(),
    )
}

#[test]
fn single_column_aggregates_ignore_nulls() {
    let v = [single_column_v()];
    let none = FuncArgs::new();
    assert_eq!(call("sum", &v, &none), Value::Long(518));
    assert_eq!(call("max", &v, &none), Value::Long(400));
    assert_eq!(call("min", &v, &none), Value::Long(1));
    assert_eq!(call("count", &v, &none), Value::Long(6));
    assert_eq!(call("median", &v, &none), Value::Decimal(Decimal::from(7)));
    assert_eq!(
        call("avg", &v, &none),
        Value::Decimal(Decimal::new(8_633_333, 5))
    );
    assert_eq!(call("mean", &v, &none), call("avg", &v, &none));
}

#[test]
fn float_inputs_produce_doubles() {
    let m = [doubles(&[Some(15.0), Some(2.0), None, Some(29.0)])];
    let none = FuncArgs::new();
    assert_eq!(call("sum", &m, &none), Value::Double(46.0));
    assert_eq!(call("min", &m, &none), Value::Double(2.0));
    assert_eq!(call("median", &m, &none), Value::Double(15.0));
}

#[test]
fn nan_sorts_above_every_number() {
    let m = [doubles(&[Some(1.0), Some(f64::NAN), Some(f64::INFINITY)])];
    let none = FuncArgs::new();
    assert!(matches!(call("max", &m, &none), Value::Double(v) if v.is_nan()));
    assert_eq!(call("min", &m, &none), Value::Double(1.0));
}

#[test]
fn empty_or_all_null_inputs_yield_null_or_zero_count() {
    let empty = [doubles(&[None, None])];
    let none = FuncArgs::new();
    for name in ["sum", "min", "max", "avg", "median", "covar_pop"] {
        let columns: Vec<EmulatedColumn> = if name == "covar_pop" {
            vec![empty[0].clone(), empty[0].clone()]
        } else {
            empty.to_vec()
        };
        assert_eq!(call(name, &columns, &none), Value::Null, "{name}");
    }
    assert_eq!(call("count", &empty, &none), Value::Long(0));
}

#[test]
fn integer_sum_overflow_is_reported() {
    let column = EmulatedColumn::from(vec![Value::Long(i64::MAX), Value::Long(1)]);
    let err = FunctionRegistry::with_builtins()
        .call("sum", &[column], &FuncArgs::new())
        .unwrap_err();
    assert!(matches!(err, EmulationError::Overflow { .. }));
}

#[test]
fn decimal_inputs_stay_exact() {
    let column = EmulatedColumn::from(vec![
        Value::Decimal(Decimal::new(105, 2)),
        Value::Long(2),
        Value::Decimal(Decimal::new(1, 1)),
    ]);
    let none = FuncArgs::new();
    assert_eq!(
        call("sum", &[column.clone()], &none),
        Value::Decimal(Decimal::new(315, 2))
    );
    assert_eq!(
        call("avg", &[column], &none),
        Value::Decimal(Decimal::new(105, 2))
    );
}

#[test]
fn listagg_uses_delimiter_and_distinct() {
    let v = [EmulatedColumn::from(vec![
        Value::from("k1"),
        Value::from("k1"),
        Value::from("k3"),
        Value::from("k4"),
        Value::Null,
    ])];
    let delimiter = "~!1,.\"";

    let plain = FuncArgs::new().with_named("delimiter", delimiter);
    assert_eq!(
        call("listagg", &v, &plain),
        Value::from("k1~!1,.\"k1~!1,.\"k3~!1,.\"k4")
    );

    let distinct = plain.with_named("is_distinct", true);
    assert_eq!(
        call("listagg", &v, &distinct),
        Value::from("k1~!1,.\"k3~!1,.\"k4")
    );

    let positional = FuncArgs::from_positional([Value::from(delimiter), Value::Boolean(true)]);
    assert_eq!(call("listagg", &v, &positional), call("listagg", &v, &distinct));
}

#[test]
fn covar_pop_skips_null_and_nan_pairs() {
    let m = doubles(&[
        Some(10.0),
        Some(20.0),
        Some(25.0),
        Some(30.0),
        Some(999.0),
        None,
        Some(f64::NAN),
        Some(f64::NAN),
    ]);
    let n = doubles(&[
        Some(11.0),
        Some(22.0),
        Some(0.0),
        Some(35.0),
        None,
        Some(1234.0),
        None,
        Some(1.0),
    ]);
    assert_eq!(
        call("covar_pop", &[m, n], &FuncArgs::new()),
        Value::Double(38.75)
    );
}

#[test]
fn count_distinct_counts_unique_non_null_values() {
    let column = EmulatedColumn::from(vec![
        Value::Integer(1),
        Value::Long(1),
        Value::Null,
        Value::Long(2),
    ]);
    assert_eq!(
        call("count_distinct", &[column], &FuncArgs::new()),
        Value::Long(2)
    );
}

#[test]
fn non_numeric_sum_is_rejected() {
    let column = EmulatedColumn::from(vec![Value::from("x")]);
    let err = FunctionRegistry::with_builtins()
        .call("sum", &[column], &FuncArgs::new())
        .unwrap_err();
    assert!(matches!(err, EmulationError::InvalidArgument { .. }));
}
