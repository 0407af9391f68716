use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

use localframe_core::{DataType, Schema, StructField, Value};
use localframe_emulator::{
    AggregateSpec, EmulatedColumn, EmulationError, EmulatorOptions, FuncArgs, FunctionRegistry,
    Table, execute_aggregate,
};

fn mnq_table() -> Table {
    let schema = Schema::new(vec![
        StructField::new("m", DataType::String, true),
        StructField::new("n", DataType::String, true),
        StructField::new("q", DataType::Double, true),
    ]);
    let rows = [
        ("a", "ddd", 11.0),
        ("a", "ddd", 22.0),
        ("b", "ccc", 9.0),
        ("b", "ccc", 9.0),
        ("b", "aaa", 35.0),
        ("b", "aaa", 99.0),
    ]
    .into_iter()
    .map(|(m, n, q)| vec![Value::from(m), Value::from(n), Value::Double(q)])
    .collect();
    Table::new(schema, rows).unwrap()
}

fn sequential() -> EmulatorOptions {
    EmulatorOptions::default()
}

#[test]
fn grouped_sum_keeps_first_occurrence_order() {
    let registry = FunctionRegistry::with_builtins();
    let out = execute_aggregate(
        &mnq_table(),
        &["m"],
        &[AggregateSpec::new("sum", ["q"])],
        &registry,
        sequential(),
    )
    .unwrap();

    assert_eq!(
        out.rows(),
        &[
            vec![Value::from("a"), Value::Double(33.0)],
            vec![Value::from("b"), Value::Double(152.0)],
        ]
    );
    let names: Vec<&str> = out.schema().names().collect();
    assert_eq!(names, ["m", "SUM(Q)"]);
    assert_eq!(out.schema()[1].data_type, DataType::Double);
}

#[test]
fn grouped_min_and_multi_key_mean() {
    let registry = FunctionRegistry::with_builtins();
    let table = mnq_table();

    let by_n = execute_aggregate(
        &table,
        &["n"],
        &[AggregateSpec::new("min", ["q"]).with_alias("lowest")],
        &registry,
        sequential(),
    )
    .unwrap();
    assert_eq!(
        by_n.rows(),
        &[
            vec![Value::from("ddd"), Value::Double(11.0)],
            vec![Value::from("ccc"), Value::Double(9.0)],
            vec![Value::from("aaa"), Value::Double(35.0)],
        ]
    );
    assert_eq!(by_n.schema()[1].name, "lowest");

    let by_mn = execute_aggregate(
        &table,
        &["m", "n"],
        &[AggregateSpec::new("mean", ["q"])],
        &registry,
        sequential(),
    )
    .unwrap();
    assert_eq!(
        by_mn.rows(),
        &[
            vec![Value::from("a"), Value::from("ddd"), Value::Double(16.5)],
            vec![Value::from("b"), Value::from("ccc"), Value::Double(9.0)],
            vec![Value::from("b"), Value::from("aaa"), Value::Double(67.0)],
        ]
    );
}

#[test]
fn no_keys_yields_a_single_row() {
    let registry = FunctionRegistry::with_builtins();
    let out = execute_aggregate(
        &mnq_table(),
        &[],
        &[
            AggregateSpec::new("sum", ["q"]),
            AggregateSpec::new("count", ["m"]),
        ],
        &registry,
        sequential(),
    )
    .unwrap();
    assert_eq!(out.rows(), &[vec![Value::Double(185.0), Value::Long(6)]]);
}

#[test]
fn stubbed_aggregate_fails_before_any_partition_runs() {
    let mut registry = FunctionRegistry::with_builtins();
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    registry.register("sum", move |columns, args| {
        counter.fetch_add(1, Ordering::SeqCst);
        FunctionRegistry::with_builtins().call("sum", columns, args)
    });

    let err = execute_aggregate(
        &mnq_table(),
        &["n", "m"],
        &[
            AggregateSpec::new("sum", ["q"]),
            AggregateSpec::new("approx_percentile_combine", ["q"]),
        ],
        &registry,
        sequential(),
    )
    .unwrap_err();
    assert!(matches!(
        &err,
        EmulationError::AggregateNotImplemented { name } if name == "approx_percentile_combine"
    ));
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[test]
fn registered_combine_runs_once_per_group() {
    let mut registry = FunctionRegistry::with_builtins();
    registry.register("approx_percentile_combine", |state, _| {
        let first = state[0].get(0).and_then(|v| v.try_f64().ok().flatten());
        let value = match first {
            Some(v) if v == 11.0 => -1.0,
            Some(v) if v == 9.0 => 0.0,
            Some(v) if v == 35.0 => 1.0,
            _ => return Err(EmulationError::callback("approx_percentile_combine", "unexpected")),
        };
        Ok(EmulatedColumn::broadcast(value)?)
    });

    for parallel in [false, true] {
        let out = execute_aggregate(
            &mnq_table(),
            &["n"],
            &[AggregateSpec::new("approx_percentile_combine", ["q"])],
            &registry,
            EmulatorOptions::default().with_parallel(parallel),
        )
        .unwrap();
        assert_eq!(
            out.rows(),
            &[
                vec![Value::from("ddd"), Value::Double(-1.0)],
                vec![Value::from("ccc"), Value::Double(0.0)],
                vec![Value::from("aaa"), Value::Double(1.0)],
            ],
            "parallel = {parallel}"
        );
    }
}

#[test]
fn failing_partition_aborts_without_partial_output() {
    let mut registry = FunctionRegistry::new();
    registry.register("grouping", |columns, _| {
        if columns[0].iter().any(|v| v == &Value::from("aaa")) {
            return Err(EmulationError::callback("grouping", "bad group"));
        }
        Ok(EmulatedColumn::broadcast(1i64)?)
    });

    for parallel in [false, true] {
        let err = execute_aggregate(
            &mnq_table(),
            &["n"],
            &[AggregateSpec::new("grouping", ["n"])],
            &registry,
            EmulatorOptions { parallel },
        )
        .unwrap_err();
        assert!(matches!(err, EmulationError::Callback { .. }));
    }
}

#[test]
fn multi_value_results_are_rejected_and_empty_results_become_null() {
    let mut registry = FunctionRegistry::new();
    registry.register("array_agg", |columns, _| Ok(columns[0].clone()));
    registry.register("stddev", |_, _| {
        Ok(EmulatedColumn::new("", DataType::Double, Vec::new()))
    });
    let table = mnq_table();

    let err = execute_aggregate(
        &table,
        &["m"],
        &[AggregateSpec::new("array_agg", ["q"])],
        &registry,
        sequential(),
    )
    .unwrap_err();
    assert!(matches!(err, EmulationError::NonScalarResult { len: 2, .. }));

    let out = execute_aggregate(
        &table,
        &["m"],
        &[AggregateSpec::new("stddev", ["q"])],
        &registry,
        sequential(),
    )
    .unwrap();
    assert_eq!(out.rows()[0][1], Value::Null);
    assert_eq!(out.schema()[1].data_type, DataType::Null);
}

#[test]
fn unknown_columns_are_reported() {
    let registry = FunctionRegistry::with_builtins();
    let table = mnq_table();
    for (keys, input) in [(&["zzz"][..], "q"), (&["m"][..], "zzz")] {
        let err = execute_aggregate(
            &table,
            keys,
            &[AggregateSpec::new("sum", [input])],
            &registry,
            sequential(),
        )
        .unwrap_err();
        assert!(matches!(&err, EmulationError::UnknownColumn { name } if name == "zzz"));
    }
}

#[test]
fn null_keys_group_together() {
    let schema = Schema::new(vec![
        StructField::new("k", DataType::Long, true),
        StructField::new("v", DataType::Long, true),
    ]);
    let rows = vec![
        vec![Value::Null, Value::Long(1)],
        vec![Value::Long(1), Value::Long(2)],
        vec![Value::Null, Value::Long(3)],
    ];
    let table = Table::new(schema, rows).unwrap();
    let partitioned = table.partition_by(&["k"]).unwrap();
    assert_eq!(partitioned.num_partitions(), 2);

    let out = partitioned
        .aggregate(
            &[AggregateSpec::new("sum", ["v"])],
            &FunctionRegistry::with_builtins(),
            sequential(),
        )
        .unwrap()
        .into_table()
        .unwrap();
    assert_eq!(
        out.rows(),
        &[
            vec![Value::Null, Value::Long(4)],
            vec![Value::Long(1), Value::Long(2)],
        ]
    );
}

#[test]
fn extra_arguments_reach_the_implementation() {
    let table = mnq_table();
    let out = execute_aggregate(
        &table,
        &["m"],
        &[AggregateSpec::new("listagg", ["n"]).with_args(
            FuncArgs::new()
                .with_named("delimiter", "|")
                .with_named("is_distinct", true),
        )],
        &FunctionRegistry::with_builtins(),
        sequential(),
    )
    .unwrap();
    assert_eq!(
        out.rows(),
        &[
            vec![Value::from("a"), Value::from("ddd")],
            vec![Value::from("b"), Value::from("ccc|aaa")],
        ]
    );
}

#[test]
fn ragged_rows_are_rejected() {
    let schema = Schema::new(vec![StructField::new("k", DataType::Long, true)]);
    let err = Table::new(schema, vec![vec![Value::Long(1)], vec![]]).unwrap_err();
    assert!(matches!(
        err,
        EmulationError::RowWidth {
            row: 1,
            expected: 1,
            actual: 0
        }
    ));
}
