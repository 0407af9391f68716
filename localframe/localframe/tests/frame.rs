use localframe::{
    FrameError, Session,
    core::{DataType, StructField, TypeError, Value},
};

fn named(members: &[(&str, Value)]) -> Value {
    Value::Struct(
        members
            .iter()
            .map(|(name, v)| (name.to_string(), v.clone()))
            .collect(),
    )
}

#[test]
fn row_schemas_are_merged_and_rows_laid_out_by_name() {
    let session = Session::new();
    let rows = vec![
        named(&[("a", Value::Long(1)), ("b", Value::Null)]),
        named(&[("b", Value::from("x")), ("c", Value::Boolean(true))]),
    ];
    let frame = session.create_frame(rows, None).unwrap();

    assert_eq!(
        frame.schema().as_slice(),
        &[
            StructField::new("a", DataType::Long, true),
            StructField::new("b", DataType::String, true),
            StructField::new("c", DataType::Boolean, true),
        ]
    );
    assert_eq!(
        frame.collect(),
        vec![
            vec![Value::Long(1), Value::Null, Value::Null],
            vec![Value::Null, Value::from("x"), Value::Boolean(true)],
        ]
    );
}

#[test]
fn positional_rows_use_given_names_then_defaults() {
    let session = Session::new();
    let rows = vec![
        Value::from(vec![Value::Long(1), Value::from("a"), Value::Double(0.5)]),
        Value::from(vec![Value::Long(2)]),
    ];
    let frame = session.create_frame(rows, Some(&["id"])).unwrap();
    assert_eq!(frame.columns(), ["id", "_2", "_3"]);
    assert_eq!(
        frame.collect()[1],
        vec![Value::Long(2), Value::Null, Value::Null]
    );
}

#[test]
fn map_rows_take_names_from_keys() {
    let session = Session::new();
    let rows = vec![Value::Map(vec![
        (Value::from("k"), Value::Long(1)),
        (Value::from("v"), Value::from("x")),
    ])];
    let frame = session.create_frame(rows, None).unwrap();
    assert_eq!(frame.columns(), ["k", "v"]);
}

#[test]
fn conflicting_row_types_fail_with_field_path() {
    let session = Session::new();
    let rows = vec![
        Value::from(vec![Value::Long(1)]),
        Value::from(vec![Value::from("x")]),
    ];
    let err = session.create_frame(rows, Some(&["v"])).unwrap_err();
    match err {
        FrameError::Type(TypeError::TypeMerge { path, .. }) => {
            assert_eq!(path.as_deref(), Some("field v"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn empty_input_keeps_named_null_columns() {
    let session = Session::new();
    let frame = session.create_frame(Vec::new(), Some(&["a", "b"])).unwrap();
    assert_eq!(frame.num_rows(), 0);
    assert_eq!(
        frame.schema().as_slice(),
        &[
            StructField::new("a", DataType::Null, true),
            StructField::new("b", DataType::Null, true),
        ]
    );
}

#[test]
fn duplicate_names_are_rejected() {
    let session = Session::new();
    let rows = vec![Value::from(vec![Value::Long(1), Value::Long(2)])];
    let err = session.create_frame(rows, Some(&["a", "a"])).unwrap_err();
    assert!(matches!(err, FrameError::DuplicateColumn { name } if name == "a"));
}

#[cfg(feature = "arrow")]
#[test]
fn frame_exports_to_record_batch() {
    use localframe::arrow::arrow::{
        array::{Array, Int64Array},
        datatypes::DataType as ArrowType,
    };

    let session = Session::new();
    let rows = vec![
        Value::from(vec![Value::Long(1), Value::from("x")]),
        Value::from(vec![Value::Null, Value::from("y")]),
    ];
    let frame = session.create_frame(rows, Some(&["id", "name"])).unwrap();
    let batch = frame.to_record_batch().unwrap();

    assert_eq!(batch.num_rows(), 2);
    assert_eq!(batch.schema().field(0).data_type(), &ArrowType::Int64);
    assert_eq!(batch.schema().field(1).data_type(), &ArrowType::Utf8);
    let ids = batch.column(0).as_any().downcast_ref::<Int64Array>().unwrap();
    assert_eq!(ids.value(0), 1);
    assert!(ids.is_null(1));
}

#[cfg(feature = "arrow")]
#[test]
fn large_decimal_averages_export_to_record_batch() {
    use localframe::{
        AggregateSpec,
        arrow::arrow::{
            array::{Array, Decimal128Array},
            datatypes::DataType as ArrowType,
        },
    };

    let session = Session::builder().with_builtin_aggregates().build();
    let rows = vec![Value::from(vec![Value::Long(100_000_000_000)])];
    let frame = session.create_frame(rows, Some(&["v"])).unwrap();
    let out = frame.agg(&session, &[AggregateSpec::new("avg", ["v"])]).unwrap();
    let batch = out.to_record_batch().unwrap();

    assert_eq!(batch.schema().field(0).data_type(), &ArrowType::Decimal128(38, 18));
    let avg = batch.column(0).as_any().downcast_ref::<Decimal128Array>().unwrap();
    assert_eq!(avg.value(0), 10i128.pow(29));
}
