use std::sync::Arc;

use arrow::datatypes::{DataType as ArrowType, Field, TimeUnit};
use localframe_arrow::{schema_to_arrow, to_arrow_type};
use localframe_core::{DataType, Schema, StructField};

#[test]
fn primitive_types_map_to_arrow() {
    let cases = [
        (DataType::Null, ArrowType::Null),
        (DataType::Boolean, ArrowType::Boolean),
        (DataType::Byte, ArrowType::Int8),
        (DataType::Short, ArrowType::Int16),
        (DataType::Integer, ArrowType::Int32),
        (DataType::Long, ArrowType::Int64),
        (DataType::Float, ArrowType::Float32),
        (DataType::Double, ArrowType::Float64),
        (DataType::String, ArrowType::Utf8),
        (DataType::Variant, ArrowType::Utf8),
        (DataType::Geography, ArrowType::Utf8),
        (DataType::Binary, ArrowType::Binary),
        (DataType::Date, ArrowType::Date32),
        (DataType::Time, ArrowType::Time64(TimeUnit::Nanosecond)),
        (
            DataType::Timestamp,
            ArrowType::Timestamp(TimeUnit::Microsecond, None),
        ),
    ];
    for (dt, expected) in cases {
        assert_eq!(to_arrow_type(&dt), expected, "{dt}");
    }
    assert_eq!(
        to_arrow_type(&DataType::decimal(10, 2).unwrap()),
        ArrowType::Decimal128(10, 2)
    );
}

#[test]
fn nested_types_keep_field_names_and_nullability() {
    let schema = Schema::new(vec![
        StructField::new("tags", DataType::array(DataType::String), true),
        StructField::new(
            "attrs",
            DataType::map(DataType::String, DataType::Long),
            false,
        ),
        StructField::new(
            "point",
            DataType::Struct(Schema::new(vec![
                StructField::new("x", DataType::Double, false),
                StructField::new("y", DataType::Double, true),
            ])),
            true,
        ),
    ]);
    let arrow = schema_to_arrow(&schema);

    assert_eq!(
        arrow.field(0),
        &Field::new(
            "tags",
            ArrowType::List(Arc::new(Field::new("item", ArrowType::Utf8, true))),
            true
        )
    );

    let ArrowType::Map(entries, sorted) = arrow.field(1).data_type() else {
        panic!("expected map, got {:?}", arrow.field(1).data_type());
    };
    assert!(!sorted);
    assert!(!arrow.field(1).is_nullable());
    let ArrowType::Struct(kv) = entries.data_type() else {
        panic!("expected entries struct");
    };
    assert_eq!(kv[0].as_ref(), &Field::new("key", ArrowType::Utf8, false));
    assert_eq!(kv[1].as_ref(), &Field::new("value", ArrowType::Int64, true));

    let ArrowType::Struct(point) = arrow.field(2).data_type() else {
        panic!("expected struct");
    };
    assert_eq!(point.len(), 2);
    assert!(!point[0].is_nullable());
    assert!(point[1].is_nullable());
}
