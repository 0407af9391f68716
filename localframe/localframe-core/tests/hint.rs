use localframe_core::{DataType, FunctionSignature, StructField, TypeError, hint_to_type};

#[test]
fn primitive_hints_map_to_canonical_types() {
    let cases = [
        ("bool", DataType::Boolean),
        ("i8", DataType::Byte),
        ("i32", DataType::Integer),
        ("i64", DataType::Long),
        ("u8", DataType::Short),
        ("u32", DataType::Long),
        ("f32", DataType::Float),
        ("f64", DataType::Double),
        ("String", DataType::String),
        ("&str", DataType::String),
        ("Vec<u8>", DataType::Binary),
        ("chrono::NaiveDate", DataType::Date),
        ("NaiveDateTime", DataType::Timestamp),
        ("Variant", DataType::Variant),
        ("Geography", DataType::Geography),
    ];
    for (hint, expected) in cases {
        assert_eq!(hint_to_type(hint), Ok((expected, false)), "{hint}");
    }
}

#[test]
fn decimal_hint_uses_inferred_bounds() {
    assert_eq!(
        hint_to_type("rust_decimal::Decimal"),
        Ok((
            DataType::Decimal {
                precision: 38,
                scale: 18
            },
            false
        ))
    );
}

#[test]
fn option_marks_nullable() {
    assert_eq!(hint_to_type("Option<i64>"), Ok((DataType::Long, true)));
    assert_eq!(
        hint_to_type("Option<Vec<String>>"),
        Ok((DataType::array(DataType::String), true))
    );
}

#[test]
fn containers_map_recursively() {
    assert_eq!(
        hint_to_type("Vec< Vec<f64> >"),
        Ok((DataType::array(DataType::array(DataType::Double)), false))
    );
    assert_eq!(
        hint_to_type("std::collections::HashMap<String, Option<i32>>"),
        Ok((DataType::map(DataType::String, DataType::Integer), false))
    );
    assert_eq!(
        hint_to_type("Vec"),
        Ok((DataType::array(DataType::String), false))
    );
}

#[test]
fn unsupported_hints_fail() {
    for hint in ["u64", "Option<>", "HashMap<String>", "Vec<i64", "Foo"] {
        assert!(
            matches!(hint_to_type(hint), Err(TypeError::InvalidTypeHint { .. })),
            "{hint}"
        );
    }
}

#[test]
fn signature_is_built_from_parameter_hints() {
    let sig = FunctionSignature::from_hints(
        [("x", "i64"), ("label", "Option<String>")],
        "Option<f64>",
    )
    .unwrap();
    assert_eq!(
        sig.inputs,
        vec![
            StructField::new("x", DataType::Long, false),
            StructField::new("label", DataType::String, true),
        ]
    );
    assert_eq!(sig.return_type, DataType::Double);
    assert!(sig.return_nullable);
}
