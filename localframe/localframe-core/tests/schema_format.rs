use localframe_core::{DataType, Schema, StructField, format_schema};

#[test]
fn nested_struct_keeps_type_line_and_indentation() -> Result<(), std::fmt::Error> {
    let fields = vec![StructField::new(
        "root",
        DataType::Struct(
            vec![
                StructField::new("a", DataType::Double, true),
                StructField::new(
                    "b",
                    DataType::Struct(vec![StructField::new("c", DataType::String, false)].into()),
                    true,
                ),
            ]
            .into(),
        ),
        true,
    )];

    let text = format_schema(&fields)?;
    let expected = "\
root:
    type: struct
    nullable: true
    fields:
        a: { type: double, nullable: true }
        b:
            type: struct
            nullable: true
            fields:
                c: { type: string, nullable: false }
";
    assert_eq!(text, expected);
    Ok(())
}

#[test]
fn array_and_map_render_their_parts() -> Result<(), std::fmt::Error> {
    let fields = vec![
        StructField::new("tags", DataType::array(DataType::String), true),
        StructField::new(
            "attrs",
            DataType::map(DataType::String, DataType::decimal(10, 2).unwrap()),
            false,
        ),
    ];

    let text = format_schema(&fields)?;
    let expected = "\
tags:
    type: array
    nullable: true
    element: { type: string }
attrs:
    type: map
    nullable: false
    key: { type: string }
    value: { type: decimal(10, 2) }
";
    assert_eq!(text, expected);
    Ok(())
}

#[test]
fn schema_display_matches_formatter() -> Result<(), std::fmt::Error> {
    let schema: Schema = vec![StructField::new("v", DataType::Long, true)].into();
    assert_eq!(schema.to_string(), format_schema(schema.as_slice())?);
    assert_eq!(schema.to_string(), "v: { type: long, nullable: true }\n");
    Ok(())
}

#[test]
fn duplicate_names_are_reported() {
    let schema = Schema::new(vec![
        StructField::new("a", DataType::Long, true),
        StructField::new("b", DataType::Long, true),
        StructField::new("a", DataType::String, true),
    ]);
    assert_eq!(schema.duplicate_name(), Some("a"));
}
