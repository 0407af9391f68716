pub mod agg;
pub mod schema;
pub mod type_string;

/// `None` when no names were given on the command line.
fn column_names(names: &[String]) -> Option<Vec<&str>> {
    (!names.is_empty()).then(|| names.iter().map(String::as_str).collect())
}
