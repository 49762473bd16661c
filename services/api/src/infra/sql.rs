use sea_orm::Value;

/// Builds a parameterized partial UPDATE statement:
///
/// `UPDATE <table> SET col1=$1, col2=$2, ... WHERE <key_column>=$N RETURNING *`
///
/// plus its positional values (field values in insertion order, key value
/// last). Pure function; execution stays with the caller.
///
/// Column and table names are interpolated verbatim, so they must come
/// from fixed caller-controlled sets, never from request input. The
/// repositories uphold this by only passing whitelisted column names.
///
/// # Panics
///
/// Panics when `fields` is empty. An empty field set is a caller bug
/// (callers own their field sets), not a recoverable user error.
pub fn partial_update(
    table: &str,
    fields: &[(&str, Value)],
    key_column: &str,
    key_value: Value,
) -> (String, Vec<Value>) {
    assert!(
        !fields.is_empty(),
        "partial_update on `{table}` requires at least one field"
    );

    let assignments = fields
        .iter()
        .enumerate()
        .map(|(i, (column, _))| format!("{column}=${}", i + 1))
        .collect::<Vec<_>>()
        .join(", ");

    let query = format!(
        "UPDATE {table} SET {assignments} WHERE {key_column}=${} RETURNING *",
        fields.len() + 1
    );

    let mut values: Vec<Value> = fields.iter().map(|(_, value)| value.clone()).collect();
    values.push(key_value);

    (query, values)
}
