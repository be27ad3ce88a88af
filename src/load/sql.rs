//! SQL text for the replace-table sequence.

use crate::types::{DataType, Schema};

/// Quote an identifier for PostgreSQL, doubling embedded quotes.
pub fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Column type used for a [`DataType`].
pub fn sql_type(data_type: DataType) -> &'static str {
    match data_type {
        DataType::Int64 => "BIGINT",
        DataType::Float64 => "DOUBLE PRECISION",
        DataType::Bool => "BOOLEAN",
        DataType::Utf8 => "TEXT",
        DataType::Date => "DATE",
        DataType::Timestamp => "TIMESTAMP",
    }
}

pub fn drop_table_sql(table: &str) -> String {
    format!("DROP TABLE IF EXISTS {}", quote_ident(table))
}

pub fn create_table_sql(table: &str, schema: &Schema) -> String {
    let columns: Vec<String> = schema
        .fields
        .iter()
        .map(|f| format!("{} {}", quote_ident(&f.name), sql_type(f.data_type)))
        .collect();
    format!("CREATE TABLE {} ({})", quote_ident(table), columns.join(", "))
}

pub fn copy_in_sql(table: &str, schema: &Schema) -> String {
    let columns: Vec<String> = schema.field_names().map(quote_ident).collect();
    format!(
        "COPY {} ({}) FROM STDIN BINARY",
        quote_ident(table),
        columns.join(", ")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Field;

    fn schema() -> Schema {
        Schema::new(vec![
            Field::new("id", DataType::Int64),
            Field::new("amount_in_usd", DataType::Float64),
            Field::new("date", DataType::Date),
            Field::new("odd \"name\"", DataType::Utf8),
        ])
    }

    #[test]
    fn quote_ident_escapes_quotes() {
        assert_eq!(quote_ident("plain"), "\"plain\"");
        assert_eq!(quote_ident("a\"b"), "\"a\"\"b\"");
    }

    #[test]
    fn drop_and_create_statements() {
        assert_eq!(drop_table_sql("combine"), "DROP TABLE IF EXISTS \"combine\"");
        assert_eq!(
            create_table_sql("combine", &schema()),
            "CREATE TABLE \"combine\" (\"id\" BIGINT, \"amount_in_usd\" DOUBLE PRECISION, \
             \"date\" DATE, \"odd \"\"name\"\"\" TEXT)"
        );
    }

    #[test]
    fn copy_statement_lists_columns_in_order() {
        assert_eq!(
            copy_in_sql("combine", &schema()),
            "COPY \"combine\" (\"id\", \"amount_in_usd\", \"date\", \"odd \"\"name\"\"\") FROM STDIN BINARY"
        );
    }

    #[test]
    fn empty_schema_creates_table_without_columns() {
        assert_eq!(create_table_sql("t", &Schema::default()), "CREATE TABLE \"t\" ()");
    }
}
