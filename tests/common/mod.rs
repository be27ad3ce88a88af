#![allow(dead_code)]

use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use parquet::column::writer::ColumnWriter;
use parquet::data_type::ByteArray;
use parquet::file::properties::WriterProperties;
use parquet::file::writer::SerializedFileWriter;
use parquet::schema::parser::parse_message_type;

fn nanos() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos()
}

pub fn tmp_file(name: &str, ext: &str) -> PathBuf {
    std::env::temp_dir().join(format!("tabular-pg-loader-{name}-{}.{ext}", nanos()))
}

/// Create a fresh, empty directory under the system temp dir.
pub fn tmp_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("tabular-pg-loader-{name}-{}", nanos()));
    fs::create_dir_all(&dir).unwrap();
    dir
}

pub fn write_file(path: &Path, contents: &str) {
    fs::write(path, contents).unwrap();
}

/// Two rows of transactions:
///
/// | id | merchant  | date       | amount_in_usd | flagged |
/// |----|-----------|------------|---------------|---------|
/// | 1  | "Initech" | 2023-01-31 | 10.5          | true    |
/// | 2  | null      | null       | 20.0          | false   |
pub fn write_transactions_parquet(path: &Path) {
    let schema_str = r#"
    message schema {
      REQUIRED INT64 id;
      OPTIONAL BINARY merchant (UTF8);
      OPTIONAL INT32 date (DATE);
      REQUIRED DOUBLE amount_in_usd;
      REQUIRED BOOLEAN flagged;
    }
    "#;

    let schema = Arc::new(parse_message_type(schema_str).unwrap());
    let props = Arc::new(WriterProperties::builder().build());
    let file = File::create(path).unwrap();
    let mut writer = SerializedFileWriter::new(file, schema, props).unwrap();

    let mut rg = writer.next_row_group().unwrap();
    while let Some(mut col) = rg.next_column().unwrap() {
        match col.untyped() {
            ColumnWriter::Int64ColumnWriter(w) => {
                w.write_batch(&[1_i64, 2_i64], None, None).unwrap();
            }
            ColumnWriter::ByteArrayColumnWriter(w) => {
                w.write_batch(&[ByteArray::from("Initech")], Some(&[1, 0]), None)
                    .unwrap();
            }
            ColumnWriter::Int32ColumnWriter(w) => {
                // 2023-01-31 as days since the Unix epoch.
                w.write_batch(&[19_388_i32], Some(&[1, 0]), None).unwrap();
            }
            ColumnWriter::DoubleColumnWriter(w) => {
                w.write_batch(&[10.5_f64, 20.0_f64], None, None).unwrap();
            }
            ColumnWriter::BoolColumnWriter(w) => {
                w.write_batch(&[true, false], None, None).unwrap();
            }
            _ => panic!("unexpected column writer in test"),
        }
        col.close().unwrap();
    }
    rg.close().unwrap();
    writer.close().unwrap();
}
