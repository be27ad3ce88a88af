use criterion::{black_box, criterion_group, criterion_main, Criterion};

use tabular_pg_loader::processing::{normalize, NormalizeOptions};
use tabular_pg_loader::types::{DataSet, DataType, Field, Schema, Value};

fn transactions(n: usize) -> DataSet {
    let schema = Schema::new(vec![
        Field::new("ID", DataType::Int64),
        Field::new("Merchant", DataType::Utf8),
        Field::new("Date", DataType::Utf8),
        Field::new("Amount_In_USD", DataType::Utf8),
    ]);
    let rows = (0..n)
        .map(|i| {
            vec![
                Value::Int64(i as i64),
                Value::Utf8(format!("  Merchant\\x41 {i}\\n ")),
                Value::Utf8(format!("{:02}/{:02}/2023", i % 28 + 1, i % 12 + 1)),
                Value::Utf8(format!("{},{:03}.50", i % 1000, i % 997)),
            ]
        })
        .collect();
    DataSet::new(schema, rows)
}

fn bench_normalize(c: &mut Criterion) {
    let ds = transactions(50_000);
    let opts = NormalizeOptions::default();
    c.bench_function("normalize_50k_rows", |b| {
        b.iter(|| normalize(black_box(ds.clone()), &opts))
    });
}

criterion_group!(benches, bench_normalize);
criterion_main!(benches);
