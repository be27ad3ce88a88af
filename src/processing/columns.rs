//! Column-name casing.

use std::collections::HashMap;

use crate::types::{DataSet, DataType, Field, Schema, Value};

/// Rename every column to its lowercase form.
///
/// Columns whose lowercase names collide (e.g. `Name` and `NAME`) are merged into one column at
/// the position of the first of them. For each row the first non-null value, in original column
/// order, wins. The merged column's type is the [`DataType::unify`] of the colliding columns that
/// hold any values.
pub fn lowercase_columns(mut dataset: DataSet) -> DataSet {
    let mut groups: Vec<(String, Vec<usize>)> = Vec::new();
    let mut by_name: HashMap<String, usize> = HashMap::new();
    for (idx, field) in dataset.schema.fields.iter().enumerate() {
        let lowered = field.name.to_lowercase();
        match by_name.get(&lowered) {
            Some(&g) => groups[g].1.push(idx),
            None => {
                by_name.insert(lowered.clone(), groups.len());
                groups.push((lowered, vec![idx]));
            }
        }
    }

    if groups.len() == dataset.column_count() {
        for (field, (lowered, _)) in dataset.schema.fields.iter_mut().zip(groups) {
            field.name = lowered;
        }
        return dataset;
    }

    let fields: Vec<Field> = groups
        .iter()
        .map(|(name, members)| Field::new(name.clone(), merged_type(&dataset, members)))
        .collect();

    for (name, members) in groups.iter().filter(|(_, m)| m.len() > 1) {
        let merged: Vec<&str> = members
            .iter()
            .map(|&i| dataset.schema.fields[i].name.as_str())
            .collect();
        tracing::warn!(column = %name, ?merged, "merged columns that collide after lowercasing");
    }

    let rows = dataset
        .rows
        .into_iter()
        .map(|mut row| {
            groups
                .iter()
                .zip(fields.iter())
                .map(|((_, members), field)| {
                    members
                        .iter()
                        .map(|&i| std::mem::replace(&mut row[i], Value::Null))
                        .find(|v| !v.is_null())
                        .and_then(|v| v.cast(field.data_type))
                        .unwrap_or(Value::Null)
                })
                .collect()
        })
        .collect();

    DataSet::new(Schema::new(fields), rows)
}

fn merged_type(dataset: &DataSet, members: &[usize]) -> DataType {
    members
        .iter()
        .filter(|&&i| dataset.rows.iter().any(|row| !row[i].is_null()))
        .map(|&i| dataset.schema.fields[i].data_type)
        .reduce(DataType::unify)
        .unwrap_or(dataset.schema.fields[members[0]].data_type)
}
