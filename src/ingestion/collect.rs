//! Directory collector: reads every CSV/Parquet file in a directory and concatenates them.

use std::path::Path;

use walkdir::WalkDir;

use crate::error::{IngestionError, IngestionResult};
use crate::types::DataSet;

use super::unified::{ingest_from_path, IngestionFormat, IngestionOptions};

/// Read every `.csv` / `.parquet` file directly inside `dir` and concatenate them.
///
/// - Only regular files (symlinks are followed) are read; subdirectories are not descended into.
/// - Files are visited in ascending file-name order, so row order is stable across runs.
/// - Columns are aligned by name with [`DataSet::concat`].
/// - `options.format` is ignored; each file's format comes from its name.
///
/// Returns [`IngestionError::NoInputData`] when no file qualifies. The first file that fails to
/// parse aborts the whole collection.
pub fn collect_from_dir(dir: impl AsRef<Path>, options: &IngestionOptions) -> IngestionResult<DataSet> {
    let dir = dir.as_ref();
    let walker = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name();

    let mut datasets: Vec<DataSet> = Vec::new();
    for entry in walker {
        let entry = entry?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(format) = IngestionFormat::from_path(path) else {
            tracing::debug!(path = %path.display(), "skipping unrecognized file");
            continue;
        };

        let file_options = IngestionOptions {
            format: Some(format),
            ..options.clone()
        };
        datasets.push(ingest_from_path(path, &file_options)?);
    }

    if datasets.is_empty() {
        return Err(IngestionError::NoInputData {
            dir: dir.to_path_buf(),
        });
    }

    let files = datasets.len();
    let combined = DataSet::concat(datasets);
    tracing::info!(
        dir = %dir.display(),
        files,
        rows = combined.row_count(),
        columns = combined.column_count(),
        "collected source files"
    );
    Ok(combined)
}
