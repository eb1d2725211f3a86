use crate::error::StorageError;
use crate::models::VacancyRecord;
use serde::Serialize;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use tracing::{info, warn};

/// Write rows to a CSV file with a header row, replacing any existing file
pub fn save<T: Serialize>(rows: &[T], path: impl AsRef<Path>) -> Result<(), StorageError> {
    let path = path.as_ref();
    let shown = path.display().to_string();

    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| StorageError::Io {
            path: parent.display().to_string(),
            source,
        })?;
    }

    let csv_error = |source| StorageError::Csv {
        path: shown.clone(),
        source,
    };

    let mut writer = csv::Writer::from_path(path).map_err(csv_error)?;
    for row in rows {
        writer.serialize(row).map_err(csv_error)?;
    }
    writer.flush().map_err(|source| StorageError::Io {
        path: shown.clone(),
        source,
    })?;

    info!("Saved {} rows to {}", rows.len(), shown);
    Ok(())
}

/// Read rows back from a CSV file.
///
/// A missing file is not an error: it is logged and yields an empty table.
/// Columns other than the vacancy fields are ignored.
pub fn load(path: impl AsRef<Path>) -> Result<Vec<VacancyRecord>, StorageError> {
    let path = path.as_ref();
    let shown = path.display().to_string();

    let file = match fs::File::open(path) {
        Ok(file) => file,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            warn!("File {} not found", shown);
            return Ok(Vec::new());
        }
        Err(source) => return Err(StorageError::Io { path: shown, source }),
    };

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(file);

    let mut rows = Vec::new();
    for record in reader.deserialize::<VacancyRecord>() {
        let row = record.map_err(|source| StorageError::Csv {
            path: shown.clone(),
            source,
        })?;
        rows.push(row);
    }

    info!("Loaded {} rows from {}", rows.len(), shown);
    Ok(rows)
}
