use std::fs::File;
use std::path::Path;

use crate::Error;

/// Reads every well-formed row of a CSV table.
///
/// Malformed rows are skipped and counted in a warning.
///
/// # Errors
///
/// Returns [`Error::IoError`] if the file cannot be opened,
/// [`Error::DataLoad`] if its header cannot be read and
/// [`Error::InvalidData`] if the header lacks one of `required`.
pub fn deserialize_table<T>(path: &Path, required: &[&str]) -> Result<Vec<T>, Error>
where
    T: for<'de> serde::Deserialize<'de>,
{
    let file = File::open(path)?;

    let mut reader = csv::Reader::from_reader(file);
    let headers = reader.headers().map_err(|e| {
        Error::DataLoad(format!("Failed to read header of '{}': {}", path.display(), e))
    })?;
    if let Some(column) = required
        .iter()
        .find(|column| !headers.iter().any(|h| h.trim() == **column))
    {
        return Err(Error::InvalidData(format!(
            "'{}' has no '{column}' column",
            path.display()
        )));
    }

    let mut skipped = 0usize;
    let rows = reader
        .deserialize()
        .filter_map(|row| match row {
            Ok(row) => Some(row),
            Err(e) => {
                skipped += 1;
                log::trace!("Skipping row in {}: {e}", path.display());
                None
            }
        })
        .collect::<Vec<T>>();

    if skipped > 0 {
        log::warn!("Skipped {skipped} malformed rows in {}", path.display());
    }

    Ok(rows)
}

/// Parses boolean-like CSV cells (`true/false`, `1/0`, `yes/no`)
pub fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "y" => Some(true),
        "false" | "0" | "no" | "n" => Some(false),
        _ => None,
    }
}
