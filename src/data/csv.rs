/// CSV loading for labelled email datasets.
///
/// Expected layout:
/// - UTF-8, comma-separated, first row is a header
/// - first column: opaque row id (ignored)
/// - last column: integer label (1 = spam, 0 = not spam)
/// - every column in between: a numeric feature, named by its header cell
/// - double-quoted fields with embedded commas are handled
///
/// Individual bad cells never abort a load: a feature that is not a number
/// reads as 0.0 and a label that is not 0 or 1 reads as 0.

use std::path::Path;

use log::{info, warn};

use crate::data::dataset::Dataset;
use crate::error::DatasetError;

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

pub fn load_dataset(path: impl AsRef<Path>) -> Result<Dataset, DatasetError> {
    let path = path.as_ref();
    let bytes = std::fs::read(path)?;
    let dataset = parse_dataset(&bytes)?;
    info!(
        "loaded {} rows with {} features from {}",
        dataset.len(),
        dataset.feature_count(),
        path.display()
    );
    Ok(dataset)
}

pub fn parse_dataset(data: &[u8]) -> Result<Dataset, DatasetError> {
    let text = std::str::from_utf8(data).map_err(|_| DatasetError::Utf8)?;
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    let mut lines = text.lines().filter(|l| !l.trim().is_empty());
    let header = parse_csv_row(lines.next().ok_or(DatasetError::Empty)?);
    if header.len() < 3 {
        return Err(DatasetError::NoFeatureColumns);
    }
    let feature_count = header.len() - 2;
    let feature_names = header[1..header.len() - 1].to_vec();

    let mut features = Vec::new();
    let mut labels = Vec::new();
    let mut defaulted_cells = 0usize;

    for line in lines {
        let cells = parse_csv_row(line);

        let row: Vec<f64> = (0..feature_count)
            .map(|j| match cells.get(j + 1).map(|c| c.parse::<f64>()) {
                Some(Ok(v)) => v,
                _ => {
                    defaulted_cells += 1;
                    0.0
                }
            })
            .collect();

        let label = match cells.get(header.len() - 1).map(|c| c.parse::<i64>()) {
            Some(Ok(1)) => 1,
            Some(Ok(0)) => 0,
            _ => {
                defaulted_cells += 1;
                0
            }
        };

        features.push(row);
        labels.push(label);
    }

    if features.is_empty() {
        return Err(DatasetError::Empty);
    }
    if defaulted_cells > 0 {
        warn!("{} malformed dataset cells defaulted to 0", defaulted_cells);
    }

    Dataset::from_parts(features, labels).map(|d| d.with_feature_names(feature_names))
}

// ---------------------------------------------------------------------------
// Private helpers
// ---------------------------------------------------------------------------

/// Splits one CSV row, honouring double quotes, and trims every cell.
fn parse_csv_row(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                // Escaped quote inside quoted field.
                current.push('"');
                chars.next();
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                fields.push(current.trim().to_owned());
                current.clear();
            }
            c => current.push(c),
        }
    }
    fields.push(current.trim().to_owned());
    fields
}
