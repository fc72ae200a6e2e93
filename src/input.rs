use std::path::Path;

use crate::models::CourseEntry;

pub fn load_entries(csv_path: &Path) -> anyhow::Result<Vec<CourseEntry>> {
    #[derive(serde::Deserialize)]
    struct CsvRow {
        grade: String,
        credit_hours: f64,
    }

    let mut reader = csv::Reader::from_path(csv_path)?;
    let mut entries = Vec::new();

    for result in reader.deserialize::<CsvRow>() {
        let row = result?;
        entries.push(CourseEntry {
            grade: row.grade,
            credit_hours: row.credit_hours,
        });
    }

    Ok(entries)
}

/// Drops rows the calculation layer must never see: blank grade strings and
/// non-positive credit hours. Unrecognized-but-nonblank symbols stay in;
/// the scale scores them 0.0.
pub fn filter_valid(entries: Vec<CourseEntry>) -> Vec<CourseEntry> {
    entries
        .into_iter()
        .filter(|entry| !entry.grade.trim().is_empty() && entry.credit_hours > 0.0)
        .collect()
}
