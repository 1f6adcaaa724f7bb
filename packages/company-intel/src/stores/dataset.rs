//! Filesystem-backed dataset persistence.
//!
//! Every dataset is written twice: a CSV for flat tabular consumption and
//! a JSON array as the canonical form. Only the JSON is ever read back.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::Local;
use tracing::{info, warn};

use crate::error::StoreResult;
use crate::types::company::CompanyRecord;

/// Persists company datasets under a data directory.
#[derive(Debug, Clone)]
pub struct DatasetStore {
    data_dir: PathBuf,
}

impl DatasetStore {
    /// Open a store rooted at `data_dir`, creating it if absent.
    pub fn new(data_dir: impl Into<PathBuf>) -> StoreResult<Self> {
        let data_dir = data_dir.into();
        fs::create_dir_all(&data_dir)?;
        Ok(Self { data_dir })
    }

    /// The directory datasets live in.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Write `records` as `<name>.csv` and `<name>.json`.
    ///
    /// With no name given, one is derived from the current timestamp.
    /// Existing files with the same name are overwritten. Returns the two
    /// paths written.
    pub fn save(
        &self,
        records: &[CompanyRecord],
        name: Option<&str>,
    ) -> StoreResult<(PathBuf, PathBuf)> {
        let name = match name {
            Some(name) => name.to_string(),
            None => format!("companies_{}", Local::now().format("%Y%m%d_%H%M%S")),
        };

        let csv_path = self.data_dir.join(format!("{name}.csv"));
        write_csv(records, &csv_path)?;

        let json_path = self.data_dir.join(format!("{name}.json"));
        let mut writer = BufWriter::new(File::create(&json_path)?);
        serde_json::to_writer_pretty(&mut writer, records)?;
        writer.flush()?;

        info!(
            count = records.len(),
            csv = %csv_path.display(),
            json = %json_path.display(),
            "saved dataset"
        );
        Ok((csv_path, json_path))
    }

    /// Load the records of a saved dataset from its JSON file.
    ///
    /// A missing or unreadable file logs a warning and yields an empty
    /// list — browsing a stale dataset name is not a crash.
    pub fn load(&self, name: &str) -> Vec<CompanyRecord> {
        let json_path = self.data_dir.join(format!("{name}.json"));
        if !json_path.exists() {
            warn!(path = %json_path.display(), "dataset file not found");
            return Vec::new();
        }

        let records: Vec<CompanyRecord> = match File::open(&json_path)
            .map_err(serde_json::Error::io)
            .and_then(|f| serde_json::from_reader(BufReader::new(f)))
        {
            Ok(records) => records,
            Err(e) => {
                warn!(path = %json_path.display(), error = %e, "failed to read dataset");
                return Vec::new();
            }
        };

        info!(count = records.len(), path = %json_path.display(), "loaded dataset");
        records
    }

    /// Name stems of all saved datasets, in directory enumeration order.
    pub fn list(&self) -> StoreResult<Vec<String>> {
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.data_dir)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) == Some("json") {
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    names.push(stem.to_string());
                }
            }
        }
        Ok(names)
    }
}

/// Flat CSV export: the header is the union of fields present across all
/// records, in first-seen declaration order; cells for fields a record
/// never accumulated are left empty.
fn write_csv(records: &[CompanyRecord], path: &Path) -> StoreResult<()> {
    let mut columns: Vec<&'static str> = Vec::new();
    for record in records {
        for (key, value) in record.fields() {
            if value.is_some() && !columns.contains(&key) {
                columns.push(key);
            }
        }
    }

    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(&columns)?;
    for record in records {
        let fields = record.fields();
        let row = columns.iter().map(|col| {
            fields
                .iter()
                .find(|(key, _)| key == col)
                .and_then(|(_, value)| *value)
                .unwrap_or("")
        });
        writer.write_record(row)?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn sample_records() -> Vec<CompanyRecord> {
        vec![
            CompanyRecord::new("Acme", "https://dir.example/acme")
                .with_address("Jl. Sudirman 1")
                .with_website("https://acme.example")
                .with_description("Widgets"),
            CompanyRecord::new("Beta", "").with_address(""),
        ]
    }

    #[test]
    fn test_save_then_load_roundtrips_exactly() {
        let dir = tempdir().unwrap();
        let store = DatasetStore::new(dir.path()).unwrap();
        let records = sample_records();

        store.save(&records, Some("foo")).unwrap();
        let loaded = store.load("foo");

        assert_eq!(loaded, records);
    }

    #[test]
    fn test_save_writes_both_files() {
        let dir = tempdir().unwrap();
        let store = DatasetStore::new(dir.path()).unwrap();

        let (csv_path, json_path) = store.save(&sample_records(), Some("foo")).unwrap();

        assert!(csv_path.exists());
        assert!(json_path.exists());
        assert_eq!(csv_path.extension().unwrap(), "csv");
        assert_eq!(json_path.extension().unwrap(), "json");
    }

    #[test]
    fn test_load_missing_dataset_is_empty() {
        let dir = tempdir().unwrap();
        let store = DatasetStore::new(dir.path()).unwrap();

        assert!(store.load("nope").is_empty());
    }

    #[test]
    fn test_list_reports_overwritten_dataset_once() {
        let dir = tempdir().unwrap();
        let store = DatasetStore::new(dir.path()).unwrap();

        store.save(&sample_records(), Some("foo")).unwrap();
        store.save(&sample_records(), Some("foo")).unwrap();

        let names = store.list().unwrap();
        assert_eq!(names.iter().filter(|n| n.as_str() == "foo").count(), 1);
    }

    #[test]
    fn test_list_ignores_non_json_files() {
        let dir = tempdir().unwrap();
        let store = DatasetStore::new(dir.path()).unwrap();
        store.save(&sample_records(), Some("foo")).unwrap();

        let names = store.list().unwrap();
        // The CSV twin must not show up as a dataset.
        assert_eq!(names, vec!["foo".to_string()]);
    }

    #[test]
    fn test_csv_header_is_union_of_present_fields() {
        let dir = tempdir().unwrap();
        let store = DatasetStore::new(dir.path()).unwrap();
        let records = vec![
            CompanyRecord::new("A", "x").with_address("addr"),
            CompanyRecord::new("B", "y").with_website("https://b.example"),
        ];

        let (csv_path, _) = store.save(&records, Some("union")).unwrap();
        let content = fs::read_to_string(csv_path).unwrap();
        let header = content.lines().next().unwrap();

        assert_eq!(header, "name,url,address,website");
        // Record A never accumulated a website; its cell is empty.
        assert!(content.lines().nth(1).unwrap().ends_with(','));
    }

    #[test]
    fn test_save_without_name_derives_one() {
        let dir = tempdir().unwrap();
        let store = DatasetStore::new(dir.path()).unwrap();

        let (_, json_path) = store.save(&sample_records(), None).unwrap();
        let stem = json_path.file_stem().unwrap().to_str().unwrap();

        assert!(stem.starts_with("companies_"));
    }

    #[test]
    fn test_new_creates_data_dir() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("data/company");

        let store = DatasetStore::new(&nested).unwrap();

        assert!(nested.is_dir());
        assert!(store.list().unwrap().is_empty());
    }
}
