//! JSON implementation of the snapshot repository.

use std::{
    fs::File,
    io::{BufReader, BufWriter, Write},
    path::Path,
};

use serde::{Serialize, de::DeserializeOwned};

use crate::{Result, error::Error, ports::SnapshotRepository};

/// JSON-based snapshot repository.
///
/// Produces the portable key-value documents described in the crate docs:
/// object keys are the codec strings, values are numbers or number arrays.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonRepository {
    pretty: bool,
}

impl JsonRepository {
    /// Create a repository writing compact JSON.
    pub fn new() -> Self {
        Self { pretty: false }
    }

    /// Create a repository writing indented JSON.
    pub fn pretty() -> Self {
        Self { pretty: true }
    }
}

impl SnapshotRepository for JsonRepository {
    fn save<T: Serialize>(&self, snapshot: &T, path: &Path) -> Result<()> {
        let file = File::create(path).map_err(|source| Error::Io {
            operation: format!("create file {path:?}"),
            source,
        })?;
        let mut writer = BufWriter::new(file);

        let encoded = if self.pretty {
            serde_json::to_writer_pretty(&mut writer, snapshot)
        } else {
            serde_json::to_writer(&mut writer, snapshot)
        };
        encoded.map_err(|e| Error::SerializationContext {
            operation: "serialize snapshot to JSON".to_string(),
            message: e.to_string(),
        })?;

        writer.flush().map_err(|source| Error::Io {
            operation: format!("write file {path:?}"),
            source,
        })?;

        Ok(())
    }

    fn load<T: DeserializeOwned>(&self, path: &Path) -> Result<T> {
        let file = File::open(path).map_err(|source| Error::Io {
            operation: format!("open file {path:?}"),
            source,
        })?;

        serde_json::from_reader(BufReader::new(file)).map_err(|e| Error::SerializationContext {
            operation: "deserialize snapshot from JSON".to_string(),
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_json_roundtrip() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let file_path = temp_dir.path().join("weights.json");

        let mut weights = BTreeMap::new();
        weights.insert("1".to_string(), vec![0.5, -1.25]);
        weights.insert("2".to_string(), vec![0.0, 3.0]);

        let repo = JsonRepository::pretty();
        repo.save(&weights, &file_path).expect("Failed to save");
        let loaded: BTreeMap<String, Vec<f64>> = repo.load(&file_path).expect("Failed to load");

        assert_eq!(weights, loaded);
    }

    #[test]
    fn test_document_is_plain_text() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let file_path = temp_dir.path().join("weights.json");

        let mut weights = BTreeMap::new();
        weights.insert("1".to_string(), vec![1.5]);
        JsonRepository::new().save(&weights, &file_path).unwrap();

        let text = std::fs::read_to_string(&file_path).unwrap();
        assert_eq!(text, r#"{"1":[1.5]}"#);
    }

    #[test]
    fn test_load_nonexistent_returns_error() {
        let repo = JsonRepository::new();
        let result = repo.load::<Vec<f64>>(Path::new("/tmp/nonexistent_qlearn_12345.json"));
        let err_message = result.unwrap_err().to_string();
        assert!(err_message.contains("open file"), "got: {err_message}");
    }

    #[test]
    fn test_load_malformed_returns_error() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let file_path = temp_dir.path().join("broken.json");
        std::fs::write(&file_path, "{\"1\": [0.5,").unwrap();

        let result = JsonRepository::new().load::<BTreeMap<String, Vec<f64>>>(&file_path);
        assert!(matches!(result, Err(Error::SerializationContext { .. })));
    }

    #[test]
    fn test_save_to_invalid_path_returns_error() {
        let repo = JsonRepository::new();
        let result = repo.save(&vec![1.0], Path::new("/invalid_dir_12345/file.json"));
        assert!(result.is_err());
    }
}
