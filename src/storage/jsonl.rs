//! Line-oriented JSON files.
//!
//! Records are appended as they are accepted, one JSON object per line, so a
//! tournament's history can be replayed in reporting order.

use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::marker::PhantomData;
use std::path::PathBuf;

use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, warn};

use super::StorageError;

/// The kinds of record the store keeps, one file each.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityType {
    Tournament,
    Player,
    Match,
}

impl EntityType {
    pub fn filename(&self) -> &'static str {
        match self {
            EntityType::Tournament => "tournaments.jsonl",
            EntityType::Player => "players.jsonl",
            EntityType::Match => "matches.jsonl",
        }
    }
}

/// Appends or rewrites records of one type.
pub struct JsonlWriter<T> {
    path: PathBuf,
    _marker: PhantomData<T>,
}

impl<T: Serialize> JsonlWriter<T> {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            _marker: PhantomData,
        }
    }

    fn open_append(&self) -> Result<BufWriter<File>, StorageError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        Ok(BufWriter::new(file))
    }

    pub fn append(&self, record: &T) -> Result<(), StorageError> {
        self.append_batch(std::slice::from_ref(record)).map(|_| ())
    }

    /// Append several records with a single open and flush.
    pub fn append_batch(&self, records: &[T]) -> Result<usize, StorageError> {
        let mut out = self.open_append()?;
        for record in records {
            writeln!(out, "{}", serde_json::to_string(record)?)?;
        }
        out.flush()?;

        debug!("Appended {} records to {}", records.len(), self.path.display());
        Ok(records.len())
    }

    /// Replace the file contents with `records`.
    pub fn write_all(&self, records: &[T]) -> Result<usize, StorageError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut out = BufWriter::new(File::create(&self.path)?);
        for record in records {
            writeln!(out, "{}", serde_json::to_string(record)?)?;
        }
        out.flush()?;

        debug!("Rewrote {} with {} records", self.path.display(), records.len());
        Ok(records.len())
    }
}

/// Reads back records of one type in file order.
pub struct JsonlReader<T> {
    path: PathBuf,
    _marker: PhantomData<T>,
}

impl<T: DeserializeOwned> JsonlReader<T> {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            _marker: PhantomData,
        }
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// A missing file reads as empty. Lines that fail to parse are skipped.
    pub fn read_all(&self) -> Result<Vec<T>, StorageError> {
        if !self.exists() {
            return Ok(Vec::new());
        }

        let mut records = Vec::new();
        for (index, line) in BufReader::new(File::open(&self.path)?).lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str(&line) {
                Ok(record) => records.push(record),
                Err(e) => warn!(
                    "Skipping unreadable record at {}:{}: {}",
                    self.path.display(),
                    index + 1,
                    e
                ),
            }
        }

        debug!("Loaded {} records from {}", records.len(), self.path.display());
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use tempfile::TempDir;

    #[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
    struct TestEntity {
        id: String,
        value: u32,
    }

    fn entity(id: &str, value: u32) -> TestEntity {
        TestEntity {
            id: id.to_string(),
            value,
        }
    }

    #[test]
    fn test_jsonl_write_and_read() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("test.jsonl");

        let entities = vec![entity("1", 100), entity("2", 200)];

        let writer: JsonlWriter<TestEntity> = JsonlWriter::new(path.clone());
        assert_eq!(writer.write_all(&entities).unwrap(), 2);

        let reader: JsonlReader<TestEntity> = JsonlReader::new(path);
        assert_eq!(reader.read_all().unwrap(), entities);
    }

    #[test]
    fn test_jsonl_append_creates_parent_dirs() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("dir").join("append.jsonl");

        let writer: JsonlWriter<TestEntity> = JsonlWriter::new(path.clone());
        writer.append(&entity("1", 1)).unwrap();
        writer.append(&entity("2", 2)).unwrap();

        let reader: JsonlReader<TestEntity> = JsonlReader::new(path);
        assert_eq!(reader.read_all().unwrap().len(), 2);
    }

    #[test]
    fn test_append_batch_keeps_existing_lines() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("batch.jsonl");

        let writer: JsonlWriter<TestEntity> = JsonlWriter::new(path.clone());
        writer.append(&entity("1", 1)).unwrap();
        assert_eq!(
            writer
                .append_batch(&[entity("2", 2), entity("3", 3)])
                .unwrap(),
            2
        );
        assert_eq!(writer.append_batch(&[]).unwrap(), 0);

        let reader: JsonlReader<TestEntity> = JsonlReader::new(path);
        assert_eq!(
            reader.read_all().unwrap(),
            vec![entity("1", 1), entity("2", 2), entity("3", 3)]
        );
    }

    #[test]
    fn test_jsonl_read_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let reader: JsonlReader<TestEntity> =
            JsonlReader::new(temp_dir.path().join("nonexistent.jsonl"));

        assert!(!reader.exists());
        assert!(reader.read_all().unwrap().is_empty());
    }

    #[test]
    fn test_write_all_overwrites_existing() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("overwrite.jsonl");

        let writer: JsonlWriter<TestEntity> = JsonlWriter::new(path.clone());
        let reader: JsonlReader<TestEntity> = JsonlReader::new(path);

        writer.write_all(&[entity("old", 1)]).unwrap();
        writer.write_all(&[]).unwrap();

        assert!(reader.exists());
        assert!(reader.read_all().unwrap().is_empty());
    }

    #[test]
    fn test_read_all_skips_bad_lines() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("bad_lines.jsonl");

        std::fs::write(
            &path,
            r#"{"id":"1","value":1}
not-valid-json

{"id":"2","value":2}
"#,
        )
        .unwrap();

        let reader: JsonlReader<TestEntity> = JsonlReader::new(path);
        let entities = reader.read_all().unwrap();
        assert_eq!(entities, vec![entity("1", 1), entity("2", 2)]);
    }

    #[test]
    fn test_entity_type_filenames() {
        assert_eq!(EntityType::Tournament.filename(), "tournaments.jsonl");
        assert_eq!(EntityType::Player.filename(), "players.jsonl");
        assert_eq!(EntityType::Match.filename(), "matches.jsonl");
    }
}
