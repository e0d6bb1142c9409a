//! JSON file store for one record collection.
//!
//! Each collection lives in `<data_dir>/<collection>.json` as a single
//! pretty-printed JSON array. The file is read once when the store is opened;
//! every mutation rewrites the whole array to a temporary sibling file and
//! renames it over the previous file.

use exambank_application::ports::record_store::{
    RecordStore, StoreError, StoreResult, StoredRecord, remove, upsert,
};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::debug;

/// File-backed [`RecordStore`] that keeps the collection in memory.
pub struct JsonFileStore<R> {
    path: PathBuf,
    records: Mutex<Vec<R>>,
}

impl<R> JsonFileStore<R>
where
    R: StoredRecord + Serialize + DeserializeOwned,
{
    /// Open the collection of `R` inside `data_dir`.
    ///
    /// A missing file is an empty collection; the directory is created on
    /// the first write.
    pub fn open(data_dir: impl AsRef<Path>) -> StoreResult<Self> {
        let path = data_dir
            .as_ref()
            .join(format!("{}.json", R::COLLECTION));
        let records = load(&path)?;
        debug!(
            "Opened '{}' with {} records from {}",
            R::COLLECTION,
            records.len(),
            path.display()
        );
        Ok(Self {
            path,
            records: Mutex::new(records),
        })
    }

    /// Location of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self, records: &[R]) -> StoreResult<()> {
        let io_err = |path: &Path| {
            let path = path.to_path_buf();
            move |source| StoreError::Io { path, source }
        };

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(io_err(parent))?;
        }

        let tmp = self.path.with_extension("json.tmp");
        {
            let file = fs::File::create(&tmp).map_err(io_err(&tmp))?;
            let mut writer = BufWriter::new(file);
            serde_json::to_writer_pretty(&mut writer, records)
                .map_err(|e| StoreError::Serialization(e.to_string()))?;
            writer.write_all(b"\n").map_err(io_err(&tmp))?;
            writer.flush().map_err(io_err(&tmp))?;
        }
        fs::rename(&tmp, &self.path).map_err(io_err(&self.path))?;

        debug!(
            "Flushed {} '{}' records to {}",
            records.len(),
            R::COLLECTION,
            self.path.display()
        );
        Ok(())
    }
}

fn load<R>(path: &Path) -> StoreResult<Vec<R>>
where
    R: StoredRecord + DeserializeOwned,
{
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(source) => {
            return Err(StoreError::Io {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    if content.trim().is_empty() {
        return Ok(Vec::new());
    }

    serde_json::from_str(&content).map_err(|e| StoreError::Corrupt {
        collection: R::COLLECTION,
        message: e.to_string(),
    })
}

impl<R> RecordStore<R> for JsonFileStore<R>
where
    R: StoredRecord + Serialize + DeserializeOwned,
{
    fn list(&self) -> StoreResult<Vec<R>> {
        let records = self.records.lock().map_err(|_| StoreError::Poisoned)?;
        Ok(records.clone())
    }

    fn save(&self, record: R) -> StoreResult<()> {
        let mut records = self.records.lock().map_err(|_| StoreError::Poisoned)?;
        let mut next = records.clone();
        upsert(&mut next, record);
        self.flush(&next)?;
        *records = next;
        Ok(())
    }

    fn delete(&self, id: &str) -> StoreResult<bool> {
        let mut records = self.records.lock().map_err(|_| StoreError::Poisoned)?;
        let mut next = records.clone();
        if !remove(&mut next, id) {
            return Ok(false);
        }
        self.flush(&next)?;
        *records = next;
        Ok(true)
    }
}
