use std::fs;
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use log::info;

use crate::error::PersistError;
use crate::persist::snapshot::{PersistedModel, PRETRAINED_MODEL_ID};

/// Holds at most one persisted model. Saving replaces whatever was there.
pub trait ModelStore {
    fn save(&self, model: &PersistedModel) -> Result<(), PersistError>;

    /// `Ok(None)` when nothing has been saved yet.
    fn load(&self) -> Result<Option<PersistedModel>, PersistError>;
}

/// Stores the snapshot as pretty-printed JSON in `<dir>/pretrained_model.json`.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    pub fn new(dir: impl Into<PathBuf>) -> JsonFileStore {
        JsonFileStore { dir: dir.into() }
    }

    pub fn path(&self) -> PathBuf {
        self.dir.join(format!("{}.json", PRETRAINED_MODEL_ID))
    }

    fn write_tmp(&self, tmp: &Path, model: &PersistedModel) -> Result<(), PersistError> {
        let file = fs::File::create(tmp)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, model)?;
        writer.flush()?;
        writer.get_ref().sync_all()?;
        Ok(())
    }
}

impl ModelStore for JsonFileStore {
    /// Writes to a sibling temp file and renames it over the target, so
    /// readers never observe a half-written snapshot.
    fn save(&self, model: &PersistedModel) -> Result<(), PersistError> {
        fs::create_dir_all(&self.dir)?;
        let path = self.path();
        let tmp = path.with_extension("json.tmp");
        if let Err(e) = self.write_tmp(&tmp, model) {
            let _ = fs::remove_file(&tmp);
            return Err(e);
        }
        fs::rename(&tmp, &path)?;
        info!("saved pretrained model to {}", path.display());
        Ok(())
    }

    fn load(&self) -> Result<Option<PersistedModel>, PersistError> {
        let file = match fs::File::open(self.path()) {
            Ok(f) => f,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let model = serde_json::from_reader(BufReader::new(file))?;
        Ok(Some(model))
    }
}

/// In-process store, mostly for tests and ephemeral servers.
#[derive(Debug, Default)]
pub struct MemoryStore {
    slot: Mutex<Option<PersistedModel>>,
}

impl MemoryStore {
    pub fn new() -> MemoryStore {
        MemoryStore::default()
    }
}

impl ModelStore for MemoryStore {
    fn save(&self, model: &PersistedModel) -> Result<(), PersistError> {
        let mut slot = self.slot.lock().unwrap_or_else(|e| e.into_inner());
        *slot = Some(model.clone());
        Ok(())
    }

    fn load(&self) -> Result<Option<PersistedModel>, PersistError> {
        Ok(self.slot.lock().unwrap_or_else(|e| e.into_inner()).clone())
    }
}
