use crate::errors::StorageError;
use crate::models::AppData;
use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};
use tokio::{fs, sync::mpsc, task::JoinHandle};
use tracing::error;

/// Key-value backend holding the single state blob.
pub trait Store: Send {
    /// `Ok(None)` when nothing has been saved yet.
    fn load(&self) -> Result<Option<AppData>, StorageError>;
    fn save(&self, data: &AppData) -> Result<(), StorageError>;
}

fn decode(bytes: &[u8]) -> Result<AppData, StorageError> {
    let data: AppData = serde_json::from_slice(bytes)?;
    data.validate().map_err(StorageError::Invalid)?;
    Ok(data)
}

/// JSON file on local disk.
///
/// `save` only queues a snapshot; a background task writes snapshots in
/// order through `tokio::fs`, keeping disk I/O off request handlers.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
    writer: mpsc::UnboundedSender<Vec<u8>>,
}

impl FileStore {
    /// Spawns the writer task, so it must run inside a tokio runtime. The
    /// task ends, after draining, once every clone of the store is dropped.
    pub fn spawn(path: impl Into<PathBuf>) -> (Self, JoinHandle<()>) {
        let path = path.into();
        let (writer, queue) = mpsc::unbounded_channel();
        let handle = tokio::spawn(run_writer(path.clone(), queue));
        (Self { path, writer }, handle)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".tmp");
    PathBuf::from(name)
}

async fn run_writer(path: PathBuf, mut queue: mpsc::UnboundedReceiver<Vec<u8>>) {
    while let Some(mut payload) = queue.recv().await {
        // Only the newest queued snapshot matters.
        while let Ok(newer) = queue.try_recv() {
            payload = newer;
        }
        if let Err(err) = write_file(&path, &payload).await {
            error!("failed to write {}: {err}", path.display());
        }
    }
}

async fn write_file(path: &Path, payload: &[u8]) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).await?;
        }
    }
    let temp = temp_path(path);
    fs::write(&temp, payload).await?;
    fs::rename(&temp, path).await
}

impl Store for FileStore {
    /// Blocking read; call it from `spawn_blocking` inside the runtime.
    fn load(&self) -> Result<Option<AppData>, StorageError> {
        match std::fs::read(&self.path) {
            Ok(bytes) => decode(&bytes).map(Some),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn save(&self, data: &AppData) -> Result<(), StorageError> {
        let payload = serde_json::to_vec_pretty(data)?;
        self.writer
            .send(payload)
            .map_err(|_| StorageError::WriterClosed)
    }
}

/// In-process store. Clones share the same slot.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    slot: Arc<Mutex<MemorySlot>>,
}

#[derive(Debug, Default)]
struct MemorySlot {
    raw: Option<String>,
    fail_writes: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the slot with a raw blob, valid or not.
    pub fn with_raw(raw: impl Into<String>) -> Self {
        let store = Self::default();
        store.lock().raw = Some(raw.into());
        store
    }

    pub fn raw(&self) -> Option<String> {
        self.lock().raw.clone()
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.lock().fail_writes = fail;
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MemorySlot> {
        // A poisoned slot still holds a complete string.
        self.slot.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Store for MemoryStore {
    fn load(&self) -> Result<Option<AppData>, StorageError> {
        match self.lock().raw.as_deref() {
            Some(raw) => decode(raw.as_bytes()).map(Some),
            None => Ok(None),
        }
    }

    fn save(&self, data: &AppData) -> Result<(), StorageError> {
        let mut slot = self.lock();
        if slot.fail_writes {
            return Err(StorageError::Io(std::io::Error::new(
                ErrorKind::StorageFull,
                "storage quota exceeded",
            )));
        }
        slot.raw = Some(serde_json::to_string(data)?);
        Ok(())
    }
}
