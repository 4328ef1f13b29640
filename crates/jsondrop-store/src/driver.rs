//! The store driver: validated, per-collection-locked record operations.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError};

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::atomic::{atomic_write_json, read_json};
use crate::error::{Result, StoreError};
use crate::logger::{Logger, TracingLogger};
use crate::registry::MutexRegistry;
use crate::resolve::{collection_dir, is_contained_name, is_temp_path, probe, probe_file, resolve};

/// Construction options for [`Driver`].
#[derive(Clone, Default)]
pub struct Options {
    /// Log sink. Defaults to a [`TracingLogger`] at info level.
    pub logger: Option<Arc<dyn Logger>>,
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_logger(mut self, logger: impl Logger + 'static) -> Self {
        self.logger = Some(Arc::new(logger));
        self
    }
}

impl fmt::Debug for Options {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Options")
            .field("logger", &self.logger.as_ref().map(|_| "<dyn Logger>"))
            .finish()
    }
}

/// A JSON document store rooted at a directory.
///
/// Records live at `root/{collection}/{resource}.json`. Every operation
/// takes the collection's exclusive lock, so operations on one collection
/// run one at a time while different collections proceed independently.
///
/// # Example
///
/// ```no_run
/// use jsondrop_store::{Driver, Options};
/// use serde_json::json;
///
/// let db = Driver::new("./data", Options::default()).unwrap();
/// db.write("users", "john", &json!({ "Name": "John" })).unwrap();
///
/// let john: serde_json::Value = db.read("users", "john").unwrap();
/// let everyone = db.read_all("users").unwrap();
/// db.delete("users", "").unwrap(); // drops the whole collection
/// ```
pub struct Driver {
    root: PathBuf,
    registry: MutexRegistry,
    logger: Arc<dyn Logger>,
}

impl fmt::Debug for Driver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Driver")
            .field("root", &self.root)
            .field("locks", &self.registry.len())
            .finish()
    }
}

impl Driver {
    /// Opens the store at `root`, creating the directory if it is missing.
    ///
    /// # Errors
    /// Returns `DirectoryError` if the directory cannot be created, or if
    /// `root` exists but is not a directory.
    pub fn new(root: impl AsRef<Path>, options: Options) -> Result<Self> {
        let root = normalize(root.as_ref());
        let logger = options
            .logger
            .unwrap_or_else(|| Arc::new(TracingLogger::default()));

        match fs::metadata(&root) {
            Ok(meta) if meta.is_dir() => {
                logger.debug(format_args!(
                    "Using '{}' (database already exists)",
                    root.display()
                ));
            }
            Ok(_) => {
                return Err(StoreError::DirectoryError {
                    path: root,
                    source: io::Error::new(
                        io::ErrorKind::AlreadyExists,
                        "root path exists and is not a directory",
                    ),
                });
            }
            Err(_) => {
                logger.debug(format_args!("Creating database '{}'...", root.display()));
                fs::create_dir_all(&root).map_err(|source| StoreError::DirectoryError {
                    path: root.clone(),
                    source,
                })?;
            }
        }

        Ok(Self {
            root,
            registry: MutexRegistry::new(),
            logger,
        })
    }

    /// The normalized root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Saves `value` as `collection/resource.json`, replacing any previous
    /// content atomically.
    pub fn write<T: Serialize + ?Sized>(
        &self,
        collection: &str,
        resource: &str,
        value: &T,
    ) -> Result<()> {
        require_collection(collection)?;
        if resource.is_empty() {
            return Err(StoreError::Validation(
                "missing resource - unable to save record (no name)".to_string(),
            ));
        }
        require_contained("resource", resource)?;

        let lock = self.registry.acquire(collection)?;
        let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);

        // atomic_write creates the collection directory on first use.
        let path = resolve(&self.root, collection, resource);
        self.logger.trace(format_args!("Writing '{}'", path.display()));
        atomic_write_json(&path, value)
    }

    /// Loads `collection/resource` and decodes it as `T`.
    ///
    /// `resource` may be given with or without the `.json` extension. If
    /// `collection/resource` is a directory and `collection/resource.json`
    /// is a file, the file is read. A record whose shape does not match `T`
    /// is a `Json` error.
    pub fn read<T: DeserializeOwned>(&self, collection: &str, resource: &str) -> Result<T> {
        require_collection(collection)?;
        if resource.is_empty() {
            return Err(StoreError::Validation(
                "missing resource - unable to read record (no name)".to_string(),
            ));
        }
        require_contained("resource", resource)?;

        let lock = self.registry.acquire(collection)?;
        let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);

        let wanted = collection_dir(&self.root, collection).join(resource);
        let found = match probe_file(&wanted) {
            Ok(found) if found.is_file() => found,
            Ok(_) => return Err(StoreError::NotFound { path: wanted }),
            Err(e) => return Err(probe_error(wanted, e)),
        };

        self.logger.trace(format_args!("Reading '{}'", found.path.display()));
        read_json(&found.path)
    }

    /// Loads `collection/resource` without a target type.
    pub fn read_value(&self, collection: &str, resource: &str) -> Result<serde_json::Value> {
        self.read(collection, resource)
    }

    /// Returns the raw JSON text of every record in `collection`.
    ///
    /// Order follows directory enumeration and is not stable. Subdirectories
    /// and in-flight `.tmp` files are skipped. The first unreadable file
    /// fails the whole call.
    pub fn read_all(&self, collection: &str) -> Result<Vec<String>> {
        require_collection(collection)?;

        let lock = self.registry.acquire(collection)?;
        let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);

        let wanted = collection_dir(&self.root, collection);
        let dir = match probe(&wanted) {
            Ok(found) if found.is_dir() => found.path,
            Ok(_) => return Err(StoreError::NotFound { path: wanted }),
            Err(e) => return Err(probe_error(wanted, e)),
        };

        let entries = fs::read_dir(&dir).map_err(read_err(&dir))?;
        let mut records = Vec::new();
        for entry in entries {
            let entry = entry.map_err(read_err(&dir))?;
            let path = entry.path();
            let file_type = entry.file_type().map_err(read_err(&path))?;
            if file_type.is_dir() || is_temp_path(&path) {
                continue;
            }
            let data = fs::read_to_string(&path).map_err(read_err(&path))?;
            records.push(data);
        }

        self.logger.trace(format_args!(
            "Read {} records from '{}'",
            records.len(),
            dir.display()
        ));
        Ok(records)
    }

    /// Decodes every record in `collection` as `T`.
    ///
    /// The first record that fails to decode fails the whole call.
    pub fn read_all_as<T: DeserializeOwned>(&self, collection: &str) -> Result<Vec<T>> {
        self.read_all(collection)?
            .iter()
            .map(|blob| serde_json::from_str(blob).map_err(StoreError::from))
            .collect()
    }

    /// Removes a record, or a whole collection when `resource` is empty.
    ///
    /// `resource` may be given with or without the `.json` extension. If the
    /// resolved target is a directory it is removed with everything in it.
    pub fn delete(&self, collection: &str, resource: &str) -> Result<()> {
        require_collection(collection)?;
        require_contained("resource", resource)?;

        let lock = self.registry.acquire(collection)?;
        let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);

        let dir = collection_dir(&self.root, collection);
        let wanted = if resource.is_empty() {
            dir
        } else {
            dir.join(resource)
        };

        let found = probe(&wanted).map_err(|e| probe_error(wanted.clone(), e))?;
        let removed = if found.is_dir() {
            self.logger.debug(format_args!("Removing collection '{}'", found.path.display()));
            fs::remove_dir_all(&found.path)
        } else if found.is_file() {
            self.logger.trace(format_args!("Removing '{}'", found.path.display()));
            fs::remove_file(&found.path)
        } else {
            return Err(StoreError::NotFound { path: wanted });
        };

        removed.map_err(|source| StoreError::WriteError {
            path: found.path,
            source,
        })
    }

    /// Removes `collection` and every record in it.
    pub fn delete_collection(&self, collection: &str) -> Result<()> {
        self.delete(collection, "")
    }

    /// Number of collection locks this driver has created.
    pub fn lock_count(&self) -> usize {
        self.registry.len()
    }
}

fn require_collection(collection: &str) -> Result<()> {
    if collection.is_empty() {
        return Err(StoreError::Validation(
            "collection name cannot be empty".to_string(),
        ));
    }
    require_contained("collection", collection)
}

/// Rejects names that would resolve outside their parent directory.
fn require_contained(kind: &str, name: &str) -> Result<()> {
    if !is_contained_name(name) {
        return Err(StoreError::Validation(format!(
            "{} name {:?} must stay inside the store root",
            kind, name
        )));
    }
    Ok(())
}

fn probe_error(wanted: PathBuf, e: io::Error) -> StoreError {
    if e.kind() == io::ErrorKind::NotFound {
        StoreError::NotFound { path: wanted }
    } else {
        StoreError::ReadError {
            path: wanted,
            source: e,
        }
    }
}

fn read_err(path: &Path) -> impl FnOnce(io::Error) -> StoreError {
    let path = path.to_path_buf();
    move |source| StoreError::ReadError { path, source }
}

/// Drops `.` components and redundant separators; an empty path becomes `.`.
fn normalize(path: &Path) -> PathBuf {
    let normalized: PathBuf = path.components().collect();
    if normalized.as_os_str().is_empty() {
        PathBuf::from(".")
    } else {
        normalized
    }
}
