//! Mapping collection and resource names onto disk paths.
//!
//! ```text
//! root/
//! └── {collection}/
//!     ├── {resource}.json
//!     └── {resource}.json.tmp   # only while a write is in flight
//! ```

use std::ffi::OsString;
use std::fs::{self, Metadata};
use std::io;
use std::path::{Component, Path, PathBuf};

/// Extension carried by every resource file.
pub const RECORD_EXTENSION: &str = "json";

/// Suffix of the temporary sibling written before the commit rename.
pub const TEMP_SUFFIX: &str = ".tmp";

/// Returns true if joining `name` onto a directory stays inside it.
///
/// `Path::join` replaces the base when given an absolute path, and `..`
/// walks out of it, so names with a root, a prefix or a parent component
/// are refused. The empty name is contained.
pub fn is_contained_name(name: &str) -> bool {
    Path::new(name)
        .components()
        .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
}

/// Returns the directory backing a collection.
pub fn collection_dir(root: &Path, collection: &str) -> PathBuf {
    root.join(collection)
}

/// Returns the canonical file path of a resource: `root/collection/resource.json`.
///
/// Names are expected to have passed [`is_contained_name`].
pub fn resolve(root: &Path, collection: &str, resource: &str) -> PathBuf {
    collection_dir(root, collection).join(format!("{}.{}", resource, RECORD_EXTENSION))
}

/// Returns the temporary sibling used while writing `path`.
pub fn temp_path(path: &Path) -> PathBuf {
    append_suffix(path, TEMP_SUFFIX)
}

/// Returns true if `path` names an in-flight (or orphaned) temp file.
pub fn is_temp_path(path: &Path) -> bool {
    path.as_os_str()
        .to_str()
        .is_some_and(|s| s.ends_with(TEMP_SUFFIX))
}

fn append_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut s: OsString = path.as_os_str().to_owned();
    s.push(suffix);
    PathBuf::from(s)
}

/// A path located by [`probe`], with the metadata found there.
#[derive(Debug)]
pub struct Probed {
    /// The path that actually exists, either as given or with `.json` appended.
    pub path: PathBuf,
    pub metadata: Metadata,
}

impl Probed {
    pub fn is_dir(&self) -> bool {
        self.metadata.is_dir()
    }

    pub fn is_file(&self) -> bool {
        self.metadata.is_file()
    }
}

/// Looks up `path`, falling back to `path.json` when the exact path is absent.
///
/// This lets callers name a resource with or without its extension, and
/// locates collection directories the same way.
///
/// # Errors
/// Returns `NotFound` if neither path exists. Any other error from the
/// first lookup is returned as-is without trying the fallback.
pub fn probe(path: &Path) -> io::Result<Probed> {
    match fs::metadata(path) {
        Ok(metadata) => Ok(Probed {
            path: path.to_path_buf(),
            metadata,
        }),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            let fallback = append_suffix(path, &format!(".{}", RECORD_EXTENSION));
            let metadata = fs::metadata(&fallback)?;
            Ok(Probed {
                path: fallback,
                metadata,
            })
        }
        Err(e) => Err(e),
    }
}

/// Like [`probe`], but prefers `path.json` when `path` itself is a
/// directory and the suffixed file exists.
pub fn probe_file(path: &Path) -> io::Result<Probed> {
    let found = probe(path)?;
    if found.is_dir() && found.path.as_path() == path {
        let fallback = append_suffix(path, &format!(".{}", RECORD_EXTENSION));
        if let Ok(metadata) = fs::metadata(&fallback) {
            if metadata.is_file() {
                return Ok(Probed {
                    path: fallback,
                    metadata,
                });
            }
        }
    }
    Ok(found)
}
