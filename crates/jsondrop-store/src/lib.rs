//! A minimal document store that keeps each record in its own JSON file.
//!
//! Records are grouped into collections (directories) and named by
//! resource (file). Writes go through a temp file and a rename, so a
//! record visible under its final name is always complete.
//!
//! ```text
//! root/
//! └── users/
//!     ├── John.json
//!     └── Mary.json
//! ```
//!
//! # Example
//!
//! ```no_run
//! use jsondrop_store::{Driver, Options};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Serialize, Deserialize)]
//! struct Note {
//!     text: String,
//! }
//!
//! let db = Driver::new("./notes-db", Options::default()).unwrap();
//! db.write("notes", "first", &Note { text: "hello".into() }).unwrap();
//!
//! let note: Note = db.read("notes", "first").unwrap();
//! let all: Vec<Note> = db.read_all_as("notes").unwrap();
//! ```

pub mod atomic;
pub mod driver;
pub mod error;
pub mod logger;
pub mod registry;
pub mod resolve;

pub use driver::{Driver, Options};
pub use error::{Result, StoreError};
pub use logger::{Level, Logger, NullLogger, TracingLogger};
pub use registry::MutexRegistry;
pub use resolve::{is_contained_name, probe, probe_file, resolve, Probed, RECORD_EXTENSION};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
