//! Command handlers for CLI subcommands.

use std::io::Write;
use std::path::Path;

use jsondrop_models::{demo_users, User};
use jsondrop_store::{Driver, Level, Options, TracingLogger};
use tracing::info;

use crate::cli::{Commands, OutputFormat};

/// Result type for command operations.
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

/// Collection used by the demo flow.
pub const DEMO_COLLECTION: &str = "users";

/// Opens the store at `dir`.
///
/// The driver logs everything to `tracing`; the subscriber installed in
/// `main` decides what is shown.
pub fn open_store(dir: &Path) -> Result<Driver> {
    let options = Options::new().with_logger(TracingLogger::new(Level::Trace));
    Ok(Driver::new(dir, options)?)
}

/// Execute a CLI command, writing user-facing output to `out`.
pub fn execute(command: Commands, dir: &Path, out: &mut impl Write) -> Result<()> {
    let db = open_store(dir)?;

    match command {
        Commands::Demo => cmd_demo(&db, out),
        Commands::Seed { collection } => cmd_seed(&db, &collection, out),
        Commands::List { collection, format } => cmd_list(&db, &collection, format, out),
        Commands::Get {
            collection,
            resource,
        } => cmd_get(&db, &collection, &resource, out),
        Commands::Put {
            collection,
            resource,
            json,
        } => cmd_put(&db, &collection, &resource, &json, out),
        Commands::Delete {
            collection,
            resource,
        } => cmd_delete(&db, &collection, resource.as_deref(), out),
    }
}

fn seed(db: &Driver, collection: &str) -> Result<Vec<User>> {
    let users = demo_users();
    for user in &users {
        db.write(collection, &user.name, user)?;
    }
    info!(collection = %collection, count = users.len(), "Seeded users");
    Ok(users)
}

fn cmd_demo(db: &Driver, out: &mut impl Write) -> Result<()> {
    seed(db, DEMO_COLLECTION)?;

    let mut users = Vec::new();
    for blob in db.read_all(DEMO_COLLECTION)? {
        let user: User = serde_json::from_str(&blob)?;
        users.push(user);
    }
    users.sort_by(|a, b| a.name.cmp(&b.name));

    for user in &users {
        writeln!(out, "{}", user)?;
    }

    db.delete_collection(DEMO_COLLECTION)?;
    info!(collection = DEMO_COLLECTION, "Dropped demo collection");
    Ok(())
}

fn cmd_seed(db: &Driver, collection: &str, out: &mut impl Write) -> Result<()> {
    let users = seed(db, collection)?;
    writeln!(
        out,
        "Wrote {} users to '{}'",
        users.len(),
        db.root().join(collection).display()
    )?;
    Ok(())
}

fn cmd_list(
    db: &Driver,
    collection: &str,
    format: OutputFormat,
    out: &mut impl Write,
) -> Result<()> {
    let blobs = db.read_all(collection)?;
    match format {
        OutputFormat::Json => {
            for blob in &blobs {
                // Records already end with a newline.
                write!(out, "{}", blob)?;
            }
        }
        OutputFormat::Brief => {
            for blob in &blobs {
                let value: serde_json::Value = serde_json::from_str(blob)?;
                writeln!(out, "{}", value)?;
            }
        }
    }
    Ok(())
}

fn cmd_get(db: &Driver, collection: &str, resource: &str, out: &mut impl Write) -> Result<()> {
    let value = db.read_value(collection, resource)?;
    writeln!(out, "{}", serde_json::to_string_pretty(&value)?)?;
    Ok(())
}

fn cmd_put(
    db: &Driver,
    collection: &str,
    resource: &str,
    json: &str,
    out: &mut impl Write,
) -> Result<()> {
    let value: serde_json::Value = serde_json::from_str(json)
        .map_err(|e| format!("Invalid JSON for '{}/{}': {}", collection, resource, e))?;
    db.write(collection, resource, &value)?;
    writeln!(out, "Saved {}/{}", collection, resource)?;
    Ok(())
}

fn cmd_delete(
    db: &Driver,
    collection: &str,
    resource: Option<&str>,
    out: &mut impl Write,
) -> Result<()> {
    match resource {
        Some(resource) => {
            db.delete(collection, resource)?;
            writeln!(out, "Deleted {}/{}", collection, resource)?;
        }
        None => {
            db.delete_collection(collection)?;
            writeln!(out, "Deleted collection '{}'", collection)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn run(command: Commands, dir: &Path) -> Result<String> {
        let mut out = Vec::new();
        execute(command, dir, &mut out)?;
        Ok(String::from_utf8(out)?)
    }

    #[test]
    fn test_demo_prints_users_and_cleans_up() {
        let dir = tempdir().unwrap();

        let output = run(Commands::Demo, dir.path()).unwrap();

        let lines: Vec<_> = output.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("John (30)"));
        assert!(lines[1].starts_with("Mary (25)"));
        assert!(lines[2].starts_with("Peter (35)"));
        assert!(!dir.path().join(DEMO_COLLECTION).exists());
    }

    #[test]
    fn test_seed_then_list() {
        let dir = tempdir().unwrap();
        run(
            Commands::Seed {
                collection: "people".to_string(),
            },
            dir.path(),
        )
        .unwrap();

        assert!(dir.path().join("people/John.json").exists());

        let output = run(
            Commands::List {
                collection: "people".to_string(),
                format: OutputFormat::Brief,
            },
            dir.path(),
        )
        .unwrap();
        assert_eq!(output.lines().count(), 3);
    }

    #[test]
    fn test_put_get_delete() {
        let dir = tempdir().unwrap();

        run(
            Commands::Put {
                collection: "notes".to_string(),
                resource: "first".to_string(),
                json: r#"{"text": "hello"}"#.to_string(),
            },
            dir.path(),
        )
        .unwrap();

        let output = run(
            Commands::Get {
                collection: "notes".to_string(),
                resource: "first".to_string(),
            },
            dir.path(),
        )
        .unwrap();
        assert!(output.contains("\"text\": \"hello\""));

        run(
            Commands::Delete {
                collection: "notes".to_string(),
                resource: Some("first".to_string()),
            },
            dir.path(),
        )
        .unwrap();
        assert!(!dir.path().join("notes/first.json").exists());
        assert!(dir.path().join("notes").exists());
    }

    #[test]
    fn test_put_rejects_invalid_json() {
        let dir = tempdir().unwrap();

        let result = run(
            Commands::Put {
                collection: "notes".to_string(),
                resource: "bad".to_string(),
                json: "{oops".to_string(),
            },
            dir.path(),
        );

        assert!(result.is_err());
        assert!(!dir.path().join("notes").exists());
    }

    #[test]
    fn test_list_missing_collection_fails() {
        let dir = tempdir().unwrap();

        let result = run(
            Commands::List {
                collection: "ghosts".to_string(),
                format: OutputFormat::Json,
            },
            dir.path(),
        );

        assert!(result.is_err());
    }
}
