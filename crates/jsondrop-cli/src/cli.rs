//! Command-line interface definition using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// jsondrop - a file-per-record JSON document store
#[derive(Parser, Debug)]
#[command(name = "jsondrop")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Store root directory
    #[arg(short, long, env = "JSONDROP_DIR", default_value = "./", global = true)]
    pub dir: PathBuf,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, Default, PartialEq, Eq)]
pub enum Commands {
    /// Seed the sample users, print them, then drop the collection
    #[default]
    Demo,

    /// Write the sample users into a collection
    Seed {
        /// Target collection
        #[arg(short, long, default_value = "users")]
        collection: String,
    },

    /// Print every record in a collection
    List {
        /// Collection name
        #[arg(required = true)]
        collection: String,

        /// Output format (json, brief)
        #[arg(short, long, default_value = "json")]
        format: OutputFormat,
    },

    /// Print one record
    Get {
        /// Collection name
        #[arg(required = true)]
        collection: String,

        /// Resource name, with or without the .json extension
        #[arg(required = true)]
        resource: String,
    },

    /// Store a JSON document
    Put {
        /// Collection name
        #[arg(required = true)]
        collection: String,

        /// Resource name
        #[arg(required = true)]
        resource: String,

        /// Document body as JSON text
        #[arg(required = true)]
        json: String,
    },

    /// Delete a record, or the whole collection when no resource is given
    Delete {
        /// Collection name
        #[arg(required = true)]
        collection: String,

        /// Resource name
        resource: Option<String>,
    },
}

/// Output format for list commands
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Records as stored
    #[default]
    Json,
    /// One compact line per record
    Brief,
}

impl Cli {
    /// Returns the subscriber log level based on verbosity.
    pub fn log_level(&self) -> tracing::Level {
        match self.verbose {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_parse_no_args() {
        let cli = Cli::parse_from(["jsondrop"]);
        assert!(cli.command.is_none());
        assert_eq!(cli.command.unwrap_or_default(), Commands::Demo);
    }

    #[test]
    fn test_cli_parse_list() {
        let cli = Cli::parse_from(["jsondrop", "list", "users", "--format", "brief"]);
        match cli.command {
            Some(Commands::List { collection, format }) => {
                assert_eq!(collection, "users");
                assert_eq!(format, OutputFormat::Brief);
            }
            _ => panic!("Expected List command"),
        }
    }

    #[test]
    fn test_cli_parse_delete_collection() {
        let cli = Cli::parse_from(["jsondrop", "delete", "users"]);
        match cli.command {
            Some(Commands::Delete {
                collection,
                resource,
            }) => {
                assert_eq!(collection, "users");
                assert!(resource.is_none());
            }
            _ => panic!("Expected Delete command"),
        }
    }

    #[test]
    fn test_cli_dir_flag() {
        let cli = Cli::parse_from(["jsondrop", "--dir", "/tmp/db", "seed"]);
        assert_eq!(cli.dir, PathBuf::from("/tmp/db"));
        assert_eq!(
            cli.command,
            Some(Commands::Seed {
                collection: "users".to_string()
            })
        );
    }

    #[test]
    fn test_cli_verbose() {
        let cli = Cli::parse_from(["jsondrop", "-vvv"]);
        assert_eq!(cli.verbose, 3);
        assert_eq!(cli.log_level(), tracing::Level::TRACE);
    }

    #[test]
    fn test_cli_help() {
        Cli::command().debug_assert();
    }
}
