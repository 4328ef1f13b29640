//! jsondrop command-line library.
//!
//! Argument parsing lives in [`cli`]; [`commands`] runs each subcommand
//! against a [`jsondrop_store::Driver`].

pub mod cli;
pub mod commands;
