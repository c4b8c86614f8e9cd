//! Staff command-line front end for the artist application workflow.
//!
//! Exposes configuration, authorisation and command handling as a library so
//! integration tests and the binary entrypoint share them.

pub mod auth;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
