//! Domain types shared by the gallery crates.
//!
//! Pure logic only: no database or network access lives here.

pub mod artist_application;
pub mod error;
pub mod types;
