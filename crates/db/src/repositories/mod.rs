//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods.
//! Methods that take `&PgPool` run on their own connection; methods that take
//! `&mut PgConnection` are meant to run inside a caller-owned transaction.

pub mod artist_application_repo;
pub mod artist_profile_repo;
pub mod user_repo;

pub use artist_application_repo::ArtistApplicationRepo;
pub use artist_profile_repo::ArtistProfileRepo;
pub use user_repo::UserRepo;
