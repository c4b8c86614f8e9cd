pub mod artist_application;
pub mod artist_profile;
pub mod user;
