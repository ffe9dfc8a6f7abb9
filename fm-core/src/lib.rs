pub mod assets;
pub mod auth;
pub mod catalog;
pub mod config;
pub mod distribution;
pub mod routes;
pub mod session;
pub mod wizard;

pub use fm_common::{Genre, TrackId};
