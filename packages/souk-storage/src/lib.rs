pub mod catalogues;
pub mod db;
pub mod lines;
pub mod models;
pub mod plan;
pub mod schema;

mod error;

pub use error::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;
