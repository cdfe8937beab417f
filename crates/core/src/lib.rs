pub mod config;
pub mod error;
pub mod model;

pub use config::SyncConfig;
pub use error::*;
pub use model::*;
