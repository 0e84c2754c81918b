//! Database bootstrap, models and queries

pub mod filters;
pub mod init;
pub mod models;
pub mod queries;

pub use filters::*;
pub use init::*;
pub use models::*;
pub use queries::*;
