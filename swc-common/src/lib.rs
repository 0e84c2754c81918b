//! # SWC Common Library
//!
//! Shared code for the SWC fantasy football services:
//! - Database bootstrap, entity models and read queries
//! - Filter and pagination predicates shared by every list endpoint
//! - Configuration resolution
//! - Common error type

pub mod config;
pub mod db;
pub mod error;

pub use error::{Error, Result};
