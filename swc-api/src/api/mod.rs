//! HTTP API handlers for swc-api

pub mod counts;
pub mod health;
pub mod leagues;
pub mod performances;
pub mod players;
pub mod teams;
pub mod weeks;
