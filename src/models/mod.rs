//! Data models.

pub mod config;
pub mod mapping;
pub mod plan;
pub mod progress;
pub mod series;
