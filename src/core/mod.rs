//! Core business logic modules.

pub mod classifier;
pub mod executor;
pub mod linker;
pub mod mapping_store;
pub mod planner;
pub mod related;
pub mod rollback;
pub mod scanner;
