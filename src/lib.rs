//! Series Organizer Library
//!
//! Reorganizes loosely-structured TV series folders into a
//! `Series (Year)/Season NN/Series SxxEyy.ext` layout using hard links,
//! keeping a mapping record so every apply can be reverted.

pub mod cli;
pub mod core;
pub mod error;
pub mod generators;
pub mod models;
pub mod preflight;
pub mod services;
pub mod utils;

pub use error::{Error, Result};
