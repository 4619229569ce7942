//! Name and text generators.

pub mod folder;
pub mod tree;
