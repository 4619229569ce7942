//! External service clients.

pub mod deepseek;
