//! Shared utilities: logging, console output and test support

pub mod logging;
pub mod test;
