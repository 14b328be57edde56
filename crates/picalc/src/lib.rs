//! PiCalc-rs library: application logic behind the `picalc` binary.

pub mod app;
pub mod config;
pub mod errors;
pub mod version;
