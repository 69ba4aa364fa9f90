pub mod config;
pub mod logging;

pub mod archive_file;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod fingerprint;
pub mod progress;
pub mod provision;
pub mod revision;
