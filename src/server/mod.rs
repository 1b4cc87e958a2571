//! Server module: configuration, loading, and the run loop.

mod config;
mod init;
mod loader;

pub use config::{AppConfig, ServerConfig};
pub use init::run;
pub use loader::load_config;
