//! simulcast - multi-platform stream launcher
//!
//! Configures the OBS broadcaster to stream to YouTube and Facebook
//! simultaneously and supervises its process lifecycle.

pub mod audit;
pub mod broadcast;
pub mod config;
pub mod device;
pub mod error;
pub mod session;

pub use error::{Result, SimulcastError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
