//! CLI arguments and application configuration

mod args;
mod settings;

pub use args::{Args, Command, TestModeArg};
pub use settings::AppConfig;
