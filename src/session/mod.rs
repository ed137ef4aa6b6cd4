//! Streaming session state: timer and orchestration

mod controller;
mod timer;

pub use controller::{StreamController, TestMode};
pub use timer::{format_elapsed, SessionTimer};
