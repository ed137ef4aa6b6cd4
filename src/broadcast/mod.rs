//! Broadcaster configuration handoff and process supervision

mod credentials;
mod supervisor;
mod writer;

pub use credentials::Credentials;
pub use supervisor::{ProcessSupervisor, SupervisorState};
pub use writer::{ConfigWriter, FACEBOOK_INGEST_URL, YOUTUBE_INGEST_URL};
