// Library surface for headless/integration tests and reuse.
// Keep this lean to avoid coupling to bin-only types in main.rs.
pub mod app_dirs;
pub mod capability;
pub mod config;
pub mod context;
pub mod error;
pub mod logging;
pub mod questions;
pub mod room;
pub mod runtime;
pub mod scoring;
pub mod sequencer;
pub mod session;
pub mod setup;
pub mod timer;
pub mod util;

pub use context::{Route, SessionContext};
pub use error::{CapabilityError, InterviewError, ScriptError};
pub use room::Room;
pub use session::{SessionConfig, SessionResult};
