mod plan;
mod progress;
mod queue;

// Public API of the session subsystem.
pub use crate::error::SessionError;
pub use plan::{SessionBuilder, SessionMode};
pub use progress::SessionProgress;
pub use queue::SessionQueue;
