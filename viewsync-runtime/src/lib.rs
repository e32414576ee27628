pub mod message;
pub mod session;

pub use message::{ComponentSnapshot, SessionConfig, SessionMessage, SessionState};
pub use session::{run_session_loop, spawn_session};
