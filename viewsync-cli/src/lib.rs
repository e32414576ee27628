pub mod client;
pub mod config;
pub mod daemon;
pub mod protocol;

pub use config::ServerConfig;
pub use daemon::ServerState;
