pub mod config;
pub mod session;

pub use config::ConsoleConfig;
pub use session::SessionContext;
