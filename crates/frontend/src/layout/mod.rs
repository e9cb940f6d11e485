pub mod global_context;
pub mod notifications;

pub use global_context::{AppGlobalContext, NotificationKind};
pub use notifications::NotificationPanel;
