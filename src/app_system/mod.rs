//! System orchestration, startup, and shutdown logic.

pub mod rewards_system;
pub mod tracing;

pub use rewards_system::*;
pub use self::tracing::*;
