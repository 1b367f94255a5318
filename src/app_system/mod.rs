//! System orchestration, configuration, startup, and shutdown logic.

pub mod cart_system;
pub mod settings;
pub mod telemetry;

pub use cart_system::*;
pub use settings::*;
pub use telemetry::*;
