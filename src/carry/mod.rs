//! Cooperative carrying.
//!
//! Units that find an idle carryable ask to join its [`CarrierCoordinator`].
//! Once enough of them hold on, the coordinator takes the load away from
//! physics and walks it to the delivery point chosen when the first unit
//! joined. Every carrier trails its own slot around the load.

mod components;
mod coordinator;
mod plugin;
mod systems;

pub use components::*;
pub use coordinator::*;
pub use plugin::CarryPlugin;
