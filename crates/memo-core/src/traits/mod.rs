//! Traits implemented by backend gateways.

mod gateway;

pub use gateway::Gateway;
