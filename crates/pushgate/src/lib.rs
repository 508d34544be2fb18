//! Top-level facade crate for pushgate.
//!
//! Re-exports core types and the gateway library so users can depend on a single crate.

pub mod core {
    pub use pushgate_core::*;
}

pub mod gateway {
    pub use pushgate_gateway::*;
}
