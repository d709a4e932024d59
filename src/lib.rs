//! Herald
//!
//! Command registration, resolution and dispatch engine for plugin hosts.
//! This crate re-exports [`herald_core`]; see its modules for details.

pub use herald_core::*;
