//! Error types for Herald
//!
//! Registration failures are reported synchronously to the registering code.
//! Authorization outcomes and handler exceptions are not errors at this level:
//! they are turned into sender-visible messages by the dispatcher.

mod constructors;
mod types;

pub use types::{
    ArgumentError, ConfigError, HeraldError, HeraldResult, PoolClosed, RegistrationError,
};
