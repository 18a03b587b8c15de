//! The 2-legged OAuth core: configuration, JWT bearer assertions, and the
//! cached-token lifecycle.

pub mod assertion;
pub mod authenticator;
pub mod config;
pub mod token;

pub use authenticator::*;
pub use config::*;
pub use token::*;
