//! Bearer token models issued by the carrier's client-credentials exchange.

pub mod secret;
pub mod token;

pub use secret::*;
pub use token::*;
