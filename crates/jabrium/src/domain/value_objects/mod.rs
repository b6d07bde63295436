//! Value Objects
//!
//! Immutable objects defined by their attributes rather than identity.

mod addressing_mode;

pub use addressing_mode::*;
