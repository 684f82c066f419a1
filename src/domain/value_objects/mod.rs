//! Domain Value Objects
//!
//! Immutable value types that represent domain concepts.

mod hash;
mod style;

pub use hash::ContentHash;
pub use style::{InvalidStyle, Style};
