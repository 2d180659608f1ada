//! CMPP core: protocol constants, version descriptor, packet error type and
//! the [`Packer`] capability every packet kind implements.
//!
//! This module has no async or socket dependencies.

mod constants;
mod error;
mod traits;
mod version;

pub use constants::*;
pub use error::*;
pub use traits::*;
pub use version::*;
