//! Type definitions for weekgrid

mod error;
mod grid;

pub use error::*;
pub use grid::*;
