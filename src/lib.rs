pub mod error;
pub mod geometry;
pub mod grammar;
pub mod math;
pub mod scene;
pub mod tessellation;
pub mod turtle;

pub use error::{ArborError, Result};
