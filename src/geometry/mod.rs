pub mod curve;

pub use curve::{CatmullRom, Circle, Curve, Frame};
