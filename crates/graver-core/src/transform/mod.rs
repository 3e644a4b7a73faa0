//! Pixel transforms applied before resizing: orientation and alpha flattening.
//!
//! # Transform Order
//!
//! `normalize` applies these in a fixed order:
//! 1. Orientation correction (may swap width and height)
//! 2. Alpha flattening onto the background colour
//!
//! Both consume their input so the previous buffer is released as soon as
//! the next one exists.

mod flatten;
mod orientation;

pub use flatten::{flatten_alpha, Background};
pub use orientation::apply_orientation;
