//! Escape-time rendering of the Mandelbrot set.
//!
//! [`compute`] turns a [`Viewport`] and an image [`Size`] into a grid of
//! per-pixel divergence times. [`colour::render`] maps that grid onto a
//! colour ramp, and [`term::present`] draws the result in the terminal.

pub mod colour;
pub mod escape;
pub mod grid;
pub mod pixel;
pub mod term;
pub mod viewport;

pub use colour::{render, ColourScheme, Palette};
pub use escape::{compute, ParameterError, DEFAULT_MAX_ITERATIONS, ESCAPE_RADIUS};
pub use grid::{Grid, Size};
pub use pixel::{Image, Rgba};
pub use viewport::Viewport;
