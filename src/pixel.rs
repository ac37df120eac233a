use bytemuck::{Pod, Zeroable};

use crate::grid::Grid;

/// [`bytemuck`]-compatible 8-bit RGBA colour.
#[repr(C)]
#[derive(Pod, Zeroable, Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const BLACK: Self = Rgba {
        r: 0,
        g: 0,
        b: 0,
        a: 255,
    };

    pub fn opaque(r: u8, g: u8, b: u8) -> Self {
        Rgba { r, g, b, a: 255 }
    }
}

/// A rendered image: one colour per grid cell.
pub type Image = Grid<Rgba>;

/// The image's pixels as raw bytes, `r g b a` per cell in row-major order.
pub fn as_bytes(image: &Image) -> &[u8] {
    bytemuck::cast_slice(image.as_slice())
}
