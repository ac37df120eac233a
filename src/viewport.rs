//! Mapping between the output grid and the complex plane.

use crate::grid::Size;

/// Half-extent of the view on the real axis at zoom 1: the default viewport
/// spans 3 units of the real axis regardless of image dimensions.
const HALF_WIDTH: f64 = 1.5;

/// A rectangular view onto the complex plane, described by its centre and a
/// zoom factor. Doubling `zoom` halves the extent of the view in both axes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub center_x: f64,
    pub center_y: f64,
    pub zoom: f64,
}

impl Viewport {
    pub fn new(center_x: f64, center_y: f64, zoom: f64) -> Self {
        Self {
            center_x,
            center_y,
            zoom,
        }
    }

    /// Plane bounds for an image of the given dimensions. The vertical
    /// half-extent scales with `height/width` so that pixels stay square.
    pub fn bounds(&self, size: Size) -> Bounds {
        let x_half = HALF_WIDTH / self.zoom;
        let y_half = HALF_WIDTH * (size.height as f64 / size.width as f64) / self.zoom;
        Bounds {
            x_from: self.center_x - x_half,
            x_to: self.center_x + x_half,
            y_from: self.center_y - y_half,
            y_to: self.center_y + y_half,
        }
    }
}

impl Default for Viewport {
    /// The classic whole-set view, centred on `-0.5 + 0i` at zoom 1.
    fn default() -> Self {
        Self::new(-0.5, 0.0, 1.0)
    }
}

/// Rectangular bounds on the complex plane. Derived from a [`Viewport`] per
/// call, never stored. For any positive zoom, `x_to > x_from` and
/// `y_to > y_from`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub x_from: f64,
    pub x_to: f64,
    pub y_from: f64,
    pub y_to: f64,
}

impl Bounds {
    /// Real coordinate of column `col` out of `width` evenly spaced samples,
    /// inclusive of both endpoints.
    pub fn sample_x(&self, col: u32, width: u32) -> f64 {
        lerp_sample(self.x_from, self.x_to, col, width)
    }

    /// Imaginary coordinate of row `row` out of `height` evenly spaced
    /// samples, inclusive of both endpoints.
    pub fn sample_y(&self, row: u32, height: u32) -> f64 {
        lerp_sample(self.y_from, self.y_to, row, height)
    }
}

// linspace semantics: n samples including both ends; a single-sample axis
// collapses to the start point.
fn lerp_sample(from: f64, to: f64, i: u32, n: u32) -> f64 {
    if n <= 1 {
        return from;
    }
    from + (to - from) * (i as f64 / (n - 1) as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_the_reference_view() {
        let viewport = Viewport::default();
        assert_eq!(viewport.center_x, -0.5);
        assert_eq!(viewport.center_y, 0.0);
        assert_eq!(viewport.zoom, 1.0);
    }

    #[test]
    fn square_image_bounds_at_zoom_one() {
        let bounds = Viewport::default().bounds(Size::new(100, 100));
        assert_eq!(bounds.x_from, -2.0);
        assert_eq!(bounds.x_to, 1.0);
        assert_eq!(bounds.y_from, -1.5);
        assert_eq!(bounds.y_to, 1.5);
    }

    #[test]
    fn zoom_shrinks_both_extents() {
        let size = Size::new(100, 100);
        let far = Viewport::new(-0.5, 0.0, 1.0).bounds(size);
        let near = Viewport::new(-0.5, 0.0, 2.0).bounds(size);
        assert_eq!(near.x_to - near.x_from, (far.x_to - far.x_from) / 2.0);
        assert_eq!(near.y_to - near.y_from, (far.y_to - far.y_from) / 2.0);
        // Zooming keeps the centre fixed.
        assert_eq!(near.x_from + near.x_to, far.x_from + far.x_to);
    }

    #[test]
    fn horizontal_span_is_independent_of_height() {
        let viewport = Viewport::new(0.25, -1.0, 3.0);
        let tall = viewport.bounds(Size::new(100, 200));
        let square = viewport.bounds(Size::new(100, 100));
        assert_eq!(tall.x_to - tall.x_from, square.x_to - square.x_from);
        // Only the vertical span scales with the height/width ratio.
        assert_eq!(tall.y_to - tall.y_from, 2.0 * (square.y_to - square.y_from));
    }

    #[test]
    fn samples_cover_both_endpoints() {
        let bounds = Viewport::default().bounds(Size::new(4, 4));
        assert_eq!(bounds.sample_x(0, 4), -2.0);
        assert_eq!(bounds.sample_x(3, 4), 1.0);
        assert_eq!(bounds.sample_x(1, 4), -1.0);
        assert_eq!(bounds.sample_y(0, 4), -1.5);
        assert_eq!(bounds.sample_y(3, 4), 1.5);
    }

    #[test]
    fn single_sample_axis_collapses_to_start() {
        let bounds = Viewport::new(5.0, 5.0, 1.0).bounds(Size::new(1, 1));
        assert_eq!(bounds.sample_x(0, 1), 3.5);
        assert_eq!(bounds.sample_y(0, 1), 3.5);
    }
}
