//! The escape-time kernel.

use std::fmt;

use log::debug;
use num_complex::Complex64;

use crate::grid::{Grid, Size};
use crate::viewport::Viewport;

/// Iteration bound used when the caller has no reason to pick another.
pub const DEFAULT_MAX_ITERATIONS: u32 = 100;

/// Orbit magnitude beyond which divergence to infinity is guaranteed for
/// `z ← z² + c`.
pub const ESCAPE_RADIUS: f64 = 2.0;

// The hot loop compares squared magnitudes to skip the square root.
const ESCAPE_RADIUS_SQ: f64 = ESCAPE_RADIUS * ESCAPE_RADIUS;

/// Rejected input parameters. All are detected before any grid is allocated;
/// a failing call produces no partial result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterError {
    /// `width` or `height` was zero.
    InvalidDimension,
    /// `zoom` was zero, negative, or NaN.
    InvalidZoom,
    /// `max_iterations` was zero.
    InvalidIterationBound,
}

impl fmt::Display for ParameterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDimension => write!(f, "image dimensions must be positive"),
            Self::InvalidZoom => write!(f, "zoom must be greater than zero"),
            Self::InvalidIterationBound => write!(f, "iteration bound must be positive"),
        }
    }
}

impl std::error::Error for ParameterError {}

/// One still-active pixel: its cell in the output grid, its point on the
/// plane, and the current iterate.
struct Orbit {
    cell: usize,
    c: Complex64,
    z: Complex64,
}

/**
Compute the divergence-time grid for `viewport` at `size`.

Every pixel starts an orbit `z ← z² + c` at zero, where `c` is the pixel's
point on the complex plane. The returned grid holds, per pixel, the iteration
index at which `|z|` first exceeded [`ESCAPE_RADIUS`], in
`[0, max_iterations − 1]`.

Pixels whose orbit stays bounded for all `max_iterations` rounds are left at
0 and are therefore indistinguishable from pixels that diverged on the very
first round. This conflation matches the reference output; renderers that
normalise over the grid's value range place both at the dark end of the
palette, which is also where the reference puts them.

Each round only touches orbits that have not yet diverged: the still-active
orbits live in an arena that is compacted in place as orbits retire, so a
view dominated by early escapes costs far less than `pixels × bound`
updates. A retired pixel's divergence time is written exactly once and never
revisited. The loop ends early once every orbit has retired; the remaining
rounds could not change the result.

Calls with the same arguments return the same grid: there is no randomness
and no time dependence anywhere below this function.
*/
pub fn compute(
    size: Size,
    viewport: Viewport,
    max_iterations: u32,
) -> Result<Grid<u32>, ParameterError> {
    if size.width == 0 || size.height == 0 {
        return Err(ParameterError::InvalidDimension);
    }
    if !(viewport.zoom > 0.0) {
        return Err(ParameterError::InvalidZoom);
    }
    if max_iterations == 0 {
        return Err(ParameterError::InvalidIterationBound);
    }

    let bounds = viewport.bounds(size);
    debug!(
        "computing {}x{} grid over re [{}, {}], im [{}, {}], bound {}",
        size.width, size.height, bounds.x_from, bounds.x_to, bounds.y_from, bounds.y_to,
        max_iterations
    );

    let mut div_time = Grid::fill(size, 0u32);
    let mut active: Vec<Orbit> = Vec::with_capacity(size.len());
    for row in 0..size.height {
        let im = bounds.sample_y(row, size.height);
        for col in 0..size.width {
            let re = bounds.sample_x(col, size.width);
            active.push(Orbit {
                cell: row as usize * size.width as usize + col as usize,
                c: Complex64::new(re, im),
                z: Complex64::new(0.0, 0.0),
            });
        }
    }

    let cells = div_time.as_mut_slice();
    for i in 0..max_iterations {
        if active.is_empty() {
            break;
        }
        active.retain_mut(|orbit| {
            orbit.z = orbit.z * orbit.z + orbit.c;
            if orbit.z.norm_sqr() > ESCAPE_RADIUS_SQ {
                cells[orbit.cell] = i;
                false
            } else {
                true
            }
        });
    }
    debug!("{} of {} pixels never diverged", active.len(), size.len());

    Ok(div_time)
}
