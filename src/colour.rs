//! Colouring algorithms for divergence grids.

use fnv::{FnvHashMap, FnvHashSet};
use log::trace;
use rayon::prelude::{IndexedParallelIterator, IntoParallelRefMutIterator, ParallelIterator};

use crate::grid::Grid;
use crate::pixel::{Image, Rgba};

// Nine evenly spaced stops of the magma colour map.
const MAGMA: [[u8; 3]; 9] = [
    [0, 0, 4],
    [28, 16, 68],
    [79, 18, 123],
    [129, 37, 129],
    [181, 54, 122],
    [229, 80, 100],
    [251, 135, 97],
    [254, 194, 135],
    [252, 253, 191],
];

const GRAYSCALE: [[u8; 3]; 2] = [[0, 0, 0], [255, 255, 255]];

/// A colour ramp sampled over `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Palette {
    Magma,
    Grayscale,
}

impl Palette {
    /// The ramp colour at `t`, interpolated between the nearest stops.
    /// `t` is clamped to `[0, 1]`.
    pub fn sample(self, t: f32) -> Rgba {
        let stops: &[[u8; 3]] = match self {
            Self::Magma => &MAGMA,
            Self::Grayscale => &GRAYSCALE,
        };
        let scaled = t.clamp(0.0, 1.0) * (stops.len() - 1) as f32;
        let low = scaled.floor() as usize;
        let high = (low + 1).min(stops.len() - 1);
        let frac = scaled - low as f32;
        let channel =
            |a: u8, b: u8| (f32::from(a) + (f32::from(b) - f32::from(a)) * frac).round() as u8;
        Rgba::opaque(
            channel(stops[low][0], stops[high][0]),
            channel(stops[low][1], stops[high][1]),
            channel(stops[low][2], stops[high][2]),
        )
    }
}

/// How divergence times are spread over the palette.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColourScheme {
    /// Scale linearly between the grid's smallest and largest value.
    Linear,
    /// Rank values by how much of the grid lies below them
    /// ([Wikipedia](https://en.wikipedia.org/wiki/Plotting_algorithms_for_the_Mandelbrot_set#Histogram_coloring)).
    Histogram,
}

/// Map every cell of `grid` to a palette colour.
///
/// Both schemes send the grid's smallest value to the dark end of the ramp,
/// so pixels that never diverged and pixels that diverged immediately come
/// out equally dark.
pub fn render(grid: &Grid<u32>, scheme: ColourScheme, palette: Palette) -> Image {
    trace!("begin render");

    let mut image = Image::fill(grid.size(), Rgba::BLACK);
    if !grid.as_slice().is_empty() {
        match scheme {
            ColourScheme::Linear => linear_pass(grid, palette, &mut image),
            ColourScheme::Histogram => histogram_pass(grid, palette, &mut image),
        }
    }

    trace!("end render");
    image
}

fn linear_pass(grid: &Grid<u32>, palette: Palette, image: &mut Image) {
    let cells = grid.as_slice();

    let mut low = u32::MAX;
    let mut high = 0;
    for &value in cells {
        low = low.min(value);
        high = high.max(value);
    }
    let span = (high - low) as f32;

    image
        .as_mut_slice()
        .par_iter_mut()
        .enumerate()
        .for_each(|(index, out)| {
            let t = if span > 0.0 {
                (cells[index] - low) as f32 / span
            } else {
                0.0
            };
            *out = palette.sample(t);
        });
}

fn histogram_pass(grid: &Grid<u32>, palette: Palette, image: &mut Image) {
    let cells = grid.as_slice();

    let mut bucket_labels: Vec<u32> = Vec::new();
    let mut histogram: FnvHashMap<u32, u32> = FnvHashMap::default();
    for &value in cells {
        let count = histogram.entry(value).or_insert_with(|| {
            bucket_labels.push(value);
            0
        });
        *count += 1;
    }

    debug_assert_eq!(
        cells.len(),
        histogram.values().map(|count| *count as usize).sum()
    );
    debug_assert!(
        bucket_labels.len()
            == bucket_labels
                .iter()
                .copied()
                .collect::<FnvHashSet<u32>>()
                .len(),
        "bucket_labels contains duplicates: {:?}",
        bucket_labels
    );
    bucket_labels.sort();

    let mut acc = 0;
    let total_samples = cells.len() as f32;
    let mut histogram_ranges: FnvHashMap<u32, f32> = FnvHashMap::default();
    for bucket_label in &bucket_labels {
        histogram_ranges.insert(*bucket_label, acc as f32 / total_samples);
        acc += histogram.get(bucket_label).unwrap();
    }

    image
        .as_mut_slice()
        .par_iter_mut()
        .enumerate()
        .for_each(|(index, out)| {
            let t = histogram_ranges
                .get(&cells[index])
                .copied()
                .unwrap_or_else(|| panic!("{} was not in histogram_ranges", cells[index]));
            *out = palette.sample(t);
        });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Size;

    #[test]
    fn palette_endpoints_hit_the_outer_stops() {
        assert_eq!(Palette::Magma.sample(0.0), Rgba::opaque(0, 0, 4));
        assert_eq!(Palette::Magma.sample(1.0), Rgba::opaque(252, 253, 191));
        assert_eq!(Palette::Grayscale.sample(0.0), Rgba::BLACK);
        assert_eq!(Palette::Grayscale.sample(1.0), Rgba::opaque(255, 255, 255));
    }

    #[test]
    fn palette_clamps_out_of_range_positions() {
        assert_eq!(Palette::Magma.sample(-1.0), Palette::Magma.sample(0.0));
        assert_eq!(Palette::Magma.sample(2.0), Palette::Magma.sample(1.0));
    }

    #[test]
    fn grayscale_interpolates_between_stops() {
        assert_eq!(Palette::Grayscale.sample(0.5), Rgba::opaque(128, 128, 128));
    }

    fn row_grid(values: &[u32]) -> Grid<u32> {
        let mut grid = Grid::fill(Size::new(values.len() as u32, 1), 0u32);
        grid.as_mut_slice().copy_from_slice(values);
        grid
    }

    #[test]
    fn linear_scheme_spans_the_observed_value_range() {
        let image = render(
            &row_grid(&[0, 5, 10]),
            ColourScheme::Linear,
            Palette::Grayscale,
        );
        assert_eq!(
            image.as_slice(),
            &[
                Rgba::BLACK,
                Rgba::opaque(128, 128, 128),
                Rgba::opaque(255, 255, 255),
            ]
        );
    }

    #[test]
    fn flat_grid_renders_uniformly_dark() {
        for scheme in [ColourScheme::Linear, ColourScheme::Histogram] {
            let image = render(&row_grid(&[7, 7, 7, 7]), scheme, Palette::Magma);
            assert!(image
                .as_slice()
                .iter()
                .all(|&colour| colour == Palette::Magma.sample(0.0)));
        }
    }

    #[test]
    fn histogram_scheme_colours_by_rank_not_magnitude() {
        // Buckets: 0 holds half the cells, 9 and 100 a quarter each, so the
        // positions are 0, 0.5 and 0.75 regardless of the values' spread.
        let image = render(
            &row_grid(&[0, 0, 9, 100]),
            ColourScheme::Histogram,
            Palette::Grayscale,
        );
        assert_eq!(
            image.as_slice(),
            &[
                Rgba::BLACK,
                Rgba::BLACK,
                Rgba::opaque(128, 128, 128),
                Rgba::opaque(191, 191, 191),
            ]
        );
    }

    #[test]
    fn renders_the_empty_grid() {
        let image = render(
            &Grid::fill(Size::new(0, 0), 0u32),
            ColourScheme::Histogram,
            Palette::Magma,
        );
        assert!(image.as_slice().is_empty());
    }
}
