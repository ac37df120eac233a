use std::ops::Index;

/// Dimensions of an output grid, in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Total number of cells.
    pub fn len(&self) -> usize {
        self.width as usize * self.height as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Owned height×width storage, row-major. Never resized after construction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid<T> {
    size: Size,
    cells: Vec<T>,
}

impl<T: Clone> Grid<T> {
    pub fn fill(size: Size, value: T) -> Self {
        Self {
            size,
            cells: vec![value; size.len()],
        }
    }
}

impl<T> Grid<T> {
    pub fn size(&self) -> Size {
        self.size
    }

    pub fn width(&self) -> u32 {
        self.size.width
    }

    pub fn height(&self) -> u32 {
        self.size.height
    }

    pub fn get(&self, row: usize, col: usize) -> &T {
        &self.cells[row * self.size.width as usize + col]
    }

    /// The cells in row-major order.
    pub fn as_slice(&self) -> &[T] {
        &self.cells
    }

    pub(crate) fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.cells
    }

    /// Iterator over rows, each a slice of `width` cells. A grid with no
    /// cells has no rows.
    pub fn rows(&self) -> impl Iterator<Item = &[T]> {
        self.cells.chunks_exact((self.size.width as usize).max(1))
    }
}

impl<T> Index<(usize, usize)> for Grid<T> {
    type Output = T;

    /// Indexed by `(row, col)`.
    fn index(&self, (row, col): (usize, usize)) -> &T {
        self.get(row, col)
    }
}
