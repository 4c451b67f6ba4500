use ndarray::Array2;

/// Single coordinate axis used for board width, height, and positions.
pub type Coord = u8;

/// Count type used for mine counts and total-cell counts.
pub type CellCount = u16;

/// Two-dimensional coordinates `(x, y)`, `(0, 0)` being the top-left cell.
pub type Coord2 = (Coord, Coord);

/// Index into the `[x, y]` grids used for mines, cells and glyphs.
pub trait ToNdIndex {
    fn to_nd_index(self) -> [usize; 2];
}

impl ToNdIndex for Coord2 {
    fn to_nd_index(self) -> [usize; 2] {
        [usize::from(self.0), usize::from(self.1)]
    }
}

/// Number of cells on a board of the given size, never overflows since both sides fit in a `Coord`.
pub const fn area((size_x, size_y): Coord2) -> CellCount {
    size_x as CellCount * size_y as CellCount
}

pub const fn in_bounds((x, y): Coord2, (size_x, size_y): Coord2) -> bool {
    x < size_x && y < size_y
}

/// Flattened position of `coords`, column by column: `x * size_y + y`.
pub const fn flat_index((x, y): Coord2, (_, size_y): Coord2) -> CellCount {
    x as CellCount * size_y as CellCount + y as CellCount
}

/// Inverse of [`flat_index`].
pub const fn from_flat_index(index: CellCount, (_, size_y): Coord2) -> Coord2 {
    let size_y = size_y as CellCount;
    ((index / size_y) as Coord, (index % size_y) as Coord)
}

pub trait NeighborIterExt {
    fn iter_neighbors(&self, index: Coord2) -> NeighborIter;
}

impl<T> NeighborIterExt for Array2<T> {
    fn iter_neighbors(&self, index: Coord2) -> NeighborIter {
        let (dim_x, dim_y) = self.dim();
        // dimensions always come from a `Coord2`, so they fit
        NeighborIter::new(index, (dim_x as Coord, dim_y as Coord))
    }
}

/// The 8 compass offsets around a cell.
const DISPLACEMENTS: [(i8, i8); 8] = [
    (1, 1),
    (1, 0),
    (1, -1),
    (0, 1),
    (0, -1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
];

/// Applies `delta` to `coords`, returning a value only when it remains in bounds.
fn apply_delta(coords: Coord2, delta: (i8, i8), bounds: Coord2) -> Option<Coord2> {
    let next = (
        coords.0.checked_add_signed(delta.0)?,
        coords.1.checked_add_signed(delta.1)?,
    );
    in_bounds(next, bounds).then_some(next)
}

/// In-bounds neighbors of a cell, at most 8.
#[derive(Debug, Clone)]
pub struct NeighborIter {
    center: Coord2,
    bounds: Coord2,
    index: u8,
}

impl NeighborIter {
    pub fn new(center: Coord2, bounds: Coord2) -> Self {
        Self {
            center,
            bounds,
            index: 0,
        }
    }
}

impl Iterator for NeighborIter {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(&delta) = DISPLACEMENTS.get(usize::from(self.index)) {
            self.index += 1;
            if let Some(next_item) = apply_delta(self.center, delta, self.bounds) {
                return Some(next_item);
            }
        }
        None
    }
}
