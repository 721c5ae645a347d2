/// Single coordinate axis used for the board dimension and positions.
pub type Coord = u8;

/// Count type used for difference counts and total-cell counts.
pub type CellCount = u16;

/// Row-major linear index `y * size + x`.
pub type CellIndex = u16;

/// Two-dimensional coordinates `(x, y)`.
pub type Coord2 = (Coord, Coord);

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    /// Grids are stored `[y, x]` so the flat slice follows the linear index.
    fn to_nd_index(self) -> Self::Output {
        [self.1.into(), self.0.into()]
    }
}

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

pub const fn linear_index((x, y): Coord2, size: Coord) -> CellIndex {
    (y as CellIndex) * (size as CellIndex) + (x as CellIndex)
}

/// Inverse of [`linear_index`], `size` must be non-zero.
pub const fn coords_of(index: CellIndex, size: Coord) -> Coord2 {
    let size = size as CellIndex;
    ((index % size) as Coord, (index / size) as Coord)
}

/// Iterates every coordinate of a `size * size` board in row-major order.
pub fn iter_coords(size: Coord) -> impl Iterator<Item = Coord2> {
    (0..size).flat_map(move |y| (0..size).map(move |x| (x, y)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[test]
    fn linear_index_is_row_major() {
        assert_eq!(linear_index((0, 0), 4), 0);
        assert_eq!(linear_index((3, 0), 4), 3);
        assert_eq!(linear_index((0, 1), 4), 4);
        assert_eq!(linear_index((3, 3), 4), 15);
    }

    #[test]
    fn coords_of_inverts_linear_index() {
        for coords in iter_coords(7) {
            assert_eq!(coords_of(linear_index(coords, 7), 7), coords);
        }
    }

    #[test]
    fn iter_coords_walks_rows_first() {
        let coords: Vec<_> = iter_coords(2).collect();
        assert_eq!(coords, [(0, 0), (1, 0), (0, 1), (1, 1)]);
    }

    #[test]
    fn mult_saturates() {
        assert_eq!(mult(64, 64), 4096);
        assert_eq!(mult(Coord::MAX, Coord::MAX), 65025);
    }
}
