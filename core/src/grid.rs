use alloc::collections::BTreeSet;
use alloc::vec::Vec;
use core::ops::{Index, IndexMut};
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Square grid of colors addressed by row-major linear index.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "GridRepr")]
pub struct Grid {
    cells: Array2<Color>,
}

#[derive(Deserialize)]
struct GridRepr {
    cells: Array2<Color>,
}

impl TryFrom<GridRepr> for Grid {
    type Error = GameError;

    fn try_from(GridRepr { cells }: GridRepr) -> Result<Self> {
        let (rows, cols) = cells.dim();
        if rows != cols || rows > usize::from(Coord::MAX) || !cells.is_standard_layout() {
            return Err(GameError::InvalidGridShape);
        }
        Ok(Self { cells })
    }
}

impl Grid {
    pub fn from_elem(size: Coord, color: Color) -> Self {
        Self {
            cells: Array2::from_elem((size, size).to_nd_index(), color),
        }
    }

    /// Builds a grid from `size * size` colors listed in row-major order.
    pub fn from_colors(size: Coord, colors: Vec<Color>) -> Result<Self> {
        let cells = Array2::from_shape_vec((size, size).to_nd_index(), colors)
            .map_err(|_| GameError::InvalidGridShape)?;
        Ok(Self { cells })
    }

    pub fn size(&self) -> Coord {
        // shape is always built from a `Coord`
        self.cells.nrows() as Coord
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn as_slice(&self) -> &[Color] {
        self.cells.as_slice().expect("layout should be standard")
    }

    pub fn iter(&self) -> impl Iterator<Item = Color> + '_ {
        self.as_slice().iter().copied()
    }

    pub fn color_at(&self, index: CellIndex) -> Option<Color> {
        self.as_slice().get(usize::from(index)).copied()
    }

    /// Linear indices where `self` and `other` hold different colors.
    pub fn diff_indices(&self, other: &Grid) -> BTreeSet<CellIndex> {
        self.iter()
            .zip(other.iter())
            .enumerate()
            .filter(|(_, (a, b))| a != b)
            .map(|(index, _)| index as CellIndex)
            .collect()
    }
}

impl Index<Coord2> for Grid {
    type Output = Color;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.cells[coords.to_nd_index()]
    }
}

impl IndexMut<Coord2> for Grid {
    fn index_mut(&mut self, coords: Coord2) -> &mut Self::Output {
        &mut self.cells[coords.to_nd_index()]
    }
}
