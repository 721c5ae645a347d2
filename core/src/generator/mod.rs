use alloc::collections::BTreeSet;

use crate::*;
pub use random::*;
pub use sequence::*;

mod random;
mod sequence;

/// Consecutive rejected draws tolerated for one placement before switching to direct selection.
const MAX_REJECTIONS: u32 = 256;

/// Uniform source of `[0, 1)` floats driving every random choice of the generator.
pub trait RandomSource {
    fn next_unit(&mut self) -> f64;

    /// Uniform integer in `0..bound`, `bound` must be non-zero.
    fn below(&mut self, bound: usize) -> usize {
        let value = (self.next_unit() * bound as f64) as usize;
        value.min(bound.saturating_sub(1))
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn next_unit(&mut self) -> f64 {
        (**self).next_unit()
    }

    fn below(&mut self, bound: usize) -> usize {
        (**self).below(bound)
    }
}

pub trait BoardGenerator {
    fn generate(self, config: BoardConfig) -> Board;
}

impl<R: RandomSource + ?Sized> BoardGenerator for &mut R {
    fn generate(self, config: BoardConfig) -> Board {
        generate(self, config)
    }
}

/// Validates `size` and `differences`, then generates a fresh board.
pub fn generate_board<R: RandomSource + ?Sized>(
    size: Coord,
    differences: CellCount,
    source: &mut R,
) -> Result<Board> {
    let config = BoardConfig::new(size, differences)?;
    Ok(generate(source, config))
}

/// Generates a board for an already validated `config`.
///
/// Difference coordinates are rejection-sampled until `config.differences` distinct ones are
/// collected. Cells are then colored in row-major order: the left color is drawn freely, the
/// right cell copies it unless it is a difference, where it is redrawn until it differs.
pub fn generate<R: RandomSource + ?Sized>(source: &mut R, config: BoardConfig) -> Board {
    let size = config.size;
    let differences = place_differences(source, config);

    let mut left = Grid::from_elem(size, Color::default());
    let mut right = left.clone();
    for coords in iter_coords(size) {
        let color = draw_color(source);
        left[coords] = color;
        right[coords] = if differences.contains(&coords) {
            draw_color_except(source, color)
        } else {
            color
        };
    }

    log::debug!(
        "Generated {}x{} board with differences at {:?}",
        size,
        size,
        differences
    );
    Board::from_parts(left, right, differences)
}

fn place_differences<R: RandomSource + ?Sized>(
    source: &mut R,
    config: BoardConfig,
) -> BTreeSet<Coord2> {
    let size = config.size;
    let target = usize::from(config.differences.min(config.total_cells()));
    if usize::from(config.differences) > target {
        log::warn!(
            "Board already full, requested {} differences but only fits {}",
            config.differences,
            target
        );
    }

    let mut differences = BTreeSet::new();
    let mut rejected = 0;
    let mut total_rejected = 0;
    while differences.len() < target {
        let coords = (draw_axis(source, size), draw_axis(source, size));
        if differences.insert(coords) {
            rejected = 0;
            continue;
        }
        rejected += 1;
        total_rejected += 1;
        if rejected >= MAX_REJECTIONS {
            log::warn!("Too many duplicate draws, picking remaining differences directly");
            place_remaining(source, size, target, &mut differences);
            break;
        }
    }
    log::trace!("Placed {} differences, {} draws rejected", target, total_rejected);
    differences
}

/// Picks the n-th free coordinate for every missing difference.
fn place_remaining<R: RandomSource + ?Sized>(
    source: &mut R,
    size: Coord,
    target: usize,
    differences: &mut BTreeSet<Coord2>,
) {
    while differences.len() < target {
        let free = usize::from(mult(size, size)) - differences.len();
        let place = source.below(free);
        let next = iter_coords(size)
            .filter(|coords| !differences.contains(coords))
            .nth(place);
        match next {
            Some(coords) => {
                differences.insert(coords);
            }
            None => break,
        }
    }
}

fn draw_axis<R: RandomSource + ?Sized>(source: &mut R, size: Coord) -> Coord {
    // `below` is in `0..size`
    source.below(usize::from(size)) as Coord
}

fn draw_color<R: RandomSource + ?Sized>(source: &mut R) -> Color {
    Color::from_index(source.below(Color::COUNT))
}

fn draw_color_except<R: RandomSource + ?Sized>(source: &mut R, avoid: Color) -> Color {
    for _ in 0..MAX_REJECTIONS {
        let color = draw_color(source);
        if color != avoid {
            return color;
        }
    }
    log::warn!("Too many equal color draws, shifting through the palette");
    let offset = 1 + source.below(Color::COUNT - 1);
    let avoid_index = Color::ALL.iter().position(|&c| c == avoid).unwrap_or(0);
    Color::from_index(avoid_index + offset)
}
