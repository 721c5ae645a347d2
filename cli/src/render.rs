use spotdiff_core as game;
use std::io::{self, Write};

use game::{CellMark, Color, PlayEngine, RevealState};

const GAP: &str = "    ";

#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) enum Style {
    Ansi,
    Plain,
}

fn letter(color: Color) -> char {
    use Color::*;
    match color {
        White => 'W',
        Red => 'R',
        Green => 'G',
        Blue => 'B',
        Orange => 'O',
        Yellow => 'Y',
    }
}

/// Two-character glyph drawn over a right-grid cell.
fn mark_glyph(mark: CellMark) -> Option<&'static str> {
    match mark {
        CellMark::Plain => None,
        CellMark::Selected => Some("<>"),
        CellMark::Revealed => Some("()"),
        CellMark::CorrectPick => Some("**"),
    }
}

fn write_cell(out: &mut impl Write, style: Style, color: Color, mark: CellMark) -> io::Result<()> {
    match style {
        Style::Ansi => {
            let (r, g, b) = color.rgb();
            let glyph = mark_glyph(mark).unwrap_or("  ");
            write!(out, "\x1b[48;2;{r};{g};{b}m\x1b[30m{glyph}\x1b[0m")
        }
        Style::Plain => match mark_glyph(mark) {
            Some(glyph) => write!(out, "{glyph}"),
            None => write!(out, "{} ", letter(color)),
        },
    }
}

pub(crate) fn render(engine: &PlayEngine, style: Style, out: &mut impl Write) -> io::Result<()> {
    let board = engine.board();
    let size = usize::from(board.size());
    let left = board.left().as_slice();
    let right = board.right().as_slice();

    for (y, (left_row, right_row)) in left.chunks(size).zip(right.chunks(size)).enumerate() {
        for &color in left_row {
            write_cell(out, style, color, CellMark::Plain)?;
        }
        write!(out, "{GAP}")?;
        for (x, &color) in right_row.iter().enumerate() {
            // bounded by `size * size`
            let index = (y * size + x) as game::CellIndex;
            write_cell(out, style, color, engine.mark_at(index))?;
        }
        writeln!(out)?;
    }
    render_status(engine, out)
}

pub(crate) fn render_status(engine: &PlayEngine, out: &mut impl Write) -> io::Result<()> {
    let size = engine.size();
    write!(
        out,
        "{size}x{size}, {} selected of {}",
        engine.selection().len(),
        engine.cap()
    )?;
    match (engine.reveal_state(), engine.score()) {
        (RevealState::Shown, Some(score)) => writeln!(
            out,
            ", revealed: {} of {} correct{}",
            score.correct,
            score.total,
            if score.is_perfect() { ", all found!" } else { "" }
        ),
        _ => writeln!(out),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game::{Board, Grid};

    fn engine() -> PlayEngine {
        let left = Grid::from_colors(2, vec![Color::Red, Color::Blue, Color::Green, Color::White])
            .unwrap();
        let mut right = left.clone();
        right[(1, 1)] = Color::Yellow;
        PlayEngine::new(Board::from_grids(left, right).unwrap())
    }

    fn plain(engine: &PlayEngine) -> String {
        let mut out = Vec::new();
        render(engine, Style::Plain, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn plain_render_lists_both_grids() {
        let text = plain(&engine());
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines[0], format!("R B {GAP}R B "));
        assert_eq!(lines[1], format!("G W {GAP}G Y "));
        assert_eq!(lines[2], "2x2, 0 selected of 1");
    }

    #[test]
    fn marks_show_after_reveal() {
        let mut engine = engine();
        engine.toggle_select(3).unwrap();
        assert!(plain(&engine).contains("G <>"));

        engine.toggle_reveal();
        let text = plain(&engine);
        assert!(text.contains("G **"));
        assert!(text.contains("revealed: 1 of 1 correct, all found!"));
    }

    #[test]
    fn ansi_render_uses_truecolor_background() {
        let mut out = Vec::new();
        render(&engine(), Style::Ansi, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("\x1b[48;2;255;0;0m"));
    }
}
