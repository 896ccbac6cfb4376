//! Text rendering of the board
//!
//! The grid is a cache redrawn from the game state after every change; the
//! state is always authoritative.

use std::fmt;

use crate::sim::{GameState, Position};

pub const EMPTY: char = '.';
pub const HIT_MARK: char = 'X';

/// A drawn board, one glyph per cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    cells: Vec<Vec<char>>,
}

impl Grid {
    /// Draw the current state. The last hit cell is marked with `X`.
    pub fn draw(state: &GameState) -> Self {
        let board = &state.board;
        let mut cells = vec![vec![EMPTY; board.width() as usize]; board.height() as usize];

        for object in board.objects() {
            let pos = object.pos();
            if let Some(cell) = cell_mut(&mut cells, pos) {
                *cell = object.symbol();
            }
        }

        if let Some(pos) = state.last_hit {
            if let Some(cell) = cell_mut(&mut cells, pos) {
                *cell = HIT_MARK;
            }
        }

        Self { cells }
    }

    pub fn get(&self, pos: Position) -> Option<char> {
        let x = usize::try_from(pos.x).ok()?;
        let y = usize::try_from(pos.y).ok()?;
        self.cells.get(y)?.get(x).copied()
    }

    pub fn rows(&self) -> impl Iterator<Item = String> + '_ {
        self.cells.iter().map(|row| row.iter().collect())
    }
}

fn cell_mut(cells: &mut [Vec<char>], pos: Position) -> Option<&mut char> {
    let x = usize::try_from(pos.x).ok()?;
    let y = usize::try_from(pos.y).ok()?;
    cells.get_mut(y)?.get_mut(x)
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.cells {
            for cell in row {
                write!(f, "{} ", cell)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Board, Direction, GameState, LaserSource, Mirror, open};

    fn state() -> GameState {
        let mut board = Board::new(4, 3, LaserSource::new(Position::new(0, 0), Direction::Right));
        board.add_target(Position::new(2, 0));
        board.add_target(Position::new(3, 2));
        board.add_mirror(Mirror::with_angle(Position::new(1, 1), 30));
        board.add_mirror(Mirror::with_angle(Position::new(2, 2), 270));
        GameState::new(5, board)
    }

    #[test]
    fn test_draw_fresh_board() {
        let grid = Grid::draw(&state());
        let rows: Vec<String> = grid.rows().collect();
        assert_eq!(rows, vec![">.T.", "./..", "..-T"]);
    }

    #[test]
    fn test_display_spaces_cells() {
        let grid = Grid::draw(&state());
        assert_eq!(grid.to_string(), "> . T . \n. / . . \n. . - T \n");
    }

    #[test]
    fn test_hit_marks_and_destroyed_blank() {
        let mut state = state();
        open(&mut state);
        let grid = Grid::draw(&state);
        assert_eq!(grid.get(Position::new(2, 0)), Some(HIT_MARK));

        // Without the mark a destroyed target draws blank
        state.last_hit = None;
        let grid = Grid::draw(&state);
        assert_eq!(grid.get(Position::new(2, 0)), Some(' '));
        assert_eq!(grid.get(Position::new(3, 2)), Some('T'));
    }

    #[test]
    fn test_get_out_of_range() {
        let grid = Grid::draw(&state());
        assert_eq!(grid.get(Position::new(-1, 0)), None);
        assert_eq!(grid.get(Position::new(4, 0)), None);
    }
}
