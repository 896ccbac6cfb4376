//! Board setup
//!
//! Validates the requested board and scatters targets and mirrors over it by
//! rejection sampling. All randomness comes from the generator passed in, so
//! a seed fully determines the board.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::mirror::Mirror;
use super::state::{Board, Direction, GameState, LaserSource, Position};
use crate::consts::*;
use crate::error::SetupError;

/// Where the laser sits and which way it fires
pub const LASER_ORIGIN: Position = Position::new(0, 0);
pub const LASER_DIRECTION: Direction = Direction::Right;

/// Requested board size and contents, as typed by the player
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardConfig {
    pub width: i32,
    pub height: i32,
    pub targets: i32,
    pub mirrors: i32,
}

impl BoardConfig {
    pub fn new(width: i32, height: i32, targets: i32, mirrors: i32) -> Self {
        Self {
            width,
            height,
            targets,
            mirrors,
        }
    }

    /// Reject boards that are too small, empty or overfull
    pub fn validate(&self) -> Result<(), SetupError> {
        if self.width < MIN_GRID_SIDE || self.height < MIN_GRID_SIDE {
            return Err(SetupError::GridTooSmall {
                width: self.width,
                height: self.height,
            });
        }
        if self.targets < 1 {
            return Err(SetupError::NoTargets(self.targets));
        }
        if self.mirrors < 0 {
            return Err(SetupError::NegativeMirrors(self.mirrors));
        }

        // The laser cell is reserved
        let free_cells = i64::from(self.width) * i64::from(self.height) - 1;
        let objects = i64::from(self.targets) + i64::from(self.mirrors);
        if objects > free_cells {
            return Err(SetupError::TooCrowded {
                objects: self.targets.saturating_add(self.mirrors),
                width: self.width,
                height: self.height,
            });
        }

        Ok(())
    }
}

/// Build a board for `config`, drawing every placement from `rng`
pub fn generate_board<R: Rng>(config: &BoardConfig, rng: &mut R) -> Result<Board, SetupError> {
    config.validate()?;

    let mut board = Board::new(
        config.width,
        config.height,
        LaserSource::new(LASER_ORIGIN, LASER_DIRECTION),
    );

    for _ in 0..config.targets {
        let pos = random_free_cell(&board, rng);
        board.add_target(pos);
    }

    for _ in 0..config.mirrors {
        let pos = random_free_cell(&board, rng);
        let mut mirror = Mirror::new(pos);
        mirror.rotate(rng.random_range(0..ANGLE_STEPS) * ANGLE_STEP);
        board.add_mirror(mirror);
    }

    log::info!(
        "Board {}x{}: {} targets, {} mirrors",
        config.width,
        config.height,
        config.targets,
        config.mirrors
    );

    Ok(board)
}

/// Start a new game from a seed
pub fn new_game(config: &BoardConfig, seed: u64) -> Result<GameState, SetupError> {
    let mut rng = Pcg32::seed_from_u64(seed);
    let board = generate_board(config, &mut rng)?;
    log::info!("Game initialized with seed: {}", seed);
    Ok(GameState::new(seed, board))
}

/// Sample cells until an unoccupied one turns up.
///
/// `BoardConfig::validate` guarantees one exists.
fn random_free_cell<R: Rng>(board: &Board, rng: &mut R) -> Position {
    loop {
        let pos = Position::new(
            rng.random_range(0..board.width()),
            rng.random_range(0..board.height()),
        );
        if board.is_free(pos) {
            return pos;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_validate_rejects_small_grid() {
        assert_eq!(
            BoardConfig::new(2, 5, 1, 0).validate(),
            Err(SetupError::GridTooSmall {
                width: 2,
                height: 5
            })
        );
        assert!(BoardConfig::new(3, 2, 1, 0).validate().is_err());
        assert!(BoardConfig::new(3, 3, 1, 0).validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_counts() {
        assert_eq!(
            BoardConfig::new(5, 5, 0, 2).validate(),
            Err(SetupError::NoTargets(0))
        );
        assert_eq!(
            BoardConfig::new(5, 5, 1, -1).validate(),
            Err(SetupError::NegativeMirrors(-1))
        );
    }

    #[test]
    fn test_validate_rejects_overfull_board() {
        // 3x3 leaves 8 cells beside the laser
        assert!(BoardConfig::new(3, 3, 4, 4).validate().is_ok());
        assert!(matches!(
            BoardConfig::new(3, 3, 5, 4).validate(),
            Err(SetupError::TooCrowded { objects: 9, .. })
        ));
        assert!(BoardConfig::new(3, 3, i32::MAX, i32::MAX).validate().is_err());
    }

    #[test]
    fn test_generated_objects_are_distinct_and_in_bounds() {
        let config = BoardConfig::new(6, 4, 5, 7);
        let state = new_game(&config, 42).expect("valid config");
        let board = &state.board;

        assert_eq!(board.targets().len(), 5);
        assert_eq!(board.mirrors().len(), 7);
        assert_eq!(board.laser().pos(), LASER_ORIGIN);
        assert_eq!(board.laser().direction(), LASER_DIRECTION);

        let mut cells = HashSet::new();
        for object in board.objects() {
            assert!(board.contains(object.pos()));
            assert!(cells.insert(object.pos()), "duplicate cell {:?}", object.pos());
        }
        for mirror in board.mirrors() {
            assert_eq!(mirror.angle() % ANGLE_STEP, 0);
        }
    }

    #[test]
    fn test_full_board_fills_every_cell() {
        let config = BoardConfig::new(3, 3, 3, 5);
        let state = new_game(&config, 7).expect("valid config");
        assert_eq!(state.board.objects().count(), 9);
    }

    #[test]
    fn test_same_seed_same_board() {
        let config = BoardConfig::new(8, 8, 4, 6);
        let a = new_game(&config, 99999).expect("valid config");
        let b = new_game(&config, 99999).expect("valid config");
        assert_eq!(a.board.targets(), b.board.targets());
        assert_eq!(a.board.mirrors(), b.board.mirrors());
    }

    #[test]
    fn test_new_game_propagates_setup_error() {
        let config = BoardConfig::new(3, 3, 0, 0);
        assert_eq!(new_game(&config, 1).unwrap_err(), SetupError::NoTargets(0));
    }
}
