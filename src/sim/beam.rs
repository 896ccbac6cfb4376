//! Beam tracing
//!
//! The beam leaves the laser and walks one cell at a time. It stops at the
//! first live target, bends at mirrors and passes through empty cells and
//! destroyed targets. A beam that re-enters a cell heading the same way it
//! did before is caught in a mirror loop and stops there.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::state::{Board, Direction, Position};

/// How a shot ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShotOutcome {
    /// A target at this cell was destroyed
    Hit { at: Position },
    /// The beam left the board; `exit` is the first cell outside it
    Miss { exit: Position },
    /// The beam revisited this cell in the same direction
    Looped { at: Position },
}

impl ShotOutcome {
    pub fn is_hit(&self) -> bool {
        matches!(self, ShotOutcome::Hit { .. })
    }
}

/// Result of firing the laser
#[derive(Debug, Clone)]
pub struct Shot {
    pub outcome: ShotOutcome,
    /// Cells entered on the board, in order
    pub path: Vec<Position>,
    /// Index of the destroyed target on a hit
    pub target: Option<usize>,
}

/// Fire the laser across `board`, destroying the first live target it reaches
pub fn fire(board: &mut Board) -> Shot {
    let laser = *board.laser();
    let mut pos = laser.pos();
    let mut dir = laser.direction();
    let mut path = Vec::new();
    let mut visited: HashSet<(Position, Direction)> = HashSet::new();

    loop {
        pos = pos.step(dir);

        if !board.contains(pos) {
            return Shot {
                outcome: ShotOutcome::Miss { exit: pos },
                path,
                target: None,
            };
        }

        if !visited.insert((pos, dir)) {
            return Shot {
                outcome: ShotOutcome::Looped { at: pos },
                path,
                target: None,
            };
        }
        path.push(pos);

        if let Some(index) = board.live_target_at(pos) {
            board.destroy_target(index);
            return Shot {
                outcome: ShotOutcome::Hit { at: pos },
                path,
                target: Some(index),
            };
        }

        if let Some(mirror) = board.mirror_at(pos) {
            dir = mirror.reflect(dir);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::mirror::Mirror;
    use crate::sim::state::LaserSource;

    fn board(width: i32, height: i32) -> Board {
        Board::new(
            width,
            height,
            LaserSource::new(Position::new(0, 0), Direction::Right),
        )
    }

    #[test]
    fn test_clear_path_misses_at_right_edge() {
        for width in 3..8 {
            let mut b = board(width, 4);
            let shot = fire(&mut b);
            assert_eq!(
                shot.outcome,
                ShotOutcome::Miss {
                    exit: Position::new(width, 0)
                }
            );
            assert_eq!(shot.path.len(), (width - 1) as usize);
        }
    }

    #[test]
    fn test_target_in_path_is_hit() {
        let mut b = board(5, 5);
        let first = b.add_target(Position::new(3, 0));
        let behind = b.add_target(Position::new(4, 0));
        let elsewhere = b.add_target(Position::new(2, 3));

        let shot = fire(&mut b);
        assert_eq!(
            shot.outcome,
            ShotOutcome::Hit {
                at: Position::new(3, 0)
            }
        );
        assert_eq!(shot.target, Some(first));
        assert!(b.targets()[first].is_destroyed());
        assert!(!b.targets()[behind].is_destroyed());
        assert!(!b.targets()[elsewhere].is_destroyed());
    }

    #[test]
    fn test_destroyed_target_is_transparent() {
        let mut b = board(5, 5);
        b.add_target(Position::new(2, 0));
        let behind = b.add_target(Position::new(4, 0));

        assert!(fire(&mut b).outcome.is_hit());
        let shot = fire(&mut b);
        assert_eq!(
            shot.outcome,
            ShotOutcome::Hit {
                at: Position::new(4, 0)
            }
        );
        assert_eq!(shot.target, Some(behind));
    }

    #[test]
    fn test_horizontal_mirror_turns_beam_up() {
        let mut b = board(4, 4);
        b.add_mirror(Mirror::with_angle(Position::new(1, 0), 90));

        // Right -> Up at (1, 0) leaves through the top edge
        let shot = fire(&mut b);
        assert_eq!(
            shot.outcome,
            ShotOutcome::Miss {
                exit: Position::new(1, -1)
            }
        );
        assert_eq!(shot.path, vec![Position::new(1, 0)]);
    }

    #[test]
    fn test_beam_follows_reflected_path() {
        // > . \
        // . . .
        // . . T
        let mut b = board(3, 3);
        b.add_mirror(Mirror::with_angle(Position::new(2, 0), 210)); // Right -> Down
        b.add_target(Position::new(2, 2));

        let shot = fire(&mut b);
        assert_eq!(
            shot.outcome,
            ShotOutcome::Hit {
                at: Position::new(2, 2)
            }
        );
        assert_eq!(
            shot.path,
            vec![
                Position::new(1, 0),
                Position::new(2, 0),
                Position::new(2, 1),
                Position::new(2, 2),
            ]
        );
    }

    #[test]
    fn test_vertical_mirror_bounces_back() {
        // Beam bounces off the mirror, passes back over the laser cell and exits left
        let mut b = board(4, 3);
        b.add_mirror(Mirror::with_angle(Position::new(2, 0), 0));

        let shot = fire(&mut b);
        assert_eq!(
            shot.outcome,
            ShotOutcome::Miss {
                exit: Position::new(-1, 0)
            }
        );
    }

    #[test]
    fn test_mirror_cycle_is_detected() {
        // Laser in the middle, boxed in by four mirrors that send the beam
        // back through its own cell:
        //
        // - . -
        // - > -
        // . . .
        let mut b = Board::new(
            3,
            3,
            LaserSource::new(Position::new(1, 1), Direction::Right),
        );
        for pos in [(2, 1), (2, 0), (0, 0), (0, 1)] {
            b.add_mirror(Mirror::with_angle(Position::new(pos.0, pos.1), 90));
        }

        let shot = fire(&mut b);
        assert_eq!(
            shot.outcome,
            ShotOutcome::Looped {
                at: Position::new(2, 1)
            }
        );
        assert_eq!(shot.path.len(), 6);
    }

    #[test]
    fn test_edge_laser_cannot_loop() {
        // Every reflection is reversible, so a beam fired from the edge
        // always finds its way out again.
        let mut b = board(3, 3);
        for pos in [(1, 0), (2, 0), (1, 1), (2, 1), (1, 2), (2, 2)] {
            b.add_mirror(Mirror::with_angle(Position::new(pos.0, pos.1), 90));
        }
        assert!(matches!(fire(&mut b).outcome, ShotOutcome::Miss { .. }));
    }
}
