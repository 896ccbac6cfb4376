//! Game state and core board types
//!
//! The board owns every object in plain value collections. Targets and
//! mirrors are addressed by their index; the grid drawn on screen is derived
//! from this state and never read back.

use serde::{Deserialize, Serialize};

use super::beam::ShotOutcome;
use super::mirror::Mirror;

/// A cell on the board. `x` grows right, `y` grows down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The neighbouring cell in `dir`
    #[inline]
    pub fn step(self, dir: Direction) -> Self {
        let (dx, dy) = dir.offset();
        Self::new(self.x + dx, self.y + dy)
    }
}

/// Beam travel direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Unit step in grid coordinates
    pub fn offset(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Arrow drawn for a laser facing this way
    pub fn symbol(self) -> char {
        match self {
            Direction::Up => '^',
            Direction::Down => 'v',
            Direction::Left => '<',
            Direction::Right => '>',
        }
    }
}

/// A stationary target. Once destroyed it stays destroyed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Target {
    pub pos: Position,
    destroyed: bool,
}

impl Target {
    pub fn new(pos: Position) -> Self {
        Self {
            pos,
            destroyed: false,
        }
    }

    #[inline]
    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    pub fn destroy(&mut self) {
        self.destroyed = true;
    }

    pub fn symbol(&self) -> char {
        if self.destroyed { ' ' } else { 'T' }
    }
}

/// The laser emitter. Fixed for the whole game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaserSource {
    pos: Position,
    direction: Direction,
}

impl LaserSource {
    pub fn new(pos: Position, direction: Direction) -> Self {
        Self { pos, direction }
    }

    #[inline]
    pub fn pos(&self) -> Position {
        self.pos
    }

    #[inline]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn symbol(&self) -> char {
        self.direction.symbol()
    }
}

/// Anything that occupies a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridObject {
    Laser(LaserSource),
    Target(Target),
    Mirror(Mirror),
}

impl GridObject {
    pub fn pos(&self) -> Position {
        match self {
            GridObject::Laser(laser) => laser.pos(),
            GridObject::Target(target) => target.pos,
            GridObject::Mirror(mirror) => mirror.pos,
        }
    }

    pub fn symbol(&self) -> char {
        match self {
            GridObject::Laser(laser) => laser.symbol(),
            GridObject::Target(target) => target.symbol(),
            GridObject::Mirror(mirror) => mirror.symbol(),
        }
    }
}

/// The playing field and everything on it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Board {
    width: i32,
    height: i32,
    laser: LaserSource,
    targets: Vec<Target>,
    mirrors: Vec<Mirror>,
}

impl Board {
    /// An empty board holding only the laser
    pub fn new(width: i32, height: i32, laser: LaserSource) -> Self {
        Self {
            width,
            height,
            laser,
            targets: Vec::new(),
            mirrors: Vec::new(),
        }
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    #[inline]
    pub fn laser(&self) -> &LaserSource {
        &self.laser
    }

    pub fn targets(&self) -> &[Target] {
        &self.targets
    }

    pub fn mirrors(&self) -> &[Mirror] {
        &self.mirrors
    }

    /// Mirror by 0-based index
    pub fn mirror_mut(&mut self, index: usize) -> Option<&mut Mirror> {
        self.mirrors.get_mut(index)
    }

    /// Whether `pos` lies inside the board
    #[inline]
    pub fn contains(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.x < self.width && pos.y >= 0 && pos.y < self.height
    }

    /// Whether `pos` is on the board and unoccupied
    pub fn is_free(&self, pos: Position) -> bool {
        self.contains(pos) && self.object_at(pos).is_none()
    }

    /// Place a target, returning its index
    pub fn add_target(&mut self, pos: Position) -> usize {
        debug_assert!(self.is_free(pos), "cell {pos:?} is taken");
        self.targets.push(Target::new(pos));
        self.targets.len() - 1
    }

    /// Place a mirror, returning its index
    pub fn add_mirror(&mut self, mirror: Mirror) -> usize {
        debug_assert!(self.is_free(mirror.pos), "cell {:?} is taken", mirror.pos);
        self.mirrors.push(mirror);
        self.mirrors.len() - 1
    }

    /// Every object in draw order: laser, targets, mirrors
    pub fn objects(&self) -> impl Iterator<Item = GridObject> + '_ {
        std::iter::once(GridObject::Laser(self.laser))
            .chain(self.targets.iter().copied().map(GridObject::Target))
            .chain(self.mirrors.iter().copied().map(GridObject::Mirror))
    }

    /// The object occupying `pos`, if any
    pub fn object_at(&self, pos: Position) -> Option<GridObject> {
        self.objects().find(|object| object.pos() == pos)
    }

    /// Index of the live target at `pos`
    pub fn live_target_at(&self, pos: Position) -> Option<usize> {
        self.targets
            .iter()
            .position(|t| t.pos == pos && !t.is_destroyed())
    }

    /// Destroy the target at `index`. Returns false if it was already gone.
    pub fn destroy_target(&mut self, index: usize) -> bool {
        match self.targets.get_mut(index) {
            Some(target) if !target.is_destroyed() => {
                target.destroy();
                true
            }
            _ => false,
        }
    }

    /// The first mirror at `pos`
    pub fn mirror_at(&self, pos: Position) -> Option<&Mirror> {
        self.mirrors.iter().find(|m| m.pos == pos)
    }

    pub fn live_targets(&self) -> usize {
        self.targets.iter().filter(|t| !t.is_destroyed()).count()
    }
}

/// Current phase of play
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the player's next turn
    AwaitingInput,
    /// Every target destroyed
    Won,
    /// No mirrors to turn and the beam cannot hit anything
    Stalled,
}

impl GamePhase {
    pub fn is_terminal(self) -> bool {
        !matches!(self, GamePhase::AwaitingInput)
    }
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Seed the board was generated from
    pub seed: u64,
    pub board: Board,
    pub phase: GamePhase,
    /// Targets still standing
    pub remaining_targets: usize,
    /// Cell of the most recent hit, drawn as `X`
    pub last_hit: Option<Position>,
    /// Outcome of the most recent shot
    pub last_shot: Option<ShotOutcome>,
    pub shots_fired: u32,
    /// Accepted turns (rejected input does not count)
    pub turns: u32,
}

impl GameState {
    pub fn new(seed: u64, board: Board) -> Self {
        let remaining_targets = board.live_targets();
        let phase = if remaining_targets == 0 {
            GamePhase::Won
        } else {
            GamePhase::AwaitingInput
        };

        Self {
            seed,
            board,
            phase,
            remaining_targets,
            last_hit: None,
            last_shot: None,
            shots_fired: 0,
            turns: 0,
        }
    }
}
