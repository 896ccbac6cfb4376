//! Mirror orientation and the reflection rule
//!
//! A mirror turns in steps of 30°. Its angle picks both the glyph it is drawn
//! with and the direction a beam leaves it in. The reflection rule is a fixed
//! lookup, not optics: angles 0/180 bounce the beam straight back, 90/270 turn
//! it a quarter turn to the left, and every diagonal angle picks one of two
//! perpendicular exits depending on whether it lies below 180.

use serde::{Deserialize, Serialize};

use super::state::{Direction, Position};
use crate::normalize_degrees;

/// Glyph for an angle that is not a multiple of 30
pub const UNKNOWN_SYMBOL: char = '?';

/// A rotatable mirror
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mirror {
    pub pos: Position,
    /// Degrees, always in [0, 360)
    angle: i32,
}

impl Mirror {
    pub fn new(pos: Position) -> Self {
        Self { pos, angle: 0 }
    }

    pub fn with_angle(pos: Position, angle: i32) -> Self {
        Self {
            pos,
            angle: normalize_degrees(angle),
        }
    }

    #[inline]
    pub fn angle(&self) -> i32 {
        self.angle
    }

    /// Turn by `degrees` (negative turns the other way).
    ///
    /// Does not check for multiples of 30; the turn controller does.
    pub fn rotate(&mut self, degrees: i32) {
        self.angle = normalize_degrees(self.angle + degrees);
    }

    /// Glyph for the current angle. Opposite angles share a glyph.
    pub fn symbol(&self) -> char {
        match self.angle {
            0 | 180 => '|',
            90 | 270 => '-',
            30 | 210 => '/',
            60 | 240 => '\\',
            120 | 300 => '\\',
            150 | 330 => '/',
            _ => UNKNOWN_SYMBOL,
        }
    }

    /// Direction the beam travels after entering this mirror's cell
    pub fn reflect(&self, incoming: Direction) -> Direction {
        use Direction::*;

        match self.angle {
            0 | 180 => incoming.opposite(),
            90 | 270 => match incoming {
                Up => Left,
                Down => Right,
                Left => Down,
                Right => Up,
            },
            angle => match (incoming, angle < 180) {
                (Up, true) | (Down, false) => Left,
                (Up, false) | (Down, true) => Right,
                (Left, true) | (Right, false) => Down,
                (Left, false) | (Right, true) => Up,
            },
        }
    }
}
