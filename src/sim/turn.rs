//! Turn controller
//!
//! Validates a player's move, applies it and re-fires the laser. A rejected
//! move never touches the state.

use super::beam::{Shot, ShotOutcome, fire};
use super::state::{GamePhase, GameState};
use crate::consts::ANGLE_STEP;
use crate::error::TurnError;

/// One player move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnInput {
    /// Turn mirror number `mirror` (1-based) by `degrees`, then fire
    Rotate { mirror: i32, degrees: i32 },
    /// Fire again without touching any mirror
    Fire,
}

/// Fire the first shot of the game, before any turn is played
pub fn open(state: &mut GameState) -> Option<Shot> {
    if state.phase.is_terminal() || state.shots_fired > 0 {
        return None;
    }
    Some(shoot(state))
}

/// Check a move against the current state without applying it
pub fn validate(state: &GameState, input: &TurnInput) -> Result<(), TurnError> {
    if state.phase.is_terminal() {
        return Err(TurnError::GameFinished);
    }

    if let TurnInput::Rotate { mirror, degrees } = *input {
        let count = state.board.mirrors().len();
        let in_range = usize::try_from(mirror).is_ok_and(|m| (1..=count).contains(&m));
        if !in_range {
            return Err(TurnError::MirrorOutOfRange {
                index: mirror,
                count,
            });
        }
        if degrees % ANGLE_STEP != 0 {
            return Err(TurnError::RotationNotMultiple(degrees));
        }
    }

    Ok(())
}

/// Apply a move and fire. Returns the resulting shot.
pub fn play_turn(state: &mut GameState, input: TurnInput) -> Result<Shot, TurnError> {
    validate(state, &input)?;

    if let TurnInput::Rotate { mirror, degrees } = input {
        // validate() guarantees 1 <= mirror <= count
        let index = (mirror - 1) as usize;
        if let Some(m) = state.board.mirror_mut(index) {
            m.rotate(degrees);
            log::debug!("Mirror {} rotated by {} to {}", mirror, degrees, m.angle());
        }
    }

    state.turns += 1;
    Ok(shoot(state))
}

/// Fire the laser and update counters and phase
fn shoot(state: &mut GameState) -> Shot {
    let shot = fire(&mut state.board);
    state.shots_fired += 1;
    state.last_shot = Some(shot.outcome);

    log::debug!(
        "Shot {}: {:?} after {} cells",
        state.shots_fired,
        shot.outcome,
        shot.path.len()
    );

    if let ShotOutcome::Hit { at } = shot.outcome {
        state.remaining_targets = state.remaining_targets.saturating_sub(1);
        state.last_hit = Some(at);
    }

    if state.remaining_targets == 0 {
        state.phase = GamePhase::Won;
        log::info!("All targets destroyed after {} turns", state.turns);
    } else if state.board.mirrors().is_empty() && !shot.outcome.is_hit() {
        state.phase = GamePhase::Stalled;
        log::info!("No mirrors and the beam misses; game stalled");
    }

    shot
}
