//! Interactive console session
//!
//! Reads the board size and turns from a line-based input and writes the grid
//! and status lines to an output. Numbers are whitespace-separated and may be
//! split across lines, so `3 4` and `3\n4` read the same.

use std::collections::VecDeque;
use std::io::{BufRead, Write};

use crate::consts::ANGLE_STEP;
use crate::error::{SessionError, TurnError};
use crate::render::Grid;
use crate::settings::Settings;
use crate::sim::{BoardConfig, GamePhase, GameState, Shot, ShotOutcome, TurnInput, turn};

/// ANSI: clear screen, cursor home
const CLEAR_SCREEN: &str = "\x1B[2J\x1B[H";

/// A console session over any reader/writer pair
pub struct Console<R, W> {
    input: R,
    output: W,
    settings: Settings,
    /// Tokens read but not yet consumed
    pending: VecDeque<String>,
    /// Skip the next screen clear so a rejection message stays visible
    hold_screen: bool,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W, settings: Settings) -> Self {
        Self {
            input,
            output,
            settings,
            pending: VecDeque::new(),
            hold_screen: false,
        }
    }

    /// Give back the output, e.g. to inspect it in tests
    pub fn into_output(self) -> W {
        self.output
    }

    /// Ask for the board size and object counts
    pub fn read_config(&mut self) -> Result<BoardConfig, SessionError> {
        self.prompt("Enter grid size (width height): ")?;
        let width = self.read_number()?;
        let height = self.read_number()?;

        self.prompt("Enter target and mirror counts: ")?;
        let targets = self.read_number()?;
        let mirrors = self.read_number()?;

        Ok(BoardConfig::new(width, height, targets, mirrors))
    }

    /// Play until every target is destroyed or the game stalls
    pub fn run(&mut self, state: &mut GameState) -> Result<GamePhase, SessionError> {
        if state.shots_fired == 0 && !state.phase.is_terminal() {
            self.draw(state)?;
            writeln!(self.output, "Firing the laser...")?;
            if let Some(shot) = turn::open(state) {
                self.report(&shot)?;
                self.pause(state)?;
            }
        }

        while !state.phase.is_terminal() {
            self.draw(state)?;

            let input = match self.read_turn(state) {
                Ok(input) => input,
                Err(SessionError::InvalidNumber(token)) => {
                    log::debug!("Rejected input {:?}", token);
                    writeln!(self.output, "Please enter a whole number.")?;
                    self.hold_screen = true;
                    continue;
                }
                Err(e) => return Err(e),
            };
            let Some(input) = input else {
                continue;
            };

            match turn::play_turn(state, input) {
                Ok(shot) => {
                    self.report(&shot)?;
                    self.pause(state)?;
                }
                Err(e) => self.reject(&e)?,
            }
        }

        self.finish(state)?;
        Ok(state.phase)
    }

    /// Read one turn. `None` means the input was rejected and already reported.
    fn read_turn(&mut self, state: &GameState) -> Result<Option<TurnInput>, SessionError> {
        let count = state.board.mirrors().len();
        if count == 0 {
            self.prompt("No mirrors on the board. Press Enter to fire.")?;
            self.wait_for_enter()?;
            return Ok(Some(TurnInput::Fire));
        }

        self.prompt(&format!("Select a mirror to rotate (1-{}): ", count))?;
        let mirror = self.read_number()?;

        // Check the index before asking for the angle
        if let Err(e) = turn::validate(state, &TurnInput::Rotate { mirror, degrees: 0 }) {
            self.reject(&e)?;
            return Ok(None);
        }

        self.prompt(&format!(
            "Rotate by how many degrees (multiple of {})? ",
            ANGLE_STEP
        ))?;
        let degrees = self.read_number()?;

        Ok(Some(TurnInput::Rotate { mirror, degrees }))
    }

    fn draw(&mut self, state: &GameState) -> Result<(), SessionError> {
        if self.settings.clear_screen && !self.hold_screen {
            write!(self.output, "{}", CLEAR_SCREEN)?;
        }
        self.hold_screen = false;
        write!(self.output, "{}", Grid::draw(state))?;
        writeln!(self.output, "Targets remaining: {}", state.remaining_targets)?;

        for (i, mirror) in state.board.mirrors().iter().enumerate() {
            writeln!(
                self.output,
                "  mirror {}: ({}, {}) {} at {}°",
                i + 1,
                mirror.pos.x,
                mirror.pos.y,
                mirror.symbol(),
                mirror.angle()
            )?;
        }
        writeln!(self.output)?;
        Ok(())
    }

    fn report(&mut self, shot: &Shot) -> Result<(), SessionError> {
        match shot.outcome {
            ShotOutcome::Hit { at } => {
                writeln!(self.output, "Target destroyed at ({}, {})!", at.x, at.y)?
            }
            ShotOutcome::Miss { .. } => writeln!(
                self.output,
                "The beam left the board without hitting a target."
            )?,
            ShotOutcome::Looped { at } => writeln!(
                self.output,
                "The beam is caught in a mirror loop at ({}, {}).",
                at.x, at.y
            )?,
        }
        Ok(())
    }

    fn reject(&mut self, error: &TurnError) -> Result<(), SessionError> {
        log::debug!("Rejected turn: {}", error);
        match error {
            TurnError::MirrorOutOfRange { .. } => writeln!(self.output, "Invalid mirror index!")?,
            TurnError::RotationNotMultiple(_) => writeln!(
                self.output,
                "Rotation must be a multiple of {} degrees!",
                ANGLE_STEP
            )?,
            TurnError::GameFinished => writeln!(self.output, "The game is already over.")?,
        }
        self.hold_screen = true;
        Ok(())
    }

    fn finish(&mut self, state: &GameState) -> Result<(), SessionError> {
        match state.phase {
            GamePhase::Won => writeln!(self.output, "\nCongratulations! All targets destroyed!")?,
            GamePhase::Stalled => {
                writeln!(
                    self.output,
                    "\nNo mirrors left to turn and the beam misses. Game over."
                )?;
                if let Some(ShotOutcome::Miss { exit }) = state.last_shot {
                    writeln!(
                        self.output,
                        "The last beam left the board at ({}, {}).",
                        exit.x, exit.y
                    )?;
                }
            }
            GamePhase::AwaitingInput => {}
        }
        write!(self.output, "{}", Grid::draw(state))?;
        self.output.flush()?;
        Ok(())
    }

    fn pause(&mut self, state: &GameState) -> Result<(), SessionError> {
        if self.settings.pause_after_shot && !state.phase.is_terminal() {
            self.prompt("Press Enter to continue...")?;
            self.wait_for_enter()?;
        }
        Ok(())
    }

    fn prompt(&mut self, text: &str) -> Result<(), SessionError> {
        write!(self.output, "{}", text)?;
        self.output.flush()?;
        Ok(())
    }

    fn read_number(&mut self) -> Result<i32, SessionError> {
        let token = self.next_token()?;
        token
            .parse()
            .map_err(|_| SessionError::InvalidNumber(token))
    }

    fn next_token(&mut self) -> Result<String, SessionError> {
        while self.pending.is_empty() {
            let line = self.read_line()?;
            self.pending
                .extend(line.split_whitespace().map(str::to_owned));
        }
        self.pending.pop_front().ok_or(SessionError::InputClosed)
    }

    /// Drop anything left on the current line and wait for a fresh one
    fn wait_for_enter(&mut self) -> Result<(), SessionError> {
        self.pending.clear();
        self.read_line()?;
        Ok(())
    }

    fn read_line(&mut self) -> Result<String, SessionError> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(SessionError::InputClosed);
        }
        Ok(line)
    }
}
