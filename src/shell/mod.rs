//! Line-based text protocol for driving a [`Session`] from a terminal or a
//! script, loosely modelled after the UCI conventions (`position`, `d`,
//! `info string` diagnostics).
//!
//! [`Shell::run`] is the "main loop" of the binary: it reads commands from the
//! input stream, one per line, and writes the answers to the output stream.
//! Malformed commands are reported and skipped; only I/O errors stop the loop.

use std::io::{BufRead, Write};

use itertools::Itertools;
use tracing::debug;

use crate::chess::board::Board;
use crate::chess::core::{Move, Square};
use crate::chess::layout::Layout;
use crate::chess::rules;
use crate::session::{Outcome, Session};
use crate::shell::command::Command;

mod command;

/// Connects a hot-seat [`Session`] to the text I/O.
pub struct Shell<R: BufRead, W: Write> {
    session: Session,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    /// Creates a shell with the starting position and provided I/O.
    #[must_use]
    pub fn new(input: R, output: W) -> Self {
        Self {
            session: Session::new(Board::starting()),
            input,
            output,
        }
    }

    /// Continuously reads the input stream and executes the commands until
    /// `quit` is sent or the input is closed.
    ///
    /// # Errors
    ///
    /// Returns an error if reading the input or writing the output fails.
    pub fn run(&mut self) -> anyhow::Result<()> {
        let mut line = String::new();
        loop {
            line.clear();
            if self.input.read_line(&mut line)? == 0 {
                break;
            }
            if line.trim().is_empty() {
                continue;
            }
            let command = Command::parse(&line);
            debug!(?command, "received command");
            match command {
                Command::SetPosition { layout } => self.handle_position(layout.as_deref())?,
                Command::Legal(candidate) => self.handle_legal(&candidate)?,
                Command::Move(candidate) => self.handle_move(&candidate)?,
                Command::Moves(square) => self.handle_moves(&square)?,
                Command::Turn => writeln!(self.output, "{}", self.session.board().side_to_move())?,
                Command::Display => writeln!(self.output, "{:?}", self.session.board())?,
                Command::Quit => break,
                Command::Unknown(command) => {
                    writeln!(self.output, "info string Unsupported command: {command}")?;
                },
            }
            self.output.flush()?;
        }
        self.output.flush()?;
        Ok(())
    }

    /// Replaces the game with a new one starting from the given layout (or the
    /// standard starting position). The current game is kept if the layout is
    /// invalid.
    fn handle_position(&mut self, layout: Option<&str>) -> anyhow::Result<()> {
        let board = match layout {
            None => Ok(Board::starting()),
            Some(layout) => Layout::try_from(layout).and_then(|layout| Board::new(&layout)),
        };
        match board {
            Ok(board) => self.session = Session::new(board),
            Err(e) => writeln!(self.output, "info string Error reading the position: {e:#}")?,
        }
        Ok(())
    }

    fn handle_legal(&mut self, candidate: &str) -> anyhow::Result<()> {
        let Some(candidate) = self.parse_move(candidate)? else {
            return Ok(());
        };
        let board = self.session.board();
        let legal = board
            .at(candidate.from())
            .is_some_and(|piece| rules::is_legal(board, piece, candidate.to()));
        writeln!(self.output, "{}", if legal { "legal" } else { "illegal" })?;
        Ok(())
    }

    fn handle_move(&mut self, candidate: &str) -> anyhow::Result<()> {
        let Some(candidate) = self.parse_move(candidate)? else {
            return Ok(());
        };
        let Some(piece) = self.session.board().at(candidate.from()) else {
            writeln!(self.output, "illegal move {candidate}")?;
            return Ok(());
        };
        match self.session.submit(piece, candidate.to()) {
            Outcome::Moved { captured, .. } => {
                writeln!(self.output, "moved {candidate}")?;
                if let Some(captured) = captured.and_then(|id| self.session.board().piece(id)) {
                    writeln!(self.output, "captured {captured}")?;
                }
            },
            Outcome::OutOfTurn => {
                let player = self.session.board().side_to_move().opponent();
                writeln!(self.output, "not {}'s turn", player.name())?;
            },
            _ => writeln!(self.output, "illegal move {candidate}")?,
        }
        Ok(())
    }

    fn handle_moves(&mut self, square: &str) -> anyhow::Result<()> {
        let square = match Square::try_from(square) {
            Ok(square) => square,
            Err(e) => {
                writeln!(self.output, "info string Unexpected square: {e:#}")?;
                return Ok(());
            },
        };
        let board = self.session.board();
        match board.at(square) {
            Some(piece) => writeln!(
                self.output,
                "{}",
                rules::legal_destinations(board, piece).iter().join(" ")
            )?,
            None => writeln!(self.output, "info string No piece on {square}")?,
        }
        Ok(())
    }

    /// Reports malformed moves to the output and returns `None` for them.
    fn parse_move(&mut self, candidate: &str) -> anyhow::Result<Option<Move>> {
        match Move::from_uci(candidate) {
            Ok(candidate) => Ok(Some(candidate)),
            Err(e) => {
                writeln!(self.output, "info string Unexpected move: {e:#}")?;
                Ok(None)
            },
        }
    }
}
