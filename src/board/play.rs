// Copyright 2026 Tobin Edwards
//
//    Licensed under the Apache License, Version 2.0 (the "License");
//    you may not use this file except in compliance with the License.
//    You may obtain a copy of the License at
//
//        http://www.apache.org/licenses/LICENSE-2.0
//
//    Unless required by applicable law or agreed to in writing, software
//    distributed under the License is distributed on an "AS IS" BASIS,
//    WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//    See the License for the specific language governing permissions and
//    limitations under the License.

use log::info;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::board::{Board, TokenRef};
use super::collapse;
use super::identity::{Identity, Side};
use super::movegen::{self, ActionSrc};
use super::observation::{self, Observation};
use super::rules;
use super::square::{Offset, Square};

/// The only ambient knob this crate exposes: how many plies to play
/// before declaring a draw. Board size, stock, and the five identities
/// are fixed rules, not configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    pub move_limit: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self { move_limit: 1000 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Terminal {
    Win(Side),
    Draw,
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineError {
    #[error("action {action} is not legal in the current position")]
    IllegalAction { action: u16 },
    #[error("collapse produced an empty possibility set")]
    InfeasibleState,
    #[error("action {action} is out of range (must be < {})", movegen::ACTION_SPACE)]
    ActionOutOfRange { action: u16 },
}

/// The single-seat executor: plays both sides of one game, applying
/// alternating moves. No pre-moves, no review history, just the
/// current position and the bookkeeping needed to decide legality and
/// termination.
#[derive(Debug, Clone)]
pub struct Engine {
    board: Board,
    side_to_move: Side,
    turn_count: u32,
    terminal: Option<Terminal>,
    config: EngineConfig,
}

impl Engine {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            board: Board::initial(),
            side_to_move: Side::Sente,
            turn_count: 0,
            terminal: None,
            config,
        }
    }

    /// Rebuild an engine from already-known parts, used by
    /// `Observation::to_engine`. Never terminal: an observation alone
    /// cannot distinguish "one ply from the move limit" from any other
    /// in-progress position.
    pub(crate) fn from_parts(board: Board, side_to_move: Side, turn_count: u32, config: EngineConfig) -> Self {
        Self {
            board,
            side_to_move,
            turn_count,
            terminal: None,
            config,
        }
    }

    pub fn reset(&mut self) -> Observation {
        *self = Self::new(self.config);
        self.observe()
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn side_to_move(&self) -> Side {
        self.side_to_move
    }

    pub fn turn_count(&self) -> u32 {
        self.turn_count
    }

    pub fn terminal(&self) -> Option<Terminal> {
        self.terminal
    }

    pub fn won(&self) -> bool {
        self.terminal == Some(Terminal::Win(self.side_to_move))
    }

    pub fn lost(&self) -> bool {
        self.terminal == Some(Terminal::Win(!self.side_to_move))
    }

    pub fn observe(&self) -> Observation {
        observation::encode(&self.board, self.side_to_move, self.turn_count)
    }

    pub fn observe_turned(&self) -> Observation {
        observation::encode(&self.board, !self.side_to_move, self.turn_count)
    }

    pub fn action_mask(&self) -> [bool; movegen::ACTION_SPACE] {
        movegen::action_mask(&self.board, self.side_to_move)
    }

    /// Apply `action`. Idempotent once the game has a terminal result:
    /// returns `Ok(0)` without touching the board.
    pub fn step(&mut self, action: u16) -> Result<i8, EngineError> {
        if self.terminal.is_some() {
            return Ok(0);
        }

        let (src, dst) = movegen::decode_action(action).ok_or(EngineError::ActionOutOfRange { action })?;
        let mover = self.side_to_move;
        if !movegen::legal_actions(&self.board, mover).contains(&action) {
            return Err(EngineError::IllegalAction { action });
        }

        match src {
            ActionSrc::Board(from) => self.step_board_move(from, dst, mover)?,
            ActionSrc::Hand(slot) => self.step_drop(slot, dst),
        }

        self.turn_count += 1;
        let reward = if self.terminal == Some(Terminal::Win(mover)) { 1 } else { 0 };

        if self.terminal.is_none() && self.turn_count >= self.config.move_limit {
            self.terminal = Some(Terminal::Draw);
            info!("qshogi: move limit {} reached, draw", self.config.move_limit);
        }

        self.side_to_move = !self.side_to_move;
        Ok(reward)
    }

    fn step_board_move(&mut self, from: Square, dst: Square, mover: Side) -> Result<(), EngineError> {
        let from_ref = TokenRef::Board(from);
        let domain = self
            .board
            .token(from_ref)
            .expect("legal action implies an occupied source square")
            .candidate_identities();
        let offset = Offset::new(
            dst.col() as i8 - from.col() as i8,
            dst.row() as i8 - from.row() as i8,
        );
        let allowed = rules::identities_supporting(domain, mover, offset);

        self.board = collapse::collapse(&self.board, &[(from_ref, allowed)])
            .map_err(|_| EngineError::InfeasibleState)?;

        if self.board.at(dst).is_some() {
            let captured_wins = collapse::is_forced(&self.board, TokenRef::Board(dst), Identity::Lion);
            let mut captured = self
                .board
                .take(dst)
                .expect("destination occupant observed above");
            captured.capture(mover);
            self.board.push_hand(mover, captured);
            if captured_wins {
                self.terminal = Some(Terminal::Win(mover));
                info!("qshogi: side {:?} wins by capturing a forced Lion", mover);
            }
        }

        let mut moving = self
            .board
            .take(from)
            .expect("source square was collapsed above, still occupied");
        let reached_far_rank = dst.row() == rules::promotion_row(mover);
        if reached_far_rank && moving.possibilities().contains(Identity::Chick) {
            moving.promote();
        }
        self.board.place(dst, moving);

        if self.terminal.is_none()
            && reached_far_rank
            && collapse::is_forced(&self.board, TokenRef::Board(dst), Identity::Lion)
        {
            self.terminal = Some(Terminal::Win(mover));
            info!("qshogi: side {:?} wins by a forced Lion reaching the far rank", mover);
        }

        Ok(())
    }

    fn step_drop(&mut self, slot: usize, dst: Square) {
        let piece = self.board.take_hand(self.side_to_move, slot);
        self.board.place(dst, piece);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::identity::Side::Gote;
    use crate::board::identity::IdentitySet;
    use crate::board::piece::PieceState;

    #[test]
    fn fresh_engine_has_no_terminal_and_nine_opening_actions() {
        let engine = Engine::new(EngineConfig::default());
        assert!(engine.terminal().is_none());
        assert_eq!(engine.action_mask().iter().filter(|x| **x).count(), 9);
    }

    #[test]
    fn out_of_range_action_is_rejected() {
        let mut engine = Engine::new(EngineConfig::default());
        let err = engine.step(240).unwrap_err();
        assert_eq!(err, EngineError::ActionOutOfRange { action: 240 });
    }

    #[test]
    fn illegal_action_is_rejected_without_mutating_state() {
        let mut engine = Engine::new(EngineConfig::default());
        let before = engine.board().clone();
        let err = engine.step(0).unwrap_err();
        assert_eq!(err, EngineError::IllegalAction { action: 0 });
        assert_eq!(engine.board(), &before);
    }

    #[test]
    fn step_is_idempotent_after_terminal() {
        let mut engine = Engine::new(EngineConfig { move_limit: 1 });
        let legal = movegen::legal_actions(engine.board(), Side::Sente)[0];
        let reward = engine.step(legal).unwrap();
        assert_eq!(reward, 0);
        assert_eq!(engine.terminal(), Some(Terminal::Draw));
        let turn_count = engine.turn_count();
        assert_eq!(engine.step(legal).unwrap(), 0);
        assert_eq!(engine.turn_count(), turn_count);
    }

    #[test]
    fn capturing_a_forced_lion_wins_immediately() {
        let mut sente_lion = PieceState::new_initial(Side::Sente);
        sente_lion.set_possibilities(IdentitySet::singleton(Identity::Lion));
        let mut gote_lion = PieceState::new_initial(Gote);
        gote_lion.set_possibilities(IdentitySet::singleton(Identity::Lion));

        let board = Board::with_tokens(&[
            (Square::new(1, 1), sente_lion),
            (Square::new(1, 0), gote_lion),
        ]);
        let mut engine = Engine::from_parts(board, Side::Sente, 0, EngineConfig::default());

        let action = movegen::encode_action(ActionSrc::Board(Square::new(1, 1)), Square::new(1, 0));
        let reward = engine.step(action).unwrap();
        assert_eq!(reward, 1);
        assert_eq!(engine.terminal(), Some(Terminal::Win(Side::Sente)));
    }

    #[test]
    fn drop_does_not_change_origin_owner() {
        let mut captured = PieceState::new_initial(Gote);
        captured.capture(Side::Sente);
        let mut board = Board::with_tokens(&[]);
        board.push_hand(Side::Sente, captured);
        let mut engine = Engine::from_parts(board, Side::Sente, 0, EngineConfig::default());

        let action = movegen::encode_action(ActionSrc::Hand(0), Square::new(0, 0));
        engine.step(action).unwrap();
        let placed = engine.board().at(Square::new(0, 0)).unwrap();
        assert_eq!(placed.origin_owner(), Gote);
        assert_eq!(placed.current_owner(), Side::Sente);
    }
}
