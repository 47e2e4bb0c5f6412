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

use super::board::{Board, TokenRef};
use super::identity::Side;
use super::rules::move_offsets;
use super::square::Square;

/// Board squares occupy `0..12`, hand slots occupy `12..20` (up to 8
/// reserved slots); only as many are populated as the side to move's
/// hand actually holds.
pub const ACTION_SPACE: usize = (SQUARES + HAND_SLOTS) * SQUARES;
const SQUARES: usize = super::square::SQUARES;
const HAND_SLOTS: usize = 8;

/// Where an action's source slot refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionSrc {
    Board(Square),
    Hand(usize),
}

impl ActionSrc {
    fn src_index(&self) -> usize {
        match self {
            ActionSrc::Board(sq) => sq.to_index(),
            ActionSrc::Hand(slot) => SQUARES + slot,
        }
    }

    fn from_src_index(index: usize) -> Option<Self> {
        if index < SQUARES {
            Some(ActionSrc::Board(Square::from_index(index)))
        } else if index < SQUARES + HAND_SLOTS {
            Some(ActionSrc::Hand(index - SQUARES))
        } else {
            None
        }
    }

    pub fn token_ref(&self, side: Side) -> TokenRef {
        match self {
            ActionSrc::Board(sq) => TokenRef::Board(*sq),
            ActionSrc::Hand(slot) => TokenRef::Hand(side, *slot),
        }
    }
}

pub fn encode_action(src: ActionSrc, dst: Square) -> u16 {
    (src.src_index() * SQUARES + dst.to_index()) as u16
}

/// Decode an action index into its source and destination. Returns
/// `None` if `action >= ACTION_SPACE`, a decode error distinct from
/// illegality.
pub fn decode_action(action: u16) -> Option<(ActionSrc, Square)> {
    let action = action as usize;
    if action >= ACTION_SPACE {
        return None;
    }
    let src_index = action / SQUARES;
    let dst_index = action % SQUARES;
    ActionSrc::from_src_index(src_index).map(|src| (src, Square::from_index(dst_index)))
}

/// Every `(src, dst)` a board-resident token owned by `side` can reach,
/// per its superposition-aware move set, filtered to on-board squares
/// not occupied by `side`'s own tokens.
pub fn board_moves(board: &Board, side: Side) -> Vec<(Square, Square)> {
    let mut moves = Vec::new();
    for src in Square::iter() {
        let Some(piece) = board.at(src) else { continue };
        if piece.current_owner() != side {
            continue;
        }
        for offset in move_offsets(piece, side) {
            let Some(dst) = src + offset else { continue };
            match board.at(dst) {
                Some(occupant) if occupant.current_owner() == side => continue,
                _ => moves.push((src, dst)),
            }
        }
    }
    moves
}

/// Every `(hand slot, dst)` drop available to `side`: any of its own
/// hand tokens onto any empty square (including the back rank; a
/// dropped Chick does not auto-promote).
pub fn drop_moves(board: &Board, side: Side) -> Vec<(usize, Square)> {
    let mut moves = Vec::new();
    let hand_len = board.hand(side).len();
    for slot in 0..hand_len {
        for dst in Square::iter() {
            if board.at(dst).is_none() {
                moves.push((slot, dst));
            }
        }
    }
    moves
}

/// Every legal action for `side` to move, encoded as a single index.
pub fn legal_actions(board: &Board, side: Side) -> Vec<u16> {
    let mut actions: Vec<u16> = board_moves(board, side)
        .into_iter()
        .map(|(src, dst)| encode_action(ActionSrc::Board(src), dst))
        .collect();
    actions.extend(
        drop_moves(board, side)
            .into_iter()
            .map(|(slot, dst)| encode_action(ActionSrc::Hand(slot), dst)),
    );
    actions
}

pub fn action_mask(board: &Board, side: Side) -> [bool; ACTION_SPACE] {
    let mut mask = [false; ACTION_SPACE];
    for action in legal_actions(board, side) {
        mask[action as usize] = true;
    }
    mask
}
