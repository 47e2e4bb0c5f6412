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

//! Side-relative tensor encoding of a board. Channel assignment is
//! 0..4 possibilities (including the `may_be_hen` gate as channel 4),
//! 5..6 origin owner, 7..8 current owner.

use serde::{Deserialize, Serialize};

use super::board::Board;
use super::identity::{Identity, IdentitySet, Side};
use super::movegen::{self, ACTION_SPACE};
use super::piece::PieceState;
use super::play::{Engine, EngineConfig};
use super::square::{Square, SQUARES};

pub const CHANNELS: usize = 9;
pub const HAND_SLOTS: usize = 8;
pub const SLOTS: usize = SQUARES + HAND_SLOTS;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Observation {
    pub planes: Vec<[f32; CHANNELS]>,
    pub action_mask: [bool; ACTION_SPACE],
    pub turn: u32,
}

/// Encode `board` from `observer`'s point of view. Board squares are
/// mirrored (a 180-degree rotation) when `observer` is side 1, so row 0
/// of the tensor is always the observer's opponent's home rank.
pub fn encode(board: &Board, observer: Side, turn: u32) -> Observation {
    let mut planes = vec![[0.0f32; CHANNELS]; SLOTS];

    for sq in Square::iter() {
        if let Some(piece) = board.at(sq) {
            let observed = if observer == Side::Sente { sq } else { sq.mirror() };
            planes[observed.to_index()] = encode_piece(piece, observer);
        }
    }

    let mut slot = SQUARES;
    for piece in board.hand(observer) {
        planes[slot] = encode_piece(piece, observer);
        slot += 1;
    }
    for piece in board.hand(!observer) {
        debug_assert!(slot < SLOTS, "combined hands never exceed the 8 reserved slots");
        planes[slot] = encode_piece(piece, observer);
        slot += 1;
    }

    Observation {
        planes,
        action_mask: movegen::action_mask(board, observer),
        turn,
    }
}

fn encode_piece(piece: &PieceState, observer: Side) -> [f32; CHANNELS] {
    let mut row = [0.0f32; CHANNELS];
    for identity in piece.possibilities().iter() {
        row[identity.to_index()] = 1.0;
    }
    row[Identity::Hen.to_index()] = piece.may_be_hen() as u8 as f32;
    row[5] = (piece.origin_owner() == observer) as u8 as f32;
    row[6] = (piece.origin_owner() != observer) as u8 as f32;
    row[7] = (piece.current_owner() == observer) as u8 as f32;
    row[8] = (piece.current_owner() != observer) as u8 as f32;
    row
}

fn decode_piece(row: &[f32; CHANNELS]) -> Option<PieceState> {
    if row.iter().all(|v| *v == 0.0) {
        return None;
    }
    let mut possibilities = IdentitySet::EMPTY;
    for identity in [
        Identity::Chick,
        Identity::Giraffe,
        Identity::Elephant,
        Identity::Lion,
    ] {
        if row[identity.to_index()] == 1.0 {
            possibilities.insert(identity);
        }
    }
    let may_be_hen = row[Identity::Hen.to_index()] == 1.0;
    let origin_owner = if row[5] == 1.0 { Side::Sente } else { Side::Gote };
    let current_owner = if row[7] == 1.0 { Side::Sente } else { Side::Gote };
    Some(PieceState::from_parts(
        possibilities,
        origin_owner,
        current_owner,
        may_be_hen,
    ))
}

impl Observation {
    /// Reconstruct a playable engine from an observation and the turn
    /// count it was taken at. The reconstruction is canonical (side to
    /// move is always `Side::Sente`): observations are side-relative by
    /// construction, so the absolute side labels of the rebuilt engine
    /// carry no information the source position didn't already
    /// discard. What is preserved exactly is the legal move set.
    pub fn to_engine(&self, turn: u32) -> Engine {
        let mut board = Board::empty();
        for sq in Square::iter() {
            if let Some(piece) = decode_piece(&self.planes[sq.to_index()]) {
                board.place(sq, piece);
            }
        }
        for slot in SQUARES..SLOTS {
            let Some(piece) = decode_piece(&self.planes[slot]) else {
                continue;
            };
            board.push_hand(piece.current_owner(), piece);
        }
        Engine::from_parts(board, Side::Sente, turn, EngineConfig::default())
    }
}
