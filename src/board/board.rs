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

use serde::{Deserialize, Serialize};

use super::identity::{Pair, Side};
use super::piece::PieceState;
use super::square::{Square, SQUARES};

/// Addresses a single token, wherever it currently sits. Board squares
/// and hand slots are the only two places a token can be.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenRef {
    Board(Square),
    Hand(Side, usize),
}

/// The full state of the pieces: twelve squares plus the two hands.
/// No move legality or collapse logic lives here; this is the raw
/// data structure the other modules read and write.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Board {
    squares: [Option<PieceState>; SQUARES],
    hands: Pair<Vec<PieceState>>,
}

impl Board {
    /// The opening position: four tokens per side, full superposition,
    /// no hand entries. Side 1 (Gote) starts on rows 0-1, side 0
    /// (Sente) on rows 2-3, mirrored across the board's center.
    pub fn initial() -> Self {
        let mut squares: [Option<PieceState>; SQUARES] = Default::default();
        for col in 0..3 {
            squares[Square::new(col, 0).to_index()] = Some(PieceState::new_initial(Side::Gote));
            squares[Square::new(col, 3).to_index()] = Some(PieceState::new_initial(Side::Sente));
        }
        squares[Square::new(1, 1).to_index()] = Some(PieceState::new_initial(Side::Gote));
        squares[Square::new(1, 2).to_index()] = Some(PieceState::new_initial(Side::Sente));

        Self {
            squares,
            hands: Pair::new(Vec::new(), Vec::new()),
        }
    }

    pub fn at(&self, square: Square) -> Option<&PieceState> {
        self.squares[square.to_index()].as_ref()
    }

    pub fn hand(&self, side: Side) -> &[PieceState] {
        &self.hands[side]
    }

    pub fn token(&self, loc: TokenRef) -> Option<&PieceState> {
        match loc {
            TokenRef::Board(sq) => self.at(sq),
            TokenRef::Hand(side, idx) => self.hands[side].get(idx),
        }
    }

    pub(super) fn token_mut(&mut self, loc: TokenRef) -> Option<&mut PieceState> {
        match loc {
            TokenRef::Board(sq) => self.squares[sq.to_index()].as_mut(),
            TokenRef::Hand(side, idx) => self.hands[side].get_mut(idx),
        }
    }

    /// Every token currently on the board or in either hand, paired
    /// with the location it can be addressed by. There are always
    /// exactly 8: captures only relocate tokens between board and
    /// hand, never remove them.
    pub fn all_tokens(&self) -> Vec<(TokenRef, PieceState)> {
        let mut tokens = Vec::with_capacity(8);
        for sq in Square::iter() {
            if let Some(piece) = self.at(sq) {
                tokens.push((TokenRef::Board(sq), *piece));
            }
        }
        for side in [Side::Sente, Side::Gote] {
            for (idx, piece) in self.hands[side].iter().enumerate() {
                tokens.push((TokenRef::Hand(side, idx), *piece));
            }
        }
        debug_assert_eq!(tokens.len(), 8);
        tokens
    }

    /// Remove the token at `square`, leaving it empty, and return it.
    pub(super) fn take(&mut self, square: Square) -> Option<PieceState> {
        self.squares[square.to_index()].take()
    }

    /// Place `piece` at `square`, which must be empty.
    pub(super) fn place(&mut self, square: Square, piece: PieceState) {
        debug_assert!(self.squares[square.to_index()].is_none());
        self.squares[square.to_index()] = Some(piece);
    }

    /// Append `piece` to `side`'s hand, returning its slot index.
    pub(super) fn push_hand(&mut self, side: Side, piece: PieceState) -> usize {
        self.hands[side].push(piece);
        self.hands[side].len() - 1
    }

    /// Remove and return the token at `side`'s hand slot `idx`.
    pub(super) fn take_hand(&mut self, side: Side, idx: usize) -> PieceState {
        self.hands[side].remove(idx)
    }
}

impl Board {
    /// A board with no tokens placed anywhere. Used by observation
    /// decoding to rebuild a board from scratch; not a legal game
    /// state on its own (the stock/Lion invariants only hold once all
    /// 8 tokens have been placed).
    pub(crate) fn empty() -> Self {
        Self {
            squares: Default::default(),
            hands: Pair::new(Vec::new(), Vec::new()),
        }
    }
}

#[cfg(test)]
impl Board {
    /// Construct an otherwise-empty board with the given tokens placed,
    /// for scenario tests that need specific, already-narrowed
    /// positions rather than the full opening superposition.
    pub fn with_tokens(tokens: &[(Square, PieceState)]) -> Self {
        let mut board = Self::empty();
        for (sq, piece) in tokens {
            board.place(*sq, *piece);
        }
        board
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::identity::Side::{Gote, Sente};

    #[test]
    fn initial_board_has_eight_tokens_four_per_side() {
        let board = Board::initial();
        let tokens = board.all_tokens();
        assert_eq!(tokens.len(), 8);
        let sente_count = tokens
            .iter()
            .filter(|(_, p)| p.origin_owner() == Sente)
            .count();
        let gote_count = tokens
            .iter()
            .filter(|(_, p)| p.origin_owner() == Gote)
            .count();
        assert_eq!(sente_count, 4);
        assert_eq!(gote_count, 4);
    }

    #[test]
    fn initial_board_has_empty_hands() {
        let board = Board::initial();
        assert!(board.hand(Sente).is_empty());
        assert!(board.hand(Gote).is_empty());
    }

    #[test]
    fn take_and_place_round_trip() {
        let mut board = Board::initial();
        let sq = Square::new(1, 2);
        let piece = board.take(sq).unwrap();
        assert!(board.at(sq).is_none());
        board.place(sq, piece);
        assert!(board.at(sq).is_some());
    }
}
