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

use once_cell::sync::Lazy;

use super::identity::{Identity, IdentitySet, Side};
use super::piece::PieceState;
use super::square::Offset;

/// Movement offsets per identity, defined for side 0 (forward is
/// `-row`) and negated for side 1 at lookup time. Giraffe moves
/// orthogonally, Elephant diagonally, Lion is their union (all eight
/// directions), Chick is a single step forward, and Hen moves like a
/// shogi gold general (Giraffe's four directions plus the two forward
/// diagonals).
static OFFSETS_SIDE0: Lazy<[Vec<Offset>; 5]> = Lazy::new(|| {
    let giraffe = vec![
        Offset::new(0, -1),
        Offset::new(0, 1),
        Offset::new(-1, 0),
        Offset::new(1, 0),
    ];
    let elephant = vec![
        Offset::new(-1, -1),
        Offset::new(1, -1),
        Offset::new(-1, 1),
        Offset::new(1, 1),
    ];
    let chick = vec![Offset::new(0, -1)];
    let hen = vec![
        Offset::new(0, -1),
        Offset::new(0, 1),
        Offset::new(-1, 0),
        Offset::new(1, 0),
        Offset::new(-1, -1),
        Offset::new(1, -1),
    ];
    let mut lion = giraffe.clone();
    lion.extend(elephant.iter().copied());

    let mut table = [Vec::new(), Vec::new(), Vec::new(), Vec::new(), Vec::new()];
    table[Identity::Chick.to_index()] = chick;
    table[Identity::Giraffe.to_index()] = giraffe;
    table[Identity::Elephant.to_index()] = elephant;
    table[Identity::Lion.to_index()] = lion;
    table[Identity::Hen.to_index()] = hen;
    table
});

static OFFSETS_SIDE1: Lazy<[Vec<Offset>; 5]> = Lazy::new(|| {
    let mut table = OFFSETS_SIDE0.clone();
    for offsets in table.iter_mut() {
        for offset in offsets.iter_mut() {
            *offset = offset.negate_row();
        }
    }
    table
});

/// The offsets a single identity moves by, for the given side.
pub fn offsets(identity: Identity, side: Side) -> &'static [Offset] {
    let table = match side {
        Side::Sente => &*OFFSETS_SIDE0,
        Side::Gote => &*OFFSETS_SIDE1,
    };
    &table[identity.to_index()]
}

/// The superposition-aware move set: the union of offsets over every
/// identity the token could still be. Deduplicated since several
/// identities share offsets (e.g. every identity's forward step is
/// covered by both Giraffe and Lion).
pub fn move_offsets(piece: &PieceState, side: Side) -> Vec<Offset> {
    let mut result: Vec<Offset> = Vec::new();
    for identity in piece.candidate_identities().iter() {
        for offset in offsets(identity, side) {
            if !result.contains(offset) {
                result.push(*offset);
            }
        }
    }
    result
}

/// Identities (among `domain`) whose own offset table includes `offset`
/// for `side`. Used by move generation's cheap legality check and by
/// the move's identity constraint passed into collapse.
pub fn identities_supporting(domain: IdentitySet, side: Side, offset: Offset) -> IdentitySet {
    domain
        .iter()
        .filter(|id| offsets(*id, side).contains(&offset))
        .collect()
}

/// Row index of the back rank an incoming token of `side` promotes on
/// (the opponent's home rank: row 0 for side 0, row 3 for side 1).
pub fn promotion_row(side: Side) -> u8 {
    match side {
        Side::Sente => 0,
        Side::Gote => super::square::ROWS - 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::identity::Side::{Gote, Sente};

    #[test]
    fn lion_offsets_are_union_of_giraffe_and_elephant() {
        let lion = offsets(Identity::Lion, Sente);
        assert_eq!(lion.len(), 8);
        for offset in offsets(Identity::Giraffe, Sente) {
            assert!(lion.contains(offset));
        }
        for offset in offsets(Identity::Elephant, Sente) {
            assert!(lion.contains(offset));
        }
    }

    #[test]
    fn side1_offsets_are_row_negated() {
        let sente_chick = offsets(Identity::Chick, Sente)[0];
        let gote_chick = offsets(Identity::Chick, Gote)[0];
        assert_eq!(sente_chick.dc, gote_chick.dc);
        assert_eq!(sente_chick.dr, -gote_chick.dr);
    }

    #[test]
    fn full_superposition_move_set_equals_lion_move_set() {
        let piece = PieceState::new_initial(Sente);
        let moves = move_offsets(&piece, Sente);
        let lion = offsets(Identity::Lion, Sente);
        assert_eq!(moves.len(), lion.len());
        for offset in lion {
            assert!(moves.contains(offset));
        }
    }

    #[test]
    fn promotion_rows_are_opposite_homes() {
        assert_eq!(promotion_row(Sente), 0);
        assert_eq!(promotion_row(Gote), 3);
    }
}
