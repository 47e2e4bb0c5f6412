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

//! A board for Quantum Animal Shogi: a 3x4 variant of Animal Shogi in
//! which every token starts as a superposition of identities, resolved
//! only as far as the rules demand by a constraint-satisfaction
//! "collapse" step. The following features are supported:
//!
//! [x] The 3x4 board, four tokens per side, two hands
//! [x] Per-token superposition (`possibilities`) and Hen promotion
//! [x] Constraint-propagation collapse, including stock propagation
//! [x] A fixed 240-action encoding over board moves and hand drops
//! [x] A side-relative observation tensor for engine/agent consumption
//! [x] Engine mode, playing both sides of a game to a win or a draw
//!
//! Some of the key abstractions include:
//!
//! * A `Square` represents one of the twelve coordinates on the 3x4
//!   board, row-major from Gote's home rank to Sente's. `Offset` is a
//!   displacement used to generate move destinations; it is defined
//!   once for Sente and negated for Gote, since the two homes face each
//!   other.
//!
//! * `Identity` is one of `Chick`, `Giraffe`, `Elephant`, `Lion`, or
//!   `Hen` (a promoted Chick). `IdentitySet` is the small bitset used
//!   both for a token's live possibilities and for the working domain
//!   of a token inside the collapse resolver.
//!
//! * `PieceState` is a single token, on the board or in a hand. Its
//!   `possibilities` may still include more than one identity; its
//!   `origin_owner` (which side's stock it draws against) never
//!   changes, while its `current_owner` flips on capture.
//!
//! * `Board` holds the twelve squares and the two hands. It exposes no
//!   move legality or collapse logic of its own - just the token
//!   storage the other modules read and write.
//!
//! * `collapse` is the constraint solver: given a board and an optional
//!   extra constraint on one token, it decides whether any assignment
//!   of identities to all eight tokens is still possible, and if so
//!   narrows every token's possibilities to the union of its value
//!   across every such assignment.
//!
//! * `movegen` encodes and decodes the fixed 240-action space and lists
//!   the legal board moves and hand drops for a side.
//!
//! * `observation` encodes a board from one side's point of view into
//!   the tensor representation engines and agents consume, and can
//!   reconstruct a playable `Engine` from one.
//!
//! * `Engine` plays both sides of a game, applying successive actions
//!   of alternating side. It is the only mode of play this crate
//!   supports: there is no notion of pre-moves or of reviewing prior
//!   positions.
//!

mod board;
mod collapse;
mod identity;
mod movegen;
mod observation;
mod piece;
mod play;
mod rules;
mod square;

pub use board::{Board, TokenRef};
pub use collapse::CollapseError;
pub use identity::{Identity, IdentitySet, Pair, Side};
pub use movegen::{ActionSrc, ACTION_SPACE};
pub use observation::Observation;
pub use piece::PieceState;
pub use play::{Engine, EngineConfig, EngineError, Terminal};
pub use rules::promotion_row;
pub use square::{Offset, Square, COLS, ROWS, SQUARES};

