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

//! Quantum Animal Shogi: a 3x4 board game in which every token starts
//! as a superposition of identities, narrowed only as far as the rules
//! require by a constraint-satisfaction collapse. See the `board`
//! module for the full set of abstractions; `Engine` is the usual
//! entry point for playing a game end to end.

mod board;

pub use board::{
    promotion_row, ActionSrc, Board, CollapseError, Engine, EngineConfig, EngineError, Identity,
    IdentitySet, Observation, Offset, Pair, PieceState, Side, Square, Terminal, TokenRef,
    ACTION_SPACE, COLS, ROWS, SQUARES,
};
