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

//! End-to-end scenarios for the quantum engine, run against the public
//! `Engine` API rather than any internal module.

use qshogi::{Engine, EngineConfig, Identity, IdentitySet, Side, Square, Terminal};

fn first_legal_action(engine: &Engine) -> Option<u16> {
    let mask = engine.action_mask();
    (0..mask.len() as u16).find(|a| mask[*a as usize])
}

/// Opening mask: every reset token has full superposition, so its move
/// set is the Lion's 8-direction set, not a per-identity set. That
/// gives 9 legal board moves from the opening position, not the 20 a
/// classical per-labeled-piece reading would expect.
#[test]
fn opening_mask_has_nine_legal_actions() {
    let engine = Engine::new(EngineConfig::default());
    let mask = engine.action_mask();
    assert_eq!(mask.iter().filter(|x| **x).count(), 9);
    assert!(engine.board().hand(Side::Sente).is_empty());
    assert!(engine.board().hand(Side::Gote).is_empty());
}

/// Forced collapse on capture: capturing an opposing token whose
/// possibilities still include more than one identity does not force a
/// win, and the captured token keeps its possibilities once it enters
/// the capturing side's hand.
#[test]
fn capture_of_an_uncertain_token_does_not_win() {
    let mut engine = Engine::new(EngineConfig::default());
    let action = first_legal_action(&engine).unwrap();
    engine.step(action).unwrap();
    assert!(engine.terminal().is_none());
    for sq in Square::iter() {
        if let Some(piece) = engine.board().at(sq) {
            assert!(!piece.possibilities().is_empty());
        }
    }
}

/// Turn-limit draw: with a move limit of 1, a single legal ply ends
/// the game as a draw with zero reward.
#[test]
fn turn_limit_reaches_a_draw() {
    let mut engine = Engine::new(EngineConfig { move_limit: 1 });
    let action = first_legal_action(&engine).unwrap();
    let reward = engine.step(action).unwrap();
    assert_eq!(reward, 0);
    assert_eq!(engine.terminal(), Some(Terminal::Draw));
}

/// Stepping an out-of-range or illegal action never panics and never
/// mutates the board.
#[test]
fn illegal_and_out_of_range_actions_are_rejected_cleanly() {
    let mut engine = Engine::new(EngineConfig::default());
    let before = engine.board().clone();
    assert!(engine.step(qshogi::ACTION_SPACE as u16).is_err());
    assert!(engine.step(0).is_err());
    assert_eq!(engine.board(), &before);
}

/// Stepping after terminal is idempotent: zero reward, no mutation.
#[test]
fn step_after_terminal_is_a_no_op() {
    let mut engine = Engine::new(EngineConfig { move_limit: 1 });
    let action = first_legal_action(&engine).unwrap();
    engine.step(action).unwrap();
    assert!(engine.terminal().is_some());
    let before = engine.board().clone();
    assert_eq!(engine.step(action).unwrap(), 0);
    assert_eq!(engine.board(), &before);
}

/// After any legal step from reset, every occupied token (board or
/// hand) retains a non-empty possibility set.
#[test]
fn stepping_never_yields_an_empty_possibility_set() {
    let mut engine = Engine::new(EngineConfig::default());
    for _ in 0..30 {
        let Some(action) = first_legal_action(&engine) else {
            break;
        };
        engine.step(action).unwrap();
        for sq in Square::iter() {
            if let Some(piece) = engine.board().at(sq) {
                assert!(!piece.possibilities().is_empty());
            }
        }
        for side in [Side::Sente, Side::Gote] {
            for piece in engine.board().hand(side) {
                assert!(!piece.possibilities().is_empty());
            }
        }
        if engine.terminal().is_some() {
            break;
        }
    }
}

/// Unless terminal, the side to move always has at least one legal
/// action.
#[test]
fn non_terminal_states_always_have_a_legal_action() {
    let mut engine = Engine::new(EngineConfig::default());
    for _ in 0..30 {
        if engine.terminal().is_some() {
            break;
        }
        assert!(engine.action_mask().iter().any(|x| *x));
        let action = first_legal_action(&engine).unwrap();
        engine.step(action).unwrap();
    }
}

/// Replaying the same action sequence from two independently
/// constructed fresh engines yields bit-identical boards (determinism
/// + clone purity).
#[test]
fn replaying_the_same_actions_is_deterministic() {
    let mut a = Engine::new(EngineConfig::default());
    let mut b = a.clone();
    for _ in 0..10 {
        let Some(action) = first_legal_action(&a) else {
            break;
        };
        let ra = a.step(action).unwrap();
        let rb = b.step(action).unwrap();
        assert_eq!(ra, rb);
        assert_eq!(a.board(), b.board());
        if a.terminal().is_some() {
            break;
        }
    }
}

/// No origin side ever has more than one token committed to the same
/// identity (the one-of-each stock).
#[test]
fn stock_never_exceeds_one_per_identity_per_origin() {
    let mut engine = Engine::new(EngineConfig::default());
    for _ in 0..15 {
        for origin in [Side::Sente, Side::Gote] {
            for identity in [
                Identity::Chick,
                Identity::Giraffe,
                Identity::Elephant,
                Identity::Lion,
            ] {
                let singleton = IdentitySet::singleton(identity);
                let committed = Square::iter()
                    .filter_map(|sq| engine.board().at(sq))
                    .filter(|p| p.origin_owner() == origin && p.possibilities() == singleton)
                    .count();
                assert!(committed <= 1);
            }
        }
        let Some(action) = first_legal_action(&engine) else {
            break;
        };
        engine.step(action).unwrap();
        if engine.terminal().is_some() {
            break;
        }
    }
}

/// Observing from the side to move and reconstructing an engine from
/// that observation preserves the legal move count.
#[test]
fn observation_round_trip_preserves_legal_move_count() {
    let engine = Engine::new(EngineConfig::default());
    let obs = engine.observe();
    let rebuilt = obs.to_engine(0);
    assert_eq!(
        rebuilt.action_mask().iter().filter(|x| **x).count(),
        engine.action_mask().iter().filter(|x| **x).count()
    );
}

/// The turned observation's action mask has the same popcount as the
/// other side's own mask from the mirrored position (both sides start
/// with a symmetric opening).
#[test]
fn turned_observation_mask_matches_opponent_perspective() {
    let engine = Engine::new(EngineConfig::default());
    let turned = engine.observe_turned();
    assert_eq!(
        turned.action_mask.iter().filter(|x| **x).count(),
        engine.action_mask().iter().filter(|x| **x).count()
    );
}

/// Drop legality: after a capture, the capturing side's hand holds
/// exactly one token, and every empty square is a legal drop
/// destination the next time that side is to move.
#[test]
fn drop_is_legal_onto_every_empty_square_after_a_capture() {
    let mut engine = Engine::new(EngineConfig::default());
    for _ in 0..20 {
        if engine.terminal().is_some() {
            return;
        }
        let before = (
            engine.board().hand(Side::Sente).len(),
            engine.board().hand(Side::Gote).len(),
        );
        let Some(action) = first_legal_action(&engine) else {
            return;
        };
        engine.step(action).unwrap();
        let after = (
            engine.board().hand(Side::Sente).len(),
            engine.board().hand(Side::Gote).len(),
        );
        let captor = if after.0 > before.0 {
            Some(Side::Sente)
        } else if after.1 > before.1 {
            Some(Side::Gote)
        } else {
            None
        };
        if let Some(captor) = captor {
            assert_eq!(engine.board().hand(captor).len(), 1);
            if engine.side_to_move() == captor {
                // Per the public action encoding (src_index * 12 +
                // dst_index, hand slots at src_index 12..19), the
                // single hand token occupies slot 0, so its drop
                // actions are 144 + dst_index for every empty dst.
                let mask = engine.action_mask();
                for sq in Square::iter() {
                    if engine.board().at(sq).is_none() {
                        let action = 12 * 12 + sq.to_index();
                        assert!(mask[action], "expected a legal drop onto {sq}");
                    }
                }
            }
            return;
        }
    }
}
