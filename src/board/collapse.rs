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

//! The constraint resolver at the heart of the quantum rules. Given a
//! board and an optional extra constraint on one token, it decides
//! whether any assignment of identities to every token (consistent
//! with each token's current possibilities, the `may_be_hen` gate, and
//! the per-origin-side stock of one Chick/Giraffe/Elephant/Lion each)
//! still exists, and if so returns a board whose possibilities have
//! each been narrowed to the identities that appear in at least one
//! such assignment.
//!
//! The search is small by construction: there are always exactly 8
//! tokens, each with a domain of at most 5 identities, so a plain
//! propagate-then-branch backtracking search is both correct and fast
//! enough without any further tuning.

use log::{debug, trace};
use thiserror::Error;

use super::board::{Board, TokenRef};
use super::identity::{Identity, IdentitySet, Side};

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollapseError {
    #[error("no assignment of identities is consistent with the applied constraints")]
    Infeasible,
}

struct TokenMeta {
    loc: TokenRef,
    origin: Side,
}

/// Resolve `board`, optionally constraining one or more tokens'
/// domains to `allowed` before solving. Returns a new board with every
/// token's possibilities projected onto its satisfying-assignment
/// union, or `CollapseError::Infeasible` if no assignment exists.
pub fn collapse(board: &Board, extra: &[(TokenRef, IdentitySet)]) -> Result<Board, CollapseError> {
    let tokens = board.all_tokens();
    let metas: Vec<TokenMeta> = tokens
        .iter()
        .map(|(loc, piece)| TokenMeta {
            loc: *loc,
            origin: piece.origin_owner(),
        })
        .collect();
    let mut domains: Vec<IdentitySet> = tokens
        .iter()
        .map(|(_, piece)| piece.candidate_identities())
        .collect();

    for (loc, allowed) in extra {
        let idx = metas
            .iter()
            .position(|m| m.loc == *loc)
            .expect("constrained token must exist on the board");
        domains[idx] = domains[idx].intersect(*allowed);
    }

    let solved = solve(domains, &metas).ok_or(CollapseError::Infeasible)?;

    let mut result = board.clone();
    for (meta, domain) in metas.iter().zip(solved.iter()) {
        let piece = result
            .token_mut(meta.loc)
            .expect("token location is stable across collapse");
        piece.set_possibilities(*domain);
    }
    Ok(result)
}

/// Decide whether `token`'s identity is forced to `identity` under
/// `board`: every satisfying assignment must use it, and none may use
/// anything else. Used by the Lion-capture and Lion-reach win checks.
pub fn is_forced(board: &Board, token: TokenRef, identity: Identity) -> bool {
    let domain = board
        .token(token)
        .expect("token must exist")
        .candidate_identities();
    let allow = IdentitySet::singleton(identity);
    let deny = domain.minus(allow);

    let forced_possible = collapse(board, &[(token, allow)]).is_ok();
    let alt_possible = !deny.is_empty() && collapse(board, &[(token, deny)]).is_ok();
    forced_possible && !alt_possible
}

fn solve(mut domains: Vec<IdentitySet>, metas: &[TokenMeta]) -> Option<Vec<IdentitySet>> {
    if propagate(&mut domains, metas).is_err() {
        trace!("collapse: propagation found no consistent assignment");
        return None;
    }

    let branch_idx = domains
        .iter()
        .enumerate()
        .filter(|(_, d)| d.len() > 1)
        .min_by_key(|(_, d)| d.len())
        .map(|(i, _)| i);

    let Some(branch_idx) = branch_idx else {
        return Some(domains);
    };

    debug!(
        "collapse: branching on token {} with {} candidates",
        branch_idx,
        domains[branch_idx].len()
    );

    let mut projected: Option<Vec<IdentitySet>> = None;
    for identity in domains[branch_idx].iter() {
        let mut branch = domains.clone();
        branch[branch_idx] = IdentitySet::singleton(identity);
        if let Some(result) = solve(branch, metas) {
            projected = Some(match projected {
                None => result,
                Some(acc) => acc
                    .iter()
                    .zip(result.iter())
                    .map(|(a, b)| a.union(*b))
                    .collect(),
            });
        }
    }
    projected
}

/// Unit propagation plus stock propagation, to a fixpoint. Each
/// origin side independently fields one Chick-or-Hen, one Giraffe,
/// one Elephant and one Lion: a standard "hidden single" style
/// narrowing over that matching problem.
fn propagate(domains: &mut [IdentitySet], metas: &[TokenMeta]) -> Result<(), ()> {
    const SLOTS: [Identity; 4] = [
        Identity::Chick,
        Identity::Giraffe,
        Identity::Elephant,
        Identity::Lion,
    ];

    loop {
        let mut changed = false;
        for side in [Side::Sente, Side::Gote] {
            let idxs: Vec<usize> = metas
                .iter()
                .enumerate()
                .filter(|(_, m)| m.origin == side)
                .map(|(i, _)| i)
                .collect();

            for slot in SLOTS {
                let covers = |domain: IdentitySet| !domain.matching_slot(slot).is_empty();

                let committed: Vec<usize> = idxs
                    .iter()
                    .copied()
                    .filter(|&i| domains[i].is_singleton() && covers(domains[i]))
                    .collect();
                if committed.len() > 1 {
                    return Err(());
                }

                if let Some(&owner) = committed.first() {
                    for &i in &idxs {
                        if i == owner || !covers(domains[i]) {
                            continue;
                        }
                        let narrowed = domains[i].minus(domains[i].matching_slot(slot));
                        if narrowed != domains[i] {
                            changed = true;
                        }
                        domains[i] = narrowed;
                        if domains[i].is_empty() {
                            return Err(());
                        }
                    }
                } else {
                    let possible: Vec<usize> =
                        idxs.iter().copied().filter(|&i| covers(domains[i])).collect();
                    if possible.is_empty() {
                        return Err(());
                    }
                    if possible.len() == 1 {
                        let i = possible[0];
                        let narrowed = domains[i].matching_slot(slot);
                        if narrowed != domains[i] {
                            changed = true;
                        }
                        domains[i] = narrowed;
                    }
                }
            }
        }
        if !changed {
            return Ok(());
        }
    }
}
