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

use super::identity::{Identity, IdentitySet, Side};

/// A token on the board or in a hand. Its true identity may still be
/// in superposition: `possibilities` is the set of identities it could
/// still turn out to be, narrowed only by collapse.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct PieceState {
    possibilities: IdentitySet,
    origin_owner: Side,
    current_owner: Side,
    may_be_hen: bool,
}

impl PieceState {
    /// Reconstruct a token from its raw components, e.g. when decoding
    /// an observation tensor back into a board.
    pub(crate) fn from_parts(
        possibilities: IdentitySet,
        origin_owner: Side,
        current_owner: Side,
        may_be_hen: bool,
    ) -> Self {
        Self {
            possibilities,
            origin_owner,
            current_owner,
            may_be_hen,
        }
    }

    /// A freshly placed token at the start of the game: full
    /// superposition, owned by its origin side, not promoted.
    pub fn new_initial(origin: Side) -> Self {
        Self {
            possibilities: IdentitySet::initial(),
            origin_owner: origin,
            current_owner: origin,
            may_be_hen: false,
        }
    }

    pub fn possibilities(&self) -> IdentitySet {
        self.possibilities
    }

    pub fn origin_owner(&self) -> Side {
        self.origin_owner
    }

    pub fn current_owner(&self) -> Side {
        self.current_owner
    }

    pub fn may_be_hen(&self) -> bool {
        self.may_be_hen
    }

    /// The identities collapse is allowed to resolve this token to:
    /// its possibilities, plus `Hen` once it has been promoted.
    pub fn candidate_identities(&self) -> IdentitySet {
        if self.may_be_hen {
            self.possibilities | IdentitySet::singleton(Identity::Hen)
        } else {
            self.possibilities
        }
    }

    /// Narrow `possibilities` to the result of a collapse projection.
    /// `domain` may include `Hen`; it is stripped back out since a
    /// token's stored possibilities never include it directly (the
    /// `may_be_hen` flag is the sole gate on that identity).
    pub(super) fn set_possibilities(&mut self, domain: IdentitySet) {
        self.possibilities = domain.minus(IdentitySet::singleton(Identity::Hen));
    }

    /// Flip ownership on capture. Possibilities are untouched: the
    /// captured token's identity is exactly as uncertain after capture
    /// as before it.
    pub(super) fn capture(&mut self, by: Side) {
        self.current_owner = by;
    }

    /// Mark a moved Chick as eligible to resolve as Hen from now on.
    /// This is a standing option, not a commitment.
    pub(super) fn promote(&mut self) {
        self.may_be_hen = true;
    }
}
