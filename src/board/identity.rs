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
use std::hash::{Hash, Hasher};
use std::ops::{BitAnd, BitOr, Index, IndexMut, Not};
use strum_macros::Display;
use strum_macros::EnumIter;

#[derive(Debug, Serialize, Deserialize, Display, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum Side {
    Sente,
    Gote,
}
use Side::{Gote, Sente};

impl Side {
    pub const fn to_index(&self) -> usize {
        *self as usize
    }
}

impl Not for Side {
    type Output = Self;

    #[inline]
    fn not(self) -> Self {
        match self {
            Sente => Gote,
            Gote => Sente,
        }
    }
}

/// A piece's identity while it is certain. Five variants, fixed
/// indices: `Hen` is never part of the initial stock, only reachable
/// by promoting a token whose possibilities include `Chick`.
#[derive(Debug, Serialize, Deserialize, Display, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum Identity {
    Chick,
    Giraffe,
    Elephant,
    Lion,
    Hen,
}
use Identity::{Chick, Elephant, Giraffe, Hen, Lion};

impl Identity {
    pub const fn from_index(index: usize) -> Self {
        debug_assert!(index < 5);
        const MAP: [Identity; 5] = [Chick, Giraffe, Elephant, Lion, Hen];
        MAP[index]
    }

    pub const fn to_index(&self) -> usize {
        *self as usize
    }

    /// The stock slot a chosen identity consumes. A token resolved to
    /// `Hen` is a promoted `Chick`, not an additional piece, so it
    /// still draws against the `Chick` slot of its origin side.
    pub const fn stock_slot(&self) -> Self {
        match self {
            Hen => Chick,
            other => *other,
        }
    }
}

/// A non-empty-by-construction-intent subset of `Identity`, represented
/// as a 5-bit set. Used both for a token's `possibilities` and as the
/// working domain of a single token inside the collapse resolver.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
pub struct IdentitySet(u8);

impl IdentitySet {
    pub const EMPTY: Self = Self(0);

    #[inline]
    pub const fn singleton(identity: Identity) -> Self {
        Self(1 << identity.to_index())
    }

    /// The four identities a token may start the game as.
    pub const fn initial() -> Self {
        Self::singleton(Chick)
            .union(Self::singleton(Giraffe))
            .union(Self::singleton(Elephant))
            .union(Self::singleton(Lion))
    }

    #[inline]
    pub const fn contains(&self, identity: Identity) -> bool {
        self.0 & (1 << identity.to_index()) != 0
    }

    #[inline]
    pub fn insert(&mut self, identity: Identity) {
        self.0 |= 1 << identity.to_index();
    }

    #[inline]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    #[inline]
    pub const fn intersect(self, other: Self) -> Self {
        Self(self.0 & other.0)
    }

    #[inline]
    pub const fn minus(self, other: Self) -> Self {
        Self(self.0 & !other.0)
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn len(&self) -> u32 {
        self.0.count_ones()
    }

    #[inline]
    pub const fn is_singleton(&self) -> bool {
        self.len() == 1
    }

    /// The single identity in this set, if there is exactly one.
    pub fn only(&self) -> Option<Identity> {
        self.is_singleton().then(|| self.iter().next().unwrap())
    }

    /// The subset of identities whose stock slot matches `slot`.
    pub fn matching_slot(&self, slot: Identity) -> Self {
        Self(
            self.iter()
                .filter(|id| id.stock_slot() == slot)
                .fold(0u8, |acc, id| acc | (1 << id.to_index())),
        )
    }

    pub fn iter(&self) -> impl Iterator<Item = Identity> + '_ {
        (0..5)
            .map(Identity::from_index)
            .filter(move |id| self.contains(*id))
    }
}

impl BitOr for IdentitySet {
    type Output = Self;
    #[inline]
    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}

impl BitAnd for IdentitySet {
    type Output = Self;
    #[inline]
    fn bitand(self, rhs: Self) -> Self {
        self.intersect(rhs)
    }
}

impl FromIterator<Identity> for IdentitySet {
    fn from_iter<I: IntoIterator<Item = Identity>>(iter: I) -> Self {
        let mut set = Self::EMPTY;
        for id in iter {
            set.insert(id);
        }
        set
    }
}

/// Per-side storage, indexed by `Side`. Mirrors the board module's own
/// `Pair<T>` but keyed by `Side` instead of `Color`.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Pair<T>((T, T));

impl<T> Pair<T> {
    pub const fn new(sente: T, gote: T) -> Self {
        Self((sente, gote))
    }
    pub fn sente(&self) -> &T {
        &self.0 .0
    }
    pub fn sente_mut(&mut self) -> &mut T {
        &mut self.0 .0
    }
    pub fn gote(&self) -> &T {
        &self.0 .1
    }
    pub fn gote_mut(&mut self) -> &mut T {
        &mut self.0 .1
    }
}

impl<T: Hash> Hash for Pair<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.sente().hash(state);
        self.gote().hash(state);
    }
}

impl<T> Index<Side> for Pair<T> {
    type Output = T;
    #[inline(always)]
    fn index(&self, index: Side) -> &Self::Output {
        match index {
            Sente => self.sente(),
            Gote => self.gote(),
        }
    }
}

impl<T> IndexMut<Side> for Pair<T> {
    #[inline(always)]
    fn index_mut(&mut self, index: Side) -> &mut Self::Output {
        match index {
            Sente => self.sente_mut(),
            Gote => self.gote_mut(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn side_flips() {
        assert_eq!(!Sente, Gote);
        assert_eq!(!Gote, Sente);
    }

    #[test]
    fn initial_set_excludes_hen() {
        let set = IdentitySet::initial();
        assert!(set.contains(Chick));
        assert!(set.contains(Giraffe));
        assert!(set.contains(Elephant));
        assert!(set.contains(Lion));
        assert!(!set.contains(Hen));
        assert_eq!(set.len(), 4);
    }

    #[test]
    fn hen_shares_chick_stock_slot() {
        assert_eq!(Hen.stock_slot(), Chick);
        assert_eq!(Chick.stock_slot(), Chick);
        assert_eq!(Lion.stock_slot(), Lion);
    }

    #[test]
    fn matching_slot_picks_up_hen_alongside_chick() {
        let domain = IdentitySet::singleton(Chick) | IdentitySet::singleton(Hen);
        let matched = domain.matching_slot(Chick);
        assert_eq!(matched, domain);
    }

    #[test]
    fn pair_indexes_by_side() {
        let pair = Pair::new(1, 2);
        assert_eq!(pair[Sente], 1);
        assert_eq!(pair[Gote], 2);
    }
}
