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
use std::fmt;
use std::ops::Add;

pub const COLS: u8 = 3;
pub const ROWS: u8 = 4;
pub const SQUARES: usize = (COLS as usize) * (ROWS as usize);

/// A single square on the 3x4 board, row-major: index 0 is column 0 of
/// row 0 (Gote's home rank), index 11 is column 2 of row 3 (Sente's
/// home rank).
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Square(u8);

impl Square {
    #[inline]
    pub const fn new(col: u8, row: u8) -> Self {
        debug_assert!(col < COLS && row < ROWS);
        Self(row * COLS + col)
    }

    #[inline]
    pub const fn from_index(index: usize) -> Self {
        debug_assert!(index < SQUARES);
        Self(index as u8)
    }

    #[inline]
    pub const fn to_index(&self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub const fn col(&self) -> u8 {
        self.0 % COLS
    }

    #[inline]
    pub const fn row(&self) -> u8 {
        self.0 / COLS
    }

    /// Point reflection through the board's center: the square an
    /// observer on the other side would call by the same name.
    #[inline]
    pub const fn mirror(&self) -> Self {
        Self::from_index(SQUARES - 1 - self.to_index())
    }

    pub fn iter() -> impl Iterator<Item = Square> {
        (0..SQUARES).map(Square::from_index)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.col(), self.row())
    }
}

impl From<Square> for usize {
    fn from(value: Square) -> Self {
        value.to_index()
    }
}

/// A displacement in (column, row) used to generate move destinations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Offset {
    pub dc: i8,
    pub dr: i8,
}

impl Offset {
    pub const fn new(dc: i8, dr: i8) -> Self {
        Self { dc, dr }
    }

    /// Flip the row component; side 1's movement tables are side 0's
    /// negated, since the two homes face each other across row 1/2.
    pub const fn negate_row(self) -> Self {
        Self::new(self.dc, -self.dr)
    }
}

impl Add<Offset> for Square {
    type Output = Option<Square>;
    fn add(self, rhs: Offset) -> Self::Output {
        let col = self.col() as i8 + rhs.dc;
        let row = self.row() as i8 + rhs.dr;
        if (0..COLS as i8).contains(&col) && (0..ROWS as i8).contains(&row) {
            Some(Square::new(col as u8, row as u8))
        } else {
            None
        }
    }
}
