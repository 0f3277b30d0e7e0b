use crate::deadend::prelude::*;

/// A logical board location; whether it names a real cell depends on the board's row count.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Coord {
    pub row: usize,
    pub col: usize,
}

impl Coord {
    /// Constructs a new coord.
    pub fn new(row: usize, col: usize) -> Coord {
        Coord { row, col }
    }

    /// The canonical notation of the coord, `row,col`.
    pub fn notate(&self) -> String {
        format!("{},{}", self.row, self.col)
    }
}

impl std::fmt::Display for Coord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

// Signed location that can step off the edge of the board without wrapping.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OffsetCoord {
    pub rows: isize,
    pub cols: isize,
}

/// Offsets to the neighbours a row-major sweep has already visited: north-east, north-west and west.
///
/// Every unordered adjacent pair on the lattice is reached exactly once through these.
pub static BACKWARD_OFFSETS: [OffsetCoord; 3] = [
    OffsetCoord { rows: -1, cols: 0 },
    OffsetCoord { rows: -1, cols: -1 },
    OffsetCoord { rows: 0, cols: -1 },
];

/// Offsets to all six neighbours of a cell on the triangular lattice.
pub static NEIGHBOUR_OFFSETS: [OffsetCoord; 6] = [
    OffsetCoord { rows: -1, cols: 0 },
    OffsetCoord { rows: -1, cols: -1 },
    OffsetCoord { rows: 0, cols: -1 },
    OffsetCoord { rows: 0, cols: 1 },
    OffsetCoord { rows: 1, cols: 1 },
    OffsetCoord { rows: 1, cols: 0 },
];

impl OffsetCoord {
    /// Converts back into a logical coordinate, if neither component is negative.
    pub fn coord(&self) -> Option<Coord> {
        if self.rows < 0 || self.cols < 0 {
            return None;
        }
        Some(Coord { row: self.rows as usize, col: self.cols as usize })
    }

    /// Constructs a new offset coord.
    pub fn new(rows: isize, cols: isize) -> OffsetCoord {
        OffsetCoord { rows, cols }
    }
}

// C -> OC

impl From<Coord> for OffsetCoord {
    fn from(value: Coord) -> Self {
        OffsetCoord {
            rows: value.row as isize,
            cols: value.col as isize,
        }
    }
}

impl From<&Coord> for OffsetCoord {
    fn from(value: &Coord) -> Self {
        OffsetCoord::from(*value)
    }
}

// OC + OC

impl Add<&OffsetCoord> for &OffsetCoord {
    type Output = OffsetCoord;
    fn add(self, rhs: &OffsetCoord) -> Self::Output {
        OffsetCoord {
            rows: self.rows + rhs.rows,
            cols: self.cols + rhs.cols,
        }
    }
}

impl Add<OffsetCoord> for OffsetCoord {
    type Output = OffsetCoord;
    fn add(self, rhs: OffsetCoord) -> Self::Output {
        &self + &rhs
    }
}

// C + OC

impl Add<&OffsetCoord> for &Coord {
    type Output = OffsetCoord;
    fn add(self, rhs: &OffsetCoord) -> Self::Output {
        &OffsetCoord::from(self) + rhs
    }
}

impl Add<&OffsetCoord> for Coord {
    type Output = OffsetCoord;
    fn add(self, rhs: &OffsetCoord) -> Self::Output {
        &self + rhs
    }
}

impl Add<OffsetCoord> for Coord {
    type Output = OffsetCoord;
    fn add(self, rhs: OffsetCoord) -> Self::Output {
        &self + &rhs
    }
}

// -OC

impl Neg for OffsetCoord {
    type Output = OffsetCoord;
    fn neg(self) -> Self::Output {
        OffsetCoord { rows: -self.rows, cols: -self.cols }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn neighbour_offsets_are_backward_offsets_and_their_mirrors() {
        for offset in BACKWARD_OFFSETS.iter() {
            assert!(NEIGHBOUR_OFFSETS.contains(offset));
            assert!(NEIGHBOUR_OFFSETS.contains(&-*offset));
        }
    }

    #[test]
    fn stepping_off_the_top_edge_has_no_coord() {
        let origin = Coord::new(0, 0);
        assert_eq!((origin + &BACKWARD_OFFSETS[0]).coord(), None);
        assert_eq!((origin + OffsetCoord::new(1, 1)).coord(), Some(Coord::new(1, 1)));
    }
}
