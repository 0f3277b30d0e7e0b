pub(crate) mod indexing;
pub(crate) mod neighbours;
pub(crate) mod pretty;
pub(crate) mod scores;

use std::cell::OnceCell;

use thiserror::Error;

use super::prelude::*;

/// Contract failures on a board; everything else in the engine is either a no-op or a terminal transition.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BoardError {
    /// A mutating access named a location outside the valid-cell set.
    #[error("invalid location ({}, {})", .0.row, .0.col)]
    InvalidLocation(Coord),

    /// A board needs at least one row, and no more cells than can be addressed and allocated.
    #[error("unsupported board size")]
    InvalidSize,

    /// A board string did not hold exactly one symbol per valid cell.
    #[error("expected {expected} cells in board notation, received {received}")]
    NotationLength { expected: usize, received: usize },
}

/// A rhombus-shaped board built from a widening upper triangle stacked on a narrowing lower triangle.
///
/// The lower triangle's rows are folded into the unused tail of the upper triangle's rows, so the
/// valid cells pack a `cols * mat_height` rectangle exactly. With five rows:
///
/// ```text
///   storage row 0:  U L L    upper (0, 0)                  lower (3, 1) (3, 2)
///   storage row 1:  U U L    upper (1, 0) (1, 1)           lower (4, 2)
///   storage row 2:  U U U    upper (2, 0) (2, 1) (2, 2)
/// ```
#[derive(Clone, Debug)]
pub struct Board {
    /// The number of physical rows.
    rows: usize,

    /// The width of the widest row, `rows / 2 + 1`.
    cols: usize,

    /// The number of rows in the upper triangle, `ceil(rows / 2)`; also the number of storage rows.
    mat_height: usize,

    /// Linear storage, one slot per valid cell.
    cells: Vec<Occupant>,

    /// Bumped by every mutation, so consumers can tell two snapshots of the board apart.
    revision: u64,

    /// Scores for the current revision, computed on first request.
    scores: OnceCell<Scores>,
}

impl Board {
    /// Builds an empty board with the given number of rows.
    pub fn new(rows: usize) -> Result<Board> {
        if rows == 0 {
            return Err(BoardError::InvalidSize.into());
        }
        let cols = rows / 2 + 1;
        let mat_height = rows.div_ceil(2);

        let Some(len) = cols.checked_mul(mat_height) else {
            return Err(BoardError::InvalidSize.into());
        };
        let mut cells = Vec::new();
        cells.try_reserve_exact(len).map_err(|_| BoardError::InvalidSize)?;
        cells.resize(len, Occupant::Empty);

        Ok(Board {
            rows,
            cols,
            mat_height,
            cells,
            revision: 0,
            scores: OnceCell::new(),
        })
    }

    /// Iterates every valid cell exactly once in row-major order, with its linear index and owner.
    ///
    /// Everything that needs to walk the board goes through here rather than re-deriving validity.
    pub fn cells(&self) -> impl Iterator<Item = (Coord, usize, Occupant)> + '_ {
        (0..self.rows)
            .flat_map(move |row| self.row_span(row).map(move |col| Coord::new(row, col)))
            .map(move |coord| {
                let index = self.index_unchecked(&coord);
                (coord, index, self.cells[index])
            })
    }

    /// Resets every valid cell to empty.
    pub fn clear(&mut self) -> &mut Self {
        self.fill(|_| Occupant::Empty)
    }

    /// The number of columns in the wide half.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Counts the cells held by the given occupant.
    pub fn count(&self, occupant: Occupant) -> usize {
        self.cells().filter(|(_, _, o)| *o == occupant).count()
    }

    /// Iterates the coordinates of every empty cell.
    pub fn empty_cells(&self) -> impl Iterator<Item = Coord> + '_ {
        self.cells().filter(|(_, _, o)| o.is_empty()).map(|(coord, _, _)| coord)
    }

    /// Rewrites every valid cell in iteration order with the value produced for it; a single mutation.
    pub fn fill(&mut self, mut f: impl FnMut(&Coord) -> Occupant) -> &mut Self {
        for row in 0..self.rows {
            for col in self.row_span(row) {
                let coord = Coord::new(row, col);
                let index = self.index_unchecked(&coord);
                self.cells[index] = f(&coord);
            }
        }
        self.touch();
        self
    }

    /// Calls `f` on every valid cell; see [`Board::cells`].
    pub fn for_each(&self, mut f: impl FnMut(Coord, usize, Occupant)) {
        self.cells().for_each(|(coord, index, occupant)| f(coord, index, occupant));
    }

    /// Whether every valid cell is owned.
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|o| !o.is_empty())
    }

    /// The number of valid cells; always equal to the size of the linear storage.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// The number of rows in the upper triangle.
    pub fn mat_height(&self) -> usize {
        self.mat_height
    }

    /// Determines the owner of the cell at a given location, or `None` if there is no such cell.
    pub fn occupant(&self, coord: &Coord) -> Option<Occupant> {
        self.index(coord).map(|index| self.cells[index])
    }

    /// The mutation counter; unchanged revisions imply unchanged occupancy.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// The number of physical rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Sets the owner of the cell at a given location; invalid locations are rejected without writing.
    pub fn set_occupant(&mut self, coord: &Coord, occupant: Occupant) -> Result<&mut Self> {
        let Some(index) = self.index(coord) else {
            return Err(BoardError::InvalidLocation(*coord).into());
        };
        self.cells[index] = occupant;
        self.touch();
        Ok(self)
    }

    /// Invalidates anything derived from the previous occupancy.
    fn touch(&mut self) {
        self.revision += 1;
        self.scores.take();
    }
}

#[cfg(test)]
mod tests {
    use crate::deadend::prelude::*;

    #[test]
    fn stores_and_recalls_every_occupant() {
        let mut board = Board::new(7).unwrap();
        let coords = board.cells().map(|(coord, _, _)| coord).collect::<Vec<_>>();
        for (i, coord) in coords.iter().enumerate() {
            let occupant = Occupant::all()[i % 3];
            board.set_occupant(coord, occupant).unwrap();
            assert_eq!(board.occupant(coord), Some(occupant));
        }
        for (i, coord) in coords.iter().enumerate() {
            assert_eq!(board.occupant(coord), Some(Occupant::all()[i % 3]));
        }
    }

    #[test]
    fn rejects_writes_outside_the_rhombus() {
        let mut board = Board::new(4).unwrap();
        for coord in [Coord::new(0, 1), Coord::new(2, 0), Coord::new(3, 1), Coord::new(4, 2), Coord::new(1, 3)] {
            let err = board.set_occupant(&coord, Occupant::PlayerOne).unwrap_err();
            assert_eq!(err.downcast_ref::<BoardError>(), Some(&BoardError::InvalidLocation(coord)));
            assert_eq!(board.occupant(&coord), None);
        }
        assert_eq!(board.count(Occupant::PlayerOne), 0);
        assert_eq!(board.revision(), 0);
    }

    #[test]
    fn rejects_empty_boards() {
        let err = Board::new(0).unwrap_err();
        assert_eq!(err.downcast_ref::<BoardError>(), Some(&BoardError::InvalidSize));
    }

    #[test]
    fn rejects_boards_too_large_to_address() {
        for rows in [usize::MAX, usize::MAX / 2, 1 << (usize::BITS - 2)] {
            let err = Board::new(rows).unwrap_err();
            assert_eq!(err.downcast_ref::<BoardError>(), Some(&BoardError::InvalidSize), "{rows} rows");
        }
    }

    #[test]
    fn clear_empties_every_cell() {
        let mut board = Board::new(6).unwrap();
        board.fill(|coord| if coord.row % 2 == 0 { Occupant::PlayerOne } else { Occupant::PlayerTwo });
        assert!(board.is_full());

        board.clear();
        assert_eq!(board.count(Occupant::Empty), board.len());
        assert_eq!(board.empty_cells().count(), board.len());
    }

    #[test]
    fn every_mutation_bumps_the_revision() {
        let mut board = Board::new(3).unwrap();
        let start = board.revision();
        board.set_occupant(&Coord::new(0, 0), Occupant::PlayerTwo).unwrap();
        board.clear();
        board.fill(|_| Occupant::PlayerOne);
        assert_eq!(board.revision(), start + 3);
    }
}
