use std::ops::Range;

use crate::deadend::prelude::*;

impl Board {
    /// Resolves a location to its slot in linear storage, or `None` if there is no such cell.
    pub fn index(&self, coord: &Coord) -> Option<usize> {
        if self.is_valid(coord) {
            Some(self.index_unchecked(coord))
        } else {
            None
        }
    }

    /// Determines whether a location names a cell on this board.
    ///
    /// Upper-triangle rows hold columns `0..=row`; lower-triangle rows hold the columns strictly
    /// right of `row - mat_height`, which are exactly the slots the upper rows leave free.
    pub fn is_valid(&self, coord: &Coord) -> bool {
        let Coord { row, col } = *coord;
        if row >= self.rows || col >= self.cols {
            return false;
        }
        if row < self.mat_height {
            col <= row
        } else {
            col > row - self.mat_height
        }
    }

    /// Determines whether a signed location names a cell on this board.
    pub fn is_valid_signed(&self, offset: &OffsetCoord) -> bool {
        offset.coord().is_some_and(|coord| self.is_valid(&coord))
    }
}

impl Board {
    /// Linear slot for a location, `(row mod mat_height) * cols + col`; engine use only.
    ///
    /// Meaningless for invalid locations: two of those can share a slot with a real cell.
    pub(super) fn index_unchecked(&self, coord: &Coord) -> usize {
        (coord.row % self.mat_height) * self.cols + coord.col
    }

    /// The valid columns of a row; empty past the last row.
    pub(super) fn row_span(&self, row: usize) -> Range<usize> {
        if row >= self.rows {
            0..0
        } else if row < self.mat_height {
            0..(row + 1)
        } else {
            (row - self.mat_height + 1)..self.cols
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use crate::deadend::prelude::*;

    #[test]
    fn indices_are_a_bijection_onto_storage() {
        for rows in 1..=40 {
            let board = Board::new(rows).unwrap();
            let indices = board.cells().map(|(_, index, _)| index).collect::<Vec<_>>();
            let unique = indices.iter().copied().collect::<BTreeSet<_>>();

            assert_eq!(indices.len(), board.len(), "cell count for {rows} rows");
            assert_eq!(unique.len(), indices.len(), "collision for {rows} rows");
            assert_eq!(unique, (0..board.len()).collect::<BTreeSet<_>>(), "gap for {rows} rows");
        }
    }

    #[test]
    fn iteration_agrees_with_the_validity_predicate() {
        let board = Board::new(9).unwrap();
        let visited = board.cells().map(|(coord, _, _)| coord).collect::<BTreeSet<_>>();
        for row in 0..board.rows() + 2 {
            for col in 0..board.cols() + 2 {
                let coord = Coord::new(row, col);
                assert_eq!(visited.contains(&coord), board.is_valid(&coord), "{coord}");
            }
        }
    }

    #[test]
    fn iteration_is_row_major() {
        let board = Board::new(6).unwrap();
        let coords = board.cells().map(|(coord, _, _)| coord).collect::<Vec<_>>();
        let mut sorted = coords.clone();
        sorted.sort();
        assert_eq!(coords, sorted);
    }

    #[test]
    fn geometry_of_a_four_row_board() {
        let board = Board::new(4).unwrap();
        assert_eq!((board.cols(), board.mat_height(), board.len()), (3, 2, 6));

        let layout = board.cells().map(|(coord, index, _)| (coord.row, coord.col, index)).collect::<Vec<_>>();
        assert_eq!(layout, vec![
            (0, 0, 0),
            (1, 0, 3), (1, 1, 4),
            (2, 1, 1), (2, 2, 2),
            (3, 2, 5),
        ]);
    }

    #[test]
    fn lookups_outside_the_board_find_nothing() {
        let board = Board::new(5).unwrap();
        assert_eq!(board.index(&Coord::new(0, 1)), None);
        assert_eq!(board.index(&Coord::new(3, 0)), None);
        assert_eq!(board.index(&Coord::new(5, 2)), None);
        assert!(!board.is_valid_signed(&OffsetCoord::new(-1, 0)));
        assert!(board.is_valid_signed(&OffsetCoord::new(4, 2)));
    }
}
