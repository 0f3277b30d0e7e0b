use crate::deadend::prelude::*;

impl Board {
    /// The on-board neighbours of a cell that a row-major sweep reaches before the cell itself.
    pub fn backward_neighbours(&self, coord: Coord) -> impl Iterator<Item = Coord> + '_ {
        self.offset_cells(coord, &BACKWARD_OFFSETS)
    }

    /// All on-board neighbours of a cell on the triangular lattice.
    pub fn neighbours(&self, coord: Coord) -> impl Iterator<Item = Coord> + '_ {
        self.offset_cells(coord, &NEIGHBOUR_OFFSETS)
    }

    fn offset_cells(&self, coord: Coord, offsets: &'static [OffsetCoord]) -> impl Iterator<Item = Coord> + '_ {
        offsets
            .iter()
            .map(move |offset| coord + offset)
            .filter(move |candidate| self.is_valid_signed(candidate))
            .filter_map(|candidate| candidate.coord())
    }
}
