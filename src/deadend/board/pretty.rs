use itertools::Itertools;

use crate::deadend::prelude::*;

impl Board {
    /// Writes the owners of every cell in iteration order as a single string of `.`, `X` and `O`.
    pub fn notate(&self) -> String {
        self.cells().map(|(_, _, occupant)| occupant.notate()).join("")
    }

    /// Pretty-prints the board as a rhombus, staggering each row so lattice neighbours touch.
    pub fn pretty(&self) -> String {
        let margin = self.mat_height - 1;
        (0..self.rows).map(|row| {
            let span = self.row_span(row);
            let indent = 2 * span.start + margin - row;
            let cells = span.map(|col| {
                self.occupant(&Coord::new(row, col)).map_or("?".into(), |o| o.notate())
            }).join(" ");
            format!("{}{}", " ".repeat(indent), cells)
        }).join("\n")
    }
}
