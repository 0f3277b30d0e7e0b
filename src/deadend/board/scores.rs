use super::*;

/// One player's standing, derived from the sizes of their connected groups.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Territory {
    /// `log2` of the product of the player's group sizes; zero with no groups or only singletons.
    pub score: f64,

    /// The number of doublings held: each group of size `s` adds `floor(log2 s)` plus the linear
    /// fraction of the way to the next power of two.
    pub estimate: f64,

    /// The number of groups the player holds.
    pub groups: usize,
}

impl Territory {
    fn absorb(&mut self, size: usize) {
        let doublings = size.ilog2();
        let base = (1usize << doublings) as f64;
        self.score += (size as f64).log2();
        self.estimate += doublings as f64 + (size as f64 - base) / base;
        self.groups += 1;
    }
}

/// Both players' standing for one revision of a board.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Scores {
    pub player_one: Territory,
    pub player_two: Territory,

    /// The board revision these scores were computed from.
    pub revision: u64,
}

impl Scores {
    /// The player with the strictly higher score, if any.
    pub fn leader(&self) -> Option<Player> {
        match self.player_one.score.partial_cmp(&self.player_two.score) {
            Some(std::cmp::Ordering::Greater) => Some(Player::One),
            Some(std::cmp::Ordering::Less)    => Some(Player::Two),
            _                                 => None
        }
    }

    /// The given player's territory.
    pub fn of(&self, player: Player) -> &Territory {
        match player {
            Player::One => &self.player_one,
            Player::Two => &self.player_two
        }
    }
}

impl Board {
    /// Gets the scores for the current occupancy, computing them at most once per revision.
    pub fn scores(&self) -> Scores {
        *self.scores.get_or_init(|| self.compute_scores())
    }

    /// Groups same-owner cells with a fresh forest and reduces the groups to per-player scores.
    ///
    /// Each owned cell is only joined with its backward neighbours; the forward ones join it when
    /// the sweep reaches them, so every adjacent pair is considered exactly once.
    fn compute_scores(&self) -> Scores {
        let mut colors = vec![Occupant::Empty; self.len()];
        self.for_each(|_, index, occupant| colors[index] = occupant);

        let mut forest = Forest::new(colors);
        for (coord, index, occupant) in self.cells() {
            if occupant.is_empty() {
                forest.erase(index);
                continue;
            }
            for neighbour in self.backward_neighbours(coord) {
                if self.occupant(&neighbour) == Some(occupant) {
                    forest.union(index, self.index_unchecked(&neighbour));
                }
            }
        }

        let mut scores = Scores { revision: self.revision, ..Scores::default() };
        forest.for_each_root(|_, size, color| match color.player() {
            Some(Player::One) => scores.player_one.absorb(size),
            Some(Player::Two) => scores.player_two.absorb(size),
            None              => {}
        });
        log::trace!("scored revision {}: {:?}", self.revision, scores);
        scores
    }
}

#[cfg(test)]
mod tests {
    use crate::deadend::prelude::*;

    const EPS: f64 = 1e-9;

    fn board_of(rows: usize, owners: &[((usize, usize), Occupant)]) -> Board {
        let mut board = Board::new(rows).unwrap();
        for &((row, col), occupant) in owners {
            board.set_occupant(&Coord::new(row, col), occupant).unwrap();
        }
        board
    }

    #[test]
    fn an_empty_board_scores_nothing() {
        let scores = Board::new(6).unwrap().scores();
        assert_eq!(scores.player_one, Territory::default());
        assert_eq!(scores.player_two, Territory::default());
        assert_eq!(scores.leader(), None);
    }

    #[test]
    fn a_connected_triangle_is_one_group() {
        let board = board_of(3, &[
            ((0, 0), Occupant::PlayerOne),
            ((1, 0), Occupant::PlayerOne),
            ((1, 1), Occupant::PlayerOne),
        ]);
        let scores = board.scores();
        assert!((scores.player_one.score - 3f64.log2()).abs() < EPS);
        assert!((scores.player_one.estimate - 1.5).abs() < EPS);
        assert_eq!(scores.player_one.groups, 1);
        assert_eq!(scores.player_two, Territory::default());
        assert_eq!(scores.leader(), Some(Player::One));
    }

    #[test]
    fn singletons_score_zero_but_count_as_groups() {
        let board = board_of(3, &[
            ((0, 0), Occupant::PlayerOne),
            ((1, 0), Occupant::PlayerTwo),
            ((1, 1), Occupant::PlayerTwo),
            ((2, 1), Occupant::PlayerOne),
        ]);
        let scores = board.scores();
        assert!(scores.player_one.score.abs() < EPS);
        assert!(scores.player_one.estimate.abs() < EPS);
        assert_eq!(scores.player_one.groups, 2);
        assert!((scores.player_two.score - 1.0).abs() < EPS);
        assert!((scores.player_two.estimate - 1.0).abs() < EPS);
        assert_eq!(scores.of(Player::Two).groups, 1);
    }

    #[test]
    fn owning_the_whole_board_scores_its_size() {
        let mut board = Board::new(11).unwrap();
        board.fill(|_| Occupant::PlayerTwo);
        let scores = board.scores();
        assert!((scores.player_two.score - (board.len() as f64).log2()).abs() < EPS);
        assert_eq!(scores.player_two.groups, 1);
        assert_eq!(scores.player_one.groups, 0);
    }

    #[test]
    fn products_are_taken_before_the_logarithm() {
        // two separate groups of two: log2(2 * 2)
        let board = board_of(5, &[
            ((0, 0), Occupant::PlayerOne),
            ((1, 0), Occupant::PlayerOne),
            ((4, 2), Occupant::PlayerOne),
            ((3, 2), Occupant::PlayerOne),
        ]);
        let scores = board.scores();
        assert_eq!(scores.player_one.groups, 2);
        assert!((scores.player_one.score - 2.0).abs() < EPS);
        assert!((scores.player_one.estimate - 2.0).abs() < EPS);
    }

    #[test]
    fn groups_only_join_through_adjacent_cells() {
        // (0, 0) and (2, 1) share no edge; the empty cells between them do not bridge
        let board = board_of(3, &[
            ((0, 0), Occupant::PlayerOne),
            ((2, 1), Occupant::PlayerOne),
        ]);
        assert_eq!(board.scores().player_one.groups, 2);
    }

    #[test]
    fn repeated_requests_hit_the_cache() {
        let board = board_of(4, &[((1, 1), Occupant::PlayerOne), ((2, 1), Occupant::PlayerOne)]);
        let first = board.scores();
        let second = board.scores();
        assert_eq!(first, second);
        assert_eq!(first.revision, board.revision());
    }

    #[test]
    fn mutations_invalidate_the_cache() {
        let mut board = board_of(4, &[((1, 1), Occupant::PlayerOne), ((2, 1), Occupant::PlayerOne)]);
        let before = board.scores();

        board.set_occupant(&Coord::new(2, 1), Occupant::PlayerTwo).unwrap();
        let after = board.scores();
        assert_ne!(after.revision, before.revision);
        assert_eq!(after.player_one.groups, 1);
        assert_eq!(after.player_two.groups, 1);
        assert!(after.player_one.score.abs() < EPS);

        board.clear();
        let cleared = board.scores();
        assert_ne!(cleared.revision, after.revision);
        assert_eq!(cleared.player_one.groups + cleared.player_two.groups, 0);
    }
}
