use crate::utils::prelude::*;

pub const DEFAULT_ROWS: usize = 16;
pub const STEPS_PER_SECOND: u32 = 30;

// A side in the game.
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Player {
    One = 0,
    Two = 1,
}

impl Player {
    /// Notates the player.
    pub fn notate(&self) -> String {
        self.occupant().notate()
    }

    /// The occupant this player leaves behind on a cell.
    pub fn occupant(&self) -> Occupant {
        Occupant::from(*self)
    }
}

impl Neg for Player {
    type Output = Player;
    fn neg(self) -> Self::Output {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One
        }
    }
}

// The ownership state of a single cell.
#[repr(u8)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Occupant {
    #[default]
    Empty = 0,
    PlayerOne = 1,
    PlayerTwo = 2,
}

impl Occupant {
    /// Gets every occupant in discriminant order.
    pub fn all() -> [Occupant; 3] {
        [Occupant::Empty, Occupant::PlayerOne, Occupant::PlayerTwo]
    }

    /// Whether nobody owns the cell.
    pub fn is_empty(&self) -> bool {
        matches!(self, Occupant::Empty)
    }

    /// Notates the occupant.
    pub fn notate(&self) -> String {
        match self {
            Occupant::Empty     => ".",
            Occupant::PlayerOne => "X",
            Occupant::PlayerTwo => "O"
        }.into()
    }

    /// Parses into an occupant.
    pub fn parse(s: &str) -> Result<Occupant> {
        match s {
            "x" | "X"       => Ok(Occupant::PlayerOne),
            "o" | "O"       => Ok(Occupant::PlayerTwo),
            "_" | "-" | "." => Ok(Occupant::Empty),
            _               => Err(anyhow!("invalid notation {s} for occupant"))
        }
    }

    /// The owning player, if any.
    pub fn player(&self) -> Option<Player> {
        match self {
            Occupant::Empty     => None,
            Occupant::PlayerOne => Some(Player::One),
            Occupant::PlayerTwo => Some(Player::Two)
        }
    }
}

impl From<Player> for Occupant {
    fn from(value: Player) -> Self {
        match value {
            Player::One => Occupant::PlayerOne,
            Player::Two => Occupant::PlayerTwo
        }
    }
}

impl std::fmt::Display for Occupant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.notate())
    }
}

impl std::str::FromStr for Occupant {
    type Err = Error;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Occupant::parse(s)
    }
}
