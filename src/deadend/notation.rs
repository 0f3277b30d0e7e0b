use std::sync::OnceLock;

use regex::Regex;

use crate::deadend::prelude::*;

static COORD_PATTERN: OnceLock<Regex> = OnceLock::new();

fn coord_pattern() -> Result<&'static Regex> {
    if let Some(pattern) = COORD_PATTERN.get() {
        return Ok(pattern);
    }
    let pattern = Regex::new(r"^\(?\s*(?<row>[0-9]+)\s*[,\s]\s*(?<col>[0-9]+)\s*\)?$")?;
    Ok(COORD_PATTERN.get_or_init(|| pattern))
}

/// Parses `row,col`, `row col` or `(row, col)`.
impl std::str::FromStr for Coord {
    type Err = Error;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let Some(matches) = coord_pattern()?.captures(s.trim()) else {
            return Err(anyhow!("could not parse coordinate {s}"));
        };
        let [row, col] = ["row", "col"].map(|name| matches.name(name).map_or("", |m| m.as_str()).parse::<usize>());
        Ok(Coord { row: row?, col: col? })
    }
}

/// Parses `place <coord>`, `reset` and `newgame`.
impl std::str::FromStr for Command {
    type Err = Error;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let s = s.trim();
        let (verb, rest) = s.split_once(char::is_whitespace).unwrap_or((s, ""));
        match verb {
            "place"   => Ok(Command::PlaceAt(rest.parse::<Coord>()?)),
            "reset"   => Ok(Command::ResetBoard),
            "newgame" => Ok(Command::NewGame),
            _         => Err(anyhow!("unrecognized command {verb}"))
        }
    }
}

impl Command {
    /// The canonical notation for the command.
    pub fn notate(&self) -> String {
        match self {
            Command::PlaceAt(coord) => format!("place {}", coord.notate()),
            Command::ResetBoard     => "reset".into(),
            Command::NewGame        => "newgame".into()
        }
    }
}

impl Board {
    /// Reads a board written by [`Board::notate`]; whitespace between symbols is ignored.
    pub fn from_notation(rows: usize, s: &str) -> Result<Board> {
        let symbols = s.chars().filter(|ch| !ch.is_whitespace()).collect::<Vec<char>>();
        let mut board = Board::new(rows)?;
        if symbols.len() != board.len() {
            return Err(BoardError::NotationLength { expected: board.len(), received: symbols.len() }.into());
        }

        let occupants = symbols
            .iter()
            .map(|ch| Occupant::parse(&ch.to_string()))
            .collect::<Result<Vec<Occupant>>>()?;
        let mut next = occupants.into_iter();
        board.fill(|_| next.next().unwrap_or_default());
        Ok(board)
    }
}
