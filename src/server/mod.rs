mod options;

use std::{
    io::{Stdout, Write},
    sync::mpsc::{self, TryRecvError},
    time::{Duration, Instant}
};

use itertools::Itertools;
use rand::{Rng, rngs::StdRng};

pub use options::ServerOptions;

use crate::prelude::*;

/// How often the event loop wakes up, standing in for a display refresh.
const FRAMES_PER_SECOND: u32 = 60;

/// Whether the event loop should keep going after a line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// A line-oriented front-end for a Deadend session.
///
/// Queries are answered as soon as they arrive; moves are queued and only take effect when the
/// session's rate limiter lets the next step through, at which point the placements are reported.
pub struct DeadendServer<R: Rng, W: Write> {
    session: Session<R>,
    out: W,
}

impl DeadendServer<StdRng, Stdout> {
    /// A server on stdout configured from the command line.
    pub fn stdio(options: &ServerOptions) -> Result<Self> {
        DeadendServer::new(options, options.rng(), std::io::stdout())
    }
}

impl<R: Rng, W: Write> DeadendServer<R, W> {
    /// Produces a new server with the given engine configuration.
    pub fn new(options: &ServerOptions, rng: R, out: W) -> Result<Self> {
        Ok(DeadendServer {
            session: Session::new(&options.session_config(), rng)?,
            out,
        })
    }

    /// Runs until `quit` or the end of stdin; lines arrive on a reader thread so the loop never blocks on input.
    pub fn run(&mut self) -> Result<()> {
        let (sender, receiver) = mpsc::channel::<String>();
        std::thread::spawn(move || {
            for line in std::io::stdin().lines() {
                let Ok(line) = line else { break };
                if sender.send(line).is_err() {
                    break;
                }
            }
        });

        let frame = Duration::from_secs(1) / FRAMES_PER_SECOND;
        let mut last = Instant::now();
        loop {
            loop {
                match receiver.try_recv() {
                    Ok(line) => {
                        if self.apply(&line)? == Flow::Quit {
                            return Ok(());
                        }
                    },
                    Err(TryRecvError::Empty) => break,
                    Err(TryRecvError::Disconnected) => {
                        log::debug!("input closed; flushing {} queued commands", self.session.pending());
                        if self.session.pending() > 0 {
                            let report = self.session.step();
                            self.report(&report)?;
                        }
                        return Ok(());
                    }
                }
            }

            let now = Instant::now();
            if let Some(report) = self.session.tick(now - last) {
                self.report(&report)?;
            }
            last = now;
            std::thread::sleep(frame);
        }
    }

    /// Handles one line of input.
    pub fn apply(&mut self, line: &str) -> Result<Flow> {
        let line = line.trim();
        let cmd = line.split_whitespace().next().unwrap_or("");

        let result = match cmd {
            | "" => return Ok(Flow::Continue),
            | "board" => self.board(),
            | "info" => self.info(),
            | "neighbours" => self.neighbours(line),
            | "newgame" | "place" | "reset" => self.enqueue(line),
            | "quit" => return Ok(Flow::Quit),
            | "score" => self.score(),
            | "step" => self.step(),
            | "turn" => self.turn(),
            | _ => Err(anyhow!("unrecognized command {cmd}")),
        };

        match result {
            Ok(_) => {
                log::debug!("Command completed successfully: {line}");
                self.ok()?;
            },
            Err(err) => {
                log::warn!("encountered recoverable error:\n{err}");
                self.err(&err)?;
            },
        }
        Ok(Flow::Continue)
    }

    /// The session being served.
    pub fn session(&self) -> &Session<R> {
        &self.session
    }

    fn board(&mut self) -> Result<()> {
        let pretty = self.session.board().pretty();
        writeln!(self.out, "{pretty}")?;
        Ok(())
    }

    fn enqueue(&mut self, line: &str) -> Result<()> {
        let command = line.parse::<Command>()?;
        self.session.enqueue(command);
        writeln!(self.out, "queued {}", command.notate())?;
        Ok(())
    }

    /// Lists the cells adjacent to a coordinate with their owners.
    fn neighbours(&mut self, line: &str) -> Result<()> {
        let rest = line.split_once(char::is_whitespace).map_or("", |(_, rest)| rest);
        let coord = rest.parse::<Coord>()?;
        let board = self.session.board();
        if !board.is_valid(&coord) {
            return Err(BoardError::InvalidLocation(coord).into());
        }
        let listing = board
            .neighbours(coord)
            .map(|n| format!("{} {}", n.notate(), board.occupant(&n).unwrap_or_default()))
            .join("\n");
        writeln!(self.out, "{listing}")?;
        Ok(())
    }

    fn score(&mut self) -> Result<()> {
        let scores = self.session.scores();
        for player in [Player::One, Player::Two] {
            let territory = scores.of(player);
            writeln!(
                self.out,
                "{} {:.3} {:.3} {}",
                player.notate(), territory.score, territory.estimate, territory.groups
            )?;
        }
        Ok(())
    }

    fn step(&mut self) -> Result<()> {
        let report = self.session.step();
        self.report(&report)
    }

    fn turn(&mut self) -> Result<()> {
        let turn = self.session.turn();
        writeln!(self.out, "{}", turn.notate())?;
        Ok(())
    }

    /// Prints one line per placement, then the board whenever the step changed anything.
    fn report(&mut self, report: &StepReport) -> Result<()> {
        if report.commands == 0 && report.placements.is_empty() {
            return Ok(());
        }
        let placed = report.placements.iter().map(|p| format!("placed {} {}", p.coord.notate(), p.player.notate())).join("\n");
        if !placed.is_empty() {
            writeln!(self.out, "{placed}")?;
        }
        self.board()?;
        self.turn()?;
        self.out.flush()?;
        Ok(())
    }

    // basic printers

    /// Prints the server's ID.
    fn info(&mut self) -> Result<()> {
        writeln!(self.out, "id {} v{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))?;
        Ok(())
    }

    /// Prints an error to the output stream.
    fn err(&mut self, err: &Error) -> Result<()> {
        writeln!(self.out, "err\n{err}")?;
        self.ok()
    }

    /// Prints the ok footer to the output stream.
    fn ok(&mut self) -> Result<()> {
        writeln!(self.out, "ok")?;
        self.out.flush()?;
        Ok(())
    }
}
