use std::io::{self, BufRead, Write};
use std::num::{IntErrorKind, ParseIntError};
use std::path::PathBuf;

use clap::Parser;
use note_graph_core::{Config, Generator, NoteGraph, Reinforcer, Sequence};
use rand::SeedableRng;
use rand::rngs::StdRng;

/// Input that ends the session without rating the current sequence.
const QUIT_SENTINEL: &str = "-1";

/// Generate note sequences and teach the generator by rating them.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Seed for the random walk. Seeded from the OS when omitted.
    #[arg(long)]
    seed: Option<u64>,

    /// JSON configuration file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the number of discarded burn-in transitions.
    #[arg(long)]
    burn_in: Option<usize>,

    /// Override the number of notes per sequence.
    #[arg(long)]
    length: Option<usize>,

    /// Renormalize touched rows after each update.
    #[arg(long)]
    renormalize: bool,

    /// Print the strongest successors of each rated note.
    #[arg(long)]
    show_weights: bool,
}

impl Args {
    /// Builds the effective configuration: file first, then flags.
    fn config(&self) -> Result<Config, Box<dyn std::error::Error>> {
        let mut config = match &self.config {
            Some(path) => Config::from_json_str(&std::fs::read_to_string(path)?)?,
            None => Config::default(),
        };
        if let Some(burn_in) = self.burn_in {
            config.generator.burn_in = burn_in;
        }
        if let Some(length) = self.length {
            config.generator.sequence_length = length;
        }
        if self.renormalize {
            config.reinforcement.renormalize = true;
        }
        Ok(config)
    }

    /// Builds a session over a fresh graph.
    ///
    /// # Errors
    /// Fails on an unreadable config file or generator settings above their limits.
    fn session(&self) -> Result<Session, Box<dyn std::error::Error>> {
        let config = self.config()?;
        log::debug!("configuration: {config:?}");

        let rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        Ok(Session {
            graph: NoteGraph::new(),
            generator: Generator::new(config.generator)?,
            reinforcer: Reinforcer::new(config.reinforcement),
            rng,
            show_weights: self.show_weights,
        })
    }
}

/// Parses a rating line.
///
/// Integers too large for `i64` saturate, so they are still handed to the
/// rating check and rejected as out of range rather than treated as garbage.
fn parse_rating(line: &str) -> Result<i64, ParseIntError> {
    match line.parse::<i64>() {
        Ok(rating) => Ok(rating),
        Err(e) => match e.kind() {
            IntErrorKind::PosOverflow => Ok(i64::MAX),
            IntErrorKind::NegOverflow => Ok(i64::MIN),
            _ => Err(e),
        },
    }
}

/// Interactive rating session over one graph.
struct Session {
    graph: NoteGraph,
    generator: Generator,
    reinforcer: Reinforcer,
    rng: StdRng,
    show_weights: bool,
}

impl Session {
    /// Runs the generate / print / rate loop until the sentinel or end of input.
    ///
    /// # Errors
    /// Returns an error on I/O failure or on input that is not an integer.
    fn run<R: BufRead, W: Write>(&mut self, mut input: R, mut output: W) -> Result<(), Box<dyn std::error::Error>> {
        loop {
            let sequence = self.generator.generate(&self.graph, &mut self.rng);
            print_sequence(&mut output, &sequence)?;
            writeln!(output, "Rate this sequence on a 0-10 scale from bad to good\nEnter {QUIT_SENTINEL} to quit")?;
            output.flush()?;

            let mut line = String::new();
            if input.read_line(&mut line)? == 0 {
                log::info!("end of input, stopping");
                return Ok(());
            }
            let line = line.trim();
            if line == QUIT_SENTINEL {
                return Ok(());
            }

            let rating = parse_rating(line).map_err(|e| format!("invalid rating {line:?}: {e}"))?;

            match self.reinforcer.rate(&mut self.graph, &sequence, rating) {
                Ok(()) => {
                    if self.show_weights {
                        self.print_weights(&mut output, &sequence)?;
                    }
                }
                Err(e) => writeln!(output, "{e}")?,
            }
        }
    }

    fn print_weights<W: Write>(&self, output: &mut W, sequence: &Sequence) -> io::Result<()> {
        for (from, _) in sequence.transitions() {
            let top: Vec<String> = self
                .graph
                .strongest_successors(from, 3)
                .iter()
                .map(|(to, weight)| format!("{to}={weight:.3}"))
                .collect();
            writeln!(output, "  {from} -> {}", top.join(", "))?;
        }
        Ok(())
    }
}

fn print_sequence<W: Write>(output: &mut W, sequence: &Sequence) -> io::Result<()> {
    for note in sequence.notes() {
        writeln!(output, "{note}")?;
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let mut session = Args::parse().session()?;

    let stdin = io::stdin();
    session.run(stdin.lock(), io::stdout())
}
