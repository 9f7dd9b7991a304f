use clap::Parser;

use crate::{
    pokemon::{Identifier, PokemonError},
    sprites::MAX_WIDTH,
};

/// Display pokemon artwork and pokedex entries in your terminal.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Show the pokedex entry instead of the artwork.
    #[arg(long)]
    pub dex: bool,

    /// Pokedex number, optionally with a variant index (e.g. 003, 003-2).
    /// A random pokemon is picked when omitted.
    #[arg(long, value_name = "ID", allow_negative_numbers = true)]
    pub id: Option<String>,

    /// Output width in characters. Defaults to the terminal width, capped at 100.
    #[arg(long, value_name = "WIDTH", allow_negative_numbers = true)]
    pub size: Option<String>,

    /// Log lookups and requests to stderr.
    #[arg(short, long)]
    pub verbose: bool,
}

/// The validated form of [`Args`] for one invocation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Config {
    pub dex: bool,
    pub id: Option<Identifier>,
    pub size: Option<u32>,
    pub verbose: bool,
}

impl TryFrom<Args> for Config {
    type Error = PokemonError;

    fn try_from(args: Args) -> Result<Self, Self::Error> {
        Ok(Self {
            dex: args.dex,
            id: args.id.as_deref().map(parse_identifier).transpose()?,
            size: args.size.as_deref().map(parse_size).transpose()?,
            verbose: args.verbose,
        })
    }
}

/// Parses an `--id` value.
///
/// # Errors
///
/// Returns `PokemonError::InvalidArgument` unless `raw` is `NNN` or `NNN-V`.
pub fn parse_identifier(raw: &str) -> Result<Identifier, PokemonError> {
    raw.parse()
}

/// Parses a `--size` value, which must be a positive integer no larger than [`MAX_WIDTH`].
///
/// # Errors
///
/// Returns `PokemonError::InvalidArgument` for zero, negative, non-numeric or oversized values.
pub fn parse_size(raw: &str) -> Result<u32, PokemonError> {
    let invalid = || PokemonError::InvalidArgument(format!("size must be a positive integer, got '{raw}'"));

    match raw.parse::<i64>() {
        Ok(size) if size > i64::from(MAX_WIDTH) => Err(PokemonError::InvalidArgument(format!(
            "size must be at most {MAX_WIDTH}, got '{raw}'"
        ))),
        Ok(size) if size > 0 => u32::try_from(size).map_err(|_| invalid()),
        _ => Err(invalid()),
    }
}
