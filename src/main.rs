//! Display pokemon artwork and pokedex entries in your terminal.

use std::io;

use clap::Parser;
use color_eyre::eyre::WrapErr;
use pokeview::{
    cli::{Args, Config},
    logger,
    pokedex::PokeApi,
    pokemon::resolve,
    present::Presenter,
    sprites::TerminalRenderer,
};

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let config = Config::try_from(Args::parse()).wrap_err("Error reading arguments")?;
    logger::init(config.verbose);

    let pokedex = PokeApi::from_env();
    let pokemon = resolve(config.id, &pokedex).wrap_err("Error resolving pokemon")?;

    let renderer = TerminalRenderer::new(pokedex.agent().clone(), io::stdout());
    Presenter::new(io::stdout(), renderer)
        .present(&pokemon, &config)
        .wrap_err_with(|| format!("Error displaying {}", pokemon.name))?;

    Ok(())
}
