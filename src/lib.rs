//! Display pokemon artwork and pokedex entries in your terminal.

pub mod cli;
pub mod logger;
pub mod pokedex;
pub mod pokemon;
pub mod present;
pub mod sprites;
