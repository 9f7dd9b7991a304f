//! Turns a resolved [`Pokemon`] into terminal output.

use std::io::{self, Write};

use terminal_size::{terminal_size, Width};
use tracing::debug;

use crate::{
    cli::Config,
    pokemon::{Pokemon, PokemonError},
    sprites::Renderer,
};

const FALLBACK_TERMINAL_WIDTH: u32 = 80;
const MAX_AUTO_WIDTH: u32 = 100;
const ART_MARGIN: u32 = 4;
const LABEL_WIDTH: usize = 12;

/// Width of the attached terminal, or 80 columns when there is none.
#[must_use]
pub fn terminal_width() -> u32 {
    terminal_size()
        .map(|(Width(w), _)| u32::from(w))
        .unwrap_or(FALLBACK_TERMINAL_WIDTH)
}

/// Columns to draw artwork at.
#[must_use]
pub fn art_width(requested: Option<u32>, terminal: u32) -> u32 {
    requested.unwrap_or_else(|| terminal.saturating_sub(ART_MARGIN).clamp(1, MAX_AUTO_WIDTH))
}

/// Columns to wrap pokedex text at.
#[must_use]
pub fn text_width(requested: Option<u32>, terminal: u32) -> u32 {
    requested.unwrap_or_else(|| terminal.clamp(1, MAX_AUTO_WIDTH))
}

/// Prints either the pokedex entry or the artwork of a pokemon.
pub struct Presenter<W: Write, R: Renderer> {
    out: W,
    renderer: R,
    terminal_width: u32,
}

impl<W: Write, R: Renderer> Presenter<W, R> {
    pub fn new(out: W, renderer: R) -> Self {
        Self {
            out,
            renderer,
            terminal_width: terminal_width(),
        }
    }

    #[must_use]
    pub fn with_terminal_width(mut self, width: u32) -> Self {
        self.terminal_width = width;
        self
    }

    /// Presents `pokemon` according to `config`.
    ///
    /// In dex mode only text is written and the renderer is never called.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails, or if the renderer fails in artwork mode.
    pub fn present(&mut self, pokemon: &Pokemon, config: &Config) -> Result<(), PokemonError> {
        writeln!(self.out, "{} (#{})", pokemon.name, pokemon.pokemon_id)?;

        if config.dex {
            let width = text_width(config.size, self.terminal_width);
            debug!(width, "printing pokedex entry");
            self.print_dex(pokemon, width as usize)?;
            return Ok(());
        }

        let width = art_width(config.size, self.terminal_width);
        debug!(width, url = %pokemon.artwork_url, "rendering artwork");
        self.out.flush()?;
        self.renderer.render(pokemon, width)
    }

    fn print_dex(&mut self, pokemon: &Pokemon, width: usize) -> io::Result<()> {
        let vitals = &pokemon.vitals;
        let mut rows: Vec<(&str, Vec<String>)> = vec![
            ("National №", vec![format!("{:04}", pokemon.id.base)]),
            ("Type", vec![vitals.types.join(" / ")]),
        ];
        if let Some(genus) = &pokemon.genus {
            rows.push(("Species", vec![genus.clone()]));
        }
        rows.push(("Height", vec![format!("{:.1} m", f64::from(vitals.height) / 10.0)]));
        rows.push(("Weight", vec![format!("{:.1} kg", f64::from(vitals.weight) / 10.0)]));

        let mut regular = 0;
        let abilities = vitals
            .abilities
            .iter()
            .map(|ability| {
                if ability.hidden {
                    format!("{} (hidden ability)", ability.name)
                } else {
                    regular += 1;
                    format!("{regular}. {}", ability.name)
                }
            })
            .collect::<Vec<_>>();
        if !abilities.is_empty() {
            rows.push(("Abilities", abilities));
        }

        writeln!(self.out)?;
        writeln!(self.out, "Pokédex Data")?;
        for (label, lines) in rows {
            for (i, line) in lines.iter().enumerate() {
                let label = if i == 0 { label } else { "" };
                writeln!(self.out, "  {label:<LABEL_WIDTH$}{line}")?;
            }
        }

        if let Some(text) = &pokemon.flavor_text {
            writeln!(self.out)?;
            writeln!(self.out, "Description")?;
            for line in textwrap::wrap(text, width.max(1)) {
                writeln!(self.out, "{line}")?;
            }
        }

        self.out.flush()
    }

    pub fn into_parts(self) -> (W, R) {
        (self.out, self.renderer)
    }
}
