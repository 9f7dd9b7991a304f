use std::io::Write;

use image::{imageops::FilterType, DynamicImage, GenericImageView};
use tracing::debug;
use ureq::Agent;

use crate::{
    pokedex::fetch,
    pokemon::{Pokemon, PokemonError},
};

/// Approximate width to height ratio of a terminal cell.
const CELL_ASPECT: f64 = 0.48;

/// Widest artwork, in columns, that will be drawn.
pub const MAX_WIDTH: u32 = 1000;

/// Tallest artwork, in terminal rows, that will be drawn.
const MAX_ROWS: u32 = 1000;

/// Something that can draw a pokemon's artwork.
pub trait Renderer {
    /// Draws `pokemon` at `width` terminal columns.
    ///
    /// # Errors
    ///
    /// Returns an error if the artwork cannot be fetched, decoded or written.
    fn render(&mut self, pokemon: &Pokemon, width: u32) -> Result<(), PokemonError>;
}

/// Trims transparent borders and resizes the artwork to `width` columns.
///
/// The result has an even number of pixel rows, two per terminal row. Width is capped at
/// [`MAX_WIDTH`] columns and height at 1000 rows.
#[must_use]
pub fn fit_to_width(img: &DynamicImage, width: u32) -> DynamicImage {
    let trimmed = showie::trim(img);
    let trimmed = if trimmed.width() == 0 || trimmed.height() == 0 {
        img.clone()
    } else {
        trimmed
    };

    let width = width.clamp(1, MAX_WIDTH);
    let (w, h) = trimmed.dimensions();
    let aspect = f64::from(h) / f64::from(w.max(1));
    let rows = (f64::from(width) * aspect * CELL_ASPECT)
        .floor()
        .clamp(1.0, f64::from(MAX_ROWS)) as u32;

    trimmed.resize_exact(width, rows * 2, FilterType::Lanczos3)
}

/// Downloads official artwork and prints it as half-block art.
pub struct TerminalRenderer<W: Write> {
    agent: Agent,
    out: W,
}

impl<W: Write> TerminalRenderer<W> {
    pub const fn new(agent: Agent, out: W) -> Self {
        Self { agent, out }
    }

    /// Decodes PNG bytes and writes them at `width` columns.
    ///
    /// # Errors
    ///
    /// Returns an error if the bytes are not a valid image or the output cannot be written.
    pub fn draw(&mut self, bytes: &[u8], width: u32) -> Result<(), PokemonError> {
        let img = image::load_from_memory(bytes)?;
        let fitted = fit_to_width(&img, width);
        debug!(
            source = ?img.dimensions(),
            fitted = ?fitted.dimensions(),
            "drawing artwork"
        );

        writeln!(self.out, "{}", showie::to_ascii(&fitted))?;
        self.out.flush()?;
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Renderer for TerminalRenderer<W> {
    fn render(&mut self, pokemon: &Pokemon, width: u32) -> Result<(), PokemonError> {
        let mut response = fetch(&self.agent, &pokemon.artwork_url, &pokemon.name)?;
        let bytes = response.body_mut().read_to_vec()?;
        self.draw(&bytes, width)
    }
}
