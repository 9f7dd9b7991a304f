#![warn(clippy::all, clippy::pedantic, clippy::nursery)]

use std::{fmt, ops::RangeInclusive, str::FromStr};

use rand::Rng;
use tracing::{debug, info};

use crate::pokedex::Pokedex;

/// Error types for Pokemon operations.
#[derive(Debug, thiserror::Error)]
pub enum PokemonError {
    /// A flag value could not be interpreted.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The identifier has no corresponding record.
    #[error("Pokemon '{0}' not found")]
    NotFound(String),

    /// A request to the pokedex or artwork host failed.
    #[error("Request failed: {0}")]
    Http(#[from] ureq::Error),

    /// Failed to decode pokemon artwork.
    #[error("Failed to load pokemon artwork: {0}")]
    Image(#[from] image::ImageError),

    /// Failed to write to the terminal.
    #[error("Failed to write output: {0}")]
    Io(#[from] std::io::Error),
}

/// Highest national pokedex number that has a record.
pub const MAX_DEX_ID: u32 = 1025;

/// Every base identifier a random draw can land on.
pub const DEX_RANGE: RangeInclusive<u32> = 1..=MAX_DEX_ID;

/// A pokedex number with an optional, 1-based variant index.
///
/// Written as `NNN` or `NNN-V`, for example `003` or `003-2`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Identifier {
    pub base: u32,
    pub variant: Option<u32>,
}

impl Identifier {
    #[must_use]
    pub const fn new(base: u32, variant: Option<u32>) -> Self {
        Self { base, variant }
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:03}", self.base)?;
        if let Some(variant) = self.variant {
            write!(f, "-{variant}")?;
        }
        Ok(())
    }
}

impl FromStr for Identifier {
    type Err = PokemonError;

    /// Parses `NNN` or `NNN-V`. Anything else is a [`PokemonError::InvalidArgument`].
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let invalid = || {
            PokemonError::InvalidArgument(format!(
                "'{raw}' is not a valid pokemon ID (expected NNN or NNN-V, e.g. 003 or 003-2)"
            ))
        };
        let number = |part: &str| {
            if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
                return Err(invalid());
            }
            part.parse::<u32>().map_err(|_| invalid())
        };

        let (base, variant) = match raw.split_once('-') {
            Some((base, variant)) => (base, Some(variant)),
            None => (raw, None),
        };

        Ok(Self {
            base: number(base)?,
            variant: variant.map(number).transpose()?,
        })
    }
}

/// User selection type
#[derive(Debug, PartialEq, Eq)]
pub enum Selection {
    Random,
    Id(Identifier),
}

impl From<Option<Identifier>> for Selection {
    fn from(requested: Option<Identifier>) -> Self {
        requested.map_or(Self::Random, Self::Id)
    }
}

impl Selection {
    /// Evaluates the selection to a concrete identifier.
    ///
    /// Random selections draw a base uniformly from [`DEX_RANGE`] and never carry a variant.
    #[must_use]
    pub fn eval(self) -> Identifier {
        match self {
            Self::Random => Identifier::new(rand::thread_rng().gen_range(DEX_RANGE), None),
            Self::Id(id) => id,
        }
    }
}

/// A single ability, as listed in the pokedex.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ability {
    pub name: String,
    pub hidden: bool,
}

/// Physical data shown in the pokedex table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Vitals {
    pub types: Vec<String>,
    /// Height in decimetres.
    pub height: u32,
    /// Weight in hectograms.
    pub weight: u32,
    pub abilities: Vec<Ability>,
}

/// Represents a Pokemon's data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pokemon {
    /// The identifier this record was resolved from.
    pub id: Identifier,
    /// Numeric id of the variety, which also names its artwork file.
    pub pokemon_id: u32,
    /// Variety slug, e.g. `venusaur-mega`.
    pub slug: String,
    /// Species slug, e.g. `venusaur`.
    pub species: String,
    /// Proper display name, e.g. `Venusaur (Mega)`.
    pub name: String,
    pub genus: Option<String>,
    pub flavor_text: Option<String>,
    pub vitals: Vitals,
    pub artwork_url: String,
}

/// Resolves the requested identifier, or a random one, to a record.
///
/// # Errors
///
/// Returns `PokemonError::NotFound` if the identifier has no record, or whatever the
/// [`Pokedex`] reports when the lookup itself fails.
pub fn resolve(requested: Option<Identifier>, pokedex: &impl Pokedex) -> Result<Pokemon, PokemonError> {
    let selection = Selection::from(requested);
    let is_random = selection == Selection::Random;
    let id = selection.eval();

    debug!(%id, is_random, "resolving pokemon");
    let pokemon = pokedex.lookup(&id)?;
    info!(%id, name = %pokemon.name, pokemon_id = pokemon.pokemon_id, "resolved pokemon");

    Ok(pokemon)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    struct FakeDex(HashMap<Identifier, Pokemon>);

    impl Pokedex for FakeDex {
        fn lookup(&self, id: &Identifier) -> Result<Pokemon, PokemonError> {
            let key = Identifier::new(id.base, id.variant.filter(|&v| v != 1));
            self.0
                .get(&key)
                .cloned()
                .ok_or_else(|| PokemonError::NotFound(id.to_string()))
        }
    }

    fn record(base: u32, variant: Option<u32>, pokemon_id: u32, slug: &str, name: &str) -> Pokemon {
        Pokemon {
            id: Identifier::new(base, variant),
            pokemon_id,
            slug: slug.to_string(),
            species: slug.split('-').next().unwrap().to_string(),
            name: name.to_string(),
            genus: None,
            flavor_text: None,
            vitals: Vitals::default(),
            artwork_url: format!("https://example.invalid/{pokemon_id}.png"),
        }
    }

    fn fake_dex() -> FakeDex {
        let mut map = HashMap::new();
        for base in DEX_RANGE {
            map.insert(
                Identifier::new(base, None),
                record(base, None, base, &format!("mon{base}"), &format!("Mon {base}")),
            );
        }
        map.insert(
            Identifier::new(3, Some(2)),
            record(3, Some(2), 10033, "venusaur-mega", "Venusaur (Mega)"),
        );
        FakeDex(map)
    }

    #[test]
    fn parses_plain_and_variant_ids() {
        assert_eq!("003".parse::<Identifier>().unwrap(), Identifier::new(3, None));
        assert_eq!("25".parse::<Identifier>().unwrap(), Identifier::new(25, None));
        assert_eq!("003-2".parse::<Identifier>().unwrap(), Identifier::new(3, Some(2)));
        assert_eq!("1025-01".parse::<Identifier>().unwrap(), Identifier::new(1025, Some(1)));
    }

    #[test]
    fn rejects_malformed_ids() {
        for raw in ["", "abc", "-3", "3-", "-", "3-2-1", "3a", " 3", "3.0", "+3", "pikachu", "99999999999"] {
            let err = raw.parse::<Identifier>().unwrap_err();
            assert!(
                matches!(err, PokemonError::InvalidArgument(_)),
                "expected InvalidArgument for {raw:?}, got {err:?}"
            );
        }
    }

    #[test]
    fn displays_zero_padded() {
        assert_eq!(Identifier::new(3, None).to_string(), "003");
        assert_eq!(Identifier::new(3, Some(2)).to_string(), "003-2");
        assert_eq!(Identifier::new(1025, None).to_string(), "1025");
    }

    #[test]
    fn random_selection_stays_in_range() {
        for _ in 0..2000 {
            let id = Selection::Random.eval();
            assert!(DEX_RANGE.contains(&id.base), "{id} out of range");
            assert_eq!(id.variant, None);
        }
    }

    #[test]
    fn explicit_selection_is_kept() {
        let id = Identifier::new(3, Some(2));
        assert_eq!(Selection::from(Some(id)).eval(), id);
        assert_eq!(Selection::from(None), Selection::Random);
    }

    #[test]
    fn resolves_every_plain_id() {
        let dex = fake_dex();
        for base in [1, 3, 25, 151, MAX_DEX_ID] {
            let pokemon = resolve(Some(Identifier::new(base, None)), &dex).unwrap();
            assert_eq!(pokemon.id.base, base);
        }
    }

    #[test]
    fn variant_resolves_distinctly() {
        let dex = fake_dex();
        let plain = resolve(Some("003".parse().unwrap()), &dex).unwrap();
        let mega = resolve(Some("003-2".parse().unwrap()), &dex).unwrap();

        assert_ne!(plain, mega);
        assert_eq!(mega.slug, "venusaur-mega");
        assert_eq!(mega.pokemon_id, 10033);
    }

    #[test]
    fn missing_records_are_not_found() {
        let dex = fake_dex();
        for raw in ["0", "1026", "003-9", "025-2"] {
            let err = resolve(Some(raw.parse().unwrap()), &dex).unwrap_err();
            assert!(matches!(err, PokemonError::NotFound(_)), "{raw}: {err:?}");
        }
    }

    #[test]
    fn random_resolution_succeeds() {
        let dex = fake_dex();
        for _ in 0..100 {
            let pokemon = resolve(None, &dex).unwrap();
            assert!(DEX_RANGE.contains(&pokemon.id.base));
        }
    }
}
