//! Pokedex records, looked up from [PokeAPI](https://pokeapi.co).
//!
//! A species owns a list of varieties (the default form first, then megas, regional forms
//! and so on). The variant index of an [`Identifier`] picks one of them, 1-based.

use inflector::Inflector;
use serde::{de::DeserializeOwned, Deserialize};
use tracing::debug;
use ureq::{http::Response, Agent, Body};

use crate::pokemon::{Ability, Identifier, Pokemon, PokemonError, Vitals};

pub const DEFAULT_API_URL: &str = "https://pokeapi.co/api/v2";
pub const DEFAULT_ARTWORK_URL: &str =
    "https://raw.githubusercontent.com/PokeAPI/sprites/master/sprites/pokemon/other/official-artwork";

const API_URL_VAR: &str = "POKEVIEW_API_URL";
const ARTWORK_URL_VAR: &str = "POKEVIEW_ARTWORK_URL";
const LANGUAGE: &str = "en";

/// A source of pokemon records, keyed by identifier.
pub trait Pokedex {
    /// Looks up the record for `id`.
    ///
    /// # Errors
    ///
    /// Returns `PokemonError::NotFound` if no record exists for `id`.
    fn lookup(&self, id: &Identifier) -> Result<Pokemon, PokemonError>;
}

#[derive(Debug, Deserialize)]
struct NamedResource {
    name: String,
}

#[derive(Debug, Deserialize)]
struct Variety {
    pokemon: NamedResource,
}

#[derive(Debug, Deserialize)]
struct Genus {
    genus: String,
    language: NamedResource,
}

#[derive(Debug, Deserialize)]
struct FlavorText {
    flavor_text: String,
    language: NamedResource,
}

#[derive(Debug, Deserialize)]
struct Species {
    name: String,
    varieties: Vec<Variety>,
    #[serde(default)]
    genera: Vec<Genus>,
    #[serde(default)]
    flavor_text_entries: Vec<FlavorText>,
}

#[derive(Debug, Deserialize)]
struct TypeSlot {
    slot: u8,
    #[serde(rename = "type")]
    kind: NamedResource,
}

#[derive(Debug, Deserialize)]
struct AbilitySlot {
    ability: NamedResource,
    is_hidden: bool,
    slot: u8,
}

#[derive(Debug, Deserialize)]
struct PokemonData {
    id: u32,
    name: String,
    height: u32,
    weight: u32,
    #[serde(default)]
    types: Vec<TypeSlot>,
    #[serde(default)]
    abilities: Vec<AbilitySlot>,
}

impl Species {
    /// Picks the variety a variant index refers to. No index means the default variety.
    fn variety(&self, variant: Option<u32>) -> Option<&Variety> {
        let index = variant.unwrap_or(1).checked_sub(1)?;
        self.varieties.get(usize::try_from(index).ok()?)
    }

    fn genus(&self) -> Option<String> {
        self.genera
            .iter()
            .find(|g| g.language.name == LANGUAGE)
            .map(|g| g.genus.clone())
    }

    /// The newest english entry, with the line breaks the games embed collapsed.
    fn flavor_text(&self) -> Option<String> {
        self.flavor_text_entries
            .iter()
            .rev()
            .find(|f| f.language.name == LANGUAGE)
            .map(|f| f.flavor_text.split_whitespace().collect::<Vec<_>>().join(" "))
    }
}

impl PokemonData {
    fn vitals(&self) -> Vitals {
        let mut types: Vec<&TypeSlot> = self.types.iter().collect();
        types.sort_by_key(|t| t.slot);

        let mut abilities: Vec<&AbilitySlot> = self.abilities.iter().collect();
        abilities.sort_by_key(|a| a.slot);

        Vitals {
            types: types.iter().map(|t| title(&t.kind.name)).collect(),
            height: self.height,
            weight: self.weight,
            abilities: abilities
                .iter()
                .map(|a| Ability {
                    name: title(&a.ability.name),
                    hidden: a.is_hidden,
                })
                .collect(),
        }
    }
}

fn title(slug: &str) -> String {
    slug.replace('-', " ").to_title_case()
}

/// Builds the display name of a variety.
///
/// # Examples
///
/// ```
/// use pokeview::pokedex::format_name;
/// assert_eq!(format_name("venusaur", "venusaur", None), "Venusaur");
/// assert_eq!(format_name("charizard", "charizard-mega-x", Some(2)), "Charizard (Mega X)");
/// ```
#[must_use]
pub fn format_name(species: &str, variety: &str, variant: Option<u32>) -> String {
    let name = title(species);

    match variant {
        Some(index) if index > 1 => {
            let suffix = variety.replace(species, "");
            let suffix = suffix.trim_matches('-');
            if suffix.is_empty() {
                format!("{name} (Form {index})")
            } else {
                format!("{name} ({})", title(suffix))
            }
        }
        _ => name,
    }
}

/// Issues a GET request, turning a 404 into [`PokemonError::NotFound`].
pub(crate) fn fetch(agent: &Agent, url: &str, what: &str) -> Result<Response<Body>, PokemonError> {
    debug!(url, "GET");
    agent.get(url).call().map_err(|err| match err {
        ureq::Error::StatusCode(404) => PokemonError::NotFound(what.to_string()),
        err => PokemonError::Http(err),
    })
}

/// A [`Pokedex`] backed by the PokeAPI REST service.
#[derive(Clone)]
pub struct PokeApi {
    agent: Agent,
    api_url: String,
    artwork_url: String,
}

impl Default for PokeApi {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL, DEFAULT_ARTWORK_URL)
    }
}

impl PokeApi {
    #[must_use]
    pub fn new(api_url: impl Into<String>, artwork_url: impl Into<String>) -> Self {
        Self {
            agent: Agent::new_with_defaults(),
            api_url: api_url.into().trim_end_matches('/').to_string(),
            artwork_url: artwork_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Reads the service URLs from `POKEVIEW_API_URL` and `POKEVIEW_ARTWORK_URL`,
    /// falling back to the public PokeAPI hosts.
    #[must_use]
    pub fn from_env() -> Self {
        let api_url = std::env::var(API_URL_VAR).unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        let artwork_url =
            std::env::var(ARTWORK_URL_VAR).unwrap_or_else(|_| DEFAULT_ARTWORK_URL.to_string());

        Self::new(api_url, artwork_url)
    }

    /// The HTTP agent, shared with the renderer.
    #[must_use]
    pub const fn agent(&self) -> &Agent {
        &self.agent
    }

    fn get<T: DeserializeOwned>(&self, path: &str, what: &str) -> Result<T, PokemonError> {
        let url = format!("{}/{path}/", self.api_url);
        let mut response = fetch(&self.agent, &url, what)?;
        Ok(response.body_mut().read_json::<T>()?)
    }
}

impl Pokedex for PokeApi {
    fn lookup(&self, id: &Identifier) -> Result<Pokemon, PokemonError> {
        let what = id.to_string();
        if id.base == 0 {
            return Err(PokemonError::NotFound(what));
        }

        let species: Species = self.get(&format!("pokemon-species/{}", id.base), &what)?;
        let variety = species
            .variety(id.variant)
            .ok_or_else(|| PokemonError::NotFound(what.clone()))?;
        debug!(
            species = %species.name,
            variety = %variety.pokemon.name,
            varieties = species.varieties.len(),
            "picked variety"
        );

        let data: PokemonData = self.get(&format!("pokemon/{}", variety.pokemon.name), &what)?;

        Ok(Pokemon {
            id: *id,
            pokemon_id: data.id,
            name: format_name(&species.name, &data.name, id.variant),
            genus: species.genus(),
            flavor_text: species.flavor_text(),
            vitals: data.vitals(),
            artwork_url: format!("{}/{}.png", self.artwork_url, data.id),
            slug: data.name,
            species: species.name,
        })
    }
}
