//! Set name grammar
//!
//! Set names look like `<Pokemon>-<setNumber>[-<AbilityTag>]`, for example
//! `Aerodactyl-1` or `Aerodactyl-1-RockHead`. Every helper here is lenient:
//! malformed names never error, they degrade to "no ability".

mod compact;
mod team_string;

use std::fmt;
use std::str::FromStr;

use crate::ParseError;

pub use compact::compact_set_names;
pub use team_string::parse_team_string;

/// A set name split into its grouping key and optional ability tag.
///
/// Both fields borrow from the original name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ParsedSetName<'a> {
    /// Name with the trailing ability tag removed
    pub base_name: &'a str,
    /// Trailing ability tag, if the last segment is not a set number
    pub ability: Option<&'a str>,
}

/// Split a set name into base name and ability tag.
///
/// A purely numeric final segment means there is no ability. Names without
/// any `-` and names ending in `-` are treated as having no ability.
pub fn parse_set_name(name: &str) -> ParsedSetName<'_> {
    match name.rsplit_once('-') {
        Some((base, last)) if !last.is_empty() && !is_numeric(last) => ParsedSetName {
            base_name: base,
            ability: Some(last),
        },
        _ => ParsedSetName {
            base_name: name,
            ability: None,
        },
    }
}

/// Strip only an ability tag, keeping `<Pokemon>-<setNumber>`.
///
/// This is the key used for frequency lookups. Returns the input unchanged
/// unless it has three or more segments and the second one is numeric.
pub fn extract_base_name(name: &str) -> &str {
    let mut parts = name.splitn(3, '-');
    let (Some(pokemon), Some(number), Some(_)) = (parts.next(), parts.next(), parts.next()) else {
        return name;
    };

    if is_numeric(number) {
        &name[..pokemon.len() + 1 + number.len()]
    } else {
        name
    }
}

/// First segment of a set name (the pokemon itself)
pub fn pokemon_name(name: &str) -> &str {
    name.split('-').next().unwrap_or(name)
}

/// Second segment of a set name, normally the set number
pub fn set_number(name: &str) -> Option<&str> {
    name.split('-').nth(1)
}

/// Base name with its set number removed as well, e.g. `Mr-Mime-3-Soundproof` -> `Mr-Mime`.
///
/// Used to reject teams that field the same pokemon twice.
pub fn pokemon_base(name: &str) -> &str {
    let base = parse_set_name(name).base_name;
    match base.rsplit_once('-') {
        Some((head, _)) => head,
        None => base,
    }
}

pub(crate) fn is_numeric(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

/// A set identifier without ability, as typed by a user (`Vaporeon-4`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SetId {
    pub pokemon: String,
    /// Set number as written (digits only)
    pub number: String,
}

impl SetId {
    /// Parse `Pokemon-4` or the shorthand `Pokemon4`
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();

        if let Some((pokemon, number)) = s.rsplit_once('-')
            && !pokemon.is_empty()
            && is_numeric(number)
        {
            return Some(SetId {
                pokemon: pokemon.to_string(),
                number: number.to_string(),
            });
        }

        let digits_start = s
            .char_indices()
            .rev()
            .take_while(|(_, c)| c.is_ascii_digit())
            .last()
            .map(|(idx, _)| idx)?;

        // The pokemon part needs at least one character
        let split = if digits_start == 0 {
            s.char_indices().nth(1).map(|(idx, _)| idx)?
        } else {
            digits_start
        };

        Some(SetId {
            pokemon: s[..split].to_string(),
            number: s[split..].to_string(),
        })
    }
}

impl FromStr for SetId {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().is_empty() {
            return Err(ParseError::EmptyInput);
        }
        SetId::parse(s).ok_or_else(|| ParseError::InvalidFormat(s.to_string()))
    }
}

impl fmt::Display for SetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.pokemon, self.number)
    }
}
