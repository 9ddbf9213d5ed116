//! Forme alias normalization
//!
//! Some species report a cosmetic forme (Minior's core colours, its Meteor
//! shell) that the server does not accept as a switch target. These are
//! mapped back to the base species id before a command is sent.

use std::borrow::Cow;

/// Showdown ID form of a name: lowercase ASCII alphanumerics only
pub fn to_id(name: &str) -> String {
    name.chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

fn lookup(id: &str) -> Option<&'static str> {
    match id {
        "miniorred" | "miniororange" | "minioryellow" | "miniorgreen" | "miniorblue"
        | "miniorindigo" | "miniorviolet" | "miniormeteor" => Some("minior"),
        _ => None,
    }
}

/// Whether the species is a known forme alias
pub fn is_alias(species: &str) -> bool {
    lookup(&to_id(species)).is_some()
}

/// Map a forme alias to the base species the protocol expects
///
/// Every other input is returned unchanged.
pub fn normalize(species: &str) -> Cow<'_, str> {
    match lookup(&to_id(species)) {
        Some(base) => Cow::Borrowed(base),
        None => Cow::Borrowed(species),
    }
}

/// Whether two species names refer to the same switch target once aliases
/// are collapsed
pub fn same_species(a: &str, b: &str) -> bool {
    to_id(&normalize(a)) == to_id(&normalize(b))
}
