//! Entity types for the slice of SWAPI this workspace consumes.
//!
//! The API sends far more fields than we read. Every raw entity here lists
//! only the fields the aggregation uses; serde ignores the rest.
//!
//! Raw entities (`Person`, `Planet`, `Film`) are what comes over the wire.
//! `PersonInfo` and `FilmInfo` are the flattened result handed to callers.

use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// Raw API entities
// =============================================================================

/// A person as returned by `/api/people/{id}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub name: String,
    /// SWAPI sends height as text ("172", "unknown"), kept as-is
    pub height: String,
    pub gender: Gender,
    /// URL of the person's home planet
    pub homeworld: String,
    /// URLs of the films the person appears in, in API order
    pub films: Vec<String>,
}

/// A planet as returned by `/api/planets/{id}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Planet {
    pub name: String,
}

/// A film as returned by `/api/films/{id}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Film {
    pub title: String,
    pub director: String,
    pub release_date: String,
}

// =============================================================================
// Gender
// =============================================================================

/// Gender of a person.
///
/// The three named values are the ones we expect, but SWAPI also sends
/// things like "n/a" or "hermaphrodite". Anything unrecognised lands in
/// `Other` with the original text, so serialization always gives back the
/// exact string the API sent.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Gender {
    Male,
    Female,
    Divers,
    Other(String),
}

impl Gender {
    pub fn as_str(&self) -> &str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Divers => "divers",
            Gender::Other(value) => value,
        }
    }
}

impl From<String> for Gender {
    fn from(value: String) -> Self {
        match value.as_str() {
            "male" => Gender::Male,
            "female" => Gender::Female,
            "divers" => Gender::Divers,
            _ => Gender::Other(value),
        }
    }
}

impl From<&str> for Gender {
    fn from(value: &str) -> Self {
        Gender::from(value.to_string())
    }
}

impl From<Gender> for String {
    fn from(gender: Gender) -> Self {
        match gender {
            Gender::Other(value) => value,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Aggregated result
// =============================================================================

/// Film fields kept in the aggregated record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilmInfo {
    pub title: String,
    pub director: String,
    pub release_date: String,
}

impl From<Film> for FilmInfo {
    fn from(film: Film) -> Self {
        FilmInfo {
            title: film.title,
            director: film.director,
            release_date: film.release_date,
        }
    }
}

/// A person with the homeworld resolved to its name and every film
/// reference replaced by the film's details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonInfo {
    pub name: String,
    pub height: String,
    pub gender: Gender,
    /// Planet name, never a URL
    pub homeworld: String,
    /// Same length and order as `Person::films`
    pub films: Vec<FilmInfo>,
}
