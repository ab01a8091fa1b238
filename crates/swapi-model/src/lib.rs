//! # SWAPI Model Crate
//!
//! Domain types for the person aggregation workspace.
//!
//! ## Main Components
//!
//! - **types**: Raw API entities (Person, Planet, Film) and the flattened
//!   result (PersonInfo, FilmInfo)
//! - **error**: The two-variant error taxonomy (fetch vs decode)
//!
//! ## Example Usage
//!
//! ```ignore
//! use swapi_model::{Person, Gender};
//!
//! let person: Person = serde_json::from_str(body)?;
//! assert_eq!(person.gender, Gender::Male);
//! println!("{} appears in {} films", person.name, person.films.len());
//! ```

pub mod error;
pub mod types;

// Re-export commonly used types for convenience
pub use error::{Result, SwapiError};
pub use types::{Film, FilmInfo, Gender, Person, PersonInfo, Planet};
