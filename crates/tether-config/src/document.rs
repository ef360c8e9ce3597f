//! Serde model of the configuration document.

use indexmap::IndexMap;
use serde::Deserialize;

/// The parts of the model configuration this crate reads.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct ConfigDocument {
    /// Species name → physical properties.
    pub species: IndexMap<String, SpeciesDef>,
    /// Particle ID (as a string key) → definition.
    pub particles: IndexMap<String, ParticleDef>,
}

/// One entry of the `species` table.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
pub struct SpeciesDef {
    /// Particle mass.
    pub mass: f64,
    /// Particle radius.
    pub radius: f64,
}

/// One entry of the `particles` table.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ParticleDef {
    /// Key into the `species` table.
    pub species: String,
    /// Initial position, when given.
    #[serde(default)]
    pub position: Option<Vec<f64>>,
    /// Initial velocity, when given.
    #[serde(default)]
    pub velocity: Option<Vec<f64>>,
}
