//! Resolved per-particle properties.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use indexmap::IndexMap;
use smallvec::SmallVec;
use tether_core::{ParticleId, Snapshot};

use crate::document::{ConfigDocument, SpeciesDef};
use crate::error::ConfigError;

/// Physical properties of one particle, copied from its species.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParticleProperties {
    /// Particle mass.
    pub mass: f64,
    /// Particle radius.
    pub radius: f64,
}

/// Particle ID → properties, plus any initial states the document gives.
///
/// Particles keep the order of the document's `particles` table.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PropertyTable {
    properties: IndexMap<ParticleId, ParticleProperties>,
    species: IndexMap<ParticleId, String>,
    initial: Vec<Snapshot>,
}

impl PropertyTable {
    /// Read and resolve the document at `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let table = Self::from_reader(BufReader::new(File::open(path)?))?;
        tracing::debug!(
            path = %path.display(),
            particles = table.len(),
            "configuration loaded"
        );
        Ok(table)
    }

    /// Read and resolve a document from `reader`.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, ConfigError> {
        let document: ConfigDocument = serde_json::from_reader(reader)?;
        Self::from_document(&document)
    }

    /// Resolve a document held in a string.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let document: ConfigDocument = serde_json::from_str(json)?;
        Self::from_document(&document)
    }

    /// Resolve every particle against the species table.
    ///
    /// Initial states are kept for particles that give both a position
    /// and a velocity.
    pub fn from_document(document: &ConfigDocument) -> Result<Self, ConfigError> {
        for (name, species) in &document.species {
            check_species(name, species)?;
        }

        let mut table = Self::default();
        for (key, def) in &document.particles {
            let id = key
                .trim()
                .parse::<u64>()
                .map(ParticleId)
                .map_err(|_| ConfigError::InvalidParticleId { key: key.clone() })?;
            let species = document.species.get(&def.species).ok_or_else(|| {
                ConfigError::UnknownSpecies {
                    particle: key.clone(),
                    species: def.species.clone(),
                }
            })?;
            table.properties.insert(
                id,
                ParticleProperties {
                    mass: species.mass,
                    radius: species.radius,
                },
            );
            table.species.insert(id, def.species.clone());

            match (&def.position, &def.velocity) {
                (Some(position), Some(velocity)) => {
                    table.initial.push(initial_state(id, position, velocity)?);
                }
                (None, None) => {}
                _ => {
                    return Err(ConfigError::InvalidInitialState {
                        particle: id.0,
                        reason: "position and velocity must be given together".into(),
                    })
                }
            }
        }
        Ok(table)
    }

    /// Properties of `id`.
    pub fn get(&self, id: ParticleId) -> Option<&ParticleProperties> {
        self.properties.get(&id)
    }

    /// Species name of `id`.
    pub fn species_of(&self, id: ParticleId) -> Option<&str> {
        self.species.get(&id).map(String::as_str)
    }

    /// All particles in document order.
    pub fn iter(&self) -> impl Iterator<Item = (ParticleId, &ParticleProperties)> {
        self.properties.iter().map(|(&id, p)| (id, p))
    }

    /// Number of particles.
    pub fn len(&self) -> usize {
        self.properties.len()
    }

    /// True when the document defines no particles.
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// Initial states from the document, in document order.
    pub fn initial_states(&self) -> &[Snapshot] {
        &self.initial
    }

    /// A copy with lengths multiplied by `factor`.
    ///
    /// Radii and initial states scale; masses do not.
    pub fn scaled(&self, factor: f64) -> Result<Self, ConfigError> {
        if !factor.is_finite() || factor <= 0.0 {
            return Err(ConfigError::InvalidOptions {
                reason: format!("scale factor must be finite and positive, got {factor}"),
            });
        }
        Ok(Self {
            properties: self
                .properties
                .iter()
                .map(|(&id, p)| {
                    let scaled = ParticleProperties {
                        mass: p.mass,
                        radius: p.radius * factor,
                    };
                    (id, scaled)
                })
                .collect(),
            species: self.species.clone(),
            initial: self.initial.iter().map(|s| s.scaled(factor)).collect(),
        })
    }
}

fn check_species(name: &str, species: &SpeciesDef) -> Result<(), ConfigError> {
    for (field, value) in [("mass", species.mass), ("radius", species.radius)] {
        if !value.is_finite() || value < 0.0 {
            return Err(ConfigError::InvalidSpecies {
                name: name.to_string(),
                reason: format!("{field} must be finite and non-negative, got {value}"),
            });
        }
    }
    Ok(())
}

fn initial_state(
    id: ParticleId,
    position: &[f64],
    velocity: &[f64],
) -> Result<Snapshot, ConfigError> {
    if position.len() != velocity.len() || !(2..=3).contains(&position.len()) {
        return Err(ConfigError::InvalidInitialState {
            particle: id.0,
            reason: format!(
                "position has {} components and velocity {}; both need 2 or 3",
                position.len(),
                velocity.len()
            ),
        });
    }
    Ok(Snapshot::new(
        id,
        SmallVec::from_slice(position),
        SmallVec::from_slice(velocity),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tether_test_utils::{snapshot, CONFIG_JSON};

    #[test]
    fn resolves_species_properties() {
        let table = PropertyTable::from_json_str(CONFIG_JSON).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(
            table.get(ParticleId(1)),
            Some(&ParticleProperties {
                mass: 2.0,
                radius: 0.5
            })
        );
        assert_eq!(table.get(ParticleId(2)).unwrap().mass, 10.0);
        assert_eq!(table.species_of(ParticleId(2)), Some("receptor"));
        assert!(table.get(ParticleId(3)).is_none());
    }

    #[test]
    fn keeps_initial_states() {
        let table = PropertyTable::from_json_str(CONFIG_JSON).unwrap();
        assert_eq!(
            table.initial_states(),
            &[
                snapshot(1, &[0.0, 0.0], &[1.0, 0.0]),
                snapshot(2, &[10.0, 0.0], &[-1.0, 0.0]),
            ]
        );
    }

    #[test]
    fn unknown_species_is_rejected() {
        let json = r#"{"species": {}, "particles": {"4": {"species": "ghost"}}}"#;
        match PropertyTable::from_json_str(json) {
            Err(ConfigError::UnknownSpecies { particle, species }) => {
                assert_eq!(particle, "4");
                assert_eq!(species, "ghost");
            }
            other => panic!("expected UnknownSpecies, got {other:?}"),
        }
    }

    #[test]
    fn non_numeric_particle_key_is_rejected() {
        let json = r#"{"species": {"a": {"mass": 1, "radius": 1}},
                       "particles": {"p1": {"species": "a"}}}"#;
        assert!(matches!(
            PropertyTable::from_json_str(json),
            Err(ConfigError::InvalidParticleId { key }) if key == "p1"
        ));
    }

    #[test]
    fn missing_table_is_json_error() {
        assert!(matches!(
            PropertyTable::from_json_str(r#"{"particles": {}}"#),
            Err(ConfigError::Json(_))
        ));
    }

    #[test]
    fn half_initial_state_is_rejected() {
        let json = r#"{"species": {"a": {"mass": 1, "radius": 1}},
                       "particles": {"1": {"species": "a", "position": [0, 0]}}}"#;
        assert!(matches!(
            PropertyTable::from_json_str(json),
            Err(ConfigError::InvalidInitialState { particle: 1, .. })
        ));
    }

    #[test]
    fn negative_radius_is_rejected() {
        let json = r#"{"species": {"a": {"mass": 1, "radius": -1}}, "particles": {}}"#;
        assert!(matches!(
            PropertyTable::from_json_str(json),
            Err(ConfigError::InvalidSpecies { .. })
        ));
    }

    #[test]
    fn scaling_leaves_mass_alone() {
        let table = PropertyTable::from_json_str(CONFIG_JSON).unwrap();
        let scaled = table.scaled(4.0).unwrap();
        let p2 = scaled.get(ParticleId(2)).unwrap();
        assert_eq!((p2.mass, p2.radius), (10.0, 6.0));
        assert_eq!(scaled.initial_states()[1].position.as_slice(), &[40.0, 0.0]);
        assert!(matches!(
            table.scaled(0.0),
            Err(ConfigError::InvalidOptions { .. })
        ));
    }

    #[test]
    fn open_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(CONFIG_JSON.as_bytes()).unwrap();
        let table = PropertyTable::open(file.path()).unwrap();
        assert_eq!(table.len(), 2);
        assert!(matches!(
            PropertyTable::open("/nonexistent/config.json"),
            Err(ConfigError::Io(_))
        ));
    }
}
