//! Particle properties from the model configuration document.
//!
//! The simulator is configured by a JSON document with two tables:
//!
//! ```json
//! {
//!   "species":   { "ligand": { "mass": 2.0, "radius": 0.5 } },
//!   "particles": { "1": { "species": "ligand", "position": [0, 0], "velocity": [1, 0] } }
//! }
//! ```
//!
//! [`PropertyTable`] resolves every particle to its species' mass and
//! radius so log consumers can look properties up by [`ParticleId`].
//! Other keys in the document are ignored.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod document;
pub mod error;
pub mod properties;

pub use document::{ConfigDocument, ParticleDef, SpeciesDef};
pub use error::ConfigError;
pub use properties::{ParticleProperties, PropertyTable};

#[doc(no_inline)]
pub use tether_core::ParticleId;
