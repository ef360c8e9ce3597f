//! Resampling of particle event streams onto caller-chosen times.
//!
//! The message log records a particle's kinematic state only when
//! something happens to it. [`Resampler`] reconstructs the state of every
//! particle seen so far at each requested time by extrapolating its last
//! known position along its last known velocity.
//!
//! Both inputs are consumed in a single forward pass: events must arrive
//! in non-decreasing time order and query times are strictly increasing.
//! Memory is proportional to the number of distinct particles.
//!
//! # Example
//!
//! ```
//! use tether_core::{ParticleId, TimedEvent};
//! use tether_resample::{QueryTimeline, Resampler};
//!
//! let events = vec![Ok(TimedEvent::new(
//!     0.0,
//!     ParticleId(1),
//!     [0.0, 0.0].into_iter().collect(),
//!     [1.0, 0.0].into_iter().collect(),
//! ))];
//! let timeline = QueryTimeline::new(0.0, 2.0, 1.0).unwrap();
//! let frames: Vec<_> = Resampler::new(events.into_iter(), timeline.into())
//!     .unwrap()
//!     .collect::<Result<_, _>>()
//!     .unwrap();
//!
//! assert_eq!(frames.len(), 3);
//! assert_eq!(frames[2].positions[&ParticleId(1)].as_slice(), &[2.0, 0.0]);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod resampler;
pub mod timeline;

pub use resampler::{ResampledFrame, Resampler};
pub use timeline::{QueryTimeline, QueryTimes, QueryTimesIter};
