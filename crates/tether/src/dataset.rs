//! A simulation run's logs and configuration, opened together.
//!
//! [`Dataset::open`] reads the three inputs a viewer needs: the state log
//! (indexed or fully resident, see [`StateLoading`]), the per-time event
//! summary from the message log, and the particle property table.

use std::path::Path;

use tether_config::{ConfigError, PropertyTable};
use tether_core::{EventRecord, LogError, Snapshot, TimeKey};
use tether_log::{
    load_message_summary, load_state_log, LoadOptions, MessageSummary, OptionsError,
    ResidentStates, StateIndex,
};

/// How the state log is held after opening.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StateLoading {
    /// Record offsets only and parse on each lookup. Memory stays
    /// proportional to the number of recorded times.
    #[default]
    Indexed,
    /// Parse everything up front. Refused for files above
    /// [`LoadOptions::max_resident_bytes`].
    Resident,
}

/// The state log in the form chosen by [`StateLoading`].
#[derive(Debug)]
pub enum StateSource {
    /// Offset index over the file.
    Indexed(StateIndex),
    /// Fully parsed contents.
    Resident(ResidentStates),
}

impl StateSource {
    /// Snapshots recorded at `time`.
    pub fn snapshots_at(&self, time: &str) -> Result<Vec<Snapshot>, LogError> {
        match self {
            Self::Indexed(index) => index.lookup(time),
            Self::Resident(states) => {
                states
                    .get(time)
                    .map(<[Snapshot]>::to_vec)
                    .ok_or_else(|| LogError::NotFound {
                        time: time.to_string(),
                    })
            }
        }
    }

    /// Recorded times in file order.
    pub fn times(&self) -> Vec<&TimeKey> {
        match self {
            Self::Indexed(index) => index.times().collect(),
            Self::Resident(states) => states.states.keys().collect(),
        }
    }
}

/// Errors from [`Dataset::open`].
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    /// The load options failed validation.
    #[error("invalid load options: {0}")]
    Options(#[from] OptionsError),
    /// A log could not be read.
    #[error(transparent)]
    Log(#[from] LogError),
    /// The configuration could not be read or resolved.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// State, events, and particle properties of one simulation run.
#[derive(Debug)]
pub struct Dataset {
    states: StateSource,
    events: MessageSummary,
    properties: PropertyTable,
}

impl Dataset {
    /// Open a run with default [`LoadOptions`].
    pub fn open(
        state_log: impl AsRef<Path>,
        message_log: impl AsRef<Path>,
        config: impl AsRef<Path>,
        loading: StateLoading,
    ) -> Result<Self, DatasetError> {
        Self::open_with(
            state_log,
            message_log,
            config,
            loading,
            &LoadOptions::default(),
        )
    }

    /// Open a run with explicit options.
    pub fn open_with(
        state_log: impl AsRef<Path>,
        message_log: impl AsRef<Path>,
        config: impl AsRef<Path>,
        loading: StateLoading,
        options: &LoadOptions,
    ) -> Result<Self, DatasetError> {
        options.validate()?;
        let states = match loading {
            StateLoading::Indexed => StateSource::Indexed(StateIndex::open(state_log, options)?),
            StateLoading::Resident => StateSource::Resident(load_state_log(state_log, options)?),
        };
        let events = load_message_summary(message_log, options)?;
        let properties = PropertyTable::open(config)?;
        tracing::debug!(
            ?loading,
            times = states.times().len(),
            event_times = events.events.len(),
            particles = properties.len(),
            "dataset opened"
        );
        Ok(Self {
            states,
            events,
            properties,
        })
    }

    /// Snapshots recorded at `time`, whichever way the state log is held.
    pub fn snapshots_at(&self, time: &str) -> Result<Vec<Snapshot>, LogError> {
        self.states.snapshots_at(time)
    }

    /// The first event recorded at `time`.
    pub fn event_at(&self, time: &str) -> Option<&EventRecord> {
        self.events.events.get(time)
    }

    /// The state log.
    pub fn states(&self) -> &StateSource {
        &self.states
    }

    /// The per-time event summary and its diagnostics.
    pub fn events(&self) -> &MessageSummary {
        &self.events
    }

    /// The particle property table.
    pub fn properties(&self) -> &PropertyTable {
        &self.properties
    }
}
