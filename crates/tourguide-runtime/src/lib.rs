#![forbid(unsafe_code)]

//! Runtime: the tour navigation state machine and its collaborators.
//!
//! # Role in tourguide
//! `tourguide-runtime` owns the only mutable tour state, the current step
//! pointer, inside [`TourController`]. It reads the host through
//! `tourguide-widgets`' [`HostDom`](tourguide_widgets::HostDom), persists
//! "seen" flags through a [`StorageBackend`], and checks expiry against an
//! injected [`Clock`].
//!
//! # Feature flags
//! - `state-persistence`: [`FileStorage`], a JSON-file backend.
//! - `guide-config`: TOML/JSON loading for [`GuideConfig`].

pub mod clock;
pub mod config;
pub mod controller;
pub mod storage;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{
    GuideConfig, GuideConfigError, LabelConfig, OffsetConfig, StepConfig, TargetPosConfig,
};
pub use controller::{SEEN_VALUE, TourController, TourError, TourState, Transition};
#[cfg(feature = "state-persistence")]
pub use storage::FileStorage;
pub use storage::{MemoryStorage, StorageBackend, StorageError, StorageResult};
