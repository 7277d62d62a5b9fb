#![forbid(unsafe_code)]

//! tourguide public facade crate.
//!
//! This crate provides the stable, ergonomic surface area for users. It
//! re-exports common types from the internal crates and offers a lightweight
//! prelude for day-to-day usage.
//!
//! ```
//! use tourguide::prelude::*;
//!
//! let host = StaticHost::new(Rect::from_size(1024, 768))
//!     .with_element("#search", Rect::new(40, 20, 300, 32));
//! let guide = Guide::new(vec![
//!     Step::at("#search").title("Search").content("Find anything here."),
//!     Step::new().title("That's it"),
//! ]);
//!
//! let mut tour = TourController::new(guide, host);
//! tour.start().unwrap();
//! let layout = tour.layout(Size::new(280, 120)).unwrap();
//! assert_eq!((layout.modal.width, layout.modal.height), (280, 120));
//! tour.next().unwrap();
//! tour.next().unwrap();
//! assert!(tour.state().is_finished());
//! ```

pub mod error;

pub use error::{Error, Recovery, Result};

// --- Core re-exports -------------------------------------------------------

pub use tourguide_core::geometry::{Offset, Rect, Sides, Size};

// --- Localization re-exports -----------------------------------------------

pub use tourguide_i18n::{Lang, StringCatalog, TextKey, Translator};

// --- Layout re-exports -----------------------------------------------------

pub use tourguide_layout::{Arrow, ModalPosition, Placement, PlacementCalculator, Spotlight};

// --- Widget re-exports -----------------------------------------------------

pub use tourguide_widgets::{
    CloseReason, Content, ExpireDate, FnHooks, Guide, GuideHooks, GuideRenderer, HostDom,
    LabelRenderer, MissingTarget, ModalLayout, ModalState, NavAction, NavButton, ResolvedTarget,
    Selector, StaticHost, Step, StepResolver, Veto,
};

// --- Runtime re-exports ----------------------------------------------------

#[cfg(feature = "runtime")]
pub use tourguide_runtime::{
    Clock, FixedClock, MemoryStorage, StorageBackend, SystemClock, TourController, TourError,
    TourState, Transition,
};

#[cfg(feature = "state-persistence")]
pub use tourguide_runtime::FileStorage;

#[cfg(feature = "guide-config")]
pub use tourguide_runtime::GuideConfig;

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        Content, Error, Guide, GuideHooks, HostDom, Lang, Placement, Rect, Recovery, Result,
        Selector, Size, StaticHost, Step, Veto,
    };

    #[cfg(feature = "runtime")]
    pub use crate::{TourController, TourError, TourState, Transition};

    pub use crate::{core, i18n, layout, widgets};

    #[cfg(feature = "runtime")]
    pub use crate::runtime;
}

pub use tourguide_core as core;
pub use tourguide_i18n as i18n;
pub use tourguide_layout as layout;
#[cfg(feature = "runtime")]
pub use tourguide_runtime as runtime;
pub use tourguide_widgets as widgets;
