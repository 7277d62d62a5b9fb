#![forbid(unsafe_code)]

//! Layout: where the tour modal goes relative to its target.
//!
//! # Role in tourguide
//! [`PlacementCalculator`] turns a target rectangle, one of twelve
//! [`Placement`]s and a pixel offset into the modal's top-left corner,
//! flipping to the opposite side and clamping into the viewport when the
//! preferred side has no room. [`Spotlight`] derives the decoration
//! geometry around the target: mask cutout, hotspot and arrow.
//!
//! Everything here is pure arithmetic on [`Rect`]s; no host queries.

pub mod placement;
pub mod spotlight;

pub use placement::{Align, ModalPosition, Placement, PlacementCalculator, Side};
pub use spotlight::{Arrow, Spotlight};
pub use tourguide_core::geometry::{Offset, Rect, Size};
