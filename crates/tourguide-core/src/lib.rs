#![forbid(unsafe_code)]

//! Core: geometry primitives and the logging facade.
//!
//! # Role in tourguide
//! `tourguide-core` is the bottom of the stack. It owns the coordinate types
//! every other crate speaks ([`Rect`], [`Offset`], [`Size`]) and a thin
//! logging module that forwards to `tracing` when the `tracing` feature is
//! on and compiles to nothing when it is off.
//!
//! # How it fits in the system
//! Host adapters report element boxes as [`Rect`]s in viewport pixels. The
//! layout crate turns those into modal origins, and the widgets/runtime
//! crates pass them through to the presenter untouched.

pub mod geometry;
pub mod logging;

pub use geometry::{Offset, Rect, Sides, Size};

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{
    debug, debug_span, error, error_span, info, info_span, trace, trace_span, warn, warn_span,
};
