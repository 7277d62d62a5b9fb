#![forbid(unsafe_code)]

//! Logging facade.
//!
//! With the `tracing` feature enabled these are the `tracing` macros
//! themselves. Without it they expand to nothing (spans expand to a
//! [`NoopSpan`]), so downstream crates can log unconditionally:
//!
//! ```ignore
//! use tourguide_core::logging::{debug, warn};
//!
//! debug!(message = "tour.step_change", from = 0, to = 2);
//! ```

#[cfg(feature = "tracing")]
pub use tracing::{
    debug, debug_span, error, error_span, info, info_span, trace, trace_span, warn, warn_span,
};

/// Stand-in span returned by the span macros when tracing is disabled.
#[cfg(not(feature = "tracing"))]
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSpan;

#[cfg(not(feature = "tracing"))]
impl NoopSpan {
    #[inline]
    pub fn entered(self) -> Self {
        self
    }

    #[inline]
    pub fn enter(&self) -> Self {
        *self
    }
}

#[cfg(not(feature = "tracing"))]
mod noop {
    #[doc(hidden)]
    #[macro_export]
    macro_rules! __tourguide_noop_event {
        ($($tt:tt)*) => {};
    }

    #[doc(hidden)]
    #[macro_export]
    macro_rules! __tourguide_noop_span {
        ($($tt:tt)*) => {
            $crate::logging::NoopSpan
        };
    }
}

#[cfg(not(feature = "tracing"))]
pub use crate::{
    __tourguide_noop_event as trace, __tourguide_noop_event as debug,
    __tourguide_noop_event as info, __tourguide_noop_event as warn,
    __tourguide_noop_event as error, __tourguide_noop_span as trace_span,
    __tourguide_noop_span as debug_span, __tourguide_noop_span as info_span,
    __tourguide_noop_span as warn_span, __tourguide_noop_span as error_span,
};
