#![forbid(unsafe_code)]

//! Unified error type and recovery mapping.
//!
//! # Design Principles
//!
//! 1. **Typed per crate**: resolution, expiry parsing, navigation, storage
//!    and config loading each have their own error, so callers can match
//!    on what matters and let the rest propagate.
//! 2. **Everything is recoverable**: a tour is an overlay on someone else's
//!    page. Every variant maps to a [`Recovery`] that keeps the host usable.

use std::fmt;

use tourguide_widgets::{ExpiryParseError, ResolveError};

#[cfg(feature = "runtime")]
use tourguide_runtime::{GuideConfigError, StorageError, TourError};

/// Top-level error type for tourguide.
#[derive(Debug)]
pub enum Error {
    /// A step's selector matched nothing.
    Resolve(ResolveError),
    /// Unparseable expire date.
    Expiry(ExpiryParseError),
    /// Navigation refused by the controller.
    #[cfg(feature = "runtime")]
    Tour(TourError),
    /// Persistence backend failure.
    #[cfg(feature = "runtime")]
    Storage(StorageError),
    /// Guide definition failed to load or validate.
    #[cfg(feature = "runtime")]
    Config(GuideConfigError),
    /// Raw I/O error (convenience variant for `?` on io::Result).
    Io(std::io::Error),
}

/// Standard result type for tourguide APIs.
pub type Result<T> = std::result::Result<T, Error>;

/// What the caller should do after an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recovery {
    /// Pass over the step as if it were marked `skip`.
    Skip,
    /// Show the step centred in the viewport, without arrow or hotspot.
    Unanchor,
    /// Ignore the request; state is unchanged.
    NoOp,
    /// Do not show the tour at all.
    Suppress,
    /// Keep the current step on screen.
    StayOnStep,
    /// Fall back to built-in defaults (strings, config, "not seen").
    UseDefaults,
}

impl Error {
    /// Recovery action for this error.
    pub fn recovery(&self) -> Recovery {
        match self {
            Self::Resolve(ResolveError::TargetNotFound { .. }) => Recovery::Unanchor,
            Self::Expiry(_) => Recovery::UseDefaults,

            #[cfg(feature = "runtime")]
            Self::Tour(err) => match err {
                TourError::TargetNotFound { .. } => Recovery::Skip,
                TourError::IndexOutOfRange { .. } => Recovery::NoOp,
                TourError::ExpiredGuide => Recovery::Suppress,
                TourError::VetoedTransition { .. } => Recovery::StayOnStep,
                TourError::Hidden => Recovery::Suppress,
                TourError::AlreadyCompleted => Recovery::Suppress,
                TourError::NoSteps => Recovery::Suppress,
                TourError::NotActive => Recovery::NoOp,
                TourError::NotClosable { .. } => Recovery::StayOnStep,
            },
            #[cfg(feature = "runtime")]
            Self::Storage(_) => Recovery::UseDefaults,
            #[cfg(feature = "runtime")]
            Self::Config(_) => Recovery::UseDefaults,

            Self::Io(_) => Recovery::UseDefaults,
        }
    }

    /// Error type label for logs.
    pub fn error_type(&self) -> &'static str {
        match self {
            Self::Resolve(_) => "resolve",
            Self::Expiry(_) => "expiry",
            #[cfg(feature = "runtime")]
            Self::Tour(_) => "tour",
            #[cfg(feature = "runtime")]
            Self::Storage(_) => "storage",
            #[cfg(feature = "runtime")]
            Self::Config(_) => "config",
            Self::Io(_) => "io",
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Resolve(err) => write!(f, "{err}"),
            Self::Expiry(err) => write!(f, "{err}"),
            #[cfg(feature = "runtime")]
            Self::Tour(err) => write!(f, "{err}"),
            #[cfg(feature = "runtime")]
            Self::Storage(err) => write!(f, "{err}"),
            #[cfg(feature = "runtime")]
            Self::Config(err) => write!(f, "{err}"),
            Self::Io(err) => write!(f, "I/O: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Resolve(err) => Some(err),
            Self::Expiry(err) => Some(err),
            #[cfg(feature = "runtime")]
            Self::Tour(err) => Some(err),
            #[cfg(feature = "runtime")]
            Self::Storage(err) => Some(err),
            #[cfg(feature = "runtime")]
            Self::Config(err) => Some(err),
            Self::Io(err) => Some(err),
        }
    }
}

impl fmt::Display for Recovery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Skip => write!(f, "skip"),
            Self::Unanchor => write!(f, "unanchor"),
            Self::NoOp => write!(f, "no_op"),
            Self::Suppress => write!(f, "suppress"),
            Self::StayOnStep => write!(f, "stay_on_step"),
            Self::UseDefaults => write!(f, "use_defaults"),
        }
    }
}

// ── From conversions ────────────────────────────────────────────────────

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<ResolveError> for Error {
    fn from(err: ResolveError) -> Self {
        Self::Resolve(err)
    }
}

impl From<ExpiryParseError> for Error {
    fn from(err: ExpiryParseError) -> Self {
        Self::Expiry(err)
    }
}

#[cfg(feature = "runtime")]
impl From<TourError> for Error {
    fn from(err: TourError) -> Self {
        Self::Tour(err)
    }
}

#[cfg(feature = "runtime")]
impl From<StorageError> for Error {
    fn from(err: StorageError) -> Self {
        Self::Storage(err)
    }
}

#[cfg(feature = "runtime")]
impl From<GuideConfigError> for Error {
    fn from(err: GuideConfigError) -> Self {
        Self::Config(err)
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error as StdError;

    use super::*;

    #[test]
    fn resolve_error_unanchors() {
        let err = Error::from(ResolveError::TargetNotFound {
            selector: "#x".into(),
        });
        assert_eq!(err.recovery(), Recovery::Unanchor);
        assert_eq!(err.error_type(), "resolve");
        assert!(err.to_string().contains("#x"));
        assert!(StdError::source(&err).is_some());
    }

    #[test]
    fn parse_errors_use_defaults() {
        let err = Error::from(tourguide_widgets::ExpireDate::parse("never").unwrap_err());
        assert_eq!(err.recovery(), Recovery::UseDefaults);
    }

    #[cfg(feature = "runtime")]
    #[test]
    fn tour_errors_map_to_recovery() {
        let cases = [
            (
                TourError::TargetNotFound {
                    index: 0,
                    selector: "#a".into(),
                },
                Recovery::Skip,
            ),
            (TourError::IndexOutOfRange { index: 9, len: 3 }, Recovery::NoOp),
            (TourError::ExpiredGuide, Recovery::Suppress),
            (
                TourError::VetoedTransition {
                    index: 1,
                    reason: "form".into(),
                },
                Recovery::StayOnStep,
            ),
            (TourError::Hidden, Recovery::Suppress),
            (TourError::AlreadyCompleted, Recovery::Suppress),
            (TourError::NoSteps, Recovery::Suppress),
            (TourError::NotActive, Recovery::NoOp),
            (TourError::NotClosable { index: 0 }, Recovery::StayOnStep),
        ];
        for (tour, expected) in cases {
            let err = Error::from(tour);
            assert_eq!(err.recovery(), expected, "{err}");
            assert_eq!(err.error_type(), "tour");
        }
    }

    #[test]
    fn io_error_conversion() {
        let err: Error = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
        assert_eq!(err.to_string(), "I/O: gone");
        assert_eq!(err.recovery(), Recovery::UseDefaults);
    }

    #[test]
    fn recovery_display() {
        assert_eq!(Recovery::StayOnStep.to_string(), "stay_on_step");
        assert_eq!(Recovery::NoOp.to_string(), "no_op");
    }
}
