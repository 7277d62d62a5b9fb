#![forbid(unsafe_code)]

//! Target resolution for a step.
//!
//! # Precedence
//!
//! 1. A selector, when present, is always used: string queries go through
//!    [`HostDom::query_selector`], element handles are taken as-is, lazy
//!    producers are invoked now (resolution happens only for the active
//!    step).
//! 2. Otherwise `target_pos` is returned verbatim.
//! 3. Otherwise the whole viewport, flagged [`TargetSource::Viewport`].
//!
//! A selector that matches nothing, or an element without a layout box, is
//! a [`ResolveError::TargetNotFound`]. What happens next is the guide's
//! [`MissingTarget`](crate::MissingTarget) policy, applied by the caller.

use std::fmt;

use tourguide_core::geometry::Rect;
use tourguide_core::logging::warn;

use crate::host::{ElementId, HostDom};
use crate::step::{MountParent, Selector, Step};

/// Where a resolved rectangle came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetSource {
    Selector,
    TargetPos,
    /// No anchor at all; the rectangle is the viewport.
    Viewport,
}

/// A step's target in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedTarget {
    pub rect: Rect,
    /// The anchor element, when resolved through a selector.
    pub element: Option<ElementId>,
    pub source: TargetSource,
}

impl ResolvedTarget {
    /// Full-viewport fallback for steps with no anchor.
    pub fn unanchored(viewport: Rect) -> Self {
        Self {
            rect: viewport,
            element: None,
            source: TargetSource::Viewport,
        }
    }

    /// Whether the modal should be positioned relative to `rect`.
    pub fn is_anchored(&self) -> bool {
        self.source != TargetSource::Viewport
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    TargetNotFound { selector: String },
}

impl fmt::Display for ResolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TargetNotFound { selector } => {
                write!(f, "no element with a layout box matches {selector}")
            }
        }
    }
}

impl std::error::Error for ResolveError {}

/// Resolves steps against a borrowed host.
#[derive(Clone, Copy)]
pub struct StepResolver<'h> {
    host: &'h dyn HostDom,
}

impl<'h> StepResolver<'h> {
    pub fn new(host: &'h dyn HostDom) -> Self {
        Self { host }
    }

    pub fn host(&self) -> &'h dyn HostDom {
        self.host
    }

    pub fn resolve(&self, step: &Step) -> Result<ResolvedTarget, ResolveError> {
        if let Some(selector) = &step.selector {
            return self.resolve_selector(selector);
        }
        if let Some(rect) = step.target_pos {
            return Ok(ResolvedTarget {
                rect,
                element: None,
                source: TargetSource::TargetPos,
            });
        }
        Ok(ResolvedTarget::unanchored(self.host.viewport()))
    }

    fn resolve_selector(&self, selector: &Selector) -> Result<ResolvedTarget, ResolveError> {
        let element = match selector {
            Selector::Query(query) => self.host.query_selector(query),
            Selector::Element(id) => Some(*id),
            Selector::Lazy(produce) => produce(),
        };
        let found = element.and_then(|el| self.host.bounding_rect(el).map(|rect| (el, rect)));
        match found {
            Some((el, rect)) => Ok(ResolvedTarget {
                rect,
                element: Some(el),
                source: TargetSource::Selector,
            }),
            None => {
                warn!(
                    message = "tour.target_not_found",
                    selector = %selector,
                    matched = element.is_some()
                );
                Err(ResolveError::TargetNotFound {
                    selector: selector.to_string(),
                })
            }
        }
    }

    /// Element the modal mounts under.
    ///
    /// An explicit `body` wins; a masked guide mounts on the body; otherwise
    /// the anchor's offset parent, falling back to the body.
    pub fn mount_parent(&self, step: &Step, target: &ResolvedTarget, masked: bool) -> ElementId {
        if step.parent == Some(MountParent::Body) || masked {
            return self.host.body();
        }
        target
            .element
            .and_then(|el| self.host.offset_parent(el))
            .unwrap_or_else(|| self.host.body())
    }
}

impl fmt::Debug for StepResolver<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StepResolver")
            .field("viewport", &self.host.viewport())
            .finish_non_exhaustive()
    }
}
