#![forbid(unsafe_code)]

//! A single tour stop.
//!
//! A [`Step`] names what to point at (a [`Selector`] or an explicit
//! rectangle), what to say ([`Content`]) and where to put the modal
//! ([`Placement`] plus a pixel offset). Steps are plain data: resolving the
//! selector against a host happens in [`StepResolver`](crate::StepResolver),
//! and navigation in the runtime controller.

use std::fmt;
use std::sync::Arc;

use tourguide_core::geometry::{Offset, Rect};
use tourguide_layout::Placement;

use crate::hooks::Veto;
use crate::host::ElementId;

/// Deferred element lookup, evaluated only when the step becomes active.
pub type ElementProducer = Arc<dyn Fn() -> Option<ElementId> + Send + Sync>;

/// Deferred content, evaluated when the modal state is built.
pub type ContentProducer = Arc<dyn Fn() -> ResolvedContent + Send + Sync>;

/// Step-level pre-transition hook: `(current step, current index, all steps)`.
///
/// Returning `Err` vetoes the forward transition.
pub type StepHook = Arc<dyn Fn(&Step, usize, &[Step]) -> Result<(), Veto> + Send + Sync>;

/// How a step finds its anchor element.
#[derive(Clone)]
pub enum Selector {
    /// Single-element query against the host.
    Query(String),
    /// A handle the caller already holds.
    Element(ElementId),
    /// Invoked lazily.
    Lazy(ElementProducer),
}

impl Selector {
    pub fn lazy<F>(f: F) -> Self
    where
        F: Fn() -> Option<ElementId> + Send + Sync + 'static,
    {
        Self::Lazy(Arc::new(f))
    }

    /// The query string, when this is a [`Selector::Query`].
    pub fn as_query(&self) -> Option<&str> {
        match self {
            Self::Query(q) => Some(q),
            _ => None,
        }
    }
}

impl fmt::Debug for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Query(q) => f.debug_tuple("Query").field(q).finish(),
            Self::Element(id) => f.debug_tuple("Element").field(id).finish(),
            Self::Lazy(_) => f.write_str("Lazy(..)"),
        }
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Query(q) => f.write_str(q),
            Self::Element(id) => write!(f, "<element #{}>", id.get()),
            Self::Lazy(_) => f.write_str("<lazy>"),
        }
    }
}

impl From<&str> for Selector {
    fn from(q: &str) -> Self {
        Self::Query(q.to_owned())
    }
}

impl From<String> for Selector {
    fn from(q: String) -> Self {
        Self::Query(q)
    }
}

impl From<ElementId> for Selector {
    fn from(id: ElementId) -> Self {
        Self::Element(id)
    }
}

/// Content after any lazy producer has run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedContent {
    /// Plain text.
    Text(String),
    /// Rich content, opaque to the tour and passed through to the presenter.
    Markup(String),
}

impl ResolvedContent {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Text(s) | Self::Markup(s) => s,
        }
    }

    pub fn is_markup(&self) -> bool {
        matches!(self, Self::Markup(_))
    }
}

/// Body of a step's modal.
#[derive(Clone)]
pub enum Content {
    Text(String),
    Markup(String),
    Lazy(ContentProducer),
}

impl Content {
    pub fn markup(markup: impl Into<String>) -> Self {
        Self::Markup(markup.into())
    }

    pub fn lazy<F>(f: F) -> Self
    where
        F: Fn() -> ResolvedContent + Send + Sync + 'static,
    {
        Self::Lazy(Arc::new(f))
    }

    /// Evaluate the content, running the producer if there is one.
    pub fn resolve(&self) -> ResolvedContent {
        match self {
            Self::Text(s) => ResolvedContent::Text(s.clone()),
            Self::Markup(s) => ResolvedContent::Markup(s.clone()),
            Self::Lazy(f) => f(),
        }
    }
}

impl Default for Content {
    fn default() -> Self {
        Self::Text(String::new())
    }
}

impl fmt::Debug for Content {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.debug_tuple("Text").field(s).finish(),
            Self::Markup(s) => f.debug_tuple("Markup").field(s).finish(),
            Self::Lazy(_) => f.write_str("Lazy(..)"),
        }
    }
}

impl From<&str> for Content {
    fn from(s: &str) -> Self {
        Self::Text(s.to_owned())
    }
}

impl From<String> for Content {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

/// Where the modal is attached in the host tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum MountParent {
    /// Always mount on the document body.
    Body,
}

/// One tour stop.
#[derive(Clone)]
pub struct Step {
    /// Explicit target rectangle, used only when there is no selector.
    pub target_pos: Option<Rect>,
    pub selector: Option<Selector>,
    pub title: String,
    pub content: Content,
    pub placement: Placement,
    pub offset: Offset,
    /// `None` inherits from the anchored element.
    pub parent: Option<MountParent>,
    pub visible: bool,
    pub skip: bool,
    pub before_step_change: Option<StepHook>,
}

impl Step {
    /// A visible, non-skipped step placed below its target.
    pub fn new() -> Self {
        Self {
            target_pos: None,
            selector: None,
            title: String::new(),
            content: Content::default(),
            placement: Placement::default(),
            offset: Offset::ZERO,
            parent: None,
            visible: true,
            skip: false,
            before_step_change: None,
        }
    }

    /// Shorthand for a step anchored by a query selector.
    pub fn at(selector: impl Into<Selector>) -> Self {
        Self::new().selector(selector)
    }

    #[must_use]
    pub fn selector(mut self, selector: impl Into<Selector>) -> Self {
        self.selector = Some(selector.into());
        self
    }

    #[must_use]
    pub fn target_pos(mut self, rect: Rect) -> Self {
        self.target_pos = Some(rect);
        self
    }

    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    #[must_use]
    pub fn content(mut self, content: impl Into<Content>) -> Self {
        self.content = content.into();
        self
    }

    #[must_use]
    pub fn placement(mut self, placement: Placement) -> Self {
        self.placement = placement;
        self
    }

    #[must_use]
    pub fn offset(mut self, offset: impl Into<Offset>) -> Self {
        self.offset = offset.into();
        self
    }

    #[must_use]
    pub fn parent(mut self, parent: MountParent) -> Self {
        self.parent = Some(parent);
        self
    }

    #[must_use]
    pub fn visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    #[must_use]
    pub fn skip(mut self, skip: bool) -> Self {
        self.skip = skip;
        self
    }

    #[must_use]
    pub fn before_step_change<F>(mut self, hook: F) -> Self
    where
        F: Fn(&Step, usize, &[Step]) -> Result<(), Veto> + Send + Sync + 'static,
    {
        self.before_step_change = Some(Arc::new(hook));
        self
    }

    /// Whether navigation can land here by `next`/`prev`. Hidden steps are
    /// passed over the same way as skipped ones.
    pub fn is_navigable(&self) -> bool {
        self.visible && !self.skip
    }

    /// Run the step-level hook, if any.
    pub fn check_before_change(&self, index: usize, steps: &[Step]) -> Result<(), Veto> {
        match &self.before_step_change {
            Some(hook) => hook(self, index, steps),
            None => Ok(()),
        }
    }
}

impl Default for Step {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Step")
            .field("target_pos", &self.target_pos)
            .field("selector", &self.selector)
            .field("title", &self.title)
            .field("content", &self.content)
            .field("placement", &self.placement)
            .field("offset", &self.offset)
            .field("parent", &self.parent)
            .field("visible", &self.visible)
            .field("skip", &self.skip)
            .field("before_step_change", &self.before_step_change.is_some())
            .finish()
    }
}
