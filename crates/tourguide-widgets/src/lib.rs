#![forbid(unsafe_code)]

//! Widgets: the tour data model and everything derived from it per step.
//!
//! # Role in tourguide
//! - [`Step`] / [`Guide`]: static tour configuration, built with
//!   `#[must_use]` builder setters.
//! - [`HostDom`]: the read-only boundary into the host document, with
//!   [`StaticHost`] as an in-memory implementation.
//! - [`StepResolver`]: selector/target resolution with an explicit fallback
//!   for steps that have neither.
//! - [`ModalState`]: the render-ready view of the active step handed to a
//!   presenter, including button views and layout.
//!
//! The navigation state machine that drives these lives in
//! `tourguide-runtime`.

pub mod expiry;
pub mod guide;
pub mod hooks;
pub mod host;
pub mod modal;
pub mod render;
pub mod resolver;
pub mod step;

pub use expiry::{ExpireDate, ExpiryParseError};
pub use guide::{Guide, LayoutOptions, MissingTarget};
pub use hooks::{CloseReason, FnHooks, GuideHooks, NoHooks, Veto};
pub use host::{ElementId, HostDom, StaticHost};
pub use modal::{ButtonView, ModalLayout, ModalState};
pub use render::{DefaultRenderer, GuideRenderer, LabelRenderer, NavAction, NavButton};
pub use resolver::{ResolveError, ResolvedTarget, StepResolver, TargetSource};
pub use step::{Content, MountParent, ResolvedContent, Selector, Step, StepHook};
