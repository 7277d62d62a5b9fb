#![forbid(unsafe_code)]

//! The tour navigation state machine.
//!
//! # States
//!
//! ```text
//! NotStarted ──start──▶ Active(i) ──next past last──▶ Completed
//!                           │
//!                           └──close / skip_all / force_close──▶ Closed(reason)
//! ```
//!
//! # Invariants
//!
//! 1. While `Active(i)`, `i < steps.len()`.
//! 2. `next`/`prev` only land on navigable steps: visible, not `skip`, and
//!    (under [`MissingTarget::Skip`]) with a resolvable target. `go_to` may
//!    land anywhere in range.
//! 3. A failed operation (veto, out of range, not closable) leaves the
//!    state untouched.
//! 4. Completion and every close write the guide's `local_key` and fire
//!    `on_close` exactly once.
//!
//! # Logging
//!
//! `tour.start`, `tour.step_change`, `tour.complete`, `tour.close` and
//! `tour.veto` events carry the guide key and indices as fields.

use std::fmt;
use std::sync::Arc;

use tourguide_core::geometry::Size;
use tourguide_widgets::{
    CloseReason, Guide, HostDom, MissingTarget, ModalLayout, ModalState, NavAction,
    ResolveError, ResolvedTarget, Step, StepResolver, Veto,
};

use crate::clock::{Clock, SystemClock};
use crate::storage::{MemoryStorage, StorageBackend};

/// Value written under `local_key` once a tour has been seen.
pub const SEEN_VALUE: &str = "true";

/// Where the tour is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TourState {
    NotStarted,
    Active(usize),
    Completed,
    Closed(CloseReason),
}

impl TourState {
    pub fn is_active(self) -> bool {
        matches!(self, Self::Active(_))
    }

    pub fn is_finished(self) -> bool {
        matches!(self, Self::Completed | Self::Closed(_))
    }

    pub fn step_index(self) -> Option<usize> {
        match self {
            Self::Active(i) => Some(i),
            _ => None,
        }
    }

    /// Short label for logs and reports.
    pub const fn label(self) -> &'static str {
        match self {
            Self::NotStarted => "not_started",
            Self::Active(_) => "active",
            Self::Completed => "completed",
            Self::Closed(_) => "closed",
        }
    }
}

/// Outcome of a successful controller call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Started { index: usize },
    Moved { from: usize, to: usize },
    /// Nothing to do (e.g. `prev` on the first navigable step).
    Stayed,
    Completed,
    Closed(CloseReason),
}

/// Why a controller call did nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TourError {
    TargetNotFound { index: usize, selector: String },
    IndexOutOfRange { index: usize, len: usize },
    ExpiredGuide,
    VetoedTransition { index: usize, reason: String },
    Hidden,
    /// Already seen (persisted) or already finished in this session.
    AlreadyCompleted,
    NoSteps,
    NotActive,
    NotClosable { index: usize },
}

impl fmt::Display for TourError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TargetNotFound { index, selector } => {
                write!(f, "step {index}: target not found for {selector}")
            }
            Self::IndexOutOfRange { index, len } => {
                write!(f, "step index {index} out of range (tour has {len} steps)")
            }
            Self::ExpiredGuide => write!(f, "guide has expired"),
            Self::VetoedTransition { index, reason } => {
                if reason.is_empty() {
                    write!(f, "transition from step {index} vetoed")
                } else {
                    write!(f, "transition from step {index} vetoed: {reason}")
                }
            }
            Self::Hidden => write!(f, "guide is not visible"),
            Self::AlreadyCompleted => write!(f, "guide already completed"),
            Self::NoSteps => write!(f, "guide has no navigable steps"),
            Self::NotActive => write!(f, "tour is not active"),
            Self::NotClosable { index } => {
                write!(f, "guide cannot be closed at step {index}")
            }
        }
    }
}

impl std::error::Error for TourError {}

/// Drives one [`Guide`] against one host.
pub struct TourController<H: HostDom> {
    guide: Guide,
    host: H,
    storage: Arc<dyn StorageBackend>,
    clock: Arc<dyn Clock>,
    state: TourState,
}

impl<H: HostDom> TourController<H> {
    /// Controller with in-memory storage and the system clock.
    pub fn new(guide: Guide, host: H) -> Self {
        Self {
            guide,
            host,
            storage: Arc::new(MemoryStorage::new()),
            clock: Arc::new(SystemClock),
            state: TourState::NotStarted,
        }
    }

    #[must_use]
    pub fn with_storage(mut self, storage: Arc<dyn StorageBackend>) -> Self {
        self.storage = storage;
        self
    }

    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn state(&self) -> TourState {
        self.state
    }

    pub fn step_index(&self) -> Option<usize> {
        self.state.step_index()
    }

    pub fn guide(&self) -> &Guide {
        &self.guide
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    /// Mutable host access, e.g. to move elements between layouts.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn current_step(&self) -> Option<&Step> {
        self.step_index().map(|i| &self.guide.steps[i])
    }

    /// Whether `storage` already marks this guide as seen.
    pub fn is_seen(&self) -> bool {
        let Some(key) = self.guide.local_key.as_deref() else {
            return false;
        };
        match self.storage.get(key) {
            Ok(value) => value.is_some(),
            Err(err) => {
                tracing::warn!(
                    message = "tour.storage_error",
                    key,
                    backend = self.storage.name(),
                    error = %err
                );
                false
            }
        }
    }

    /// Enter the first navigable step.
    pub fn start(&mut self) -> Result<Transition, TourError> {
        match self.state {
            TourState::Active(_) => return Ok(Transition::Stayed),
            TourState::Completed | TourState::Closed(_) => {
                return Err(TourError::AlreadyCompleted);
            }
            TourState::NotStarted => {}
        }
        if !self.guide.visible {
            return Err(TourError::Hidden);
        }
        if let Some(expire) = self.guide.expire_date
            && expire.is_expired(self.clock.now())
        {
            tracing::debug!(message = "tour.expired", expire = %expire);
            return Err(TourError::ExpiredGuide);
        }
        if self.is_seen() {
            return Err(TourError::AlreadyCompleted);
        }
        let index = self.find_forward(0).ok_or(TourError::NoSteps)?;
        self.state = TourState::Active(index);
        tracing::info!(
            message = "tour.start",
            key = self.guide.local_key.as_deref().unwrap_or(""),
            index,
            steps = self.guide.steps.len()
        );
        Ok(Transition::Started { index })
    }

    /// Advance to the next navigable step, or complete the tour.
    pub fn next(&mut self) -> Result<Transition, TourError> {
        let from = self.active_index()?;
        let step = &self.guide.steps[from];
        step.check_before_change(from, &self.guide.steps)
            .map_err(|veto| self.vetoed(from, veto))?;
        self.guide
            .hooks
            .before_step_change(from, step)
            .map_err(|veto| self.vetoed(from, veto))?;

        match self.find_forward(from + 1) {
            Some(to) => Ok(self.enter(from, to)),
            None => Ok(self.finish(CloseReason::Completed)),
        }
    }

    /// Go back to the previous navigable step; a no-op at the start.
    pub fn prev(&mut self) -> Result<Transition, TourError> {
        let from = self.active_index()?;
        let Some(to) = self.find_backward(from) else {
            return Ok(Transition::Stayed);
        };
        self.guide
            .hooks
            .before_step_change(from, &self.guide.steps[from])
            .map_err(|veto| self.vetoed(from, veto))?;
        Ok(self.enter(from, to))
    }

    /// Jump to `index` exactly, even onto a skipped step.
    pub fn go_to(&mut self, index: usize) -> Result<Transition, TourError> {
        let from = self.active_index()?;
        let len = self.guide.steps.len();
        if index >= len {
            return Err(TourError::IndexOutOfRange { index, len });
        }
        if index == from {
            return Ok(Transition::Stayed);
        }
        self.guide
            .hooks
            .before_step_change(from, &self.guide.steps[from])
            .map_err(|veto| self.vetoed(from, veto))?;
        Ok(self.enter(from, index))
    }

    /// Dismiss the tour, honoring `closable`.
    pub fn close(&mut self) -> Result<Transition, TourError> {
        let index = self.active_index()?;
        if !self.guide.closable && !self.is_last_navigable(index) {
            return Err(TourError::NotClosable { index });
        }
        Ok(self.finish(CloseReason::Closed))
    }

    /// Dismiss the tour regardless of `closable`.
    pub fn force_close(&mut self) -> Result<Transition, TourError> {
        self.active_index()?;
        Ok(self.finish(CloseReason::Forced))
    }

    /// The skip button: end the tour now.
    pub fn skip_all(&mut self) -> Result<Transition, TourError> {
        self.active_index()?;
        Ok(self.finish(CloseReason::Skipped))
    }

    /// Route a presenter action.
    pub fn dispatch(&mut self, action: NavAction) -> Result<Transition, TourError> {
        match action {
            NavAction::Prev => self.prev(),
            NavAction::Next => self.next(),
            NavAction::Skip => self.skip_all(),
            NavAction::Close => self.close(),
        }
    }

    /// Forget the persisted flag and return to `NotStarted`.
    pub fn reset(&mut self) {
        if let Some(key) = self.guide.local_key.as_deref()
            && let Err(err) = self.storage.remove(key)
        {
            tracing::warn!(message = "tour.storage_error", key, error = %err);
        }
        self.state = TourState::NotStarted;
    }

    /// Resolve the active step's target, applying the missing-target policy.
    pub fn resolve_current(&self) -> Result<ResolvedTarget, TourError> {
        let index = self.active_index()?;
        let resolver = StepResolver::new(&self.host);
        match resolver.resolve(&self.guide.steps[index]) {
            Ok(target) => Ok(target),
            Err(ResolveError::TargetNotFound { selector }) => match self.guide.missing_target {
                MissingTarget::Unanchored => Ok(ResolvedTarget::unanchored(self.host.viewport())),
                MissingTarget::Skip => Err(TourError::TargetNotFound { index, selector }),
            },
        }
    }

    /// Render-ready view of the active step.
    pub fn modal_state(&self) -> Result<ModalState<'_>, TourError> {
        let index = self.active_index()?;
        let target = self.resolve_current()?;
        let resolver = StepResolver::new(&self.host);
        let parent = resolver.mount_parent(&self.guide.steps[index], &target, self.guide.mask);
        let has_prev = self.find_backward(index).is_some();
        let is_last = self.is_last_navigable(index);
        let state = ModalState::new(&self.guide, index, target, parent, self.host.viewport())
            .ok_or(TourError::IndexOutOfRange {
                index,
                len: self.guide.steps.len(),
            })?;
        Ok(state.with_navigation(&self.guide, has_prev, is_last))
    }

    /// Pixel geometry of the active step for a modal of `modal` size.
    pub fn layout(&self, modal: Size) -> Result<ModalLayout, TourError> {
        Ok(self.modal_state()?.layout(modal))
    }

    fn active_index(&self) -> Result<usize, TourError> {
        self.state.step_index().ok_or(TourError::NotActive)
    }

    fn is_navigable(&self, index: usize) -> bool {
        let step = &self.guide.steps[index];
        if !step.is_navigable() {
            return false;
        }
        match self.guide.missing_target {
            MissingTarget::Unanchored => true,
            MissingTarget::Skip => StepResolver::new(&self.host).resolve(step).is_ok(),
        }
    }

    fn find_forward(&self, start: usize) -> Option<usize> {
        (start..self.guide.steps.len()).find(|&i| self.is_navigable(i))
    }

    fn find_backward(&self, before: usize) -> Option<usize> {
        (0..before.min(self.guide.steps.len()))
            .rev()
            .find(|&i| self.is_navigable(i))
    }

    fn is_last_navigable(&self, index: usize) -> bool {
        self.find_forward(index + 1).is_none()
    }

    fn vetoed(&self, index: usize, veto: Veto) -> TourError {
        tracing::info!(
            message = "tour.veto",
            key = self.guide.local_key.as_deref().unwrap_or(""),
            index,
            reason = veto.reason()
        );
        TourError::VetoedTransition {
            index,
            reason: veto.reason().to_owned(),
        }
    }

    fn enter(&mut self, from: usize, to: usize) -> Transition {
        self.state = TourState::Active(to);
        tracing::debug!(
            message = "tour.step_change",
            key = self.guide.local_key.as_deref().unwrap_or(""),
            from,
            to
        );
        self.guide.hooks.after_step_change(to, &self.guide.steps[to]);
        Transition::Moved { from, to }
    }

    fn finish(&mut self, reason: CloseReason) -> Transition {
        let key = self.guide.local_key.as_deref().unwrap_or("");
        let transition = if reason == CloseReason::Completed {
            self.state = TourState::Completed;
            tracing::info!(message = "tour.complete", key);
            Transition::Completed
        } else {
            self.state = TourState::Closed(reason);
            tracing::info!(message = "tour.close", key, reason = reason.as_str());
            Transition::Closed(reason)
        };
        if let Some(key) = self.guide.local_key.as_deref()
            && let Err(err) = self.storage.set(key, SEEN_VALUE)
        {
            tracing::warn!(
                message = "tour.storage_error",
                key,
                backend = self.storage.name(),
                error = %err
            );
        }
        self.guide.hooks.on_close(reason);
        transition
    }
}

impl<H: HostDom> fmt::Debug for TourController<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TourController")
            .field("state", &self.state)
            .field("steps", &self.guide.steps.len())
            .field("local_key", &self.guide.local_key)
            .field("storage", &self.storage.name())
            .finish_non_exhaustive()
    }
}
