#![forbid(unsafe_code)]

//! Guide-level callbacks.

use std::fmt;
use std::sync::Arc;

use crate::step::Step;

/// A hook refused a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Veto {
    reason: String,
}

impl Veto {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }
}

impl fmt::Display for Veto {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.reason.is_empty() {
            f.write_str("transition vetoed")
        } else {
            write!(f, "transition vetoed: {}", self.reason)
        }
    }
}

impl std::error::Error for Veto {}

/// Why a tour stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum CloseReason {
    /// Advanced past the last navigable step.
    Completed,
    /// The user dismissed the modal.
    Closed,
    /// The skip button ended the tour.
    Skipped,
    /// Closed programmatically, bypassing `closable`.
    Forced,
}

impl CloseReason {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Completed => "completed",
            Self::Closed => "closed",
            Self::Skipped => "skipped",
            Self::Forced => "forced",
        }
    }
}

impl fmt::Display for CloseReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Callbacks fired by the controller around transitions.
///
/// `before_step_change` receives the index being left and may veto.
/// `after_step_change` receives the index just entered.
pub trait GuideHooks: Send + Sync {
    fn before_step_change(&self, _index: usize, _step: &Step) -> Result<(), Veto> {
        Ok(())
    }

    fn after_step_change(&self, _index: usize, _step: &Step) {}

    fn on_close(&self, _reason: CloseReason) {}
}

/// Hooks that do nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHooks;

impl GuideHooks for NoHooks {}

type BeforeFn = Arc<dyn Fn(usize, &Step) -> Result<(), Veto> + Send + Sync>;
type AfterFn = Arc<dyn Fn(usize, &Step) + Send + Sync>;
type CloseFn = Arc<dyn Fn(CloseReason) + Send + Sync>;

/// [`GuideHooks`] assembled from closures.
#[derive(Clone, Default)]
pub struct FnHooks {
    before: Option<BeforeFn>,
    after: Option<AfterFn>,
    close: Option<CloseFn>,
}

impl FnHooks {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn before_step_change<F>(mut self, f: F) -> Self
    where
        F: Fn(usize, &Step) -> Result<(), Veto> + Send + Sync + 'static,
    {
        self.before = Some(Arc::new(f));
        self
    }

    #[must_use]
    pub fn after_step_change<F>(mut self, f: F) -> Self
    where
        F: Fn(usize, &Step) + Send + Sync + 'static,
    {
        self.after = Some(Arc::new(f));
        self
    }

    #[must_use]
    pub fn on_close<F>(mut self, f: F) -> Self
    where
        F: Fn(CloseReason) + Send + Sync + 'static,
    {
        self.close = Some(Arc::new(f));
        self
    }
}

impl fmt::Debug for FnHooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnHooks")
            .field("before", &self.before.is_some())
            .field("after", &self.after.is_some())
            .field("close", &self.close.is_some())
            .finish()
    }
}

impl GuideHooks for FnHooks {
    fn before_step_change(&self, index: usize, step: &Step) -> Result<(), Veto> {
        match &self.before {
            Some(f) => f(index, step),
            None => Ok(()),
        }
    }

    fn after_step_change(&self, index: usize, step: &Step) {
        if let Some(f) = &self.after {
            f(index, step);
        }
    }

    fn on_close(&self, reason: CloseReason) {
        if let Some(f) = &self.close {
            f(reason);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn no_hooks_never_veto() {
        assert!(NoHooks.before_step_change(0, &Step::new()).is_ok());
    }

    #[test]
    fn fn_hooks_forward_calls() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let (a, b, c) = (Arc::clone(&log), Arc::clone(&log), Arc::clone(&log));
        let hooks = FnHooks::new()
            .before_step_change(move |i, _| {
                a.lock().unwrap().push(format!("before {i}"));
                if i == 1 { Err(Veto::new("nope")) } else { Ok(()) }
            })
            .after_step_change(move |i, _| b.lock().unwrap().push(format!("after {i}")))
            .on_close(move |r| c.lock().unwrap().push(format!("close {r}")));

        let step = Step::new();
        assert!(GuideHooks::before_step_change(&hooks, 0, &step).is_ok());
        assert_eq!(GuideHooks::before_step_change(&hooks, 1, &step).unwrap_err().reason(), "nope");
        GuideHooks::after_step_change(&hooks, 2, &step);
        GuideHooks::on_close(&hooks, CloseReason::Skipped);

        assert_eq!(
            *log.lock().unwrap(),
            vec!["before 0", "before 1", "after 2", "close skipped"]
        );
    }

    #[test]
    fn veto_display() {
        assert_eq!(Veto::new("").to_string(), "transition vetoed");
        assert_eq!(Veto::new("x").to_string(), "transition vetoed: x");
    }
}
