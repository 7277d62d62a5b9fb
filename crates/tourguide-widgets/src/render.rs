#![forbid(unsafe_code)]

//! Presenter customization points for the modal's text.
//!
//! A [`GuideRenderer`] decides the step-counter string and the label on each
//! navigation button. The defaults come from the [`Translator`]; overrides
//! see the default label so they can wrap or replace it.

use std::collections::HashMap;
use std::fmt;

use tourguide_i18n::{StepNumber, TextKey, Translator};

/// Buttons a modal can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum NavButton {
    Prev,
    Skip,
    Next,
    /// Confirm button on the last step.
    Ok,
}

impl NavButton {
    pub const ALL: [NavButton; 4] = [Self::Prev, Self::Skip, Self::Next, Self::Ok];

    /// Text key for the built-in label.
    pub const fn text_key(self) -> TextKey {
        match self {
            Self::Prev => TextKey::PrevStep,
            Self::Skip => TextKey::SkipStep,
            Self::Next => TextKey::NextStep,
            Self::Ok => TextKey::IKnow,
        }
    }

    /// What pressing the button asks the controller to do.
    pub const fn action(self) -> NavAction {
        match self {
            Self::Prev => NavAction::Prev,
            Self::Skip => NavAction::Skip,
            Self::Next | Self::Ok => NavAction::Next,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Prev => "prev",
            Self::Skip => "skip",
            Self::Next => "next",
            Self::Ok => "ok",
        }
    }
}

impl fmt::Display for NavButton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// User intent routed back into the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum NavAction {
    Prev,
    Next,
    Skip,
    Close,
}

impl NavAction {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Prev => "prev",
            Self::Next => "next",
            Self::Skip => "skip",
            Self::Close => "close",
        }
    }
}

impl fmt::Display for NavAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for NavAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "prev" | "previous" | "back" => Ok(Self::Prev),
            "next" | "ok" => Ok(Self::Next),
            "skip" => Ok(Self::Skip),
            "close" => Ok(Self::Close),
            other => Err(format!("unknown action {other:?}")),
        }
    }
}

/// Produces the text a presenter shows for the counter and buttons.
pub trait GuideRenderer: Send + Sync {
    /// Step counter, e.g. "Step 2 of 5". `number` is 1-based and already
    /// includes the guide's starting offset.
    fn step_node(&self, number: usize, total: usize, text: &Translator) -> String {
        text.step_number(number, total)
    }

    /// Label for `button`, given the translated default.
    fn button(&self, _button: NavButton, default_label: &str) -> String {
        default_label.to_owned()
    }
}

/// Built-in labels from the translator.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultRenderer;

impl GuideRenderer for DefaultRenderer {}

/// Fixed label overrides plus an optional counter template.
///
/// Buttons without an override fall back to the translated label.
#[derive(Debug, Clone, Default)]
pub struct LabelRenderer {
    labels: HashMap<NavButton, String>,
    step_number: Option<StepNumber>,
}

impl LabelRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn label(mut self, button: NavButton, label: impl Into<String>) -> Self {
        self.labels.insert(button, label.into());
        self
    }

    /// Counter template using `{number}` and `{total}`.
    #[must_use]
    pub fn step_template(mut self, template: impl Into<String>) -> Self {
        self.step_number = Some(StepNumber::new(template));
        self
    }
}

impl GuideRenderer for LabelRenderer {
    fn step_node(&self, number: usize, total: usize, text: &Translator) -> String {
        match &self.step_number {
            Some(template) => template.format(number, total),
            None => text.step_number(number, total),
        }
    }

    fn button(&self, button: NavButton, default_label: &str) -> String {
        self.labels
            .get(&button)
            .cloned()
            .unwrap_or_else(|| default_label.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tourguide_i18n::Lang;

    #[test]
    fn default_renderer_uses_translator() {
        let t = Translator::new(Lang::En);
        assert_eq!(DefaultRenderer.step_node(2, 5, &t), "Step 2 of 5");
        assert_eq!(DefaultRenderer.button(NavButton::Next, "Next"), "Next");
    }

    #[test]
    fn label_renderer_overrides_selectively() {
        let t = Translator::new(Lang::En);
        let r = LabelRenderer::new()
            .label(NavButton::Ok, "Finish")
            .step_template("{number}/{total}");
        assert_eq!(r.button(NavButton::Ok, "Got it"), "Finish");
        assert_eq!(r.button(NavButton::Prev, "Previous"), "Previous");
        assert_eq!(r.step_node(3, 4, &t), "3/4");
    }

    #[test]
    fn buttons_map_to_actions_and_keys() {
        assert_eq!(NavButton::Ok.action(), NavAction::Next);
        assert_eq!(NavButton::Skip.action(), NavAction::Skip);
        assert_eq!(NavButton::Ok.text_key(), TextKey::IKnow);
        assert_eq!(NavButton::Prev.text_key(), TextKey::PrevStep);
    }

    #[test]
    fn action_parsing() {
        assert_eq!("Next".parse::<NavAction>(), Ok(NavAction::Next));
        assert_eq!("back".parse::<NavAction>(), Ok(NavAction::Prev));
        assert!("jump".parse::<NavAction>().is_err());
    }
}
