#![forbid(unsafe_code)]

//! The whole tour: an ordered list of steps plus guide-wide options.
//!
//! # Example
//!
//! ```ignore
//! use tourguide_widgets::{Guide, Step};
//!
//! let guide = Guide::new(vec![
//!     Step::at("#search").title("Search"),
//!     Step::at("#filters").title("Filters").skip(true),
//!     Step::at("#export").title("Export"),
//! ])
//! .local_key("onboarding-v2")
//! .mask(true);
//! ```

use std::fmt;
use std::sync::Arc;

use tourguide_i18n::{Lang, StringCatalog, Translator};

use crate::expiry::ExpireDate;
use crate::hooks::{GuideHooks, NoHooks};
use crate::render::{DefaultRenderer, GuideRenderer};
use crate::step::Step;

/// What navigation does with a step whose selector matches nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum MissingTarget {
    /// Show the step centred in the viewport, without arrow or hotspot.
    #[default]
    Unanchored,
    /// Pass over the step as if it were marked `skip`.
    Skip,
}

/// Pixel-level layout knobs shared by every step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LayoutOptions {
    /// Space between target and modal on the main axis.
    pub gap: i32,
    /// Breathing room around the spotlight cutout.
    pub spotlight_padding: i32,
    /// Minimum distance between the arrow tip and a modal corner.
    pub arrow_inset: i32,
    pub auto_flip: bool,
    pub clamp: bool,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            gap: 0,
            spotlight_padding: 4,
            arrow_inset: 12,
            auto_flip: true,
            clamp: true,
        }
    }
}

/// A complete tour definition.
#[derive(Clone)]
pub struct Guide {
    pub steps: Vec<Step>,
    /// Persistence key marking the tour as seen.
    pub local_key: Option<String>,
    pub mask: bool,
    pub arrow: bool,
    pub hotspot: bool,
    /// Whether the tour can be dismissed before the last step.
    pub closable: bool,
    /// Displayed number of the first step, for chaining guides.
    pub first_step_number: usize,
    pub modal_class_name: Option<String>,
    pub mask_class_name: Option<String>,
    pub expire_date: Option<ExpireDate>,
    pub visible: bool,
    pub lang: Lang,
    /// Replaces the built-in string tables when set.
    pub catalog: Option<Arc<StringCatalog>>,
    pub renderer: Arc<dyn GuideRenderer>,
    pub hooks: Arc<dyn GuideHooks>,
    pub show_previous_btn: bool,
    pub show_skip_btn: bool,
    /// Presenter-defined close control, passed through untouched.
    pub close_control: Option<String>,
    pub missing_target: MissingTarget,
    pub layout: LayoutOptions,
}

impl Guide {
    pub fn new(steps: Vec<Step>) -> Self {
        Self {
            steps,
            local_key: None,
            mask: false,
            arrow: true,
            hotspot: false,
            closable: true,
            first_step_number: 1,
            modal_class_name: None,
            mask_class_name: None,
            expire_date: None,
            visible: true,
            lang: Lang::default(),
            catalog: None,
            renderer: Arc::new(DefaultRenderer),
            hooks: Arc::new(NoHooks),
            show_previous_btn: true,
            show_skip_btn: true,
            close_control: None,
            missing_target: MissingTarget::default(),
            layout: LayoutOptions::default(),
        }
    }

    #[must_use]
    pub fn step(mut self, step: Step) -> Self {
        self.steps.push(step);
        self
    }

    #[must_use]
    pub fn local_key(mut self, key: impl Into<String>) -> Self {
        self.local_key = Some(key.into());
        self
    }

    #[must_use]
    pub fn mask(mut self, mask: bool) -> Self {
        self.mask = mask;
        self
    }

    #[must_use]
    pub fn arrow(mut self, arrow: bool) -> Self {
        self.arrow = arrow;
        self
    }

    #[must_use]
    pub fn hotspot(mut self, hotspot: bool) -> Self {
        self.hotspot = hotspot;
        self
    }

    #[must_use]
    pub fn closable(mut self, closable: bool) -> Self {
        self.closable = closable;
        self
    }

    /// Displayed number of the first step. Zero is treated as one.
    #[must_use]
    pub fn first_step_number(mut self, number: usize) -> Self {
        self.first_step_number = number.max(1);
        self
    }

    #[must_use]
    pub fn modal_class_name(mut self, class: impl Into<String>) -> Self {
        self.modal_class_name = Some(class.into());
        self
    }

    #[must_use]
    pub fn mask_class_name(mut self, class: impl Into<String>) -> Self {
        self.mask_class_name = Some(class.into());
        self
    }

    #[must_use]
    pub fn expire_date(mut self, date: ExpireDate) -> Self {
        self.expire_date = Some(date);
        self
    }

    #[must_use]
    pub fn visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    #[must_use]
    pub fn lang(mut self, lang: Lang) -> Self {
        self.lang = lang;
        self
    }

    #[must_use]
    pub fn catalog(mut self, catalog: Arc<StringCatalog>) -> Self {
        self.catalog = Some(catalog);
        self
    }

    #[must_use]
    pub fn renderer(mut self, renderer: impl GuideRenderer + 'static) -> Self {
        self.renderer = Arc::new(renderer);
        self
    }

    #[must_use]
    pub fn hooks(mut self, hooks: impl GuideHooks + 'static) -> Self {
        self.hooks = Arc::new(hooks);
        self
    }

    #[must_use]
    pub fn show_previous_btn(mut self, show: bool) -> Self {
        self.show_previous_btn = show;
        self
    }

    #[must_use]
    pub fn show_skip_btn(mut self, show: bool) -> Self {
        self.show_skip_btn = show;
        self
    }

    #[must_use]
    pub fn close_control(mut self, control: impl Into<String>) -> Self {
        self.close_control = Some(control.into());
        self
    }

    #[must_use]
    pub fn missing_target(mut self, policy: MissingTarget) -> Self {
        self.missing_target = policy;
        self
    }

    #[must_use]
    pub fn layout(mut self, layout: LayoutOptions) -> Self {
        self.layout = layout;
        self
    }

    /// `TEXT(key)` for this guide's language and catalog.
    pub fn translator(&self) -> Translator {
        match &self.catalog {
            Some(catalog) => Translator::with_catalog(self.lang, Arc::clone(catalog)),
            None => Translator::new(self.lang),
        }
    }

    /// Displayed number for the step at `index`.
    pub fn display_number(&self, index: usize) -> usize {
        self.first_step_number.saturating_add(index)
    }

    /// Displayed step total.
    pub fn display_total(&self) -> usize {
        self.first_step_number
            .saturating_sub(1)
            .saturating_add(self.steps.len())
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

impl Default for Guide {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl fmt::Debug for Guide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Guide")
            .field("steps", &self.steps)
            .field("local_key", &self.local_key)
            .field("mask", &self.mask)
            .field("arrow", &self.arrow)
            .field("hotspot", &self.hotspot)
            .field("closable", &self.closable)
            .field("first_step_number", &self.first_step_number)
            .field("expire_date", &self.expire_date)
            .field("visible", &self.visible)
            .field("lang", &self.lang)
            .field("show_previous_btn", &self.show_previous_btn)
            .field("show_skip_btn", &self.show_skip_btn)
            .field("missing_target", &self.missing_target)
            .field("layout", &self.layout)
            .finish_non_exhaustive()
    }
}
