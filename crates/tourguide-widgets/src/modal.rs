#![forbid(unsafe_code)]

//! Render-ready view of the active step.
//!
//! [`ModalState`] is what a presenter receives: the anchor and mount parent,
//! the step list and index, effective flags, localized text and the
//! buttons to draw. [`ModalState::layout`] turns it into pixel geometry
//! once the presenter knows how big its modal is.
//!
//! # Effective flags
//!
//! - `arrow` and `hotspot` are forced off for unanchored steps.
//! - `closable` is on when the guide is closable or the step is the last
//!   navigable one.

use tourguide_core::geometry::{Rect, Size};
use tourguide_i18n::Translator;
use tourguide_layout::{Arrow, ModalPosition, Placement, PlacementCalculator, Spotlight};

use crate::guide::{Guide, LayoutOptions};
use crate::host::ElementId;
use crate::render::{GuideRenderer, NavAction, NavButton};
use crate::resolver::ResolvedTarget;
use crate::step::{ResolvedContent, Step};

/// One button the presenter should draw.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ButtonView {
    pub button: NavButton,
    pub label: String,
    pub action: NavAction,
}

/// Pixel geometry for the active step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModalLayout {
    pub modal: Rect,
    /// Placement actually used; `None` when centered.
    pub placement: Option<Placement>,
    pub flipped: bool,
    pub arrow: Option<Arrow>,
    pub hotspot: Option<(i32, i32)>,
    /// Rectangles to dim. Empty when the guide has no mask.
    pub mask: Vec<Rect>,
    /// Undimmed hole around the target, when masked and anchored.
    pub cutout: Option<Rect>,
}

/// The active step as seen by a presenter.
#[derive(Clone)]
pub struct ModalState<'a> {
    pub anchor: Option<ElementId>,
    pub parent: ElementId,
    pub viewport: Rect,
    pub target: ResolvedTarget,
    pub steps: &'a [Step],
    pub step_index: usize,
    pub mask: bool,
    pub arrow: bool,
    pub hotspot: bool,
    pub closable: bool,
    pub close_control: Option<&'a str>,
    pub show_previous_btn: bool,
    pub show_skip_btn: bool,
    pub modal_class_name: Option<&'a str>,
    pub mask_class_name: Option<&'a str>,
    /// `TEXT(key)` lookup.
    pub text: Translator,
    pub has_prev: bool,
    pub is_last: bool,
    current: &'a Step,
    renderer: &'a dyn GuideRenderer,
    display_number: usize,
    display_total: usize,
    layout_options: LayoutOptions,
}

impl<'a> ModalState<'a> {
    /// Build the view for `guide.steps[step_index]`, or `None` when the
    /// index is past the end of the guide.
    ///
    /// Neighbour navigability is derived from the steps' own flags; callers
    /// that know more (e.g. targets that failed to resolve) refine it with
    /// [`with_navigation`](Self::with_navigation).
    pub fn new(
        guide: &'a Guide,
        step_index: usize,
        target: ResolvedTarget,
        parent: ElementId,
        viewport: Rect,
    ) -> Option<Self> {
        let steps = guide.steps.as_slice();
        let current = steps.get(step_index)?;
        let has_prev = steps[..step_index].iter().any(Step::is_navigable);
        let is_last = !steps
            .iter()
            .skip(step_index.saturating_add(1))
            .any(Step::is_navigable);
        let mut state = Self {
            anchor: target.element,
            parent,
            viewport,
            target,
            steps,
            step_index,
            current,
            mask: guide.mask,
            arrow: guide.arrow,
            hotspot: guide.hotspot,
            closable: guide.closable,
            close_control: guide.close_control.as_deref(),
            show_previous_btn: guide.show_previous_btn,
            show_skip_btn: guide.show_skip_btn,
            modal_class_name: guide.modal_class_name.as_deref(),
            mask_class_name: guide.mask_class_name.as_deref(),
            text: guide.translator(),
            has_prev,
            is_last,
            renderer: guide.renderer.as_ref(),
            display_number: guide.display_number(step_index),
            display_total: guide.display_total(),
            layout_options: guide.layout,
        };
        state.apply_effective_flags(guide);
        Some(state)
    }

    #[must_use]
    pub fn with_navigation(mut self, guide: &Guide, has_prev: bool, is_last: bool) -> Self {
        self.has_prev = has_prev;
        self.is_last = is_last;
        self.apply_effective_flags(guide);
        self
    }

    fn apply_effective_flags(&mut self, guide: &Guide) {
        let anchored = self.target.is_anchored();
        self.arrow = guide.arrow && anchored;
        self.hotspot = guide.hotspot && anchored;
        self.closable = guide.closable || self.is_last;
    }

    pub fn step(&self) -> &'a Step {
        self.current
    }

    pub fn title(&self) -> &'a str {
        &self.step().title
    }

    /// Evaluates lazy content.
    pub fn content(&self) -> ResolvedContent {
        self.step().content.resolve()
    }

    /// Step counter through the guide's renderer.
    pub fn step_label(&self) -> String {
        self.renderer
            .step_node(self.display_number, self.display_total, &self.text)
    }

    /// Buttons in display order: prev, skip, then next or ok.
    pub fn buttons(&self) -> Vec<ButtonView> {
        let mut kinds = Vec::with_capacity(3);
        if self.show_previous_btn && self.has_prev {
            kinds.push(NavButton::Prev);
        }
        if self.show_skip_btn && !self.is_last {
            kinds.push(NavButton::Skip);
        }
        kinds.push(if self.is_last {
            NavButton::Ok
        } else {
            NavButton::Next
        });

        kinds
            .into_iter()
            .map(|button| {
                let default_label = self.text.label(button.text_key());
                ButtonView {
                    button,
                    label: self.renderer.button(button, &default_label),
                    action: button.action(),
                }
            })
            .collect()
    }

    /// Geometry for a modal of the given size.
    pub fn layout(&self, modal: Size) -> ModalLayout {
        let step = self.step();
        let opts = self.layout_options;
        let anchored = self.target.is_anchored();

        let pos: ModalPosition = if anchored {
            PlacementCalculator::new(self.target.rect, step.placement)
                .offset(step.offset)
                .gap(opts.gap)
                .auto_flip(opts.auto_flip)
                .clamp(opts.clamp)
                .compute(modal, self.viewport)
        } else {
            PlacementCalculator::centered(modal, self.viewport, step.offset)
        };
        let modal_rect = pos.rect(modal);
        let spotlight = Spotlight::new(self.target.rect).padding(opts.spotlight_padding);

        let arrow = match pos.placement {
            Some(placement) if self.arrow => {
                Some(spotlight.arrow(modal_rect, placement, opts.arrow_inset))
            }
            _ => None,
        };
        let hotspot = self.hotspot.then(|| spotlight.hotspot());
        let (mask, cutout) = match (self.mask, anchored) {
            (false, _) => (Vec::new(), None),
            (true, true) => (
                spotlight.mask_regions(self.viewport),
                spotlight.cutout(self.viewport),
            ),
            (true, false) => (vec![self.viewport], None),
        };

        ModalLayout {
            modal: modal_rect,
            placement: pos.placement,
            flipped: pos.flipped,
            arrow,
            hotspot,
            mask,
            cutout,
        }
    }
}

impl std::fmt::Debug for ModalState<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModalState")
            .field("anchor", &self.anchor)
            .field("parent", &self.parent)
            .field("target", &self.target)
            .field("step_index", &self.step_index)
            .field("mask", &self.mask)
            .field("arrow", &self.arrow)
            .field("hotspot", &self.hotspot)
            .field("closable", &self.closable)
            .field("has_prev", &self.has_prev)
            .field("is_last", &self.is_last)
            .finish_non_exhaustive()
    }
}
