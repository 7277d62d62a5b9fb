#![forbid(unsafe_code)]

//! Declarative guide definitions.
//!
//! A [`GuideConfig`] is the data-only subset of a [`Guide`]: everything
//! except closures. It can be loaded from TOML or JSON (`guide-config`
//! feature), validated, and turned into a `Guide`.
//!
//! ```toml
//! local_key = "onboarding-v2"
//! mask = true
//! lang = "ja"
//! expire_date = "2026-12-31"
//!
//! [[steps]]
//! selector = "#search"
//! title = "Search"
//! content = "Find anything from here."
//! placement = "bottom-left"
//!
//! [[steps]]
//! target_pos = { left = 40, top = 300, width = 200, height = 80 }
//! title = "Charts"
//! offset = { x = 0, y = 8 }
//!
//! [labels]
//! ok = "Finish"
//! ```
//!
//! Every field has a default matching [`Guide::new`].

use std::collections::BTreeMap;
#[cfg(feature = "guide-config")]
use std::path::Path;
use std::sync::Arc;

#[cfg(feature = "guide-config")]
use serde::{Deserialize, Serialize};

use tourguide_core::geometry::{Offset, Rect};
use tourguide_i18n::{Lang, LocaleStrings, builtin_catalog};
use tourguide_layout::Placement;
use tourguide_widgets::{
    Content, ExpireDate, Guide, LabelRenderer, LayoutOptions, MissingTarget, MountParent,
    NavButton, Step,
};

/// Top-level guide definition.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "guide-config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "guide-config", serde(default))]
pub struct GuideConfig {
    pub steps: Vec<StepConfig>,
    pub local_key: Option<String>,
    pub mask: bool,
    pub arrow: bool,
    pub hotspot: bool,
    pub closable: bool,
    /// Displayed number of the first step.
    pub step: usize,
    pub modal_class_name: Option<String>,
    pub mask_class_name: Option<String>,
    /// RFC 3339 or `YYYY-MM-DD`.
    pub expire_date: Option<String>,
    pub visible: bool,
    pub lang: Lang,
    pub show_previous_btn: bool,
    pub show_skip_btn: bool,
    pub close_control: Option<String>,
    pub missing_target: MissingTarget,
    pub layout: LayoutOptions,
    pub labels: LabelConfig,
    /// Extra strings per locale, layered over the built-in tables.
    pub strings: BTreeMap<String, BTreeMap<String, String>>,
}

impl Default for GuideConfig {
    fn default() -> Self {
        Self {
            steps: Vec::new(),
            local_key: None,
            mask: false,
            arrow: true,
            hotspot: false,
            closable: true,
            step: 1,
            modal_class_name: None,
            mask_class_name: None,
            expire_date: None,
            visible: true,
            lang: Lang::default(),
            show_previous_btn: true,
            show_skip_btn: true,
            close_control: None,
            missing_target: MissingTarget::default(),
            layout: LayoutOptions::default(),
            labels: LabelConfig::default(),
            strings: BTreeMap::new(),
        }
    }
}

/// One step definition.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "guide-config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "guide-config", serde(default))]
pub struct StepConfig {
    pub selector: Option<String>,
    pub target_pos: Option<TargetPosConfig>,
    pub title: String,
    pub content: String,
    /// Treat `content` as markup rather than plain text.
    pub markup: bool,
    pub placement: Placement,
    pub offset: OffsetConfig,
    pub parent: Option<MountParent>,
    pub visible: bool,
    pub skip: bool,
}

impl Default for StepConfig {
    fn default() -> Self {
        Self {
            selector: None,
            target_pos: None,
            title: String::new(),
            content: String::new(),
            markup: false,
            placement: Placement::default(),
            offset: OffsetConfig::default(),
            parent: None,
            visible: true,
            skip: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "guide-config", derive(Serialize, Deserialize))]
pub struct TargetPosConfig {
    pub left: i32,
    pub top: i32,
    pub width: i32,
    pub height: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "guide-config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "guide-config", serde(default))]
pub struct OffsetConfig {
    pub x: i32,
    pub y: i32,
}

/// Fixed button and counter text.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "guide-config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "guide-config", serde(default))]
pub struct LabelConfig {
    pub prev: Option<String>,
    pub skip: Option<String>,
    pub next: Option<String>,
    pub ok: Option<String>,
    /// Counter template with `{number}` and `{total}`.
    pub step_number: Option<String>,
}

impl LabelConfig {
    fn is_empty(&self) -> bool {
        self.prev.is_none()
            && self.skip.is_none()
            && self.next.is_none()
            && self.ok.is_none()
            && self.step_number.is_none()
    }

    fn renderer(&self) -> LabelRenderer {
        let mut renderer = LabelRenderer::new();
        for (button, label) in [
            (NavButton::Prev, &self.prev),
            (NavButton::Skip, &self.skip),
            (NavButton::Next, &self.next),
            (NavButton::Ok, &self.ok),
        ] {
            if let Some(label) = label {
                renderer = renderer.label(button, label.clone());
            }
        }
        if let Some(template) = &self.step_number {
            renderer = renderer.step_template(template.clone());
        }
        renderer
    }
}

impl StepConfig {
    fn to_step(&self) -> Step {
        let mut step = Step::new()
            .title(self.title.clone())
            .placement(self.placement)
            .offset(Offset::new(self.offset.x, self.offset.y))
            .visible(self.visible)
            .skip(self.skip);
        step.content = if self.markup {
            Content::markup(self.content.clone())
        } else {
            Content::Text(self.content.clone())
        };
        if let Some(selector) = &self.selector {
            step = step.selector(selector.as_str());
        }
        if let Some(pos) = self.target_pos {
            step = step.target_pos(Rect::new(pos.left, pos.top, pos.width, pos.height));
        }
        step.parent = self.parent;
        step
    }
}

impl GuideConfig {
    /// Load from a TOML string.
    #[cfg(feature = "guide-config")]
    pub fn from_toml_str(s: &str) -> Result<Self, GuideConfigError> {
        toml::from_str(s).map_err(GuideConfigError::Toml)
    }

    /// Load from a TOML file on disk.
    #[cfg(feature = "guide-config")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, GuideConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(GuideConfigError::Io)?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string.
    #[cfg(feature = "guide-config")]
    pub fn from_json_str(s: &str) -> Result<Self, GuideConfigError> {
        serde_json::from_str(s).map_err(GuideConfigError::Json)
    }

    /// Load from a JSON file on disk.
    #[cfg(feature = "guide-config")]
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, GuideConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(GuideConfigError::Io)?;
        Self::from_json_str(&content)
    }

    /// Load from a file, picking the format by extension (`.json` is JSON,
    /// anything else TOML).
    #[cfg(feature = "guide-config")]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, GuideConfigError> {
        let path = path.as_ref();
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::from_json_file(path),
            _ => Self::from_toml_file(path),
        }
    }

    /// Check every field. An empty list means the config is valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.steps.is_empty() {
            errors.push("steps must not be empty".into());
        }
        if self.step == 0 {
            errors.push("step must be >= 1".into());
        }
        if let Some(date) = &self.expire_date
            && let Err(e) = ExpireDate::parse(date)
        {
            errors.push(format!("expire_date: {e}"));
        }
        if let Some(key) = &self.local_key
            && key.trim().is_empty()
        {
            errors.push("local_key must not be blank".into());
        }
        if self.layout.gap < 0 {
            errors.push(format!("layout.gap must be >= 0, got {}", self.layout.gap));
        }
        if self.layout.spotlight_padding < 0 {
            errors.push(format!(
                "layout.spotlight_padding must be >= 0, got {}",
                self.layout.spotlight_padding
            ));
        }
        if self.layout.arrow_inset < 0 {
            errors.push(format!(
                "layout.arrow_inset must be >= 0, got {}",
                self.layout.arrow_inset
            ));
        }
        for locale in self.strings.keys() {
            if locale.trim().is_empty() {
                errors.push("strings: locale name must not be blank".into());
            }
        }

        for (i, step) in self.steps.iter().enumerate() {
            if let Some(selector) = &step.selector
                && selector.trim().is_empty()
            {
                errors.push(format!("steps[{i}].selector must not be empty"));
            }
            if let Some(pos) = step.target_pos
                && (pos.width < 0 || pos.height < 0)
            {
                errors.push(format!(
                    "steps[{i}].target_pos must have non-negative size, got {}x{}",
                    pos.width, pos.height
                ));
            }
        }

        errors
    }

    /// Validate and build the guide.
    pub fn to_guide(&self) -> Result<Guide, GuideConfigError> {
        let errors = self.validate();
        if !errors.is_empty() {
            return Err(GuideConfigError::Validation(errors));
        }

        let mut guide = Guide::new(self.steps.iter().map(StepConfig::to_step).collect())
            .mask(self.mask)
            .arrow(self.arrow)
            .hotspot(self.hotspot)
            .closable(self.closable)
            .first_step_number(self.step)
            .visible(self.visible)
            .lang(self.lang)
            .show_previous_btn(self.show_previous_btn)
            .show_skip_btn(self.show_skip_btn)
            .missing_target(self.missing_target)
            .layout(self.layout);
        guide.local_key = self.local_key.clone();
        guide.modal_class_name = self.modal_class_name.clone();
        guide.mask_class_name = self.mask_class_name.clone();
        guide.close_control = self.close_control.clone();
        if let Some(date) = &self.expire_date {
            guide.expire_date = ExpireDate::parse(date).ok();
        }
        if !self.labels.is_empty() {
            guide = guide.renderer(self.labels.renderer());
        }
        if !self.strings.is_empty() {
            let mut catalog = builtin_catalog();
            for (locale, entries) in &self.strings {
                let mut strings = LocaleStrings::new();
                for (key, value) in entries {
                    strings.insert(key.clone(), value.clone());
                }
                catalog.extend_locale(locale, strings);
            }
            guide = guide.catalog(Arc::new(catalog));
        }
        Ok(guide)
    }
}

/// Errors from loading or validating a guide definition.
#[derive(Debug)]
pub enum GuideConfigError {
    /// I/O error reading a file.
    Io(std::io::Error),
    /// TOML parse error.
    #[cfg(feature = "guide-config")]
    Toml(toml::de::Error),
    /// JSON parse error.
    #[cfg(feature = "guide-config")]
    Json(serde_json::Error),
    /// Validation errors.
    Validation(Vec<String>),
}

impl std::fmt::Display for GuideConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            #[cfg(feature = "guide-config")]
            Self::Toml(e) => write!(f, "TOML parse error: {e}"),
            #[cfg(feature = "guide-config")]
            Self::Json(e) => write!(f, "JSON parse error: {e}"),
            Self::Validation(errors) => {
                write!(f, "validation errors: {}", errors.join("; "))
            }
        }
    }
}

impl std::error::Error for GuideConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            #[cfg(feature = "guide-config")]
            Self::Toml(e) => Some(e),
            #[cfg(feature = "guide-config")]
            Self::Json(e) => Some(e),
            Self::Validation(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tourguide_i18n::TextKey;
    use tourguide_widgets::GuideRenderer;

    fn two_steps() -> GuideConfig {
        GuideConfig {
            steps: vec![
                StepConfig {
                    selector: Some("#a".into()),
                    title: "A".into(),
                    ..StepConfig::default()
                },
                StepConfig {
                    target_pos: Some(TargetPosConfig {
                        left: 1,
                        top: 2,
                        width: 3,
                        height: 4,
                    }),
                    content: "<b>B</b>".into(),
                    markup: true,
                    placement: Placement::LeftTop,
                    ..StepConfig::default()
                },
            ],
            ..GuideConfig::default()
        }
    }

    #[test]
    fn default_matches_guide_defaults() {
        let cfg = GuideConfig {
            steps: vec![StepConfig::default()],
            ..GuideConfig::default()
        };
        let guide = cfg.to_guide().unwrap();
        let reference = Guide::new(vec![Step::new()]);
        assert_eq!(guide.mask, reference.mask);
        assert_eq!(guide.arrow, reference.arrow);
        assert_eq!(guide.hotspot, reference.hotspot);
        assert_eq!(guide.closable, reference.closable);
        assert_eq!(guide.first_step_number, reference.first_step_number);
        assert_eq!(guide.lang, reference.lang);
        assert_eq!(guide.layout, reference.layout);
    }

    #[test]
    fn valid_config_has_no_errors() {
        assert!(two_steps().validate().is_empty());
    }

    #[test]
    fn validate_catches_empty_steps() {
        let errors = GuideConfig::default().validate();
        assert!(errors.iter().any(|e| e.contains("steps")));
    }

    #[test]
    fn validate_catches_zero_step_number() {
        let mut cfg = two_steps();
        cfg.step = 0;
        assert!(cfg.validate().iter().any(|e| e.contains("step must be")));
    }

    #[test]
    fn validate_catches_bad_expire_date() {
        let mut cfg = two_steps();
        cfg.expire_date = Some("soon".into());
        assert!(cfg.validate().iter().any(|e| e.contains("expire_date")));
    }

    #[test]
    fn validate_catches_blank_selector_and_negative_target() {
        let mut cfg = two_steps();
        cfg.steps[0].selector = Some("  ".into());
        cfg.steps[1].target_pos = Some(TargetPosConfig {
            left: 0,
            top: 0,
            width: -1,
            height: 5,
        });
        let errors = cfg.validate();
        assert!(errors.iter().any(|e| e.contains("steps[0].selector")));
        assert!(errors.iter().any(|e| e.contains("steps[1].target_pos")));
    }

    #[test]
    fn validate_catches_negative_layout() {
        let mut cfg = two_steps();
        cfg.layout.gap = -2;
        assert!(cfg.validate().iter().any(|e| e.contains("layout.gap")));
    }

    #[test]
    fn to_guide_rejects_invalid() {
        let err = GuideConfig::default().to_guide().unwrap_err();
        assert!(matches!(err, GuideConfigError::Validation(_)));
        assert!(err.to_string().starts_with("validation errors"));
    }

    #[test]
    fn to_guide_builds_steps() {
        let guide = two_steps().to_guide().unwrap();
        assert_eq!(guide.len(), 2);
        assert_eq!(
            guide.steps[0].selector.as_ref().and_then(|s| s.as_query()),
            Some("#a")
        );
        assert_eq!(guide.steps[1].target_pos, Some(Rect::new(1, 2, 3, 4)));
        assert!(guide.steps[1].content.resolve().is_markup());
        assert_eq!(guide.steps[1].placement, Placement::LeftTop);
    }

    #[test]
    fn labels_and_strings_flow_into_guide() {
        let mut cfg = two_steps();
        cfg.labels.ok = Some("Finish".into());
        cfg.strings.insert(
            "en".into(),
            BTreeMap::from([("NEXT_STEP".to_string(), "Continue".to_string())]),
        );
        let guide = cfg.to_guide().unwrap();
        assert_eq!(guide.renderer.button(NavButton::Ok, "Got it"), "Finish");
        let t = guide.translator();
        assert_eq!(t.label(TextKey::NextStep), "Continue");
        assert_eq!(t.label(TextKey::PrevStep), "Previous");
    }

    #[test]
    fn expire_date_parsed() {
        let mut cfg = two_steps();
        cfg.expire_date = Some("2031-05-06".into());
        let guide = cfg.to_guide().unwrap();
        assert!(guide.expire_date.is_some());
    }
}
