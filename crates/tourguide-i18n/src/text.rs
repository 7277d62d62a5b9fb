#![forbid(unsafe_code)]

//! Built-in UI strings and the `TEXT(key)` lookup used by tour modals.

use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, OnceLock};

use crate::catalog::{LocaleStrings, StringCatalog, interpolate};

/// Languages with built-in tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Lang {
    Zh,
    #[default]
    En,
    Ja,
}

impl Lang {
    pub const ALL: [Lang; 3] = [Lang::Zh, Lang::En, Lang::Ja];

    /// Locale code used as the catalog key.
    pub const fn code(self) -> &'static str {
        match self {
            Self::Zh => "zh",
            Self::En => "en",
            Self::Ja => "ja",
        }
    }
}

impl fmt::Display for Lang {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Lang {
    type Err = String;

    /// Accepts bare codes and region-qualified tags (`zh-CN`, `ja_JP`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let base = s.split(['-', '_']).next().unwrap_or(s).to_ascii_lowercase();
        match base.as_str() {
            "zh" => Ok(Self::Zh),
            "en" => Ok(Self::En),
            "ja" => Ok(Self::Ja),
            _ => Err(format!("unsupported language '{s}' (expected zh, en or ja)")),
        }
    }
}

/// The fixed set of UI string identifiers a tour modal asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextKey {
    NextStep,
    IKnow,
    StepNumber,
    PrevStep,
    SkipStep,
}

impl TextKey {
    pub const ALL: [TextKey; 5] = [
        TextKey::NextStep,
        TextKey::IKnow,
        TextKey::StepNumber,
        TextKey::PrevStep,
        TextKey::SkipStep,
    ];

    /// Catalog key.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NextStep => "NEXT_STEP",
            Self::IKnow => "I_KNOW",
            Self::StepNumber => "STEP_NUMBER",
            Self::PrevStep => "PREV_STEP",
            Self::SkipStep => "SKIP_STEP",
        }
    }
}

/// Step-counter formatter. The template uses `{number}` and `{total}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepNumber {
    template: String,
}

impl StepNumber {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
        }
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    /// Render "step `number` of `total`".
    pub fn format(&self, number: usize, total: usize) -> String {
        let number = number.to_string();
        let total = total.to_string();
        interpolate(&self.template, &[("number", &number), ("total", &total)])
    }
}

/// Result of a `TEXT(key)` lookup: a plain label, or the step-counter
/// formatter for [`TextKey::StepNumber`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Text {
    Label(String),
    StepNumber(StepNumber),
}

impl Text {
    /// The label text, if this is a label.
    pub fn as_label(&self) -> Option<&str> {
        match self {
            Self::Label(label) => Some(label),
            Self::StepNumber(_) => None,
        }
    }
}

fn table(next: &str, i_know: &str, step: &str, prev: &str, skip: &str) -> LocaleStrings {
    LocaleStrings::new()
        .with(TextKey::NextStep.as_str(), next)
        .with(TextKey::IKnow.as_str(), i_know)
        .with(TextKey::StepNumber.as_str(), step)
        .with(TextKey::PrevStep.as_str(), prev)
        .with(TextKey::SkipStep.as_str(), skip)
}

/// Catalog with the built-in `zh`, `en` and `ja` tables, falling back to `en`.
pub fn builtin_catalog() -> StringCatalog {
    let mut catalog = StringCatalog::new().with_fallback(["en"]);
    catalog.add_locale(
        "zh",
        table("下一步", "我知道了", "第 {number} 步，共 {total} 步", "上一步", "跳过"),
    );
    catalog.add_locale(
        "en",
        table("Next", "Got it", "Step {number} of {total}", "Previous", "Skip"),
    );
    catalog.add_locale(
        "ja",
        table("次へ", "了解しました", "ステップ {number}/{total}", "前へ", "スキップ"),
    );
    catalog
}

fn shared_builtin() -> Arc<StringCatalog> {
    static BUILTIN: OnceLock<Arc<StringCatalog>> = OnceLock::new();
    Arc::clone(BUILTIN.get_or_init(|| Arc::new(builtin_catalog())))
}

/// `TEXT(key)` for one language.
#[derive(Debug, Clone)]
pub struct Translator {
    lang: Lang,
    catalog: Arc<StringCatalog>,
}

impl Translator {
    /// Translator over the built-in tables.
    pub fn new(lang: Lang) -> Self {
        Self {
            lang,
            catalog: shared_builtin(),
        }
    }

    /// Translator over a custom catalog (e.g. the built-ins extended with
    /// product wording).
    pub fn with_catalog(lang: Lang, catalog: Arc<StringCatalog>) -> Self {
        Self { lang, catalog }
    }

    pub fn lang(&self) -> Lang {
        self.lang
    }

    /// Look up one of the fixed UI strings.
    ///
    /// A key missing from every locale in the chain yields its identifier,
    /// so a broken table degrades to readable placeholders instead of
    /// blank buttons.
    pub fn text(&self, key: TextKey) -> Text {
        let raw = self
            .catalog
            .get(self.lang.code(), key.as_str())
            .unwrap_or(key.as_str());
        match key {
            TextKey::StepNumber => Text::StepNumber(StepNumber::new(raw)),
            _ => Text::Label(raw.to_owned()),
        }
    }

    /// Label for a button key; the step counter renders with `{number}`
    /// and `{total}` left in place.
    pub fn label(&self, key: TextKey) -> String {
        match self.text(key) {
            Text::Label(label) => label,
            Text::StepNumber(format) => format.template().to_owned(),
        }
    }

    /// Rendered step counter.
    pub fn step_number(&self, number: usize, total: usize) -> String {
        match self.text(TextKey::StepNumber) {
            Text::StepNumber(format) => format.format(number, total),
            Text::Label(label) => label,
        }
    }
}

impl Default for Translator {
    fn default() -> Self {
        Self::new(Lang::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_builtin_language_covers_every_key() {
        let report = builtin_catalog().coverage_report();
        assert_eq!(report.total_keys, TextKey::ALL.len());
        for locale in &report.locales {
            assert!(locale.missing.is_empty(), "{} is missing {:?}", locale.locale, locale.missing);
        }
    }

    #[test]
    fn lang_parses_region_tags() {
        assert_eq!("zh-CN".parse::<Lang>(), Ok(Lang::Zh));
        assert_eq!("JA".parse::<Lang>(), Ok(Lang::Ja));
        assert_eq!("en_US".parse::<Lang>(), Ok(Lang::En));
        assert!("fr".parse::<Lang>().is_err());
    }

    #[test]
    fn step_number_is_a_formatter() {
        let text = Translator::new(Lang::En).text(TextKey::StepNumber);
        let Text::StepNumber(format) = text else {
            panic!("expected step number formatter");
        };
        assert_eq!(format.format(2, 5), "Step 2 of 5");
    }

    #[test]
    fn labels_per_language() {
        assert_eq!(Translator::new(Lang::Zh).label(TextKey::NextStep), "下一步");
        assert_eq!(Translator::new(Lang::Ja).label(TextKey::SkipStep), "スキップ");
        assert_eq!(Translator::new(Lang::En).label(TextKey::IKnow), "Got it");
    }

    #[test]
    fn custom_catalog_falls_back_to_builtin_wording() {
        let mut catalog = builtin_catalog();
        catalog.extend_locale("en", LocaleStrings::new().with("I_KNOW", "Finish"));
        let t = Translator::with_catalog(Lang::En, Arc::new(catalog));
        assert_eq!(t.label(TextKey::IKnow), "Finish");
        assert_eq!(t.label(TextKey::PrevStep), "Previous");
    }

    #[test]
    fn missing_key_degrades_to_identifier() {
        let t = Translator::with_catalog(Lang::Ja, Arc::new(StringCatalog::new()));
        assert_eq!(t.label(TextKey::SkipStep), "SKIP_STEP");
        assert_eq!(t.step_number(1, 2), "STEP_NUMBER");
    }

    #[test]
    fn zh_step_counter() {
        assert_eq!(Translator::new(Lang::Zh).step_number(3, 4), "第 3 步，共 4 步");
    }
}
