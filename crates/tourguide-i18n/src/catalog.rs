#![forbid(unsafe_code)]

//! String catalog with locale fallback and interpolation.
//!
//! # Invariants
//!
//! 1. Lookup walks `locale`, then its base language (`ja-JP` → `ja`), then
//!    the catalog's fallback locales in order. The first hit wins.
//! 2. Interpolation is single-pass: substituted values are never re-scanned,
//!    so a value containing `{name}` is emitted verbatim.
//! 3. Placeholders without a matching argument are left intact.

use std::collections::{BTreeSet, HashMap};

/// The strings of one locale.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocaleStrings {
    entries: HashMap<String, String>,
}

impl LocaleStrings {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a string.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    /// Builder form of [`insert`](Self::insert).
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

/// Per-locale translation coverage.
#[derive(Debug, Clone, PartialEq)]
pub struct LocaleCoverage {
    pub locale: String,
    pub present: usize,
    pub missing: Vec<String>,
    pub coverage_percent: f64,
}

/// Coverage of every registered locale against the union of all keys.
#[derive(Debug, Clone, PartialEq)]
pub struct CoverageReport {
    pub total_keys: usize,
    pub locales: Vec<LocaleCoverage>,
}

/// A set of locales plus the fallback chain used when a key is missing.
#[derive(Debug, Clone, Default)]
pub struct StringCatalog {
    locales: HashMap<String, LocaleStrings>,
    fallback: Vec<String>,
}

impl StringCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) a locale.
    pub fn add_locale(&mut self, locale: &str, strings: LocaleStrings) {
        self.locales.insert(locale.to_owned(), strings);
    }

    /// Merge strings into an existing locale, overriding existing keys.
    pub fn extend_locale(&mut self, locale: &str, strings: LocaleStrings) {
        let target = self.locales.entry(locale.to_owned()).or_default();
        target.entries.extend(strings.entries);
    }

    /// Set the locales consulted after the requested one.
    #[must_use]
    pub fn with_fallback<I, S>(mut self, chain: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fallback = chain.into_iter().map(Into::into).collect();
        self
    }

    /// Look up a raw string through the fallback chain.
    pub fn get(&self, locale: &str, key: &str) -> Option<&str> {
        self.chain(locale)
            .filter_map(|loc| self.locales.get(loc))
            .find_map(|strings| strings.get(key))
    }

    /// Look up and interpolate `{name}` placeholders.
    pub fn format(&self, locale: &str, key: &str, args: &[(&str, &str)]) -> Option<String> {
        self.get(locale, key).map(|template| interpolate(template, args))
    }

    /// Coverage of every locale against the union of all keys.
    pub fn coverage_report(&self) -> CoverageReport {
        let all_keys: BTreeSet<&str> = self.locales.values().flat_map(LocaleStrings::keys).collect();
        let total_keys = all_keys.len();

        let mut names: Vec<&String> = self.locales.keys().collect();
        names.sort();

        let locales = names
            .into_iter()
            .map(|name| {
                let strings = &self.locales[name];
                let missing: Vec<String> = all_keys
                    .iter()
                    .filter(|key| strings.get(key).is_none())
                    .map(|key| (*key).to_owned())
                    .collect();
                let present = total_keys - missing.len();
                let coverage_percent = if total_keys == 0 {
                    100.0
                } else {
                    present as f64 * 100.0 / total_keys as f64
                };
                LocaleCoverage {
                    locale: name.clone(),
                    present,
                    missing,
                    coverage_percent,
                }
            })
            .collect();

        CoverageReport {
            total_keys,
            locales,
        }
    }

    fn chain<'a>(&'a self, locale: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        let base = base_language(locale);
        let base = (base != locale).then_some(base);
        std::iter::once(locale)
            .chain(base)
            .chain(self.fallback.iter().map(String::as_str))
    }
}

/// `zh-CN` → `zh`, `en_US` → `en`, `ja` → `ja`.
fn base_language(locale: &str) -> &str {
    locale.split(['-', '_']).next().unwrap_or(locale)
}

/// Replace `{name}` tokens in one pass.
pub fn interpolate(template: &str, args: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        match after.find('}') {
            Some(close) => {
                let name = &after[..close];
                match args.iter().find(|(k, _)| *k == name) {
                    Some((_, value)) => out.push_str(value),
                    None => {
                        out.push('{');
                        out.push_str(name);
                        out.push('}');
                    }
                }
                rest = &after[close + 1..];
            }
            None => {
                out.push_str(&rest[open..]);
                rest = "";
            }
        }
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> StringCatalog {
        let mut catalog = StringCatalog::new().with_fallback(["en"]);
        catalog.add_locale(
            "en",
            LocaleStrings::new()
                .with("NEXT_STEP", "Next")
                .with("SKIP_STEP", "Skip"),
        );
        catalog.add_locale("ja", LocaleStrings::new().with("NEXT_STEP", "次へ"));
        catalog
    }

    #[test]
    fn direct_hit() {
        assert_eq!(catalog().get("ja", "NEXT_STEP"), Some("次へ"));
    }

    #[test]
    fn falls_back_to_chain() {
        assert_eq!(catalog().get("ja", "SKIP_STEP"), Some("Skip"));
    }

    #[test]
    fn region_falls_back_to_base_language() {
        assert_eq!(catalog().get("ja-JP", "NEXT_STEP"), Some("次へ"));
    }

    #[test]
    fn interpolation_replaces_known_and_keeps_unknown() {
        let out = interpolate("Step {number} of {total} {x}", &[("number", "2"), ("total", "5")]);
        assert_eq!(out, "Step 2 of 5 {x}");
    }

    #[test]
    fn interpolation_handles_unclosed_brace() {
        assert_eq!(interpolate("a {b", &[("b", "x")]), "a {b");
    }

    #[test]
    fn extend_locale_overrides() {
        let mut catalog = catalog();
        catalog.extend_locale("en", LocaleStrings::new().with("NEXT_STEP", "Continue"));
        assert_eq!(catalog.get("en", "NEXT_STEP"), Some("Continue"));
        assert_eq!(catalog.get("en", "SKIP_STEP"), Some("Skip"));
    }

    #[test]
    fn coverage_counts_missing_keys() {
        let report = catalog().coverage_report();
        assert_eq!(report.total_keys, 2);
        let ja = report.locales.iter().find(|l| l.locale == "ja").unwrap();
        assert_eq!(ja.present, 1);
        assert_eq!(ja.missing, vec!["SKIP_STEP".to_string()]);
        assert!((ja.coverage_percent - 50.0).abs() < f64::EPSILON);
    }
}
