//! Property-based invariant tests for the i18n subsystem.
//!
//! 1. Interpolation with no placeholders is identity
//! 2. Interpolation is not recursive
//! 3. Missing args leave placeholder tokens intact
//! 4. Catalog: missing key always returns None
//! 5. Step counter always contains both numbers, in every language
//! 6. Lang parsing never panics on arbitrary strings
//! 7. Coverage report coverage_percent is in [0, 100]

use tourguide_i18n::catalog::{LocaleStrings, StringCatalog};
use tourguide_i18n::{Lang, TextKey, Translator};
use proptest::prelude::*;

// ═════════════════════════════════════════════════════════════════════════
// 1. Interpolation with no placeholders is identity
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn interpolation_no_placeholders_identity(text in "[a-zA-Z0-9 .,!?]*") {
        let mut catalog = StringCatalog::new();
        catalog.add_locale("en", LocaleStrings::new().with("test", text.as_str()));
        let result = catalog.format("en", "test", &[("x", "y")]);
        prop_assert_eq!(result.as_deref(), Some(text.as_str()));
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2. Interpolation is not recursive
// ═════════════════════════════════════════════════════════════════════════

#[test]
fn interpolation_not_recursive() {
    let mut catalog = StringCatalog::new();
    catalog.add_locale("en", LocaleStrings::new().with("test", "Hello {name}!"));

    let result = catalog.format("en", "test", &[("name", "{name}")]);
    assert_eq!(result, Some("Hello {name}!".into()));

    let result2 = catalog.format("en", "test", &[("name", "{other}"), ("other", "x")]);
    assert_eq!(result2, Some("Hello {other}!".into()));
}

// ═════════════════════════════════════════════════════════════════════════
// 3. Missing args leave placeholder tokens intact
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn missing_args_preserve_tokens(name in "[a-z]{1,10}") {
        let template = format!("Value: {{{name}}}");
        let mut catalog = StringCatalog::new();
        catalog.add_locale("en", LocaleStrings::new().with("test", template.as_str()));
        let result = catalog.format("en", "test", &[]);
        prop_assert_eq!(result, Some(template.clone()));
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. Missing key returns None
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn missing_key_returns_none(key in "[a-z]{1,20}") {
        let catalog = StringCatalog::new();
        prop_assert_eq!(catalog.get("en", &key), None);
        prop_assert_eq!(catalog.format("en", &key, &[]), None);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5. Step counter contains both numbers
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn step_counter_contains_numbers(number in 1usize..500, extra in 0usize..500) {
        let total = number + extra;
        for lang in Lang::ALL {
            let text = Translator::new(lang).step_number(number, total);
            prop_assert!(text.contains(&number.to_string()), "{lang}: {text}");
            prop_assert!(text.contains(&total.to_string()), "{lang}: {text}");
            prop_assert!(!text.contains('{'), "{lang}: unexpanded template {text}");
        }
    }
}

#[test]
fn every_label_is_non_empty() {
    for lang in Lang::ALL {
        let t = Translator::new(lang);
        for key in TextKey::ALL {
            assert!(!t.label(key).is_empty(), "{lang}/{}", key.as_str());
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 6. Lang parsing never panics
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn lang_parse_never_panics(tag in ".*") {
        let _ = tag.parse::<Lang>();
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 7. Coverage report percentage is bounded
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn coverage_percent_bounded(
        n_keys in 0usize..=10,
        n_locales in 1usize..=3,
    ) {
        let mut catalog = StringCatalog::new();
        for locale_idx in 0..n_locales {
            let locale = format!("l{locale_idx}");
            let mut ls = LocaleStrings::new();
            for k in 0..n_keys {
                if k % (locale_idx + 1) == 0 {
                    ls.insert(format!("key_{k}"), format!("val_{k}"));
                }
            }
            catalog.add_locale(&locale, ls);
        }

        let report = catalog.coverage_report();
        for lc in &report.locales {
            prop_assert!(
                lc.coverage_percent >= 0.0 && lc.coverage_percent <= 100.0,
                "coverage {} out of bounds for locale {}",
                lc.coverage_percent, lc.locale
            );
            prop_assert!(
                lc.present + lc.missing.len() == report.total_keys,
                "present ({}) + missing ({}) != total ({})",
                lc.present, lc.missing.len(), report.total_keys
            );
        }
    }
}
