#![forbid(unsafe_code)]

//! Internationalization (i18n) for tourguide.
//!
//! Provides externalized string storage with key-based lookup, locale
//! fallback chains and `{name}` interpolation, plus the built-in tables for
//! the five strings a tour modal shows: next, confirm ("I know"), step
//! number, previous and skip.
//!
//! # How it fits in the system
//! The runtime resolves a [`Translator`] from the guide's language and hands
//! it to the presenter through the modal state. Presenters call
//! [`Translator::text`] with a [`TextKey`]; custom tables can replace or
//! extend the built-in ones through [`StringCatalog`].

pub mod catalog;
pub mod text;

pub use catalog::{CoverageReport, LocaleCoverage, LocaleStrings, StringCatalog};
pub use text::{Lang, StepNumber, Text, TextKey, Translator, builtin_catalog};
