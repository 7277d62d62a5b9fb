#![forbid(unsafe_code)]

//! Headless replay tool for tourguide.
//!
//! Loads a guide definition, builds a static page from a JSON layout and
//! drives a [`TourController`](tourguide::TourController) through a script,
//! printing one JSON line per action.

pub mod cli;
pub mod error;
pub mod page;
pub mod replay;
pub mod script;

pub use cli::run_from_env;
pub use error::{DemoError, Result};
