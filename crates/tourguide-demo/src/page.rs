//! Static page layouts: the element boxes a replay runs against.
//!
//! ```json
//! {
//!   "viewport": { "width": 1280, "height": 800 },
//!   "elements": [
//!     { "selector": "#search", "x": 40, "y": 16, "width": 320, "height": 36 },
//!     { "selector": "#panel", "x": 900, "y": 80, "width": 360, "height": 600,
//!       "aliases": [".side-panel"] },
//!     { "selector": "#panel-help", "x": 920, "y": 100, "width": 40, "height": 40,
//!       "parent": "#panel" }
//!   ]
//! }
//! ```

use std::path::Path;

use serde::Deserialize;
use tourguide::{HostDom, Rect, StaticHost};

use crate::error::{DemoError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct ViewportSpec {
    pub width: i32,
    pub height: i32,
}

impl Default for ViewportSpec {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 800,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ElementSpec {
    pub selector: String,
    #[serde(default)]
    pub aliases: Vec<String>,
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    /// Selector of the offset parent. Defaults to the body.
    #[serde(default)]
    pub parent: Option<String>,
    /// Present in the page but not rendered (no bounding box).
    #[serde(default)]
    pub detached: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PageLayout {
    #[serde(default)]
    pub viewport: ViewportSpec,
    #[serde(default)]
    pub elements: Vec<ElementSpec>,
}

impl PageLayout {
    pub fn from_json_str(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(DemoError::MissingPath {
                path: path.to_path_buf(),
            });
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// Build the host. Parents are linked after every element exists, so
    /// declaration order does not matter.
    pub fn build_host(&self) -> Result<StaticHost> {
        let viewport = Rect::from_size(self.viewport.width, self.viewport.height);
        if viewport.is_empty() {
            return Err(DemoError::invalid("viewport must have a positive size"));
        }
        let mut host = StaticHost::new(viewport);
        let mut ids = Vec::with_capacity(self.elements.len());
        for el in &self.elements {
            let id = host.insert(
                el.selector.clone(),
                Rect::new(el.x, el.y, el.width, el.height),
            );
            for alias in &el.aliases {
                host.alias(id, alias.clone());
            }
            if el.detached {
                host.set_rect(id, None);
            }
            ids.push(id);
        }
        for (el, &id) in self.elements.iter().zip(&ids) {
            let Some(parent) = el.parent.as_deref() else {
                continue;
            };
            let parent_id = host.query_selector(parent).ok_or_else(|| {
                DemoError::invalid(format!(
                    "element {:?} names unknown parent {parent:?}",
                    el.selector
                ))
            })?;
            host.set_parent(id, parent_id);
        }
        tracing::debug!(
            message = "demo.page_loaded",
            elements = self.elements.len(),
            width = viewport.width,
            height = viewport.height
        );
        Ok(host)
    }
}
