#![forbid(unsafe_code)]

//! Read-only boundary into the host document.
//!
//! The tour never mutates the host. It needs exactly four queries:
//! single-element lookup by selector, an element's bounding box in viewport
//! coordinates, an element's offset parent, and the viewport itself.

use std::collections::BTreeMap;

use tourguide_core::geometry::Rect;

/// Opaque handle to a host element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(u64);

impl ElementId {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn get(self) -> u64 {
        self.0
    }
}

/// Queries the tour makes against the host document.
pub trait HostDom {
    /// First element matching `selector`, in document order.
    fn query_selector(&self, selector: &str) -> Option<ElementId>;

    /// Bounding box relative to the viewport. `None` when the element is
    /// detached or not rendered.
    fn bounding_rect(&self, element: ElementId) -> Option<Rect>;

    /// Nearest positioned ancestor, if any.
    fn offset_parent(&self, element: ElementId) -> Option<ElementId>;

    /// The document body.
    fn body(&self) -> ElementId;

    /// Visible viewport in the same coordinates as [`bounding_rect`](Self::bounding_rect).
    fn viewport(&self) -> Rect;
}

impl<H: HostDom + ?Sized> HostDom for &H {
    fn query_selector(&self, selector: &str) -> Option<ElementId> {
        (**self).query_selector(selector)
    }

    fn bounding_rect(&self, element: ElementId) -> Option<Rect> {
        (**self).bounding_rect(element)
    }

    fn offset_parent(&self, element: ElementId) -> Option<ElementId> {
        (**self).offset_parent(element)
    }

    fn body(&self) -> ElementId {
        (**self).body()
    }

    fn viewport(&self) -> Rect {
        (**self).viewport()
    }
}

#[derive(Debug, Clone)]
struct StaticElement {
    selectors: Vec<String>,
    rect: Option<Rect>,
    parent: Option<ElementId>,
}

/// In-memory host: a fixed viewport and a flat list of elements.
///
/// Selectors match by exact string; the earliest inserted element wins,
/// standing in for document order. Used by tests and the headless demo.
#[derive(Debug, Clone)]
pub struct StaticHost {
    viewport: Rect,
    elements: BTreeMap<ElementId, StaticElement>,
    next_id: u64,
}

impl StaticHost {
    /// Element id reserved for the body.
    pub const BODY: ElementId = ElementId(0);

    pub fn new(viewport: Rect) -> Self {
        let mut elements = BTreeMap::new();
        elements.insert(
            Self::BODY,
            StaticElement {
                selectors: vec!["body".to_owned()],
                rect: Some(viewport),
                parent: None,
            },
        );
        Self {
            viewport,
            elements,
            next_id: 1,
        }
    }

    /// Add an element reachable by `selector` and return its handle.
    pub fn insert(&mut self, selector: impl Into<String>, rect: Rect) -> ElementId {
        let id = ElementId(self.next_id);
        self.next_id += 1;
        self.elements.insert(
            id,
            StaticElement {
                selectors: vec![selector.into()],
                rect: Some(rect),
                parent: None,
            },
        );
        id
    }

    /// Builder form of [`insert`](Self::insert).
    #[must_use]
    pub fn with_element(mut self, selector: impl Into<String>, rect: Rect) -> Self {
        self.insert(selector, rect);
        self
    }

    /// Register another selector for an existing element.
    pub fn alias(&mut self, element: ElementId, selector: impl Into<String>) {
        if let Some(el) = self.elements.get_mut(&element) {
            el.selectors.push(selector.into());
        }
    }

    pub fn set_parent(&mut self, element: ElementId, parent: ElementId) {
        if let Some(el) = self.elements.get_mut(&element) {
            el.parent = Some(parent);
        }
    }

    /// Move or resize an element; `None` hides it (no layout box).
    pub fn set_rect(&mut self, element: ElementId, rect: Option<Rect>) {
        if let Some(el) = self.elements.get_mut(&element) {
            el.rect = rect;
        }
    }

    pub fn remove(&mut self, element: ElementId) {
        if element != Self::BODY {
            self.elements.remove(&element);
        }
    }

    pub fn set_viewport(&mut self, viewport: Rect) {
        self.viewport = viewport;
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

impl HostDom for StaticHost {
    fn query_selector(&self, selector: &str) -> Option<ElementId> {
        self.elements
            .iter()
            .find(|(_, el)| el.selectors.iter().any(|s| s == selector))
            .map(|(id, _)| *id)
    }

    fn bounding_rect(&self, element: ElementId) -> Option<Rect> {
        self.elements.get(&element).and_then(|el| el.rect)
    }

    fn offset_parent(&self, element: ElementId) -> Option<ElementId> {
        self.elements.get(&element).and_then(|el| el.parent)
    }

    fn body(&self) -> ElementId {
        Self::BODY
    }

    fn viewport(&self) -> Rect {
        self.viewport
    }
}
