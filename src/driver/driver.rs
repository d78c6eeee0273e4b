use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::driver::error::DriverError;
use crate::driver::query::Locator;

/// Opaque reference to a UI node, valid only within the driver session that
/// produced it. Handles are never cached across operations: each retry
/// re-queries.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ElementId(pub String);

impl ElementId {
    pub fn new(id: impl Into<String>) -> Self {
        ElementId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Screen-space bounding rectangle, in points.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Rect { x, y, width, height }
    }

    pub fn center(&self) -> (f64, f64) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn top_left(&self) -> (f64, f64) {
        (self.x, self.y)
    }

    pub fn bottom_left(&self) -> (f64, f64) {
        (self.x, self.y + self.height)
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindowSize {
    pub width: f64,
    pub height: f64,
}

/// The automation capability the helpers are built on.
///
/// Calls block until the driver answers. A session is a single mutable
/// resource; callers serialize access to it.
pub trait Driver {
    fn find_elements(&mut self, locator: &Locator) -> Result<Vec<ElementId>, DriverError>;

    fn find_element(&mut self, locator: &Locator) -> Result<ElementId, DriverError> {
        self.find_elements(locator)?
            .into_iter()
            .next()
            .ok_or_else(|| DriverError::NoSuchElement(locator.expression()))
    }

    /// Read a named attribute. `Ok(None)` when the element has no such value.
    fn attribute(&mut self, element: &ElementId, name: &str) -> Result<Option<String>, DriverError>;

    /// Rendered text of the element.
    fn text(&mut self, element: &ElementId) -> Result<Option<String>, DriverError>;

    fn rect(&mut self, element: &ElementId) -> Result<Rect, DriverError>;

    fn click(&mut self, element: &ElementId) -> Result<(), DriverError>;

    fn clear(&mut self, element: &ElementId) -> Result<(), DriverError>;

    fn send_keys(&mut self, element: &ElementId, text: &str) -> Result<(), DriverError>;

    /// Run a driver extension command such as `mobile: tap`.
    fn execute_script(&mut self, command: &str, params: Value) -> Result<Value, DriverError>;

    fn window_size(&mut self) -> Result<WindowSize, DriverError>;

    fn accept_alert(&mut self) -> Result<(), DriverError>;

    fn dismiss_alert(&mut self) -> Result<(), DriverError>;

    fn is_keyboard_shown(&mut self) -> Result<bool, DriverError> {
        Err(DriverError::Unsupported("is_keyboard_shown".into()))
    }
}

impl<D: Driver + ?Sized> Driver for &mut D {
    fn find_elements(&mut self, locator: &Locator) -> Result<Vec<ElementId>, DriverError> {
        (**self).find_elements(locator)
    }

    fn find_element(&mut self, locator: &Locator) -> Result<ElementId, DriverError> {
        (**self).find_element(locator)
    }

    fn attribute(&mut self, element: &ElementId, name: &str) -> Result<Option<String>, DriverError> {
        (**self).attribute(element, name)
    }

    fn text(&mut self, element: &ElementId) -> Result<Option<String>, DriverError> {
        (**self).text(element)
    }

    fn rect(&mut self, element: &ElementId) -> Result<Rect, DriverError> {
        (**self).rect(element)
    }

    fn click(&mut self, element: &ElementId) -> Result<(), DriverError> {
        (**self).click(element)
    }

    fn clear(&mut self, element: &ElementId) -> Result<(), DriverError> {
        (**self).clear(element)
    }

    fn send_keys(&mut self, element: &ElementId, text: &str) -> Result<(), DriverError> {
        (**self).send_keys(element, text)
    }

    fn execute_script(&mut self, command: &str, params: Value) -> Result<Value, DriverError> {
        (**self).execute_script(command, params)
    }

    fn window_size(&mut self) -> Result<WindowSize, DriverError> {
        (**self).window_size()
    }

    fn accept_alert(&mut self) -> Result<(), DriverError> {
        (**self).accept_alert()
    }

    fn dismiss_alert(&mut self) -> Result<(), DriverError> {
        (**self).dismiss_alert()
    }

    fn is_keyboard_shown(&mut self) -> Result<bool, DriverError> {
        (**self).is_keyboard_shown()
    }
}
