#![allow(dead_code)]

use std::time::Duration;

use serde_json::Value;
use smart_ios::{
    Automator, Driver, DriverError, ElementId, ElementType, Rect, WindowSize,
    automator::settings::{SmartConfig, TimingConfig},
    driver::{
        appium::parse_optional_string,
        gesture::{DRAG_COMMAND, SWIPE_COMMAND, TAP_COMMAND},
        query::{Attribute, Locator, Strategy},
    },
};

// =========================================================================
// Stub elements
// =========================================================================

#[derive(Debug, Clone)]
pub struct StubElement {
    pub id: String,
    pub kind: ElementType,
    pub name: Option<String>,
    pub label: Option<String>,
    pub value: Option<String>,
    pub placeholder: Option<String>,
    pub text: Option<String>,
    pub rect: Option<Rect>,
    pub within: Option<ElementType>,
    pub click_fails: bool,
    pub attributes_fail: bool,
    /// Hidden from queries until this many find calls have been made
    pub appears_after: usize,
    /// Hidden from queries once more than this many find calls were made
    pub vanishes_after: Option<usize>,
}

impl StubElement {
    pub fn new(id: &str, kind: ElementType) -> Self {
        StubElement {
            id: id.into(),
            kind,
            name: None,
            label: None,
            value: None,
            placeholder: None,
            text: None,
            rect: None,
            within: None,
            click_fails: false,
            attributes_fail: false,
            appears_after: 0,
            vanishes_after: None,
        }
    }

    pub fn name(mut self, v: &str) -> Self {
        self.name = Some(v.into());
        self
    }

    pub fn label(mut self, v: &str) -> Self {
        self.label = Some(v.into());
        self
    }

    pub fn value(mut self, v: &str) -> Self {
        self.value = Some(v.into());
        self
    }

    /// `value` as it arrives in a wire payload, decoded the way the Appium
    /// adapter decodes it
    pub fn wire_value(mut self, v: Value) -> Self {
        self.value = parse_optional_string(&v);
        self
    }

    pub fn placeholder(mut self, v: &str) -> Self {
        self.placeholder = Some(v.into());
        self
    }

    pub fn text(mut self, v: &str) -> Self {
        self.text = Some(v.into());
        self
    }

    pub fn at(mut self, x: f64, y: f64, width: f64, height: f64) -> Self {
        self.rect = Some(Rect::new(x, y, width, height));
        self
    }

    pub fn within(mut self, ancestor: ElementType) -> Self {
        self.within = Some(ancestor);
        self
    }

    pub fn click_fails(mut self) -> Self {
        self.click_fails = true;
        self
    }

    pub fn attributes_fail(mut self) -> Self {
        self.attributes_fail = true;
        self
    }

    pub fn appears_after(mut self, find_calls: usize) -> Self {
        self.appears_after = find_calls;
        self
    }

    pub fn vanishes_after(mut self, find_calls: usize) -> Self {
        self.vanishes_after = Some(find_calls);
        self
    }

    fn attribute(&self, attr: Attribute) -> Option<&str> {
        match attr {
            Attribute::Name => self.name.as_deref(),
            Attribute::Label => self.label.as_deref(),
            Attribute::Value => self.value.as_deref(),
        }
    }
}

// =========================================================================
// Stub driver
// =========================================================================

/// Deterministic in-memory driver. Evaluates queries structurally and
/// records every interaction.
#[derive(Debug)]
pub struct StubDriver {
    pub elements: Vec<StubElement>,
    pub window: WindowSize,

    pub find_calls: usize,
    pub queries: Vec<Locator>,
    pub clicks: Vec<String>,
    pub taps: Vec<(i64, i64)>,
    pub swipes: Vec<String>,
    pub drags: Vec<Value>,
    pub cleared: Vec<String>,
    pub typed: Vec<(String, String)>,

    pub fail_all_queries: bool,
    pub fail_predicates: bool,
    pub fail_taps: bool,
    pub fail_native_swipe: bool,
    pub fail_drags: bool,
    pub fail_clear: bool,
    pub fail_send_keys: bool,

    pub alert_open: bool,
    pub alert_response: Option<bool>,
    pub keyboard: Option<bool>,
}

impl StubDriver {
    pub fn new(elements: Vec<StubElement>) -> Self {
        StubDriver {
            elements,
            window: WindowSize { width: 400.0, height: 800.0 },
            find_calls: 0,
            queries: Vec::new(),
            clicks: Vec::new(),
            taps: Vec::new(),
            swipes: Vec::new(),
            drags: Vec::new(),
            cleared: Vec::new(),
            typed: Vec::new(),
            fail_all_queries: false,
            fail_predicates: false,
            fail_taps: false,
            fail_native_swipe: false,
            fail_drags: false,
            fail_clear: false,
            fail_send_keys: false,
            alert_open: false,
            alert_response: None,
            keyboard: None,
        }
    }

    fn element(&self, id: &ElementId) -> Result<&StubElement, DriverError> {
        self.elements
            .iter()
            .find(|e| e.id == id.as_str())
            .ok_or_else(|| DriverError::NoSuchElement(format!("stale element {}", id)))
    }

    fn matches(&self, el: &StubElement, locator: &Locator) -> bool {
        let q = &locator.query;
        if el.appears_after > self.find_calls || el.vanishes_after.is_some_and(|n| self.find_calls > n) {
            return false;
        }
        if q.element_type.is_some_and(|t| t != el.kind) {
            return false;
        }
        if q.within.is_some() && q.within != el.within {
            return false;
        }
        if let Some(text) = &q.text {
            let hit = text.needles.iter().any(|needle| {
                let needle = needle.to_lowercase();
                text.attributes
                    .iter()
                    .filter_map(|a| el.attribute(*a))
                    .any(|v| v.to_lowercase().contains(&needle))
            });
            if !hit {
                return false;
            }
        }
        true
    }

    /// Number of queries issued with the given dialect.
    pub fn queries_with(&self, strategy: Strategy) -> usize {
        self.queries.iter().filter(|l| l.strategy == strategy).count()
    }
}

impl Driver for StubDriver {
    fn find_elements(&mut self, locator: &Locator) -> Result<Vec<ElementId>, DriverError> {
        self.find_calls += 1;
        self.queries.push(locator.clone());
        if self.fail_all_queries || (self.fail_predicates && locator.strategy == Strategy::Predicate) {
            return Err(DriverError::command("find elements", "session busy"));
        }
        let mut found: Vec<ElementId> = self
            .elements
            .iter()
            .filter(|e| self.matches(e, locator))
            .map(|e| ElementId::new(e.id.clone()))
            .collect();
        if let Some(index) = locator.query.index {
            found = found.into_iter().skip(index.saturating_sub(1)).take(1).collect();
        }
        Ok(found)
    }

    fn attribute(&mut self, element: &ElementId, name: &str) -> Result<Option<String>, DriverError> {
        let el = self.element(element)?;
        if el.attributes_fail {
            return Err(DriverError::command("get attribute", "attribute unsupported"));
        }
        Ok(match name {
            "name" => el.name.clone(),
            "label" => el.label.clone(),
            "value" => el.value.clone(),
            "placeholder" => el.placeholder.clone(),
            _ => None,
        })
    }

    fn text(&mut self, element: &ElementId) -> Result<Option<String>, DriverError> {
        let el = self.element(element)?;
        if el.attributes_fail {
            return Err(DriverError::command("get text", "text unsupported"));
        }
        Ok(el.text.clone())
    }

    fn rect(&mut self, element: &ElementId) -> Result<Rect, DriverError> {
        self.element(element)?
            .rect
            .ok_or_else(|| DriverError::command("get rect", "element has no frame"))
    }

    fn click(&mut self, element: &ElementId) -> Result<(), DriverError> {
        if self.element(element)?.click_fails {
            return Err(DriverError::command("click", "element not hittable"));
        }
        self.clicks.push(element.to_string());
        Ok(())
    }

    fn clear(&mut self, element: &ElementId) -> Result<(), DriverError> {
        if self.fail_clear {
            return Err(DriverError::Unsupported("clear".into()));
        }
        self.cleared.push(element.to_string());
        Ok(())
    }

    fn send_keys(&mut self, element: &ElementId, text: &str) -> Result<(), DriverError> {
        if self.fail_send_keys {
            return Err(DriverError::command("send keys", "keyboard not available"));
        }
        self.typed.push((element.to_string(), text.to_string()));
        Ok(())
    }

    fn execute_script(&mut self, command: &str, params: Value) -> Result<Value, DriverError> {
        match command {
            TAP_COMMAND if self.fail_taps => Err(DriverError::command(command, "tap rejected")),
            TAP_COMMAND => {
                let x = params["x"].as_i64().unwrap_or(-1);
                let y = params["y"].as_i64().unwrap_or(-1);
                self.taps.push((x, y));
                Ok(Value::Null)
            }
            SWIPE_COMMAND if self.fail_native_swipe => Err(DriverError::command(command, "swipe unsupported")),
            SWIPE_COMMAND => {
                self.swipes.push(params["direction"].as_str().unwrap_or("").to_string());
                Ok(Value::Null)
            }
            DRAG_COMMAND if self.fail_drags => Err(DriverError::command(command, "drag rejected")),
            DRAG_COMMAND => {
                self.drags.push(params);
                Ok(Value::Null)
            }
            other => Err(DriverError::Unsupported(other.to_string())),
        }
    }

    fn window_size(&mut self) -> Result<WindowSize, DriverError> {
        Ok(self.window)
    }

    fn accept_alert(&mut self) -> Result<(), DriverError> {
        if !self.alert_open {
            return Err(DriverError::NoAlert);
        }
        self.alert_open = false;
        self.alert_response = Some(true);
        Ok(())
    }

    fn dismiss_alert(&mut self) -> Result<(), DriverError> {
        if !self.alert_open {
            return Err(DriverError::NoAlert);
        }
        self.alert_open = false;
        self.alert_response = Some(false);
        Ok(())
    }

    fn is_keyboard_shown(&mut self) -> Result<bool, DriverError> {
        self.keyboard
            .ok_or_else(|| DriverError::Unsupported("is_keyboard_shown".into()))
    }
}

// =========================================================================
// Helpers
// =========================================================================

/// Config with millisecond-scale polling so tests stay fast.
pub fn fast_config() -> SmartConfig {
    SmartConfig {
        timing: TimingConfig::fast(10),
        ..SmartConfig::default()
    }
}

pub fn automator(elements: Vec<StubElement>) -> Automator<StubDriver> {
    Automator::with_config(StubDriver::new(elements), fast_config())
}

pub fn ms(millis: u64) -> Duration {
    Duration::from_millis(millis)
}
