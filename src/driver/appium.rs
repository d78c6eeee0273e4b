use reqwest::Method;
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use tracing::{debug, warn};

use crate::driver::driver::{Driver, ElementId, Rect, WindowSize};
use crate::driver::error::DriverError;
use crate::driver::query::Locator;

/// W3C key under which element references are returned.
pub const ELEMENT_KEY: &str = "element-6066-11e4-a52e-4f735466cecf";

/// Legacy JSONWP key still emitted by some servers.
const LEGACY_ELEMENT_KEY: &str = "ELEMENT";

// ============================================================================
// Wire types
// ============================================================================

/// Body of a find-element(s) request.
#[derive(Debug, Serialize)]
pub struct FindRequest {
    pub using: &'static str,
    pub value: String,
}

impl FindRequest {
    pub fn from_locator(locator: &Locator) -> Self {
        FindRequest {
            using: locator.strategy.using(),
            value: locator.expression(),
        }
    }
}

/// Body of a new-session request.
#[derive(Debug, Serialize)]
pub struct NewSessionRequest {
    pub capabilities: CapabilitiesRequest,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CapabilitiesRequest {
    pub always_match: Map<String, Value>,
}

/// Every W3C response wraps its payload in `value`.
#[derive(Debug, Deserialize)]
pub struct W3cResponse {
    #[serde(default)]
    pub value: Value,
}

/// Error payload carried in `value` on failure.
#[derive(Debug, Deserialize)]
pub struct W3cError {
    pub error: String,
    #[serde(default)]
    pub message: String,
}

/// Map a failed response payload to a driver error.
pub fn map_error(command: &str, value: &Value) -> DriverError {
    match serde_json::from_value::<W3cError>(value.clone()) {
        Ok(err) => match err.error.as_str() {
            "no such element" => DriverError::NoSuchElement(err.message),
            "no such alert" => DriverError::NoAlert,
            _ => DriverError::command(command, format!("{}: {}", err.error, err.message)),
        },
        Err(_) => DriverError::command(command, value.to_string()),
    }
}

/// Extract one element reference from a response payload.
pub fn parse_element(value: &Value) -> Result<ElementId, DriverError> {
    value
        .get(ELEMENT_KEY)
        .or_else(|| value.get(LEGACY_ELEMENT_KEY))
        .and_then(Value::as_str)
        .map(ElementId::new)
        .ok_or_else(|| DriverError::command("find element", format!("no element reference in {}", value)))
}

pub fn parse_elements(value: &Value) -> Result<Vec<ElementId>, DriverError> {
    let items = value
        .as_array()
        .ok_or_else(|| DriverError::command("find elements", format!("expected array, got {}", value)))?;
    items.iter().map(parse_element).collect()
}

/// Read an optional string payload. Only JSON strings count; `null`,
/// numbers and booleans are treated as absent.
pub fn parse_optional_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        _ => None,
    }
}

// ============================================================================
// Session
// ============================================================================

/// A driver session on an Appium server, spoken to over W3C WebDriver HTTP.
pub struct AppiumSession {
    client: Client,
    base_url: String,
    session_id: String,
    owned: bool,
}

impl AppiumSession {
    /// Start a new session with the given capabilities.
    pub fn create(server_url: &str, capabilities: Map<String, Value>) -> Result<Self, DriverError> {
        let client = Client::new();
        let base_url = server_url.trim_end_matches('/').to_string();
        let body = NewSessionRequest {
            capabilities: CapabilitiesRequest {
                always_match: capabilities,
            },
        };
        let value = send(&client, Method::POST, &format!("{}/session", base_url), "new session", Some(&body))?;

        let session_id = value
            .get("sessionId")
            .and_then(Value::as_str)
            .ok_or_else(|| DriverError::command("new session", "no sessionId in response"))?
            .to_string();

        debug!(session = %session_id, "created Appium session");
        Ok(AppiumSession {
            client,
            base_url,
            session_id,
            owned: true,
        })
    }

    /// Attach to a session someone else created. It is not deleted on drop.
    pub fn attach(server_url: &str, session_id: &str) -> Self {
        AppiumSession {
            client: Client::new(),
            base_url: server_url.trim_end_matches('/').to_string(),
            session_id: session_id.to_string(),
            owned: false,
        }
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// Delete the session if this process created it.
    pub fn quit(&mut self) -> Result<(), DriverError> {
        if !self.owned {
            return Ok(());
        }
        self.owned = false;
        let url = format!("{}/session/{}", self.base_url, self.session_id);
        send::<()>(&self.client, Method::DELETE, &url, "delete session", None)?;
        Ok(())
    }

    fn call<B: Serialize>(
        &self,
        method: Method,
        path: &str,
        command: &str,
        body: Option<&B>,
    ) -> Result<Value, DriverError> {
        let url = format!("{}/session/{}{}", self.base_url, self.session_id, path);
        send(&self.client, method, &url, command, body)
    }

    fn get(&self, path: &str, command: &str) -> Result<Value, DriverError> {
        self.call::<()>(Method::GET, path, command, None)
    }

    fn post<B: Serialize>(&self, path: &str, command: &str, body: &B) -> Result<Value, DriverError> {
        self.call(Method::POST, path, command, Some(body))
    }
}

/// Send a request and unwrap the W3C envelope.
fn send<B: Serialize>(
    client: &Client,
    method: Method,
    url: &str,
    command: &str,
    body: Option<&B>,
) -> Result<Value, DriverError> {
    let mut request = client.request(method, url);
    if let Some(body) = body {
        request = request.json(body);
    }
    let response = request.send()?;
    let status = response.status();
    let text = response.text()?;

    let parsed: W3cResponse = if text.trim().is_empty() {
        W3cResponse { value: Value::Null }
    } else {
        serde_json::from_str(&text).map_err(|e| DriverError::Json {
            context: format!("{} response", command),
            source: e,
        })?
    };

    if !status.is_success() {
        return Err(map_error(command, &parsed.value));
    }
    Ok(parsed.value)
}

impl Driver for AppiumSession {
    fn find_elements(&mut self, locator: &Locator) -> Result<Vec<ElementId>, DriverError> {
        let value = self.post("/elements", "find elements", &FindRequest::from_locator(locator))?;
        parse_elements(&value)
    }

    fn find_element(&mut self, locator: &Locator) -> Result<ElementId, DriverError> {
        let value = self.post("/element", "find element", &FindRequest::from_locator(locator))?;
        parse_element(&value)
    }

    fn attribute(&mut self, element: &ElementId, name: &str) -> Result<Option<String>, DriverError> {
        let value = self.get(&format!("/element/{}/attribute/{}", element, name), "get attribute")?;
        Ok(parse_optional_string(&value))
    }

    fn text(&mut self, element: &ElementId) -> Result<Option<String>, DriverError> {
        let value = self.get(&format!("/element/{}/text", element), "get text")?;
        Ok(parse_optional_string(&value))
    }

    fn rect(&mut self, element: &ElementId) -> Result<Rect, DriverError> {
        let value = self.get(&format!("/element/{}/rect", element), "get rect")?;
        serde_json::from_value(value).map_err(|e| DriverError::Json {
            context: "element rect".into(),
            source: e,
        })
    }

    fn click(&mut self, element: &ElementId) -> Result<(), DriverError> {
        self.post(&format!("/element/{}/click", element), "click", &json!({}))?;
        Ok(())
    }

    fn clear(&mut self, element: &ElementId) -> Result<(), DriverError> {
        self.post(&format!("/element/{}/clear", element), "clear", &json!({}))?;
        Ok(())
    }

    fn send_keys(&mut self, element: &ElementId, text: &str) -> Result<(), DriverError> {
        self.post(&format!("/element/{}/value", element), "send keys", &json!({ "text": text }))?;
        Ok(())
    }

    fn execute_script(&mut self, command: &str, params: Value) -> Result<Value, DriverError> {
        self.post(
            "/execute/sync",
            command,
            &json!({ "script": command, "args": [params] }),
        )
    }

    fn window_size(&mut self) -> Result<WindowSize, DriverError> {
        let value = self.get("/window/rect", "get window rect")?;
        serde_json::from_value(value).map_err(|e| DriverError::Json {
            context: "window rect".into(),
            source: e,
        })
    }

    fn accept_alert(&mut self) -> Result<(), DriverError> {
        self.post("/alert/accept", "accept alert", &json!({}))?;
        Ok(())
    }

    fn dismiss_alert(&mut self) -> Result<(), DriverError> {
        self.post("/alert/dismiss", "dismiss alert", &json!({}))?;
        Ok(())
    }

    fn is_keyboard_shown(&mut self) -> Result<bool, DriverError> {
        let value = self.get("/appium/device/is_keyboard_shown", "is keyboard shown")?;
        Ok(value.as_bool().unwrap_or(false))
    }
}

impl Drop for AppiumSession {
    fn drop(&mut self) {
        // Best-effort cleanup
        if let Err(e) = self.quit() {
            warn!(session = %self.session_id, error = %e, "failed to delete Appium session");
        }
    }
}
