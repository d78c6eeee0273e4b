use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use tracing::warn;

use crate::automator::settings::SmartConfig;
use crate::interact::scroll::ScrollDirection;

pub const DEFAULT_CONFIG_PATH: &str = "smart-ios.yaml";
pub const DEFAULT_APPIUM_URL: &str = "http://127.0.0.1:4723";

// ============================================================================
// CLI Argument Parsing (clap derive)
// ============================================================================

#[derive(Parser, Debug)]
#[command(
    name = "smart-ios",
    version,
    about = "Resilient text-based find and tap helpers for iOS apps driven by Appium"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Appium server URL
    #[arg(long, global = true)]
    pub appium_url: Option<String>,

    /// Attach to an existing session instead of creating one
    #[arg(long, global = true)]
    pub session: Option<String>,

    /// Path to config file (default: smart-ios.yaml in current dir)
    #[arg(long, global = true)]
    pub config: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Locate an element by text and print its id
    Find {
        text: String,

        /// Timeout in milliseconds (default from config)
        #[arg(long)]
        timeout_ms: Option<u64>,
    },

    /// Tap the element matching a text
    Click {
        text: String,

        #[arg(long)]
        timeout_ms: Option<u64>,
    },

    /// Tap the first of several texts that can be found
    ClickAny {
        #[arg(required = true)]
        texts: Vec<String>,

        /// Timeout per text in milliseconds
        #[arg(long)]
        timeout_ms: Option<u64>,
    },

    /// Type into the input field belonging to a label
    EnterText {
        label: String,
        value: String,

        #[arg(long)]
        timeout_ms: Option<u64>,
    },

    /// Scroll until a text is visible
    Scroll {
        text: String,

        /// Direction the content should move: up or down
        #[arg(long, default_value = "down")]
        direction: ScrollDirection,

        #[arg(long, default_value_t = 10)]
        max_swipes: usize,
    },

    /// Wait until a text disappears
    WaitGone {
        text: String,

        #[arg(long)]
        timeout_ms: Option<u64>,
    },

    /// Select a tab-bar item by its label
    Tab {
        label: String,

        #[arg(long)]
        timeout_ms: Option<u64>,
    },

    /// Tap a fixed distance above a text
    TapAbove {
        text: String,

        /// Points above the text's top edge (default from config)
        #[arg(long)]
        offset: Option<f64>,

        #[arg(long)]
        timeout_ms: Option<u64>,
    },

    /// Tap an edit or pencil affordance
    EditIcon {
        #[arg(long)]
        timeout_ms: Option<u64>,
    },

    /// Accept (default) or dismiss a system alert
    Alert {
        #[arg(long)]
        dismiss: bool,
    },

    /// Select the first photo in a picker
    FirstPhoto,

    /// Report whether the software keyboard is visible
    Keyboard,
}

// ============================================================================
// Config File Model (optional YAML)
// ============================================================================

/// Optional YAML config file: `smart-ios.yaml`
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub appium: AppiumConfig,
    #[serde(default)]
    pub smart: SmartConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppiumConfig {
    pub url: Option<String>,
    pub udid: Option<String>,
    pub device_name: Option<String>,
    pub platform_version: Option<String>,
    pub bundle_id: Option<String>,
    pub app: Option<String>,

    /// Extra capabilities, merged over the defaults
    #[serde(default)]
    pub capabilities: Map<String, Value>,
}

impl AppiumConfig {
    /// Fill unset fields from `lookup` (normally the process environment).
    pub fn with_env_fallback<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let pick = |current: Option<String>, keys: &[&str]| current.or_else(|| keys.iter().find_map(|&k| lookup(k)));
        self.url = pick(self.url, &["APPIUM_URL"]);
        self.udid = pick(self.udid, &["IOS_UDID", "DEVICE_UDID"]);
        self.device_name = pick(self.device_name, &["IOS_DEVICE_NAME", "DEVICE_NAME"]);
        self.platform_version = pick(self.platform_version, &["IOS_PLATFORM_VERSION", "PLATFORM_VERSION"]);
        self.bundle_id = pick(self.bundle_id, &["BUNDLE_ID"]);
        self.app = pick(self.app, &["APP"]);
        self
    }

    pub fn server_url(&self) -> &str {
        self.url.as_deref().unwrap_or(DEFAULT_APPIUM_URL)
    }

    /// Capabilities for a new XCUITest session.
    pub fn capabilities(&self) -> Map<String, Value> {
        let mut caps = Map::new();
        caps.insert("platformName".into(), json!("iOS"));
        caps.insert("appium:automationName".into(), json!("XCUITest"));
        caps.insert("appium:newCommandTimeout".into(), json!(120));
        caps.insert("appium:noReset".into(), json!(true));
        caps.insert("appium:autoAcceptAlerts".into(), json!(true));

        let optional = [
            ("appium:udid", &self.udid),
            ("appium:deviceName", &self.device_name),
            ("appium:platformVersion", &self.platform_version),
            ("appium:bundleId", &self.bundle_id),
            ("appium:app", &self.app),
        ];
        for (key, value) in optional {
            if let Some(v) = value {
                caps.insert(key.into(), json!(v));
            }
        }

        for (key, value) in &self.capabilities {
            caps.insert(key.clone(), value.clone());
        }
        caps
    }
}

// ============================================================================
// Config File Loading
// ============================================================================

/// Load config from a YAML file. Returns defaults if the file is missing or
/// malformed.
pub fn load_config(path: Option<&str>) -> AppConfig {
    let config_path = path.unwrap_or(DEFAULT_CONFIG_PATH);
    match std::fs::read_to_string(config_path) {
        Ok(content) => serde_yaml::from_str(&content).unwrap_or_else(|e| {
            warn!(path = config_path, error = %e, "ignoring malformed config file");
            AppConfig::default()
        }),
        Err(_) => AppConfig::default(),
    }
}

/// Resolve the Appium settings: CLI > config file > environment > defaults.
pub fn resolve_appium(cli_url: Option<&str>, config: &AppConfig) -> AppiumConfig {
    let mut appium = config.appium.clone().with_env_fallback(|k| std::env::var(k).ok());
    if let Some(url) = cli_url {
        appium.url = Some(url.to_string());
    }
    appium
}
