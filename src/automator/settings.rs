use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::driver::element_type::ElementType;

// ============================================================================
// Tuning for the search and interaction helpers
// ============================================================================

/// All timeouts, thresholds, and layout penalties used by the helpers.
///
/// Every field has a default, so a partial YAML section is enough.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct SmartConfig {
    #[serde(default)]
    pub timing: TimingConfig,
    #[serde(default)]
    pub matching: MatchingConfig,
    #[serde(default)]
    pub layout: LayoutConfig,
    #[serde(default)]
    pub edit_icon: EditIconConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimingConfig {
    #[serde(default = "default_timeout_ms")]
    pub default_timeout_ms: u64,

    /// Sleep between search pipeline iterations
    #[serde(default = "default_poll_ms")]
    pub poll_interval_ms: u64,

    /// Sleep between iterations of the tab and edit-icon recipes
    #[serde(default = "default_recipe_poll_ms")]
    pub recipe_poll_interval_ms: u64,

    /// Budget of a single presence check (scrolling, waiting for absence)
    #[serde(default = "default_presence_ms")]
    pub presence_timeout_ms: u64,

    #[serde(default = "default_click_any_ms")]
    pub click_any_timeout_ms: u64,

    #[serde(default = "default_tab_ms")]
    pub tab_timeout_ms: u64,

    #[serde(default = "default_tap_above_ms")]
    pub tap_above_timeout_ms: u64,

    #[serde(default = "default_edit_icon_ms")]
    pub edit_icon_timeout_ms: u64,

    #[serde(default = "default_swipe_secs")]
    pub swipe_duration_secs: f64,

    #[serde(default = "default_tap_drag_secs")]
    pub tap_drag_duration_secs: f64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            default_timeout_ms: 10_000,
            poll_interval_ms: 500,
            recipe_poll_interval_ms: 300,
            presence_timeout_ms: 1_000,
            click_any_timeout_ms: 6_000,
            tab_timeout_ms: 8_000,
            tap_above_timeout_ms: 6_000,
            edit_icon_timeout_ms: 8_000,
            swipe_duration_secs: 0.5,
            tap_drag_duration_secs: 0.1,
        }
    }
}

impl TimingConfig {
    pub fn default_timeout(&self) -> Duration {
        Duration::from_millis(self.default_timeout_ms)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn recipe_poll_interval(&self) -> Duration {
        Duration::from_millis(self.recipe_poll_interval_ms)
    }

    pub fn presence_timeout(&self) -> Duration {
        Duration::from_millis(self.presence_timeout_ms)
    }

    pub fn click_any_timeout(&self) -> Duration {
        Duration::from_millis(self.click_any_timeout_ms)
    }

    pub fn tab_timeout(&self) -> Duration {
        Duration::from_millis(self.tab_timeout_ms)
    }

    pub fn tap_above_timeout(&self) -> Duration {
        Duration::from_millis(self.tap_above_timeout_ms)
    }

    pub fn edit_icon_timeout(&self) -> Duration {
        Duration::from_millis(self.edit_icon_timeout_ms)
    }

    /// Shrink every wait to `interval_ms`-scale values. Handy for driving the
    /// helpers against in-memory doubles.
    pub fn fast(interval_ms: u64) -> Self {
        Self {
            poll_interval_ms: interval_ms,
            recipe_poll_interval_ms: interval_ms,
            presence_timeout_ms: interval_ms,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchingConfig {
    /// Fallback scan keeps candidates scoring strictly above this
    #[serde(default = "default_fuzzy_threshold")]
    pub fuzzy_threshold: f64,

    /// Tab selection requires at least this score
    #[serde(default = "default_tab_threshold")]
    pub tab_threshold: f64,

    /// Type filter used when the caller passes none
    #[serde(default = "default_types")]
    pub default_types: Vec<ElementType>,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            fuzzy_threshold: 0.45,
            tab_threshold: 0.5,
            default_types: ElementType::TEXT_TYPES.to_vec(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Added when an input's top edge sits above the label's
    #[serde(default = "default_above_penalty")]
    pub above_penalty: f64,

    /// How far above the label an input may start before it counts as above
    #[serde(default = "default_above_tolerance")]
    pub above_tolerance: f64,

    /// Added when an input shares no horizontal span with the label
    #[serde(default = "default_misaligned_penalty")]
    pub misaligned_penalty: f64,

    #[serde(default = "default_tap_above_offset")]
    pub tap_above_offset: f64,

    /// Fallback drag runs between these fractions of the screen height
    #[serde(default = "default_swipe_start")]
    pub swipe_start_fraction: f64,

    #[serde(default = "default_swipe_end")]
    pub swipe_end_fraction: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            above_penalty: 2000.0,
            above_tolerance: 4.0,
            misaligned_penalty: 500.0,
            tap_above_offset: 28.0,
            swipe_start_fraction: 0.7,
            swipe_end_fraction: 0.3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditIconConfig {
    /// Button captions tried with the predicate strategy
    #[serde(default = "default_edit_keywords")]
    pub keywords: Vec<String>,

    /// Hints matched against `name` and `label` of any element (class chain)
    #[serde(default = "default_edit_hints")]
    pub hints: Vec<String>,

    /// Hints matched against `value` only. Kept apart from `hints` so that
    /// free text such as "credit card" in a field does not read as "edit".
    #[serde(default = "default_edit_value_hints")]
    pub value_hints: Vec<String>,
}

impl Default for EditIconConfig {
    fn default() -> Self {
        Self {
            keywords: default_edit_keywords(),
            hints: default_edit_hints(),
            value_hints: default_edit_value_hints(),
        }
    }
}

// Serde default helpers
fn default_timeout_ms() -> u64 { TimingConfig::default().default_timeout_ms }
fn default_poll_ms() -> u64 { TimingConfig::default().poll_interval_ms }
fn default_recipe_poll_ms() -> u64 { TimingConfig::default().recipe_poll_interval_ms }
fn default_presence_ms() -> u64 { TimingConfig::default().presence_timeout_ms }
fn default_click_any_ms() -> u64 { TimingConfig::default().click_any_timeout_ms }
fn default_tab_ms() -> u64 { TimingConfig::default().tab_timeout_ms }
fn default_tap_above_ms() -> u64 { TimingConfig::default().tap_above_timeout_ms }
fn default_edit_icon_ms() -> u64 { TimingConfig::default().edit_icon_timeout_ms }
fn default_swipe_secs() -> f64 { TimingConfig::default().swipe_duration_secs }
fn default_tap_drag_secs() -> f64 { TimingConfig::default().tap_drag_duration_secs }
fn default_fuzzy_threshold() -> f64 { MatchingConfig::default().fuzzy_threshold }
fn default_tab_threshold() -> f64 { MatchingConfig::default().tab_threshold }
fn default_types() -> Vec<ElementType> { ElementType::TEXT_TYPES.to_vec() }
fn default_above_penalty() -> f64 { LayoutConfig::default().above_penalty }
fn default_above_tolerance() -> f64 { LayoutConfig::default().above_tolerance }
fn default_misaligned_penalty() -> f64 { LayoutConfig::default().misaligned_penalty }
fn default_tap_above_offset() -> f64 { LayoutConfig::default().tap_above_offset }
fn default_swipe_start() -> f64 { LayoutConfig::default().swipe_start_fraction }
fn default_swipe_end() -> f64 { LayoutConfig::default().swipe_end_fraction }
fn default_edit_keywords() -> Vec<String> {
    ["Edit", "Change", "Update", "Modify"].iter().map(|s| s.to_string()).collect()
}
fn default_edit_hints() -> Vec<String> {
    ["pencil", "edit"].iter().map(|s| s.to_string()).collect()
}
fn default_edit_value_hints() -> Vec<String> {
    vec!["pencil".to_string()]
}
