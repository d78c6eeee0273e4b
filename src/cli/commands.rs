use std::time::Duration;

use crate::automator::automator::Automator;
use crate::automator::error::SmartError;
use crate::cli::config::{AppConfig, AppiumConfig, Commands};
use crate::driver::appium::AppiumSession;
use crate::driver::driver::Driver;
use crate::driver::error::DriverError;

/// What a subcommand printed and whether it counts as success.
#[derive(Debug, Clone, PartialEq)]
pub struct CommandOutcome {
    pub success: bool,
    pub message: String,
}

impl CommandOutcome {
    fn found(message: String) -> Self {
        CommandOutcome { success: true, message }
    }

    fn flag(success: bool, what: &str) -> Self {
        CommandOutcome {
            success,
            message: format!("{}: {}", what, success),
        }
    }
}

// ============================================================================
// Session setup
// ============================================================================

/// Attach to `session_id` if given, otherwise create a new session.
pub fn open_session(appium: &AppiumConfig, session_id: Option<&str>) -> Result<AppiumSession, DriverError> {
    match session_id {
        Some(id) => Ok(AppiumSession::attach(appium.server_url(), id)),
        None => AppiumSession::create(appium.server_url(), appium.capabilities()),
    }
}

// ============================================================================
// Dispatch
// ============================================================================

/// Run one subcommand against an automator.
pub fn run_command<D: Driver>(automator: &mut Automator<D>, command: &Commands) -> Result<CommandOutcome, SmartError> {
    let timing = automator.config().timing.clone();
    let or_default = |ms: &Option<u64>, default: Duration| ms.map(Duration::from_millis).unwrap_or(default);

    let outcome = match command {
        Commands::Find { text, timeout_ms } => {
            let element = automator.find_by_text(text, None, or_default(timeout_ms, timing.default_timeout()))?;
            CommandOutcome::found(format!("found '{}': {}", text, element))
        }
        Commands::Click { text, timeout_ms } => {
            let element = automator.click_by_text(text, or_default(timeout_ms, timing.default_timeout()))?;
            CommandOutcome::found(format!("tapped '{}': {}", text, element))
        }
        Commands::ClickAny { texts, timeout_ms } => {
            let element = automator.click_any_by_text(texts.as_slice(), or_default(timeout_ms, timing.click_any_timeout()))?;
            CommandOutcome::found(format!("tapped one of {:?}: {}", texts, element))
        }
        Commands::EnterText { label, value, timeout_ms } => {
            let element =
                automator.enter_text_by_label(label, value, or_default(timeout_ms, timing.default_timeout()))?;
            CommandOutcome::found(format!("entered text for '{}': {}", label, element))
        }
        Commands::Scroll { text, direction, max_swipes } => {
            CommandOutcome::flag(automator.scroll_to_text(text, *direction, *max_swipes), "scrolled to text")
        }
        Commands::WaitGone { text, timeout_ms } => CommandOutcome::flag(
            automator.wait_not_present(text, or_default(timeout_ms, timing.default_timeout())),
            "text gone",
        ),
        Commands::Tab { label, timeout_ms } => CommandOutcome::flag(
            automator.click_tab_by_label(label, or_default(timeout_ms, timing.tab_timeout())),
            "tab selected",
        ),
        Commands::TapAbove { text, offset, timeout_ms } => {
            let offset = offset.unwrap_or(automator.config().layout.tap_above_offset);
            CommandOutcome::flag(
                automator.tap_above_text(text, offset, or_default(timeout_ms, timing.tap_above_timeout())),
                "tapped above text",
            )
        }
        Commands::EditIcon { timeout_ms } => {
            let element = automator.click_edit_icon(or_default(timeout_ms, timing.edit_icon_timeout()))?;
            CommandOutcome::found(format!("tapped edit icon: {}", element))
        }
        Commands::Alert { dismiss } => CommandOutcome::flag(automator.tap_system_alert(!dismiss), "alert handled"),
        Commands::FirstPhoto => CommandOutcome::flag(automator.select_first_photo(), "photo selected"),
        Commands::Keyboard => CommandOutcome::flag(automator.is_keyboard_visible(), "keyboard visible"),
    };
    Ok(outcome)
}

/// Open a session per the resolved settings and run one subcommand.
pub fn cmd_run(
    command: &Commands,
    appium: &AppiumConfig,
    config: &AppConfig,
    session_id: Option<&str>,
) -> Result<CommandOutcome, Box<dyn std::error::Error>> {
    let session = open_session(appium, session_id)?;
    let mut automator = Automator::with_config(session, config.smart.clone());
    let outcome = run_command(&mut automator, command)?;
    automator.driver_mut().quit()?;
    Ok(outcome)
}
