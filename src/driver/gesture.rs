use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::driver::driver::Driver;
use crate::driver::error::DriverError;

pub const TAP_COMMAND: &str = "mobile: tap";
pub const SWIPE_COMMAND: &str = "mobile: swipe";
pub const DRAG_COMMAND: &str = "mobile: dragFromToForDuration";

/// Direction of a swipe gesture (finger movement, not content movement).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SwipeDirection {
    Up,
    Down,
}

impl SwipeDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SwipeDirection::Up => "up",
            SwipeDirection::Down => "down",
        }
    }
}

/// Synthesized touch gestures, sent through `execute_script`.
#[derive(Debug, Clone, PartialEq)]
pub enum Gesture {
    Tap { x: f64, y: f64 },
    Swipe { direction: SwipeDirection },
    Drag { from: (f64, f64), to: (f64, f64), duration_secs: f64 },
}

impl Gesture {
    pub fn command(&self) -> &'static str {
        match self {
            Gesture::Tap { .. } => TAP_COMMAND,
            Gesture::Swipe { .. } => SWIPE_COMMAND,
            Gesture::Drag { .. } => DRAG_COMMAND,
        }
    }

    /// Script arguments. Coordinates are truncated to whole points.
    pub fn params(&self) -> Value {
        match self {
            Gesture::Tap { x, y } => json!({ "x": *x as i64, "y": *y as i64 }),
            Gesture::Swipe { direction } => json!({ "direction": direction.as_str() }),
            Gesture::Drag { from, to, duration_secs } => json!({
                "duration": duration_secs,
                "fromX": from.0 as i64,
                "fromY": from.1 as i64,
                "toX": to.0 as i64,
                "toY": to.1 as i64,
            }),
        }
    }

    pub fn perform<D: Driver + ?Sized>(&self, driver: &mut D) -> Result<(), DriverError> {
        driver.execute_script(self.command(), self.params())?;
        Ok(())
    }
}
