use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::automator::automator::Automator;
use crate::driver::driver::Driver;
use crate::driver::error::DriverError;
use crate::driver::gesture::{Gesture, SwipeDirection};

/// Which way the content should move to reveal the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrollDirection {
    Up,
    Down,
}

impl ScrollDirection {
    /// Scrolling down means dragging the finger up, and vice versa.
    pub fn swipe(&self) -> SwipeDirection {
        match self {
            ScrollDirection::Down => SwipeDirection::Up,
            ScrollDirection::Up => SwipeDirection::Down,
        }
    }
}

impl FromStr for ScrollDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "up" => Ok(ScrollDirection::Up),
            "down" => Ok(ScrollDirection::Down),
            other => Err(format!("unknown scroll direction '{}' (expected up or down)", other)),
        }
    }
}

impl<D: Driver> Automator<D> {
    /// Scroll until `query` is on screen, at most `max_swipes` times.
    ///
    /// Each round runs a short presence check and swipes once on a miss.
    /// Never fails: returns whether the text was found.
    pub fn scroll_to_text(&mut self, query: &str, direction: ScrollDirection, max_swipes: usize) -> bool {
        let presence = self.config().timing.presence_timeout();
        for round in 0..max_swipes {
            if self.find_by_text(query, None, presence).is_ok() {
                debug!(query, swipes = round, "scrolled into view");
                return true;
            }
            self.swipe(direction.swipe());
        }
        info!(query, max_swipes, "text not reached by scrolling");
        false
    }

    /// One swipe gesture: the driver's native swipe, falling back to a
    /// vertical drag across the middle of the screen. Failures are logged
    /// and otherwise ignored.
    pub fn swipe(&mut self, direction: SwipeDirection) {
        let native = Gesture::Swipe { direction };
        if let Err(e) = native.perform(self.driver_mut()) {
            debug!(direction = direction.as_str(), error = %e, "native swipe failed, dragging instead");
            if let Err(e) = self.drag_swipe(direction) {
                debug!(direction = direction.as_str(), error = %e, "drag swipe failed");
            }
        }
    }

    fn drag_swipe(&mut self, direction: SwipeDirection) -> Result<(), DriverError> {
        let size = self.driver_mut().window_size()?;
        let layout = &self.config().layout;
        let (start, end) = match direction {
            SwipeDirection::Up => (layout.swipe_start_fraction, layout.swipe_end_fraction),
            SwipeDirection::Down => (layout.swipe_end_fraction, layout.swipe_start_fraction),
        };
        let x = size.width * 0.5;
        let drag = Gesture::Drag {
            from: (x, size.height * start),
            to: (x, size.height * end),
            duration_secs: self.config().timing.swipe_duration_secs,
        };
        drag.perform(self.driver_mut())
    }
}
