use std::time::Duration;

use tracing::debug;

use crate::automator::automator::Automator;
use crate::automator::deadline::Deadline;
use crate::driver::driver::Driver;

impl<D: Driver> Automator<D> {
    /// Wait until no element matches `query`. Returns false if it is still
    /// present when `timeout` runs out.
    pub fn wait_not_present(&mut self, query: &str, timeout: Duration) -> bool {
        let presence = self.config().timing.presence_timeout();
        let poll = self.config().timing.poll_interval();
        let deadline = Deadline::after(timeout);
        loop {
            if self.find_by_text(query, None, presence).is_err() {
                debug!(query, "text gone");
                return true;
            }
            if !deadline.pause(poll) {
                return false;
            }
        }
    }

    /// Whether the software keyboard is up. False when the driver cannot say.
    pub fn is_keyboard_visible(&mut self) -> bool {
        match self.driver_mut().is_keyboard_shown() {
            Ok(shown) => shown,
            Err(e) => {
                debug!(error = %e, "keyboard state unavailable");
                false
            }
        }
    }
}
